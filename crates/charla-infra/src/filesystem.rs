//! Data directory resolution.

use std::path::PathBuf;

/// Resolve the data directory from environment or the working directory.
///
/// Priority:
/// 1. `CHARLA_DATA_DIR` environment variable
/// 2. The current working directory
///
/// `config.toml`, the documents directory, the embedding cache and the
/// static client all live under this directory.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CHARLA_DATA_DIR") {
        return PathBuf::from(dir);
    }
    PathBuf::from(".")
}
