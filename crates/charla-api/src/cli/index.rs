//! `charla index`: build or load the embedding cache.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use charla_core::retrieval::BoxEmbedder;
use charla_infra::corpus::CorpusBuilder;
use charla_infra::embedding::OpenAiEmbedder;

use crate::state::{api_key_from_env, load_settings, upstream_http};

/// Run the `index` command.
pub async fn index(data_dir: &Path, rebuild: bool, json: bool) -> anyhow::Result<()> {
    let config = load_settings(data_dir).await;
    let http = upstream_http(&config, api_key_from_env()?)?;
    let embedder = Arc::new(BoxEmbedder::new(OpenAiEmbedder::new(
        http,
        config.upstream.embedding_model.clone(),
    )));

    let builder = CorpusBuilder::new(data_dir, &config.corpus, embedder);
    let store = if rebuild {
        builder.rebuild().await?
    } else {
        builder.load_or_build().await?
    };

    let documents: BTreeSet<&str> = store.chunks().iter().map(|c| c.source.as_str()).collect();

    if json {
        let report = serde_json::json!({
            "chunks": store.len(),
            "documents": documents,
            "cache": builder.cache_path().display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {} chunks from {} documents",
        console::style("✓").green(),
        console::style(store.len()).bold(),
        documents.len()
    );
    for doc in &documents {
        println!("    {}", console::style(doc).dim());
    }
    println!(
        "  {} {}",
        console::style("cache:").dim(),
        console::style(builder.cache_path().display()).cyan()
    );
    println!();
    Ok(())
}
