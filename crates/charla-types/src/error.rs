use thiserror::Error;

/// Errors from the embedding collaborator.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding request failed: {0}")]
    Request(String),

    #[error("embedding response malformed: {0}")]
    Malformed(String),
}

/// Errors while loading or building the embedded corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus I/O error at {path}: {message}")]
    Io { path: String, message: String },

    #[error("corpus cache is not valid JSON: {0}")]
    Cache(String),

    #[error("unreadable document {path}: {message}")]
    Document { path: String, message: String },

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
}

/// Errors from transcription and speech-synthesis collaborators.
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech request failed: {0}")]
    Request(String),

    #[error("speech provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("speech response malformed: {0}")]
    Malformed(String),
}

/// Errors from session store lookups.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session not found")]
    NotFound,
}

/// Errors that fail a chat request before any streamed output is sent.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("upstream model call failed: {0}")]
    Upstream(#[from] crate::llm::LlmError),

    #[error("context retrieval failed: {0}")]
    Retrieval(#[from] EmbeddingError),
}
