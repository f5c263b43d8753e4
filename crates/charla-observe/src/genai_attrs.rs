//! OpenTelemetry GenAI Semantic Convention attribute constants.
//!
//! Usable as `tracing` span field names via `{ CONST } = value`.
//!
//! Span naming convention: `"{operation} {model}"` (e.g., `"chat gpt-4o-mini"`)

/// The name of the operation being performed (e.g., "chat").
pub const GEN_AI_OPERATION_NAME: &str = "gen_ai.operation.name";

/// The name of the GenAI provider (e.g., "openai").
pub const GEN_AI_PROVIDER_NAME: &str = "gen_ai.provider.name";

/// The model ID requested (e.g., "gpt-4o-mini").
pub const GEN_AI_REQUEST_MODEL: &str = "gen_ai.request.model";

/// Conversation identifier, when the client supplied one.
pub const GEN_AI_CONVERSATION_ID: &str = "gen_ai.conversation.id";

// --- Operation name values ---

/// Streaming chat completion.
pub const OP_CHAT: &str = "chat";

/// Audio transcription.
pub const OP_TRANSCRIBE: &str = "transcribe";

/// Speech synthesis.
pub const OP_SPEECH: &str = "speech";
