mod llm;
mod promptbuilder;

pub use llm::LlmError;
pub use promptbuilder::{ApiErrorBody, ApiErrorObject, PromptBuilderError};
