//! Wire types for the PromptBuilder HTTP API, the data snapshot format and the
//! OpenRouter-compatible upstream.
//!
//! Public API payloads use camelCase field names; upstream payloads keep the
//! snake_case names the providers emit.

pub mod category;
pub mod generate;
pub mod openrouter;
pub mod provider;
pub mod snapshot;
pub mod template;

pub use category::{CategoryDto, CreateCategoryDto, UpdateCategoryDto};
pub use generate::{GeneratePromptDto, LlmResponseDto};
pub use provider::{ApiProviderDto, CreateApiProviderDto, LlmModelDto, UpdateApiProviderDto};
pub use snapshot::{CategoryRecord, DataSnapshot, ProviderRecord, TemplateRecord};
pub use template::{CreatePromptTemplateDto, PromptTemplateDto, UpdatePromptTemplateDto};
