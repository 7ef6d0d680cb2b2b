pub mod category_tree;
pub mod config;
pub mod db;
pub mod error;
pub mod llm;
pub mod render;
pub mod seed;
pub mod server;

pub use error::PromptBuilderError;
