pub mod config;
pub mod error;
pub mod export;
pub mod llm;
pub mod models;
pub mod reader;
pub mod service;

pub use config::AppConfig;
pub use error::ExtractorError;
pub use service::DocumentPipeline;
