pub mod client;
pub mod prompts;

pub use client::LlmClient;
pub use prompts::{parse_desambiguacao, prompt_desambiguacao, prompt_resumo, Desambiguacao};
