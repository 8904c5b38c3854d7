use serde_json::json;
use std::time::Duration;

use crate::config::LlmConfig;

/// Cliente de um servidor de modelos local com endpoint compatível com
/// OpenAI (llama.cpp server, ollama). O núcleo trata a resposta como texto
/// opaco; a interpretação fica em [`crate::llm::prompts`].
pub struct LlmClient {
    http: reqwest::Client,
    endpoint: String,
    max_tokens: u32,
    temperature: f32,
}

impl LlmClient {
    pub fn new(config: &LlmConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    /// Envia o prompt e devolve o texto da primeira escolha.
    pub async fn completar(&self, modelo: &str, prompt: &str) -> Result<String, reqwest::Error> {
        let corpo = json!({
            "model": modelo,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
        });

        let resposta = self
            .http
            .post(&self.endpoint)
            .json(&corpo)
            .send()
            .await?
            .error_for_status()?;

        let valor: serde_json::Value = resposta.json().await?;
        Ok(valor["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or_default()
            .trim()
            .to_string())
    }

    /// Variante que nunca falha: o erro vira uma string JSON embutida no
    /// resultado do processo, preservando o restante do lote.
    pub async fn completar_seguro(&self, nome: &str, modelo: &str, prompt: &str) -> String {
        match self.completar(modelo, prompt).await {
            Ok(texto) => texto,
            Err(e) => {
                tracing::error!("Falha ao consultar modelo {}: {}", nome, e);
                format!(r#"{{"erro": "Falha ao rodar modelo local {nome}: {e}"}}"#)
            }
        }
    }
}
