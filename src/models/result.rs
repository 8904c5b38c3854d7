use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::ValueCandidate;

/// Veredito do teste de arquivamento por inadmissibilidade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusAdmissibilidade {
    Sim,
    Nao,
    /// Apenas quando a sequência de parágrafos está vazia.
    Indeterminado,
}

impl StatusAdmissibilidade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sim => "Sim",
            Self::Nao => "Não",
            Self::Indeterminado => "Indeterminado",
        }
    }
}

/// Metadados extraídos da primeira página do documento (melhor esforço).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseMetadata {
    pub nome_subpasta: String,
    pub nome_arquivo: String,
    pub numero_processo: String,
    pub natureza: String,
    pub numero_acordao: String,
}

pub const NAO_ENCONTRADO: &str = "NÃO ENCONTRADO";
pub const NAO_ESPECIFICADO: &str = "NÃO ESPECIFICADO";
pub const SEM_DOCUMENTO: &str = "Nenhum Documento Encontrado";

impl CaseMetadata {
    /// Metadados-sentinela para um processo ainda não inspecionado.
    pub fn vazio(nome_subpasta: &str) -> Self {
        Self {
            nome_subpasta: nome_subpasta.to_string(),
            nome_arquivo: SEM_DOCUMENTO.to_string(),
            numero_processo: NAO_ENCONTRADO.to_string(),
            natureza: NAO_ESPECIFICADO.to_string(),
            numero_acordao: NAO_ENCONTRADO.to_string(),
        }
    }
}

/// Saída do modo LLM para um processo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmAnalysis {
    /// Valor escolhido pelo primeiro modelo configurado (autoritativo).
    pub valor_final_llm: String,
    pub justificativa_llm: String,
    pub resumo_llm: String,
    /// Resposta bruta de cada modelo, na ordem de configuração.
    pub respostas: IndexMap<String, String>,
}

/// Resultado final de um processo; imutável após a criação e consumido
/// apenas pela exportação.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseResult {
    pub metadados: CaseMetadata,
    pub status_admissibilidade: StatusAdmissibilidade,
    /// Valor principal escolhido; `None` quando arquivado, sem documento,
    /// com erro de leitura ou sem candidato sobrevivente.
    pub valor_principal: Option<BigDecimal>,
    /// Categoria vencedora ou motivo da ausência de valor.
    pub criterio_usado: String,
    /// Lista bruta de candidatos, mantida para auditoria.
    pub candidatos: Vec<ValueCandidate>,
    pub analise_llm: Option<LlmAnalysis>,
    pub processado_em: DateTime<Utc>,
}

impl CaseResult {
    /// Resultado sem valor, com o critério explicando o motivo.
    pub fn sem_valor(metadados: CaseMetadata, criterio: &str) -> Self {
        Self {
            metadados,
            status_admissibilidade: StatusAdmissibilidade::Indeterminado,
            valor_principal: None,
            criterio_usado: criterio.to_string(),
            candidatos: Vec::new(),
            analise_llm: None,
            processado_em: Utc::now(),
        }
    }
}
