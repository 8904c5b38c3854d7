pub mod candidate;
pub mod result;

pub use candidate::{Categoria, ScoredCandidate, ValueCandidate, PRIORIDADE_CATEGORIAS};
pub use result::{
    CaseMetadata, CaseResult, LlmAnalysis, StatusAdmissibilidade, NAO_ENCONTRADO,
    NAO_ESPECIFICADO, SEM_DOCUMENTO,
};
