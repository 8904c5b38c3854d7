use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Categoria hierárquica de um candidato a valor principal.
///
/// A prioridade de seleção é fixa ([`PRIORIDADE_CATEGORIAS`]) e NÃO coincide
/// com a magnitude do score: uma categoria inferior nunca vence enquanto uma
/// superior tiver candidato sobrevivente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Categoria {
    SancaoDireta,
    ObjetoPrincipal,
    ValorConsequencia,
    ContextoGeral,
    /// Vetado por palavra-chave negativa; excluído de qualquer seleção.
    Negativo,
}

/// Ordem de varredura das categorias na seleção do melhor candidato.
pub const PRIORIDADE_CATEGORIAS: [Categoria; 4] = [
    Categoria::SancaoDireta,
    Categoria::ObjetoPrincipal,
    Categoria::ValorConsequencia,
    Categoria::ContextoGeral,
];

impl Categoria {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SancaoDireta => "sancao_direta",
            Self::ObjetoPrincipal => "objeto_principal",
            Self::ValorConsequencia => "valor_consequencia",
            Self::ContextoGeral => "contexto_geral",
            Self::Negativo => "negativo",
        }
    }
}

/// Candidato a valor monetário encontrado no texto.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueCandidate {
    /// Trecho exatamente como casado no parágrafo (ex.: "R$ 1.234,56").
    pub valor_str: String,
    /// Valor numérico normalizado, sempre na unidade-base da moeda.
    pub valor_num: BigDecimal,
    /// Texto do parágrafo de origem.
    pub contexto: String,
    /// Índice do parágrafo na ordem de leitura.
    pub paragrafo_idx: usize,
}

/// Candidato já avaliado pelo motor de pontuação.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub candidato: ValueCandidate,
    pub score: f64,
    pub categoria: Categoria,
}
