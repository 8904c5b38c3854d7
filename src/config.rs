use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::Categoria;

/// Configuração da aplicação
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub extracao: ExtractionRules,
    pub pontuacao: ScoringRules,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Pasta raiz com uma subpasta por processo.
    pub pasta_raiz: PathBuf,
    /// Caminho da planilha de saída.
    pub saida: PathBuf,
}

/// Regras da varredura de candidatos e da checagem de admissibilidade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRules {
    /// Padrões que reconhecem menções monetárias no texto.
    pub padroes_valor: Vec<String>,
    /// Limite de parágrafos varridos a partir do início do documento.
    pub max_paragrafos: usize,
    /// Janela de parágrafos finais inspecionada pela admissibilidade.
    pub janela_admissibilidade: usize,
    /// Máximo de candidatos incluídos no prompt de desambiguação.
    pub max_candidatos_prompt: usize,
}

/// Um padrão ponderado do motor de pontuação.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedPattern {
    pub padrao: String,
    pub peso: f64,
    pub categoria: Categoria,
}

/// Regras do motor de pontuação, injetadas na construção para permitir
/// conjuntos reduzidos nos testes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringRules {
    pub ponderadas: Vec<WeightedPattern>,
    /// Padrões de veto: qualquer casamento exclui o candidato.
    pub negativas: Vec<String>,
    /// Cabeçalhos que marcam a seção de decisão do documento.
    pub secoes_decisao: Vec<String>,
    /// Bônus aplicado a sanções diretas dentro da seção de decisão.
    pub boost_secao_decisao: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeloLlm {
    /// Nome exibido na planilha (coluna "Resposta <nome>").
    pub nome: String,
    /// Identificador do modelo no servidor local.
    pub modelo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub habilitado: bool,
    /// Endpoint compatível com OpenAI de um servidor local (llama.cpp, ollama).
    pub endpoint: String,
    /// O primeiro modelo da lista é autoritativo para o valor principal;
    /// os demais são consultivos e exportados coluna a coluna.
    pub modelos: Vec<ModeloLlm>,
    pub timeout_secs: u64,
    pub max_tokens: u32,
    pub temperature: f32,
}

fn padroes_valor_padrao() -> Vec<String> {
    vec![
        r"R\$\s*(?P<value>\d{1,3}(?:[._]\d{3})*(?:,\d{2})?)".to_string(),
        r"R\$\s*(?P<number>\d+(?:[.,]\d{1,2})?)\s*(?P<unit>milh[oõ]es|mil|bilh[oõ]es|bi|tri)(?:\s+de\s+reais)?"
            .to_string(),
    ]
}

fn ponderadas_padrao() -> Vec<WeightedPattern> {
    let p = |padrao: &str, peso: f64, categoria: Categoria| WeightedPattern {
        padrao: padrao.to_string(),
        peso,
        categoria,
    };
    vec![
        // Sanções e decisões diretas (multas, devoluções)
        p(r"multa\s+no\s+valor\s+de", 0.4, Categoria::SancaoDireta),
        p(r"condeno\s+ao\s+pagamento\s+de", 0.4, Categoria::SancaoDireta),
        p(r"devolução\s+da\s+quantia\s+de", 0.4, Categoria::SancaoDireta),
        p(r"fixo\s+a\s+multa\s+em", 0.3, Categoria::SancaoDireta),
        p(r"valor\s+da\s+decis[ãa]o", 0.98, Categoria::SancaoDireta),
        // Objeto principal do processo (contratos, licitações)
        p(r"valor\s+global\s+estimado\s+de", 0.95, Categoria::ObjetoPrincipal),
        p(r"preço\s+global\s+estimado\s+de", 0.95, Categoria::ObjetoPrincipal),
        p(r"valor\s+total\s+do\s+contrato", 0.95, Categoria::ObjetoPrincipal),
        p(r"proposta\s+vencedora\s+no\s+valor\s+de", 0.95, Categoria::ObjetoPrincipal),
        p(
            r"valor\s+do\s+contrato\s*nº?[\s\w\d/-]+,?\s+no\s+valor\s+de",
            0.95,
            Categoria::ObjetoPrincipal,
        ),
        p(r"valor\s+estimado\s+de", 0.90, Categoria::ObjetoPrincipal),
        // Consequências e outros valores fortes
        p(r"dano\s+ao\s+erário\s*(?:de)?", 0.5, Categoria::ValorConsequencia),
        p(
            r"prejuízo\s+aos?\s+cofres\s+públicos\s*(?:de)?",
            0.5,
            Categoria::ValorConsequencia,
        ),
        // Contexto geral (menor prioridade)
        p(r"no\s+valor\s+de", 0.7, Categoria::ContextoGeral),
        p(r"valor\s+total\s*de", 0.7, Categoria::ContextoGeral),
        p(r"montante\s+de", 0.6, Categoria::ContextoGeral),
    ]
}

fn negativas_padrao() -> Vec<String> {
    [
        r"prejuízo\s+alegado",
        r"economia\s+de",
        r"valor\s+da\s+causa",
        r"lote\s+\w*\s+no\s+valor\s+de",
        r"parcela\s+de\s*r\$",
        r"taxa\s+de",
        r"juros\s+de",
        r"honorários\s+em\s*r\$",
        r"custas\s+processuais",
        r"limite\s+de\s+gasto",
        r"salário-mínimo",
        r"orçamento\s+previa",
        r"contrato\s+anterior",
        r"empenhos.*foram\s+anulados",
        r"valor\s+anulado\s+de",
        r"cancelamento\s+do\s+valor",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn secoes_decisao_padrao() -> Vec<String> {
    [
        r"DECIS\wO",
        r"VOTO",
        r"AC[OÓ]RD[AÃ]O",
        r"CONCLUS\wO",
        r"PELO\s+EXPOSTO",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self {
            padroes_valor: padroes_valor_padrao(),
            max_paragrafos: 400,
            janela_admissibilidade: 30,
            max_candidatos_prompt: 5,
        }
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            ponderadas: ponderadas_padrao(),
            negativas: negativas_padrao(),
            secoes_decisao: secoes_decisao_padrao(),
            boost_secao_decisao: 1.0,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            habilitado: false,
            endpoint: "http://127.0.0.1:8080/v1/chat/completions".to_string(),
            modelos: vec![
                ModeloLlm {
                    nome: "Llama3-8B-Instruct".to_string(),
                    modelo: "llama3-8b-instruct".to_string(),
                },
                ModeloLlm {
                    nome: "Mistral-7B-Instruct".to_string(),
                    modelo: "mistral-7b-instruct".to_string(),
                },
            ],
            timeout_secs: 300,
            max_tokens: 256,
            temperature: 0.1,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig {
                pasta_raiz: PathBuf::from("proc_representacoes/representacoes_SGE"),
                saida: PathBuf::from("extracao_final_colorida.csv"),
            },
            extracao: ExtractionRules::default(),
            pontuacao: ScoringRules::default(),
            llm: LlmConfig::default(),
        }
    }
}

impl AppConfig {
    /// Carrega a configuração a partir de variáveis de ambiente.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raiz) = std::env::var("EXTRATOR_PASTA_RAIZ") {
            config.paths.pasta_raiz = PathBuf::from(raiz);
        }
        if let Ok(saida) = std::env::var("EXTRATOR_SAIDA") {
            config.paths.saida = PathBuf::from(saida);
        }

        config.llm.habilitado = std::env::var("LLM_HABILITADO")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        if let Ok(endpoint) = std::env::var("LLM_ENDPOINT") {
            config.llm.endpoint = endpoint;
        }
        // LLM_MODELOS: lista separada por vírgula, entradas "nome=modelo" ou
        // apenas o identificador do modelo.
        if let Ok(modelos) = std::env::var("LLM_MODELOS") {
            let lista: Vec<ModeloLlm> = modelos
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|entrada| match entrada.split_once('=') {
                    Some((nome, modelo)) => ModeloLlm {
                        nome: nome.trim().to_string(),
                        modelo: modelo.trim().to_string(),
                    },
                    None => ModeloLlm {
                        nome: entrada.to_string(),
                        modelo: entrada.to_string(),
                    },
                })
                .collect();
            if !lista.is_empty() {
                config.llm.modelos = lista;
            }
        }

        config
    }
}
