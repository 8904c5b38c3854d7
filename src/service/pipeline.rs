use bigdecimal::BigDecimal;
use indexmap::IndexMap;
use std::path::Path;

use crate::config::{AppConfig, ModeloLlm};
use crate::llm::{self, LlmClient};
use crate::models::{
    CaseMetadata, CaseResult, LlmAnalysis, StatusAdmissibilidade, ValueCandidate,
    NAO_ESPECIFICADO,
};
use crate::reader;
use crate::service::admissibility::verificar_arquivamento;
use crate::service::extractor::CandidateExtractor;
use crate::service::scorer::ValueScorer;

pub const CRITERIO_ARQUIVADO: &str = "arquivado";
pub const CRITERIO_SEM_VALOR: &str = "nenhum valor relevante encontrado";
pub const CRITERIO_SEM_DOCUMENTO: &str = "documento nao encontrado";
pub const CRITERIO_ERRO_LEITURA: &str = "erro_leitura_conteudo";

/// Resultado da análise do conteúdo de um documento, antes da camada LLM.
#[derive(Debug)]
pub struct AnaliseDocumento {
    pub status: StatusAdmissibilidade,
    pub valor_principal: Option<BigDecimal>,
    pub criterio_usado: String,
    pub candidatos: Vec<ValueCandidate>,
}

/// Orquestra o fluxo por processo: documento → admissibilidade → extração
/// → pontuação → (modo LLM) desambiguação e resumo. Um processo por vez,
/// sem estado compartilhado; nenhum erro aborta o lote.
pub struct DocumentPipeline {
    extractor: CandidateExtractor,
    scorer: ValueScorer,
    janela_admissibilidade: usize,
    max_candidatos_prompt: usize,
    llm: Option<LlmClient>,
    modelos: Vec<ModeloLlm>,
}

impl DocumentPipeline {
    pub fn new(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let extractor = CandidateExtractor::new(&config.extracao)?;
        let scorer = ValueScorer::new(&config.pontuacao)?;
        let llm = if config.llm.habilitado {
            Some(LlmClient::new(&config.llm)?)
        } else {
            None
        };
        Ok(Self {
            extractor,
            scorer,
            janela_admissibilidade: config.extracao.janela_admissibilidade,
            max_candidatos_prompt: config.extracao.max_candidatos_prompt,
            llm,
            modelos: config.llm.modelos.clone(),
        })
    }

    /// Núcleo determinístico por documento. Quando arquivado, a pontuação
    /// nunca é consultada e o valor fica vazio.
    pub fn analisar_paragrafos(&self, paragrafos: &[String]) -> AnaliseDocumento {
        let status = verificar_arquivamento(paragrafos, self.janela_admissibilidade);
        if status == StatusAdmissibilidade::Sim {
            return AnaliseDocumento {
                status,
                valor_principal: None,
                criterio_usado: CRITERIO_ARQUIVADO.to_string(),
                candidatos: Vec::new(),
            };
        }

        let candidatos = self.extractor.extrair(paragrafos);
        match self.scorer.selecionar(&candidatos) {
            Some(melhor) => AnaliseDocumento {
                status,
                valor_principal: Some(melhor.candidato.valor_num.clone()),
                criterio_usado: format!("hierarquia: {}", melhor.categoria.as_str()),
                candidatos,
            },
            None => AnaliseDocumento {
                status,
                valor_principal: None,
                criterio_usado: CRITERIO_SEM_VALOR.to_string(),
                candidatos,
            },
        }
    }

    /// Processa todas as subpastas da raiz, em ordem alfabética para que a
    /// planilha seja reprodutível execução a execução.
    pub async fn processar_pasta_raiz(
        &self,
        raiz: &Path,
    ) -> Result<Vec<CaseResult>, Box<dyn std::error::Error>> {
        let subpastas = reader::listar_subpastas(raiz)?;
        let total = subpastas.len();
        tracing::info!("Processando {} subpastas em {:?}", total, raiz);

        let mut resultados = Vec::with_capacity(total);
        for (idx, nome) in subpastas.iter().enumerate() {
            let resultado = self.processar_caso(raiz, nome).await;
            let progresso = format!(
                "Progresso: {}/{} ({}) -> {}",
                idx + 1,
                total,
                nome,
                resultado.criterio_usado
            );
            tracing::info!("{}", progresso);
            println!("{}", progresso);
            resultados.push(resultado);
        }

        Ok(resultados)
    }

    /// Fluxo completo de um processo. Erros degradam para critérios
    /// marcados no resultado; o lote segue adiante.
    pub async fn processar_caso(&self, raiz: &Path, nome_subpasta: &str) -> CaseResult {
        let pasta = raiz.join(nome_subpasta);
        let mut metadados = CaseMetadata::vazio(nome_subpasta);

        // 1. Localiza o documento principal da subpasta
        let caminho = match reader::localizar_documento(&pasta) {
            Ok(Some(caminho)) => caminho,
            Ok(None) => {
                aplicar_natureza_da_pasta(&mut metadados, raiz);
                return CaseResult::sem_valor(metadados, CRITERIO_SEM_DOCUMENTO);
            }
            Err(e) => {
                tracing::warn!("Erro ao listar {:?}: {}", pasta, e);
                return CaseResult::sem_valor(metadados, CRITERIO_ERRO_LEITURA);
            }
        };
        if let Some(nome) = caminho.file_name().and_then(|n| n.to_str()) {
            metadados.nome_arquivo = nome.to_string();
        }

        // 2. Metadados da primeira página (apenas PDF)
        let eh_pdf = caminho
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if eh_pdf {
            let pdf_meta = reader::pdf::extrair_metadados(&caminho);
            metadados.numero_processo = pdf_meta.numero_processo;
            metadados.natureza = pdf_meta.natureza;
            metadados.numero_acordao = pdf_meta.numero_acordao;
        }

        // 3. Natureza inferida pela pasta raiz quando o documento não informa
        aplicar_natureza_da_pasta(&mut metadados, raiz);

        // 4. Texto do documento
        let paragrafos = match reader::obter_paragrafos(&caminho) {
            Ok(paragrafos) => paragrafos,
            Err(e) => {
                tracing::warn!("Erro ao ler documento {:?}: {}", caminho, e);
                return CaseResult::sem_valor(metadados, CRITERIO_ERRO_LEITURA);
            }
        };

        // 5. Admissibilidade, extração e pontuação
        let analise = self.analisar_paragrafos(&paragrafos);

        // 6. Modo LLM: só quando não arquivado e com candidatos
        let analise_llm = match &self.llm {
            Some(cliente)
                if analise.status != StatusAdmissibilidade::Sim
                    && !analise.candidatos.is_empty() =>
            {
                Some(
                    self.consultar_modelos(cliente, &analise.candidatos, &paragrafos, &metadados)
                        .await,
                )
            }
            _ => None,
        };

        CaseResult {
            metadados,
            status_admissibilidade: analise.status,
            valor_principal: analise.valor_principal,
            criterio_usado: analise.criterio_usado,
            candidatos: analise.candidatos,
            analise_llm,
            processado_em: chrono::Utc::now(),
        }
    }

    /// Consulta cada modelo configurado com o prompt de desambiguação e
    /// gera o resumo com o primeiro; o primeiro modelo é autoritativo para
    /// o valor, os demais ficam registrados coluna a coluna.
    async fn consultar_modelos(
        &self,
        cliente: &LlmClient,
        candidatos: &[ValueCandidate],
        paragrafos: &[String],
        metadados: &CaseMetadata,
    ) -> LlmAnalysis {
        let prompt = llm::prompts::prompt_desambiguacao(candidatos, self.max_candidatos_prompt);

        let mut respostas: IndexMap<String, String> = IndexMap::new();
        for modelo in &self.modelos {
            tracing::info!(
                "Consultando modelo {} para {}",
                modelo.nome,
                metadados.nome_subpasta
            );
            let resposta = cliente
                .completar_seguro(&modelo.nome, &modelo.modelo, &prompt)
                .await;
            respostas.insert(modelo.nome.clone(), resposta);
        }

        let (valor_final_llm, justificativa_llm) = match self
            .modelos
            .first()
            .and_then(|m| respostas.get(&m.nome))
        {
            Some(bruto) => match llm::prompts::parse_desambiguacao(bruto) {
                Some(d) => (d.valor_principal_escolhido, d.justificativa),
                // saída malformada: o texto bruto vira a justificativa
                None => ("Erro ao decodificar JSON".to_string(), bruto.clone()),
            },
            None => ("N/A".to_string(), "N/A".to_string()),
        };

        let resumo_llm = match self.modelos.first() {
            Some(primeiro) => {
                let prompt_resumo = llm::prompts::prompt_resumo(paragrafos, metadados);
                let bruto = cliente
                    .completar_seguro(&primeiro.nome, &primeiro.modelo, &prompt_resumo)
                    .await;
                llm::prompts::limpar_resumo(&bruto)
            }
            None => "N/A".to_string(),
        };

        LlmAnalysis {
            valor_final_llm,
            justificativa_llm,
            resumo_llm,
            respostas,
        }
    }
}

/// Fallback da natureza a partir do nome da pasta raiz dos processos.
fn aplicar_natureza_da_pasta(metadados: &mut CaseMetadata, raiz: &Path) {
    if metadados.natureza != NAO_ESPECIFICADO {
        return;
    }
    let nome = raiz
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_lowercase()
        .replace(' ', "_");
    if nome.contains("denuncia") {
        metadados.natureza = "DENUNCIA".to_string();
    } else if nome.contains("representacoes_sge") {
        metadados.natureza = "REPRESENTAÇÃO DA SGE".to_string();
    } else if nome.contains("representacao") {
        metadados.natureza = "REPRESENTAÇÃO".to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn pipeline() -> DocumentPipeline {
        // config padrão com LLM desabilitado: nenhum acesso à rede
        DocumentPipeline::new(&AppConfig::default()).unwrap()
    }

    fn paragrafos(linhas: &[&str]) -> Vec<String> {
        linhas.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn multa_na_secao_de_decisao_vence_como_sancao_direta() {
        let texto = paragrafos(&[
            "Relatório sobre a execução do contrato de obras.",
            "O contrato previa serviços no valor de R$ 250.000,00.",
            "DECISÃO: multa no valor de R$ 10.000,00 aplicada ao gestor.",
            "Publique-se e registre-se.",
        ]);
        let analise = pipeline().analisar_paragrafos(&texto);

        assert_eq!(analise.status, StatusAdmissibilidade::Nao);
        assert_eq!(
            analise.valor_principal,
            Some(BigDecimal::from_str("10000.00").unwrap())
        );
        assert_eq!(analise.criterio_usado, "hierarquia: sancao_direta");
    }

    #[test]
    fn arquivamento_suprime_qualquer_valor_anterior() {
        let texto = paragrafos(&[
            "Contrato celebrado no valor de R$ 1.000.000,00.",
            "Parecer pelo NÃO CONHECIMENTO da representação.",
            "Ausentes os pressupostos de ADMISSIBILIDADE.",
            "Determino o ARQUIVAMENTO dos autos.",
        ]);
        let analise = pipeline().analisar_paragrafos(&texto);

        assert_eq!(analise.status, StatusAdmissibilidade::Sim);
        assert_eq!(analise.valor_principal, None);
        assert_eq!(analise.criterio_usado, CRITERIO_ARQUIVADO);
        assert!(analise.candidatos.is_empty());
    }

    #[test]
    fn documento_sem_mencao_monetaria_nao_tem_valor() {
        let texto = paragrafos(&[
            "Relatório de inspeção ordinária.",
            "Não foram constatadas irregularidades materiais.",
        ]);
        let analise = pipeline().analisar_paragrafos(&texto);

        assert_eq!(analise.status, StatusAdmissibilidade::Nao);
        assert_eq!(analise.valor_principal, None);
        assert_eq!(analise.criterio_usado, CRITERIO_SEM_VALOR);
    }

    #[test]
    fn sequencia_vazia_fica_indeterminada() {
        let analise = pipeline().analisar_paragrafos(&[]);
        assert_eq!(analise.status, StatusAdmissibilidade::Indeterminado);
        assert_eq!(analise.valor_principal, None);
    }

    #[test]
    fn candidato_vetado_nao_e_selecionado_mesmo_sozinho() {
        let texto = paragrafos(&["Recolhida a taxa de fiscalização de R$ 8.000,00."]);
        let analise = pipeline().analisar_paragrafos(&texto);

        assert_eq!(analise.valor_principal, None);
        assert_eq!(analise.criterio_usado, CRITERIO_SEM_VALOR);
        // o candidato permanece na lista de auditoria, apenas fora da seleção
        assert_eq!(analise.candidatos.len(), 1);
    }

    #[test]
    fn natureza_inferida_pelo_nome_da_pasta_raiz() {
        let mut metadados = CaseMetadata::vazio("proc_001");
        aplicar_natureza_da_pasta(&mut metadados, Path::new("/dados/representacoes_SGE"));
        assert_eq!(metadados.natureza, "REPRESENTAÇÃO DA SGE");

        let mut metadados = CaseMetadata::vazio("proc_002");
        aplicar_natureza_da_pasta(&mut metadados, Path::new("/dados/denuncias 2023"));
        assert_eq!(metadados.natureza, "DENUNCIA");

        // natureza já preenchida não é sobrescrita
        let mut metadados = CaseMetadata::vazio("proc_003");
        metadados.natureza = "ACÓRDÃO".to_string();
        aplicar_natureza_da_pasta(&mut metadados, Path::new("/dados/denuncias"));
        assert_eq!(metadados.natureza, "ACÓRDÃO");
    }
}
