use csv::Writer;
use std::fs::File;
use std::path::Path;

use crate::config::ModeloLlm;
use crate::models::{CaseResult, StatusAdmissibilidade};

/// Cor condicional da linha, derivada do critério de extração.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowColor {
    /// Arquivado por admissibilidade.
    Vermelho,
    /// Valor do objeto principal: alta confiança.
    Verde,
    /// Contexto geral: baixa confiança.
    Amarelo,
    /// Nenhum valor encontrado.
    Laranja,
    /// Demais categorias.
    Padrao,
}

impl RowColor {
    pub fn hex(&self) -> &'static str {
        match self {
            Self::Vermelho => "#E63946",
            Self::Verde => "#2A9D8F",
            Self::Amarelo => "#f8fb74",
            Self::Laranja => "#f79256",
            Self::Padrao => "#FFFFFF",
        }
    }

    pub fn descricao(&self) -> &'static str {
        match self {
            Self::Vermelho => "Arquivado por Admissibilidade",
            Self::Verde => "Alta Confiança",
            Self::Amarelo => "Baixa Confiança",
            Self::Laranja => "Nenhum Valor Encontrado",
            Self::Padrao => "Default",
        }
    }
}

/// Mapeia um resultado para a cor da linha na planilha.
pub fn cor_da_linha(resultado: &CaseResult) -> RowColor {
    if resultado.status_admissibilidade == StatusAdmissibilidade::Sim {
        return RowColor::Vermelho;
    }
    let criterio = resultado.criterio_usado.as_str();
    if criterio.contains("objeto_principal") {
        RowColor::Verde
    } else if criterio.contains("contexto_geral") {
        RowColor::Amarelo
    } else if criterio.contains("nenhum valor") {
        RowColor::Laranja
    } else {
        RowColor::Padrao
    }
}

fn cabecalho(modelos: &[ModeloLlm], com_llm: bool) -> Vec<String> {
    let mut colunas: Vec<String> = [
        "Nome Pasta Original",
        "Número Processo (PDF)",
        "Número Acórdão",
        "Natureza",
        "Arquivamento por Admissibilidade",
        "Valor Principal (R$)",
        "Critério de Extração",
        "Nome Arquivo Processado",
        "Confiança",
        "Cor",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    if com_llm {
        colunas.push("Valor Principal (LLM)".to_string());
        colunas.push("Justificativa (LLM)".to_string());
        colunas.push("Resumo (LLM)".to_string());
        for modelo in modelos {
            colunas.push(format!("Resposta {}", modelo.nome));
        }
    }

    colunas
}

fn linha(resultado: &CaseResult, modelos: &[ModeloLlm], com_llm: bool) -> Vec<String> {
    let cor = cor_da_linha(resultado);
    let valor = resultado
        .valor_principal
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "0".to_string());

    let mut campos = vec![
        resultado.metadados.nome_subpasta.clone(),
        resultado.metadados.numero_processo.clone(),
        resultado.metadados.numero_acordao.clone(),
        resultado.metadados.natureza.clone(),
        resultado.status_admissibilidade.as_str().to_string(),
        valor,
        resultado.criterio_usado.clone(),
        resultado.metadados.nome_arquivo.clone(),
        cor.descricao().to_string(),
        cor.hex().to_string(),
    ];

    if com_llm {
        match &resultado.analise_llm {
            Some(analise) => {
                campos.push(analise.valor_final_llm.clone());
                campos.push(analise.justificativa_llm.clone());
                campos.push(analise.resumo_llm.clone());
                for modelo in modelos {
                    campos.push(
                        analise
                            .respostas
                            .get(&modelo.nome)
                            .cloned()
                            .unwrap_or_else(|| "Não processado".to_string()),
                    );
                }
            }
            None => {
                campos.push("N/A".to_string());
                campos.push("N/A".to_string());
                campos.push("N/A".to_string());
                for _ in modelos {
                    campos.push("Não processado".to_string());
                }
            }
        }
    }

    campos
}

/// Exporta os resultados para a planilha CSV, uma linha por processo, com
/// as colunas de confiança/cor no lugar do estilo de célula.
pub fn exportar_csv(
    resultados: &[CaseResult],
    modelos: &[ModeloLlm],
    caminho: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let com_llm = resultados.iter().any(|r| r.analise_llm.is_some());

    let arquivo = File::create(caminho)?;
    let mut writer = Writer::from_writer(arquivo);

    writer.write_record(cabecalho(modelos, com_llm))?;
    for resultado in resultados {
        writer.write_record(linha(resultado, modelos, com_llm))?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CaseMetadata;
    use bigdecimal::BigDecimal;

    fn resultado(criterio: &str, status: StatusAdmissibilidade) -> CaseResult {
        let mut r = CaseResult::sem_valor(CaseMetadata::vazio("pasta_001"), criterio);
        r.status_admissibilidade = status;
        r
    }

    #[test]
    fn esquema_de_cores_condicional() {
        assert_eq!(
            cor_da_linha(&resultado("arquivado", StatusAdmissibilidade::Sim)),
            RowColor::Vermelho
        );
        assert_eq!(
            cor_da_linha(&resultado(
                "hierarquia: objeto_principal",
                StatusAdmissibilidade::Nao
            )),
            RowColor::Verde
        );
        assert_eq!(
            cor_da_linha(&resultado(
                "hierarquia: contexto_geral",
                StatusAdmissibilidade::Nao
            )),
            RowColor::Amarelo
        );
        assert_eq!(
            cor_da_linha(&resultado(
                "nenhum valor relevante encontrado",
                StatusAdmissibilidade::Nao
            )),
            RowColor::Laranja
        );
        assert_eq!(
            cor_da_linha(&resultado(
                "hierarquia: sancao_direta",
                StatusAdmissibilidade::Nao
            )),
            RowColor::Padrao
        );
    }

    #[test]
    fn arquivado_vence_qualquer_criterio() {
        // mesmo que o critério citasse uma categoria, o arquivamento manda
        assert_eq!(
            cor_da_linha(&resultado(
                "hierarquia: objeto_principal",
                StatusAdmissibilidade::Sim
            )),
            RowColor::Vermelho
        );
    }

    #[test]
    fn linha_sem_valor_exporta_zero_e_sentinelas() {
        let r = resultado("documento nao encontrado", StatusAdmissibilidade::Indeterminado);
        let campos = linha(&r, &[], false);
        assert_eq!(campos[0], "pasta_001");
        assert_eq!(campos[4], "Indeterminado");
        assert_eq!(campos[5], "0");
        assert_eq!(campos[6], "documento nao encontrado");
    }

    #[test]
    fn linha_com_valor_exporta_o_numero() {
        let mut r = resultado("hierarquia: sancao_direta", StatusAdmissibilidade::Nao);
        r.valor_principal = Some(BigDecimal::from(10_000));
        let campos = linha(&r, &[], false);
        assert_eq!(campos[5], "10000");
    }
}
