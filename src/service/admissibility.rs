use crate::models::StatusAdmissibilidade;

/// Palavras que, co-ocorrendo no fim do documento, indicam arquivamento
/// por inadmissibilidade. Teste conjuntivo de substrings, não um parser;
/// falsos positivos por co-ocorrência acidental são uma limitação aceita.
const FLAG_NAO_CONHECIMENTO: &str = "NÃO CONHECIMENTO";
const FLAG_ADMISSIBILIDADE: &str = "ADMISSIBILIDADE";
const FLAG_ARQUIVAMENTO: &str = "ARQUIVAMENTO";

/// Verifica se o processo foi arquivado sem exame de mérito, olhando a
/// janela final de parágrafos do documento.
pub fn verificar_arquivamento(paragrafos: &[String], janela: usize) -> StatusAdmissibilidade {
    if paragrafos.is_empty() {
        return StatusAdmissibilidade::Indeterminado;
    }

    let inicio = paragrafos.len().saturating_sub(janela);
    let texto_final = paragrafos[inicio..].join(" ").to_uppercase();

    let nao_conhecimento = texto_final.contains(FLAG_NAO_CONHECIMENTO);
    let admissibilidade = texto_final.contains(FLAG_ADMISSIBILIDADE);
    let arquivamento = texto_final.contains(FLAG_ARQUIVAMENTO);

    // a condição exige as três flags simultaneamente
    if nao_conhecimento && admissibilidade && arquivamento {
        StatusAdmissibilidade::Sim
    } else {
        StatusAdmissibilidade::Nao
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JANELA: usize = 30;

    fn paragrafos(linhas: &[&str]) -> Vec<String> {
        linhas.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn tres_flags_presentes_arquivam() {
        let texto = paragrafos(&[
            "relatório inicial",
            "pelo não conhecimento da representação",
            "ausentes os requisitos de admissibilidade",
            "determino o arquivamento dos autos",
        ]);
        assert_eq!(
            verificar_arquivamento(&texto, JANELA),
            StatusAdmissibilidade::Sim
        );
    }

    #[test]
    fn qualquer_flag_ausente_nao_arquiva() {
        let texto = paragrafos(&[
            "ausentes os requisitos de admissibilidade",
            "determino o arquivamento dos autos",
        ]);
        assert_eq!(
            verificar_arquivamento(&texto, JANELA),
            StatusAdmissibilidade::Nao
        );
    }

    #[test]
    fn lista_vazia_e_indeterminado() {
        assert_eq!(
            verificar_arquivamento(&[], JANELA),
            StatusAdmissibilidade::Indeterminado
        );
    }

    #[test]
    fn flags_fora_da_janela_final_sao_ignoradas() {
        let mut texto = paragrafos(&[
            "não conhecimento, admissibilidade e arquivamento citados no início",
        ]);
        for _ in 0..JANELA {
            texto.push("parágrafo de mérito sem as palavras".to_string());
        }
        assert_eq!(
            verificar_arquivamento(&texto, JANELA),
            StatusAdmissibilidade::Nao
        );
    }
}
