use bigdecimal::{BigDecimal, Zero};
use indexmap::IndexSet;
use regex::{Regex, RegexBuilder};

use crate::config::ExtractionRules;
use crate::models::ValueCandidate;
use crate::service::normalizer::converter_valor;

/// Varredura de candidatos a valor monetário sobre a sequência de parágrafos.
///
/// Os padrões chegam na construção (conjuntos reduzidos nos testes); a
/// varredura é limitada aos `max_paragrafos` iniciais — a checagem de
/// admissibilidade é quem olha o final do documento.
pub struct CandidateExtractor {
    padroes: Vec<Regex>,
    max_paragrafos: usize,
}

impl CandidateExtractor {
    pub fn new(rules: &ExtractionRules) -> Result<Self, regex::Error> {
        let padroes = rules
            .padroes_valor
            .iter()
            .map(|p| RegexBuilder::new(p).case_insensitive(true).build())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            padroes,
            max_paragrafos: rules.max_paragrafos,
        })
    }

    /// Extrai candidatos deduplicados por (valor_str, contexto), preservando
    /// a ordem da primeira ocorrência. Valores não conversíveis ou ≤ 0 são
    /// descartados.
    pub fn extrair(&self, paragrafos: &[String]) -> Vec<ValueCandidate> {
        let mut vistos: IndexSet<(String, String)> = IndexSet::new();
        let mut candidatos = Vec::new();

        for (idx, linha) in paragrafos.iter().take(self.max_paragrafos).enumerate() {
            let linha = linha.trim();
            if linha.is_empty() {
                continue;
            }

            for padrao in &self.padroes {
                for m in padrao.find_iter(linha) {
                    let valor_num = match converter_valor(m.as_str()) {
                        Ok(v) if v > BigDecimal::zero() => v,
                        _ => continue,
                    };
                    if vistos.insert((m.as_str().to_string(), linha.to_string())) {
                        candidatos.push(ValueCandidate {
                            valor_str: m.as_str().to_string(),
                            valor_num,
                            contexto: linha.to_string(),
                            paragrafo_idx: idx,
                        });
                    }
                }
            }
        }

        candidatos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn extrator(max_paragrafos: usize) -> CandidateExtractor {
        let rules = ExtractionRules {
            max_paragrafos,
            ..ExtractionRules::default()
        };
        CandidateExtractor::new(&rules).unwrap()
    }

    fn paragrafos(linhas: &[&str]) -> Vec<String> {
        linhas.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn encontra_multiplos_valores_no_mesmo_paragrafo() {
        let texto = paragrafos(&["contrato de R$ 10.000,00 com aditivo de R$ 5.000,00"]);
        let candidatos = extrator(400).extrair(&texto);
        assert_eq!(candidatos.len(), 2);
        assert_eq!(candidatos[0].valor_str, "R$ 10.000,00");
        assert_eq!(
            candidatos[0].valor_num,
            BigDecimal::from_str("10000.00").unwrap()
        );
        assert_eq!(candidatos[1].valor_str, "R$ 5.000,00");
        assert_eq!(candidatos[0].paragrafo_idx, 0);
    }

    #[test]
    fn deduplica_por_valor_e_contexto() {
        // mesmo par (valor_str, contexto) em parágrafos repetidos colapsa
        let texto = paragrafos(&[
            "multa de R$ 1.000,00 aplicada",
            "multa de R$ 1.000,00 aplicada",
            "outro contexto com R$ 1.000,00",
        ]);
        let candidatos = extrator(400).extrair(&texto);
        assert_eq!(candidatos.len(), 2);
        assert_eq!(candidatos[0].contexto, "multa de R$ 1.000,00 aplicada");
        assert_eq!(candidatos[1].contexto, "outro contexto com R$ 1.000,00");
    }

    #[test]
    fn respeita_o_limite_de_paragrafos() {
        let texto = paragrafos(&["início sem valor", "R$ 999,99 além do limite"]);
        let candidatos = extrator(1).extrair(&texto);
        assert!(candidatos.is_empty());

        // dentro do limite o mesmo documento produz o candidato
        let candidatos = extrator(2).extrair(&texto);
        assert_eq!(candidatos.len(), 1);
    }

    #[test]
    fn reconhece_magnitude_por_extenso() {
        // o padrão simples captura "R$ 3" e o padrão com unidade captura a
        // menção completa; ambos viram candidatos distintos
        let texto = paragrafos(&["valor estimado de R$ 3 milhões de reais para a obra"]);
        let candidatos = extrator(400).extrair(&texto);
        assert_eq!(candidatos.len(), 2);
        assert_eq!(candidatos[1].valor_str, "R$ 3 milhões de reais");
        assert_eq!(candidatos[1].valor_num, BigDecimal::from(3_000_000));
    }

    #[test]
    fn paragrafo_vazio_e_valor_invalido_sao_ignorados() {
        let texto = paragrafos(&["", "   ", "R$ 0,00 de ajuste"]);
        let candidatos = extrator(400).extrair(&texto);
        assert!(candidatos.is_empty());
    }
}
