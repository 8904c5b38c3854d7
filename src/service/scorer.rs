use bigdecimal::{BigDecimal, ToPrimitive};
use regex::{Regex, RegexBuilder};

use crate::config::ScoringRules;
use crate::models::{Categoria, ScoredCandidate, ValueCandidate, PRIORIDADE_CATEGORIAS};

struct PadraoCompilado {
    re: Regex,
    peso: f64,
    categoria: Categoria,
}

/// Motor de pontuação hierárquica dos candidatos a valor principal.
///
/// Cada candidato recebe score = base logarítmica + soma dos pesos dos
/// padrões casados, com veto absoluto por palavra-chave negativa e bônus
/// para sanções dentro da seção de decisão. A seleção percorre as
/// categorias na ordem fixa de prioridade; o score só desempata dentro da
/// categoria.
pub struct ValueScorer {
    ponderadas: Vec<PadraoCompilado>,
    negativas: Vec<Regex>,
    secoes_decisao: Vec<Regex>,
    boost_secao_decisao: f64,
}

impl ValueScorer {
    pub fn new(rules: &ScoringRules) -> Result<Self, regex::Error> {
        let ponderadas = rules
            .ponderadas
            .iter()
            .map(|p| {
                Ok(PadraoCompilado {
                    re: Regex::new(&p.padrao)?,
                    peso: p.peso,
                    categoria: p.categoria,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        let negativas = rules
            .negativas
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        // cabeçalhos de seção casam sobre o texto original, sem lowercase
        let secoes_decisao = rules
            .secoes_decisao
            .iter()
            .map(|p| RegexBuilder::new(p).case_insensitive(true).build())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            ponderadas,
            negativas,
            secoes_decisao,
            boost_secao_decisao: rules.boost_secao_decisao,
        })
    }

    /// Posição da categoria na ordem de prioridade; Negativo fica fora.
    fn prioridade(categoria: Categoria) -> usize {
        PRIORIDADE_CATEGORIAS
            .iter()
            .position(|c| *c == categoria)
            .unwrap_or(usize::MAX)
    }

    /// O parágrafo pertence à seção de decisão (DECISÃO, VOTO, ACÓRDÃO...)?
    pub fn em_secao_decisao(&self, texto: &str) -> bool {
        self.secoes_decisao.iter().any(|re| re.is_match(texto))
    }

    /// Pontua um candidato a partir do valor e do parágrafo de origem.
    pub fn pontuar(&self, valor: &BigDecimal, contexto: &str) -> (f64, Categoria) {
        let texto = contexto.to_lowercase();

        // 1. Veto absoluto: palavra negativa exclui o candidato, mesmo que
        //    padrões positivos também casem
        for re in &self.negativas {
            if re.is_match(&texto) {
                return (0.0, Categoria::Negativo);
            }
        }

        // 2. Base logarítmica: valores maiores pesam um pouco mais, sem
        //    deixar números incidentais dominarem
        let mut score = 0.0;
        let v = valor.to_f64().unwrap_or(0.0);
        if v > 0.0 {
            score += (v + 1.0).log10() / 10.0;
        }

        // 3. Soma os pesos de todos os padrões casados; a categoria vem do
        //    padrão de categoria mais prioritária (peso desempata dentro
        //    dela) — "multa no valor de" é sanção mesmo quando o genérico
        //    "no valor de" também casa com peso maior
        let mut melhor: Option<(usize, f64, Categoria)> = None;
        for p in &self.ponderadas {
            if p.re.is_match(&texto) {
                score += p.peso;
                let prio = Self::prioridade(p.categoria);
                let substitui = match melhor {
                    None => true,
                    Some((m_prio, m_peso, _)) => {
                        prio < m_prio || (prio == m_prio && p.peso > m_peso)
                    }
                };
                if substitui {
                    melhor = Some((prio, p.peso, p.categoria));
                }
            }
        }
        let categoria = melhor
            .map(|(_, _, c)| c)
            .unwrap_or(Categoria::ContextoGeral);

        // 4. Sanção anunciada na seção de decisão é o sinal mais forte
        if categoria == Categoria::SancaoDireta && self.em_secao_decisao(contexto) {
            score += self.boost_secao_decisao;
        }

        (score, categoria)
    }

    /// Pontua todos os candidatos, na ordem de varredura.
    pub fn avaliar(&self, candidatos: &[ValueCandidate]) -> Vec<ScoredCandidate> {
        candidatos
            .iter()
            .map(|c| {
                let (score, categoria) = self.pontuar(&c.valor_num, &c.contexto);
                ScoredCandidate {
                    candidato: c.clone(),
                    score,
                    categoria,
                }
            })
            .collect()
    }

    /// Seleciona o melhor candidato: primeira categoria da ordem de
    /// prioridade com sobrevivente; dentro dela, maior score, empate
    /// resolvido pela ordem de varredura.
    pub fn selecionar(&self, candidatos: &[ValueCandidate]) -> Option<ScoredCandidate> {
        let pontuados = self.avaliar(candidatos);

        for categoria in PRIORIDADE_CATEGORIAS {
            let mut melhor: Option<&ScoredCandidate> = None;
            for sc in &pontuados {
                if sc.categoria != categoria || sc.score <= 0.0 {
                    continue;
                }
                let substitui = match melhor {
                    None => true,
                    Some(m) => sc.score > m.score,
                };
                if substitui {
                    melhor = Some(sc);
                }
            }
            if let Some(m) = melhor {
                return Some(m.clone());
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn scorer() -> ValueScorer {
        ValueScorer::new(&ScoringRules::default()).unwrap()
    }

    fn candidato(valor: &str, contexto: &str) -> ValueCandidate {
        ValueCandidate {
            valor_str: format!("R$ {valor}"),
            valor_num: BigDecimal::from_str(valor).unwrap(),
            contexto: contexto.to_string(),
            paragrafo_idx: 0,
        }
    }

    #[test]
    fn prioridade_de_categoria_vence_score_bruto() {
        // sanção com peso 0.3 deve vencer contexto_geral com peso 0.7 e
        // valor muito maior
        let candidatos = vec![
            candidato("900000.00", "serviço prestado no valor de R$ 900.000,00"),
            candidato("100.00", "fixo a multa em R$ 100,00"),
        ];
        let melhor = scorer().selecionar(&candidatos).unwrap();
        assert_eq!(melhor.categoria, Categoria::SancaoDireta);
        assert_eq!(melhor.candidato.valor_str, "R$ 100.00");
    }

    #[test]
    fn veto_exclui_mesmo_sendo_o_unico_candidato() {
        let candidatos = vec![candidato(
            "5000.00",
            "taxa de administração de R$ 5.000,00 no valor de referência",
        )];
        let (score, categoria) = scorer().pontuar(
            &candidatos[0].valor_num,
            &candidatos[0].contexto,
        );
        assert_eq!(score, 0.0);
        assert_eq!(categoria, Categoria::Negativo);
        assert!(scorer().selecionar(&candidatos).is_none());
    }

    #[test]
    fn multa_e_sancao_mesmo_com_padrao_generico_mais_pesado() {
        // "no valor de" (0.7, contexto_geral) também casa; a categoria
        // atribuída continua sendo a mais prioritária
        let (_, categoria) =
            scorer().pontuar(&BigDecimal::from(10_000), "multa no valor de R$ 10.000,00");
        assert_eq!(categoria, Categoria::SancaoDireta);
    }

    #[test]
    fn bonus_de_secao_de_decisao_para_sancao() {
        let s = scorer();
        let fora = s
            .pontuar(&BigDecimal::from(10_000), "multa no valor de R$ 10.000,00")
            .0;
        let dentro = s
            .pontuar(
                &BigDecimal::from(10_000),
                "DECISÃO: multa no valor de R$ 10.000,00",
            )
            .0;
        assert!((dentro - fora - 1.0).abs() < 1e-9);
    }

    #[test]
    fn sem_palavra_chave_cai_em_contexto_geral() {
        let (score, categoria) =
            scorer().pontuar(&BigDecimal::from(500), "repasse de R$ 500,00 efetuado");
        assert_eq!(categoria, Categoria::ContextoGeral);
        assert!(score > 0.0); // sobrevive apenas com a base logarítmica
    }

    #[test]
    fn empate_dentro_da_categoria_mantem_o_primeiro() {
        let candidatos = vec![
            candidato("2000.00", "montante de R$ 2.000,00 repassado"),
            candidato("2000.00", "repassado o montante de R$ 2.000,00"),
        ];
        let melhor = scorer().selecionar(&candidatos).unwrap();
        assert_eq!(melhor.candidato.contexto, "montante de R$ 2.000,00 repassado");
    }
}
