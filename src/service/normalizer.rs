use bigdecimal::BigDecimal;
use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;
use thiserror::Error;

/// Falha de normalização; o chamador descarta o candidato silenciosamente.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValorParseError {
    #[error("string vazia após limpeza")]
    Vazio,
    #[error("falha na conversão numérica de '{0}'")]
    Conversao(String),
}

static RE_PREFIXO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(r\$\s*|valor\s+de\s*r\$\s*|montante\s+de\s*r\$\s*)").unwrap());
static RE_PARENTESES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\s*\((?:.*?)\)).*$").unwrap());
static RE_TRILHOES: Lazy<Regex> = Lazy::new(|| Regex::new(r"tri(?:lh[oõ]es)?").unwrap());
static RE_BILHOES: Lazy<Regex> = Lazy::new(|| Regex::new(r"bilh[oõ]es|bi").unwrap());
static RE_MILHOES: Lazy<Regex> = Lazy::new(|| Regex::new(r"milh[oõ]es").unwrap());
static RE_ESPACOS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static RE_DECIMAL_FINAL: Lazy<Regex> = Lazy::new(|| Regex::new(r",\d{1,2}$").unwrap());

/// Converte uma menção monetária livre ("R$ 1.234,56", "R$ 3 milhões de
/// reais") no valor numérico em unidade-base da moeda.
///
/// Determinística e sem efeitos colaterais; uma string decimal já
/// normalizada atravessa a função como identidade.
pub fn converter_valor(original: &str) -> Result<BigDecimal, ValorParseError> {
    let s = original.to_lowercase();

    // 1. Remove prefixos de moeda/introdução de valor
    let s = RE_PREFIXO.replace(&s, "").trim().to_string();
    // 2. Remove anotações parentéticas finais ("(dez mil reais)")
    let s = RE_PARENTESES.replace(&s, "").trim().to_string();

    // 3. Palavra de magnitude, da maior para a menor para que "bilhões"
    //    não seja capturado como "milhões"
    let mut multiplicador: u64 = 1;
    let mut s = s;
    if s.contains("tri") {
        multiplicador = 1_000_000_000_000;
        s = RE_TRILHOES.replace_all(&s, "").trim().to_string();
    } else if s.contains("bilh") || s.contains(" bi") {
        multiplicador = 1_000_000_000;
        s = RE_BILHOES.replace_all(&s, "").trim().to_string();
    } else if s.contains("milh") {
        multiplicador = 1_000_000;
        s = RE_MILHOES.replace_all(&s, "").trim().to_string();
    } else if s.contains("mil") {
        multiplicador = 1_000;
        s = s.replace("mil", "");
    }

    // 4. Sem espaços a partir daqui
    let mut s = RE_ESPACOS.replace_all(&s, "").to_string();

    // 5. Convenção decimal: vírgula seguida de 1-2 dígitos no fim é o
    //    separador decimal; caso contrário vírgula é separador de milhar
    if RE_DECIMAL_FINAL.is_match(&s) {
        s = s.replace('.', "").replace(',', ".");
    } else {
        s = s.replace(',', "");
    }

    // 6. Grupos separados por ponto: grupo final curto é a parte decimal,
    //    senão todos os pontos são separadores de milhar
    if s.contains('.') {
        let partes: Vec<&str> = s.split('.').collect();
        let ultima = partes[partes.len() - 1];
        if ultima.len() <= 2 && partes.len() > 1 {
            s = format!("{}.{}", partes[..partes.len() - 1].concat(), ultima);
        } else {
            s = partes.concat();
        }
    }

    // 7. Apenas dígitos e ponto; pontos excedentes são removidos da
    //    esquerda, preservando o último como separador decimal
    let mut s: String = s.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    let pontos = s.matches('.').count();
    if pontos > 1 {
        let mut removidos = 0;
        s = s
            .chars()
            .filter(|&c| {
                if c == '.' && removidos < pontos - 1 {
                    removidos += 1;
                    false
                } else {
                    true
                }
            })
            .collect();
    }

    if s.is_empty() || s == "." {
        return Err(ValorParseError::Vazio);
    }

    // 8. Conversão final e aplicação da magnitude
    let valor = BigDecimal::from_str(&s)
        .map_err(|_| ValorParseError::Conversao(original.to_string()))?;
    Ok(valor * BigDecimal::from(multiplicador))
}
