use lopdf::Document;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::path::Path;

use crate::error::ExtractorError;
use crate::models::{NAO_ENCONTRADO, NAO_ESPECIFICADO};

static RE_PROCESSO: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"PROCESSO(?:.*?N[º°]?)?\s*[:\s]*([\w\d.-]+/\d{2,4})")
        .case_insensitive(true)
        .build()
        .unwrap()
});
static RE_NATUREZA: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"NATUREZA:\s*(.+)")
        .case_insensitive(true)
        .build()
        .unwrap()
});
static RE_ACORDAO: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"AC[OÓ]RD[AÃ]O Nº\s*([\w\d./-]+(?:-PLEN(?:V)?)?)")
        .case_insensitive(true)
        .build()
        .unwrap()
});
static RE_INTERESSADO: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+INTERESSADO:").unwrap());

/// Metadados de primeira página, melhor esforço, com sentinelas quando
/// ausentes.
#[derive(Debug, Clone)]
pub struct PdfMetadata {
    pub numero_processo: String,
    pub natureza: String,
    pub numero_acordao: String,
}

impl Default for PdfMetadata {
    fn default() -> Self {
        Self {
            numero_processo: NAO_ENCONTRADO.to_string(),
            natureza: NAO_ESPECIFICADO.to_string(),
            numero_acordao: NAO_ENCONTRADO.to_string(),
        }
    }
}

/// Extrai número de processo, natureza e número de acórdão da primeira
/// página. Falhas de leitura são registradas e degradam para os valores
/// sentinela.
pub fn extrair_metadados(caminho: &Path) -> PdfMetadata {
    let mut meta = PdfMetadata::default();

    let primeira_pagina = match texto_primeira_pagina(caminho) {
        Ok(Some(texto)) => texto,
        Ok(None) => return meta,
        Err(e) => {
            tracing::warn!("Erro ao extrair metadados de {:?}: {}", caminho, e);
            return meta;
        }
    };

    if let Some(c) = RE_ACORDAO.captures(&primeira_pagina) {
        meta.numero_acordao = c[1].trim().to_string();
    }
    if let Some(c) = RE_PROCESSO.captures(&primeira_pagina) {
        meta.numero_processo = c[1].trim().to_string();
    }
    if let Some(c) = RE_NATUREZA.captures(&primeira_pagina) {
        let bruto = c[1].trim().to_uppercase();
        // o rótulo termina onde começa a lista de interessados
        if let Some(natureza) = RE_INTERESSADO.splitn(&bruto, 2).next() {
            meta.natureza = natureza.trim().to_string();
        }
    }

    // acórdão identificado sem rótulo de natureza: o documento É um acórdão
    if meta.numero_acordao != NAO_ENCONTRADO && meta.natureza == NAO_ESPECIFICADO {
        meta.natureza = "ACÓRDÃO".to_string();
    }

    meta
}

/// Extrai os blocos de texto do PDF na ordem de leitura, um bloco por
/// linha não vazia.
pub fn extrair_paragrafos(caminho: &Path) -> Result<Vec<String>, ExtractorError> {
    let doc = Document::load(caminho)?;
    let paginas: Vec<u32> = doc.get_pages().keys().copied().collect();

    let mut paragrafos = Vec::new();
    for pagina in paginas {
        let texto = doc.extract_text(&[pagina])?;
        for bloco in texto.split('\n') {
            let bloco = bloco.trim();
            if !bloco.is_empty() {
                paragrafos.push(bloco.replace('\r', " "));
            }
        }
    }
    Ok(paragrafos)
}

fn texto_primeira_pagina(caminho: &Path) -> Result<Option<String>, ExtractorError> {
    let doc = Document::load(caminho)?;
    match doc.get_pages().keys().next().copied() {
        Some(pagina) => Ok(Some(doc.extract_text(&[pagina])?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regex_de_metadados_reconhecem_cabecalho_tipico() {
        let primeira_pagina = "TRIBUNAL DE CONTAS DO ESTADO\n\
            PROCESSO Nº: 12345.678-9/2023\n\
            NATUREZA: REPRESENTAÇÃO INTERESSADO: PREFEITURA MUNICIPAL\n\
            ACÓRDÃO Nº 456/2023-PLEN";

        let processo = RE_PROCESSO.captures(primeira_pagina).unwrap();
        assert_eq!(&processo[1], "12345.678-9/2023");

        let acordao = RE_ACORDAO.captures(primeira_pagina).unwrap();
        assert_eq!(&acordao[1], "456/2023-PLEN");

        let natureza_bruta = RE_NATUREZA.captures(primeira_pagina).unwrap()[1]
            .trim()
            .to_uppercase();
        let natureza = RE_INTERESSADO.splitn(&natureza_bruta, 2).next().unwrap();
        assert_eq!(natureza.trim(), "REPRESENTAÇÃO");
    }

    #[test]
    fn pdf_inexistente_degrada_para_sentinelas() {
        let meta = extrair_metadados(Path::new("/caminho/que/nao/existe.pdf"));
        assert_eq!(meta.numero_processo, NAO_ENCONTRADO);
        assert_eq!(meta.natureza, NAO_ESPECIFICADO);
        assert_eq!(meta.numero_acordao, NAO_ENCONTRADO);
    }
}
