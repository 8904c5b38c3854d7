pub mod discover;
pub mod docx;
pub mod pdf;

use std::path::Path;

use crate::error::ExtractorError;

pub use discover::{listar_subpastas, localizar_documento};

/// Extrai a sequência de parágrafos conforme a extensão do arquivo.
///
/// Extensões sem leitor dedicado (`.doc` legado) produzem sequência vazia,
/// que o pipeline trata como documento sem conteúdo aproveitável.
pub fn obter_paragrafos(caminho: &Path) -> Result<Vec<String>, ExtractorError> {
    let extensao = caminho
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extensao.as_str() {
        "pdf" => pdf::extrair_paragrafos(caminho),
        "docx" => docx::extrair_paragrafos(caminho),
        _ => Ok(Vec::new()),
    }
}
