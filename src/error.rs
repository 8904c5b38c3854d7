use thiserror::Error;

/// Erros da camada de leitura e montagem do pipeline.
///
/// Nenhuma variante aborta o lote: o pipeline captura o erro por processo
/// e registra o critério correspondente no resultado.
#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("erro de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("falha ao abrir PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("arquivo docx inválido: {0}")]
    Docx(#[from] zip::result::ZipError),

    #[error("XML malformado no docx: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("padrão de expressão regular inválido: {0}")]
    Regex(#[from] regex::Error),
}
