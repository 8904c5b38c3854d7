use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use zip::ZipArchive;

use crate::error::ExtractorError;

/// Extrai os parágrafos de um arquivo DOCX na ordem do corpo do documento.
pub fn extrair_paragrafos(caminho: &Path) -> Result<Vec<String>, ExtractorError> {
    let arquivo = File::open(caminho)?;
    extrair_de_leitor(arquivo)
}

/// DOCX é um zip com o corpo em `word/document.xml`; cada elemento `w:p`
/// vira um parágrafo, concatenando o texto dos seus nós `w:t`.
pub fn extrair_de_leitor<R: Read + Seek>(leitor: R) -> Result<Vec<String>, ExtractorError> {
    let mut arquivo_zip = ZipArchive::new(leitor)?;
    let mut xml = String::new();
    arquivo_zip
        .by_name("word/document.xml")?
        .read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);
    let mut paragrafos = Vec::new();
    let mut atual = String::new();
    let mut em_paragrafo = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"p" => {
                em_paragrafo = true;
                atual.clear();
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"p" => {
                em_paragrafo = false;
                paragrafos.push(std::mem::take(&mut atual));
            }
            Ok(Event::Text(t)) if em_paragrafo => {
                atual.push_str(&t.unescape()?);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractorError::Xml(e)),
            _ => {}
        }
    }

    Ok(paragrafos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn docx_em_memoria(paragrafos: &[&str]) -> Cursor<Vec<u8>> {
        let corpo: String = paragrafos
            .iter()
            .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
            .collect();
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{corpo}</w:body></w:document>"#
        );

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap()
    }

    #[test]
    fn le_paragrafos_na_ordem_do_corpo() {
        let cursor = docx_em_memoria(&[
            "Primeiro parágrafo do relatório",
            "multa no valor de R$ 10.000,00",
            "",
        ]);
        let paragrafos = extrair_de_leitor(cursor).unwrap();
        assert_eq!(
            paragrafos,
            vec![
                "Primeiro parágrafo do relatório".to_string(),
                "multa no valor de R$ 10.000,00".to_string(),
                String::new(),
            ]
        );
    }

    #[test]
    fn zip_sem_documento_xml_e_erro() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("outro.txt", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"nada").unwrap();
        let cursor = zip.finish().unwrap();

        assert!(extrair_de_leitor(cursor).is_err());
    }
}
