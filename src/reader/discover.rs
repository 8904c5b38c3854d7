use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Ordem de preferência quando a subpasta tem mais de um formato.
const EXTENSOES_PRIORIDADE: [&str; 3] = ["pdf", "docx", "doc"];

/// Lista as subpastas de processos em ordem alfabética, para que a
/// planilha final seja reprodutível execução a execução.
pub fn listar_subpastas(raiz: &Path) -> io::Result<Vec<String>> {
    let mut subpastas: Vec<String> = fs::read_dir(raiz)?
        .filter_map(|entrada| entrada.ok())
        .filter(|entrada| entrada.path().is_dir())
        .filter_map(|entrada| entrada.file_name().to_str().map(str::to_string))
        .collect();
    subpastas.sort();
    Ok(subpastas)
}

/// Localiza o documento principal da pasta do processo: varre os nomes em
/// ordem, respeitando a prioridade de extensão e pulando temporários do
/// Office ("~$"). No máximo um documento por processo.
pub fn localizar_documento(pasta: &Path) -> io::Result<Option<PathBuf>> {
    let mut nomes: Vec<String> = fs::read_dir(pasta)?
        .filter_map(|entrada| entrada.ok())
        .filter(|entrada| entrada.path().is_file())
        .filter_map(|entrada| entrada.file_name().to_str().map(str::to_string))
        .collect();
    nomes.sort();

    for ext in EXTENSOES_PRIORIDADE {
        let sufixo = format!(".{ext}");
        for nome in &nomes {
            if nome.starts_with("~$") {
                continue;
            }
            if nome.to_lowercase().ends_with(&sufixo) {
                return Ok(Some(pasta.join(nome)));
            }
        }
    }
    Ok(None)
}
