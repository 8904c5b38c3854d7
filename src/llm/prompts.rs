use serde::Deserialize;

use crate::models::{CaseMetadata, ValueCandidate};

/// Limite de caracteres dos trechos enviados no prompt de resumo.
const LIMITE_TEXTO_RESUMO: usize = 4000;
/// Parágrafos iniciais e finais usados como contexto do resumo.
const PARAGRAFOS_INICIO: usize = 20;
const PARAGRAFOS_FIM: usize = 30;

/// Resposta estruturada esperada do prompt de desambiguação.
#[derive(Debug, Clone, Deserialize)]
pub struct Desambiguacao {
    pub valor_principal_escolhido: String,
    #[serde(default)]
    pub justificativa: String,
    #[serde(default)]
    pub tipo_de_valor: Option<String>,
}

/// Monta o prompt que pede ao modelo a escolha do valor principal entre os
/// primeiros `limite` candidatos.
pub fn prompt_desambiguacao(candidatos: &[ValueCandidate], limite: usize) -> String {
    let mut prompt = String::from(
        "Você é um assistente especialista em análise de documentos do Tribunal de Contas (TCE). \n\
         Sua especialidade é identificar a materialidade das irregularidades em processos, como o \
         valor de um contrato, uma licitação, uma multa aplicada ou um dano ao erário consolidado.\n\n\
         Analise os seguintes 'Candidatos a Valor Principal', extraídos de um documento do TCE. \
         Cada candidato inclui o valor e o parágrafo onde ele foi encontrado.\n\n\
         ### CANDIDATOS PARA ANÁLISE:\n",
    );

    for (i, candidato) in candidatos.iter().take(limite).enumerate() {
        let contexto_limpo = candidato.contexto.replace('\n', " ");
        prompt.push_str(&format!(
            "\n{}. Valor: \"{}\"\n   Contexto: \"...{}...\"\n",
            i + 1,
            candidato.valor_str,
            contexto_limpo.trim()
        ));
    }

    prompt.push_str(
        "\n### TAREFA:\n\
         Com base nos dados acima, retorne APENAS o objeto JSON com sua análise. \
         Não inclua nenhuma outra palavra ou explicação fora do JSON.\n\n\
         Formato de saída obrigatório:\n\
         {\"valor_principal_escolhido\": \"escreva aqui o valor exato que você escolheu\", \
         \"justificativa\": \"explique brevemente o motivo da sua escolha baseado nas regras e no contexto\", \
         \"tipo_de_valor\": \"classifique o valor como 'Valor do Contrato', 'Multa Aplicada', \
         'Dano ao Erário', 'Valor de Devolução' ou 'Outro'\"}\n",
    );

    prompt
}

/// Monta o prompt de resumo com o início e o fim do documento e os
/// metadados já extraídos, truncado para não estourar o contexto do modelo.
pub fn prompt_resumo(paragrafos: &[String], metadados: &CaseMetadata) -> String {
    let inicio = paragrafos.iter().take(PARAGRAFOS_INICIO);
    let fim = paragrafos
        .iter()
        .skip(paragrafos.len().saturating_sub(PARAGRAFOS_FIM));
    let texto: String = inicio
        .chain(fim)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    let texto: String = texto.chars().take(LIMITE_TEXTO_RESUMO).collect();

    format!(
        "Você é um assistente que resume documentos jurídicos do Tribunal de Contas de forma \
         clara e objetiva.\n\n\
         ### DADOS DO PROCESSO:\n\
         Número do Processo: {}, Número do Acórdão: {}.\n\n\
         ### TRECHOS DO DOCUMENTO PARA ANÁLISE:\n\
         \"...{}...\"\n\n\
         ### TAREFA:\n\
         Com base nos dados e no texto acima, gere um resumo conciso de, no máximo, duas frases.\n\
         O resumo deve OBRIGATORIAMENTE mencionar o objeto principal em análise e a decisão final, \
         incluindo o valor monetário principal associado (seja o valor do contrato, da multa, etc.).\n\n\
         Exemplo de um bom resumo:\n\
         \"Análise de Representação sobre o Contrato nº 123/2023 para obras de saneamento, com \
         decisão pela aplicação de multa no valor de R$ 50.000,00 por superfaturamento.\"\n\n\
         ### RESUMO CONCISO:\n",
        metadados.numero_processo, metadados.numero_acordao, texto
    )
}

/// Interpreta a resposta de desambiguação com tolerância: o `}` final pode
/// ter sido consumido como stop token pelo servidor.
pub fn parse_desambiguacao(bruto: &str) -> Option<Desambiguacao> {
    let texto = bruto.trim();
    if let Ok(d) = serde_json::from_str::<Desambiguacao>(texto) {
        return Some(d);
    }
    if !texto.ends_with('}') {
        if let Ok(d) = serde_json::from_str::<Desambiguacao>(&format!("{texto}}}")) {
            return Some(d);
        }
    }
    None
}

/// Normaliza o texto de resumo devolvido pelo modelo.
pub fn limpar_resumo(bruto: &str) -> String {
    bruto
        .replace('"', "")
        .replace("RESUMO:", "")
        .trim()
        .to_string()
}
