use std::time::Instant;
use tce_valores_rust::{export, AppConfig, DocumentPipeline};
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Inicializa logs com hora local
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // Carrega configuração
    let config = AppConfig::from_env();
    info!("Iniciando extração com config: {:?}", config);

    if !config.paths.pasta_raiz.exists() {
        eprintln!(
            "Pasta raiz '{}' não encontrada. Crie-a e adicione as subpastas dos processos.",
            config.paths.pasta_raiz.display()
        );
        std::process::exit(1);
    }

    // Processa todas as subpastas, medindo o tempo total
    let inicio = Instant::now();
    let pipeline = DocumentPipeline::new(&config)?;
    let resultados = pipeline
        .processar_pasta_raiz(&config.paths.pasta_raiz)
        .await?;
    info!(
        "Tempo total de execução: {:.2} segundos",
        inicio.elapsed().as_secs_f64()
    );

    if resultados.is_empty() {
        println!(
            "Nenhuma subpasta válida encontrada ou processada em '{}'.",
            config.paths.pasta_raiz.display()
        );
    }

    // Escala de confiança usada na planilha
    println!("\n------------------------------Escala de Confiança no valor classificado------------------------------");
    println!("VERDE---->Alta Confiança");
    println!("AMARELO-->Baixa Confiança");
    println!("LARANJA-->Nenhum Valor Encontrado");
    println!("VERMELHO->Arquivado por Admissibilidade");
    println!("BRANCO--->Default");
    println!("-----------------------------------------------------------------------------------------------------\n");

    // Exporta a planilha uma única vez, com todos os resultados
    export::exportar_csv(&resultados, &config.llm.modelos, &config.paths.saida)?;
    info!("Planilha '{}' salva com sucesso", config.paths.saida.display());

    Ok(())
}
