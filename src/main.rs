//! Tempo98 CLI - previsão do tempo retrô no terminal

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tempo98::{SearchSession, SearchState, TempoConfig, TempoError, WeatherApiClient};
use tracing_subscriber::EnvFilter;

/// Previsão do tempo retrô no terminal, estilo Windows 98
#[derive(Debug, Parser)]
#[command(name = "tempo98", version, about)]
struct Cli {
    /// Nome da cidade (palavras soltas são unidas com espaços)
    #[arg(value_name = "CIDADE")]
    city: Vec<String>,

    /// Caminho para um arquivo de configuração alternativo
    #[arg(long, value_name = "ARQUIVO")]
    config: Option<PathBuf>,

    /// Imprime o estado final da busca em JSON
    #[arg(long)]
    json: bool,

    /// Saída detalhada (nível de log debug)
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(cli: &Cli, config: &TempoConfig) {
    let default_level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tempo98={default_level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(state) if state.error.is_none() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            // Prefer the pt-BR message when the failure is one of ours
            match err.downcast_ref::<TempoError>() {
                Some(tempo_err) => eprintln!("{}", tempo_err.user_message()),
                None => eprintln!("{err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<SearchState> {
    let config = TempoConfig::load_from_path(cli.config.clone())
        .with_context(|| "Falha ao carregar a configuração")?;
    init_tracing(cli, &config);

    let client = WeatherApiClient::new(&config)?;
    let session = SearchSession::new(client);

    let city = cli.city.join(" ");
    if cli.verbose && !city.trim().is_empty() {
        println!("Buscando previsão para: {}", city.trim());
    }

    let state = session.search(&city).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        render(&state, &config);
    }

    Ok(state)
}

/// Render the final search state with the retro text theme
fn render(state: &SearchState, config: &TempoConfig) {
    println!("╔══════════════════════════════════════╗");
    println!("║          Previsão do Tempo           ║");
    println!("╚══════════════════════════════════════╝");

    if let Some(error) = &state.error {
        println!();
        println!("{error}");
        if let Some(alert) = &state.alert {
            println!();
            println!("[{}]", alert.title);
            println!("{}", alert.body);
        }
        return;
    }

    if let Some(current) = &state.current {
        println!();
        println!("{}", current.city);
        println!(
            "{}°C  {} {}",
            current.temp.round(),
            current.format_description(),
            current.condition_label()
        );
        println!("  Mínima: {}°C", current.temp_min.round());
        println!("  Máxima: {}°C", current.temp_max.round());
        println!("  Umidade: {}%", current.humidity);
        println!("  Vento: {} m/s", current.wind_speed);
        println!("  Ícone: {}", current.icon_url(&config.weather.icon_base_url));
    }

    if !state.daily.is_empty() {
        println!();
        println!("Previsão para os Próximos Dias:");
        for day in &state.daily {
            println!(
                "  {}  {}°C (Min: {}°C / Max: {}°C)  {}",
                day.format_date(),
                day.temp.round(),
                day.min_temp.round(),
                day.max_temp.round(),
                day.format_description()
            );
        }
    }
}
