use anyhow::Context;
use clap::Parser;
use ecowaste_ai::{analyzer, capture, cli, config, error, export, report};
use ecowaste_common::{consistency_warnings, AnalysisResult, ReportView, ViewState};
use cli::{Cli, Commands};
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose { "ecowaste=debug,ecowaste_ai=debug,ecowaste_common=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn spinner(message: &str) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✖ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    match cli.command {
        Commands::Analyze { image, output, pdf, output_dir, model } => {
            println!("♻ ecowaste - Waste Analysis\n");

            let model = model.unwrap_or_else(|| config.model.clone());
            let client = analyzer::GeminiClient::new(
                config.resolve_api_key(),
                model,
                config.api_base_url.clone(),
            );

            let pb = spinner(&format!("Analyzing {} with {}...", image.display(), client.model()))?;
            let state = analyzer::analyze_file(&client, &image).await;
            pb.finish_and_clear();

            match state? {
                ViewState::Success { image: uploaded, result } => {
                    println!("{}", report::render_text(&ReportView::build(&result)));

                    if let Some(path) = output {
                        save_result(&result, &path)?;
                        println!("✔ Result saved: {}", path.display());
                    }

                    if pdf {
                        let dir = output_dir.unwrap_or_else(|| PathBuf::from("."));
                        export::export_report(&result, Some(&uploaded), &dir)?;
                    }
                }
                ViewState::Error { message, .. } => {
                    if !client.has_api_key() {
                        eprintln!("{}", error::EcoWasteError::MissingApiKey);
                    }
                    anyhow::bail!(message);
                }
                other => anyhow::bail!("analysis ended in unexpected state: {}", other.phase().as_str()),
            }
        }

        Commands::Export { input, image, output } => {
            println!("📄 ecowaste - Export\n");

            let content = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let result: AnalysisResult = serde_json::from_str(&content)
                .with_context(|| format!("{} is not an analysis result", input.display()))?;

            for warning in consistency_warnings(&result) {
                tracing::warn!("{}", warning);
            }

            let encoded = image.as_deref().map(capture::encode_file).transpose()?;
            let dir = output.unwrap_or_else(|| PathBuf::from("."));
            export::export_report(&result, encoded.as_ref(), &dir)?;

            println!("\n✅ Export complete");
        }

        Commands::Config { set_api_key, set_model, show } => {
            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ API key saved");
            }

            if let Some(model) = set_model {
                config.set_model(model)?;
                println!("✔ Default model saved");
            }

            if show {
                println!("Config: {}", Config::config_path()?.display());
                println!("  Model: {}", config.model);
                println!("  API base: {}", config.api_base_url);
                println!(
                    "  API key: {}",
                    if config.resolve_api_key().is_some() { "set" } else { "not set" }
                );
            }
        }
    }

    Ok(())
}

fn save_result(result: &AnalysisResult, path: &Path) -> error::Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(path, json)?;
    Ok(())
}
