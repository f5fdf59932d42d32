//! `koji` — interactive terminal simulator for Koji's emotional state.
//!
//! Type events ("bang!", "music", "pet") and watch the mood change; a
//! background tick lets moods decay back to curious.

mod app;
mod input;

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use koji_core::{KojiConfig, VariationEngine};
use koji_llm::{LlmClient, LlmStrategy};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app::App;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Ollama API URL
    #[arg(long, env = "KOJI_OLLAMA_URL")]
    ollama: Option<String>,

    /// LLM model to use
    #[arg(long, env = "KOJI_MODEL")]
    model: Option<String>,

    /// Disable the LLM and pick actions with the variation engine only
    #[arg(long)]
    no_llm: bool,

    /// Path to a koji.toml configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the variation engine (wall clock if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Decay check interval in milliseconds
    #[arg(long, default_value_t = 1000)]
    tick_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => KojiConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => KojiConfig::default(),
    };
    if let Some(url) = args.ollama {
        config.llm.base_url = url;
    }
    if let Some(model) = args.model {
        config.llm.model = model;
    }
    if args.no_llm {
        config.llm.enabled = false;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("=== Koji Emotional State Simulator ===\n");

    let llm = connect_llm(&config).await?;
    let engine = match args.seed {
        Some(seed) => VariationEngine::with_config_and_seed(config.variation.clone(), seed),
        None => VariationEngine::with_config(config.variation.clone()),
    };
    let mut app = App::new(&config, engine, llm);

    print!("{}", app.handle_line("status").await.text);
    print!("{}", app.handle_line("help").await.text);
    prompt()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_millis(args.tick_ms.max(1)));

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Some(text) = app.tick_at(Utc::now()) {
                    print!("{text}");
                    prompt()?;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("stdin closed");
                    break;
                };
                let reply = app.handle_line(&line).await;
                print!("{}", reply.text);
                if reply.quit {
                    break;
                }
                prompt()?;
            }
        }
    }

    Ok(())
}

/// Build the LLM strategy if enabled and reachable.
async fn connect_llm(config: &KojiConfig) -> anyhow::Result<Option<LlmStrategy>> {
    if !config.llm.enabled {
        println!("Running with the variation engine only (--no-llm)\n");
        return Ok(None);
    }

    let client = LlmClient::from_config(&config.llm).context("configuring LLM client")?;
    if let Err(e) = client.ping().await {
        warn!(error = %e, "LLM backend unreachable");
        println!("Warning: Cannot connect to LLM at {}: {e}", config.llm.base_url);
        println!("Running with the variation engine only.");
        println!("Start Ollama with: ollama serve\n");
        return Ok(None);
    }

    match client.check_model().await {
        Ok((true, _)) => {}
        Ok((false, available)) => {
            warn!(model = %config.llm.model, "model not installed");
            println!(
                "Warning: model {} not found. Available: [{}]",
                config.llm.model,
                available.join(", ")
            );
            println!("Pull it with: ollama pull {}\n", config.llm.model);
        }
        Err(e) => warn!(error = %e, "could not list models"),
    }

    println!("Connected to LLM (model: {})", client.model());
    println!("LLM will select actions based on personality.\n");
    Ok(Some(LlmStrategy::with_config(client, &config.llm)))
}

fn prompt() -> std::io::Result<()> {
    print!("> ");
    std::io::stdout().flush()
}
