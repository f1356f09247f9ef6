//! prompt-improver — command line front-end and stdio relay host.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use prompt_improver::credentials::display_credential;
use prompt_improver::{
    Credential, CredentialStore, Dispatcher, GenerationClientBuilder, ImprovementResult,
    KeyringStore, Relay, RelayConfig,
};

#[derive(Parser)]
#[command(name = "prompt-improver")]
#[command(author, version, about = "Suggest improved rewordings of a chat prompt", long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Model to call, overriding configuration
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print improved versions of PROMPT
    Improve {
        prompt: String,

        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Store the API key (read from stdin when omitted)
    SetKey { key: Option<String> },

    /// Show the stored API key, masked
    ShowKey,

    /// Remove the stored API key
    ClearKey,

    /// Answer newline-delimited JSON commands on stdin/stdout
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("prompt_improver={}", default_level)));
    // stdout carries results in serve mode
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let store = KeyringStore::new();

    match cli.command {
        Commands::SetKey { key } => {
            let secret = match key {
                Some(k) => k,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("failed to read API key from stdin")?;
                    buf.trim().to_string()
                }
            };
            let credential = Credential::new(secret)?;
            let masked = credential.masked();
            store.set(credential).await?;
            println!("API key saved ({})", masked);
        }
        Commands::ShowKey => {
            let credential = store.get().await?;
            println!("{}", display_credential(credential.as_ref()));
        }
        Commands::ClearKey => {
            store.clear().await?;
            println!("API key removed");
        }
        Commands::Improve { prompt, json } => {
            let relay = build_relay(cli.config, cli.model)?;
            let result = relay.improve_with_store(&prompt, &store).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&result)?;
            }
        }
        Commands::Serve => {
            let relay = build_relay(cli.config, cli.model)?;
            let dispatcher = Dispatcher::new(&relay, &store);
            dispatcher
                .serve_lines(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
                .await?;
        }
    }

    Ok(())
}

fn build_relay(config_path: Option<PathBuf>, model: Option<String>) -> Result<Relay> {
    let mut config = RelayConfig::load(config_path.as_deref())?;
    if let Some(model) = model {
        config.model = model;
    }
    let language = config.language;
    let client = GenerationClientBuilder::new().config(config).build()?;
    Ok(Relay::new(Arc::new(client)).with_language(language))
}

fn print_result(result: &ImprovementResult) -> Result<()> {
    match result {
        ImprovementResult::Success { suggestions, .. } => {
            for (i, s) in suggestions.iter().enumerate() {
                println!("{}. {}", i + 1, s);
            }
            Ok(())
        }
        ImprovementResult::Failure {
            reason,
            raw_response,
            ..
        } => {
            if let Some(raw) = raw_response {
                eprintln!("raw response:\n{}", raw);
            }
            bail!("{}", reason)
        }
    }
}
