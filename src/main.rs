mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use liteguard_models::config::Config;
use liteguard_models::error::{Error, Result};
use liteguard_models::model::{ModelDescriptor, ModelRegistry};
use liteguard_models::server;

fn print_model(model: &ModelDescriptor) {
    println!("  {}", model.name());
    println!("    Path: {}", model.storage_path);
    println!("    Source: {}", model.source_url);
    if let Some(license) = model.license_url() {
        println!("    License: {}", license);
    }
    println!("    Auth required: {}", if model.requires_auth { "yes" } else { "no" });
    match model.preferred_backend {
        Some(backend) => println!("    Backend: {}", backend),
        None => println!("    Backend: runtime default"),
    }
    println!("    UI: {:?}", model.ui_variant);
    println!(
        "    Sampling: temperature={} top_k={} top_p={}",
        model.temperature, model.top_k, model.top_p
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let registry = ModelRegistry::new();

    match cli.command {
        Commands::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(registry.list())?);
            } else {
                println!("Available models:\n");
                for model in registry.list() {
                    print_model(model);
                    println!();
                }
            }
        }

        Commands::Show { model } => {
            let model = registry.get(&model)?;
            let output = serde_json::json!({
                "model": model,
                "download": model.download_request(),
                "inference": model.inference_settings(),
            });

            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Commands::Prompt { model, text } => {
            if text.trim().is_empty() {
                return Err(Error::InvalidInput(
                    "No text provided. Use --text \"your prompt\"".to_string(),
                ));
            }

            let model = registry.get(&model)?;
            tracing::debug!("Formatting prompt for {:?} UI", model.ui_variant);
            println!("{}", model.ui_variant.format_prompt(&text));
        }

        Commands::Check => {
            let violations = registry.validate();
            if violations.is_empty() {
                println!("✓ {} models, no invariant violations", registry.len());
            } else {
                for violation in &violations {
                    tracing::error!("{}", violation);
                }
                return Err(Error::InvalidRegistry(violations.len()));
            }
        }

        Commands::Serve { port, host } => {
            let config = Config::from_env()?;
            let host = host.unwrap_or(config.settings.server.host);
            let port = port.unwrap_or(config.settings.server.port);

            for violation in registry.validate() {
                tracing::warn!("Registry invariant violated: {}", violation);
            }

            println!("🚀 LiteGuard catalog server starting...");
            println!("   Models: {}", registry.len());
            println!("   Listening on: http://{}:{}", host, port);
            println!("   Health: http://{}:{}/api/health", host, port);
            println!("   Models: http://{}:{}/api/models", host, port);

            server::serve(&host, port, server::AppState::new(registry)).await?;
        }
    }

    Ok(())
}
