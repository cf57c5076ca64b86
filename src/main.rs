use anyhow::Context;
use autopost::cli::{Cli, Commands};
use autopost::clients::gemini::GeminiClient;
use autopost::clients::openai::OpenAiClient;
use autopost::clients::wordpress::WordPressConfig;
use autopost::clients::{LlmConfig, Provider};
use autopost::commands::{self, GenerateOutcome};
use autopost::config::AppConfig;
use autopost::generator::{DraftGenerator, GenerationError};
use autopost::keywords::SelectionMode;
use autopost::publisher;
use clap::Parser;
use env_logger::Env;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse the specified (or default) .env file
    let dotenv_path = env::var("AUTOPOST_DOTENV_PATH").unwrap_or_else(|_| ".env".to_string());
    let dotenv_result = dotenvy::from_path(&dotenv_path);

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match dotenv_result {
        Ok(()) => log::info!("Loaded env from {}", dotenv_path),
        Err(err) => log::debug!("No .env loaded from {}: {}", dotenv_path, err),
    }

    let cli = Cli::parse();
    let config = AppConfig::from_env().context("Reading configuration")?;

    match cli.command {
        Commands::Generate { mode } => run_generate(&config, mode).await,
        Commands::Publish { dry_run } => run_publish(&config, dry_run).await,
    }
}

async fn run_generate(config: &AppConfig, mode: SelectionMode) -> anyhow::Result<()> {
    let llm = LlmConfig::from_env().context("Reading LLM configuration")?;
    let today = chrono::Local::now().date_naive();
    let mut rng = rand::thread_rng();

    let outcome = match llm.provider {
        Provider::OpenAi => {
            let generator = DraftGenerator::new(OpenAiClient::new(&llm)?);
            commands::generate(config, &generator, mode, today, &mut rng).await
        }
        Provider::Gemini => {
            let generator = DraftGenerator::new(GeminiClient::new(&llm)?);
            commands::generate(config, &generator, mode, today, &mut rng).await
        }
    };

    let GenerateOutcome { path, title, .. } = match outcome {
        Ok(outcome) => outcome,
        Err(err) => {
            if err
                .downcast_ref::<GenerationError>()
                .is_some_and(GenerationError::is_rate_limited)
            {
                eprintln!("Rate limit reached; wait before running generate again.");
            }
            return Err(err);
        }
    };

    println!("Generated: {} ({})", path.display(), title);
    Ok(())
}

async fn run_publish(config: &AppConfig, dry_run: bool) -> anyhow::Result<()> {
    if dry_run {
        let (payload, path) = commands::publish_to_file(config)?;
        println!("{}", publisher::preview(&payload));
        println!("\nPayload written to {}", path.display());
        return Ok(());
    }

    let wordpress = WordPressConfig::from_env().context("Reading WordPress configuration")?;
    let (_, post) = commands::publish_to_wordpress(config, wordpress).await?;
    println!(
        "Posted to WordPress: {}",
        post.link.as_deref().unwrap_or("(no link returned)")
    );
    Ok(())
}
