mod cli;
mod config;
mod errors;
mod generation;
mod job_source;
mod latex;
mod llm_client;
mod models;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;
use crate::errors::AppError;
use crate::latex::ResumeDocument;
use crate::llm_client::LlmClient;
use crate::pipeline::{RunOptions, SectionOutcome};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging on stderr; stdout is reserved for --dry-run output
    tracing_subscriber::registry()
        .with(log_filter(cli.verbose, &config.rust_log))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting tailor v{}", env!("CARGO_PKG_VERSION"));

    let document = ResumeDocument::load(&cli.resume)?;

    if cli.dry_run {
        println!("{}", serde_json::to_string_pretty(&document.records())?);
        return Ok(());
    }

    let options = RunOptions {
        sections: cli.selected_sections(),
        bullet_target: cli.bullet_target(config.bullet_target)?,
        output: cli.output.clone().unwrap_or_else(|| config.output.clone()),
    };

    let api_key = config.require_api_key()?.to_string();
    let job_description = cli.job_source().resolve(config.scrape_timeout).await?;

    // Initialize LLM client
    let llm = LlmClient::new(
        api_key,
        config.llm_timeout,
        config.llm_max_attempts,
    )
    .map_err(|e| AppError::Llm(e.to_string()))?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let report = pipeline::run(&llm, document, &job_description, &options).await?;

    for section in &report.sections {
        match &section.outcome {
            SectionOutcome::Patched => info!(
                "{}: {} -> {} records",
                section.kind, section.extracted, section.generated
            ),
            SectionOutcome::Skipped(reason) => info!("{}: skipped ({reason})", section.kind),
            SectionOutcome::Failed(reason) => warn!("{}: failed ({reason})", section.kind),
        }
    }
    info!("Updated résumé saved as {}", report.output.display());

    Ok(())
}

/// `-v` forces debug logging for this crate, even over `RUST_LOG`. Without it,
/// `RUST_LOG` applies, then the configured level.
fn log_filter(verbose: bool, configured_level: &str) -> EnvFilter {
    let crate_name = env!("CARGO_PKG_NAME");
    if verbose {
        return EnvFilter::new(format!("{crate_name}=debug"));
    }
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{crate_name}={configured_level}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_overrides_rust_log() {
        std::env::set_var("RUST_LOG", "warn");
        let verbose = log_filter(true, "info").to_string();
        let quiet = log_filter(false, "info").to_string();
        std::env::remove_var("RUST_LOG");
        let configured = log_filter(false, "info").to_string();

        assert_eq!(verbose, "tailor=debug");
        assert_eq!(quiet, "warn");
        assert_eq!(configured, "tailor=info");
    }
}
