use anyhow::Result;
use std::time::Duration;
use tracing::{info, warn};
use yt_localize::{config, engine, languages, probe};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production/GitHub Actions)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("yt_localize=info".parse()?),
        )
        .init();

    // Load configuration from environment before touching the network
    let config = config::Config::from_env()?;
    let targets = languages::resolve_targets(&config.target_language_codes)?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?;

    // `--check` runs the component pre-flight instead of the sync
    if std::env::args().any(|arg| arg == "--check") {
        info!("Running pre-flight checks");
        probe::run_preflight(&client, &config, &targets).await?;
        return Ok(());
    }

    info!(
        "Starting localization sync for video {} ({} target languages)",
        config.video_id,
        targets.len()
    );

    let outcome = engine::sync_localizations(&client, &config, &targets).await?;

    // End-of-run summary: partial failures are reported, never swallowed
    if outcome.update_performed {
        info!(
            "Localizations updated for: {}",
            outcome
                .languages_updated
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        );
    } else {
        info!("No localizations written this run");
    }
    if !outcome.languages_failed.is_empty() {
        warn!(
            "Languages skipped after translation failures: {}",
            outcome
                .languages_failed
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    Ok(())
}
