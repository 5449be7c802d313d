use anyhow::{Context, Result};
use dotenv::dotenv;
use log::{error, info};

use sleep_proof::config::{self, ProofConfig};
use sleep_proof::{logging, output, submission, ProofGenerator};

async fn run() -> Result<()> {
    let config = ProofConfig::from_env().context("Failed to load proof config")?;
    info!("Using config: {:?}", config);

    submission::ensure_not_empty(&config.input_dir)?;

    let proof = ProofGenerator::from_config(&config)?
        .generate(&config)
        .await
        .context("Proof generation failed")?;

    let output_dir = config::output_dir(|key| std::env::var(key).ok());
    let path = output::write_results(&output_dir, &proof)
        .with_context(|| format!("Failed to write results to {:?}", output_dir))?;

    info!("Proof generation complete: valid={} score={}", proof.valid, proof.score);
    info!("Results written to {:?}", path);
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    if let Err(e) = logging::init_from_env() {
        eprintln!("Failed to initialize logger: {}", e);
    }

    if let Err(e) = run().await {
        error!("Error during proof generation: {:#}", e);
        std::process::exit(1);
    }
}
