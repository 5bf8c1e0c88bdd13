//! # State Connector Verifier
//!
//! Entry point: wires the verifiers for one chain and, when a request file
//! is configured, verifies it and prints the response DTO as JSON.

use anyhow::{Context, Result};
use sc_01_attestation_codec::AttestationRequest;
use sc_node::{
    init_logging, load_definitions, load_indexer_store, VerifierConfig, Verifiers, VERSION,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = VerifierConfig::from_env().context("Invalid verifier configuration")?;
    init_logging(&config).context("Failed to initialize logging")?;

    info!("===========================================");
    info!("  State Connector Verifier v{}", VERSION);
    info!("  Chain: {}", config.chain);
    info!("===========================================");

    let definitions = load_definitions(&config.config_dir)
        .context("Failed to load attestation definitions")?;
    let store = load_indexer_store(config.indexer_snapshot.as_deref())
        .context("Failed to load indexer")?;
    let verifiers =
        Verifiers::build(&config, definitions, store).context("Failed to wire verifiers")?;

    let Some(path) = config.request_file.as_deref() else {
        info!("[sc-node] No request file configured, nothing to verify");
        return Ok(());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file {}", path.display()))?;
    let request: AttestationRequest = serde_json::from_str(&raw)
        .with_context(|| format!("Malformed attestation request in {}", path.display()))?;

    let dto = verifiers
        .verify(&request)
        .await
        .context("Verification failed")?;
    println!("{}", serde_json::to_string_pretty(&dto)?);
    Ok(())
}
