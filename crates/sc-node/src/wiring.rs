//! # Verifier Wiring
//!
//! Connects the definition store, the indexer and the transaction parser to
//! one [`VerifierService`] per configured attestation type, and routes
//! incoming requests to the service their `attestationType` names.

use crate::config::VerifierConfig;
use sc_01_attestation_codec::{
    decode_attestation_name, AttestationDefinitionStore, AttestationRequest, DefinitionStoreError,
};
use sc_02_indexed_query::{
    query_manager_for, Confirmations, InMemoryIndexerStore, IndexerSnapshot,
};
use sc_03_verification::{
    AttestationResponseDto, AttestationType, AttestationVerifier, JsonTransactionParser,
    VerificationError, VerifierService,
};
use shared_types::ChainType;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Startup and routing failures.
#[derive(Debug, Error)]
pub enum WiringError {
    /// Definition directory could not be loaded.
    #[error(transparent)]
    Definitions(#[from] DefinitionStoreError),

    /// Indexer snapshot could not be read or parsed.
    #[error("Failed to load indexer snapshot {path}: {reason}")]
    Snapshot {
        /// Snapshot path
        path: PathBuf,
        /// Read or parse failure
        reason: String,
    },

    /// Service construction or verification failed.
    #[error(transparent)]
    Verification(#[from] VerificationError),

    /// No verifier is wired for the request's attestation type.
    #[error("No verifier for attestation type {0}")]
    NotServed(String),
}

/// Load one ABI definition per attestation type from `dir`.
pub fn load_definitions(dir: &Path) -> Result<Arc<AttestationDefinitionStore>, WiringError> {
    let definitions = AttestationDefinitionStore::load(dir)?;
    info!(
        "[sc-node] Attestation definitions from {}: {}",
        dir.display(),
        definitions.names().join(", ")
    );
    Ok(Arc::new(definitions))
}

/// Load an indexer snapshot, or start from an empty store.
pub fn load_indexer_store(path: Option<&Path>) -> Result<Arc<InMemoryIndexerStore>, WiringError> {
    let Some(path) = path else {
        info!("[sc-node] No indexer snapshot configured, starting with an empty indexer");
        return Ok(Arc::new(InMemoryIndexerStore::new()));
    };
    let snapshot_error = |reason: String| WiringError::Snapshot {
        path: path.to_path_buf(),
        reason,
    };
    let raw = std::fs::read_to_string(path).map_err(|e| snapshot_error(e.to_string()))?;
    let snapshot: IndexerSnapshot =
        serde_json::from_str(&raw).map_err(|e| snapshot_error(e.to_string()))?;
    info!(
        "[sc-node] Loaded indexer snapshot {}: {} blocks, {} transactions",
        path.display(),
        snapshot.blocks.len(),
        snapshot.transactions.len()
    );
    Ok(Arc::new(InMemoryIndexerStore::from_snapshot(snapshot)))
}

/// One verifier per attestation type, all on the same chain and indexer.
pub struct Verifiers {
    chain: ChainType,
    confirmations: Confirmations,
    services: HashMap<AttestationType, Arc<VerifierService>>,
}

impl Verifiers {
    /// Wire a verifier for every configured attestation type.
    pub fn build(
        config: &VerifierConfig,
        definitions: Arc<AttestationDefinitionStore>,
        store: Arc<InMemoryIndexerStore>,
    ) -> Result<Self, WiringError> {
        let confirmations = Confirmations::new(config.confirmations);
        let indexer = query_manager_for(store, config.chain, confirmations.clone());
        let parser = Arc::new(JsonTransactionParser::new(config.chain.family()));

        let mut services = HashMap::new();
        for &attestation_type in &config.attestation_types {
            let service = VerifierService::new(
                attestation_type,
                definitions.clone(),
                indexer.clone(),
                parser.clone(),
            )?;
            debug!(
                "[sc-node] Wired {} verifier for {} ({})",
                attestation_type,
                config.chain,
                service.attestation_type_id()
            );
            services.insert(attestation_type, Arc::new(service));
        }

        info!(
            "[sc-node] {} verifiers ready for {} at {} confirmations",
            services.len(),
            config.chain,
            config.confirmations
        );
        Ok(Self {
            chain: config.chain,
            confirmations,
            services,
        })
    }

    /// Chain every verifier serves.
    pub fn chain(&self) -> ChainType {
        self.chain
    }

    /// Number of wired verifiers.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether no verifier is wired.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Verifier for an attestation type.
    pub fn get(&self, attestation_type: AttestationType) -> Option<&Arc<VerifierService>> {
        self.services.get(&attestation_type)
    }

    /// Change the confirmation depth of every verifier. Applies to the next
    /// query; in-flight verifications keep the depth they read.
    pub fn set_confirmations(&self, confirmations: u64) {
        info!("[sc-node] Confirmation depth set to {}", confirmations);
        self.confirmations.set(confirmations);
    }

    /// Verifier the request is addressed to.
    pub fn route(
        &self,
        request: &AttestationRequest,
    ) -> Result<&Arc<VerifierService>, WiringError> {
        let name = decode_attestation_name(&request.attestation_type)
            .map_err(VerificationError::from)?;
        let attestation_type = name
            .parse::<AttestationType>()
            .map_err(|_| WiringError::NotServed(name.clone()))?;
        self.get(attestation_type).ok_or(WiringError::NotServed(name))
    }

    /// Route and verify a request.
    pub async fn verify(
        &self,
        request: &AttestationRequest,
    ) -> Result<AttestationResponseDto, WiringError> {
        Ok(self.route(request)?.verify(request).await?)
    }
}
