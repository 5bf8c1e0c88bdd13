//! Verifier configuration from environment variables.

use sc_03_verification::AttestationType;
use shared_types::ChainType;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors. Any of these aborts startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `VERIFIER_CHAIN` names no supported chain.
    #[error("Unsupported chain: {0}")]
    UnknownChain(String),

    /// `VERIFIER_ATTESTATION_TYPES` names no supported type.
    #[error("Unsupported attestation type: {0}")]
    UnknownAttestationType(String),

    /// `VERIFIER_ATTESTATION_TYPES` is set but empty.
    #[error("No attestation types configured")]
    NoAttestationTypes,

    /// A numeric variable did not parse.
    #[error("Invalid value for {key}: {value}")]
    InvalidNumber {
        /// Variable name
        key: &'static str,
        /// Raw value
        value: String,
    },
}

/// Verifier node configuration.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Chain this node verifies
    pub chain: ChainType,

    /// Attestation types served, one verifier each
    pub attestation_types: Vec<AttestationType>,

    /// Directory holding one ABI definition file per attestation type
    pub config_dir: PathBuf,

    /// Required confirmation depth
    pub confirmations: u64,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Indexer snapshot (JSON) to serve queries from
    pub indexer_snapshot: Option<PathBuf>,

    /// Attestation request (JSON) to verify once at startup
    pub request_file: Option<PathBuf>,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            chain: ChainType::Btc,
            attestation_types: AttestationType::ALL.to_vec(),
            config_dir: PathBuf::from("config/attestation-types"),
            confirmations: ChainType::Btc.default_confirmations(),
            log_level: "info".to_string(),
            json_logs: false,
            indexer_snapshot: None,
            request_file: None,
        }
    }
}

impl VerifierConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `VERIFIER_CHAIN`: Source chain (default: BTC)
    /// - `VERIFIER_ATTESTATION_TYPES`: Comma-separated type names (default: all four)
    /// - `VERIFIER_CONFIG_DIR`: ABI definition directory (default: config/attestation-types)
    /// - `VERIFIER_CONFIRMATIONS`: Confirmation depth (default: per chain)
    /// - `VERIFIER_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `VERIFIER_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `VERIFIER_INDEXER_SNAPSHOT`: Indexer snapshot file (default: empty indexer)
    /// - `VERIFIER_REQUEST_FILE`: Request to verify at startup (default: none)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`VerifierConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let chain = match lookup("VERIFIER_CHAIN") {
            Some(name) => name
                .parse::<ChainType>()
                .map_err(|_| ConfigError::UnknownChain(name))?,
            None => ChainType::Btc,
        };

        let attestation_types = match lookup("VERIFIER_ATTESTATION_TYPES") {
            Some(list) => parse_attestation_types(&list)?,
            None => AttestationType::ALL.to_vec(),
        };

        let confirmations = match lookup("VERIFIER_CONFIRMATIONS") {
            Some(value) => value.trim().parse::<u64>().map_err(|_| ConfigError::InvalidNumber {
                key: "VERIFIER_CONFIRMATIONS",
                value,
            })?,
            None => chain.default_confirmations(),
        };

        Ok(Self {
            chain,
            attestation_types,
            config_dir: lookup("VERIFIER_CONFIG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("config/attestation-types")),
            confirmations,
            log_level: lookup("VERIFIER_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or_else(|| "info".to_string()),
            json_logs: lookup("VERIFIER_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
            indexer_snapshot: lookup("VERIFIER_INDEXER_SNAPSHOT").map(PathBuf::from),
            request_file: lookup("VERIFIER_REQUEST_FILE").map(PathBuf::from),
        })
    }
}

fn parse_attestation_types(list: &str) -> Result<Vec<AttestationType>, ConfigError> {
    let mut types = Vec::new();
    for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        let attestation_type = name
            .parse::<AttestationType>()
            .map_err(|_| ConfigError::UnknownAttestationType(name.to_string()))?;
        if !types.contains(&attestation_type) {
            types.push(attestation_type);
        }
    }
    if types.is_empty() {
        return Err(ConfigError::NoAttestationTypes);
    }
    Ok(types)
}
