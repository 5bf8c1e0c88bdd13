//! # Verification Workflows
//!
//! Every workflow runs **fetch → gate → type-specific checks → assemble** and
//! is total: each outcome is a [`Verification`], never an error.
//!
//! ```text
//! fetch ──► gate ──┬─► NON_EXISTENT_* / DATA_AVAILABILITY_ISSUE
//!                  └─► NEEDS_MORE_CHECKS ──► checks ──┬─► INVALID reason
//!                                                     └─► OK + response body
//! ```

pub mod balance_decreasing;
pub mod block_height;
pub mod payment;
pub mod referenced_nonexistence;

pub use balance_decreasing::verify_balance_decreasing_transaction;
pub use block_height::verify_confirmed_block_height_exists;
pub use payment::verify_payment;
pub use referenced_nonexistence::verify_referenced_payment_nonexistence;

use crate::domain::{Verification, VerificationStatus};
use crate::ports::{ChainTransaction, TransactionParser};
use sc_01_attestation_codec::Integer;
use sc_02_indexed_query::{ConfirmedQueryStatus, IndexedTransactionResult, ReferencedQueryStatus};
use shared_types::MAX_SAFE_INTEGER;
use tracing::warn;

/// Verified response body and the timestamp it depends on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedBody<B> {
    /// Earliest timestamp whose indexer state the verdict depends on.
    pub lowest_used_timestamp: u64,
    /// Typed response body.
    pub response_body: B,
}

/// Result of a workflow.
pub type WorkflowResult<B> = Verification<VerifiedBody<B>>;

/// Gate for a confirmed transaction lookup.
pub fn transaction_gate(status: ConfirmedQueryStatus) -> VerificationStatus {
    match status {
        ConfirmedQueryStatus::Ok => VerificationStatus::NeedsMoreChecks,
        ConfirmedQueryStatus::NotExist => VerificationStatus::NonExistentTransaction,
        ConfirmedQueryStatus::SystemFailure => VerificationStatus::DataAvailabilityIssue,
    }
}

/// Gate for a confirmed block lookup.
pub fn block_gate(status: ConfirmedQueryStatus) -> VerificationStatus {
    match status {
        ConfirmedQueryStatus::Ok => VerificationStatus::NeedsMoreChecks,
        ConfirmedQueryStatus::NotExist => VerificationStatus::NonExistentBlock,
        ConfirmedQueryStatus::SystemFailure => VerificationStatus::DataAvailabilityIssue,
    }
}

/// Gate for a referenced transactions search.
pub fn referenced_gate(status: ReferencedQueryStatus) -> VerificationStatus {
    match status {
        ReferencedQueryStatus::Ok => VerificationStatus::NeedsMoreChecks,
        ReferencedQueryStatus::NoOverflowBlock
        | ReferencedQueryStatus::NoBoundary
        | ReferencedQueryStatus::SystemFailure => VerificationStatus::DataAvailabilityIssue,
    }
}

/// The value as an index, if it lies in `[0, MAX_SAFE_INTEGER)`.
pub fn safe_index(value: &Integer) -> Option<u64> {
    value.to_u64().filter(|index| *index < MAX_SAFE_INTEGER)
}

/// Parse the stored raw response. Unparseable data is a system failure of
/// the indexer, not an invalid claim.
pub(crate) fn parse_transaction(
    parser: &dyn TransactionParser,
    transaction: &IndexedTransactionResult,
) -> Result<Box<dyn ChainTransaction>, VerificationStatus> {
    parser.parse(transaction.response()).map_err(|e| {
        warn!(
            "[sc-03] Stored transaction {} is unreadable: {}",
            transaction.transaction_id, e
        );
        VerificationStatus::SystemFailure
    })
}

/// Shorthand for a verdict without a body.
pub(crate) fn rejected<B>(status: VerificationStatus) -> WorkflowResult<B> {
    Verification::rejected(status)
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! BTC chain with blocks 100..=120 (`timestamp = 10 * height`) and three
    //! required confirmations.

    use sc_02_indexed_query::{
        Confirmations, DbBlock, DbTransaction, DbUtxoInput, DbUtxoOutput, InMemoryIndexerStore,
        TipSyncState, UtxoIndexedQueryManager,
    };
    use serde_json::json;
    use shared_types::{ChainType, ZERO_BYTES_32};
    use std::sync::Arc;

    pub const CONFIRMATIONS: u64 = 3;

    pub fn store(indexed: u64, tip: u64) -> Arc<InMemoryIndexerStore> {
        let store = InMemoryIndexerStore::new();
        for number in 100..=120u64 {
            store.insert_block(DbBlock {
                block_number: number,
                block_hash: format!("{:064x}", number),
                timestamp: number * 10,
                confirmed: number + CONFIRMATIONS <= tip,
                transactions: 1,
            });
        }
        store.set_tip_state(TipSyncState {
            latest_indexed_height: indexed,
            latest_tip_height: tip,
            timestamp: indexed * 10,
        });
        Arc::new(store)
    }

    pub fn manager(store: &Arc<InMemoryIndexerStore>) -> UtxoIndexedQueryManager<InMemoryIndexerStore> {
        UtxoIndexedQueryManager::new(
            store.clone(),
            ChainType::Btc,
            Confirmations::new(CONFIRMATIONS),
        )
    }

    pub fn transaction_id(seed: u8) -> String {
        format!("{:02x}", seed).repeat(32)
    }

    pub fn reference(seed: u8) -> String {
        format!("0x{}", format!("{:02x}", seed).repeat(32))
    }

    /// A payment whose stored header carries `status` and `reference`, with
    /// one sub-row per input and output.
    pub struct Payment<'a> {
        pub seed: u8,
        pub block: u64,
        pub reference: Option<String>,
        pub status: &'a str,
        pub inputs: &'a [(&'a str, i64)],
        pub outputs: &'a [(&'a str, i64)],
    }

    pub fn insert_payment(store: &InMemoryIndexerStore, payment: Payment<'_>) -> String {
        let id = transaction_id(payment.seed);
        let reference = payment
            .reference
            .clone()
            .unwrap_or_else(|| ZERO_BYTES_32.to_string());
        store.insert_transaction(DbTransaction {
            transaction_id: id.clone(),
            block_number: payment.block,
            timestamp: payment.block * 10,
            payment_reference: reference[2..].to_string(),
            transaction_type: "payment".to_string(),
            is_native_payment: true,
            source_addresses_root: None,
            response: json!({
                "txid": id,
                "blocktime": payment.block * 10,
                "status": payment.status,
                "reference": reference,
            })
            .to_string(),
        });
        for (index, (address, value)) in payment.inputs.iter().enumerate() {
            store.insert_utxo_input(DbUtxoInput {
                transaction_id: id.clone(),
                input_index: index as u32,
                previous_transaction_id: "ff".repeat(32),
                previous_output_index: 0,
                sequence: 0,
                script_sig_hex: String::new(),
                address: Some(address.to_string()),
                value: value.to_string(),
                script_pub_key_hex: String::new(),
            });
        }
        for (index, (address, value)) in payment.outputs.iter().enumerate() {
            store.insert_utxo_output(DbUtxoOutput {
                transaction_id: id.clone(),
                output_index: index as u32,
                value: value.to_string(),
                address: Some(address.to_string()),
                script_pub_key_hex: String::new(),
            });
        }
        id
    }

    /// `alice` pays `bob` 120 with 25 change.
    pub fn simple_payment(seed: u8, block: u64) -> Payment<'static> {
        Payment {
            seed,
            block,
            reference: Some(reference(seed)),
            status: "success",
            inputs: &[("alice", 150)],
            outputs: &[("bob", 120), ("alice", 25)],
        }
    }
}
