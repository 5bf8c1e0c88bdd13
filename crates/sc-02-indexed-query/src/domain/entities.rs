//! # Indexer Rows
//!
//! Rows of the replicated indexer database. They are written by the external
//! indexer process and only ever read here.
//!
//! Transaction ids and block hashes are stored as lowercase hex without the
//! `0x` prefix; payment references and address roots keep the prefix.

use serde::{Deserialize, Serialize};

/// Block row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbBlock {
    /// Block height.
    pub block_number: u64,
    /// Block hash.
    pub block_hash: String,
    /// Block timestamp (unix seconds).
    pub timestamp: u64,
    /// Set by the indexer once the block is deep enough.
    pub confirmed: bool,
    /// Number of transactions in the block.
    pub transactions: u64,
}

/// Transaction row. `response` holds the raw node JSON for the transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbTransaction {
    /// Transaction id.
    pub transaction_id: String,
    /// Height of the including block.
    pub block_number: u64,
    /// Timestamp of the including block.
    pub timestamp: u64,
    /// Standard payment reference (`0x` + 64 hex) or empty.
    pub payment_reference: String,
    /// Chain-specific transaction type label.
    pub transaction_type: String,
    /// Whether the transaction is a native-currency payment.
    pub is_native_payment: bool,
    /// Merkle root over the source addresses, when computed by the indexer.
    pub source_addresses_root: Option<String>,
    /// Raw node response.
    pub response: String,
}

/// Regular input of a UTXO transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbUtxoInput {
    /// Spending transaction.
    pub transaction_id: String,
    /// Position in the spending transaction's `vin`.
    pub input_index: u32,
    /// Transaction whose output is spent.
    pub previous_transaction_id: String,
    /// Index of the spent output.
    pub previous_output_index: u32,
    /// Input sequence number.
    pub sequence: u64,
    /// `scriptSig` hex.
    pub script_sig_hex: String,
    /// Address of the spent output.
    pub address: Option<String>,
    /// Value of the spent output, as the node reports it.
    pub value: String,
    /// `scriptPubKey` hex of the spent output.
    pub script_pub_key_hex: String,
}

/// Coinbase input of a UTXO transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbUtxoCoinbaseInput {
    /// Coinbase transaction.
    pub transaction_id: String,
    /// Position in `vin`.
    pub input_index: u32,
    /// Coinbase script hex.
    pub coinbase_hex: String,
    /// Input sequence number.
    pub sequence: u64,
}

/// Output of a UTXO transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbUtxoOutput {
    /// Owning transaction.
    pub transaction_id: String,
    /// Output index (`n`).
    pub output_index: u32,
    /// Output value, as the node reports it.
    pub value: String,
    /// Receiving address, absent for non-standard scripts.
    pub address: Option<String>,
    /// `scriptPubKey` hex.
    pub script_pub_key_hex: String,
}

/// Tip synchronization row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipSyncState {
    /// Highest block the indexer has fully processed.
    pub latest_indexed_height: u64,
    /// Height of the chain tip as last seen by the indexer.
    pub latest_tip_height: u64,
    /// Timestamp of the latest indexed block.
    pub timestamp: u64,
}

impl TipSyncState {
    /// Whether a row at `height` is indexed and buried under `confirmations`
    /// blocks.
    pub fn confirms(&self, height: u64, confirmations: u64) -> bool {
        height <= self.latest_indexed_height
            && height.saturating_add(confirmations) <= self.latest_tip_height
    }

    /// Whether the indexer is within `confirmations` blocks of the tip.
    pub fn is_synced(&self, confirmations: u64) -> bool {
        self.latest_indexed_height.saturating_add(confirmations) >= self.latest_tip_height
    }
}

/// Prune synchronization row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PruneSyncState {
    /// Lowest block still retained.
    pub bottom_block_number: u64,
}
