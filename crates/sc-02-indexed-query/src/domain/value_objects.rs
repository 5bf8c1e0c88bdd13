//! # Query Parameters and Results
//!
//! Results are fresh read-only projections of indexer rows, owned by the call
//! that produced them.

use super::entities::{DbBlock, DbTransaction, DbUtxoCoinbaseInput, DbUtxoInput, DbUtxoOutput};
use super::errors::IndexerError;
use serde_json::{json, Map, Value};
use shared_types::same_hex;
use std::sync::OnceLock;

// =============================================================================
// BLOCKS
// =============================================================================

/// Block lookup. Exactly one of `block_number` and `hash` must be set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockQueryParams {
    /// Height to look up.
    pub block_number: Option<u64>,
    /// Hash to look up (`0x` prefix optional).
    pub hash: Option<String>,
    /// Restrict to rows with the given `confirmed` flag.
    pub confirmed: Option<bool>,
}

impl BlockQueryParams {
    /// Lookup by height.
    pub fn by_number(block_number: u64) -> Self {
        Self {
            block_number: Some(block_number),
            ..Self::default()
        }
    }

    /// Lookup by hash.
    pub fn by_hash(hash: impl Into<String>) -> Self {
        Self {
            hash: Some(hash.into()),
            ..Self::default()
        }
    }

    /// Add the `confirmed` filter.
    pub fn confirmed(mut self, confirmed: bool) -> Self {
        self.confirmed = Some(confirmed);
        self
    }

    /// Reject lookups that name neither or both keys.
    pub fn validate(&self) -> Result<(), IndexerError> {
        match (&self.block_number, &self.hash) {
            (Some(_), None) | (None, Some(_)) => Ok(()),
            (None, None) => Err(IndexerError::InvalidBlockQuery(
                "one of blockNumber or hash is required".to_string(),
            )),
            (Some(_), Some(_)) => Err(IndexerError::InvalidBlockQuery(
                "blockNumber and hash are mutually exclusive".to_string(),
            )),
        }
    }
}

/// Block projection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedBlockResult {
    /// Block height.
    pub block_number: u64,
    /// Block hash (no `0x` prefix).
    pub block_hash: String,
    /// Block timestamp.
    pub timestamp: u64,
    /// Indexer's confirmed flag.
    pub confirmed: bool,
    /// Number of transactions.
    pub transactions: u64,
}

impl From<DbBlock> for IndexedBlockResult {
    fn from(row: DbBlock) -> Self {
        Self {
            block_number: row.block_number,
            block_hash: row.block_hash,
            timestamp: row.timestamp,
            confirmed: row.confirmed,
            transactions: row.transactions,
        }
    }
}

// =============================================================================
// TRANSACTIONS
// =============================================================================

/// Conjunctive transaction filter; `None` fields do not restrict.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionQueryParams {
    /// Transaction id (`0x` prefix optional).
    pub transaction_id: Option<String>,
    /// Lowest block height, inclusive.
    pub start_block_number: Option<u64>,
    /// Highest block height, inclusive.
    pub end_block_number: Option<u64>,
    /// Standard payment reference.
    pub payment_reference: Option<String>,
    /// Source-addresses Merkle root.
    pub source_addresses_root: Option<String>,
}

impl TransactionQueryParams {
    /// Lookup by id.
    pub fn by_id(transaction_id: impl Into<String>) -> Self {
        Self {
            transaction_id: Some(transaction_id.into()),
            ..Self::default()
        }
    }

    /// Whether a row satisfies every set filter.
    pub fn matches(&self, row: &DbTransaction) -> bool {
        let id_ok = self
            .transaction_id
            .as_deref()
            .map_or(true, |id| same_hex(id, &row.transaction_id));
        let start_ok = self
            .start_block_number
            .map_or(true, |start| row.block_number >= start);
        let end_ok = self
            .end_block_number
            .map_or(true, |end| row.block_number <= end);
        let reference_ok = self
            .payment_reference
            .as_deref()
            .map_or(true, |reference| same_hex(reference, &row.payment_reference));
        let root_ok = self.source_addresses_root.as_deref().map_or(true, |root| {
            row.source_addresses_root
                .as_deref()
                .is_some_and(|row_root| same_hex(root, row_root))
        });
        id_ok && start_ok && end_ok && reference_ok && root_ok
    }
}

/// Input and output rows reconstructed for a UTXO transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UtxoTransactionRows {
    /// Regular inputs.
    pub inputs: Vec<DbUtxoInput>,
    /// Coinbase inputs. When present they replace `inputs` in the `vin` view.
    pub coinbase_inputs: Vec<DbUtxoCoinbaseInput>,
    /// Outputs.
    pub outputs: Vec<DbUtxoOutput>,
}

impl UtxoTransactionRows {
    fn vin(&self) -> Vec<Value> {
        if !self.coinbase_inputs.is_empty() {
            return self
                .coinbase_inputs
                .iter()
                .map(|row| json!({ "coinbase": row.coinbase_hex, "sequence": row.sequence }))
                .collect();
        }
        self.inputs
            .iter()
            .map(|row| {
                json!({
                    "txid": row.previous_transaction_id,
                    "vout": row.previous_output_index,
                    "sequence": row.sequence,
                    "scriptSig": { "hex": row.script_sig_hex },
                    "prevout": {
                        "value": node_amount(&row.value),
                        "scriptPubKey": {
                            "address": row.address,
                            "hex": row.script_pub_key_hex,
                        },
                    },
                })
            })
            .collect()
    }

    fn vout(&self) -> Vec<Value> {
        self.outputs
            .iter()
            .map(|row| {
                json!({
                    "value": node_amount(&row.value),
                    "n": row.output_index,
                    "scriptPubKey": {
                        "address": row.address,
                        "hex": row.script_pub_key_hex,
                    },
                })
            })
            .collect()
    }
}

/// Amounts are stored as text; emit them as JSON numbers when they parse.
fn node_amount(value: &str) -> Value {
    serde_json::from_str::<serde_json::Number>(value)
        .map(Value::Number)
        .unwrap_or_else(|_| Value::String(value.to_string()))
}

/// Transaction projection.
#[derive(Clone, Debug)]
pub struct IndexedTransactionResult {
    /// Transaction id (no `0x` prefix).
    pub transaction_id: String,
    /// Height of the including block.
    pub block_number: u64,
    /// Timestamp of the including block.
    pub timestamp: u64,
    /// Standard payment reference.
    pub payment_reference: String,
    /// Chain-specific transaction type label.
    pub transaction_type: String,
    /// Native-currency payment flag.
    pub is_native_payment: bool,
    /// Source-addresses Merkle root.
    pub source_addresses_root: Option<String>,
    /// Reconstructed sub-rows (UTXO chains only).
    pub utxo: Option<UtxoTransactionRows>,
    stored_response: String,
    response: OnceLock<String>,
}

impl IndexedTransactionResult {
    /// Project an account-style row.
    pub fn from_row(row: DbTransaction) -> Self {
        Self::with_utxo_rows(row, None)
    }

    /// Project a row together with its UTXO sub-rows.
    pub fn with_utxo_rows(row: DbTransaction, utxo: Option<UtxoTransactionRows>) -> Self {
        Self {
            transaction_id: row.transaction_id,
            block_number: row.block_number,
            timestamp: row.timestamp,
            payment_reference: row.payment_reference,
            transaction_type: row.transaction_type,
            is_native_payment: row.is_native_payment,
            source_addresses_root: row.source_addresses_root,
            utxo,
            stored_response: row.response,
            response: OnceLock::new(),
        }
    }

    /// Raw response handed to the chain parser.
    ///
    /// For UTXO transactions the `vin`/`vout` arrays are rebuilt from the
    /// sub-rows on first access. A stored response that is not a JSON object
    /// is returned untouched so the parser reports it.
    pub fn response(&self) -> &str {
        self.response.get_or_init(|| match &self.utxo {
            None => self.stored_response.clone(),
            Some(rows) => match serde_json::from_str::<Map<String, Value>>(&self.stored_response)
            {
                Ok(mut object) => {
                    object.insert("vin".to_string(), Value::Array(rows.vin()));
                    object.insert("vout".to_string(), Value::Array(rows.vout()));
                    Value::Object(object).to_string()
                }
                Err(_) => self.stored_response.clone(),
            },
        })
    }
}

/// Transactions matching a filter, plus the blocks at the filter's bounds.
#[derive(Clone, Debug, Default)]
pub struct TransactionQueryResult {
    /// Matching transactions ordered by block height, then id.
    pub transactions: Vec<IndexedTransactionResult>,
    /// Block at `start_block_number`, when that bound was given.
    pub start_block: Option<IndexedBlockResult>,
    /// Block at `end_block_number`, when that bound was given.
    pub end_block: Option<IndexedBlockResult>,
}

// =============================================================================
// SYNCHRONIZED QUERIES
// =============================================================================

/// Outcome of a confirmed block or transaction lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmedQueryStatus {
    /// Found at the required depth.
    Ok,
    /// Absent and the indexer has caught up far enough to say so.
    NotExist,
    /// Indexer data is missing, lagging or unreachable.
    SystemFailure,
}

/// Confirmed transaction lookup.
#[derive(Clone, Debug)]
pub struct ConfirmedTransactionQueryResponse {
    /// Outcome.
    pub status: ConfirmedQueryStatus,
    /// The transaction when `status` is `Ok`.
    pub transaction: Option<IndexedTransactionResult>,
}

impl ConfirmedTransactionQueryResponse {
    /// Non-`Ok` outcome.
    pub fn status(status: ConfirmedQueryStatus) -> Self {
        Self {
            status,
            transaction: None,
        }
    }
}

/// Confirmed block lookup.
#[derive(Clone, Debug)]
pub struct ConfirmedBlockQueryResponse {
    /// Outcome.
    pub status: ConfirmedQueryStatus,
    /// The block when `status` is `Ok`.
    pub block: Option<IndexedBlockResult>,
}

impl ConfirmedBlockQueryResponse {
    /// Non-`Ok` outcome.
    pub fn status(status: ConfirmedQueryStatus) -> Self {
        Self {
            status,
            block: None,
        }
    }
}

/// Window search for transactions carrying a payment reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferencedTransactionsQueryParams {
    /// Lowest block of the window.
    pub minimal_block_number: u64,
    /// Deadline height.
    pub deadline_block_number: u64,
    /// Deadline timestamp.
    pub deadline_timestamp: u64,
    /// Payment reference to search for.
    pub payment_reference: String,
    /// Optional source-addresses root filter.
    pub source_addresses_root: Option<String>,
}

/// Outcome of a referenced-transactions search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferencedQueryStatus {
    /// Window resolved.
    Ok,
    /// No confirmed block past both deadlines yet.
    NoOverflowBlock,
    /// Minimal block is missing or pruned.
    NoBoundary,
    /// Indexer data is missing or unreachable.
    SystemFailure,
}

/// Referenced-transactions search result.
#[derive(Clone, Debug)]
pub struct ReferencedTransactionsQueryResponse {
    /// Outcome.
    pub status: ReferencedQueryStatus,
    /// Transactions in `[minimalBlockNumber, firstOverflowBlock - 1]`.
    pub transactions: Vec<IndexedTransactionResult>,
    /// Block at `minimalBlockNumber`.
    pub minimal_block: Option<IndexedBlockResult>,
    /// First confirmed block past both deadlines.
    pub first_overflow_block: Option<IndexedBlockResult>,
}

impl ReferencedTransactionsQueryResponse {
    /// Non-`Ok` outcome.
    pub fn status(status: ReferencedQueryStatus) -> Self {
        Self {
            status,
            transactions: Vec::new(),
            minimal_block: None,
            first_overflow_block: None,
        }
    }
}
