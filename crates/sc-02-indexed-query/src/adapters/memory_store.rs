//! In-Memory Indexer Store Adapter
//!
//! Implements `IndexerStore` and `UtxoIndexerStore` over in-process tables.
//! Used by tests and by the node's snapshot self-check.

use crate::domain::{
    DbBlock, DbTransaction, DbUtxoCoinbaseInput, DbUtxoInput, DbUtxoOutput,
    IndexerError, PruneSyncState, TipSyncState, TransactionQueryParams,
};
use crate::ports::{IndexerStore, UtxoIndexerStore};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Deserialize;
use shared_types::{same_hex, unprefix_0x};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Serialized contents of an indexer database.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexerSnapshot {
    /// Block rows.
    pub blocks: Vec<DbBlock>,
    /// Transaction rows.
    pub transactions: Vec<DbTransaction>,
    /// UTXO regular inputs.
    pub utxo_inputs: Vec<DbUtxoInput>,
    /// UTXO coinbase inputs.
    pub utxo_coinbase_inputs: Vec<DbUtxoCoinbaseInput>,
    /// UTXO outputs.
    pub utxo_outputs: Vec<DbUtxoOutput>,
    /// Tip sync row.
    pub tip_state: Option<TipSyncState>,
    /// Prune sync row.
    pub prune_state: Option<PruneSyncState>,
}

/// Indexer tables held in memory.
#[derive(Debug, Default)]
pub struct InMemoryIndexerStore {
    blocks: RwLock<BTreeMap<u64, DbBlock>>,
    transactions: RwLock<Vec<DbTransaction>>,
    inputs: RwLock<HashMap<String, Vec<DbUtxoInput>>>,
    coinbase_inputs: RwLock<HashMap<String, Vec<DbUtxoCoinbaseInput>>>,
    outputs: RwLock<HashMap<String, Vec<DbUtxoOutput>>>,
    tip: RwLock<Option<TipSyncState>>,
    prune: RwLock<Option<PruneSyncState>>,
    unavailable: AtomicBool,
}

fn row_key(id: &str) -> String {
    unprefix_0x(id).to_ascii_lowercase()
}

impl InMemoryIndexerStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate a store from a snapshot.
    pub fn from_snapshot(snapshot: IndexerSnapshot) -> Self {
        let store = Self::new();
        for block in snapshot.blocks {
            store.insert_block(block);
        }
        for transaction in snapshot.transactions {
            store.insert_transaction(transaction);
        }
        for input in snapshot.utxo_inputs {
            store.insert_utxo_input(input);
        }
        for input in snapshot.utxo_coinbase_inputs {
            store.insert_utxo_coinbase_input(input);
        }
        for output in snapshot.utxo_outputs {
            store.insert_utxo_output(output);
        }
        if let Some(tip) = snapshot.tip_state {
            store.set_tip_state(tip);
        }
        if let Some(prune) = snapshot.prune_state {
            store.set_prune_state(prune);
        }
        store
    }

    /// Insert or replace a block row.
    pub fn insert_block(&self, block: DbBlock) {
        self.blocks.write().insert(block.block_number, block);
    }

    /// Insert a transaction row.
    pub fn insert_transaction(&self, transaction: DbTransaction) {
        let mut transactions = self.transactions.write();
        transactions.push(transaction);
        transactions.sort_by(|a, b| {
            a.block_number
                .cmp(&b.block_number)
                .then_with(|| a.transaction_id.cmp(&b.transaction_id))
        });
    }

    /// Insert a UTXO regular input row.
    pub fn insert_utxo_input(&self, input: DbUtxoInput) {
        let mut inputs = self.inputs.write();
        let rows = inputs.entry(row_key(&input.transaction_id)).or_default();
        rows.push(input);
        rows.sort_by_key(|row| row.input_index);
    }

    /// Insert a UTXO coinbase input row.
    pub fn insert_utxo_coinbase_input(&self, input: DbUtxoCoinbaseInput) {
        let mut inputs = self.coinbase_inputs.write();
        let rows = inputs.entry(row_key(&input.transaction_id)).or_default();
        rows.push(input);
        rows.sort_by_key(|row| row.input_index);
    }

    /// Insert a UTXO output row.
    pub fn insert_utxo_output(&self, output: DbUtxoOutput) {
        let mut outputs = self.outputs.write();
        let rows = outputs.entry(row_key(&output.transaction_id)).or_default();
        rows.push(output);
        rows.sort_by_key(|row| row.output_index);
    }

    /// Write the tip sync row.
    pub fn set_tip_state(&self, tip: TipSyncState) {
        *self.tip.write() = Some(tip);
    }

    /// Remove the tip sync row.
    pub fn clear_tip_state(&self) {
        *self.tip.write() = None;
    }

    /// Write the prune sync row.
    pub fn set_prune_state(&self, prune: PruneSyncState) {
        *self.prune.write() = Some(prune);
    }

    /// Make every read fail, simulating a lost connection.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Release);
    }

    fn check_available(&self) -> Result<(), IndexerError> {
        if self.unavailable.load(Ordering::Acquire) {
            return Err(IndexerError::StoreUnavailable(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl IndexerStore for InMemoryIndexerStore {
    async fn tip_state(&self) -> Result<Option<TipSyncState>, IndexerError> {
        self.check_available()?;
        Ok(*self.tip.read())
    }

    async fn prune_state(&self) -> Result<Option<PruneSyncState>, IndexerError> {
        self.check_available()?;
        Ok(*self.prune.read())
    }

    async fn block_by_number(&self, block_number: u64) -> Result<Option<DbBlock>, IndexerError> {
        self.check_available()?;
        Ok(self.blocks.read().get(&block_number).cloned())
    }

    async fn block_by_hash(&self, block_hash: &str) -> Result<Option<DbBlock>, IndexerError> {
        self.check_available()?;
        Ok(self
            .blocks
            .read()
            .values()
            .find(|block| same_hex(&block.block_hash, block_hash))
            .cloned())
    }

    async fn last_confirmed_block_before(
        &self,
        before: u64,
    ) -> Result<Option<DbBlock>, IndexerError> {
        self.check_available()?;
        Ok(self
            .blocks
            .read()
            .values()
            .rev()
            .find(|block| block.confirmed && block.timestamp < before)
            .cloned())
    }

    async fn first_confirmed_block_after(
        &self,
        after_timestamp: u64,
        after_number: u64,
    ) -> Result<Option<DbBlock>, IndexerError> {
        self.check_available()?;
        let blocks = self.blocks.read();
        let found = blocks
            .range(after_number.saturating_add(1)..)
            .map(|(_, block)| block)
            .find(|block| {
                block.confirmed && block.block_number > after_number && block.timestamp > after_timestamp
            })
            .cloned();
        Ok(found)
    }

    async fn transactions(
        &self,
        params: &TransactionQueryParams,
    ) -> Result<Vec<DbTransaction>, IndexerError> {
        self.check_available()?;
        let rows: Vec<DbTransaction> = self
            .transactions
            .read()
            .iter()
            .filter(|row| params.matches(row))
            .cloned()
            .collect();
        debug!("[sc-02] In-memory store matched {} transactions", rows.len());
        Ok(rows)
    }
}

#[async_trait]
impl UtxoIndexerStore for InMemoryIndexerStore {
    async fn utxo_inputs(&self, transaction_id: &str) -> Result<Vec<DbUtxoInput>, IndexerError> {
        self.check_available()?;
        Ok(self
            .inputs
            .read()
            .get(&row_key(transaction_id))
            .cloned()
            .unwrap_or_default())
    }

    async fn utxo_coinbase_inputs(
        &self,
        transaction_id: &str,
    ) -> Result<Vec<DbUtxoCoinbaseInput>, IndexerError> {
        self.check_available()?;
        Ok(self
            .coinbase_inputs
            .read()
            .get(&row_key(transaction_id))
            .cloned()
            .unwrap_or_default())
    }

    async fn utxo_outputs(
        &self,
        transaction_id: &str,
    ) -> Result<Vec<DbUtxoOutput>, IndexerError> {
        self.check_available()?;
        Ok(self
            .outputs
            .read()
            .get(&row_key(transaction_id))
            .cloned()
            .unwrap_or_default())
    }
}
