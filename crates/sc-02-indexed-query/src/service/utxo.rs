//! UTXO-style chains (BTC, DOGE): transactions carry their input and output
//! sub-rows, from which the raw `vin`/`vout` view is rebuilt.

use super::base::ManagerCore;
use crate::domain::{
    BlockQueryParams, Confirmations, DbTransaction, IndexedBlockResult, IndexedTransactionResult,
    IndexerError, PruneSyncState, TipSyncState, TransactionQueryParams, TransactionQueryResult,
    UtxoTransactionRows,
};
use crate::ports::{IndexedQueryManager, UtxoIndexerStore};
use async_trait::async_trait;
use shared_types::ChainType;
use std::sync::Arc;
use tracing::debug;

/// Query manager for UTXO-style chains.
pub struct UtxoIndexedQueryManager<S> {
    core: ManagerCore<S>,
}

impl<S: UtxoIndexerStore> UtxoIndexedQueryManager<S> {
    /// Create a manager over `store`.
    pub fn new(store: Arc<S>, chain: ChainType, confirmations: Confirmations) -> Self {
        Self {
            core: ManagerCore::new(store, chain, confirmations),
        }
    }

    async fn with_sub_rows(
        &self,
        row: DbTransaction,
    ) -> Result<IndexedTransactionResult, IndexerError> {
        let store = &self.core.store;
        let coinbase_inputs = store.utxo_coinbase_inputs(&row.transaction_id).await?;
        // Coinbase inputs and regular inputs are mutually exclusive.
        let inputs = if coinbase_inputs.is_empty() {
            store.utxo_inputs(&row.transaction_id).await?
        } else {
            Vec::new()
        };
        let outputs = store.utxo_outputs(&row.transaction_id).await?;
        let rows = UtxoTransactionRows {
            inputs,
            coinbase_inputs,
            outputs,
        };
        Ok(IndexedTransactionResult::with_utxo_rows(row, Some(rows)))
    }
}

#[async_trait]
impl<S: UtxoIndexerStore> IndexedQueryManager for UtxoIndexedQueryManager<S> {
    fn chain_type(&self) -> ChainType {
        self.core.chain
    }

    fn number_of_confirmations(&self) -> u64 {
        self.core.confirmations.get()
    }

    async fn tip_state(&self) -> Result<Option<TipSyncState>, IndexerError> {
        self.core.tip_state().await
    }

    async fn prune_state(&self) -> Result<Option<PruneSyncState>, IndexerError> {
        self.core.prune_state().await
    }

    async fn query_block(
        &self,
        params: &BlockQueryParams,
    ) -> Result<Option<IndexedBlockResult>, IndexerError> {
        self.core.query_block(params).await
    }

    async fn query_transactions(
        &self,
        params: &TransactionQueryParams,
    ) -> Result<TransactionQueryResult, IndexerError> {
        let rows = self.core.store.transactions(params).await?;
        debug!(
            "[sc-02] {} transaction query matched {} rows",
            self.core.chain,
            rows.len()
        );
        let mut transactions = Vec::with_capacity(rows.len());
        for row in rows {
            transactions.push(self.with_sub_rows(row).await?);
        }
        let (start_block, end_block) = self.core.boundary_blocks(params).await?;
        Ok(TransactionQueryResult {
            transactions,
            start_block,
            end_block,
        })
    }

    async fn get_last_confirmed_block_strictly_before_time(
        &self,
        timestamp: u64,
    ) -> Result<Option<IndexedBlockResult>, IndexerError> {
        self.core
            .last_confirmed_block_strictly_before_time(timestamp)
            .await
    }

    async fn get_first_confirmed_overflow_block(
        &self,
        timestamp: u64,
        block_number: u64,
    ) -> Result<Option<IndexedBlockResult>, IndexerError> {
        self.core
            .first_confirmed_overflow_block(timestamp, block_number)
            .await
    }
}
