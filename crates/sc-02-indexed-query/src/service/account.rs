//! Account-style chains (XRP): one row per transaction, raw response as stored.

use super::base::ManagerCore;
use crate::domain::{
    BlockQueryParams, Confirmations, IndexedBlockResult, IndexedTransactionResult, IndexerError,
    PruneSyncState, TipSyncState, TransactionQueryParams, TransactionQueryResult,
};
use crate::ports::{IndexedQueryManager, IndexerStore};
use async_trait::async_trait;
use shared_types::ChainType;
use std::sync::Arc;
use tracing::debug;

/// Query manager for account-style chains.
pub struct AccountIndexedQueryManager<S> {
    core: ManagerCore<S>,
}

impl<S: IndexerStore> AccountIndexedQueryManager<S> {
    /// Create a manager over `store`.
    pub fn new(store: Arc<S>, chain: ChainType, confirmations: Confirmations) -> Self {
        Self {
            core: ManagerCore::new(store, chain, confirmations),
        }
    }
}

#[async_trait]
impl<S: IndexerStore> IndexedQueryManager for AccountIndexedQueryManager<S> {
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
        let transactions = rows
            .into_iter()
            .map(IndexedTransactionResult::from_row)
            .collect();
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
