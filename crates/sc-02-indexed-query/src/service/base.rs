//! Block and sync-state reads shared by both chain families.

use crate::domain::{
    BlockQueryParams, Confirmations, IndexedBlockResult, IndexerError, PruneSyncState,
    TipSyncState, TransactionQueryParams,
};
use crate::ports::IndexerStore;
use shared_types::{unprefix_0x, ChainType};
use std::sync::Arc;
use tracing::debug;

pub(crate) struct ManagerCore<S> {
    pub(crate) store: Arc<S>,
    pub(crate) chain: ChainType,
    pub(crate) confirmations: Confirmations,
}

impl<S: IndexerStore> ManagerCore<S> {
    pub(crate) fn new(store: Arc<S>, chain: ChainType, confirmations: Confirmations) -> Self {
        Self {
            store,
            chain,
            confirmations,
        }
    }

    pub(crate) async fn tip_state(&self) -> Result<Option<TipSyncState>, IndexerError> {
        self.store.tip_state().await
    }

    pub(crate) async fn prune_state(&self) -> Result<Option<PruneSyncState>, IndexerError> {
        self.store.prune_state().await
    }

    pub(crate) async fn query_block(
        &self,
        params: &BlockQueryParams,
    ) -> Result<Option<IndexedBlockResult>, IndexerError> {
        params.validate()?;
        let row = match (params.block_number, params.hash.as_deref()) {
            (Some(number), _) => self.store.block_by_number(number).await?,
            (None, Some(hash)) => self.store.block_by_hash(unprefix_0x(hash)).await?,
            (None, None) => None,
        };
        let block = row
            .filter(|block| params.confirmed.map_or(true, |flag| block.confirmed == flag))
            .map(IndexedBlockResult::from);
        debug!(
            "[sc-02] {} block query {:?} -> {:?}",
            self.chain,
            params,
            block.as_ref().map(|b| b.block_number)
        );
        Ok(block)
    }

    /// Blocks at the height bounds of a transaction filter.
    pub(crate) async fn boundary_blocks(
        &self,
        params: &TransactionQueryParams,
    ) -> Result<(Option<IndexedBlockResult>, Option<IndexedBlockResult>), IndexerError> {
        let start = match params.start_block_number {
            Some(number) => self.query_block(&BlockQueryParams::by_number(number)).await?,
            None => None,
        };
        let end = match params.end_block_number {
            Some(number) => self.query_block(&BlockQueryParams::by_number(number)).await?,
            None => None,
        };
        Ok((start, end))
    }

    pub(crate) async fn last_confirmed_block_strictly_before_time(
        &self,
        timestamp: u64,
    ) -> Result<Option<IndexedBlockResult>, IndexerError> {
        let block = self.store.last_confirmed_block_before(timestamp).await?;
        Ok(block.map(IndexedBlockResult::from))
    }

    pub(crate) async fn first_confirmed_overflow_block(
        &self,
        timestamp: u64,
        block_number: u64,
    ) -> Result<Option<IndexedBlockResult>, IndexerError> {
        let block = self
            .store
            .first_confirmed_block_after(timestamp, block_number)
            .await?;
        Ok(block.map(IndexedBlockResult::from))
    }
}
