//! # Synchronization Contract
//!
//! Confirmed lookups layered over the primitive queries. A row at height `h`
//! counts as confirmed only when `h <= latestIndexedHeight` and
//! `h + confirmations <= latestTipHeight`. When the indexer cannot vouch for
//! either presence or absence the caller gets a failure status, never a false
//! negative.
//!
//! Store errors are reported as `SystemFailure`.

use crate::domain::{
    BlockQueryParams, ConfirmedBlockQueryResponse, ConfirmedQueryStatus,
    ConfirmedTransactionQueryResponse, IndexerError, ReferencedQueryStatus,
    ReferencedTransactionsQueryParams, ReferencedTransactionsQueryResponse,
    TransactionQueryParams,
};
use crate::ports::IndexedQueryManager;
use tracing::{debug, warn};

pub(crate) async fn confirmed_transaction<M>(
    manager: &M,
    transaction_id: &str,
) -> ConfirmedTransactionQueryResponse
where
    M: IndexedQueryManager + ?Sized,
{
    match try_confirmed_transaction(manager, transaction_id).await {
        Ok(response) => response,
        Err(e) => {
            warn!(
                "[sc-02] Confirmed transaction query for {} failed: {}",
                transaction_id, e
            );
            ConfirmedTransactionQueryResponse::status(ConfirmedQueryStatus::SystemFailure)
        }
    }
}

async fn try_confirmed_transaction<M>(
    manager: &M,
    transaction_id: &str,
) -> Result<ConfirmedTransactionQueryResponse, IndexerError>
where
    M: IndexedQueryManager + ?Sized,
{
    let confirmations = manager.number_of_confirmations();
    let Some(tip) = manager.tip_state().await? else {
        warn!("[sc-02] {} indexer has no tip state", manager.chain_type());
        return Ok(ConfirmedTransactionQueryResponse::status(
            ConfirmedQueryStatus::SystemFailure,
        ));
    };

    let result = manager
        .query_transactions(&TransactionQueryParams::by_id(transaction_id))
        .await?;

    let response = match result.transactions.into_iter().next() {
        Some(transaction) if tip.confirms(transaction.block_number, confirmations) => {
            ConfirmedTransactionQueryResponse {
                status: ConfirmedQueryStatus::Ok,
                transaction: Some(transaction),
            }
        }
        Some(transaction) => {
            debug!(
                "[sc-02] Transaction {} at height {} lacks {} confirmations (tip {})",
                transaction_id, transaction.block_number, confirmations, tip.latest_tip_height
            );
            ConfirmedTransactionQueryResponse::status(ConfirmedQueryStatus::SystemFailure)
        }
        None if tip.is_synced(confirmations) => {
            ConfirmedTransactionQueryResponse::status(ConfirmedQueryStatus::NotExist)
        }
        None => {
            debug!(
                "[sc-02] Transaction {} not found; indexer at {} behind tip {}",
                transaction_id, tip.latest_indexed_height, tip.latest_tip_height
            );
            ConfirmedTransactionQueryResponse::status(ConfirmedQueryStatus::SystemFailure)
        }
    };
    Ok(response)
}

pub(crate) async fn confirmed_block<M>(manager: &M, block_number: u64) -> ConfirmedBlockQueryResponse
where
    M: IndexedQueryManager + ?Sized,
{
    match try_confirmed_block(manager, block_number).await {
        Ok(response) => response,
        Err(e) => {
            warn!(
                "[sc-02] Confirmed block query for {} failed: {}",
                block_number, e
            );
            ConfirmedBlockQueryResponse::status(ConfirmedQueryStatus::SystemFailure)
        }
    }
}

async fn try_confirmed_block<M>(
    manager: &M,
    block_number: u64,
) -> Result<ConfirmedBlockQueryResponse, IndexerError>
where
    M: IndexedQueryManager + ?Sized,
{
    let failure = ConfirmedBlockQueryResponse::status(ConfirmedQueryStatus::SystemFailure);
    let confirmations = manager.number_of_confirmations();
    let Some(tip) = manager.tip_state().await? else {
        warn!("[sc-02] {} indexer has no tip state", manager.chain_type());
        return Ok(failure);
    };

    let bottom = manager.get_bottom_block_number().await?;
    if block_number < bottom {
        debug!(
            "[sc-02] Block {} pruned (bottom {})",
            block_number, bottom
        );
        return Ok(failure);
    }
    if block_number.saturating_add(confirmations) > tip.latest_tip_height {
        return Ok(ConfirmedBlockQueryResponse::status(
            ConfirmedQueryStatus::NotExist,
        ));
    }
    if block_number > tip.latest_indexed_height {
        debug!(
            "[sc-02] Block {} not yet indexed (indexed {})",
            block_number, tip.latest_indexed_height
        );
        return Ok(failure);
    }

    let block = manager
        .query_block(&BlockQueryParams::by_number(block_number).confirmed(true))
        .await?;
    Ok(match block {
        Some(block) => ConfirmedBlockQueryResponse {
            status: ConfirmedQueryStatus::Ok,
            block: Some(block),
        },
        None => failure,
    })
}

pub(crate) async fn referenced_transactions<M>(
    manager: &M,
    params: &ReferencedTransactionsQueryParams,
) -> ReferencedTransactionsQueryResponse
where
    M: IndexedQueryManager + ?Sized,
{
    match try_referenced_transactions(manager, params).await {
        Ok(response) => response,
        Err(e) => {
            warn!(
                "[sc-02] Referenced transactions query for {} failed: {}",
                params.payment_reference, e
            );
            ReferencedTransactionsQueryResponse::status(ReferencedQueryStatus::SystemFailure)
        }
    }
}

async fn try_referenced_transactions<M>(
    manager: &M,
    params: &ReferencedTransactionsQueryParams,
) -> Result<ReferencedTransactionsQueryResponse, IndexerError>
where
    M: IndexedQueryManager + ?Sized,
{
    let confirmations = manager.number_of_confirmations();
    let Some(tip) = manager.tip_state().await? else {
        warn!("[sc-02] {} indexer has no tip state", manager.chain_type());
        return Ok(ReferencedTransactionsQueryResponse::status(
            ReferencedQueryStatus::SystemFailure,
        ));
    };

    let bottom = manager.get_bottom_block_number().await?;
    if params.minimal_block_number < bottom {
        debug!(
            "[sc-02] Minimal block {} pruned (bottom {})",
            params.minimal_block_number, bottom
        );
        return Ok(ReferencedTransactionsQueryResponse::status(
            ReferencedQueryStatus::NoBoundary,
        ));
    }

    let overflow = manager
        .get_first_confirmed_overflow_block(params.deadline_timestamp, params.deadline_block_number)
        .await?;
    let first_overflow_block = match overflow {
        Some(block) if tip.confirms(block.block_number, confirmations) => block,
        _ => {
            debug!(
                "[sc-02] No confirmed overflow block past height {} / time {}",
                params.deadline_block_number, params.deadline_timestamp
            );
            return Ok(ReferencedTransactionsQueryResponse::status(
                ReferencedQueryStatus::NoOverflowBlock,
            ));
        }
    };

    let Some(minimal_block) = manager
        .query_block(&BlockQueryParams::by_number(params.minimal_block_number).confirmed(true))
        .await?
    else {
        return Ok(ReferencedTransactionsQueryResponse::status(
            ReferencedQueryStatus::NoBoundary,
        ));
    };

    let transactions = if params.minimal_block_number < first_overflow_block.block_number {
        manager
            .query_transactions(&TransactionQueryParams {
                start_block_number: Some(params.minimal_block_number),
                end_block_number: Some(first_overflow_block.block_number - 1),
                payment_reference: Some(params.payment_reference.clone()),
                source_addresses_root: params.source_addresses_root.clone(),
                ..Default::default()
            })
            .await?
            .transactions
    } else {
        Vec::new()
    };
    debug!(
        "[sc-02] Window [{}, {}) holds {} transactions with reference {}",
        params.minimal_block_number,
        first_overflow_block.block_number,
        transactions.len(),
        params.payment_reference
    );

    Ok(ReferencedTransactionsQueryResponse {
        status: ReferencedQueryStatus::Ok,
        transactions,
        minimal_block: Some(minimal_block),
        first_overflow_block: Some(first_overflow_block),
    })
}
