//! `ConfirmedBlockHeightExists`: a block exists at the given height with the
//! required confirmations, together with a window anchor from which block
//! production rate can be bounded.

use super::{block_gate, rejected, VerifiedBody, WorkflowResult};
use crate::domain::{
    ConfirmedBlockHeightExistsRequestBody, ConfirmedBlockHeightExistsResponseBody, Verification,
    VerificationStatus,
};
use sc_02_indexed_query::IndexedQueryManager;
use tracing::{debug, warn};

/// Verify a confirmed block height claim.
pub async fn verify_confirmed_block_height_exists(
    indexer: &dyn IndexedQueryManager,
    request: &ConfirmedBlockHeightExistsRequestBody,
) -> WorkflowResult<ConfirmedBlockHeightExistsResponseBody> {
    // Read once so the response reports the depth the lookup used.
    let number_of_confirmations = indexer.number_of_confirmations();

    let confirmed = indexer.get_confirmed_block(request.block_number).await;
    let gate = block_gate(confirmed.status);
    if gate != VerificationStatus::NeedsMoreChecks {
        return rejected(gate);
    }
    let Some(block) = confirmed.block else {
        return rejected(VerificationStatus::SystemFailure);
    };

    let window_start = block.timestamp.saturating_sub(request.query_window);
    let lower = match indexer
        .get_last_confirmed_block_strictly_before_time(window_start)
        .await
    {
        Ok(Some(lower)) => lower,
        Ok(None) => {
            debug!(
                "[sc-03] No confirmed block before {} for window of block {}",
                window_start, request.block_number
            );
            return rejected(VerificationStatus::DataAvailabilityIssue);
        }
        Err(e) => {
            warn!("[sc-03] Query window lookup failed: {}", e);
            return rejected(VerificationStatus::DataAvailabilityIssue);
        }
    };

    Verification::ok(VerifiedBody {
        lowest_used_timestamp: block.timestamp,
        response_body: ConfirmedBlockHeightExistsResponseBody {
            block_timestamp: block.timestamp,
            number_of_confirmations,
            lowest_query_window_block_number: lower.block_number,
            lowest_query_window_block_timestamp: lower.timestamp,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::fixtures;

    fn request(block_number: u64, query_window: u64) -> ConfirmedBlockHeightExistsRequestBody {
        ConfirmedBlockHeightExistsRequestBody {
            block_number,
            query_window,
        }
    }

    #[tokio::test]
    async fn test_block_with_window() {
        let store = fixtures::store(120, 123);
        let result =
            verify_confirmed_block_height_exists(&fixtures::manager(&store), &request(110, 1))
                .await;
        assert_eq!(result.status, VerificationStatus::Ok);
        let verified = result.response.unwrap();
        assert_eq!(verified.lowest_used_timestamp, 1100);
        assert_eq!(
            verified.response_body,
            ConfirmedBlockHeightExistsResponseBody {
                block_timestamp: 1100,
                number_of_confirmations: fixtures::CONFIRMATIONS,
                // Highest confirmed block strictly before 1099.
                lowest_query_window_block_number: 109,
                lowest_query_window_block_timestamp: 1090,
            }
        );
    }

    #[tokio::test]
    async fn test_wider_window() {
        let store = fixtures::store(120, 123);
        let result =
            verify_confirmed_block_height_exists(&fixtures::manager(&store), &request(110, 50))
                .await;
        let body = result.response.unwrap().response_body;
        // Strictly before 1050.
        assert_eq!(body.lowest_query_window_block_number, 104);
    }

    #[tokio::test]
    async fn test_unburied_block_does_not_exist_yet() {
        let store = fixtures::store(120, 123);
        let result =
            verify_confirmed_block_height_exists(&fixtures::manager(&store), &request(121, 1))
                .await;
        assert_eq!(result.status, VerificationStatus::NonExistentBlock);
        assert!(result.response.is_none());
    }

    #[tokio::test]
    async fn test_window_before_history_is_unavailable() {
        let store = fixtures::store(120, 123);
        let result =
            verify_confirmed_block_height_exists(&fixtures::manager(&store), &request(100, 5))
                .await;
        assert_eq!(result.status, VerificationStatus::DataAvailabilityIssue);
    }

    #[tokio::test]
    async fn test_unavailable_store() {
        let store = fixtures::store(120, 123);
        store.set_unavailable(true);
        let result =
            verify_confirmed_block_height_exists(&fixtures::manager(&store), &request(110, 1))
                .await;
        assert_eq!(result.status, VerificationStatus::DataAvailabilityIssue);
    }
}
