//! `ReferencedPaymentNonexistence`: no payment carrying the reference
//! delivered at least `amount` to the destination between the minimal block
//! and the deadline.
//!
//! The window closes at the first confirmed block past both the deadline
//! height and the deadline timestamp. Every transaction in
//! `[minimalBlockNumber, firstOverflowBlock)` carrying the reference is
//! scanned; one disproving output ends the search.

use super::{parse_transaction, referenced_gate, rejected, VerifiedBody, WorkflowResult};
use crate::domain::{
    ReferencedPaymentNonexistenceRequestBody, ReferencedPaymentNonexistenceResponseBody,
    Verification, VerificationStatus,
};
use crate::ports::{SummaryStatus, TransactionParser, TransactionSuccessStatus};
use sc_02_indexed_query::{IndexedQueryManager, ReferencedTransactionsQueryParams};
use shared_types::{is_0x_hex_of_len, same_hex, standard_address_hash, MAX_SAFE_INTEGER, ZERO_BYTES_32};
use tracing::debug;

/// Verify a referenced payment nonexistence claim.
pub async fn verify_referenced_payment_nonexistence(
    indexer: &dyn IndexedQueryManager,
    parser: &dyn TransactionParser,
    request: &ReferencedPaymentNonexistenceRequestBody,
) -> WorkflowResult<ReferencedPaymentNonexistenceResponseBody> {
    if let Some(status) = precondition_failure(request) {
        return rejected(status);
    }

    let params = ReferencedTransactionsQueryParams {
        minimal_block_number: request.minimal_block_number,
        deadline_block_number: request.deadline_block_number,
        deadline_timestamp: request.deadline_timestamp,
        payment_reference: request.standard_payment_reference.clone(),
        source_addresses_root: request
            .check_source_addresses
            .then(|| request.source_addresses_root.clone()),
    };
    let referenced = indexer.get_referenced_transactions(&params).await;
    let gate = referenced_gate(referenced.status);
    if gate != VerificationStatus::NeedsMoreChecks {
        return rejected(gate);
    }
    let (Some(minimal_block), Some(first_overflow_block)) =
        (referenced.minimal_block, referenced.first_overflow_block)
    else {
        return rejected(VerificationStatus::SystemFailure);
    };

    if request.minimal_block_number >= first_overflow_block.block_number {
        debug!(
            "[sc-03] Window starting at {} is not closed by overflow block {}",
            request.minimal_block_number, first_overflow_block.block_number
        );
        return rejected(VerificationStatus::NotConfirmed);
    }

    for transaction in &referenced.transactions {
        let parsed = match parse_transaction(parser, transaction) {
            Ok(parsed) => parsed,
            Err(status) => return rejected(status),
        };

        for (out_utxo, output) in parsed.intended_received_amounts().iter().enumerate() {
            let Some(address) = output.address.as_deref() else {
                continue;
            };
            if !same_hex(&standard_address_hash(address), &request.destination_address_hash) {
                continue;
            }

            let summary = parsed.payment_nonexistence_summary(out_utxo as u64);
            let response = match (summary.status, summary.response) {
                (SummaryStatus::Success, Some(response)) => response,
                (status, _) => {
                    debug!(
                        "[sc-03] Output {} of {} skipped: {:?}",
                        out_utxo, transaction.transaction_id, status
                    );
                    continue;
                }
            };

            if response.intended_received_amount >= request.amount
                && parsed.success_status() != TransactionSuccessStatus::SenderFailure
            {
                debug!(
                    "[sc-03] Transaction {} pays {} to the destination",
                    transaction.transaction_id, response.intended_received_amount
                );
                return rejected(VerificationStatus::ReferencedTransactionExists);
            }
            // Outputs to the same destination in one transaction are equivalent.
            break;
        }
    }

    Verification::ok(VerifiedBody {
        lowest_used_timestamp: minimal_block.timestamp,
        response_body: ReferencedPaymentNonexistenceResponseBody {
            minimal_block_timestamp: minimal_block.timestamp,
            first_overflow_block_number: first_overflow_block.block_number,
            first_overflow_block_timestamp: first_overflow_block.timestamp,
        },
    })
}

/// Request-shape checks, in the order they are reported.
fn precondition_failure(
    request: &ReferencedPaymentNonexistenceRequestBody,
) -> Option<VerificationStatus> {
    let reference = &request.standard_payment_reference;
    if same_hex(reference, ZERO_BYTES_32) {
        return Some(VerificationStatus::ZeroPaymentReferenceUnsupported);
    }
    if !is_0x_hex_of_len(reference, 64) {
        return Some(VerificationStatus::NotStandardPaymentReference);
    }
    if request.check_source_addresses && !is_0x_hex_of_len(&request.source_addresses_root, 64) {
        return Some(VerificationStatus::NotStandardSourceAddressRoot);
    }
    if request.minimal_block_number >= MAX_SAFE_INTEGER
        || request.deadline_block_number >= MAX_SAFE_INTEGER
    {
        return Some(VerificationStatus::NotConfirmed);
    }
    None
}
