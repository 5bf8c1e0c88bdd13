//! `Payment`: a confirmed transaction moved funds from input `inUtxo`'s
//! address to output `utxo`'s address.

use super::{parse_transaction, rejected, safe_index, transaction_gate, VerifiedBody, WorkflowResult};
use crate::domain::{PaymentRequestBody, PaymentResponseBody, Verification, VerificationStatus};
use crate::ports::{SummaryStatus, TransactionParser};
use sc_02_indexed_query::IndexedQueryManager;
use tracing::debug;

/// Verify a payment claim.
pub async fn verify_payment(
    indexer: &dyn IndexedQueryManager,
    parser: &dyn TransactionParser,
    request: &PaymentRequestBody,
) -> WorkflowResult<PaymentResponseBody> {
    let confirmed = indexer
        .get_confirmed_transaction(&request.transaction_id)
        .await;
    let gate = transaction_gate(confirmed.status);
    if gate != VerificationStatus::NeedsMoreChecks {
        return rejected(gate);
    }
    let Some(transaction) = confirmed.transaction else {
        return rejected(VerificationStatus::SystemFailure);
    };

    let parsed = match parse_transaction(parser, &transaction) {
        Ok(parsed) => parsed,
        Err(status) => return rejected(status),
    };

    let (Some(in_utxo), Some(utxo)) = (safe_index(&request.in_utxo), safe_index(&request.utxo))
    else {
        debug!(
            "[sc-03] Payment indices out of range: inUtxo={} utxo={}",
            request.in_utxo, request.utxo
        );
        return rejected(VerificationStatus::NotConfirmed);
    };

    let summary = parsed.payment_summary(in_utxo, utxo);
    if summary.status != SummaryStatus::Success {
        debug!(
            "[sc-03] Payment summary of {} rejected: {:?}",
            transaction.transaction_id, summary.status
        );
        return rejected(VerificationStatus::NotConfirmed);
    }
    let Some(summary) = summary.response else {
        return rejected(VerificationStatus::PaymentSummaryError);
    };

    let block_timestamp = parsed.unix_timestamp();
    Verification::ok(VerifiedBody {
        lowest_used_timestamp: block_timestamp,
        response_body: PaymentResponseBody {
            block_number: transaction.block_number,
            block_timestamp,
            source_address_hash: summary.source_address_hash,
            source_addresses_root: summary.source_addresses_root,
            receiving_address_hash: summary.receiving_address_hash,
            intended_receiving_address_hash: summary.intended_receiving_address_hash,
            spent_amount: summary.spent_amount,
            intended_spent_amount: summary.intended_spent_amount,
            received_amount: summary.received_amount,
            intended_received_amount: summary.intended_received_amount,
            standard_payment_reference: summary.payment_reference,
            one_to_one: summary.one_to_one,
            status: summary.transaction_status.code(),
        },
    })
}
