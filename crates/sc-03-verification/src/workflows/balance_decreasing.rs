//! `BalanceDecreasingTransaction`: a confirmed transaction decreased the
//! balance of the indicated address (or left it unchanged while carrying a
//! reference).

use super::{parse_transaction, rejected, safe_index, transaction_gate, VerifiedBody, WorkflowResult};
use crate::domain::{
    BalanceDecreasingTransactionRequestBody, BalanceDecreasingTransactionResponseBody,
    Verification, VerificationStatus,
};
use crate::ports::{SummaryStatus, TransactionParser};
use sc_01_attestation_codec::Integer;
use sc_02_indexed_query::IndexedQueryManager;
use shared_types::ChainFamily;
use tracing::debug;

/// Verify a balance-decreasing claim.
///
/// On UTXO chains the indicator is an input index encoded as a 32-byte
/// word; on account chains it is the address hash itself.
pub async fn verify_balance_decreasing_transaction(
    indexer: &dyn IndexedQueryManager,
    parser: &dyn TransactionParser,
    request: &BalanceDecreasingTransactionRequestBody,
) -> WorkflowResult<BalanceDecreasingTransactionResponseBody> {
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

    if indexer.chain_type().family() == ChainFamily::Utxo
        && Integer::parse(&request.source_address_indicator)
            .as_ref()
            .and_then(safe_index)
            .is_none()
    {
        debug!(
            "[sc-03] Source address indicator {} is not an input index",
            request.source_address_indicator
        );
        return rejected(VerificationStatus::NotConfirmed);
    }

    let summary = parsed.balance_decreasing_summary(&request.source_address_indicator);
    if summary.status != SummaryStatus::Success {
        debug!(
            "[sc-03] Balance decreasing summary of {} rejected: {:?}",
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
        response_body: BalanceDecreasingTransactionResponseBody {
            block_number: transaction.block_number,
            block_timestamp,
            source_address_hash: summary.source_address_hash,
            spent_amount: summary.spent_amount,
            standard_payment_reference: summary.payment_reference,
        },
    })
}
