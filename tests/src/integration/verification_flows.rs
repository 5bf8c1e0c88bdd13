//! # Verification Flows
//!
//! Requests routed through the wired node against a BTC indexer, checking
//! both the coarse verdict and the detailed status behind it.

use super::fixtures::{
    block_timestamp, merchant_payment, node, reference, request, store, synced_store,
    transaction_id, LAST_BLOCK,
};
use sc_01_attestation_codec::AttestationRequest;
use sc_03_verification::{AttestationType, VerificationResponseStatus, VerificationStatus};
use sc_node::Verifiers;
use serde_json::{json, Value};
use shared_types::{standard_address_hash, ZERO_BYTES_32};

const HEIGHT: u64 = 3_490_151;

async fn detailed_status(
    verifiers: &Verifiers,
    request: &AttestationRequest,
) -> VerificationStatus {
    verifiers
        .route(request)
        .unwrap()
        .verify_request(request)
        .await
        .unwrap()
        .status
}

fn block_height_request(block_number: u64) -> AttestationRequest {
    request(
        "ConfirmedBlockHeightExists",
        json!({ "blockNumber": block_number.to_string(), "queryWindow": "1" }),
    )
}

fn nonexistence_request(reference: &str, amount: u64) -> AttestationRequest {
    request(
        "ReferencedPaymentNonexistence",
        json!({
            "minimalBlockNumber": "3490145",
            "deadlineBlockNumber": "3490150",
            "deadlineTimestamp": block_timestamp(3_490_150).to_string(),
            "destinationAddressHash": standard_address_hash("bc1qmerchant"),
            "amount": amount.to_string(),
            "standardPaymentReference": reference,
            "checkSourceAddresses": false,
            "sourceAddressesRoot": ZERO_BYTES_32,
        }),
    )
}

fn payment_request(id: &str) -> AttestationRequest {
    request(
        "Payment",
        json!({ "transactionId": format!("0x{}", id), "inUtxo": "0", "utxo": "0" }),
    )
}

// =============================================================================
// CONFIRMED BLOCK HEIGHT EXISTS
// =============================================================================

#[tokio::test]
async fn test_block_height_with_one_second_window() {
    let verifiers = node(&synced_store());
    let dto = verifiers.verify(&block_height_request(HEIGHT)).await.unwrap();
    assert_eq!(dto.status, VerificationResponseStatus::Valid);

    let response = dto.response.unwrap();
    assert_eq!(response.lowest_used_timestamp, block_timestamp(HEIGHT));
    let body = &response.response_body;
    assert_eq!(body["blockTimestamp"], block_timestamp(HEIGHT).to_string());
    assert_eq!(body["numberOfConfirmations"], "6");
    // Highest confirmed block strictly before `timestamp - 1`.
    assert_eq!(body["lowestQueryWindowBlockNumber"], (HEIGHT - 1).to_string());
    assert_eq!(
        body["lowestQueryWindowBlockTimestamp"],
        block_timestamp(HEIGHT - 1).to_string()
    );
}

#[tokio::test]
async fn test_block_height_needs_full_depth() {
    // Six blocks on top of the requested height are enough.
    let verifiers = node(&store(HEIGHT + 6, HEIGHT + 6));
    let dto = verifiers.verify(&block_height_request(HEIGHT)).await.unwrap();
    assert_eq!(dto.status, VerificationResponseStatus::Valid);

    // Five are not: the block does not exist yet as far as the protocol is concerned.
    let verifiers = node(&store(HEIGHT + 5, HEIGHT + 5));
    let request = block_height_request(HEIGHT);
    assert_eq!(
        verifiers.verify(&request).await.unwrap().status,
        VerificationResponseStatus::Indeterminate
    );
    assert_eq!(
        detailed_status(&verifiers, &request).await,
        VerificationStatus::NonExistentBlock
    );
}

// =============================================================================
// REFERENCED PAYMENT NONEXISTENCE
// =============================================================================

#[tokio::test]
async fn test_zero_reference_is_invalid_regardless_of_indexer() {
    // An indexer far behind the tip would otherwise be indeterminate.
    let verifiers = node(&store(3_490_145, LAST_BLOCK));
    let request = nonexistence_request(ZERO_BYTES_32, 1);

    let dto = verifiers.verify(&request).await.unwrap();
    assert_eq!(dto.status, VerificationResponseStatus::Invalid);
    assert!(dto.response.is_none());
    assert_eq!(
        detailed_status(&verifiers, &request).await,
        VerificationStatus::ZeroPaymentReferenceUnsupported
    );
}

#[tokio::test]
async fn test_referenced_payment_exists() {
    let store = synced_store();
    merchant_payment(&store, 7, 3_490_148);
    let verifiers = node(&store);

    let request = nonexistence_request(&reference(7), 9_000);
    assert_eq!(
        verifiers.verify(&request).await.unwrap().status,
        VerificationResponseStatus::Invalid
    );
    assert_eq!(
        detailed_status(&verifiers, &request).await,
        VerificationStatus::ReferencedTransactionExists
    );

    // The payment was short of the requested amount.
    let dto = verifiers
        .verify(&nonexistence_request(&reference(7), 9_001))
        .await
        .unwrap();
    assert_eq!(dto.status, VerificationResponseStatus::Valid);
}

#[tokio::test]
async fn test_referenced_payment_absent() {
    let verifiers = node(&synced_store());
    let request = nonexistence_request(&reference(7), 9_000);

    let dto = verifiers.verify(&request).await.unwrap();
    assert_eq!(dto.status, VerificationResponseStatus::Valid);
    let response = dto.response.unwrap();
    assert_eq!(response.request_body, request.request_body);
    assert_eq!(response.lowest_used_timestamp, block_timestamp(3_490_145));
    assert_eq!(
        response.response_body,
        json!({
            "minimalBlockTimestamp": block_timestamp(3_490_145).to_string(),
            "firstOverflowBlockNumber": "3490151",
            "firstOverflowBlockTimestamp": block_timestamp(3_490_151).to_string(),
        })
    );
}

#[tokio::test]
async fn test_payment_outside_window_does_not_disprove() {
    let store = synced_store();
    // At the first overflow block, so outside the searched range.
    merchant_payment(&store, 7, 3_490_151);
    let dto = node(&store)
        .verify(&nonexistence_request(&reference(7), 1))
        .await
        .unwrap();
    assert_eq!(dto.status, VerificationResponseStatus::Valid);
}

// =============================================================================
// PAYMENT
// =============================================================================

#[tokio::test]
async fn test_payment_verified() {
    let store = synced_store();
    let id = merchant_payment(&store, 3, 3_490_150);
    let dto = node(&store).verify(&payment_request(&id)).await.unwrap();
    assert_eq!(dto.status, VerificationResponseStatus::Valid);

    let body: Value = dto.response.unwrap().response_body;
    assert_eq!(body["blockNumber"], "3490150");
    assert_eq!(body["sourceAddressHash"], standard_address_hash("bc1qpayer"));
    assert_eq!(body["receivingAddressHash"], standard_address_hash("bc1qmerchant"));
    assert_eq!(body["spentAmount"], "9500");
    assert_eq!(body["receivedAmount"], "9000");
    assert_eq!(body["standardPaymentReference"], reference(3));
    assert_eq!(body["oneToOne"], true);
    assert_eq!(body["status"], "0");
}

#[tokio::test]
async fn test_missing_transaction_depends_on_sync() {
    let id = transaction_id(0xab);

    // Caught up: the transaction provably does not exist.
    let verifiers = node(&synced_store());
    let request = payment_request(&id);
    assert_eq!(
        verifiers.verify(&request).await.unwrap().status,
        VerificationResponseStatus::Invalid
    );
    assert_eq!(
        detailed_status(&verifiers, &request).await,
        VerificationStatus::NonExistentTransaction
    );

    // Lagging: the indexer cannot vouch for its absence.
    let verifiers = node(&store(3_490_150, LAST_BLOCK));
    assert_eq!(
        verifiers.verify(&request).await.unwrap().status,
        VerificationResponseStatus::Indeterminate
    );
    assert_eq!(
        detailed_status(&verifiers, &request).await,
        VerificationStatus::DataAvailabilityIssue
    );
}

// =============================================================================
// BALANCE DECREASING TRANSACTION
// =============================================================================

#[tokio::test]
async fn test_balance_decreasing_through_node() {
    let store = synced_store();
    let id = merchant_payment(&store, 4, 3_490_149);
    let verifiers = node(&store);
    assert!(verifiers.get(AttestationType::BalanceDecreasingTransaction).is_some());

    let dto = verifiers
        .verify(&request(
            "BalanceDecreasingTransaction",
            json!({
                "transactionId": format!("0x{}", id),
                "sourceAddressIndicator": format!("0x{:064x}", 0),
            }),
        ))
        .await
        .unwrap();
    assert_eq!(dto.status, VerificationResponseStatus::Valid);
    let body = dto.response.unwrap().response_body;
    assert_eq!(body["sourceAddressHash"], standard_address_hash("bc1qpayer"));
    assert_eq!(body["spentAmount"], "9500");
    assert_eq!(body["standardPaymentReference"], reference(4));
}
