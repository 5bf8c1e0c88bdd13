//! # Boundary Flows
//!
//! Message integrity codes, ABI-encoded request/response round trips and
//! request index guards, exercised across the codec and the verifiers.

use super::fixtures::{
    block_timestamp, definitions, merchant_payment, node, reference, request, synced_store,
    CONFIRMATIONS,
};
use sc_01_attestation_codec::{AttestationRequest, MIC_SALT};
use sc_02_indexed_query::{query_manager_for, Confirmations, InMemoryIndexerStore};
use sc_03_verification::ports::{
    AddressAmount, BalanceDecreasingSummary, PaymentNonexistenceSummary, PaymentSummary,
    SummaryResult, TransactionSuccessStatus,
};
use sc_03_verification::{
    AttestationType, AttestationVerifier, ChainTransaction, JsonTransactionParser, ParseError,
    TransactionParser, VerificationResponseStatus, VerificationStatus, VerifierService,
};
use serde_json::json;
use shared_types::{ChainFamily, ChainType, MAX_SAFE_INTEGER};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Parser that counts summary calls made on the transactions it hands out.
struct CountingParser {
    inner: JsonTransactionParser,
    summaries: Arc<AtomicUsize>,
}

struct CountingTransaction {
    inner: Box<dyn ChainTransaction>,
    summaries: Arc<AtomicUsize>,
}

impl TransactionParser for CountingParser {
    fn parse(&self, raw_response: &str) -> Result<Box<dyn ChainTransaction>, ParseError> {
        Ok(Box::new(CountingTransaction {
            inner: self.inner.parse(raw_response)?,
            summaries: self.summaries.clone(),
        }))
    }
}

impl ChainTransaction for CountingTransaction {
    fn unix_timestamp(&self) -> u64 {
        self.inner.unix_timestamp()
    }

    fn success_status(&self) -> TransactionSuccessStatus {
        self.inner.success_status()
    }

    fn intended_received_amounts(&self) -> Vec<AddressAmount> {
        self.inner.intended_received_amounts()
    }

    fn payment_summary(&self, in_utxo: u64, out_utxo: u64) -> SummaryResult<PaymentSummary> {
        self.summaries.fetch_add(1, Ordering::SeqCst);
        self.inner.payment_summary(in_utxo, out_utxo)
    }

    fn balance_decreasing_summary(
        &self,
        source_address_indicator: &str,
    ) -> SummaryResult<BalanceDecreasingSummary> {
        self.summaries.fetch_add(1, Ordering::SeqCst);
        self.inner.balance_decreasing_summary(source_address_indicator)
    }

    fn payment_nonexistence_summary(
        &self,
        out_utxo: u64,
    ) -> SummaryResult<PaymentNonexistenceSummary> {
        self.summaries.fetch_add(1, Ordering::SeqCst);
        self.inner.payment_nonexistence_summary(out_utxo)
    }
}

fn counting_service(
    attestation_type: AttestationType,
    store: &Arc<InMemoryIndexerStore>,
) -> (VerifierService, Arc<AtomicUsize>) {
    let summaries = Arc::new(AtomicUsize::new(0));
    let parser = CountingParser {
        inner: JsonTransactionParser::new(ChainFamily::Utxo),
        summaries: summaries.clone(),
    };
    let service = VerifierService::new(
        attestation_type,
        definitions(),
        query_manager_for(store.clone(), ChainType::Btc, Confirmations::new(CONFIRMATIONS)),
        Arc::new(parser),
    )
    .unwrap();
    (service, summaries)
}

fn payment(id: &str, in_utxo: &str, utxo: &str) -> AttestationRequest {
    request(
        "Payment",
        json!({ "transactionId": format!("0x{}", id), "inUtxo": in_utxo, "utxo": utxo }),
    )
}

#[tokio::test]
async fn test_out_of_range_indices_never_reach_summary() {
    let store = synced_store();
    let id = merchant_payment(&store, 5, 3_490_150);
    let (service, summaries) = counting_service(AttestationType::Payment, &store);

    let too_large = (MAX_SAFE_INTEGER + 1).to_string();
    let rejected = [
        payment(&id, "-1", "0"),
        payment(&id, "0", "-1"),
        payment(&id, &too_large, "0"),
        payment(&id, "0", &too_large),
    ];
    for request in &rejected {
        let verification = service.verify_request(request).await.unwrap();
        assert_eq!(verification.status, VerificationStatus::NotConfirmed);
        assert_eq!(
            verification.response_status(),
            VerificationResponseStatus::Invalid
        );
    }
    assert_eq!(summaries.load(Ordering::SeqCst), 0);

    let accepted = service.verify_request(&payment(&id, "0", "0")).await.unwrap();
    assert_eq!(accepted.status, VerificationStatus::Ok);
    assert_eq!(summaries.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_balance_indicator_range_checked_before_summary() {
    let store = synced_store();
    let id = merchant_payment(&store, 6, 3_490_150);
    let (service, summaries) =
        counting_service(AttestationType::BalanceDecreasingTransaction, &store);

    // -1 as a two's complement word.
    let request = request(
        "BalanceDecreasingTransaction",
        json!({
            "transactionId": format!("0x{}", id),
            "sourceAddressIndicator": format!("0x{}", "f".repeat(64)),
        }),
    );
    let verification = service.verify_request(&request).await.unwrap();
    assert_eq!(verification.status, VerificationStatus::NotConfirmed);
    assert_eq!(summaries.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_mic_and_fdc_round_trip() {
    let store = synced_store();
    let id = merchant_payment(&store, 8, 3_490_150);
    let verifiers = node(&store);
    let service = verifiers.get(AttestationType::Payment).unwrap();
    let request = payment(&id, "0", "0");

    let mic = service.mic(&request).await.unwrap();
    assert_eq!(mic.status, VerificationResponseStatus::Valid);
    let response = service.verify(&request).await.unwrap().response.unwrap();
    let definitions = definitions();
    assert_eq!(
        mic.message_integrity_code,
        Some(
            definitions
                .attestation_response_hash(&response, Some(MIC_SALT))
                .unwrap()
        )
    );
    // The salt is what makes it a MIC rather than the plain response hash.
    assert_ne!(
        mic.message_integrity_code,
        Some(definitions.attestation_response_hash(&response, None).unwrap())
    );

    let prepared = service.prepare_request(&request).await.unwrap();
    let encoded = prepared.abi_encoded_request.unwrap();
    let parsed = definitions.parse_request(&encoded).unwrap();
    assert_eq!(parsed.message_integrity_code, mic.message_integrity_code);
    assert!(definitions.equals_request(&parsed, &request).unwrap());

    let fdc = service.verify_fdc(&encoded).await.unwrap();
    assert_eq!(fdc.status, VerificationResponseStatus::Valid);
    assert_eq!(
        fdc.abi_encoded_response,
        Some(definitions.encode_response(&response).unwrap())
    );
}

#[tokio::test]
async fn test_nonexistence_response_encodes() {
    let verifiers = node(&synced_store());
    let service = verifiers
        .get(AttestationType::ReferencedPaymentNonexistence)
        .unwrap();
    let request = request(
        "ReferencedPaymentNonexistence",
        json!({
            "minimalBlockNumber": "3490145",
            "deadlineBlockNumber": "3490150",
            "deadlineTimestamp": block_timestamp(3_490_150).to_string(),
            "destinationAddressHash": shared_types::standard_address_hash("bc1qmerchant"),
            "amount": "1",
            "standardPaymentReference": reference(9),
            "checkSourceAddresses": false,
            "sourceAddressesRoot": shared_types::ZERO_BYTES_32,
        }),
    );

    let prepared = service.prepare_request(&request).await.unwrap();
    assert_eq!(prepared.status, VerificationResponseStatus::Valid);
    let fdc = service
        .verify_fdc(&prepared.abi_encoded_request.unwrap())
        .await
        .unwrap();
    assert_eq!(fdc.status, VerificationResponseStatus::Valid);
    assert!(fdc.abi_encoded_response.is_some());
}
