//! # Attestation Types
//!
//! The four supported attestation types and typed views of their request and
//! response bodies. The views convert to and from the runtime JSON form the
//! definition store encodes; integers travel as decimal strings.

use crate::domain::errors::VerificationError;
use sc_01_attestation_codec::Integer;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use std::fmt;
use std::str::FromStr;

/// Supported attestation types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttestationType {
    /// A payment between two addresses.
    Payment,
    /// A transaction that decreases an address balance.
    BalanceDecreasingTransaction,
    /// A block exists at a given height with enough confirmations.
    ConfirmedBlockHeightExists,
    /// No payment with a reference reached an address before a deadline.
    ReferencedPaymentNonexistence,
}

impl AttestationType {
    /// Every supported type.
    pub const ALL: [AttestationType; 4] = [
        AttestationType::Payment,
        AttestationType::BalanceDecreasingTransaction,
        AttestationType::ConfirmedBlockHeightExists,
        AttestationType::ReferencedPaymentNonexistence,
    ];

    /// Name used for attestation ids and definition files.
    pub fn name(&self) -> &'static str {
        match self {
            AttestationType::Payment => "Payment",
            AttestationType::BalanceDecreasingTransaction => "BalanceDecreasingTransaction",
            AttestationType::ConfirmedBlockHeightExists => "ConfirmedBlockHeightExists",
            AttestationType::ReferencedPaymentNonexistence => "ReferencedPaymentNonexistence",
        }
    }
}

impl fmt::Display for AttestationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AttestationType {
    type Err = VerificationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| VerificationError::UnsupportedAttestationType(name.to_string()))
    }
}

/// Deserialize a runtime body into its typed view.
pub fn typed_body<T: DeserializeOwned>(
    attestation_type: AttestationType,
    body: &Value,
) -> Result<T, VerificationError> {
    serde_json::from_value(body.clone()).map_err(|e| VerificationError::InvalidRequestBody {
        attestation_type: attestation_type.name().to_string(),
        reason: e.to_string(),
    })
}

// =============================================================================
// PAYMENT
// =============================================================================

/// `Payment` request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequestBody {
    /// Transaction id (`0x` + 64 hex).
    pub transaction_id: String,
    /// Input index (UTXO) or 0.
    pub in_utxo: Integer,
    /// Output index (UTXO) or 0.
    pub utxo: Integer,
}

/// `Payment` response body.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponseBody {
    /// Including block height.
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub block_number: u64,
    /// Including block timestamp.
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub block_timestamp: u64,
    /// Standard hash of the paying address.
    pub source_address_hash: String,
    /// Merkle root over all source addresses.
    pub source_addresses_root: String,
    /// Standard hash of the receiving address.
    pub receiving_address_hash: String,
    /// Standard hash of the intended receiving address.
    pub intended_receiving_address_hash: String,
    /// Amount leaving the source address.
    pub spent_amount: Integer,
    /// Amount that would have left the source address on success.
    pub intended_spent_amount: Integer,
    /// Amount reaching the receiving address.
    pub received_amount: Integer,
    /// Amount that would have reached it on success.
    pub intended_received_amount: Integer,
    /// Standard payment reference, or the zero hash.
    pub standard_payment_reference: String,
    /// Only the source pays and only the receiver receives.
    pub one_to_one: bool,
    /// Transaction success status code.
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub status: u8,
}

// =============================================================================
// BALANCE DECREASING TRANSACTION
// =============================================================================

/// `BalanceDecreasingTransaction` request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceDecreasingTransactionRequestBody {
    /// Transaction id.
    pub transaction_id: String,
    /// Input index (UTXO, as a 32-byte word) or address hash (account).
    pub source_address_indicator: String,
}

/// `BalanceDecreasingTransaction` response body.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceDecreasingTransactionResponseBody {
    /// Including block height.
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub block_number: u64,
    /// Including block timestamp.
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub block_timestamp: u64,
    /// Standard hash of the indicated address.
    pub source_address_hash: String,
    /// Net amount leaving the indicated address.
    pub spent_amount: Integer,
    /// Standard payment reference, or the zero hash.
    pub standard_payment_reference: String,
}

// =============================================================================
// CONFIRMED BLOCK HEIGHT EXISTS
// =============================================================================

/// `ConfirmedBlockHeightExists` request body.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedBlockHeightExistsRequestBody {
    /// Height to confirm.
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub block_number: u64,
    /// Seconds before the block used to estimate the production rate.
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub query_window: u64,
}

/// `ConfirmedBlockHeightExists` response body.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedBlockHeightExistsResponseBody {
    /// Timestamp of the requested block.
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub block_timestamp: u64,
    /// Confirmation depth applied.
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub number_of_confirmations: u64,
    /// Last confirmed block strictly before `blockTimestamp - queryWindow`.
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub lowest_query_window_block_number: u64,
    /// Its timestamp.
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub lowest_query_window_block_timestamp: u64,
}

// =============================================================================
// REFERENCED PAYMENT NONEXISTENCE
// =============================================================================

/// `ReferencedPaymentNonexistence` request body.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferencedPaymentNonexistenceRequestBody {
    /// First block of the search window.
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub minimal_block_number: u64,
    /// Deadline height.
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub deadline_block_number: u64,
    /// Deadline timestamp.
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub deadline_timestamp: u64,
    /// Standard hash of the destination address.
    pub destination_address_hash: String,
    /// Minimal amount a disproving payment must carry.
    pub amount: Integer,
    /// Payment reference to search for.
    pub standard_payment_reference: String,
    /// Restrict the search to payments from `source_addresses_root`.
    pub check_source_addresses: bool,
    /// Source-addresses root, used only with `check_source_addresses`.
    pub source_addresses_root: String,
}

/// `ReferencedPaymentNonexistence` response body.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferencedPaymentNonexistenceResponseBody {
    /// Timestamp of the block at `minimalBlockNumber`.
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub minimal_block_timestamp: u64,
    /// First confirmed block past both deadlines.
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub first_overflow_block_number: u64,
    /// Its timestamp.
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub first_overflow_block_timestamp: u64,
}
