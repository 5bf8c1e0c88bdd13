//! # Verification Status
//!
//! Internal verdict reasons and their mapping onto the three response classes
//! clients see. The mapping is a single exhaustive `match`; a new reason does
//! not compile until it is classified.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Response class returned to clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationResponseStatus {
    /// The claim holds.
    Valid,
    /// The claim is false. Final.
    Invalid,
    /// Cannot decide now; retry against a more caught-up indexer.
    Indeterminate,
}

impl VerificationResponseStatus {
    /// Wire name (`"VALID"`, `"INVALID"`, `"INDETERMINATE"`).
    pub fn as_str(self) -> &'static str {
        match self {
            VerificationResponseStatus::Valid => "VALID",
            VerificationResponseStatus::Invalid => "INVALID",
            VerificationResponseStatus::Indeterminate => "INDETERMINATE",
        }
    }
}

impl fmt::Display for VerificationResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Internal verdict reason.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    /// Verified.
    Ok,

    /// Indexer has not caught up to the height the claim needs.
    DataAvailabilityIssue,
    /// Workflow gate passed; type-specific checks follow. Never surfaced.
    NeedsMoreChecks,
    /// Indexer data is corrupted or unreadable.
    SystemFailure,
    /// Block is not (yet) buried under the required confirmations.
    NonExistentBlock,

    /// Transaction or window is not confirmed, or a summary was rejected.
    NotConfirmed,
    /// Transaction absent from a caught-up indexer.
    NonExistentTransaction,
    /// Transaction is not a payment.
    NotPayment,
    /// A matching payment was found in the window.
    ReferencedTransactionExists,
    /// The all-zero payment reference cannot be searched for.
    ZeroPaymentReferenceUnsupported,
    /// Payment reference is not `0x` + 64 hex digits.
    NotStandardPaymentReference,
    /// Source-addresses root is not `0x` + 64 hex digits.
    NotStandardSourceAddressRoot,
    /// Chain parser reported success without a summary.
    PaymentSummaryError,
}

impl VerificationStatus {
    /// Every reason, for exhaustive checks.
    pub const ALL: [VerificationStatus; 13] = [
        VerificationStatus::Ok,
        VerificationStatus::DataAvailabilityIssue,
        VerificationStatus::NeedsMoreChecks,
        VerificationStatus::SystemFailure,
        VerificationStatus::NonExistentBlock,
        VerificationStatus::NotConfirmed,
        VerificationStatus::NonExistentTransaction,
        VerificationStatus::NotPayment,
        VerificationStatus::ReferencedTransactionExists,
        VerificationStatus::ZeroPaymentReferenceUnsupported,
        VerificationStatus::NotStandardPaymentReference,
        VerificationStatus::NotStandardSourceAddressRoot,
        VerificationStatus::PaymentSummaryError,
    ];

    /// Response class of this reason.
    pub fn response_status(self) -> VerificationResponseStatus {
        use VerificationResponseStatus::*;
        match self {
            VerificationStatus::Ok => Valid,

            VerificationStatus::DataAvailabilityIssue
            | VerificationStatus::NeedsMoreChecks
            | VerificationStatus::SystemFailure
            | VerificationStatus::NonExistentBlock => Indeterminate,

            VerificationStatus::NotConfirmed
            | VerificationStatus::NonExistentTransaction
            | VerificationStatus::NotPayment
            | VerificationStatus::ReferencedTransactionExists
            | VerificationStatus::ZeroPaymentReferenceUnsupported
            | VerificationStatus::NotStandardPaymentReference
            | VerificationStatus::NotStandardSourceAddressRoot
            | VerificationStatus::PaymentSummaryError => Invalid,
        }
    }

    /// Wire name (`"DATA_AVAILABILITY_ISSUE"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            VerificationStatus::Ok => "OK",
            VerificationStatus::DataAvailabilityIssue => "DATA_AVAILABILITY_ISSUE",
            VerificationStatus::NeedsMoreChecks => "NEEDS_MORE_CHECKS",
            VerificationStatus::SystemFailure => "SYSTEM_FAILURE",
            VerificationStatus::NonExistentBlock => "NON_EXISTENT_BLOCK",
            VerificationStatus::NotConfirmed => "NOT_CONFIRMED",
            VerificationStatus::NonExistentTransaction => "NON_EXISTENT_TRANSACTION",
            VerificationStatus::NotPayment => "NOT_PAYMENT",
            VerificationStatus::ReferencedTransactionExists => "REFERENCED_TRANSACTION_EXISTS",
            VerificationStatus::ZeroPaymentReferenceUnsupported => {
                "ZERO_PAYMENT_REFERENCE_UNSUPPORTED"
            }
            VerificationStatus::NotStandardPaymentReference => "NOT_STANDARD_PAYMENT_REFERENCE",
            VerificationStatus::NotStandardSourceAddressRoot => {
                "NOT_STANDARD_SOURCE_ADDRESS_ROOT"
            }
            VerificationStatus::PaymentSummaryError => "PAYMENT_SUMMARY_ERROR",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict plus, when `Ok`, the verified result.
#[derive(Clone, Debug, PartialEq)]
pub struct Verification<R> {
    /// Verdict reason.
    pub status: VerificationStatus,
    /// Result; present iff `status` is `Ok`.
    pub response: Option<R>,
}

impl<R> Verification<R> {
    /// Successful verification.
    pub fn ok(response: R) -> Self {
        Self {
            status: VerificationStatus::Ok,
            response: Some(response),
        }
    }

    /// Verdict without a result.
    pub fn rejected(status: VerificationStatus) -> Self {
        Self {
            status,
            response: None,
        }
    }

    /// Response class of the verdict.
    pub fn response_status(&self) -> VerificationResponseStatus {
        self.status.response_status()
    }

    /// Transform the result, keeping the verdict.
    pub fn map<T>(self, f: impl FnOnce(R) -> T) -> Verification<T> {
        Verification {
            status: self.status,
            response: self.response.map(f),
        }
    }
}
