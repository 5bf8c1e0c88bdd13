//! # Outbound Ports
//!
//! The chain transaction parser. It turns the raw node JSON stored by the
//! indexer into payment and balance-decreasing summaries. Treated as a pure
//! function of the stored blob: never retried, never cached.

use sc_01_attestation_codec::Integer;
use thiserror::Error;

/// Raw transaction JSON could not be interpreted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Transaction parse error: {0}")]
pub struct ParseError(pub String);

/// Transaction outcome as recorded on chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionSuccessStatus {
    /// Transaction succeeded.
    Success,
    /// Failed through the sender's fault (funds not sent).
    SenderFailure,
    /// Failed through the receiver's fault.
    ReceiverFailure,
}

impl TransactionSuccessStatus {
    /// Status code carried in response bodies.
    pub fn code(self) -> u8 {
        match self {
            TransactionSuccessStatus::Success => 0,
            TransactionSuccessStatus::SenderFailure => 1,
            TransactionSuccessStatus::ReceiverFailure => 2,
        }
    }
}

/// Outcome of a summary request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SummaryStatus {
    /// Summary produced.
    Success,
    /// Coinbase transactions have no payer.
    Coinbase,
    /// Not a native-currency payment.
    NotNativePayment,
    /// Input index out of range or unusable.
    InvalidInUtxo,
    /// Output index out of range or unusable.
    InvalidOutUtxo,
    /// Source address indicator does not resolve to an address.
    InvalidSourceAddressIndicator,
    /// Indicated address does not lose funds.
    NotBalanceDecreasing,
    /// Parser failed unexpectedly.
    UnexpectedError,
}

/// Summary result; `response` is set iff `status` is `Success`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryResult<T> {
    /// Outcome.
    pub status: SummaryStatus,
    /// Summary.
    pub response: Option<T>,
}

impl<T> SummaryResult<T> {
    /// Successful summary.
    pub fn success(response: T) -> Self {
        Self {
            status: SummaryStatus::Success,
            response: Some(response),
        }
    }

    /// Failed summary.
    pub fn failure(status: SummaryStatus) -> Self {
        Self {
            status,
            response: None,
        }
    }
}

/// Payment between one source input and one receiving output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentSummary {
    /// Standard hash of the source address.
    pub source_address_hash: String,
    /// Merkle root over all source addresses.
    pub source_addresses_root: String,
    /// Standard hash of the receiving address (zero hash on failure).
    pub receiving_address_hash: String,
    /// Standard hash of the intended receiving address.
    pub intended_receiving_address_hash: String,
    /// Net amount leaving the source.
    pub spent_amount: Integer,
    /// Net amount that would leave the source on success.
    pub intended_spent_amount: Integer,
    /// Net amount reaching the receiver.
    pub received_amount: Integer,
    /// Net amount that would reach the receiver on success.
    pub intended_received_amount: Integer,
    /// Standard payment reference, or the zero hash.
    pub payment_reference: String,
    /// Only the source pays and only the receiver receives.
    pub one_to_one: bool,
    /// Transaction outcome.
    pub transaction_status: TransactionSuccessStatus,
}

/// Net decrease of one address's balance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceDecreasingSummary {
    /// Standard hash of the indicated address.
    pub source_address_hash: String,
    /// Net amount leaving it.
    pub spent_amount: Integer,
    /// Standard payment reference, or the zero hash.
    pub payment_reference: String,
    /// Transaction outcome.
    pub transaction_status: TransactionSuccessStatus,
}

/// What one output would have delivered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentNonexistenceSummary {
    /// Standard hash of the intended receiving address.
    pub intended_receiving_address_hash: String,
    /// Net amount that would reach it on success.
    pub intended_received_amount: Integer,
    /// Standard payment reference, or the zero hash.
    pub payment_reference: String,
}

/// Amount intended for one address, by output position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressAmount {
    /// Receiving address, absent for non-standard outputs.
    pub address: Option<String>,
    /// Amount.
    pub amount: Integer,
}

/// A parsed transaction.
pub trait ChainTransaction: Send + Sync {
    /// Timestamp of the transaction (its block's timestamp).
    fn unix_timestamp(&self) -> u64;

    /// On-chain outcome.
    fn success_status(&self) -> TransactionSuccessStatus;

    /// Amounts intended per output, in output order.
    fn intended_received_amounts(&self) -> Vec<AddressAmount>;

    /// Payment from input `in_utxo` to output `out_utxo`.
    fn payment_summary(&self, in_utxo: u64, out_utxo: u64) -> SummaryResult<PaymentSummary>;

    /// Balance decrease of the address selected by `source_address_indicator`.
    fn balance_decreasing_summary(
        &self,
        source_address_indicator: &str,
    ) -> SummaryResult<BalanceDecreasingSummary>;

    /// What output `out_utxo` would have delivered.
    fn payment_nonexistence_summary(
        &self,
        out_utxo: u64,
    ) -> SummaryResult<PaymentNonexistenceSummary>;
}

/// Constructs parsed transactions from stored raw JSON.
pub trait TransactionParser: Send + Sync {
    /// Parse one raw response.
    ///
    /// ## Errors
    ///
    /// - `ParseError`: the blob is not valid transaction JSON
    fn parse(&self, raw_response: &str) -> Result<Box<dyn ChainTransaction>, ParseError>;
}
