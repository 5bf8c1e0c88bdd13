//! JSON Chain Transaction Parser
//!
//! Default [`TransactionParser`] adapter. Interprets the node-style transaction
//! JSON stored by the indexer, with non-negative integer amounts:
//!
//! ```json
//! {
//!   "txid": "…", "blocktime": 1700000000,
//!   "status": "success" | "senderFailure" | "receiverFailure",
//!   "reference": "0x…",
//!   "vin":  [{ "coinbase": "…" } | { "prevout": { "value": 10, "scriptPubKey": { "address": "a" } } }],
//!   "vout": [{ "value": 7, "n": 0, "scriptPubKey": { "address": "b" } }]
//! }
//! ```
//!
//! UTXO chains select the source input by index; account chains by address
//! hash. Amounts are net per address: what it received minus what it paid in.
//! Input and output totals must each fit in `i64`; a transaction that
//! overflows is a parse error.

use crate::ports::{
    AddressAmount, BalanceDecreasingSummary, ChainTransaction, ParseError,
    PaymentNonexistenceSummary, PaymentSummary, SummaryResult, SummaryStatus, TransactionParser,
    TransactionSuccessStatus,
};
use sc_01_attestation_codec::Integer;
use serde_json::Value;
use shared_types::{
    decode_hash, encode_0x_hex, is_0x_hex_of_len, keccak256, same_hex, standard_address_hash,
    ChainFamily, Hash, ZERO_BYTES_32,
};

/// Parser for indexed transaction JSON of one chain family.
#[derive(Clone, Copy, Debug)]
pub struct JsonTransactionParser {
    family: ChainFamily,
}

impl JsonTransactionParser {
    /// Create a parser for `family`.
    pub fn new(family: ChainFamily) -> Self {
        Self { family }
    }
}

impl TransactionParser for JsonTransactionParser {
    fn parse(&self, raw_response: &str) -> Result<Box<dyn ChainTransaction>, ParseError> {
        let value: Value =
            serde_json::from_str(raw_response).map_err(|e| ParseError(e.to_string()))?;
        Ok(Box::new(JsonTransaction::from_json(self.family, &value)?))
    }
}

#[derive(Clone, Debug)]
struct Leg {
    address: Option<String>,
    amount: i64,
}

#[derive(Clone, Debug)]
struct JsonTransaction {
    family: ChainFamily,
    timestamp: u64,
    status: TransactionSuccessStatus,
    reference: String,
    coinbase: bool,
    inputs: Vec<Leg>,
    outputs: Vec<Leg>,
    paid: i64,
    sent: i64,
}

fn amount(value: Option<&Value>, at: &str) -> Result<i64, ParseError> {
    match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    }
    .filter(|amount| *amount >= 0)
    .ok_or_else(|| ParseError(format!("{}: expected a non-negative integer amount", at)))
}

fn checked_total(legs: &[Leg], side: &str) -> Result<i64, ParseError> {
    legs.iter()
        .try_fold(0i64, |acc, leg| acc.checked_add(leg.amount))
        .ok_or_else(|| ParseError(format!("{} amounts overflow", side)))
}

fn address(leg: &Value) -> Option<String> {
    leg.pointer("/scriptPubKey/address")
        .and_then(Value::as_str)
        .map(str::to_string)
}

impl JsonTransaction {
    fn from_json(family: ChainFamily, value: &Value) -> Result<Self, ParseError> {
        let timestamp = value
            .get("blocktime")
            .or_else(|| value.get("time"))
            .and_then(Value::as_u64)
            .ok_or_else(|| ParseError("missing blocktime".to_string()))?;

        let status = match value.get("status").and_then(Value::as_str) {
            None | Some("success") => TransactionSuccessStatus::Success,
            Some("senderFailure") => TransactionSuccessStatus::SenderFailure,
            Some("receiverFailure") => TransactionSuccessStatus::ReceiverFailure,
            Some(other) => return Err(ParseError(format!("unknown status '{}'", other))),
        };

        let reference = match value.get("reference").and_then(Value::as_str) {
            Some(reference) if is_0x_hex_of_len(reference, 64) => reference.to_ascii_lowercase(),
            _ => ZERO_BYTES_32.to_string(),
        };

        let vin = value
            .get("vin")
            .and_then(Value::as_array)
            .ok_or_else(|| ParseError("missing vin".to_string()))?;
        let vout = value
            .get("vout")
            .and_then(Value::as_array)
            .ok_or_else(|| ParseError("missing vout".to_string()))?;

        let coinbase = vin.iter().any(|leg| leg.get("coinbase").is_some());
        let mut inputs = Vec::with_capacity(vin.len());
        if !coinbase {
            for (index, leg) in vin.iter().enumerate() {
                let prevout = leg
                    .get("prevout")
                    .ok_or_else(|| ParseError(format!("vin[{}]: missing prevout", index)))?;
                inputs.push(Leg {
                    address: address(prevout),
                    amount: amount(prevout.get("value"), &format!("vin[{}]", index))?,
                });
            }
        }
        let outputs = vout
            .iter()
            .enumerate()
            .map(|(index, leg)| {
                Ok(Leg {
                    address: address(leg),
                    amount: amount(leg.get("value"), &format!("vout[{}]", index))?,
                })
            })
            .collect::<Result<Vec<_>, ParseError>>()?;
        let paid = checked_total(&inputs, "vin")?;
        let sent = checked_total(&outputs, "vout")?;

        Ok(Self {
            family,
            timestamp,
            status,
            reference,
            coinbase,
            inputs,
            outputs,
            paid,
            sent,
        })
    }

    // Per-address totals are bounded by `paid`/`sent`, which fit in i64, so the
    // folds and the differences below cannot overflow.
    fn total(legs: &[Leg], address: &str) -> i64 {
        legs.iter()
            .filter(|leg| leg.address.as_deref() == Some(address))
            .fold(0i64, |acc, leg| acc.saturating_add(leg.amount))
    }

    fn fee(&self) -> i64 {
        self.paid.saturating_sub(self.sent)
    }

    /// Net amount `address` pays if the transaction succeeds.
    fn intended_spent(&self, address: &str) -> i64 {
        Self::total(&self.inputs, address).saturating_sub(Self::total(&self.outputs, address))
    }

    /// Net amount `address` pays given the recorded outcome.
    fn spent(&self, address: &str) -> i64 {
        match self.status {
            TransactionSuccessStatus::Success => self.intended_spent(address),
            _ if Self::total(&self.inputs, address) > 0 => self.fee(),
            _ => 0,
        }
    }

    /// Net amount `address` receives if the transaction succeeds.
    fn intended_received(&self, address: &str) -> i64 {
        Self::total(&self.outputs, address).saturating_sub(Self::total(&self.inputs, address))
    }

    fn input_addresses(&self) -> impl Iterator<Item = &str> {
        self.inputs.iter().filter_map(|leg| leg.address.as_deref())
    }

    /// Pairwise-sorted Keccak Merkle root over the distinct input address hashes.
    fn source_addresses_root(&self) -> String {
        let mut level: Vec<Hash> = self
            .input_addresses()
            .filter_map(|address| decode_hash(&standard_address_hash(address)).ok())
            .collect();
        level.sort_unstable();
        level.dedup();
        if level.is_empty() {
            return ZERO_BYTES_32.to_string();
        }
        while level.len() > 1 {
            level = level
                .chunks(2)
                .map(|pair| match pair {
                    [a, b] => {
                        let (low, high) = if a <= b { (a, b) } else { (b, a) };
                        keccak256(&[low.as_slice(), high.as_slice()].concat())
                    }
                    _ => pair[0],
                })
                .collect();
        }
        encode_0x_hex(&level[0])
    }

    fn account_source(&self, indicator: &str) -> Option<String> {
        self.input_addresses()
            .find(|address| same_hex(&standard_address_hash(address), indicator))
            .map(str::to_string)
    }
}

impl ChainTransaction for JsonTransaction {
    fn unix_timestamp(&self) -> u64 {
        self.timestamp
    }

    fn success_status(&self) -> TransactionSuccessStatus {
        self.status
    }

    fn intended_received_amounts(&self) -> Vec<AddressAmount> {
        self.outputs
            .iter()
            .map(|leg| AddressAmount {
                address: leg.address.clone(),
                amount: Integer::from(leg.amount),
            })
            .collect()
    }

    fn payment_summary(&self, in_utxo: u64, out_utxo: u64) -> SummaryResult<PaymentSummary> {
        if self.coinbase {
            return SummaryResult::failure(SummaryStatus::Coinbase);
        }
        let Some(source) = usize::try_from(in_utxo)
            .ok()
            .and_then(|index| self.inputs.get(index))
            .and_then(|leg| leg.address.clone())
        else {
            return SummaryResult::failure(SummaryStatus::InvalidInUtxo);
        };
        let Some(receiver) = usize::try_from(out_utxo)
            .ok()
            .and_then(|index| self.outputs.get(index))
            .and_then(|leg| leg.address.clone())
        else {
            return SummaryResult::failure(SummaryStatus::InvalidOutUtxo);
        };

        let succeeded = self.status == TransactionSuccessStatus::Success;
        let intended_receiving_address_hash = standard_address_hash(&receiver);
        let one_to_one = self.input_addresses().all(|address| address == source)
            && self.outputs.iter().all(|leg| {
                matches!(leg.address.as_deref(), Some(a) if a == source || a == receiver)
            });

        SummaryResult::success(PaymentSummary {
            source_address_hash: standard_address_hash(&source),
            source_addresses_root: self.source_addresses_root(),
            receiving_address_hash: if succeeded {
                intended_receiving_address_hash.clone()
            } else {
                ZERO_BYTES_32.to_string()
            },
            intended_receiving_address_hash,
            spent_amount: Integer::from(self.spent(&source)),
            intended_spent_amount: Integer::from(self.intended_spent(&source)),
            received_amount: Integer::from(if succeeded {
                self.intended_received(&receiver)
            } else {
                0
            }),
            intended_received_amount: Integer::from(self.intended_received(&receiver)),
            payment_reference: self.reference.clone(),
            one_to_one,
            transaction_status: self.status,
        })
    }

    fn balance_decreasing_summary(
        &self,
        source_address_indicator: &str,
    ) -> SummaryResult<BalanceDecreasingSummary> {
        if self.coinbase {
            return SummaryResult::failure(SummaryStatus::Coinbase);
        }
        let source = match self.family {
            ChainFamily::Utxo => Integer::parse(source_address_indicator)
                .and_then(|index| index.to_u64())
                .and_then(|index| usize::try_from(index).ok())
                .and_then(|index| self.inputs.get(index))
                .and_then(|leg| leg.address.clone()),
            ChainFamily::Account => {
                if !is_0x_hex_of_len(source_address_indicator, 64) {
                    return SummaryResult::failure(SummaryStatus::InvalidSourceAddressIndicator);
                }
                match self.account_source(source_address_indicator) {
                    Some(address) => Some(address),
                    None => return SummaryResult::failure(SummaryStatus::NotBalanceDecreasing),
                }
            }
        };
        let Some(source) = source else {
            return SummaryResult::failure(SummaryStatus::InvalidSourceAddressIndicator);
        };
        SummaryResult::success(BalanceDecreasingSummary {
            source_address_hash: standard_address_hash(&source),
            spent_amount: Integer::from(self.spent(&source)),
            payment_reference: self.reference.clone(),
            transaction_status: self.status,
        })
    }

    fn payment_nonexistence_summary(
        &self,
        out_utxo: u64,
    ) -> SummaryResult<PaymentNonexistenceSummary> {
        if self.coinbase {
            return SummaryResult::failure(SummaryStatus::Coinbase);
        }
        let Some(receiver) = usize::try_from(out_utxo)
            .ok()
            .and_then(|index| self.outputs.get(index))
            .and_then(|leg| leg.address.clone())
        else {
            return SummaryResult::failure(SummaryStatus::InvalidOutUtxo);
        };
        SummaryResult::success(PaymentNonexistenceSummary {
            intended_receiving_address_hash: standard_address_hash(&receiver),
            intended_received_amount: Integer::from(self.intended_received(&receiver)),
            payment_reference: self.reference.clone(),
        })
    }
}
