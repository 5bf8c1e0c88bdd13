//! # Chain Identifiers
//!
//! External chains the verifier can attest to, and the indexer family that
//! serves each of them.

use crate::errors::SharedError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Indexer database layout family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainFamily {
    /// Bitcoin-like chains: transactions carry input/output sub-rows.
    Utxo,
    /// Account-based chains: transactions carry the raw node response.
    Account,
}

/// Supported external chains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainType {
    /// Bitcoin mainnet.
    Btc,
    /// Dogecoin mainnet.
    Doge,
    /// XRP Ledger mainnet.
    Xrp,
    /// Bitcoin testnet.
    TestBtc,
    /// Dogecoin testnet.
    TestDoge,
    /// XRP Ledger testnet.
    TestXrp,
}

impl ChainType {
    /// All supported chains.
    pub const ALL: [ChainType; 6] = [
        ChainType::Btc,
        ChainType::Doge,
        ChainType::Xrp,
        ChainType::TestBtc,
        ChainType::TestDoge,
        ChainType::TestXrp,
    ];

    /// Source name as it is encoded into the `sourceId` attestation field.
    pub fn source_name(&self) -> &'static str {
        match self {
            ChainType::Btc => "BTC",
            ChainType::Doge => "DOGE",
            ChainType::Xrp => "XRP",
            ChainType::TestBtc => "testBTC",
            ChainType::TestDoge => "testDOGE",
            ChainType::TestXrp => "testXRP",
        }
    }

    /// Indexer family serving this chain.
    pub fn family(&self) -> ChainFamily {
        match self {
            ChainType::Btc | ChainType::Doge | ChainType::TestBtc | ChainType::TestDoge => {
                ChainFamily::Utxo
            }
            ChainType::Xrp | ChainType::TestXrp => ChainFamily::Account,
        }
    }

    /// Default confirmation depth.
    pub fn default_confirmations(&self) -> u64 {
        match self {
            ChainType::Btc | ChainType::TestBtc => 6,
            ChainType::Doge | ChainType::TestDoge => 60,
            ChainType::Xrp | ChainType::TestXrp => 3,
        }
    }
}

impl fmt::Display for ChainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source_name())
    }
}

impl FromStr for ChainType {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChainType::ALL
            .into_iter()
            .find(|chain| chain.source_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SharedError::UnknownChain(s.to_string()))
    }
}
