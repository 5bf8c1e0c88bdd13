//! Live-reloadable confirmation policy.

use shared_types::ChainType;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared handle to the number of confirmations required for finality.
///
/// Clones observe the same value, so a reload through any handle is seen by
/// every query manager holding one.
#[derive(Clone, Debug)]
pub struct Confirmations(Arc<AtomicU64>);

impl Confirmations {
    /// Fixed starting value.
    pub fn new(confirmations: u64) -> Self {
        Self(Arc::new(AtomicU64::new(confirmations)))
    }

    /// Chain default (BTC 6, DOGE 60, XRP 3).
    pub fn for_chain(chain: ChainType) -> Self {
        Self::new(chain.default_confirmations())
    }

    /// Current value.
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    /// Replace the policy.
    pub fn set(&self, confirmations: u64) {
        self.0.store(confirmations, Ordering::Release);
    }
}
