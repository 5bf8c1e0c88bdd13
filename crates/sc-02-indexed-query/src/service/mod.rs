//! # Query Managers
//!
//! One `IndexedQueryManager` implementation per chain family. Both share the
//! block primitives in `base` and the synchronization contract in `sync`.

mod account;
mod base;
pub(crate) mod sync;
mod utxo;

pub use account::AccountIndexedQueryManager;
pub use utxo::UtxoIndexedQueryManager;
