//! # Adapters Layer
//!
//! - `JsonTransactionParser`: default chain parser over the indexed node-style JSON

pub mod json_parser;

pub use json_parser::JsonTransactionParser;
