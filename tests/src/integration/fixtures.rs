//! BTC indexer holding blocks 3490141..=3490160, ten minutes apart, wired
//! into a node that requires six confirmations.

use sc_01_attestation_codec::{
    encode_attestation_name, AttestationDefinitionStore, AttestationRequest,
};
use sc_02_indexed_query::{
    DbBlock, DbTransaction, DbUtxoInput, DbUtxoOutput, InMemoryIndexerStore, TipSyncState,
};
use sc_node::{VerifierConfig, Verifiers};
use serde_json::{json, Value};
use shared_types::ChainType;
use std::path::PathBuf;
use std::sync::Arc;

pub const FIRST_BLOCK: u64 = 3_490_141;
pub const LAST_BLOCK: u64 = 3_490_160;
pub const CONFIRMATIONS: u64 = 6;

pub fn block_timestamp(block_number: u64) -> u64 {
    1_700_000_000 + (block_number - FIRST_BLOCK) * 600
}

pub fn definitions() -> Arc<AttestationDefinitionStore> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../config/attestation-types");
    Arc::new(AttestationDefinitionStore::load(dir).unwrap())
}

pub fn store(indexed: u64, tip: u64) -> Arc<InMemoryIndexerStore> {
    let store = InMemoryIndexerStore::new();
    for block_number in FIRST_BLOCK..=LAST_BLOCK {
        store.insert_block(DbBlock {
            block_number,
            block_hash: format!("{:064x}", block_number),
            timestamp: block_timestamp(block_number),
            confirmed: block_number + CONFIRMATIONS <= tip,
            transactions: 1,
        });
    }
    store.set_tip_state(TipSyncState {
        latest_indexed_height: indexed,
        latest_tip_height: tip,
        timestamp: block_timestamp(indexed.min(LAST_BLOCK)),
    });
    Arc::new(store)
}

pub fn config() -> VerifierConfig {
    VerifierConfig {
        chain: ChainType::Btc,
        confirmations: CONFIRMATIONS,
        ..VerifierConfig::default()
    }
}

/// A node serving every attestation type over `store`.
pub fn node(store: &Arc<InMemoryIndexerStore>) -> Verifiers {
    Verifiers::build(&config(), definitions(), store.clone()).unwrap()
}

/// A fully caught-up indexer.
pub fn synced_store() -> Arc<InMemoryIndexerStore> {
    store(LAST_BLOCK, LAST_BLOCK)
}

pub fn request(attestation_type: &str, request_body: Value) -> AttestationRequest {
    AttestationRequest {
        attestation_type: encode_attestation_name(attestation_type).unwrap(),
        source_id: encode_attestation_name("BTC").unwrap(),
        message_integrity_code: None,
        request_body,
    }
}

pub fn transaction_id(seed: u8) -> String {
    format!("{:02x}", seed).repeat(32)
}

pub fn reference(seed: u8) -> String {
    format!("0x{}", format!("{:02x}", seed).repeat(32))
}

/// Store a successful payment from `payer` to `payee` carrying `reference`.
/// The payer receives `change` back on output 1.
pub fn insert_payment(
    store: &InMemoryIndexerStore,
    seed: u8,
    block_number: u64,
    payer: (&str, i64),
    payee: (&str, i64),
    change: i64,
) -> String {
    let id = transaction_id(seed);
    let reference = reference(seed);
    let timestamp = block_timestamp(block_number);
    store.insert_transaction(DbTransaction {
        transaction_id: id.clone(),
        block_number,
        timestamp,
        payment_reference: reference[2..].to_string(),
        transaction_type: "full_payment".to_string(),
        is_native_payment: true,
        source_addresses_root: None,
        response: json!({
            "txid": id,
            "blocktime": timestamp,
            "status": "success",
            "reference": reference,
        })
        .to_string(),
    });
    store.insert_utxo_input(DbUtxoInput {
        transaction_id: id.clone(),
        input_index: 0,
        previous_transaction_id: "ee".repeat(32),
        previous_output_index: 0,
        sequence: 4_294_967_295,
        script_sig_hex: String::new(),
        address: Some(payer.0.to_string()),
        value: payer.1.to_string(),
        script_pub_key_hex: String::new(),
    });
    let outputs = [(payee.0, payee.1), (payer.0, change)];
    for (index, (address, value)) in outputs.into_iter().enumerate() {
        store.insert_utxo_output(DbUtxoOutput {
            transaction_id: id.clone(),
            output_index: index as u32,
            value: value.to_string(),
            address: Some(address.to_string()),
            script_pub_key_hex: String::new(),
        });
    }
    id
}

/// `bc1qpayer` pays `bc1qmerchant` 9000 out of a 10000 input, 500 change.
pub fn merchant_payment(store: &InMemoryIndexerStore, seed: u8, block_number: u64) -> String {
    insert_payment(
        store,
        seed,
        block_number,
        ("bc1qpayer", 10_000),
        ("bc1qmerchant", 9_000),
        500,
    )
}
