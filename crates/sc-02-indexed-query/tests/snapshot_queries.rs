//! Query managers over an indexer snapshot, as the node loads one.

use sc_02_indexed_query::{
    query_manager_for, BlockQueryParams, ConfirmedQueryStatus, Confirmations, IndexedQueryManager,
    IndexerSnapshot, InMemoryIndexerStore, PruneSyncState,
};
use serde_json::{json, Value};
use shared_types::ChainType;
use std::sync::Arc;

fn snapshot() -> IndexerSnapshot {
    let blocks: Vec<Value> = (10..=20u64)
        .map(|n| {
            json!({
                "blockNumber": n,
                "blockHash": format!("{:064x}", n),
                "timestamp": n * 600,
                "confirmed": n <= 17,
                "transactions": 1,
            })
        })
        .collect();
    serde_json::from_value(json!({
        "blocks": blocks,
        "transactions": [
            {
                "transactionId": "a1".repeat(32),
                "blockNumber": 12,
                "timestamp": 7200,
                "paymentReference": "00".repeat(32),
                "transactionType": "full_payment",
                "isNativePayment": true,
                "response": "{\"txid\":\"a1\",\"blocktime\":7200}",
            },
            {
                "transactionId": "c0".repeat(32),
                "blockNumber": 12,
                "timestamp": 7200,
                "paymentReference": "00".repeat(32),
                "transactionType": "coinbase",
                "isNativePayment": true,
                "response": "{\"txid\":\"c0\",\"blocktime\":7200}",
            },
        ],
        "utxoInputs": [
            {
                "transactionId": "a1".repeat(32),
                "inputIndex": 0,
                "previousTransactionId": "b2".repeat(32),
                "previousOutputIndex": 1,
                "sequence": 4294967295u64,
                "scriptSigHex": "",
                "address": "bc1qsource",
                "value": "5000",
                "scriptPubKeyHex": "0014",
            },
        ],
        "utxoCoinbaseInputs": [
            {
                "transactionId": "c0".repeat(32),
                "inputIndex": 0,
                "coinbaseHex": "03abcdef",
                "sequence": 0,
            },
        ],
        "utxoOutputs": [
            {
                "transactionId": "a1".repeat(32),
                "outputIndex": 0,
                "value": "4000",
                "address": "bc1qtarget",
                "scriptPubKeyHex": "0014",
            },
        ],
        "tipState": { "latestIndexedHeight": 20, "latestTipHeight": 20, "timestamp": 12000 },
    }))
    .unwrap()
}

fn manager(chain: ChainType, confirmations: &Confirmations) -> Arc<dyn IndexedQueryManager> {
    let store = Arc::new(InMemoryIndexerStore::from_snapshot(snapshot()));
    query_manager_for(store, chain, confirmations.clone())
}

#[tokio::test]
async fn test_utxo_transaction_rebuilds_inputs_and_outputs() {
    let manager = manager(ChainType::Btc, &Confirmations::new(3));
    let found = manager
        .get_confirmed_transaction(&format!("0x{}", "A1".repeat(32)))
        .await;
    assert_eq!(found.status, ConfirmedQueryStatus::Ok);

    let response: Value = serde_json::from_str(found.transaction.unwrap().response()).unwrap();
    assert_eq!(response["blocktime"], 7200);
    assert_eq!(response["vin"][0]["prevout"]["value"], 5000);
    assert_eq!(
        response["vin"][0]["prevout"]["scriptPubKey"]["address"],
        "bc1qsource"
    );
    assert_eq!(response["vout"][0]["n"], 0);
    assert_eq!(response["vout"][0]["scriptPubKey"]["address"], "bc1qtarget");
}

#[tokio::test]
async fn test_coinbase_replaces_regular_inputs() {
    let manager = manager(ChainType::Btc, &Confirmations::new(3));
    let found = manager.get_confirmed_transaction(&"c0".repeat(32)).await;
    let response: Value = serde_json::from_str(found.transaction.unwrap().response()).unwrap();
    assert_eq!(response["vin"], json!([{ "coinbase": "03abcdef", "sequence": 0 }]));
    assert_eq!(response["vout"], json!([]));
}

#[tokio::test]
async fn test_account_transaction_keeps_stored_response() {
    let manager = manager(ChainType::Xrp, &Confirmations::new(3));
    let found = manager.get_confirmed_transaction(&"a1".repeat(32)).await;
    assert_eq!(
        found.transaction.unwrap().response(),
        "{\"txid\":\"a1\",\"blocktime\":7200}"
    );
}

#[tokio::test]
async fn test_confirmation_reload_applies_to_next_query() {
    let confirmations = Confirmations::new(3);
    let manager = manager(ChainType::Btc, &confirmations);
    assert_eq!(
        manager.get_confirmed_block(17).await.status,
        ConfirmedQueryStatus::Ok
    );

    confirmations.set(5);
    assert_eq!(manager.number_of_confirmations(), 5);
    assert_eq!(
        manager.get_confirmed_block(17).await.status,
        ConfirmedQueryStatus::NotExist
    );
}

#[tokio::test]
async fn test_pruned_blocks_are_unavailable() {
    let store = Arc::new(InMemoryIndexerStore::from_snapshot(snapshot()));
    store.set_prune_state(PruneSyncState {
        bottom_block_number: 12,
    });
    let manager = query_manager_for(store, ChainType::Btc, Confirmations::new(3));
    assert_eq!(manager.get_bottom_block_number().await.unwrap(), 12);
    assert_eq!(
        manager.get_confirmed_block(11).await.status,
        ConfirmedQueryStatus::SystemFailure
    );
    assert_eq!(
        manager.get_confirmed_block(12).await.status,
        ConfirmedQueryStatus::Ok
    );
}

#[tokio::test]
async fn test_sync_helpers() {
    let manager = manager(ChainType::Doge, &Confirmations::new(60));
    assert!(manager.is_indexer_synced().await.unwrap());
    assert_eq!(manager.get_last_confirmed_block_number().await.unwrap(), 20);
    assert_eq!(manager.get_latest_block_timestamp().await.unwrap(), 12000);

    let block = manager
        .query_block(&BlockQueryParams::by_hash(format!("0x{:064x}", 15)))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(block.timestamp, 9000);
}
