//! Integration tests for the adynamo client.
//!
//! These tests drive a [`Database`] against an in-process fake store that
//! implements the wire protocol, so the full request path (packing, input
//! construction, dispatch, output decoding) is exercised without a network.

use std::sync::{Arc, Once};

use adynamo_client::{Database, KeyType, TableSchema};


use fake_store::FakeStore;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Build a fake store plus a database registered over its tables.
///
/// Three tables cover the shapes used throughout the tests:
/// `users` (int hash), `events` (int hash + int range), `products` (string hash).
#[must_use]
pub fn test_database() -> (Arc<FakeStore>, Database) {
    init_tracing();

    let store = FakeStore::new([
        ("users", "id", None),
        ("events", "id", Some("ts")),
        ("products", "sku", None),
    ]);

    let schemas = vec![
        ("users".to_owned(), TableSchema::new("id", KeyType::Int)),
        (
            "events".to_owned(),
            TableSchema::new("id", KeyType::Int).with_range_key("ts", KeyType::Int),
        ),
        ("products".to_owned(), TableSchema::new("sku", KeyType::Str)),
    ];

    let executor: Arc<dyn adynamo_client::RequestExecutor> = store.clone();
    let db = Database::new(executor, schemas).unwrap_or_else(|e| panic!("bad schema: {e}"));
    (store, db)
}

mod test_batch;
mod test_table;
