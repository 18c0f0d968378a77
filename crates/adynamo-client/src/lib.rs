//! Typed, schema-validated async client core for a DynamoDB-style store.
//!
//! Callers declare per-table key schemas once, register them in a
//! [`Database`], and issue typed operations without hand-building wire
//! requests. The client marshals native scalar and set values to the
//! store's tagged JSON envelope, validates key shapes against the schema,
//! drives the optimistic-concurrency write protocol, and enforces the
//! 25-item batch-write ceiling locally.
//!
//! All network I/O and request signing lives behind the [`RequestExecutor`]
//! trait; this crate only builds validated operation payloads and
//! interprets the structured responses and errors the executor returns.
//! Validation failures surface synchronously, before any dispatch;
//! store-reported failures surface through each operation's future.
//!
//! ```no_run
//! use std::sync::Arc;
//! use adynamo_client::{Database, KeyType, TableSchema, item};
//! # async fn demo(executor: Arc<dyn adynamo_client::RequestExecutor>) -> adynamo_client::Result<()> {
//! let db = Database::new(
//!     executor,
//!     [(
//!         "events",
//!         TableSchema::new("id", KeyType::Int).with_range_key("ts", KeyType::Int),
//!     )],
//! )?;
//! let events = db.table("events")?;
//! events.put(item! { "id" => 1, "ts" => 10, "kind" => "signup" }).await?;
//! let recent = events.query(1).gt(5).asc().limit(10).execute().await?;
//! # let _ = recent;
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod database;
pub mod error;
pub mod executor;
pub mod query;
pub mod schema;
pub mod table;

pub use codec::{Item, Value, pack, pack_item, unpack, unpack_item};
pub use database::Database;
pub use error::{Error, MAX_BATCH_OPERATIONS, Result};
pub use executor::{ExecutorError, RequestExecutor};
pub use query::{QueryBuilder, ScanBuilder};
pub use schema::{ExtractedKeys, KeyType, TableSchema};
pub use table::{GetOptions, Table};
