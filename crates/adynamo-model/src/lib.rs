//! Wire-level protocol types for the adynamo DynamoDB client.
//!
//! This crate defines the JSON request/response shapes the store speaks:
//! the tagged `AttributeValue` envelope, PascalCase input/output structs
//! for the eight supported operations, the legacy conditional-write types
//! (`Expected`, `AttributeUpdates`, `KeyConditions`, `ScanFilter`), and
//! parsing of store-reported error bodies. DynamoDB's JSON protocol makes
//! serde derives trivial, so everything here is hand-written rather than
//! generated.

pub mod attribute_value;
pub mod error;
pub mod input;
pub mod operations;
pub mod output;
pub mod types;

pub use attribute_value::AttributeValue;
pub use error::{ServiceError, ServiceErrorCode};
pub use operations::Operation;
