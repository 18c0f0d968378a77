//! Client error taxonomy.
//!
//! Errors split into two families: local validation failures, raised
//! synchronously before any request is built, and store-reported failures,
//! surfaced through the async failure path after the executor responds.
//! The client never retries on its own.

use adynamo_model::{Operation, ServiceError};
use thiserror::Error;

/// Maximum combined put/delete operations in one batched wire call.
pub const MAX_BATCH_OPERATIONS: usize = 25;

/// Errors produced by client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A native value cannot be marshaled to the wire, or a wire value
    /// cannot be unmarshaled (empty set, non-integer number, unknown tag).
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// The table schema is malformed.
    #[error("invalid table schema: {0}")]
    Schema(String),

    /// A declared key attribute was not supplied.
    #[error("missing key attribute `{0}`")]
    MissingKey(String),

    /// A key attribute's native type disagrees with the schema.
    #[error("key attribute `{attr}` has wrong type: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The name of the key attribute.
        attr: String,
        /// The type the schema declares.
        expected: &'static str,
        /// The type that was supplied.
        actual: &'static str,
    },

    /// An attribute was supplied where only key attributes are accepted.
    #[error("unsupported argument `{0}`: only key attributes are accepted here")]
    UnsupportedArgument(String),

    /// A batch exceeds the combined operation ceiling. Detected locally;
    /// nothing is dispatched.
    #[error("batch of {0} operations exceeds the limit of {MAX_BATCH_OPERATIONS}")]
    LimitExceeded(usize),

    /// A query was executed without a configured range condition.
    #[error("query requires a range condition (gt/lt) before execution")]
    Precondition,

    /// The named table is not registered with the database.
    #[error("table `{0}` is not registered")]
    UnknownTable(String),

    /// A conditional write was rejected because its precondition no longer
    /// holds at the store.
    #[error("concurrent update conflict: {0}")]
    ConcurrencyConflict(String),

    /// The store rejected a `GetItem` or `BatchGetItem` request.
    #[error("read failed: {0}")]
    GetFailed(String),

    /// The store rejected a `PutItem` request for a non-condition reason.
    #[error("put failed: {0}")]
    PutFailed(String),

    /// The store rejected an `UpdateItem` request.
    #[error("update failed: {0}")]
    UpdateFailed(String),

    /// The store rejected a `DeleteItem` request for a non-condition reason.
    #[error("remove failed: {0}")]
    RemoveFailed(String),

    /// The store rejected a `Query` request.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// The store rejected a `Scan` request.
    #[error("scan failed: {0}")]
    ScanFailed(String),

    /// The store rejected a `BatchWriteItem` request.
    #[error("batch write failed: {0}")]
    BatchWriteFailed(String),

    /// A store failure whose error type is not recognized.
    #[error("store error: {0}")]
    Database(ServiceError),

    /// A request or response body could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An opaque transport failure from the executor, passed through
    /// unmodified.
    #[error("transport failure: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Convenience result type for client operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Map a store-reported failure to the client taxonomy.
///
/// Condition-check failures become [`Error::ConcurrencyConflict`] regardless
/// of operation; other recognized store errors become the operation-specific
/// variant carrying the store's message; unrecognized error types fall back
/// to [`Error::Database`].
pub(crate) fn map_service_error(op: Operation, err: ServiceError) -> Error {
    if err.is_conditional_check_failed() {
        return Error::ConcurrencyConflict(err.message);
    }
    if err.code.is_none() {
        return Error::Database(err);
    }
    let message = err.to_string();
    match op {
        Operation::GetItem | Operation::BatchGetItem => Error::GetFailed(message),
        Operation::PutItem => Error::PutFailed(message),
        Operation::UpdateItem => Error::UpdateFailed(message),
        Operation::DeleteItem => Error::RemoveFailed(message),
        Operation::Query => Error::QueryFailed(message),
        Operation::Scan => Error::ScanFailed(message),
        Operation::BatchWriteItem => Error::BatchWriteFailed(message),
    }
}
