//! The boundary to the external request executor.
//!
//! The client never performs network I/O or request signing itself. It
//! builds JSON operation bodies and hands them to a [`RequestExecutor`],
//! which owns connections, credentials, and any retry policy. Session-token
//! refresh lives entirely behind this trait.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use adynamo_model::{Operation, ServiceError};

use crate::error::{self, Error, Result};

/// A failure reported by the executor.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The store answered with a structured error body.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The request never produced a store response (connection failure,
    /// timeout, signing problem). Passed through to callers unmodified.
    #[error("transport failure: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Performs a signed call for a named operation with a JSON body.
///
/// Implementations return the raw JSON response body on success. The future
/// must be `'static`: executors hold their connection state in `Arc`s and
/// move clones into the returned future.
pub trait RequestExecutor: Send + Sync + 'static {
    /// Execute `op` with the given JSON request body.
    fn execute(
        &self,
        op: Operation,
        body: Bytes,
    ) -> Pin<Box<dyn Future<Output = std::result::Result<Bytes, ExecutorError>> + Send>>;
}

/// Serialize `input`, run it through the executor, and decode the response.
///
/// Store-reported failures are mapped into the client taxonomy for `op`;
/// transport failures pass through opaquely.
pub(crate) async fn dispatch<I, O>(executor: &dyn RequestExecutor, op: Operation, input: &I) -> Result<O>
where
    I: Serialize,
    O: DeserializeOwned,
{
    let body = Bytes::from(serde_json::to_vec(input)?);
    tracing::debug!(operation = %op, bytes = body.len(), "dispatching store operation");
    let response = executor.execute(op, body).await.map_err(|e| match e {
        ExecutorError::Service(err) => error::map_service_error(op, err),
        ExecutorError::Transport(err) => Error::Transport(err),
    })?;
    tracing::debug!(operation = %op, bytes = response.len(), "decoding store response");
    Ok(serde_json::from_slice(&response)?)
}
