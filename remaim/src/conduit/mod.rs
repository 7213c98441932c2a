//! Phabricator's Conduit API.
//!
//! Every target-side operation (projects, tasks, users, files, searches) goes
//! through the single [`Conduit::call`] primitive, so the engine can be driven
//! by an in-memory implementation in tests.

mod error;
mod http;

pub use error::ConduitError;
pub use http::HttpConduit;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A synchronous request/response call into Phabricator.
#[async_trait]
pub trait Conduit: Send + Sync {
    /// Invokes `method` with `params` and returns the unwrapped `result`.
    async fn call(&self, method: &str, params: Value) -> Result<Value, ConduitError>;
}

/// Calls `method` and decodes the result into `T`.
///
/// # Errors
///
/// Returns [`ConduitError::Decode`] if the result does not match `T`.
pub async fn call_as<T: DeserializeOwned>(
    conduit: &dyn Conduit,
    method: &str,
    params: Value,
) -> Result<T, ConduitError> {
    let value = conduit.call(method, params).await?;
    serde_json::from_value(value).map_err(|e| ConduitError::decode(method, e))
}

/// Collects the records of a result that is either a list or an object
/// keyed by PHID. Older Conduit methods return the latter.
pub(crate) fn records(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(map) => map.into_iter().map(|(_, record)| record).collect(),
        _ => Vec::new(),
    }
}
