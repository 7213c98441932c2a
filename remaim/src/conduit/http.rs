//! Conduit over HTTP.

use super::{Conduit, ConduitError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

/// Response envelope returned by every Conduit method.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    result: Value,
    error_code: Option<String>,
    error_info: Option<String>,
}

/// Calls Conduit methods on a Phabricator instance with an API token.
pub struct HttpConduit {
    host: String,
    token: String,
    client: reqwest::Client,
}

impl HttpConduit {
    /// Creates a client for `host` (e.g. `https://phabricator.example.com`).
    pub fn new(host: &str, token: String) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            token,
            client: reqwest::Client::new(),
        }
    }

    /// Returns the configured host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Embeds the token into the parameter object the way Conduit expects.
    fn authenticated(&self, params: Value) -> Value {
        let mut params = match params {
            Value::Object(map) => Value::Object(map),
            Value::Null => json!({}),
            other => json!({ "value": other }),
        };
        params["__conduit__"] = json!({ "token": self.token });
        params
    }
}

#[async_trait]
impl Conduit for HttpConduit {
    async fn call(&self, method: &str, params: Value) -> Result<Value, ConduitError> {
        let url = format!("{}/api/{}", self.host, method);
        debug!(method, "Calling Conduit");

        let body = self.authenticated(params).to_string();
        let response = self
            .client
            .post(&url)
            .form(&[
                ("params", body.as_str()),
                ("output", "json"),
                ("__conduit__", "1"),
            ])
            .send()
            .await
            .map_err(|source| ConduitError::Connectivity {
                host: self.host.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConduitError::Http {
                method: method.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| ConduitError::Connectivity {
                host: self.host.clone(),
                source,
            })?;
        let envelope: Envelope =
            serde_json::from_slice(&bytes).map_err(|e| ConduitError::decode(method, e))?;

        if let Some(code) = envelope.error_code {
            return Err(ConduitError::Api {
                method: method.to_string(),
                code,
                info: envelope.error_info.unwrap_or_default(),
            });
        }

        Ok(envelope.result)
    }
}
