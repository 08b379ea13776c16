//! The ledger client seam and its JSON-RPC implementation.

use async_trait::async_trait;
use jsonrpsee::{
    core::client::ClientT,
    http_client::{HttpClient, HttpClientBuilder},
    rpc_params,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::{
    config::RpcConfig,
    constants::SUCCESS_ENGINE_RESULTS,
    errors::{LedgerError, LedgerResult},
    node_config::RpcEndpoint,
    tx::Transaction,
};

/// What the node made of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmitOutcome {
    /// Engine result code, e.g. `tesSUCCESS`.
    pub engine_result: String,

    /// Human readable explanation of the engine result.
    #[serde(default)]
    pub engine_result_message: String,

    /// Hash of the signed transaction, when the node reports it.
    #[serde(default, rename = "tx_json", deserialize_with = "hash_of")]
    pub hash: Option<String>,
}

impl SubmitOutcome {
    /// Whether the transaction was accepted.
    pub fn is_success(&self) -> bool {
        SUCCESS_ENGINE_RESULTS.contains(&self.engine_result.as_str())
    }
}

fn hash_of<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let tx_json = Value::deserialize(deserializer)?;
    Ok(tx_json
        .get("hash")
        .and_then(Value::as_str)
        .map(str::to_string))
}

/// The operations the control plane needs from a ledger node.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Base reserve of the latest validated ledger, in drops.
    async fn reserve_base(&self) -> LedgerResult<u64>;

    /// Has the node sign `tx` with `secret` and apply it.
    async fn submit(&self, tx: &Transaction, secret: &str) -> LedgerResult<SubmitOutcome>;

    /// Closes the current ledger.
    async fn accept_ledger(&self) -> LedgerResult<()>;

    /// Submits `tx`, fails unless it was accepted, then closes the ledger.
    async fn submit_and_accept(
        &self,
        tx: &Transaction,
        secret: &str,
    ) -> LedgerResult<SubmitOutcome> {
        let outcome = self.submit(tx, secret).await?;
        if !outcome.is_success() {
            warn!(
                kind = tx.kind(),
                account = tx.account(),
                engine_result = %outcome.engine_result,
                "transaction rejected"
            );
            return Err(LedgerError::Rejected {
                engine_result: outcome.engine_result,
                message: outcome.engine_result_message,
            });
        }

        self.accept_ledger().await?;
        info!(
            kind = tx.kind(),
            account = tx.account(),
            hash = ?outcome.hash,
            "transaction applied"
        );

        Ok(outcome)
    }
}

/// A [`LedgerClient`] speaking JSON-RPC over HTTP.
#[derive(Debug, Clone)]
pub struct JsonRpcLedgerClient {
    url: String,
    client: HttpClient,
}

impl JsonRpcLedgerClient {
    /// Creates a client for the node answering at `url`.
    pub fn new(url: impl Into<String>, config: &RpcConfig) -> LedgerResult<Self> {
        let url = url.into();
        let client = HttpClientBuilder::default()
            .request_timeout(config.request_timeout)
            .build(&url)
            .map_err(|source| LedgerError::Transport {
                url: url.clone(),
                source,
            })?;

        Ok(Self { url, client })
    }

    /// Creates a client for the node at `endpoint`.
    pub fn from_endpoint(endpoint: &RpcEndpoint, config: &RpcConfig) -> LedgerResult<Self> {
        Self::new(endpoint.url(), config)
    }

    /// The endpoint this client talks to.
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call(&self, method: &'static str, params: Value) -> LedgerResult<Value> {
        debug!(url = %self.url, %method, "sending rpc request");
        let result: Value = self
            .client
            .request(method, rpc_params![params])
            .await
            .map_err(|source| LedgerError::Transport {
                url: self.url.clone(),
                source,
            })?;

        check_status(method, result)
    }
}

#[async_trait]
impl LedgerClient for JsonRpcLedgerClient {
    async fn reserve_base(&self) -> LedgerResult<u64> {
        let result = self.call("server_state", json!({})).await?;
        parse_reserve_base(&result)
    }

    async fn submit(&self, tx: &Transaction, secret: &str) -> LedgerResult<SubmitOutcome> {
        let params = json!({
            "tx_json": serde_json::to_value(tx)?,
            "secret": secret,
        });
        let result = self.call("submit", params).await?;

        serde_json::from_value(result).map_err(|e| LedgerError::UnexpectedResponse {
            method: "submit",
            reason: e.to_string(),
        })
    }

    async fn accept_ledger(&self) -> LedgerResult<()> {
        self.call("ledger_accept", json!({})).await?;
        Ok(())
    }
}

/// Turns a result carrying `"status": "error"` into [`LedgerError::Rpc`].
fn check_status(method: &'static str, result: Value) -> LedgerResult<Value> {
    if result.get("status").and_then(Value::as_str) != Some("error") {
        return Ok(result);
    }

    let field = |name: &str| {
        result
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    Err(LedgerError::Rpc {
        method,
        error: field("error"),
        message: field("error_message"),
    })
}

fn parse_reserve_base(result: &Value) -> LedgerResult<u64> {
    result
        .pointer("/state/validated_ledger/reserve_base")
        .and_then(Value::as_u64)
        .ok_or_else(|| LedgerError::UnexpectedResponse {
            method: "server_state",
            reason: "missing state.validated_ledger.reserve_base".to_string(),
        })
}
