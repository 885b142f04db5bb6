//! # Ethereum JSON-RPC Adapter
//!
//! HTTP JSON-RPC client implementing the [`ChainRpc`] port against a real
//! node (geth, Infura, Alchemy, ...).

use crate::domain::{Block, SonifierError, Transaction};
use crate::ports::ChainRpc;
use async_trait::async_trait;
use primitive_types::{H160, H256, U256};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// JSON-RPC request structure.
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a, T: Serialize> {
    jsonrpc: &'static str,
    method: &'a str,
    params: T,
    id: u64,
}

/// JSON-RPC response structure.
#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<T>,
    error: Option<JsonRpcErrorBody>,
}

/// JSON-RPC error structure.
#[derive(Debug, Deserialize)]
struct JsonRpcErrorBody {
    code: i64,
    message: String,
}

/// A block as the node serializes it.
#[derive(Debug, Deserialize)]
struct RpcBlock {
    number: Option<String>,
    #[serde(default)]
    transactions: Vec<RpcTransaction>,
}

/// A transaction body as the node serializes it. Missing fields degrade to
/// defaults instead of failing the block.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcTransaction {
    hash: H256,
    #[serde(default)]
    value: U256,
    #[serde(default)]
    gas_price: Option<U256>,
    #[serde(default)]
    to: Option<H160>,
    #[serde(default)]
    input: Option<String>,
}

impl RpcTransaction {
    fn into_domain(self) -> Transaction {
        Transaction {
            hash: self.hash,
            value: self.value,
            gas_price: self.gas_price,
            to: self.to,
            input: decode_hex_bytes(self.input.as_deref().unwrap_or("0x")),
        }
    }
}

/// HTTP client for the Ethereum node's JSON-RPC endpoint.
pub struct HttpChainRpc {
    http_client: reqwest::Client,
    rpc_url: String,
    request_id: AtomicU64,
}

impl HttpChainRpc {
    /// Default per-request timeout in seconds.
    ///
    /// The node call is bounded so a hung endpoint surfaces as a tick error
    /// instead of stalling the pipeline.
    pub const REQUEST_TIMEOUT_SECS: u64 = 10;

    /// Create a client for the given endpoint URL.
    pub fn new(rpc_url: String) -> Self {
        // Use default client if builder fails - reqwest::Client::new() is infallible
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(Self::REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http_client,
            rpc_url,
            request_id: AtomicU64::new(1),
        }
    }

    /// Make a JSON-RPC call.
    async fn call<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<R, SonifierError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);

        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id,
        };

        let response = self
            .http_client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SonifierError::Transport(e.to_string()))?;

        let rpc_response: JsonRpcResponse<R> = response
            .json()
            .await
            .map_err(|e| SonifierError::Transport(e.to_string()))?;

        if let Some(error) = rpc_response.error {
            return Err(SonifierError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        rpc_response.result.ok_or(SonifierError::MissingResult)
    }
}

#[async_trait]
impl ChainRpc for HttpChainRpc {
    /// eth_blockNumber - current confirmed chain height.
    async fn current_height(&self) -> Result<u64, SonifierError> {
        let result: String = self.call("eth_blockNumber", Vec::<()>::new()).await?;
        parse_hex_u64(&result)
    }

    /// eth_getBlockByNumber with full transaction bodies.
    async fn fetch_block(&self, height: u64) -> Result<Block, SonifierError> {
        let params = serde_json::json!([format!("0x{height:x}"), true]);
        let result: serde_json::Value = self.call("eth_getBlockByNumber", params).await?;

        if result.is_null() {
            return Err(SonifierError::BlockNotFound(height));
        }

        let block: RpcBlock = serde_json::from_value(result)
            .map_err(|e| SonifierError::Transport(format!("malformed block body: {e}")))?;

        let number = match block.number.as_deref() {
            Some(hex) => parse_hex_u64(hex)?,
            None => height,
        };

        Ok(Block {
            number,
            transactions: block
                .transactions
                .into_iter()
                .map(RpcTransaction::into_domain)
                .collect(),
        })
    }
}

/// Parse a 0x-prefixed hex quantity.
fn parse_hex_u64(s: &str) -> Result<u64, SonifierError> {
    let digits = s.trim_start_matches("0x");
    u64::from_str_radix(digits, 16).map_err(|_| SonifierError::InvalidQuantity(s.to_string()))
}

/// Decode 0x-prefixed hex call data. Malformed payloads degrade to empty.
fn decode_hex_bytes(s: &str) -> Vec<u8> {
    hex::decode(s.trim_start_matches("0x")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex_u64("0x0").unwrap(), 0);
        assert_eq!(parse_hex_u64("0x1").unwrap(), 1);
        assert_eq!(parse_hex_u64("0x1234abcd").unwrap(), 0x1234abcd);
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(parse_hex_u64("0xzz").is_err());
        assert!(parse_hex_u64("").is_err());
    }

    #[test]
    fn test_decode_call_data() {
        assert!(decode_hex_bytes("0x").is_empty());
        assert_eq!(decode_hex_bytes("0xa9059cbb"), vec![0xa9, 0x05, 0x9c, 0xbb]);
        // Malformed payload degrades to a plain transfer.
        assert!(decode_hex_bytes("0xnot-hex").is_empty());
    }

    #[test]
    fn test_rpc_transaction_deserializes_minimal_body() {
        // EIP-1559 bodies omit gasPrice; creations omit `to`.
        let json = serde_json::json!({
            "hash": "0x00000000000000000000000000000000000000000000000000000000000000aa",
            "value": "0xde0b6b3a7640000",
        });
        let tx: RpcTransaction = serde_json::from_value(json).unwrap();
        let domain = tx.into_domain();

        assert_eq!(domain.value, U256::from(1_000_000_000_000_000_000u64));
        assert!(domain.gas_price.is_none());
        assert!(domain.to.is_none());
        assert!(domain.input.is_empty());
    }

    #[test]
    fn test_rpc_transaction_full_body() {
        let json = serde_json::json!({
            "hash": "0x00000000000000000000000000000000000000000000000000000000000000aa",
            "value": "0x0",
            "gasPrice": "0x4a817c800",
            "to": "0x1111111111111111111111111111111111111111",
            "input": "0xa9059cbb",
        });
        let tx: RpcTransaction = serde_json::from_value(json).unwrap();
        let domain = tx.into_domain();

        assert_eq!(domain.gas_price, Some(U256::from(20_000_000_000u64)));
        assert!(domain.to.is_some());
        assert!(domain.is_contract_call());
    }
}
