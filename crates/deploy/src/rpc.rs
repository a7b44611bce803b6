//! Shared RPC utilities for interacting with Ethereum JSON-RPC endpoints.

use std::time::Duration;

use alloy_primitives::{Address, B256, Bytes};
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Default timeout for RPC requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Interval between polling attempts when waiting for a receipt.
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Create an HTTP client configured for JSON-RPC requests.
pub fn create_client() -> Result<reqwest::Client, anyhow::Error> {
    reqwest::Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .context("Failed to create HTTP client")
}

/// Make a JSON-RPC call and deserialize the result.
///
/// # Arguments
/// * `client` - The HTTP client to use
/// * `url` - The RPC endpoint URL
/// * `method` - The RPC method name
/// * `params` - The method parameters
///
/// # Returns
/// The deserialized result, or an error if the request failed or returned an
/// error response.
pub async fn json_rpc_call<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    method: &str,
    params: Vec<Value>,
) -> Result<T, anyhow::Error> {
    let response = client
        .post(url)
        .json(&serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        }))
        .send()
        .await
        .with_context(|| format!("Failed to send {} request", method))?;

    let result: Value = response
        .json()
        .await
        .with_context(|| format!("Failed to parse {} response", method))?;

    if let Some(error) = result.get("error") {
        anyhow::bail!(
            "RPC error: {}",
            error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown")
        );
    }

    let result_value = result
        .get("result")
        .context("No result in response")?
        .clone();

    serde_json::from_value(result_value)
        .with_context(|| format!("Failed to deserialize {} result", method))
}

/// Query eth_chainId and parse the hex result to u64.
pub async fn query_chain_id(client: &reqwest::Client, url: &str) -> Result<u64, anyhow::Error> {
    let result: String = json_rpc_call(client, url, "eth_chainId", vec![]).await?;
    parse_hex_u64(&result).context("Failed to parse eth_chainId result")
}

/// Query the next nonce for `address` against the latest block.
pub async fn query_transaction_count(
    client: &reqwest::Client,
    url: &str,
    address: &Address,
) -> Result<u64, anyhow::Error> {
    let result: String = json_rpc_call(
        client,
        url,
        "eth_getTransactionCount",
        vec![serde_json::json!(address), serde_json::json!("latest")],
    )
    .await?;
    parse_hex_u64(&result).context("Failed to parse eth_getTransactionCount result")
}

/// Query eth_gasPrice in wei.
pub async fn query_gas_price(client: &reqwest::Client, url: &str) -> Result<u128, anyhow::Error> {
    let result: String = json_rpc_call(client, url, "eth_gasPrice", vec![]).await?;
    parse_hex_u128(&result).context("Failed to parse eth_gasPrice result")
}

/// Estimate the gas needed to execute `input` sent from `from`.
///
/// With no `to` field the node treats the call as a contract creation, so a
/// reverting constructor surfaces here as an RPC error.
pub async fn estimate_gas(
    client: &reqwest::Client,
    url: &str,
    from: &Address,
    input: &Bytes,
) -> Result<u64, anyhow::Error> {
    let result: String = json_rpc_call(
        client,
        url,
        "eth_estimateGas",
        vec![serde_json::json!({
            "from": from,
            "data": input,
        })],
    )
    .await?;
    parse_hex_u64(&result).context("Failed to parse eth_estimateGas result")
}

/// Submit a signed raw transaction, returning the transaction hash the node
/// reports.
pub async fn send_raw_transaction(
    client: &reqwest::Client,
    url: &str,
    raw: &Bytes,
) -> Result<B256, anyhow::Error> {
    json_rpc_call(client, url, "eth_sendRawTransaction", vec![serde_json::json!(raw)]).await
}

/// Receipt of a mined transaction, reduced to the fields the harness reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    /// Hash of the mined transaction.
    pub transaction_hash: B256,
    /// Address of the created contract; present for creation transactions.
    pub contract_address: Option<Address>,
    /// Block the transaction was included in.
    #[serde(deserialize_with = "deserialize_u64_from_hex")]
    pub block_number: u64,
    /// 1 on success, 0 when the transaction reverted.
    #[serde(deserialize_with = "deserialize_u64_from_hex")]
    pub status: u64,
}

/// Fetch the receipt for `tx_hash`, or `None` while it is still pending.
pub async fn get_transaction_receipt(
    client: &reqwest::Client,
    url: &str,
    tx_hash: &B256,
) -> Result<Option<TransactionReceipt>, anyhow::Error> {
    json_rpc_call(
        client,
        url,
        "eth_getTransactionReceipt",
        vec![serde_json::json!(tx_hash)],
    )
    .await
}

/// Wait until `tx_hash` is mined by polling the endpoint on a fixed interval.
///
/// # Arguments
/// * `client` - The HTTP client to use
/// * `url` - The RPC endpoint URL
/// * `tx_hash` - Hash of the pending transaction
/// * `timeout_secs` - Maximum time to wait in seconds
///
/// # Returns
/// The receipt once the transaction is mined, or an error after timeout.
pub async fn wait_for_receipt(
    client: &reqwest::Client,
    url: &str,
    tx_hash: &B256,
    timeout_secs: u64,
) -> Result<TransactionReceipt, anyhow::Error> {
    let start = std::time::Instant::now();
    let max_duration = Duration::from_secs(timeout_secs);

    loop {
        if start.elapsed() > max_duration {
            anyhow::bail!("Timeout waiting for transaction {} to be mined", tx_hash);
        }

        match get_transaction_receipt(client, url, tx_hash).await {
            Ok(Some(receipt)) => return Ok(receipt),
            Ok(None) => {
                tracing::trace!(tx_hash = %tx_hash, "Transaction pending, retrying...");
            }
            Err(e) => {
                tracing::trace!(error = %e, tx_hash = %tx_hash, "Receipt query failed, retrying...");
            }
        }

        tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
    }
}

/// Parse a 0x-prefixed hex quantity into u64.
pub fn parse_hex_u64(s: &str) -> Result<u64, anyhow::Error> {
    u64::from_str_radix(s.trim_start_matches("0x"), 16)
        .with_context(|| format!("Invalid hex quantity: {}", s))
}

/// Parse a 0x-prefixed hex quantity into u128.
pub fn parse_hex_u128(s: &str) -> Result<u128, anyhow::Error> {
    u128::from_str_radix(s.trim_start_matches("0x"), 16)
        .with_context(|| format!("Invalid hex quantity: {}", s))
}

/// Deserialize a u64 from a hex quantity string (with 0x prefix).
fn deserialize_u64_from_hex<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    parse_hex_u64(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_u64() {
        assert_eq!(parse_hex_u64("0x0").unwrap(), 0);
        assert_eq!(parse_hex_u64("0x5").unwrap(), 5);
        assert_eq!(parse_hex_u64("0x10").unwrap(), 16);
        assert_eq!(parse_hex_u64("ff").unwrap(), 255);
        assert!(parse_hex_u64("0xzz").is_err());
        assert!(parse_hex_u64("").is_err());
    }

    #[test]
    fn test_parse_hex_u128() {
        // 100 gwei, above u32 range.
        assert_eq!(parse_hex_u128("0x174876e800").unwrap(), 100_000_000_000);
        assert!(parse_hex_u128("0x").is_err());
    }

    #[test]
    fn test_receipt_deserialization() {
        let receipt: TransactionReceipt = serde_json::from_str(
            r#"{
                "transactionHash": "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b",
                "contractAddress": "0xb60e8dd61c5d32be8058bb8eb970870f07233155",
                "blockNumber": "0x9a1a5c",
                "status": "0x1",
                "gasUsed": "0x4dc"
            }"#,
        )
        .expect("Should deserialize");

        assert_eq!(receipt.status, 1);
        assert_eq!(receipt.block_number, 10_099_292);
        assert!(receipt.contract_address.is_some());
    }

    #[test]
    fn test_reverted_receipt_deserialization() {
        let receipt: TransactionReceipt = serde_json::from_str(
            r#"{
                "transactionHash": "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b",
                "contractAddress": null,
                "blockNumber": "0x1",
                "status": "0x0"
            }"#,
        )
        .expect("Should deserialize");

        assert_eq!(receipt.status, 0);
        assert!(receipt.contract_address.is_none());
    }

    #[test]
    fn test_pending_receipt_is_none() {
        // eth_getTransactionReceipt returns null while the tx is pending.
        let pending: Option<TransactionReceipt> =
            serde_json::from_value(Value::Null).expect("Null should deserialize to None");
        assert!(pending.is_none());
    }
}
