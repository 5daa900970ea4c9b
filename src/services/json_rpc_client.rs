//! Chain, wallet, and contract access over Ethereum JSON-RPC using reqwest.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};
use url::Url;

use crate::domain::contract::abi;
use crate::domain::{Address, AppError, ContractCall, NetworkConfig, TxHash};
use crate::ports::{ChainDescriptor, ChainGuard, ContractClient, TxReceipt, WalletSession};

/// JSON-RPC client bound to one node, one chain, and one contract.
pub struct JsonRpcClient {
    rpc_url: Url,
    chain: ChainDescriptor,
    contract: Address,
    account: Option<Address>,
    max_retries: u32,
    retry_delay_ms: u64,
    receipt_timeout: Duration,
    poll_interval: Duration,
    next_id: AtomicU64,
    client: Client,
}

impl std::fmt::Debug for JsonRpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonRpcClient")
            .field("rpc_url", &self.rpc_url)
            .field("chain", &self.chain)
            .field("contract", &self.contract)
            .field("account", &self.account)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: &'a JsonValue,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<JsonValue>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReceiptObject {
    #[serde(default)]
    status: Option<String>,
    block_number: String,
}

impl JsonRpcClient {
    pub fn new(config: &NetworkConfig, contract: Address) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;
        let account = config.account.as_deref().map(str::parse).transpose()?;

        Ok(Self {
            rpc_url: config.rpc_url.clone(),
            chain: ChainDescriptor { id: config.chain_id, name: config.chain_name.clone() },
            contract,
            account,
            max_retries: config.max_retries,
            retry_delay_ms: config.retry_delay_ms,
            receipt_timeout: Duration::from_secs(config.receipt_timeout_secs),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            next_id: AtomicU64::new(1),
            client,
        })
    }

    /// Issue a read-only request, retrying on rate limits and server errors.
    fn request(&self, method: &str, params: JsonValue) -> Result<JsonValue, AppError> {
        let mut last_error = None;
        let max_attempts = self.max_retries.max(1);

        for attempt in 0..max_attempts {
            if attempt > 0 {
                let delay = self.retry_delay_ms * 2_u64.pow(attempt.saturating_sub(1));
                std::thread::sleep(Duration::from_millis(delay));
                log::warn!("Retrying {} (attempt {}/{})", method, attempt + 1, max_attempts);
            }

            match self.send_once(method, &params) {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if Self::is_retryable(&e) {
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| AppError::Http("Request failed after all retries".into())))
    }

    fn send_once(&self, method: &str, params: &JsonValue) -> Result<JsonValue, AppError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        log::debug!("JSON-RPC {} {}", method, params);

        let response = self
            .client
            .post(self.rpc_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .map_err(|e| AppError::Http(format!("network request failed: {}", e)))?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(AppError::Http("Rate limited (429)".into()));
        }
        if status.is_server_error() {
            return Err(AppError::Http(format!("Server error ({})", status.as_u16())));
        }
        if !status.is_success() {
            let error_text = response.text().unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Http(format!("RPC endpoint ({}): {}", status.as_u16(), error_text)));
        }

        let body: RpcResponse = response
            .json()
            .map_err(|e| AppError::Http(format!("Failed to parse response: {}", e)))?;
        if let Some(error) = body.error {
            return Err(AppError::Rpc { code: error.code, message: error.message });
        }
        Ok(body.result.unwrap_or(JsonValue::Null))
    }

    fn is_retryable(error: &AppError) -> bool {
        match error {
            AppError::Http(msg) => msg.contains("429") || msg.contains("Server error"),
            _ => false,
        }
    }

    fn chain_id(&self) -> Result<u64, AppError> {
        let value = self.request("eth_chainId", json!([]))?;
        let quantity = value
            .as_str()
            .ok_or_else(|| AppError::Chain(format!("unexpected eth_chainId result: {}", value)))?;
        u64::try_from(abi::parse_quantity(quantity)?)
            .map_err(|_| AppError::Chain(format!("chain id {} out of range", quantity)))
    }

    fn sender(&self) -> Result<Address, AppError> {
        self.address()?.ok_or(AppError::WalletNotConnected)
    }
}

impl ChainGuard for JsonRpcClient {
    fn target_chain(&self) -> ChainDescriptor {
        self.chain.clone()
    }

    fn ensure_correct_chain(&self) -> Result<(), AppError> {
        let current = self.chain_id()?;
        if current == self.chain.id {
            return Ok(());
        }

        log::info!("Connected to chain {}, switching to {}", current, self.chain);
        let switch = self.send_once(
            "wallet_switchEthereumChain",
            &json!([{ "chainId": abi::to_quantity(u128::from(self.chain.id)) }]),
        );
        if let Err(e) = switch {
            return Err(AppError::Chain(format!(
                "connected to chain {} but {} is required; switch failed: {}",
                current, self.chain, e
            )));
        }

        let switched = self.chain_id()?;
        if switched != self.chain.id {
            return Err(AppError::Chain(format!(
                "still on chain {} after switching to {}",
                switched, self.chain
            )));
        }
        Ok(())
    }
}

impl WalletSession for JsonRpcClient {
    fn address(&self) -> Result<Option<Address>, AppError> {
        if let Some(account) = self.account {
            return Ok(Some(account));
        }
        let accounts = self.request("eth_accounts", json!([]))?;
        accounts
            .as_array()
            .and_then(|items| items.first())
            .and_then(JsonValue::as_str)
            .map(str::parse)
            .transpose()
    }
}

impl ContractClient for JsonRpcClient {
    fn write_contract(&self, call: &ContractCall) -> Result<TxHash, AppError> {
        let from = self.sender()?;
        let transaction = json!({
            "from": from.to_string(),
            "to": self.contract.to_string(),
            "data": abi::to_hex(&call.calldata()),
            "value": abi::to_quantity(call.value),
        });

        log::info!("Sending {} to {}", call.signature(), self.contract);
        // Never retried: a repeated send could create a duplicate item.
        let result = self.send_once("eth_sendTransaction", &json!([transaction]))?;
        result
            .as_str()
            .map(|hash| TxHash(hash.to_string()))
            .ok_or_else(|| AppError::Contract(format!("unexpected transaction hash: {}", result)))
    }

    fn read_contract(&self, call: &ContractCall) -> Result<Vec<u8>, AppError> {
        let request = json!({
            "to": self.contract.to_string(),
            "data": abi::to_hex(&call.calldata()),
        });
        let result = self.request("eth_call", json!([request, "latest"]))?;
        let data = result
            .as_str()
            .ok_or_else(|| AppError::Contract(format!("unexpected eth_call result: {}", result)))?;
        abi::from_hex(data)
    }

    fn wait_for_receipt(&self, tx_hash: &TxHash) -> Result<TxReceipt, AppError> {
        let deadline = Instant::now() + self.receipt_timeout;
        loop {
            let result = self.request("eth_getTransactionReceipt", json!([tx_hash.0]))?;
            if !result.is_null() {
                let receipt: ReceiptObject = serde_json::from_value(result)?;
                if receipt.status.as_deref() == Some("0x0") {
                    return Err(AppError::Contract(format!("transaction {} reverted", tx_hash)));
                }
                let block_number = u64::try_from(abi::parse_quantity(&receipt.block_number)?)
                    .map_err(|_| AppError::Chain("block number out of range".into()))?;
                log::info!("Transaction {} mined in block {}", tx_hash, block_number);
                return Ok(TxReceipt { tx_hash: tx_hash.clone(), block_number });
            }
            if Instant::now() >= deadline {
                return Err(AppError::Chain(format!(
                    "timed out waiting for receipt of {}",
                    tx_hash
                )));
            }
            std::thread::sleep(self.poll_interval);
        }
    }
}
