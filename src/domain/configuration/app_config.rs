//! Application configuration models loaded from `sovseas.toml`.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;
use crate::domain::contract::Address;

/// Top-level configuration. Every section is optional in the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub ipfs: IpfsConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
}

impl AppConfig {
    /// Parse and validate TOML configuration content.
    pub fn parse(content: &str) -> Result<Self, AppError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.network.validate()?;
        self.ipfs.validate()?;
        self.submission.validate()?;
        Ok(())
    }

    /// Configured contract address, required for anything that touches the chain.
    pub fn contract_address(&self) -> Result<Address, AppError> {
        let raw = self.network.contract_address.as_deref().ok_or_else(|| {
            AppError::config_error(
                "Contract address is not configured. Set [network].contract_address or SOVSEAS_CONTRACT_ADDRESS.",
            )
        })?;
        raw.parse()
    }
}

/// Chain and JSON-RPC settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkConfig {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: Url,
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    #[serde(default = "default_chain_name")]
    pub chain_name: String,
    /// Platform contract receiving create calls.
    #[serde(default)]
    pub contract_address: Option<String>,
    /// Sending account; the node's first unlocked account when unset.
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    #[serde(default = "default_receipt_timeout")]
    pub receipt_timeout_secs: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            chain_id: default_chain_id(),
            chain_name: default_chain_name(),
            contract_address: None,
            account: None,
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            receipt_timeout_secs: default_receipt_timeout(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl NetworkConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.chain_id == 0 {
            return Err(AppError::InvalidConfig("chain_id must be greater than 0".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig("timeout_secs must be greater than 0".to_string()));
        }
        if self.max_retries == 0 {
            return Err(AppError::InvalidConfig("max_retries must be greater than 0".to_string()));
        }
        if self.retry_delay_ms == 0 {
            return Err(AppError::InvalidConfig(
                "retry_delay_ms must be greater than 0".to_string(),
            ));
        }
        if self.receipt_timeout_secs == 0 {
            return Err(AppError::InvalidConfig(
                "receipt_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.poll_interval_ms == 0 {
            return Err(AppError::InvalidConfig(
                "poll_interval_ms must be greater than 0".to_string(),
            ));
        }
        for (name, value) in [("contract_address", &self.contract_address), ("account", &self.account)]
        {
            if let Some(value) = value
                && value.parse::<Address>().is_err()
            {
                return Err(AppError::InvalidConfig(format!(
                    "{} must be a 0x-prefixed 20-byte address, got '{}'",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// IPFS pinning service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IpfsConfig {
    #[serde(default = "default_ipfs_api_url")]
    pub api_url: Url,
    /// Prefix joined with the returned content hash.
    #[serde(default = "default_gateway_url")]
    pub gateway_url: Url,
    #[serde(default = "default_upload_timeout")]
    pub timeout_secs: u64,
}

impl Default for IpfsConfig {
    fn default() -> Self {
        Self {
            api_url: default_ipfs_api_url(),
            gateway_url: default_gateway_url(),
            timeout_secs: default_upload_timeout(),
        }
    }
}

impl IpfsConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig(
                "ipfs.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if !self.gateway_url.as_str().ends_with('/') {
            return Err(AppError::InvalidConfig("gateway_url must end with '/'".to_string()));
        }
        Ok(())
    }
}

/// Submission flow settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubmissionConfig {
    /// Pause after success before the destination is resolved.
    #[serde(default = "default_redirect_delay")]
    pub redirect_delay_secs: u64,
    #[serde(default = "default_true")]
    pub wait_for_receipt: bool,
    /// Creation fees in wei; a decimal string covers values beyond TOML's integer range.
    #[serde(default = "default_campaign_fee", with = "wei_amount")]
    pub campaign_fee_wei: u128,
    #[serde(default = "default_project_fee", with = "wei_amount")]
    pub project_fee_wei: u128,
    /// Token used when a campaign leaves payout or fee token blank.
    #[serde(default = "default_token")]
    pub default_token: String,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            redirect_delay_secs: default_redirect_delay(),
            wait_for_receipt: default_true(),
            campaign_fee_wei: default_campaign_fee(),
            project_fee_wei: default_project_fee(),
            default_token: default_token(),
        }
    }
}

impl SubmissionConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.default_token.parse::<Address>().is_err() {
            return Err(AppError::InvalidConfig(format!(
                "default_token must be a 0x-prefixed 20-byte address, got '{}'",
                self.default_token
            )));
        }
        Ok(())
    }

    pub fn default_token_address(&self) -> Result<Address, AppError> {
        self.default_token.parse()
    }
}

fn default_rpc_url() -> Url {
    Url::parse("https://forno.celo.org").expect("Default RPC URL must be valid")
}

fn default_chain_id() -> u64 {
    42220
}

fn default_chain_name() -> String {
    "Celo".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_receipt_timeout() -> u64 {
    120
}

fn default_poll_interval_ms() -> u64 {
    2000
}

fn default_ipfs_api_url() -> Url {
    Url::parse("https://api.pinata.cloud/pinning/pinFileToIPFS")
        .expect("Default IPFS API URL must be valid")
}

fn default_gateway_url() -> Url {
    Url::parse("https://gateway.pinata.cloud/ipfs/").expect("Default gateway URL must be valid")
}

fn default_upload_timeout() -> u64 {
    60
}

fn default_redirect_delay() -> u64 {
    3
}

fn default_true() -> bool {
    true
}

fn default_campaign_fee() -> u128 {
    2_000_000_000_000_000_000
}

fn default_project_fee() -> u128 {
    500_000_000_000_000_000
}

fn default_token() -> String {
    "0x471EcE3750Da237f93B8E339c536989b8978a438".to_string()
}

/// Wei amounts written either as a TOML integer or as a decimal string.
mod wei_amount {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Integer(u64),
        Decimal(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u128, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Integer(value) => Ok(u128::from(value)),
            Raw::Decimal(text) => text.trim().parse::<u128>().map_err(|_| {
                D::Error::custom(format!("expected a whole number of wei, got '{}'", text))
            }),
        }
    }

    pub fn serialize<S>(value: &u128, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }
}
