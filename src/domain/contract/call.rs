//! Contract call description with exact argument order and types.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::abi;
use crate::domain::AppError;

/// 20-byte EVM account or contract address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    pub const ZERO: Address = Address([0u8; 20]);
}

impl FromStr for Address {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .filter(|digits| digits.len() == 40)
            .ok_or_else(|| AppError::InvalidAddress(value.to_string()))?;
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|_| AppError::InvalidAddress(value.to_string()))?;
        Ok(Address(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Transaction hash as returned by the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TxHash(pub String);

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One ABI-typed call argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AbiValue {
    Address(Address),
    /// Unsigned integer encoded as `uint256`.
    Uint(u128),
    Bool(bool),
    String(String),
    AddressArray(Vec<Address>),
}

impl AbiValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            AbiValue::Address(_) => "address",
            AbiValue::Uint(_) => "uint256",
            AbiValue::Bool(_) => "bool",
            AbiValue::String(_) => "string",
            AbiValue::AddressArray(_) => "address[]",
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, AbiValue::String(_) | AbiValue::AddressArray(_))
    }
}

impl fmt::Display for AbiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiValue::Address(address) => write!(f, "{}", address),
            AbiValue::Uint(value) => write!(f, "{}", value),
            AbiValue::Bool(value) => write!(f, "{}", value),
            AbiValue::String(value) => write!(f, "{:?}", value),
            AbiValue::AddressArray(items) => {
                let items: Vec<String> = items.iter().map(Address::to_string).collect();
                write!(f, "[{}]", items.join(", "))
            }
        }
    }
}

/// A contract function invocation: name, ordered arguments, attached value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractCall {
    pub function: &'static str,
    pub args: Vec<AbiValue>,
    /// Native value attached to the call, in wei.
    pub value: u128,
}

impl ContractCall {
    pub fn new(function: &'static str, args: Vec<AbiValue>) -> Self {
        Self { function, args, value: 0 }
    }

    pub fn with_value(mut self, value: u128) -> Self {
        self.value = value;
        self
    }

    /// Canonical signature, e.g. `createProject(string,...,bool)`.
    pub fn signature(&self) -> String {
        let types: Vec<&str> = self.args.iter().map(AbiValue::type_name).collect();
        format!("{}({})", self.function, types.join(","))
    }

    /// Selector followed by the encoded arguments.
    pub fn calldata(&self) -> Vec<u8> {
        let mut data = abi::selector(&self.signature()).to_vec();
        data.extend(abi::encode_args(&self.args));
        data
    }
}
