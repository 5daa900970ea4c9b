//! Solidity ABI encoding for the argument types the forms submit.

use sha3::{Digest, Keccak256};

use super::call::{AbiValue, Address};
use crate::domain::AppError;

const WORD: usize = 32;

/// First four bytes of the keccak-256 hash of a canonical signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = Keccak256::digest(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Head/tail encoding of a flat argument tuple.
pub fn encode_args(args: &[AbiValue]) -> Vec<u8> {
    let mut head = Vec::with_capacity(args.len() * WORD);
    let mut tail = Vec::new();
    let head_len = args.len() * WORD;

    for arg in args {
        match arg {
            AbiValue::Address(address) => head.extend(address_word(address)),
            AbiValue::Uint(value) => head.extend(uint_word(*value)),
            AbiValue::Bool(flag) => head.extend(uint_word(u128::from(*flag))),
            AbiValue::String(text) => {
                head.extend(uint_word((head_len + tail.len()) as u128));
                tail.extend(uint_word(text.len() as u128));
                tail.extend(padded(text.as_bytes()));
            }
            AbiValue::AddressArray(items) => {
                head.extend(uint_word((head_len + tail.len()) as u128));
                tail.extend(uint_word(items.len() as u128));
                for item in items {
                    tail.extend(address_word(item));
                }
            }
        }
    }

    head.extend(tail);
    head
}

/// Decode a single `uint256` return value that fits in 128 bits.
pub fn decode_uint(data: &[u8]) -> Result<u128, AppError> {
    let word = data
        .get(..WORD)
        .ok_or_else(|| AppError::Abi(format!("expected 32-byte word, got {} bytes", data.len())))?;
    if word[..16].iter().any(|byte| *byte != 0) {
        return Err(AppError::Abi("uint256 value exceeds 128 bits".into()));
    }
    let mut low = [0u8; 16];
    low.copy_from_slice(&word[16..]);
    Ok(u128::from_be_bytes(low))
}

/// `0x`-prefixed lowercase hex.
pub fn to_hex(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

/// Decode `0x`-prefixed hex; an empty `0x` yields no bytes.
pub fn from_hex(value: &str) -> Result<Vec<u8>, AppError> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(digits).map_err(|e| AppError::Abi(format!("invalid hex '{}': {}", value, e)))
}

/// Minimal `0x` quantity encoding used by JSON-RPC (`0x0`, `0x1bc16d674ec80000`).
pub fn to_quantity(value: u128) -> String {
    format!("{:#x}", value)
}

pub fn parse_quantity(value: &str) -> Result<u128, AppError> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    u128::from_str_radix(digits, 16)
        .map_err(|e| AppError::Abi(format!("invalid quantity '{}': {}", value, e)))
}

fn uint_word(value: u128) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

fn address_word(address: &Address) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[12..].copy_from_slice(&address.0);
    word
}

fn padded(bytes: &[u8]) -> Vec<u8> {
    let mut out = bytes.to_vec();
    let remainder = out.len() % WORD;
    if remainder != 0 {
        out.resize(out.len() + WORD - remainder, 0);
    }
    out
}
