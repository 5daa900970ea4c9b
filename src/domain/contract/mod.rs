pub mod abi;
mod call;

pub use call::{AbiValue, Address, ContractCall, TxHash};
