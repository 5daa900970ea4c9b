//! Contract client port definition.

use crate::domain::{AppError, ContractCall, TxHash};

/// Mined transaction receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: TxHash,
    pub block_number: u64,
}

/// Port for contract reads and writes.
pub trait ContractClient {
    /// Send a state-changing call and return its transaction hash.
    fn write_contract(&self, call: &ContractCall) -> Result<TxHash, AppError>;

    /// Execute a read-only call and return the raw return data.
    fn read_contract(&self, call: &ContractCall) -> Result<Vec<u8>, AppError>;

    /// Block until the transaction is mined. A reverted transaction is an error.
    fn wait_for_receipt(&self, tx_hash: &TxHash) -> Result<TxReceipt, AppError>;
}
