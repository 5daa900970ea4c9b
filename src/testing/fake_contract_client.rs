use std::sync::Mutex;

use crate::app::CancelToken;
use crate::domain::contract::abi;
use crate::domain::{AbiValue, AppError, ContractCall, TxHash};
use crate::ports::{ContractClient, TxReceipt};

/// Records every call; write, receipt, and count results are scripted.
pub struct FakeContractClient {
    pub written: Mutex<Vec<ContractCall>>,
    pub reads: Mutex<Vec<ContractCall>>,
    pub receipts: Mutex<Vec<TxHash>>,
    pub write_error: Option<String>,
    pub receipt_error: Option<String>,
    /// `None` makes count reads fail.
    pub item_count: Option<u128>,
    /// Cancelled as soon as a write is sent.
    pub cancel_on_write: Option<CancelToken>,
}

impl FakeContractClient {
    pub fn new() -> Self {
        Self {
            written: Mutex::new(Vec::new()),
            reads: Mutex::new(Vec::new()),
            receipts: Mutex::new(Vec::new()),
            write_error: None,
            receipt_error: None,
            item_count: Some(3),
            cancel_on_write: None,
        }
    }

    pub fn written_calls(&self) -> Vec<ContractCall> {
        self.written.lock().unwrap().clone()
    }

    pub fn receipt_count(&self) -> usize {
        self.receipts.lock().unwrap().len()
    }
}

impl ContractClient for FakeContractClient {
    fn write_contract(&self, call: &ContractCall) -> Result<TxHash, AppError> {
        self.written.lock().unwrap().push(call.clone());
        if let Some(token) = &self.cancel_on_write {
            token.cancel();
        }
        match &self.write_error {
            Some(message) => Err(AppError::Contract(message.clone())),
            None => Ok(TxHash("0xfeed".to_string())),
        }
    }

    fn read_contract(&self, call: &ContractCall) -> Result<Vec<u8>, AppError> {
        self.reads.lock().unwrap().push(call.clone());
        let count = self
            .item_count
            .ok_or_else(|| AppError::Http("network request failed: connection refused".into()))?;
        Ok(abi::encode_args(&[AbiValue::Uint(count)]))
    }

    fn wait_for_receipt(&self, tx_hash: &TxHash) -> Result<TxReceipt, AppError> {
        self.receipts.lock().unwrap().push(tx_hash.clone());
        match &self.receipt_error {
            Some(message) => Err(AppError::Contract(message.clone())),
            None => Ok(TxReceipt { tx_hash: tx_hash.clone(), block_number: 1 }),
        }
    }
}
