use std::sync::Mutex;

use crate::domain::{Address, AppError};
use crate::ports::{ChainDescriptor, ChainGuard, WalletSession};

/// Wallet plus chain guard with a scripted switch result.
pub struct FakeChain {
    pub account: Option<Address>,
    pub switch_error: Option<String>,
    pub switch_calls: Mutex<usize>,
}

impl FakeChain {
    pub fn connected() -> Self {
        Self { account: Some(Address([0xaa; 20])), switch_error: None, switch_calls: Mutex::new(0) }
    }

    pub fn disconnected() -> Self {
        Self { account: None, ..Self::connected() }
    }

    pub fn rejecting_switch(message: impl Into<String>) -> Self {
        Self { switch_error: Some(message.into()), ..Self::connected() }
    }

    pub fn switch_count(&self) -> usize {
        *self.switch_calls.lock().unwrap()
    }
}

impl ChainGuard for FakeChain {
    fn target_chain(&self) -> ChainDescriptor {
        ChainDescriptor { id: 42220, name: "Celo".to_string() }
    }

    fn ensure_correct_chain(&self) -> Result<(), AppError> {
        *self.switch_calls.lock().unwrap() += 1;
        match &self.switch_error {
            Some(message) => Err(AppError::Chain(message.clone())),
            None => Ok(()),
        }
    }
}

impl WalletSession for FakeChain {
    fn address(&self) -> Result<Option<Address>, AppError> {
        Ok(self.account)
    }
}
