//! Wallet and chain capability ports.

use std::fmt;

use crate::domain::{Address, AppError};

/// Chain the platform contract lives on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainDescriptor {
    pub id: u64,
    pub name: String,
}

impl fmt::Display for ChainDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Port for keeping the wallet on the configured chain.
pub trait ChainGuard {
    fn target_chain(&self) -> ChainDescriptor;

    /// Switch to the target chain if the wallet is elsewhere.
    fn ensure_correct_chain(&self) -> Result<(), AppError>;
}

/// Port exposing the connected wallet.
pub trait WalletSession {
    /// Connected account, or `None` when no wallet is available.
    fn address(&self) -> Result<Option<Address>, AppError>;

    fn is_connected(&self) -> bool {
        matches!(self.address(), Ok(Some(_)))
    }
}
