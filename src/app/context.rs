use crate::ports::{ChainGuard, Clock, ContractClient, MediaStore, WalletSession};

/// Capabilities a submission needs, passed in explicitly.
#[derive(Clone, Copy)]
pub struct SubmissionContext<'a> {
    pub wallet: &'a dyn WalletSession,
    pub chain: &'a dyn ChainGuard,
    pub contract: &'a dyn ContractClient,
    pub media: &'a dyn MediaStore,
    pub clock: &'a dyn Clock,
}

impl<'a> SubmissionContext<'a> {
    pub fn new(
        wallet: &'a dyn WalletSession,
        chain: &'a dyn ChainGuard,
        contract: &'a dyn ContractClient,
        media: &'a dyn MediaStore,
        clock: &'a dyn Clock,
    ) -> Self {
        Self { wallet, chain, contract, media, clock }
    }
}
