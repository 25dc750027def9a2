//! Confirmed chain events delivered to the controller.

use serde::{Deserialize, Serialize};

use crate::{receipt::ReceiptId, standard::TokenStandard, Address, U256};

/// Lock (or burn) of a foreign token, reported by the foreign event source
/// once it passed the configured confirmation threshold.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ForeignDeposit {
    pub standard: TokenStandard,
    pub foreign_token: Address,
    pub recipient: Address,
    pub amount: U256,
    pub instance_id: Option<U256>,
    pub receipt_id: ReceiptId,
    pub confirmations: u64,
}

/// Burn of a wrapped token on the local chain.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LocalBurn {
    pub local_token: Address,
    pub amount: U256,
    pub instance_id: Option<U256>,
    pub foreign_recipient: Address,
    /// Local chain nonce that orders this burn.
    pub local_nonce: u64,
}
