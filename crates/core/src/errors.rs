use thiserror::Error;
use tokenbridge_db_types::DbError;
use tokenbridge_primitives::{
    receipt::ReceiptId, standard::TokenStandard, supply::SupplyKey, Address, U256,
};

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("caller {0} is not a guardian")]
    Unauthorized(Address),

    #[error("guardian set must not be empty")]
    EmptyGuardianSet,

    #[error("guardian set already initialized")]
    AlreadyInitialized,

    #[error("guardian set not initialized")]
    NotInitialized,

    #[error("refusing to remove {0}, the last guardian")]
    LastGuardian(Address),

    #[error("{standard} token {foreign_token} is already mapped or reserved")]
    DuplicateMapping {
        standard: TokenStandard,
        foreign_token: Address,
    },

    /// No active mapping for the token, which is a foreign token for
    /// deposits and administrative calls and a local token for burns.
    #[error("no active mapping for token {0}")]
    UnknownMapping(Address),

    #[error("reservation {0} is unknown or was released")]
    UnknownReservation(u64),

    #[error("local token {local_token} already backs the mapping of {foreign_token}")]
    LocalTokenInUse {
        local_token: Address,
        foreign_token: Address,
    },

    #[error("previous local token {previous_local_token} still has {outstanding} outstanding")]
    OrphanedSupply {
        previous_local_token: Address,
        outstanding: U256,
    },

    #[error("outstanding supply is {actual}, caller expected {expected}")]
    SupplyMismatch { expected: U256, actual: U256 },

    #[error("cannot debit {requested}, only {available} outstanding")]
    InsufficientSupply { requested: U256, available: U256 },

    #[error("supply counter {0} would overflow")]
    SupplyOverflow(SupplyKey),

    #[error("invalid {standard} transfer: {reason}")]
    InvalidAmount {
        standard: TokenStandard,
        reason: &'static str,
    },

    #[error("instance {instance_id} of {local_token} is already minted")]
    InstanceAlreadyMinted {
        local_token: Address,
        instance_id: U256,
    },

    #[error("receipt {0} was already consumed")]
    DuplicateReceipt(ReceiptId),

    #[error("token deployment failed: {0}")]
    DeploymentFailed(String),

    #[error("db: {0}")]
    Db(#[from] DbError),
}

impl BridgeError {
    /// Whether the error only reports a replayed deposit. Replays change no
    /// state and are safe to ignore for callers that redeliver events.
    pub fn is_replay(&self) -> bool {
        matches!(self, Self::DuplicateReceipt(_))
    }
}

pub type BridgeResult<T> = Result<T, BridgeError>;
