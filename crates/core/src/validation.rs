//! Standard specific checks applied to every mint and burn.

use tokenbridge_primitives::{standard::TokenStandard, U256};

use crate::errors::{BridgeError, BridgeResult};

/// Checks the amount and instance of a transfer against the rules of its
/// standard.
pub fn validate_transfer(
    standard: TokenStandard,
    amount: U256,
    instance_id: Option<U256>,
) -> BridgeResult<()> {
    let invalid = |reason| BridgeError::InvalidAmount { standard, reason };

    match (standard.requires_instance(), instance_id) {
        (true, None) => return Err(invalid("instance id required")),
        (false, Some(_)) => return Err(invalid("fungible transfers carry no instance id")),
        _ => {}
    }

    match standard {
        TokenStandard::NonFungible if amount != U256::from(1) => {
            Err(invalid("amount must be exactly one"))
        }
        _ if amount.is_zero() => Err(invalid("amount must be positive")),
        _ => Ok(()),
    }
}

/// Upper bound on the outstanding supply of a single instance.
pub fn instance_cap(standard: TokenStandard) -> Option<U256> {
    match standard {
        TokenStandard::NonFungible => Some(U256::from(1)),
        TokenStandard::Fungible | TokenStandard::MultiToken => None,
    }
}
