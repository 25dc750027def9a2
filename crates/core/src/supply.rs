//! Outstanding supply of wrapped tokens.

use std::{fmt, sync::Arc};

use tokenbridge_db_types::{traits::SupplyDatabase, types::SupplyUpdate};
use tokenbridge_primitives::{supply::SupplyKey, Address, U256};

use crate::errors::{BridgeError, BridgeResult};

/// Per local token (and per instance) counters of wrapped supply that can
/// still be burned back to the foreign chain.
pub struct SupplyTracker {
    db: Arc<dyn SupplyDatabase>,
}

impl fmt::Debug for SupplyTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupplyTracker").finish_non_exhaustive()
    }
}

impl SupplyTracker {
    pub fn new(db: Arc<impl SupplyDatabase>) -> Self {
        Self { db }
    }

    /// Increases the counter, returning its new balance.
    pub fn credit(&self, key: SupplyKey, amount: U256) -> BridgeResult<U256> {
        let update = self.db.credit_supply(key, amount, None)?;
        supply_update_result(key, amount, update)
    }

    /// Decreases the counter, returning its new balance. Fails without
    /// touching state if the counter holds less than `amount`.
    pub fn debit(&self, key: SupplyKey, amount: U256) -> BridgeResult<U256> {
        let update = self.db.debit_supply(key, amount)?;
        supply_update_result(key, amount, update)
    }

    /// Outstanding supply of one instance, or of the whole token if
    /// `instance_id` is `None`.
    pub fn balance_of(&self, local_token: Address, instance_id: Option<U256>) -> BridgeResult<U256> {
        Ok(self.db.get_supply(SupplyKey::new(local_token, instance_id))?)
    }
}

/// Maps a supply update outcome onto the bridge error space.
pub(crate) fn supply_update_result(
    key: SupplyKey,
    requested: U256,
    update: SupplyUpdate,
) -> BridgeResult<U256> {
    match update {
        SupplyUpdate::Applied { balance } => Ok(balance),
        SupplyUpdate::Insufficient { available } => Err(BridgeError::InsufficientSupply {
            requested,
            available,
        }),
        SupplyUpdate::Overflow => Err(BridgeError::SupplyOverflow(key)),
        SupplyUpdate::CapExceeded { .. } => Err(BridgeError::InstanceAlreadyMinted {
            local_token: key.local_token,
            instance_id: key.instance_id.unwrap_or_default(),
        }),
    }
}
