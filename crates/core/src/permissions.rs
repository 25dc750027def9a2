//! Guardian permissions.

use std::{fmt, sync::Arc};

use tokenbridge_db_types::{traits::GuardianDatabase, types::GuardianRemoval, DbError};
use tokenbridge_primitives::{guardian::GuardianSet, Address};
use tracing::{info, warn};

use crate::errors::{BridgeError, BridgeResult};

/// Set of addresses allowed to mutate bridge state.
///
/// Membership changes are applied by the database in one atomic step, so
/// concurrent `deny` calls can never empty the set.
pub struct PermissionRegistry {
    db: Arc<dyn GuardianDatabase>,
}

impl fmt::Debug for PermissionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermissionRegistry").finish_non_exhaustive()
    }
}

impl PermissionRegistry {
    pub fn new(db: Arc<impl GuardianDatabase>) -> Self {
        Self { db }
    }

    /// Writes the initial guardian set.
    pub(crate) fn init(&self, guardians: impl IntoIterator<Item = Address>) -> BridgeResult<()> {
        let set = GuardianSet::new(guardians);
        if set.is_empty() {
            return Err(BridgeError::EmptyGuardianSet);
        }

        let count = set.len();
        match self.db.init_guardian_set(set) {
            Ok(()) => {
                info!(%count, "initialized guardian set");
                Ok(())
            }
            Err(DbError::EntryAlreadyExists) => Err(BridgeError::AlreadyInitialized),
            Err(e) => Err(e.into()),
        }
    }

    pub fn is_initialized(&self) -> BridgeResult<bool> {
        Ok(self.db.get_guardian_set()?.is_some())
    }

    pub fn is_guardian(&self, addr: Address) -> BridgeResult<bool> {
        Ok(self
            .db
            .get_guardian_set()?
            .is_some_and(|set| set.contains(&addr)))
    }

    pub fn guardians(&self) -> BridgeResult<Vec<Address>> {
        Ok(self
            .db
            .get_guardian_set()?
            .map(|set| set.to_vec())
            .unwrap_or_default())
    }

    /// Fails with [`BridgeError::Unauthorized`] unless `caller` is a guardian.
    pub fn ensure_guardian(&self, caller: Address) -> BridgeResult<()> {
        if !self.is_guardian(caller)? {
            warn!(%caller, "rejected call from non-guardian");
            return Err(BridgeError::Unauthorized(caller));
        }
        Ok(())
    }

    /// Grants guardian rights to `target`. Returns whether it was newly added.
    pub(crate) fn rely(&self, caller: Address, target: Address) -> BridgeResult<bool> {
        self.ensure_guardian(caller)?;
        let added = self.db.add_guardian(target).map_err(not_initialized)?;
        if added {
            info!(%caller, %target, "added guardian");
        }
        Ok(added)
    }

    /// Revokes guardian rights of `target`. Returns whether it was a member.
    pub(crate) fn deny(&self, caller: Address, target: Address) -> BridgeResult<bool> {
        self.ensure_guardian(caller)?;
        match self.db.remove_guardian(target).map_err(not_initialized)? {
            GuardianRemoval::Removed => {
                info!(%caller, %target, "removed guardian");
                Ok(true)
            }
            GuardianRemoval::NotMember => Ok(false),
            GuardianRemoval::LastMember => {
                warn!(%caller, %target, "refused to remove last guardian");
                Err(BridgeError::LastGuardian(target))
            }
        }
    }
}

fn not_initialized(e: DbError) -> BridgeError {
    match e {
        DbError::NotBootstrapped => BridgeError::NotInitialized,
        e => e.into(),
    }
}
