//! Mapping table preconditions shared by every backend.

use tokenbridge_primitives::{
    mapping::TokenMappingEntry, standard::TokenStandard, supply::SupplyKey, Address, U256,
};

use crate::types::MappingInsert;

/// Returns the aggregate supply key whose balance must be read before
/// [`check_mapping_insert`] can decide, if any.
///
/// That is the local token of a tombstone being replaced by a different one.
pub fn replaced_local_supply_key(
    existing: Option<&TokenMappingEntry>,
    new_local_token: Address,
) -> Option<SupplyKey> {
    existing
        .filter(|e| !e.is_active() && e.mapping.local_token() != new_local_token)
        .map(|e| SupplyKey::aggregate(e.mapping.local_token()))
}

/// Checks whether `new` may be inserted.
///
/// On success returns the local token whose index entry has to be dropped
/// because the tombstone it belonged to gets replaced.
pub fn check_mapping_insert(
    existing: Option<&TokenMappingEntry>,
    local_owner: Option<(TokenStandard, Address)>,
    new: &TokenMappingEntry,
    replaced_outstanding: U256,
) -> Result<Option<Address>, MappingInsert> {
    let key = (new.mapping.standard(), new.mapping.foreign_token());
    let new_local = new.mapping.local_token();

    if existing.is_some_and(|e| e.is_active()) {
        return Err(MappingInsert::AlreadyMapped);
    }

    if let Some(owner) = local_owner {
        if owner != key {
            return Err(MappingInsert::LocalTokenInUse {
                standard: owner.0,
                foreign_token: owner.1,
            });
        }
    }

    match replaced_local_supply_key(existing, new_local) {
        Some(prev) if !replaced_outstanding.is_zero() => Err(MappingInsert::OrphanedSupply {
            previous_local_token: prev.local_token,
            outstanding: replaced_outstanding,
        }),
        Some(prev) => Ok(Some(prev.local_token)),
        None => Ok(None),
    }
}
