//! Registry of foreign to local token mappings.

use std::{
    collections::HashMap,
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use parking_lot::Mutex;
use tokenbridge_db_types::{
    traits::{BridgeLedgerDatabase, TokenMappingDatabase},
    types::{MappingInsert, MappingRemoval},
};
use tokenbridge_primitives::{
    mapping::{TokenMapping, TokenMappingEntry},
    standard::{TokenMetadata, TokenStandard},
    keccak256, Address, B256, U256,
};
use tracing::{info, warn};

use crate::{
    errors::{BridgeError, BridgeResult},
    now_millis,
    permissions::PermissionRegistry,
};

/// Claim on a `(standard, foreign_token)` pair while its local token is being
/// deployed. Held in memory only.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reservation {
    id: u64,
    foreign_token: Address,
    metadata: TokenMetadata,
}

impl Reservation {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn standard(&self) -> TokenStandard {
        self.metadata.standard()
    }

    pub fn foreign_token(&self) -> Address {
        self.foreign_token
    }

    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }
}

/// Deploys the local counterpart of a foreign token.
///
/// Implementations talk to the local chain. They are called without any
/// bridge lock held.
pub trait TokenDeployer {
    fn deploy(&self, reservation: &Reservation) -> anyhow::Result<Address>;
}

/// Derives the address a CREATE2 factory deploys the local token to.
///
/// The salt commits to the standard and the foreign token, so every mapping
/// key has exactly one candidate address per factory and init code.
pub fn derive_local_address(
    factory: Address,
    init_code_hash: B256,
    standard: TokenStandard,
    foreign_token: Address,
) -> Address {
    let mut preimage = [0u8; 21];
    preimage[0] = standard.tag();
    preimage[1..].copy_from_slice(foreign_token.as_slice());
    let salt = keccak256(preimage);
    factory.create2(salt, init_code_hash)
}

/// [`TokenDeployer`] for factories that deploy to [`derive_local_address`].
/// It only computes the address, the deployment transaction itself is sent
/// by whoever executes the bridge instructions.
#[derive(Clone, Copy, Debug)]
pub struct Create2Deployer {
    pub factory: Address,
    pub init_code_hash: B256,
}

impl TokenDeployer for Create2Deployer {
    fn deploy(&self, reservation: &Reservation) -> anyhow::Result<Address> {
        Ok(derive_local_address(
            self.factory,
            self.init_code_hash,
            reservation.standard(),
            reservation.foreign_token(),
        ))
    }
}

type MappingKey = (TokenStandard, Address);

/// Authoritative mapping between foreign tokens and their local
/// counterparts, partitioned by token standard.
pub struct TokenMappingRegistry {
    permissions: Arc<PermissionRegistry>,
    mapping_db: Arc<dyn TokenMappingDatabase>,
    ledger_db: Arc<dyn BridgeLedgerDatabase>,
    reservations: Mutex<HashMap<MappingKey, u64>>,
    next_reservation: AtomicU64,
}

impl fmt::Debug for TokenMappingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenMappingRegistry")
            .field("reservations", &self.reservations.lock().len())
            .finish_non_exhaustive()
    }
}

impl TokenMappingRegistry {
    pub fn new(
        permissions: Arc<PermissionRegistry>,
        mapping_db: Arc<impl TokenMappingDatabase>,
        ledger_db: Arc<impl BridgeLedgerDatabase>,
    ) -> Self {
        Self {
            permissions,
            mapping_db,
            ledger_db,
            reservations: Mutex::new(HashMap::new()),
            next_reservation: AtomicU64::new(1),
        }
    }

    /// Claims `foreign_token` for the standard of `metadata` until the
    /// reservation is confirmed or released.
    pub(crate) fn reserve(
        &self,
        caller: Address,
        foreign_token: Address,
        metadata: TokenMetadata,
    ) -> BridgeResult<Reservation> {
        self.permissions.ensure_guardian(caller)?;
        let standard = metadata.standard();
        let duplicate = BridgeError::DuplicateMapping {
            standard,
            foreign_token,
        };

        let mut reservations = self.reservations.lock();
        if reservations.contains_key(&(standard, foreign_token)) {
            return Err(duplicate);
        }
        if self.lookup(standard, foreign_token)?.is_some() {
            return Err(duplicate);
        }

        let id = self.next_reservation.fetch_add(1, Ordering::Relaxed);
        reservations.insert((standard, foreign_token), id);
        Ok(Reservation {
            id,
            foreign_token,
            metadata,
        })
    }

    /// Drops a reservation, e.g. after a failed deployment. Unknown or
    /// already released reservations are ignored.
    pub(crate) fn release(&self, reservation: &Reservation) {
        let key = (reservation.standard(), reservation.foreign_token);
        let mut reservations = self.reservations.lock();
        if reservations.get(&key) == Some(&reservation.id) {
            reservations.remove(&key);
        }
    }

    /// Records the mapping of a reservation once its local token is known.
    pub(crate) fn confirm(
        &self,
        caller: Address,
        reservation: Reservation,
        local_token: Address,
    ) -> BridgeResult<TokenMapping> {
        self.permissions.ensure_guardian(caller)?;
        let key = (reservation.standard(), reservation.foreign_token);

        let mut reservations = self.reservations.lock();
        if reservations.get(&key) != Some(&reservation.id) {
            return Err(BridgeError::UnknownReservation(reservation.id));
        }

        let mapping = TokenMapping::new(
            reservation.foreign_token,
            local_token,
            reservation.metadata,
            now_millis(),
        );
        let res = self.insert(mapping);
        // A rejected confirm cannot succeed later with the same local token,
        // so the reservation is consumed either way.
        reservations.remove(&key);
        res
    }

    /// Runs the deployer for a reservation, releasing it on failure.
    pub(crate) fn deploy_reserved(
        &self,
        reservation: &Reservation,
        deployer: &impl TokenDeployer,
    ) -> BridgeResult<Address> {
        deployer.deploy(reservation).map_err(|e| {
            warn!(
                foreign_token = %reservation.foreign_token,
                standard = %reservation.standard(),
                err = %e,
                "token deployment failed"
            );
            self.release(reservation);
            BridgeError::DeploymentFailed(e.to_string())
        })
    }

    /// Binds an already deployed local token to `foreign_token`.
    pub(crate) fn register_token(
        &self,
        caller: Address,
        foreign_token: Address,
        local_token: Address,
        metadata: TokenMetadata,
    ) -> BridgeResult<TokenMapping> {
        let reservation = self.reserve(caller, foreign_token, metadata)?;
        self.confirm(caller, reservation, local_token)
    }

    fn insert(&self, mapping: TokenMapping) -> BridgeResult<TokenMapping> {
        let standard = mapping.standard();
        let foreign_token = mapping.foreign_token();
        let local_token = mapping.local_token();

        match self
            .ledger_db
            .put_mapping_checked(TokenMappingEntry::active(mapping.clone()))?
        {
            MappingInsert::Inserted => {
                info!(%standard, %foreign_token, %local_token, "mapped token");
                Ok(mapping)
            }
            MappingInsert::AlreadyMapped => Err(BridgeError::DuplicateMapping {
                standard,
                foreign_token,
            }),
            MappingInsert::LocalTokenInUse {
                foreign_token: owner,
                ..
            } => Err(BridgeError::LocalTokenInUse {
                local_token,
                foreign_token: owner,
            }),
            MappingInsert::OrphanedSupply {
                previous_local_token,
                outstanding,
            } => Err(BridgeError::OrphanedSupply {
                previous_local_token,
                outstanding,
            }),
        }
    }

    /// Removes the mapping if the outstanding supply of its local token is
    /// exactly `expected_outstanding`. Comparison and removal are one atomic
    /// step. Returns the local token of the removed mapping.
    pub(crate) fn remove_token(
        &self,
        caller: Address,
        standard: TokenStandard,
        foreign_token: Address,
        expected_outstanding: U256,
    ) -> BridgeResult<Address> {
        self.permissions.ensure_guardian(caller)?;

        let res = self.ledger_db.remove_mapping_if_supply(
            standard,
            foreign_token,
            expected_outstanding,
            now_millis(),
        )?;
        match res {
            MappingRemoval::Removed { local_token } => {
                info!(%standard, %foreign_token, %local_token, outstanding = %expected_outstanding, "removed mapping");
                Ok(local_token)
            }
            MappingRemoval::NotFound => Err(BridgeError::UnknownMapping(foreign_token)),
            MappingRemoval::SupplyMismatch { actual } => {
                warn!(%standard, %foreign_token, expected = %expected_outstanding, %actual, "refused mapping removal");
                Err(BridgeError::SupplyMismatch {
                    expected: expected_outstanding,
                    actual,
                })
            }
        }
    }

    /// Active mapping of a foreign token.
    pub fn lookup(
        &self,
        standard: TokenStandard,
        foreign_token: Address,
    ) -> BridgeResult<Option<TokenMapping>> {
        Ok(self
            .lookup_entry(standard, foreign_token)?
            .and_then(TokenMappingEntry::into_active))
    }

    /// Mapping entry of a foreign token, including tombstones.
    pub fn lookup_entry(
        &self,
        standard: TokenStandard,
        foreign_token: Address,
    ) -> BridgeResult<Option<TokenMappingEntry>> {
        Ok(self.mapping_db.get_mapping(standard, foreign_token)?)
    }

    /// Mapping entry backed by a local token, including tombstones.
    pub fn lookup_entry_by_local(
        &self,
        local_token: Address,
    ) -> BridgeResult<Option<TokenMappingEntry>> {
        let Some((standard, foreign_token)) = self.mapping_db.get_mapping_key_by_local(local_token)?
        else {
            return Ok(None);
        };
        self.lookup_entry(standard, foreign_token)
    }

    /// Active mapping backed by a local token.
    pub fn lookup_by_local(&self, local_token: Address) -> BridgeResult<Option<TokenMapping>> {
        Ok(self
            .lookup_entry_by_local(local_token)?
            .and_then(TokenMappingEntry::into_active))
    }

    /// Every mapping entry, ordered by standard then foreign token.
    pub fn mappings(&self) -> BridgeResult<Vec<TokenMappingEntry>> {
        Ok(self.mapping_db.get_all_mappings()?)
    }
}
