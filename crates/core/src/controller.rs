//! Entry point processing confirmed chain events.

use std::{fmt, sync::Arc};

use parking_lot::RwLock;
use tokenbridge_db_types::{
    traits::{BridgeLedgerDatabase, DatabaseBackend},
    types::DepositCommit,
    DbError,
};
use tokenbridge_primitives::{
    events::{ForeignDeposit, LocalBurn},
    instructions::{MintInstruction, ReleaseInstruction},
    mapping::TokenMapping,
    receipt::ReceiptRecord,
    standard::{TokenMetadata, TokenStandard},
    supply::SupplyKey,
    Address, U256,
};
use tracing::{debug, warn};

use crate::{
    errors::{BridgeError, BridgeResult},
    locks::TokenLocks,
    mapping::{TokenDeployer, TokenMappingRegistry},
    now_millis,
    permissions::PermissionRegistry,
    receipts::ReceiptLedger,
    sink::{InstructionSink, RelayOutcome},
    supply::{supply_update_result, SupplyTracker},
    validation::{instance_cap, validate_transfer},
};

/// Turns confirmed foreign deposits into mint instructions and local burns
/// into release instructions, and serves as the administrative interface of
/// the bridge.
///
/// Work on one token identity is serialized through a keyed lock table.
/// Administrative mutations exclude event processing through a coarse
/// reader-writer lock, so each event sees one consistent snapshot of the
/// guardian set and the mappings. The registries handed out by
/// [`Self::permissions`] and [`Self::mappings`] are read-only, every
/// mutation goes through the controller.
pub struct BridgeController {
    permissions: Arc<PermissionRegistry>,
    mappings: Arc<TokenMappingRegistry>,
    receipts: ReceiptLedger,
    supply: SupplyTracker,
    ledger_db: Arc<dyn BridgeLedgerDatabase>,
    locks: TokenLocks,
    admin: RwLock<()>,
}

impl fmt::Debug for BridgeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeController")
            .field("mappings", &self.mappings)
            .field("locks", &self.locks.len())
            .finish_non_exhaustive()
    }
}

impl BridgeController {
    pub fn from_backend(backend: &impl DatabaseBackend) -> Self {
        let permissions = Arc::new(PermissionRegistry::new(backend.guardian_db()));
        let mappings = Arc::new(TokenMappingRegistry::new(
            permissions.clone(),
            backend.mapping_db(),
            backend.ledger_db(),
        ));
        Self {
            permissions,
            mappings,
            receipts: ReceiptLedger::new(backend.receipt_db()),
            supply: SupplyTracker::new(backend.supply_db()),
            ledger_db: backend.ledger_db(),
            locks: TokenLocks::new(),
            admin: RwLock::new(()),
        }
    }

    pub fn permissions(&self) -> &PermissionRegistry {
        &self.permissions
    }

    pub fn mappings(&self) -> &TokenMappingRegistry {
        &self.mappings
    }

    pub fn receipts(&self) -> &ReceiptLedger {
        &self.receipts
    }

    pub fn supply(&self) -> &SupplyTracker {
        &self.supply
    }

    /// Consumes the receipt of a confirmed foreign deposit and credits the
    /// wrapped supply, returning the mint the local chain has to execute.
    ///
    /// Replays fail with [`BridgeError::DuplicateReceipt`] and change nothing.
    pub fn process_foreign_deposit(
        &self,
        caller: Address,
        deposit: &ForeignDeposit,
    ) -> BridgeResult<MintInstruction> {
        let _admin = self.admin.read();
        self.permissions.ensure_guardian(caller)?;

        let mapping = self
            .mappings
            .lookup(deposit.standard, deposit.foreign_token)?
            .ok_or(BridgeError::UnknownMapping(deposit.foreign_token))?;
        let standard = mapping.standard();
        validate_transfer(standard, deposit.amount, deposit.instance_id)?;

        let local_token = mapping.local_token();
        let key = SupplyKey::new(local_token, deposit.instance_id);
        let record = ReceiptRecord {
            receipt_id: deposit.receipt_id.clone(),
            local_token,
            instance_id: deposit.instance_id,
            amount: deposit.amount,
            consumed_at: now_millis(),
        };
        let commit = self.locks.with(key, || {
            self.ledger_db
                .commit_deposit(record, instance_cap(standard))
        })?;

        match commit {
            DepositCommit::Committed { balance } => {
                debug!(
                    foreign_token = %deposit.foreign_token,
                    %local_token,
                    receipt_id = %deposit.receipt_id,
                    amount = %deposit.amount,
                    confirmations = deposit.confirmations,
                    outstanding = %balance,
                    "committed deposit"
                );
                Ok(MintInstruction {
                    local_token,
                    recipient: deposit.recipient,
                    amount: deposit.amount,
                    instance_id: deposit.instance_id,
                    receipt_id: deposit.receipt_id.clone(),
                })
            }
            DepositCommit::AlreadyConsumed => {
                warn!(receipt_id = %deposit.receipt_id, %local_token, "ignoring replayed deposit");
                Err(BridgeError::DuplicateReceipt(deposit.receipt_id.clone()))
            }
            DepositCommit::Rejected(update) => {
                let err = match supply_update_result(key, deposit.amount, update) {
                    Err(e) => e,
                    Ok(_) => DbError::Other(format!("deposit rejected with {update:?}")).into(),
                };
                warn!(receipt_id = %deposit.receipt_id, %local_token, %err, "rejected deposit");
                Err(err)
            }
        }
    }

    /// Debits the wrapped supply of a local burn, returning the release the
    /// foreign chain has to execute.
    ///
    /// Burns of tokens whose mapping was removed are still honored so that
    /// supply left outstanding at removal can be redeemed.
    pub fn process_local_burn(
        &self,
        caller: Address,
        burn: &LocalBurn,
    ) -> BridgeResult<ReleaseInstruction> {
        let _admin = self.admin.read();
        self.permissions.ensure_guardian(caller)?;

        let entry = self
            .mappings
            .lookup_entry_by_local(burn.local_token)?
            .ok_or(BridgeError::UnknownMapping(burn.local_token))?;
        let mapping = entry.mapping;
        let standard = mapping.standard();
        validate_transfer(standard, burn.amount, burn.instance_id)?;

        let key = SupplyKey::new(burn.local_token, burn.instance_id);
        let balance = self
            .locks
            .with(key, || self.supply.debit(key, burn.amount))
            .inspect_err(|err| {
                warn!(local_token = %burn.local_token, nonce = burn.local_nonce, %err, "rejected burn");
            })?;
        debug!(
            local_token = %burn.local_token,
            foreign_token = %mapping.foreign_token(),
            amount = %burn.amount,
            nonce = burn.local_nonce,
            outstanding = %balance,
            "committed burn"
        );

        Ok(ReleaseInstruction {
            standard,
            foreign_token: mapping.foreign_token(),
            local_token: burn.local_token,
            foreign_recipient: burn.foreign_recipient,
            amount: burn.amount,
            instance_id: burn.instance_id,
            local_nonce: burn.local_nonce,
        })
    }

    /// Processes deposits one by one. A failed item does not affect the
    /// others.
    pub fn process_foreign_deposits(
        &self,
        caller: Address,
        deposits: &[ForeignDeposit],
    ) -> Vec<BridgeResult<MintInstruction>> {
        deposits
            .iter()
            .map(|deposit| self.process_foreign_deposit(caller, deposit))
            .collect()
    }

    /// Processes burns one by one. A failed item does not affect the others.
    pub fn process_local_burns(
        &self,
        caller: Address,
        burns: &[LocalBurn],
    ) -> Vec<BridgeResult<ReleaseInstruction>> {
        burns
            .iter()
            .map(|burn| self.process_local_burn(caller, burn))
            .collect()
    }

    /// Processes `deposits` and hands every resulting mint to `sink`.
    pub fn relay_foreign_deposits(
        &self,
        caller: Address,
        deposits: &[ForeignDeposit],
        sink: &impl InstructionSink,
    ) -> RelayOutcome<MintInstruction> {
        let mut outcome = RelayOutcome::default();
        for (idx, res) in self
            .process_foreign_deposits(caller, deposits)
            .into_iter()
            .enumerate()
        {
            match res {
                Ok(mint) => {
                    let submitted = sink.submit_mint(&mint);
                    outcome.record(mint, submitted);
                }
                Err(e) => outcome.rejected.push((idx, e)),
            }
        }
        outcome
    }

    /// Processes `burns` and hands every resulting release to `sink`.
    pub fn relay_local_burns(
        &self,
        caller: Address,
        burns: &[LocalBurn],
        sink: &impl InstructionSink,
    ) -> RelayOutcome<ReleaseInstruction> {
        let mut outcome = RelayOutcome::default();
        for (idx, res) in self.process_local_burns(caller, burns).into_iter().enumerate() {
            match res {
                Ok(release) => {
                    let submitted = sink.submit_release(&release);
                    outcome.record(release, submitted);
                }
                Err(e) => outcome.rejected.push((idx, e)),
            }
        }
        outcome
    }

    pub fn init_guardians(&self, guardians: impl IntoIterator<Item = Address>) -> BridgeResult<()> {
        let _admin = self.admin.write();
        self.permissions.init(guardians)
    }

    pub fn rely(&self, caller: Address, target: Address) -> BridgeResult<bool> {
        let _admin = self.admin.write();
        self.permissions.rely(caller, target)
    }

    pub fn deny(&self, caller: Address, target: Address) -> BridgeResult<bool> {
        let _admin = self.admin.write();
        self.permissions.deny(caller, target)
    }

    /// Deploys the local token for `foreign_token` and records the mapping.
    ///
    /// The deployer runs without the admin lock, the key stays reserved in
    /// the meantime.
    pub fn add_token(
        &self,
        caller: Address,
        foreign_token: Address,
        metadata: TokenMetadata,
        deployer: &impl TokenDeployer,
    ) -> BridgeResult<Address> {
        let reservation = {
            let _admin = self.admin.write();
            self.mappings.reserve(caller, foreign_token, metadata)?
        };

        let local_token = self.mappings.deploy_reserved(&reservation, deployer)?;

        let _admin = self.admin.write();
        let confirmed = self.mappings.confirm(caller, reservation, local_token);
        Ok(confirmed?.local_token())
    }

    pub fn register_token(
        &self,
        caller: Address,
        foreign_token: Address,
        local_token: Address,
        metadata: TokenMetadata,
    ) -> BridgeResult<TokenMapping> {
        let _admin = self.admin.write();
        self.mappings
            .register_token(caller, foreign_token, local_token, metadata)
    }

    /// Removes the mapping if exactly `expected_outstanding` of its local
    /// token is outstanding.
    pub fn remove_token(
        &self,
        caller: Address,
        standard: TokenStandard,
        foreign_token: Address,
        expected_outstanding: U256,
    ) -> BridgeResult<Address> {
        let _admin = self.admin.write();
        self.mappings
            .remove_token(caller, standard, foreign_token, expected_outstanding)
    }

    pub fn lookup(
        &self,
        standard: TokenStandard,
        foreign_token: Address,
    ) -> BridgeResult<Option<TokenMapping>> {
        self.mappings.lookup(standard, foreign_token)
    }
}

#[cfg(test)]
mod tests {
    use tokenbridge_db_types::stubs::StubBackend;
    use tokenbridge_primitives::receipt::ReceiptId;

    use super::*;
    use crate::sink::BufferedSink;

    /// Sink whose executor is unreachable.
    struct OfflineSink;

    impl InstructionSink for OfflineSink {
        fn submit_mint(&self, _instruction: &MintInstruction) -> anyhow::Result<()> {
            anyhow::bail!("executor offline")
        }

        fn submit_release(&self, _instruction: &ReleaseInstruction) -> anyhow::Result<()> {
            anyhow::bail!("executor offline")
        }
    }

    fn addr(b: u8) -> Address {
        Address::repeat_byte(b)
    }

    fn controller() -> BridgeController {
        let ctl = BridgeController::from_backend(&StubBackend::new());
        ctl.init_guardians([addr(1)]).unwrap();
        ctl
    }

    fn nft_deposit(instance: u64, receipt: &str) -> ForeignDeposit {
        ForeignDeposit {
            standard: TokenStandard::NonFungible,
            foreign_token: addr(0xaa),
            recipient: addr(0x55),
            amount: U256::from(1),
            instance_id: Some(U256::from(instance)),
            receipt_id: ReceiptId::from(receipt),
            confirmations: 12,
        }
    }

    fn fungible_deposit(receipt: &str, amount: u64) -> ForeignDeposit {
        ForeignDeposit {
            standard: TokenStandard::Fungible,
            foreign_token: addr(0xaa),
            recipient: addr(0x55),
            amount: U256::from(amount),
            instance_id: None,
            receipt_id: ReceiptId::from(receipt),
            confirmations: 12,
        }
    }

    fn nft_burn(instance: u64, nonce: u64) -> LocalBurn {
        LocalBurn {
            local_token: addr(0xbb),
            amount: U256::from(1),
            instance_id: Some(U256::from(instance)),
            foreign_recipient: addr(0x66),
            local_nonce: nonce,
        }
    }

    #[test]
    fn test_nft_instance_minted_once() {
        let ctl = controller();
        ctl.register_token(
            addr(1),
            addr(0xaa),
            addr(0xbb),
            TokenMetadata::non_fungible("Art", "ART", None),
        )
        .unwrap();

        ctl.process_foreign_deposit(addr(1), &nft_deposit(7, "r1"))
            .unwrap();
        assert!(matches!(
            ctl.process_foreign_deposit(addr(1), &nft_deposit(7, "r2")),
            Err(BridgeError::InstanceAlreadyMinted { instance_id, .. }) if instance_id == U256::from(7)
        ));
        // The rejected receipt stays fresh.
        assert!(!ctl
            .receipts()
            .is_consumed(addr(0xbb), &ReceiptId::from("r2"))
            .unwrap());

        ctl.process_foreign_deposit(addr(1), &nft_deposit(8, "r2"))
            .unwrap();
        assert_eq!(
            ctl.supply().balance_of(addr(0xbb), None).unwrap(),
            U256::from(2)
        );
    }

    #[test]
    fn test_standard_mismatch_is_unknown() {
        let ctl = controller();
        ctl.register_token(
            addr(1),
            addr(0xaa),
            addr(0xbb),
            TokenMetadata::fungible("T", "T", 18),
        )
        .unwrap();

        // Mappings are partitioned by standard.
        assert!(matches!(
            ctl.process_foreign_deposit(addr(1), &nft_deposit(1, "r1")),
            Err(BridgeError::UnknownMapping(a)) if a == addr(0xaa)
        ));
    }

    #[test]
    fn test_burn_after_removal_drains_supply() {
        let ctl = controller();
        ctl.register_token(
            addr(1),
            addr(0xaa),
            addr(0xbb),
            TokenMetadata::non_fungible("Art", "ART", None),
        )
        .unwrap();
        ctl.process_foreign_deposit(addr(1), &nft_deposit(3, "r1"))
            .unwrap();
        ctl.remove_token(addr(1), TokenStandard::NonFungible, addr(0xaa), U256::from(1))
            .unwrap();

        assert!(matches!(
            ctl.process_foreign_deposit(addr(1), &nft_deposit(4, "r2")),
            Err(BridgeError::UnknownMapping(_))
        ));

        let release = ctl.process_local_burn(addr(1), &nft_burn(3, 1)).unwrap();
        assert_eq!(release.foreign_token, addr(0xaa));
        assert_eq!(release.standard, TokenStandard::NonFungible);
        assert!(ctl.supply().balance_of(addr(0xbb), None).unwrap().is_zero());
    }

    #[test]
    fn test_lock_table_drains() {
        let ctl = controller();
        ctl.register_token(
            addr(1),
            addr(0xaa),
            addr(0xbb),
            TokenMetadata::non_fungible("Art", "ART", None),
        )
        .unwrap();

        for instance in 0..500 {
            ctl.process_foreign_deposit(addr(1), &nft_deposit(instance, &format!("r{instance}")))
                .unwrap();
            ctl.process_local_burn(addr(1), &nft_burn(instance, instance))
                .unwrap();
        }
        // Rejected events release their lock too.
        assert!(ctl.process_local_burn(addr(1), &nft_burn(0, 500)).is_err());

        assert!(ctl.locks.is_empty());
    }

    #[test]
    fn test_relay_hands_off_mints() {
        let ctl = controller();
        ctl.register_token(
            addr(1),
            addr(0xaa),
            addr(0xbb),
            TokenMetadata::fungible("T", "T", 18),
        )
        .unwrap();

        let sink = BufferedSink::new();
        let outcome = ctl.relay_foreign_deposits(
            addr(1),
            &[
                fungible_deposit("r1", 100),
                fungible_deposit("r1", 100),
                fungible_deposit("r2", 5),
            ],
            &sink,
        );
        assert_eq!(outcome.submitted.len(), 2);
        assert!(outcome.unsubmitted.is_empty());
        assert!(matches!(
            outcome.rejected.as_slice(),
            [(1, BridgeError::DuplicateReceipt(_))]
        ));
        assert_eq!(sink.take_mints(), outcome.submitted);
        assert!(sink.take_mints().is_empty());

        // A refused hand-off keeps the committed state and returns the
        // instruction for resubmission.
        let outcome = ctl.relay_foreign_deposits(addr(1), &[fungible_deposit("r3", 1)], &OfflineSink);
        assert!(outcome.submitted.is_empty());
        assert_eq!(outcome.unsubmitted.len(), 1);
        assert_eq!(
            ctl.supply().balance_of(addr(0xbb), None).unwrap(),
            U256::from(106)
        );
        sink.submit_mint(&outcome.unsubmitted[0]).unwrap();
        assert_eq!(sink.take_mints()[0].receipt_id, ReceiptId::from("r3"));
    }

    #[test]
    fn test_relay_hands_off_releases() {
        let ctl = controller();
        ctl.register_token(
            addr(1),
            addr(0xaa),
            addr(0xbb),
            TokenMetadata::non_fungible("Art", "ART", None),
        )
        .unwrap();
        ctl.process_foreign_deposit(addr(1), &nft_deposit(3, "r1"))
            .unwrap();

        let sink = BufferedSink::new();
        let outcome = ctl.relay_local_burns(addr(1), &[nft_burn(3, 1), nft_burn(3, 2)], &sink);
        assert_eq!(outcome.submitted.len(), 1);
        assert!(matches!(
            outcome.rejected.as_slice(),
            [(1, BridgeError::InsufficientSupply { .. })]
        ));

        let releases = sink.take_releases();
        assert_eq!(releases.len(), 1);
        assert_eq!(releases[0].foreign_token, addr(0xaa));
        assert_eq!(releases[0].instance_id, Some(U256::from(3)));
    }
}
