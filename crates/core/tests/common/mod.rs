//! Helpers shared by the integration tests.

#![allow(
    unreachable_pub,
    dead_code,
    clippy::allow_attributes,
    reason = "not every test binary uses every helper"
)]

use tempfile::TempDir;
use tokenbridge_core::{BridgeController, Reservation, TokenDeployer};
use tokenbridge_db_store_sled::{open_sled_backend, SledDbConfig, SLED_NAME};
use tokenbridge_db_types::stubs::StubBackend;
use tokenbridge_primitives::{
    events::{ForeignDeposit, LocalBurn},
    receipt::ReceiptId,
    standard::TokenStandard,
    Address, U256,
};

pub const GUARDIAN: u16 = 0x0001;
pub const FOREIGN: u16 = 0x0aaa;
pub const LOCAL: u16 = 0x0bbb;
pub const RECIPIENT: u16 = 0x0ccc;

pub fn addr(n: u16) -> Address {
    let mut bytes = [0u8; 20];
    bytes[18..].copy_from_slice(&n.to_be_bytes());
    Address::new(bytes)
}

/// Controller over a fresh in-memory backend with [`GUARDIAN`] bootstrapped.
/// The guard is `None` and only there to match [`sled_controller`].
pub fn stub_controller() -> (Option<TempDir>, BridgeController) {
    let ctl = BridgeController::from_backend(&StubBackend::new());
    ctl.init_guardians([addr(GUARDIAN)]).unwrap();
    (None, ctl)
}

/// Controller over a sled backend in a temporary directory, which is removed
/// when the returned guard is dropped.
pub fn sled_controller() -> (Option<TempDir>, BridgeController) {
    let dir = TempDir::new().unwrap();
    let backend = open_sled_backend(dir.path(), SLED_NAME, SledDbConfig::test()).unwrap();
    let ctl = BridgeController::from_backend(&*backend);
    ctl.init_guardians([addr(GUARDIAN)]).unwrap();
    (Some(dir), ctl)
}

/// Deployer returning a fixed address.
#[derive(Debug)]
pub struct FixedDeployer(pub Address);

impl TokenDeployer for FixedDeployer {
    fn deploy(&self, _reservation: &Reservation) -> anyhow::Result<Address> {
        Ok(self.0)
    }
}

pub fn fungible_deposit(receipt: &str, amount: u64) -> ForeignDeposit {
    ForeignDeposit {
        standard: TokenStandard::Fungible,
        foreign_token: addr(FOREIGN),
        recipient: addr(RECIPIENT),
        amount: U256::from(amount),
        instance_id: None,
        receipt_id: ReceiptId::from(receipt),
        confirmations: 12,
    }
}

pub fn fungible_burn(amount: u64, nonce: u64) -> LocalBurn {
    LocalBurn {
        local_token: addr(LOCAL),
        amount: U256::from(amount),
        instance_id: None,
        foreign_recipient: addr(RECIPIENT),
        local_nonce: nonce,
    }
}
