//! Sled store for the token bridge.

pub mod guardian;
pub mod ledger;
pub mod macros;
pub mod mapping;
pub mod receipt;
pub mod supply;

mod config;
mod init;
mod utils;

use std::{path::Path, sync::Arc};

use guardian::db::GuardianDBSled;
use ledger::db::BridgeLedgerDBSled;
use mapping::db::TokenMappingDBSled;
use receipt::db::ReceiptDBSled;
use supply::db::SupplyDBSled;
use tokenbridge_db_types::{
    traits::{
        BridgeLedgerDatabase, DatabaseBackend, GuardianDatabase, ReceiptDatabase, SupplyDatabase,
        TokenMappingDatabase,
    },
    DbResult,
};
use typed_sled::SledDb;

pub use crate::{config::SledDbConfig, init::open_sled_database};

pub const SLED_NAME: &str = "tokenbridge";

/// Opens a complete Sled backend from datadir.
pub fn open_sled_backend(
    datadir: &Path,
    dbname: &'static str,
    ops_config: SledDbConfig,
) -> anyhow::Result<Arc<SledBackend>> {
    let sled_db = open_sled_database(datadir, dbname)?;
    SledBackend::new(sled_db, ops_config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize sled backend: {}", e))
        .map(Arc::new)
}

/// Sled backend with every bridge table.
///
/// All databases share the same sled trees, so a transaction in
/// [`BridgeLedgerDBSled`] conflicts with concurrent writes made through the
/// single-table databases.
#[derive(Debug)]
pub struct SledBackend {
    guardian_db: Arc<GuardianDBSled>,
    mapping_db: Arc<TokenMappingDBSled>,
    receipt_db: Arc<ReceiptDBSled>,
    supply_db: Arc<SupplyDBSled>,
    ledger_db: Arc<BridgeLedgerDBSled>,
}

impl SledBackend {
    pub fn new(sled_db: Arc<SledDb>, config: SledDbConfig) -> DbResult<Self> {
        let guardian_db = Arc::new(GuardianDBSled::new(sled_db.clone(), config.clone())?);
        let mapping_db = Arc::new(TokenMappingDBSled::new(sled_db.clone(), config.clone())?);
        let receipt_db = Arc::new(ReceiptDBSled::new(sled_db.clone(), config.clone())?);
        let supply_db = Arc::new(SupplyDBSled::new(sled_db.clone(), config.clone())?);
        let ledger_db = Arc::new(BridgeLedgerDBSled::new(sled_db, config)?);
        Ok(Self {
            guardian_db,
            mapping_db,
            receipt_db,
            supply_db,
            ledger_db,
        })
    }
}

impl DatabaseBackend for SledBackend {
    fn guardian_db(&self) -> Arc<impl GuardianDatabase> {
        self.guardian_db.clone()
    }

    fn mapping_db(&self) -> Arc<impl TokenMappingDatabase> {
        self.mapping_db.clone()
    }

    fn receipt_db(&self) -> Arc<impl ReceiptDatabase> {
        self.receipt_db.clone()
    }

    fn supply_db(&self) -> Arc<impl SupplyDatabase> {
        self.supply_db.clone()
    }

    fn ledger_db(&self) -> Arc<impl BridgeLedgerDatabase> {
        self.ledger_db.clone()
    }
}
