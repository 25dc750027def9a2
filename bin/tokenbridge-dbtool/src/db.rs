use std::{path::Path, sync::Arc};

use tokenbridge_config::ClientConfig;
use tokenbridge_db_store_sled::{open_sled_backend, SledBackend, SledDbConfig, SLED_NAME};

/// Opens the sled backend in `datadir`, retrying conflicting transactions as
/// configured for the client.
pub(crate) fn open_database(
    datadir: &Path,
    client: &ClientConfig,
) -> anyhow::Result<Arc<SledBackend>> {
    let ops_config =
        SledDbConfig::new_with_constant_backoff(client.db_retry_count, client.db_retry_delay_ms);
    open_sled_backend(datadir, SLED_NAME, ops_config)
}
