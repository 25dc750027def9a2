use anyhow::Context;
use tokenbridge_config::Config;
use tokenbridge_core::BridgeController;
use tracing::info;

use crate::{
    cli::OutputFormat,
    output::{bridge::GuardiansInfo, output},
};

/// Writes the genesis guardian set of `config`.
pub(crate) fn init_db(
    ctl: &BridgeController,
    config: Option<&Config>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let config = config.context("init requires --config")?;
    let guardians = config.genesis.guardians.clone();

    ctl.init_guardians(guardians.iter().copied())
        .context("failed to write genesis guardians")?;
    info!(count = guardians.len(), "bootstrapped bridge database");

    output(&GuardiansInfo { guardians }, format)
}
