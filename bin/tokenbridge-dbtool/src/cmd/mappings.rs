use anyhow::Context;
use tokenbridge_core::BridgeController;

use crate::{
    cli::OutputFormat,
    output::{bridge::MappingsInfo, output},
};

pub(crate) fn get_mappings(ctl: &BridgeController, format: OutputFormat) -> anyhow::Result<()> {
    let mappings = ctl
        .mappings()
        .mappings()
        .context("failed to read mappings")?;
    output(&MappingsInfo { mappings }, format)
}
