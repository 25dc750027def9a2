use anyhow::Context;
use tokenbridge_core::BridgeController;

use crate::{
    cli::OutputFormat,
    output::{bridge::GuardiansInfo, output},
};

pub(crate) fn get_guardians(ctl: &BridgeController, format: OutputFormat) -> anyhow::Result<()> {
    let guardians = ctl
        .permissions()
        .guardians()
        .context("failed to read guardian set")?;
    output(&GuardiansInfo { guardians }, format)
}
