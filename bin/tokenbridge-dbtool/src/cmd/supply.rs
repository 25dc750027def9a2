use anyhow::Context;
use tokenbridge_core::BridgeController;
use tokenbridge_primitives::{Address, U256};

use crate::{
    cli::OutputFormat,
    output::{bridge::SupplyInfo, output},
};

pub(crate) fn get_supply(
    ctl: &BridgeController,
    local_token: Address,
    instance_id: Option<U256>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let outstanding = ctl
        .supply()
        .balance_of(local_token, instance_id)
        .with_context(|| format!("failed to read supply of {local_token}"))?;
    output(
        &SupplyInfo {
            local_token,
            instance_id,
            outstanding,
        },
        format,
    )
}
