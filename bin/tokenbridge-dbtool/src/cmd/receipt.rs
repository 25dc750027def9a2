use anyhow::{anyhow, Context};
use tokenbridge_core::BridgeController;
use tokenbridge_primitives::{receipt::ReceiptId, Address};

use crate::{
    cli::OutputFormat,
    output::{bridge::ReceiptInfo, output},
};

pub(crate) fn get_receipt(
    ctl: &BridgeController,
    local_token: Address,
    receipt_id: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let id = ReceiptId::from(receipt_id);
    let record = ctl
        .receipts()
        .get(local_token, &id)
        .context("failed to read receipt")?
        .ok_or_else(|| anyhow!("receipt {id} not consumed for {local_token}"))?;
    output(&ReceiptInfo::from(record), format)
}
