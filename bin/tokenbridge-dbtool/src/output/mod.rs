pub(crate) mod bridge;
pub(crate) mod helpers;
pub(crate) mod traits;

use anyhow::Context;
use serde::Serialize;

use crate::cli::OutputFormat;
use traits::Formattable;

/// Prints `data` to stdout in the requested format.
pub(crate) fn output<T: Formattable + Serialize>(
    data: &T,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let rendered = render(data, format)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn render<T: Formattable + Serialize>(
    data: &T,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Porcelain => Ok(data.format_porcelain()),
        OutputFormat::Json => serde_json::to_string_pretty(data).context("failed to serialize output"),
    }
}
