//! Binary entry point for the offline token bridge database tool.
//! Parses CLI arguments with **Clap** and runs one command against the
//! sled database.

mod cli;
mod cmd;
mod db;
mod output;

use std::process;

use anyhow::Context;
use clap::Parser;
use tokenbridge_common::logging::{init_logging_from_config, LoggingInitConfig};
use tokenbridge_config::Config;
use tokenbridge_core::BridgeController;

use crate::{
    cli::{Cli, Command},
    cmd::{
        guardians::get_guardians, init::init_db, mappings::get_mappings, receipt::get_receipt,
        supply::get_supply,
    },
    db::open_database,
};

const SERVICE_NAME: &str = "tokenbridge-dbtool";

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli
        .config
        .as_deref()
        .map(|path| {
            Config::from_file_with_overrides(path, &cli.overrides)
                .with_context(|| format!("failed to load config {}", path.display()))
        })
        .transpose()?;

    let logging = config.as_ref().map(|c| &c.logging);
    init_logging_from_config(LoggingInitConfig {
        service_base_name: SERVICE_NAME,
        service_label: None,
        log_dir: logging.and_then(|l| l.log_dir.as_deref()),
        log_file_prefix: None,
        json_format: logging.is_some_and(|l| l.json_format),
        stderr: true,
    })
    .context("failed to initialize logging")?;

    let client = config
        .as_ref()
        .map(|c| c.client.clone())
        .unwrap_or_default();
    let datadir = cli.datadir.clone().unwrap_or_else(|| client.datadir.clone());
    let backend = open_database(&datadir, &client)?;
    let ctl = BridgeController::from_backend(&*backend);

    let format = cli.output_format;
    match cli.cmd {
        Command::Init => init_db(&ctl, config.as_ref(), format),
        Command::Guardians => get_guardians(&ctl, format),
        Command::Mappings => get_mappings(&ctl, format),
        Command::Supply {
            local_token,
            instance,
        } => get_supply(&ctl, local_token, instance, format),
        Command::Receipt {
            local_token,
            receipt_id,
        } => get_receipt(&ctl, local_token, &receipt_id, format),
    }
}
