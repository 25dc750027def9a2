use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tokenbridge_primitives::{Address, U256};

/// Offline inspection and bootstrap of a token bridge database.
#[derive(Debug, Parser)]
#[command(name = "tokenbridge-dbtool", version)]
pub(crate) struct Cli {
    /// Path to the bridge config file
    #[arg(long, short = 'c')]
    pub(crate) config: Option<PathBuf>,

    /// Database directory, takes precedence over the config
    #[arg(long, short = 'd')]
    pub(crate) datadir: Option<PathBuf>,

    /// Config overrides of the form `section.key=value`
    #[arg(long = "override", short = 'o', requires = "config")]
    pub(crate) overrides: Vec<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Porcelain)]
    pub(crate) output_format: OutputFormat,

    #[command(subcommand)]
    pub(crate) cmd: Command,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Stable `key: value` lines
    Porcelain,
    Json,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Writes the genesis guardian set from the config
    Init,

    /// Lists the guardian set
    Guardians,

    /// Lists every mapping, including removed ones
    Mappings,

    /// Shows the outstanding supply of a local token
    Supply {
        local_token: Address,

        /// Instance to show instead of the token total
        #[arg(long)]
        instance: Option<U256>,
    },

    /// Shows a consumed receipt
    Receipt {
        local_token: Address,
        receipt_id: String,
    },
}

