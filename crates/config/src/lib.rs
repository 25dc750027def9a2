//! Configuration of the token bridge tooling.

mod config;
mod errors;

pub use config::{ClientConfig, Config, GenesisConfig, LoggingConfig};
pub use errors::ConfigError;
