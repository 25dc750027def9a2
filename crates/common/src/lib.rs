//! Utilities shared by the token bridge binaries.

pub mod logging;
