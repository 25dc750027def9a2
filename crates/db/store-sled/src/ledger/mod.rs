//! Operations spanning several trees, each run as one sled transaction.

pub mod db;
