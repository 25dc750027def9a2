pub mod db;
pub(crate) mod schemas;
