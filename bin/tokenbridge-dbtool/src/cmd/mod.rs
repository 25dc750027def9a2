pub(crate) mod guardians;
pub(crate) mod init;
pub(crate) mod mappings;
pub(crate) mod receipt;
pub(crate) mod supply;
