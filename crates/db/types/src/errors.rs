use thiserror::Error;
use typed_sled::error::Error;

#[derive(Debug, Error, Clone)]
pub enum DbError {
    #[error("entry already exists")]
    EntryAlreadyExists,

    #[error("guardian set not initialized")]
    NotBootstrapped,

    #[error("IO Error: {0}")]
    IoError(String),

    #[error("codec error {0}")]
    CodecError(String),

    #[error("transaction error {0}")]
    TransactionError(String),

    /// A stored record could not be interpreted, e.g. an unknown enum tag.
    #[error("corrupted entry in {0}: {1}")]
    CorruptedEntry(&'static str, String),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for DbError {
    fn from(value: anyhow::Error) -> Self {
        Self::Other(value.to_string())
    }
}

impl From<Error> for DbError {
    fn from(value: Error) -> Self {
        Self::Other(format!("sled error: {value:?}"))
    }
}
