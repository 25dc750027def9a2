use std::fmt::Debug;

use tokenbridge_db_types::DbError;

pub(crate) fn to_db_error<E: Debug>(e: E) -> DbError {
    DbError::TransactionError(format!("{e:?}"))
}
