//! Diesel and pool failures translated into [`RegionRepositoryError`].
//!
//! Lost connections become `Connection` (surfaced to clients as 503); every
//! other failure is a `Query` error. Driver messages are logged at debug and
//! never copied into the returned error.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::RegionRepositoryError;

use super::pool::PoolError;

pub(super) fn map_pool_error(error: PoolError) -> RegionRepositoryError {
    let (PoolError::Checkout { message } | PoolError::Build { message }) = error;
    RegionRepositoryError::connection(message)
}

pub(super) fn map_diesel_error(error: DieselError) -> RegionRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "pixels query failed");
        }
        other => debug!(error = %other, "pixels query failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => {
            RegionRepositoryError::connection("database connection lost")
        }
        DieselError::NotFound => RegionRepositoryError::query("pixel row not found"),
        _ => RegionRepositoryError::query("database error"),
    }
}
