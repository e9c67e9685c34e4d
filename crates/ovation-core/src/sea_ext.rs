use sea_orm::{DbErr, SqlErr};

/// Classification helpers for sea-orm errors.
pub trait DbErrExt {
    /// `true` when the statement was rejected by a unique index or primary key.
    fn is_unique_violation(&self) -> bool;
}

impl DbErrExt for DbErr {
    fn is_unique_violation(&self) -> bool {
        matches!(self.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
    }
}

/// Map an insert result to `Ok(true)` on success and `Ok(false)` on a unique violation.
///
/// Any other database error is passed through untouched.
pub fn inserted_unless_duplicate<T>(result: Result<T, DbErr>) -> Result<bool, DbErr> {
    match result {
        Ok(_) => Ok(true),
        Err(e) if e.is_unique_violation() => Ok(false),
        Err(e) => Err(e),
    }
}
