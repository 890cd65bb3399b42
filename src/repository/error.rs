use derive_more::Display;

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// RepositoryError tells which repository operation failed and why.
///
/// Connection and Schema are raised while initializing and are fatal,
/// the others are raised by the periodic writer and only get logged.
///
#[derive(Debug, Display)]
pub enum RepositoryError {
    #[display(fmt = "cannot connect to database: {}", _0)]
    Connection(sqlx::Error),
    #[display(fmt = "cannot create records table: {}", _0)]
    Schema(sqlx::Error),
    #[display(fmt = "cannot insert record: {}", _0)]
    Insert(sqlx::Error),
    #[display(fmt = "cannot count records: {}", _0)]
    Count(sqlx::Error),
    #[display(fmt = "cannot read recent records: {}", _0)]
    Recent(sqlx::Error),
}

impl RepositoryError {
    /// Returns true when the error must stop the process before the writer starts.
    ///
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Schema(_))
    }

    fn cause(&self) -> &sqlx::Error {
        match self {
            Self::Connection(e)
            | Self::Schema(e)
            | Self::Insert(e)
            | Self::Count(e)
            | Self::Recent(e) => e,
        }
    }
}

impl std::error::Error for RepositoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.cause())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_kinds() {
        assert!(RepositoryError::Connection(sqlx::Error::PoolTimedOut).is_fatal());
        assert!(RepositoryError::Schema(sqlx::Error::PoolClosed).is_fatal());
        assert!(!RepositoryError::Insert(sqlx::Error::PoolClosed).is_fatal());
        assert!(!RepositoryError::Count(sqlx::Error::PoolClosed).is_fatal());
        assert!(!RepositoryError::Recent(sqlx::Error::PoolClosed).is_fatal());
    }

    #[test]
    fn test_display_names_operation() {
        let e = RepositoryError::Insert(sqlx::Error::PoolClosed);
        assert!(e.to_string().starts_with("cannot insert record: "));

        let e = RepositoryError::Connection(sqlx::Error::PoolTimedOut);
        assert!(e.to_string().starts_with("cannot connect to database: "));
        assert!(std::error::Error::source(&e).is_some());
    }
}
