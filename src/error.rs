use sea_orm::DbErr;
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{msg}")]
    Biz { code: i32, msg: String },
    #[error(transparent)]
    Db(#[from] DbErr),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AppError {
    pub fn param_error(msg: impl Into<String>) -> Self {
        Self::Biz { code: 1, msg: msg.into() }
    }

    pub fn fail(msg: impl Into<String>) -> Self {
        Self::Biz { code: 2, msg: msg.into() }
    }

    pub fn invalid_author(msg: impl Into<String>) -> Self {
        Self::Biz { code: 5, msg: msg.into() }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Biz { code, .. } => *code,
            Self::Storage(_) => 2,
            Self::Db(_) => 99,
        }
    }

    /// Message safe to hand to end users; db and filesystem detail stays in the error chain.
    pub fn msg(&self) -> &str {
        match self {
            Self::Biz { msg, .. } => msg,
            Self::Storage(_) => "file storage failed",
            Self::Db(_) => "system_exception",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn codes_follow_error_kind() {
        assert_eq!(AppError::param_error("title").code(), 1);
        assert_eq!(AppError::fail("nope").code(), 2);
        assert_eq!(AppError::invalid_author("bad").code(), 5);
        assert_eq!(AppError::from(DbErr::Custom("boom".into())).code(), 99);
    }

    #[test]
    fn storage_errors_hide_paths_from_msg() {
        let err = AppError::from(StorageError::Remove {
            path: "/srv/uploads/a.png".into(),
            source: io::Error::from(io::ErrorKind::NotFound),
        });
        assert_eq!(err.code(), 2);
        assert_eq!(err.msg(), "file storage failed");
        assert!(err.to_string().contains("/srv/uploads/a.png"));
    }
}
