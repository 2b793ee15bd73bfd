use std::path::{Path, PathBuf};
use thiserror::Error;

/// 사용자에게 노출되는 오류 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 경로 없음
    NotFound,
    /// 권한 없음
    AccessDenied,
    /// 이름 충돌
    AlreadyExists,
    /// 사용자 취소
    OperationCancelled,
    /// 기타
    Unknown,
}

#[derive(Error, Debug)]
pub enum DuoPaneError {
    #[error("Path not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Permission denied: {}", path.display())]
    AccessDenied { path: PathBuf },

    #[error("Already exists: {}", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("Operation cancelled")]
    OperationCancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl DuoPaneError {
    /// IO 오류를 경로 정보와 함께 분류된 오류로 변환
    pub fn from_io(err: std::io::Error, path: &Path) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            std::io::ErrorKind::NotFound => DuoPaneError::NotFound { path },
            std::io::ErrorKind::PermissionDenied => DuoPaneError::AccessDenied { path },
            std::io::ErrorKind::AlreadyExists => DuoPaneError::AlreadyExists { path },
            _ => DuoPaneError::Io(err),
        }
    }

    /// 오류 분류 반환
    pub fn kind(&self) -> ErrorKind {
        match self {
            DuoPaneError::NotFound { .. } | DuoPaneError::NotADirectory { .. } => {
                ErrorKind::NotFound
            }
            DuoPaneError::AccessDenied { .. } => ErrorKind::AccessDenied,
            DuoPaneError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            DuoPaneError::OperationCancelled => ErrorKind::OperationCancelled,
            DuoPaneError::Io(e) => match e.kind() {
                std::io::ErrorKind::NotFound => ErrorKind::NotFound,
                std::io::ErrorKind::PermissionDenied => ErrorKind::AccessDenied,
                std::io::ErrorKind::AlreadyExists => ErrorKind::AlreadyExists,
                _ => ErrorKind::Unknown,
            },
            DuoPaneError::Config(_) | DuoPaneError::Session(_) | DuoPaneError::Unknown(_) => {
                ErrorKind::Unknown
            }
        }
    }

    /// 오류와 연관된 경로 (있는 경우)
    pub fn path(&self) -> Option<&Path> {
        match self {
            DuoPaneError::NotFound { path }
            | DuoPaneError::NotADirectory { path }
            | DuoPaneError::AccessDenied { path }
            | DuoPaneError::AlreadyExists { path } => Some(path),
            _ => None,
        }
    }

    /// 사용자 안내 문구
    pub fn hint(&self) -> &'static str {
        match self.kind() {
            ErrorKind::NotFound => "The path may have been moved or deleted.",
            ErrorKind::AccessDenied => "Check permissions and try again.",
            ErrorKind::AlreadyExists => "Choose a different name.",
            ErrorKind::OperationCancelled => "",
            ErrorKind::Unknown => "",
        }
    }
}

pub type Result<T> = std::result::Result<T, DuoPaneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_maps_kinds() {
        let path = Path::new("/tmp/x");
        let err = DuoPaneError::from_io(
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            path,
        );
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.path(), Some(path));

        let err = DuoPaneError::from_io(
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no"),
            path,
        );
        assert_eq!(err.kind(), ErrorKind::AccessDenied);

        let err = DuoPaneError::from_io(
            std::io::Error::new(std::io::ErrorKind::AlreadyExists, "dup"),
            path,
        );
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    }

    #[test]
    fn test_other_io_is_unknown() {
        let err = DuoPaneError::from_io(std::io::Error::other("boom"), Path::new("/tmp"));
        assert!(matches!(err, DuoPaneError::Io(_)));
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert!(err.path().is_none());
    }

    #[test]
    fn test_not_a_directory_counts_as_not_found() {
        let err = DuoPaneError::NotADirectory {
            path: PathBuf::from("/tmp/file.txt"),
        };
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(
            DuoPaneError::OperationCancelled.kind(),
            ErrorKind::OperationCancelled
        );
    }
}
