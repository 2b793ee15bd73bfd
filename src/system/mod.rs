//! System Layer
//!
//! 뷰모델이 호출하는 외부 협력자 인터페이스와 기본 구현.
//! 브라우저는 `Arc<dyn ...>`로 주입받으며, 테스트에서는 메모리 구현으로 교체한다.

pub mod filesystem;
pub mod session;
pub mod settings;

use crate::models::directory_entry::DirectoryEntry;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

pub use filesystem::LocalFileSystem;
pub use session::{SessionSnapshot, SessionStore, TomlSessionStore};
pub use settings::Settings;

/// 디렉토리 목록 조회
pub trait DirectoryLister: Send + Sync {
    /// 경로의 직속 항목 목록. 순서는 보장하지 않는다.
    fn list_directory(&self, path: &Path) -> Result<Vec<DirectoryEntry>>;
}

/// 경로 존재 확인
pub trait PathProbe: Send + Sync {
    fn path_exists(&self, path: &Path) -> bool;
}

/// 파일 작업
pub trait FileOperations: Send + Sync {
    /// `sources`를 `destination` 디렉토리 안으로 복사
    fn copy(&self, sources: &[PathBuf], destination: &Path) -> Result<()>;
    /// `sources`를 `destination` 디렉토리 안으로 이동
    fn move_items(&self, sources: &[PathBuf], destination: &Path) -> Result<()>;
    /// 삭제 (구현에 따라 휴지통)
    fn delete(&self, paths: &[PathBuf]) -> Result<()>;
    /// 디렉토리 생성
    fn create_directory(&self, path: &Path) -> Result<()>;
}
