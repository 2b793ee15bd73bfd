use crate::utils::formatter::{format_date, format_file_size};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// 항목 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// 상위 디렉토리 표시 (`..`)
    ParentMarker,
    /// 디렉토리
    Directory,
    /// 파일 (심볼릭 링크 포함)
    File,
}

/// 디렉토리 목록의 한 항목
///
/// 목록 조회 한 번에 대한 스냅샷이며 이후 변경되지 않는다.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryEntry {
    /// 파일/디렉토리 이름
    pub name: String,
    /// 전체 경로
    pub path: PathBuf,
    /// 항목 종류
    pub kind: EntryKind,
    /// 바이트 단위 크기 (디렉토리는 0)
    pub size: u64,
    /// 수정 시간
    pub modified: SystemTime,
    /// 확장자 (점 제외, 없으면 빈 문자열)
    pub extension: String,
    /// 숨김 항목 여부
    pub is_hidden: bool,
}

impl DirectoryEntry {
    /// 파일 항목 생성
    pub fn file(path: impl Into<PathBuf>, size: u64, modified: SystemTime) -> Self {
        Self::with_kind(path.into(), EntryKind::File, size, modified)
    }

    /// 디렉토리 항목 생성
    pub fn directory(path: impl Into<PathBuf>, modified: SystemTime) -> Self {
        Self::with_kind(path.into(), EntryKind::Directory, 0, modified)
    }

    /// 상위 디렉토리 표시 항목 생성
    pub fn parent_marker(parent: &Path) -> Self {
        Self {
            name: "..".to_string(),
            path: parent.to_path_buf(),
            kind: EntryKind::ParentMarker,
            size: 0,
            modified: SystemTime::UNIX_EPOCH,
            extension: String::new(),
            is_hidden: false,
        }
    }

    fn with_kind(path: PathBuf, kind: EntryKind, size: u64, modified: SystemTime) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        let extension = if kind == EntryKind::File {
            extension_of(&name)
        } else {
            String::new()
        };
        let is_hidden = name.starts_with('.');
        Self {
            name,
            path,
            kind,
            size,
            modified,
            extension,
            is_hidden,
        }
    }

    /// 숨김 여부 지정 (플랫폼별 숨김 속성 반영용)
    pub fn hidden(mut self, is_hidden: bool) -> Self {
        self.is_hidden = is_hidden;
        self
    }

    /// 디렉토리 여부 확인 (상위 표시 항목 포함)
    pub fn is_directory(&self) -> bool {
        matches!(self.kind, EntryKind::Directory | EntryKind::ParentMarker)
    }

    /// 파일 여부 확인
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// 상위 디렉토리 표시 항목 여부
    pub fn is_parent_marker(&self) -> bool {
        self.kind == EntryKind::ParentMarker
    }

    /// 크기 열 표시 문자열
    pub fn display_size(&self) -> String {
        match self.kind {
            EntryKind::File => format_file_size(self.size),
            EntryKind::Directory => "<DIR>".to_string(),
            EntryKind::ParentMarker => String::new(),
        }
    }

    /// 수정 날짜 열 표시 문자열
    pub fn display_modified(&self) -> String {
        if self.is_parent_marker() {
            String::new()
        } else {
            format_date(self.modified)
        }
    }
}

/// 이름에서 확장자 추출 (`.bashrc` 같은 점 파일은 확장자 없음)
fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(0) | None => String::new(),
        Some(idx) => name[idx + 1..].to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_entry_fields() {
        let entry = DirectoryEntry::file("/tmp/report.final.PDF", 1024, SystemTime::now());
        assert_eq!(entry.name, "report.final.PDF");
        assert_eq!(entry.extension, "PDF");
        assert_eq!(entry.size, 1024);
        assert!(entry.is_file());
        assert!(!entry.is_hidden);
        assert_eq!(entry.display_size(), "1.0 KB");
    }

    #[test]
    fn test_directory_has_no_extension() {
        let entry = DirectoryEntry::directory("/tmp/archive.d", SystemTime::now());
        assert!(entry.is_directory());
        assert!(entry.extension.is_empty());
        assert_eq!(entry.display_size(), "<DIR>");
    }

    #[test]
    fn test_dotfiles_are_hidden_without_extension() {
        let entry = DirectoryEntry::file("/home/u/.bashrc", 10, SystemTime::now());
        assert!(entry.is_hidden);
        assert!(entry.extension.is_empty());
        assert!(!entry.clone().hidden(false).is_hidden);
    }

    #[test]
    fn test_parent_marker() {
        let marker = DirectoryEntry::parent_marker(Path::new("/home"));
        assert!(marker.is_parent_marker());
        assert!(marker.is_directory());
        assert_eq!(marker.name, "..");
        assert_eq!(marker.path, PathBuf::from("/home"));
        assert!(marker.display_modified().is_empty());
    }
}
