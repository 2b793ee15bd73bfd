//! 디렉토리 목록 정렬
//!
//! 정렬은 (항목, 정렬 기준, 방향, 폴더 우선) 에 대한 순수 함수다.

use crate::core::natural::natural_cmp;
use crate::models::directory_entry::DirectoryEntry;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// 정렬 기준
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// 이름 (자연 정렬)
    #[default]
    Name,
    /// 크기
    Size,
    /// 종류 (확장자)
    Type,
    /// 수정 날짜
    Modified,
}

impl SortKey {
    /// 표시 이름
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::Size => "Size",
            SortKey::Type => "Type",
            SortKey::Modified => "Date modified",
        }
    }
}

/// 정렬 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// 오름차순
    #[default]
    Ascending,
    /// 내림차순
    Descending,
}

impl SortDirection {
    /// 반대 방향
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// 정렬 설정 묶음
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
    pub folders_first: bool,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::Name,
            direction: SortDirection::Ascending,
            folders_first: true,
        }
    }
}

impl SortSpec {
    /// 상태 표시용 문자열 (예: "Sort: Name ↑")
    pub fn indicator(&self) -> String {
        let arrow = match self.direction {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        };
        format!("Sort: {} {}", self.key.label(), arrow)
    }
}

/// 선택한 기준으로만 두 항목 비교 (방향 미적용)
pub fn compare_by_key(a: &DirectoryEntry, b: &DirectoryEntry, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => natural_cmp(&a.name, &b.name),
        SortKey::Size => a.size.cmp(&b.size),
        SortKey::Type => a
            .extension
            .to_lowercase()
            .cmp(&b.extension.to_lowercase()),
        SortKey::Modified => a.modified.cmp(&b.modified),
    }
}

/// 목록 정렬
///
/// 1. 상위 디렉토리 표시(`..`)는 항상 맨 앞
/// 2. `folders_first`면 폴더 묶음 뒤에 파일 묶음, 각 묶음은 같은 기준으로 정렬
/// 3. 기준 값이 같으면 이름(자연 정렬, 오름차순)으로 결정
pub fn sort_entries(mut entries: Vec<DirectoryEntry>, spec: SortSpec) -> Vec<DirectoryEntry> {
    entries.sort_by(|a, b| {
        let marker = b.is_parent_marker().cmp(&a.is_parent_marker());
        if marker != Ordering::Equal {
            return marker;
        }
        if spec.folders_first {
            let group = b.is_directory().cmp(&a.is_directory());
            if group != Ordering::Equal {
                return group;
            }
        }
        spec.direction
            .apply(compare_by_key(a, b, spec.key))
            .then_with(|| natural_cmp(&a.name, &b.name))
    });
    entries
}
