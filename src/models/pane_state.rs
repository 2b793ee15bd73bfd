use crate::core::sorting::{sort_entries, SortDirection, SortKey, SortSpec};
use crate::models::directory_entry::DirectoryEntry;
use crate::utils::formatter::{format_file_size, pluralize};
use crate::utils::glob::matches_filter;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// 패널 상태
///
/// 목록 조회 결과(`listing`)를 보관하고, 필터/정렬을 적용한 표시 목록(`entries`)을
/// 다시 만든다. 파일 시스템에는 접근하지 않는다.
#[derive(Debug, Clone)]
pub struct PaneState {
    /// 현재 경로
    pub current_path: PathBuf,
    /// 표시 목록 (상위 표시 + 필터 + 정렬 적용)
    entries: Vec<DirectoryEntry>,
    /// 마지막 조회 결과 원본
    listing: Vec<DirectoryEntry>,
    /// 커서 위치
    pub selected_index: usize,
    /// 다중 선택된 인덱스
    marked: BTreeSet<usize>,
    /// 정렬 설정
    pub sort: SortSpec,
    /// 숨김 파일 표시 여부
    pub show_hidden: bool,
    /// 이름 필터
    pub filter: Option<String>,
}

impl PaneState {
    /// 새 패널 상태 생성 (목록은 비어 있음)
    pub fn new(path: PathBuf) -> Self {
        Self {
            current_path: path,
            entries: Vec::new(),
            listing: Vec::new(),
            selected_index: 0,
            marked: BTreeSet::new(),
            sort: SortSpec::default(),
            show_hidden: false,
            filter: None,
        }
    }

    /// 같은 보기 설정을 가진 빈 패널 (필터는 상속하지 않음)
    pub fn with_settings_of(path: PathBuf, other: &PaneState) -> Self {
        let mut pane = Self::new(path);
        pane.sort = other.sort;
        pane.show_hidden = other.show_hidden;
        pane
    }

    /// 표시 목록
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// 새 목록 적용
    ///
    /// `focus`가 주어지면 해당 이름에 커서를 두고, 없으면 맨 위로 간다.
    pub fn apply_listing(
        &mut self,
        path: PathBuf,
        listing: Vec<DirectoryEntry>,
        focus: Option<&str>,
    ) {
        self.current_path = path;
        self.listing = listing;
        self.selected_index = 0;
        self.rebuild(focus);
    }

    /// 같은 경로의 목록 갱신 (커서 이름 유지)
    pub fn replace_listing(&mut self, listing: Vec<DirectoryEntry>) {
        let focused = self.selected_name();
        self.listing = listing;
        self.rebuild(focused.as_deref());
    }

    /// 정렬 기준 선택. 같은 기준이면 방향을 뒤집는다.
    pub fn set_sort_key(&mut self, key: SortKey) {
        if self.sort.key == key {
            self.sort.direction = self.sort.direction.toggled();
        } else {
            self.sort.key = key;
        }
        self.refresh_view();
    }

    /// 정렬 방향 지정
    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        self.sort.direction = direction;
        self.refresh_view();
    }

    /// 폴더 우선 설정
    pub fn set_folders_first(&mut self, folders_first: bool) {
        self.sort.folders_first = folders_first;
        self.refresh_view();
    }

    /// 숨김 파일 표시 설정
    pub fn set_show_hidden(&mut self, show_hidden: bool) {
        self.show_hidden = show_hidden;
        self.refresh_view();
    }

    /// 필터 설정 (빈 문자열은 해제)
    pub fn set_filter(&mut self, filter: Option<String>) {
        self.filter = filter.filter(|f| !f.trim().is_empty());
        self.refresh_view();
    }

    fn refresh_view(&mut self) {
        let focused = self.selected_name();
        self.rebuild(focused.as_deref());
    }

    fn rebuild(&mut self, focus: Option<&str>) {
        let mut visible: Vec<DirectoryEntry> = self
            .listing
            .iter()
            .filter(|e| self.show_hidden || !e.is_hidden)
            .filter(|e| match &self.filter {
                Some(pattern) => matches_filter(pattern, &e.name),
                None => true,
            })
            .cloned()
            .collect();

        if let Some(parent) = self.current_path.parent() {
            visible.push(DirectoryEntry::parent_marker(parent));
        }

        self.entries = sort_entries(visible, self.sort);
        // 인덱스가 바뀌므로 다중 선택은 무효
        self.marked.clear();

        if let Some(idx) = focus.and_then(|name| self.position_of(name)) {
            self.selected_index = idx;
        }
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        if self.selected_index >= self.entries.len() {
            self.selected_index = self.entries.len().saturating_sub(1);
        }
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| !e.is_parent_marker() && e.name == name)
    }

    /// 이름으로 커서 이동. 없으면 false
    pub fn focus_name(&mut self, name: &str) -> bool {
        match self.position_of(name) {
            Some(idx) => {
                self.selected_index = idx;
                true
            }
            None => false,
        }
    }

    /// 커서를 상대 이동 (범위 내로 고정)
    pub fn move_selection(&mut self, delta: isize) {
        if self.entries.is_empty() {
            return;
        }
        let max = self.entries.len() - 1;
        let target = self.selected_index as isize + delta;
        self.selected_index = target.clamp(0, max as isize) as usize;
    }

    /// 커서를 절대 위치로 이동
    pub fn select_index(&mut self, index: usize) -> bool {
        if index < self.entries.len() {
            self.selected_index = index;
            true
        } else {
            false
        }
    }

    /// 커서 위치 항목
    pub fn selected_entry(&self) -> Option<&DirectoryEntry> {
        self.entries.get(self.selected_index)
    }

    fn selected_name(&self) -> Option<String> {
        self.selected_entry()
            .filter(|e| !e.is_parent_marker())
            .map(|e| e.name.clone())
    }

    /// 다중 선택 토글 (상위 표시 항목은 제외)
    pub fn toggle_mark(&mut self, index: usize) -> bool {
        match self.entries.get(index) {
            Some(entry) if !entry.is_parent_marker() => {
                if !self.marked.remove(&index) {
                    self.marked.insert(index);
                }
                true
            }
            _ => false,
        }
    }

    /// 전체 선택
    pub fn mark_all(&mut self) {
        self.marked = self.selectable_indices().collect();
    }

    /// 선택 반전
    pub fn invert_marks(&mut self) {
        self.marked = self
            .selectable_indices()
            .filter(|i| !self.marked.contains(i))
            .collect();
    }

    /// 선택 해제
    pub fn clear_marks(&mut self) {
        self.marked.clear();
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.marked.contains(&index)
    }

    pub fn marked_count(&self) -> usize {
        self.marked.len()
    }

    fn selectable_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_parent_marker())
            .map(|(i, _)| i)
    }

    /// 작업 대상 경로: 다중 선택이 있으면 그것, 없으면 커서 항목
    pub fn operation_sources(&self) -> Vec<PathBuf> {
        if !self.marked.is_empty() {
            return self
                .marked
                .iter()
                .filter_map(|&i| self.entries.get(i))
                .map(|e| e.path.clone())
                .collect();
        }
        self.selected_entry()
            .filter(|e| !e.is_parent_marker())
            .map(|e| vec![e.path.clone()])
            .unwrap_or_default()
    }

    /// 파일 개수
    pub fn file_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_file()).count()
    }

    /// 디렉토리 개수 (상위 표시 제외)
    pub fn dir_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.is_directory() && !e.is_parent_marker())
            .count()
    }

    /// 전체 크기 (바이트)
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }

    /// 상태 표시 요약 (예: "2 dirs, 3 files, 1.5 KB")
    pub fn summary(&self) -> String {
        format!(
            "{}, {}, {}",
            pluralize(self.dir_count(), "dir", "dirs"),
            pluralize(self.file_count(), "file", "files"),
            format_file_size(self.total_size())
        )
    }

    /// 현재 경로가 주어진 경로와 같은지
    pub fn is_at(&self, path: &Path) -> bool {
        self.current_path == path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;

    fn listing() -> Vec<DirectoryEntry> {
        let now = SystemTime::now();
        vec![
            DirectoryEntry::file("/w/file10.txt", 100, now),
            DirectoryEntry::file("/w/file2.txt", 200, now),
            DirectoryEntry::directory("/w/src", now),
            DirectoryEntry::file("/w/.env", 5, now),
        ]
    }

    fn loaded() -> PaneState {
        let mut pane = PaneState::new(PathBuf::from("/w"));
        pane.apply_listing(PathBuf::from("/w"), listing(), None);
        pane
    }

    fn names(pane: &PaneState) -> Vec<&str> {
        pane.entries().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_listing_gets_marker_sort_and_hidden_filter() {
        let pane = loaded();
        assert_eq!(names(&pane), vec!["..", "src", "file2.txt", "file10.txt"]);
        assert_eq!(pane.selected_index, 0);
    }

    #[test]
    fn test_root_has_no_parent_marker() {
        let mut pane = PaneState::new(PathBuf::from("/"));
        pane.apply_listing(
            PathBuf::from("/"),
            vec![DirectoryEntry::directory("/etc", SystemTime::now())],
            None,
        );
        assert_eq!(names(&pane), vec!["etc"]);
    }

    #[test]
    fn test_show_hidden() {
        let mut pane = loaded();
        pane.set_show_hidden(true);
        assert!(names(&pane).contains(&".env"));
    }

    #[test]
    fn test_filter_keeps_marker() {
        let mut pane = loaded();
        pane.set_filter(Some("*.txt".to_string()));
        assert_eq!(names(&pane), vec!["..", "file2.txt", "file10.txt"]);
        pane.set_filter(Some("  ".to_string()));
        assert!(pane.filter.is_none());
        assert_eq!(pane.entries().len(), 4);
    }

    #[test]
    fn test_set_same_sort_key_toggles_direction() {
        let mut pane = loaded();
        pane.set_sort_key(SortKey::Name);
        assert_eq!(pane.sort.direction, SortDirection::Descending);
        assert_eq!(names(&pane), vec!["..", "src", "file10.txt", "file2.txt"]);

        pane.set_sort_key(SortKey::Size);
        assert_eq!(pane.sort.key, SortKey::Size);
        assert_eq!(pane.sort.direction, SortDirection::Descending);
    }

    #[test]
    fn test_resort_keeps_focus_and_clears_marks() {
        let mut pane = loaded();
        assert!(pane.focus_name("file10.txt"));
        pane.toggle_mark(1);
        pane.set_sort_direction(SortDirection::Descending);
        assert_eq!(pane.selected_entry().unwrap().name, "file10.txt");
        assert_eq!(pane.marked_count(), 0);
    }

    #[test]
    fn test_marks_skip_parent_marker() {
        let mut pane = loaded();
        assert!(!pane.toggle_mark(0));
        pane.mark_all();
        assert_eq!(pane.marked_count(), 3);
        pane.toggle_mark(1);
        pane.invert_marks();
        assert_eq!(pane.marked_count(), 1);
        assert!(pane.is_marked(1));
        pane.clear_marks();
        assert_eq!(pane.marked_count(), 0);
    }

    #[test]
    fn test_operation_sources() {
        let mut pane = loaded();
        // 커서가 ".."이면 대상 없음
        assert!(pane.operation_sources().is_empty());

        pane.move_selection(2);
        assert_eq!(pane.operation_sources(), vec![PathBuf::from("/w/file2.txt")]);

        pane.toggle_mark(1);
        pane.toggle_mark(3);
        assert_eq!(
            pane.operation_sources(),
            vec![PathBuf::from("/w/src"), PathBuf::from("/w/file10.txt")]
        );
    }

    #[test]
    fn test_move_selection_is_clamped() {
        let mut pane = loaded();
        pane.move_selection(-3);
        assert_eq!(pane.selected_index, 0);
        pane.move_selection(100);
        assert_eq!(pane.selected_index, 3);
        assert!(!pane.select_index(4));
    }

    #[test]
    fn test_replace_listing_keeps_focus() {
        let mut pane = loaded();
        pane.focus_name("file10.txt");
        let mut updated = listing();
        updated.push(DirectoryEntry::file("/w/a.txt", 1, SystemTime::now()));
        pane.replace_listing(updated);
        assert_eq!(pane.selected_entry().unwrap().name, "file10.txt");
    }

    #[test]
    fn test_summary() {
        let pane = loaded();
        assert_eq!(pane.dir_count(), 1);
        assert_eq!(pane.file_count(), 2);
        assert_eq!(pane.summary(), "1 dir, 2 files, 300 B");
    }
}
