use crate::models::history::DEFAULT_HISTORY_LIMIT;
use crate::models::pane_state::PaneState;
use crate::models::tab::{Tab, TabId, TabState};
use crate::utils::path_display::truncate_middle;
use std::collections::VecDeque;

/// 다시 열기 버퍼 기본 크기
pub const DEFAULT_CLOSED_TAB_LIMIT: usize = 10;

/// 닫힌 탭 (다시 열기용)
#[derive(Debug, Clone)]
struct ClosedTab {
    tab: Tab,
    index: usize,
}

/// 패널별 탭 컨테이너
///
/// - 탭은 최소 1개
/// - 고정 탭은 항상 목록 앞쪽에 연속으로 위치
#[derive(Debug, Clone)]
pub struct TabContainer {
    tabs: Vec<Tab>,
    active_tab: usize,
    next_id: TabId,
    closed: VecDeque<ClosedTab>,
    closed_limit: usize,
    history_limit: usize,
}

impl TabContainer {
    /// 초기 패널로 컨테이너 생성 (탭 1개)
    pub fn new(initial: PaneState) -> Self {
        Self::with_limits(initial, DEFAULT_HISTORY_LIMIT, DEFAULT_CLOSED_TAB_LIMIT)
    }

    /// 히스토리/다시 열기 버퍼 크기 지정
    pub fn with_limits(initial: PaneState, history_limit: usize, closed_limit: usize) -> Self {
        Self {
            tabs: vec![Tab::new(1, initial, history_limit)],
            active_tab: 0,
            next_id: 2,
            closed: VecDeque::new(),
            closed_limit,
            history_limit,
        }
    }

    /// 저장된 탭 목록으로 복원. 비어 있으면 None
    pub fn from_tabs(
        tabs: Vec<Tab>,
        active: usize,
        history_limit: usize,
        closed_limit: usize,
    ) -> Option<Self> {
        if tabs.is_empty() {
            return None;
        }
        let next_id = tabs.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let mut container = Self {
            tabs,
            active_tab: 0,
            next_id,
            closed: VecDeque::new(),
            closed_limit,
            history_limit,
        };
        let active_id = container.tabs[active.min(container.tabs.len() - 1)].id;
        container.normalize_pins();
        container.activate_id(active_id);
        Some(container)
    }

    // === 조회 ===

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active_index(&self) -> usize {
        self.active_tab
    }

    pub fn active(&self) -> &Tab {
        &self.tabs[self.active_tab]
    }

    pub fn active_mut(&mut self) -> &mut Tab {
        &mut self.tabs[self.active_tab]
    }

    pub fn active_id(&self) -> TabId {
        self.active().id
    }

    pub fn index_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    pub fn tab(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn tab_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == id)
    }

    pub fn pinned_count(&self) -> usize {
        self.tabs.iter().take_while(|t| t.pinned).count()
    }

    pub fn closed_count(&self) -> usize {
        self.closed.len()
    }

    /// 탭 제목 목록 (max_width가 있으면 중간 생략)
    pub fn titles(&self, max_width: Option<usize>) -> Vec<String> {
        self.tabs
            .iter()
            .map(|tab| match max_width {
                Some(width) => truncate_middle(&tab.title(), width),
                None => tab.title(),
            })
            .collect()
    }

    // === 생성 ===

    fn allocate_id(&mut self) -> TabId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// 첫 비고정 위치 이후에서 활성 탭 바로 뒤
    fn insert_position(&self) -> usize {
        (self.active_tab + 1).max(self.pinned_count())
    }

    /// 새 탭 생성 + 활성화
    pub fn create(&mut self, pane: PaneState) -> TabId {
        let id = self.allocate_id();
        let tab = Tab::new(id, pane, self.history_limit);
        let pos = self.insert_position();
        self.tabs.insert(pos, tab);
        self.active_tab = pos;
        log::debug!("tab {} created at {}", id, pos);
        id
    }

    /// 탭 복제 (같은 경로, 새 히스토리) + 활성화
    pub fn duplicate(&mut self, id: TabId) -> Option<TabId> {
        let source = self.index_of(id)?;
        let new_id = self.allocate_id();
        let copy = self.tabs[source].duplicate(new_id, self.history_limit);
        let pos = (source + 1).max(self.pinned_count());
        self.tabs.insert(pos, copy);
        self.active_tab = pos;
        log::debug!("tab {} duplicated as {}", id, new_id);
        Some(new_id)
    }

    // === 닫기 ===

    /// 닫기 요청 (확인 대기 상태로 전환). 마지막 탭이면 false
    pub fn request_close(&mut self, id: TabId) -> bool {
        if self.tabs.len() <= 1 {
            return false;
        }
        match self.tab_mut(id) {
            Some(tab) if tab.state == TabState::Open => {
                tab.state = TabState::ClosingRequested;
                true
            }
            _ => false,
        }
    }

    /// 닫기 요청 취소
    pub fn cancel_close(&mut self, id: TabId) -> bool {
        match self.tab_mut(id) {
            Some(tab) if tab.state == TabState::ClosingRequested => {
                tab.state = TabState::Open;
                true
            }
            _ => false,
        }
    }

    /// 탭 닫기
    ///
    /// 마지막 남은 탭이면 아무것도 하지 않고 false.
    /// 활성 탭을 닫으면 같은 인덱스의 탭, 없으면 마지막 탭을 활성화한다.
    pub fn close(&mut self, id: TabId) -> bool {
        let Some((mut tab, index)) = self.take(id) else {
            return false;
        };
        tab.state = TabState::Closed;
        self.remember_closed(tab, index);
        log::debug!("tab {} closed", id);
        true
    }

    /// 다시 열기 목록에 남기지 않고 탭 제거 (복원 실패한 탭용)
    pub fn discard(&mut self, id: TabId) -> bool {
        if self.take(id).is_none() {
            return false;
        }
        log::debug!("tab {} discarded", id);
        true
    }

    fn take(&mut self, id: TabId) -> Option<(Tab, usize)> {
        if self.tabs.len() <= 1 {
            return None;
        }
        let index = self.index_of(id)?;
        let tab = self.tabs.remove(index);
        if index < self.active_tab {
            self.active_tab -= 1;
        } else if self.active_tab >= self.tabs.len() {
            self.active_tab = self.tabs.len() - 1;
        }
        Some((tab, index))
    }

    /// 활성 탭 닫기
    pub fn close_active(&mut self) -> bool {
        let id = self.active_id();
        self.close(id)
    }

    /// 지정 탭을 제외한 비고정 탭 모두 닫기. 닫힌 개수 반환
    pub fn close_others(&mut self, id: TabId) -> usize {
        let victims: Vec<TabId> = self
            .tabs
            .iter()
            .filter(|t| t.id != id && !t.pinned)
            .map(|t| t.id)
            .collect();
        self.close_many(id, victims)
    }

    /// 지정 탭 오른쪽의 비고정 탭 모두 닫기. 닫힌 개수 반환
    pub fn close_to_right(&mut self, id: TabId) -> usize {
        let Some(index) = self.index_of(id) else {
            return 0;
        };
        let victims: Vec<TabId> = self.tabs[index + 1..]
            .iter()
            .filter(|t| !t.pinned)
            .map(|t| t.id)
            .collect();
        self.close_many(id, victims)
    }

    fn close_many(&mut self, keep: TabId, victims: Vec<TabId>) -> usize {
        if self.index_of(keep).is_none() {
            return 0;
        }
        let active_id = self.active_id();
        let mut closed = 0;
        for victim in victims {
            if self.close(victim) {
                closed += 1;
            }
        }
        if self.index_of(active_id).is_none() {
            self.activate_id(keep);
        }
        closed
    }

    fn remember_closed(&mut self, tab: Tab, index: usize) {
        if self.closed_limit == 0 {
            return;
        }
        self.closed.push_back(ClosedTab { tab, index });
        while self.closed.len() > self.closed_limit {
            self.closed.pop_front();
        }
    }

    /// 최근 닫은 탭 다시 열기 + 활성화
    pub fn reopen_closed(&mut self) -> Option<TabId> {
        let ClosedTab { mut tab, index } = self.closed.pop_back()?;
        tab.state = TabState::Open;
        let pinned = self.pinned_count();
        let pos = if tab.pinned {
            index.min(pinned)
        } else {
            index.clamp(pinned, self.tabs.len())
        };
        let id = tab.id;
        self.tabs.insert(pos, tab);
        self.active_tab = pos;
        log::debug!("tab {} reopened at {}", id, pos);
        Some(id)
    }

    // === 고정/순서 ===

    /// 탭 고정. 고정 영역의 끝으로 이동한다.
    pub fn pin(&mut self, id: TabId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if self.tabs[index].pinned {
            return false;
        }
        let target = self.pinned_count();
        self.reposition(index, target, |tab| tab.pinned = true);
        true
    }

    /// 탭 고정 해제. 비고정 영역의 처음으로 이동한다.
    pub fn unpin(&mut self, id: TabId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if !self.tabs[index].pinned {
            return false;
        }
        let target = self.pinned_count() - 1;
        self.reposition(index, target, |tab| tab.pinned = false);
        true
    }

    /// 탭 순서 이동. 고정 탭은 고정 영역 안에서만, 비고정 탭은 그 뒤에서만 움직인다.
    pub fn move_tab(&mut self, from: usize, to: usize) -> bool {
        if from >= self.tabs.len() {
            return false;
        }
        let pinned = self.pinned_count();
        let target = if self.tabs[from].pinned {
            to.min(pinned - 1)
        } else {
            to.clamp(pinned, self.tabs.len() - 1)
        };
        if target == from {
            return false;
        }
        self.reposition(from, target, |_| {});
        true
    }

    fn reposition<F: FnOnce(&mut Tab)>(&mut self, from: usize, to: usize, update: F) {
        let active_id = self.active_id();
        let mut tab = self.tabs.remove(from);
        update(&mut tab);
        self.tabs.insert(to.min(self.tabs.len()), tab);
        self.activate_id(active_id);
    }

    /// 고정 탭을 앞쪽으로 모은다 (복원 시 사용)
    fn normalize_pins(&mut self) {
        // sort_by_key는 안정 정렬이므로 각 영역 안의 순서가 유지된다
        self.tabs.sort_by_key(|t| !t.pinned);
    }

    // === 전환 ===

    fn activate_id(&mut self, id: TabId) {
        if let Some(index) = self.index_of(id) {
            self.active_tab = index;
        }
    }

    /// id로 전환
    pub fn activate(&mut self, id: TabId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                self.active_tab = index;
                true
            }
            None => false,
        }
    }

    /// 인덱스로 전환 (0-based)
    pub fn switch_to(&mut self, index: usize) -> bool {
        if index < self.tabs.len() {
            self.active_tab = index;
            true
        } else {
            false
        }
    }

    /// 다음 탭 (순환)
    pub fn next_tab(&mut self) {
        self.active_tab = (self.active_tab + 1) % self.tabs.len();
    }

    /// 이전 탭 (순환)
    pub fn prev_tab(&mut self) {
        if self.active_tab == 0 {
            self.active_tab = self.tabs.len() - 1;
        } else {
            self.active_tab -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    fn pane(path: &str) -> PaneState {
        PaneState::new(PathBuf::from(path))
    }

    fn container_with(paths: &[&str]) -> TabContainer {
        let mut container = TabContainer::new(pane(paths[0]));
        for path in &paths[1..] {
            container.create(pane(path));
        }
        container
    }

    fn paths(container: &TabContainer) -> Vec<String> {
        container
            .tabs()
            .iter()
            .map(|t| t.current_path().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_initial_state() {
        let container = TabContainer::new(pane("/tmp"));
        assert_eq!(container.len(), 1);
        assert_eq!(container.active_index(), 0);
        assert_eq!(container.active().current_path(), Path::new("/tmp"));
    }

    #[test]
    fn test_create_inserts_after_active_and_activates() {
        let mut container = container_with(&["/a", "/b"]);
        container.switch_to(0);
        let id = container.create(pane("/c"));
        assert_eq!(paths(&container), vec!["/a", "/c", "/b"]);
        assert_eq!(container.active_id(), id);
        assert_eq!(container.active_index(), 1);
    }

    #[test]
    fn test_close_last_tab_is_noop() {
        let mut container = TabContainer::new(pane("/tmp"));
        let id = container.active_id();
        assert!(!container.close(id));
        assert_eq!(container.len(), 1);
        assert_eq!(container.closed_count(), 0);
    }

    #[test]
    fn test_close_active_with_two_tabs() {
        let mut container = container_with(&["/a", "/b"]);
        let first = container.tabs()[0].id;
        assert!(container.close_active());
        assert_eq!(container.len(), 1);
        assert_eq!(container.active_id(), first);
    }

    #[test]
    fn test_close_active_prefers_same_index() {
        let mut container = container_with(&["/a", "/b", "/c"]);
        container.switch_to(1);
        let third = container.tabs()[2].id;
        container.close_active();
        assert_eq!(container.active_index(), 1);
        assert_eq!(container.active_id(), third);
    }

    #[test]
    fn test_close_inactive_keeps_active_tab() {
        let mut container = container_with(&["/a", "/b", "/c"]);
        let active = container.active_id();
        let first = container.tabs()[0].id;
        container.close(first);
        assert_eq!(container.active_id(), active);
        assert_eq!(container.active_index(), 1);
    }

    #[test]
    fn test_discard_skips_reopen_buffer() {
        let mut container = container_with(&["/a", "/b", "/c"]);
        container.switch_to(1);
        let id = container.active_id();
        assert!(container.discard(id));
        assert_eq!(paths(&container), vec!["/a", "/c"]);
        assert_eq!(container.active().current_path(), Path::new("/c"));
        assert_eq!(container.closed_count(), 0);

        let id = container.active_id();
        assert!(container.discard(id));
        let last = container.active_id();
        assert!(!container.discard(last));
    }

    #[test]
    fn test_duplicate() {
        let mut container = container_with(&["/a", "/b"]);
        let first = container.tabs()[0].id;
        let copy = container.duplicate(first).unwrap();
        assert_eq!(paths(&container), vec!["/a", "/a", "/b"]);
        assert_eq!(container.active_id(), copy);
        assert!(container.duplicate(999).is_none());
    }

    #[test]
    fn test_pin_moves_to_front() {
        let mut container = container_with(&["/a", "/b", "/c"]);
        let third = container.tabs()[2].id;
        assert!(container.pin(third));
        assert_eq!(container.index_of(third), Some(0));
        assert_eq!(paths(&container), vec!["/c", "/a", "/b"]);
        assert_eq!(container.pinned_count(), 1);
        // 활성 탭은 id 기준으로 유지
        assert_eq!(container.active_id(), third);
        assert!(!container.pin(third));
    }

    #[test]
    fn test_second_pin_goes_after_first() {
        let mut container = container_with(&["/a", "/b", "/c"]);
        let second = container.tabs()[1].id;
        let third = container.tabs()[2].id;
        container.pin(third);
        container.pin(second);
        assert_eq!(paths(&container), vec!["/c", "/b", "/a"]);
        assert_eq!(container.pinned_count(), 2);
    }

    #[test]
    fn test_unpin_moves_after_pinned_block() {
        let mut container = container_with(&["/a", "/b", "/c"]);
        let ids: Vec<TabId> = container.tabs().iter().map(|t| t.id).collect();
        container.pin(ids[1]);
        container.pin(ids[2]);
        assert_eq!(paths(&container), vec!["/b", "/c", "/a"]);
        assert!(container.unpin(ids[1]));
        assert_eq!(paths(&container), vec!["/c", "/b", "/a"]);
        assert_eq!(container.pinned_count(), 1);
        assert!(!container.unpin(ids[1]));
    }

    #[test]
    fn test_new_tab_never_enters_pinned_block() {
        let mut container = container_with(&["/a", "/b"]);
        let first = container.tabs()[0].id;
        let second = container.tabs()[1].id;
        container.pin(first);
        container.pin(second);
        container.activate(first);
        container.create(pane("/n"));
        assert_eq!(paths(&container), vec!["/a", "/b", "/n"]);
    }

    #[test]
    fn test_move_tab_respects_pinned_block() {
        let mut container = container_with(&["/a", "/b", "/c", "/d"]);
        let first = container.tabs()[0].id;
        container.pin(first);
        // 비고정 탭은 고정 영역으로 들어갈 수 없다
        assert!(container.move_tab(3, 0));
        assert_eq!(paths(&container), vec!["/a", "/d", "/b", "/c"]);
        // 고정 탭은 고정 영역 밖으로 나갈 수 없다
        assert!(!container.move_tab(0, 3));
        assert!(!container.move_tab(9, 0));
    }

    #[test]
    fn test_close_others_and_to_right_skip_pinned() {
        let mut container = container_with(&["/a", "/b", "/c", "/d"]);
        let ids: Vec<TabId> = container.tabs().iter().map(|t| t.id).collect();
        container.pin(ids[3]);
        // 순서: d(고정), a, b, c
        assert_eq!(container.close_to_right(ids[0]), 2);
        assert_eq!(paths(&container), vec!["/d", "/a"]);

        container.create(pane("/e"));
        assert_eq!(container.close_others(ids[0]), 1);
        assert_eq!(paths(&container), vec!["/d", "/a"]);
        assert_eq!(container.active_id(), ids[0]);
    }

    #[test]
    fn test_reopen_closed_is_lifo_and_restores_history() {
        let mut container = container_with(&["/a", "/b", "/c"]);
        let second = container.tabs()[1].id;
        container
            .tab_mut(second)
            .unwrap()
            .record_navigation(PathBuf::from("/b/inner"));
        container.close(second);
        let third = container.tabs()[1].id;
        container.close(third);

        assert_eq!(container.reopen_closed(), Some(third));
        assert_eq!(container.reopen_closed(), Some(second));
        assert_eq!(container.reopen_closed(), None);

        assert_eq!(paths(&container), vec!["/a", "/b", "/c"]);
        let reopened = container.tab(second).unwrap();
        assert_eq!(reopened.state, TabState::Open);
        assert!(reopened.history.can_go_back());
        assert_eq!(container.active_id(), second);
    }

    #[test]
    fn test_closed_buffer_is_bounded() {
        let mut container = TabContainer::new(pane("/0"));
        for i in 1..=12 {
            container.create(pane(&format!("/{}", i)));
        }
        for _ in 0..12 {
            container.close_active();
        }
        assert_eq!(container.len(), 1);
        assert_eq!(container.closed_count(), DEFAULT_CLOSED_TAB_LIMIT);
    }

    #[test]
    fn test_request_and_cancel_close() {
        let mut container = container_with(&["/a", "/b"]);
        let id = container.active_id();
        assert!(container.request_close(id));
        assert_eq!(container.tab(id).unwrap().state, TabState::ClosingRequested);
        assert!(container.cancel_close(id));
        assert_eq!(container.tab(id).unwrap().state, TabState::Open);
        assert!(!container.cancel_close(id));

        let mut single = TabContainer::new(pane("/only"));
        let only = single.active_id();
        assert!(!single.request_close(only));
    }

    #[test]
    fn test_next_prev_and_switch() {
        let mut container = container_with(&["/a", "/b", "/c"]);
        assert_eq!(container.active_index(), 2);
        container.next_tab();
        assert_eq!(container.active_index(), 0);
        container.prev_tab();
        assert_eq!(container.active_index(), 2);
        assert!(container.switch_to(1));
        assert!(!container.switch_to(5));
        assert_eq!(container.active_index(), 1);
    }

    #[test]
    fn test_from_tabs_normalizes_pins() {
        let mut a = Tab::new(4, pane("/a"), 50);
        let mut b = Tab::new(7, pane("/b"), 50);
        a.pinned = false;
        b.pinned = true;
        let container = TabContainer::from_tabs(vec![a, b], 0, 50, 10).unwrap();
        assert_eq!(paths(&container), vec!["/b", "/a"]);
        assert_eq!(container.active_id(), 4);
        assert!(TabContainer::from_tabs(Vec::new(), 0, 50, 10).is_none());
    }

    #[test]
    fn test_titles() {
        let container = container_with(&["/home/user/projects", "/"]);
        assert_eq!(container.titles(None), vec!["projects", "/"]);
        assert_eq!(container.titles(Some(5)), vec!["p...s", "/"]);
    }
}
