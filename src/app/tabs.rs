use super::*;
use crate::models::TabId;

impl DualPaneBrowser {
    /// 탭 변경 후 활성 탭 목록 갱신 + 알림
    fn after_tab_change(&mut self, side: PaneSide) {
        // 실패는 상태 메시지로 이미 보고됨
        let _ = self.reload_or_recover(side, "Switch tab");
        self.publish(BrowserEvent::TabsChanged(side));
    }

    /// 경로로 새 탭 열기. 보기 설정은 현재 탭을 따른다.
    pub fn open_tab(&mut self, path: impl Into<PathBuf>) -> Result<TabId> {
        let path = path.into();
        let listing = self.list_or_report("New tab", &path)?;
        let side = self.active_pane;
        let mut pane = PaneState::with_settings_of(path.clone(), self.active_pane_state());
        pane.apply_listing(path, listing, None);
        let id = self.container_mut(side).create(pane);
        self.publish(BrowserEvent::TabsChanged(side));
        self.publish(BrowserEvent::PaneChanged(side));
        Ok(id)
    }

    /// 현재 경로로 새 탭
    pub fn new_tab(&mut self) -> Result<TabId> {
        let path = self.active_path().to_path_buf();
        self.open_tab(path)
    }

    /// 탭 닫기. 마지막 탭이면 false
    pub fn close_tab(&mut self, id: TabId) -> bool {
        let side = self.active_pane;
        if !self.container_mut(side).close(id) {
            self.set_status("The last tab cannot be closed.");
            return false;
        }
        self.after_tab_change(side);
        true
    }

    pub fn close_active_tab(&mut self) -> bool {
        let id = self.container(self.active_pane).active_id();
        self.close_tab(id)
    }

    /// 닫기 확인 대기 상태로 전환
    pub fn request_close_tab(&mut self, id: TabId) -> bool {
        let side = self.active_pane;
        let changed = self.container_mut(side).request_close(id);
        if changed {
            self.publish(BrowserEvent::TabsChanged(side));
        }
        changed
    }

    /// 닫기 요청 취소
    pub fn cancel_close_tab(&mut self, id: TabId) -> bool {
        let side = self.active_pane;
        let changed = self.container_mut(side).cancel_close(id);
        if changed {
            self.publish(BrowserEvent::TabsChanged(side));
        }
        changed
    }

    /// 활성 탭 복제 (히스토리는 새로 시작)
    pub fn duplicate_active_tab(&mut self) -> Option<TabId> {
        let side = self.active_pane;
        let container = self.container_mut(side);
        let id = container.active_id();
        let new_id = container.duplicate(id)?;
        self.after_tab_change(side);
        Some(new_id)
    }

    /// 활성 탭 고정/해제
    pub fn toggle_pin_active_tab(&mut self) {
        let side = self.active_pane;
        let container = self.container_mut(side);
        let id = container.active_id();
        let pinned = container.active().pinned;
        let changed = if pinned {
            container.unpin(id)
        } else {
            container.pin(id)
        };
        if changed {
            log::debug!("tab {} pinned={}", id, !pinned);
            self.publish(BrowserEvent::TabsChanged(side));
        }
    }

    pub fn pin_tab(&mut self, id: TabId) -> bool {
        let side = self.active_pane;
        let changed = self.container_mut(side).pin(id);
        if changed {
            self.publish(BrowserEvent::TabsChanged(side));
        }
        changed
    }

    pub fn unpin_tab(&mut self, id: TabId) -> bool {
        let side = self.active_pane;
        let changed = self.container_mut(side).unpin(id);
        if changed {
            self.publish(BrowserEvent::TabsChanged(side));
        }
        changed
    }

    pub fn next_tab(&mut self) {
        let side = self.active_pane;
        if self.container(side).len() > 1 {
            self.container_mut(side).next_tab();
            self.after_tab_change(side);
        }
    }

    pub fn prev_tab(&mut self) {
        let side = self.active_pane;
        if self.container(side).len() > 1 {
            self.container_mut(side).prev_tab();
            self.after_tab_change(side);
        }
    }

    /// 인덱스로 탭 전환 (0-based)
    pub fn switch_tab(&mut self, index: usize) -> bool {
        let side = self.active_pane;
        if self.container(side).active_index() == index {
            return false;
        }
        if !self.container_mut(side).switch_to(index) {
            return false;
        }
        self.after_tab_change(side);
        true
    }

    /// 활성 탭 외의 비고정 탭 닫기
    pub fn close_other_tabs(&mut self) -> usize {
        let side = self.active_pane;
        let container = self.container_mut(side);
        let id = container.active_id();
        let closed = container.close_others(id);
        if closed > 0 {
            self.after_tab_change(side);
        }
        closed
    }

    /// 활성 탭 오른쪽의 비고정 탭 닫기
    pub fn close_tabs_to_right(&mut self) -> usize {
        let side = self.active_pane;
        let container = self.container_mut(side);
        let id = container.active_id();
        let closed = container.close_to_right(id);
        if closed > 0 {
            self.after_tab_change(side);
        }
        closed
    }

    /// 최근 닫은 탭 다시 열기
    pub fn reopen_closed_tab(&mut self) -> Option<TabId> {
        let side = self.active_pane;
        let Some(id) = self.container_mut(side).reopen_closed() else {
            self.set_status("No recently closed tabs.");
            return None;
        };
        self.after_tab_change(side);
        Some(id)
    }

    /// 탭 순서 이동
    pub fn move_tab(&mut self, from: usize, to: usize) -> bool {
        let side = self.active_pane;
        let changed = self.container_mut(side).move_tab(from, to);
        if changed {
            self.publish(BrowserEvent::TabsChanged(side));
        }
        changed
    }

    /// 패널의 탭 제목 목록
    pub fn tab_titles(&self, side: PaneSide, max_width: Option<usize>) -> Vec<String> {
        self.container(side).titles(max_width)
    }
}
