use super::*;
use crate::models::directory_entry::{DirectoryEntry, EntryKind};
use crate::utils::error::ErrorKind;

/// `child`가 `parent`의 직속 항목이면 그 이름
fn child_name(parent: &Path, child: &Path) -> Option<String> {
    if child.parent() != Some(parent) {
        return None;
    }
    child.file_name().map(|n| n.to_string_lossy().into_owned())
}

impl DualPaneBrowser {
    // === 목록 조회 ===

    /// 목록 조회. 실패하면 상태 메시지로 보고한다.
    pub(super) fn list_or_report(
        &mut self,
        action: &str,
        path: &Path,
    ) -> Result<Vec<DirectoryEntry>> {
        match self.services.lister.list_directory(path) {
            Ok(listing) => Ok(listing),
            Err(err) => {
                self.report_error(action, &err);
                Err(err)
            }
        }
    }

    /// 패널의 활성 탭 목록 다시 읽기 (보고 없이)
    pub(super) fn reload_active_tab(&mut self, side: PaneSide) -> Result<()> {
        let path = self.start_path_of(side);
        let listing = self.services.lister.list_directory(&path)?;
        self.container_mut(side)
            .active_mut()
            .pane
            .replace_listing(listing);
        self.publish(BrowserEvent::PaneChanged(side));
        Ok(())
    }

    /// 활성 탭 목록 다시 읽기. 실패하면 보고한다.
    ///
    /// 폴더가 사라졌으면 남아 있는 가장 가까운 상위 폴더로 옮긴다.
    pub(super) fn reload_or_recover(&mut self, side: PaneSide, action: &str) -> Result<()> {
        let Err(err) = self.reload_active_tab(side) else {
            return Ok(());
        };
        self.report_error(action, &err);
        if err.kind() == ErrorKind::NotFound {
            self.recover_to_ancestor(side);
        }
        Err(err)
    }

    fn recover_to_ancestor(&mut self, side: PaneSide) {
        let missing = self.start_path_of(side);
        for ancestor in missing.ancestors().skip(1) {
            let Ok(listing) = self.services.lister.list_directory(ancestor) else {
                continue;
            };
            log::info!(
                "{} is gone, moved to {}",
                missing.display(),
                ancestor.display()
            );
            let tab = self.container_mut(side).active_mut();
            tab.record_navigation(ancestor.to_path_buf());
            tab.pane.apply_listing(ancestor.to_path_buf(), listing, None);
            self.publish(BrowserEvent::PaneChanged(side));
            return;
        }
    }

    /// 양쪽 패널 갱신 (파일 작업 후). 둘 다 성공하면 true
    pub(super) fn refresh_panes(&mut self) -> bool {
        let mut refreshed = true;
        for side in [PaneSide::Left, PaneSide::Right] {
            refreshed &= self.reload_or_recover(side, "Refresh").is_ok();
        }
        refreshed
    }

    /// 지정 패널의 활성 탭을 `path`로 이동
    ///
    /// 목록 조회가 성공한 뒤에만 히스토리와 패널을 바꾼다.
    fn navigate_side(
        &mut self,
        side: PaneSide,
        path: PathBuf,
        focus: Option<String>,
    ) -> Result<()> {
        let listing = self.list_or_report("Open folder", &path)?;
        let tab = self.container_mut(side).active_mut();
        if !tab.pane.is_at(&path) {
            tab.record_navigation(path.clone());
        }
        log::debug!("tab {} -> {}", tab.id, path.display());
        tab.pane.apply_listing(path, listing, focus.as_deref());
        self.publish(BrowserEvent::PaneChanged(side));
        Ok(())
    }

    // === 이동 ===

    /// 활성 패널을 경로로 이동
    pub fn navigate_to(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        self.navigate_side(self.active_pane, path.into(), None)
    }

    /// 뒤로 가기. 뒤로 스택이 비어 있으면 `Ok(false)`
    pub fn go_back(&mut self) -> Result<bool> {
        let Some(target) = self.active_tab().history.peek_back().map(Path::to_path_buf) else {
            return Ok(false);
        };
        let listing = self.list_or_report("Go back", &target)?;
        let focus = child_name(&target, self.active_path());
        let side = self.active_pane;
        let tab = self.active_tab_mut();
        tab.history.go_back();
        tab.pane.apply_listing(target, listing, focus.as_deref());
        self.publish(BrowserEvent::PaneChanged(side));
        Ok(true)
    }

    /// 앞으로 가기. 앞으로 스택이 비어 있으면 `Ok(false)`
    pub fn go_forward(&mut self) -> Result<bool> {
        let Some(target) = self
            .active_tab()
            .history
            .peek_forward()
            .map(Path::to_path_buf)
        else {
            return Ok(false);
        };
        let listing = self.list_or_report("Go forward", &target)?;
        let focus = child_name(&target, self.active_path());
        let side = self.active_pane;
        let tab = self.active_tab_mut();
        tab.history.go_forward();
        tab.pane.apply_listing(target, listing, focus.as_deref());
        self.publish(BrowserEvent::PaneChanged(side));
        Ok(true)
    }

    /// 상위 디렉토리로 이동하고 방금 떠난 디렉토리에 커서를 둔다.
    /// 루트면 `Ok(false)`
    pub fn go_to_parent(&mut self) -> Result<bool> {
        let current = self.active_path().to_path_buf();
        let Some(parent) = current.parent() else {
            return Ok(false);
        };
        let focus = child_name(parent, &current);
        self.navigate_side(self.active_pane, parent.to_path_buf(), focus)?;
        Ok(true)
    }

    /// 커서 항목 열기
    ///
    /// 디렉토리는 이동, `..`은 상위로, 파일은 `OpenRequested` 이벤트로 셸에 위임한다.
    pub fn enter_selected(&mut self) -> Result<()> {
        let Some(entry) = self.active_pane_state().selected_entry().cloned() else {
            return Ok(());
        };
        match entry.kind {
            EntryKind::ParentMarker => self.go_to_parent().map(|_| ()),
            EntryKind::Directory => self.navigate_to(entry.path),
            EntryKind::File => {
                log::debug!("open requested: {}", entry.path.display());
                self.publish(BrowserEvent::OpenRequested(entry.path));
                Ok(())
            }
        }
    }

    /// 활성 패널 다시 읽기 (히스토리 변경 없음)
    pub fn refresh(&mut self) -> Result<()> {
        self.reload_or_recover(self.active_pane, "Refresh")
    }

    /// 다른 패널을 현재 경로로 이동
    pub fn sync_other_pane(&mut self) -> Result<()> {
        let path = self.active_path().to_path_buf();
        self.navigate_side(self.active_pane.other(), path, None)
    }

    // === 커서/선택 ===

    fn update_active_pane<F: FnOnce(&mut PaneState)>(&mut self, update: F) {
        let side = self.active_pane;
        update(&mut self.active_tab_mut().pane);
        self.publish(BrowserEvent::PaneChanged(side));
    }

    pub fn move_selection(&mut self, delta: isize) {
        self.update_active_pane(|pane| pane.move_selection(delta));
    }

    pub fn go_to_top(&mut self) {
        self.update_active_pane(|pane| {
            pane.select_index(0);
        });
    }

    pub fn go_to_bottom(&mut self) {
        self.update_active_pane(|pane| {
            let last = pane.entries().len().saturating_sub(1);
            pane.select_index(last);
        });
    }

    /// 인덱스로 커서 이동 (범위 밖이면 false)
    pub fn select_index(&mut self, index: usize) -> bool {
        if index >= self.active_pane_state().entries().len() {
            return false;
        }
        self.update_active_pane(|pane| {
            pane.select_index(index);
        });
        true
    }

    /// 커서 항목 선택 토글 후 아래로
    pub fn toggle_mark_and_move_down(&mut self) {
        self.update_active_pane(|pane| {
            pane.toggle_mark(pane.selected_index);
            pane.move_selection(1);
        });
    }

    pub fn mark_all(&mut self) {
        self.update_active_pane(PaneState::mark_all);
    }

    pub fn invert_marks(&mut self) {
        self.update_active_pane(PaneState::invert_marks);
    }

    pub fn clear_marks(&mut self) {
        self.update_active_pane(PaneState::clear_marks);
    }

    // === 보기 설정 ===

    fn show_sort_indicator(&mut self) {
        let indicator = self.active_pane_state().sort.indicator();
        self.set_status(indicator);
    }

    /// 정렬 기준 선택 (같은 기준이면 방향 반전)
    pub fn sort_by(&mut self, key: SortKey) {
        self.update_active_pane(|pane| pane.set_sort_key(key));
        log::debug!("sort -> {:?}", self.active_pane_state().sort);
        self.show_sort_indicator();
    }

    pub fn toggle_sort_direction(&mut self) {
        self.update_active_pane(|pane| pane.set_sort_direction(pane.sort.direction.toggled()));
        self.show_sort_indicator();
    }

    pub fn toggle_folders_first(&mut self) {
        self.update_active_pane(|pane| pane.set_folders_first(!pane.sort.folders_first));
    }

    pub fn toggle_hidden(&mut self) {
        self.update_active_pane(|pane| pane.set_show_hidden(!pane.show_hidden));
    }

    /// 이름 필터 설정 (`None` 또는 빈 문자열은 해제)
    pub fn set_filter(&mut self, filter: Option<String>) {
        self.update_active_pane(|pane| pane.set_filter(filter));
    }
}
