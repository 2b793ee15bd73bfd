use crate::models::history::NavigationHistory;
use crate::models::pane_state::PaneState;
use crate::utils::path_display::title_from_path;
use std::path::{Path, PathBuf};

/// 탭 식별자
pub type TabId = usize;

/// 탭 수명 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabState {
    /// 열림
    Open,
    /// 닫기 확인 대기
    ClosingRequested,
    /// 닫힘 (다시 열기 버퍼 안에서만 존재)
    Closed,
}

/// 탭: 자체 경로, 히스토리, 목록 상태를 가진 탐색 단위
#[derive(Debug, Clone)]
pub struct Tab {
    pub id: TabId,
    pub pinned: bool,
    pub state: TabState,
    pub history: NavigationHistory,
    pub pane: PaneState,
}

impl Tab {
    /// 새 탭 생성. 경로를 히스토리의 현재 위치로 기록한다.
    pub fn new(id: TabId, pane: PaneState, history_limit: usize) -> Self {
        let mut history = NavigationHistory::new(history_limit);
        history.navigate(pane.current_path.clone());
        Self {
            id,
            pinned: false,
            state: TabState::Open,
            history,
            pane,
        }
    }

    /// 현재 경로
    pub fn current_path(&self) -> &Path {
        &self.pane.current_path
    }

    /// 표시 제목 (경로의 마지막 요소)
    pub fn title(&self) -> String {
        title_from_path(self.current_path())
    }

    pub fn is_open(&self) -> bool {
        self.state != TabState::Closed
    }

    /// 같은 경로와 보기 설정을 가진 새 탭 (히스토리는 새로 시작)
    pub fn duplicate(&self, id: TabId, history_limit: usize) -> Self {
        let pane = PaneState::with_settings_of(self.pane.current_path.clone(), &self.pane);
        Self::new(id, pane, history_limit)
    }

    /// 경로 이동 기록 + 패널 경로 동기화는 호출자가 목록 조회 성공 후 수행
    pub fn record_navigation(&mut self, path: PathBuf) {
        self.history.navigate(path);
    }
}
