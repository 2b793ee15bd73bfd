//! 듀얼 패널 브라우저 (뷰모델 중재자)
//!
//! 좌/우 탭 컨테이너, 클립보드, 상태 메시지를 소유하고 모든 커맨드를 받아
//! 주입된 협력자(목록 조회, 파일 작업, 세션 저장소)에 위임한다.
//! 협력자 호출이 성공한 뒤에만 상태를 바꾼다.

use crate::core::commands::Command;
use crate::core::sorting::SortKey;
use crate::models::{
    ClipboardPayload, OperationProgress, PaneState, Tab, TabContainer,
};
use crate::models::operation::CancellationToken;
use crate::system::session::{PaneSession, PaneSide, SessionSnapshot, SESSION_VERSION};
use crate::system::{
    DirectoryLister, FileOperations, LocalFileSystem, PathProbe, SessionStore, Settings,
    TomlSessionStore,
};
use crate::utils::error::{DuoPaneError, Result};
use crate::utils::formatter::format_user_error;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;
use std::sync::Arc;

mod events;
mod navigation;
mod operations;
mod tabs;


pub use events::{BrowserEvent, EventBus};

/// 주입되는 협력자 묶음
#[derive(Clone)]
pub struct Services {
    pub lister: Arc<dyn DirectoryLister>,
    pub probe: Arc<dyn PathProbe>,
    pub file_ops: Arc<dyn FileOperations>,
    pub session: Option<Arc<dyn SessionStore>>,
}

impl Services {
    /// 로컬 파일 시스템 + 기본 위치 세션 저장소
    pub fn local() -> Self {
        let fs = Arc::new(LocalFileSystem::new());
        Self {
            lister: fs.clone(),
            probe: fs.clone(),
            file_ops: fs,
            session: TomlSessionStore::default_location()
                .map(|store| Arc::new(store) as Arc<dyn SessionStore>),
        }
    }
}

/// 듀얼 패널 브라우저 상태
pub struct DualPaneBrowser {
    left: TabContainer,
    right: TabContainer,
    active_pane: PaneSide,
    clipboard: Option<ClipboardPayload>,
    status: Option<String>,
    last_progress: Option<OperationProgress>,
    cancel_token: CancellationToken,
    settings: Settings,
    services: Services,
    events: EventBus,
}

impl DualPaneBrowser {
    /// 브라우저 생성
    ///
    /// 설정에 따라 이전 세션을 복원하고, 양쪽 활성 탭의 목록을 읽는다.
    /// 시작 경로를 읽을 수 없으면 오류.
    pub fn new(settings: Settings, services: Services) -> Result<Self> {
        let start_path = match &settings.start_path {
            Some(path) => path.clone(),
            None => env::current_dir().map_err(DuoPaneError::Io)?,
        };

        let restored = if settings.restore_session {
            Self::load_session(&settings, &services)
        } else {
            None
        };

        let fresh = |settings: &Settings| Self::fresh_container(settings, &start_path);

        let (left, right, active_pane) = match restored {
            Some((left, right, side)) => (
                left.unwrap_or_else(|| fresh(&settings)),
                right.unwrap_or_else(|| fresh(&settings)),
                side,
            ),
            None => (fresh(&settings), fresh(&settings), PaneSide::Left),
        };

        let mut browser = Self {
            left,
            right,
            active_pane,
            clipboard: None,
            status: None,
            last_progress: None,
            cancel_token: CancellationToken::new(),
            settings,
            services,
            events: EventBus::new(),
        };

        for side in [PaneSide::Left, PaneSide::Right] {
            browser.load_initial_listing(side, &start_path)?;
        }

        log::debug!(
            "browser ready: left={} right={}",
            browser.left.active().current_path().display(),
            browser.right.active().current_path().display()
        );
        Ok(browser)
    }

    /// 활성 탭의 첫 목록 읽기
    ///
    /// 읽을 수 없는 복원 탭은 버리고 다음 탭을 시도한다. 남은 탭이 없으면
    /// 시작 경로의 새 탭으로 되돌린다.
    fn load_initial_listing(&mut self, side: PaneSide, start_path: &Path) -> Result<()> {
        loop {
            let Err(err) = self.reload_active_tab(side) else {
                return Ok(());
            };
            log::warn!("initial listing failed: {}", err);
            let id = self.container(side).active_id();
            if !self.container_mut(side).discard(id) {
                break;
            }
        }

        let fresh = Self::fresh_container(&self.settings, start_path);
        *self.container_mut(side) = fresh;
        self.reload_active_tab(side)
    }

    /// 시작 경로 탭 하나짜리 컨테이너
    fn fresh_container(settings: &Settings, start_path: &Path) -> TabContainer {
        let mut pane = PaneState::new(start_path.to_path_buf());
        pane.sort = settings.sort_spec();
        pane.show_hidden = settings.show_hidden;
        TabContainer::with_limits(pane, settings.history_limit, settings.closed_tab_limit)
    }

    /// 기본 설정 + 로컬 협력자로 생성
    pub fn with_local_services(settings: Settings) -> Result<Self> {
        Self::new(settings, Services::local())
    }

    fn load_session(
        settings: &Settings,
        services: &Services,
    ) -> Option<(Option<TabContainer>, Option<TabContainer>, PaneSide)> {
        let store = services.session.as_ref()?;
        let snapshot = match store.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return None,
            Err(err) => {
                log::warn!("session load failed: {}", err);
                return None;
            }
        };
        let probe = services.probe.as_ref();
        let left = snapshot
            .left
            .restore(settings.history_limit, settings.closed_tab_limit, probe);
        let right = snapshot
            .right
            .restore(settings.history_limit, settings.closed_tab_limit, probe);
        log::info!("session restored");
        Some((left, right, snapshot.active_pane))
    }

    // === 조회 ===

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn active_side(&self) -> PaneSide {
        self.active_pane
    }

    pub fn container(&self, side: PaneSide) -> &TabContainer {
        match side {
            PaneSide::Left => &self.left,
            PaneSide::Right => &self.right,
        }
    }

    fn container_mut(&mut self, side: PaneSide) -> &mut TabContainer {
        match side {
            PaneSide::Left => &mut self.left,
            PaneSide::Right => &mut self.right,
        }
    }

    /// 활성 패널의 활성 탭
    pub fn active_tab(&self) -> &Tab {
        self.container(self.active_pane).active()
    }

    fn active_tab_mut(&mut self) -> &mut Tab {
        let side = self.active_pane;
        self.container_mut(side).active_mut()
    }

    /// 활성 패널의 목록 상태
    pub fn active_pane_state(&self) -> &PaneState {
        &self.active_tab().pane
    }

    /// 지정 패널의 목록 상태
    pub fn pane_state(&self, side: PaneSide) -> &PaneState {
        &self.container(side).active().pane
    }

    pub fn active_path(&self) -> &Path {
        self.active_tab().current_path()
    }

    pub fn clipboard(&self) -> Option<&ClipboardPayload> {
        self.clipboard.as_ref()
    }

    /// 마지막 상태 메시지
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// 마지막 파일 작업 진행 상태
    pub fn last_progress(&self) -> Option<&OperationProgress> {
        self.last_progress.as_ref()
    }

    /// 변경 이벤트 구독
    pub fn subscribe(&mut self) -> Receiver<BrowserEvent> {
        self.events.subscribe()
    }

    // === 상태 메시지 ===

    fn set_status(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.status = Some(message.clone());
        self.events.publish(BrowserEvent::Status(message));
    }

    /// 오류를 사용자 메시지로 변환해 상태에 기록
    fn report_error(&mut self, action: &str, err: &DuoPaneError) {
        log::warn!("{} failed: {}", action, err);
        let message = format_user_error(action, err.path(), &err.to_string(), err.hint());
        self.set_status(message);
    }

    fn publish(&mut self, event: BrowserEvent) {
        self.events.publish(event);
    }

    // === 패널 전환 ===

    /// 활성 패널 전환
    pub fn toggle_pane(&mut self) {
        self.active_pane = self.active_pane.other();
        self.publish(BrowserEvent::ActivePaneChanged(self.active_pane));
    }

    /// 특정 패널 활성화
    pub fn focus_pane(&mut self, side: PaneSide) {
        if self.active_pane != side {
            self.active_pane = side;
            self.publish(BrowserEvent::ActivePaneChanged(side));
        }
    }

    // === 세션 ===

    /// 현재 상태 스냅샷
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            version: SESSION_VERSION,
            active_pane: self.active_pane,
            left: PaneSession::capture(&self.left),
            right: PaneSession::capture(&self.right),
        }
    }

    /// 세션 저장. 저장소가 없으면 아무것도 하지 않는다.
    pub fn save_session(&mut self) -> Result<()> {
        let Some(store) = self.services.session.clone() else {
            return Ok(());
        };
        let snapshot = self.snapshot();
        if let Err(err) = store.save(&snapshot) {
            self.report_error("Save session", &err);
            return Err(err);
        }
        Ok(())
    }

    // === 커맨드 ===

    /// 커맨드 실행 (단일 진입점)
    ///
    /// 실패는 이미 상태 메시지로 보고된 뒤 호출자에게 전달된다.
    pub fn execute(&mut self, command: Command) -> Result<()> {
        log::debug!("execute {}", command.id());
        match command {
            Command::MoveUp => self.move_selection(-1),
            Command::MoveDown => self.move_selection(1),
            Command::GoToTop => self.go_to_top(),
            Command::GoToBottom => self.go_to_bottom(),
            Command::EnterSelected => return self.enter_selected(),
            Command::GoToParent => return self.go_to_parent().map(|_| ()),
            Command::HistoryBack => return self.go_back().map(|_| ()),
            Command::HistoryForward => return self.go_forward().map(|_| ()),
            Command::Refresh => return self.refresh(),
            Command::TogglePane => self.toggle_pane(),
            Command::SyncOtherPane => return self.sync_other_pane(),
            Command::TabNew => return self.new_tab().map(|_| ()),
            Command::TabClose => {
                self.close_active_tab();
            }
            Command::TabDuplicate => {
                self.duplicate_active_tab();
            }
            Command::TabTogglePin => self.toggle_pin_active_tab(),
            Command::TabNext => self.next_tab(),
            Command::TabPrev => self.prev_tab(),
            Command::TabCloseOthers => {
                self.close_other_tabs();
            }
            Command::TabCloseToRight => {
                self.close_tabs_to_right();
            }
            Command::TabReopenClosed => {
                self.reopen_closed_tab();
            }
            Command::ToggleMark => self.toggle_mark_and_move_down(),
            Command::MarkAll => self.mark_all(),
            Command::InvertMarks => self.invert_marks(),
            Command::ClearMarks => self.clear_marks(),
            Command::SortByName => self.sort_by(SortKey::Name),
            Command::SortBySize => self.sort_by(SortKey::Size),
            Command::SortByType => self.sort_by(SortKey::Type),
            Command::SortByModified => self.sort_by(SortKey::Modified),
            Command::ToggleSortDirection => self.toggle_sort_direction(),
            Command::ToggleFoldersFirst => self.toggle_folders_first(),
            Command::ToggleHidden => self.toggle_hidden(),
            Command::ClearFilter => self.set_filter(None),
            Command::CopyToClipboard => self.copy_to_clipboard(),
            Command::CutToClipboard => self.cut_to_clipboard(),
            Command::Paste => return self.paste(),
            Command::CopyToOtherPane => return self.copy_to_other_pane(),
            Command::MoveToOtherPane => return self.move_to_other_pane(),
            Command::Delete => return self.delete_selection(),
            Command::SaveSession => return self.save_session(),
        }
        Ok(())
    }

    /// id 문자열로 커맨드 실행. 모르는 id면 `Unknown`
    pub fn execute_id(&mut self, id: &str) -> Result<()> {
        match Command::from_id(id) {
            Some(command) => self.execute(command),
            None => Err(DuoPaneError::Unknown(format!("unknown command: {}", id))),
        }
    }

    pub(crate) fn start_path_of(&self, side: PaneSide) -> PathBuf {
        self.container(side).active().current_path().to_path_buf()
    }
}
