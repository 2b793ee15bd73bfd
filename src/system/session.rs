//! 세션 저장/복원
//!
//! 탭 구성과 히스토리를 버전이 붙은 TOML로 저장한다.
//! 버전이 다르거나 읽을 수 없는 파일은 "세션 없음"으로 취급한다.

use crate::core::sorting::{SortDirection, SortKey, SortSpec};
use crate::models::history::NavigationHistory;
use crate::models::pane_state::PaneState;
use crate::models::tab::{Tab, TabId};
use crate::models::tab_container::TabContainer;
use crate::system::PathProbe;
use crate::utils::error::{DuoPaneError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 세션 형식 버전
pub const SESSION_VERSION: u32 = 1;

/// 세션 저장소
pub trait SessionStore: Send + Sync {
    fn save(&self, snapshot: &SessionSnapshot) -> Result<()>;
    /// 저장된 세션이 없으면 `Ok(None)`
    fn load(&self) -> Result<Option<SessionSnapshot>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabSession {
    pub path: PathBuf,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub sort_key: SortKey,
    #[serde(default)]
    pub sort_direction: SortDirection,
    #[serde(default = "default_true")]
    pub folders_first: bool,
    #[serde(default)]
    pub show_hidden: bool,
    #[serde(default)]
    pub back: Vec<PathBuf>,
    #[serde(default)]
    pub forward: Vec<PathBuf>,
}

fn default_true() -> bool {
    true
}

impl TabSession {
    /// 탭 상태 캡처
    pub fn capture(tab: &Tab) -> Self {
        Self {
            path: tab.current_path().to_path_buf(),
            pinned: tab.pinned,
            sort_key: tab.pane.sort.key,
            sort_direction: tab.pane.sort.direction,
            folders_first: tab.pane.sort.folders_first,
            show_hidden: tab.pane.show_hidden,
            back: tab.history.back_entries().cloned().collect(),
            forward: tab.history.forward_entries().to_vec(),
        }
    }

    /// 탭으로 복원. 경로가 사라졌으면 None, 사라진 히스토리 항목은 버린다.
    pub fn restore(self, id: TabId, history_limit: usize, probe: &dyn PathProbe) -> Option<Tab> {
        if !probe.path_exists(&self.path) {
            log::warn!("session tab dropped, path missing: {}", self.path.display());
            return None;
        }
        let mut pane = PaneState::new(self.path.clone());
        pane.sort = SortSpec {
            key: self.sort_key,
            direction: self.sort_direction,
            folders_first: self.folders_first,
        };
        pane.show_hidden = self.show_hidden;

        let mut tab = Tab::new(id, pane, history_limit);
        tab.pinned = self.pinned;
        tab.history =
            NavigationHistory::restore(Some(self.path), self.back, self.forward, history_limit);
        tab.history.retain(|p| {
            let exists = probe.path_exists(p);
            if !exists {
                log::warn!("session history entry dropped: {}", p.display());
            }
            exists
        });
        Some(tab)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaneSession {
    #[serde(default)]
    pub active: usize,
    pub tabs: Vec<TabSession>,
}

impl PaneSession {
    pub fn capture(container: &TabContainer) -> Self {
        Self {
            active: container.active_index(),
            tabs: container.tabs().iter().map(TabSession::capture).collect(),
        }
    }

    /// 살아남은 탭으로 컨테이너 복원. 하나도 없으면 None
    pub fn restore(
        self,
        history_limit: usize,
        closed_limit: usize,
        probe: &dyn PathProbe,
    ) -> Option<TabContainer> {
        let mut active = 0;
        let mut tabs = Vec::new();
        for (index, session) in self.tabs.into_iter().enumerate() {
            if let Some(tab) = session.restore(tabs.len() + 1, history_limit, probe) {
                if index <= self.active {
                    active = tabs.len();
                }
                tabs.push(tab);
            }
        }
        TabContainer::from_tabs(tabs, active, history_limit, closed_limit)
    }
}

/// 활성 패널 구분
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaneSide {
    #[default]
    Left,
    Right,
}

impl PaneSide {
    pub fn other(self) -> Self {
        match self {
            PaneSide::Left => PaneSide::Right,
            PaneSide::Right => PaneSide::Left,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub version: u32,
    #[serde(default)]
    pub active_pane: PaneSide,
    pub left: PaneSession,
    pub right: PaneSession,
}

/// TOML 파일 세션 저장소
#[derive(Debug, Clone)]
pub struct TomlSessionStore {
    path: PathBuf,
}

impl TomlSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 기본 위치: `<data_dir>/duopane/session.toml`
    pub fn default_location() -> Option<Self> {
        dirs::data_dir().map(|dir| Self::new(dir.join("duopane").join("session.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn encode(snapshot: &SessionSnapshot) -> Result<String> {
        toml::to_string_pretty(snapshot).map_err(|e| DuoPaneError::Session(e.to_string()))
    }

    fn decode(data: &str) -> Option<SessionSnapshot> {
        let parsed: SessionSnapshot = toml::from_str(data).ok()?;
        if parsed.version != SESSION_VERSION {
            return None;
        }
        Some(parsed)
    }
}

impl SessionStore for TomlSessionStore {
    fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| DuoPaneError::from_io(e, parent))?;
        }
        let data = Self::encode(snapshot)?;
        fs::write(&self.path, data).map_err(|e| DuoPaneError::from_io(e, &self.path))?;
        log::info!("session saved to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<SessionSnapshot>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DuoPaneError::from_io(e, &self.path)),
        };
        let snapshot = Self::decode(&data);
        if snapshot.is_none() {
            log::warn!("ignoring unreadable session file {}", self.path.display());
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    struct KnownPaths(HashSet<PathBuf>);

    impl KnownPaths {
        fn of(paths: &[&str]) -> Self {
            Self(paths.iter().map(PathBuf::from).collect())
        }
    }

    impl PathProbe for KnownPaths {
        fn path_exists(&self, path: &Path) -> bool {
            self.0.contains(path)
        }
    }

    fn tab_session(path: &str) -> TabSession {
        TabSession {
            path: PathBuf::from(path),
            pinned: false,
            sort_key: SortKey::Name,
            sort_direction: SortDirection::Ascending,
            folders_first: true,
            show_hidden: false,
            back: Vec::new(),
            forward: Vec::new(),
        }
    }

    fn snapshot() -> SessionSnapshot {
        let mut pinned = tab_session("/b");
        pinned.pinned = true;
        pinned.sort_key = SortKey::Modified;
        pinned.back = vec![PathBuf::from("/a"), PathBuf::from("/gone")];
        SessionSnapshot {
            version: SESSION_VERSION,
            active_pane: PaneSide::Right,
            left: PaneSession {
                tabs: vec![tab_session("/a"), pinned],
                active: 1,
            },
            right: PaneSession {
                tabs: vec![tab_session("/c")],
                active: 0,
            },
        }
    }

    #[test]
    fn test_store_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = TomlSessionStore::new(temp.path().join("s").join("session.toml"));
        assert_eq!(store.load().unwrap(), None);

        let snap = snapshot();
        store.save(&snap).unwrap();
        assert_eq!(store.load().unwrap(), Some(snap));
    }

    #[test]
    fn test_wrong_version_or_garbage_is_no_session() {
        let temp = TempDir::new().unwrap();
        let store = TomlSessionStore::new(temp.path().join("session.toml"));

        let mut snap = snapshot();
        snap.version = SESSION_VERSION + 1;
        store.save(&snap).unwrap();
        assert_eq!(store.load().unwrap(), None);

        fs::write(store.path(), "not = [valid").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_restore_drops_missing_paths() {
        let probe = KnownPaths::of(&["/a", "/b"]);
        let mut pane = snapshot().left;
        pane.tabs.insert(0, tab_session("/missing"));
        pane.active = 2;

        let container = pane.restore(50, 10, &probe).unwrap();
        assert_eq!(container.len(), 2);
        // 고정 탭이 앞으로, 활성 탭은 "/b" 유지
        assert_eq!(container.tabs()[0].current_path(), Path::new("/b"));
        assert_eq!(container.active().current_path(), Path::new("/b"));
        let restored = container.active();
        assert!(restored.pinned);
        assert_eq!(restored.pane.sort.key, SortKey::Modified);
        let back: Vec<_> = restored.history.back_entries().cloned().collect();
        assert_eq!(back, vec![PathBuf::from("/a")]);
    }

    #[test]
    fn test_restore_with_nothing_left() {
        let probe = KnownPaths::of(&[]);
        assert!(snapshot().right.restore(50, 10, &probe).is_none());
    }

    #[test]
    fn test_capture() {
        let mut container = TabContainer::new(PaneState::new(PathBuf::from("/x")));
        container.create(PaneState::new(PathBuf::from("/y")));
        let id = container.active_id();
        container.pin(id);
        let session = PaneSession::capture(&container);
        assert_eq!(session.active, 0);
        assert_eq!(session.tabs[0].path, PathBuf::from("/y"));
        assert!(session.tabs[0].pinned);
    }
}
