//! duopane: 듀얼 패널 파일 관리자의 뷰모델 코어
//!
//! 화면 렌더링과 실제 파일 I/O는 다루지 않는다. UI는 [`DualPaneBrowser`]에
//! [`Command`]를 보내고, `subscribe()`로 받은 이벤트에 따라 다시 그린다.

pub mod app;
pub mod core;
pub mod models;
pub mod system;
pub mod utils;

pub use app::{BrowserEvent, DualPaneBrowser, Services};
pub use crate::core::{natural_cmp, sort_entries, Command, SortDirection, SortKey, SortSpec};
pub use models::{
    ClipboardMode, ClipboardPayload, DirectoryEntry, NavigationHistory, PaneState, Tab,
    TabContainer, TabId, TabState,
};
pub use system::session::PaneSide;
pub use system::Settings;
pub use utils::error::{DuoPaneError, ErrorKind, Result};
