//! 커맨드 레지스트리
//!
//! 메뉴, 단축키, 외부 UI가 브라우저에 보내는 메시지의 목록.
//! 각 커맨드는 고정 문자열 id를 가지며 `DualPaneBrowser::execute`로 전달된다.

/// 인자 없는 사용자 커맨드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // Navigation
    MoveUp,
    MoveDown,
    GoToTop,
    GoToBottom,
    EnterSelected,
    GoToParent,
    HistoryBack,
    HistoryForward,
    Refresh,
    TogglePane,
    SyncOtherPane,
    // Tabs
    TabNew,
    TabClose,
    TabDuplicate,
    TabTogglePin,
    TabNext,
    TabPrev,
    TabCloseOthers,
    TabCloseToRight,
    TabReopenClosed,
    // Selection
    ToggleMark,
    MarkAll,
    InvertMarks,
    ClearMarks,
    // View
    SortByName,
    SortBySize,
    SortByType,
    SortByModified,
    ToggleSortDirection,
    ToggleFoldersFirst,
    ToggleHidden,
    ClearFilter,
    // File operations
    CopyToClipboard,
    CutToClipboard,
    Paste,
    CopyToOtherPane,
    MoveToOtherPane,
    Delete,
    // Session
    SaveSession,
}

/// 커맨드 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandCategory {
    Navigation,
    Tabs,
    Selection,
    View,
    FileOperation,
    Session,
}

/// 커맨드 메타데이터
#[derive(Debug, Clone, Copy)]
pub struct CommandDef {
    pub command: Command,
    pub id: &'static str,
    pub label: &'static str,
    pub category: CommandCategory,
}

const fn def(
    command: Command,
    id: &'static str,
    label: &'static str,
    category: CommandCategory,
) -> CommandDef {
    CommandDef {
        command,
        id,
        label,
        category,
    }
}

use Command as C;
use CommandCategory as Cat;

/// 모든 커맨드 메타데이터
pub static COMMAND_DEFS: &[CommandDef] = &[
    def(C::MoveUp, "move_up", "Move up", Cat::Navigation),
    def(C::MoveDown, "move_down", "Move down", Cat::Navigation),
    def(C::GoToTop, "go_top", "Top", Cat::Navigation),
    def(C::GoToBottom, "go_bottom", "Bottom", Cat::Navigation),
    def(C::EnterSelected, "enter", "Open", Cat::Navigation),
    def(C::GoToParent, "go_parent", "Parent folder", Cat::Navigation),
    def(C::HistoryBack, "history_back", "Back", Cat::Navigation),
    def(C::HistoryForward, "history_forward", "Forward", Cat::Navigation),
    def(C::Refresh, "refresh", "Refresh", Cat::Navigation),
    def(C::TogglePane, "toggle_pane", "Switch pane", Cat::Navigation),
    def(C::SyncOtherPane, "sync_other_pane", "Open here in other pane", Cat::Navigation),
    def(C::TabNew, "tab_new", "New tab", Cat::Tabs),
    def(C::TabClose, "tab_close", "Close tab", Cat::Tabs),
    def(C::TabDuplicate, "tab_duplicate", "Duplicate tab", Cat::Tabs),
    def(C::TabTogglePin, "tab_pin", "Pin/unpin tab", Cat::Tabs),
    def(C::TabNext, "tab_next", "Next tab", Cat::Tabs),
    def(C::TabPrev, "tab_prev", "Previous tab", Cat::Tabs),
    def(C::TabCloseOthers, "tab_close_others", "Close other tabs", Cat::Tabs),
    def(C::TabCloseToRight, "tab_close_right", "Close tabs to the right", Cat::Tabs),
    def(C::TabReopenClosed, "tab_reopen", "Reopen closed tab", Cat::Tabs),
    def(C::ToggleMark, "toggle_mark", "Select/deselect", Cat::Selection),
    def(C::MarkAll, "select_all", "Select all", Cat::Selection),
    def(C::InvertMarks, "invert_selection", "Invert selection", Cat::Selection),
    def(C::ClearMarks, "deselect_all", "Deselect all", Cat::Selection),
    def(C::SortByName, "sort_name", "Sort by name", Cat::View),
    def(C::SortBySize, "sort_size", "Sort by size", Cat::View),
    def(C::SortByType, "sort_type", "Sort by type", Cat::View),
    def(C::SortByModified, "sort_modified", "Sort by date", Cat::View),
    def(C::ToggleSortDirection, "sort_toggle_direction", "Reverse order", Cat::View),
    def(C::ToggleFoldersFirst, "folders_first", "Folders first", Cat::View),
    def(C::ToggleHidden, "toggle_hidden", "Show hidden files", Cat::View),
    def(C::ClearFilter, "clear_filter", "Clear filter", Cat::View),
    def(C::CopyToClipboard, "clipboard_copy", "Copy", Cat::FileOperation),
    def(C::CutToClipboard, "clipboard_cut", "Cut", Cat::FileOperation),
    def(C::Paste, "paste", "Paste", Cat::FileOperation),
    def(C::CopyToOtherPane, "copy_to_other", "Copy to other pane", Cat::FileOperation),
    def(C::MoveToOtherPane, "move_to_other", "Move to other pane", Cat::FileOperation),
    def(C::Delete, "delete", "Delete", Cat::FileOperation),
    def(C::SaveSession, "save_session", "Save session", Cat::Session),
];

impl Command {
    /// id로 커맨드 조회
    pub fn from_id(id: &str) -> Option<Command> {
        COMMAND_DEFS.iter().find(|d| d.id == id).map(|d| d.command)
    }

    /// 메타데이터 조회
    pub fn def(self) -> &'static CommandDef {
        // 모든 variant는 레지스트리에 등록되어 있다 (테스트로 보장)
        COMMAND_DEFS
            .iter()
            .find(|d| d.command == self)
            .unwrap_or(&COMMAND_DEFS[0])
    }

    pub fn id(self) -> &'static str {
        self.def().id
    }

    pub fn label(self) -> &'static str {
        self.def().label
    }
}
