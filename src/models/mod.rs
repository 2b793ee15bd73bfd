// Data Models
pub mod clipboard;
pub mod directory_entry;
pub mod history;
pub mod operation;
pub mod pane_state;
pub mod tab;
pub mod tab_container;

pub use clipboard::{ClipboardMode, ClipboardPayload};
pub use directory_entry::{DirectoryEntry, EntryKind};
pub use history::NavigationHistory;
pub use operation::{CancellationToken, OperationProgress, OperationType};
pub use pane_state::PaneState;
pub use tab::{Tab, TabId, TabState};
pub use tab_container::TabContainer;
