// Core: UI와 무관한 순수 로직
pub mod commands;
pub mod natural;
pub mod sorting;

pub use commands::Command;
pub use natural::natural_cmp;
pub use sorting::{sort_entries, SortDirection, SortKey, SortSpec};
