use std::path::PathBuf;

/// 클립보드 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardMode {
    /// 복사
    Copy,
    /// 잘라내기 (붙여넣기 후 비워짐)
    Cut,
}

/// 붙여넣기 전까지 보관되는 클립보드 내용
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardPayload {
    pub paths: Vec<PathBuf>,
    pub mode: ClipboardMode,
}

impl ClipboardPayload {
    /// 대상이 비어 있으면 None
    pub fn new(paths: Vec<PathBuf>, mode: ClipboardMode) -> Option<Self> {
        if paths.is_empty() {
            None
        } else {
            Some(Self { paths, mode })
        }
    }

    pub fn is_cut(&self) -> bool {
        self.mode == ClipboardMode::Cut
    }

    /// 상태 표시용 설명 (예: "3 items cut")
    pub fn describe(&self) -> String {
        let verb = match self.mode {
            ClipboardMode::Copy => "copied",
            ClipboardMode::Cut => "cut",
        };
        format!(
            "{} {}",
            crate::utils::formatter::pluralize(self.paths.len(), "item", "items"),
            verb
        )
    }
}
