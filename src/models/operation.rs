//! 파일 작업 모델
//!
//! 여러 항목에 대한 작업은 항목 단위로 진행하며, 항목 사이마다 취소 여부를 확인한다.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 작업 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    /// 복사
    Copy,
    /// 이동
    Move,
    /// 삭제
    Delete,
    /// 새 폴더
    CreateDirectory,
}

impl OperationType {
    /// 작업 이름 (상태 메시지용)
    pub fn name(&self) -> &'static str {
        match self {
            OperationType::Copy => "Copy",
            OperationType::Move => "Move",
            OperationType::Delete => "Delete",
            OperationType::CreateDirectory => "Create folder",
        }
    }
}

/// 협조적 취소 토큰
///
/// 복제본끼리 같은 플래그를 공유한다.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// 작업 진행 상태
#[derive(Debug, Clone)]
pub struct OperationProgress {
    /// 작업 유형
    pub operation_type: OperationType,
    /// 마지막으로 처리한 항목
    pub current_item: Option<PathBuf>,
    /// 완료된 항목 수
    pub items_completed: usize,
    /// 전체 항목 수
    pub total_items: usize,
}

impl OperationProgress {
    pub fn new(operation_type: OperationType, total_items: usize) -> Self {
        Self {
            operation_type,
            current_item: None,
            items_completed: 0,
            total_items,
        }
    }

    /// 진행률 (0-100)
    pub fn percentage(&self) -> u8 {
        if self.total_items == 0 {
            100
        } else {
            ((self.items_completed * 100) / self.total_items) as u8
        }
    }

    pub fn is_complete(&self) -> bool {
        self.items_completed >= self.total_items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_clones_share_flag() {
        let token = CancellationToken::new();
        let worker = token.clone();
        assert!(!worker.is_cancelled());
        token.cancel();
        assert!(worker.is_cancelled());
    }

    #[test]
    fn test_percentage() {
        let mut progress = OperationProgress::new(OperationType::Copy, 4);
        assert_eq!(progress.percentage(), 0);
        progress.items_completed = 1;
        assert_eq!(progress.percentage(), 25);
        progress.items_completed = 4;
        assert!(progress.is_complete());
        assert_eq!(OperationProgress::new(OperationType::Delete, 0).percentage(), 100);
    }
}
