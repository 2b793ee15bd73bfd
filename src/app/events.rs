//! 변경 알림
//!
//! UI 어댑터는 `subscribe()`로 받은 채널에서 이벤트를 읽어 화면을 갱신한다.

use crate::system::session::PaneSide;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};

/// 브라우저 상태 변경 이벤트
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEvent {
    /// 패널의 경로/목록/선택/정렬 변경
    PaneChanged(PaneSide),
    /// 탭 구성/순서/활성 탭 변경
    TabsChanged(PaneSide),
    /// 활성 패널 전환
    ActivePaneChanged(PaneSide),
    /// 클립보드 변경
    ClipboardChanged,
    /// 사용자에게 보여줄 상태 메시지
    Status(String),
    /// 파일 열기 요청 (셸에 위임)
    OpenRequested(PathBuf),
}

/// 구독자 목록
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<Sender<BrowserEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// 새 구독 채널
    pub fn subscribe(&mut self) -> Receiver<BrowserEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// 모든 구독자에게 전달. 수신 측이 사라진 채널은 제거한다.
    pub fn publish(&mut self, event: BrowserEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
