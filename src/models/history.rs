//! 탐색 히스토리 (뒤로/앞으로)

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// 뒤로 스택 기본 최대 크기
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// 탭/패널별 탐색 히스토리
///
/// `back`의 뒤쪽이 가장 최근 경로이며, 용량을 넘으면 앞쪽(가장 오래된 것)부터 버린다.
/// 새 탐색이 일어나면 `forward`는 비워진다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationHistory {
    current: Option<PathBuf>,
    back: VecDeque<PathBuf>,
    forward: Vec<PathBuf>,
    limit: usize,
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl NavigationHistory {
    /// 빈 히스토리 생성 (limit은 최소 1)
    pub fn new(limit: usize) -> Self {
        Self {
            current: None,
            back: VecDeque::new(),
            forward: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// 저장된 스택으로 복원
    pub fn restore(
        current: Option<PathBuf>,
        back: Vec<PathBuf>,
        forward: Vec<PathBuf>,
        limit: usize,
    ) -> Self {
        let mut history = Self::new(limit);
        history.current = current;
        for path in back {
            history.push_back(path);
        }
        history.forward = forward;
        history
    }

    /// 현재 경로
    pub fn current(&self) -> Option<&Path> {
        self.current.as_deref()
    }

    /// 뒤로 스택 (오래된 것 → 최근 것)
    pub fn back_entries(&self) -> impl Iterator<Item = &PathBuf> {
        self.back.iter()
    }

    /// 앞으로 스택 (먼 것 → 가까운 것)
    pub fn forward_entries(&self) -> &[PathBuf] {
        &self.forward
    }

    pub fn back_len(&self) -> usize {
        self.back.len()
    }

    pub fn forward_len(&self) -> usize {
        self.forward.len()
    }

    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    /// 뒤로 가면 도착할 경로
    pub fn peek_back(&self) -> Option<&Path> {
        self.back.back().map(PathBuf::as_path)
    }

    /// 앞으로 가면 도착할 경로
    pub fn peek_forward(&self) -> Option<&Path> {
        self.forward.last().map(PathBuf::as_path)
    }

    /// 새 경로로 이동 (히스토리 이동이 아닌 일반 탐색)
    pub fn navigate(&mut self, path: PathBuf) {
        if let Some(previous) = self.current.take() {
            if !previous.as_os_str().is_empty() {
                self.push_back(previous);
            }
        }
        self.current = Some(path);
        self.forward.clear();
    }

    /// 뒤로 이동. 스택이 비었으면 false
    pub fn go_back(&mut self) -> bool {
        let Some(target) = self.back.pop_back() else {
            return false;
        };
        if let Some(previous) = self.current.replace(target) {
            self.forward.push(previous);
        }
        true
    }

    /// 앞으로 이동. 스택이 비었으면 false
    pub fn go_forward(&mut self) -> bool {
        let Some(target) = self.forward.pop() else {
            return false;
        };
        if let Some(previous) = self.current.replace(target) {
            self.push_back(previous);
        }
        true
    }

    /// 조건을 만족하지 않는 경로를 양쪽 스택에서 제거
    pub fn retain<F: FnMut(&Path) -> bool>(&mut self, mut keep: F) {
        self.back.retain(|p| keep(p));
        self.forward.retain(|p| keep(p));
    }

    fn push_back(&mut self, path: PathBuf) {
        self.back.push_back(path);
        while self.back.len() > self.limit {
            self.back.pop_front();
        }
    }
}
