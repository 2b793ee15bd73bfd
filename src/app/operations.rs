use super::*;
use crate::models::{ClipboardMode, OperationType};
use crate::utils::formatter::pluralize;
use std::slice;

/// 새 폴더 이름 검증
fn validate_folder_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DuoPaneError::Unknown("Folder name is empty".to_string()));
    }
    if name == "." || name == ".." {
        return Err(DuoPaneError::Unknown(format!("Invalid folder name: {}", name)));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(DuoPaneError::Unknown(format!(
            "Folder name cannot contain a path separator: {}",
            name
        )));
    }
    Ok(name)
}

impl DualPaneBrowser {
    // === 클립보드 ===

    fn fill_clipboard(&mut self, mode: ClipboardMode) {
        let sources = self.active_pane_state().operation_sources();
        match ClipboardPayload::new(sources, mode) {
            Some(payload) => {
                let message = payload.describe();
                self.clipboard = Some(payload);
                self.publish(BrowserEvent::ClipboardChanged);
                self.set_status(message);
            }
            None => self.set_status("No files selected."),
        }
    }

    /// 선택 항목을 클립보드에 복사
    pub fn copy_to_clipboard(&mut self) {
        self.fill_clipboard(ClipboardMode::Copy);
    }

    /// 선택 항목을 클립보드에 잘라내기
    pub fn cut_to_clipboard(&mut self) {
        self.fill_clipboard(ClipboardMode::Cut);
    }

    pub fn clear_clipboard(&mut self) {
        if self.clipboard.take().is_some() {
            self.publish(BrowserEvent::ClipboardChanged);
        }
    }

    /// 클립보드 내용을 활성 패널 경로에 붙여넣기
    ///
    /// 잘라내기는 모든 항목이 이동된 뒤에만 클립보드를 비운다.
    pub fn paste(&mut self) -> Result<()> {
        let Some(payload) = self.clipboard.clone() else {
            self.set_status("Clipboard is empty.");
            return Ok(());
        };
        let destination = self.active_path().to_path_buf();
        if payload.is_cut() {
            self.run_batch(OperationType::Move, &payload.paths, |ops, item| {
                ops.move_items(slice::from_ref(item), &destination)
            })?;
            self.clear_clipboard();
        } else {
            self.run_batch(OperationType::Copy, &payload.paths, |ops, item| {
                ops.copy(slice::from_ref(item), &destination)
            })?;
        }
        Ok(())
    }

    // === 다른 패널로 ===

    fn other_pane_path(&self) -> PathBuf {
        self.start_path_of(self.active_pane.other())
    }

    /// 선택 항목을 다른 패널 경로로 복사
    pub fn copy_to_other_pane(&mut self) -> Result<()> {
        let sources = self.active_pane_state().operation_sources();
        if sources.is_empty() {
            self.set_status("No files selected.");
            return Ok(());
        }
        let destination = self.other_pane_path();
        self.run_batch(OperationType::Copy, &sources, |ops, item| {
            ops.copy(slice::from_ref(item), &destination)
        })
    }

    /// 선택 항목을 다른 패널 경로로 이동
    pub fn move_to_other_pane(&mut self) -> Result<()> {
        let sources = self.active_pane_state().operation_sources();
        if sources.is_empty() {
            self.set_status("No files selected.");
            return Ok(());
        }
        let destination = self.other_pane_path();
        self.run_batch(OperationType::Move, &sources, |ops, item| {
            ops.move_items(slice::from_ref(item), &destination)
        })
    }

    /// 선택 항목 삭제
    pub fn delete_selection(&mut self) -> Result<()> {
        let sources = self.active_pane_state().operation_sources();
        if sources.is_empty() {
            self.set_status("No files selected.");
            return Ok(());
        }
        self.run_batch(OperationType::Delete, &sources, |ops, item| {
            ops.delete(slice::from_ref(item))
        })
    }

    /// 활성 패널 경로에 새 폴더 생성 후 커서를 둔다
    pub fn create_directory(&mut self, name: &str) -> Result<PathBuf> {
        let action = OperationType::CreateDirectory.name();
        let name = match validate_folder_name(name) {
            Ok(name) => name.to_string(),
            Err(err) => {
                self.report_error(action, &err);
                return Err(err);
            }
        };
        let path = self.active_path().join(&name);
        if self.services.probe.path_exists(&path) {
            let err = DuoPaneError::AlreadyExists { path };
            self.report_error(action, &err);
            return Err(err);
        }
        if let Err(err) = self.services.file_ops.create_directory(&path) {
            self.report_error(action, &err);
            return Err(err);
        }
        log::info!("created folder {}", path.display());

        if self.refresh_panes() {
            self.set_status(format!("Created folder '{}'", name));
        }
        let side = self.active_pane;
        self.active_tab_mut().pane.focus_name(&name);
        self.publish(BrowserEvent::PaneChanged(side));
        Ok(path)
    }

    // === 취소 ===

    /// 진행 중이거나 다음 작업을 취소할 핸들
    ///
    /// 취소된 작업이 끝나면 새 토큰으로 교체된다.
    pub fn cancel_handle(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    pub fn cancel_operation(&self) {
        self.cancel_token.cancel();
    }

    // === 실행 ===

    /// 항목 단위 일괄 실행
    ///
    /// 항목 사이마다 취소 여부를 확인한다. 성공/실패와 관계없이 진행 상태를 남기고
    /// 양쪽 패널을 다시 읽는다. 작업 실패 메시지가 갱신 실패 메시지보다 우선한다.
    fn run_batch<F>(
        &mut self,
        operation: OperationType,
        sources: &[PathBuf],
        mut apply: F,
    ) -> Result<()>
    where
        F: FnMut(&dyn FileOperations, &PathBuf) -> Result<()>,
    {
        let ops = Arc::clone(&self.services.file_ops);
        let token = self.cancel_token.clone();
        let mut progress = OperationProgress::new(operation, sources.len());
        let mut outcome = Ok(());

        for source in sources {
            if token.is_cancelled() {
                outcome = Err(DuoPaneError::OperationCancelled);
                break;
            }
            progress.current_item = Some(source.clone());
            if let Err(err) = apply(ops.as_ref(), source) {
                outcome = Err(err);
                break;
            }
            progress.items_completed += 1;
        }

        if token.is_cancelled() {
            self.cancel_token = CancellationToken::new();
        }
        let completed = progress.items_completed;
        self.last_progress = Some(progress);
        let refreshed = self.refresh_panes();

        match outcome {
            Ok(()) => {
                log::info!("{} finished: {} item(s)", operation.name(), completed);
                // 갱신 실패 메시지를 덮어쓰지 않는다
                if refreshed {
                    self.set_status(format!(
                        "{}: {} done",
                        operation.name(),
                        pluralize(completed, "item", "items")
                    ));
                }
                Ok(())
            }
            Err(err) => {
                log::warn!(
                    "{} stopped after {} of {} item(s): {}",
                    operation.name(),
                    completed,
                    sources.len(),
                    err
                );
                let reason = format!("{} ({} of {} done)", err, completed, sources.len());
                self.set_status(format_user_error(
                    operation.name(),
                    err.path(),
                    &reason,
                    err.hint(),
                ));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validate_folder_name;

    #[test]
    fn test_folder_name_validation() {
        assert_eq!(validate_folder_name("  docs ").unwrap(), "docs");
        assert!(validate_folder_name("").is_err());
        assert!(validate_folder_name("..").is_err());
        assert!(validate_folder_name("a/b").is_err());
        assert!(validate_folder_name("a\\b").is_err());
    }
}
