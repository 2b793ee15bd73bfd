// Formatters - 크기, 날짜, 상태 메시지 포맷팅

use chrono::{DateTime, Local};
use std::path::Path;
use std::time::SystemTime;

/// 파일 크기를 읽기 쉬운 형식으로 포맷팅 (숫자와 단위 사이 공백)
///
/// # Examples
/// ```
/// use duopane::utils::formatter::format_file_size;
///
/// assert_eq!(format_file_size(0), "0 B");
/// assert_eq!(format_file_size(512), "512 B");
/// assert_eq!(format_file_size(1536), "1.5 KB");
/// assert_eq!(format_file_size(1_048_576), "1.0 MB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    }
}

/// 시스템 시간을 "YYYY-MM-DD HH:MM" 형식으로 포맷팅 (16자 고정)
pub fn format_date(time: SystemTime) -> String {
    let datetime: DateTime<Local> = time.into();
    datetime.format("%Y-%m-%d %H:%M").to_string()
}

/// 개수에 따라 단수/복수형 반환
///
/// # Examples
/// ```
/// use duopane::utils::formatter::pluralize;
///
/// assert_eq!(pluralize(1, "file", "files"), "1 file");
/// assert_eq!(pluralize(3, "file", "files"), "3 files");
/// ```
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// 실패한 작업을 사용자 메시지로 변환
///
/// ```text
/// Copy failed.
/// Path: /tmp/a
/// Reason: Permission denied
/// Hint: Check permissions and try again.
/// ```
pub fn format_user_error(action: &str, path: Option<&Path>, error: &str, hint: &str) -> String {
    let mut message = format!("{} failed.", action);
    if let Some(p) = path {
        message.push_str(&format!("\nPath: {}", p.display()));
    }
    message.push_str(&format!("\nReason: {}", error));
    if !hint.is_empty() {
        message.push_str(&format!("\nHint: {}", hint));
    }
    message
}
