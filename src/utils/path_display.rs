use std::path::Path;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// 경로에서 탭 제목을 만든다.
///
/// 마지막 경로 요소를 쓰고, 루트(`/`, `C:\`)처럼 이름이 없으면 경로 자체를 쓴다.
pub fn title_from_path(path: &Path) -> String {
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        if !name.is_empty() {
            return name.to_string();
        }
    }
    let display = path.to_string_lossy();
    if display.is_empty() {
        "/".to_string()
    } else {
        display.to_string()
    }
}

/// 문자열을 최대 표시 너비에 맞춰 중간 생략한다.
pub fn truncate_middle(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width < 5 {
        return take_prefix_by_width(text, max_width);
    }

    let budget = max_width - ELLIPSIS.width();
    let head = take_prefix_by_width(text, budget - budget / 2);
    let tail = take_suffix_by_width(text, budget / 2);
    format!("{}{}{}", head, ELLIPSIS, tail)
}

fn take_prefix_by_width(text: &str, max_width: usize) -> String {
    let mut width = 0;
    text.chars()
        .take_while(|&ch| {
            width += UnicodeWidthChar::width(ch).unwrap_or(1);
            width <= max_width
        })
        .collect()
}

fn take_suffix_by_width(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut rev: Vec<char> = text
        .chars()
        .rev()
        .take_while(|&ch| {
            width += UnicodeWidthChar::width(ch).unwrap_or(1);
            width <= max_width
        })
        .collect();
    rev.reverse();
    rev.into_iter().collect()
}
