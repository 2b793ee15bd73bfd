//! 목록 필터용 이름 매칭
//!
//! 와일드카드(`*`, `?`)가 있으면 글로브 매칭, 없으면 부분 문자열 매칭.
//! 항상 대소문자 무시.

/// 패턴에 글로브 와일드카드가 포함되어 있는지 확인
pub fn is_glob_pattern(s: &str) -> bool {
    s.contains('*') || s.contains('?')
}

/// 필터 패턴과 이름 매칭
pub fn matches_filter(pattern: &str, name: &str) -> bool {
    if is_glob_pattern(pattern) {
        glob_match(pattern, name)
    } else {
        name.to_lowercase().contains(&pattern.to_lowercase())
    }
}

/// 글로브 패턴 매칭 (대소문자 무시, UTF-8 안전)
///
/// 마지막 `*` 위치로 되돌아가는 방식이라 패턴 길이에 대해 선형에 가깝다.
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.to_lowercase().chars().collect();
    let text: Vec<char> = text.to_lowercase().chars().collect();

    let (mut p, mut t) = (0usize, 0usize);
    // (별 위치, 그 별이 흡수하기 시작한 텍스트 위치)
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                star = Some((p, t));
                p += 1;
            }
            Some(&c) if c == '?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match star {
                Some((sp, st)) => {
                    p = sp + 1;
                    t = st + 1;
                    star = Some((sp, st + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_detection() {
        assert!(is_glob_pattern("*.log"));
        assert!(is_glob_pattern("photo_0?"));
        assert!(!is_glob_pattern("photo"));
        assert!(!is_glob_pattern(""));
    }

    #[test]
    fn test_listing_names() {
        assert!(glob_match("*.log", "server.log"));
        assert!(!glob_match("*.log", "server.log.gz"));
        assert!(glob_match("photo_0?.jpg", "photo_07.jpg"));
        assert!(!glob_match("photo_0?.jpg", "photo_007.jpg"));
        assert!(glob_match("*backup*", "db_backup_2024"));
        assert!(glob_match("A*z", "az"));
        assert!(!glob_match("*.*", "Makefile"));
    }

    #[test]
    fn test_star_backtracks() {
        assert!(glob_match("*ab*ab", "xabyabab"));
        assert!(!glob_match("*ab*abc", "xabyabab"));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(glob_match("", ""));
        assert!(!glob_match("", "x"));
        assert!(glob_match("**", ""));
    }

    #[test]
    fn test_matches_filter_substring_and_glob() {
        assert!(matches_filter("rep", "Quarterly_Report.pdf"));
        assert!(!matches_filter("xyz", "Quarterly_Report.pdf"));
        assert!(matches_filter("*.PDF", "Quarterly_Report.pdf"));
        assert!(matches_filter("*사진*", "여름_사진_01"));
    }
}
