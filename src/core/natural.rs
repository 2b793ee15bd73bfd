//! 자연 정렬 비교 (숫자 인식)
//!
//! `file2` < `file10` 처럼 연속된 숫자 구간을 수치로 비교한다.
//! 숫자 이외의 문자는 대소문자를 무시하고 비교한다.

use std::borrow::Cow;
use std::cmp::Ordering;

/// 두 문자열을 자연 정렬 순서로 비교
///
/// - 소문자로 접은 뒤 `alphanumeric_sort::compare_str`로 비교
/// - 숫자 구간의 앞자리 0은 미리 떼어 내므로 `a01`과 `a1`은 같다
/// - 한쪽이 다른 쪽의 접두사면 짧은 쪽이 앞
///
/// # Examples
/// ```
/// use std::cmp::Ordering;
/// use duopane::core::natural::natural_cmp;
///
/// assert_eq!(natural_cmp("file2", "file10"), Ordering::Less);
/// assert_eq!(natural_cmp("File1", "file1"), Ordering::Equal);
/// ```
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    alphanumeric_sort::compare_str(trim_leading_zeros(&a), trim_leading_zeros(&b))
}

/// 숫자 구간마다 앞자리 0 제거 (전부 0이면 `0` 하나를 남김)
fn trim_leading_zeros(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    let has_padded_run = bytes.iter().enumerate().any(|(i, &c)| {
        c == b'0'
            && (i == 0 || !bytes[i - 1].is_ascii_digit())
            && bytes.get(i + 1).is_some_and(u8::is_ascii_digit)
    });
    if !has_padded_run {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '0' && !out.ends_with(|p: char| p.is_ascii_digit()) {
            while chars.peek() == Some(&'0') {
                chars.next();
            }
            if !chars.peek().is_some_and(char::is_ascii_digit) {
                out.push('0');
            }
            continue;
        }
        out.push(c);
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_runs_compare_by_value() {
        assert_eq!(natural_cmp("file2", "file10"), Ordering::Less);
        assert_eq!(natural_cmp("file10", "file2"), Ordering::Greater);
        assert_eq!(natural_cmp("img9.png", "img10.png"), Ordering::Less);
        assert_eq!(natural_cmp("v1.9", "v1.10"), Ordering::Less);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(natural_cmp("File1", "file1"), Ordering::Equal);
        assert_eq!(natural_cmp("ALPHA", "beta"), Ordering::Less);
        assert_eq!(natural_cmp("Ärger", "ärger"), Ordering::Equal);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(natural_cmp("a", "ab"), Ordering::Less);
        assert_eq!(natural_cmp("ab", "a"), Ordering::Greater);
        assert_eq!(natural_cmp("", "a"), Ordering::Less);
        assert_eq!(natural_cmp("", ""), Ordering::Equal);
        assert_eq!(natural_cmp("file", "file1"), Ordering::Less);
    }

    #[test]
    fn test_leading_zeros_ignored() {
        assert_eq!(natural_cmp("a007", "a7"), Ordering::Equal);
        assert_eq!(natural_cmp("a007", "a8"), Ordering::Less);
        assert_eq!(natural_cmp("0", "000"), Ordering::Equal);
    }

    #[test]
    fn test_long_numeric_runs_do_not_overflow() {
        let big = "n123456789012345678901234567890";
        let bigger = "n123456789012345678901234567891";
        assert_eq!(natural_cmp(big, bigger), Ordering::Less);
        assert_eq!(
            natural_cmp("n99999999999999999999", "n100000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn test_trim_leading_zeros() {
        assert_eq!(trim_leading_zeros("a007b0c"), "a7b0c");
        assert_eq!(trim_leading_zeros("000"), "0");
        assert_eq!(trim_leading_zeros("v1.09"), "v1.9");
        assert!(matches!(trim_leading_zeros("file10"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_digits_versus_letters() {
        // '1' (0x31) < 'a' (0x61)
        assert_eq!(natural_cmp("1abc", "abc"), Ordering::Less);
        assert_eq!(natural_cmp("x-1", "x1"), Ordering::Less);
    }

    #[test]
    fn test_total_order_properties() {
        let samples = [
            "", "a", "A", "ab", "a1", "a01", "a2", "a10", "A10b", "a10a", "file2", "file10",
            "File1", "z", "10", "9", "x_y", "X-y", "가나", "12345678901234567890",
        ];
        for a in samples {
            assert_eq!(natural_cmp(a, a), Ordering::Equal);
            for b in samples {
                let ab = natural_cmp(a, b);
                assert_eq!(ab, natural_cmp(b, a).reverse(), "{a:?} vs {b:?}");
                for c in samples {
                    if ab != Ordering::Greater && natural_cmp(b, c) != Ordering::Greater {
                        assert_ne!(
                            natural_cmp(a, c),
                            Ordering::Greater,
                            "{a:?} <= {b:?} <= {c:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_sort_with_comparator() {
        let mut names = vec!["file10", "file2", "File1", "file1b", "file01a"];
        names.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(names, vec!["File1", "file01a", "file1b", "file2", "file10"]);
    }
}
