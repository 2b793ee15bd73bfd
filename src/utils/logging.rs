//! 로거 초기화
//!
//! 라이브러리 코드는 `log` 매크로만 사용하고, 실제 출력은 임베딩하는 쪽에서
//! 한 번 초기화한다.

use crate::utils::error::{DuoPaneError, Result};
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::str::FromStr;

/// 문자열 로그 레벨 파싱 ("off", "error", "warn", "info", "debug", "trace")
pub fn parse_level(level: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(level.trim())
        .map_err(|_| DuoPaneError::Config(format!("invalid log level: {}", level)))
}

/// 터미널 로거 설치 (stderr)
///
/// 이미 로거가 설치되어 있으면 `Config` 오류를 반환한다.
pub fn init(level: &str) -> Result<()> {
    let filter = parse_level(level)?;
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_location_level(LevelFilter::Off)
        .build();
    TermLogger::init(filter, config, TerminalMode::Stderr, ColorChoice::Auto)
        .map_err(|e| DuoPaneError::Config(format!("logger already initialized: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN ").unwrap(), LevelFilter::Warn);
        assert!(matches!(
            parse_level("loud"),
            Err(DuoPaneError::Config(_))
        ));
    }
}
