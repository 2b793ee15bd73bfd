//! 사용자 설정 (TOML)

use crate::core::sorting::{SortDirection, SortKey, SortSpec};
use crate::models::history::DEFAULT_HISTORY_LIMIT;
use crate::models::tab_container::DEFAULT_CLOSED_TAB_LIMIT;
use crate::utils::error::{DuoPaneError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// 설정 파일 경로를 덮어쓰는 환경 변수
pub const SETTINGS_ENV_VAR: &str = "DUOPANE_SETTINGS_FILE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 시작 경로 (없으면 현재 디렉토리)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_path: Option<PathBuf>,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub folders_first: bool,
    pub show_hidden: bool,
    /// 뒤로 스택 최대 크기
    pub history_limit: usize,
    /// 다시 열기 버퍼 크기
    pub closed_tab_limit: usize,
    /// 시작 시 이전 세션 복원
    pub restore_session: bool,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_path: None,
            sort_key: SortKey::Name,
            sort_direction: SortDirection::Ascending,
            folders_first: true,
            show_hidden: false,
            history_limit: DEFAULT_HISTORY_LIMIT,
            closed_tab_limit: DEFAULT_CLOSED_TAB_LIMIT,
            restore_session: true,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// 설정 파일 위치
    ///
    /// 1. `DUOPANE_SETTINGS_FILE` (비어 있지 않으면)
    /// 2. `<config_dir>/duopane/settings.toml`
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(custom) = env::var(SETTINGS_ENV_VAR) {
            let trimmed = custom.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        dirs::config_dir().map(|dir| dir.join("duopane").join("settings.toml"))
    }

    /// 기본 위치에서 로드. 파일이 없으면 기본값
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// 지정 경로에서 로드. 파일이 없으면 기본값, 형식 오류는 `Config`
    pub fn load_from(path: &Path) -> Result<Self> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(DuoPaneError::from_io(e, path)),
        };
        let settings: Settings = toml::from_str(&data)
            .map_err(|e| DuoPaneError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(settings.sanitized())
    }

    /// 지정 경로에 저장 (상위 디렉토리 생성)
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| DuoPaneError::from_io(e, parent))?;
        }
        let data =
            toml::to_string_pretty(self).map_err(|e| DuoPaneError::Config(e.to_string()))?;
        fs::write(path, data).map_err(|e| DuoPaneError::from_io(e, path))
    }

    fn sanitized(mut self) -> Self {
        self.history_limit = self.history_limit.max(1);
        self
    }

    /// 새 패널에 적용할 정렬 설정
    pub fn sort_spec(&self) -> SortSpec {
        SortSpec {
            key: self.sort_key,
            direction: self.sort_direction,
            folders_first: self.folders_first,
        }
    }
}
