use crate::models::directory_entry::DirectoryEntry;
use crate::system::{DirectoryLister, FileOperations, PathProbe};
use crate::utils::error::{DuoPaneError, Result};
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// 로컬 파일 시스템 기반 협력자 구현
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// 새 파일 시스템 인스턴스 생성
    pub fn new() -> Self {
        Self
    }

    fn entry_from_metadata(&self, path: PathBuf, metadata: &Metadata) -> DirectoryEntry {
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        let entry = if metadata.is_dir() {
            DirectoryEntry::directory(path, modified)
        } else {
            DirectoryEntry::file(path, metadata.len(), modified)
        };
        let hidden = entry.is_hidden || is_hidden_attribute(metadata);
        entry.hidden(hidden)
    }

    /// 파일/디렉토리를 대상 경로로 복사 (디렉토리는 재귀)
    fn copy_path(&self, src: &Path, dest: &Path) -> Result<()> {
        let metadata = fs::symlink_metadata(src).map_err(|e| DuoPaneError::from_io(e, src))?;
        if metadata.is_dir() {
            fs::create_dir_all(dest).map_err(|e| DuoPaneError::from_io(e, dest))?;
            let read_dir = fs::read_dir(src).map_err(|e| DuoPaneError::from_io(e, src))?;
            for child in read_dir {
                let child = child.map_err(|e| DuoPaneError::from_io(e, src))?;
                self.copy_path(&child.path(), &dest.join(child.file_name()))?;
            }
            Ok(())
        } else {
            fs::copy(src, dest)
                .map(|_| ())
                .map_err(|e| DuoPaneError::from_io(e, dest))
        }
    }

    /// 목적지 안의 대상 경로 계산 + 충돌/재귀 검사
    fn target_for(&self, src: &Path, destination: &Path) -> Result<PathBuf> {
        let name = src.file_name().ok_or_else(|| DuoPaneError::NotFound {
            path: src.to_path_buf(),
        })?;
        if !src.exists() {
            return Err(DuoPaneError::NotFound {
                path: src.to_path_buf(),
            });
        }
        if !destination.is_dir() {
            return Err(DuoPaneError::NotADirectory {
                path: destination.to_path_buf(),
            });
        }
        if src.is_dir() && destination.starts_with(src) {
            return Err(DuoPaneError::Unknown(format!(
                "cannot copy {} into itself",
                src.display()
            )));
        }
        let target = destination.join(name);
        if target.exists() {
            return Err(DuoPaneError::AlreadyExists { path: target });
        }
        Ok(target)
    }
}

impl DirectoryLister for LocalFileSystem {
    fn list_directory(&self, path: &Path) -> Result<Vec<DirectoryEntry>> {
        if !path.exists() {
            return Err(DuoPaneError::NotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.is_dir() {
            return Err(DuoPaneError::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        let read_dir = fs::read_dir(path).map_err(|e| DuoPaneError::from_io(e, path))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            // 읽을 수 없는 항목은 건너뜀
            let Ok(entry) = entry else { continue };
            let entry_path = entry.path();
            // symlink는 대상 메타데이터 우선, 깨진 링크는 링크 자체
            let Ok(metadata) =
                fs::metadata(&entry_path).or_else(|_| fs::symlink_metadata(&entry_path))
            else {
                continue;
            };
            entries.push(self.entry_from_metadata(entry_path, &metadata));
        }

        log::debug!("listed {} ({} entries)", path.display(), entries.len());
        Ok(entries)
    }
}

impl PathProbe for LocalFileSystem {
    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

impl FileOperations for LocalFileSystem {
    fn copy(&self, sources: &[PathBuf], destination: &Path) -> Result<()> {
        for src in sources {
            let target = self.target_for(src, destination)?;
            self.copy_path(src, &target)?;
        }
        Ok(())
    }

    fn move_items(&self, sources: &[PathBuf], destination: &Path) -> Result<()> {
        for src in sources {
            let target = self.target_for(src, destination)?;
            // 같은 파일 시스템이면 rename, 아니면 복사 후 삭제
            if fs::rename(src, &target).is_ok() {
                continue;
            }
            self.copy_path(src, &target)?;
            let removed = if src.is_dir() {
                fs::remove_dir_all(src)
            } else {
                fs::remove_file(src)
            };
            removed.map_err(|e| DuoPaneError::from_io(e, src))?;
        }
        Ok(())
    }

    fn delete(&self, paths: &[PathBuf]) -> Result<()> {
        if let Some(missing) = paths.iter().find(|p| !p.exists()) {
            return Err(DuoPaneError::NotFound {
                path: missing.clone(),
            });
        }
        trash::delete_all(paths).map_err(|e| DuoPaneError::Unknown(e.to_string()))
    }

    fn create_directory(&self, path: &Path) -> Result<()> {
        if path.exists() {
            return Err(DuoPaneError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        fs::create_dir(path).map_err(|e| DuoPaneError::from_io(e, path))
    }
}

#[cfg(windows)]
fn is_hidden_attribute(metadata: &Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;
    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
    metadata.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0
}

#[cfg(not(windows))]
fn is_hidden_attribute(_metadata: &Metadata) -> bool {
    false
}
