// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use tracing::info;

use crate::modules::context::Initialize;
use crate::modules::settings::cli::SETTINGS;
use crate::{
    modules::error::{code::ErrorCode, ContactMailerResult},
    raise_error,
};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

const UPLOADS_DIR: &str = "uploads";
const LOG_DIR: &str = "logs";

pub static DATA_DIR_MANAGER: LazyLock<DataDirManager> =
    LazyLock::new(|| DataDirManager::new(PathBuf::from(&SETTINGS.contactmailer_root_dir)));

#[derive(Debug)]
pub struct DataDirManager {
    pub root_dir: PathBuf,
    /// Parent of every per-submission staging directory.
    pub uploads_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl Initialize for DataDirManager {
    async fn initialize() -> ContactMailerResult<()> {
        DATA_DIR_MANAGER.create_all()?;
        let leftovers = DATA_DIR_MANAGER.purge_stale_uploads()?;
        if leftovers > 0 {
            info!(
                "Removed {} staging directories left behind by a previous run",
                leftovers
            );
        }
        Ok(())
    }
}

impl DataDirManager {
    pub fn new(root_dir: PathBuf) -> Self {
        Self {
            root_dir: root_dir.clone(),
            uploads_dir: root_dir.join(UPLOADS_DIR),
            log_dir: root_dir.join(LOG_DIR),
        }
    }

    pub fn create_all(&self) -> ContactMailerResult<()> {
        for dir in [&self.root_dir, &self.uploads_dir, &self.log_dir] {
            Self::create_dir(dir)?;
        }
        Ok(())
    }

    fn create_dir(dir: &Path) -> ContactMailerResult<()> {
        std::fs::create_dir_all(dir).map_err(|e| {
            raise_error!(
                format!("Failed to create directory '{}': {:#?}", dir.display(), e),
                ErrorCode::InternalError
            )
        })
    }

    /// Staging directories only live for the duration of one submission, so
    /// anything found here at start-up belongs to a process that died mid-request.
    pub fn purge_stale_uploads(&self) -> ContactMailerResult<usize> {
        let entries = std::fs::read_dir(&self.uploads_dir).map_err(|e| {
            raise_error!(
                format!(
                    "Failed to read uploads directory '{}': {:#?}",
                    self.uploads_dir.display(),
                    e
                ),
                ErrorCode::InternalError
            )
        })?;

        let mut removed = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() && std::fs::remove_dir_all(&path).is_ok() {
                removed += 1;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_layout_under_root() {
        let temp_dir = tempdir().unwrap();
        let manager = DataDirManager::new(temp_dir.path().to_path_buf());
        assert_eq!(manager.uploads_dir, temp_dir.path().join("uploads"));
        assert_eq!(manager.log_dir, temp_dir.path().join("logs"));
    }

    #[test]
    fn test_create_all_is_idempotent() {
        let temp_dir = tempdir().unwrap();
        let manager = DataDirManager::new(temp_dir.path().join("data"));
        manager.create_all().unwrap();
        manager.create_all().unwrap();
        assert!(manager.uploads_dir.is_dir());
        assert!(manager.log_dir.is_dir());
    }

    #[test]
    fn test_purge_stale_uploads() {
        let temp_dir = tempdir().unwrap();
        let manager = DataDirManager::new(temp_dir.path().to_path_buf());
        manager.create_all().unwrap();

        let stale = manager.uploads_dir.join("A0123456789");
        std::fs::create_dir_all(&stale).unwrap();
        std::fs::write(stale.join("cat.gif"), b"GIF89a").unwrap();

        assert_eq!(manager.purge_stale_uploads().unwrap(), 1);
        assert!(!stale.exists());
        assert!(manager.uploads_dir.is_dir());
        assert_eq!(manager.purge_stale_uploads().unwrap(), 0);
    }
}
