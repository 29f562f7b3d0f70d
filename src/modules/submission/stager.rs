// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::modules::error::{code::ErrorCode, ContactMailerResult};
use crate::modules::settings::dir::DATA_DIR_MANAGER;
use crate::modules::submission::token::StagingToken;
use crate::modules::submission::UploadedFile;
use crate::raise_error;

pub const ALLOWED_CONTENT_TYPES: [&str; 3] = ["image/jpg", "image/jpeg", "image/gif"];

pub fn is_allowed_content_type(content_type: &str) -> bool {
    ALLOWED_CONTENT_TYPES
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(content_type.trim()))
}

/// Final path component of a client supplied name, split on both separators.
pub fn sanitize_file_name(file_name: &str) -> Option<&str> {
    file_name
        .rsplit(['/', '\\'])
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
}

/// Writes uploads into `<root>/<token>`.
#[derive(Clone, Debug)]
pub struct AttachmentStager {
    root: PathBuf,
}

impl AttachmentStager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_data_dir() -> Self {
        Self::new(DATA_DIR_MANAGER.uploads_dir.clone())
    }

    pub async fn stage(
        &self,
        token: &StagingToken,
        files: Vec<UploadedFile>,
    ) -> ContactMailerResult<StagedDirectory> {
        let path = self.root.join(token);
        tokio::fs::create_dir_all(&path).await.map_err(|e| {
            raise_error!(
                format!("Failed to create '{}': {:#?}", path.display(), e),
                ErrorCode::StagingIoFailed
            )
        })?;
        let staged = StagedDirectory::new(path);

        for file in files {
            if let Err(e) = staged.write(file).await {
                if let Err(cleanup) = staged.remove().await {
                    warn!("{}", cleanup);
                }
                return Err(e);
            }
        }
        Ok(staged)
    }
}

/// A staged submission directory. Removed by `remove()`, or on drop if that
/// never ran.
#[derive(Debug)]
pub struct StagedDirectory {
    path: PathBuf,
    removed: bool,
}

impl StagedDirectory {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            removed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write(&self, mut file: UploadedFile) -> ContactMailerResult<()> {
        if !is_allowed_content_type(&file.content_type) {
            debug!(
                file_name = %file.file_name,
                content_type = %file.content_type,
                "Skipping upload with unsupported content type"
            );
            return Ok(());
        }
        let Some(name) = sanitize_file_name(&file.file_name) else {
            debug!("Skipping upload without a usable file name");
            return Ok(());
        };
        let target = self.path.join(name);

        let io_error = |e: std::io::Error| {
            raise_error!(
                format!("Failed to write '{}': {:#?}", target.display(), e),
                ErrorCode::StagingIoFailed
            )
        };
        let mut output = tokio::fs::File::create(&target).await.map_err(io_error)?;
        tokio::io::copy(&mut file.content, &mut output)
            .await
            .map_err(io_error)?;
        output.flush().await.map_err(io_error)?;
        Ok(())
    }

    /// Deletes the directory and everything in it. A directory that is
    /// already gone counts as removed.
    pub async fn remove(mut self) -> ContactMailerResult<()> {
        self.removed = true;
        match tokio::fs::remove_dir_all(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(raise_error!(
                format!("Failed to remove '{}': {:#?}", self.path.display(), e),
                ErrorCode::StagingIoFailed
            )),
        }
    }
}

impl Drop for StagedDirectory {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        if let Err(e) = std::fs::remove_dir_all(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to remove staged directory '{}': {}", self.path.display(), e);
            }
        }
    }
}
