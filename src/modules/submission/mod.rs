// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::io::Cursor;

use tokio::io::AsyncRead;

pub mod orchestrator;
pub mod stager;
pub mod token;
pub mod validator;

/// One contact-form submission as received from the caller.
#[derive(Debug)]
pub struct SubmissionRequest {
    pub name: String,
    pub email: String,
    pub message: String,
    pub attachments: Vec<UploadedFile>,
}

impl SubmissionRequest {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
            attachments: Vec::new(),
        }
    }

    pub fn with_attachment(mut self, file: UploadedFile) -> Self {
        self.attachments.push(file);
        self
    }
}

pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub content: Box<dyn AsyncRead + Send + Unpin>,
}

impl UploadedFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        content: impl AsyncRead + Send + Unpin + 'static,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            content: Box::new(content),
        }
    }

    pub fn from_bytes(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self::new(file_name, content_type, Cursor::new(bytes.into()))
    }
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}
