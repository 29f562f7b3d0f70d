// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use crate::modules::smtp::config::SmtpConfig;
use crate::modules::smtp::transport::SmtpMailTransport;
use crate::modules::submission::orchestrator::{SubmissionHandler, SubmissionOrchestrator};
use crate::modules::submission::stager::AttachmentStager;
use crate::modules::submission::token::{HexStagingTokenSource, StagingTokenSource};
use crate::modules::submission::{SubmissionRequest, UploadedFile};

/// Shared by every request handler.
#[derive(Clone)]
pub struct ContactState {
    pub handler: Arc<dyn SubmissionHandler>,
    pub tokens: Arc<dyn StagingTokenSource>,
}

impl ContactState {
    pub fn new(handler: Arc<dyn SubmissionHandler>, tokens: Arc<dyn StagingTokenSource>) -> Self {
        Self { handler, tokens }
    }

    pub fn from_config(config: SmtpConfig) -> Self {
        let mailbox = config.mailbox();
        let orchestrator = SubmissionOrchestrator::new(
            AttachmentStager::from_data_dir(),
            SmtpMailTransport::new(config),
            mailbox,
        );
        Self::new(Arc::new(orchestrator), Arc::new(HexStagingTokenSource))
    }

    /// Draws a staging token only when there is something to stage.
    pub async fn submit(
        &self,
        name: String,
        email: String,
        message: String,
        attachments: Vec<UploadedFile>,
    ) -> bool {
        let token = (!attachments.is_empty()).then(|| self.tokens.next_token());
        let request = SubmissionRequest {
            name,
            email,
            message,
            attachments,
        };
        self.handler.handle(request, token).await
    }
}
