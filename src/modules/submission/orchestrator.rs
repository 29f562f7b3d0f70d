// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use tracing::{debug, error, warn};

use crate::modules::error::{code::ErrorCode, ContactMailerResult};
use crate::modules::smtp::composer::{MessageBody, MessageComposer};
use crate::modules::smtp::config::Mailbox;
use crate::modules::smtp::transport::MailTransport;
use crate::modules::submission::stager::AttachmentStager;
use crate::modules::submission::token::StagingToken;
use crate::modules::submission::validator::Validator;
use crate::modules::submission::SubmissionRequest;
use crate::raise_error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionStage {
    Validating,
    Staging,
    Composing,
    Sending,
    CleaningUp,
    Done(bool),
}

impl fmt::Display for SubmissionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionStage::Validating => f.write_str("validating"),
            SubmissionStage::Staging => f.write_str("staging"),
            SubmissionStage::Composing => f.write_str("composing"),
            SubmissionStage::Sending => f.write_str("sending"),
            SubmissionStage::CleaningUp => f.write_str("cleaning up"),
            SubmissionStage::Done(success) => write!(f, "done (success: {})", success),
        }
    }
}

/// Runs one submission end to end: validate, stage, compose, send, clean up.
/// Holds no per-submission state, so one instance serves concurrent callers.
pub struct SubmissionOrchestrator<T> {
    stager: AttachmentStager,
    transport: T,
    mailbox: Mailbox,
}

impl<T: MailTransport> SubmissionOrchestrator<T> {
    pub fn new(stager: AttachmentStager, transport: T, mailbox: Mailbox) -> Self {
        Self {
            stager,
            transport,
            mailbox,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `true` only when the message was accepted by the relay.
    pub async fn submit(&self, request: SubmissionRequest, token: Option<StagingToken>) -> bool {
        let success = match self.try_submit(request, token).await {
            Ok(()) => true,
            Err(e) => {
                error!(code = ?e.code(), "Submission failed: {}", e);
                false
            }
        };
        trace_stage(SubmissionStage::Done(success));
        success
    }

    pub async fn try_submit(
        &self,
        request: SubmissionRequest,
        token: Option<StagingToken>,
    ) -> ContactMailerResult<()> {
        trace_stage(SubmissionStage::Validating);
        Validator::validate(&request.name, &request.email, &request.message)?;

        let SubmissionRequest {
            name,
            email,
            message,
            attachments,
        } = request;
        let html = MessageComposer::compose_body(&name, &email, &message);

        if attachments.is_empty() {
            trace_stage(SubmissionStage::Composing);
            return self.send(&name, MessageBody::Html(html)).await;
        }

        let token = token.ok_or_else(|| {
            raise_error!(
                "Attachments were submitted without a staging token".into(),
                ErrorCode::MissingStagingToken
            )
        })?;
        trace_stage(SubmissionStage::Staging);
        let staged = self.stager.stage(&token, attachments).await?;

        let outcome = self.send_staged(&name, html, staged.path()).await;

        trace_stage(SubmissionStage::CleaningUp);
        if let Err(e) = staged.remove().await {
            warn!(%token, "Staged attachments were not removed: {}", e);
        }
        outcome
    }

    async fn send_staged(&self, name: &str, html: String, dir: &Path) -> ContactMailerResult<()> {
        trace_stage(SubmissionStage::Composing);
        let body = MessageComposer::compose_with_attachments(html, dir).await?;
        self.send(name, body).await
    }

    async fn send(&self, name: &str, body: MessageBody) -> ContactMailerResult<()> {
        let message = MessageComposer::compose(&self.mailbox, name, body);
        trace_stage(SubmissionStage::Sending);
        self.transport.send(&message).await
    }
}

fn trace_stage(stage: SubmissionStage) {
    debug!(%stage, "Submission stage");
}

/// Object-safe entry point for callers that hold the orchestrator behind a
/// trait object.
pub trait SubmissionHandler: Send + Sync {
    fn handle(
        &self,
        request: SubmissionRequest,
        token: Option<StagingToken>,
    ) -> Pin<Box<dyn Future<Output = bool> + Send + '_>>;
}

impl<T: MailTransport + 'static> SubmissionHandler for SubmissionOrchestrator<T> {
    fn handle(
        &self,
        request: SubmissionRequest,
        token: Option<StagingToken>,
    ) -> Pin<Box<dyn Future<Output = bool> + Send + '_>> {
        Box::pin(self.submit(request, token))
    }
}
