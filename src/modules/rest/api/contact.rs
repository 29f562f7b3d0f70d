// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use poem::web::Data;
use poem_openapi::payload::Json;
use poem_openapi::types::multipart::Upload;
use poem_openapi::{Multipart, Object, OpenApi};

use crate::modules::rest::api::ApiTags;
use crate::modules::rest::state::ContactState;
use crate::modules::rest::ApiResult;
use crate::modules::submission::UploadedFile;

/// A contact-form submission with optional image attachments.
#[derive(Debug, Multipart)]
pub struct ContactPayload {
    /// Sender's name, 3 to 128 characters.
    pub name: Option<String>,
    /// Sender's reply address, 3 to 256 characters.
    pub email: Option<String>,
    /// Message text, 3 to 2048 characters.
    pub message: Option<String>,
    /// GIF or JPEG images. Files of any other type are ignored.
    pub attachments: Vec<Upload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Object)]
pub struct SubmissionOutcome {
    /// Whether the message was handed to the mail relay.
    pub success: bool,
}

pub struct ContactApi;

#[OpenApi(prefix_path = "/api/v1", tag = "ApiTags::Contact")]
impl ContactApi {
    /// Submits the contact form.
    ///
    /// Validation, delivery and attachment problems are not reported in
    /// detail; the response only tells whether the message went out.
    #[oai(path = "/contact", method = "post", operation_id = "submit_contact")]
    async fn submit_contact(
        &self,
        state: Data<&ContactState>,
        payload: ContactPayload,
    ) -> ApiResult<Json<SubmissionOutcome>> {
        let attachments = payload
            .attachments
            .into_iter()
            .filter(|upload| upload.file_name().is_some_and(|name| !name.is_empty()))
            .map(|upload| {
                let file_name = upload.file_name().unwrap_or_default().to_string();
                let content_type = upload.content_type().unwrap_or_default().to_string();
                UploadedFile::new(file_name, content_type, upload.into_async_read())
            })
            .collect();

        let success = state
            .submit(
                payload.name.unwrap_or_default(),
                payload.email.unwrap_or_default(),
                payload.message.unwrap_or_default(),
                attachments,
            )
            .await;
        Ok(Json(SubmissionOutcome { success }))
    }
}
