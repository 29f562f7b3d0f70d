// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use poem::web::{Data, Html, Multipart, Redirect};
use poem::{handler, IntoResponse, Response};
use tracing::debug;

use crate::modules::error::{code::ErrorCode, ContactMailerResult};
use crate::modules::rest::public::views::{render_page, FormView};
use crate::modules::rest::state::ContactState;
use crate::modules::submission::validator::Validator;
use crate::modules::submission::UploadedFile;
use crate::raise_error;

pub const SUCCESS_PATH: &str = "/success";

#[handler]
pub async fn show_form() -> poem::Result<Html<String>> {
    Ok(Html(render_page("Contact", "form", &FormView::default())?))
}

#[handler]
pub async fn submit_form(state: Data<&ContactState>, multipart: Multipart) -> poem::Result<Response> {
    let (mut view, attachments) = read_form(multipart).await?;

    view.errors = Validator::field_errors(&view.name, &view.email, &view.message)
        .into_iter()
        .map(|e| e.to_string())
        .collect();
    if !view.errors.is_empty() {
        debug!(errors = view.errors.len(), "Contact form rejected");
        return Ok(Html(render_page("Contact", "form", &view)?).into_response());
    }

    let sent = state
        .submit(
            view.name.clone(),
            view.email.clone(),
            view.message.clone(),
            attachments,
        )
        .await;
    if sent {
        return Ok(Redirect::see_other(SUCCESS_PATH).into_response());
    }
    view.failure = true;
    Ok(Html(render_page("Contact", "form", &view)?).into_response())
}

#[handler]
pub async fn show_success() -> poem::Result<Html<String>> {
    Ok(Html(render_page("Thank you", "success", &serde_json::json!({}))?))
}

#[handler]
pub async fn show_privacy() -> poem::Result<Html<String>> {
    Ok(Html(render_page("Privacy", "privacy", &serde_json::json!({}))?))
}

// Browsers send an empty, nameless file part when no file was picked.
async fn read_form(mut multipart: Multipart) -> ContactMailerResult<(FormView, Vec<UploadedFile>)> {
    let mut view = FormView::default();
    let mut attachments = Vec::new();
    let invalid = |e: &dyn std::fmt::Display| {
        raise_error!(
            format!("Malformed form submission: {}", e),
            ErrorCode::InvalidParameter
        )
    };

    while let Some(field) = multipart.next_field().await.map_err(|e| invalid(&e))? {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("name") => view.name = field.text().await.map_err(|e| invalid(&e))?,
            Some("email") => view.email = field.text().await.map_err(|e| invalid(&e))?,
            Some("message") => view.message = field.text().await.map_err(|e| invalid(&e))?,
            Some("attachments") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let content = field.bytes().await.map_err(|e| invalid(&e))?;
                if file_name.is_empty() && content.is_empty() {
                    continue;
                }
                attachments.push(UploadedFile::from_bytes(file_name, content_type, content));
            }
            _ => {}
        }
    }
    Ok((view, attachments))
}
