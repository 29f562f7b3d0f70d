// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::common::error::ErrorCapture;
use crate::modules::common::limit::UploadLimit;
use crate::modules::common::log::Tracing;
use crate::modules::common::timeout::Timeout;
use crate::modules::error::code::ErrorCode;
use crate::modules::error::handler::error_handler;
use crate::modules::error::ContactMailerResult;
use crate::modules::rest::public::form::{show_form, show_privacy, show_success, submit_form};
use crate::modules::rest::public::status::get_status;
use crate::modules::{settings::cli::SETTINGS, utils::shutdown::shutdown_signal};

use super::error::ApiErrorResponse;
use crate::raise_error;
use api::create_openapi_service;
use poem::listener::TcpListener;
use poem::middleware::CatchPanic;
use poem::{get, Endpoint, EndpointExt, Route, Server};
use state::ContactState;
use std::time::Duration;

pub mod api;
pub mod public;
pub mod state;
#[cfg(test)]
mod tests;

pub type ApiResult<T, E = ApiErrorResponse> = std::result::Result<T, E>;

const DESCRIPTION: &str = r#"
    Forwards contact-form submissions, with optional GIF or JPEG attachments, to a fixed inbox through an SMTP relay.
"#;

/// All pages and API endpoints with their middleware stack.
pub fn build_route(state: ContactState) -> impl Endpoint {
    let api_service = create_openapi_service()
        .description(DESCRIPTION)
        .summary("Contact form email submission service");

    let swagger = api_service.swagger_ui();
    let spec_json = api_service.spec_endpoint();

    Route::new()
        .at("/", get(show_form).post(submit_form))
        .at("/success", get(show_success))
        .at("/privacy", get(show_privacy))
        .at("/api/status", get(get_status))
        .nest_no_strip("/api/v1", api_service)
        .nest("/api-docs/swagger", swagger)
        .nest("/api-docs/spec.json", spec_json)
        .with(UploadLimit::new(SETTINGS.contactmailer_max_upload_size))
        .with(ErrorCapture)
        .with(Timeout::new(SETTINGS.contactmailer_request_timeout_secs))
        .with(Tracing)
        .with(CatchPanic::new())
        .data(state)
        .catch_all_error(error_handler)
}

pub async fn start_http_server(state: ContactState) -> ContactMailerResult<()> {
    let listener = TcpListener::bind((
        SETTINGS
            .contactmailer_bind_ip
            .clone()
            .unwrap_or("0.0.0.0".into()),
        SETTINGS.contactmailer_http_port,
    ));

    let server = Server::new(listener)
        .name("ContactMailer Service")
        .idle_timeout(Duration::from_secs(60))
        .run_with_graceful_shutdown(
            build_route(state),
            shutdown_signal(),
            Some(Duration::from_secs(5)),
        );
    tracing::info!(
        "ContactMailer is now running on port {}.",
        SETTINGS.contactmailer_http_port
    );
    server
        .await
        .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))
}
