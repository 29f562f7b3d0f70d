// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use super::error::code::ErrorCode;
use super::error::ContactMailerError;
use poem::error::ResponseError;
use poem::Body;
use poem::{http::StatusCode, Error, Response};
use tracing::error;

pub mod error;
pub mod limit;
pub mod log;
pub mod rustls;
pub mod timeout;

#[inline]
fn create_contact_mailer_error(message: &str, code: ErrorCode) -> ContactMailerError {
    ContactMailerError::Generic {
        message: message.into(),
        location: snafu::Location::default(),
        code,
    }
}

#[inline]
pub fn create_api_error_response(message: &str, code: ErrorCode) -> Error {
    let contact_mailer_error = create_contact_mailer_error(message, code);
    contact_mailer_error.into()
}

impl ResponseError for ContactMailerError {
    fn status(&self) -> StatusCode {
        self.code().status()
    }

    fn as_response(&self) -> Response
    where
        Self: std::error::Error + Send + Sync + 'static,
    {
        match self {
            ContactMailerError::Generic {
                message,
                location,
                code,
            } => {
                error!(
                    error_code = *code as u32,
                    error_message = %message,
                    error_location = ?location
                );

                let body = Body::from_json(serde_json::json!({
                    "code": *code as u32,
                    "message": message.to_string(),
                }))
                .unwrap_or_else(|_| Body::from_string(message.to_string()));

                Response::builder().status(self.status()).body(body)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_api_error_response_status() {
        let error = create_api_error_response("too big", ErrorCode::PayloadTooLarge);
        assert_eq!(error.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(error.is::<ContactMailerError>());
    }
}
