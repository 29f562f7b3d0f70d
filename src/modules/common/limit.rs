// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use http::header::CONTENT_LENGTH;
use poem::{Body, Endpoint, Middleware, Request, Result};
use tokio::io::AsyncReadExt;
use tracing::warn;

use crate::modules::error::code::ErrorCode;

use super::create_api_error_response;

/// Caps request bodies at `max_size` bytes. A declared Content-Length above
/// the cap is rejected up front; bodies without one are cut off at the cap.
pub struct UploadLimit {
    max_size: usize,
}

impl UploadLimit {
    pub fn new(max_size: usize) -> Self {
        Self { max_size }
    }
}

impl<E: Endpoint> Middleware<E> for UploadLimit {
    type Output = UploadLimitEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        UploadLimitEndpoint {
            ep,
            max_size: self.max_size,
        }
    }
}

pub struct UploadLimitEndpoint<E> {
    ep: E,
    max_size: usize,
}

impl<E: Endpoint> Endpoint for UploadLimitEndpoint<E> {
    type Output = E::Output;

    async fn call(&self, mut req: Request) -> Result<Self::Output> {
        let declared = req
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok());

        match declared {
            Some(length) if length > self.max_size as u64 => {
                warn!(
                    "Rejected {} byte request body, limit is {}",
                    length, self.max_size
                );
                return Err(create_api_error_response(
                    &format!(
                        "Request body of {} bytes exceeds the {} byte limit",
                        length, self.max_size
                    ),
                    ErrorCode::PayloadTooLarge,
                ));
            }
            Some(_) => {}
            None => {
                let body = req.take_body().into_async_read();
                req.set_body(Body::from_async_read(body.take(self.max_size as u64)));
            }
        }
        self.ep.call(req).await
    }
}
