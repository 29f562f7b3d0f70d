// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use poem::{Endpoint, Middleware, Request, Result};
use std::time::Duration;
use tracing::error;

use crate::modules::error::code::ErrorCode;

use super::create_api_error_response;

/// Bounds the total time spent serving one request.
pub struct Timeout {
    seconds: u64,
}

impl Timeout {
    pub fn new(seconds: u64) -> Self {
        Self { seconds }
    }
}

impl<E: Endpoint> Middleware<E> for Timeout {
    type Output = TimeoutEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        TimeoutEndpoint {
            ep,
            seconds: self.seconds,
        }
    }
}

pub struct TimeoutEndpoint<E> {
    ep: E,
    seconds: u64,
}

impl<E: Endpoint> Endpoint for TimeoutEndpoint<E> {
    type Output = E::Output;

    async fn call(&self, req: Request) -> Result<Self::Output> {
        match tokio::time::timeout(Duration::from_secs(self.seconds), self.ep.call(req)).await {
            Ok(result) => result,
            Err(_) => {
                error!("Request timed out after {} seconds", self.seconds);
                Err(create_api_error_response(
                    &format!("Request timed out after {} seconds", self.seconds),
                    ErrorCode::RequestTimeout,
                ))
            }
        }
    }
}
