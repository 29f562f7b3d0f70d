// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::LazyLock;

use chrono::Local;
use poem::{handler, web::Json, IntoResponse};
use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::{contactmailer_version, utc_now};

static STARTED_AT: LazyLock<i64> = LazyLock::new(|| utc_now!());

/// Marks the service start; uptime is measured from the first call.
pub fn mark_started() {
    LazyLock::force(&STARTED_AT);
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Object)]
pub struct ServiceStatus {
    /// Service name.
    pub name: String,
    /// The running version.
    pub version: String,
    /// Milliseconds since the service started.
    pub uptime_ms: i64,
    /// Offset of the server's local time zone, e.g. "+08:00".
    pub timezone: String,
}

impl ServiceStatus {
    pub fn get() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").into(),
            version: contactmailer_version!().into(),
            uptime_ms: utc_now!() - *STARTED_AT,
            timezone: Local::now().offset().to_string(),
        }
    }
}

#[handler]
pub async fn get_status() -> impl IntoResponse {
    Json(ServiceStatus::get())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_version() {
        mark_started();
        let status = ServiceStatus::get();
        assert_eq!(status.name, "contactmailer");
        assert_eq!(status.version, env!("CARGO_PKG_VERSION"));
        assert!(status.uptime_ms >= 0);
    }
}
