// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::error::ContactMailerResult;

/// One-time start-up step run by `main` before the HTTP server accepts requests.
pub trait Initialize {
    async fn initialize() -> ContactMailerResult<()>;
}
