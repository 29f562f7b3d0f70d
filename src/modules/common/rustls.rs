// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::{
    modules::{
        context::Initialize,
        error::{code::ErrorCode, ContactMailerResult},
    },
    raise_error,
};

/// Installs the process-wide rustls crypto provider used by the STARTTLS upgrade.
pub struct ContactMailerTls;

impl Initialize for ContactMailerTls {
    async fn initialize() -> ContactMailerResult<()> {
        rustls::crypto::CryptoProvider::install_default(rustls::crypto::ring::default_provider())
            .map_err(|_| {
                raise_error!(
                    "failed to set crypto provider".into(),
                    ErrorCode::InternalError
                )
            })
    }
}
