// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use crate::modules::error::{code::ErrorCode, ContactMailerResult};
use crate::modules::settings::cli::{SmtpSecurity, SETTINGS};
use crate::raise_error;

/// Relay settings consumed by the transport. The port stays textual until a
/// send is attempted.
#[derive(Clone, Debug)]
pub struct SmtpConfig {
    pub host: String,
    pub port: String,
    pub username: String,
    pub password: String,
    pub recipient: String,
    pub security: SmtpSecurity,
    pub accept_invalid_certs: bool,
    pub timeout: Duration,
}

/// Fixed envelope of every forwarded submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mailbox {
    pub sender: String,
    pub recipient: String,
}

impl SmtpConfig {
    pub fn from_settings() -> Self {
        Self {
            host: SETTINGS.contactmailer_smtp_host.clone(),
            port: SETTINGS.contactmailer_smtp_port.clone(),
            username: SETTINGS.contactmailer_smtp_username.clone(),
            password: SETTINGS.contactmailer_smtp_password.clone(),
            recipient: SETTINGS.contactmailer_smtp_recipient.clone(),
            security: SETTINGS.contactmailer_smtp_security,
            accept_invalid_certs: SETTINGS.contactmailer_smtp_accept_invalid_certs,
            timeout: Duration::from_secs(SETTINGS.contactmailer_smtp_timeout_secs),
        }
    }

    /// Rejects blank relay settings at start-up. The port is checked per send.
    pub fn validate(&self) -> ContactMailerResult<()> {
        let required = [
            ("contactmailer_smtp_host", &self.host),
            ("contactmailer_smtp_username", &self.username),
            ("contactmailer_smtp_password", &self.password),
            ("contactmailer_smtp_recipient", &self.recipient),
        ];
        if let Some((name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(raise_error!(
                format!("'{}' must be configured", name),
                ErrorCode::MissingConfiguration
            ));
        }
        Ok(())
    }

    pub fn parse_port(&self) -> ContactMailerResult<u16> {
        match self.port.trim().parse::<u16>() {
            Ok(port) if port > 0 => Ok(port),
            _ => Err(raise_error!(
                format!("No valid port number was found in config: '{}'", self.port),
                ErrorCode::InvalidPort
            )),
        }
    }

    /// The submitter's own address never appears here: mail goes out as the
    /// relay account, to the configured inbox.
    pub fn mailbox(&self) -> Mailbox {
        Mailbox {
            sender: self.username.clone(),
            recipient: self.recipient.clone(),
        }
    }
}
