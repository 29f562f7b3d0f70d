// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::error::code::ErrorCode;
use crate::modules::error::{ContactMailerError, ContactMailerResult};
use crate::raise_error;
use mail_send::smtp::message::IntoMessage;
use mail_send::{Credentials, SmtpClient};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;

/// An established SMTP session, upgraded with STARTTLS or left in plain text
/// when the relay does not offer it and the configuration allows that.
pub enum ContactSmtpClient {
    Plain(SmtpClient<TcpStream>),
    Tls(SmtpClient<TlsStream<TcpStream>>),
}

impl ContactSmtpClient {
    pub fn is_tls(&self) -> bool {
        matches!(self, ContactSmtpClient::Tls(_))
    }
}

pub(crate) trait Sender {
    async fn authenticate(
        &mut self,
        local_host: &str,
        credentials: &Credentials<String>,
    ) -> ContactMailerResult<()>;
    async fn send_email<'x>(&mut self, message: impl IntoMessage<'x>) -> ContactMailerResult<()>;
    async fn quit(self) -> ContactMailerResult<()>;
}

impl Sender for ContactSmtpClient {
    async fn authenticate(
        &mut self,
        local_host: &str,
        credentials: &Credentials<String>,
    ) -> ContactMailerResult<()> {
        match self {
            ContactSmtpClient::Plain(smtp_client) => {
                authenticate_session(smtp_client, local_host, credentials).await
            }
            ContactSmtpClient::Tls(smtp_client) => {
                authenticate_session(smtp_client, local_host, credentials).await
            }
        }
    }

    async fn send_email<'x>(&mut self, message: impl IntoMessage<'x>) -> ContactMailerResult<()> {
        match self {
            ContactSmtpClient::Plain(smtp_client) => smtp_client
                .send(message)
                .await
                .map_err(|e| smtp_error(e, ErrorCode::SmtpCommandFailed)),
            ContactSmtpClient::Tls(smtp_client) => smtp_client
                .send(message)
                .await
                .map_err(|e| smtp_error(e, ErrorCode::SmtpCommandFailed)),
        }
    }

    async fn quit(self) -> ContactMailerResult<()> {
        match self {
            ContactSmtpClient::Plain(smtp_client) => smtp_client
                .quit()
                .await
                .map_err(|e| smtp_error(e, ErrorCode::SmtpCommandFailed)),
            ContactSmtpClient::Tls(smtp_client) => smtp_client
                .quit()
                .await
                .map_err(|e| smtp_error(e, ErrorCode::SmtpCommandFailed)),
        }
    }
}

// EHLO again so the AUTH mechanisms are the ones offered on the current
// (possibly just upgraded) channel.
async fn authenticate_session<T: AsyncRead + AsyncWrite + Unpin>(
    smtp_client: &mut SmtpClient<T>,
    local_host: &str,
    credentials: &Credentials<String>,
) -> ContactMailerResult<()> {
    let capabilities = smtp_client
        .capabilities(local_host, false)
        .await
        .map_err(|e| smtp_error(e, ErrorCode::SmtpAuthenticationFailed))?;
    smtp_client
        .authenticate(credentials, &capabilities)
        .await
        .map_err(|e| smtp_error(e, ErrorCode::SmtpAuthenticationFailed))?;
    Ok(())
}

/// Maps a relay failure to `code`, except socket timeouts which always
/// surface as `ConnectionTimeout`.
pub(crate) fn smtp_error(error: mail_send::Error, code: ErrorCode) -> ContactMailerError {
    match error {
        mail_send::Error::Timeout => raise_error!(
            "SMTP server did not answer in time".into(),
            ErrorCode::ConnectionTimeout
        ),
        other => raise_error!(format!("{:#?}", other), code),
    }
}
