// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::future::Future;

use mail_send::smtp::message::IntoMessage;
use mail_send::smtp::tls::build_tls_connector;
use mail_send::smtp::AssertReply;
use mail_send::{Credentials, SmtpClient};
use tokio::net::TcpStream;
use tracing::{debug, info};

use crate::modules::error::{code::ErrorCode, ContactMailerError, ContactMailerResult};
use crate::modules::settings::cli::SmtpSecurity;
use crate::modules::smtp::client::{smtp_error, ContactSmtpClient, Sender};
use crate::modules::smtp::composer::ComposedMessage;
use crate::modules::smtp::config::SmtpConfig;
use crate::modules::smtp::util::local_host;
use crate::{raise_error, run_with_timeout};

const EXT_START_TLS: u32 = 1 << 24;

/// Hands a composed message to a mail relay.
pub trait MailTransport: Send + Sync {
    fn send(&self, message: &ComposedMessage)
        -> impl Future<Output = ContactMailerResult<()>> + Send;
}

/// Opens one SMTP session per message: STARTTLS, AUTH, send, QUIT.
pub struct SmtpMailTransport {
    config: SmtpConfig,
}

impl SmtpMailTransport {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    fn timeout_error(&self, stage: &str) -> ContactMailerError {
        raise_error!(
            format!(
                "SMTP {} with {} did not finish within {:?}",
                stage, self.config.host, self.config.timeout
            ),
            ErrorCode::ConnectionTimeout
        )
    }

    async fn connect(&self, port: u16, local_host: &str) -> ContactMailerResult<ContactSmtpClient> {
        let host = self.config.host.as_str();
        let stream = run_with_timeout!(
            self.config.timeout,
            TcpStream::connect((host, port)),
            self.timeout_error("connect")
        )?
        .map_err(|e| {
            raise_error!(
                format!("Failed to connect to {}:{}: {:#?}", host, port, e),
                ErrorCode::SmtpConnectionFailed
            )
        })?;

        run_with_timeout!(
            self.config.timeout,
            handshake(stream, &self.config, local_host),
            self.timeout_error("handshake")
        )?
        .map_err(|e| smtp_error(e, ErrorCode::SmtpConnectionFailed))
    }
}

// Greeting, EHLO and, when offered, the STARTTLS upgrade.
async fn handshake(
    stream: TcpStream,
    config: &SmtpConfig,
    local_host: &str,
) -> Result<ContactSmtpClient, mail_send::Error> {
    let mut client = SmtpClient {
        stream,
        timeout: config.timeout,
    };
    client.read().await?.assert_positive_completion()?;
    let response = client.ehlo(local_host).await?;
    if response.has_capability(EXT_START_TLS) {
        let tls_connector = build_tls_connector(config.accept_invalid_certs);
        let client = client.start_tls(&tls_connector, &config.host).await?;
        return Ok(ContactSmtpClient::Tls(client));
    }
    match config.security {
        SmtpSecurity::StartTls => Err(mail_send::Error::MissingStartTls),
        SmtpSecurity::StartTlsWhenAvailable => Ok(ContactSmtpClient::Plain(client)),
    }
}

impl MailTransport for SmtpMailTransport {
    async fn send(&self, message: &ComposedMessage) -> ContactMailerResult<()> {
        let port = self.config.parse_port()?;
        let rendered = message.to_builder().into_message().map_err(|e| {
            raise_error!(
                format!("Failed to render message: {:#?}", e),
                ErrorCode::InternalError
            )
        })?;

        let local_host = local_host();
        let mut client = self.connect(port, &local_host).await?;
        debug!(
            host = %self.config.host,
            port,
            tls = client.is_tls(),
            "SMTP session established"
        );

        let credentials =
            Credentials::new(self.config.username.clone(), self.config.password.clone());
        let outcome = async {
            run_with_timeout!(
                self.config.timeout,
                client.authenticate(&local_host, &credentials),
                self.timeout_error("authentication")
            )??;
            run_with_timeout!(
                self.config.timeout,
                client.send_email(rendered),
                self.timeout_error("send")
            )??;
            Ok::<(), ContactMailerError>(())
        }
        .await;

        match run_with_timeout!(self.config.timeout, client.quit(), self.timeout_error("quit")) {
            Ok(Ok(())) => {}
            Ok(Err(e)) | Err(e) => debug!("Ignoring QUIT failure: {}", e),
        }

        if outcome.is_ok() {
            info!(
                recipient = %message.recipient,
                parts = message.body.part_count(),
                "Submission relayed via {}",
                self.config.host
            );
        }
        outcome
    }
}
