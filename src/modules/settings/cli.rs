// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use clap::{builder::ValueParser, Parser, ValueEnum};
use std::{fmt, path::PathBuf, sync::LazyLock};

#[cfg(not(test))]
pub static SETTINGS: LazyLock<Settings> = LazyLock::new(Settings::parse);

#[cfg(test)]
pub static SETTINGS: LazyLock<Settings> = LazyLock::new(Settings::new_for_test);

#[derive(Debug, Parser)]
#[clap(
    name = "contactmailer",
    about = "A contact form service that forwards each submission, with its image attachments, to a fixed mailbox over SMTP.",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Settings {
    /// contactmailer log level (default: "info")
    #[clap(
        long,
        default_value = "info",
        env,
        help = "Set the log level for contactmailer"
    )]
    pub contactmailer_log_level: String,

    /// contactmailer HTTP port (default: 15630)
    #[clap(
        long,
        default_value = "15630",
        env,
        help = "Set the HTTP port for contactmailer"
    )]
    pub contactmailer_http_port: u16,

    /// The IP address that the HTTP server binds to, in IPv4 format (e.g., 192.168.1.1).
    #[clap(
        long,
        env,
        default_value = "0.0.0.0",
        help = "The IP address that the HTTP server binds to, in IPv4 format (e.g., 192.168.1.1).",
        value_parser = ValueParser::new(|s: &str| {
            if s.parse::<std::net::Ipv4Addr>().is_err() {
                return Err("The bind IP address must be a valid IPv4 address.".to_string());
            }
            Ok(s.to_string())
        })
    )]
    pub contactmailer_bind_ip: Option<String>,

    /// Enable ANSI logs (default: true)
    #[clap(long, default_value = "true", env, help = "Enable ANSI formatted logs")]
    pub contactmailer_ansi_logs: bool,

    /// Enable log file output (default: false)
    /// If false, logs will be printed to stdout
    #[clap(
        long,
        default_value = "false",
        env,
        help = "Enable log file output (otherwise logs go to stdout)"
    )]
    pub contactmailer_log_to_file: bool,

    /// Maximum number of log files (default: 5)
    #[clap(
        long,
        default_value = "5",
        env,
        help = "Set the maximum number of server log files"
    )]
    pub contactmailer_max_server_log_files: usize,

    #[clap(
        long,
        env,
        help = "Set the root directory for uploads and logs",
        value_parser = ValueParser::new(|s: &str| {
            let path = PathBuf::from(s);
            if !path.is_absolute() {
                return Err("Path must be an absolute directory path".to_string());
            }
            if !path.exists() {
                return Err(format!("Path {:?} does not exist", path));
            }
            if !path.is_dir() {
                return Err(format!("Path {:?} is not a directory", path));
            }
            Ok(s.to_string())
        })
    )]
    pub contactmailer_root_dir: String,

    /// Host name of the SMTP relay used to forward submissions.
    #[clap(long, env, help = "Set the SMTP relay host")]
    pub contactmailer_smtp_host: String,

    /// Port of the SMTP relay. Kept as text and checked on every send, so a
    /// broken value fails the submission rather than the start-up.
    #[clap(
        long,
        env,
        default_value = "587",
        help = "Set the SMTP relay port"
    )]
    pub contactmailer_smtp_port: String,

    /// Account used to authenticate against the relay; also the sender address.
    #[clap(long, env, help = "Set the SMTP username (also used as the sender)")]
    pub contactmailer_smtp_username: String,

    #[clap(long, env, help = "Set the SMTP password")]
    pub contactmailer_smtp_password: String,

    /// Mailbox that receives every submission.
    #[clap(long, env, help = "Set the address that receives contact submissions")]
    pub contactmailer_smtp_recipient: String,

    #[clap(
        long,
        env,
        default_value = "starttls",
        help = "How the SMTP session is secured (options: starttls, starttls-when-available)"
    )]
    pub contactmailer_smtp_security: SmtpSecurity,

    /// Skips certificate verification after STARTTLS. Only for relays with
    /// self-signed certificates.
    #[clap(
        long,
        default_value = "false",
        env,
        help = "Accept invalid or self-signed SMTP relay certificates"
    )]
    pub contactmailer_smtp_accept_invalid_certs: bool,

    #[clap(
        long,
        env,
        default_value = "30",
        help = "Timeout in seconds for each SMTP step (connect, authenticate, send)",
        value_parser = clap::value_parser!(u64).range(1..=600)
    )]
    pub contactmailer_smtp_timeout_secs: u64,

    #[clap(
        long,
        env,
        default_value = "10485760",
        help = "Maximum accepted size in bytes of a single form submission, attachments included"
    )]
    pub contactmailer_max_upload_size: usize,

    #[clap(
        long,
        env,
        default_value = "60",
        help = "Timeout in seconds for a whole HTTP request",
        value_parser = clap::value_parser!(u64).range(1..=600)
    )]
    pub contactmailer_request_timeout_secs: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SmtpSecurity {
    /// The relay must offer STARTTLS; the session fails otherwise.
    #[clap(name = "starttls")]
    StartTls,
    /// Upgrade with STARTTLS when offered, continue in plain text when not.
    #[clap(name = "starttls-when-available")]
    StartTlsWhenAvailable,
}

impl fmt::Display for SmtpSecurity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmtpSecurity::StartTls => write!(f, "starttls"),
            SmtpSecurity::StartTlsWhenAvailable => write!(f, "starttls-when-available"),
        }
    }
}

impl Settings {
    #[cfg(test)]
    fn new_for_test() -> Self {
        Self {
            contactmailer_log_level: "info".to_string(),
            contactmailer_http_port: 15630,
            contactmailer_bind_ip: Default::default(),
            contactmailer_ansi_logs: false,
            contactmailer_log_to_file: false,
            contactmailer_max_server_log_files: 5,
            contactmailer_root_dir: std::env::temp_dir()
                .join("contactmailer_data")
                .to_string_lossy()
                .into_owned(),
            contactmailer_smtp_host: "localhost".into(),
            contactmailer_smtp_port: "2525".into(),
            contactmailer_smtp_username: "forms@example.com".into(),
            contactmailer_smtp_password: "secret".into(),
            contactmailer_smtp_recipient: "inbox@example.com".into(),
            contactmailer_smtp_security: SmtpSecurity::StartTlsWhenAvailable,
            contactmailer_smtp_accept_invalid_certs: false,
            contactmailer_smtp_timeout_secs: 5,
            contactmailer_max_upload_size: 1024 * 1024,
            contactmailer_request_timeout_secs: 30,
        }
    }
}
