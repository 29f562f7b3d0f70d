// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::error::{code::ErrorCode, ContactMailerResult};
use crate::modules::logger::file::setup_file_logger;
use crate::modules::settings::cli::SETTINGS;
use crate::raise_error;
use chrono::Local;
use tracing::Level;
use tracing_subscriber::fmt::{format::Writer, time::FormatTime};

mod file;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z"))
    }
}

pub fn initialize_logging() -> ContactMailerResult<()> {
    let level = parse_log_level(&SETTINGS.contactmailer_log_level)?;
    let result = if SETTINGS.contactmailer_log_to_file {
        setup_file_logger(level)
    } else {
        setup_stdout_logger(level)
    };
    result.map_err(|e| {
        raise_error!(
            format!("Failed to install the log subscriber: {:#?}", e),
            ErrorCode::InternalError
        )
    })
}

fn setup_stdout_logger(level: Level) -> Result<(), tracing::dispatcher::SetGlobalDefaultError> {
    let format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_target(true)
        .with_timer(LocalTimer);

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(SETTINGS.contactmailer_ansi_logs)
        .with_writer(std::io::stdout)
        .event_format(format)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}

fn parse_log_level(value: &str) -> ContactMailerResult<Level> {
    value.parse::<Level>().map_err(|_| {
        raise_error!(
            format!(
                "Invalid log level specified. Use one of: error, warn, info, debug, trace. \
                 The log level you currently specified is 'contactmailer_log_level'='{}'",
                value
            ),
            ErrorCode::InvalidParameter
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
        let error = parse_log_level("verbose").unwrap_err();
        assert_eq!(error.code(), ErrorCode::InvalidParameter);
    }
}
