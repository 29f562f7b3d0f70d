use crate::modules::logger::LocalTimer;
use crate::modules::settings::cli::SETTINGS;
use crate::modules::settings::dir::DATA_DIR_MANAGER;
use std::sync::OnceLock;
use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;

// Dropping the guard stops the background writer, so it lives for the whole process.
pub static LOG_WORKER_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

pub fn setup_file_logger(level: Level) -> Result<(), tracing::dispatcher::SetGlobalDefaultError> {
    let server_layer = match server_log_writer() {
        Some(writer) => fmt::layer()
            .with_timer(LocalTimer)
            .with_ansi(false)
            .with_level(true)
            .with_writer(writer)
            .with_target(true),
        None => {
            eprintln!(
                "Cannot open a log file under {:?}, falling back to stdout",
                DATA_DIR_MANAGER.log_dir
            );
            let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
            let _ = LOG_WORKER_GUARD.set(guard);
            fmt::layer()
                .with_timer(LocalTimer)
                .with_ansi(SETTINGS.contactmailer_ansi_logs)
                .with_level(true)
                .with_writer(writer)
                .with_target(true)
        }
    };

    let subscriber = tracing_subscriber::registry()
        .with(LevelFilter::from_level(level))
        .with(server_layer);

    tracing::subscriber::set_global_default(subscriber)
}

fn server_log_writer() -> Option<NonBlocking> {
    let rolling = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("server")
        .max_log_files(SETTINGS.contactmailer_max_server_log_files)
        .build(DATA_DIR_MANAGER.log_dir.clone())
        .ok()?;
    let (nb, wg) = tracing_appender::non_blocking(rolling);
    let _ = LOG_WORKER_GUARD.set(wg);
    Some(nb)
}
