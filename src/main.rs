use mimalloc::MiMalloc;
use modules::{
    common::rustls::ContactMailerTls,
    context::Initialize,
    error::ContactMailerResult,
    logger,
    rest::{public::status::mark_started, start_http_server, state::ContactState},
    settings::{cli::SETTINGS, dir::DataDirManager},
    smtp::config::SmtpConfig,
};
use tracing::{error, info};

mod modules;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

static LOGO: &str = r#"
   ___           _             _   __  __       _ _
  / __|___ _ _ | |_ __ _ __ _| |_|  \/  |__ _(_) |___ _ _
 | (__/ _ \ ' \|  _/ _` / _|  _| |\/| / _` | | / -_) '_|
  \___\___/_||_|\__\__,_\__|\__|_|  |_\__,_|_|_\___|_|
"#;

#[tokio::main]
async fn main() -> ContactMailerResult<()> {
    if let Err(error) = logger::initialize_logging() {
        eprintln!("{}", error);
        return Err(error);
    }
    info!("{}", LOGO);
    info!("Starting contactmailer");
    info!("Version:  {}", contactmailer_version!());

    let config = match initialize().await {
        Ok(config) => config,
        Err(error) => {
            error!("{}", error);
            eprintln!("{:?}", error);
            return Err(error);
        }
    };

    info!(
        "Forwarding submissions to {} via {}:{} ({})",
        config.recipient, config.host, config.port, config.security
    );
    mark_started();
    start_http_server(ContactState::from_config(config)).await
}

/// Prepares directories, TLS and relay settings before serving requests.
async fn initialize() -> ContactMailerResult<SmtpConfig> {
    DataDirManager::initialize().await?;
    ContactMailerTls::initialize().await?;
    let config = SmtpConfig::from_settings();
    config.validate()?;
    info!("Staging uploads under {}", SETTINGS.contactmailer_root_dir);
    Ok(config)
}
