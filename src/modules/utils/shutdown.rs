// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use tokio::signal;
use tracing::{error, info};

/// Resolves once the process is asked to stop (Ctrl+C, or SIGTERM on unix).
pub(crate) async fn shutdown_signal() {
    let ctrl_c_signal = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Unable to listen for Ctrl+C: {:#?}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate_signal = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Unable to listen for SIGTERM: {:#?}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate_signal = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c_signal => info!("Received Ctrl+C, shutting down"),
        _ = terminate_signal => info!("Received SIGTERM, shutting down"),
    };
}
