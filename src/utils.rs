//! Utility functions: wall clock, host identity, shutdown signal.

use std::io;

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::info;

/// Current UTC time as an RFC 3339 string, e.g. `2024-05-01T12:34:56.789Z`.
pub fn now_timestamp() -> Result<String, time::error::Format> {
    OffsetDateTime::now_utc().format(&Rfc3339)
}

/// Host name of the machine (or container) serving the request.
pub fn hostname() -> io::Result<String> {
    ::hostname::get()?.into_string().map_err(|raw| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("hostname is not valid UTF-8: {raw:?}"),
        )
    })
}

/// Resolves when the process receives Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
