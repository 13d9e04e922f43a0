/// Resolves with the name of the first termination signal received.
pub async fn shutdown_signal() -> &'static str {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate = match signal(SignalKind::terminate()) {
            Ok(sig) => sig,
            Err(err) => {
                tracing::warn!("Unable to listen for SIGTERM: {err}");
                return ctrl_c().await;
            }
        };
        let mut hangup = match signal(SignalKind::hangup()) {
            Ok(sig) => sig,
            Err(err) => {
                tracing::warn!("Unable to listen for SIGHUP: {err}");
                return ctrl_c().await;
            }
        };

        tokio::select! {
            name = ctrl_c() => name,
            _ = terminate.recv() => "SIGTERM",
            _ = hangup.recv() => "SIGHUP",
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c().await
    }
}

async fn ctrl_c() -> &'static str {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
    "SIGINT"
}

/// Exits the process once a termination signal arrives.
pub fn install_signal_handlers() {
    tokio::spawn(async {
        let name = shutdown_signal().await;
        tracing::info!("Caught {name}. Exiting...");
        std::process::exit(0);
    });
}
