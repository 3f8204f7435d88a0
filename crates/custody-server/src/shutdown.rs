//! Graceful shutdown: stop accepting new requests on `SIGINT`/`SIGTERM`,
//! give in-flight requests up to five seconds to finish, then return so the
//! caller can close the store.

use std::time::Duration;
use tokio::signal;

const GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Resolves once `SIGINT` or `SIGTERM` is received. Pass the result to
/// [`axum::serve::Serve::with_graceful_shutdown`].
pub async fn signal_received() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::warn!("received shutdown signal");
}

/// The grace window a caller should wait for in-flight requests to finish
/// after `signal_received` resolves, before forcing shutdown.
pub fn grace_period() -> Duration {
    GRACE_PERIOD
}
