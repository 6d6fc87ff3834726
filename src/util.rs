//! Utility functions and helpers.

use tokio::sync::mpsc;

/// Send a value through a channel, logging if the receiver is gone.
///
/// A closed receiver is expected once the user quits while a producer is still
/// running, so this only logs at debug level.
pub async fn send_or_log<T>(tx: &mpsc::Sender<T>, value: T, context: &str) -> bool {
    match tx.send(value).await {
        Ok(()) => true,
        Err(_) => {
            tracing::debug!("Dropped {}: receiver closed", context);
            false
        }
    }
}
