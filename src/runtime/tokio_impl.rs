//! Tokio runtime implementation.

use std::future::Future;
use std::time::Duration;

/// Sleep for the specified duration using tokio.
pub(super) async fn sleep_impl(duration: Duration) {
    tokio::time::sleep(duration).await
}

/// Spawn a detached task on the ambient tokio runtime.
///
/// # Panics
///
/// Panics when called outside of a tokio runtime.
pub(super) fn spawn_impl<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    // Dropping the handle detaches the task.
    drop(tokio::spawn(future));
}
