//! async-std runtime implementation.

use std::future::Future;
use std::time::Duration;

/// Sleep for the specified duration using async-std.
pub(super) async fn sleep_impl(duration: Duration) {
    async_std::task::sleep(duration).await
}

/// Spawn a detached task using async-std.
pub(super) fn spawn_impl<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    // async-std tasks keep running when their handle is dropped.
    drop(async_std::task::spawn(future));
}
