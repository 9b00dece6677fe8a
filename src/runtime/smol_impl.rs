//! smol runtime implementation.

use std::future::Future;
use std::time::Duration;

/// Sleep for the specified duration using smol.
pub(super) async fn sleep_impl(duration: Duration) {
    smol::Timer::after(duration).await;
}

/// Spawn a detached task on smol's global executor.
pub(super) fn spawn_impl<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    // smol cancels tasks whose handle is dropped, so detach explicitly.
    smol::spawn(future).detach();
}
