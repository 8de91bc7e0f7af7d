//! Task spawning and deferred timers for the request lifecycle.
//! Browser builds run on the wasm-bindgen executor with gloo timers; server
//! builds fall back to the Leptos spawner and tokio's clock.

use std::time::Duration;

use futures::future::LocalBoxFuture;

/// Longest delay a browser timer honours (`setTimeout` takes an `i32` of
/// milliseconds); longer sleeps are cut to this.
pub const MAX_SLEEP: Duration = Duration::from_millis(i32::MAX as u64);

/// Where the lifecycle controller runs its in-flight request and timeout
/// tasks. Everything is single-threaded, so futures need not be `Send`.
pub trait Scheduler {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

/// Scheduler used by the `NukeButton` component.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformScheduler;

#[cfg(feature = "hydrate")]
impl Scheduler for PlatformScheduler {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(gloo_timers::future::sleep(duration.min(MAX_SLEEP)))
    }
}

#[cfg(all(feature = "ssr", not(feature = "hydrate")))]
impl Scheduler for PlatformScheduler {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        leptos::task::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}

// Fallback for when neither feature is enabled (cargo check)
#[cfg(not(any(feature = "ssr", feature = "hydrate")))]
impl Scheduler for PlatformScheduler {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        leptos::task::spawn_local(task);
    }

    fn sleep(&self, _duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(futures::future::pending())
    }
}
