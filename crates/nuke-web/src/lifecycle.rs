//! Request lifecycle for the launch button: start a request, cancel it on a
//! second click or a client-side timeout, and settle into `Idle` or `Error`.
//!
//! The controller knows nothing about Leptos. It reaches the network through
//! [`Transport`], runs its tasks through [`Scheduler`], and reports phase
//! changes to an observer callback.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use futures::future::{self, Either, LocalBoxFuture};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cancel::CancellationHandle;
use crate::error::RequestError;
use crate::presentation::Overrides;
use crate::scheduler::{MAX_SLEEP, Scheduler};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Error,
}

/// HTTP collaborator. Must reject on a non-success status and should reject
/// once `cancel` is tripped; the controller races the call against the
/// handle anyway, so a transport that stalls still ends in `Error`.
pub trait Transport {
    fn perform(&self, url: &str, cancel: &CancellationHandle) -> LocalBoxFuture<'static, Result<Value, RequestError>>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestConfig {
    pub url: String,
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: None,
        }
    }

    /// Timeout in seconds as callers pass it; anything not finite and
    /// positive means no timeout. Values past [`MAX_SLEEP`] are capped.
    pub fn with_timeout_secs(mut self, secs: Option<f64>) -> Self {
        self.timeout = secs
            .filter(|s| s.is_finite() && *s > 0.0)
            .map(|s| Duration::try_from_secs_f64(s).map_or(MAX_SLEEP, |t| t.min(MAX_SLEEP)))
            .filter(|t| !t.is_zero());
        self
    }
}

/// Phase plus the handle of the request in flight.
///
/// `handle` is `Some` exactly while the phase is `Loading`.
#[derive(Debug, Clone, Default)]
pub struct RequestState {
    phase: Phase,
    handle: Option<CancellationHandle>,
}

impl RequestState {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn handle(&self) -> Option<&CancellationHandle> {
        self.handle.as_ref()
    }

    fn is_current(&self, handle: &CancellationHandle) -> bool {
        self.handle.as_ref() == Some(handle)
    }

    /// Enter `Loading` under `handle`, returning the handle it replaces.
    fn begin(&mut self, handle: CancellationHandle) -> Option<CancellationHandle> {
        self.phase = Phase::Loading;
        self.handle.replace(handle)
    }

    /// Leave `Loading` if `handle` is still the current one. A tripped handle
    /// always settles as a failure.
    fn settle(&mut self, handle: &CancellationHandle, succeeded: bool) -> bool {
        if !self.is_current(handle) {
            return false;
        }
        self.phase = if succeeded && !handle.is_cancelled() {
            Phase::Idle
        } else {
            Phase::Error
        };
        self.handle = None;
        true
    }
}

/// What a click ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// A new request went out under this handle.
    Started(CancellationHandle),
    /// The request in flight was cancelled.
    Cancelled,
    /// The caller's handler ran instead of the built-in lifecycle.
    Delegated,
    /// The widget is disabled.
    Suppressed,
}

/// Owns the request state of one widget instance.
///
/// Cheap to clone; clones share state. Spawned tasks only hold a weak
/// reference, so dropping every clone abandons whatever is still in flight.
pub struct RequestLifecycle<E = ()> {
    inner: Rc<Inner<E>>,
}

struct Inner<E> {
    config: RequestConfig,
    transport: Box<dyn Transport>,
    scheduler: Box<dyn Scheduler>,
    state: RefCell<RequestState>,
    next_id: Cell<u64>,
    activate_override: RefCell<Option<Rc<dyn Fn(E)>>>,
    observer: RefCell<Option<Rc<dyn Fn(Phase)>>>,
}

impl<E> Clone for RequestLifecycle<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E> fmt::Debug for RequestLifecycle<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestLifecycle")
            .field("config", &self.inner.config)
            .field("state", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

impl<E: 'static> RequestLifecycle<E> {
    pub fn new(config: RequestConfig, transport: impl Transport + 'static, scheduler: impl Scheduler + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                config,
                transport: Box::new(transport),
                scheduler: Box::new(scheduler),
                state: RefCell::new(RequestState::default()),
                next_id: Cell::new(0),
                activate_override: RefCell::new(None),
                observer: RefCell::new(None),
            }),
        }
    }

    /// Replace the built-in lifecycle: activation only calls `handler`.
    pub fn with_activate_override(self, handler: impl Fn(E) + 'static) -> Self {
        *self.inner.activate_override.borrow_mut() = Some(Rc::new(handler));
        self
    }

    /// Called with the new phase after every transition.
    pub fn on_transition(&self, observer: impl Fn(Phase) + 'static) {
        *self.inner.observer.borrow_mut() = Some(Rc::new(observer));
    }

    pub fn phase(&self) -> Phase {
        self.inner.state.borrow().phase
    }

    pub fn state(&self) -> RequestState {
        self.inner.state.borrow().clone()
    }

    /// Handle a click.
    pub fn on_activate(&self, event: E, overrides: Overrides) -> Activation {
        if overrides.disabled {
            return Activation::Suppressed;
        }

        let handler = self.inner.activate_override.borrow().clone();
        if let Some(handler) = handler {
            handler(event);
            return Activation::Delegated;
        }

        if overrides.loading || self.phase() == Phase::Loading {
            self.cancel();
            Activation::Cancelled
        } else {
            Activation::Started(self.start())
        }
    }

    /// Send a new request, superseding any request still in flight.
    pub fn start(&self) -> CancellationHandle {
        let handle = self.mint_handle();
        let superseded = self.inner.state.borrow_mut().begin(handle.clone());
        if let Some(old) = superseded {
            old.cancel();
        }
        self.notify();

        let request = self.inner.transport.perform(&self.inner.config.url, &handle);
        let cancelled = handle.cancelled();
        let weak = Rc::downgrade(&self.inner);
        let tracked = handle.clone();
        self.inner.scheduler.spawn(Box::pin(async move {
            let outcome = match future::select(request, cancelled).await {
                Either::Left((result, _)) => result,
                Either::Right(((), _)) => Err(RequestError::Cancelled),
            };
            let Some(lifecycle) = Self::upgrade(&weak) else {
                return;
            };
            match outcome {
                Ok(_) => {
                    lifecycle.succeed(&tracked);
                }
                Err(_) => {
                    lifecycle.fail(&tracked);
                }
            }
        }));

        if let Some(timeout) = self.inner.config.timeout {
            let sleep = self.inner.scheduler.sleep(timeout);
            let weak = Rc::downgrade(&self.inner);
            let tracked = handle.clone();
            self.inner.scheduler.spawn(Box::pin(async move {
                sleep.await;
                if let Some(lifecycle) = Self::upgrade(&weak) {
                    lifecycle.expire(&tracked);
                }
            }));
        }

        handle
    }

    /// Trip the current handle. The in-flight request then rejects and
    /// moves the phase to `Error`.
    pub fn cancel(&self) {
        let current = self.inner.state.borrow().handle.clone();
        if let Some(handle) = current {
            handle.cancel();
        }
    }

    /// Settle the request under `handle` as resolved. Returns `false` and
    /// changes nothing when `handle` is no longer current.
    pub fn succeed(&self, handle: &CancellationHandle) -> bool {
        self.settle(handle, true)
    }

    /// Settle the request under `handle` as rejected. Returns `false` and
    /// changes nothing when `handle` is no longer current.
    pub fn fail(&self, handle: &CancellationHandle) -> bool {
        self.settle(handle, false)
    }

    /// Unmount: stop reporting transitions and cancel anything in flight.
    pub fn detach(&self) {
        self.inner.observer.borrow_mut().take();
        self.cancel();
    }

    fn settle(&self, handle: &CancellationHandle, succeeded: bool) -> bool {
        let applied = self.inner.state.borrow_mut().settle(handle, succeeded);
        if applied {
            self.notify();
        }
        applied
    }

    fn expire(&self, handle: &CancellationHandle) {
        let current = self.inner.state.borrow().is_current(handle);
        if current {
            handle.cancel();
        }
    }

    fn mint_handle(&self) -> CancellationHandle {
        let id = self.inner.next_id.get() + 1;
        self.inner.next_id.set(id);
        CancellationHandle::new(id)
    }

    fn notify(&self) {
        let observer = self.inner.observer.borrow().clone();
        if let Some(observer) = observer {
            observer(self.phase());
        }
    }

    fn upgrade(weak: &Weak<Inner<E>>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::derive;
    use std::collections::VecDeque;
    use tokio::task::LocalSet;

    const URL: &str = "http://launch.test/delay";

    struct TokioScheduler;

    impl Scheduler for TokioScheduler {
        fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
            tokio::task::spawn_local(task);
        }

        fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
            Box::pin(tokio::time::sleep(duration))
        }
    }

    #[derive(Debug, Clone, Copy)]
    enum Reply {
        Succeed(Duration),
        Fail(Duration),
        Stall,
    }

    /// Replies in order, then repeats the last one. Ignores cancellation on
    /// purpose so the controller's own race is what ends a cancelled call.
    #[derive(Clone, Default)]
    struct ScriptedTransport {
        replies: Rc<RefCell<VecDeque<Reply>>>,
        calls: Rc<RefCell<Vec<(String, CancellationHandle)>>>,
    }

    impl ScriptedTransport {
        fn new(replies: &[Reply]) -> Self {
            let transport = Self::default();
            transport.replies.borrow_mut().extend(replies.iter().copied());
            transport
        }

        fn calls(&self) -> Vec<(String, CancellationHandle)> {
            self.calls.borrow().clone()
        }
    }

    impl Transport for ScriptedTransport {
        fn perform(&self, url: &str, cancel: &CancellationHandle) -> LocalBoxFuture<'static, Result<Value, RequestError>> {
            self.calls.borrow_mut().push((url.to_string(), cancel.clone()));
            let reply = {
                let mut replies = self.replies.borrow_mut();
                let next = if replies.len() > 1 {
                    replies.pop_front()
                } else {
                    replies.front().copied()
                };
                next.unwrap_or(Reply::Stall)
            };

            Box::pin(async move {
                match reply {
                    Reply::Succeed(after) => {
                        tokio::time::sleep(after).await;
                        Ok(serde_json::json!({ "delayed_ms": after.as_millis() as u64 }))
                    }
                    Reply::Fail(after) => {
                        tokio::time::sleep(after).await;
                        Err(RequestError::Status {
                            status: 500,
                            status_text: "Server Error".into(),
                        })
                    }
                    Reply::Stall => future::pending().await,
                }
            })
        }
    }

    struct Harness {
        lifecycle: RequestLifecycle,
        transport: ScriptedTransport,
        transitions: Rc<RefCell<Vec<Phase>>>,
    }

    fn harness(replies: &[Reply], timeout_secs: Option<f64>) -> Harness {
        let transport = ScriptedTransport::new(replies);
        let config = RequestConfig::new(URL).with_timeout_secs(timeout_secs);
        let lifecycle = RequestLifecycle::new(config, transport.clone(), TokioScheduler);
        let transitions = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&transitions);
        lifecycle.on_transition(move |phase| log.borrow_mut().push(phase));
        Harness {
            lifecycle,
            transport,
            transitions,
        }
    }

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    async fn advance(s: f64) {
        tokio::time::sleep(secs(s)).await;
    }

    fn click(lifecycle: &RequestLifecycle) -> Activation {
        lifecycle.on_activate((), Overrides::default())
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn success_round_trip_returns_to_idle() {
        LocalSet::new()
            .run_until(async {
                let h = harness(&[Reply::Succeed(secs(1.0))], None);
                let before = derive(h.lifecycle.phase(), Overrides::default());

                assert!(matches!(click(&h.lifecycle), Activation::Started(_)));
                assert_eq!(h.lifecycle.phase(), Phase::Loading);
                assert_eq!(derive(h.lifecycle.phase(), Overrides::default()).text, "Launching");

                advance(1.5).await;
                assert_eq!(h.lifecycle.phase(), Phase::Idle);
                assert!(h.lifecycle.state().handle().is_none());
                assert_eq!(derive(h.lifecycle.phase(), Overrides::default()), before);
                assert_eq!(*h.transitions.borrow(), vec![Phase::Loading, Phase::Idle]);

                let calls = h.transport.calls();
                assert_eq!(calls.len(), 1);
                assert_eq!(calls[0].0, URL);
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn failed_request_ends_in_error() {
        LocalSet::new()
            .run_until(async {
                let h = harness(&[Reply::Fail(secs(0.5))], None);
                click(&h.lifecycle);

                advance(1.0).await;
                assert_eq!(h.lifecycle.phase(), Phase::Error);
                assert!(h.lifecycle.state().handle().is_none());
                assert_eq!(derive(Phase::Error, Overrides::default()).tooltip.text, "Ignition error");
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn immediate_cancel_ends_in_error_with_the_same_handle() {
        LocalSet::new()
            .run_until(async {
                let h = harness(&[Reply::Succeed(secs(5.0))], None);
                let handle = h.lifecycle.start();
                h.lifecycle.cancel();

                advance(0.01).await;
                assert_eq!(h.lifecycle.phase(), Phase::Error);

                let calls = h.transport.calls();
                assert_eq!(calls.len(), 1);
                assert_eq!(calls[0].1, handle);
                assert!(calls[0].1.is_cancelled());

                // The late reply from the cancelled call changes nothing.
                advance(10.0).await;
                assert_eq!(*h.transitions.borrow(), vec![Phase::Loading, Phase::Error]);
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn clicking_while_loading_cancels_and_next_click_restarts() {
        LocalSet::new()
            .run_until(async {
                let h = harness(&[Reply::Succeed(secs(5.0))], None);
                assert!(matches!(click(&h.lifecycle), Activation::Started(_)));
                advance(0.5).await;
                assert_eq!(click(&h.lifecycle), Activation::Cancelled);

                advance(0.01).await;
                assert_eq!(h.lifecycle.phase(), Phase::Error);

                assert!(matches!(click(&h.lifecycle), Activation::Started(_)));
                assert_eq!(h.lifecycle.phase(), Phase::Loading);
                assert_eq!(h.transport.calls().len(), 2);

                advance(6.0).await;
                assert_eq!(h.lifecycle.phase(), Phase::Idle);
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn timeout_shorter_than_response_cancels() {
        LocalSet::new()
            .run_until(async {
                let h = harness(&[Reply::Succeed(secs(2.0))], Some(1.0));
                let handle = h.lifecycle.start();

                advance(0.9).await;
                assert_eq!(h.lifecycle.phase(), Phase::Loading);

                advance(0.2).await;
                assert!(handle.is_cancelled());
                assert_eq!(h.lifecycle.phase(), Phase::Error);

                advance(2.0).await;
                assert_eq!(*h.transitions.borrow(), vec![Phase::Loading, Phase::Error]);
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn response_before_timeout_wins() {
        LocalSet::new()
            .run_until(async {
                let h = harness(&[Reply::Succeed(secs(1.0))], Some(2.0));
                let handle = h.lifecycle.start();

                advance(3.0).await;
                assert_eq!(h.lifecycle.phase(), Phase::Idle);
                assert!(!handle.is_cancelled());
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn stale_timer_leaves_newer_request_alone() {
        LocalSet::new()
            .run_until(async {
                let h = harness(&[Reply::Succeed(secs(0.5)), Reply::Succeed(secs(5.0))], Some(2.0));
                h.lifecycle.start();
                advance(1.0).await;
                assert_eq!(h.lifecycle.phase(), Phase::Idle);

                // Second request starts at t=1; the first timer fires at t=2.
                let second = h.lifecycle.start();
                advance(1.5).await;
                assert!(!second.is_cancelled());
                assert_eq!(h.lifecycle.phase(), Phase::Loading);

                // Its own timer fires at t=3.
                advance(1.0).await;
                assert!(second.is_cancelled());
                assert_eq!(h.lifecycle.phase(), Phase::Error);
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn superseded_handle_cannot_settle() {
        LocalSet::new()
            .run_until(async {
                let h = harness(&[Reply::Succeed(secs(1.0)), Reply::Stall], None);
                let first = h.lifecycle.start();
                let second = h.lifecycle.start();
                assert!(first.is_cancelled());
                assert_ne!(first, second);

                advance(2.0).await;
                assert_eq!(h.lifecycle.phase(), Phase::Loading);
                assert!(!h.lifecycle.succeed(&first));
                assert!(!h.lifecycle.fail(&first));
                assert_eq!(h.lifecycle.phase(), Phase::Loading);
                assert_eq!(h.lifecycle.state().handle(), Some(&second));

                assert!(h.lifecycle.succeed(&second));
                assert_eq!(h.lifecycle.phase(), Phase::Idle);
                assert_eq!(
                    *h.transitions.borrow(),
                    vec![Phase::Loading, Phase::Loading, Phase::Idle]
                );
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn disabled_suppresses_every_click() {
        LocalSet::new()
            .run_until(async {
                let h = harness(&[Reply::Succeed(secs(1.0))], None);
                let invoked = Rc::new(Cell::new(0));
                let counter = Rc::clone(&invoked);
                let lifecycle = h.lifecycle.with_activate_override(move |()| counter.set(counter.get() + 1));
                let disabled = Overrides {
                    disabled: true,
                    ..Overrides::default()
                };

                for _ in 0..3 {
                    assert_eq!(lifecycle.on_activate((), disabled), Activation::Suppressed);
                }
                advance(2.0).await;

                assert_eq!(lifecycle.phase(), Phase::Idle);
                assert_eq!(invoked.get(), 0);
                assert!(h.transport.calls().is_empty());
                assert!(h.transitions.borrow().is_empty());
                assert!(derive(lifecycle.phase(), disabled).disabled);
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn override_replaces_builtin_lifecycle() {
        LocalSet::new()
            .run_until(async {
                let transport = ScriptedTransport::new(&[Reply::Succeed(secs(1.0))]);
                let seen = Rc::new(RefCell::new(Vec::new()));
                let sink = Rc::clone(&seen);
                let lifecycle: RequestLifecycle<&'static str> =
                    RequestLifecycle::new(RequestConfig::new(URL), transport.clone(), TokioScheduler)
                        .with_activate_override(move |event| sink.borrow_mut().push(event));

                assert_eq!(lifecycle.on_activate("click", Overrides::default()), Activation::Delegated);
                advance(2.0).await;

                assert_eq!(*seen.borrow(), vec!["click"]);
                assert!(transport.calls().is_empty());
                assert_eq!(lifecycle.phase(), Phase::Idle);
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn forced_loading_click_only_cancels() {
        LocalSet::new()
            .run_until(async {
                let h = harness(&[Reply::Succeed(secs(1.0))], None);
                let forced = Overrides {
                    loading: true,
                    ..Overrides::default()
                };
                assert_eq!(h.lifecycle.on_activate((), forced), Activation::Cancelled);
                advance(1.0).await;
                assert_eq!(h.lifecycle.phase(), Phase::Idle);
                assert!(h.transport.calls().is_empty());
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn detach_cancels_and_goes_quiet() {
        LocalSet::new()
            .run_until(async {
                let h = harness(&[Reply::Succeed(secs(1.0))], None);
                let handle = h.lifecycle.start();
                h.lifecycle.detach();
                assert!(handle.is_cancelled());

                advance(2.0).await;
                assert_eq!(*h.transitions.borrow(), vec![Phase::Loading]);
                assert_eq!(h.lifecycle.phase(), Phase::Error);
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn dropped_controller_abandons_request() {
        LocalSet::new()
            .run_until(async {
                let h = harness(&[Reply::Succeed(secs(1.0))], Some(0.5));
                h.lifecycle.start();
                let transitions = Rc::clone(&h.transitions);
                drop(h);

                advance(2.0).await;
                assert_eq!(*transitions.borrow(), vec![Phase::Loading]);
            })
            .await;
    }

    #[test]
    fn handles_are_unique_per_controller() {
        let a: RequestLifecycle = RequestLifecycle::new(RequestConfig::new(URL), ScriptedTransport::default(), TokioScheduler);
        let b: RequestLifecycle = RequestLifecycle::new(RequestConfig::new(URL), ScriptedTransport::default(), TokioScheduler);
        assert_eq!(a.mint_handle().id(), 1);
        assert_eq!(a.mint_handle().id(), 2);
        assert_eq!(b.mint_handle().id(), 1);
    }

    #[test]
    fn timeout_secs_keeps_only_positive_finite_values() {
        let cfg = |s| RequestConfig::new(URL).with_timeout_secs(s).timeout;
        assert_eq!(cfg(None), None);
        assert_eq!(cfg(Some(0.0)), None);
        assert_eq!(cfg(Some(-1.0)), None);
        assert_eq!(cfg(Some(f64::NAN)), None);
        assert_eq!(cfg(Some(f64::INFINITY)), None);
        assert_eq!(cfg(Some(1.5)), Some(Duration::from_millis(1500)));
        assert_eq!(cfg(Some(5_000_000.0)), Some(MAX_SLEEP));
        assert_eq!(cfg(Some(1e300)), Some(MAX_SLEEP));
    }

    /// Runs on tokio but remembers every sleep it was asked for.
    #[derive(Clone, Default)]
    struct RecordingScheduler {
        sleeps: Rc<RefCell<Vec<Duration>>>,
    }

    impl Scheduler for RecordingScheduler {
        fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
            TokioScheduler.spawn(task);
        }

        fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
            self.sleeps.borrow_mut().push(duration);
            TokioScheduler.sleep(duration)
        }
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn huge_timeout_is_capped_to_a_browser_timer() {
        LocalSet::new()
            .run_until(async {
                let scheduler = RecordingScheduler::default();
                let config = RequestConfig::new(URL).with_timeout_secs(Some(5_000_000.0));
                let lifecycle: RequestLifecycle =
                    RequestLifecycle::new(config, ScriptedTransport::new(&[Reply::Stall]), scheduler.clone());
                let handle = lifecycle.start();

                let sleeps = scheduler.sleeps.borrow().clone();
                assert_eq!(sleeps, vec![MAX_SLEEP]);
                assert!(sleeps[0].as_millis() <= i32::MAX as u128);

                advance(60.0).await;
                assert!(!handle.is_cancelled());
                assert_eq!(lifecycle.phase(), Phase::Loading);
            })
            .await;
    }

    #[test]
    fn state_settles_only_for_current_handle() {
        let mut state = RequestState::default();
        let old = CancellationHandle::new(1);
        let new = CancellationHandle::new(2);
        state.begin(old.clone());
        assert_eq!(state.begin(new.clone()), Some(old.clone()));

        assert!(!state.settle(&old, true));
        assert_eq!(state.phase(), Phase::Loading);

        new.cancel();
        assert!(state.settle(&new, true));
        assert_eq!(state.phase(), Phase::Error);
        assert!(state.handle().is_none());
    }
}
