//! Cancellation handle shared between the lifecycle controller and the
//! in-flight request.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::{self, FutureExt, LocalBoxFuture, Shared};

/// Token correlating one started request with its abort capability.
///
/// Clones share the same signal. Two handles are equal when they were minted
/// for the same request, which is what the stale-callback guard compares.
#[derive(Clone)]
pub struct CancellationHandle {
    id: u64,
    inner: Rc<Inner>,
}

struct Inner {
    trigger: RefCell<Option<oneshot::Sender<()>>>,
    signal: Shared<oneshot::Receiver<()>>,
    cancelled: Cell<bool>,
}

impl CancellationHandle {
    pub(crate) fn new(id: u64) -> Self {
        let (tx, rx) = oneshot::channel();
        Self {
            id,
            inner: Rc::new(Inner {
                trigger: RefCell::new(Some(tx)),
                signal: rx.shared(),
                cancelled: Cell::new(false),
            }),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Trip the handle. Idempotent.
    pub fn cancel(&self) {
        if self.inner.cancelled.replace(true) {
            return;
        }
        if let Some(tx) = self.inner.trigger.borrow_mut().take() {
            let _ = tx.send(());
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.get()
    }

    /// Resolves once [`cancel`](Self::cancel) has been called on any clone.
    pub fn cancelled(&self) -> LocalBoxFuture<'static, ()> {
        let signal = self.inner.signal.clone();
        async move {
            // The sender only disappears with the last handle, after which
            // nobody can cancel any more.
            if signal.await.is_err() {
                future::pending::<()>().await;
            }
        }
        .boxed_local()
    }
}

impl PartialEq for CancellationHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CancellationHandle {}

impl fmt::Debug for CancellationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancellationHandle")
            .field("id", &self.id)
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
