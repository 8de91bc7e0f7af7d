mod delay;
mod http;

use futures::future::{FutureExt, LocalBoxFuture};
use serde_json::Value;

use crate::cancel::CancellationHandle;
use crate::error::RequestError;
use crate::lifecycle::Transport;

pub use self::http::get_json_cancellable;

// Delay endpoint only on server
#[cfg(feature = "ssr")]
pub use self::delay::{DelayQuery, DelayReply, serve_delay};

/// Transport backed by the platform's HTTP client.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    fn perform(&self, url: &str, cancel: &CancellationHandle) -> LocalBoxFuture<'static, Result<Value, RequestError>> {
        get_json_cancellable(url.to_string(), cancel.clone()).boxed_local()
    }
}
