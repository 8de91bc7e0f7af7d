//! Cancellable JSON GET for the launch request
//! Uses reqwest on server, gloo-net (with a fetch AbortController) on client

use serde_json::Value;

use crate::cancel::CancellationHandle;
use crate::error::RequestError;

/// Log line for a failed request; cancellations are not failures.
fn failure_line(url: &str, error: &RequestError) -> Option<String> {
    match error {
        RequestError::Cancelled => None,
        RequestError::Status { status, .. } => Some(format!("HTTP error for {}: {}", url, status)),
        RequestError::Network(e) => Some(format!("HTTP request failed for {}: {}", url, e)),
        RequestError::Decode(e) => Some(format!("JSON parse error for {}: {}", url, e)),
    }
}

/// Report `error` on the platform's error log and hand it back.
fn report(url: &str, error: RequestError) -> RequestError {
    if let Some(line) = failure_line(url, &error) {
        #[cfg(feature = "hydrate")]
        web_sys::console::error_1(&line.into());
        #[cfg(not(feature = "hydrate"))]
        eprintln!("{}", line);
    }
    error
}

#[cfg(all(feature = "ssr", not(feature = "hydrate")))]
mod ssr {
    use super::*;
    use futures::future::{self, Either};
    use std::time::Duration;

    /// Shared HTTP client for connection pooling
    static HTTP_CLIENT: std::sync::OnceLock<reqwest::Client> = std::sync::OnceLock::new();

    const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    fn get_client() -> &'static reqwest::Client {
        HTTP_CLIENT.get_or_init(|| {
            reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .pool_max_idle_per_host(5)
                .build()
                .unwrap_or_default()
        })
    }

    async fn fetch_json(url: &str) -> Result<Value, RequestError> {
        let response = get_client()
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| report(url, RequestError::Network(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(report(
                url,
                RequestError::Status {
                    status: status.as_u16(),
                    status_text: status.canonical_reason().unwrap_or_default().to_string(),
                },
            ));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| report(url, RequestError::Decode(e.to_string())))
    }

    pub async fn get_json_cancellable(url: String, cancel: CancellationHandle) -> Result<Value, RequestError> {
        let request = Box::pin(fetch_json(&url));
        match future::select(request, cancel.cancelled()).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(RequestError::Cancelled),
        }
    }
}

#[cfg(all(feature = "ssr", not(feature = "hydrate")))]
pub use ssr::*;

#[cfg(feature = "hydrate")]
pub async fn get_json_cancellable(url: String, cancel: CancellationHandle) -> Result<Value, RequestError> {
    use futures::future::{self, Either};

    let controller = web_sys::AbortController::new()
        .map_err(|_| RequestError::Network("AbortController is not available".to_string()))?;
    let signal = controller.signal();

    let request = Box::pin(async {
        let response = gloo_net::http::Request::get(&url)
            .header("Accept", "application/json")
            .abort_signal(Some(&signal))
            .send()
            .await
            .map_err(|e| report(&url, RequestError::Network(e.to_string())))?;

        if !response.ok() {
            return Err(report(
                &url,
                RequestError::Status {
                    status: response.status(),
                    status_text: response.status_text(),
                },
            ));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| report(&url, RequestError::Decode(e.to_string())))
    });

    match future::select(request, cancel.cancelled()).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => {
            controller.abort();
            Err(RequestError::Cancelled)
        }
    }
}

// Fallback for when neither feature is enabled (cargo check)
#[cfg(not(any(feature = "ssr", feature = "hydrate")))]
pub async fn get_json_cancellable(url: String, cancel: CancellationHandle) -> Result<Value, RequestError> {
    if cancel.is_cancelled() {
        return Err(RequestError::Cancelled);
    }
    Err(report(&url, RequestError::Network("no HTTP backend compiled in".to_string())))
}
