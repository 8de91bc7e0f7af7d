//! `GET /api/delay?ms=<u64>&status=<u16>`: answers after the requested delay,
//! optionally with a forced error status. Default target of the launch button.

#[cfg(feature = "ssr")]
mod ssr {
    use axum::Json;
    use axum::extract::{Extension, Query};
    use axum::response::{IntoResponse, Response};
    use http::StatusCode;
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    use crate::config::DelaySettings;

    #[derive(Debug, Default, Deserialize)]
    pub struct DelayQuery {
        pub ms: Option<u64>,
        pub status: Option<u16>,
    }

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct DelayReply {
        pub delayed_ms: u64,
    }

    /// Delay to wait and status to answer with. Unknown status codes answer 200.
    pub fn plan(query: &DelayQuery, settings: &DelaySettings) -> (u64, StatusCode) {
        let delay_ms = query.ms.unwrap_or(settings.default_ms).min(settings.max_ms);
        let status = query
            .status
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::OK);
        (delay_ms, status)
    }

    pub async fn serve_delay(Extension(settings): Extension<DelaySettings>, Query(query): Query<DelayQuery>) -> Response {
        let (delay_ms, status) = plan(&query, &settings);
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;

        if status.is_success() {
            return (status, Json(DelayReply { delayed_ms: delay_ms })).into_response();
        }

        eprintln!("[delay] Answering {} after {}ms", status, delay_ms);
        let reason = status.canonical_reason().unwrap_or("error");
        (status, Json(serde_json::json!({ "error": reason }))).into_response()
    }

}

#[cfg(feature = "ssr")]
pub use ssr::*;
