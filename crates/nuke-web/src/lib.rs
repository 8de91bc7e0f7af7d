//! Launch button widget: a Leptos component whose click drives a single
//! cancellable HTTP request with an optional client-side timeout.

pub mod api;
pub mod app;
pub mod cancel;
pub mod components;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod pages;
pub mod presentation;
pub mod scheduler;

pub use cancel::CancellationHandle;
pub use error::RequestError;
pub use lifecycle::{Activation, Phase, RequestConfig, RequestLifecycle, RequestState, Transport};
pub use presentation::{LoadingPosition, Overrides, Presentation, derive};
pub use scheduler::Scheduler;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(app::App);
}
