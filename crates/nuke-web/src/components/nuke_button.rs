use leptos::ev::MouseEvent;
use leptos::prelude::*;

use crate::api::FetchTransport;
use crate::components::{Loading, Tooltip};
use crate::config::CONFIG;
use crate::lifecycle::{Phase, RequestConfig, RequestLifecycle};
use crate::presentation::{LOADING_COLOR, LoadingPosition, Overrides, derive};
use crate::scheduler::PlatformScheduler;

/// "Launch Rocket" button. A click sends a request to `api_url`; clicking
/// again while it is in flight cancels it, as does `timeout`.
#[component]
pub fn NukeButton(
    /// Endpoint requested on click (defaults to the site API URL)
    #[prop(into, optional)]
    api_url: Option<String>,
    /// Force the error presentation
    #[prop(into, optional)]
    error: MaybeProp<bool>,
    /// Force the loading presentation
    #[prop(into, optional)]
    loading: MaybeProp<bool>,
    /// Disable the button; wins over every other state
    #[prop(into, optional)]
    disabled: MaybeProp<bool>,
    /// Spinner before or after the label
    #[prop(optional)]
    loading_position: LoadingPosition,
    /// Seconds before an unanswered request is cancelled
    #[prop(optional)]
    timeout: Option<f64>,
    /// Replaces the built-in request handling entirely
    #[prop(optional, into)]
    on_click: Option<Callback<MouseEvent>>,
) -> impl IntoView {
    let phase = RwSignal::new(Phase::Idle);

    let config = RequestConfig::new(api_url.unwrap_or_else(|| CONFIG.api_url.to_string())).with_timeout_secs(timeout);
    let mut lifecycle: RequestLifecycle<MouseEvent> = RequestLifecycle::new(config, FetchTransport, PlatformScheduler);
    if let Some(handler) = on_click {
        lifecycle = lifecycle.with_activate_override(move |ev| handler.run(ev));
    }
    lifecycle.on_transition(move |next| phase.set(next));

    let lifecycle = StoredValue::new_local(lifecycle);
    on_cleanup(move || {
        lifecycle.try_with_value(|l| l.detach());
    });

    let overrides = move || Overrides {
        error: error.get().unwrap_or(false),
        loading: loading.get().unwrap_or(false),
        disabled: disabled.get().unwrap_or(false),
    };
    let shown = Memo::new(move |_| derive(phase.get(), overrides()));

    let on_activate = move |ev: MouseEvent| {
        let current = overrides();
        lifecycle.with_value(|l| {
            l.on_activate(ev, current);
        });
    };

    let spinner_at = move |at: LoadingPosition| {
        move || (shown.get().loading && loading_position == at).then(|| view! { <Loading color=LOADING_COLOR /> })
    };

    view! {
        <Tooltip content=Signal::derive(move || shown.get().tooltip)>
            <button
                type="button"
                aria-label=move || shown.get().text
                disabled=move || shown.get().disabled
                style=move || shown.get().style.css()
                on:click=on_activate
            >
                {spinner_at(LoadingPosition::Start)}
                {move || shown.get().text}
                {spinner_at(LoadingPosition::End)}
            </button>
        </Tooltip>
    }
}
