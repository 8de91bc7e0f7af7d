use leptos::ev::MouseEvent;
use leptos::prelude::*;

use crate::components::{DemoCase, NukeButton};
use crate::config::CONFIG;
use crate::presentation::LoadingPosition;

#[component]
pub fn HomePage() -> impl IntoView {
    let clicks = RwSignal::new(0u32);
    let count_click = Callback::new(move |_: MouseEvent| clicks.update(|n| *n += 1));

    let separator = if CONFIG.api_url.contains('?') { '&' } else { '?' };
    let failing_url = format!("{}{}status=500", CONFIG.api_url, separator);

    view! {
        <main class="demo-page">
            <header>
                <h1>{CONFIG.name}</h1>
                <div class="demo-caption">{CONFIG.tagline}</div>
            </header>

            <DemoCase id="default" title="Default" caption="Click to launch, click again to cancel.">
                <NukeButton />
            </DemoCase>

            <DemoCase id="timeout" title="Timeout" caption="Gives up after one second.">
                <NukeButton timeout=1.0 />
            </DemoCase>

            <DemoCase id="failing" title="Failing endpoint" caption="The server answers 500.">
                <NukeButton api_url=failing_url />
            </DemoCase>

            <DemoCase id="start" title="Spinner first" caption="Forced loading, spinner before the label.">
                <NukeButton loading=true loading_position=LoadingPosition::Start />
            </DemoCase>

            <DemoCase id="error" title="Forced error" caption="Error state set by the caller.">
                <NukeButton error=true />
            </DemoCase>

            <DemoCase id="disabled" title="Disabled" caption="No tooltip, no request.">
                <NukeButton disabled=true />
            </DemoCase>

            <DemoCase id="custom" title="Custom handler" caption="The caller takes over the click.">
                <NukeButton on_click=count_click />
                <div class="demo-caption">"Clicked " {move || clicks.get()} " times"</div>
            </DemoCase>
        </main>
    }
}
