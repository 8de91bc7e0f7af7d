use leptos::prelude::*;

use crate::presentation::TooltipSpec;

/// CSS `display` of the bubble: shown while hovered, or always when pinned.
fn bubble_display(always_visible: bool, hovered: bool) -> &'static str {
    if always_visible || hovered { "block" } else { "none" }
}

/// Wraps its children with a tooltip bubble below them.
///
/// Hover state is local to the tooltip; `always_visible` pins it open.
#[component]
pub fn Tooltip(#[prop(into)] content: Signal<TooltipSpec>, children: Children) -> impl IntoView {
    let hovered = RwSignal::new(false);

    let bubble = move || {
        let tip = content.get();
        (!tip.hidden).then(|| {
            let style = format!(
                "display:{};background-color:{};color:{};--tooltip-bg:{}",
                bubble_display(tip.always_visible, hovered.get()),
                tip.background,
                tip.text_color,
                tip.background,
            );
            view! {
                <span class="tooltip-item" role="tooltip" style=style>
                    {tip.text}
                </span>
            }
        })
    };

    view! {
        <div
            class="tooltip-container"
            data-testid="TooltipContainer"
            on:mouseenter=move |_| hovered.set(true)
            on:mouseleave=move |_| hovered.set(false)
        >
            {children()}
            {bubble}
        </div>
    }
}
