use leptos::prelude::*;

/// One labelled button configuration on the demo page, with an anchor link
#[component]
pub fn DemoCase(
    #[prop(into)] id: String,
    #[prop(into)] title: String,
    #[prop(into)] caption: String,
    children: Children,
) -> impl IntoView {
    let anchor_href = format!("#{}", id);

    view! {
        <section id=id class="demo-case">
            <h2>
                {title}
                <a href=anchor_href class="demo-anchor">" \u{00A7}"</a>
            </h2>
            <p class="demo-caption">{caption}</p>
            <div class="demo-stage">{children()}</div>
        </section>
    }
}
