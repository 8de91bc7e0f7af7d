use leptos::prelude::*;

/// Spinning ring shown while a launch is in flight. The rotation lives in
/// `style/main.css` under `.loading-ring`.
#[component]
pub fn Loading(
    /// Colour of the visible arc
    #[prop(into, optional)]
    color: Option<String>,
) -> impl IntoView {
    let arc = format!(
        "border-color:{} transparent transparent transparent",
        color.unwrap_or_else(|| "#fff".to_string())
    );

    view! {
        <div class="loading-ring" data-testid="LoadingContainer">
            <div style=arc.clone() />
            <div style=arc.clone() />
            <div style=arc.clone() />
            <div style=arc />
        </div>
    }
}
