use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::config::CONFIG;
use crate::pages::HomePage;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=CONFIG.name />
        <ErrorBoundary fallback=|_errors| view! { <p>"Something went wrong rendering the launch button."</p> }>
            <Router>
                <Routes fallback=|| view! { <p>"404 - Page not found"</p> }>
                    <Route path=path!("/") view=HomePage />
                </Routes>
            </Router>
        </ErrorBoundary>
    }
}
