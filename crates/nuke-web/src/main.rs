#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use axum::routing::get;
    use axum::{Extension, Router};
    use leptos::prelude::*;
    use leptos_axum::{LeptosRoutes, generate_route_list};
    use nuke_web::config::ServerConfig;
    use tower::ServiceBuilder;
    use tower_http::compression::CompressionLayer;
    use tower_http::services::ServeDir;

    let conf = get_configuration(None).map_err(|e| {
        eprintln!("Failed to load Leptos configuration: {}", e);
        e
    })?;
    let server_config = ServerConfig::discover().map_err(|e| {
        eprintln!("Failed to load server configuration: {:#}", e);
        e
    })?;
    println!(
        "[server] /api/delay default {}ms, max {}ms",
        server_config.delay.default_ms, server_config.delay.max_ms
    );

    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let routes = generate_route_list(nuke_web::app::App);

    let site_root = leptos_options.site_root.clone();
    let app = Router::new()
        .route("/api/delay", get(nuke_web::api::serve_delay))
        .leptos_routes(&leptos_options, routes, {
            let leptos_options = leptos_options.clone();
            move || {
                use nuke_web::app::App;
                view! {
                    <!DOCTYPE html>
                    <html lang="en">
                        <head>
                            <meta charset="utf-8" />
                            <meta name="viewport" content="width=device-width, initial-scale=1" />
                            <meta name="description" content="Launch button with a cancellable request lifecycle." />
                            <AutoReload options=leptos_options.clone() />
                            <HydrationScripts options=leptos_options.clone() />
                            <link rel="stylesheet" href="/pkg/nuke-web.css" />
                            <leptos_meta::MetaTags />
                        </head>
                        <body>
                            <App />
                        </body>
                    </html>
                }
            }
        })
        .fallback_service(ServeDir::new(&*site_root))
        .layer(
            ServiceBuilder::new()
                .layer(Extension(server_config.delay))
                .layer(CompressionLayer::new()),
        )
        .with_state(leptos_options);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        eprintln!("Failed to bind to {}: {}", addr, e);
        e
    })?;

    println!("[server] Listening on http://{}", addr);

    axum::serve(listener, app).await.map_err(|e| {
        eprintln!("Server error: {}", e);
        e
    })?;

    Ok(())
}

#[cfg(not(feature = "ssr"))]
fn main() {
    // Client entry point is `hydrate()` in lib.rs
}
