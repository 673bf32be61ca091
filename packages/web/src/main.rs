use dioxus::prelude::*;
use store::ClientConfig;

use ui::views::{AdminNoteView, DashboardView, UserNotesView, UsersView};
use ui::{use_auth, use_theme_provider, AuthProvider, Capability, Navbar, RouteGuard};
use views::{Login, Register};

mod config;
mod routing;
mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Root {},
        #[route("/login")]
        Login {},
        #[route("/register")]
        Register {},
        #[layout(Authenticated)]
            #[route("/dashboard")]
            Dashboard {},
        #[end_layout]
        #[nest("/admin/users")]
            #[layout(AdminOnly)]
                #[route("/")]
                Users {},
                #[route("/:user_id/notes")]
                UserNotes { user_id: String },
                #[route("/:user_id/notes/:note_id")]
                AdminNote { user_id: String, note_id: String },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(launch_server());
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() {
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use tower::ServiceBuilder;
    use tracing_subscriber::EnvFilter;

    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let client_config = config::load();
    tracing::info!(api = %client_config.api.base_url, "notes client starting");

    let router = axum::Router::new()
        .serve_dioxus_application(ServeConfig::new(), App)
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(routing::route_middleware)));

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service())
        .await
        .unwrap();
}

#[component]
fn App() -> Element {
    let loaded = use_server_future(config::client_config)?;
    let client_config = match &*loaded.read() {
        Some(Ok(config)) => config.clone(),
        Some(Err(e)) => {
            tracing::warn!("using default client config: {}", e);
            ClientConfig::default()
        }
        None => ClientConfig::default(),
    };

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            config: client_config,
            Router::<Route> {}
        }
    }
}

/// Navbar and theme around every page.
#[component]
fn Shell() -> Element {
    use_theme_provider();
    rsx! {
        Navbar {}
        main { class: "container", Outlet::<Route> {} }
    }
}

#[component]
fn Authenticated() -> Element {
    rsx! {
        RouteGuard { capability: Capability::Authenticated, Outlet::<Route> {} }
    }
}

#[component]
fn AdminOnly() -> Element {
    rsx! {
        RouteGuard { capability: Capability::Admin, Outlet::<Route> {} }
    }
}

/// Send `/` to the dashboard or the login page once the session is known.
#[component]
fn Root() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    use_effect(move || {
        let state = auth.state.read();
        if state.is_loading {
            return;
        }
        if state.is_authenticated {
            nav.replace(Route::Dashboard {});
        } else {
            nav.replace(Route::Login {});
        }
    });

    rsx! {
        div { class: "loading-block", span { class: "spinner" } }
    }
}

#[component]
fn Dashboard() -> Element {
    rsx! { DashboardView {} }
}

#[component]
fn Users() -> Element {
    rsx! { UsersView {} }
}

#[component]
fn UserNotes(user_id: String) -> Element {
    rsx! { UserNotesView { user_id } }
}

#[component]
fn AdminNote(user_id: String, note_id: String) -> Element {
    rsx! { AdminNoteView { user_id, note_id } }
}
