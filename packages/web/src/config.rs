//! Client configuration for the rendered app.
//!
//! The server reads an optional `notes-client.toml` from the working directory
//! once at startup. The app fetches it through [`client_config`] during server
//! rendering; the value is serialized into the page so the browser hydrates with
//! the same settings instead of the compiled-in defaults.

use dioxus::prelude::*;
use store::ClientConfig;

#[cfg(feature = "server")]
static CONFIG: std::sync::OnceLock<ClientConfig> = std::sync::OnceLock::new();

/// Read `notes-client.toml` if present. A missing or malformed file falls back to
/// defaults with a warning.
#[cfg(feature = "server")]
pub fn load() -> &'static ClientConfig {
    CONFIG.get_or_init(|| {
        let path = std::path::Path::new(ClientConfig::filename());
        let Ok(text) = std::fs::read_to_string(path) else {
            return ClientConfig::default();
        };
        parse_or_default(&text, &path.display().to_string())
    })
}

fn parse_or_default(text: &str, origin: &str) -> ClientConfig {
    match ClientConfig::from_toml(text) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("ignoring malformed {}: {}", origin, e);
            ClientConfig::default()
        }
    }
}

/// The settings the server was started with.
#[cfg(feature = "server")]
#[get("/api/client-config")]
pub async fn client_config() -> Result<ClientConfig, ServerFnError> {
    Ok(load().clone())
}

#[cfg(not(feature = "server"))]
#[get("/api/client-config")]
pub async fn client_config() -> Result<ClientConfig, ServerFnError> {
    Ok(ClientConfig::default())
}
