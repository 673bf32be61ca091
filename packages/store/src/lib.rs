//! Client-side persistence: storage surfaces, the dual-surface token store,
//! theme preference, flash messages, and the client configuration file.

pub mod clock;
pub mod config;
pub mod cookie;
pub mod error;
pub mod flash;
pub mod surface;
pub mod theme;
pub mod tokens;

mod memory;
pub use memory::{MemoryCookies, MemoryStorage};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod browser;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use browser::{BrowserStorage, DocumentCookies, StorageScope};

pub use config::{ClientConfig, GuardConfig, SessionConfig};
pub use cookie::{parse_cookie, CookieSpec, TOKEN_COOKIE};
pub use error::StorageError;
pub use surface::{CookieJar, KeyValueStore};
pub use theme::Theme;
pub use tokens::TokenStore;
