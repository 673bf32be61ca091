//! Theme context: the saved (or OS-preferred) theme, applied to `<html data-theme>`.

use dioxus::prelude::*;
use store::theme::{load_theme, save_theme};
use store::Theme;

use crate::services::preference_storage;
use crate::Icon;
use crate::icons::{FaMoon, FaSun};

pub type ThemeSignal = Signal<Theme>;

/// Provide the theme signal. Call once near the root.
pub fn use_theme_provider() -> ThemeSignal {
    let theme = use_context_provider(|| {
        let storage = preference_storage();
        Signal::new(load_theme(&*storage, prefers_dark()))
    });
    use_effect(move || apply_theme(theme()));
    theme
}

pub fn use_theme() -> ThemeSignal {
    use_context::<ThemeSignal>()
}

/// Set the `data-theme` attribute on the document element.
pub fn apply_theme(theme: Theme) {
    #[cfg(target_arch = "wasm32")]
    {
        let root = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element());
        if let Some(root) = root {
            if let Err(e) = root.set_attribute("data-theme", theme.as_str()) {
                tracing::warn!("Failed to apply theme: {:?}", e);
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = theme;
}

fn prefers_dark() -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .is_some_and(|mq| mq.matches())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        false
    }
}

#[component]
pub fn ThemeSelector() -> Element {
    let mut theme = use_theme();

    rsx! {
        div {
            class: "theme-selector",
            for option in Theme::ALL {
                button {
                    key: "{option}",
                    class: if theme() == option { "theme-option active" } else { "theme-option" },
                    title: "{option.label()} theme",
                    onclick: move |_| {
                        save_theme(&*preference_storage(), option);
                        theme.set(option);
                    },
                    match option {
                        Theme::Light => rsx! { Icon { icon: FaSun, width: 14, height: 14 } },
                        Theme::Dark => rsx! { Icon { icon: FaMoon, width: 14, height: 14 } },
                    }
                    span { "{option.label()}" }
                }
            }
        }
    }
}
