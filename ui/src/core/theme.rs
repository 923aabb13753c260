//! Light/dark colour scheme. The choice survives reloads through
//! `localStorage` on wasm and falls back to light everywhere else.

#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Only the two stored spellings are accepted.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// CSS class applied to the app shell.
    pub fn class(self) -> &'static str {
        match self {
            Theme::Light => "theme-light",
            Theme::Dark => "theme-dark",
        }
    }

    pub fn restore() -> Self {
        load_persisted().and_then(|raw| Self::parse(&raw)).unwrap_or_default()
    }

    pub fn persist(self) {
        tracing::debug!(theme = self.as_str(), "theme saved");
        save_persisted(self.as_str());
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(target_arch = "wasm32")]
fn load_persisted() -> Option<String> {
    local_storage()?.get_item(STORAGE_KEY).ok().flatten()
}

#[cfg(not(target_arch = "wasm32"))]
fn load_persisted() -> Option<String> {
    None
}

#[cfg(target_arch = "wasm32")]
fn save_persisted(value: &str) {
    let Some(storage) = local_storage() else {
        return;
    };
    if storage.set_item(STORAGE_KEY, value).is_err() {
        tracing::warn!("could not write theme to local storage");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn save_persisted(_value: &str) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_between_the_two_schemes() {
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().class(), "theme-light");
    }

    #[test]
    fn unknown_stored_values_are_ignored() {
        assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse(Theme::Light.as_str()), Some(Theme::Light));
        assert_eq!(Theme::parse("Dark"), None);
        assert_eq!(Theme::parse(""), None);
    }

    #[test]
    fn restore_without_storage_is_light() {
        assert_eq!(Theme::restore(), Theme::Light);
    }
}
