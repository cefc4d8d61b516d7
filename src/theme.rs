use crate::env::PreferenceStore;

pub const THEME_KEY: &str = "theme";
pub const DARK_CLASS: &str = "dark-mode";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

fn stored_theme(store: &dyn PreferenceStore) -> Option<Theme> {
    Theme::from_str(&store.get(THEME_KEY)?)
}

/// The last explicit user choice wins; with no stored choice the system
/// color-scheme signal decides.
pub fn resolve(store: &dyn PreferenceStore, system_prefers_dark: bool) -> Theme {
    stored_theme(store).unwrap_or(if system_prefers_dark {
        Theme::Dark
    } else {
        Theme::Light
    })
}

/// Flips the mode and persists it before returning the new value.
pub fn toggle(store: &dyn PreferenceStore, current: Theme) -> Theme {
    let next = current.toggled();
    store.set(THEME_KEY, next.as_str());
    next
}
