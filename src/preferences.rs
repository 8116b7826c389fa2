use crate::i18n::Language;

pub const THEME_KEY: &str = "portfolio-theme";
pub const LANG_KEY: &str = "portfolio-lang";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
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

    pub fn pressed(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "☀️",
            Self::Dark => "🌙",
        }
    }
}

pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preferences {
    pub language: Language,
    pub theme: Theme,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: Language::En,
            theme: Theme::Dark,
        }
    }
}

impl Preferences {
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let defaults = Self::default();
        let language = store
            .get(LANG_KEY)
            .and_then(|value| Language::from_str(&value))
            .unwrap_or(defaults.language);
        let theme = store
            .get(THEME_KEY)
            .and_then(|value| Theme::from_str(&value))
            .unwrap_or(defaults.theme);

        Self { language, theme }
    }

    pub fn toggle_theme(&mut self, store: &dyn PreferenceStore) -> Theme {
        self.theme = self.theme.toggled();
        store.set(THEME_KEY, self.theme.as_str());
        self.theme
    }

    pub fn toggle_language(&mut self, store: &dyn PreferenceStore) -> Language {
        self.language = self.language.toggled();
        store.set(LANG_KEY, self.language.as_str());
        self.language
    }
}

/// How a theme change reaches the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeSwap {
    Immediate,
    ViewTransition,
}

/// A missing document or a browser without `startViewTransition` both
/// report the transition as unavailable; the theme is then applied directly.
pub fn theme_swap(reduced_motion: bool, view_transition_available: bool) -> ThemeSwap {
    if reduced_motion || !view_transition_available {
        ThemeSwap::Immediate
    } else {
        ThemeSwap::ViewTransition
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{apply_language, apply_theme, apply_theme_with_transition, LocalStore};

#[cfg(target_arch = "wasm32")]
mod browser {
    use js_sys::{Function, Reflect};
    use wasm_bindgen::{closure::Closure, JsCast, JsValue};
    use web_sys::{window, Storage};

    use super::{theme_swap, PreferenceStore, Theme, ThemeSwap};
    use crate::i18n::Language;

    /// Local storage; reads and writes are silently skipped when storage is unavailable.
    #[derive(Clone, Copy, Default)]
    pub struct LocalStore;

    fn local_storage() -> Option<Storage> {
        window()?.local_storage().ok().flatten()
    }

    impl PreferenceStore for LocalStore {
        fn get(&self, key: &str) -> Option<String> {
            local_storage()?.get_item(key).ok().flatten()
        }

        fn set(&self, key: &str, value: &str) {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(key, value);
            }
        }
    }

    pub fn apply_theme(theme: Theme) {
        if let Some(document) = window().and_then(|w| w.document()) {
            if let Some(root) = document.document_element() {
                let _ = root.set_attribute("data-theme", theme.as_str());
            }
        }
    }

    fn view_transition() -> Option<(JsValue, Function)> {
        let document: JsValue = window()?.document()?.into();
        let start = Reflect::get(&document, &JsValue::from_str("startViewTransition"))
            .ok()?
            .dyn_into::<Function>()
            .ok()?;
        Some((document, start))
    }

    pub fn apply_theme_with_transition(theme: Theme, reduced_motion: bool) {
        let transition = view_transition();
        let swap = theme_swap(reduced_motion, transition.is_some());
        let (ThemeSwap::ViewTransition, Some((document, start_view_transition))) =
            (swap, transition)
        else {
            apply_theme(theme);
            return;
        };

        // The browser invokes the update callback after this function returns.
        let callback = Closure::once_into_js(move || apply_theme(theme));

        if start_view_transition.call1(&document, &callback).is_err() {
            apply_theme(theme);
        }
    }

    pub fn apply_language(language: Language, title: &str) {
        if let Some(document) = window().and_then(|w| w.document()) {
            if let Some(root) = document.document_element() {
                let _ = root.set_attribute("lang", language.as_str());
            }
            document.set_title(title);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore {
        entries: RefCell<HashMap<String, String>>,
    }

    impl PreferenceStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            self.entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
        }
    }

    #[test]
    fn empty_store_yields_english_and_dark() {
        let store = MemoryStore::default();
        assert_eq!(Preferences::load(&store), Preferences::default());
        assert_eq!(Preferences::default().theme, Theme::Dark);
    }

    #[test]
    fn unknown_stored_values_are_ignored() {
        let store = MemoryStore::default();
        store.set(LANG_KEY, "fr");
        store.set(THEME_KEY, "sepia");

        assert_eq!(Preferences::load(&store), Preferences::default());
    }

    #[test]
    fn toggles_persist_and_reload() {
        let store = MemoryStore::default();
        let mut preferences = Preferences::load(&store);

        assert_eq!(preferences.toggle_theme(&store), Theme::Light);
        assert_eq!(preferences.toggle_language(&store), Language::Es);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
        assert_eq!(store.get(LANG_KEY).as_deref(), Some("es"));

        let reloaded = Preferences::load(&store);
        assert_eq!(reloaded, preferences);
    }

    #[test]
    fn theme_icon_tracks_current_theme() {
        assert_eq!(Theme::Dark.icon(), "🌙");
        assert_eq!(Theme::Light.icon(), "☀️");
        assert!(Theme::Dark.pressed());
    }

    #[test]
    fn theme_applies_directly_without_a_view_transition() {
        assert_eq!(theme_swap(false, false), ThemeSwap::Immediate);
        assert_eq!(theme_swap(true, true), ThemeSwap::Immediate);
        assert_eq!(theme_swap(true, false), ThemeSwap::Immediate);
        assert_eq!(theme_swap(false, true), ThemeSwap::ViewTransition);
    }
}
