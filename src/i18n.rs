use std::collections::HashMap;
use std::future::Future;

use futures_util::future::join;
use serde_json::json;

use crate::logging::Logger;

pub type Dictionary = HashMap<String, String>;

const EN_DEFAULTS: &str = include_str!("../assets/i18n/en.json");
const ES_DEFAULTS: &str = include_str!("../assets/i18n/es.json");
const TYPED_PHRASE_KEYS: [&str; 4] = ["typed1", "typed2", "typed3", "typed4"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    Es,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Es];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::En => Self::Es,
            Self::Es => Self::En,
        }
    }

    /// The toggle button advertises the language it switches to.
    pub fn toggle_label(self) -> &'static str {
        match self.toggled() {
            Self::En => "EN",
            Self::Es => "ES",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadError {
    Network,
    HttpStatus(u16),
    Decode,
}

impl LoadError {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network_error",
            Self::HttpStatus(_) => "http_status",
            Self::Decode => "decode_error",
        }
    }
}

pub fn embedded_defaults(language: Language) -> Dictionary {
    let source = match language {
        Language::En => EN_DEFAULTS,
        Language::Es => ES_DEFAULTS,
    };
    serde_json::from_str(source).unwrap_or_default()
}

#[derive(Clone, Debug, PartialEq)]
pub struct Translations {
    en: Dictionary,
    es: Dictionary,
}

impl Translations {
    pub fn embedded() -> Self {
        Self {
            en: embedded_defaults(Language::En),
            es: embedded_defaults(Language::Es),
        }
    }

    /// A failed language is replaced wholesale by its embedded dictionary.
    pub fn from_results(
        en: Result<Dictionary, LoadError>,
        es: Result<Dictionary, LoadError>,
        logger: &Logger,
    ) -> Self {
        Self {
            en: resolve_dictionary(Language::En, en, logger),
            es: resolve_dictionary(Language::Es, es, logger),
        }
    }

    pub fn dictionary(&self, language: Language) -> &Dictionary {
        match language {
            Language::En => &self.en,
            Language::Es => &self.es,
        }
    }

    pub fn text<'a>(&'a self, language: Language, key: &'a str) -> &'a str {
        lookup_non_empty(self.dictionary(language), key)
            .or_else(|| lookup_non_empty(&self.en, key))
            .unwrap_or(key)
    }

    pub fn typed_phrases(&self, language: Language) -> Vec<String> {
        TYPED_PHRASE_KEYS
            .iter()
            .map(|key| self.text(language, key).to_string())
            .collect()
    }

    pub fn document_title(&self, language: Language) -> &str {
        self.text(language, "documentTitle")
    }
}

fn lookup_non_empty<'a>(dictionary: &'a Dictionary, key: &str) -> Option<&'a str> {
    dictionary
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
}

fn resolve_dictionary(
    language: Language,
    loaded: Result<Dictionary, LoadError>,
    logger: &Logger,
) -> Dictionary {
    match loaded {
        Ok(dictionary) => {
            logger.debug(
                "translations_loaded",
                json!({ "lang": language.as_str(), "keys": dictionary.len() }),
            );
            dictionary
        }
        Err(error) => {
            let status = match error {
                LoadError::HttpStatus(status) => Some(status),
                _ => None,
            };
            logger.warn(
                "translations_fallback",
                json!({ "lang": language.as_str(), "reason": error.as_str(), "status": status }),
            );
            embedded_defaults(language)
        }
    }
}

/// Fetches both languages concurrently; neither failure blocks the other.
pub async fn load_translations<F, Fut>(fetch: F, logger: &Logger) -> Translations
where
    F: Fn(Language) -> Fut,
    Fut: Future<Output = Result<Dictionary, LoadError>>,
{
    let (en, es) = join(fetch(Language::En), fetch(Language::Es)).await;
    Translations::from_results(en, es, logger)
}

#[cfg(target_arch = "wasm32")]
pub async fn fetch_dictionary(url: String) -> Result<Dictionary, LoadError> {
    use gloo_net::http::Request;

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|_| LoadError::Network)?;

    if !response.ok() {
        return Err(LoadError::HttpStatus(response.status()));
    }

    response
        .json::<Dictionary>()
        .await
        .map_err(|_| LoadError::Decode)
}
