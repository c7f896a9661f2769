//! Current-language selection and locale-aware date display.

use crate::Language;
use chrono::{Datelike, NaiveDate};
use std::sync::{PoisonError, RwLock};
use tracing::debug;

const EN_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const ES_MONTHS: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre",
    "octubre", "noviembre", "diciembre",
];

/// Holds the language presentation code is currently showing.
#[derive(Debug, Default)]
pub struct LocaleStore {
    current: RwLock<Language>,
}

impl LocaleStore {
    /// Store starting at `language`.
    pub const fn new(language: Language) -> Self {
        Self {
            current: RwLock::new(language),
        }
    }

    /// Store starting at the detected language; see [`detect_language`].
    pub fn detect(saved: Option<&str>) -> Self {
        Self::new(detect_language(saved, |key| std::env::var(key).ok()))
    }

    /// The current language.
    pub fn current(&self) -> Language {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Switch the current language.
    pub fn set(&self, language: Language) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = language;
    }
}

/// Pick a language from a saved preference, then the process locale.
///
/// Order: `saved`, `LC_ALL`, `LC_MESSAGES`, `LANG`, then every entry of the
/// colon-separated `LANGUAGE` list. The first supported one wins; if none is,
/// the site default (Spanish) is used. `env` looks up variables so tests can
/// supply their own.
pub fn detect_language(saved: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Language {
    if let Some(lang) = saved.and_then(Language::normalize) {
        return lang;
    }

    let candidates = ["LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .filter_map(&env)
        .chain(
            env("LANGUAGE")
                .into_iter()
                .flat_map(|list| list.split(':').map(str::to_string).collect::<Vec<_>>()),
        );

    for candidate in candidates {
        if let Some(lang) = Language::normalize(&candidate) {
            debug!(locale = %candidate, %lang, "Detected language from environment");
            return lang;
        }
    }
    Language::default()
}

impl Language {
    /// Long human-readable date: `May 1, 2024` or `1 de mayo de 2024`.
    pub fn format_long_date(self, date: NaiveDate) -> String {
        let month = date.month0() as usize;
        match self {
            Self::En => format!("{} {}, {}", EN_MONTHS[month], date.day(), date.year()),
            Self::Es => format!("{} de {} de {}", date.day(), ES_MONTHS[month], date.year()),
        }
    }
}
