use crate::i18n::Locale;
use serde::Serialize;

/// A text field carried in both site languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocalizedText {
    pub en: &'static str,
    pub th: &'static str,
}

impl LocalizedText {
    pub const fn new(en: &'static str, th: &'static str) -> Self {
        Self { en, th }
    }

    /// Text for a locale. Thai for the Thai locale, English otherwise.
    pub fn get(&self, locale: Locale) -> &'static str {
        match locale.code() {
            "th" => self.th,
            _ => self.en,
        }
    }
}
