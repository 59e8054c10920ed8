//! Locale type: a validated site locale.

use crate::i18n::LocaleConfig;
use serde::{Serialize, Serializer};

/// A locale drawn from a registry.
///
/// Values can only be built from registry entries, so resolution never
/// produces a locale outside the supported set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    /// Locale code (e.g., "th", "en")
    code: &'static str,
}

impl Locale {
    /// Thai, the default locale.
    pub const THAI: Locale = Locale { code: "th" };

    /// English, served under `/en`.
    pub const ENGLISH: Locale = Locale { code: "en" };

    /// The locale for a registry entry.
    pub fn from_config(config: &LocaleConfig) -> Locale {
        Locale { code: config.code }
    }

    /// Get the locale code.
    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::LocaleRegistry;

    #[test]
    fn test_constants() {
        assert_eq!(Locale::THAI.code(), "th");
        assert_eq!(Locale::ENGLISH.code(), "en");
        assert_ne!(Locale::THAI, Locale::ENGLISH);
    }

    #[test]
    fn test_from_config_matches_constants() {
        let registry = LocaleRegistry::get();
        assert_eq!(Locale::from_config(registry.default_locale()), Locale::THAI);

        let prefixed: Vec<_> = registry.prefixed().map(Locale::from_config).collect();
        assert_eq!(prefixed, vec![Locale::ENGLISH]);
    }

    #[test]
    fn test_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Locale::THAI).unwrap(), "\"th\"");
        assert_eq!(serde_json::to_string(&Locale::ENGLISH).unwrap(), "\"en\"");
    }
}
