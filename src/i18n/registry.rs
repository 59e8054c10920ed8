//! Locale registry: Single source of truth for all supported site locales.
//!
//! The site ships in Thai (default, unprefixed URLs) and English (`/en/...`).
//! The registry is a `OnceLock` singleton for the running server, but it can
//! also be constructed directly so resolution can be tested in isolation.

use anyhow::{bail, Result};
use std::sync::OnceLock;

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// Locale code, also used as the URL prefix segment (e.g., "en")
    pub code: &'static str,

    /// English name of the locale (e.g., "Thai")
    pub name: &'static str,

    /// Native name of the locale (e.g., "ไทย")
    pub native_name: &'static str,

    /// Whether this is the default locale (served without a URL prefix)
    pub is_default: bool,
}

/// Registry of the locales the site is served in.
#[derive(Debug)]
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Build a registry from an explicit locale list.
    ///
    /// Fails unless exactly one locale is the default and every code is a
    /// unique, non-empty path segment.
    pub fn new(locales: Vec<LocaleConfig>) -> Result<Self> {
        let defaults = locales.iter().filter(|l| l.is_default).count();
        if defaults != 1 {
            bail!("Expected exactly one default locale, found {}", defaults);
        }

        for (i, locale) in locales.iter().enumerate() {
            if locale.code.is_empty() || locale.code.contains('/') {
                bail!("Invalid locale code: '{}'", locale.code);
            }
            if locales[..i].iter().any(|other| other.code == locale.code) {
                bail!("Duplicate locale code: '{}'", locale.code);
            }
        }

        Ok(Self { locales })
    }

    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| {
            LocaleRegistry::new(default_locales()).expect("builtin locales are valid")
        })
    }

    /// The default locale. Construction guarantees there is exactly one.
    pub fn default_locale(&self) -> &LocaleConfig {
        self.locales
            .iter()
            .find(|locale| locale.is_default)
            .unwrap_or(&self.locales[0])
    }

    /// Locales whose URLs carry a prefix segment.
    pub fn prefixed(&self) -> impl Iterator<Item = &LocaleConfig> {
        self.locales.iter().filter(|locale| !locale.is_default)
    }
}

/// Locales the site is published in: Thai (default) and English.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_default: false,
        },
        LocaleConfig {
            code: "th",
            name: "Thai",
            native_name: "ไทย",
            is_default: true,
        },
    ]
}
