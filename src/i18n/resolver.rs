//! Locale resolution for incoming request paths.
//!
//! The site uses an "as-needed" prefix policy: the default locale is served
//! from unprefixed paths and every other locale lives under `/<code>`.
//! Resolution is total: any string maps to a locale or is passed through.

use crate::i18n::{Locale, LocaleRegistry};
use serde::Serialize;

/// First path segments that never go through locale resolution.
pub const RESERVED_PREFIXES: &[&str] = &["api", "_internal"];

/// Outcome of resolving a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Reserved or static-file path, passed through unchanged.
    Bypassed { path: String },

    /// A page path with its active locale and the path stripped of any prefix.
    Localized {
        locale: Locale,
        canonical_path: String,
    },
}

/// Locale chosen for a request, attached to it by the locale middleware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLocale {
    pub locale: Locale,
    pub canonical_path: String,
}

/// Resolves request paths against a locale registry.
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    default: Locale,
    prefixed: Vec<Locale>,
    reserved: Vec<&'static str>,
}

impl LocaleResolver {
    /// Build a resolver for a registry with the standard reserved prefixes.
    pub fn new(registry: &LocaleRegistry) -> Self {
        Self {
            default: Locale::from_config(registry.default_locale()),
            prefixed: registry.prefixed().map(Locale::from_config).collect(),
            reserved: RESERVED_PREFIXES.to_vec(),
        }
    }

    /// Resolver over the global registry.
    pub fn global() -> Self {
        Self::new(LocaleRegistry::get())
    }

    /// The locale named by `code`, or the default when absent or unsupported.
    pub fn locale_or_default(&self, code: Option<&str>) -> Locale {
        code.and_then(|code| self.locales().find(|locale| locale.code() == code))
            .unwrap_or(self.default)
    }

    /// Every locale, default first.
    pub fn locales(&self) -> impl Iterator<Item = Locale> + '_ {
        std::iter::once(self.default).chain(self.prefixed.iter().copied())
    }

    /// Resolve the active locale of a request path.
    ///
    /// `/en/rooms` resolves to English with canonical path `/rooms`, `/en`
    /// to English with `/`, and anything else to the default locale with the
    /// path unchanged.
    pub fn resolve(&self, path: &str) -> Resolution {
        if self.is_bypassed(path) {
            return Resolution::Bypassed {
                path: path.to_string(),
            };
        }

        let (first, rest) = split_first_segment(path);
        match self.prefixed.iter().find(|locale| locale.code() == first) {
            Some(locale) => Resolution::Localized {
                locale: *locale,
                canonical_path: if rest.is_empty() {
                    "/".to_string()
                } else {
                    rest.to_string()
                },
            },
            None => Resolution::Localized {
                locale: self.default,
                canonical_path: path.to_string(),
            },
        }
    }

    /// Whether a path skips locale resolution entirely.
    ///
    /// True for reserved first segments and for static files, i.e. paths
    /// whose final segment contains a dot.
    pub fn is_bypassed(&self, path: &str) -> bool {
        let (first, _) = split_first_segment(path);
        if self.reserved.contains(&first) {
            return true;
        }

        path.rsplit('/')
            .next()
            .map(|last| last.contains('.'))
            .unwrap_or(false)
    }

    /// Public URL path of a canonical path in the given locale.
    pub fn localized_path(&self, locale: Locale, canonical_path: &str) -> String {
        if locale == self.default {
            return canonical_path.to_string();
        }

        match canonical_path {
            "" | "/" => format!("/{}", locale.code()),
            path if path.starts_with('/') => format!("/{}{}", locale.code(), path),
            path => format!("/{}/{}", locale.code(), path),
        }
    }

    /// Redirect target for a path that spells out the default locale prefix.
    ///
    /// `/th/rooms` becomes `/rooms` and `/th` becomes `/`. The target is
    /// always a path on this site. Returns `None` for every other path.
    pub fn redirect_target(&self, path: &str) -> Option<String> {
        if self.is_bypassed(path) {
            return None;
        }

        let (first, rest) = split_first_segment(path);
        if first != self.default.code() {
            return None;
        }

        // A target starting with `//` or `/\` would leave the site.
        let rest = rest.trim_start_matches(|c: char| c == '/' || c == '\\');
        Some(format!("/{}", rest))
    }
}

/// Split `/first/rest...` into `("first", "/rest...")`.
fn split_first_segment(path: &str) -> (&str, &str) {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    match trimmed.find('/') {
        Some(i) => (&trimmed[..i], &trimmed[i..]),
        None => (trimmed, ""),
    }
}
