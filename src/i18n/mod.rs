//! Internationalization (i18n) module for the bilingual site.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for supported locales and the default
//! - `locale`: Validated `Locale` value type
//! - `resolver`: Request path to locale resolution under the as-needed prefix policy
//! - `text`: Bilingual text fields used by the content catalog
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::i18n::{Locale, LocaleResolver, Resolution};
//!
//! let resolver = LocaleResolver::global();
//! match resolver.resolve("/en/rooms") {
//!     Resolution::Localized { locale, canonical_path } => assert_eq!(locale, Locale::ENGLISH),
//!     Resolution::Bypassed { .. } => unreachable!(),
//! }
//! ```

mod locale;
mod registry;
mod resolver;
mod text;

pub use locale::Locale;
pub use registry::{LocaleConfig, LocaleRegistry};
pub use resolver::{LocaleResolver, Resolution, ResolvedLocale, RESERVED_PREFIXES};
pub use text::LocalizedText;
