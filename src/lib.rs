//! Phakkay Camping site backend.
//!
//! Locale resolution, the static content catalog, gallery filtering and
//! contact form validation, served over HTTP by `server`.

pub mod catalog;
pub mod config;
pub mod contact;
pub mod gallery;
pub mod i18n;
pub mod server;
pub mod site;
