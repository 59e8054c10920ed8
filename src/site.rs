//! Resort details and crawler-facing documents (sitemap, robots.txt).

use crate::i18n::{Locale, LocaleResolver, LocalizedText};
use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Where the resort is.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResortLocation {
    pub lat: f64,
    pub lng: f64,
    pub address: LocalizedText,
    pub google_maps_url: &'static str,
}

pub const RESORT_LOCATION: ResortLocation = ResortLocation {
    lat: 14.5892,
    lng: 101.0486,
    address: LocalizedText::new(
        "391 Cha Om, Kaeng Khoi District, Saraburi 18110, Thailand",
        "391 ชะอม อำเภอแก่งคอย จังหวัดสระบุรี 18110",
    ),
    google_maps_url: "https://www.google.com/maps/dir//391+%E0%B8%8A%E0%B8%B0%E0%B8%AD%E0%B8%A1+Tambon+Cha+Om,+Kaeng+Khoi+District,+Saraburi+18110",
};

/// How guests reach the resort.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ContactInfo {
    pub phone: &'static str,
    pub email: &'static str,
    pub line: &'static str,
    pub facebook: &'static str,
}

// TODO: replace the phone, LINE and Facebook placeholders once the resort publishes them.
pub const CONTACT_INFO: ContactInfo = ContactInfo {
    phone: "+66-XX-XXX-XXXX",
    email: "contact@phakkaycamping.com",
    line: "#LINE_PLACEHOLDER",
    facebook: "#FACEBOOK_PLACEHOLDER",
};

static THAI_PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
static NON_DIAL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Format a compact Thai number for display: `+66812345678` to `+66 81-234-5678`.
///
/// Numbers that don't match the compact `+66` form are returned unchanged.
pub fn format_phone_display(phone: &str) -> String {
    let regex = THAI_PHONE_REGEX
        .get_or_init(|| Regex::new(r"(\+66)(\d{2})(\d{3})(\d{4})").unwrap());
    regex.replace(phone, "$1 $2-$3-$4").into_owned()
}

/// `tel:` link for a phone number, keeping only `+` and digits.
pub fn format_phone_link(phone: &str) -> String {
    let regex = NON_DIAL_REGEX.get_or_init(|| Regex::new(r"[^+\d]").unwrap());
    format!("tel:{}", regex.replace_all(phone, ""))
}

/// Site base URL without a trailing slash.
pub fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: NaiveDate,
    pub change_frequency: &'static str,
    pub priority: f32,
}

/// Sitemap entries: the bare site, plus one entry per locale prefix.
///
/// The default locale is listed with its explicit prefix as well, matching
/// what search engines have already indexed.
pub fn sitemap_entries(base_url: &str, last_modified: NaiveDate) -> Vec<SitemapEntry> {
    let base = normalize_base_url(base_url);
    let entry = |url: String, priority: f32| SitemapEntry {
        url,
        last_modified,
        change_frequency: "weekly",
        priority,
    };

    vec![
        entry(base.clone(), 1.0),
        entry(format!("{}/{}", base, Locale::THAI.code()), 1.0),
        entry(format!("{}/{}", base, Locale::ENGLISH.code()), 0.9),
    ]
}

/// Render sitemap entries as sitemaps.org XML.
pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        xml.push_str(&format!(
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
            escape_xml(&entry.url),
            entry.last_modified.format("%Y-%m-%d"),
            entry.change_frequency,
            entry.priority
        ));
    }
    xml.push_str("</urlset>\n");
    xml
}

/// robots.txt allowing every crawler and pointing at the sitemap.
pub fn render_robots(base_url: &str) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml\n",
        normalize_base_url(base_url)
    )
}

/// A language alternate of a page, for hreflang links and the language switcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alternate {
    pub locale: Locale,
    pub href: String,
}

/// Alternates of a canonical path in every locale the resolver knows.
pub fn alternates(resolver: &LocaleResolver, base_url: &str, canonical_path: &str) -> Vec<Alternate> {
    let base = normalize_base_url(base_url);
    resolver
        .locales()
        .map(|locale| Alternate {
            locale,
            href: format!("{}{}", base, resolver.localized_path(locale, canonical_path)),
        })
        .collect()
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
