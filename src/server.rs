//! HTTP surface of the site.
//!
//! ## Endpoints
//! - POST /api/contact - Validate a contact form submission
//! - GET  /api/gallery?category=&locale= - Filtered, localized gallery items
//! - GET  /api/rooms?locale= - Localized room types
//! - GET  /api/health - Liveness probe
//! - GET  /sitemap.xml, /robots.txt - Crawler documents
//! - GET  anything else - Locale-resolved page data (`/` and `/en` only)
//!
//! Every request goes through the locale middleware first. Reserved and
//! static paths pass through it untouched.

use crate::catalog::{Catalog, CategoryTag, ContentItem, RoomKey, RoomType};
use crate::config::Config;
use crate::contact::{self, ContactSubmission, InquirySink, LogSink, RejectionReason};
use crate::gallery;
use crate::i18n::{Locale, LocaleResolver, Resolution, ResolvedLocale};
use crate::site::{self, Alternate, CONTACT_INFO, RESORT_LOCATION};
use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::{Query, Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Json, Redirect, Response},
    routing::{get, post},
    Extension, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

/// App state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<Catalog>,
    pub resolver: Arc<LocaleResolver>,
    pub sink: Arc<dyn InquirySink>,
}

impl AppState {
    /// State over the builtin catalog and locales, logging inquiries.
    pub fn new(config: Config) -> Self {
        let sink = LogSink {
            verbose: config.log_submissions(),
        };
        Self {
            config: Arc::new(config),
            catalog: Arc::new(Catalog::builtin().clone()),
            resolver: Arc::new(LocaleResolver::global()),
            sink: Arc::new(sink),
        }
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    pub fn with_sink(mut self, sink: impl InquirySink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }
}

// ==================== Responses ====================

/// API error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Errors a handler can answer with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Rejected(#[from] RejectionReason),

    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("Inquiry delivery failed: {0}")]
    Delivery(String),

    #[error("Not found")]
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Rejected(reason) => {
                let body = ErrorResponse {
                    error: reason.to_string(),
                    code: Some(reason.code()),
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::NotFound => {
                let body = ErrorResponse {
                    error: self.to_string(),
                    code: None,
                };
                (StatusCode::NOT_FOUND, Json(body)).into_response()
            }
            ApiError::MalformedBody(_) | ApiError::Delivery(_) => {
                error!("Contact form error: {}", self);
                let body = ErrorResponse {
                    error: "Failed to send inquiry".to_string(),
                    code: None,
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

/// A gallery image as shown in one locale.
#[derive(Debug, Serialize)]
pub struct ImageView {
    pub id: &'static str,
    pub src: &'static str,
    pub alt: &'static str,
    pub categories: &'static [CategoryTag],
    pub priority: bool,
}

impl ImageView {
    fn new(item: &ContentItem, locale: Locale) -> Self {
        Self {
            id: item.id,
            src: item.src,
            alt: item.text.get(locale),
            categories: item.categories,
            priority: item.priority,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SectionView {
    pub category: CategoryTag,
    pub images: Vec<ImageView>,
}

#[derive(Debug, Serialize)]
pub struct RoomView {
    pub key: RoomKey,
    pub name: &'static str,
    pub capacity: u8,
    pub cover: Option<ImageView>,
    pub images: Vec<ImageView>,
}

impl RoomView {
    fn new(catalog: &Catalog, room: &RoomType, locale: Locale) -> Self {
        Self {
            key: room.key,
            name: room.name.get(locale),
            capacity: room.capacity,
            cover: catalog.get(room.cover).map(|item| ImageView::new(item, locale)),
            images: catalog
                .room_images(room)
                .into_iter()
                .map(|item| ImageView::new(item, locale))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryResponse {
    pub locale: Locale,
    pub category: String,
    pub total: usize,
    pub images: Vec<ImageView>,
}

#[derive(Debug, Serialize)]
pub struct RoomsResponse {
    pub locale: Locale,
    pub rooms: Vec<RoomView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationView {
    pub lat: f64,
    pub lng: f64,
    pub address: &'static str,
    pub google_maps_url: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactView {
    pub phone: &'static str,
    pub phone_display: String,
    pub phone_link: String,
    pub email: &'static str,
    pub line: &'static str,
    pub facebook: &'static str,
}

/// Everything the one-page brochure needs, in one locale.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    pub locale: Locale,
    pub canonical_path: String,
    pub alternates: Vec<Alternate>,
    pub gallery: Vec<SectionView>,
    pub rooms: Vec<RoomView>,
    pub location: LocationView,
    pub contact: ContactView,
}

// ==================== Router ====================

/// Creates the site router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/contact", post(submit_contact))
        .route("/api/gallery", get(list_gallery))
        .route("/api/rooms", get(list_rooms))
        .route("/api/health", get(health))
        .route("/sitemap.xml", get(sitemap))
        .route("/robots.txt", get(robots))
        .fallback(page)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            locale_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: Config) -> Result<()> {
    let addr = config.bind_addr();
    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}

/// Resolve the request locale before any page logic runs.
///
/// Paths that spell out the default locale are redirected to their
/// unprefixed form. Resolved requests carry a `ResolvedLocale` extension and
/// get a `Content-Language` header on the way out.
async fn locale_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if let Some(target) = state.resolver.redirect_target(&path) {
        let location = match request.uri().query() {
            Some(query) => format!("{}?{}", target, query),
            None => target,
        };
        debug!("Redirecting {} to {}", path, location);
        return Redirect::temporary(&location).into_response();
    }

    match state.resolver.resolve(&path) {
        Resolution::Bypassed { .. } => next.run(request).await,
        Resolution::Localized {
            locale,
            canonical_path,
        } => {
            request.extensions_mut().insert(ResolvedLocale {
                locale,
                canonical_path,
            });

            let mut response = next.run(request).await;
            if let Ok(value) = HeaderValue::from_str(locale.code()) {
                response.headers_mut().insert(header::CONTENT_LANGUAGE, value);
            }
            response
        }
    }
}

// ==================== Handlers ====================

/// POST /api/contact
///
/// The body is parsed as JSON regardless of `Content-Type`.
async fn submit_contact(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    let submission: ContactSubmission = serde_json::from_slice(&body)?;

    if let Err(reason) = contact::validate(&submission) {
        warn!("Rejected contact submission: {}", reason.code());
        return Err(reason.into());
    }

    state
        .sink
        .deliver(&submission)
        .await
        .map_err(|e| ApiError::Delivery(format!("{:#}", e)))?;

    info!("Contact inquiry accepted");
    Ok(Json(MessageResponse {
        message: "Inquiry sent successfully",
    }))
}

#[derive(Debug, Deserialize)]
struct GalleryQuery {
    category: Option<String>,
    locale: Option<String>,
}

/// GET /api/gallery
///
/// A missing `category` means `all`; an unknown one yields no images.
async fn list_gallery(
    State(state): State<AppState>,
    Query(query): Query<GalleryQuery>,
) -> Json<GalleryResponse> {
    let locale = state.resolver.locale_or_default(query.locale.as_deref());
    let category = query.category.unwrap_or_else(|| "all".to_string());

    let images: Vec<ImageView> = gallery::filter_by_label(&state.catalog, &category)
        .into_iter()
        .map(|item| ImageView::new(item, locale))
        .collect();

    Json(GalleryResponse {
        locale,
        category,
        total: images.len(),
        images,
    })
}

#[derive(Debug, Deserialize)]
struct LocaleQuery {
    locale: Option<String>,
}

/// GET /api/rooms
async fn list_rooms(
    State(state): State<AppState>,
    Query(query): Query<LocaleQuery>,
) -> Json<RoomsResponse> {
    let locale = state.resolver.locale_or_default(query.locale.as_deref());
    let rooms = state
        .catalog
        .rooms()
        .iter()
        .map(|room| RoomView::new(&state.catalog, room, locale))
        .collect();

    Json(RoomsResponse { locale, rooms })
}

/// GET /api/health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /sitemap.xml
async fn sitemap(State(state): State<AppState>) -> impl IntoResponse {
    let entries = site::sitemap_entries(&state.config.site_url, Utc::now().date_naive());
    (
        [(header::CONTENT_TYPE, "application/xml")],
        site::render_sitemap(&entries),
    )
}

/// GET /robots.txt
async fn robots(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        site::render_robots(&state.config.site_url),
    )
}

/// Fallback: page data for the localized home page.
async fn page(
    State(state): State<AppState>,
    resolved: Option<Extension<ResolvedLocale>>,
) -> Result<Json<PageData>, ApiError> {
    let Some(Extension(resolved)) = resolved else {
        return Err(ApiError::NotFound);
    };
    if resolved.canonical_path != "/" {
        return Err(ApiError::NotFound);
    }

    let locale = resolved.locale;
    let catalog = &state.catalog;

    let gallery = gallery::sections(catalog)
        .into_iter()
        .map(|section| SectionView {
            category: section.category,
            images: section
                .items
                .into_iter()
                .map(|item| ImageView::new(item, locale))
                .collect(),
        })
        .collect();

    let rooms = catalog
        .rooms()
        .iter()
        .map(|room| RoomView::new(catalog, room, locale))
        .collect();

    Ok(Json(PageData {
        locale,
        alternates: site::alternates(
            &state.resolver,
            &state.config.site_url,
            &resolved.canonical_path,
        ),
        canonical_path: resolved.canonical_path,
        gallery,
        rooms,
        location: LocationView {
            lat: RESORT_LOCATION.lat,
            lng: RESORT_LOCATION.lng,
            address: RESORT_LOCATION.address.get(locale),
            google_maps_url: RESORT_LOCATION.google_maps_url,
        },
        contact: ContactView {
            phone: CONTACT_INFO.phone,
            phone_display: site::format_phone_display(CONTACT_INFO.phone),
            phone_link: site::format_phone_link(CONTACT_INFO.phone),
            email: CONTACT_INFO.email,
            line: CONTACT_INFO.line,
            facebook: CONTACT_INFO.facebook,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt; // For oneshot()

    fn app() -> Router {
        create_router(AppState::new(Config::default()))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::CONTENT_LANGUAGE).is_none());
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_default_prefix_redirects() {
        let response = app()
            .oneshot(Request::builder().uri("/th?ref=fb").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/?ref=fb");
    }

    #[tokio::test]
    async fn test_redirect_never_leaves_site() {
        let response = app()
            .oneshot(Request::builder().uri("/th//evil.com/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/evil.com/");
    }

    #[tokio::test]
    async fn test_unknown_page_is_localized_404() {
        let response = app()
            .oneshot(Request::builder().uri("/en/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::CONTENT_LANGUAGE], "en");
    }

    #[tokio::test]
    async fn test_static_file_bypasses_locale() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/images/missing.jpg")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get(header::CONTENT_LANGUAGE).is_none());
    }

    #[test]
    fn test_api_error_statuses() {
        let rejected = ApiError::from(RejectionReason::InvalidEmailFormat).into_response();
        assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);

        let delivery = ApiError::Delivery("smtp down".to_string()).into_response();
        assert_eq!(delivery.status(), StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(ApiError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
    }
}
