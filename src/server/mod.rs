//! HTTP server for the site API.
//!
//! This module exposes the gallery and location queries as a small
//! HTTP+JSON API under `/api/v1/external`:
//!
//! - `GET /gallery/categories`
//! - `GET /gallery/photos?categoryId&page&pageSize`
//! - `GET /gallery/photos/:id`
//! - `GET /gallery/search?searchTerm&startDate&endDate&page&pageSize`
//! - `GET /location?region&district&latitude&longitude`
//! - `GET /location/:id`
//!
//! plus `GET /api/v1/health`.
//!
//! Handlers are thin: they validate parameters, delegate to the query
//! engines and wrap results in the JSON response envelope.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::clock::Clock;
use crate::models::{
    Category, ErrorBody, ErrorEnvelope, Location, LocationListQuery, LocationSummary,
    PageMetadata, Photo, PhotoSummary, SuccessEnvelope,
};
use crate::query;
use crate::store::SiteStore;
use crate::validate::{self, ValidationError};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SiteStore>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(store: Arc<dyn SiteStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

/// Simple health-check response payload.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Error type used by HTTP handlers to map failures into JSON error
/// envelopes.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    fn validation(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "VALIDATION_ERROR",
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code: "NOT_FOUND",
            message: message.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.message)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::validation(format!("Invalid query parameters: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(code = self.code, status = %self.status, "{}", self.message);

        let body = Json(ErrorEnvelope {
            success: false,
            error: ErrorBody {
                code: self.code.to_string(),
                message: self.message,
            },
        });
        (self.status, body).into_response()
    }
}

type ApiResult<T> = Result<Json<SuccessEnvelope<T>>, ApiError>;

/// Raw `/gallery/photos` parameters; parsed by `validate`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PhotoListParams {
    category_id: Option<String>,
    page: Option<String>,
    page_size: Option<String>,
}

/// Raw `/gallery/search` parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PhotoSearchParams {
    search_term: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    page: Option<String>,
    page_size: Option<String>,
}

/// Raw `/location` parameters.
#[derive(Debug, Default, Deserialize)]
struct LocationListParams {
    region: Option<String>,
    district: Option<String>,
    latitude: Option<String>,
    longitude: Option<String>,
}

/// Build the Axum router for the site API.
pub fn router(state: AppState) -> Router {
    let external = Router::new()
        .route("/gallery/categories", get(list_categories))
        .route("/gallery/photos", get(list_photos))
        .route("/gallery/photos/:id", get(get_photo))
        .route("/gallery/search", get(search_photos))
        .route("/location", get(list_locations))
        .route("/location/:id", get(get_location));

    Router::new()
        .route("/api/v1/health", get(health))
        .nest("/api/v1/external", external)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run the HTTP server bound to the provided socket address.
///
/// This is used by the CLI `alemassas serve` subcommand.
pub async fn run(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    serve_with_listener(listener, state).await
}

/// Run the HTTP server using an existing `TcpListener`.
pub async fn serve_with_listener(listener: TcpListener, state: AppState) -> Result<()> {
    let app = router(state);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

async fn list_categories(State(state): State<AppState>) -> ApiResult<Vec<Category>> {
    let categories = query::list_categories(state.store.as_ref());
    Ok(Json(SuccessEnvelope::new(categories)))
}

async fn list_photos(
    State(state): State<AppState>,
    params: Result<Query<PhotoListParams>, QueryRejection>,
) -> ApiResult<Vec<PhotoSummary>> {
    let Query(params) = params?;

    let request = validate::photo_list_query(
        validate::parse_int("categoryId", params.category_id.as_deref())?,
        validate::parse_int("page", params.page.as_deref())?,
        validate::parse_int("pageSize", params.page_size.as_deref())?,
    )?;

    let page = query::list_photos(state.store.as_ref(), &request);
    let metadata = PageMetadata {
        page: request.page,
        page_size: request.page_size,
        total: page.total,
    };

    Ok(Json(SuccessEnvelope::with_metadata(page.items, metadata)))
}

async fn get_photo(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Photo> {
    let id = parse_path_id(&id).map_err(|_| ApiError::validation("Invalid photo ID"))?;

    match query::get_photo(state.store.as_ref(), id) {
        Some(photo) => Ok(Json(SuccessEnvelope::new(photo))),
        None => Err(ApiError::not_found("Photo not found")),
    }
}

async fn search_photos(
    State(state): State<AppState>,
    params: Result<Query<PhotoSearchParams>, QueryRejection>,
) -> ApiResult<Vec<PhotoSummary>> {
    let Query(params) = params?;

    let request = validate::photo_search_query(
        params.search_term.filter(|term| !term.is_empty()),
        params.start_date.filter(|date| !date.is_empty()),
        params.end_date.filter(|date| !date.is_empty()),
        validate::parse_int("page", params.page.as_deref())?,
        validate::parse_int("pageSize", params.page_size.as_deref())?,
    )?;

    let page = query::search_photos(state.store.as_ref(), &request);
    let metadata = PageMetadata {
        page: request.page,
        page_size: request.page_size,
        total: page.total,
    };

    Ok(Json(SuccessEnvelope::with_metadata(page.items, metadata)))
}

async fn list_locations(
    State(state): State<AppState>,
    params: Result<Query<LocationListParams>, QueryRejection>,
) -> ApiResult<Vec<LocationSummary>> {
    let Query(params) = params?;

    let request = LocationListQuery {
        region: params.region.filter(|region| !region.is_empty()),
        district: params.district.filter(|district| !district.is_empty()),
        latitude: validate::parse_float("latitude", params.latitude.as_deref())?,
        longitude: validate::parse_float("longitude", params.longitude.as_deref())?,
    };

    let locations = query::list_locations(state.store.as_ref(), state.clock.as_ref(), &request);
    Ok(Json(SuccessEnvelope::new(locations)))
}

async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Location> {
    let id = parse_path_id(&id).map_err(|_| ApiError::validation("Invalid location ID"))?;

    match query::get_location(state.store.as_ref(), id) {
        Some(location) => Ok(Json(SuccessEnvelope::new(location))),
        None => Err(ApiError::not_found("Location not found")),
    }
}

fn parse_path_id(raw: &str) -> Result<u32, ValidationError> {
    let id = validate::parse_int("id", Some(raw))?
        .ok_or_else(|| ValidationError::new("id", "id is required"))?;
    validate::resource_id("id", id)
}
