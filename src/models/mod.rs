//! Shared data models for the gallery and location APIs.
//!
//! These types form the JSON surface used by the HTTP server, the CLI
//! `--format json` output and the data file loaded by the store. Field
//! names are camelCase on the wire.

use serde::{Deserialize, Serialize};
use time::Weekday;

/// Default number of items per page when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: usize = 30;

/// Upper bound accepted for `pageSize` at the API boundary.
pub const MAX_PAGE_SIZE: usize = 30;

/// A named grouping of photos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u32,
    pub name: String,
    pub description: String,
    /// Stored count shown by the frontend; not derived from the photo
    /// collection.
    pub photo_count: u32,
}

/// Full photo record as stored and as returned by the detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: u32,
    pub thumbnail_url: String,
    pub full_size_url: String,
    pub title: String,
    pub description: String,
    /// ISO calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub category_id: u32,
    /// Denormalized copy of the owning category's name.
    pub category_name: String,
}

/// List-view projection of a photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoSummary {
    pub id: u32,
    pub thumbnail_url: String,
    pub title: String,
    pub category_id: u32,
    pub category_name: String,
}

impl From<&Photo> for PhotoSummary {
    fn from(photo: &Photo) -> Self {
        Self {
            id: photo.id,
            thumbnail_url: photo.thumbnail_url.clone(),
            title: photo.title.clone(),
            category_id: photo.category_id,
            category_name: photo.category_name.clone(),
        }
    }
}

/// One page of photo summaries plus the pre-pagination match count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoPage {
    pub items: Vec<PhotoSummary>,
    pub total: usize,
}

/// Parameters for listing photos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoListQuery {
    pub category_id: Option<u32>,
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
}

/// Parameters for searching photos by text and date range.
///
/// Dates are kept as the caller supplied them; a bound that does not
/// parse as an ISO calendar date matches no photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoSearchQuery {
    pub search_term: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: usize,
    pub page_size: usize,
}

/// Contact phone for a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phone {
    #[serde(rename = "type")]
    pub kind: String,
    pub number: String,
}

/// Hours that replace the weekday entry on one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialHours {
    /// ISO calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub hours: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Weekly operating hours.
///
/// Each weekday holds `"HH:MM - HH:MM"` (24-hour clock), `"Fechado"`,
/// or nothing at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyHours {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thursday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunday: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub special_dates: Vec<SpecialHours>,
}

impl WeeklyHours {
    /// Raw entry for the given weekday, if any.
    pub fn for_weekday(&self, weekday: Weekday) -> Option<&str> {
        let entry = match weekday {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
            Weekday::Sunday => &self.sunday,
        };
        entry.as_deref()
    }
}

/// Parking details for a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingInfo {
    pub available: bool,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Full location record as stored and as returned by the detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: u32,
    pub name: String,
    pub address: String,
    pub phones: Vec<Phone>,
    pub hours: WeeklyHours,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking: Option<ParkingInfo>,
}

/// List-view projection of a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSummary {
    pub id: u32,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub is_open: bool,
    /// Great-circle distance in kilometers from the caller's
    /// coordinates. Only present when the caller supplied both.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

/// Parameters for listing locations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationListQuery {
    pub region: Option<String>,
    pub district: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

/// Successful HTTP response body.
///
/// ```json
/// { "success": true, "data": [...], "metadata": { "page": 1, "pageSize": 30, "total": 6 } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessEnvelope<T> {
    pub success: bool,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PageMetadata>,
}

impl<T> SuccessEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            metadata: None,
        }
    }

    pub fn with_metadata(data: T, metadata: PageMetadata) -> Self {
        Self {
            success: true,
            data,
            metadata: Some(metadata),
        }
    }
}

/// Error HTTP response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: ErrorBody,
}

/// Machine-readable code plus a human-readable message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
