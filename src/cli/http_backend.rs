use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::models::{
    Category, ErrorEnvelope, Location, LocationListQuery, LocationSummary, Photo, PhotoListQuery,
    PhotoPage, PhotoSearchQuery, PhotoSummary, SuccessEnvelope,
};

const API_PREFIX: &str = "/api/v1/external";

/// HTTP client backend that delegates queries to a running
/// `alemassas serve` instance.
pub struct HttpSiteBackend {
    client: Client,
    base_url: String,
}

impl HttpSiteBackend {
    /// Create a new HTTP backend targeting the given base URL
    /// (e.g. "http://127.0.0.1:3000").
    pub fn new<S: Into<String>>(base_url: S) -> Result<Self> {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client, base_url })
    }

    /// `GET /gallery/categories`.
    pub fn categories(&self) -> Result<Vec<Category>> {
        self.get_found("/gallery/categories", &[])
    }

    /// `GET /gallery/photos`, reassembled into a `PhotoPage`.
    pub fn photos(&self, query: &PhotoListQuery) -> Result<PhotoPage> {
        let mut params = page_params(query.page, query.page_size);
        if let Some(category_id) = query.category_id {
            params.push(("categoryId", category_id.to_string()));
        }

        let envelope = self.get_envelope_found::<Vec<PhotoSummary>>("/gallery/photos", &params)?;
        Ok(into_page(envelope))
    }

    /// `GET /gallery/photos/:id`; `None` when the server reports 404.
    pub fn photo(&self, id: u32) -> Result<Option<Photo>> {
        let envelope = self.get_envelope::<Photo>(&format!("/gallery/photos/{id}"), &[])?;
        Ok(envelope.map(|e| e.data))
    }

    /// `GET /gallery/search`, reassembled into a `PhotoPage`.
    pub fn search_photos(&self, query: &PhotoSearchQuery) -> Result<PhotoPage> {
        let mut params = page_params(query.page, query.page_size);
        if let Some(term) = &query.search_term {
            params.push(("searchTerm", term.clone()));
        }
        if let Some(start) = &query.start_date {
            params.push(("startDate", start.clone()));
        }
        if let Some(end) = &query.end_date {
            params.push(("endDate", end.clone()));
        }

        let envelope = self.get_envelope_found::<Vec<PhotoSummary>>("/gallery/search", &params)?;
        Ok(into_page(envelope))
    }

    /// `GET /location`.
    pub fn locations(&self, query: &LocationListQuery) -> Result<Vec<LocationSummary>> {
        let mut params = Vec::new();
        if let Some(region) = &query.region {
            params.push(("region", region.clone()));
        }
        if let Some(district) = &query.district {
            params.push(("district", district.clone()));
        }
        if let Some(latitude) = query.latitude {
            params.push(("latitude", latitude.to_string()));
        }
        if let Some(longitude) = query.longitude {
            params.push(("longitude", longitude.to_string()));
        }

        self.get_found("/location", &params)
    }

    /// `GET /location/:id`; `None` when the server reports 404.
    pub fn location(&self, id: u32) -> Result<Option<Location>> {
        let envelope = self.get_envelope::<Location>(&format!("/location/{id}"), &[])?;
        Ok(envelope.map(|e| e.data))
    }

    fn get_found<R>(&self, path: &str, params: &[(&str, String)]) -> Result<R>
    where
        R: DeserializeOwned,
    {
        Ok(self.get_envelope_found::<R>(path, params)?.data)
    }

    fn get_envelope_found<R>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<SuccessEnvelope<R>>
    where
        R: DeserializeOwned,
    {
        match self.get_envelope(path, params)? {
            Some(envelope) => Ok(envelope),
            None => bail!("server returned not found for {}", self.url_for(path)),
        }
    }

    fn get_envelope<R>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Option<SuccessEnvelope<R>>>
    where
        R: DeserializeOwned,
    {
        let url = self.url_for(path);
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .with_context(|| format!("failed to send request to {}", url))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            let message = response
                .json::<ErrorEnvelope>()
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| status.to_string());
            bail!("server returned error for {}: {}", url, message);
        }

        let envelope = response
            .json::<SuccessEnvelope<R>>()
            .context("failed to decode JSON response from server")?;

        Ok(Some(envelope))
    }

    fn url_for(&self, path: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            API_PREFIX,
            path.trim_start_matches('/')
        )
    }
}

fn page_params(page: usize, page_size: usize) -> Vec<(&'static str, String)> {
    vec![
        ("page", page.to_string()),
        ("pageSize", page_size.to_string()),
    ]
}

fn into_page(envelope: SuccessEnvelope<Vec<PhotoSummary>>) -> PhotoPage {
    let total = envelope
        .metadata
        .map(|metadata| metadata.total)
        .unwrap_or(envelope.data.len());

    PhotoPage {
        items: envelope.data,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PageMetadata;

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let backend = HttpSiteBackend::new("http://127.0.0.1:3000/").expect("backend");
        assert_eq!(
            backend.url_for("/gallery/photos"),
            "http://127.0.0.1:3000/api/v1/external/gallery/photos"
        );
    }

    #[test]
    fn page_total_comes_from_metadata() {
        let envelope = SuccessEnvelope::with_metadata(
            Vec::new(),
            PageMetadata {
                page: 3,
                page_size: 2,
                total: 5,
            },
        );

        let page = into_page(envelope);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 5);
    }
}
