//! PocketBase catalog source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use showcase_core::schema::CATEGORIES_COLLECTION;
use showcase_core::{Category, Error, Result};

use crate::records::{CategoryRecord, RecordPage, assemble_categories};
use crate::{CatalogSource, FileUrlResolver};

/// Records requested per page when listing categories.
pub const PAGE_SIZE: u32 = 500;

/// Upper bound on pages followed for one listing.
pub const MAX_PAGES: u32 = 100;

/// Field projection for the category query.
pub const CATEGORY_FIELDS: &str = "id,name,sort,expand.products.id,expand.products.name,\
expand.products.icon,expand.products.description,expand.products.sort";

/// Connection settings for the PocketBase CMS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PocketBaseSettings {
    /// Base URL of the CMS, e.g. `http://127.0.0.1:8090`.
    pub api_base: String,

    /// Access token sent as the `Authorization` header.
    pub api_token: String,

    /// Collection that product icons are stored in.
    pub files_collection: String,

    /// Host alias the CMS is reachable under from this process only.
    pub internal_host: String,

    /// Host browsers should use instead of `internal_host`.
    pub public_host: String,

    /// Thumbnail size requested for icons (`WxH`). Empty for originals.
    pub thumb: String,

    /// Request timeout in seconds. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for PocketBaseSettings {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:8090".to_string(),
            api_token: String::new(),
            files_collection: "products".to_string(),
            internal_host: "cms:8090".to_string(),
            public_host: "127.0.0.1:8090".to_string(),
            thumb: "50x50".to_string(),
            timeout_secs: None,
        }
    }
}

impl PocketBaseSettings {
    /// Builds the icon URL resolver described by these settings.
    pub fn file_resolver(&self) -> Result<FileUrlResolver> {
        Ok(
            FileUrlResolver::new(&self.api_base, self.files_collection.clone())?
                .with_thumb(self.thumb.clone())
                .with_host_alias(self.internal_host.clone(), self.public_host.clone()),
        )
    }
}

/// Catalog source backed by the PocketBase records API.
pub struct PocketBaseSource {
    records_url: String,
    api_token: String,
    files: FileUrlResolver,
    client: reqwest::Client,
}

impl PocketBaseSource {
    /// Creates a source from connection settings.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the token is empty or the base URL
    /// is invalid.
    pub fn new(settings: &PocketBaseSettings) -> Result<Self> {
        if settings.api_token.trim().is_empty() {
            return Err(Error::config("Missing CMS_API_TOKEN environment variable"));
        }
        let files = settings.file_resolver()?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::backend_with_source("Failed to build HTTP client", e))?;

        Ok(Self {
            records_url: format!(
                "{}/api/collections/{}/records",
                settings.api_base.trim_end_matches('/'),
                CATEGORIES_COLLECTION
            ),
            api_token: settings.api_token.clone(),
            files,
            client,
        })
    }

    /// URL of the category records endpoint.
    pub fn records_url(&self) -> &str {
        &self.records_url
    }

    async fn fetch_page(&self, page: u32) -> Result<RecordPage<CategoryRecord>> {
        tracing::debug!(page, url = %self.records_url, "Fetching category records");

        let response = self
            .client
            .get(&self.records_url)
            .header(AUTHORIZATION, &self.api_token)
            .query(&[
                ("page", page.to_string().as_str()),
                ("perPage", PAGE_SIZE.to_string().as_str()),
                ("skipTotal", "1"),
                ("expand", "products"),
                ("sort", "sort"),
                ("fields", CATEGORY_FIELDS),
            ])
            .send()
            .await
            .map_err(|e| Error::backend_with_source("Failed to call CMS", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::backend(format!(
                "CMS error {}: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::backend_with_source("Failed to parse CMS response", e))
    }

    /// Fetches every category record, following pages until a short page.
    ///
    /// # Errors
    ///
    /// Fails with a backend error if a page repeats the previous one (the
    /// server ignored `page`) or more than [`MAX_PAGES`] full pages arrive.
    pub async fn fetch_records(&self) -> Result<Vec<CategoryRecord>> {
        let mut records = Vec::new();
        let mut previous_first: Option<String> = None;
        for page in 1..=MAX_PAGES {
            let batch = self.fetch_page(page).await?;
            let count = batch.items.len();
            let first = batch.items.first().map(|r| r.id.clone());
            if page > 1 && first.is_some() && first == previous_first {
                return Err(Error::backend(format!(
                    "CMS returned page {} again for page {page}",
                    page - 1
                )));
            }
            records.extend(batch.items);
            if count < PAGE_SIZE as usize {
                return Ok(records);
            }
            previous_first = first;
        }
        Err(Error::backend(format!(
            "CMS listing exceeded {MAX_PAGES} pages of {PAGE_SIZE} records"
        )))
    }
}

#[async_trait]
impl CatalogSource for PocketBaseSource {
    async fn fetch_categories(&self) -> Result<Vec<Category>> {
        let records = self.fetch_records().await?;
        let categories = assemble_categories(records, &self.files);
        tracing::info!(count = categories.len(), "Loaded categories from CMS");
        Ok(categories)
    }
}
