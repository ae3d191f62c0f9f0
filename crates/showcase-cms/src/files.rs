//! File URL resolution for record attachments.

use reqwest::Url;
use showcase_core::{Error, Result};

/// Builds public thumbnail URLs for files attached to CMS records.
///
/// PocketBase serves files at
/// `{base}/api/files/{collection}/{record_id}/{filename}`, with an optional
/// `thumb=WxH` query for a resized rendition. When the CMS is addressed by an
/// internal hostname (e.g. a container alias) the resolver rewrites it to a
/// host the browser can reach.
#[derive(Debug, Clone)]
pub struct FileUrlResolver {
    base: Url,
    collection: String,
    thumb: Option<String>,
    host_alias: Option<(String, String)>,
}

impl FileUrlResolver {
    /// Creates a resolver for files in `collection` under `api_base`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `api_base` is not an absolute
    /// http(s) URL.
    pub fn new(api_base: &str, collection: impl Into<String>) -> Result<Self> {
        let base = Url::parse(api_base)
            .map_err(|e| Error::config(format!("Invalid CMS base URL '{api_base}': {e}")))?;
        if base.cannot_be_a_base() {
            return Err(Error::config(format!(
                "CMS base URL '{api_base}' cannot hold a path"
            )));
        }
        Ok(Self {
            base,
            collection: collection.into(),
            thumb: None,
            host_alias: None,
        })
    }

    /// Requests a `WxH` thumbnail instead of the original file.
    pub fn with_thumb(mut self, thumb: impl Into<String>) -> Self {
        let thumb = thumb.into();
        self.thumb = (!thumb.is_empty()).then_some(thumb);
        self
    }

    /// Rewrites `internal` (`host:port`) to `public` in every resolved URL.
    pub fn with_host_alias(mut self, internal: impl Into<String>, public: impl Into<String>) -> Self {
        let internal = internal.into();
        self.host_alias = (!internal.is_empty()).then(|| (internal, public.into()));
        self
    }

    /// The collection files are resolved against.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// URL of `filename` attached to `record_id`.
    ///
    /// Returns an empty string when there is no filename.
    pub fn resolve(&self, record_id: &str, filename: Option<&str>) -> String {
        let Some(filename) = filename.filter(|f| !f.is_empty()) else {
            return String::new();
        };

        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "files", self.collection.as_str(), record_id, filename]);
        }
        if let Some(thumb) = &self.thumb {
            url.query_pairs_mut().append_pair("thumb", thumb);
        }

        let url = url.to_string();
        match &self.host_alias {
            Some((internal, public)) => url.replace(internal.as_str(), public),
            None => url,
        }
    }
}
