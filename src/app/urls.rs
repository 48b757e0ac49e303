//! URL layout of a published catalog
//!
//! Everything lives under one base URL:
//! - index: `{base}/content/index.json`
//! - content body: `{base}/content/{file_path}`
//! - translation: `{base}/translations/{language}/{content_id}.json`

use url::Url;

use crate::constants::layout;
use crate::errors::{CatalogError, CatalogResult};

/// Builds request URLs from a catalog base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlLayout {
    base: String,
}

impl UrlLayout {
    /// Creates a layout rooted at `base`
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidUrl` unless `base` is an absolute
    /// http(s) URL
    pub fn new(base: &str) -> CatalogResult<Self> {
        let trimmed = base.trim().trim_end_matches('/');
        let parsed = parse(trimmed)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CatalogError::InvalidUrl {
                url: trimmed.to_string(),
                error: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Self {
            base: trimmed.to_string(),
        })
    }

    /// Base URL without a trailing slash
    pub fn base(&self) -> &str {
        &self.base
    }

    /// URL of the catalog index
    pub fn index_url(&self) -> CatalogResult<Url> {
        parse(&format!(
            "{}/{}/{}",
            self.base,
            layout::CONTENT_DIR,
            layout::INDEX_FILE
        ))
    }

    /// URL of a content body, from the item's relative file path
    pub fn content_url(&self, file_path: &str) -> CatalogResult<Url> {
        parse(&format!(
            "{}/{}/{}",
            self.base,
            layout::CONTENT_DIR,
            file_path
        ))
    }

    /// URL of one translation document
    pub fn translation_url(&self, language: &str, content_id: &str) -> CatalogResult<Url> {
        parse(&format!(
            "{}/{}/{}/{}.{}",
            self.base,
            layout::TRANSLATIONS_DIR,
            language,
            content_id,
            layout::TRANSLATION_EXTENSION
        ))
    }
}

fn parse(raw: &str) -> CatalogResult<Url> {
    Url::parse(raw).map_err(|e| CatalogError::InvalidUrl {
        url: raw.to_string(),
        error: e.to_string(),
    })
}
