//! Data models for the published content catalog
//!
//! These types mirror the JSON documents served by the catalog host. Wire
//! field names are snake_case, which matches the Rust field names, so no
//! serde renames are needed.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// The catalog manifest (`content/index.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentIndex {
    /// Schema version of the manifest
    pub version: String,
    /// When the catalog was last published
    pub last_updated: String,
    /// Total number of items the publisher reports
    pub total_content: i64,
    /// Category name to member ids
    pub categories: HashMap<String, CategoryInfo>,
    /// Advisory list of featured ids
    pub featured: Vec<String>,
    /// Ids of recently added items
    pub recent: Vec<String>,
    /// Ids of popular items
    pub popular: Vec<String>,
    /// Language codes translations may exist for
    pub languages: Vec<String>,
    /// Known author names
    pub authors: Vec<String>,
    /// Authoritative, ordered item collection
    pub content_list: Vec<ContentListItem>,
}

/// Membership of a single category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub count: i64,
    pub items: Vec<String>,
}

/// Lightweight catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentListItem {
    pub id: String,
    pub title: String,
    pub category: String,
    pub author: String,
    pub pages: i64,
    pub difficulty: String,
    /// Duration in minutes
    pub duration: i64,
    pub is_featured: bool,
    pub download_count: i64,
    pub rating: f64,
    pub languages_available: Vec<String>,
    /// Path of the full body, relative to the content directory
    pub file_path: String,
}

/// Full content body for one id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub pages: i64,
    pub category: String,
    pub author: String,
    pub language: String,
    pub difficulty: String,
    pub duration: i64,
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
    pub version: String,
    pub is_featured: bool,
    pub download_count: i64,
    pub rating: f64,
    pub metadata: ContentMetadata,
}

/// Attribution and usage notes attached to a content body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentMetadata {
    pub original_source: String,
    pub transliteration: String,
    pub meaning: String,
    pub benefits: Vec<String>,
    pub when_to_use: Vec<String>,
    pub prerequisites: Vec<String>,
}

/// One language rendering of a content item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentTranslation {
    pub content_id: String,
    pub language: String,
    pub title: String,
    pub content: String,
    pub pages: i64,
    pub translator: String,
    pub translation_quality: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A translation attempt that did not produce a translation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslationFailure {
    pub language: String,
    /// Rendered error message
    pub reason: String,
}

/// A content body together with every translation that could be fetched
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentWithTranslations {
    pub content: ContentItem,
    /// Successful translations keyed by language code
    pub translations: BTreeMap<String, ContentTranslation>,
    /// Languages whose translation could not be fetched (diagnostics only)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<TranslationFailure>,
}

impl ContentWithTranslations {
    /// Language codes with an available translation, in sorted order
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.translations.keys().map(String::as_str)
    }
}
