//! Queries over the cached catalog
//!
//! Every query is a pure, synchronous read of the current index. Results
//! always follow `content_list` order. Id lists on the index (`popular`,
//! `recent`) only decide membership; they never re-rank results. When no
//! index is loaded every query returns an empty result.

use std::collections::HashSet;

use crate::app::cache::CatalogCache;
use crate::app::models::{ContentIndex, ContentListItem};

/// Case-insensitive substring match on title, author, or category
///
/// An empty query matches every item.
pub fn search<'a>(index: &'a ContentIndex, query: &str) -> Vec<&'a ContentListItem> {
    let query = query.to_lowercase();
    index
        .content_list
        .iter()
        .filter(|item| {
            item.title.to_lowercase().contains(&query)
                || item.author.to_lowercase().contains(&query)
                || item.category.to_lowercase().contains(&query)
        })
        .collect()
}

/// Items whose category equals `name` exactly
pub fn by_category<'a>(index: &'a ContentIndex, name: &str) -> Vec<&'a ContentListItem> {
    index
        .content_list
        .iter()
        .filter(|item| item.category == name)
        .collect()
}

/// Items flagged as featured on the item itself
pub fn featured(index: &ContentIndex) -> Vec<&ContentListItem> {
    index
        .content_list
        .iter()
        .filter(|item| item.is_featured)
        .collect()
}

/// Items listed in the index's `popular` ids
pub fn popular(index: &ContentIndex) -> Vec<&ContentListItem> {
    members_of(index, &index.popular)
}

/// Items listed in the index's `recent` ids
pub fn recent(index: &ContentIndex) -> Vec<&ContentListItem> {
    members_of(index, &index.recent)
}

/// First item with the given id
pub fn find_item<'a>(index: &'a ContentIndex, id: &str) -> Option<&'a ContentListItem> {
    index.content_list.iter().find(|item| item.id == id)
}

/// Category names with their published counts, sorted by name
pub fn categories(index: &ContentIndex) -> Vec<(&str, i64)> {
    let mut categories: Vec<(&str, i64)> = index
        .categories
        .iter()
        .map(|(name, info)| (name.as_str(), info.count))
        .collect();
    categories.sort_unstable_by(|a, b| a.0.cmp(b.0));
    categories
}

// Ids that do not resolve to an item are ignored
fn members_of<'a>(index: &'a ContentIndex, ids: &[String]) -> Vec<&'a ContentListItem> {
    let ids: HashSet<&str> = ids.iter().map(String::as_str).collect();
    index
        .content_list
        .iter()
        .filter(|item| ids.contains(item.id.as_str()))
        .collect()
}

fn owned(items: Vec<&ContentListItem>) -> Vec<ContentListItem> {
    items.into_iter().cloned().collect()
}

impl CatalogCache {
    /// See [`search`]
    pub fn search(&self, query: &str) -> Vec<ContentListItem> {
        self.current()
            .map(|index| owned(search(&index, query)))
            .unwrap_or_default()
    }

    /// See [`by_category`]
    pub fn by_category(&self, name: &str) -> Vec<ContentListItem> {
        self.current()
            .map(|index| owned(by_category(&index, name)))
            .unwrap_or_default()
    }

    /// See [`featured`]
    pub fn featured(&self) -> Vec<ContentListItem> {
        self.current()
            .map(|index| owned(featured(&index)))
            .unwrap_or_default()
    }

    /// See [`popular`]
    pub fn popular(&self) -> Vec<ContentListItem> {
        self.current()
            .map(|index| owned(popular(&index)))
            .unwrap_or_default()
    }

    /// See [`recent`]
    pub fn recent(&self) -> Vec<ContentListItem> {
        self.current()
            .map(|index| owned(recent(&index)))
            .unwrap_or_default()
    }

    /// See [`find_item`]
    pub fn find_item(&self, id: &str) -> Option<ContentListItem> {
        self.current()
            .and_then(|index| find_item(&index, id).cloned())
    }

    /// Category names and counts, empty when no index is loaded
    pub fn categories(&self) -> Vec<(String, i64)> {
        self.current()
            .map(|index| {
                categories(&index)
                    .into_iter()
                    .map(|(name, count)| (name.to_string(), count))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Language codes of the current catalog
    pub fn languages(&self) -> Vec<String> {
        self.current()
            .map(|index| index.languages.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use crate::app::models::CategoryInfo;
    use crate::app::transport::MemoryTransport;
    use crate::app::urls::UrlLayout;

    fn item(
        id: &str,
        title: &str,
        category: &str,
        author: &str,
        featured: bool,
    ) -> ContentListItem {
        ContentListItem {
            id: id.to_string(),
            title: title.to_string(),
            category: category.to_string(),
            author: author.to_string(),
            pages: 1,
            difficulty: "beginner".to_string(),
            duration: 10,
            is_featured: featured,
            download_count: 0,
            rating: 4.0,
            languages_available: vec![],
            file_path: format!("{}.json", id),
        }
    }

    fn index(items: Vec<ContentListItem>, popular: &[&str], recent: &[&str]) -> ContentIndex {
        let mut categories = HashMap::new();
        for entry in &items {
            let info = categories
                .entry(entry.category.clone())
                .or_insert(CategoryInfo {
                    count: 0,
                    items: vec![],
                });
            info.count += 1;
            info.items.push(entry.id.clone());
        }
        ContentIndex {
            version: "1".to_string(),
            last_updated: "2024-01-01".to_string(),
            total_content: items.len() as i64,
            categories,
            featured: vec![],
            recent: recent.iter().map(|s| s.to_string()).collect(),
            popular: popular.iter().map(|s| s.to_string()).collect(),
            languages: vec!["hi".to_string()],
            authors: vec![],
            content_list: items,
        }
    }

    fn ids(items: &[&ContentListItem]) -> Vec<String> {
        items.iter().map(|i| i.id.clone()).collect()
    }

    fn sample() -> ContentIndex {
        index(
            vec![
                item("a", "Sun Salutation", "yoga", "Iyengar", true),
                item("b", "Breath Awareness", "meditation", "Hanh", false),
                item("c", "Warrior Pose", "yoga", "Desikachar", true),
                item("d", "Body Scan", "meditation", "Kabat-Zinn", false),
            ],
            &["d", "b"],
            &["c", "a", "missing"],
        )
    }

    #[test]
    fn test_search_matches_title_author_and_category() {
        let index = sample();
        assert_eq!(ids(&search(&index, "salutation")), vec!["a"]);
        assert_eq!(ids(&search(&index, "HANH")), vec!["b"]);
        assert_eq!(ids(&search(&index, "Yoga")), vec!["a", "c"]);
        assert!(search(&index, "pilates").is_empty());
    }

    #[test]
    fn test_empty_search_returns_whole_catalog_in_order() {
        let index = sample();
        assert_eq!(ids(&search(&index, "")), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_category_match_is_exact() {
        let index = sample();
        assert_eq!(ids(&by_category(&index, "meditation")), vec!["b", "d"]);
        assert!(by_category(&index, "Meditation").is_empty());
        assert!(by_category(&index, "medit").is_empty());
    }

    #[test]
    fn test_featured_uses_item_flag_only() {
        let mut index = sample();
        index.featured = vec!["b".to_string()];
        assert_eq!(ids(&featured(&index)), vec!["a", "c"]);
    }

    #[test]
    fn test_popular_and_recent_keep_catalog_order() {
        let index = sample();
        assert_eq!(ids(&popular(&index)), vec!["b", "d"]);
        assert_eq!(ids(&recent(&index)), vec!["a", "c"]);
    }

    #[test]
    fn test_find_item_and_categories() {
        let index = sample();
        assert_eq!(find_item(&index, "c").unwrap().title, "Warrior Pose");
        assert!(find_item(&index, "z").is_none());
        assert_eq!(categories(&index), vec![("meditation", 2), ("yoga", 2)]);
    }

    #[test]
    fn test_scenario_two_items() {
        let index = index(
            vec![
                item("A", "Alpha", "yoga", "X", true),
                item("B", "Beta", "meditation", "Y", false),
            ],
            &["B"],
            &[],
        );
        assert_eq!(ids(&search(&index, "yoga")), vec!["A"]);
        assert_eq!(ids(&featured(&index)), vec!["A"]);
        assert_eq!(ids(&popular(&index)), vec!["B"]);
        assert_eq!(ids(&by_category(&index, "meditation")), vec!["B"]);
    }

    #[test]
    fn test_cache_queries_without_index_are_empty() {
        let cache = CatalogCache::new(
            Arc::new(MemoryTransport::new()),
            UrlLayout::new("https://catalog.test").unwrap(),
        );
        assert!(cache.search("").is_empty());
        assert!(cache.by_category("yoga").is_empty());
        assert!(cache.featured().is_empty());
        assert!(cache.popular().is_empty());
        assert!(cache.recent().is_empty());
        assert!(cache.find_item("a").is_none());
        assert!(cache.categories().is_empty());
        assert!(cache.languages().is_empty());
    }

    #[test]
    fn test_cache_queries_return_owned_items() {
        let cache = CatalogCache::new(
            Arc::new(MemoryTransport::new()),
            UrlLayout::new("https://catalog.test").unwrap(),
        );
        cache.replace(sample());

        let popular: Vec<String> = cache.popular().into_iter().map(|i| i.id).collect();
        assert_eq!(popular, vec!["b", "d"]);
        assert_eq!(cache.search("").len(), 4);
        assert_eq!(cache.languages(), vec!["hi"]);
    }
}
