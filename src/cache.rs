//! In-memory result cache keyed by normalized query
//!
//! Only successful pages are stored. There is no eviction: the dataset behind
//! the API is static, so an entry stays valid for the whole session.

use crate::model::SearchPage;
use std::collections::HashMap;

/// Cache key for a query: trimmed and lowercased
pub fn normalize_key(query: &str) -> String {
    query.trim().to_lowercase()
}

#[derive(Debug, Default)]
pub struct ResultCache {
    entries: HashMap<String, SearchPage>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, query: &str) -> Option<&SearchPage> {
        self.entries.get(&normalize_key(query))
    }

    /// Store a successful page. Later puts for the same key replace it.
    pub fn put(&mut self, query: &str, page: SearchPage) {
        self.entries.insert(normalize_key(query), page);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Character;

    #[test]
    fn lookups_ignore_case() {
        let mut cache = ResultCache::new();
        let page = SearchPage::new(vec![Character::new("Luke Skywalker", "19BBY", "male")], false, Some(1));
        cache.put("Luke", page.clone());

        assert_eq!(cache.get("luke"), Some(&page));
        assert_eq!(cache.get("LUKE"), Some(&page));
        assert!(cache.get("leia").is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn empty_pages_are_cached_too() {
        let mut cache = ResultCache::new();
        cache.put("zzz", SearchPage::new(Vec::new(), false, Some(0)));
        assert!(cache.get("ZZZ").is_some());
        assert!(cache.get("zzz").unwrap().is_empty());
    }
}
