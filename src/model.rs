//! Data model shared by the client, cache, orchestrator and views

use crate::error::FetchError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A person record returned by the character API.
///
/// Only `name`, `birth_year` and `gender` are interpreted; every other field
/// the API sends is kept verbatim in `extra`. The three named fields accept
/// any JSON value: null becomes `""`, other non-strings their JSON text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub birth_year: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub gender: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

impl Character {
    pub fn new(name: &str, birth_year: &str, gender: &str) -> Self {
        Self {
            name: name.to_string(),
            birth_year: birth_year.to_string(),
            gender: gender.to_string(),
            extra: serde_json::Map::new(),
        }
    }
}

/// First page of a successful search.
///
/// `total_count` is never smaller than `items.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub items: Vec<Character>,
    pub has_next: bool,
    pub total_count: usize,
}

impl SearchPage {
    pub fn new(items: Vec<Character>, has_next: bool, total_count: Option<usize>) -> Self {
        let total_count = total_count.unwrap_or(items.len()).max(items.len());
        Self {
            items,
            has_next,
            total_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Outcome of one Data Client call
pub type SearchResult = std::result::Result<SearchPage, FetchError>;

/// Search flow state shown by the views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Success,
    Empty,
    Error,
}

impl UiState {
    /// Success or Empty depending on whether the page has items
    pub fn for_page(page: &SearchPage) -> Self {
        if page.is_empty() {
            UiState::Empty
        } else {
            UiState::Success
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UiState::Idle => "idle",
            UiState::Loading => "loading",
            UiState::Success => "success",
            UiState::Empty => "empty",
            UiState::Error => "error",
        }
    }
}

/// Everything the views need to render one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub query: String,
    pub ui_state: UiState,
    pub characters: Vec<Character>,
    pub selected: Option<Character>,
    pub error_message: String,
    pub has_next_page: bool,
    pub total_count: usize,
}

impl SessionState {
    pub(crate) fn clear_pagination(&mut self) {
        self.has_next_page = false;
        self.total_count = 0;
    }

    pub(crate) fn adopt_page(&mut self, page: &SearchPage) {
        self.characters = page.items.clone();
        self.has_next_page = page.has_next;
        self.total_count = page.total_count;
        self.ui_state = UiState::for_page(page);
        self.error_message.clear();
    }
}
