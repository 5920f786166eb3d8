//! Page persistence
//!
//! The builder core only depends on the `PageStore` contract. The real
//! implementation talks to the REST backend from JavaScript; `MemoryPageStore`
//! behaves like that server (assigns ids, normalises slugs, stores the JSON
//! encoding) and is what the tests run against.

use std::collections::HashMap;

use crate::error::{BuilderError, Result};
use crate::models::document::{slugify, PageDocument};

/// Load/save contract for page documents
pub trait PageStore {
    fn load_page(&self, page_id: &str) -> Result<PageDocument>;

    /// Save `page`, creating it when `page_id` is `None`.
    ///
    /// Returns the stored document, which may differ from the payload; callers
    /// adopt it as the new source of truth.
    fn save_page(&mut self, page_id: Option<&str>, page: &PageDocument) -> Result<PageDocument>;
}

/// Decode a page from its camelCase JSON form
pub fn decode_page(json: &str) -> Result<PageDocument> {
    Ok(serde_json::from_str(json)?)
}

pub fn encode_page(page: &PageDocument) -> Result<String> {
    Ok(serde_json::to_string(page)?)
}

/// In-memory `PageStore` holding encoded pages
#[derive(Debug, Default)]
pub struct MemoryPageStore {
    pages: HashMap<String, String>,
    next_id: u64,
}

impl MemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Raw stored JSON for a page
    pub fn raw(&self, page_id: &str) -> Option<&str> {
        self.pages.get(page_id).map(String::as_str)
    }

    /// Store raw JSON as-is, e.g. a legacy record without `gridCells`
    pub fn insert_raw(&mut self, page_id: &str, json: &str) {
        self.pages.insert(page_id.to_string(), json.to_string());
    }

    fn assign_id(&mut self) -> String {
        self.next_id += 1;
        format!("page-{}", self.next_id)
    }
}

impl PageStore for MemoryPageStore {
    fn load_page(&self, page_id: &str) -> Result<PageDocument> {
        let json = self
            .pages
            .get(page_id)
            .ok_or_else(|| BuilderError::PageNotFound(page_id.to_string()))?;
        decode_page(json)
    }

    fn save_page(&mut self, page_id: Option<&str>, page: &PageDocument) -> Result<PageDocument> {
        let id = match page_id {
            Some(id) if self.pages.contains_key(id) => id.to_string(),
            Some(id) => return Err(BuilderError::PageNotFound(id.to_string())),
            None => self.assign_id(),
        };

        let mut stored = page.clone();
        stored.id = Some(id.clone());
        stored.slug = slugify(if page.slug.is_empty() { &page.title } else { &page.slug });

        let json = encode_page(&stored)?;
        log::debug!("MemoryPageStore: saved {} ({} bytes)", id, json.len());
        self.pages.insert(id, json);
        Ok(stored)
    }
}
