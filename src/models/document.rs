//! The page document: the save/load unit of the builder

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use super::tree::CellTree;

lazy_static! {
    static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^a-z0-9]+").expect("static slug pattern");
}

/// Normalise free text into a URL slug (`"Summer Sale!"` → `"summer-sale"`)
pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let slug = NON_SLUG_CHARS.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug.to_string()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SeoMetadata {
    pub meta_title: String,
    pub meta_description: String,
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
    Auto,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeSettings {
    pub primary_color: String,
    pub secondary_color: String,
    pub background_color: String,
    pub font_family: String,
    pub color_scheme: ColorScheme,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            primary_color: "#111827".to_string(),
            secondary_color: "#6b7280".to_string(),
            background_color: "#ffffff".to_string(),
            font_family: "inherit".to_string(),
            color_scheme: ColorScheme::Light,
        }
    }
}

/// Page margins in pixels
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MarginSettings {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
}

impl Default for MarginSettings {
    fn default() -> Self {
        Self {
            top: 0,
            right: 16,
            bottom: 0,
            left: 16,
            max_width: Some(1200),
        }
    }
}

/// Missing or null `gridCells` falls back to one empty leaf root
fn deserialize_grid_cells<'de, D>(deserializer: D) -> Result<CellTree, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<CellTree>::deserialize(deserializer)?.unwrap_or_else(CellTree::with_single_root))
}

/// A builder page
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageDocument {
    /// Server-assigned id; `None` until first save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub slug: String,

    #[serde(default)]
    pub is_published: bool,

    #[serde(default)]
    pub seo: SeoMetadata,

    #[serde(default)]
    pub theme: ThemeSettings,

    #[serde(default)]
    pub margins: MarginSettings,

    #[serde(default = "CellTree::with_single_root", deserialize_with = "deserialize_grid_cells")]
    pub grid_cells: CellTree,
}

impl PageDocument {
    /// Minimal "new page": title, derived slug, one empty root cell
    pub fn new_page(title: &str) -> Self {
        Self {
            id: None,
            title: title.to_string(),
            slug: slugify(title),
            is_published: false,
            seo: SeoMetadata::default(),
            theme: ThemeSettings::default(),
            margins: MarginSettings::default(),
            grid_cells: CellTree::with_single_root(),
        }
    }

    /// Set the slug, normalising it
    pub fn set_slug(&mut self, slug: &str) {
        self.slug = slugify(slug);
    }
}

/// Partial update of page metadata; absent fields are left alone
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PageMetadataPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub is_published: Option<bool>,
    pub seo: Option<SeoMetadata>,
    pub theme: Option<ThemeSettings>,
    pub margins: Option<MarginSettings>,
}

impl PageMetadataPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn apply_to(self, page: &mut PageDocument) {
        if let Some(title) = self.title {
            page.title = title;
        }
        if let Some(slug) = self.slug {
            page.set_slug(&slug);
        }
        if let Some(published) = self.is_published {
            page.is_published = published;
        }
        if let Some(seo) = self.seo {
            page.seo = seo;
        }
        if let Some(theme) = self.theme {
            page.theme = theme;
        }
        if let Some(margins) = self.margins {
            page.margins = margins;
        }
    }
}
