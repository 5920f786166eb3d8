//! Content blocks placed inside leaf cells
//!
//! Each block type has a fixed content shape. On the wire a block is
//! `{ blockId, type, content, padding, backgroundColor }`; in memory the
//! `type`/`content` pair is a single [`BlockContent`] sum type so default
//! construction and validation are exhaustive matches.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::binding::DataBinding;
use super::ids::BlockId;

fn default_width() -> String {
    "100%".to_string()
}

// ============================================================================
// Block types
// ============================================================================

/// The known block types
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum BlockType {
    Text,
    Image,
    Button,
    Video,
    MediaGallery,
    ProductList,
    ProductAttributeSelector,
}

impl BlockType {
    pub const ALL: [BlockType; 7] = [
        BlockType::Text,
        BlockType::Image,
        BlockType::Button,
        BlockType::Video,
        BlockType::MediaGallery,
        BlockType::ProductList,
        BlockType::ProductAttributeSelector,
    ];

    /// Wire name of this type
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Text => "text",
            BlockType::Image => "image",
            BlockType::Button => "button",
            BlockType::Video => "video",
            BlockType::MediaGallery => "mediaGallery",
            BlockType::ProductList => "productList",
            BlockType::ProductAttributeSelector => "productAttributeSelector",
        }
    }

    /// Parse a wire name; `None` for unknown types
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == name)
    }
}

// ============================================================================
// Per-type content
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TextContent {
    /// Rich-text HTML
    pub html: String,
    pub align: TextAlign,
    pub font_size: u16,
    pub color: String,
    pub width: String,
    pub data_binding: DataBinding,
}

impl Default for TextContent {
    fn default() -> Self {
        Self {
            html: "<p>Enter your text here</p>".to_string(),
            align: TextAlign::Left,
            font_size: 16,
            color: "#000000".to_string(),
            width: default_width(),
            data_binding: DataBinding::static_binding(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    #[default]
    Cover,
    Contain,
    Fill,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageContent {
    pub url: String,
    pub alt: String,
    pub fit: ImageFit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub width: String,
    pub data_binding: DataBinding,
}

impl Default for ImageContent {
    fn default() -> Self {
        Self {
            url: String::new(),
            alt: String::new(),
            fit: ImageFit::Cover,
            link: None,
            width: default_width(),
            data_binding: DataBinding::static_binding(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VideoSource {
    #[default]
    Embed,
    File,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoContent {
    pub url: String,
    pub source: VideoSource,
    pub controls: bool,
    pub autoplay: bool,
    pub muted: bool,
    #[serde(rename = "loop")]
    pub looped: bool,
    pub width: String,
    pub data_binding: DataBinding,
}

impl Default for VideoContent {
    fn default() -> Self {
        Self {
            url: String::new(),
            source: VideoSource::Embed,
            controls: true,
            autoplay: false,
            muted: false,
            looped: false,
            width: default_width(),
            data_binding: DataBinding::static_binding(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    #[default]
    Primary,
    Secondary,
    Outline,
    Link,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonContent {
    /// Label; may contain `{{field}}` placeholders when bound
    pub label: String,
    pub link: String,
    pub style: ButtonStyle,
    pub size: ButtonSize,
    pub width: String,
    pub data_binding: DataBinding,
}

impl Default for ButtonContent {
    fn default() -> Self {
        Self {
            label: "Click here".to_string(),
            link: "#".to_string(),
            style: ButtonStyle::Primary,
            size: ButtonSize::Medium,
            width: "auto".to_string(),
            data_binding: DataBinding::static_binding(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaItem {
    pub kind: MediaKind,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub alt: String,
}

/// How a gallery presents its items
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum GalleryDisplay {
    #[default]
    CarouselThumbnails,
    CarouselDots,
    Slideshow,
    SlideshowMinimal,
    Grid,
}

impl GalleryDisplay {
    pub fn autoplays(&self) -> bool {
        matches!(self, GalleryDisplay::Slideshow | GalleryDisplay::SlideshowMinimal)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GalleryTransition {
    #[default]
    Slide,
    Fade,
    None,
}

pub const MIN_AUTOPLAY_INTERVAL_MS: u32 = 1000;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaGalleryContent {
    pub items: Vec<MediaItem>,
    pub display: GalleryDisplay,
    pub transition: GalleryTransition,
    pub autoplay_interval_ms: u32,
    pub width: String,
    pub data_binding: DataBinding,
}

impl Default for MediaGalleryContent {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            display: GalleryDisplay::CarouselThumbnails,
            transition: GalleryTransition::Slide,
            autoplay_interval_ms: 5000,
            width: default_width(),
            data_binding: DataBinding::static_list_binding(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    pub tags: Vec<String>,
    pub limit: u32,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category: None,
            collection: None,
            tags: Vec::new(),
            limit: 8,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProductDisplay {
    #[default]
    Grid,
    List,
    Carousel,
}

pub const MAX_PRODUCT_COLUMNS: u8 = 6;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductListContent {
    pub filter: ProductFilter,
    pub display: ProductDisplay,
    pub columns: u8,
    pub width: String,
    pub data_binding: DataBinding,
}

impl Default for ProductListContent {
    fn default() -> Self {
        Self {
            filter: ProductFilter::default(),
            display: ProductDisplay::Grid,
            columns: 4,
            width: default_width(),
            data_binding: DataBinding::static_binding(),
        }
    }
}

/// Always dynamic: renders variant controls against externally supplied product data
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct AttributeSelectorContent {}

/// Content of a block whose type this build does not know
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UnknownContent {
    #[serde(skip)]
    pub type_name: String,
    pub width: String,
    pub data_binding: DataBinding,
}

impl Default for UnknownContent {
    fn default() -> Self {
        Self {
            type_name: String::new(),
            width: default_width(),
            data_binding: DataBinding::static_binding(),
        }
    }
}

// ============================================================================
// BlockContent
// ============================================================================

/// Type-tagged block content
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum BlockContent {
    Text(TextContent),
    Image(ImageContent),
    Button(ButtonContent),
    Video(VideoContent),
    MediaGallery(MediaGalleryContent),
    ProductList(ProductListContent),
    ProductAttributeSelector(AttributeSelectorContent),
    Unknown(UnknownContent),
}

impl BlockContent {
    /// Default content for a known type
    pub fn default_for(kind: BlockType) -> Self {
        match kind {
            BlockType::Text => BlockContent::Text(TextContent::default()),
            BlockType::Image => BlockContent::Image(ImageContent::default()),
            BlockType::Button => BlockContent::Button(ButtonContent::default()),
            BlockType::Video => BlockContent::Video(VideoContent::default()),
            BlockType::MediaGallery => BlockContent::MediaGallery(MediaGalleryContent::default()),
            BlockType::ProductList => BlockContent::ProductList(ProductListContent::default()),
            BlockType::ProductAttributeSelector => {
                BlockContent::ProductAttributeSelector(AttributeSelectorContent::default())
            }
        }
    }

    /// Default content by wire name; unknown names get a minimal width + static binding
    pub fn default_for_name(name: &str) -> Self {
        match BlockType::parse(name) {
            Some(kind) => Self::default_for(kind),
            None => {
                log::debug!("Unknown block type '{}', using minimal default", name);
                BlockContent::Unknown(UnknownContent {
                    type_name: name.to_string(),
                    ..UnknownContent::default()
                })
            }
        }
    }

    /// Decode content for the given wire type name. Missing fields take defaults.
    pub fn from_json(name: &str, value: Value) -> Result<Self, serde_json::Error> {
        let value = if value.is_null() { Value::Object(Default::default()) } else { value };

        let mut content = match BlockType::parse(name) {
            Some(BlockType::Text) => BlockContent::Text(serde_json::from_value(value)?),
            Some(BlockType::Image) => BlockContent::Image(serde_json::from_value(value)?),
            Some(BlockType::Button) => BlockContent::Button(serde_json::from_value(value)?),
            Some(BlockType::Video) => BlockContent::Video(serde_json::from_value(value)?),
            Some(BlockType::MediaGallery) => BlockContent::MediaGallery(serde_json::from_value(value)?),
            Some(BlockType::ProductList) => BlockContent::ProductList(serde_json::from_value(value)?),
            Some(BlockType::ProductAttributeSelector) => {
                BlockContent::ProductAttributeSelector(AttributeSelectorContent::default())
            }
            None => {
                let mut unknown: UnknownContent = serde_json::from_value(value)?;
                unknown.type_name = name.to_string();
                BlockContent::Unknown(unknown)
            }
        };
        content.normalize();
        Ok(content)
    }

    /// The known type, or `None` for unknown content
    pub fn block_type(&self) -> Option<BlockType> {
        match self {
            BlockContent::Text(_) => Some(BlockType::Text),
            BlockContent::Image(_) => Some(BlockType::Image),
            BlockContent::Button(_) => Some(BlockType::Button),
            BlockContent::Video(_) => Some(BlockType::Video),
            BlockContent::MediaGallery(_) => Some(BlockType::MediaGallery),
            BlockContent::ProductList(_) => Some(BlockType::ProductList),
            BlockContent::ProductAttributeSelector(_) => Some(BlockType::ProductAttributeSelector),
            BlockContent::Unknown(_) => None,
        }
    }

    /// Wire name of the content's type
    pub fn type_name(&self) -> &str {
        match self {
            BlockContent::Unknown(unknown) => &unknown.type_name,
            other => other.block_type().map(|t| t.as_str()).unwrap_or_default(),
        }
    }

    pub fn binding(&self) -> Option<&DataBinding> {
        match self {
            BlockContent::Text(c) => Some(&c.data_binding),
            BlockContent::Image(c) => Some(&c.data_binding),
            BlockContent::Button(c) => Some(&c.data_binding),
            BlockContent::Video(c) => Some(&c.data_binding),
            BlockContent::MediaGallery(c) => Some(&c.data_binding),
            BlockContent::ProductList(c) => Some(&c.data_binding),
            BlockContent::Unknown(c) => Some(&c.data_binding),
            BlockContent::ProductAttributeSelector(_) => None,
        }
    }

    pub fn binding_mut(&mut self) -> Option<&mut DataBinding> {
        match self {
            BlockContent::Text(c) => Some(&mut c.data_binding),
            BlockContent::Image(c) => Some(&mut c.data_binding),
            BlockContent::Button(c) => Some(&mut c.data_binding),
            BlockContent::Video(c) => Some(&mut c.data_binding),
            BlockContent::MediaGallery(c) => Some(&mut c.data_binding),
            BlockContent::ProductList(c) => Some(&mut c.data_binding),
            BlockContent::Unknown(c) => Some(&mut c.data_binding),
            BlockContent::ProductAttributeSelector(_) => None,
        }
    }

    /// Clamp numeric fields into their supported ranges
    pub fn normalize(&mut self) {
        match self {
            BlockContent::Text(c) => c.font_size = c.font_size.clamp(8, 96),
            BlockContent::MediaGallery(c) => {
                c.autoplay_interval_ms = c.autoplay_interval_ms.max(MIN_AUTOPLAY_INTERVAL_MS)
            }
            BlockContent::ProductList(c) => {
                c.columns = c.columns.clamp(1, MAX_PRODUCT_COLUMNS);
                c.filter.limit = c.filter.limit.max(1);
            }
            BlockContent::Image(_)
            | BlockContent::Button(_)
            | BlockContent::Video(_)
            | BlockContent::ProductAttributeSelector(_)
            | BlockContent::Unknown(_) => {}
        }
    }

    /// Shallow-merge a partial JSON object over this content.
    ///
    /// Top-level keys of `patch` replace the corresponding keys; the type
    /// never changes.
    pub fn merged(&self, patch: &Value) -> Result<Self, String> {
        let Value::Object(patch) = patch else {
            return Err("content patch must be an object".to_string());
        };

        let mut current = serde_json::to_value(self).map_err(|e| e.to_string())?;
        if let Value::Object(fields) = &mut current {
            for (key, value) in patch {
                fields.insert(key.clone(), value.clone());
            }
        }

        Self::from_json(self.type_name(), current).map_err(|e| e.to_string())
    }
}

// ============================================================================
// Block
// ============================================================================

/// Background color, optionally split into light/dark variants
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum BackgroundColor {
    Solid(String),
    Themed { light: String, dark: String },
}

impl BackgroundColor {
    /// Color for the active color scheme
    pub fn for_scheme(&self, dark: bool) -> &str {
        match self {
            BackgroundColor::Solid(color) => color,
            BackgroundColor::Themed { light, dark: dark_color } => {
                if dark {
                    dark_color
                } else {
                    light
                }
            }
        }
    }
}

/// A content unit inside a leaf cell
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(try_from = "RawBlock")]
pub struct Block {
    pub id: BlockId,
    pub content: BlockContent,
    pub padding: Option<u32>,
    pub background_color: Option<BackgroundColor>,
}

impl Block {
    /// New block of a known type with default content
    pub fn new(kind: BlockType) -> Self {
        Self::with_content(BlockContent::default_for(kind))
    }

    /// New block from a wire type name (unknown names get minimal content)
    pub fn from_type_name(name: &str) -> Self {
        Self::with_content(BlockContent::default_for_name(name))
    }

    pub fn with_content(content: BlockContent) -> Self {
        Self {
            id: BlockId::generate(),
            content,
            padding: None,
            background_color: None,
        }
    }

    pub fn block_type(&self) -> Option<BlockType> {
        self.content.block_type()
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Block", 5)?;
        state.serialize_field("blockId", &self.id)?;
        state.serialize_field("type", self.content.type_name())?;
        state.serialize_field("content", &self.content)?;
        state.serialize_field("padding", &self.padding)?;
        state.serialize_field("backgroundColor", &self.background_color)?;
        state.end()
    }
}

/// Wire shape of a block before its content is decoded
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBlock {
    block_id: BlockId,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    content: Value,
    #[serde(default)]
    padding: Option<u32>,
    #[serde(default)]
    background_color: Option<BackgroundColor>,
}

impl TryFrom<RawBlock> for Block {
    type Error = String;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        let content = BlockContent::from_json(&raw.type_name, raw.content)
            .map_err(|e| format!("block {}: {}", raw.block_id, e))?;
        Ok(Block {
            id: raw.block_id,
            content,
            padding: raw.padding,
            background_color: raw.background_color,
        })
    }
}
