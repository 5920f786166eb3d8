//! Models module for the page builder
//!
//! This module contains the data model the builder operates on: the cell
//! arena, content blocks with their data bindings, product variants for the
//! attribute selector, and the page document that wraps them.

pub mod ids;
pub mod cell;
pub mod tree;
pub mod block;
pub mod binding;
pub mod variant;
pub mod document;
pub mod serde_helpers;

// Re-export commonly used types
pub use ids::{BlockId, CellId};
pub use cell::{clamp_ratio, is_leaf, Cell, SplitDirection, DEFAULT_SPLIT_RATIO, MAX_SPLIT_RATIO, MIN_SPLIT_RATIO};
pub use tree::CellTree;
pub use block::{BackgroundColor, Block, BlockContent, BlockType};
pub use binding::{DataBinding, SourceType};
pub use variant::{match_variant, Product, ProductAttribute, ProductVariant, Selection};
pub use document::{slugify, PageDocument, PageMetadataPatch};
