//! Grid cells: the nodes of the page layout tree
//!
//! A cell is either a leaf holding content blocks, or a branch split into
//! exactly two children. Children are stored as id references; the owning
//! arena is [`CellTree`](super::tree::CellTree).

use serde::{Deserialize, Serialize};

use super::block::Block;
use super::ids::{BlockId, CellId};
use super::serde_helpers::{deserialize_null_as_default, serialize_option_as_null};

/// Smallest share (percent) the first child of a split may take
pub const MIN_SPLIT_RATIO: f64 = 10.0;
/// Largest share (percent) the first child of a split may take
pub const MAX_SPLIT_RATIO: f64 = 90.0;
/// Ratio given to a freshly split cell
pub const DEFAULT_SPLIT_RATIO: f64 = 50.0;

/// Clamp a split ratio into `[MIN_SPLIT_RATIO, MAX_SPLIT_RATIO]`.
/// Non-finite input falls back to the default ratio.
pub fn clamp_ratio(ratio: f64) -> f64 {
    if !ratio.is_finite() {
        return DEFAULT_SPLIT_RATIO;
    }
    ratio.clamp(MIN_SPLIT_RATIO, MAX_SPLIT_RATIO)
}

fn default_ratio() -> f64 {
    DEFAULT_SPLIT_RATIO
}

/// Split state of a cell.
///
/// `Horizontal` lays the two children side by side (the ratio is the first
/// child's width); `Vertical` stacks them (the ratio is the first child's
/// height).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SplitDirection {
    #[default]
    None,
    Horizontal,
    Vertical,
}

/// A node in the layout tree
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub cell_id: CellId,

    /// Owning cell, `None` for root cells
    #[serde(default, serialize_with = "serialize_option_as_null")]
    pub parent_id: Option<CellId>,

    #[serde(default)]
    pub split: SplitDirection,

    /// Percent of space given to the first child (meaningless on leaves)
    #[serde(default = "default_ratio")]
    pub split_ratio: f64,

    /// Exactly two entries on a branch, empty on a leaf
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub children: Vec<CellId>,

    /// Content blocks, only on leaves
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub blocks: Vec<Block>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<u32>,
}

impl Cell {
    /// A new empty leaf with default presentation
    pub fn leaf(parent_id: Option<CellId>) -> Self {
        Self {
            cell_id: CellId::generate(),
            parent_id,
            split: SplitDirection::None,
            split_ratio: DEFAULT_SPLIT_RATIO,
            children: Vec::new(),
            blocks: Vec::new(),
            background_color: None,
            padding: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.split == SplitDirection::None
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Index of a block within this cell
    pub fn block_index(&self, block_id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == block_id)
    }
}

/// True iff the cell holds content rather than children
pub fn is_leaf(cell: &Cell) -> bool {
    cell.is_leaf()
}
