//! Error types for the page builder
//!
//! Structural errors identify the offending id so the UI can surface a
//! notification. Every mutation that returns one of these leaves the input
//! tree untouched.

use thiserror::Error;

use crate::models::ids::{BlockId, CellId};

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, BuilderError>;

/// Top-level builder error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuilderError {
    /// No cell with this id exists in the tree
    #[error("Cell not found: {0}")]
    CellNotFound(CellId),

    /// The (cell, block) pair does not resolve
    #[error("Block {block} not found in cell {cell}")]
    BlockNotFound { cell: CellId, block: BlockId },

    /// Operation requires a leaf cell (split, add/move block)
    #[error("Cell {0} is already split; target a leaf cell instead")]
    NotALeaf(CellId),

    /// Operation requires a split cell (resize)
    #[error("Cell {0} is not split")]
    NotSplit(CellId),

    /// A cell references an id that is not in the tree
    #[error("Cell {cell} references missing cell {missing}")]
    DanglingReference { cell: CellId, missing: CellId },

    /// Tree violates the binary-or-leaf / acyclic invariants
    #[error("Invalid cell tree: {0}")]
    InvalidTree(String),

    /// Block content could not be merged or decoded
    #[error("Invalid content for block {block}: {reason}")]
    InvalidContent { block: BlockId, reason: String },

    /// A save is already pending
    #[error("A save is already in progress")]
    SaveInFlight,

    /// A save result arrived with no save pending
    #[error("No save in progress")]
    NoSaveInFlight,

    /// The persistence layer has no page with this id
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// Network or server failure while loading/saving
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// The builder view is not mounted
    #[error("Builder is not mounted")]
    NotMounted,

    /// Malformed builder configuration
    #[error("Invalid builder config: {0}")]
    Config(String),

    /// JSON encode/decode failure
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for BuilderError {
    fn from(err: serde_json::Error) -> Self {
        BuilderError::Serialization(err.to_string())
    }
}
