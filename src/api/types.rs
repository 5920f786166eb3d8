//! Shared result types for the WASM API

use serde::{Deserialize, Serialize};

use crate::layout::drop::DropTarget;
use crate::models::block::BackgroundColor;
use crate::models::tree::CellTree;
use crate::session::BuilderSession;

/// State handed back to the UI after every layout call
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LayoutUpdate {
    pub grid_cells: CellTree,
    pub can_undo: bool,
    pub can_redo: bool,
    pub is_dirty: bool,
    pub is_saving: bool,
    /// Whether this call changed the document
    pub changed: bool,
    /// Id of a cell or block created by the call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_id: Option<String>,
}

impl LayoutUpdate {
    pub fn from_session(session: &BuilderSession, changed: bool) -> Self {
        Self {
            grid_cells: session.grid_cells().clone(),
            can_undo: session.can_undo(),
            can_redo: session.can_redo(),
            is_dirty: session.is_dirty(),
            is_saving: session.is_saving(),
            changed,
            created_id: None,
        }
    }

    pub fn with_created(mut self, id: impl Into<String>) -> Self {
        self.created_id = Some(id.into());
        self
    }
}

/// Result of a keyboard event
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct KeyOutcome {
    pub handled: bool,
    pub save_requested: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutUpdate>,
}

/// Result of dropping a dragged block
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DropOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<DropTarget>,
    pub layout: LayoutUpdate,
}

/// Block presentation settings sent from the style panel
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockStyle {
    pub background_color: Option<BackgroundColor>,
    pub padding: Option<u32>,
}

/// Binding detail edit sent from the binding panel
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BindingDetails {
    pub field_path: Option<String>,
    pub template_string: Option<String>,
    pub fallback_value: Option<serde_json::Value>,
}
