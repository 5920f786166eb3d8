//! Drop-target resolution for block drag and drop

use serde::Serialize;

use crate::models::ids::{BlockId, CellId};
use crate::models::tree::CellTree;

/// Where a dragged block lands
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DropTarget {
    pub target_cell_id: CellId,
    pub target_index: usize,
}

/// Map the id under the pointer to a landing position.
///
/// A block id lands at that block's position in its cell; a leaf cell id
/// appends. Anything else (split cells, dividers, unknown ids) yields `None`
/// and the drop is ignored.
pub fn resolve_drop(tree: &CellTree, over_id: &str) -> Option<DropTarget> {
    if let Some((cell_id, index)) = tree.find_block(&BlockId::from(over_id)) {
        return Some(DropTarget {
            target_cell_id: cell_id.clone(),
            target_index: index,
        });
    }

    match tree.get(&CellId::from(over_id)) {
        Some(cell) if cell.is_leaf() => Some(DropTarget {
            target_cell_id: cell.cell_id.clone(),
            target_index: cell.blocks.len(),
        }),
        _ => {
            log::trace!("resolve_drop: '{}' is not a drop target", over_id);
            None
        }
    }
}
