//! Mutations over the cell tree
//!
//! Every operation takes the current tree by reference and returns a new one.
//! The work happens on a clone, so a failed operation leaves the caller's tree
//! exactly as it was. Committing the result into history is the caller's job.

use serde_json::Value;

use crate::error::{BuilderError, Result};
use crate::models::block::{BackgroundColor, Block};
use crate::models::binding::{DataBinding, SourceType};
use crate::models::cell::{clamp_ratio, Cell, SplitDirection, DEFAULT_SPLIT_RATIO};
use crate::models::ids::{BlockId, CellId};
use crate::models::tree::CellTree;

/// Axis for a split request
#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl From<Orientation> for SplitDirection {
    fn from(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Horizontal => SplitDirection::Horizontal,
            Orientation::Vertical => SplitDirection::Vertical,
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn leaf_mut<'a>(tree: &'a mut CellTree, cell_id: &CellId) -> Result<&'a mut Cell> {
    let cell = tree.find_mut(cell_id)?;
    if !cell.is_leaf() {
        return Err(BuilderError::NotALeaf(cell_id.clone()));
    }
    Ok(cell)
}

fn block_mut<'a>(cell: &'a mut Cell, block_id: &BlockId) -> Result<&'a mut Block> {
    let cell_id = cell.cell_id.clone();
    cell.blocks
        .iter_mut()
        .find(|b| &b.id == block_id)
        .ok_or_else(|| BuilderError::BlockNotFound { cell: cell_id, block: block_id.clone() })
}

fn block_not_found(cell_id: &CellId, block_id: &BlockId) -> BuilderError {
    BuilderError::BlockNotFound { cell: cell_id.clone(), block: block_id.clone() }
}

// ============================================================================
// Structure
// ============================================================================

/// Append a fresh empty leaf to the root set
pub fn add_root_cell(tree: &CellTree) -> (CellTree, CellId) {
    let mut next = tree.clone();
    let id = next.push_root(Cell::leaf(None));
    log::debug!("add_root_cell: {}", id);
    (next, id)
}

/// Turn a leaf into a branch with two new leaf children.
///
/// The first child takes over the leaf's blocks, background and padding; the
/// second starts empty.
pub fn split_cell(tree: &CellTree, cell_id: &CellId, orientation: Orientation) -> Result<CellTree> {
    let mut next = tree.clone();

    let parent = leaf_mut(&mut next, cell_id)?;
    let mut first = Cell::leaf(Some(cell_id.clone()));
    let second = Cell::leaf(Some(cell_id.clone()));

    first.blocks = std::mem::take(&mut parent.blocks);
    first.background_color = parent.background_color.take();
    first.padding = parent.padding.take();

    parent.split = orientation.into();
    parent.split_ratio = DEFAULT_SPLIT_RATIO;
    parent.children = vec![first.cell_id.clone(), second.cell_id.clone()];

    log::debug!(
        "split_cell: {} {:?} -> [{}, {}] ({} block(s) inherited)",
        cell_id,
        orientation,
        first.cell_id,
        second.cell_id,
        first.blocks.len()
    );

    next.insert(first);
    next.insert(second);
    Ok(next)
}

/// Remove a cell and all its descendants.
///
/// Removing one child of a split collapses the parent: it takes over the
/// surviving child's structure and content while keeping its own id.
pub fn delete_cell(tree: &CellTree, cell_id: &CellId) -> Result<CellTree> {
    let mut next = tree.clone();

    let parent_id = next.find(cell_id)?.parent_id.clone();
    let removal = next.descendants(cell_id)?;
    for id in &removal {
        next.remove(id);
    }

    match parent_id {
        None => {
            next.remove_root(cell_id);
            log::debug!("delete_cell: root {} ({} cell(s) removed)", cell_id, removal.len());
        }
        Some(parent_id) => {
            let remaining = {
                let parent = next.find_mut(&parent_id).map_err(|_| BuilderError::DanglingReference {
                    cell: cell_id.clone(),
                    missing: parent_id.clone(),
                })?;
                parent.children.retain(|c| c != cell_id);
                parent.children.len()
            };

            match remaining {
                1 => collapse_into_parent(&mut next, &parent_id)?,
                0 => {
                    return Err(BuilderError::InvalidTree(format!(
                        "split cell {} had a single child {}",
                        parent_id, cell_id
                    )))
                }
                _ => {}
            }
            log::debug!(
                "delete_cell: {} under {} ({} cell(s) removed)",
                cell_id,
                parent_id,
                removal.len()
            );
        }
    }

    Ok(next)
}

/// Replace a single-child branch with its surviving child's contents
fn collapse_into_parent(tree: &mut CellTree, parent_id: &CellId) -> Result<()> {
    let survivor_id = tree.find(parent_id)?.children[0].clone();
    let survivor = tree.remove(&survivor_id).ok_or_else(|| BuilderError::DanglingReference {
        cell: parent_id.clone(),
        missing: survivor_id.clone(),
    })?;

    for grandchild in &survivor.children {
        tree.find_mut(grandchild)?.parent_id = Some(parent_id.clone());
    }

    let parent = tree.find_mut(parent_id)?;
    parent.split = survivor.split;
    parent.split_ratio = survivor.split_ratio;
    parent.children = survivor.children;
    parent.blocks = survivor.blocks;
    parent.background_color = survivor.background_color;
    parent.padding = survivor.padding;

    log::debug!("collapse: {} absorbed {}", parent_id, survivor_id);
    Ok(())
}

/// Set the split ratio of a branch, clamped into [10, 90]
pub fn resize_cell(tree: &CellTree, cell_id: &CellId, ratio: f64) -> Result<CellTree> {
    let mut next = tree.clone();
    let cell = next.find_mut(cell_id)?;
    if cell.is_leaf() {
        return Err(BuilderError::NotSplit(cell_id.clone()));
    }

    let clamped = clamp_ratio(ratio);
    if clamped != ratio {
        log::debug!("resize_cell: ratio {} clamped to {}", ratio, clamped);
    }
    cell.split_ratio = clamped;
    Ok(next)
}

/// Update a cell's presentation attributes (structure untouched)
pub fn set_cell_style(
    tree: &CellTree,
    cell_id: &CellId,
    background_color: Option<String>,
    padding: Option<u32>,
) -> Result<CellTree> {
    let mut next = tree.clone();
    let cell = next.find_mut(cell_id)?;
    cell.background_color = background_color;
    cell.padding = padding;
    Ok(next)
}

// ============================================================================
// Blocks
// ============================================================================

/// Append a block to a leaf cell
pub fn add_block(tree: &CellTree, cell_id: &CellId, block: Block) -> Result<CellTree> {
    let mut next = tree.clone();
    let cell = leaf_mut(&mut next, cell_id)?;
    log::debug!("add_block: {} ({}) -> {}", block.id, block.content.type_name(), cell_id);
    cell.blocks.push(block);
    Ok(next)
}

/// Append a block with default content for `type_name`; returns the new block id
pub fn add_block_of_type(tree: &CellTree, cell_id: &CellId, type_name: &str) -> Result<(CellTree, BlockId)> {
    let block = Block::from_type_name(type_name);
    let block_id = block.id.clone();
    Ok((add_block(tree, cell_id, block)?, block_id))
}

/// Replace a block wholesale; the id is preserved
pub fn update_block(tree: &CellTree, cell_id: &CellId, block_id: &BlockId, mut block: Block) -> Result<CellTree> {
    let mut next = tree.clone();
    let cell = next.find_mut(cell_id)?;
    let slot = block_mut(cell, block_id)?;
    block.id = block_id.clone();
    *slot = block;
    Ok(next)
}

/// Remove a block from a cell
pub fn delete_block(tree: &CellTree, cell_id: &CellId, block_id: &BlockId) -> Result<CellTree> {
    let mut next = tree.clone();
    let cell = next.find_mut(cell_id)?;
    let index = cell.block_index(block_id).ok_or_else(|| block_not_found(cell_id, block_id))?;
    cell.blocks.remove(index);
    log::debug!("delete_block: {} from {}", block_id, cell_id);
    Ok(next)
}

/// Shallow-merge a partial content object into a block
pub fn update_block_content(tree: &CellTree, cell_id: &CellId, block_id: &BlockId, patch: &Value) -> Result<CellTree> {
    let mut next = tree.clone();
    let cell = next.find_mut(cell_id)?;
    let block = block_mut(cell, block_id)?;
    block.content = block.content.merged(patch).map_err(|reason| BuilderError::InvalidContent {
        block: block_id.clone(),
        reason,
    })?;
    Ok(next)
}

/// Update a block's presentation attributes
pub fn set_block_style(
    tree: &CellTree,
    cell_id: &CellId,
    block_id: &BlockId,
    background_color: Option<BackgroundColor>,
    padding: Option<u32>,
) -> Result<CellTree> {
    let mut next = tree.clone();
    let cell = next.find_mut(cell_id)?;
    let block = block_mut(cell, block_id)?;
    block.background_color = background_color;
    block.padding = padding;
    Ok(next)
}

fn binding_mut<'a>(tree: &'a mut CellTree, cell_id: &CellId, block_id: &BlockId) -> Result<&'a mut DataBinding> {
    let cell = tree.find_mut(cell_id)?;
    let block = block_mut(cell, block_id)?;
    block.content.binding_mut().ok_or_else(|| BuilderError::InvalidContent {
        block: block_id.clone(),
        reason: "block type has no data binding".to_string(),
    })
}

/// Switch a block's data source, applying the binding reset rules
pub fn set_block_binding(tree: &CellTree, cell_id: &CellId, block_id: &BlockId, source: SourceType) -> Result<CellTree> {
    let mut next = tree.clone();
    binding_mut(&mut next, cell_id, block_id)?.set_source_type(source);
    Ok(next)
}

/// Set field path, template and fallback of a block's binding.
/// The source type is left alone.
pub fn update_block_binding(
    tree: &CellTree,
    cell_id: &CellId,
    block_id: &BlockId,
    field_path: Option<String>,
    template_string: Option<String>,
    fallback_value: Option<Value>,
) -> Result<CellTree> {
    let mut next = tree.clone();
    let binding = binding_mut(&mut next, cell_id, block_id)?;
    binding.field_path = field_path.filter(|p| !p.trim().is_empty());
    binding.template_string = template_string;
    binding.fallback_value = fallback_value;
    Ok(next)
}

/// Move a block to `target_index` in the target cell.
///
/// Same-cell moves use remove-then-insert semantics; indices past the end are
/// clamped. Returns `Ok(None)` when the move changes nothing.
pub fn move_block(
    tree: &CellTree,
    source_cell_id: &CellId,
    block_id: &BlockId,
    target_cell_id: &CellId,
    target_index: usize,
) -> Result<Option<CellTree>> {
    let source = tree.find(source_cell_id)?;
    let from = source
        .block_index(block_id)
        .ok_or_else(|| block_not_found(source_cell_id, block_id))?;

    let target = tree.find(target_cell_id)?;
    if !target.is_leaf() {
        return Err(BuilderError::NotALeaf(target_cell_id.clone()));
    }

    let mut next = tree.clone();

    if source_cell_id == target_cell_id {
        let to = target_index.min(source.blocks.len() - 1);
        if from == to {
            return Ok(None);
        }
        let cell = next.find_mut(source_cell_id)?;
        let block = cell.blocks.remove(from);
        cell.blocks.insert(to, block);
        log::debug!("move_block: {} reordered {} -> {} in {}", block_id, from, to, source_cell_id);
    } else {
        let to = target_index.min(target.blocks.len());
        let block = next.find_mut(source_cell_id)?.blocks.remove(from);
        next.find_mut(target_cell_id)?.blocks.insert(to, block);
        log::debug!(
            "move_block: {} from {}[{}] to {}[{}]",
            block_id,
            source_cell_id,
            from,
            target_cell_id,
            to
        );
    }

    Ok(Some(next))
}
