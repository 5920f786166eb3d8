//! The cell arena
//!
//! All cells of a page live in one flat map keyed by id, with parent/children
//! stored as id references. On the wire the tree is the flat `gridCells`
//! array in pre-order; decoding validates every structural invariant.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::cell::{clamp_ratio, Cell};
use super::ids::{BlockId, CellId};
use crate::error::{BuilderError, Result};

/// Arena of cells plus the ordered set of root cells
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(try_from = "Vec<Cell>", into = "Vec<Cell>")]
pub struct CellTree {
    cells: HashMap<CellId, Cell>,
    roots: Vec<CellId>,
}

impl CellTree {
    /// An empty canvas (zero root cells)
    pub fn new() -> Self {
        Self::default()
    }

    /// A canvas with a single empty leaf root
    pub fn with_single_root() -> Self {
        let mut tree = Self::new();
        tree.push_root(Cell::leaf(None));
        tree
    }

    /// Build from a flat list, validating all invariants
    pub fn from_cells(cells: Vec<Cell>) -> Result<Self> {
        let mut map = HashMap::with_capacity(cells.len());
        let mut roots = Vec::new();

        for mut cell in cells {
            cell.split_ratio = clamp_ratio(cell.split_ratio);
            if cell.parent_id.is_none() {
                roots.push(cell.cell_id.clone());
            }
            let id = cell.cell_id.clone();
            if map.insert(id.clone(), cell).is_some() {
                return Err(BuilderError::InvalidTree(format!("duplicate cell id {}", id)));
            }
        }

        let tree = Self { cells: map, roots };
        tree.validate()?;
        Ok(tree)
    }

    pub fn roots(&self) -> &[CellId] {
        &self.roots
    }

    /// Number of cells (all depths)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when there are no root cells
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn contains(&self, id: &CellId) -> bool {
        self.cells.contains_key(id)
    }

    pub fn get(&self, id: &CellId) -> Option<&Cell> {
        self.cells.get(id)
    }

    /// Look up a cell, failing with `CellNotFound`
    pub fn find(&self, id: &CellId) -> Result<&Cell> {
        self.cells.get(id).ok_or_else(|| BuilderError::CellNotFound(id.clone()))
    }

    pub(crate) fn find_mut(&mut self, id: &CellId) -> Result<&mut Cell> {
        self.cells.get_mut(id).ok_or_else(|| BuilderError::CellNotFound(id.clone()))
    }

    /// The cell id plus every transitively nested child id, in pre-order
    pub fn descendants(&self, id: &CellId) -> Result<Vec<CellId>> {
        self.find(id)?;

        let mut out = Vec::new();
        let mut stack = vec![id.clone()];
        while let Some(current) = stack.pop() {
            let cell = self.find(&current)?;
            // Reverse so the first child is visited first
            for child in cell.children.iter().rev() {
                stack.push(child.clone());
            }
            out.push(current);
        }
        Ok(out)
    }

    /// All cells in pre-order, roots in order
    pub fn cells_in_order(&self) -> Vec<&Cell> {
        let mut out = Vec::with_capacity(self.cells.len());
        for root in &self.roots {
            if let Ok(ids) = self.descendants(root) {
                out.extend(ids.iter().filter_map(|id| self.cells.get(id)));
            }
        }
        out
    }

    /// Leaf cells in pre-order
    pub fn leaves(&self) -> Vec<&Cell> {
        self.cells_in_order().into_iter().filter(|c| c.is_leaf()).collect()
    }

    /// Locate a block anywhere in the tree: (owning cell, index)
    pub fn find_block(&self, block_id: &BlockId) -> Option<(&CellId, usize)> {
        self.cells
            .values()
            .find_map(|cell| cell.block_index(block_id).map(|i| (&cell.cell_id, i)))
    }

    /// Check every structural invariant
    pub fn validate(&self) -> Result<()> {
        let mut seen_blocks = HashSet::new();
        for cell in self.cells.values() {
            let id = &cell.cell_id;

            for block in &cell.blocks {
                if !seen_blocks.insert(&block.id) {
                    return Err(BuilderError::InvalidTree(format!("duplicate block id {}", block.id)));
                }
            }

            if cell.is_leaf() {
                if !cell.children.is_empty() {
                    return Err(BuilderError::InvalidTree(format!("leaf {} has children", id)));
                }
            } else {
                if cell.children.len() != 2 {
                    return Err(BuilderError::InvalidTree(format!(
                        "split cell {} has {} children",
                        id,
                        cell.children.len()
                    )));
                }
                if cell.children[0] == cell.children[1] {
                    return Err(BuilderError::InvalidTree(format!("split cell {} lists the same child twice", id)));
                }
                if !cell.blocks.is_empty() {
                    return Err(BuilderError::InvalidTree(format!("split cell {} holds blocks", id)));
                }
            }

            for child_id in &cell.children {
                let child = self.cells.get(child_id).ok_or_else(|| BuilderError::DanglingReference {
                    cell: id.clone(),
                    missing: child_id.clone(),
                })?;
                if child.parent_id.as_ref() != Some(id) {
                    return Err(BuilderError::InvalidTree(format!(
                        "cell {} is listed as a child of {} but names a different parent",
                        child_id, id
                    )));
                }
            }

            if let Some(parent_id) = &cell.parent_id {
                let parent = self.cells.get(parent_id).ok_or_else(|| BuilderError::DanglingReference {
                    cell: id.clone(),
                    missing: parent_id.clone(),
                })?;
                if !parent.children.contains(id) {
                    return Err(BuilderError::InvalidTree(format!(
                        "parent {} does not list {} as a child",
                        parent_id, id
                    )));
                }
            }
        }

        let mut seen_roots = HashSet::new();
        for root in &self.roots {
            let cell = self.find(root)?;
            if cell.parent_id.is_some() || !seen_roots.insert(root) {
                return Err(BuilderError::InvalidTree(format!("bad root entry {}", root)));
            }
        }

        // Every cell reachable exactly once from the roots: acyclic, no orphans
        let mut visited = HashSet::with_capacity(self.cells.len());
        let mut stack: Vec<&CellId> = self.roots.iter().collect();
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                return Err(BuilderError::InvalidTree(format!("cycle through cell {}", id)));
            }
            stack.extend(self.find(id)?.children.iter());
        }
        if visited.len() != self.cells.len() {
            return Err(BuilderError::InvalidTree(format!(
                "{} cell(s) unreachable from the roots",
                self.cells.len() - visited.len()
            )));
        }

        Ok(())
    }

    // ------------------------------------------------------------------------
    // Raw arena edits used by the mutation engine
    // ------------------------------------------------------------------------

    pub(crate) fn insert(&mut self, cell: Cell) {
        self.cells.insert(cell.cell_id.clone(), cell);
    }

    pub(crate) fn remove(&mut self, id: &CellId) -> Option<Cell> {
        self.cells.remove(id)
    }

    pub(crate) fn push_root(&mut self, cell: Cell) -> CellId {
        let id = cell.cell_id.clone();
        self.roots.push(id.clone());
        self.insert(cell);
        id
    }

    pub(crate) fn remove_root(&mut self, id: &CellId) {
        self.roots.retain(|r| r != id);
    }
}

impl TryFrom<Vec<Cell>> for CellTree {
    type Error = BuilderError;

    fn try_from(cells: Vec<Cell>) -> Result<Self> {
        Self::from_cells(cells)
    }
}

impl From<CellTree> for Vec<Cell> {
    fn from(tree: CellTree) -> Self {
        let order: Vec<CellId> = tree.cells_in_order().iter().map(|c| c.cell_id.clone()).collect();
        let mut cells = tree.cells;
        order.iter().filter_map(|id| cells.remove(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::block::{Block, BlockType};
    use crate::models::cell::SplitDirection;

    fn split_tree() -> (CellTree, CellId, CellId, CellId) {
        let mut root = Cell::leaf(None);
        let a = Cell::leaf(Some(root.cell_id.clone()));
        let b = Cell::leaf(Some(root.cell_id.clone()));
        root.split = SplitDirection::Vertical;
        root.children = vec![a.cell_id.clone(), b.cell_id.clone()];
        let ids = (root.cell_id.clone(), a.cell_id.clone(), b.cell_id.clone());

        let tree = CellTree::from_cells(vec![root, a, b]).unwrap();
        (tree, ids.0, ids.1, ids.2)
    }

    #[test]
    fn test_empty_tree_is_valid() {
        let tree = CellTree::new();
        assert!(tree.is_empty());
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_find_unknown_cell() {
        let tree = CellTree::with_single_root();
        let missing = CellId::from("cell-missing");
        assert_eq!(tree.find(&missing), Err(BuilderError::CellNotFound(missing)));
    }

    #[test]
    fn test_descendants_preorder() {
        let (tree, root, a, b) = split_tree();
        assert_eq!(tree.descendants(&root).unwrap(), vec![root, a.clone(), b]);
        assert_eq!(tree.descendants(&a).unwrap(), vec![a]);
    }

    #[test]
    fn test_leaves() {
        let (tree, _, a, b) = split_tree();
        let leaves: Vec<_> = tree.leaves().iter().map(|c| c.cell_id.clone()).collect();
        assert_eq!(leaves, vec![a, b]);
    }

    #[test]
    fn test_flat_roundtrip_preserves_ids() {
        let (tree, root, a, b) = split_tree();
        let json = serde_json::to_string(&tree).unwrap();
        let back: CellTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
        assert_eq!(back.roots(), &[root.clone()]);
        assert_eq!(back.find(&root).unwrap().children, vec![a, b]);
    }

    #[test]
    fn test_rejects_single_child_branch() {
        let mut root = Cell::leaf(None);
        let a = Cell::leaf(Some(root.cell_id.clone()));
        root.split = SplitDirection::Horizontal;
        root.children = vec![a.cell_id.clone()];
        assert!(matches!(CellTree::from_cells(vec![root, a]), Err(BuilderError::InvalidTree(_))));
    }

    #[test]
    fn test_rejects_dangling_child() {
        let mut root = Cell::leaf(None);
        let a = Cell::leaf(Some(root.cell_id.clone()));
        root.split = SplitDirection::Horizontal;
        root.children = vec![a.cell_id.clone(), CellId::from("cell-ghost")];
        assert!(matches!(
            CellTree::from_cells(vec![root, a]),
            Err(BuilderError::DanglingReference { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_block_ids() {
        let mut first = Cell::leaf(None);
        let mut second = Cell::leaf(None);
        let block = Block::new(BlockType::Text);
        first.blocks.push(block.clone());
        second.blocks.push(block);
        assert!(matches!(
            CellTree::from_cells(vec![first, second]),
            Err(BuilderError::InvalidTree(_))
        ));

        let mut cell = Cell::leaf(None);
        let block = Block::new(BlockType::Image);
        cell.blocks.push(block.clone());
        cell.blocks.push(block);
        assert!(CellTree::from_cells(vec![cell]).is_err());
    }

    #[test]
    fn test_rejects_detached_cycle() {
        let root = Cell::leaf(None);
        let mut b = Cell::leaf(None);
        let mut c = Cell::leaf(None);
        let d = Cell::leaf(Some(b.cell_id.clone()));
        let e = Cell::leaf(Some(c.cell_id.clone()));

        // b and c own each other: locally consistent, unreachable from the root
        b.parent_id = Some(c.cell_id.clone());
        c.parent_id = Some(b.cell_id.clone());
        b.split = SplitDirection::Vertical;
        c.split = SplitDirection::Vertical;
        b.children = vec![c.cell_id.clone(), d.cell_id.clone()];
        c.children = vec![b.cell_id.clone(), e.cell_id.clone()];

        assert!(matches!(
            CellTree::from_cells(vec![root, b, c, d, e]),
            Err(BuilderError::InvalidTree(_))
        ));
    }

    #[test]
    fn test_out_of_range_ratio_clamped_on_load() {
        let (tree, root, _, _) = split_tree();
        let mut cells: Vec<Cell> = tree.into();
        cells[0].split_ratio = 150.0;
        let tree = CellTree::from_cells(cells).unwrap();
        assert_eq!(tree.find(&root).unwrap().split_ratio, 90.0);
    }
}
