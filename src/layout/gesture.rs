//! Divider drag state
//!
//! A resize gesture remembers where it started. Every pointer update
//! recomputes the ratio from that start point and the total delta, so
//! rounding never accumulates over a long drag.

use crate::error::{BuilderError, Result};
use crate::models::cell::{clamp_ratio, SplitDirection};
use crate::models::ids::CellId;
use crate::models::tree::CellTree;

use super::operations::resize_cell;

/// In-progress divider drag on one split cell
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeGesture {
    cell_id: CellId,
    axis: SplitDirection,
    container_px: f64,
    start_ratio: f64,
    current_ratio: f64,
}

impl ResizeGesture {
    /// Start dragging the divider of `cell_id`.
    ///
    /// `container_px` is the cell's size along the split axis (width for a
    /// horizontal split, height for a vertical one).
    pub fn begin(tree: &CellTree, cell_id: &CellId, container_px: f64) -> Result<Self> {
        let cell = tree.find(cell_id)?;
        if cell.is_leaf() {
            return Err(BuilderError::NotSplit(cell_id.clone()));
        }

        Ok(Self {
            cell_id: cell_id.clone(),
            axis: cell.split,
            container_px,
            start_ratio: cell.split_ratio,
            current_ratio: cell.split_ratio,
        })
    }

    pub fn cell_id(&self) -> &CellId {
        &self.cell_id
    }

    pub fn axis(&self) -> SplitDirection {
        self.axis
    }

    /// Ratio the divider currently shows
    pub fn ratio(&self) -> f64 {
        self.current_ratio
    }

    /// Apply the total pointer delta since `begin` along the split axis
    pub fn update(&mut self, delta_px: f64) -> f64 {
        // Zero-size containers cannot be resized
        if self.container_px > 0.0 && delta_px.is_finite() {
            self.current_ratio = clamp_ratio(self.start_ratio + delta_px / self.container_px * 100.0);
        }
        self.current_ratio
    }

    /// Commit the drag. `Ok(None)` when the ratio did not move.
    pub fn finish(self, tree: &CellTree) -> Result<Option<CellTree>> {
        if self.current_ratio == self.start_ratio {
            return Ok(None);
        }
        log::debug!(
            "resize gesture on {}: {} -> {}",
            self.cell_id,
            self.start_ratio,
            self.current_ratio
        );
        resize_cell(tree, &self.cell_id, self.current_ratio).map(Some)
    }

    /// Abandon the drag; nothing is committed
    pub fn cancel(self) {
        log::debug!("resize gesture on {} cancelled", self.cell_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::operations::{split_cell, Orientation};

    fn split_root() -> (CellTree, CellId) {
        let tree = CellTree::with_single_root();
        let root = tree.roots()[0].clone();
        (split_cell(&tree, &root, Orientation::Horizontal).unwrap(), root)
    }

    #[test]
    fn test_updates_are_relative_to_start() {
        let (tree, root) = split_root();
        let mut gesture = ResizeGesture::begin(&tree, &root, 1000.0).unwrap();
        assert_eq!(gesture.update(100.0), 60.0);
        assert_eq!(gesture.update(150.0), 65.0);
        assert_eq!(gesture.update(-100.0), 40.0);
    }

    #[test]
    fn test_update_clamps() {
        let (tree, root) = split_root();
        let mut gesture = ResizeGesture::begin(&tree, &root, 200.0).unwrap();
        assert_eq!(gesture.update(500.0), 90.0);
        assert_eq!(gesture.update(-500.0), 10.0);
    }

    #[test]
    fn test_finish_commits_ratio() {
        let (tree, root) = split_root();
        let mut gesture = ResizeGesture::begin(&tree, &root, 400.0).unwrap();
        gesture.update(-80.0);
        let resized = gesture.finish(&tree).unwrap().unwrap();
        assert_eq!(resized.find(&root).unwrap().split_ratio, 30.0);
    }

    #[test]
    fn test_finish_without_movement_is_noop() {
        let (tree, root) = split_root();
        let gesture = ResizeGesture::begin(&tree, &root, 400.0).unwrap();
        assert_eq!(gesture.finish(&tree).unwrap(), None);
    }

    #[test]
    fn test_begin_on_leaf_rejected() {
        let tree = CellTree::with_single_root();
        let root = tree.roots()[0].clone();
        assert_eq!(
            ResizeGesture::begin(&tree, &root, 100.0),
            Err(BuilderError::NotSplit(root))
        );
    }

    #[test]
    fn test_zero_container_keeps_ratio() {
        let (tree, root) = split_root();
        let mut gesture = ResizeGesture::begin(&tree, &root, 0.0).unwrap();
        assert_eq!(gesture.update(50.0), 50.0);
    }
}
