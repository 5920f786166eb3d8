//! Cell rectangles for rendering and hit-testing

use serde::Serialize;

use crate::models::cell::SplitDirection;
use crate::models::ids::CellId;
use crate::models::tree::CellTree;

/// A cell's box as percentages of its root section
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CellRect {
    pub cell_id: CellId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub is_leaf: bool,
}

/// Rectangles for every cell in pre-order.
///
/// Each root section spans 0..100 on both axes. A horizontal split places its
/// children side by side, with the ratio giving the first child's width; a
/// vertical split stacks them, with the ratio giving the first child's height.
pub fn layout_rects(tree: &CellTree) -> Vec<CellRect> {
    let mut out = Vec::with_capacity(tree.len());
    for root in tree.roots() {
        place(tree, root, 0.0, 0.0, 100.0, 100.0, &mut out);
    }
    out
}

fn place(tree: &CellTree, id: &CellId, x: f64, y: f64, width: f64, height: f64, out: &mut Vec<CellRect>) {
    let Some(cell) = tree.get(id) else {
        return;
    };

    out.push(CellRect {
        cell_id: id.clone(),
        x,
        y,
        width,
        height,
        is_leaf: cell.is_leaf(),
    });

    let [first, second] = match cell.children.as_slice() {
        [a, b] => [a, b],
        _ => return,
    };
    let share = cell.split_ratio / 100.0;

    match cell.split {
        SplitDirection::Horizontal => {
            let first_width = width * share;
            place(tree, first, x, y, first_width, height, out);
            place(tree, second, x + first_width, y, width - first_width, height, out);
        }
        SplitDirection::Vertical => {
            let first_height = height * share;
            place(tree, first, x, y, width, first_height, out);
            place(tree, second, x, y + first_height, width, height - first_height, out);
        }
        SplitDirection::None => {}
    }
}
