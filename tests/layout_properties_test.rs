// Structural properties of the cell mutation engine

use page_builder_wasm::layout::{
    add_block_of_type, add_root_cell, delete_cell, move_block, resize_cell, split_cell, Orientation,
};
use page_builder_wasm::{BlockId, CellId, CellTree, SplitDirection};

fn root_of(tree: &CellTree) -> CellId {
    tree.roots()[0].clone()
}

fn children(tree: &CellTree, id: &CellId) -> (CellId, CellId) {
    let cell = tree.find(id).unwrap();
    (cell.children[0].clone(), cell.children[1].clone())
}

fn block_ids(tree: &CellTree, id: &CellId) -> Vec<BlockId> {
    tree.find(id).unwrap().blocks.iter().map(|b| b.id.clone()).collect()
}

/// Split a leaf holding blocks, then delete either child: the parent is a
/// leaf again with the original blocks in the original order (when the
/// content-bearing first child survives).
#[test]
fn test_split_then_delete_restores_leaf() {
    let tree = CellTree::with_single_root();
    let root = root_of(&tree);
    let (tree, a) = add_block_of_type(&tree, &root, "text").unwrap();
    let (tree, b) = add_block_of_type(&tree, &root, "image").unwrap();
    let before = tree.find(&root).unwrap().clone();

    for orientation in [Orientation::Horizontal, Orientation::Vertical] {
        let split = split_cell(&tree, &root, orientation).unwrap();
        let (first, second) = children(&split, &root);

        let restored = delete_cell(&split, &second).unwrap();
        let cell = restored.find(&root).unwrap();
        assert_eq!(cell.split, SplitDirection::None);
        assert!(cell.children.is_empty());
        assert_eq!(cell.blocks, before.blocks);
        assert_eq!(block_ids(&restored, &root), vec![a.clone(), b.clone()]);
        assert_eq!(restored.len(), 1);

        let emptied = delete_cell(&split, &first).unwrap();
        let cell = emptied.find(&root).unwrap();
        assert!(cell.is_leaf());
        assert!(cell.blocks.is_empty());
        assert_eq!(emptied.len(), 1);
    }
}

/// After any sequence of operations every split cell has exactly two children
/// and every cell's parent lists it.
#[test]
fn test_binary_invariant_survives_edit_sequence() {
    let tree = CellTree::with_single_root();
    let root = root_of(&tree);

    let tree = split_cell(&tree, &root, Orientation::Horizontal).unwrap();
    let (left, right) = children(&tree, &root);
    let tree = split_cell(&tree, &right, Orientation::Vertical).unwrap();
    let (top, bottom) = children(&tree, &right);
    let tree = split_cell(&tree, &top, Orientation::Horizontal).unwrap();
    let (tree, _second_root) = add_root_cell(&tree);
    let tree = delete_cell(&tree, &bottom).unwrap();
    let tree = delete_cell(&tree, &left).unwrap();

    tree.validate().unwrap();
    for cell in tree.cells_in_order() {
        match cell.split {
            SplitDirection::None => assert!(cell.children.is_empty()),
            _ => assert_eq!(cell.children.len(), 2),
        }
        if let Some(parent) = &cell.parent_id {
            assert!(tree.find(parent).unwrap().children.contains(&cell.cell_id));
        }
    }

    // right absorbed top when bottom went away, then root absorbed right
    // when left went away
    let root_cell = tree.find(&root).unwrap();
    assert_eq!(root_cell.split, SplitDirection::Horizontal);
    assert_eq!(tree.roots().len(), 2);
}

#[test]
fn test_resize_always_within_bounds() {
    let tree = CellTree::with_single_root();
    let root = root_of(&tree);
    let tree = split_cell(&tree, &root, Orientation::Vertical).unwrap();

    for requested in [-1e9, -5.0, 0.0, 9.99, 10.0, 42.5, 90.0, 90.01, 100.0, 1e9] {
        let ratio = resize_cell(&tree, &root, requested).unwrap().find(&root).unwrap().split_ratio;
        assert!((10.0..=90.0).contains(&ratio), "{} -> {}", requested, ratio);
    }
}

#[test]
fn test_move_to_own_position_is_noop() {
    let tree = CellTree::with_single_root();
    let root = root_of(&tree);
    let (tree, a) = add_block_of_type(&tree, &root, "text").unwrap();
    let (tree, b) = add_block_of_type(&tree, &root, "button").unwrap();

    assert!(move_block(&tree, &root, &a, &root, 0).unwrap().is_none());
    assert!(move_block(&tree, &root, &b, &root, 1).unwrap().is_none());
    // past-the-end on the last block clamps to its own slot
    assert!(move_block(&tree, &root, &b, &root, 7).unwrap().is_none());
}

#[test]
fn test_delete_root_of_many_keeps_others() {
    let tree = CellTree::with_single_root();
    let first = root_of(&tree);
    let (tree, second) = add_root_cell(&tree);
    let tree = split_cell(&tree, &first, Orientation::Horizontal).unwrap();

    let tree = delete_cell(&tree, &first).unwrap();
    assert_eq!(tree.roots(), &[second]);
    assert_eq!(tree.len(), 1);
}
