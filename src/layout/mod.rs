//! Layout editing: tree mutations, divider drags, geometry and drop targets

pub mod operations;
pub mod gesture;
pub mod geometry;
pub mod drop;

pub use operations::{
    add_block, add_block_of_type, add_root_cell, delete_block, delete_cell, move_block, resize_cell,
    set_block_binding, set_block_style, set_cell_style, split_cell, update_block, update_block_binding,
    update_block_content, Orientation,
};
pub use gesture::ResizeGesture;
pub use geometry::{layout_rects, CellRect};
pub use drop::{resolve_drop, DropTarget};
