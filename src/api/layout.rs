//! Cell and block editing
//!
//! Each call runs one mutation against the mounted session and returns a
//! `LayoutUpdate`. Rejected mutations throw and leave the page unchanged.

use serde_json::Value;
use wasm_bindgen::prelude::*;

use super::helpers::{deserialize, serialize, validation_error, with_session};
use super::types::{BindingDetails, BlockStyle, DropOutcome, LayoutUpdate};
use crate::layout::drop::resolve_drop;
use crate::layout::geometry::layout_rects;
use crate::layout::gesture::ResizeGesture;
use crate::layout::operations::Orientation;
use crate::models::binding::SourceType;
use crate::models::block::Block;
use crate::models::ids::{BlockId, CellId};
use crate::session::BuilderSession;
use crate::{wasm_info, wasm_log};

fn layout(session: &BuilderSession, changed: bool) -> Result<JsValue, JsValue> {
    serialize(&LayoutUpdate::from_session(session, changed), "Layout serialization error")
}

fn parse_orientation(direction: &str) -> Result<Orientation, JsValue> {
    match direction {
        "horizontal" => Ok(Orientation::Horizontal),
        "vertical" => Ok(Orientation::Vertical),
        other => Err(validation_error(format!(
            "Invalid split direction '{}' (expected horizontal or vertical)",
            other
        ))),
    }
}

fn parse_source_type(name: &str) -> Result<SourceType, JsValue> {
    serde_json::from_value(Value::String(name.to_string()))
        .map_err(|_| validation_error(format!("Unknown data source '{}'", name)))
}

// ============================================================================
// Cells
// ============================================================================

#[wasm_bindgen(js_name = splitCell)]
pub fn split_cell(cell_id: &str, direction: &str) -> Result<JsValue, JsValue> {
    wasm_info!("splitCell called: {} {}", cell_id, direction);
    let orientation = parse_orientation(direction)?;
    with_session(|session| {
        session.split_cell(&CellId::from(cell_id), orientation)?;
        Ok(layout(session, true))
    })?
}

#[wasm_bindgen(js_name = deleteCell)]
pub fn delete_cell(cell_id: &str) -> Result<JsValue, JsValue> {
    wasm_info!("deleteCell called: {}", cell_id);
    with_session(|session| {
        session.delete_cell(&CellId::from(cell_id))?;
        Ok(layout(session, true))
    })?
}

#[wasm_bindgen(js_name = resizeCell)]
pub fn resize_cell(cell_id: &str, ratio: f64) -> Result<JsValue, JsValue> {
    with_session(|session| {
        session.resize_cell(&CellId::from(cell_id), ratio)?;
        Ok(layout(session, true))
    })?
}

/// Append an empty root cell ("add first cell" on an empty canvas)
#[wasm_bindgen(js_name = addRootCell)]
pub fn add_root_cell() -> Result<JsValue, JsValue> {
    let update = with_session(|session| {
        let id = session.add_root_cell();
        Ok(LayoutUpdate::from_session(session, true).with_created(id.as_str()))
    })?;
    serialize(&update, "Layout serialization error")
}

#[wasm_bindgen(js_name = setCellStyle)]
pub fn set_cell_style(cell_id: &str, background_color: Option<String>, padding: Option<u32>) -> Result<JsValue, JsValue> {
    with_session(|session| {
        session.set_cell_style(&CellId::from(cell_id), background_color, padding)?;
        Ok(layout(session, true))
    })?
}

/// Rectangles (percent of each root section) for every cell
#[wasm_bindgen(js_name = layoutRects)]
pub fn get_layout_rects() -> Result<JsValue, JsValue> {
    let rects = with_session(|session| Ok(layout_rects(session.grid_cells())))?;
    serialize(&rects, "Rect serialization error")
}

// ============================================================================
// Divider drag
// ============================================================================

/// Handle for an in-progress divider drag.
///
/// JS creates one on pointerdown, feeds it pointer deltas, and must call
/// `finish` or `cancel` on pointerup/pointercancel.
#[wasm_bindgen]
pub struct ResizeHandle {
    gesture: ResizeGesture,
}

#[wasm_bindgen]
impl ResizeHandle {
    /// Ratio after applying the total delta (pixels) since the drag began
    pub fn update(&mut self, delta_px: f64) -> f64 {
        self.gesture.update(delta_px)
    }

    #[wasm_bindgen(getter)]
    pub fn ratio(&self) -> f64 {
        self.gesture.ratio()
    }

    #[wasm_bindgen(getter, js_name = cellId)]
    pub fn cell_id(&self) -> String {
        self.gesture.cell_id().to_string()
    }

    /// Commit the drag as one undo step
    pub fn finish(self) -> Result<JsValue, JsValue> {
        with_session(|session| {
            let changed = session.finish_resize(self.gesture)?;
            Ok(layout(session, changed))
        })?
    }

    pub fn cancel(self) {
        self.gesture.cancel();
    }
}

#[wasm_bindgen(js_name = beginResize)]
pub fn begin_resize(cell_id: &str, container_px: f64) -> Result<ResizeHandle, JsValue> {
    wasm_log!("beginResize: {} over {}px", cell_id, container_px);
    let gesture = with_session(|session| ResizeGesture::begin(session.grid_cells(), &CellId::from(cell_id), container_px))?;
    Ok(ResizeHandle { gesture })
}

// ============================================================================
// Blocks
// ============================================================================

#[wasm_bindgen(js_name = addBlock)]
pub fn add_block(cell_id: &str, block_type: &str) -> Result<JsValue, JsValue> {
    wasm_info!("addBlock called: {} -> {}", block_type, cell_id);
    let update = with_session(|session| {
        let id = session.add_block(&CellId::from(cell_id), block_type)?;
        Ok(LayoutUpdate::from_session(session, true).with_created(id.as_str()))
    })?;
    serialize(&update, "Layout serialization error")
}

/// Replace a block wholesale (wire shape: blockId, type, content, ...)
#[wasm_bindgen(js_name = updateBlock)]
pub fn update_block(cell_id: &str, block_id: &str, block_js: JsValue) -> Result<JsValue, JsValue> {
    let block: Block = deserialize(block_js, "Block deserialization error")?;
    with_session(|session| {
        session.update_block(&CellId::from(cell_id), &BlockId::from(block_id), block)?;
        Ok(layout(session, true))
    })?
}

#[wasm_bindgen(js_name = deleteBlock)]
pub fn delete_block(cell_id: &str, block_id: &str) -> Result<JsValue, JsValue> {
    wasm_info!("deleteBlock called: {} in {}", block_id, cell_id);
    with_session(|session| {
        session.delete_block(&CellId::from(cell_id), &BlockId::from(block_id))?;
        Ok(layout(session, true))
    })?
}

/// Shallow-merge a partial content object into a block
#[wasm_bindgen(js_name = updateBlockContent)]
pub fn update_block_content(cell_id: &str, block_id: &str, patch_js: JsValue) -> Result<JsValue, JsValue> {
    let patch: Value = deserialize(patch_js, "Content patch deserialization error")?;
    with_session(|session| {
        session.update_block_content(&CellId::from(cell_id), &BlockId::from(block_id), &patch)?;
        Ok(layout(session, true))
    })?
}

#[wasm_bindgen(js_name = setBlockStyle)]
pub fn set_block_style(cell_id: &str, block_id: &str, style_js: JsValue) -> Result<JsValue, JsValue> {
    let style: BlockStyle = deserialize(style_js, "Block style deserialization error")?;
    with_session(|session| {
        session.set_block_style(
            &CellId::from(cell_id),
            &BlockId::from(block_id),
            style.background_color,
            style.padding,
        )?;
        Ok(layout(session, true))
    })?
}

/// Switch a block's data source (static, product, category, collection, customer)
#[wasm_bindgen(js_name = setBlockBinding)]
pub fn set_block_binding(cell_id: &str, block_id: &str, source_type: &str) -> Result<JsValue, JsValue> {
    let source = parse_source_type(source_type)?;
    with_session(|session| {
        session.set_block_binding(&CellId::from(cell_id), &BlockId::from(block_id), source)?;
        Ok(layout(session, true))
    })?
}

#[wasm_bindgen(js_name = updateBlockBinding)]
pub fn update_block_binding(cell_id: &str, block_id: &str, details_js: JsValue) -> Result<JsValue, JsValue> {
    let details: BindingDetails = deserialize(details_js, "Binding deserialization error")?;
    with_session(|session| {
        session.update_block_binding(
            &CellId::from(cell_id),
            &BlockId::from(block_id),
            details.field_path,
            details.template_string,
            details.fallback_value,
        )?;
        Ok(layout(session, true))
    })?
}

#[wasm_bindgen(js_name = moveBlock)]
pub fn move_block(source_cell_id: &str, block_id: &str, target_cell_id: &str, target_index: usize) -> Result<JsValue, JsValue> {
    with_session(|session| {
        let changed = session.move_block(
            &CellId::from(source_cell_id),
            &BlockId::from(block_id),
            &CellId::from(target_cell_id),
            target_index,
        )?;
        Ok(layout(session, changed))
    })?
}

/// Where a drag hovering over `over_id` would land, or `null`
#[wasm_bindgen(js_name = resolveDrop)]
pub fn get_drop_target(over_id: &str) -> Result<JsValue, JsValue> {
    let target = with_session(|session| Ok(resolve_drop(session.grid_cells(), over_id)))?;
    serialize(&target, "Drop target serialization error")
}

/// Drag end: resolve `over_id` and move the block there.
/// Unresolvable targets leave the page unchanged.
#[wasm_bindgen(js_name = dropBlock)]
pub fn drop_block(source_cell_id: &str, block_id: &str, over_id: &str) -> Result<JsValue, JsValue> {
    let outcome = with_session(|session| {
        let target = resolve_drop(session.grid_cells(), over_id);
        let changed = match &target {
            Some(t) => session.move_block(
                &CellId::from(source_cell_id),
                &BlockId::from(block_id),
                &t.target_cell_id,
                t.target_index,
            )?,
            None => false,
        };
        Ok(DropOutcome {
            target,
            layout: LayoutUpdate::from_session(session, changed),
        })
    })?;
    serialize(&outcome, "Drop serialization error")
}
