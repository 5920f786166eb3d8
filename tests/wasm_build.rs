//! WASM smoke tests
//!
//! Exercise the JavaScript-facing API in a browser.

use page_builder_wasm::api::*;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn get(value: &JsValue, key: &str) -> JsValue {
    js_sys::Reflect::get(value, &JsValue::from_str(key)).unwrap()
}

fn first_root(update: &JsValue) -> String {
    let cells = js_sys::Array::from(&get(update, "gridCells"));
    get(&cells.get(0), "cellId").as_string().unwrap()
}

#[wasm_bindgen_test]
fn test_mount_and_split() {
    let update = mount_builder(None).unwrap();
    let root = first_root(&update);

    let update = split_cell(&root, "horizontal").unwrap();
    assert_eq!(js_sys::Array::from(&get(&update, "gridCells")).length(), 3);
    assert_eq!(get(&update, "canUndo").as_bool(), Some(true));
    assert_eq!(get(&update, "isDirty").as_bool(), Some(true));

    let update = undo().unwrap();
    assert_eq!(js_sys::Array::from(&get(&update, "gridCells")).length(), 1);
    unmount_builder().unwrap();
}

#[wasm_bindgen_test]
fn test_invalid_split_direction_rejected() {
    let update = mount_builder(None).unwrap();
    let root = first_root(&update);
    assert!(split_cell(&root, "diagonal").is_err());
    unmount_builder().unwrap();
}

#[wasm_bindgen_test]
fn test_calls_fail_when_unmounted() {
    unmount_builder().unwrap();
    assert!(add_root_cell().is_err());
    assert_eq!(before_unload_warning().unwrap(), None);

    let outcome = handle_key_down("z", true, false).unwrap();
    assert_eq!(get(&outcome, "handled").as_bool(), Some(false));
}

#[wasm_bindgen_test]
fn test_save_cycle() {
    mount_builder(Some(r#"{"unsavedChangesMessage": "Unsaved!"}"#.to_string())).unwrap();
    add_root_cell().unwrap();
    assert_eq!(before_unload_warning().unwrap().as_deref(), Some("Unsaved!"));

    let payload = begin_save().unwrap();
    assert!(begin_save().is_err());
    js_sys::Reflect::set(&payload, &JsValue::from_str("id"), &JsValue::from_str("page-1")).unwrap();

    let update = finish_save(payload).unwrap();
    assert_eq!(get(&update, "isDirty").as_bool(), Some(false));
    assert_eq!(before_unload_warning().unwrap(), None);
    unmount_builder().unwrap();
}

#[wasm_bindgen_test]
fn test_block_drag_and_drop() {
    let update = mount_builder(None).unwrap();
    let root = first_root(&update);
    let first = get(&add_block(&root, "text").unwrap(), "createdId").as_string().unwrap();
    add_block(&root, "button").unwrap();

    let target = get_drop_target(&first).unwrap();
    assert_eq!(get(&target, "targetIndex").as_f64(), Some(0.0));

    let outcome = drop_block(&root, &first, &root).unwrap();
    assert_eq!(get(&get(&outcome, "layout"), "changed").as_bool(), Some(true));

    let outcome = drop_block(&root, &first, "nowhere").unwrap();
    assert_eq!(get(&get(&outcome, "layout"), "changed").as_bool(), Some(false));
    unmount_builder().unwrap();
}
