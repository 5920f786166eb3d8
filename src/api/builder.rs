//! Builder lifecycle: mount scope, page load, history, saving, shortcuts

use wasm_bindgen::prelude::*;

use super::helpers::{self, deserialize, serialize, with_mounted, with_session};
use super::types::{KeyOutcome, LayoutUpdate};
use crate::config::BuilderConfig;
use crate::error::BuilderError;
use crate::models::document::{PageDocument, PageMetadataPatch};
use crate::persistence::decode_page;
use crate::session::{BuilderSession, Shortcut, ShortcutEffect};
use crate::{wasm_info, wasm_warn};

fn layout(session: &BuilderSession, changed: bool) -> Result<JsValue, JsValue> {
    serialize(&LayoutUpdate::from_session(session, changed), "Layout serialization error")
}

/// Create the builder session for a mounted builder view.
///
/// `config_json` is an optional JSON object (`historyLimit`, `logLevel`,
/// `unsavedChangesMessage`). Shortcuts only act while a session is mounted.
#[wasm_bindgen(js_name = mountBuilder)]
pub fn mount_builder(config_json: Option<String>) -> Result<JsValue, JsValue> {
    let config = BuilderConfig::from_json(config_json.as_deref()).map_err(helpers::builder_error)?;
    log::set_max_level(config.log_level_filter());

    let session = BuilderSession::new(PageDocument::new_page("Untitled"), config);
    let update = LayoutUpdate::from_session(&session, false);
    if helpers::mount(session)? {
        wasm_warn!("mountBuilder called while already mounted; previous session replaced");
    }
    wasm_info!("Builder mounted");
    serialize(&update, "Layout serialization error")
}

/// Release the builder session; later calls fail with "not mounted"
#[wasm_bindgen(js_name = unmountBuilder)]
pub fn unmount_builder() -> Result<(), JsValue> {
    if helpers::unmount()? {
        wasm_info!("Builder unmounted");
    } else {
        wasm_warn!("unmountBuilder called with no builder mounted");
    }
    Ok(())
}

#[wasm_bindgen(js_name = isBuilderMounted)]
pub fn is_builder_mounted() -> Result<bool, JsValue> {
    Ok(with_mounted(|_| ())?.is_some())
}

/// Start editing a fresh page with one empty root cell
#[wasm_bindgen(js_name = createNewPage)]
pub fn create_new_page(title: &str) -> Result<JsValue, JsValue> {
    wasm_info!("createNewPage called: '{}'", title);
    with_session(|session| {
        session.load(PageDocument::new_page(title));
        Ok(layout(session, true))
    })?
}

/// Load a page document object returned by the server
#[wasm_bindgen(js_name = loadPage)]
pub fn load_page(page_js: JsValue) -> Result<JsValue, JsValue> {
    let page: PageDocument = deserialize(page_js, "Page deserialization error")?;
    with_session(|session| {
        session.load(page);
        Ok(layout(session, true))
    })?
}

/// Load a page from its JSON text
#[wasm_bindgen(js_name = loadPageJson)]
pub fn load_page_json(json: &str) -> Result<JsValue, JsValue> {
    with_session(|session| {
        session.load(decode_page(json)?);
        Ok(layout(session, true))
    })?
}

/// The current page document
#[wasm_bindgen(js_name = getPage)]
pub fn get_page() -> Result<JsValue, JsValue> {
    let page = with_session(|session| Ok(session.document().clone()))?;
    serialize(&page, "Page serialization error")
}

#[wasm_bindgen(js_name = getLayout)]
pub fn get_layout() -> Result<JsValue, JsValue> {
    with_session(|session| Ok(layout(session, false)))?
}

/// Apply a metadata patch (title, slug, isPublished, seo, theme, margins)
#[wasm_bindgen(js_name = updatePageMetadata)]
pub fn update_page_metadata(patch_js: JsValue) -> Result<JsValue, JsValue> {
    let patch: PageMetadataPatch = deserialize(patch_js, "Metadata deserialization error")?;
    with_session(|session| {
        let changed = session.update_metadata(patch);
        Ok(layout(session, changed))
    })?
}

// ============================================================================
// History
// ============================================================================

#[wasm_bindgen]
pub fn undo() -> Result<JsValue, JsValue> {
    with_session(|session| {
        let changed = session.undo();
        Ok(layout(session, changed))
    })?
}

#[wasm_bindgen]
pub fn redo() -> Result<JsValue, JsValue> {
    with_session(|session| {
        let changed = session.redo();
        Ok(layout(session, changed))
    })?
}

/// Keyboard entry point for the global keydown listener.
///
/// A no-op while no builder is mounted.
#[wasm_bindgen(js_name = handleKeyDown)]
pub fn handle_key_down(key: &str, ctrl_or_meta: bool, shift: bool) -> Result<JsValue, JsValue> {
    let Some(shortcut) = Shortcut::from_key(key, ctrl_or_meta, shift) else {
        return serialize(&KeyOutcome { handled: false, save_requested: false, layout: None }, "Key outcome");
    };

    let outcome = with_mounted(|session| {
        let effect = session.handle_shortcut(shortcut);
        KeyOutcome {
            handled: true,
            save_requested: effect == ShortcutEffect::SaveRequested,
            layout: Some(LayoutUpdate::from_session(session, effect == ShortcutEffect::Changed)),
        }
    })?
    .unwrap_or(KeyOutcome { handled: false, save_requested: false, layout: None });

    serialize(&outcome, "Key outcome")
}

// ============================================================================
// Saving
// ============================================================================

/// Start a save and return the payload for the REST call.
/// Fails while another save is in flight.
#[wasm_bindgen(js_name = beginSave)]
pub fn begin_save() -> Result<JsValue, JsValue> {
    let payload = with_session(|session| session.begin_save())?;
    wasm_info!("beginSave: page {:?}", payload.id);
    serialize(&payload, "Page serialization error")
}

/// Complete the pending save with the document the server returned
#[wasm_bindgen(js_name = finishSave)]
pub fn finish_save(saved_js: JsValue) -> Result<JsValue, JsValue> {
    let saved: PageDocument = deserialize(saved_js, "Saved page deserialization error")?;
    with_session(|session| {
        session.finish_save(Ok(saved))?;
        Ok(layout(session, true))
    })?
}

/// Complete the pending save as failed; local edits are kept
#[wasm_bindgen(js_name = failSave)]
pub fn fail_save(message: &str) -> Result<JsValue, JsValue> {
    with_session(|session| {
        match session.finish_save(Err(BuilderError::Persistence(message.to_string()))) {
            Err(BuilderError::Persistence(_)) => {}
            Err(other) => return Err(other),
            Ok(()) => {}
        }
        Ok(layout(session, false))
    })?
}

/// Text for the leave-page prompt, or `undefined` when nothing is unsaved
#[wasm_bindgen(js_name = beforeUnloadWarning)]
pub fn before_unload_warning() -> Result<Option<String>, JsValue> {
    Ok(with_mounted(|session| session.before_unload_warning().map(str::to_string))?.flatten())
}
