//! Builder session
//!
//! Owns the document being edited together with its undo history, dirty flag
//! and save state. Every successful mutation is committed as a new history
//! snapshot and marks the page dirty; rejected mutations change nothing.

pub mod shortcuts;

use serde_json::Value;

use crate::config::BuilderConfig;
use crate::error::{BuilderError, Result};
use crate::layout::gesture::ResizeGesture;
use crate::layout::operations::{self, Orientation};
use crate::models::binding::SourceType;
use crate::models::block::{BackgroundColor, Block};
use crate::models::document::{MarginSettings, PageDocument, PageMetadataPatch, SeoMetadata, ThemeSettings};
use crate::models::ids::{BlockId, CellId};
use crate::models::tree::CellTree;
use crate::persistence::PageStore;
use crate::undo::History;

pub use shortcuts::Shortcut;

/// What a shortcut did to the session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShortcutEffect {
    /// Document changed (undo/redo moved)
    Changed,
    /// Nothing to undo/redo
    Unchanged,
    /// The host should start a save
    SaveRequested,
}

/// Document revision and slug at the moment the pending save was started
#[derive(Clone, Debug, PartialEq, Eq)]
struct PendingSave {
    revision: u64,
    slug: String,
}

#[derive(Debug)]
pub struct BuilderSession {
    document: PageDocument,
    history: History<PageDocument>,
    dirty: bool,
    /// Bumped on every change to `document`
    revision: u64,
    pending_save: Option<PendingSave>,
    config: BuilderConfig,
}

impl BuilderSession {
    /// Start a session on `document`; it becomes the undo floor
    pub fn new(document: PageDocument, config: BuilderConfig) -> Self {
        let history = History::new(document.clone(), config.history_limit);
        Self {
            document,
            history,
            dirty: false,
            revision: 0,
            pending_save: None,
            config,
        }
    }

    /// Replace the document (page load); history restarts from it
    pub fn load(&mut self, document: PageDocument) {
        log::info!(
            "Loaded page '{}' ({} cell(s))",
            document.title,
            document.grid_cells.len()
        );
        self.history.reset(document.clone());
        self.document = document;
        self.dirty = false;
        self.revision += 1;
        self.pending_save = None;
    }

    pub fn document(&self) -> &PageDocument {
        &self.document
    }

    pub fn grid_cells(&self) -> &CellTree {
        &self.document.grid_cells
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn is_saving(&self) -> bool {
        self.pending_save.is_some()
    }

    /// Record `next` as the new present state
    pub fn commit(&mut self, next: PageDocument) {
        self.history.record(next.clone());
        self.document = next;
        self.dirty = true;
        self.revision += 1;
    }

    fn commit_tree(&mut self, tree: CellTree) {
        let mut next = self.document.clone();
        next.grid_cells = tree;
        self.commit(next);
    }

    /// Run a tree mutation and commit its result
    fn apply<T>(&mut self, op: &str, mutation: impl FnOnce(&CellTree) -> Result<(CellTree, T)>) -> Result<T> {
        match mutation(&self.document.grid_cells) {
            Ok((tree, out)) => {
                self.commit_tree(tree);
                Ok(out)
            }
            Err(e) => {
                log::warn!("{} rejected: {}", op, e);
                Err(e)
            }
        }
    }

    /// Like `apply`, for mutations that may turn out to be no-ops
    fn apply_if_changed(
        &mut self,
        op: &str,
        mutation: impl FnOnce(&CellTree) -> Result<Option<CellTree>>,
    ) -> Result<bool> {
        match mutation(&self.document.grid_cells) {
            Ok(Some(tree)) => {
                self.commit_tree(tree);
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(e) => {
                log::warn!("{} rejected: {}", op, e);
                Err(e)
            }
        }
    }

    fn apply_tree(&mut self, op: &str, mutation: impl FnOnce(&CellTree) -> Result<CellTree>) -> Result<()> {
        self.apply(op, |tree| mutation(tree).map(|next| (next, ())))
    }

    // ------------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------------

    pub fn split_cell(&mut self, cell_id: &CellId, orientation: Orientation) -> Result<()> {
        self.apply_tree("split_cell", |tree| operations::split_cell(tree, cell_id, orientation))
    }

    pub fn delete_cell(&mut self, cell_id: &CellId) -> Result<()> {
        self.apply_tree("delete_cell", |tree| operations::delete_cell(tree, cell_id))
    }

    pub fn resize_cell(&mut self, cell_id: &CellId, ratio: f64) -> Result<()> {
        self.apply_tree("resize_cell", |tree| operations::resize_cell(tree, cell_id, ratio))
    }

    /// Commit a finished divider drag; `false` when the ratio did not move
    pub fn finish_resize(&mut self, gesture: ResizeGesture) -> Result<bool> {
        self.apply_if_changed("finish_resize", |tree| gesture.finish(tree))
    }

    pub fn add_root_cell(&mut self) -> CellId {
        let (tree, id) = operations::add_root_cell(&self.document.grid_cells);
        self.commit_tree(tree);
        id
    }

    pub fn set_cell_style(&mut self, cell_id: &CellId, background_color: Option<String>, padding: Option<u32>) -> Result<()> {
        self.apply_tree("set_cell_style", |tree| {
            operations::set_cell_style(tree, cell_id, background_color, padding)
        })
    }

    // ------------------------------------------------------------------------
    // Blocks
    // ------------------------------------------------------------------------

    /// Add a block with default content; returns its id
    pub fn add_block(&mut self, cell_id: &CellId, type_name: &str) -> Result<BlockId> {
        self.apply("add_block", |tree| operations::add_block_of_type(tree, cell_id, type_name))
    }

    pub fn update_block(&mut self, cell_id: &CellId, block_id: &BlockId, block: Block) -> Result<()> {
        self.apply_tree("update_block", |tree| operations::update_block(tree, cell_id, block_id, block))
    }

    pub fn delete_block(&mut self, cell_id: &CellId, block_id: &BlockId) -> Result<()> {
        self.apply_tree("delete_block", |tree| operations::delete_block(tree, cell_id, block_id))
    }

    pub fn update_block_content(&mut self, cell_id: &CellId, block_id: &BlockId, patch: &Value) -> Result<()> {
        self.apply_tree("update_block_content", |tree| {
            operations::update_block_content(tree, cell_id, block_id, patch)
        })
    }

    pub fn set_block_style(
        &mut self,
        cell_id: &CellId,
        block_id: &BlockId,
        background_color: Option<BackgroundColor>,
        padding: Option<u32>,
    ) -> Result<()> {
        self.apply_tree("set_block_style", |tree| {
            operations::set_block_style(tree, cell_id, block_id, background_color, padding)
        })
    }

    pub fn set_block_binding(&mut self, cell_id: &CellId, block_id: &BlockId, source: SourceType) -> Result<()> {
        self.apply_tree("set_block_binding", |tree| {
            operations::set_block_binding(tree, cell_id, block_id, source)
        })
    }

    pub fn update_block_binding(
        &mut self,
        cell_id: &CellId,
        block_id: &BlockId,
        field_path: Option<String>,
        template_string: Option<String>,
        fallback_value: Option<Value>,
    ) -> Result<()> {
        self.apply_tree("update_block_binding", |tree| {
            operations::update_block_binding(tree, cell_id, block_id, field_path, template_string, fallback_value)
        })
    }

    /// Move a block; `false` when it was dropped back in place
    pub fn move_block(
        &mut self,
        source_cell_id: &CellId,
        block_id: &BlockId,
        target_cell_id: &CellId,
        target_index: usize,
    ) -> Result<bool> {
        self.apply_if_changed("move_block", |tree| {
            operations::move_block(tree, source_cell_id, block_id, target_cell_id, target_index)
        })
    }

    // ------------------------------------------------------------------------
    // Page metadata
    // ------------------------------------------------------------------------

    fn edit_page(&mut self, edit: impl FnOnce(&mut PageDocument)) {
        let mut next = self.document.clone();
        edit(&mut next);
        self.commit(next);
    }

    /// Apply several metadata edits as one undo step
    pub fn update_metadata(&mut self, patch: PageMetadataPatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        self.edit_page(|page| patch.apply_to(page));
        true
    }

    pub fn set_title(&mut self, title: &str) {
        self.edit_page(|page| page.title = title.to_string());
    }

    pub fn set_slug(&mut self, slug: &str) {
        self.edit_page(|page| page.set_slug(slug));
    }

    pub fn set_published(&mut self, published: bool) {
        self.edit_page(|page| page.is_published = published);
    }

    pub fn set_seo(&mut self, seo: SeoMetadata) {
        self.edit_page(|page| page.seo = seo);
    }

    pub fn set_theme(&mut self, theme: ThemeSettings) {
        self.edit_page(|page| page.theme = theme);
    }

    pub fn set_margins(&mut self, margins: MarginSettings) {
        self.edit_page(|page| page.margins = margins);
    }

    // ------------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------------

    /// Step back one snapshot; `false` at the undo floor
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Step forward one snapshot; `false` when there is nothing to redo
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, snapshot: PageDocument) {
        self.document = snapshot;
        self.dirty = true;
        self.revision += 1;
    }

    pub fn handle_shortcut(&mut self, shortcut: Shortcut) -> ShortcutEffect {
        let changed = match shortcut {
            Shortcut::Undo => self.undo(),
            Shortcut::Redo => self.redo(),
            Shortcut::Save => return ShortcutEffect::SaveRequested,
        };
        if changed {
            ShortcutEffect::Changed
        } else {
            ShortcutEffect::Unchanged
        }
    }

    // ------------------------------------------------------------------------
    // Saving
    // ------------------------------------------------------------------------

    /// Mark a save as started and return the payload to send
    pub fn begin_save(&mut self) -> Result<PageDocument> {
        if self.pending_save.is_some() {
            log::warn!("Save requested while another is in flight");
            return Err(BuilderError::SaveInFlight);
        }
        self.pending_save = Some(PendingSave {
            revision: self.revision,
            slug: self.document.slug.clone(),
        });
        log::info!("Saving page '{}'", self.document.title);
        Ok(self.document.clone())
    }

    /// Complete the pending save.
    ///
    /// On success the server's document is adopted when nothing was edited
    /// during the save; otherwise local edits are kept, only the server-assigned
    /// id and slug are taken, and the page stays dirty. On failure local state
    /// and the dirty flag are untouched and the error is handed back.
    ///
    /// The server identity is written into every history snapshot, so undoing
    /// past a save never yields a document without its page id.
    pub fn finish_save(&mut self, result: Result<PageDocument>) -> Result<()> {
        let pending = self.pending_save.take().ok_or(BuilderError::NoSaveInFlight)?;

        let saved = match result {
            Ok(saved) => saved,
            Err(e) => {
                log::warn!("Save failed, keeping local changes: {}", e);
                return Err(e);
            }
        };

        self.adopt_identity(&pending, &saved);

        if pending.revision == self.revision {
            self.history.replace_current(saved.clone());
            self.document = saved;
            self.dirty = false;
            self.revision += 1;
            log::info!("Saved page {:?}", self.document.id);
        } else {
            self.document.id = saved.id;
            self.document.slug = saved.slug;
            self.history.replace_current(self.document.clone());
            log::info!(
                "Saved page {:?}; edits made during the save remain unsaved",
                self.document.id
            );
        }
        Ok(())
    }

    /// Stamp the saved id into snapshots that have none and carry the server's
    /// slug into snapshots that still hold the slug that was sent
    fn adopt_identity(&mut self, pending: &PendingSave, saved: &PageDocument) {
        let id = saved.id.clone();
        let slug = saved.slug.clone();
        self.history.update_all(|snapshot| {
            if snapshot.id.is_none() {
                snapshot.id = id.clone();
            }
            if snapshot.slug == pending.slug {
                snapshot.slug = slug.clone();
            }
        });
    }

    /// Run a complete save cycle against `store`
    pub fn save_with<S: PageStore>(&mut self, store: &mut S) -> Result<()> {
        let payload = self.begin_save()?;
        let result = store.save_page(payload.id.as_deref(), &payload);
        self.finish_save(result)
    }

    /// Load `page_id` from `store` into the session
    pub fn load_from<S: PageStore>(&mut self, store: &S, page_id: &str) -> Result<()> {
        let page = store.load_page(page_id)?;
        self.load(page);
        Ok(())
    }

    /// Leave-page warning while there are unsaved changes
    pub fn before_unload_warning(&self) -> Option<&str> {
        self.dirty.then_some(self.config.unsaved_changes_message.as_str())
    }
}
