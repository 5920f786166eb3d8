// Undo/redo behaviour through the builder session

use page_builder_wasm::{BuilderConfig, BuilderSession, History, Orientation, PageDocument};

#[test]
fn test_undo_twice_then_record_discards_redo() {
    let s0 = PageDocument::new_page("S0");
    let mut history = History::new(s0.clone(), 50);

    let mut s1 = s0.clone();
    s1.title = "S1".into();
    let mut s2 = s0.clone();
    s2.title = "S2".into();
    history.record(s1);
    history.record(s2);

    history.undo();
    assert_eq!(history.undo().map(|p| p.title), Some("S0".to_string()));

    let mut s3 = s0.clone();
    s3.title = "S3".into();
    history.record(s3);
    assert!(!history.can_redo());
    assert_eq!(history.len(), 2);
}

#[test]
fn test_load_is_the_undo_floor() {
    let page = PageDocument::new_page("Floor");
    let mut session = BuilderSession::new(page.clone(), BuilderConfig::default());
    assert!(!session.undo());
    assert_eq!(session.document(), &page);
}

#[test]
fn test_history_limit_from_config() {
    let config = BuilderConfig::from_json(Some(r#"{"historyLimit": 3}"#)).unwrap();
    let mut session = BuilderSession::new(PageDocument::new_page("Capped"), config);

    for i in 0..6 {
        session.set_title(&format!("Title {}", i));
    }

    let mut steps = 0;
    while session.undo() {
        steps += 1;
    }
    assert_eq!(steps, 2);
    assert_eq!(session.document().title, "Title 3");
}

#[test]
fn test_undo_marks_dirty_even_after_save() {
    let page = PageDocument::new_page("Dirty");
    let root = page.grid_cells.roots()[0].clone();
    let mut session = BuilderSession::new(page, BuilderConfig::default());
    let mut store = page_builder_wasm::MemoryPageStore::new();

    session.split_cell(&root, Orientation::Horizontal).unwrap();
    session.save_with(&mut store).unwrap();
    assert!(!session.is_dirty());

    assert!(session.undo());
    assert!(session.is_dirty());
    assert!(session.grid_cells().find(&root).unwrap().is_leaf());
}
