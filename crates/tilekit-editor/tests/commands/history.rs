use std::sync::Arc;

use parking_lot::Mutex;
use tilekit_core::{
    DocumentEvent, EventCategory, EventFilter, HistoryEvent, MapDocument, Point, Size, Tileset,
    TilesetId,
};
use tilekit_editor::{ChangeTilesetColumnCount, ChangeTilesetTileOffset, RenameTileset, UndoStack};
use tilekit_settings::HistorySettings;

fn history_events(doc: &MapDocument) -> Arc<Mutex<Vec<HistoryEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    doc.event_bus().subscribe(
        EventFilter::Categories(vec![EventCategory::History]),
        move |event| {
            if let DocumentEvent::History(e) = event {
                sink.lock().push(e);
            }
        },
    );
    events
}

fn document() -> (MapDocument, TilesetId) {
    let mut doc = MapDocument::new();
    let id = doc.add_tileset(Tileset::new("grass", Size::new(16, 16)));
    (doc, id)
}

#[test]
fn test_navigation_publishes_index_and_clean_changes() {
    let (mut doc, id) = document();
    let events = history_events(&doc);
    let mut stack = UndoStack::new();

    let cmd = RenameTileset::new(&doc, id, "meadow").unwrap();
    stack.push(&mut doc, cmd).unwrap();
    stack.undo(&mut doc).unwrap();

    assert_eq!(
        *events.lock(),
        vec![
            HistoryEvent::IndexChanged {
                index: 1,
                can_undo: true,
                can_redo: false
            },
            HistoryEvent::CleanChanged { clean: false },
            HistoryEvent::IndexChanged {
                index: 0,
                can_undo: false,
                can_redo: true
            },
            HistoryEvent::CleanChanged { clean: true },
        ]
    );
}

#[test]
fn test_settings_configure_stack() {
    let (mut doc, id) = document();
    let settings = HistorySettings {
        undo_limit: 3,
        merge_tile_offset_edits: false,
    };
    let mut stack = UndoStack::from_settings(&settings);
    assert_eq!(stack.undo_limit(), 3);
    assert!(!stack.is_merge_enabled());

    for x in 1..=5 {
        let cmd = ChangeTilesetTileOffset::new(&doc, id, Point::new(x, 0)).unwrap();
        stack.push(&mut doc, cmd).unwrap();
    }
    assert_eq!(stack.undo_count(), 3);

    while stack.can_undo() {
        stack.undo(&mut doc).unwrap();
    }
    // the two oldest edits were evicted
    assert_eq!(doc.tileset(id).unwrap().tile_offset, Point::new(2, 0));
}

#[test]
fn test_unlimited_history() {
    let (mut doc, id) = document();
    let mut stack = UndoStack::with_limit(0);
    for columns in 1..=250 {
        let cmd = ChangeTilesetColumnCount::new(&doc, id, columns).unwrap();
        stack.push(&mut doc, cmd).unwrap();
    }
    assert_eq!(stack.undo_count(), 250);
}

#[test]
fn test_macro_mixes_kinds_and_undoes_once() {
    let (mut doc, id) = document();
    let mut stack = UndoStack::new();

    stack.begin_macro("Reset Grass").unwrap();
    let rename = RenameTileset::new(&doc, id, "lawn").unwrap();
    stack.push(&mut doc, rename).unwrap();
    for x in 1..=3 {
        let cmd = ChangeTilesetTileOffset::new(&doc, id, Point::new(x, x)).unwrap();
        stack.push(&mut doc, cmd).unwrap();
    }
    let columns = ChangeTilesetColumnCount::new(&doc, id, 12).unwrap();
    stack.push(&mut doc, columns).unwrap();
    stack.end_macro(&doc).unwrap();

    assert_eq!(stack.undo_count(), 1);
    stack.undo(&mut doc).unwrap();

    let tileset = doc.tileset(id).unwrap();
    assert_eq!(tileset.name, "grass");
    assert_eq!(tileset.tile_offset, Point::ZERO);
    assert_eq!(tileset.column_count, 0);

    stack.redo(&mut doc).unwrap();
    let tileset = doc.tileset(id).unwrap();
    assert_eq!(tileset.name, "lawn");
    assert_eq!(tileset.tile_offset, Point::new(3, 3));
    assert_eq!(tileset.column_count, 12);
}
