use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tilekit_core::{
    Color, DocumentEvent, EventCategory, EventFilter, MapDocument, Point, Size, Tile, TileId,
    Tileset, TilesetEvent, TilesetId,
};
use tilekit_editor::{
    ChangeTileImageSource, ChangeTilesetParameters, ChangeTilesetTileOffset, EditorError,
    RenameTileset, UndoStack,
};

fn grass_document() -> (MapDocument, TilesetId) {
    let mut doc = MapDocument::new();
    let mut tileset = Tileset::new("grass", Size::new(16, 16))
        .with_image("grass.png")
        .with_columns(8);
    tileset.add_tile(Tile::with_image(0, "tuft.png"));
    let id = doc.add_tileset(tileset);
    (doc, id)
}

#[test]
fn test_offset_round_trip_through_stack() {
    let (mut doc, id) = grass_document();
    let mut stack = UndoStack::new();

    let cmd = ChangeTilesetTileOffset::new(&doc, id, Point::new(4, 2)).unwrap();
    stack.push(&mut doc, cmd).unwrap();
    assert_eq!(doc.tileset(id).unwrap().tile_offset, Point::new(4, 2));

    stack.undo(&mut doc).unwrap();
    assert_eq!(doc.tileset(id).unwrap().tile_offset, Point::new(0, 0));

    stack.redo(&mut doc).unwrap();
    assert_eq!(doc.tileset(id).unwrap().tile_offset, Point::new(4, 2));
}

#[test]
fn test_consecutive_renames_are_separate_entries() {
    let (mut doc, id) = grass_document();
    let mut stack = UndoStack::new();

    let first = RenameTileset::new(&doc, id, "grass_v2").unwrap();
    stack.push(&mut doc, first).unwrap();
    let second = RenameTileset::new(&doc, id, "grass_v3").unwrap();
    stack.push(&mut doc, second).unwrap();
    assert_eq!(stack.undo_count(), 2);

    stack.undo(&mut doc).unwrap();
    assert_eq!(doc.tileset(id).unwrap().name, "grass_v2");
    stack.undo(&mut doc).unwrap();
    assert_eq!(doc.tileset(id).unwrap().name, "grass");
}

#[test]
fn test_parameter_change_reverts_with_one_notification() {
    let (mut doc, id) = grass_document();
    let mut stack = UndoStack::new();

    let mut params = doc.tileset(id).unwrap().parameters();
    params.tile_size = Size::new(32, 32);
    params.margin = 2;
    params.transparent_color = Some(Color::rgb(255, 0, 255));
    let cmd = ChangeTilesetParameters::new(&doc, id, params).unwrap();
    stack.push(&mut doc, cmd).unwrap();

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    doc.event_bus().subscribe(
        EventFilter::Categories(vec![EventCategory::Tileset]),
        move |event| sink.lock().push(event),
    );

    stack.undo(&mut doc).unwrap();

    assert_eq!(
        *events.lock(),
        vec![DocumentEvent::Tileset(TilesetEvent::ParametersChanged { id })]
    );
    let tileset = doc.tileset(id).unwrap();
    assert_eq!(tileset.tile_size, Size::new(16, 16));
    assert_eq!(tileset.margin, 0);
    assert_eq!(tileset.transparent_color, None);
}

#[test]
fn test_tile_image_through_stack() {
    let (mut doc, id) = grass_document();
    let mut stack = UndoStack::new();
    let tile = TileId::new(id, 0);

    let cmd = ChangeTileImageSource::new(&doc, tile, "flower.png").unwrap();
    stack.push(&mut doc, cmd).unwrap();
    assert_eq!(stack.undo_text().as_deref(), Some("Change Tile Image"));

    stack.undo(&mut doc).unwrap();
    assert_eq!(doc.tile(tile).unwrap().image_source, PathBuf::from("tuft.png"));
}

#[test]
fn test_removed_target_fails_navigation() {
    let (mut doc, id) = grass_document();
    let mut stack = UndoStack::new();

    let cmd = RenameTileset::new(&doc, id, "grass_v2").unwrap();
    stack.push(&mut doc, cmd).unwrap();
    stack.undo(&mut doc).unwrap();
    doc.remove_tileset(id).unwrap();

    let err = stack.redo(&mut doc).unwrap_err();
    assert!(err.is_target_not_found());
    assert!(matches!(err, EditorError::Document(_)));
    assert_eq!(stack.redo_count(), 1);
}
