use std::path::PathBuf;

use tilekit_core::{Point, Size, Tile, Tileset, TilesetId};
use tilekit_editor::{Editor, EditorError, EditorSession, PropertyValue, TilesetRow};
use tilekit_settings::Config;

fn session() -> (EditorSession, TilesetId) {
    let mut config = Config::default();
    config.properties.name_suggestions = vec!["grassland".to_string()];
    config.properties.image_file_filter = "PNG (*.png)".to_string();

    let mut session = EditorSession::new(&config);
    let mut tileset = Tileset::new("grass", Size::new(16, 16))
        .with_image("grass.png")
        .with_columns(4);
    tileset.add_tile(Tile::with_image(7, "bush.png"));
    let id = session.document_mut().add_tileset(tileset);
    session.open_tileset(id).unwrap();
    (session, id)
}

#[test]
fn test_editor_input_becomes_undoable_command() {
    let (mut session, id) = session();
    let editor = session
        .browser_mut()
        .unwrap()
        .create_editor(TilesetRow::TileOffset)
        .unwrap();

    assert_eq!(session.edit(editor, Point::new(4, 2).into()), Ok(true));
    assert_eq!(session.document().tileset(id).unwrap().tile_offset, Point::new(4, 2));
    let shown = session.browser().and_then(|b| b.editor(editor)).map(Editor::value);
    assert_eq!(shown, Some(PropertyValue::Point(Point::new(4, 2))));

    session.undo().unwrap();
    let shown = session.browser().and_then(|b| b.editor(editor)).map(Editor::value);
    assert_eq!(shown, Some(PropertyValue::Point(Point::ZERO)));
}

#[test]
fn test_image_rows_use_configured_filter() {
    let (mut session, _) = session();
    let browser = session.browser_mut().unwrap();
    let image = browser.create_editor(TilesetRow::Image).unwrap();
    let tile = browser.create_editor(TilesetRow::TileImage(7)).unwrap();

    for id in [image, tile] {
        let filter = browser
            .editor(id)
            .and_then(Editor::as_file_edit)
            .map(|edit| edit.filter().to_string());
        assert_eq!(filter.as_deref(), Some("PNG (*.png)"));
    }
}

#[test]
fn test_tile_image_commit() {
    let (mut session, id) = session();
    let value = PropertyValue::FilePath(PathBuf::from("tree.png"));
    assert_eq!(session.commit(TilesetRow::TileImage(7), value.clone()), Ok(true));

    let browser = session.browser().unwrap();
    assert_eq!(browser.value(TilesetRow::TileImage(7)), Some(&value));
    assert_eq!(
        session.undo_stack().undo_text().as_deref(),
        Some("Change Tile Image")
    );

    session.undo().unwrap();
    let tile = session
        .document()
        .tile(tilekit_core::TileId::new(id, 7))
        .unwrap();
    assert_eq!(tile.image_source, PathBuf::from("bush.png"));
}

#[test]
fn test_invalid_parameters_leave_history_untouched() {
    let (mut session, id) = session();
    let mut params = session.document().tileset(id).unwrap().parameters();
    params.tile_size = Size::new(0, 0);

    let err = session
        .commit(TilesetRow::Parameters, PropertyValue::TilesetParameters(params))
        .unwrap_err();
    assert!(matches!(err, EditorError::Document(_)));
    assert_eq!(session.undo_stack().count(), 0);
    assert!(!session.is_modified());
}

#[test]
fn test_removed_tileset_keeps_rows() {
    let (mut session, id) = session();
    session.document_mut().remove_tileset(id).unwrap();

    assert!(session.undo().is_err());
    let browser = session.browser().unwrap();
    assert_eq!(
        browser.value(TilesetRow::Name),
        Some(&PropertyValue::from("grass"))
    );
}
