use std::path::PathBuf;

use tilekit_core::{Color, Size, TilesetParameters};
use tilekit_editor::{
    AttributeValue, Editor, EditorFactory, EditorKind, PropertyManager, PropertyValue,
};
use tilekit_editor::properties::{FILTER_ATTRIBUTE, SUGGESTIONS_ATTRIBUTE};

#[test]
fn test_value_types_get_generic_editor() {
    let mut manager = PropertyManager::new();
    let mut factory = EditorFactory::new();

    for value in [
        PropertyValue::Int(3),
        PropertyValue::Bool(true),
        PropertyValue::Color(Some(Color::rgb(0, 128, 255))),
        PropertyValue::Size(Size::new(8, 8)),
    ] {
        let property = manager.add_property("value", value.clone());
        let editor = factory.create_editor(&manager, property).unwrap();
        let editor = factory.editor(editor).unwrap();
        assert_eq!(editor.kind(), EditorKind::Value);
        assert_eq!(editor.value(), value);
    }
}

#[test]
fn test_string_with_suggestions_gets_completer() {
    let mut manager = PropertyManager::new();
    let mut factory = EditorFactory::new();
    let name = manager.add_property("Name", "grass".into());
    manager
        .set_attribute(
            name,
            SUGGESTIONS_ATTRIBUTE,
            AttributeValue::List(vec!["Desert".to_string(), "dungeon".to_string()]),
        )
        .unwrap();

    let id = factory.create_editor(&manager, name).unwrap();
    let edit = factory.editor(id).and_then(Editor::as_line_edit).unwrap();
    assert_eq!(edit.text(), "grass");
    let completer = edit.completer().unwrap();
    assert_eq!(completer.complete("D"), vec!["Desert", "dungeon"]);
    assert_eq!(completer.complete("dune"), Vec::<&str>::new());
}

#[test]
fn test_tileset_parameters_editor_follows_property() {
    let mut manager = PropertyManager::new();
    let mut factory = EditorFactory::new();
    let initial = TilesetParameters {
        image_source: PathBuf::from("terrain.png"),
        tile_size: Size::new(16, 16),
        ..Default::default()
    };
    let property = manager.add_property(
        "Tileset Parameters",
        PropertyValue::TilesetParameters(initial.clone()),
    );
    let id = factory.create_editor(&manager, property).unwrap();

    let mut updated = initial.clone();
    updated.margin = 1;
    let value = PropertyValue::TilesetParameters(updated.clone());
    assert_eq!(manager.set_value(property, value.clone()), Ok(true));
    factory.property_changed(property, &value);

    let edit = factory
        .editor(id)
        .and_then(Editor::as_tileset_parameters_edit)
        .unwrap();
    assert_eq!(edit.parameters(), &updated);
}

#[test]
fn test_filter_update_reaches_only_that_property() {
    let mut manager = PropertyManager::new();
    let mut factory = EditorFactory::new();
    let image = manager.add_property("Image", PropertyValue::FilePath(PathBuf::new()));
    let other = manager.add_property("Other", PropertyValue::FilePath(PathBuf::new()));
    let image_edit = factory.create_editor(&manager, image).unwrap();
    let other_edit = factory.create_editor(&manager, other).unwrap();

    factory.attribute_changed(
        image,
        FILTER_ATTRIBUTE,
        &AttributeValue::Text("Images (*.png)".to_string()),
    );

    let filter_of = |id| {
        factory
            .editor(id)
            .and_then(Editor::as_file_edit)
            .map(|edit| edit.filter().to_string())
    };
    assert_eq!(filter_of(image_edit).as_deref(), Some("Images (*.png)"));
    assert_eq!(filter_of(other_edit).as_deref(), Some(""));
}
