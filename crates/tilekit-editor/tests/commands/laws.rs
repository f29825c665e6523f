use proptest::prelude::*;
use tilekit_core::{MapDocument, Point, Size, Tileset, TilesetId};
use tilekit_editor::{
    ChangeTilesetColumnCount, ChangeTilesetTileOffset, EditorCommand, RenameTileset, UndoCommand,
    UndoStack,
};

#[derive(Debug, Clone)]
enum Edit {
    Rename(String),
    Offset(i32, i32),
    Columns(u32),
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(Edit::Rename),
        (-64i32..64, -64i32..64).prop_map(|(x, y)| Edit::Offset(x, y)),
        (0u32..32).prop_map(Edit::Columns),
    ]
}

fn point_strategy() -> impl Strategy<Value = Point> {
    (-256i32..256, -256i32..256).prop_map(|(x, y)| Point::new(x, y))
}

fn document() -> (MapDocument, TilesetId) {
    let mut doc = MapDocument::new();
    let id = doc.add_tileset(Tileset::new("grass", Size::new(16, 16)).with_columns(4));
    (doc, id)
}

fn command(doc: &MapDocument, id: TilesetId, edit: &Edit) -> EditorCommand {
    match edit {
        Edit::Rename(name) => RenameTileset::new(doc, id, name.clone())
            .unwrap_or_else(|e| panic!("rename: {e}"))
            .into(),
        Edit::Offset(x, y) => ChangeTilesetTileOffset::new(doc, id, Point::new(*x, *y))
            .unwrap_or_else(|e| panic!("offset: {e}"))
            .into(),
        Edit::Columns(n) => ChangeTilesetColumnCount::new(doc, id, *n)
            .unwrap_or_else(|e| panic!("columns: {e}"))
            .into(),
    }
}

fn snapshot(doc: &MapDocument, id: TilesetId) -> Tileset {
    doc.tileset(id)
        .unwrap_or_else(|e| panic!("snapshot: {e}"))
        .clone()
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn undo_is_idempotent_and_redo_does_not_drift(edit in edit_strategy()) {
        let (mut doc, id) = document();
        let before = snapshot(&doc, id);
        let mut cmd = command(&doc, id, &edit);

        cmd.redo(&mut doc).unwrap();
        let after = snapshot(&doc, id);

        cmd.undo(&mut doc).unwrap();
        cmd.undo(&mut doc).unwrap();
        prop_assert_eq!(snapshot(&doc, id), before);

        cmd.redo(&mut doc).unwrap();
        cmd.undo(&mut doc).unwrap();
        cmd.redo(&mut doc).unwrap();
        prop_assert_eq!(snapshot(&doc, id), after);
    }

    #[test]
    fn undoing_everything_restores_the_original(edits in prop::collection::vec(edit_strategy(), 1..24)) {
        let (mut doc, id) = document();
        let original = snapshot(&doc, id);
        let mut stack = UndoStack::with_limit(0);

        for edit in &edits {
            let cmd = command(&doc, id, edit);
            stack.push(&mut doc, cmd).unwrap();
        }
        let edited = snapshot(&doc, id);

        while stack.can_undo() {
            stack.undo(&mut doc).unwrap();
        }
        prop_assert_eq!(snapshot(&doc, id), original);

        while stack.can_redo() {
            stack.redo(&mut doc).unwrap();
        }
        prop_assert_eq!(snapshot(&doc, id), edited);
    }

    #[test]
    fn merged_offsets_span_first_old_to_last_new(points in prop::collection::vec(point_strategy(), 1..16)) {
        let (mut doc, id) = document();
        let mut stack = UndoStack::new();
        // move off the clean index so the first offset edit can absorb the rest
        let rename = RenameTileset::new(&doc, id, "meadow").unwrap();
        stack.push(&mut doc, rename).unwrap();

        for point in &points {
            let cmd = ChangeTilesetTileOffset::new(&doc, id, *point).unwrap();
            stack.push(&mut doc, cmd).unwrap();
        }
        prop_assert_eq!(stack.undo_count(), 2);

        stack.undo(&mut doc).unwrap();
        prop_assert_eq!(snapshot(&doc, id).tile_offset, Point::ZERO);

        stack.redo(&mut doc).unwrap();
        prop_assert_eq!(snapshot(&doc, id).tile_offset, points[points.len() - 1]);
    }
}
