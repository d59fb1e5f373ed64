//! Tests for saving, loading and exporting a session

use pretty_assertions::assert_eq;
use tessera_engine::{Color, EditorSession, EngineError, Position, StrokeTool};

use super::{create_test_session, BLUE, RED};

/// Session with two layers, several frames and non-default brush settings.
fn create_edited_session() -> EditorSession {
    let mut session = create_test_session(6);
    session.set_brush_color(RED);
    session.set_brush_size(2);
    session.begin_stroke(StrokeTool::Brush, Position::new(1, 1)).unwrap();
    session.end_gesture().unwrap();
    session.add_frame().unwrap();
    session.flip(tessera_engine::FlipDirection::Horizontal).unwrap();

    session.set_active_layer(1).unwrap();
    session.set_brush_color(BLUE);
    session.fill_at(Position::new(5, 5)).unwrap();
    session.add_blank_frame().unwrap();
    session.add_blank_frame().unwrap();
    session.rename_layer(1, "Sky");
    session.toggle_layer_visibility(1);

    session.set_frame_rate(15);
    session.set_background(Color::new(30, 40, 50));
    session.set_cell_size(24);
    session
}

// ============================================================================
// Project Round Trip Tests
// ============================================================================

#[test]
fn test_project_round_trip_restores_session() {
    let mut original = create_edited_session();
    let data = original.project_bytes().unwrap();

    let mut loaded = EditorSession::default();
    loaded.load_project_bytes(&data).unwrap();

    assert_eq!(loaded.snapshot().unwrap(), original.snapshot().unwrap());
    assert_eq!(loaded.grid_size(), 6);
    assert_eq!(loaded.active_layer(), 1);
    assert_eq!(loaded.current_frame(), 2);
    assert_eq!(loaded.frame_rate(), 15);
    assert_eq!(loaded.brush_size(), 2);
    assert_eq!(loaded.brush_color(), BLUE);
    assert_eq!(loaded.background(), Color::new(30, 40, 50));
    assert_eq!(loaded.cell_size(), 24);
    assert_eq!(loaded.model().layer(1).unwrap().title(), "Sky");
    assert_eq!(loaded.composite(), original.composite());
}

#[test]
fn test_project_file_round_trip() {
    let mut original = create_edited_session();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(format!("scene.{}", tessera_engine::export::PROJECT_EXTENSION));

    original.save_project(&path).unwrap();
    let mut loaded = create_test_session(3);
    loaded.load_project(&path).unwrap();

    assert_eq!(loaded.snapshot().unwrap(), original.snapshot().unwrap());
}

#[test]
fn test_uncommitted_state_is_saved() {
    let mut session = create_test_session(4);
    session.set_brush_color(RED);
    session.fill_layer().unwrap();

    let data = session.project_bytes().unwrap();
    let mut loaded = EditorSession::default();
    loaded.load_project_bytes(&data).unwrap();

    assert_eq!(loaded.active_grid().painted_count(), 16);
}

#[test]
fn test_malformed_project_leaves_session_unchanged() {
    let mut session = create_edited_session();
    let before = session.snapshot().unwrap();
    let mut data = session.project_bytes().unwrap();
    data.truncate(data.len() / 2);

    assert!(session.load_project_bytes(&data).is_err());
    assert!(matches!(session.load_project_bytes(b"junk"), Err(EngineError::Project(_))));

    assert_eq!(session.snapshot().unwrap(), before);
}

#[test]
fn test_load_missing_file_fails() {
    let mut session = create_test_session(4);
    let dir = tempfile::tempdir().unwrap();

    let result = session.load_project(&dir.path().join("nothing.tspj"));

    assert!(matches!(result, Err(EngineError::Io(_))));
    assert_eq!(session.grid_size(), 4);
}

#[test]
fn test_save_rejected_during_gesture() {
    let mut session = create_test_session(4);
    session.begin_move(Position::new(0, 0)).unwrap();

    assert!(matches!(session.project_bytes(), Err(EngineError::GestureInProgress { .. })));
    session.end_gesture().unwrap();
    assert!(session.project_bytes().is_ok());
}

// ============================================================================
// Export Tests
// ============================================================================

#[test]
fn test_export_png_uses_export_scale() {
    let mut session = create_edited_session();
    session.set_export_scale(2);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("still.png");

    session.export_png(&path).unwrap();

    let image = image::open(&path).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (12, 12));
}

#[test]
fn test_export_sequence_uses_longest_layer() {
    let mut session = create_edited_session();
    let dir = tempfile::tempdir().unwrap();

    let paths = session.export_sequence(dir.path()).unwrap();

    assert_eq!(paths.len(), 3);
}

#[cfg(feature = "gif")]
#[test]
fn test_export_gif_frame_count() {
    let mut session = create_edited_session();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("anim.gif");

    let frames = session.export_gif(&path).unwrap();

    // layer lengths 2 and 3
    assert_eq!(frames, 6);
    assert!(path.exists());
}
