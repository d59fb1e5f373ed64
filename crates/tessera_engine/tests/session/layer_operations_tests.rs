//! Tests for canvas and layer operations

use pretty_assertions::assert_eq;
use tessera_engine::{EditorApi, EngineError, MAX_LAYER_COUNT};

use super::{create_test_session, pattern_grid, BLUE, RED};

// ============================================================================
// Canvas Tests
// ============================================================================

#[test]
fn test_new_canvas_replaces_content() {
    let mut session = create_test_session(4);
    session.import_grid(pattern_grid(4)).unwrap();

    session.new_canvas(16).unwrap();

    assert_eq!(session.grid_size(), 16);
    assert_eq!(session.layer_count(), 2);
    assert!(session.composite().is_empty());
    assert!(!session.can_undo());
}

#[test]
fn test_new_canvas_rejects_out_of_range_sizes() {
    let mut session = create_test_session(4);
    session.import_grid(pattern_grid(4)).unwrap();

    for size in [0, -3, 1025] {
        let result = session.new_canvas(size);
        assert!(matches!(result, Err(EngineError::InvalidCanvasSize { size: s }) if s == size));
    }

    assert_eq!(session.grid_size(), 4);
    assert_eq!(session.active_grid(), pattern_grid(4));
}

#[test]
fn test_new_canvas_from_text() {
    let mut session = create_test_session(4);

    assert!(matches!(session.new_canvas_from_str("abc"), Err(EngineError::CanvasSizeNotNumeric { .. })));
    assert!(matches!(session.new_canvas_from_str("0"), Err(EngineError::InvalidCanvasSize { size: 0 })));
    assert_eq!(session.grid_size(), 4);

    session.new_canvas_from_str(" 24 ").unwrap();
    assert_eq!(session.grid_size(), 24);
}

#[test]
fn test_set_layer_count() {
    let mut session = create_test_session(4);

    assert!(matches!(session.set_layer_count(0), Err(EngineError::InvalidLayerCount { count: 0 })));
    assert!(matches!(session.set_layer_count(MAX_LAYER_COUNT + 1), Err(EngineError::InvalidLayerCount { .. })));
    assert_eq!(session.layer_count(), 2);

    session.set_layer_count(5).unwrap();
    assert_eq!(session.layer_count(), 5);
    assert_eq!(session.grid_size(), 4);
}

// ============================================================================
// Layer Tests
// ============================================================================

#[test]
fn test_set_active_layer_out_of_range() {
    let mut session = create_test_session(4);

    assert!(!session.set_active_layer(2).unwrap());
    assert_eq!(session.active_layer(), 0);
    assert!(session.set_active_layer(1).unwrap());
    assert_eq!(session.active_layer(), 1);
}

#[test]
fn test_upper_layer_wins_in_composite() {
    let mut session = create_test_session(2);
    session.set_brush_color(RED);
    session.fill_layer().unwrap();
    session.set_active_layer(1).unwrap();
    session.set_brush_color(BLUE);
    session.fill_at((0, 0).into()).unwrap();

    assert_eq!(session.composite().get((1, 1)), Some(BLUE));

    assert!(session.toggle_layer_visibility(1));
    assert_eq!(session.composite().get((1, 1)), Some(RED));
    assert!(!session.toggle_layer_visibility(7));
}

#[test]
fn test_move_layer_changes_stacking() {
    let mut session = create_test_session(2);
    session.set_brush_color(RED);
    session.fill_layer().unwrap();
    session.set_active_layer(1).unwrap();
    session.set_brush_color(BLUE);
    session.fill_layer().unwrap();

    assert!(session.move_layer_down().unwrap());
    assert_eq!(session.active_layer(), 0);
    assert_eq!(session.composite().get((0, 0)), Some(RED));
    assert!(!session.move_layer_down().unwrap());

    assert!(session.move_layer_up().unwrap());
    assert_eq!(session.composite().get((0, 0)), Some(BLUE));
    assert!(!session.move_layer_up().unwrap());
}

#[test]
fn test_rename_and_toggle_animated() {
    let mut session = create_test_session(2);

    assert!(session.rename_layer(1, "Outline"));
    assert!(session.toggle_layer_animated(1));

    let layer = session.model().layer(1).unwrap();
    assert_eq!(layer.title(), "Outline");
    assert!(!layer.properties.is_animated);
    assert!(!session.rename_layer(9, "nope"));
}

#[test]
fn test_editor_api_is_object_safe() {
    let mut session = create_test_session(4);
    let api: &mut dyn EditorApi = &mut session;

    api.set_brush_size(3);
    api.new_canvas(8).unwrap();

    assert_eq!(api.grid_size(), 8);
    assert_eq!(api.brush_size(), 3);
    assert_eq!(api.layer_grid(0).unwrap().size(), 8);
    assert!(api.layer_grid(5).is_none());
}
