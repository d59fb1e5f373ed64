//! Tests for strokes, move and rotate gestures

use std::{
    f64::consts::PI,
    time::{Duration, Instant},
};

use pretty_assertions::assert_eq;
use tessera_engine::{
    filters::{flip_horizontal, flip_vertical},
    EngineError, GestureKind, PixelGrid, Position, StampBuffer, StrokeTool,
};

use super::{create_test_session, pattern_grid, BLUE, RED};

// ============================================================================
// Stroke Tests
// ============================================================================

#[test]
fn test_brush_stroke_then_undo_restores_grid() {
    let mut session = create_test_session(4);
    session.set_brush_color(RED);
    let before = session.active_grid();

    session.begin_stroke(StrokeTool::Brush, Position::new(2, 2)).unwrap();
    session.end_gesture().unwrap();
    assert_eq!(session.active_grid().get((2, 2)), Some(RED));

    assert!(session.undo().unwrap());
    assert_eq!(session.active_grid(), before);
    assert!(!session.can_undo());
}

#[test]
fn test_stroke_is_a_single_undo_step() {
    let mut session = create_test_session(8);
    session.set_brush_color(BLUE);

    session.begin_stroke(StrokeTool::Brush, Position::new(0, 0)).unwrap();
    for x in 1..8 {
        session.continue_stroke(Position::new(x, 0)).unwrap();
    }
    session.end_gesture().unwrap();
    assert_eq!(session.active_grid().painted_count(), 8);

    assert!(session.undo().unwrap());
    assert!(session.active_grid().is_empty());
    assert!(!session.undo().unwrap());
}

#[test]
fn test_eraser_stroke() {
    let mut session = create_test_session(4);
    session.set_brush_color(RED);
    session.fill_layer().unwrap();

    session.begin_stroke(StrokeTool::Eraser, Position::new(1, 1)).unwrap();
    session.end_gesture().unwrap();

    assert_eq!(session.active_grid().get((1, 1)), None);
    assert_eq!(session.active_grid().painted_count(), 15);
}

#[test]
fn test_stamp_stroke_uses_stamp_buffer() {
    let mut session = create_test_session(4);
    let mut stamp = StampBuffer::new(2, 2);
    stamp.set((0, 0), Some(RED));
    stamp.set((1, 1), Some(BLUE));
    *session.stamp_mut() = stamp;
    session.set_brush_size(4);

    session.begin_stroke(StrokeTool::Stamp, Position::new(2, 2)).unwrap();
    session.end_gesture().unwrap();

    let grid = session.active_grid();
    assert_eq!(grid.get((1, 1)), Some(RED));
    assert_eq!(grid.get((3, 3)), Some(BLUE));
    assert_eq!(grid.get((2, 0)), None);
    assert_eq!(grid.painted_count(), 8);
}

#[test]
fn test_brush_blur_stroke_softens_edge() {
    let mut session = create_test_session(8);
    session.set_brush_color(RED);
    session.set_brush_size(3);
    session.begin_stroke(StrokeTool::Brush, Position::new(2, 2)).unwrap();
    session.end_gesture().unwrap();

    session.begin_stroke(StrokeTool::BrushBlur, Position::new(3, 2)).unwrap();
    session.end_gesture().unwrap();

    // the cell right of the painted block picks up partial coverage
    let edge = session.active_grid().get((4, 2)).unwrap();
    assert!(edge.a > 0 && edge.a < 255, "alpha {}", edge.a);
}

#[test]
fn test_finished_stroke_is_committed_to_frame() {
    let mut session = create_test_session(4);
    session.set_brush_color(RED);

    session.begin_stroke(StrokeTool::Brush, Position::new(0, 3)).unwrap();
    session.end_gesture().unwrap();

    let frames = session.model().frames(0).unwrap();
    assert_eq!(frames[0].grid().get((0, 3)), Some(RED));
}

// ============================================================================
// Gesture Exclusivity Tests
// ============================================================================

#[test]
fn test_second_gesture_is_rejected() {
    let mut session = create_test_session(4);
    session.begin_stroke(StrokeTool::Brush, Position::new(0, 0)).unwrap();

    let result = session.begin_move(Position::new(1, 1));

    match result {
        Err(EngineError::GestureInProgress { active }) => assert_eq!(active, "brush stroke"),
        other => panic!("expected GestureInProgress, got {other:?}"),
    }
    assert_eq!(session.active_gesture(), Some(GestureKind::Stroke(StrokeTool::Brush)));
}

#[test]
fn test_edits_are_rejected_during_gesture() {
    let mut session = create_test_session(4);
    session.begin_move(Position::new(0, 0)).unwrap();

    assert!(matches!(session.fill_at(Position::new(1, 1)), Err(EngineError::GestureInProgress { .. })));
    assert!(matches!(session.undo(), Err(EngineError::GestureInProgress { .. })));
    assert!(matches!(session.add_frame(), Err(EngineError::GestureInProgress { .. })));
    assert!(matches!(session.new_canvas(8), Err(EngineError::GestureInProgress { .. })));
    assert!(matches!(session.continue_stroke(Position::new(1, 1)), Err(EngineError::GestureInProgress { .. })));
    assert_eq!(session.grid_size(), 4);
}

#[test]
fn test_updates_without_gesture_fail() {
    let mut session = create_test_session(4);

    assert!(matches!(session.update_move(Position::new(1, 1)), Err(EngineError::NoGestureActive)));
    assert!(matches!(session.update_rotate(Position::new(1, 1)), Err(EngineError::NoGestureActive)));
    assert!(matches!(session.end_gesture(), Err(EngineError::NoGestureActive)));
    assert!(matches!(session.cancel_gesture(), Err(EngineError::NoGestureActive)));
}

#[test]
fn test_cancel_restores_grid_without_undo_step() {
    let mut session = create_test_session(4);
    session.set_brush_color(RED);
    session.begin_stroke(StrokeTool::Brush, Position::new(1, 1)).unwrap();
    session.continue_stroke(Position::new(2, 2)).unwrap();

    session.cancel_gesture().unwrap();

    assert!(session.active_grid().is_empty());
    assert!(!session.can_undo());
    assert_eq!(session.active_gesture(), None);
}

// ============================================================================
// Move Tests
// ============================================================================

#[test]
fn test_move_gesture_translates_layer() {
    let mut session = create_test_session(4);
    session.set_brush_color(RED);
    session.begin_stroke(StrokeTool::Brush, Position::new(0, 0)).unwrap();
    session.end_gesture().unwrap();

    session.begin_move(Position::new(1, 1)).unwrap();
    session.update_move(Position::new(2, 1)).unwrap();
    session.update_move(Position::new(3, 3)).unwrap();
    session.end_gesture().unwrap();

    let grid = session.active_grid();
    assert_eq!(grid.get((2, 2)), Some(RED));
    assert_eq!(grid.painted_count(), 1);

    assert!(session.undo().unwrap());
    assert_eq!(session.active_grid().get((0, 0)), Some(RED));
}

#[test]
fn test_move_back_to_anchor_records_no_undo() {
    let mut session = create_test_session(4);
    session.import_grid(pattern_grid(4)).unwrap();
    let undo_before = session.model().active_buffer().undo_len();

    session.begin_move(Position::new(2, 2)).unwrap();
    session.update_move(Position::new(0, 1)).unwrap();
    session.update_move(Position::new(2, 2)).unwrap();
    session.end_gesture().unwrap();

    assert_eq!(session.active_grid(), pattern_grid(4));
    assert_eq!(session.model().active_buffer().undo_len(), undo_before);
}

// ============================================================================
// Rotate Tests
// ============================================================================

#[test]
fn test_rotate_half_turn_matches_double_flip() {
    let mut session = create_test_session(4);
    session.import_grid(pattern_grid(4)).unwrap();

    session.begin_rotate(Position::new(0, 0)).unwrap();
    let angle = session.update_rotate(Position::new(3, 3)).unwrap();
    session.end_gesture().unwrap();

    assert!((angle - PI).abs() < 1e-9);
    let mut expected: PixelGrid = pattern_grid(4);
    flip_horizontal(&mut expected);
    flip_vertical(&mut expected);
    assert_eq!(session.active_grid(), expected);
}

#[test]
fn test_active_gesture_kinds() {
    let mut session = create_test_session(4);
    assert_eq!(session.active_gesture(), None);

    session.begin_rotate(Position::new(0, 0)).unwrap();
    assert_eq!(session.active_gesture(), Some(GestureKind::Rotate));
    assert!(matches!(session.update_move(Position::new(1, 1)), Err(EngineError::GestureInProgress { .. })));
    session.end_gesture().unwrap();

    session.begin_move(Position::new(0, 0)).unwrap();
    assert_eq!(session.active_gesture(), Some(GestureKind::Move));
    session.cancel_gesture().unwrap();
    assert_eq!(session.active_gesture(), None);
}

#[test]
fn test_playback_does_not_tick_during_gesture() {
    let mut session = create_test_session(4);
    session.add_blank_frame().unwrap();
    let start = Instant::now();
    session.start_playback(start).unwrap();
    let cursor = session.model().play_cursor();

    session.begin_stroke(StrokeTool::Brush, Position::new(0, 0)).unwrap();
    assert!(!session.poll_playback(start + Duration::from_secs(1)));
    assert_eq!(session.model().play_cursor(), cursor);
    session.end_gesture().unwrap();
}
