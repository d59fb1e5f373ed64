//! Tests for frame editing, navigation and playback through the session

use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use tessera_engine::{EngineError, Position, StrokeTool};

use super::{create_test_session, BLUE, RED};

fn paint(session: &mut tessera_engine::EditorSession, pos: Position, color: tessera_engine::Color) {
    session.set_brush_color(color);
    session.begin_stroke(StrokeTool::Brush, pos).unwrap();
    session.end_gesture().unwrap();
}

// ============================================================================
// Frame Editing Tests
// ============================================================================

#[test]
fn test_add_frame_copies_current_content() {
    let mut session = create_test_session(4);
    paint(&mut session, Position::new(1, 1), RED);

    session.add_frame().unwrap();

    assert_eq!(session.frame_count(), 2);
    assert_eq!(session.current_frame(), 1);
    assert_eq!(session.active_grid().get((1, 1)), Some(RED));
}

#[test]
fn test_frames_are_independent() {
    let mut session = create_test_session(4);
    paint(&mut session, Position::new(0, 0), RED);
    session.duplicate_frame().unwrap();
    paint(&mut session, Position::new(3, 3), BLUE);

    session.select_frame(0).unwrap();
    assert_eq!(session.active_grid().get((3, 3)), None);
    assert_eq!(session.active_grid().get((0, 0)), Some(RED));

    session.select_frame(1).unwrap();
    assert_eq!(session.active_grid().get((3, 3)), Some(BLUE));
}

#[test]
fn test_delete_frame() {
    let mut session = create_test_session(4);
    paint(&mut session, Position::new(0, 0), RED);
    session.add_blank_frame().unwrap();
    assert!(session.active_grid().is_empty());

    session.delete_frame().unwrap();

    assert_eq!(session.frame_count(), 1);
    assert_eq!(session.active_grid().get((0, 0)), Some(RED));
}

#[test]
fn test_frames_belong_to_active_layer() {
    let mut session = create_test_session(4);
    session.add_blank_frame().unwrap();
    session.add_blank_frame().unwrap();

    session.set_active_layer(1).unwrap();
    assert_eq!(session.frame_count(), 1);
    assert_eq!(session.model().frame_count(0), 3);
}

#[test]
fn test_select_and_step_frame() {
    let mut session = create_test_session(4);
    session.add_blank_frame().unwrap();
    session.add_blank_frame().unwrap();

    assert!(!session.select_frame(3).unwrap());
    assert_eq!(session.current_frame(), 2);

    session.step_frame(1).unwrap();
    assert_eq!(session.current_frame(), 0);
    session.step_frame(-1).unwrap();
    assert_eq!(session.current_frame(), 2);
}

// ============================================================================
// Playback Tests
// ============================================================================

#[test]
fn test_playback_refused_with_single_frames() {
    let mut session = create_test_session(4);

    let result = session.start_playback(Instant::now());

    assert!(matches!(result, Err(EngineError::NothingToPlay)));
    assert!(!session.is_playing());
    assert!(matches!(session.toggle_playback(Instant::now()), Err(EngineError::NothingToPlay)));
}

#[test]
fn test_playback_ticks_at_frame_rate() {
    let mut session = create_test_session(4);
    session.set_frame_rate(10);
    session.add_blank_frame().unwrap();
    session.select_frame(0).unwrap();
    let start = Instant::now();

    session.start_playback(start).unwrap();
    assert!(session.is_playing());

    assert!(!session.poll_playback(start + Duration::from_millis(40)));
    assert_eq!(session.current_frame(), 0);

    assert!(session.poll_playback(start + Duration::from_millis(100)));
    assert_eq!(session.current_frame(), 1);

    assert!(!session.poll_playback(start + Duration::from_millis(150)));
    assert!(session.poll_playback(start + Duration::from_millis(200)));
    assert_eq!(session.current_frame(), 0);
}

#[test]
fn test_stop_playback_keeps_position() {
    let mut session = create_test_session(4);
    session.add_blank_frame().unwrap();
    session.select_frame(0).unwrap();
    let start = Instant::now();
    assert!(session.toggle_playback(start).unwrap());
    assert!(session.poll_playback(start + Duration::from_secs(1)));

    assert!(!session.toggle_playback(start).unwrap());

    assert!(!session.is_playing());
    assert_eq!(session.current_frame(), 1);
    assert!(!session.poll_playback(start + Duration::from_secs(5)));
}

#[test]
fn test_frame_rate_clamped() {
    let mut session = create_test_session(4);
    session.set_frame_rate(0);
    assert_eq!(session.frame_rate(), 1);
    session.set_frame_rate(240);
    assert_eq!(session.frame_rate(), 60);
}
