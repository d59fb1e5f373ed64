//! Tests for one-shot edits, undo and image import

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use pretty_assertions::assert_eq;
use tessera_engine::{
    filters::{Adjustment, DitherMode},
    Color, EngineError, FlipDirection, PixelGrid, Position, StrokeTool, UNDO_CAPACITY,
};

use super::{create_test_session, pattern_grid, BLUE, RED};

fn png_bytes(image: &RgbaImage) -> Vec<u8> {
    let mut data = Vec::new();
    image.write_to(&mut Cursor::new(&mut data), ImageFormat::Png).unwrap();
    data
}

// ============================================================================
// Fill Tests
// ============================================================================

#[test]
fn test_fill_at_fills_region_and_undoes() {
    let mut session = create_test_session(4);
    session.set_brush_color(RED);

    let filled = session.fill_at(Position::new(0, 0)).unwrap();

    assert_eq!(filled, 16);
    assert!(session.active_grid().cells().iter().all(|c| *c == Some(RED)));
    assert!(session.undo().unwrap());
    assert!(session.active_grid().is_empty());
}

#[test]
fn test_fill_at_same_color_records_no_undo() {
    let mut session = create_test_session(4);
    session.set_brush_color(RED);
    session.fill_at(Position::new(0, 0)).unwrap();

    assert_eq!(session.fill_at(Position::new(2, 2)).unwrap(), 0);

    assert!(session.undo().unwrap());
    assert!(!session.can_undo());
}

#[test]
fn test_fill_and_clear_layer() {
    let mut session = create_test_session(3);
    session.set_brush_color(BLUE);

    session.fill_layer().unwrap();
    assert_eq!(session.active_grid().painted_count(), 9);

    session.clear_layer().unwrap();
    assert!(session.active_grid().is_empty());

    assert!(session.undo().unwrap());
    assert_eq!(session.active_grid().get((2, 2)), Some(BLUE));
}

// ============================================================================
// Filter Tests
// ============================================================================

#[test]
fn test_flip_and_undo() {
    let mut session = create_test_session(4);
    session.import_grid(pattern_grid(4)).unwrap();

    session.flip(FlipDirection::Horizontal).unwrap();
    assert_eq!(session.active_grid().get((3, 0)), pattern_grid(4).get((0, 0)));

    session.flip(FlipDirection::Vertical).unwrap();
    assert_eq!(session.active_grid().get((3, 3)), pattern_grid(4).get((0, 0)));

    session.undo().unwrap();
    session.undo().unwrap();
    assert_eq!(session.active_grid(), pattern_grid(4));
}

#[test]
fn test_flip_of_empty_layer_records_no_undo() {
    let mut session = create_test_session(4);

    session.flip(FlipDirection::Vertical).unwrap();

    assert!(!session.can_undo());
}

#[test]
fn test_blur_fills_canvas_with_background() {
    let mut session = create_test_session(5);
    session.set_background(Color::WHITE);
    session.set_brush_color(Color::BLACK);
    session.begin_stroke(StrokeTool::Brush, Position::new(2, 2)).unwrap();
    session.end_gesture().unwrap();

    session.blur().unwrap();

    let grid = session.active_grid();
    assert_eq!(grid.painted_count(), 25);
    let center = grid.get((2, 2)).unwrap();
    let corner = grid.get((0, 0)).unwrap();
    assert!(center.r > 0 && center.r < corner.r);
    assert_eq!(corner.a, 255);
}

#[test]
fn test_motion_blur_only_averages_set_cells() {
    let mut session = create_test_session(5);
    session.set_brush_color(RED);
    session.begin_stroke(StrokeTool::Brush, Position::new(2, 2)).unwrap();
    session.end_gesture().unwrap();

    session.motion_blur(0.0).unwrap();

    let grid = session.active_grid();
    for x in 0..5 {
        assert_eq!(grid.get((x, 2)), Some(RED), "column {x}");
    }
    assert_eq!(grid.painted_count(), 5);
}

#[test]
fn test_dither_modes() {
    let mut session = create_test_session(4);
    let mut grid = pattern_grid(4);
    grid.set((1, 1), None);
    session.import_grid(grid.clone()).unwrap();

    session.dither(DitherMode::Ordered).unwrap();
    assert_eq!(session.active_grid().get((1, 1)), None);

    session.undo().unwrap();
    session.dither(DitherMode::FloydSteinberg).unwrap();
    assert_eq!(session.active_grid().painted_count(), 16);
}

#[test]
fn test_adjust_invert_twice_is_identity() {
    let mut session = create_test_session(4);
    session.import_grid(pattern_grid(4)).unwrap();

    session.adjust(Adjustment::Invert).unwrap();
    assert_ne!(session.active_grid(), pattern_grid(4));
    session.adjust(Adjustment::Invert).unwrap();

    assert_eq!(session.active_grid(), pattern_grid(4));
}

// ============================================================================
// Undo Tests
// ============================================================================

#[test]
fn test_undo_with_empty_history() {
    let mut session = create_test_session(4);
    assert!(!session.undo().unwrap());
}

#[test]
fn test_undo_is_per_layer() {
    let mut session = create_test_session(4);
    session.set_brush_color(RED);
    session.fill_layer().unwrap();

    session.set_active_layer(1).unwrap();
    assert!(!session.can_undo());
    assert!(!session.undo().unwrap());
    assert_eq!(session.layer_grid(0).unwrap().painted_count(), 16);

    session.set_active_layer(0).unwrap();
    assert!(session.undo().unwrap());
    assert!(session.layer_grid(0).unwrap().is_empty());
}

#[test]
fn test_undo_history_survives_navigation() {
    let mut session = create_test_session(4);
    session.set_brush_color(RED);
    session.begin_stroke(StrokeTool::Brush, Position::new(1, 1)).unwrap();
    session.end_gesture().unwrap();

    session.add_blank_frame().unwrap();
    session.select_frame(0).unwrap();

    assert!(session.can_undo());
}

#[test]
fn test_noop_edit_keeps_full_history() {
    let mut session = create_test_session(4);
    for i in 0..UNDO_CAPACITY {
        session.set_brush_color(Color::new(i as u8 + 1, 0, 0));
        session.fill_layer().unwrap();
    }

    // same color everywhere, nothing to fill
    assert_eq!(session.fill_at(Position::new(0, 0)).unwrap(), 0);

    for _ in 0..UNDO_CAPACITY {
        assert!(session.undo().unwrap());
    }
    assert!(session.active_grid().is_empty());
    assert!(!session.can_undo());
}

// ============================================================================
// Stamp Capture Tests
// ============================================================================

#[test]
fn test_capture_stamp_from_layer() {
    let mut session = create_test_session(4);
    session.import_grid(pattern_grid(4)).unwrap();

    session.capture_stamp(Position::new(1, 2), 2, 2);

    let stamp = session.stamp();
    assert_eq!((stamp.cols(), stamp.rows()), (2, 2));
    assert_eq!(stamp.get((0, 0)), pattern_grid(4).get((1, 2)));
    assert_eq!(stamp.get((1, 1)), pattern_grid(4).get((2, 3)));
}

// ============================================================================
// Import Tests
// ============================================================================

#[test]
fn test_import_image_downsamples() {
    let mut session = create_test_session(4);
    let mut image = RgbaImage::new(8, 8);
    for (x, _, px) in image.enumerate_pixels_mut() {
        *px = if x < 4 { Rgba([255, 0, 0, 255]) } else { Rgba([0, 0, 0, 0]) };
    }

    session.import_image_bytes(&png_bytes(&image)).unwrap();

    let grid = session.active_grid();
    assert_eq!(grid.get((0, 3)), Some(RED));
    assert_eq!(grid.get((1, 0)), Some(RED));
    assert_eq!(grid.get((2, 0)), None);
    assert!(session.undo().unwrap());
}

#[test]
fn test_import_non_square_image_is_rejected() {
    let mut session = create_test_session(4);
    session.import_grid(pattern_grid(4)).unwrap();

    let result = session.import_image_bytes(&png_bytes(&RgbaImage::new(6, 4)));

    assert!(matches!(result, Err(EngineError::NonSquareImage { width: 6, height: 4 })));
    assert_eq!(session.active_grid(), pattern_grid(4));
}

#[test]
fn test_import_grid_size_mismatch() {
    let mut session = create_test_session(4);

    let result = session.import_grid(PixelGrid::new(5));

    assert!(matches!(result, Err(EngineError::GridSizeMismatch { expected: 4, actual: 5 })));
    assert!(!session.can_undo());
}

#[test]
fn test_import_image_from_file() {
    let mut session = create_test_session(2);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("in.png");
    let mut image = RgbaImage::new(2, 2);
    image.put_pixel(1, 1, Rgba([0, 0, 255, 255]));
    image.save(&path).unwrap();

    session.import_image(&path).unwrap();

    assert_eq!(session.active_grid().get((1, 1)), Some(BLUE));
    assert_eq!(session.active_grid().painted_count(), 1);
}
