//! Tests for editor session operations
//!
//! These tests verify that session operations:
//! 1. Work correctly on the active layer
//! 2. Record at most one undo step per edit or gesture
//! 3. Are refused while a gesture is in progress

use tessera_engine::{Color, EditorSession, EngineSettings, PixelGrid};

mod edit_operations_tests;
mod frame_operations_tests;
mod gesture_tests;
mod io_operations_tests;
mod layer_operations_tests;

pub const RED: Color = Color::new(255, 0, 0);
pub const BLUE: Color = Color::new(0, 0, 255);

/// Helper to create a session with a `size × size` canvas and two layers
pub fn create_test_session(size: i32) -> EditorSession {
    EditorSession::new(EngineSettings {
        grid_size: size,
        layer_count: 2,
        ..Default::default()
    })
}

/// Grid with a distinct color in every cell.
pub fn pattern_grid(size: i32) -> PixelGrid {
    let mut grid = PixelGrid::new(size);
    for pos in grid.positions().collect::<Vec<_>>() {
        grid.set(pos, Some(Color::new((pos.x * 50) as u8, (pos.y * 50) as u8, 7)));
    }
    grid
}
