use crate::{PixelGrid, Position};

/// Drag-to-move state.
///
/// Each update rebuilds the grid from the snapshot taken at gesture start, so
/// intermediate updates never accumulate and returning to the anchor restores
/// the snapshot exactly.
#[derive(Debug, Clone)]
pub struct MoveGesture {
    snapshot: PixelGrid,
    anchor: Position,
}

impl MoveGesture {
    pub fn start(grid: &PixelGrid, anchor: Position) -> Self {
        Self {
            snapshot: grid.clone(),
            anchor,
        }
    }

    pub fn anchor(&self) -> Position {
        self.anchor
    }

    pub fn snapshot(&self) -> &PixelGrid {
        &self.snapshot
    }

    /// Rewrites `grid` as the snapshot translated by `current - anchor`. Cells moved off the grid are dropped.
    pub fn update(&self, grid: &mut PixelGrid, current: Position) {
        let offset = current - self.anchor;
        grid.clear();
        for pos in self.snapshot.positions() {
            if let Some(color) = self.snapshot.get(pos) {
                grid.set(pos + offset, Some(color));
            }
        }
    }
}

/// Drag-to-rotate state around a fixed center.
///
/// Like [`MoveGesture`] every update resamples the snapshot taken at start.
#[derive(Debug, Clone)]
pub struct RotateGesture {
    snapshot: PixelGrid,
    center: (f64, f64),
    start_angle: f64,
}

impl RotateGesture {
    pub fn start(grid: &PixelGrid, center: (f64, f64), start_point: Position) -> Self {
        Self {
            snapshot: grid.clone(),
            center,
            start_angle: angle_from(center, start_point),
        }
    }

    pub fn snapshot(&self) -> &PixelGrid {
        &self.snapshot
    }

    pub fn center(&self) -> (f64, f64) {
        self.center
    }

    /// Rotates the snapshot by the angle swept from the start point to `current`
    /// and writes it to `grid`. Returns that angle in radians.
    pub fn update(&self, grid: &mut PixelGrid, current: Position) -> f64 {
        let delta = angle_from(self.center, current) - self.start_angle;
        rotate_into(&self.snapshot, grid, self.center, delta);
        delta
    }
}

fn angle_from(center: (f64, f64), point: Position) -> f64 {
    (point.y as f64 - center.1).atan2(point.x as f64 - center.0)
}

/// Nearest-neighbour rotation of `source` by `angle` radians around `center`.
///
/// Every destination cell is mapped back by `-angle` and rounded to the nearest
/// source cell; sources outside the grid produce unset cells.
pub fn rotate_into(source: &PixelGrid, dest: &mut PixelGrid, center: (f64, f64), angle: f64) {
    let (sin, cos) = (-angle).sin_cos();
    let (cx, cy) = center;
    for pos in dest.positions().collect::<Vec<_>>() {
        let dx = pos.x as f64 - cx;
        let dy = pos.y as f64 - cy;
        let sx = cx + dx * cos - dy * sin;
        let sy = cy + dx * sin + dy * cos;
        let src = Position::new(sx.round() as i32, sy.round() as i32);
        dest.set(pos, source.get(src));
    }
}
