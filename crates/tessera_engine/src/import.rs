use std::path::Path;

use image::RgbaImage;

use crate::{Color, EngineError, PixelGrid, Result};

/// Resamples a square image onto a `grid_size²` grid (nearest neighbor).
/// Fully transparent pixels become unset cells.
pub fn image_to_grid(image: &RgbaImage, grid_size: i32) -> Result<PixelGrid> {
    let (width, height) = image.dimensions();
    if width != height || width == 0 {
        return Err(EngineError::NonSquareImage { width, height });
    }
    let mut grid = PixelGrid::new(grid_size);
    let n = grid.size() as u64;
    let side = u64::from(width);
    for pos in grid.positions().collect::<Vec<_>>() {
        let sx = (pos.x as u64 * side / n) as u32;
        let sy = (pos.y as u64 * side / n) as u32;
        let [r, g, b, a] = image.get_pixel(sx, sy).0;
        let cell = if a == 0 { None } else { Some(Color::with_alpha(r, g, b, a)) };
        grid.set(pos, cell);
    }
    Ok(grid)
}

/// Decodes image bytes in any format the `image` crate knows.
pub fn decode_image_grid(data: &[u8], grid_size: i32) -> Result<PixelGrid> {
    let image = image::load_from_memory(data)?.to_rgba8();
    image_to_grid(&image, grid_size)
}

pub fn load_image_grid(path: &Path, grid_size: i32) -> Result<PixelGrid> {
    let image = image::open(path)?.to_rgba8();
    log::debug!("importing {} ({}x{})", path.display(), image.width(), image.height());
    image_to_grid(&image, grid_size)
}
