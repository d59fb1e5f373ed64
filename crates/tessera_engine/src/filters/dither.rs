use crate::{Color, PixelGrid, Position};

/// Distance between the four per-channel levels 0, 85, 170, 255.
pub const QUANT_STEP: f32 = 255.0 / 3.0;

/// 4×4 Bayer threshold matrix, indexed `[y & 3][x & 3]`.
pub const BAYER_4X4: [[u8; 4]; 4] = [[0, 8, 2, 10], [12, 4, 14, 6], [3, 11, 1, 9], [15, 7, 13, 5]];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DitherMode {
    FloydSteinberg,
    Ordered,
}

impl DitherMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            DitherMode::FloydSteinberg => "Floyd-Steinberg",
            DitherMode::Ordered => "4x4 Ordered",
        }
    }
}

pub fn dither(grid: &mut PixelGrid, mode: DitherMode, background: Color) {
    match mode {
        DitherMode::FloydSteinberg => floyd_steinberg(grid, background),
        DitherMode::Ordered => ordered_dither(grid),
    }
}

/// Nearest of the four levels.
pub fn quantize_channel(value: f32) -> f32 {
    (value / QUANT_STEP).round().clamp(0.0, 3.0) * QUANT_STEP
}

fn level_to_u8(level: f32) -> u8 {
    level.round().clamp(0.0, 255.0) as u8
}

/// Floyd–Steinberg error diffusion to 4 levels per channel.
///
/// Unset cells are replaced by `background` before quantizing, so every cell is
/// set afterwards. The scan is strictly row-major, which fixes the result.
pub fn floyd_steinberg(grid: &mut PixelGrid, background: Color) {
    let size = grid.size();
    let mut work: Vec<[f32; 3]> = grid
        .cells()
        .iter()
        .map(|c| {
            let c = c.unwrap_or(background);
            [c.r as f32, c.g as f32, c.b as f32]
        })
        .collect();
    let alpha: Vec<u8> = grid.cells().iter().map(|c| c.unwrap_or(background).a).collect();

    let diffuse = |work: &mut [[f32; 3]], x: i32, y: i32, err: [f32; 3], factor: f32| {
        if x < 0 || y < 0 || x >= size || y >= size {
            return;
        }
        let px = &mut work[(y * size + x) as usize];
        for ch in 0..3 {
            px[ch] += err[ch] * factor;
        }
    };

    for y in 0..size {
        for x in 0..size {
            let idx = (y * size + x) as usize;
            let old = work[idx];
            let new = [quantize_channel(old[0]), quantize_channel(old[1]), quantize_channel(old[2])];
            work[idx] = new;
            let err = [old[0] - new[0], old[1] - new[1], old[2] - new[2]];
            if err == [0.0; 3] {
                continue;
            }
            diffuse(&mut work, x + 1, y, err, 7.0 / 16.0);
            diffuse(&mut work, x - 1, y + 1, err, 3.0 / 16.0);
            diffuse(&mut work, x, y + 1, err, 5.0 / 16.0);
            diffuse(&mut work, x + 1, y + 1, err, 1.0 / 16.0);
        }
    }

    for (idx, px) in work.iter().enumerate() {
        let pos = Position::new(idx as i32 % size, idx as i32 / size);
        grid.set(
            pos,
            Some(Color::with_alpha(level_to_u8(px[0]), level_to_u8(px[1]), level_to_u8(px[2]), alpha[idx])),
        );
    }
}

/// Ordered dithering with the 4×4 Bayer matrix. Unset cells stay unset.
pub fn ordered_dither(grid: &mut PixelGrid) {
    for pos in grid.positions().collect::<Vec<_>>() {
        let Some(c) = grid.get(pos) else {
            continue;
        };
        let threshold = (BAYER_4X4[(pos.y & 3) as usize][(pos.x & 3) as usize] as f32 + 0.5) / 16.0;
        let channel = |v: u8| {
            let scaled = v as f32 / QUANT_STEP;
            let base = scaled.floor();
            let level = if scaled - base > threshold { base + 1.0 } else { base };
            level_to_u8(level.clamp(0.0, 3.0) * QUANT_STEP)
        };
        grid.set(pos, Some(Color::with_alpha(channel(c.r), channel(c.g), channel(c.b), c.a)));
    }
}
