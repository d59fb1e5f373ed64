use crate::{layer_buffer::DrawContext, Color, PixelGrid, Position};

/// Gaussian weights for a `(2r+1)²` kernel, row-major, with `σ = r/2`.
/// Radius 0 yields the single weight 1.
pub fn gaussian_kernel(radius: i32) -> Vec<f64> {
    let radius = radius.max(0);
    if radius == 0 {
        return vec![1.0];
    }
    let sigma = radius as f64 / 2.0;
    let denom = 2.0 * sigma * sigma;
    let mut kernel = Vec::with_capacity(((2 * radius + 1) * (2 * radius + 1)) as usize);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            kernel.push((-((dx * dx + dy * dy) as f64) / denom).exp());
        }
    }
    kernel
}

fn to_channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Whole-canvas Gaussian blur.
///
/// Unset neighbours count as `background`. Near the edges the sum is normalized
/// by the weights of the in-bounds taps only, so borders are not darkened. Every
/// output cell is set.
pub fn gaussian_blur(grid: &mut PixelGrid, radius: i32, background: Color) {
    if radius <= 0 {
        return;
    }
    let source = grid.clone();
    let kernel = gaussian_kernel(radius);
    let width = 2 * radius + 1;

    for pos in source.positions() {
        let mut sum = [0.0f64; 4];
        let mut weight_sum = 0.0;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let p = Position::new(pos.x + dx, pos.y + dy);
                if !source.is_valid(p) {
                    continue;
                }
                let w = kernel[((dy + radius) * width + dx + radius) as usize];
                let c = source.get_or(p, background);
                sum[0] += c.r as f64 * w;
                sum[1] += c.g as f64 * w;
                sum[2] += c.b as f64 * w;
                sum[3] += c.a as f64 * w;
                weight_sum += w;
            }
        }
        let blurred = Color::with_alpha(
            to_channel(sum[0] / weight_sum),
            to_channel(sum[1] / weight_sum),
            to_channel(sum[2] / weight_sum),
            to_channel(sum[3] / weight_sum),
        );
        grid.set(pos, Some(blurred));
    }
}

/// Localized alpha-aware blur over the brush footprint around `center`.
///
/// The kernel is the disk `dx² + dy² ≤ r²`. Unset neighbours are transparent:
/// they add to the total weight but not to the color. The output alpha is
/// `255 × colorWeight / totalWeight`; a cell without any colored tap becomes unset.
pub fn brush_blur(grid: &mut PixelGrid, ctx: &DrawContext, center: Position, radius: i32) {
    if radius <= 0 {
        return;
    }
    let source = grid.clone();
    let sigma = radius as f64 / 2.0;
    let denom = 2.0 * sigma * sigma;
    let origin = ctx.brush_origin(center);
    let size = ctx.brush_size.max(1);

    for y in origin.y..origin.y + size {
        for x in origin.x..origin.x + size {
            let pos = Position::new(x, y);
            if !source.is_valid(pos) {
                continue;
            }
            let mut sum = [0.0f64; 3];
            let mut color_weight = 0.0;
            let mut total_weight = 0.0;
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    if dx * dx + dy * dy > radius * radius {
                        continue;
                    }
                    let p = Position::new(x + dx, y + dy);
                    if !source.is_valid(p) {
                        continue;
                    }
                    let w = (-((dx * dx + dy * dy) as f64) / denom).exp();
                    total_weight += w;
                    if let Some(c) = source.get(p) {
                        sum[0] += c.r as f64 * w;
                        sum[1] += c.g as f64 * w;
                        sum[2] += c.b as f64 * w;
                        color_weight += w;
                    }
                }
            }
            let cell = if color_weight > 0.0 {
                Some(Color::with_alpha(
                    to_channel(sum[0] / color_weight),
                    to_channel(sum[1] / color_weight),
                    to_channel(sum[2] / color_weight),
                    to_channel(255.0 * color_weight / total_weight),
                ))
            } else {
                None
            };
            grid.set(pos, cell);
        }
    }
}

/// Directional box blur along `angle_degrees` (0° points right, 90° up on screen)
/// over `2·amount + 1` taps. Only in-bounds set taps are averaged.
pub fn motion_blur(grid: &mut PixelGrid, angle_degrees: f64, amount: i32) {
    if amount <= 0 {
        return;
    }
    let source = grid.clone();
    let theta = angle_degrees.to_radians();
    // screen y grows downwards
    let (dir_x, dir_y) = (theta.cos(), -theta.sin());

    for pos in source.positions() {
        let mut sum = [0u32; 4];
        let mut taps = 0u32;
        for t in -amount..=amount {
            let p = Position::new(
                pos.x + (t as f64 * dir_x).round() as i32,
                pos.y + (t as f64 * dir_y).round() as i32,
            );
            if let Some(c) = source.get(p) {
                sum[0] += c.r as u32;
                sum[1] += c.g as u32;
                sum[2] += c.b as u32;
                sum[3] += c.a as u32;
                taps += 1;
            }
        }
        let cell = if taps == 0 {
            None
        } else {
            let avg = |s: u32| to_channel(s as f64 / taps as f64);
            Some(Color::with_alpha(avg(sum[0]), avg(sum[1]), avg(sum[2]), avg(sum[3])))
        };
        grid.set(pos, cell);
    }
}
