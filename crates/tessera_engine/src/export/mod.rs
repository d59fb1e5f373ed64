//! Compositing and everything that leaves the editor as a file.
//!
//! All exports read the model as it is; callers commit live edits first
//! (`EditorSession` does that for you). Files are encoded in memory and written
//! in one go, so a failed export never leaves a partial file behind.

#[cfg(feature = "gif")]
mod gif_encoder;
mod project;
mod snapshot;

#[cfg(feature = "gif")]
pub use gif_encoder::{GifEncoder, GifFrame};
pub use project::{load_project, save_project, ProjectFormatError, PROJECT_EXTENSION};
pub use snapshot::{LayerSnapshot, ProjectSnapshot};

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{AnimationModel, EngineError, PixelGrid, Result, MAX_ANIMATION_FRAMES};

/// Options shared by the raster exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Output pixels per cell.
    pub scale: u32,
    /// File name stem of sequence frames (`<prefix>_000.png`).
    pub sequence_prefix: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            scale: 1,
            sequence_prefix: "frame".to_string(),
        }
    }
}

impl ExportOptions {
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.max(1);
        self
    }
}

/// Flattens `layers` (bottom first). For every cell the layers are scanned from
/// the top down and the first set cell wins; if all are unset the result is unset.
pub fn composite(size: i32, layers: &[&PixelGrid]) -> PixelGrid {
    let mut result = PixelGrid::new(size);
    for (idx, cell) in result.cells_mut().iter_mut().enumerate() {
        *cell = layers.iter().rev().find_map(|grid| grid.cells().get(idx).copied().flatten());
    }
    result
}

pub fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Least common multiple, `None` on overflow.
pub fn lcm(a: usize, b: usize) -> Option<usize> {
    if a == 0 || b == 0 {
        Some(0)
    } else {
        (a / gcd(a, b)).checked_mul(b)
    }
}

/// Frame count of an animated export: the LCM of all non-empty frame list lengths,
/// so every layer completes a whole number of cycles. 0 if there is nothing.
///
/// Fails with `TooManyFrames` above [`MAX_ANIMATION_FRAMES`].
pub fn animation_frame_count(model: &AnimationModel) -> Result<usize> {
    let too_many = || EngineError::TooManyFrames { max: MAX_ANIMATION_FRAMES };
    let mut count = 0;
    for len in model.tracks().iter().map(|t| t.frames().len()).filter(|len| *len > 0) {
        count = if count == 0 { len } else { lcm(count, len).ok_or_else(too_many)? };
        if count > MAX_ANIMATION_FRAMES {
            return Err(too_many());
        }
    }
    Ok(count)
}

/// GIF delay in centiseconds for a frame rate.
pub fn frame_delay_cs(frame_rate: u32) -> u16 {
    (100.0 / f64::from(frame_rate.max(1))).round() as u16
}

/// Zero padded sequence file name; the width is `max(3, digits(max_frames))`.
pub fn sequence_file_name(prefix: &str, index: usize, max_frames: usize) -> String {
    let width = max_frames.to_string().len().max(3);
    format!("{prefix}_{index:0width$}.png")
}

/// Encodes a grid as RGBA PNG.
pub fn encode_png(grid: &PixelGrid, scale: u32) -> Result<Vec<u8>> {
    let scale = scale.max(1);
    let width = grid.size() as u32 * scale;
    let mut png_bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_bytes, width, width);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&grid.to_rgba(scale))?;
        writer.finish()?;
    }
    Ok(png_bytes)
}

fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data).map_err(|e| EngineError::write_file(path, e.to_string()))
}

/// Writes the composite of the live grids as PNG.
pub fn export_png(model: &AnimationModel, path: &Path, options: &ExportOptions) -> Result<()> {
    let data = encode_png(&model.composite_current(), options.scale)?;
    write_file(path, &data)?;
    log::info!("exported image to {}", path.display());
    Ok(())
}

/// Writes one PNG per global frame index into `dir`. Returns the written paths.
pub fn export_sequence(model: &AnimationModel, dir: &Path, options: &ExportOptions) -> Result<Vec<PathBuf>> {
    let max_frames = model.max_frame_count();
    if max_frames == 0 {
        return Err(EngineError::nothing_to_export("no frames"));
    }

    // encode everything before touching the file system
    let mut encoded = Vec::with_capacity(max_frames);
    for i in 0..max_frames {
        encoded.push(encode_png(&model.composite_at(i), options.scale)?);
    }

    fs::create_dir_all(dir)?;
    let mut paths = Vec::with_capacity(max_frames);
    for (i, data) in encoded.iter().enumerate() {
        let path = dir.join(sequence_file_name(&options.sequence_prefix, i, max_frames));
        write_file(&path, data)?;
        paths.push(path);
    }
    log::info!("exported {} frames to {}", max_frames, dir.display());
    Ok(paths)
}

/// Encodes the animation as GIF: LCM frame count, `round(100 / fps)` delay,
/// infinite loop and restore-to-background disposal.
///
/// Frames are composited one at a time while encoding.
#[cfg(feature = "gif")]
pub fn encode_gif(model: &AnimationModel, options: &ExportOptions) -> Result<Vec<u8>> {
    let frame_count = animation_frame_count(model)?;
    if frame_count == 0 {
        return Err(EngineError::nothing_to_export("no frames"));
    }
    let scale = options.scale.max(1);
    let width = model.grid_size() as u32 * scale;
    let Ok(side) = u16::try_from(width) else {
        return Err(EngineError::ImageTooLarge {
            width,
            height: width,
            format: "GIF".to_string(),
        });
    };

    let delay = frame_delay_cs(model.frame_rate());
    let frames = (0..frame_count).map(|i| GifFrame::new(model.composite_at(i).to_rgba(scale), delay));

    let encoder = GifEncoder::new(side, side);
    let mut data = Vec::new();
    encoder.encode_to_writer(&mut data, frames)?;
    Ok(data)
}

#[cfg(not(feature = "gif"))]
pub fn encode_gif(_model: &AnimationModel, _options: &ExportOptions) -> Result<Vec<u8>> {
    Err(EngineError::EncoderUnavailable { format: "GIF".to_string() })
}

/// Writes the animation as GIF. Returns the number of frames written.
pub fn export_gif(model: &AnimationModel, path: &Path, options: &ExportOptions) -> Result<usize> {
    let frames = animation_frame_count(model)?;
    let data = encode_gif(model, options)?;
    write_file(path, &data)?;
    log::info!("exported {} frame animation to {}", frames, path.display());
    Ok(frames)
}
