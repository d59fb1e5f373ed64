//! GIF encoding for animated export.
//!
//! Every frame is quantized on its own with quantette (Wu's algorithm) into at
//! most 255 colors. Palette index 255 is reserved for transparency, which is how
//! unset composite cells reach the file. Frames use restore-to-background
//! disposal so transparent cells never show the previous frame.

use std::borrow::Cow;
use std::io::Write;

use crate::EngineError;

/// Index used for fully transparent pixels.
const TRANSPARENT_INDEX: u8 = 255;

/// A single frame in a GIF animation.
#[derive(Clone)]
pub struct GifFrame {
    /// RGBA pixel data (4 bytes per pixel)
    pub rgba_data: Vec<u8>,
    /// Frame delay in centiseconds
    pub delay_cs: u16,
}

impl GifFrame {
    pub fn new(rgba_data: Vec<u8>, delay_cs: u16) -> Self {
        Self { rgba_data, delay_cs }
    }
}

/// GIF encoder with per-frame color quantization. Animations loop forever.
pub struct GifEncoder {
    pub width: u16,
    pub height: u16,
}

impl GifEncoder {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Encodes frames to a writer (e.g., file or buffer) as they are produced.
    /// Returns the number of frames written.
    pub fn encode_to_writer<W, I>(&self, writer: W, frames: I) -> crate::Result<usize>
    where
        W: Write,
        I: IntoIterator<Item = GifFrame>,
    {
        let mut frames = frames.into_iter();
        let Some(first_frame) = frames.next() else {
            return Err(EngineError::nothing_to_export("no frames to encode"));
        };

        // the first frame's palette doubles as the global one
        let (global_palette, first_pixels) = self.quantize_frame(&first_frame)?;
        let mut encoder = gif::Encoder::new(writer, self.width, self.height, &global_palette)?;
        encoder.set_repeat(gif::Repeat::Infinite)?;
        self.write_frame(&mut encoder, &first_frame, global_palette, first_pixels)?;

        let mut written = 1;
        for frame in frames {
            let (palette, indexed_pixels) = self.quantize_frame(&frame)?;
            self.write_frame(&mut encoder, &frame, palette, indexed_pixels)?;
            written += 1;
        }
        Ok(written)
    }

    /// Quantizes a frame to a 256 entry palette (last entry transparent) and index data.
    fn quantize_frame(&self, frame: &GifFrame) -> crate::Result<(Vec<u8>, Vec<u8>)> {
        let expected_len = self.width as usize * self.height as usize * 4;
        if frame.rgba_data.len() != expected_len {
            return Err(EngineError::generic(format!(
                "GIF frame has {} bytes, expected {expected_len}",
                frame.rgba_data.len()
            )));
        }
        let rgb_data: Vec<u8> = frame.rgba_data.chunks(4).flat_map(|rgba| [rgba[0], rgba[1], rgba[2]]).collect();

        let img: image::RgbImage = image::RgbImage::from_raw(self.width as u32, self.height as u32, rgb_data)
            .ok_or_else(|| EngineError::generic("Failed to create RGB image for quantization"))?;

        let mut pipeline = quantette::ImagePipeline::try_from(&img).map_err(|e| EngineError::generic(format!("Quantization pipeline error: {e}")))?;

        let (palette, mut indexed_pixels) = pipeline.palette_size(255).indexed_palette();

        let mut flat_palette: Vec<u8> = palette.iter().flat_map(|c| [c.red, c.green, c.blue]).collect();
        flat_palette.resize(256 * 3, 0);

        for (idx, rgba) in indexed_pixels.iter_mut().zip(frame.rgba_data.chunks(4)) {
            if rgba[3] == 0 {
                *idx = TRANSPARENT_INDEX;
            }
        }
        Ok((flat_palette, indexed_pixels))
    }

    fn write_frame<W: Write>(&self, encoder: &mut gif::Encoder<W>, frame: &GifFrame, palette: Vec<u8>, indexed_pixels: Vec<u8>) -> crate::Result<()> {
        let mut gif_frame = gif::Frame::default();
        gif_frame.width = self.width;
        gif_frame.height = self.height;
        gif_frame.delay = frame.delay_cs.max(1);
        gif_frame.dispose = gif::DisposalMethod::Background;
        gif_frame.transparent = Some(TRANSPARENT_INDEX);
        gif_frame.palette = Some(palette);
        gif_frame.buffer = Cow::Owned(indexed_pixels);

        encoder.write_frame(&gif_frame)?;
        Ok(())
    }
}
