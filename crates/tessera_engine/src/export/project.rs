//! Project container.
//!
//! A project file is an ordinary PNG showing the flat composite, with the full
//! session stored in private `tsPJ` chunks ahead of the image data. Every chunk
//! holds one record:
//!
//! ```text
//! [version u8][keyword len u16][keyword][data len u32][data]
//! ```
//!
//! The records are `HEADER`, one `LAYER` per layer in z-order, then `END`.
//! Frame cells inside a `LAYER` record are zstd compressed.

use std::io::Cursor;

use zstd::stream::encode_all as zstd_encode_all;

use super::{LayerSnapshot, ProjectSnapshot};
use crate::{Cell, Color, PixelGrid, Result};

pub const PROJECT_EXTENSION: &str = "tspj";

mod constants {
    pub const PROJECT_VERSION: u16 = 1;
    /// version(2) + grid size, cell size, layer count, active layer, brush size (5 × 4) + brush color(4) + frame rate(4) + background(4)
    pub const HEADER_SIZE: usize = 34;
    pub const ZSTD_LEVEL: i32 = 3;

    pub mod layer {
        pub const IS_VISIBLE: u32 = 0b0000_0001;
        pub const IS_ANIMATED: u32 = 0b0000_0010;
    }

    pub mod cell {
        pub const UNSET: u8 = 0;
        pub const SET: u8 = 1;
    }
}

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];
const TSPJ_CHUNK_TYPE: [u8; 4] = *b"tsPJ";
const TSPJ_RECORD_VERSION: u8 = 1;

// Upper bound for a single decompressed layer record.
const MAX_DECOMPRESSED_RECORD_SIZE: usize = 256 * 1024 * 1024;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ProjectFormatError {
    #[error("Chunk encoding failed: {0}")]
    ChunkEncodingFailed(String),
    #[error("Compression failed: {0}")]
    CompressionFailed(String),
    #[error("Decompression failed: {0}")]
    DecompressionFailed(String),
    #[error("Not a project file: {0}")]
    NotAProject(String),
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    #[error("Unsupported version: {0}")]
    UnsupportedVersion(u16),
    #[error("Data truncated at offset {0}")]
    DataTruncated(usize),
    #[error("Invalid UTF-8 string: {0}")]
    InvalidUtf8(String),
    #[error("Invalid PNG: {0}")]
    InvalidPng(String),
}

type FormatResult<T> = std::result::Result<T, ProjectFormatError>;

/// Little endian reader over a record payload.
struct ByteReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn take(&mut self, len: usize) -> FormatResult<&'a [u8]> {
        let end = self.offset.saturating_add(len);
        if end > self.data.len() {
            return Err(ProjectFormatError::DataTruncated(self.offset));
        }
        let bytes = &self.data[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }

    fn read_u8(&mut self) -> FormatResult<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_u16(&mut self) -> FormatResult<u16> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn read_u32(&mut self) -> FormatResult<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn read_color(&mut self) -> FormatResult<Color> {
        let b = self.take(4)?;
        Ok(Color::with_alpha(b[0], b[1], b[2], b[3]))
    }

    fn read_string(&mut self) -> FormatResult<String> {
        let len = self.read_u32()? as usize;
        let bytes = self.take(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|e| ProjectFormatError::InvalidUtf8(format!("{e}")))
    }

    fn rest(&mut self) -> &'a [u8] {
        let bytes = &self.data[self.offset..];
        self.offset = self.data.len();
        bytes
    }

    fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }
}

fn write_string(data: &mut Vec<u8>, s: &str) {
    data.extend(u32::to_le_bytes(s.len() as u32));
    data.extend(s.as_bytes());
}

fn write_count(data: &mut Vec<u8>, value: usize, what: &str) -> FormatResult<()> {
    let value: u32 = value
        .try_into()
        .map_err(|_| ProjectFormatError::ChunkEncodingFailed(format!("{what} too large: {value}")))?;
    data.extend(u32::to_le_bytes(value));
    Ok(())
}

fn build_tspj_record(keyword: &str, data: &[u8]) -> FormatResult<Vec<u8>> {
    let keyword_bytes = keyword.as_bytes();
    let keyword_len: u16 = keyword_bytes
        .len()
        .try_into()
        .map_err(|_| ProjectFormatError::ChunkEncodingFailed(format!("keyword too long: {}", keyword_bytes.len())))?;
    let data_len: u32 = data
        .len()
        .try_into()
        .map_err(|_| ProjectFormatError::ChunkEncodingFailed(format!("payload too large: {}", data.len())))?;

    let mut out = Vec::with_capacity(1 + 2 + keyword_bytes.len() + 4 + data.len());
    out.push(TSPJ_RECORD_VERSION);
    out.extend(u16::to_le_bytes(keyword_len));
    out.extend(keyword_bytes);
    out.extend(u32::to_le_bytes(data_len));
    out.extend(data);
    Ok(out)
}

fn write_tspj_record<W: std::io::Write>(writer: &mut png::Writer<W>, keyword: &str, data: &[u8]) -> FormatResult<()> {
    let record = build_tspj_record(keyword, data)?;
    writer
        .write_chunk(png::chunk::ChunkType(TSPJ_CHUNK_TYPE), &record)
        .map_err(|e| ProjectFormatError::ChunkEncodingFailed(format!("{e}")))?;
    Ok(())
}

fn parse_tspj_record(payload: &[u8]) -> FormatResult<(String, &[u8])> {
    let mut reader = ByteReader::new(payload);
    let version = reader.read_u8().map_err(|_| ProjectFormatError::InvalidRecord("too small".to_string()))?;
    if version != TSPJ_RECORD_VERSION {
        return Err(ProjectFormatError::InvalidRecord(format!("unsupported version {version}")));
    }
    let keyword_len = reader.read_u16()? as usize;
    let keyword = std::str::from_utf8(reader.take(keyword_len)?).map_err(|e| ProjectFormatError::InvalidUtf8(format!("keyword: {e}")))?;
    let data_len = reader.read_u32()? as usize;
    let data = reader.take(data_len).map_err(|_| ProjectFormatError::InvalidRecord("truncated data".to_string()))?;
    Ok((keyword.to_string(), data))
}

fn extract_png_chunks_by_type(png: &[u8], wanted: [u8; 4]) -> FormatResult<Vec<&[u8]>> {
    if png.len() < PNG_SIGNATURE.len() || png[..PNG_SIGNATURE.len()] != PNG_SIGNATURE {
        return Err(ProjectFormatError::InvalidPng("invalid signature".to_string()));
    }

    let mut res = Vec::new();
    let mut reader = ByteReader::new(png);
    reader.take(PNG_SIGNATURE.len())?;
    while !reader.is_at_end() {
        let len_bytes = reader.take(4).map_err(|_| ProjectFormatError::InvalidPng("truncated chunk".to_string()))?;
        let len = u32::from_be_bytes([len_bytes[0], len_bytes[1], len_bytes[2], len_bytes[3]]) as usize;
        let chunk_type = reader.take(4).map_err(|_| ProjectFormatError::InvalidPng("truncated chunk".to_string()))?;
        let data = reader.take(len).map_err(|_| ProjectFormatError::InvalidPng("truncated chunk".to_string()))?;
        reader.take(4).map_err(|_| ProjectFormatError::InvalidPng("truncated chunk".to_string()))?; // crc

        if chunk_type == wanted {
            res.push(data);
        }
        if chunk_type == b"IEND" {
            break;
        }
    }
    Ok(res)
}

fn zstd_decode_all_limited(bytes: &[u8], limit: usize, context: &str) -> FormatResult<Vec<u8>> {
    use std::io::Read;

    let mut decoder = zstd::stream::read::Decoder::new(Cursor::new(bytes)).map_err(|e| ProjectFormatError::DecompressionFailed(format!("init for '{context}': {e}")))?;

    let mut out: Vec<u8> = Vec::new();
    let mut buf = [0u8; 8 * 1024];
    loop {
        let read = decoder
            .read(&mut buf)
            .map_err(|e| ProjectFormatError::DecompressionFailed(format!("'{context}': {e}")))?;
        if read == 0 {
            break;
        }
        if out.len().saturating_add(read) > limit {
            return Err(ProjectFormatError::DecompressionFailed(format!("'{context}' too large (limit: {limit} bytes)")));
        }
        out.extend_from_slice(&buf[..read]);
    }
    Ok(out)
}

fn encode_color(color: Color, data: &mut Vec<u8>) {
    data.extend(color.to_rgba());
}

fn encode_cell(cell: Cell, data: &mut Vec<u8>) {
    match cell {
        Some(color) => {
            data.push(constants::cell::SET);
            encode_color(color, data);
        }
        None => data.push(constants::cell::UNSET),
    }
}

fn decode_cell(reader: &mut ByteReader) -> FormatResult<Cell> {
    match reader.read_u8()? {
        constants::cell::UNSET => Ok(None),
        constants::cell::SET => Ok(Some(reader.read_color()?)),
        other => Err(ProjectFormatError::InvalidValue(format!("cell tag {other}"))),
    }
}

fn encode_header(snapshot: &ProjectSnapshot) -> FormatResult<Vec<u8>> {
    let mut data = Vec::with_capacity(constants::HEADER_SIZE);
    data.extend(u16::to_le_bytes(constants::PROJECT_VERSION));
    data.extend(u32::to_le_bytes(snapshot.grid_size as u32));
    data.extend(u32::to_le_bytes(snapshot.cell_size));
    write_count(&mut data, snapshot.layers.len(), "layer count")?;
    write_count(&mut data, snapshot.active_layer, "active layer")?;
    data.extend(u32::to_le_bytes(snapshot.brush_size as u32));
    encode_color(snapshot.brush_color, &mut data);
    data.extend(u32::to_le_bytes(snapshot.frame_rate));
    encode_color(snapshot.background, &mut data);
    Ok(data)
}

/// Header values; layers are filled in as their records arrive.
struct Header {
    snapshot: ProjectSnapshot,
    layer_count: usize,
}

fn decode_header(bytes: &[u8]) -> FormatResult<Header> {
    if bytes.len() != constants::HEADER_SIZE {
        return Err(ProjectFormatError::InvalidHeader(format!("unsupported header size {}", bytes.len())));
    }
    let mut reader = ByteReader::new(bytes);
    let version = reader.read_u16()?;
    if version != constants::PROJECT_VERSION {
        return Err(ProjectFormatError::UnsupportedVersion(version));
    }
    let grid_size = reader.read_u32()? as i32;
    let cell_size = reader.read_u32()?;
    let layer_count = reader.read_u32()? as usize;
    let active_layer = reader.read_u32()? as usize;
    let brush_size = reader.read_u32()? as i32;
    let brush_color = reader.read_color()?;
    let frame_rate = reader.read_u32()?;
    let background = reader.read_color()?;
    if !(1..=crate::MAX_GRID_SIZE).contains(&grid_size) {
        return Err(ProjectFormatError::InvalidHeader(format!("grid size {grid_size}")));
    }
    if layer_count > crate::MAX_LAYER_COUNT {
        return Err(ProjectFormatError::InvalidHeader(format!("layer count {layer_count}")));
    }
    Ok(Header {
        snapshot: ProjectSnapshot {
            grid_size,
            cell_size,
            layers: Vec::with_capacity(layer_count),
            active_layer,
            brush_size,
            brush_color,
            frame_rate,
            background,
        },
        layer_count,
    })
}

fn encode_layer(layer: &LayerSnapshot) -> FormatResult<Vec<u8>> {
    let mut data = Vec::new();
    write_string(&mut data, &layer.name);
    let mut flags = 0u32;
    if layer.is_visible {
        flags |= constants::layer::IS_VISIBLE;
    }
    if layer.is_animated {
        flags |= constants::layer::IS_ANIMATED;
    }
    data.extend(u32::to_le_bytes(flags));
    write_count(&mut data, layer.current_frame, "current frame")?;
    write_count(&mut data, layer.frames.len(), "frame count")?;

    let mut cells = Vec::new();
    for frame in &layer.frames {
        for cell in frame.cells() {
            encode_cell(*cell, &mut cells);
        }
    }
    let compressed = zstd_encode_all(Cursor::new(cells), constants::ZSTD_LEVEL).map_err(|e| ProjectFormatError::CompressionFailed(format!("zstd: {e}")))?;
    data.extend(compressed);
    Ok(data)
}

fn decode_layer(bytes: &[u8], grid_size: i32) -> FormatResult<LayerSnapshot> {
    let mut reader = ByteReader::new(bytes);
    let name = reader.read_string()?;
    let flags = reader.read_u32()?;
    let current_frame = reader.read_u32()? as usize;
    let frame_count = reader.read_u32()? as usize;
    if frame_count == 0 {
        return Err(ProjectFormatError::InvalidRecord(format!("layer '{name}': no frames")));
    }

    let cells_per_frame = (grid_size as usize) * (grid_size as usize);
    // a set cell takes five bytes
    let limit = frame_count
        .saturating_mul(cells_per_frame)
        .saturating_mul(5)
        .min(MAX_DECOMPRESSED_RECORD_SIZE);
    let cell_data = zstd_decode_all_limited(reader.rest(), limit, &name)?;
    // every cell takes at least one byte
    if frame_count.saturating_mul(cells_per_frame) > cell_data.len() {
        return Err(ProjectFormatError::InvalidRecord(format!(
            "layer '{name}': {frame_count} frames announced, {} bytes of cell data",
            cell_data.len()
        )));
    }

    let mut cells = ByteReader::new(&cell_data);
    let mut frames = Vec::new();
    for _ in 0..frame_count {
        let frame_cells = (0..cells_per_frame).map(|_| decode_cell(&mut cells)).collect::<FormatResult<Vec<Cell>>>()?;
        let grid = PixelGrid::from_cells(grid_size, frame_cells).ok_or_else(|| ProjectFormatError::InvalidRecord(format!("layer '{name}': bad frame size")))?;
        frames.push(grid);
    }
    if !cells.is_at_end() {
        return Err(ProjectFormatError::InvalidRecord(format!("layer '{name}': trailing cell data")));
    }

    Ok(LayerSnapshot {
        name,
        is_visible: flags & constants::layer::IS_VISIBLE != 0,
        is_animated: flags & constants::layer::IS_ANIMATED != 0,
        current_frame,
        frames,
    })
}

/// Serializes a snapshot into a project file.
pub fn save_project(snapshot: &ProjectSnapshot) -> Result<Vec<u8>> {
    snapshot.validate()?;
    let preview = snapshot.preview();
    let side = preview.size() as u32;

    let mut png_bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_bytes, side, side);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;

        write_tspj_record(&mut writer, "HEADER", &encode_header(snapshot)?)?;
        for layer in &snapshot.layers {
            write_tspj_record(&mut writer, "LAYER", &encode_layer(layer)?)?;
        }
        write_tspj_record(&mut writer, "END", &[])?;

        writer.write_image_data(&preview.to_rgba(1))?;
        writer.finish()?;
    }
    Ok(png_bytes)
}

/// Parses a project file. Nothing is returned unless every record is valid.
pub fn load_project(data: &[u8]) -> Result<ProjectSnapshot> {
    let raw_records = extract_png_chunks_by_type(data, TSPJ_CHUNK_TYPE)?;
    if raw_records.is_empty() {
        return Err(ProjectFormatError::NotAProject("no project records".to_string()).into());
    }

    let mut header: Option<Header> = None;
    let mut has_end = false;
    for payload in raw_records {
        let (keyword, bytes) = parse_tspj_record(payload)?;
        if keyword == "HEADER" {
            if header.is_some() {
                return Err(ProjectFormatError::InvalidRecord("multiple HEADER records".to_string()).into());
            }
            header = Some(decode_header(bytes)?);
            continue;
        }
        let Some(header) = header.as_mut() else {
            return Err(ProjectFormatError::InvalidRecord(format!("HEADER must be first (found '{keyword}')")).into());
        };
        match keyword.as_str() {
            "LAYER" => {
                if header.snapshot.layers.len() >= header.layer_count {
                    return Err(ProjectFormatError::InvalidRecord("more LAYER records than announced".to_string()).into());
                }
                let layer = decode_layer(bytes, header.snapshot.grid_size)?;
                header.snapshot.layers.push(layer);
            }
            "END" => {
                has_end = true;
                break;
            }
            other => log::warn!("skipping unknown project record '{other}'"),
        }
    }

    let Some(header) = header else {
        return Err(ProjectFormatError::InvalidRecord("HEADER missing".to_string()).into());
    };
    if !has_end {
        return Err(ProjectFormatError::InvalidRecord("END missing".to_string()).into());
    }
    if header.snapshot.layers.len() != header.layer_count {
        return Err(ProjectFormatError::InvalidRecord(format!(
            "expected {} layers, found {}",
            header.layer_count,
            header.snapshot.layers.len()
        ))
        .into());
    }
    header.snapshot.validate()?;
    Ok(header.snapshot)
}
