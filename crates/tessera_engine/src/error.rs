//! Unified error types for tessera_engine

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tessera_engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write file '{path}': {message}")]
    WriteFile { path: PathBuf, message: String },

    // === Canvas Errors ===
    #[error("Invalid canvas size: {size} (must be between 1 and {max})", max = crate::MAX_GRID_SIZE)]
    InvalidCanvasSize { size: i64 },

    #[error("Invalid canvas size '{value}': not a number")]
    CanvasSizeNotNumeric { value: String },

    #[error("Invalid layer count: {count}")]
    InvalidLayerCount { count: usize },

    #[error("Layer {layer} out of range (0..{max})")]
    LayerOutOfRange { layer: usize, max: usize },

    #[error("Grid size mismatch: expected {expected}, got {actual}")]
    GridSizeMismatch { expected: i32, actual: i32 },

    // === Import Errors ===
    #[error("Image must be square, got {width}x{height}")]
    NonSquareImage { width: u32, height: u32 },

    // === Gesture Errors ===
    #[error("A {active} gesture is already in progress")]
    GestureInProgress { active: String },

    #[error("No gesture in progress")]
    NoGestureActive,

    // === Animation Errors ===
    #[error("Playback needs at least one layer with more than one frame")]
    NothingToPlay,

    // === Export Errors ===
    #[error("Nothing to export: {message}")]
    NothingToExport { message: String },

    #[error("No encoder available for {format}")]
    EncoderUnavailable { format: String },

    #[error("Animation needs more than {max} frames")]
    TooManyFrames { max: usize },

    #[error("Image of {width}x{height} pixels is too large for {format}")]
    ImageTooLarge { width: u32, height: u32, format: String },

    // === Palette Errors ===
    #[error("Invalid hex color: {value}")]
    InvalidHexColor { value: String },

    // === Settings Errors ===
    #[error("Invalid settings: {0}")]
    Settings(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    SettingsSerialize(#[from] toml::ser::Error),

    // === Project Errors ===
    #[error("Invalid project file: {0}")]
    Project(#[from] crate::export::ProjectFormatError),

    // === External Errors ===
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    #[error("PNG decoding error: {0}")]
    PngDecoding(#[from] png::DecodingError),

    #[cfg(feature = "gif")]
    #[error("GIF encoder error: {0}")]
    GifEncoder(#[from] gif::EncodingError),

    #[error("{0}")]
    Generic(String),
}

/// Result type alias for tessera_engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

// === Convenience constructors ===
impl EngineError {
    /// Create a generic error from any displayable type
    pub fn generic(msg: impl std::fmt::Display) -> Self {
        Self::Generic(msg.to_string())
    }

    pub fn nothing_to_export(msg: impl Into<String>) -> Self {
        Self::NothingToExport { message: msg.into() }
    }

    pub fn write_file(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::WriteFile {
            path: path.into(),
            message: msg.into(),
        }
    }
}
