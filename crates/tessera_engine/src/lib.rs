#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::too_many_lines,
    clippy::cast_lossless,
    clippy::cast_precision_loss,
    clippy::must_use_candidate,
    clippy::struct_excessive_bools,
    clippy::return_self_not_must_use,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]
//! Raster data engine for a tile based pixel editor.
//!
//! The engine owns a square pixel grid split into a fixed number of z-ordered
//! layers. Every layer keeps its own frame sequence so layers can animate
//! independently. [`EditorSession`] ties it together and is the single value a
//! front end talks to through the [`EditorApi`] trait.

mod error;
pub use error::*;

mod position;
pub use position::*;

mod color;
pub use color::*;

mod color_state;
pub use color_state::*;

mod grid;
pub use grid::*;

mod stamp;
pub use stamp::*;

mod settings;
pub use settings::*;

pub mod layer_buffer;
pub use layer_buffer::{DrawContext, LayerBuffer, LayerProperties, UNDO_CAPACITY};

pub mod filters;

pub mod animation;
pub use animation::{AnimationModel, Frame, PlaybackClock};

pub mod export;
pub use export::{ExportOptions, ProjectSnapshot};

mod import;
pub use import::*;

pub mod session;
pub use session::{EditorApi, EditorSession, FlipDirection, GestureKind, StrokeTool};
