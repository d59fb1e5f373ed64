//! Stateless grid algorithms.
//!
//! Every filter works on a [`PixelGrid`](crate::PixelGrid) handed in by the
//! caller; none of them touch undo history. Filters that read neighbours work
//! from a copy of the input so results never depend on partially written output,
//! except Floyd–Steinberg which by definition feeds its own error forward in
//! row-major order.

mod adjust;
mod blur;
mod dither;
mod flip;
mod flood_fill;
mod transform;

pub use adjust::Adjustment;
pub use blur::{brush_blur, gaussian_blur, gaussian_kernel, motion_blur};
pub use dither::{dither, floyd_steinberg, ordered_dither, quantize_channel, DitherMode, BAYER_4X4, QUANT_STEP};
pub use flip::{flip_horizontal, flip_vertical};
pub use flood_fill::flood_fill;
pub use transform::{rotate_into, MoveGesture, RotateGesture};
