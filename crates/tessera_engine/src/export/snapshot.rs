use crate::{
    animation::{LayerTrack, DEFAULT_FRAME_RATE},
    AnimationModel, Color, EngineError, EngineSettings, Frame, LayerBuffer, PixelGrid, Result, MAX_BRUSH_SIZE, MAX_FRAME_RATE, MAX_GRID_SIZE, MAX_LAYER_COUNT,
};

use super::ProjectFormatError;

/// One layer of a saved project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSnapshot {
    pub name: String,
    pub is_visible: bool,
    pub is_animated: bool,
    pub current_frame: usize,
    pub frames: Vec<PixelGrid>,
}

/// Everything needed to restore an editing session exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSnapshot {
    pub grid_size: i32,
    pub cell_size: u32,
    pub layers: Vec<LayerSnapshot>,
    pub active_layer: usize,
    pub brush_size: i32,
    pub brush_color: Color,
    pub frame_rate: u32,
    pub background: Color,
}

impl ProjectSnapshot {
    /// Captures the committed frames of `model`. Session values (brush, background, cell size)
    /// start from the defaults and are filled in by the caller.
    pub fn from_model(model: &AnimationModel) -> Self {
        let defaults = EngineSettings::default();
        let layers = model
            .tracks()
            .iter()
            .map(|track| {
                let props = &track.buffer().properties;
                LayerSnapshot {
                    name: props.title.clone(),
                    is_visible: props.is_visible,
                    is_animated: props.is_animated,
                    current_frame: track.current(),
                    frames: track.frames().iter().map(Frame::to_grid).collect(),
                }
            })
            .collect();
        Self {
            grid_size: model.grid_size(),
            cell_size: defaults.cell_size,
            layers,
            active_layer: model.active_layer(),
            brush_size: defaults.brush_size,
            brush_color: defaults.brush_color,
            frame_rate: model.frame_rate(),
            background: defaults.background,
        }
    }

    /// Checks every value a loaded snapshot could get wrong.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(EngineError::InvalidCanvasSize {
                size: i64::from(self.grid_size),
            });
        }
        if self.layers.is_empty() || self.layers.len() > MAX_LAYER_COUNT {
            return Err(EngineError::InvalidLayerCount { count: self.layers.len() });
        }
        if self.active_layer >= self.layers.len() {
            return Err(EngineError::LayerOutOfRange {
                layer: self.active_layer,
                max: self.layers.len(),
            });
        }
        for (i, layer) in self.layers.iter().enumerate() {
            if layer.frames.is_empty() {
                return Err(ProjectFormatError::InvalidValue(format!("layer {i} has no frames")).into());
            }
            if layer.current_frame >= layer.frames.len() {
                return Err(ProjectFormatError::InvalidValue(format!(
                    "layer {i}: current frame {} of {}",
                    layer.current_frame,
                    layer.frames.len()
                ))
                .into());
            }
            if let Some(frame) = layer.frames.iter().find(|f| f.size() != self.grid_size) {
                return Err(EngineError::GridSizeMismatch {
                    expected: self.grid_size,
                    actual: frame.size(),
                });
            }
        }
        if self.cell_size == 0 {
            return Err(ProjectFormatError::InvalidValue("cell size 0".to_string()).into());
        }
        if !(1..=MAX_BRUSH_SIZE).contains(&self.brush_size) {
            return Err(ProjectFormatError::InvalidValue(format!("brush size {}", self.brush_size)).into());
        }
        if !(1..=MAX_FRAME_RATE).contains(&self.frame_rate) {
            return Err(ProjectFormatError::InvalidValue(format!("frame rate {}", self.frame_rate)).into());
        }
        Ok(())
    }

    /// Builds a fresh model; every layer's live grid shows its current frame.
    pub fn to_model(&self) -> Result<AnimationModel> {
        self.validate()?;
        let tracks = self
            .layers
            .iter()
            .map(|layer| {
                let mut buffer = LayerBuffer::new(layer.name.clone(), self.grid_size);
                buffer.properties.is_visible = layer.is_visible;
                buffer.properties.is_animated = layer.is_animated;
                let frames = layer.frames.iter().cloned().map(Frame::capture).collect();
                LayerTrack::with_frames(buffer, frames, layer.current_frame)
            })
            .collect();
        let mut model = AnimationModel::from_tracks(self.grid_size, tracks, self.active_layer, DEFAULT_FRAME_RATE)?;
        model.set_frame_rate(self.frame_rate);
        Ok(model)
    }

    /// Composite of the visible layers' current frames.
    pub fn preview(&self) -> PixelGrid {
        let grids: Vec<&PixelGrid> = self
            .layers
            .iter()
            .filter(|l| l.is_visible)
            .filter_map(|l| l.frames.get(l.current_frame))
            .collect();
        super::composite(self.grid_size.max(1), &grids)
    }
}
