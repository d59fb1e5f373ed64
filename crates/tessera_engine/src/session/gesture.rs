use std::fmt;

use crate::{
    filters::{self, MoveGesture, RotateGesture},
    DrawContext, EngineError, LayerBuffer, Position, Result,
};

use super::EditorSession;

/// What a stroke paints with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeTool {
    Brush,
    /// Brush footprint set to unset.
    Eraser,
    Stamp,
    BrushBlur,
}

impl fmt::Display for StrokeTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrokeTool::Brush => write!(f, "brush"),
            StrokeTool::Eraser => write!(f, "eraser"),
            StrokeTool::Stamp => write!(f, "stamp"),
            StrokeTool::BrushBlur => write!(f, "brush blur"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Stroke(StrokeTool),
    Move,
    Rotate,
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureKind::Stroke(tool) => write!(f, "{tool} stroke"),
            GestureKind::Move => write!(f, "move"),
            GestureKind::Rotate => write!(f, "rotate"),
        }
    }
}

/// The gesture in progress. Each one pushed exactly one undo snapshot on its layer when it began.
#[derive(Debug, Clone)]
pub(crate) enum Gesture {
    Stroke { layer: usize, tool: StrokeTool },
    Move { layer: usize, state: MoveGesture },
    Rotate { layer: usize, state: RotateGesture },
}

impl Gesture {
    pub fn kind(&self) -> GestureKind {
        match self {
            Gesture::Stroke { tool, .. } => GestureKind::Stroke(*tool),
            Gesture::Move { .. } => GestureKind::Move,
            Gesture::Rotate { .. } => GestureKind::Rotate,
        }
    }

    pub fn layer(&self) -> usize {
        match self {
            Gesture::Stroke { layer, .. } | Gesture::Move { layer, .. } | Gesture::Rotate { layer, .. } => *layer,
        }
    }
}

impl EditorSession {
    pub fn active_gesture(&self) -> Option<GestureKind> {
        self.gesture.as_ref().map(Gesture::kind)
    }

    fn draw_context(&self) -> DrawContext {
        DrawContext::new(self.brush_size, Some(self.color.color()))
    }

    /// Error for calling `expected` operations while something else (or nothing) is active.
    fn wrong_gesture(&self) -> EngineError {
        match &self.gesture {
            Some(gesture) => EngineError::GestureInProgress {
                active: gesture.kind().to_string(),
            },
            None => EngineError::NoGestureActive,
        }
    }

    fn gesture_layer_mut(model: &mut crate::AnimationModel, layer: usize) -> Result<&mut LayerBuffer> {
        let max = model.layer_count();
        model.layer_mut(layer).ok_or(EngineError::LayerOutOfRange { layer, max })
    }

    fn apply_stroke(&mut self, layer: usize, tool: StrokeTool, pos: Position) -> Result<()> {
        let ctx = self.draw_context();
        let radius = self.settings.blur_radius;
        let buffer = Self::gesture_layer_mut(&mut self.model, layer)?;
        match tool {
            StrokeTool::Brush => buffer.apply_brush(&ctx, pos),
            StrokeTool::Eraser => buffer.apply_brush(&ctx.with_color(None), pos),
            StrokeTool::Stamp => buffer.apply_stamp(&ctx, &self.stamp, pos),
            StrokeTool::BrushBlur => filters::brush_blur(buffer.grid_mut(), &ctx, pos, radius),
        }
        Ok(())
    }

    /// Starts a stroke on the active layer and applies the tool at `pos`.
    pub fn begin_stroke(&mut self, tool: StrokeTool, pos: Position) -> Result<()> {
        self.ensure_idle()?;
        let layer = self.model.active_layer();
        self.model.active_buffer_mut().push_undo();
        self.gesture = Some(Gesture::Stroke { layer, tool });
        log::debug!("begin {tool} stroke on layer {layer} at {pos}");
        self.apply_stroke(layer, tool, pos)
    }

    pub fn continue_stroke(&mut self, pos: Position) -> Result<()> {
        let Some(&Gesture::Stroke { layer, tool }) = self.gesture.as_ref() else {
            return Err(self.wrong_gesture());
        };
        self.apply_stroke(layer, tool, pos)
    }

    /// Starts dragging the active layer's content; `anchor` is where the drag began.
    pub fn begin_move(&mut self, anchor: Position) -> Result<()> {
        self.ensure_idle()?;
        let layer = self.model.active_layer();
        let buffer = self.model.active_buffer_mut();
        buffer.push_undo();
        let state = MoveGesture::start(buffer.grid(), anchor);
        self.gesture = Some(Gesture::Move { layer, state });
        log::debug!("begin move on layer {layer} at {anchor}");
        Ok(())
    }

    pub fn update_move(&mut self, pos: Position) -> Result<()> {
        let Some(Gesture::Move { layer, state }) = &self.gesture else {
            return Err(self.wrong_gesture());
        };
        let buffer = Self::gesture_layer_mut(&mut self.model, *layer)?;
        state.update(buffer.grid_mut(), pos);
        Ok(())
    }

    /// Starts rotating the active layer around the grid center.
    pub fn begin_rotate(&mut self, start: Position) -> Result<()> {
        self.ensure_idle()?;
        let layer = self.model.active_layer();
        let center = f64::from(self.model.grid_size() - 1) / 2.0;
        let buffer = self.model.active_buffer_mut();
        buffer.push_undo();
        let state = RotateGesture::start(buffer.grid(), (center, center), start);
        self.gesture = Some(Gesture::Rotate { layer, state });
        log::debug!("begin rotate on layer {layer} from {start}");
        Ok(())
    }

    /// Returns the rotation angle in radians.
    pub fn update_rotate(&mut self, pos: Position) -> Result<f64> {
        let Some(Gesture::Rotate { layer, state }) = &self.gesture else {
            return Err(self.wrong_gesture());
        };
        let buffer = Self::gesture_layer_mut(&mut self.model, *layer)?;
        Ok(state.update(buffer.grid_mut(), pos))
    }

    /// Finishes the gesture, keeping its result, and commits it to the current frame.
    pub fn end_gesture(&mut self) -> Result<()> {
        let Some(gesture) = self.gesture.take() else {
            return Err(EngineError::NoGestureActive);
        };
        let buffer = Self::gesture_layer_mut(&mut self.model, gesture.layer())?;
        buffer.drop_undo_if_unchanged();
        self.model.commit_current_edit();
        log::debug!("end {} on layer {}", gesture.kind(), gesture.layer());
        Ok(())
    }

    /// Aborts the gesture and restores the grid it started from.
    pub fn cancel_gesture(&mut self) -> Result<()> {
        let Some(gesture) = self.gesture.take() else {
            return Err(EngineError::NoGestureActive);
        };
        let buffer = Self::gesture_layer_mut(&mut self.model, gesture.layer())?;
        buffer.undo();
        self.model.commit_current_edit();
        log::debug!("cancelled {} on layer {}", gesture.kind(), gesture.layer());
        Ok(())
    }
}
