use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::Color;

pub const MAX_GRID_SIZE: i32 = 1024;
pub const MAX_LAYER_COUNT: usize = 16;
pub const MAX_BRUSH_SIZE: i32 = 64;
pub const MAX_FRAME_RATE: u32 = 60;
/// Upper bound for the frame count of an animated export (one minute at the highest frame rate).
pub const MAX_ANIMATION_FRAMES: usize = 3600;

/// Start-up defaults of an editor session.
///
/// Persisted as TOML. Missing keys fall back to their defaults and every value
/// is normalized into its valid range after loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub grid_size: i32,
    pub layer_count: usize,
    /// Display size of one cell in screen pixels (viewport only).
    pub cell_size: u32,
    /// Frames per second.
    pub frame_rate: u32,
    pub brush_size: i32,
    pub brush_color: Color,
    /// Canvas background; used wherever a filter needs a color for unset cells.
    pub background: Color,
    pub blur_radius: i32,
    pub motion_blur_amount: i32,
    /// Pixels per cell in exported images.
    pub export_scale: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            grid_size: 32,
            layer_count: 3,
            cell_size: 16,
            frame_rate: 8,
            brush_size: 1,
            brush_color: Color::BLACK,
            background: Color::WHITE,
            blur_radius: 2,
            motion_blur_amount: 3,
            export_scale: 1,
        }
    }
}

impl EngineSettings {
    pub const FILE_NAME: &'static str = "settings.toml";

    pub fn from_toml_str(txt: &str) -> crate::Result<Self> {
        let settings: EngineSettings = toml::from_str(txt)?;
        Ok(settings.normalized())
    }

    pub fn to_toml_string(&self) -> crate::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Loads settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            log::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let txt = fs::read_to_string(path)?;
        Self::from_toml_str(&txt)
    }

    pub fn store(&self, path: &Path) -> crate::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn normalized(mut self) -> Self {
        self.grid_size = self.grid_size.clamp(1, MAX_GRID_SIZE);
        self.layer_count = self.layer_count.clamp(1, MAX_LAYER_COUNT);
        self.cell_size = self.cell_size.max(1);
        self.frame_rate = self.frame_rate.clamp(1, MAX_FRAME_RATE);
        self.brush_size = self.brush_size.clamp(1, MAX_BRUSH_SIZE);
        self.blur_radius = self.blur_radius.max(0);
        self.motion_blur_amount = self.motion_blur_amount.max(0);
        self.export_scale = self.export_scale.max(1);
        self
    }
}
