use crate::Color;

/// Saturation below this (in percent) counts as achromatic.
const SATURATION_EPSILON: f32 = 1.0e-3;

/// The brush color, kept in sync as RGB and HSB.
///
/// RGB and HSB are both stored: setting RGB reproduces that exact RGB when read
/// back, and the hue survives a trip through an achromatic color so raising the
/// saturation again restores it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorState {
    red: u8,
    green: u8,
    blue: u8,
    /// Degrees in `[0, 360)`.
    hue: f32,
    /// Percent in `[0, 100]`.
    saturation: f32,
    /// Percent in `[0, 100]`.
    brightness: f32,
}

impl Default for ColorState {
    fn default() -> Self {
        Self::from_color(Color::BLACK)
    }
}

impl ColorState {
    pub fn from_color(color: Color) -> Self {
        let (hue, saturation, brightness) = rgb_to_hsb(color.r, color.g, color.b);
        Self {
            red: color.r,
            green: color.g,
            blue: color.b,
            hue,
            saturation,
            brightness,
        }
    }

    /// Opaque color built from the current RGB channels.
    pub fn color(&self) -> Color {
        Color::new(self.red, self.green, self.blue)
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    pub fn hsb(&self) -> (f32, f32, f32) {
        (self.hue, self.saturation, self.brightness)
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Takes over an RGB color. An achromatic color keeps the previous hue.
    pub fn set_from_color(&mut self, color: Color) {
        let (hue, saturation, brightness) = rgb_to_hsb(color.r, color.g, color.b);
        self.red = color.r;
        self.green = color.g;
        self.blue = color.b;
        if saturation >= SATURATION_EPSILON {
            self.hue = hue;
        }
        self.saturation = saturation;
        self.brightness = brightness;
    }

    pub fn set_hue(&mut self, hue: f32) {
        self.hue = if hue.is_finite() { hue.rem_euclid(360.0) } else { 0.0 };
        // rem_euclid can round up to exactly 360.0 for tiny negative inputs
        if self.hue >= 360.0 {
            self.hue = 0.0;
        }
        self.update_rgb();
    }

    pub fn set_saturation(&mut self, saturation: f32) {
        self.saturation = clamp_percent(saturation);
        self.update_rgb();
    }

    pub fn set_brightness(&mut self, brightness: f32) {
        self.brightness = clamp_percent(brightness);
        self.update_rgb();
    }

    pub fn set_red(&mut self, red: i32) {
        self.red = red.clamp(0, 255) as u8;
        self.update_hsb();
    }

    pub fn set_green(&mut self, green: i32) {
        self.green = green.clamp(0, 255) as u8;
        self.update_hsb();
    }

    pub fn set_blue(&mut self, blue: i32) {
        self.blue = blue.clamp(0, 255) as u8;
        self.update_hsb();
    }

    fn update_rgb(&mut self) {
        let (r, g, b) = hsb_to_rgb(self.hue, self.saturation, self.brightness);
        self.red = r;
        self.green = g;
        self.blue = b;
    }

    // RGB is authoritative here, so an achromatic result resets the hue as well.
    fn update_hsb(&mut self) {
        let (hue, saturation, brightness) = rgb_to_hsb(self.red, self.green, self.blue);
        self.hue = hue;
        self.saturation = saturation;
        self.brightness = brightness;
    }
}

fn clamp_percent(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Returns (hue degrees, saturation percent, brightness percent).
pub fn rgb_to_hsb(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue = if delta <= f32::EPSILON {
        0.0
    } else if (max - r).abs() <= f32::EPSILON {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if (max - g).abs() <= f32::EPSILON {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let saturation = if max <= f32::EPSILON { 0.0 } else { delta / max * 100.0 };
    let hue = if hue >= 360.0 { hue - 360.0 } else { hue };

    (hue, saturation, max * 100.0)
}

pub fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32) -> (u8, u8, u8) {
    let s = saturation / 100.0;
    let v = brightness / 100.0;
    let c = v * s;
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (h.rem_euclid(2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let to_u8 = |f: f32| ((f + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_u8(r), to_u8(g), to_u8(b))
}
