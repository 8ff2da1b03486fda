use crate::arg::*;

use std::fmt;

///
/// Representation of a colour used when rendering a path
///
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub enum Color {
    Rgba(f32, f32, f32, f32)
}

impl Color {
    ///
    /// Parses a colour in the form `#RRGGBB`
    ///
    pub fn from_hex(text: &str) -> Option<Color> {
        if !is_hex_color(text) {
            return None;
        }

        let component = |idx: usize| u8::from_str_radix(&text[idx..idx+2], 16).ok();
        let r = component(1)?;
        let g = component(3)?;
        let b = component(5)?;

        Some(Color::Rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0))
    }

    ///
    /// Returns the colour as a `#rrggbb` string (alpha is discarded)
    ///
    pub fn to_hex(&self) -> String {
        let (r, g, b, _) = self.to_rgba_u8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    ///
    /// Returns the red, green, blue and alpha components of this colour
    ///
    #[inline]
    pub fn to_rgba_components(&self) -> (f32, f32, f32, f32) {
        match self {
            &Color::Rgba(r, g, b, a) => (r, g, b, a)
        }
    }

    ///
    /// Returns the components of this colour scaled to the 0-255 range
    ///
    pub fn to_rgba_u8(&self) -> (u8, u8, u8, u8) {
        let (r, g, b, a)    = self.to_rgba_components();
        let to_byte         = |component: f32| (component.max(0.0).min(1.0) * 255.0).round() as u8;

        (to_byte(r), to_byte(g), to_byte(b), to_byte(a))
    }
}

impl Default for Color {
    fn default() -> Color {
        Color::Rgba(0.0, 0.0, 0.0, 1.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
