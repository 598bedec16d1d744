use serde::{Serialize, Serializer};

/// Normalised RGBA colour (each channel in `[0.0, 1.0]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const SLATE:       Self = Self { r: 0.059, g: 0.090, b: 0.165, a: 1.0 }; // #0f172a
    pub const PANEL:       Self = Self { r: 0.110, g: 0.118, b: 0.169, a: 1.0 }; // #1c1e2b
    pub const WHITE:       Self = Self { r: 0.886, g: 0.910, b: 0.941, a: 1.0 }; // #e2e8f0
    pub const GRAY:        Self = Self { r: 0.612, g: 0.639, b: 0.686, a: 1.0 }; // #9ca3af
    pub const PURPLE:      Self = Self { r: 0.655, g: 0.545, b: 0.980, a: 1.0 }; // #a78bfa
    pub const GREEN:       Self = Self { r: 0.290, g: 0.871, b: 0.502, a: 1.0 }; // #4ade80
    pub const BLUE:        Self = Self { r: 0.376, g: 0.647, b: 0.980, a: 1.0 }; // #60a5fa
    pub const YELLOW:      Self = Self { r: 0.980, g: 0.800, b: 0.082, a: 1.0 }; // #facc15
    pub const RED:         Self = Self { r: 0.973, g: 0.443, b: 0.443, a: 1.0 }; // #f87171
    pub const TRANSPARENT: Self = Self { r: 0.0,   g: 0.0,   b: 0.0,   a: 0.0 };

    /// Parse a CSS-style hex color string (`#RRGGBB` or `#RRGGBBAA`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };

        match hex.len() {
            6 => Some(Self {
                r: byte(&hex[0..2])? as f32 / 255.0,
                g: byte(&hex[2..4])? as f32 / 255.0,
                b: byte(&hex[4..6])? as f32 / 255.0,
                a: 1.0,
            }),
            8 => Some(Self {
                r: byte(&hex[0..2])? as f32 / 255.0,
                g: byte(&hex[2..4])? as f32 / 255.0,
                b: byte(&hex[4..6])? as f32 / 255.0,
                a: byte(&hex[6..8])? as f32 / 255.0,
            }),
            _ => None,
        }
    }

    /// Render as a CSS colour: `#rrggbb` when opaque, `rgba(…)` otherwise.
    pub fn to_css(self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b) = (channel(self.r), channel(self.g), channel(self.b));
        if self.a >= 1.0 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("rgba({r}, {g}, {b}, {:.2})", self.a.clamp(0.0, 1.0))
        }
    }

    /// Return a copy with the alpha channel set to `alpha`.
    #[inline]
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha.clamp(0.0, 1.0);
        self
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_and_rgba() {
        let c = Color::from_hex("#a78bfa").unwrap();
        assert_eq!(c.to_css(), "#a78bfa");
        let c = Color::from_hex("00000080").unwrap();
        assert_eq!(c.to_css(), "rgba(0, 0, 0, 0.50)");
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#gggggg").is_none());
        assert!(Color::from_hex("#éééé").is_none());
    }

    #[test]
    fn with_alpha_clamps() {
        assert_eq!(Color::WHITE.with_alpha(3.0).a, 1.0);
        assert_eq!(Color::TRANSPARENT.with_alpha(-1.0).a, 0.0);
    }
}
