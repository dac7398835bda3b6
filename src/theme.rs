//! Color palette
//!
//! The built-in palette is embedded at compile time. A `theme.yaml` in the
//! config directory replaces it when present and valid.
//!
//! Loading priority:
//! 1. User file: `~/.config/grido/theme.yaml`
//! 2. Embedded: `themes/dark.yaml`

use std::path::Path;

use serde::Deserialize;

pub const DEFAULT_DARK_YAML: &str = include_str!("../themes/dark.yaml");

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to ARGB u32 for softbuffer
    pub fn to_argb_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    pub const fn with_alpha(&self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Linear interpolation towards `other`, `t` in [0, 1]
    pub fn lerp(&self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            s.get(range)
                .ok_or_else(|| format!("Invalid color format: {}", s))
                .and_then(|hex| u8::from_str_radix(hex, 16).map_err(|e| e.to_string()))
        };
        match s.len() {
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

/// Raw palette file
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub ui: Palette,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Palette {
    pub canvas: CanvasTheme,
    pub panel: PanelTheme,
    pub tree: TreeTheme,
    pub status_bar: StatusBarTheme,
    pub overlay: OverlayTheme,
}

/// Grid canvas colors
#[derive(Debug, Clone, Deserialize)]
pub struct CanvasTheme {
    pub background: Color,
    pub seat: Color,
    pub seat_hover: Color,
    pub seat_text: Color,
    pub empty: Color,
    pub empty_hover: Color,
    pub empty_border: Color,
    pub empty_hover_border: Color,
    /// Column header vertical gradient
    pub header_top: Color,
    pub header_bottom: Color,
    /// Row label diagonal gradient
    pub label_start: Color,
    pub label_end: Color,
    pub label_text: Color,
    pub corner_border: Color,
}

/// Sidebar and form colors
#[derive(Debug, Clone, Deserialize)]
pub struct PanelTheme {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub input_background: Color,
    pub input_focus: Color,
    pub button: Color,
    pub button_text: Color,
    pub accent: Color,
}

/// Section navigator colors
#[derive(Debug, Clone, Deserialize)]
pub struct TreeTheme {
    pub configured: Color,
    pub unconfigured: Color,
    pub active_background: Color,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusBarTheme {
    pub background: Color,
    pub foreground: Color,
}

/// Modal dialog colors
#[derive(Debug, Clone, Deserialize)]
pub struct OverlayTheme {
    pub background: Color,
    pub foreground: Color,
    pub input_background: Color,
    /// Backdrop drawn over the window behind a modal
    pub dim: Color,
    pub highlight: Color,
    pub error: Color,
}

/// Resolved palette
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub canvas: CanvasTheme,
    pub panel: PanelTheme,
    pub tree: TreeTheme,
    pub status_bar: StatusBarTheme,
    pub overlay: OverlayTheme,
}

impl Theme {
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Ok(Self::from_data(data))
    }

    pub fn from_data(data: ThemeData) -> Self {
        Theme {
            name: data.name,
            canvas: data.ui.canvas,
            panel: data.ui.panel,
            tree: data.ui.tree,
            status_bar: data.ui.status_bar,
            overlay: data.ui.overlay,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
        Self::from_yaml(&content)
    }

    /// User theme if present and valid, otherwise the embedded palette
    pub fn load() -> Self {
        if let Some(path) = crate::config_paths::AppFile::Theme.path() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(theme) => {
                        tracing::info!("Loaded user theme from {}", path.display());
                        return theme;
                    }
                    Err(e) => tracing::warn!("Ignoring user theme: {}", e),
                }
            }
        }
        Self::default_dark()
    }

    /// Embedded palette, with a hardcoded fallback
    pub fn default_dark() -> Self {
        match Theme::from_yaml(DEFAULT_DARK_YAML) {
            Ok(theme) => theme,
            Err(e) => {
                tracing::error!("Embedded theme failed to parse: {}", e);
                Self::fallback()
            }
        }
    }

    fn fallback() -> Self {
        let white = Color::rgb(0xFF, 0xFF, 0xFF);
        let blue = Color::rgb(0x3B, 0x82, 0xF6);
        let green = Color::rgb(0x10, 0xB9, 0x81);
        let slate = Color::rgb(0x1E, 0x29, 0x3B);
        Theme {
            name: "Fallback".to_string(),
            canvas: CanvasTheme {
                background: Color::rgb(0x08, 0x0A, 0x0F),
                seat: blue,
                seat_hover: Color::rgb(0x60, 0xA5, 0xFA),
                seat_text: white,
                empty: slate,
                empty_hover: Color::rgb(0x2D, 0x3A, 0x4D),
                empty_border: white.with_alpha(0x1A),
                empty_hover_border: blue,
                header_top: Color::rgb(0x05, 0x96, 0x69),
                header_bottom: green,
                label_start: Color::rgb(0x05, 0x96, 0x69),
                label_end: green,
                label_text: Color::rgb(0, 0, 0),
                corner_border: green,
            },
            panel: PanelTheme {
                background: Color::rgb(0x0F, 0x12, 0x19),
                foreground: Color::rgb(0xE2, 0xE8, 0xF0),
                muted: Color::rgb(0x64, 0x74, 0x8B),
                border: slate,
                input_background: Color::rgb(0x16, 0x1B, 0x26),
                input_focus: blue,
                button: slate,
                button_text: Color::rgb(0xE2, 0xE8, 0xF0),
                accent: blue,
            },
            tree: TreeTheme {
                configured: green,
                unconfigured: Color::rgb(0x47, 0x55, 0x69),
                active_background: Color::rgba(0x1D, 0x4E, 0xD8, 0x55),
            },
            status_bar: StatusBarTheme {
                background: Color::rgb(0x0B, 0x0E, 0x14),
                foreground: Color::rgb(0x94, 0xA3, 0xB8),
            },
            overlay: OverlayTheme {
                background: Color::rgb(0x14, 0x19, 0x24),
                foreground: Color::rgb(0xF1, 0xF5, 0xF9),
                input_background: Color::rgb(0x0B, 0x0E, 0x14),
                dim: Color::rgba(0, 0, 0, 0xAA),
                highlight: green,
                error: Color::rgb(0xF8, 0x71, 0x71),
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_theme_parses() {
        let theme = Theme::from_yaml(DEFAULT_DARK_YAML).unwrap();
        assert_eq!(theme.name, "Grido Dark");
        assert_eq!(theme.canvas.seat, Color::rgb(0x3B, 0x82, 0xF6));
        assert_eq!(theme.canvas.empty_border, Color::rgba(0xFF, 0xFF, 0xFF, 0x1A));
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Color::from_hex("#102030").unwrap(), Color::rgb(0x10, 0x20, 0x30));
        assert_eq!(Color::from_hex("10203040").unwrap().a, 0x40);
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#zz0000").is_err());
    }

    #[test]
    fn test_argb_packing() {
        assert_eq!(Color::rgba(1, 2, 3, 4).to_argb_u32(), 0x04010203);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Color::rgb(0, 0, 0);
        let b = Color::rgb(200, 100, 50);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Color::rgb(100, 50, 25));
    }
}
