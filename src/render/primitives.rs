use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// Parses from named colors (`"red"`), single-letter codes (`"k"`) and
/// `#rrggbb` / `#rrggbbaa` hex strings, which is also its serde form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    fn from_hex(raw: &str) -> Option<Self> {
        let digits = raw.strip_prefix('#')?;
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return None;
        }
        let channel = |offset: usize| -> Option<f64> {
            u8::from_str_radix(&digits[offset..offset + 2], 16)
                .ok()
                .map(|value| f64::from(value) / 255.0)
        };
        let alpha = if digits.len() == 8 { channel(6)? } else { 1.0 };
        Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    fn from_name(name: &str) -> Option<Self> {
        let color = match name {
            "k" | "black" => Self::BLACK,
            "w" | "white" => Self::WHITE,
            "r" | "red" => Self::RED,
            "b" | "blue" => Self::rgb(0.0, 0.0, 1.0),
            "g" => Self::rgb(0.0, 0.5, 0.0),
            "green" => Self::rgb(0.0, 128.0 / 255.0, 0.0),
            "c" => Self::rgb(0.0, 0.75, 0.75),
            "m" => Self::rgb(0.75, 0.0, 0.75),
            "y" => Self::rgb(0.75, 0.75, 0.0),
            "cyan" => Self::rgb(0.0, 1.0, 1.0),
            "magenta" => Self::rgb(1.0, 0.0, 1.0),
            "yellow" => Self::rgb(1.0, 1.0, 0.0),
            "orange" => Self::rgb(1.0, 165.0 / 255.0, 0.0),
            "purple" => Self::rgb(128.0 / 255.0, 0.0, 128.0 / 255.0),
            "gray" | "grey" => Self::rgb(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0),
            "tab:blue" => Self::rgb(31.0 / 255.0, 119.0 / 255.0, 180.0 / 255.0),
            "tab:orange" => Self::rgb(1.0, 127.0 / 255.0, 14.0 / 255.0),
            "tab:green" => Self::rgb(44.0 / 255.0, 160.0 / 255.0, 44.0 / 255.0),
            "tab:red" => Self::rgb(214.0 / 255.0, 39.0 / 255.0, 40.0 / 255.0),
            _ => return None,
        };
        Some(color)
    }

    fn to_hex(self) -> String {
        let byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        if self.alpha >= 1.0 {
            format!(
                "#{:02x}{:02x}{:02x}",
                byte(self.red),
                byte(self.green),
                byte(self.blue)
            )
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                byte(self.red),
                byte(self.green),
                byte(self.blue),
                byte(self.alpha)
            )
        }
    }
}

impl FromStr for Color {
    type Err = ChartError;

    fn from_str(raw: &str) -> ChartResult<Self> {
        let trimmed = raw.trim();
        let lowered = trimmed.to_ascii_lowercase();
        Self::from_name(&lowered)
            .or_else(|| Self::from_hex(trimmed))
            .ok_or_else(|| ChartError::option("color", format!("unrecognized color `{raw}`")))
    }
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(raw: String) -> ChartResult<Self> {
        raw.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Stroke pattern for line primitives.
///
/// Parses the short codes `-`, `--`, `:`, `-.` as well as the long names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LineStrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

impl LineStrokeStyle {
    /// On/off dash lengths scaled by the stroke width; empty for solid lines.
    #[must_use]
    pub fn dash_pattern(self, stroke_width: f64) -> Vec<f64> {
        let unit: &[f64] = match self {
            Self::Solid => &[],
            Self::Dashed => &[3.7, 1.6],
            Self::Dotted => &[1.0, 1.65],
            Self::DashDot => &[6.4, 1.6, 1.0, 1.6],
        };
        unit.iter().map(|length| length * stroke_width).collect()
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Solid => "-",
            Self::Dashed => "--",
            Self::Dotted => ":",
            Self::DashDot => "-.",
        }
    }
}

impl FromStr for LineStrokeStyle {
    type Err = ChartError;

    fn from_str(raw: &str) -> ChartResult<Self> {
        match raw.trim() {
            "-" | "solid" => Ok(Self::Solid),
            "--" | "dashed" => Ok(Self::Dashed),
            ":" | "dotted" => Ok(Self::Dotted),
            "-." | "dashdot" => Ok(Self::DashDot),
            other => Err(ChartError::option(
                "line_style",
                format!("unknown line style `{other}`"),
            )),
        }
    }
}

impl TryFrom<String> for LineStrokeStyle {
    type Error = ChartError;

    fn try_from(raw: String) -> ChartResult<Self> {
        raw.parse()
    }
}

impl From<LineStrokeStyle> for String {
    fn from(style: LineStrokeStyle) -> Self {
        style.code().to_owned()
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
    pub stroke_style: LineStrokeStyle,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
            stroke_style: LineStrokeStyle::Solid,
        }
    }

    #[must_use]
    pub const fn with_stroke_style(mut self, stroke_style: LineStrokeStyle) -> Self {
        self.stroke_style = stroke_style;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Filled rectangle in pixel space, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "rect origin must be finite".to_owned(),
            ));
        }
        // Zero-height rects are legal: a zero energy difference still draws a bar.
        if !self.width.is_finite() || !self.height.is_finite() || self.width < 0.0 || self.height < 0.0
        {
            return Err(ChartError::InvalidData(
                "rect size must be finite and >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Vertical text alignment relative to `TextPrimitive::y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextVAlign {
    Top,
    Middle,
    Bottom,
}

/// Draw command for one label in pixel space.
///
/// `rotation_deg` turns the text counter-clockwise around its anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    pub v_align: TextVAlign,
    pub rotation_deg: f64,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
        v_align: TextVAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
            v_align,
            rotation_deg: 0.0,
        }
    }

    #[must_use]
    pub fn rotated(mut self, rotation_deg: f64) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() || !self.rotation_deg.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_short_and_hex_colors() {
        assert_eq!("red".parse::<Color>().expect("red"), Color::RED);
        assert_eq!("k".parse::<Color>().expect("k"), Color::BLACK);
        let hex: Color = "#ff000080".parse().expect("hex");
        assert_eq!(hex.red, 1.0);
        assert!((hex.alpha - 128.0 / 255.0).abs() <= 1e-12);
        assert!("not-a-color".parse::<Color>().is_err());
    }

    #[test]
    fn parses_matplotlib_line_style_codes() {
        assert_eq!(":".parse::<LineStrokeStyle>().expect("dotted"), LineStrokeStyle::Dotted);
        assert_eq!("--".parse::<LineStrokeStyle>().expect("dashed"), LineStrokeStyle::Dashed);
        assert!("~".parse::<LineStrokeStyle>().is_err());
        assert!(LineStrokeStyle::Solid.dash_pattern(2.0).is_empty());
        assert_eq!(LineStrokeStyle::Dotted.dash_pattern(2.0), vec![2.0, 3.3]);
    }
}
