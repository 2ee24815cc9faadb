use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque RGB color, rendered as lowercase `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HexColor([u8; 3]);

impl HexColor {
    pub const BLACK: Self = Self([0x00, 0x00, 0x00]);
    pub const WHITE: Self = Self([0xff, 0xff, 0xff]);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Parses exactly six hex digits with an optional leading `#`.
    ///
    /// Shorthand (`#fff`) and alpha (`#rrggbbaa`) forms are rejected.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.len() != 6 {
            return None;
        }
        let mut out = [0u8; 3];
        hex::decode_to_slice(digits, &mut out).ok()?;
        Some(Self(out))
    }

    pub fn rgb(&self) -> [u8; 3] {
        self.0
    }

    /// Channels normalized to `0.0..=1.0`.
    pub fn channels(&self) -> [f64; 3] {
        self.0.map(|c| f64::from(c) / 255.0)
    }

    /// Builds a color from normalized channels, clamping and rounding each one.
    pub fn from_channels(channels: [f64; 3]) -> Self {
        Self(channels.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
    }

    pub fn to_hex(&self) -> String {
        format!("#{}", hex::encode(self.0))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for HexColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("{s:?} is not a 6-digit hex color")))
    }
}

/// Foreground color chosen to contrast with a background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextColor {
    Black,
    White,
}

impl TextColor {
    pub fn as_color(&self) -> HexColor {
        match self {
            TextColor::Black => HexColor::BLACK,
            TextColor::White => HexColor::WHITE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TextColor::Black => "black",
            TextColor::White => "white",
        }
    }
}

/// Where a consensus label's color came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSource {
    Override,
    Generated,
}

/// The color assigned to one consensus label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorEntry {
    pub label: String,
    pub color: HexColor,
    pub text: TextColor,
    pub source: ColorSource,
}
