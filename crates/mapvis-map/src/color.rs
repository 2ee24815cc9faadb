//! Deterministic color assignment for consensus labels.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use mapvis_model::{ColorEntry, ColorSource, HexColor, MapvisError, Result, TextColor};

use crate::palette::default_palette;

/// Brightness above which text switches to black.
pub const CONTRAST_THRESHOLD: f64 = 0.65;

const OVERRIDES_NAME: &str = "color overrides";

/// Perceptual brightness on normalized channels.
pub fn brightness(color: HexColor) -> f64 {
    let [r, g, b] = color.channels();
    0.299 * r + 0.587 * g + 0.114 * b
}

/// Black text on bright backgrounds, white otherwise.
pub fn contrast_text_color(background: HexColor) -> TextColor {
    if brightness(background) > CONTRAST_THRESHOLD {
        TextColor::Black
    } else {
        TextColor::White
    }
}

/// Blends each channel toward white: `c * factor + (1 - factor)`.
pub fn lighten(color: HexColor, factor: f64) -> HexColor {
    let factor = factor.clamp(0.0, 1.0);
    HexColor::from_channels(color.channels().map(|c| c * factor + (1.0 - factor)))
}

/// Renders `#rrggbbaa`, with the alpha byte taken from `opacity` clamped to `0..=1`.
pub fn format_with_opacity(color: HexColor, opacity: f64) -> String {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("{}{alpha:02x}", color.to_hex())
}

/// Validates raw override colors, keyed by consensus label.
///
/// Labels are trimmed the same way [`mapvis_model::LabelMapping`] trims
/// consensus labels, so `" T-cell "` overrides `T-cell`.
///
/// # Errors
///
/// Returns [`MapvisError::ColorFormat`] naming the first label (in sorted
/// order) whose color is not six hex digits, and
/// [`MapvisError::InvalidMapping`] for a blank label or for two labels that
/// trim to the same label with different colors.
pub fn parse_overrides(raw: &BTreeMap<String, String>) -> Result<BTreeMap<String, HexColor>> {
    let mut parsed: BTreeMap<String, HexColor> = BTreeMap::new();
    for (label, value) in raw {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(MapvisError::InvalidMapping {
                mapping: OVERRIDES_NAME.to_string(),
                message: format!("blank consensus label {label:?}"),
            });
        }
        let color = HexColor::parse(value).ok_or_else(|| MapvisError::ColorFormat {
            label: trimmed.to_string(),
            value: value.clone(),
        })?;
        match parsed.get(trimmed) {
            Some(existing) if *existing != color => {
                return Err(MapvisError::InvalidMapping {
                    mapping: OVERRIDES_NAME.to_string(),
                    message: format!("label {trimmed:?} is given both {existing} and {color}"),
                });
            }
            Some(_) => {}
            None => {
                parsed.insert(trimmed.to_string(), color);
            }
        }
    }
    Ok(parsed)
}

/// Consensus label to color entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ColorMap {
    entries: BTreeMap<String, ColorEntry>,
}

impl ColorMap {
    pub fn get(&self, label: &str) -> Option<&ColorEntry> {
        self.entries.get(label)
    }

    pub fn color(&self, label: &str) -> Option<HexColor> {
        self.entries.get(label).map(|entry| entry.color)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by label.
    pub fn iter(&self) -> impl Iterator<Item = &ColorEntry> {
        self.entries.values()
    }
}

/// Assigns one color per consensus label.
#[derive(Debug, Clone)]
pub struct ColorAssigner {
    palette: Vec<HexColor>,
}

impl Default for ColorAssigner {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorAssigner {
    pub fn new() -> Self {
        Self {
            palette: default_palette().to_vec(),
        }
    }

    /// Uses a custom palette; an empty one falls back to the default.
    pub fn with_palette(palette: Vec<HexColor>) -> Self {
        if palette.is_empty() {
            Self::new()
        } else {
            Self { palette }
        }
    }

    pub fn palette(&self) -> &[HexColor] {
        &self.palette
    }

    /// Validates `overrides` and assigns a color to every label.
    pub fn assign<'a, I>(&self, labels: I, overrides: &BTreeMap<String, String>) -> Result<ColorMap>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let overrides = parse_overrides(overrides)?;
        Ok(self.assign_parsed(labels, &overrides))
    }

    /// Assigns colors with already validated overrides.
    ///
    /// Labels are visited in sorted order regardless of how `labels` yields
    /// them. Generated colors skip palette entries claimed by an override of a
    /// visited label, unless overrides claim the whole palette.
    pub fn assign_parsed<'a, I>(&self, labels: I, overrides: &BTreeMap<String, HexColor>) -> ColorMap
    where
        I: IntoIterator<Item = &'a str>,
    {
        let labels: BTreeSet<&str> = labels.into_iter().collect();
        let claimed: BTreeSet<HexColor> = labels
            .iter()
            .filter_map(|label| overrides.get(*label).copied())
            .collect();
        let mut available: Vec<HexColor> = self
            .palette
            .iter()
            .copied()
            .filter(|color| !claimed.contains(color))
            .collect();
        if available.is_empty() {
            available = self.palette.clone();
        }

        let mut entries = BTreeMap::new();
        let mut generated = 0usize;
        for label in labels {
            let (color, source) = match overrides.get(label) {
                Some(color) => (*color, ColorSource::Override),
                None => {
                    let color = available[generated % available.len()];
                    generated += 1;
                    (color, ColorSource::Generated)
                }
            };
            entries.insert(
                label.to_string(),
                ColorEntry {
                    label: label.to_string(),
                    color,
                    text: contrast_text_color(color),
                    source,
                },
            );
        }
        if generated > available.len() {
            warn!(
                generated,
                palette = available.len(),
                "generated colors wrap around the palette; some consensus labels share a color"
            );
        }
        debug!(
            labels = entries.len(),
            generated,
            overridden = entries.len() - generated,
            "assigned consensus colors"
        );
        ColorMap { entries }
    }
}
