//! Categorical palettes used for generated consensus colors.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use mapvis_model::HexColor;

const fn rgb(value: u32) -> HexColor {
    HexColor::from_rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
}

/// Matplotlib `tab20`.
pub const TAB20: [HexColor; 20] = [
    rgb(0x1f77b4),
    rgb(0xaec7e8),
    rgb(0xff7f0e),
    rgb(0xffbb78),
    rgb(0x2ca02c),
    rgb(0x98df8a),
    rgb(0xd62728),
    rgb(0xff9896),
    rgb(0x9467bd),
    rgb(0xc5b0d5),
    rgb(0x8c564b),
    rgb(0xc49c94),
    rgb(0xe377c2),
    rgb(0xf7b6d2),
    rgb(0x7f7f7f),
    rgb(0xc7c7c7),
    rgb(0xbcbd22),
    rgb(0xdbdb8d),
    rgb(0x17becf),
    rgb(0x9edae5),
];

/// Matplotlib `tab20b`.
pub const TAB20B: [HexColor; 20] = [
    rgb(0x393b79),
    rgb(0x5254a3),
    rgb(0x6b6ecf),
    rgb(0x9c9ede),
    rgb(0x637939),
    rgb(0x8ca252),
    rgb(0xb5cf6b),
    rgb(0xcedb9c),
    rgb(0x8c6d31),
    rgb(0xbd9e39),
    rgb(0xe7ba52),
    rgb(0xe7cb94),
    rgb(0x843c39),
    rgb(0xad494a),
    rgb(0xd6616b),
    rgb(0xe7969c),
    rgb(0x7b4173),
    rgb(0xa55194),
    rgb(0xce6dbd),
    rgb(0xde9ed6),
];

/// Matplotlib `tab20c`.
pub const TAB20C: [HexColor; 20] = [
    rgb(0x3182bd),
    rgb(0x6baed6),
    rgb(0x9ecae1),
    rgb(0xc6dbef),
    rgb(0xe6550d),
    rgb(0xfd8d3c),
    rgb(0xfdae6b),
    rgb(0xfdd0a2),
    rgb(0x31a354),
    rgb(0x74c476),
    rgb(0xa1d99b),
    rgb(0xc7e9c0),
    rgb(0x756bb1),
    rgb(0x9e9ac8),
    rgb(0xbcbddc),
    rgb(0xdadaeb),
    rgb(0x636363),
    rgb(0x969696),
    rgb(0xbdbdbd),
    rgb(0xd9d9d9),
];

/// Concatenates palettes, keeping the first occurrence of each color.
pub fn dedup_palettes(palettes: &[&[HexColor]]) -> Vec<HexColor> {
    let mut seen = BTreeSet::new();
    palettes
        .iter()
        .flat_map(|palette| palette.iter().copied())
        .filter(|color| seen.insert(*color))
        .collect()
}

/// `tab20 ++ tab20b ++ tab20c`, deduplicated. Built once per process.
pub fn default_palette() -> &'static [HexColor] {
    static PALETTE: OnceLock<Vec<HexColor>> = OnceLock::new();
    PALETTE.get_or_init(|| dedup_palettes(&[&TAB20, &TAB20B, &TAB20C]))
}
