//! Named colours and the sequential heatmap scale

use plotters::style::RGBColor;

/// Bounce rate by source
pub const CORAL: RGBColor = RGBColor(255, 127, 80);
/// Conversion rate by device
pub const MEDIUM_SEA_GREEN: RGBColor = RGBColor(60, 179, 113);
/// Duration histogram fill
pub const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
/// Most visited pages
pub const STEEL_BLUE: RGBColor = RGBColor(70, 130, 180);
/// Funnel drop-off
pub const ORCHID: RGBColor = RGBColor(218, 112, 214);
/// Bounce rate by page
pub const DARK_ORANGE: RGBColor = RGBColor(255, 140, 0);
/// First colour of the default series cycle
pub const DEFAULT_BLUE: RGBColor = RGBColor(31, 119, 180);
/// First pie slice
pub const GOLD: RGBColor = RGBColor(255, 215, 0);
/// Second pie slice
pub const LIGHT_BLUE: RGBColor = RGBColor(173, 216, 230);
/// Third pie slice
pub const LIGHT_GREEN: RGBColor = RGBColor(144, 238, 144);
/// Bar outlines
pub const EDGE_BLACK: RGBColor = RGBColor(0, 0, 0);

/// Nine-class YlGnBu stops, light to dark
const YL_GN_BU: [RGBColor; 9] = [
    RGBColor(255, 255, 217),
    RGBColor(237, 248, 177),
    RGBColor(199, 233, 180),
    RGBColor(127, 205, 187),
    RGBColor(65, 182, 196),
    RGBColor(29, 145, 192),
    RGBColor(34, 94, 168),
    RGBColor(37, 52, 148),
    RGBColor(8, 29, 88),
];

/// Parse a `#RRGGBB` string
pub fn parse_color(color_str: &str) -> Option<RGBColor> {
    let hex = color_str.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Colour for `t` in `[0, 1]` on the YlGnBu scale, linearly interpolated
pub fn ylgnbu(t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (YL_GN_BU.len() - 1) as f64;
    let lower = scaled.floor() as usize;
    let upper = (lower + 1).min(YL_GN_BU.len() - 1);
    let frac = scaled - lower as f64;

    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (a, b) = (YL_GN_BU[lower], YL_GN_BU[upper]);
    RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Black or white, whichever reads better on `background`
pub fn contrast_text(background: RGBColor) -> RGBColor {
    let luma = 0.299 * background.0 as f64 + 0.587 * background.1 as f64 + 0.114 * background.2 as f64;
    if luma > 140.0 {
        RGBColor(0, 0, 0)
    } else {
        RGBColor(255, 255, 255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#FF7F50"), Some(CORAL));
        assert_eq!(parse_color("#3cb371"), Some(MEDIUM_SEA_GREEN));
        assert_eq!(parse_color("FF7F50"), None);
        assert_eq!(parse_color("#FF7F5"), None);
        assert_eq!(parse_color("#GG0000"), None);
    }

    #[test]
    fn test_ylgnbu_endpoints() {
        assert_eq!(ylgnbu(0.0), YL_GN_BU[0]);
        assert_eq!(ylgnbu(1.0), YL_GN_BU[8]);
        assert_eq!(ylgnbu(-3.0), YL_GN_BU[0]);
        assert_eq!(ylgnbu(f64::NAN), YL_GN_BU[0]);
        assert_eq!(ylgnbu(0.5), YL_GN_BU[4]);
    }

    #[test]
    fn test_ylgnbu_darkens_monotonically() {
        let luma = |c: RGBColor| c.0 as u32 + c.1 as u32 + c.2 as u32;
        let samples: Vec<u32> = (0..=20).map(|i| luma(ylgnbu(i as f64 / 20.0))).collect();
        assert!(samples.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_contrast_text() {
        assert_eq!(contrast_text(YL_GN_BU[0]), RGBColor(0, 0, 0));
        assert_eq!(contrast_text(YL_GN_BU[8]), RGBColor(255, 255, 255));
    }
}
