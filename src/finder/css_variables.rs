//! Translate SASS variable overrides into CSS custom properties.
//!
//! Bulma 1.x reads its configuration from `--bulma-*` custom properties, and
//! colours are split into hue, saturation and lightness components. Appending
//! a `:root` block to a theme lets overrides written for SASS variables keep
//! their effect.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Variables;

/// Named colours understood in overrides.
const NAMED_COLORS: [(&str, &str); 14] = [
    ("white", "#ffffff"),
    ("black", "#000000"),
    ("red", "#ff0000"),
    ("green", "#00ff00"),
    ("blue", "#0000ff"),
    ("yellow", "#ffff00"),
    ("cyan", "#00ffff"),
    ("magenta", "#ff00ff"),
    ("orange", "#ffa500"),
    ("purple", "#800080"),
    ("pink", "#ffc0cb"),
    ("brown", "#a52a2a"),
    ("gray", "#808080"),
    ("grey", "#808080"),
];

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{3,6}$").expect("valid regex"));

static COLOR_FUNCTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)(hsl|rgb|hsla|rgba)\s*\(").expect("valid regex"));

/// Return the hex form of a named colour.
fn named_color(value: &str) -> Option<&'static str> {
    NAMED_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(value))
        .map(|(_, hex)| *hex)
}

/// Return whether a value looks like a colour.
pub(crate) fn is_color_value(value: &str) -> bool {
    HEX_COLOR_RE.is_match(value)
        || named_color(value).is_some()
        || COLOR_FUNCTION_RE.is_match(value)
}

/// Convert a hex (or named) colour to integer HSL components.
///
/// Hue is in degrees, saturation and lightness in percent. Returns `None` for
/// anything that is not a 3 or 6 digit hex colour, with or without `#`.
pub(crate) fn hex_to_hsl(value: &str) -> Option<(u16, u8, u8)> {
    let hex = named_color(value).unwrap_or(value).trim_start_matches('#');

    let hex: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_owned(),
        _ => return None,
    };

    let channel = |index: usize| -> Option<f64> {
        let byte = u8::from_str_radix(hex.get(index..index + 2)?, 16).ok()?;
        Some(f64::from(byte) / 255.0)
    };

    let (red, green, blue) = (channel(0)?, channel(2)?, channel(4)?);

    let max = red.max(green).max(blue);
    let min = red.min(green).min(blue);
    let diff = max - min;

    let lightness = (max + min) / 2.0;

    let (hue, saturation) = if diff == 0.0 {
        (0.0, 0.0)
    } else {
        let saturation = if lightness < 0.5 {
            diff / (max + min)
        } else {
            diff / (2.0 - max - min)
        };

        let hue = if max == red {
            (green - blue) / diff + if green < blue { 6.0 } else { 0.0 }
        } else if max == green {
            (blue - red) / diff + 2.0
        } else {
            (red - green) / diff + 4.0
        };

        (hue / 6.0, saturation)
    };

    Some((
        (hue * 360.0).round() as u16,
        (saturation * 100.0).round() as u8,
        (lightness * 100.0).round() as u8,
    ))
}

/// Render overrides as a `:root` block of custom properties.
///
/// Returns an empty string when there is nothing to override.
pub(crate) fn to_css_variables(variables: &Variables) -> String {
    let mut declarations = Vec::new();

    for (name, value) in variables {
        let property = format!("--bulma-{name}");

        match is_color_value(value).then(|| hex_to_hsl(value)).flatten() {
            Some((hue, saturation, lightness)) => {
                declarations.push(format!("  {property}-h: {hue}deg;"));
                declarations.push(format!("  {property}-s: {saturation}%;"));
                declarations.push(format!("  {property}-l: {lightness}%;"));
            },
            None => declarations.push(format!("  {property}: {value};")),
        }
    }

    if declarations.is_empty() {
        return String::new();
    }

    format!(":root {{\n{}\n}}\n", declarations.join("\n"))
}
