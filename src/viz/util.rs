//! Utility functions for visualization: palette, locale mapping, tick formatting.

use num_format::{Grouping, Locale};
use plotters::style::RGBColor;

/// Qualitative 18-color series palette (paired blues, greens, reds, ...).
pub const PALETTE: [RGBColor; 18] = [
    RGBColor(0x1f, 0x78, 0xb4), // #1f78b4
    RGBColor(0x33, 0xa0, 0x2c), // #33a02c
    RGBColor(0xe3, 0x1a, 0x1c), // #e31a1c
    RGBColor(0xff, 0x7f, 0x00), // #ff7f00
    RGBColor(0x6a, 0x3d, 0x9a), // #6a3d9a
    RGBColor(0xb1, 0x59, 0x28), // #b15928
    RGBColor(0x62, 0xa3, 0xd0), // #62a3d0
    RGBColor(0x72, 0xbf, 0x5b), // #72bf5b
    RGBColor(0xef, 0x5a, 0x5a), // #ef5a5a
    RGBColor(0xfe, 0x9f, 0x37), // #fe9f37
    RGBColor(0x9a, 0x77, 0xb8), // #9a77b8
    RGBColor(0xd8, 0xac, 0x60), // #d8ac60
    RGBColor(0xa6, 0xce, 0xe3), // #a6cee3
    RGBColor(0xb2, 0xdf, 0x8a), // #b2df8a
    RGBColor(0xfb, 0x9a, 0x99), // #fb9a99
    RGBColor(0xfd, 0xbf, 0x6f), // #fdbf6f
    RGBColor(0xca, 0xb2, 0xd6), // #cab2d6
    RGBColor(0xff, 0xff, 0x99), // #ffff99
];

/// Color for a series index; wraps around after 18 series.
#[inline]
pub fn series_color(idx: usize) -> RGBColor {
    PALETTE[idx % PALETTE.len()]
}

/// `#rrggbb` notation.
pub fn color_hex(c: RGBColor) -> String {
    format!("#{:02x}{:02x}{:02x}", c.0, c.1, c.2)
}

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}

/// Number of decimals needed to tell ticks `step` apart.
pub fn tick_precision(step: f64) -> usize {
    if !(step.is_finite() && step > 0.0) {
        return 0;
    }
    (-step.log10().floor()).max(0.0) as usize
}

/// Format a tick value with grouped thousands and a fixed number of decimals.
pub fn format_tick(value: f64, step: f64, locale_tag: &str) -> String {
    let (locale, dec_sep) = map_locale(locale_tag);
    let prec = tick_precision(step);
    let fixed = format!("{:.*}", prec, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    let mut out = String::new();
    if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, locale));
    if let Some(frac) = frac_part {
        out.push(dec_sep);
        out.push_str(frac);
    }
    out
}

/// Insert the locale's thousands separator into a plain digit string.
/// Works on the text so values beyond any integer type keep their digits.
fn group_digits(digits: &str, locale: &Locale) -> String {
    let sep = locale.separator();
    let grouping = locale.grouping();
    let n = digits.chars().count();
    let mut out = String::with_capacity(digits.len() + n / 2 * sep.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && starts_group(n - i, grouping) {
            out.push_str(sep);
        }
        out.push(ch);
    }
    out
}

/// Whether a separator goes before the digit with `remaining` digits left.
fn starts_group(remaining: usize, grouping: Grouping) -> bool {
    match grouping {
        Grouping::Posix => false,
        Grouping::Indian => remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0),
        _ => remaining % 3 == 0,
    }
}
