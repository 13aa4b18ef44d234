//! Text width estimation and truncation.

/// Average glyph advance as a fraction of the font size.
const AVG_ADVANCE: f64 = 0.60;

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: f64) -> f64 {
    text.chars().count() as f64 * font_px * AVG_ADVANCE
}

/// Line height used for a single row of text.
pub fn line_height_px(font_px: f64) -> f64 {
    (font_px * 1.2).ceil()
}

/// Truncate to fit `max_px` and add a single ellipsis if needed.
pub fn truncate_to_width(text: &str, font_px: f64, max_px: f64) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        let candidate = format!("{out}{ch}…");
        if estimate_text_width_px(&candidate, font_px) > max_px {
            break;
        }
        out.push(ch);
    }
    if out.is_empty() {
        return String::new();
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_scales_with_chars_and_font() {
        assert_eq!(estimate_text_width_px("", 10.0), 0.0);
        assert_eq!(estimate_text_width_px("abcde", 10.0), 30.0);
        assert_eq!(estimate_text_width_px("äöü", 20.0), 36.0);
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_to_width("short", 10.0, 100.0), "short");
    }

    #[test]
    fn truncate_adds_single_ellipsis() {
        // 6px per char: 5 chars incl. ellipsis fit into 30px
        let t = truncate_to_width("Population total", 10.0, 30.0);
        assert_eq!(t, "Popu…");
        assert!(estimate_text_width_px(&t, 10.0) <= 30.0);
    }

    #[test]
    fn truncate_to_nothing_when_no_room() {
        assert_eq!(truncate_to_width("abc", 10.0, 4.0), "");
    }
}
