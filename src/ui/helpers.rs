use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Color;

/// Parse a `#RRGGBB` string into a terminal color. Anything else maps to gray
/// so a hand-edited snapshot can never break drawing.
pub(crate) fn hex_color(hex: &str) -> Color {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 {
        return Color::Gray;
    }
    match u32::from_str_radix(digits, 16) {
        Ok(rgb) => Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8),
        Err(_) => Color::Gray,
    }
}

/// Whether text on top of `hex` should be dark. Uses the same luma cutoff the
/// palette swatches use for their check mark.
pub(crate) fn is_light_color(hex: &str) -> bool {
    match hex_color(hex) {
        Color::Rgb(r, g, b) => {
            let luma = 0.2126 * f64::from(r) + 0.7152 * f64::from(g) + 0.0722 * f64::from(b);
            luma > 200.0
        }
        _ => false,
    }
}

/// Text color that stays readable on `background`.
pub(crate) fn contrast_text(background: &str) -> Color {
    if is_light_color(background) {
        Color::Black
    } else {
        Color::White
    }
}

/// Truncate to at most `width` characters, marking the cut with an ellipsis.
pub(crate) fn ellipsize(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Terminal position for a text cursor at `row`/`column` inside `inner`,
/// pinned to the last cell when the value is wider or taller than the box.
pub(crate) fn clamp_cursor(inner: Rect, row: u16, column: u16) -> (u16, u16) {
    let x = inner
        .x
        .saturating_add(column)
        .min(inner.right().saturating_sub(1))
        .max(inner.x);
    let y = inner
        .y
        .saturating_add(row)
        .min(inner.bottom().saturating_sub(1))
        .max(inner.y);
    (x, y)
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(hex_color("#FF0000"), Color::Rgb(255, 0, 0));
        assert_eq!(hex_color("#0a66c2"), Color::Rgb(10, 102, 194));
        assert_eq!(hex_color("red"), Color::Gray);
        assert_eq!(hex_color("#GGGGGG"), Color::Gray);
    }

    #[test]
    fn light_backgrounds_get_dark_text() {
        assert_eq!(contrast_text("#FFFFFF"), Color::Black);
        assert_eq!(contrast_text("#F3F4F6"), Color::Black);
        assert_eq!(contrast_text("#111827"), Color::White);
    }

    #[test]
    fn ellipsize_respects_width() {
        assert_eq!(ellipsize("short", 10), "short");
        assert_eq!(ellipsize("a longer line", 6), "a lon…");
        assert_eq!(ellipsize("abc", 0), "");
    }

    #[test]
    fn cursor_stays_inside_the_box() {
        let inner = Rect::new(10, 5, 20, 4);
        assert_eq!(clamp_cursor(inner, 0, 3), (13, 5));
        assert_eq!(clamp_cursor(inner, 1, 200), (29, 6));
        assert_eq!(clamp_cursor(inner, 9, 0), (10, 8));
        assert_eq!(clamp_cursor(Rect::new(0, 0, 0, 0), 2, 2), (0, 0));
    }

    #[test]
    fn surface_error_prefers_root_cause() {
        let err = anyhow::anyhow!("disk full").context("failed to write card.vcf");
        assert_eq!(surface_error(&err), "disk full");
    }
}
