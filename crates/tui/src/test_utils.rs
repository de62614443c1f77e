//! Rendering helpers shared by the widget tests.
//!
//! Widgets draw straight into a [`Buffer`]; these helpers turn what was drawn
//! into plain text so tests can compare it with inline `insta` snapshots or
//! search it for labels.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

/// Renders into a fresh `width`×`height` buffer and returns its text.
///
/// ```ignore
/// let card = render_to_string(24, 5, |area, buf| {
///     render_task_card(&fix_bug, "◆", false, &Palette::default(), area, buf);
/// });
/// assert!(card.starts_with("┌"));
/// assert!(card.contains("Fix bug"));
/// ```
pub(crate) fn render_to_string(
    width: u16,
    height: u16,
    draw: impl FnOnce(Rect, &mut Buffer),
) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    draw(area, &mut buf);
    buffer_to_string(&buf)
}

/// Converts a whole buffer to text, one line per row.
///
/// Trailing spaces are trimmed from every row so snapshots do not depend on
/// the width of the area a widget was given.
#[must_use]
pub(crate) fn buffer_to_string(buf: &Buffer) -> String {
    region_to_string(buf, buf.area)
}

/// Converts the part of `buf` inside `region` to text, one line per row.
///
/// Used to look at a single lane or card of a rendered board. Cells outside
/// the buffer are skipped.
#[must_use]
pub(crate) fn region_to_string(buf: &Buffer, region: Rect) -> String {
    let region = region.intersection(buf.area);
    let mut result = String::new();
    for y in region.top()..region.bottom() {
        let start = result.len();
        for x in region.left()..region.right() {
            if let Some(cell) = buf.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        let kept = result[start..].trim_end_matches(' ').len();
        result.truncate(start + kept);
        result.push('\n');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Style;

    #[test]
    fn rows_are_trimmed_but_kept() {
        let text = render_to_string(8, 3, |_, buf| {
            buf.set_string(1, 0, "card", Style::default());
            buf.set_string(0, 2, "end", Style::default());
        });

        assert_eq!(text, " card\n\nend\n");
    }

    #[test]
    fn region_is_clipped_to_the_buffer() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 2));
        buf.set_string(0, 0, "To Do (1)", Style::default());
        buf.set_string(0, 1, "Done (0)", Style::default());

        assert_eq!(region_to_string(&buf, Rect::new(6, 0, 20, 1)), "(1)\n");
        assert_eq!(region_to_string(&buf, Rect::new(0, 1, 4, 5)), "Done\n");
    }
}
