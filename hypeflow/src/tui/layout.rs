// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar: brand + tabs (1 row)                  |
// +--------------------------------------------------+
// | Market stats strip (3 rows)                       |
// +--------------------------------------------------+
// | Main Panel: active tab (fill)                     |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub status_bar: Rect,
    /// Active users, market cap, 24h volume.
    pub stats: Rect,
    pub main_panel: Rect,
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(3), // stats strip
            Constraint::Min(8),    // main panel
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        stats: vertical[1],
        main_panel: vertical[2],
        help_bar: vertical[3],
    }
}

/// Splits a tab's panel into a fixed-height header and a body.
pub fn header_body(area: Rect, header_height: u16) -> (Rect, Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(header_height), Constraint::Min(0)])
        .split(area);
    (parts[0], parts[1])
}

/// Splits an area into two side-by-side columns.
pub fn columns(area: Rect, left_percent: u16) -> (Rect, Rect) {
    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(left_percent),
            Constraint::Percentage(100 - left_percent.min(100)),
        ])
        .split(area);
    (parts[0], parts[1])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_area() -> Rect {
        Rect::new(0, 0, 120, 40)
    }

    #[test]
    fn layout_all_rects_nonzero() {
        let layout = build_layout(test_area());
        for (name, rect) in [
            ("status_bar", layout.status_bar),
            ("stats", layout.stats),
            ("main_panel", layout.main_panel),
            ("help_bar", layout.help_bar),
        ] {
            assert!(rect.width > 0 && rect.height > 0, "{name} is empty: {rect:?}");
        }
    }

    #[test]
    fn fixed_rows_keep_their_height() {
        let layout = build_layout(test_area());
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.stats.height, 3);
        assert_eq!(layout.help_bar.height, 1);
        assert_eq!(layout.main_panel.height, 40 - 1 - 3 - 1);
    }

    #[test]
    fn zones_stack_without_overlap() {
        let layout = build_layout(test_area());
        assert_eq!(layout.stats.y, layout.status_bar.y + 1);
        assert_eq!(layout.main_panel.y, layout.stats.y + 3);
        assert_eq!(layout.help_bar.y, layout.main_panel.y + layout.main_panel.height);
    }

    #[test]
    fn header_body_splits_vertically() {
        let (head, body) = header_body(Rect::new(0, 0, 50, 20), 5);
        assert_eq!(head.height, 5);
        assert_eq!(body.height, 15);
        assert_eq!(body.y, 5);
    }

    #[test]
    fn columns_split_horizontally() {
        let (left, right) = columns(Rect::new(0, 0, 100, 10), 60);
        assert_eq!(left.width, 60);
        assert_eq!(right.width, 40);
        assert_eq!(right.x, 60);
    }

    #[test]
    fn small_terminal_does_not_panic() {
        let layout = build_layout(Rect::new(0, 0, 20, 5));
        assert!(layout.main_panel.width <= 20);
    }
}
