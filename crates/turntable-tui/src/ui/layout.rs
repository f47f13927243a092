//! Layout helpers for the turntable TUI.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Create a centered rect with fixed dimensions.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Create the main layout with status bar at bottom.
pub fn main_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Split `area` into a grid of `count` cells, `columns` wide, row by row.
///
/// Rows share the height evenly.
#[allow(clippy::cast_possible_truncation)]
pub fn button_grid(area: Rect, count: usize, columns: usize) -> Vec<Rect> {
    if count == 0 || columns == 0 {
        return Vec::new();
    }
    let rows = count.div_ceil(columns);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    let mut cells = Vec::with_capacity(count);
    for row_area in row_areas.iter() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(*row_area);
        for cell in cols.iter() {
            if cells.len() < count {
                cells.push(*cell);
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fixed() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered_fixed(40, 10, area);
        assert_eq!(rect, Rect::new(20, 7, 40, 10));
    }

    #[test]
    fn test_button_grid_two_columns() {
        let cells = button_grid(Rect::new(0, 0, 40, 10), 4, 2);
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[0].y, cells[1].y);
        assert!(cells[2].y > cells[0].y);
        assert!(cells[1].x > cells[0].x);
    }

    #[test]
    fn test_button_grid_odd_count() {
        let cells = button_grid(Rect::new(0, 0, 40, 9), 3, 2);
        assert_eq!(cells.len(), 3);
        assert!(button_grid(Rect::new(0, 0, 40, 9), 0, 2).is_empty());
    }
}
