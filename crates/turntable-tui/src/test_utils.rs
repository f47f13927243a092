//! Test utilities for turntable-tui snapshot and integration testing.
//!
//! This module provides helper functions for creating test apps,
//! rendering screens, and converting buffers to strings for snapshot testing.

use crate::app::{App, Screen};
use crate::screens::Screen as ScreenTrait;
use ratatui::{buffer::Buffer, layout::Rect};
use turntable_engine::Config;

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// Create a test app with the default configuration.
///
/// The startup health probe is drained so tests see only their own jobs.
pub fn create_test_app() -> App {
    create_test_app_with_config(Config::default(), Screen::Dispatcher)
}

/// Create a test app positioned at a specific screen.
pub fn create_test_app_at_screen(screen: Screen) -> App {
    create_test_app_with_config(Config::default(), screen)
}

/// Create a test app from a custom configuration.
pub fn create_test_app_with_config(config: Config, screen: Screen) -> App {
    let mut app = App::new(config, screen, 250);
    app.take_jobs();
    app
}

/// Convert a buffer to a string representation for snapshot testing.
///
/// This produces a simple text representation of the buffer content,
/// suitable for snapshot comparison.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            let cell = buffer.cell((x, y)).unwrap();
            result.push_str(cell.symbol());
        }
        // Trim trailing whitespace from each line
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    // Remove trailing newline
    if result.ends_with('\n') {
        result.pop();
    }

    result
}

/// Render a screen to a buffer and return it as a string.
pub fn render_screen_to_string<S: ScreenTrait>(screen: &S, app: &App) -> String {
    let area = Rect::new(0, 0, TEST_WIDTH, TEST_HEIGHT);
    let mut buffer = Buffer::empty(area);
    screen.render(app, area, &mut buffer);
    buffer_to_string(&buffer)
}

/// Render the whole app, overlays included.
pub fn render_app_to_string(app: &App) -> String {
    let area = Rect::new(0, 0, TEST_WIDTH, TEST_HEIGHT);
    let mut buffer = Buffer::empty(area);
    crate::screens::render_app(app, area, &mut buffer);
    buffer_to_string(&buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_app() {
        let mut app = create_test_app();
        assert_eq!(app.screen, Screen::Dispatcher);
        assert_eq!(app.triggers().len(), 4);
        assert!(app.take_jobs().is_empty());
    }

    #[test]
    fn test_create_test_app_at_screen() {
        let app = create_test_app_at_screen(Screen::Editor);
        assert_eq!(app.screen, Screen::Editor);
    }

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", ratatui::style::Style::default());
        buffer.set_string(0, 1, "World", ratatui::style::Style::default());

        let result = buffer_to_string(&buffer);
        assert_eq!(result, "Hello\nWorld\n");
    }
}
