//! Screen definitions for the turntable TUI.

pub mod dispatcher;
pub mod editor;

use crate::app::{self, App};
use crate::ui::centered_fixed;
use crate::ui::theme::Styles;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Trait for screens that can be rendered.
pub trait Screen {
    /// Render the screen to the buffer.
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Render the current screen plus any overlays.
pub fn render_app(app: &App, area: Rect, buf: &mut Buffer) {
    match app.screen {
        app::Screen::Dispatcher => dispatcher::DispatcherScreen.render(app, area, buf),
        app::Screen::Editor => editor::EditorScreen.render(app, area, buf),
    }

    if let Some(message) = &app.alert {
        render_alert_overlay(message, area, buf);
    }
    if app.show_help {
        render_help_overlay(area, buf);
    }
}

/// Render the help overlay.
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    let help_text = r"
  Dispatcher
    1-9               Send a trigger
    Arrows            Move selection
    Enter / Space     Send selected trigger
    h                 Refresh health

  Editor
    Ctrl+S            Send document
    Ctrl+R            Reset document
    Ctrl+P            Load next preset

  Tab switches screens.
  Ctrl+C quits (q on the Dispatcher).

  [Press any key to close]
";

    let width = 50.min(area.width.saturating_sub(4));
    let height = 19.min(area.height.saturating_sub(2));
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(" Help ")
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border_active())
        .style(Styles::default());

    Paragraph::new(help_text)
        .block(block)
        .style(Styles::default())
        .render(overlay_area, buf);
}

/// Render a blocking alert that must be dismissed.
pub fn render_alert_overlay(message: &str, area: Rect, buf: &mut Buffer) {
    let width = 44.min(area.width.saturating_sub(4));
    let height = 7.min(area.height);
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(" Alert ")
        .title_style(Styles::warning())
        .borders(Borders::ALL)
        .border_style(Styles::warning())
        .style(Styles::default());

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, Styles::default())),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Enter ", Styles::key_hint()),
            Span::styled(" OK", Styles::key_label()),
        ]),
    ];

    Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(overlay_area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_to_string, create_test_app};

    #[test]
    fn test_alert_overlay_shows_message() {
        let mut app = create_test_app();
        app.alert = Some("Please enter valid JSON".to_string());

        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        render_app(&app, area, &mut buf);

        let text = buffer_to_string(&buf);
        assert!(text.contains("Alert"));
        assert!(text.contains("Please enter valid JSON"));
    }

    #[test]
    fn test_help_overlay_on_top() {
        let mut app = create_test_app();
        app.show_help = true;

        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        render_app(&app, area, &mut buf);

        let text = buffer_to_string(&buf);
        assert!(text.contains("Press any key to close"));
        assert!(text.contains("Ctrl+C quits (q on the Dispatcher)"));
    }
}
