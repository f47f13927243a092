//! Editor screen: free-form JSON sent to the timeline endpoint.

use super::Screen;
use crate::app::App;
use crate::ui::main_layout;
use crate::ui::theme::{request_style, spinner, Styles, Symbols};
use crate::ui::widgets::{KeyHint, StatusBar};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use serde_json::Value;
use turntable_engine::{RequestError, RequestState};

/// Editor screen.
pub struct EditorScreen;

impl Screen for EditorScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let (main_area, status_area) = main_layout(area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),      // Header
                Constraint::Percentage(55), // Buffer and preview
                Constraint::Length(1),      // Validation
                Constraint::Min(3),         // Response
            ])
            .split(main_area);

        Paragraph::new(Line::from(vec![
            Span::styled("Timeline Editor", Styles::title()),
            Span::styled(format!("  POST {}/timeline", app.config.base_url()), Styles::dim()),
        ]))
        .render(rows[0], buf);

        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        let input_block = Block::default()
            .title(" Request JSON ")
            .title_style(Styles::title())
            .borders(Borders::ALL)
            .border_style(Styles::border_active());
        app.input
            .widget()
            .block(input_block)
            .focused(app.alert.is_none() && !app.show_help)
            .placeholder("Type a JSON document")
            .render(panes[0], buf);

        let preview_block = Block::default()
            .title(" Preview ")
            .borders(Borders::ALL)
            .border_style(Styles::border());
        let preview = match app.editor.preview() {
            Some(text) => Paragraph::new(text).style(Styles::default()),
            None => Paragraph::new("No preview").style(Styles::dim()),
        };
        preview.block(preview_block).render(panes[1], buf);

        let validation = match app.editor.validation_message() {
            Some(msg) => Line::from(Span::styled(
                format!("{} {msg}", Symbols::CROSS),
                Styles::error(),
            )),
            None => Line::from(Span::styled(
                format!("{} Valid JSON", Symbols::CHECK),
                Styles::success(),
            )),
        };
        Paragraph::new(validation).render(rows[2], buf);

        let state = app.submission.state();
        let response_block = Block::default()
            .title(" Response ")
            .borders(Borders::ALL)
            .border_style(Styles::border());
        Paragraph::new(result_lines(state, app.tick))
            .block(response_block)
            .scroll((app.result_scroll, 0))
            .render(rows[3], buf);

        StatusBar::new("Editor")
            .hints(vec![
                KeyHint::new("Ctrl+S", "Send").enabled(app.editor.can_submit()),
                KeyHint::new("Ctrl+R", "Reset"),
                KeyHint::new("Ctrl+P", "Load"),
                KeyHint::new("Tab", "Switch"),
                KeyHint::new("Ctrl+C", "Quit"),
            ])
            .right(app.notification.as_deref().unwrap_or(""))
            .render(status_area, buf);
    }
}

/// Lines shown in the response pane for a submission state.
fn result_lines(state: &RequestState, tick: usize) -> Vec<Line<'static>> {
    let style = request_style(state);
    match state {
        RequestState::Idle => vec![Line::from(Span::styled(
            "Press Ctrl+S to send the document",
            style,
        ))],
        RequestState::Pending => vec![Line::from(Span::styled(
            format!("Sending... {}", spinner(tick)),
            style,
        ))],
        RequestState::Succeeded(body) => {
            let mut lines = vec![Line::from(Span::styled(
                format!("{} Success", Symbols::CHECK),
                style,
            ))];
            lines.extend(json_lines(body));
            lines
        }
        RequestState::Failed(e) => error_lines(e, style),
    }
}

fn error_lines(error: &RequestError, style: ratatui::style::Style) -> Vec<Line<'static>> {
    if !error.is_http() {
        return vec![Line::from(Span::styled(
            format!("{} {error}", Symbols::CROSS),
            style,
        ))];
    }

    let heading = match error.status() {
        Some(status) => format!("{} Status: {status}", Symbols::CROSS),
        None => format!("{} Request failed", Symbols::CROSS),
    };
    let mut lines = vec![
        Line::from(Span::styled(heading, style)),
        Line::from(Span::styled(error.to_string(), Styles::default())),
    ];
    if let Some(body) = error.body() {
        lines.push(Line::from(Span::styled("Response body:", Styles::dim())));
        lines.extend(json_lines(body));
    }
    lines
}

fn json_lines(value: &Value) -> Vec<Line<'static>> {
    let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    text.lines().map(|line| Line::from(line.to_string())).collect()
}
