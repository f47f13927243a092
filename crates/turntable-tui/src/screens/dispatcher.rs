//! Dispatcher screen: one button per preset trigger.

use super::Screen;
use crate::app::{App, DISPATCHER_COLUMNS};
use crate::ui::theme::{request_style, spinner, Styles, Symbols};
use crate::ui::widgets::{KeyHint, StatusBar, TriggerButton};
use crate::ui::{button_grid, main_layout};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use turntable_engine::{health_text, RequestState, Timeline};

/// Widest the dispatcher content grows.
const MAX_WIDTH: u16 = 64;

/// Dispatcher screen.
pub struct DispatcherScreen;

impl Screen for DispatcherScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let (main_area, status_area) = main_layout(area);

        let width = main_area.width.min(MAX_WIDTH);
        let column = Rect::new(
            main_area.x + (main_area.width - width) / 2,
            main_area.y,
            width,
            main_area.height,
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Padding
                Constraint::Length(1), // Title
                Constraint::Length(1), // Target
                Constraint::Length(1), // Padding
                Constraint::Min(4),    // Buttons
                Constraint::Length(1), // Request status
                Constraint::Length(1), // Health
                Constraint::Length(1), // Notification
            ])
            .split(column);

        Paragraph::new(Line::from(Span::styled(
            "Turntable Controller",
            Styles::title(),
        )))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        Paragraph::new(Line::from(Span::styled(
            app.config.base_url(),
            Styles::dim(),
        )))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

        render_buttons(app, chunks[4], buf);

        Paragraph::new(status_line(app))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);

        if let Some(text) = app.health.as_ref().and_then(health_text) {
            Paragraph::new(Line::from(vec![
                Span::styled("Health: ", Styles::dim()),
                Span::styled(text, Styles::default()),
            ]))
            .alignment(Alignment::Center)
            .render(chunks[6], buf);
        }

        if let Some(msg) = &app.notification {
            Paragraph::new(Line::from(Span::styled(msg.as_str(), Styles::warning())))
                .alignment(Alignment::Center)
                .render(chunks[7], buf);
        }

        StatusBar::new("Dispatcher")
            .hints(vec![
                KeyHint::new("1-4", "Send"),
                KeyHint::new("h", "Health"),
                KeyHint::new("Tab", "Editor"),
                KeyHint::new("?", "Help"),
                KeyHint::new("q", "Quit"),
            ])
            .render(status_area, buf);
    }
}

fn render_buttons(app: &App, area: Rect, buf: &mut Buffer) {
    let triggers = app.triggers();
    let cells = button_grid(area, triggers.len(), DISPATCHER_COLUMNS);

    for (index, (trigger, cell)) in triggers.iter().zip(cells).enumerate() {
        let detail = match app.presets.get(&trigger.preset) {
            Some(timeline) => format!("{} · {}", trigger.preset, timeline_summary(timeline)),
            None => format!("{} · missing", trigger.preset),
        };
        let mut button = TriggerButton::new(&trigger.label)
            .detail(detail)
            .selected(index == app.selected_trigger);
        if index < 9 {
            button = button.hotkey(index + 1);
        }
        button.render(cell, buf);
    }
}

/// Short description of a timeline's length.
fn timeline_summary(timeline: &Timeline) -> String {
    if timeline.is_empty() {
        return "no-op".to_string();
    }
    let seconds = timeline.total_duration();
    if seconds.fract() == 0.0 {
        format!("{seconds:.0}s")
    } else {
        format!("{seconds:.1}s")
    }
}

fn status_line(app: &App) -> Line<'static> {
    let state = app.dispatch.state();
    let style = request_style(state);
    match state {
        RequestState::Idle => Line::from(Span::styled(
            "Pick a timeline to send",
            Styles::dim(),
        )),
        RequestState::Pending => {
            let mut text = format!("Sending... {}", spinner(app.tick));
            let outstanding = app.dispatch.outstanding();
            if outstanding > 1 {
                text.push_str(&format!(" ({outstanding} in flight)"));
            }
            Line::from(Span::styled(text, style))
        }
        RequestState::Succeeded(_) => Line::from(Span::styled(
            format!("{} Successfully sent!", Symbols::CHECK),
            style,
        )),
        RequestState::Failed(e) => Line::from(Span::styled(
            format!("{} Error: {e}", Symbols::CROSS),
            style,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Completion, Job, Origin};
    use crate::test_utils::{create_test_app, render_screen_to_string};
    use serde_json::json;
    use turntable_engine::{MotionParams, RequestError, Segment};

    #[test]
    fn test_renders_title_and_triggers() {
        let app = create_test_app();
        let result = render_screen_to_string(&DispatcherScreen, &app);

        assert!(result.contains("Turntable Controller"));
        for label in ["Full Capture", "Pivot", "Action Shot", "Front Arc"] {
            assert!(result.contains(label), "missing {label}");
        }
        assert!(result.contains("PIVOT · 30s"));
        assert!(result.contains("NOTHING · no-op"));
        assert!(result.contains("Pick a timeline to send"));
    }

    #[test]
    fn test_shows_health_reading() {
        let mut app = create_test_app();
        app.complete(Completion::Health(Ok(json!({"status": "ok"}))));
        let result = render_screen_to_string(&DispatcherScreen, &app);
        assert!(result.contains(r#"Health: {"status":"ok"}"#));
    }

    #[test]
    fn test_falsy_health_shows_nothing() {
        let mut app = create_test_app();
        app.complete(Completion::Health(Ok(json!(""))));
        let result = render_screen_to_string(&DispatcherScreen, &app);
        assert!(!result.contains("Health:"));
    }

    #[test]
    fn test_request_lifecycle_messages() {
        let mut app = create_test_app();
        app.activate_trigger(1);
        let result = render_screen_to_string(&DispatcherScreen, &app);
        assert!(result.contains("Sending..."));

        let Job::Submit { id, .. } = app.take_jobs().remove(0) else {
            panic!("expected a submit job");
        };
        app.complete(Completion::Submit {
            origin: Origin::Dispatcher,
            id,
            result: Err(RequestError::Status {
                status: 500,
                body: None,
            }),
        });
        let result = render_screen_to_string(&DispatcherScreen, &app);
        assert!(result.contains("✗ Error: Request failed with status code 500"));

        app.activate_trigger(0);
        let Job::Submit { id, .. } = app.take_jobs().remove(0) else {
            panic!("expected a submit job");
        };
        app.complete(Completion::Submit {
            origin: Origin::Dispatcher,
            id,
            result: Ok(json!(null)),
        });
        let result = render_screen_to_string(&DispatcherScreen, &app);
        assert!(result.contains("✓ Successfully sent!"));
    }

    #[test]
    fn test_timeline_summary() {
        assert_eq!(timeline_summary(&Timeline::empty()), "no-op");
        let timeline = Timeline::new(vec![Segment::new(0.0, 7.5, MotionParams::rotate(90.0))]);
        assert_eq!(timeline_summary(&timeline), "7.5s");
    }
}
