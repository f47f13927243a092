//! turntable-tui: Terminal UI for the turntable timeline controller
//!
//! This crate provides the TUI layer for turntable, including:
//! - Dispatcher screen with one button per preset trigger
//! - JSON editor screen with live validation and response display
//! - Shared widgets (trigger buttons, text input, status bar)
//! - Headless mode for testing and automation

mod app;
mod event;
pub mod headless;
mod jobs;
mod screens;
#[cfg(test)]
pub mod test_utils;
mod ui;

pub use app::{App, Screen};
pub use event::{Action, Event, EventHandler};
pub use turntable_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use jobs::JobRunner;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use turntable_engine::{Config, TurntableClient};

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// This is the main entry point for the TUI. It sets up the terminal,
/// runs the event loop, and restores the terminal on exit.
pub async fn run_tui(config: Config, screen: Screen) -> Result<(), Box<dyn std::error::Error>> {
    // Build the client first so a bad base URL fails before the screen switches
    let client = TurntableClient::from_config(&config)?;

    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, screen, event::TICK_RATE_MS);
    let mut runner = JobRunner::new(client);

    // 4 Hz tick rate
    let mut events = EventHandler::new(event::TICK_RATE_MS);

    let result = run_loop(&mut terminal, &mut app, &mut events, &mut runner).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    runner: &mut JobRunner,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            screens::render_app(app, area, frame.buffer_mut());
        })?;

        runner.spawn_pending(app);
        runner.collect_finished(app).await;

        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => app.handle_key(key),
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => app.handle_action(Action::ScrollUp),
                    MouseEventKind::ScrollDown => app.handle_action(Action::ScrollDown),
                    _ => {}
                },
                Event::Tick => app.tick(),
                Event::Resize(_, _) => {
                    // Terminal will handle resize automatically
                }
            }
        }

        if app.should_quit {
            runner.abort_all();
            break;
        }
    }

    Ok(())
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tui_version() {
        let version = tui_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}

#[cfg(test)]
mod snapshot_tests {
    use crate::app::Screen;
    use crate::test_utils::*;
    use insta::assert_snapshot;
    use serde_json::json;

    #[test]
    fn test_snapshot_status_bar_dispatcher() {
        let app = create_test_app();
        let screen = render_app_to_string(&app);
        let status = screen.lines().last().unwrap_or_default().trim();
        assert_snapshot!(status, @"Dispatcher   1-4  Send  h  Health  Tab  Editor  ?  Help  q  Quit");
    }

    #[test]
    fn test_editor_screen_contains_panes() {
        let mut app = create_test_app_at_screen(Screen::Editor);
        app.config.editor_initial = json!({"a": 1});
        app.reset_editor();

        let screen = render_app_to_string(&app);
        assert!(screen.contains("Timeline Editor"));
        assert!(screen.contains("Request JSON"));
        assert!(screen.contains("Preview"));
        assert!(screen.contains("Response"));
        assert!(screen.contains("Press Ctrl+S to send the document"));
    }

    #[test]
    fn test_screens_render_at_small_sizes() {
        use crate::screens::render_app;
        use ratatui::{buffer::Buffer, layout::Rect};

        for screen in [Screen::Dispatcher, Screen::Editor] {
            let mut app = create_test_app_at_screen(screen);
            app.alert = Some("Please enter valid JSON".to_string());
            for (w, h) in [(20, 5), (40, 10), (1, 1)] {
                let area = Rect::new(0, 0, w, h);
                let mut buf = Buffer::empty(area);
                render_app(&app, area, &mut buf);
            }
        }
    }
}
