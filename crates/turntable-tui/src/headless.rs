//! Headless mode for the turntable TUI.
//!
//! This module provides a way to run the TUI without a real terminal,
//! enabling E2E testing and automation. Input is sent via channels
//! and screen state is captured after each render.

use crate::app::{App, Screen};
use crate::event::Action;
use crate::jobs::JobRunner;
use crate::screens;
use crossterm::event::KeyEvent;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use turntable_engine::{Config, TurntableClient};

/// Default terminal dimensions for headless mode.
pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_HEIGHT: u16 = 24;

/// State captured from the headless TUI after each render.
#[derive(Debug, Clone, Default)]
pub struct HeadlessState {
    /// Current screen being displayed.
    pub screen: Screen,
    /// Text contents of the terminal buffer.
    pub screen_contents: String,
    /// Whether the TUI should quit.
    pub should_quit: bool,
    /// Whether help overlay is visible.
    pub show_help: bool,
    /// Blocking alert, if one is shown.
    pub alert: Option<String>,
}

/// Input delivered to a headless TUI.
#[derive(Debug, Clone)]
enum Input {
    Action(Action),
    Key(KeyEvent),
}

/// Handle to control a headless TUI instance.
///
/// Use this to send input and observe state changes.
pub struct HeadlessHandle {
    input_tx: mpsc::UnboundedSender<Input>,
    state_rx: watch::Receiver<HeadlessState>,
}

impl HeadlessHandle {
    /// Send an action to the TUI.
    ///
    /// Returns `true` if the action was sent successfully.
    pub fn send_action(&self, action: Action) -> bool {
        self.input_tx.send(Input::Action(action)).is_ok()
    }

    /// Send a raw key press, as typed into the editor.
    pub fn send_key(&self, key: KeyEvent) -> bool {
        self.input_tx.send(Input::Key(key)).is_ok()
    }

    /// Get the current state of the TUI.
    pub fn state(&self) -> HeadlessState {
        self.state_rx.borrow().clone()
    }

    /// Wait until a condition is met on the state.
    ///
    /// Returns the state when the condition is met, or `None` if timed out.
    pub async fn wait_for<F>(
        &mut self,
        condition: F,
        timeout: std::time::Duration,
    ) -> Option<HeadlessState>
    where
        F: Fn(&HeadlessState) -> bool,
    {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let state = self.state();
            if condition(&state) {
                return Some(state);
            }

            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return None;
            }

            if tokio::time::timeout(remaining, self.state_rx.changed())
                .await
                .is_err()
            {
                return None;
            }
        }
    }

    /// Wait for specific text to appear on screen.
    pub async fn wait_for_text(
        &mut self,
        text: &str,
        timeout: std::time::Duration,
    ) -> Option<HeadlessState> {
        let text = text.to_string();
        self.wait_for(|s| s.screen_contents.contains(&text), timeout)
            .await
    }

    /// Check if the TUI has quit.
    pub fn has_quit(&self) -> bool {
        self.state().should_quit
    }
}

/// Configuration for headless mode.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Terminal width.
    pub width: u16,
    /// Terminal height.
    pub height: u16,
    /// Tick rate in milliseconds.
    pub tick_rate_ms: u64,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick_rate_ms: 50, // Faster tick rate for testing
        }
    }
}

/// Run the TUI in headless mode against the service in `config`.
///
/// Returns a handle to control the TUI and a join handle for the background task.
///
/// # Example
///
/// ```ignore
/// let (mut handle, task) = run_tui_headless(config, Screen::Dispatcher, HeadlessConfig::default());
///
/// handle.send_action(Action::Trigger(1));
/// handle.wait_for_text("Successfully sent!", Duration::from_secs(2)).await;
///
/// handle.send_action(Action::Quit);
/// task.await.unwrap();
/// ```
pub fn run_tui_headless(
    config: Config,
    screen: Screen,
    headless: HeadlessConfig,
) -> (HeadlessHandle, JoinHandle<Result<(), String>>) {
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(HeadlessState::default());

    let task = tokio::spawn(async move {
        run_headless_loop(config, screen, headless, input_rx, state_tx)
            .await
            .map_err(|e| e.to_string())
    });

    let handle = HeadlessHandle { input_tx, state_rx };

    (handle, task)
}

async fn run_headless_loop(
    config: Config,
    screen: Screen,
    headless: HeadlessConfig,
    mut input_rx: mpsc::UnboundedReceiver<Input>,
    state_tx: watch::Sender<HeadlessState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let backend = TestBackend::new(headless.width, headless.height);
    let mut terminal = Terminal::new(backend)?;

    let client = TurntableClient::from_config(&config)?;
    let mut runner = JobRunner::new(client);
    let mut app = App::new(config, screen, headless.tick_rate_ms);

    let tick_duration = std::time::Duration::from_millis(headless.tick_rate_ms);

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            screens::render_app(&app, area, frame.buffer_mut());
        })?;

        let screen_contents = buffer_to_string(terminal.backend().buffer());

        let _ = state_tx.send(HeadlessState {
            screen: app.screen,
            screen_contents,
            should_quit: app.should_quit,
            show_help: app.show_help,
            alert: app.alert.clone(),
        });

        if app.should_quit {
            runner.abort_all();
            break;
        }

        runner.spawn_pending(&mut app);
        runner.collect_finished(&mut app).await;

        // Wait for input or tick
        tokio::select! {
            Some(input) = input_rx.recv() => match input {
                Input::Action(action) => app.handle_action(action),
                Input::Key(key) => app.handle_key(key),
            },
            () = tokio::time::sleep(tick_duration) => app.tick(),
        }
    }

    Ok(())
}

/// Convert a terminal buffer to a string representation.
fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                result.push_str(cell.symbol());
            }
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
