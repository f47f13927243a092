//! Event handling for the turntable TUI.

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use std::time::Duration;
use tokio::sync::mpsc;

/// Tick rate of the interactive TUI (4 Hz).
pub const TICK_RATE_MS: u64 = 250;

/// Events that can occur in the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// A tick event for UI updates.
    Tick,
    /// Terminal was resized.
    Resize(u16, u16),
}

/// Event handler that runs in a background thread.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate.
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let tx_clone = tx.clone();

        // crossterm polling is blocking, keep it off the runtime
        std::thread::spawn(move || {
            let tick_rate = Duration::from_millis(tick_rate_ms);
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        let event = match evt {
                            CrosstermEvent::Key(key) => Some(Event::Key(key)),
                            CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
                            CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
                            _ => None,
                        };
                        if let Some(e) = event {
                            if tx_clone.send(e).is_err() {
                                break;
                            }
                        }
                    }
                } else if tx_clone.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Get the next event, waiting until one is available.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Key action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Help,
    /// Switch between the dispatcher and the editor.
    SwitchScreen,
    /// Activate the selected trigger / dismiss an alert.
    Select,
    /// Activate trigger by index.
    Trigger(usize),
    /// Submit the editor buffer.
    Submit,
    /// Restore the editor's initial document.
    Reset,
    /// Load the next preset into the editor.
    LoadPreset,
    /// Probe health now.
    RefreshHealth,
    Back,
    Up,
    Down,
    Left,
    Right,
    ScrollUp,
    ScrollDown,
    None,
}

/// Convert a key event to an action.
pub fn key_to_action(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            KeyCode::Char('s') => Action::Submit,
            KeyCode::Char('r') => Action::Reset,
            KeyCode::Char('p') => Action::LoadPreset,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('?') => Action::Help,
        KeyCode::Char('h') => Action::RefreshHealth,
        KeyCode::Tab | KeyCode::BackTab => Action::SwitchScreen,
        KeyCode::Esc => Action::Back,
        KeyCode::Enter | KeyCode::Char(' ') => Action::Select,
        KeyCode::Up | KeyCode::Char('k') => Action::Up,
        KeyCode::Down | KeyCode::Char('j') => Action::Down,
        KeyCode::Left => Action::Left,
        KeyCode::Right | KeyCode::Char('l') => Action::Right,
        KeyCode::PageUp => Action::ScrollUp,
        KeyCode::PageDown => Action::ScrollDown,
        KeyCode::Char(c @ '1'..='9') => Action::Trigger(c as usize - '1' as usize),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_ctrl_keys() {
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        assert_eq!(key_to_action(ctrl('c')), Action::Quit);
        assert_eq!(key_to_action(ctrl('s')), Action::Submit);
        assert_eq!(key_to_action(ctrl('r')), Action::Reset);
        assert_eq!(key_to_action(ctrl('p')), Action::LoadPreset);
        assert_eq!(key_to_action(ctrl('x')), Action::None);
    }

    #[test]
    fn test_number_keys_pick_triggers() {
        assert_eq!(key_to_action(key(KeyCode::Char('1'))), Action::Trigger(0));
        assert_eq!(key_to_action(key(KeyCode::Char('4'))), Action::Trigger(3));
        assert_eq!(key_to_action(key(KeyCode::Char('0'))), Action::None);
    }

    #[test]
    fn test_navigation() {
        assert_eq!(key_to_action(key(KeyCode::Tab)), Action::SwitchScreen);
        assert_eq!(key_to_action(key(KeyCode::Enter)), Action::Select);
        assert_eq!(key_to_action(key(KeyCode::Char('j'))), Action::Down);
        assert_eq!(key_to_action(key(KeyCode::Esc)), Action::Back);
    }
}
