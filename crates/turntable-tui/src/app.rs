//! Application state and update logic for the turntable TUI.
//!
//! `App` never performs I/O itself. Requests are queued as [`Job`]s, run by
//! the event loop, and fed back through [`App::complete`].

use crate::event::{key_to_action, Action};
use crate::ui::widgets::TextInputState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;
use tracing::{debug, info, warn};
use turntable_engine::{
    Admission, Config, EditorState, PresetTable, RequestError, RequestId, RequestTracker, Trigger,
};

/// Columns of the dispatcher's trigger grid.
pub const DISPATCHER_COLUMNS: usize = 2;

/// Ticks a notification stays visible.
const NOTIFICATION_TICKS: usize = 12;

/// The current screen being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Preset trigger buttons.
    #[default]
    Dispatcher,
    /// Free-form JSON editor.
    Editor,
}

impl Screen {
    pub fn name(self) -> &'static str {
        match self {
            Self::Dispatcher => "Dispatcher",
            Self::Editor => "Editor",
        }
    }

    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Dispatcher => Self::Editor,
            Self::Editor => Self::Dispatcher,
        }
    }
}

/// Which screen a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Dispatcher,
    Editor,
}

/// Work queued for the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    /// `POST /timeline` with this body.
    Submit {
        origin: Origin,
        id: RequestId,
        body: Value,
    },
    /// `GET /health`.
    Health,
}

/// Result of a finished job.
#[derive(Debug, Clone)]
pub enum Completion {
    Submit {
        origin: Origin,
        id: RequestId,
        result: Result<Value, RequestError>,
    },
    Health(Result<Value, RequestError>),
}

/// Application state.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug)]
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Whether the help overlay is visible.
    pub show_help: bool,

    /// Current screen.
    pub screen: Screen,

    /// Active configuration.
    pub config: Config,

    /// Effective preset table.
    pub presets: PresetTable,

    /// Tick counter for animations.
    pub tick: usize,

    /// Notification message (displayed temporarily, cleared after some ticks).
    pub notification: Option<String>,

    /// Ticks remaining until notification is cleared.
    notification_ttl: usize,

    /// Blocking alert. While set, only dismissal is accepted.
    pub alert: Option<String>,

    // === Dispatcher state ===
    /// Index of the selected trigger.
    pub selected_trigger: usize,

    /// Lifecycle of trigger requests.
    pub dispatch: RequestTracker,

    /// Last successful health probe result.
    pub health: Option<Value>,

    /// Whether a health probe is running.
    health_in_flight: bool,

    /// Ticks between health probes, if refresh is enabled.
    health_every_ticks: Option<usize>,

    /// Ticks since the last health probe was queued.
    ticks_since_health: usize,

    // === Editor state ===
    /// Raw buffer with cursor.
    pub input: TextInputState,

    /// Validation of the buffer.
    pub editor: EditorState,

    /// Lifecycle of editor submissions.
    pub submission: RequestTracker,

    /// Scroll offset for the response pane.
    pub result_scroll: u16,

    /// Preset loaded by the next `LoadPreset`.
    next_preset: usize,

    /// Jobs waiting to be picked up by the event loop.
    jobs: Vec<Job>,
}

impl App {
    /// Create a new app instance. A health probe is queued immediately.
    pub fn new(config: Config, screen: Screen, tick_rate_ms: u64) -> Self {
        let presets = config.preset_table();
        let initial = config.editor_initial_text();
        let health_every_ticks = config.health_refresh().map(|every| {
            let ticks = every.as_millis() / u128::from(tick_rate_ms.max(1));
            usize::try_from(ticks).unwrap_or(usize::MAX).max(1)
        });

        let mut app = Self {
            should_quit: false,
            show_help: false,
            screen,
            config,
            presets,
            tick: 0,
            notification: None,
            notification_ttl: 0,
            alert: None,
            selected_trigger: 0,
            dispatch: RequestTracker::new(),
            health: None,
            health_in_flight: false,
            health_every_ticks,
            ticks_since_health: 0,
            input: TextInputState::new(initial.clone()),
            editor: EditorState::new(initial),
            submission: RequestTracker::new(),
            result_scroll: 0,
            next_preset: 0,
            jobs: Vec::new(),
        };
        app.request_health();
        app
    }

    /// The configured triggers.
    pub fn triggers(&self) -> &[Trigger] {
        &self.config.triggers
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.screen == Screen::Editor
            && self.alert.is_none()
            && !self.show_help
            && self.handle_editor_key(key)
        {
            return;
        }
        self.handle_action(key_to_action(key));
    }

    /// Editor text input. Returns true if the key edited the buffer.
    fn handle_editor_key(&mut self, key: KeyEvent) -> bool {
        // Control chords are commands
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }

        match key.code {
            KeyCode::Char(c) => self.input.insert(c),
            KeyCode::Enter => self.input.insert('\n'),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Up => self.input.move_up(),
            KeyCode::Down => self.input.move_down(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            _ => return false,
        }
        self.sync_editor();
        true
    }

    /// Re-validate the editor after the buffer changed.
    fn sync_editor(&mut self) {
        self.editor.set_text(self.input.content());
    }

    /// Handle an action.
    pub fn handle_action(&mut self, action: Action) {
        // Global actions
        match action {
            Action::Quit => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            Action::Help if self.alert.is_none() => {
                self.show_help = !self.show_help;
                return;
            }
            _ => {}
        }

        // If help is showing, any key closes it
        if self.show_help {
            self.show_help = false;
            return;
        }

        if self.alert.is_some() {
            if matches!(action, Action::Select | Action::Back) {
                self.alert = None;
            }
            return;
        }

        match action {
            Action::SwitchScreen => {
                self.screen = self.screen.other();
                return;
            }
            Action::RefreshHealth => {
                self.request_health();
                return;
            }
            _ => {}
        }

        match self.screen {
            Screen::Dispatcher => self.handle_dispatcher_action(action),
            Screen::Editor => self.handle_editor_action(action),
        }
    }

    fn handle_dispatcher_action(&mut self, action: Action) {
        let count = self.config.triggers.len();
        if count == 0 {
            return;
        }
        match action {
            Action::Left => {
                self.selected_trigger = self.selected_trigger.saturating_sub(1);
            }
            Action::Right => {
                self.selected_trigger = (self.selected_trigger + 1).min(count - 1);
            }
            Action::Up => {
                if self.selected_trigger >= DISPATCHER_COLUMNS {
                    self.selected_trigger -= DISPATCHER_COLUMNS;
                }
            }
            Action::Down => {
                if self.selected_trigger + DISPATCHER_COLUMNS < count {
                    self.selected_trigger += DISPATCHER_COLUMNS;
                }
            }
            Action::Select => self.activate_trigger(self.selected_trigger),
            Action::Trigger(index) if index < count => {
                self.selected_trigger = index;
                self.activate_trigger(index);
            }
            _ => {}
        }
    }

    fn handle_editor_action(&mut self, action: Action) {
        match action {
            Action::Submit => self.submit_editor(),
            Action::Reset => self.reset_editor(),
            Action::LoadPreset => self.load_next_preset(),
            Action::ScrollUp => {
                self.result_scroll = self.result_scroll.saturating_sub(1);
            }
            Action::ScrollDown => {
                self.result_scroll = self.result_scroll.saturating_add(1);
            }
            _ => {}
        }
    }

    /// Whether a new request may start while `tracker` has requests out.
    fn admits(&self, tracker: &RequestTracker) -> bool {
        self.config.admission == Admission::Overlap || !tracker.has_outstanding()
    }

    /// Send the timeline bound to trigger `index`.
    pub fn activate_trigger(&mut self, index: usize) {
        let Some(trigger) = self.config.triggers.get(index) else {
            return;
        };
        if !self.admits(&self.dispatch) {
            self.set_notification("A request is already in flight".to_string());
            return;
        }

        let body = match self.presets.require(&trigger.preset) {
            Ok(timeline) => timeline.to_json(),
            Err(e) => {
                warn!(label = %trigger.label, error = %e, "trigger has no timeline");
                self.set_notification(e.to_string());
                return;
            }
        };

        info!(label = %trigger.label, preset = %trigger.preset, "trigger activated");
        let id = self.dispatch.begin();
        self.jobs.push(Job::Submit {
            origin: Origin::Dispatcher,
            id,
            body,
        });
    }

    /// Submit the editor buffer if it holds valid JSON.
    pub fn submit_editor(&mut self) {
        let body = match self.editor.submission() {
            Ok(body) => body.clone(),
            Err(e) => {
                warn!("editor submission blocked: invalid JSON");
                self.alert = Some(e.to_string());
                return;
            }
        };
        if !self.admits(&self.submission) {
            self.set_notification("A request is already in flight".to_string());
            return;
        }

        let id = self.submission.begin();
        self.result_scroll = 0;
        self.jobs.push(Job::Submit {
            origin: Origin::Editor,
            id,
            body,
        });
    }

    /// Restore the configured initial document.
    pub fn reset_editor(&mut self) {
        self.input.set_content(self.config.editor_initial_text());
        self.sync_editor();
    }

    /// Replace the buffer with the next preset, cycling through the table.
    pub fn load_next_preset(&mut self) {
        if self.presets.is_empty() {
            return;
        }
        let index = self.next_preset % self.presets.len();
        self.next_preset = index + 1;

        let Some((name, text)) = self.presets.iter().nth(index).map(|(name, timeline)| {
            let text = serde_json::to_string_pretty(timeline).unwrap_or_else(|_| "[]".into());
            (name.to_string(), text)
        }) else {
            return;
        };
        self.input.set_content(text);
        self.sync_editor();
        self.set_notification(format!("Loaded {name}"));
    }

    /// Queue a health probe unless one is already running.
    pub fn request_health(&mut self) {
        self.ticks_since_health = 0;
        if self.health_in_flight {
            return;
        }
        self.health_in_flight = true;
        self.jobs.push(Job::Health);
    }

    /// Take the queued jobs.
    pub fn take_jobs(&mut self) -> Vec<Job> {
        std::mem::take(&mut self.jobs)
    }

    /// Apply the result of a finished job.
    pub fn complete(&mut self, completion: Completion) {
        match completion {
            Completion::Submit { origin, id, result } => {
                match &result {
                    Ok(_) => info!(request = %id, ?origin, "request succeeded"),
                    Err(e) => warn!(request = %id, ?origin, error = %e, "request failed"),
                }
                let tracker = match origin {
                    Origin::Dispatcher => &mut self.dispatch,
                    Origin::Editor => &mut self.submission,
                };
                tracker.resolve(id, result);
            }
            Completion::Health(result) => {
                self.health_in_flight = false;
                match result {
                    Ok(value) => {
                        debug!(health = %value, "health probe");
                        self.health = Some(value);
                    }
                    Err(e) => debug!(error = %e, "health probe failed"),
                }
            }
        }
    }

    /// Set a temporary notification message.
    fn set_notification(&mut self, msg: String) {
        self.notification = Some(msg);
        self.notification_ttl = NOTIFICATION_TICKS;
    }

    /// Update animations, notifications and the health refresh timer.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);

        if self.notification_ttl > 0 {
            self.notification_ttl -= 1;
            if self.notification_ttl == 0 {
                self.notification = None;
            }
        }

        if let Some(every) = self.health_every_ticks {
            self.ticks_since_health += 1;
            if self.ticks_since_health >= every && !self.health_in_flight {
                self.request_health();
            }
        }
    }
}
