//! Reusable widgets for the turntable TUI.

pub mod status_bar;
pub mod text_input;
pub mod trigger_button;

pub use status_bar::{KeyHint, StatusBar};
pub use text_input::{TextInput, TextInputState};
pub use trigger_button::TriggerButton;
