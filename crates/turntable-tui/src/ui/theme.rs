//! Theme and styling definitions for the turntable TUI.

use ratatui::style::{Color, Modifier, Style};
use turntable_engine::RequestState;

/// Color palette for the TUI.
pub struct Palette;

impl Palette {
    // Base colors
    pub const BG: Color = Color::Rgb(30, 30, 40);
    pub const FG: Color = Color::Rgb(220, 220, 230);
    pub const DIM: Color = Color::Rgb(140, 140, 160);

    // Accent colors
    pub const ACCENT: Color = Color::Rgb(80, 130, 230);
    pub const ACCENT_DIM: Color = Color::Rgb(60, 80, 140);

    // Status bar colors
    pub const STATUS_BG: Color = Color::Rgb(45, 45, 60);
    pub const STATUS_KEY_BG: Color = Color::Rgb(70, 90, 140);

    // Status colors
    pub const SUCCESS: Color = Color::Rgb(130, 220, 130);
    pub const WARNING: Color = Color::Rgb(240, 200, 100);
    pub const ERROR: Color = Color::Rgb(240, 100, 100);

    // Border colors
    pub const BORDER: Color = Color::Rgb(80, 80, 100);
    pub const BORDER_ACTIVE: Color = Color::Rgb(130, 170, 255);
}

/// Status indicator symbols.
pub struct Symbols;

impl Symbols {
    pub const CHECK: &'static str = "✓";
    pub const CROSS: &'static str = "✗";
    pub const SPINNER: [&'static str; 4] = ["|", "/", "-", "\\"];
}

/// Common styles used throughout the TUI.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::BG)
    }

    /// Dimmed text for secondary information.
    pub fn dim() -> Style {
        Style::default().fg(Palette::DIM).bg(Palette::BG)
    }

    /// Highlighted/selected item.
    pub fn highlight() -> Style {
        Style::default()
            .fg(Palette::ACCENT)
            .bg(Palette::BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Active/focused element.
    pub fn active() -> Style {
        Style::default().fg(Palette::BORDER_ACTIVE).bg(Palette::BG)
    }

    pub fn success() -> Style {
        Style::default()
            .fg(Palette::SUCCESS)
            .bg(Palette::BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warning() -> Style {
        Style::default().fg(Palette::WARNING).bg(Palette::BG)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Palette::ERROR)
            .bg(Palette::BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Title style.
    pub fn title() -> Style {
        Style::default()
            .fg(Palette::FG)
            .add_modifier(Modifier::BOLD)
    }

    /// Trigger button face.
    pub fn button() -> Style {
        Style::default()
            .fg(Palette::FG)
            .bg(Palette::ACCENT_DIM)
            .add_modifier(Modifier::BOLD)
    }

    /// Trigger button face while selected.
    pub fn button_selected() -> Style {
        Style::default()
            .fg(Palette::FG)
            .bg(Palette::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Key hint style (for status bar).
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Palette::FG)
            .bg(Palette::STATUS_KEY_BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key_hint_disabled() -> Style {
        Style::default().fg(Palette::DIM).bg(Palette::STATUS_BG)
    }

    /// Key hint label style.
    pub fn key_label() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::STATUS_BG)
    }

    pub fn key_label_disabled() -> Style {
        Style::default()
            .fg(Palette::DIM)
            .bg(Palette::STATUS_BG)
            .add_modifier(Modifier::CROSSED_OUT)
    }

    /// Status bar background style.
    pub fn status_bar() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::STATUS_BG)
    }

    /// Border style for inactive elements.
    pub fn border() -> Style {
        Style::default().fg(Palette::BORDER)
    }

    /// Border style for active/focused elements.
    pub fn border_active() -> Style {
        Style::default().fg(Palette::BORDER_ACTIVE)
    }
}

/// Spinner frame for the given tick.
pub fn spinner(tick: usize) -> &'static str {
    Symbols::SPINNER[tick % Symbols::SPINNER.len()]
}

/// Style matching a request state.
pub fn request_style(state: &RequestState) -> Style {
    match state {
        RequestState::Idle => Styles::dim(),
        RequestState::Pending => Styles::highlight(),
        RequestState::Succeeded(_) => Styles::success(),
        RequestState::Failed(_) => Styles::error(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_cycles() {
        assert_eq!(spinner(0), "|");
        assert_eq!(spinner(5), "/");
    }

    #[test]
    fn test_request_style() {
        assert_eq!(request_style(&RequestState::Idle), Styles::dim());
        assert_eq!(
            request_style(&RequestState::Succeeded(serde_json::Value::Null)),
            Styles::success()
        );
    }
}
