//! Dispatcher trigger button.

use crate::ui::theme::Styles;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// A labeled button bound to a preset.
#[derive(Debug, Clone)]
pub struct TriggerButton<'a> {
    label: &'a str,
    detail: Option<String>,
    hotkey: Option<usize>,
    selected: bool,
}

impl<'a> TriggerButton<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            detail: None,
            hotkey: None,
            selected: false,
        }
    }

    /// Secondary line under the label (preset name, duration).
    #[must_use]
    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Number key that activates the button (1-based).
    #[must_use]
    pub fn hotkey(mut self, hotkey: usize) -> Self {
        self.hotkey = Some(hotkey);
        self
    }

    #[must_use]
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl Widget for TriggerButton<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let face = if self.selected {
            Styles::button_selected()
        } else {
            Styles::button()
        };
        let border = if self.selected {
            Styles::border_active()
        } else {
            Styles::border()
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .style(face);
        if let Some(key) = self.hotkey {
            block = block.title(format!(" {key} "));
        }

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }

        let mut lines = Vec::new();
        // Center the label vertically when there is room.
        let content_height = 1 + u16::from(self.detail.is_some());
        for _ in 0..inner.height.saturating_sub(content_height) / 2 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(self.label, face)));
        if let Some(detail) = self.detail {
            lines.push(Line::from(Span::styled(
                detail,
                face.remove_modifier(Modifier::BOLD),
            )));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(face)
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    #[test]
    fn test_button_renders_label_and_detail() {
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        TriggerButton::new("Pivot")
            .detail("PIVOT · 30s")
            .hotkey(2)
            .selected(true)
            .render(area, &mut buf);

        let text = buffer_to_string(&buf);
        assert!(text.contains("Pivot"));
        assert!(text.contains("PIVOT · 30s"));
        assert!(text.contains(" 2 "));
    }
}
