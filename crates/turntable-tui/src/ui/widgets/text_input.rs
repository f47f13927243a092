//! Multi-line text input widget.

use crate::ui::theme::Styles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

/// A multi-line text input widget.
#[derive(Debug, Clone)]
pub struct TextInput<'a> {
    /// The text content.
    content: &'a str,
    /// Cursor position (character index).
    cursor: usize,
    /// Optional block for borders/title.
    block: Option<Block<'a>>,
    /// Whether the input is focused.
    focused: bool,
    /// Placeholder text.
    placeholder: Option<&'a str>,
}

impl<'a> TextInput<'a> {
    /// Create a new text input.
    pub fn new(content: &'a str, cursor: usize) -> Self {
        Self {
            content,
            cursor,
            block: None,
            focused: true,
            placeholder: None,
        }
    }

    /// Set the block for the text input.
    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Set focus state.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set placeholder text.
    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        if inner.height < 1 || inner.width < 1 {
            return;
        }

        let cursor_style = Styles::active().add_modifier(Modifier::REVERSED);

        if self.content.is_empty() {
            let mut spans = Vec::new();
            if self.focused {
                spans.push(Span::styled(" ", cursor_style));
            }
            if let Some(placeholder) = self.placeholder {
                spans.push(Span::styled(placeholder, Styles::dim()));
            }
            Paragraph::new(Line::from(spans)).render(inner, buf);
            return;
        }

        let (cursor_line, cursor_col) = line_col(self.content, self.cursor);
        let offset = cursor_line.saturating_sub(usize::from(inner.height) - 1);

        let lines: Vec<Line<'_>> = self
            .content
            .split('\n')
            .enumerate()
            .skip(offset)
            .take(usize::from(inner.height))
            .map(|(index, text)| {
                if !self.focused || index != cursor_line {
                    return Line::from(Span::styled(text, Styles::default()));
                }
                let split = text
                    .char_indices()
                    .nth(cursor_col)
                    .map_or(text.len(), |(i, _)| i);
                let (before, rest) = text.split_at(split);
                let mut chars = rest.chars();
                let under = chars.next().map_or_else(|| " ".to_string(), String::from);
                Line::from(vec![
                    Span::styled(before, Styles::default()),
                    Span::styled(under, cursor_style),
                    Span::styled(chars.as_str(), Styles::default()),
                ])
            })
            .collect();

        Paragraph::new(lines).style(Styles::default()).render(inner, buf);
    }
}

/// Line and column (both in characters) of a character index.
fn line_col(content: &str, cursor: usize) -> (usize, usize) {
    let mut line = 0;
    let mut col = 0;
    for ch in content.chars().take(cursor) {
        if ch == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
    }
    (line, col)
}

/// State for a text input, managing content and cursor position.
///
/// The cursor is a character index, so editing never splits a UTF-8
/// sequence.
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    content: String,
    cursor: usize,
}

impl TextInputState {
    /// Create an input holding `content` with the cursor at the end.
    pub fn new(content: impl Into<String>) -> Self {
        let mut state = Self::default();
        state.set_content(content);
        state
    }

    /// Get the current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor position as a character index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor position as (line, column).
    pub fn cursor_position(&self) -> (usize, usize) {
        line_col(&self.content, self.cursor)
    }

    /// Check if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Replace the content and move the cursor to the end.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = self.char_count();
    }

    /// Clear the content.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, ch);
        self.cursor += 1;
    }

    /// Insert a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        let at = self.byte_index(self.cursor);
        self.content.insert_str(at, s);
        self.cursor += s.chars().count();
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete the character at the cursor (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Move cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Move cursor to the start of the current line.
    pub fn move_home(&mut self) {
        let (_, col) = self.cursor_position();
        self.cursor -= col;
    }

    /// Move cursor to the end of the current line.
    pub fn move_end(&mut self) {
        let (line, _) = self.cursor_position();
        let len = self.line_len(line);
        self.cursor = self.line_start(line) + len;
    }

    /// Move cursor to the previous line, keeping the column where possible.
    pub fn move_up(&mut self) {
        let (line, col) = self.cursor_position();
        if line > 0 {
            self.cursor = self.line_start(line - 1) + col.min(self.line_len(line - 1));
        }
    }

    /// Move cursor to the next line, keeping the column where possible.
    pub fn move_down(&mut self) {
        let (line, col) = self.cursor_position();
        if line + 1 < self.line_count() {
            self.cursor = self.line_start(line + 1) + col.min(self.line_len(line + 1));
        }
    }

    /// Create a widget from this state.
    pub fn widget(&self) -> TextInput<'_> {
        TextInput::new(&self.content, self.cursor)
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }

    fn line_len(&self, line: usize) -> usize {
        self.content
            .split('\n')
            .nth(line)
            .map_or(0, |l| l.chars().count())
    }

    /// Character index of the first character of `line`.
    fn line_start(&self, line: usize) -> usize {
        self.content
            .split('\n')
            .take(line)
            .map(|l| l.chars().count() + 1)
            .sum()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map_or(self.content.len(), |(i, _)| i)
    }
}
