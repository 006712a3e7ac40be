//! # TextField Component
//!
//! Multi-line text input used by the landing page (plan text) and the chat
//! panel (message text).
//!
//! Text is hard-wrapped at the column limit, character by character, so the
//! cursor's screen position can be computed exactly from the buffer.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Border width on each side of the block.
const BORDER: u16 = 1;

#[derive(Debug, Clone, PartialEq)]
pub enum TextFieldEvent {
    Submit(String),
    Changed,
}

pub struct TextField {
    pub buffer: String,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
    title: String,
    placeholder: Option<String>,
    /// Chat clears after sending; the landing page keeps its text so a
    /// failed submission can be retried.
    clear_on_submit: bool,
    /// First visible row, kept so the cursor row stays in view.
    scroll: u16,
    /// Inner width seen at the last render, for vertical cursor movement.
    last_width: u16,
    pub focused: bool,
}

impl TextField {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            title: title.into(),
            placeholder: None,
            clear_on_submit: true,
            scroll: 0,
            last_width: 80,
            focused: true,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn keep_on_submit(mut self) -> Self {
        self.clear_on_submit = false;
        self
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.scroll = 0;
    }

    /// Number of visual rows the buffer occupies at the given inner width.
    pub fn row_count(&self, inner_width: u16) -> u16 {
        visual_rows(&self.buffer, inner_width).len() as u16
    }

    /// Height for the given outer width: content rows plus borders, capped at `max_rows`.
    pub fn height(&self, width: u16, max_rows: u16) -> u16 {
        let inner = width.saturating_sub(BORDER * 2);
        self.row_count(inner).clamp(1, max_rows.max(1)) + BORDER * 2
    }

    fn move_vertically(&mut self, down: bool) -> bool {
        let rows = visual_rows(&self.buffer, self.last_width);
        let (row, col) = cursor_row_col(&self.buffer, self.cursor, self.last_width);
        let target = if down {
            if row + 1 >= rows.len() {
                return false;
            }
            row + 1
        } else {
            if row == 0 {
                return false;
            }
            row - 1
        };
        let (start, end) = rows[target];
        let mut pos = start;
        let mut width = 0;
        for (i, c) in self.buffer[start..end].char_indices() {
            let w = c.width().unwrap_or(0);
            if width + w > col {
                break;
            }
            width += w;
            pos = start + i + c.len_utf8();
        }
        self.cursor = pos;
        true
    }
}

impl Component for TextField {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(BORDER * 2);
        let inner_height = area.height.saturating_sub(BORDER * 2);
        self.last_width = inner_width;

        let (row, col) = cursor_row_col(&self.buffer, self.cursor, inner_width);
        let row = row as u16;
        if row < self.scroll {
            self.scroll = row;
        } else if inner_height > 0 && row >= self.scroll + inner_height {
            self.scroll = row + 1 - inner_height;
        }

        let border_color = if self.focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title(self.title.as_str());

        let paragraph = if self.buffer.is_empty()
            && let Some(placeholder) = &self.placeholder
        {
            Paragraph::new(placeholder.as_str())
                .style(Style::default().fg(Color::DarkGray))
                .wrap(ratatui::widgets::Wrap { trim: false })
        } else {
            let lines: Vec<Line> = visual_rows(&self.buffer, inner_width)
                .into_iter()
                .map(|(start, end)| Line::raw(&self.buffer[start..end]))
                .collect();
            Paragraph::new(lines).scroll((self.scroll, 0))
        };

        frame.render_widget(paragraph.block(block), area);

        if self.focused && inner_width > 0 && inner_height > 0 {
            let x = area.x + BORDER + (col as u16).min(inner_width - 1);
            let y = area.y + BORDER + row.saturating_sub(self.scroll);
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for TextField {
    type Event = TextFieldEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(TextFieldEvent::Changed)
            }
            TuiEvent::Paste(text) => {
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.buffer.insert_str(self.cursor, &text);
                self.cursor += text.len();
                Some(TextFieldEvent::Changed)
            }
            TuiEvent::Backspace => {
                (self.cursor > 0).then(|| {
                    let prev = prev_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                    TextFieldEvent::Changed
                })
            }
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                TextFieldEvent::Changed
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                TextFieldEvent::Changed
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                TextFieldEvent::Changed
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map_or(0, |i| i + 1);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    TextFieldEvent::Changed
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map_or(self.buffer.len(), |i| self.cursor + i);
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    TextFieldEvent::Changed
                })
            }
            TuiEvent::CursorUp => self
                .move_vertically(false)
                .then_some(TextFieldEvent::Changed),
            TuiEvent::CursorDown => self
                .move_vertically(true)
                .then_some(TextFieldEvent::Changed),
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    return None;
                }
                let text = if self.clear_on_submit {
                    let text = std::mem::take(&mut self.buffer);
                    self.cursor = 0;
                    self.scroll = 0;
                    text
                } else {
                    self.buffer.clone()
                };
                Some(TextFieldEvent::Submit(text))
            }
            _ => None,
        }
    }
}

/// Split `text` into visual rows as byte ranges, breaking at newlines and
/// whenever the next character would overflow `width` columns.
/// Always returns at least one row. When the text ends on a full row, an
/// empty row follows so the cursor has a cell to sit in.
fn visual_rows(text: &str, width: u16) -> Vec<(usize, usize)> {
    let width = usize::from(width.max(1));
    let mut rows = Vec::new();
    let mut start = 0;
    let mut col = 0;
    for (i, c) in text.char_indices() {
        if c == '\n' {
            rows.push((start, i));
            start = i + 1;
            col = 0;
            continue;
        }
        let w = c.width().unwrap_or(0);
        if col + w > width && col > 0 {
            rows.push((start, i));
            start = i;
            col = 0;
        }
        col += w;
    }
    rows.push((start, text.len()));
    if col >= width {
        rows.push((text.len(), text.len()));
    }
    rows
}

/// Visual (row, column) of the byte offset `pos`.
fn cursor_row_col(text: &str, pos: usize, width: u16) -> (usize, usize) {
    let rows = visual_rows(text, width);
    // Wrapped rows share a boundary offset; the later row owns it.
    let row = rows
        .iter()
        .rposition(|&(start, _)| start <= pos)
        .unwrap_or(0);
    let (start, _) = rows[row];
    let col = text[start..pos]
        .chars()
        .map(|c| c.width().unwrap_or(0))
        .sum();
    (row, col)
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map_or(0, |(i, _)| i)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len(), |c| pos + c.len_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_str(field: &mut TextField, s: &str) {
        for c in s.chars() {
            field.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut field = TextField::new("Plan");
        type_str(&mut field, "ab");
        assert_eq!(field.buffer, "ab");
        assert_eq!(
            field.handle_event(&TuiEvent::Backspace),
            Some(TextFieldEvent::Changed)
        );
        assert_eq!(field.buffer, "a");
        field.handle_event(&TuiEvent::Backspace);
        assert_eq!(field.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut field = TextField::new("Plan");
        type_str(&mut field, "café");
        field.handle_event(&TuiEvent::CursorLeft);
        field.handle_event(&TuiEvent::Delete);
        assert_eq!(field.buffer, "caf");
        field.handle_event(&TuiEvent::Backspace);
        assert_eq!(field.buffer, "ca");
    }

    #[test]
    fn test_submit_blank_is_ignored() {
        let mut field = TextField::new("Plan");
        type_str(&mut field, "   ");
        assert_eq!(field.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn test_submit_clears_by_default() {
        let mut field = TextField::new("Message");
        type_str(&mut field, "add a museum");
        assert_eq!(
            field.handle_event(&TuiEvent::Submit),
            Some(TextFieldEvent::Submit("add a museum".into()))
        );
        assert!(field.buffer.is_empty());
        assert_eq!(field.cursor, 0);
    }

    #[test]
    fn test_keep_on_submit_retains_text() {
        let mut field = TextField::new("Plan").keep_on_submit();
        type_str(&mut field, "7 days in Japan");
        field.handle_event(&TuiEvent::Submit);
        assert_eq!(field.buffer, "7 days in Japan");
    }

    #[test]
    fn test_home_end_work_per_line() {
        let mut field = TextField::new("Plan");
        type_str(&mut field, "one\ntwo");
        field.handle_event(&TuiEvent::CursorHome);
        assert_eq!(field.cursor, 4);
        field.handle_event(&TuiEvent::CursorEnd);
        assert_eq!(field.cursor, 7);
    }

    #[test]
    fn test_paste_normalizes_newlines() {
        let mut field = TextField::new("Plan");
        field.handle_event(&TuiEvent::Paste("a\r\nb".into()));
        assert_eq!(field.buffer, "a\nb");
        assert_eq!(field.cursor, 3);
    }

    #[test]
    fn test_visual_rows_wrap_and_newlines() {
        assert_eq!(visual_rows("", 5), vec![(0, 0)]);
        assert_eq!(visual_rows("abcdefg", 3), vec![(0, 3), (3, 6), (6, 7)]);
        assert_eq!(visual_rows("ab\ncd", 10), vec![(0, 2), (3, 5)]);
        assert_eq!(visual_rows("ab\n", 10), vec![(0, 2), (3, 3)]);
    }

    #[test]
    fn test_full_last_row_moves_cursor_to_next_row() {
        assert_eq!(visual_rows("abcdef", 3), vec![(0, 3), (3, 6), (6, 6)]);
        assert_eq!(cursor_row_col("abcdef", 6, 3), (2, 0));
        assert_eq!(cursor_row_col("abcdef", 5, 3), (1, 2));

        let mut terminal = Terminal::new(TestBackend::new(5, 5)).unwrap();
        let mut field = TextField::new("");
        type_str(&mut field, "abc");
        terminal.draw(|f| field.render(f, f.area())).unwrap();
        assert_eq!(
            terminal.get_cursor_position().unwrap(),
            ratatui::layout::Position::new(1, 2)
        );
        assert_eq!(field.row_count(3), 2);
    }

    #[test]
    fn test_cursor_row_col() {
        assert_eq!(cursor_row_col("abcdefg", 7, 3), (2, 1));
        assert_eq!(cursor_row_col("abcdefg", 3, 3), (1, 0));
        assert_eq!(cursor_row_col("ab\ncd", 3, 10), (1, 0));
        assert_eq!(cursor_row_col("ab\ncd", 2, 10), (0, 2));
    }

    #[test]
    fn test_vertical_movement_keeps_column() {
        let mut field = TextField::new("Plan");
        type_str(&mut field, "hello\nhi");
        assert!(field.move_vertically(false));
        assert_eq!(field.cursor, 2);
        assert!(field.move_vertically(true));
        assert_eq!(field.cursor, 8);
        assert!(!field.move_vertically(true));
    }

    #[test]
    fn test_height_is_capped() {
        let mut field = TextField::new("Plan");
        field.set_text("a\nb\nc\nd\ne\nf\ng");
        assert_eq!(field.height(20, 4), 6);
        field.clear();
        assert_eq!(field.height(20, 4), 3);
    }

    #[test]
    fn test_render_shows_placeholder_when_empty() {
        let backend = TestBackend::new(40, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut field = TextField::new("Plan").with_placeholder("Tell us about your trip");

        terminal.draw(|f| field.render(f, f.area())).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Plan"));
        assert!(text.contains("Tell us about your trip"));
    }
}
