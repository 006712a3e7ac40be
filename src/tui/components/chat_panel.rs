//! # Chat Panel
//!
//! Side panel with the assistant conversation and a message input.
//!
//! Message heights are predicted with `textwrap` and the text is rendered
//! pre-wrapped, so the `ScrollView` canvas size always matches what is
//! drawn. The view sticks to the newest message until the user scrolls up.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::state::{ChatLog, ChatMessage, Sender};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text_field::{TextField, TextFieldEvent};
use crate::tui::event::TuiEvent;

/// Input rows shown before the field starts scrolling.
const MAX_INPUT_ROWS: u16 = 4;
/// Column reserved for the vertical scrollbar.
const SCROLLBAR_WIDTH: u16 = 1;

#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    Send(String),
    Close,
}

pub struct ChatPanelState {
    pub input: TextField,
    scroll_state: ScrollViewState,
    stick_to_bottom: bool,
    content_height: u16,
    viewport_height: u16,
}

impl Default for ChatPanelState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatPanelState {
    pub fn new() -> Self {
        Self {
            input: TextField::new(" Message ").with_placeholder("Ask to refine your trip..."),
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true,
            content_height: 0,
            viewport_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }
}

impl EventHandler for ChatPanelState {
    type Event = ChatEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Escape => Some(ChatEvent::Close),
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                if self.scroll_state.offset().y >= self.max_offset() {
                    self.stick_to_bottom = true;
                }
                None
            }
            _ => match self.input.handle_event(event)? {
                TextFieldEvent::Submit(text) => {
                    self.stick_to_bottom = true;
                    Some(ChatEvent::Send(text))
                }
                TextFieldEvent::Changed => None,
            },
        }
    }
}

/// Wrap a message body the same way it is rendered.
fn wrap_body(text: &str, width: u16) -> Vec<String> {
    let options = textwrap::Options::new(usize::from(width.max(1)))
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    let lines: Vec<String> = textwrap::wrap(text.trim(), options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect();
    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}

fn message_lines(message: &ChatMessage, width: u16) -> Vec<Line<'static>> {
    let (who, header_style) = match message.sender {
        Sender::User => ("You", Style::default().fg(Color::Cyan)),
        Sender::Bot => ("Assistant", Style::default().fg(Color::Green)),
    };
    let body_style = if message.is_error {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(who, header_style.add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  {}", message.sent_at.format("%H:%M")),
            Style::default().fg(Color::DarkGray),
        ),
    ])];
    lines.extend(
        wrap_body(&message.text, width)
            .into_iter()
            .map(|line| Line::styled(line, body_style)),
    );
    lines.push(Line::raw(""));
    lines
}

fn block_height(lines: &[Line]) -> u16 {
    u16::try_from(lines.len()).unwrap_or(u16::MAX)
}

/// Total rendered height of the log, saturating at what a `u16` canvas holds.
fn content_height(rendered: &[Vec<Line>]) -> u16 {
    rendered
        .iter()
        .fold(0u16, |total, lines| total.saturating_add(block_height(lines)))
}

/// Transient render wrapper for the chat panel.
pub struct ChatPanel<'a> {
    pub log: &'a ChatLog,
    pub state: &'a mut ChatPanelState,
}

impl<'a> ChatPanel<'a> {
    pub fn new(log: &'a ChatLog, state: &'a mut ChatPanelState) -> Self {
        Self { log, state }
    }
}

impl Component for ChatPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Green))
            .title(" Travel Assistant ")
            .title_bottom(Line::from(" Esc close ").right_aligned());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let input_height = self.state.input.height(inner.width, MAX_INPUT_ROWS);
        let [log_area, input_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(input_height)]).areas(inner);

        let content_width = log_area.width.saturating_sub(SCROLLBAR_WIDTH);
        let rendered: Vec<Vec<Line>> = self
            .log
            .messages
            .iter()
            .map(|m| message_lines(m, content_width))
            .collect();
        let total = content_height(&rendered);
        self.state.content_height = total;
        self.state.viewport_height = log_area.height;

        let mut scroll_view = ScrollView::new(Size::new(content_width, total))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        let mut y: u16 = 0;
        for lines in rendered {
            let height = block_height(&lines).min(total - y);
            if height == 0 {
                break;
            }
            scroll_view.render_widget(
                Paragraph::new(lines),
                Rect::new(0, y, content_width, height),
            );
            y += height;
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.set_offset(Position {
                x: 0,
                y: self.state.max_offset(),
            });
        }
        frame.render_stateful_widget(scroll_view, log_area, &mut self.state.scroll_state);

        self.state.input.render(frame, input_area);
    }
}
