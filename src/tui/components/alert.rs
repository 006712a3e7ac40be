//! # Alert Dialog
//!
//! Blocking message box. While it is up the event loop swallows every key
//! except the ones that dismiss it.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap};

use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

const WIDTH: u16 = 50;
const HEIGHT: u16 = 7;

/// Whether `event` dismisses an open alert.
pub fn dismisses(event: &TuiEvent) -> bool {
    matches!(event, TuiEvent::Submit | TuiEvent::Escape)
}

pub struct Alert<'a> {
    pub message: &'a str,
}

impl<'a> Alert<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }
}

impl Component for Alert<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [row] = Layout::vertical([Constraint::Length(HEIGHT)])
            .flex(Flex::Center)
            .areas(area);
        let [dialog] = Layout::horizontal([Constraint::Length(WIDTH.min(area.width))])
            .flex(Flex::Center)
            .areas(row);

        frame.render_widget(Clear, dialog);
        let block = Block::bordered()
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Red))
            .title(" Error ")
            .title_bottom(Line::from(" Enter OK ").centered())
            .padding(Padding::uniform(1));
        frame.render_widget(
            Paragraph::new(self.message)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block),
            dialog,
        );
    }
}
