use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub const LOADING_TEXT: &str = "Planning your trip...";

/// Spinner shown while a plan request is in flight.
pub struct LoadingView {
    pub frame_index: usize,
}

impl LoadingView {
    pub fn new(frame_index: usize) -> Self {
        Self { frame_index }
    }

    fn spinner(&self) -> &'static str {
        SPINNER[self.frame_index % SPINNER.len()]
    }
}

impl Component for LoadingView {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [row] = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .areas(area);
        let line = Line::from(vec![
            Span::styled(self.spinner(), Style::default().fg(Color::Cyan)),
            Span::raw(" "),
            Span::styled(LOADING_TEXT, Style::default().add_modifier(Modifier::BOLD)),
        ]);
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), row);
    }
}
