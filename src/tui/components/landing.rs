//! # Landing Page Component
//!
//! Title, subtitle and the free-text plan field shown before any results
//! exist.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::components::text_field::TextField;

pub const PLAN_PLACEHOLDER: &str = "e.g. 5 days in Rome and Florence in May, mid-range hotels, \
     lots of art and food, flying from London";

const MAX_INPUT_ROWS: u16 = 8;
const MAX_WIDTH: u16 = 72;

/// Plan text field configured for the landing page.
pub fn plan_field() -> TextField {
    TextField::new(" Describe your trip ")
        .with_placeholder(PLAN_PLACEHOLDER)
        .keep_on_submit()
}

pub struct LandingPage<'a> {
    input: &'a mut TextField,
}

impl<'a> LandingPage<'a> {
    pub fn new(input: &'a mut TextField) -> Self {
        Self { input }
    }
}

impl Component for LandingPage<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = area.width.min(MAX_WIDTH);
        let input_height = self.input.height(width, MAX_INPUT_ROWS).max(5);

        let [_, column, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Fill(1),
        ])
        .areas(area);

        let [title_area, subtitle_area, _, input_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(input_height),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(column);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "AI Travel Agent",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center),
            title_area,
        );
        frame.render_widget(
            Paragraph::new("Plan your perfect trip with AI assistance")
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center),
            subtitle_area,
        );

        self.input.render(frame, input_area);

        frame.render_widget(
            Paragraph::new("Enter plan trip · Ctrl+J new line · Ctrl+T chat · Ctrl+C quit")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            hint_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::component::EventHandler;
    use crate::tui::components::text_field::TextFieldEvent;
    use crate::tui::event::TuiEvent;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_landing_renders_title_and_placeholder() {
        let mut input = plan_field();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|f| LandingPage::new(&mut input).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("AI Travel Agent"));
        assert!(text.contains("Plan your perfect trip with AI assistance"));
        assert!(text.contains("e.g. 5 days in Rome"));
    }

    #[test]
    fn test_plan_text_kept_after_submit() {
        let mut input = plan_field();
        input.set_text("3 days in Rome");
        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(TextFieldEvent::Submit("3 days in Rome".into()))
        );
        assert_eq!(input.buffer, "3 days in Rome");
    }
}
