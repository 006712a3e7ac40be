//! # TitleBar Component
//!
//! One-line header above the results: title, status message, and the key
//! hints for leaving the current plan.
//!
//! Purely presentational. All data arrives as props:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(app.status_message.clone());
//! title_bar.render(frame, title_area);
//! ```

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const HINTS: &str = "[n] New Plan  [Ctrl+T] Chat  [q] Quit";

pub struct TitleBar {
    /// Status message, e.g. a failed day refresh. Hidden when empty.
    pub status_message: String,
}

impl TitleBar {
    pub fn new(status_message: String) -> Self {
        Self { status_message }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(HINTS.len() as u16)])
                .areas(area);

        let mut spans = vec![Span::styled(
            "Your Travel Plan",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                self.status_message.as_str(),
                Style::default().fg(Color::Yellow),
            ));
        }
        frame.render_widget(Line::from(spans), left);
        frame.render_widget(
            Paragraph::new(HINTS)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Right),
            right,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(title_bar: &mut TitleBar) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 1)).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let text = render(&mut TitleBar::new("Couldn't refresh day 2".to_string()));
        assert!(text.contains("Your Travel Plan"));
        assert!(text.contains("Couldn't refresh day 2"));
        assert!(text.contains("[n] New Plan"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let text = render(&mut TitleBar::new(String::new()));
        assert!(text.contains("Your Travel Plan"));
        assert!(!text.contains('|'));
    }
}
