//! # Item Modal
//!
//! Detail overlay for the selected card. Drawn over the recommendations
//! view; `modal_area` is shared with the click-outside hit test so both
//! agree on where the content is.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap};

use crate::api::Item;
use crate::tui::component::Component;
use crate::tui::components::item_card;

/// Screen rect of the modal content within the full frame.
pub fn modal_area(frame_area: Rect) -> Rect {
    centered_rect(60, 60, frame_area)
}

/// True when a click at (`column`, `row`) lands outside the modal content.
pub fn is_outside(frame_area: Rect, column: u16, row: u16) -> bool {
    !modal_area(frame_area).contains(Position::new(column, row))
}

pub struct ItemModal<'a> {
    pub item: Item<'a>,
    pub booking_in_flight: bool,
}

impl<'a> ItemModal<'a> {
    pub fn new(item: Item<'a>, booking_in_flight: bool) -> Self {
        Self {
            item,
            booking_in_flight,
        }
    }

    fn help_line(&self) -> Line<'static> {
        let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        if self.booking_in_flight {
            return Line::from(Span::styled(
                " Booking... ",
                Style::default().fg(Color::Yellow),
            ));
        }
        Line::from(vec![
            Span::raw(" "),
            Span::styled("[b]", key),
            Span::raw(format!(" {}  ", item_card::book_label(self.item))),
            Span::styled("Esc", key),
            Span::raw(" Close "),
        ])
    }
}

impl Component for ItemModal<'_> {
    fn render(&mut self, frame: &mut Frame, _area: Rect) {
        let overlay = modal_area(frame.area());
        frame.render_widget(Clear, overlay);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", item_card::title(self.item)))
            .title_alignment(Alignment::Left)
            .title_bottom(self.help_line().centered())
            .padding(Padding::horizontal(1));

        let details = Paragraph::new(item_card::detail_lines(self.item))
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(details, overlay);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
