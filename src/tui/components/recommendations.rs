//! # Recommendations View
//!
//! Tabbed hotel / flight / attraction lists with a day pager on top and the
//! booking confirmation toast at the bottom.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `RecommendationsState` (card highlight per tab) lives in `TuiState`
//! - `RecommendationsView` is created each frame with borrowed state
//!
//! The active tab, the open item, and the notice belong to the core `App`;
//! this component only reports what the user asked for.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, List, ListItem, ListState, Paragraph, Tabs};

use crate::api::{Category, ItemRef, Recommendations};
use crate::tui::component::Component;
use crate::tui::components::item_card;
use crate::tui::event::TuiEvent;

/// Columns taken by the highlight symbol in front of each card.
const HIGHLIGHT_WIDTH: u16 = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationsEvent {
    SelectTab(Category),
    PrevDay,
    NextDay,
    Open(ItemRef),
    NewPlan,
    Quit,
}

/// Persistent presentation state for the recommendations view.
#[derive(Default)]
pub struct RecommendationsState {
    /// Highlighted card index, one per tab.
    highlight: [usize; 3],
    list_state: ListState,
}

impl RecommendationsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highlighted(&self, tab: Category) -> usize {
        self.highlight[tab.index()]
    }

    /// Pull every highlight back inside its list after recommendations change.
    pub fn clamp(&mut self, recs: &Recommendations) {
        for category in Category::ALL {
            let len = recs.count(category);
            let slot = &mut self.highlight[category.index()];
            *slot = (*slot).min(len.saturating_sub(1));
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn handle_event(
        &mut self,
        event: &TuiEvent,
        recs: &Recommendations,
        active_tab: Category,
    ) -> Option<RecommendationsEvent> {
        match event {
            TuiEvent::NextTab => Some(RecommendationsEvent::SelectTab(active_tab.next())),
            TuiEvent::PrevTab => Some(RecommendationsEvent::SelectTab(active_tab.prev())),
            TuiEvent::InputChar(c @ '1'..='3') => {
                let index = (*c as usize) - ('1' as usize);
                Some(RecommendationsEvent::SelectTab(Category::ALL[index]))
            }
            TuiEvent::CursorLeft => Some(RecommendationsEvent::PrevDay),
            TuiEvent::CursorRight => Some(RecommendationsEvent::NextDay),
            TuiEvent::CursorUp => {
                let slot = &mut self.highlight[active_tab.index()];
                *slot = slot.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                let len = recs.count(active_tab);
                let slot = &mut self.highlight[active_tab.index()];
                if *slot + 1 < len {
                    *slot += 1;
                }
                None
            }
            TuiEvent::Submit => recs
                .id_at(active_tab, self.highlighted(active_tab))
                .map(|id| {
                    RecommendationsEvent::Open(ItemRef {
                        category: active_tab,
                        id,
                    })
                }),
            TuiEvent::InputChar('n') => Some(RecommendationsEvent::NewPlan),
            TuiEvent::InputChar('q') => Some(RecommendationsEvent::Quit),
            _ => None,
        }
    }
}

/// Transient render wrapper for the recommendations view.
pub struct RecommendationsView<'a> {
    pub recs: &'a Recommendations,
    pub state: &'a mut RecommendationsState,
    pub active_tab: Category,
    pub current_day: u32,
    pub notice: Option<&'a str>,
}

impl<'a> RecommendationsView<'a> {
    pub fn new(
        recs: &'a Recommendations,
        state: &'a mut RecommendationsState,
        active_tab: Category,
        current_day: u32,
        notice: Option<&'a str>,
    ) -> Self {
        Self {
            recs,
            state,
            active_tab,
            current_day,
            notice,
        }
    }

    fn day_pager(&self) -> Line<'static> {
        let days = self.recs.day_count();
        let enabled = Style::default().fg(Color::Cyan);
        let disabled = Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM);
        let prev = if self.current_day > 1 { enabled } else { disabled };
        let next = if self.current_day < days { enabled } else { disabled };
        Line::from(vec![
            Span::styled("◀ Prev", prev),
            Span::raw("   "),
            Span::styled(
                format!("Day {} of {}", self.current_day, days),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled("Next ▶", next),
        ])
    }

    fn tabs(&self) -> Tabs<'static> {
        let titles = Category::ALL
            .iter()
            .map(|c| format!("{} ({})", c.label(), self.recs.count(*c)));
        Tabs::new(titles)
            .select(self.active_tab.index())
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .divider("│")
    }

    fn render_cards(&mut self, frame: &mut Frame, area: Rect) {
        let items = self.recs.items(self.active_tab);
        if items.is_empty() {
            let empty = Paragraph::new(format!(
                "No {} found.",
                self.active_tab.label().to_lowercase()
            ))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
            frame.render_widget(empty, area);
            return;
        }

        let card_width = area.width.saturating_sub(HIGHLIGHT_WIDTH);
        let cards: Vec<ListItem> = items
            .into_iter()
            .map(|item| {
                let mut lines = item_card::card_lines(item, card_width);
                lines.push(Line::raw(""));
                ListItem::new(Text::from(lines))
            })
            .collect();

        let list = List::new(cards)
            .highlight_symbol("▌ ")
            .highlight_style(Style::default().bg(Color::Rgb(30, 40, 55)));

        self.state
            .list_state
            .select(Some(self.state.highlighted(self.active_tab)));
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

impl Component for RecommendationsView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};

        let pager_height = if self.recs.day_count() > 1 { 1 } else { 0 };
        let notice_height = if self.notice.is_some() { 3 } else { 0 };
        let [pager_area, tabs_area, _, cards_area, notice_area] = Layout::vertical([
            Length(pager_height),
            Length(1),
            Length(1),
            Min(0),
            Length(notice_height),
        ])
        .areas(area);

        if pager_height > 0 {
            frame.render_widget(
                Paragraph::new(self.day_pager()).alignment(Alignment::Center),
                pager_area,
            );
        }
        frame.render_widget(self.tabs(), tabs_area);
        self.render_cards(frame, cards_area);

        if let Some(notice) = self.notice {
            let toast = Paragraph::new(format!("✓ {notice}"))
                .style(Style::default().fg(Color::Green))
                .block(
                    Block::bordered()
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(Color::Green)),
                );
            frame.render_widget(toast, notice_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_recommendations;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(recs: &Recommendations, day: u32, notice: Option<&str>) -> String {
        let mut state = RecommendationsState::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|f| {
                RecommendationsView::new(recs, &mut state, Category::Hotel, day, notice)
                    .render(f, f.area())
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
    fn test_tab_labels_show_counts() {
        let text = render(&sample_recommendations(1), 1, None);
        assert!(text.contains("Hotels (2)"));
        assert!(text.contains("Flights (1)"));
        assert!(text.contains("Attractions (2)"));
    }

    #[test]
    fn test_pager_shown_for_multi_day_trips() {
        let text = render(&sample_recommendations(3), 1, None);
        assert!(text.contains("Day 1 of 3"));
    }

    #[test]
    fn test_pager_hidden_for_single_day() {
        let text = render(&sample_recommendations(1), 1, None);
        assert!(!text.contains("Day 1 of 1"));
    }

    #[test]
    fn test_notice_rendered() {
        let text = render(&sample_recommendations(1), 1, Some("Booked!"));
        assert!(text.contains("Booked!"));
    }

    #[test]
    fn test_cards_rendered_for_active_tab() {
        let text = render(&sample_recommendations(1), 1, None);
        assert!(text.contains("Hotel Artemide"));
        assert!(text.contains("$180/night"));
        assert!(!text.contains("Colosseum"));
    }

    #[test]
    fn test_tab_keys() {
        let recs = sample_recommendations(1);
        let mut state = RecommendationsState::new();
        assert_eq!(
            state.handle_event(&TuiEvent::NextTab, &recs, Category::Hotel),
            Some(RecommendationsEvent::SelectTab(Category::Flight))
        );
        assert_eq!(
            state.handle_event(&TuiEvent::PrevTab, &recs, Category::Hotel),
            Some(RecommendationsEvent::SelectTab(Category::Attraction))
        );
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('3'), &recs, Category::Hotel),
            Some(RecommendationsEvent::SelectTab(Category::Attraction))
        );
    }

    #[test]
    fn test_enter_opens_highlighted_card() {
        let recs = sample_recommendations(1);
        let mut state = RecommendationsState::new();
        state.handle_event(&TuiEvent::CursorDown, &recs, Category::Hotel);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit, &recs, Category::Hotel),
            Some(RecommendationsEvent::Open(ItemRef {
                category: Category::Hotel,
                id: 5,
            }))
        );
    }

    #[test]
    fn test_highlight_stays_in_bounds() {
        let recs = sample_recommendations(1);
        let mut state = RecommendationsState::new();
        for _ in 0..5 {
            state.handle_event(&TuiEvent::CursorDown, &recs, Category::Flight);
        }
        assert_eq!(state.highlighted(Category::Flight), 0);
        state.handle_event(&TuiEvent::CursorUp, &recs, Category::Hotel);
        assert_eq!(state.highlighted(Category::Hotel), 0);
    }

    #[test]
    fn test_clamp_after_shrink() {
        let recs = sample_recommendations(1);
        let mut state = RecommendationsState::new();
        state.handle_event(&TuiEvent::CursorDown, &recs, Category::Hotel);
        let mut smaller = recs.clone();
        smaller.hotels.truncate(1);
        state.clamp(&smaller);
        assert_eq!(state.highlighted(Category::Hotel), 0);
    }

    #[test]
    fn test_enter_on_empty_tab_does_nothing() {
        let mut recs = sample_recommendations(1);
        recs.flights.clear();
        let mut state = RecommendationsState::new();
        assert_eq!(
            state.handle_event(&TuiEvent::Submit, &recs, Category::Flight),
            None
        );
    }
}
