use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::{App, Phase};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    Alert, ChatPanel, ItemModal, LandingPage, LoadingView, RecommendationsView, TitleBar,
};

/// Widest the chat column gets.
const CHAT_WIDTH: u16 = 46;

/// Split the frame into the main area and, when visible, the chat column.
pub fn split_chat(frame_area: Rect, chat_visible: bool) -> (Rect, Option<Rect>) {
    if !chat_visible {
        return (frame_area, None);
    }
    let width = CHAT_WIDTH.min(frame_area.width / 2);
    let [main, chat] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(width)]).areas(frame_area);
    (main, Some(chat))
}

/// The chat panel is hidden while a plan is loading.
pub fn chat_visible(app: &App) -> bool {
    app.chat_open && !app.is_loading()
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let show_chat = chat_visible(app);
    let (main_area, chat_area) = split_chat(frame.area(), show_chat);

    tui.plan_input.focused = !show_chat && app.alert.is_none();
    tui.chat.input.focused = show_chat && app.alert.is_none();

    match &app.phase {
        Phase::Landing => LandingPage::new(&mut tui.plan_input).render(frame, main_area),
        Phase::Loading => LoadingView::new(spinner_frame).render(frame, main_area),
        Phase::Results(recs) => {
            let [title_area, content_area] =
                Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(main_area);
            TitleBar::new(app.status_message.clone()).render(frame, title_area);
            RecommendationsView::new(
                recs,
                &mut tui.recommendations,
                app.active_tab,
                app.current_day,
                app.booking.notice.as_deref(),
            )
            .render(frame, content_area);
        }
    }

    if let Some(area) = chat_area {
        ChatPanel::new(&app.chat, &mut tui.chat).render(frame, area);
    }

    if let Some(selected) = app.selected
        && let Some(item) = app.recommendations().and_then(|r| r.find(selected))
    {
        ItemModal::new(item, app.booking.in_flight).render(frame, frame.area());
    }

    if let Some(message) = &app.alert {
        Alert::new(message).render(frame, frame.area());
    }
}
