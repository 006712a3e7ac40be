//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates terminal events into core `Action`s, and executes the
//! `Effect`s that `update()` returns.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Routing
//!
//! Input goes to exactly one place, checked in this order:
//!
//! 1. `Ctrl+C` quits from anywhere.
//! 2. An open alert swallows everything except Enter/Esc.
//! 3. `Ctrl+T` toggles the chat panel; mouse clicks outside the item modal close it.
//! 4. The chat panel, when visible, has keyboard focus.
//! 5. The item modal, when open.
//! 6. The view for the current phase (landing field or recommendations).
//!
//! ## Background Work
//!
//! Each effect runs as a tokio task which reports back by sending an
//! `Action` over a std mpsc channel. The loop drains the channel between
//! frames, so `App` is only ever touched from this thread.
//!
//! ## Redraw Strategy
//!
//! While loading, the loop redraws every ~80ms to animate the spinner.
//! Otherwise it only redraws after input or a background action.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::layout::Rect;

use crate::api::TravelApi;
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ChatEvent, ChatPanelState, RecommendationsEvent, RecommendationsState, TextField,
    TextFieldEvent, alert, item_modal, landing,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub plan_input: TextField,
    pub chat: ChatPanelState,
    pub recommendations: RecommendationsState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            plan_input: landing::plan_field(),
            chat: ChatPanelState::new(),
            recommendations: RecommendationsState::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock // continuous redraws reset the blink timer
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste, Hide);
    }
}

pub fn run(config: ResolvedConfig, api: Arc<dyn TravelApi>) -> std::io::Result<()> {
    let mut app = App::new(&config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Actions produced by background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true;

    'main: loop {
        let animating = app.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(200)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        let frame_area = terminal.get_frame().area();
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = route_event(&app, &mut tui, &event, frame_area) else {
                continue;
            };
            if dispatch(&mut app, &mut tui, action, &api, &tx) {
                break 'main;
            }
        }

        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            if dispatch(&mut app, &mut tui, action, &api, &tx) {
                break 'main;
            }
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

/// Map one terminal event to at most one action, following the routing
/// order in the module docs. Pure presentation changes (typing, highlight
/// movement, scrolling) are applied to `tui` and yield `None`.
fn route_event(
    app: &App,
    tui: &mut TuiState,
    event: &TuiEvent,
    frame_area: Rect,
) -> Option<Action> {
    if matches!(event, TuiEvent::Resize) {
        return None;
    }
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }
    if app.alert.is_some() {
        return alert::dismisses(event).then_some(Action::DismissAlert);
    }
    if matches!(event, TuiEvent::ToggleChat) {
        return Some(Action::ToggleChat);
    }
    if let TuiEvent::MouseClick(column, row) = *event {
        let closes_modal =
            app.selected.is_some() && item_modal::is_outside(frame_area, column, row);
        return closes_modal.then_some(Action::CloseItem);
    }

    if ui::chat_visible(app) {
        return match tui.chat.handle_event(event)? {
            ChatEvent::Send(text) => Some(Action::SendChat(text)),
            ChatEvent::Close => Some(Action::CloseChat),
        };
    }

    if app.selected.is_some() {
        return match event {
            TuiEvent::Escape => Some(Action::CloseItem),
            TuiEvent::InputChar('b') | TuiEvent::Submit => Some(Action::Book),
            _ => None,
        };
    }

    if let Some(recs) = app.recommendations() {
        let view_event = tui
            .recommendations
            .handle_event(event, recs, app.active_tab)?;
        return Some(match view_event {
            RecommendationsEvent::SelectTab(category) => Action::SelectTab(category),
            RecommendationsEvent::PrevDay => Action::PrevDay,
            RecommendationsEvent::NextDay => Action::NextDay,
            RecommendationsEvent::Open(item) => Action::OpenItem(item),
            RecommendationsEvent::NewPlan => Action::NewPlan,
            RecommendationsEvent::Quit => Action::Quit,
        });
    }

    if app.is_loading() {
        return None;
    }
    match tui.plan_input.handle_event(event)? {
        TextFieldEvent::Submit(plan) => Some(Action::SubmitPlan(plan)),
        TextFieldEvent::Changed => None,
    }
}

/// Run `update`, keep presentation state in step, and start any effect.
/// Returns true when the app should quit.
fn dispatch(
    app: &mut App,
    tui: &mut TuiState,
    action: Action,
    api: &Arc<dyn TravelApi>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    debug!("Event loop received: {:?}", action);
    let new_plan = matches!(action, Action::NewPlan | Action::PlanLoaded { .. });
    let back_to_landing = matches!(action, Action::NewPlan);
    let effect = update(app, action);

    if new_plan {
        tui.recommendations.reset();
    }
    if back_to_landing {
        tui.plan_input.clear();
    }
    if let Some(recs) = app.recommendations() {
        tui.recommendations.clamp(recs);
    }

    match effect {
        Effect::Quit => true,
        Effect::None => false,
        effect => {
            spawn_effect(effect, api.clone(), tx.clone());
            false
        }
    }
}

fn spawn_effect(effect: Effect, api: Arc<dyn TravelApi>, tx: mpsc::Sender<Action>) {
    tokio::spawn(async move {
        if let Some(action) = perform(effect, api.as_ref()).await
            && tx.send(action).is_err()
        {
            warn!("Failed to deliver background result: receiver dropped");
        }
    });
}

/// Execute one effect and produce the action that reports its outcome.
async fn perform(effect: Effect, api: &dyn TravelApi) -> Option<Action> {
    match effect {
        Effect::None | Effect::Quit => None,
        Effect::SubmitPlan {
            seq,
            plan,
            preferences,
        } => {
            info!("Processing travel plan (seq={})", seq);
            Some(
                match api
                    .process_travel_plan(&plan, preferences.as_deref())
                    .await
                {
                    Ok(recommendations) => Action::PlanLoaded {
                        seq,
                        recommendations,
                    },
                    Err(e) => Action::PlanFailed {
                        seq,
                        error: e.to_string(),
                    },
                },
            )
        }
        Effect::SendChat {
            seq,
            message,
            current_plan,
        } => {
            info!("Sending chat message (seq={})", seq);
            Some(
                match api
                    .chat_with_agent(&message, current_plan.as_deref())
                    .await
                {
                    Ok(recommendations) => Action::ChatReplied {
                        seq,
                        recommendations,
                    },
                    Err(e) => Action::ChatFailed {
                        seq,
                        error: e.to_string(),
                    },
                },
            )
        }
        Effect::FetchDay {
            seq,
            day,
            locations,
        } => {
            info!("Fetching recommendations for day {} (seq={})", day, seq);
            Some(
                match api
                    .get_recommendations_for_day(day, locations.as_deref())
                    .await
                {
                    Ok(recommendations) => Action::DayLoaded {
                        seq,
                        recommendations,
                    },
                    Err(e) => Action::DayFailed {
                        seq,
                        day,
                        error: e.to_string(),
                    },
                },
            )
        }
        Effect::Book(item) => {
            info!("Booking {} {}", item.category, item.id);
            Some(match api.book_item(item.category, item.id, None).await {
                Ok(response) => Action::BookingConfirmed(response),
                Err(e) => Action::BookingFailed(e.to_string()),
            })
        }
        Effect::ExpireNotice { token, after } => {
            tokio::time::sleep(after).await;
            Some(Action::BookingNoticeExpired { token })
        }
    }
}
