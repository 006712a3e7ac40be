//! # Actions
//!
//! Everything that can happen in Wayfarer becomes an `Action`.
//! User presses Enter on the landing page? That's `Action::SubmitPlan(text)`.
//! Backend responds? That's `Action::PlanLoaded { .. }`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an `Effect` describing any I/O the
//! adapter should perform. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use std::time::Duration;

use log::{debug, info, warn};

use crate::api::{BookingResponse, Category, ItemRef, Recommendations};
use crate::core::state::{App, ChatMessage, Phase};

pub const PLAN_FAILED_ALERT: &str = "Failed to process travel plan. Please try again.";
pub const BOOKING_FAILED_ALERT: &str = "Booking failed. Please try again.";
/// Chat reply for a message whose recommendations arrived after newer ones.
pub const SUPERSEDED_CHAT_NOTE: &str = "A newer request already updated your recommendations.";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Landing page submitted plan text.
    SubmitPlan(String),
    PlanLoaded {
        seq: u64,
        recommendations: Recommendations,
    },
    PlanFailed {
        seq: u64,
        error: String,
    },
    /// Discard results and go back to the landing page.
    NewPlan,

    PrevDay,
    NextDay,
    /// Jump to a day; clamped into `1..=days`.
    ChangeDay(u32),
    DayLoaded {
        seq: u64,
        recommendations: Recommendations,
    },
    DayFailed {
        seq: u64,
        day: u32,
        error: String,
    },

    SelectTab(Category),
    OpenItem(ItemRef),
    CloseItem,
    /// Book the item currently shown in the modal.
    Book,
    BookingConfirmed(BookingResponse),
    BookingFailed(String),
    BookingNoticeExpired {
        token: u64,
    },

    ToggleChat,
    CloseChat,
    SendChat(String),
    ChatReplied {
        seq: u64,
        recommendations: Recommendations,
    },
    ChatFailed {
        seq: u64,
        error: String,
    },

    DismissAlert,
    Quit,
}

/// I/O requested by `update()`. The TUI adapter executes these.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    SubmitPlan {
        seq: u64,
        plan: String,
        preferences: Option<String>,
    },
    SendChat {
        seq: u64,
        message: String,
        current_plan: Option<String>,
    },
    FetchDay {
        seq: u64,
        day: u32,
        locations: Option<String>,
    },
    Book(ItemRef),
    /// Send `BookingNoticeExpired { token }` after `after` elapses.
    ExpireNotice {
        token: u64,
        after: Duration,
    },
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SubmitPlan(plan) => submit_plan(app, plan),
        Action::PlanLoaded {
            seq,
            recommendations,
        } => {
            if !app.requests.accept(seq) {
                debug!("Dropping stale plan response (seq={})", seq);
                return Effect::None;
            }
            info!(
                "Plan loaded: {} hotels, {} flights, {} attractions over {} days",
                recommendations.hotels.len(),
                recommendations.flights.len(),
                recommendations.attractions.len(),
                recommendations.days
            );
            app.phase = Phase::Results(recommendations);
            app.current_day = 1;
            app.active_tab = Category::default();
            app.selected = None;
            app.booking.notice = None;
            app.status_message.clear();
            Effect::None
        }
        Action::PlanFailed { seq, error } => {
            if !app.requests.is_current(seq) {
                debug!("Dropping stale plan failure (seq={})", seq);
                return Effect::None;
            }
            warn!("Error processing travel plan: {}", error);
            app.phase = Phase::Landing;
            app.alert = Some(PLAN_FAILED_ALERT.to_string());
            app.status_message.clear();
            Effect::None
        }
        Action::NewPlan => {
            if app.recommendations().is_none() {
                return Effect::None;
            }
            info!("Starting a new plan");
            app.requests.supersede_in_flight();
            app.phase = Phase::Landing;
            app.current_day = 1;
            app.active_tab = Category::default();
            app.selected = None;
            app.booking.notice = None;
            app.status_message.clear();
            Effect::None
        }

        Action::PrevDay => change_day(app, app.current_day.saturating_sub(1)),
        Action::NextDay => change_day(app, app.current_day.saturating_add(1)),
        Action::ChangeDay(day) => change_day(app, day),
        Action::DayLoaded {
            seq,
            recommendations,
        } => {
            if app.recommendations().is_none() || !app.requests.accept(seq) {
                debug!("Dropping stale day response (seq={})", seq);
                return Effect::None;
            }
            let day = recommendations
                .current_day
                .clamp(1, recommendations.day_count());
            replace_recommendations(app, recommendations);
            app.current_day = day;
            Effect::None
        }
        Action::DayFailed { seq, day, error } => {
            warn!("Error fetching recommendations for day {}: {}", day, error);
            if app.requests.is_current(seq) {
                app.status_message = format!("Couldn't refresh day {day}: {error}");
            }
            Effect::None
        }

        Action::SelectTab(category) => {
            app.active_tab = category;
            Effect::None
        }
        Action::OpenItem(item) => {
            if app.recommendations().and_then(|r| r.find(item)).is_some() {
                app.selected = Some(item);
            }
            Effect::None
        }
        Action::CloseItem => {
            app.selected = None;
            Effect::None
        }
        Action::Book => {
            if app.booking.in_flight {
                debug!("Booking already in flight, ignoring");
                return Effect::None;
            }
            let Some(item) = app.selected else {
                return Effect::None;
            };
            if app.recommendations().and_then(|r| r.find(item)).is_none() {
                return Effect::None;
            }
            app.booking.in_flight = true;
            Effect::Book(item)
        }
        Action::BookingConfirmed(response) => {
            app.booking.in_flight = false;
            if !response.success {
                warn!("Backend reported unsuccessful booking: {}", response.message);
            }
            info!(
                "Booking confirmed: {} (id={:?})",
                response.message, response.booking_id
            );
            app.booking.notice = Some(response.message);
            app.booking.notice_token += 1;
            Effect::ExpireNotice {
                token: app.booking.notice_token,
                after: app.booking_notice,
            }
        }
        Action::BookingFailed(error) => {
            warn!("Booking failed: {}", error);
            app.booking.in_flight = false;
            app.alert = Some(BOOKING_FAILED_ALERT.to_string());
            Effect::None
        }
        Action::BookingNoticeExpired { token } => {
            if token == app.booking.notice_token && app.booking.notice.is_some() {
                app.booking.notice = None;
                app.selected = None;
            }
            Effect::None
        }

        Action::ToggleChat => {
            app.chat_open = !app.chat_open;
            Effect::None
        }
        Action::CloseChat => {
            app.chat_open = false;
            Effect::None
        }
        Action::SendChat(message) => {
            if message.trim().is_empty() || app.is_loading() {
                return Effect::None;
            }
            app.chat.push(ChatMessage::user(message.clone()));
            let seq = app.requests.issue();
            let current_plan = if app.current_plan.is_empty() {
                None
            } else {
                Some(app.current_plan.clone())
            };
            Effect::SendChat {
                seq,
                message,
                current_plan,
            }
        }
        Action::ChatReplied {
            seq,
            recommendations,
        } => {
            if app.is_loading() || !app.requests.accept(seq) {
                debug!("Dropping stale chat response (seq={})", seq);
                app.chat.push(ChatMessage::bot(SUPERSEDED_CHAT_NOTE));
                return Effect::None;
            }
            app.chat.push(ChatMessage::bot(acknowledgement(&recommendations)));
            replace_recommendations(app, recommendations);
            Effect::None
        }
        Action::ChatFailed { seq, error } => {
            warn!("Error chatting with agent (seq={}): {}", seq, error);
            app.chat.push(ChatMessage::bot_error(format!(
                "Sorry, I couldn't update your recommendations: {error}"
            )));
            Effect::None
        }

        Action::DismissAlert => {
            app.alert = None;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn submit_plan(app: &mut App, plan: String) -> Effect {
    if plan.trim().is_empty() || app.is_loading() {
        return Effect::None;
    }
    let seq = app.requests.issue_superseding();
    info!("Submitting travel plan (seq={}, len={})", seq, plan.len());
    app.current_plan = plan.clone();
    app.phase = Phase::Loading;
    app.selected = None;
    app.status_message = "Planning your trip...".to_string();
    Effect::SubmitPlan {
        seq,
        plan,
        preferences: app.preferences.clone(),
    }
}

fn change_day(app: &mut App, day: u32) -> Effect {
    let Some(recs) = app.recommendations() else {
        return Effect::None;
    };
    let day = day.clamp(1, recs.day_count());
    if day == app.current_day {
        return Effect::None;
    }
    let locations = recs.locations();
    app.current_day = day;
    if !app.fetch_day_recommendations {
        return Effect::None;
    }
    let seq = app.requests.issue();
    Effect::FetchDay {
        seq,
        day,
        locations,
    }
}

/// Swap in a new payload wholesale, keeping the modal only if its item survived.
fn replace_recommendations(app: &mut App, recommendations: Recommendations) {
    if let Some(item) = app.selected
        && recommendations.find(item).is_none()
    {
        debug!("Selected {} {} no longer present, closing modal", item.category, item.id);
        app.selected = None;
    }
    app.current_day = app.current_day.clamp(1, recommendations.day_count());
    app.phase = Phase::Results(recommendations);
}

fn acknowledgement(recs: &Recommendations) -> String {
    format!(
        "Got it! I've updated your recommendations ({} hotels, {} flights, {} attractions).",
        recs.hotels.len(),
        recs.flights.len(),
        recs.attractions.len()
    )
}
