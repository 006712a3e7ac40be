//! # Application State
//!
//! Core business state for Wayfarer. Domain logic only, no TUI types.
//! Presentation state (cursor positions, scroll offsets) lives in `tui`.
//!
//! ```text
//! App
//! ├── phase: Phase                  // Landing | Loading | Results(recs)
//! ├── current_plan: String          // last submitted plan text
//! ├── current_day: u32              // 1..=days while in Results
//! ├── active_tab: Category          // hotel / flight / attraction
//! ├── selected: Option<ItemRef>     // item shown in the detail modal
//! ├── booking: BookingState         // in-flight flag + confirmation notice
//! ├── chat: ChatLog                 // chat panel messages
//! ├── chat_open: bool               // chat panel visibility
//! ├── requests: RequestSequence     // stale-response guard
//! ├── alert: Option<String>         // blocking alert text
//! └── status_message: String        // status line
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use chrono::{DateTime, Local};

use crate::api::{Category, ItemRef, Recommendations};
use crate::core::config::ResolvedConfig;

pub const CHAT_GREETING: &str =
    "Hi! I'm your AI travel assistant. How can I help refine your trip?";

/// Which top-level view is active. Recommendations only exist in `Results`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    #[default]
    Landing,
    Loading,
    Results(Recommendations),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub sent_at: DateTime<Local>,
    /// Bot messages reporting a failed request are styled differently.
    pub is_error: bool,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text.into(), false)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text.into(), false)
    }

    pub fn bot_error(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text.into(), true)
    }

    fn new(sender: Sender, text: String, is_error: bool) -> Self {
        Self {
            sender,
            text,
            sent_at: Local::now(),
            is_error,
        }
    }
}

/// Ordered chat history, seeded with a greeting.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatLog {
    pub messages: Vec<ChatMessage>,
}

impl Default for ChatLog {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage::bot(CHAT_GREETING)],
        }
    }
}

impl ChatLog {
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Monotonic numbering for requests that replace recommendations
/// (plan, chat, day fetch).
///
/// A response is applied only if its number is at least `displayed`.
/// Applying it raises `displayed`, so anything issued earlier and
/// resolving later is dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestSequence {
    last_issued: u64,
    displayed: u64,
}

impl RequestSequence {
    pub fn issue(&mut self) -> u64 {
        self.last_issued += 1;
        self.last_issued
    }

    /// Discard everything currently in flight.
    pub fn supersede_in_flight(&mut self) {
        self.displayed = self.last_issued + 1;
    }

    /// Issue a number that also supersedes everything before it.
    pub fn issue_superseding(&mut self) -> u64 {
        let seq = self.issue();
        self.displayed = seq;
        seq
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq >= self.displayed
    }

    /// Accept `seq` if current; returns false for stale responses.
    pub fn accept(&mut self, seq: u64) -> bool {
        if self.is_current(seq) {
            self.displayed = seq;
            true
        } else {
            false
        }
    }
}

/// Booking request flag plus the confirmation notice shown after success.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingState {
    pub in_flight: bool,
    pub notice: Option<String>,
    /// Bumped for every notice so an older expiry timer can't clear a newer one.
    pub notice_token: u64,
}

pub struct App {
    pub phase: Phase,
    pub current_plan: String,
    pub current_day: u32,
    pub active_tab: Category,
    pub selected: Option<ItemRef>,
    pub booking: BookingState,
    pub chat: ChatLog,
    pub chat_open: bool,
    pub requests: RequestSequence,
    pub alert: Option<String>,
    pub status_message: String,
    pub preferences: Option<String>,
    pub fetch_day_recommendations: bool,
    pub booking_notice: std::time::Duration,
}

impl App {
    pub fn new(config: &ResolvedConfig) -> Self {
        Self {
            phase: Phase::Landing,
            current_plan: String::new(),
            current_day: 1,
            active_tab: Category::default(),
            selected: None,
            booking: BookingState::default(),
            chat: ChatLog::default(),
            chat_open: config.chat_open,
            requests: RequestSequence::default(),
            alert: None,
            status_message: String::new(),
            preferences: config.preferences.clone(),
            fetch_day_recommendations: config.fetch_day_recommendations,
            booking_notice: config.booking_notice,
        }
    }

    pub fn recommendations(&self) -> Option<&Recommendations> {
        match &self.phase {
            Phase::Results(recs) => Some(recs),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    /// Day count of the current results (1 outside Results).
    pub fn days(&self) -> u32 {
        self.recommendations().map_or(1, Recommendations::day_count)
    }

    pub fn can_go_prev_day(&self) -> bool {
        self.current_day > 1
    }

    pub fn can_go_next_day(&self) -> bool {
        self.current_day < self.days()
    }
}
