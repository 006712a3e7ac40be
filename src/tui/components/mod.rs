//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as props:
//! - `TitleBar`: header above the results
//! - `LoadingView`: spinner while a plan is being processed
//! - `ItemModal`: detail overlay for one recommendation
//! - `Alert`: blocking error dialog
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components whose persistent state lives in `TuiState` and that turn
//! `TuiEvent`s into their own events:
//! - `TextField`: multi-line input shared by the landing page and chat
//! - `RecommendationsView`: tabs, day pager, and card highlight
//! - `ChatPanel`: scrollable message log plus input
//!
//! Stateful components are split into a persistent `*State` and a transient
//! wrapper created each frame with borrowed state and props.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── alert.rs           (Blocking error dialog)
//! ├── chat_panel.rs      (Assistant conversation side panel)
//! ├── item_card.rs       (Card and detail lines per item)
//! ├── item_modal.rs      (Detail overlay + click-outside hit test)
//! ├── landing.rs         (Plan entry page)
//! ├── loading.rs         (Spinner)
//! ├── recommendations.rs (Tabs, pager, cards, booking toast)
//! ├── text_field.rs      (Multi-line input)
//! └── title_bar.rs       (Header)
//! ```

pub mod alert;
pub mod chat_panel;
pub mod item_card;
pub mod item_modal;
pub mod landing;
pub mod loading;
pub mod recommendations;
pub mod text_field;
mod title_bar;

pub use alert::Alert;
pub use chat_panel::{ChatEvent, ChatPanel, ChatPanelState};
pub use item_modal::ItemModal;
pub use landing::LandingPage;
pub use loading::LoadingView;
pub use recommendations::{RecommendationsEvent, RecommendationsState, RecommendationsView};
pub use text_field::{TextField, TextFieldEvent};
pub use title_bar::TitleBar;
