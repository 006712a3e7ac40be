use std::fmt;

use async_trait::async_trait;

use super::types::{BookingResponse, Category, Recommendations};

/// Errors that can occur while talking to the travel backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Backend answered with a non-2xx status. The message is static per call.
    Request { status: u16, message: String },
    /// Transport failure (connection refused, DNS, reset).
    Network(String),
    /// A 2xx response whose body did not match the expected shape.
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Request { status, message } => write!(f, "{message} (HTTP {status})"),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The four backend operations. Each is a single request/response with no
/// retries; failures are returned, never recovered here.
#[async_trait]
pub trait TravelApi: Send + Sync {
    /// Submit a free-text plan. `preferences` is passed through untouched.
    async fn process_travel_plan(
        &self,
        plan: &str,
        preferences: Option<&str>,
    ) -> Result<Recommendations, ApiError>;

    /// Send a chat refinement along with the last submitted plan text.
    async fn chat_with_agent(
        &self,
        message: &str,
        current_plan: Option<&str>,
    ) -> Result<Recommendations, ApiError>;

    async fn get_recommendations_for_day(
        &self,
        day: u32,
        locations: Option<&str>,
    ) -> Result<Recommendations, ApiError>;

    async fn book_item(
        &self,
        category: Category,
        id: i64,
        date: Option<&str>,
    ) -> Result<BookingResponse, ApiError>;
}
