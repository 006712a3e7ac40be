//! reqwest-backed implementation of [`TravelApi`].

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use super::travel_api::{ApiError, TravelApi};
use super::types::{
    BookingRequest, BookingResponse, Category, ChatRequest, Recommendations, TravelPlanRequest,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// HTTP client for the travel backend.
pub struct HttpTravelApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTravelApi {
    pub fn new(base_url: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a prepared request and decode the JSON body.
    ///
    /// Any non-2xx status becomes `ApiError::Request` with `failure` as the
    /// message; the response body is logged but never parsed.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        failure: &str,
    ) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Travel API response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Travel API error: {} - {}", status.as_u16(), body);
            return Err(ApiError::Request {
                status: status.as_u16(),
                message: failure.to_string(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl TravelApi for HttpTravelApi {
    async fn process_travel_plan(
        &self,
        plan: &str,
        preferences: Option<&str>,
    ) -> Result<Recommendations, ApiError> {
        info!(
            "POST /api/travel-plan (plan_len={}, preferences={})",
            plan.len(),
            preferences.is_some()
        );
        let body = TravelPlanRequest { plan, preferences };
        let request = self
            .client
            .post(format!("{}/api/travel-plan", self.base_url))
            .json(&body);
        self.send(request, "Failed to process travel plan").await
    }

    async fn chat_with_agent(
        &self,
        message: &str,
        current_plan: Option<&str>,
    ) -> Result<Recommendations, ApiError> {
        info!("POST /api/chat (message_len={})", message.len());
        let body = ChatRequest {
            message,
            current_plan,
        };
        let request = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&body);
        self.send(request, "Failed to chat with agent").await
    }

    async fn get_recommendations_for_day(
        &self,
        day: u32,
        locations: Option<&str>,
    ) -> Result<Recommendations, ApiError> {
        info!("GET /api/recommendations/day/{} (locations={:?})", day, locations);
        let mut request = self
            .client
            .get(format!("{}/api/recommendations/day/{}", self.base_url, day));
        if let Some(locations) = locations.filter(|l| !l.is_empty()) {
            request = request.query(&[("locations", locations)]);
        }
        self.send(request, "Failed to get recommendations").await
    }

    async fn book_item(
        &self,
        category: Category,
        id: i64,
        date: Option<&str>,
    ) -> Result<BookingResponse, ApiError> {
        info!("POST /api/book ({} id={})", category, id);
        let body = BookingRequest { category, id, date };
        let request = self
            .client
            .post(format!("{}/api/book", self.base_url))
            .json(&body);
        self.send(request, "Failed to book item").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let api = HttpTravelApi::new(None);
        assert_eq!(api.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let api = HttpTravelApi::new(Some("http://example.test:9000/".to_string()));
        assert_eq!(api.base_url(), "http://example.test:9000");
    }

    #[test]
    fn test_request_error_display_includes_status() {
        let err = ApiError::Request {
            status: 500,
            message: "Failed to book item".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to book item (HTTP 500)");
    }
}
