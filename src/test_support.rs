//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{
    ApiError, Attraction, BookingResponse, Category, Flight, Hotel, Recommendations, TravelApi,
};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;

/// Creates a test App with default config.
pub fn test_app() -> App {
    App::new(&ResolvedConfig::default())
}

pub fn hotel(id: i64, name: &str, city: &str, price: f64) -> Hotel {
    Hotel {
        id,
        name: name.to_string(),
        city: city.to_string(),
        country: "Italy".to_string(),
        price_per_night: price,
        rating: 4.5,
        description: format!("{name} in {city}"),
        amenities: "WiFi, Spa".to_string(),
        image_url: String::new(),
        address: format!("1 Via {name}"),
    }
}

pub fn flight(id: i64, airline: &str, price: f64) -> Flight {
    Flight {
        id,
        airline: airline.to_string(),
        origin: "London".to_string(),
        destination: "Rome".to_string(),
        departure_date: "2026-05-01".to_string(),
        departure_time: "08:15".to_string(),
        arrival_time: "11:55".to_string(),
        price,
        duration: "2h 40m".to_string(),
        stops: 0,
        flight_class: "Economy".to_string(),
    }
}

pub fn attraction(id: i64, name: &str, price: f64) -> Attraction {
    Attraction {
        id,
        name: name.to_string(),
        city: "Rome".to_string(),
        country: "Italy".to_string(),
        category: "history".to_string(),
        description: format!("Visit {name}"),
        price,
        rating: 4.8,
        image_url: String::new(),
        address: "Piazza del Colosseo".to_string(),
        opening_hours: "9:00-19:00".to_string(),
    }
}

/// Two hotels (ids 1, 5), one flight (id 20), two attractions (ids 30, 31;
/// 31 is free).
pub fn sample_recommendations(days: u32) -> Recommendations {
    Recommendations {
        hotels: vec![
            hotel(1, "Hotel Artemide", "Rome", 180.0),
            hotel(5, "Villa Medici", "Florence", 240.0),
        ],
        flights: vec![flight(20, "Alitalia", 129.0)],
        attractions: vec![
            attraction(30, "Colosseum", 18.0),
            attraction(31, "Trevi Fountain", 0.0),
        ],
        days,
        current_day: 1,
    }
}

/// Records every call and answers from canned results.
#[derive(Default)]
pub struct FakeTravelApi {
    pub calls: Mutex<Vec<String>>,
    pub fail_with: Option<ApiError>,
    pub recommendations: Option<Recommendations>,
}

impl FakeTravelApi {
    pub fn returning(recommendations: Recommendations) -> Self {
        Self {
            recommendations: Some(recommendations),
            ..Default::default()
        }
    }

    pub fn failing(error: ApiError) -> Self {
        Self {
            fail_with: Some(error),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn payload(&self) -> Recommendations {
        self.recommendations
            .clone()
            .unwrap_or_else(|| sample_recommendations(1))
    }
}

#[async_trait]
impl TravelApi for FakeTravelApi {
    async fn process_travel_plan(
        &self,
        plan: &str,
        preferences: Option<&str>,
    ) -> Result<Recommendations, ApiError> {
        self.record(format!("plan:{plan}:{preferences:?}"))?;
        Ok(self.payload())
    }

    async fn chat_with_agent(
        &self,
        message: &str,
        current_plan: Option<&str>,
    ) -> Result<Recommendations, ApiError> {
        self.record(format!("chat:{message}:{current_plan:?}"))?;
        Ok(self.payload())
    }

    async fn get_recommendations_for_day(
        &self,
        day: u32,
        locations: Option<&str>,
    ) -> Result<Recommendations, ApiError> {
        self.record(format!("day:{day}:{locations:?}"))?;
        Ok(Recommendations {
            current_day: day,
            ..self.payload()
        })
    }

    async fn book_item(
        &self,
        category: Category,
        id: i64,
        date: Option<&str>,
    ) -> Result<BookingResponse, ApiError> {
        self.record(format!("book:{category}:{id}:{date:?}"))?;
        Ok(BookingResponse {
            success: true,
            message: format!("Booked {category} {id}!"),
            booking_id: Some(format!("{category}_{id}")),
        })
    }
}
