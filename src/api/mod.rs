//! # Travel API
//!
//! Typed access to the travel backend: wire types, the [`TravelApi`]
//! trait, and its HTTP implementation.

pub mod client;
pub mod travel_api;
pub mod types;

pub use client::{DEFAULT_BASE_URL, HttpTravelApi};
pub use travel_api::{ApiError, TravelApi};
pub use types::{
    Attraction, BookingResponse, Category, Flight, Hotel, Item, ItemRef, Recommendations,
    price_label,
};
