//! Wire types for the travel backend.
//!
//! Every response record is flat and server-defined. The client never
//! derives or merges them: a `Recommendations` value is always replaced
//! wholesale by the next response.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Hotel {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub country: String,
    pub price_per_night: f64,
    pub rating: f64,
    pub description: String,
    pub amenities: String,
    pub image_url: String,
    pub address: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Flight {
    pub id: i64,
    pub airline: String,
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub price: f64,
    pub duration: String,
    pub stops: u32,
    pub flight_class: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Attraction {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub country: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub rating: f64,
    pub image_url: String,
    pub address: String,
    pub opening_hours: String,
}

fn default_day() -> u32 {
    1
}

/// The full recommendation payload returned by plan, chat and day calls.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Recommendations {
    #[serde(default)]
    pub hotels: Vec<Hotel>,
    #[serde(default)]
    pub flights: Vec<Flight>,
    #[serde(default)]
    pub attractions: Vec<Attraction>,
    #[serde(default = "default_day")]
    pub days: u32,
    #[serde(default = "default_day")]
    pub current_day: u32,
}

impl Recommendations {
    /// Number of days, never less than one.
    pub fn day_count(&self) -> u32 {
        self.days.max(1)
    }

    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Hotel => self.hotels.len(),
            Category::Flight => self.flights.len(),
            Category::Attraction => self.attractions.len(),
        }
    }

    /// Id of the item at `index` within a category.
    pub fn id_at(&self, category: Category, index: usize) -> Option<i64> {
        match category {
            Category::Hotel => self.hotels.get(index).map(|h| h.id),
            Category::Flight => self.flights.get(index).map(|f| f.id),
            Category::Attraction => self.attractions.get(index).map(|a| a.id),
        }
    }

    /// All items of one category, in response order.
    pub fn items(&self, category: Category) -> Vec<Item<'_>> {
        match category {
            Category::Hotel => self.hotels.iter().map(Item::Hotel).collect(),
            Category::Flight => self.flights.iter().map(Item::Flight).collect(),
            Category::Attraction => self.attractions.iter().map(Item::Attraction).collect(),
        }
    }

    /// Look up an item by its category and id.
    pub fn find(&self, item: ItemRef) -> Option<Item<'_>> {
        match item.category {
            Category::Hotel => self
                .hotels
                .iter()
                .find(|h| h.id == item.id)
                .map(Item::Hotel),
            Category::Flight => self
                .flights
                .iter()
                .find(|f| f.id == item.id)
                .map(Item::Flight),
            Category::Attraction => self
                .attractions
                .iter()
                .find(|a| a.id == item.id)
                .map(Item::Attraction),
        }
    }

    /// Distinct hotel and attraction cities, comma-joined, for the
    /// `locations` query parameter. `None` when there are no cities.
    pub fn locations(&self) -> Option<String> {
        let cities: BTreeSet<&str> = self
            .hotels
            .iter()
            .map(|h| h.city.as_str())
            .chain(self.attractions.iter().map(|a| a.city.as_str()))
            .filter(|c| !c.is_empty())
            .collect();
        if cities.is_empty() {
            None
        } else {
            Some(cities.into_iter().collect::<Vec<_>>().join(","))
        }
    }
}

/// Recommendation category. Doubles as the booking `type` on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Hotel,
    Flight,
    Attraction,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Hotel, Category::Flight, Category::Attraction];

    /// Plural label used on tabs.
    pub fn label(self) -> &'static str {
        match self {
            Category::Hotel => "Hotels",
            Category::Flight => "Flights",
            Category::Attraction => "Attractions",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Category::Hotel => 0,
            Category::Flight => 1,
            Category::Attraction => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Hotel => "hotel",
            Category::Flight => "flight",
            Category::Attraction => "attraction",
        };
        f.write_str(s)
    }
}

/// Identifies one recommendation without borrowing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemRef {
    pub category: Category,
    pub id: i64,
}

/// A borrowed recommendation of any category.
#[derive(Debug, Clone, Copy)]
pub enum Item<'a> {
    Hotel(&'a Hotel),
    Flight(&'a Flight),
    Attraction(&'a Attraction),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BookingResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
}

// ============================================================================
// Request bodies
// ============================================================================

#[derive(Serialize, Debug)]
pub struct TravelPlanRequest<'a> {
    pub plan: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<&'a str>,
}

#[derive(Serialize, Debug)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_plan: Option<&'a str>,
}

#[derive(Serialize, Debug)]
pub struct BookingRequest<'a> {
    #[serde(rename = "type")]
    pub category: Category,
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<&'a str>,
}

/// Price label: `Free` for zero, `$<price>` otherwise.
pub fn price_label(price: f64) -> String {
    if price == 0.0 {
        "Free".to_string()
    } else {
        format!("${price}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_recommendations;

    #[test]
    fn test_price_label_free_for_zero() {
        assert_eq!(price_label(0.0), "Free");
    }

    #[test]
    fn test_price_label_formats_dollars() {
        assert_eq!(price_label(25.0), "$25");
        assert_eq!(price_label(19.5), "$19.5");
    }

    #[test]
    fn test_recommendations_defaults_days_when_missing() {
        let json = r#"{"hotels": [], "flights": [], "attractions": []}"#;
        let recs: Recommendations = serde_json::from_str(json).unwrap();
        assert_eq!(recs.days, 1);
        assert_eq!(recs.current_day, 1);
    }

    #[test]
    fn test_day_count_never_zero() {
        let mut recs = sample_recommendations(3);
        recs.days = 0;
        assert_eq!(recs.day_count(), 1);
    }

    #[test]
    fn test_booking_request_uses_type_key() {
        let req = BookingRequest {
            category: Category::Attraction,
            id: 7,
            date: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value, serde_json::json!({"type": "attraction", "id": 7}));
    }

    #[test]
    fn test_chat_request_omits_missing_plan() {
        let req = ChatRequest {
            message: "add a museum",
            current_plan: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value, serde_json::json!({"message": "add a museum"}));
    }

    #[test]
    fn test_find_by_category_and_id() {
        let recs = sample_recommendations(2);
        let hit = recs.find(ItemRef {
            category: Category::Flight,
            id: 20,
        });
        assert!(matches!(hit, Some(Item::Flight(f)) if f.airline == "Alitalia"));
        assert!(
            recs.find(ItemRef {
                category: Category::Hotel,
                id: 999
            })
            .is_none()
        );
    }

    #[test]
    fn test_locations_are_distinct_and_sorted() {
        let recs = sample_recommendations(2);
        assert_eq!(recs.locations().as_deref(), Some("Florence,Rome"));
    }

    #[test]
    fn test_category_cycles() {
        assert_eq!(Category::Hotel.next(), Category::Flight);
        assert_eq!(Category::Attraction.next(), Category::Hotel);
        assert_eq!(Category::Hotel.prev(), Category::Attraction);
    }
}
