//! # Item Rendering
//!
//! Turns a borrowed [`Item`] into styled lines: a compact card for the
//! recommendations list and a full detail sheet for the modal.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::api::{Attraction, Flight, Hotel, Item, price_label};

const TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);
const MUTED: Style = Style::new().fg(Color::DarkGray);
const PRICE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const RATING: Style = Style::new().fg(Color::Yellow);
const LABEL: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Card price for a hotel: `$180/night`, or `Free`.
pub fn hotel_price(hotel: &Hotel) -> String {
    match price_label(hotel.price_per_night) {
        free if hotel.price_per_night == 0.0 => free,
        label => format!("{label}/night"),
    }
}

pub fn flight_price(flight: &Flight) -> String {
    format!("${}", flight.price)
}

pub fn attraction_price(attraction: &Attraction) -> String {
    price_label(attraction.price)
}

pub fn title(item: Item<'_>) -> &str {
    match item {
        Item::Hotel(h) => &h.name,
        Item::Flight(f) => &f.airline,
        Item::Attraction(a) => &a.name,
    }
}

/// Label of the booking action in the modal.
pub fn book_label(item: Item<'_>) -> &'static str {
    match item {
        Item::Hotel(_) => "Book Hotel",
        Item::Flight(_) => "Book Flight",
        Item::Attraction(_) => "Buy Ticket",
    }
}

/// Card lines, each truncated to `width` columns.
pub fn card_lines(item: Item<'_>, width: u16) -> Vec<Line<'static>> {
    let width = usize::from(width);
    let text = |s: String, style: Style| Line::from(Span::styled(truncate(&s, width), style));
    let footer = |left: String, left_style: Style, right: String| {
        let gap = width
            .saturating_sub(left.width() + right.width())
            .max(2);
        Line::from(vec![
            Span::styled(left, left_style),
            Span::raw(" ".repeat(gap)),
            Span::styled(right, PRICE),
        ])
    };

    match item {
        Item::Hotel(h) => vec![
            text(h.name.clone(), TITLE),
            text(format!("{}, {}", h.city, h.country), MUTED),
            text(h.description.clone(), Style::default()),
            footer(format!("⭐ {}", h.rating), RATING, hotel_price(h)),
        ],
        Item::Flight(f) => vec![
            text(f.airline.clone(), TITLE),
            text(format!("{} → {}", f.origin, f.destination), Style::default()),
            text(format!("{} - {}", f.departure_time, f.arrival_time), MUTED),
            text(format!("Duration: {}", f.duration), MUTED),
            footer(format!("{} stops", f.stops), MUTED, flight_price(f)),
        ],
        Item::Attraction(a) => vec![
            text(a.name.clone(), TITLE),
            text(format!("{}, {}", a.city, a.country), MUTED),
            text(a.category.clone(), Style::default().fg(Color::Magenta)),
            text(a.description.clone(), Style::default()),
            footer(format!("⭐ {}", a.rating), RATING, attraction_price(a)),
        ],
    }
}

/// Detail lines for the modal body. Wrapping is left to the caller.
pub fn detail_lines(item: Item<'_>) -> Vec<Line<'static>> {
    let field = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label}: "), LABEL),
            Span::raw(value),
        ])
    };

    match item {
        Item::Hotel(h) => vec![
            field("Location", h.address.clone()),
            field("Amenities", h.amenities.clone()),
            field("Rating", format!("⭐ {}", h.rating)),
            field(
                "Price",
                if h.price_per_night == 0.0 {
                    price_label(0.0)
                } else {
                    format!("{} per night", price_label(h.price_per_night))
                },
            ),
            Line::raw(""),
            Line::raw(h.description.clone()),
        ],
        Item::Flight(f) => vec![
            field("Route", format!("{} → {}", f.origin, f.destination)),
            field(
                "Departure",
                format!("{} at {}", f.departure_date, f.departure_time),
            ),
            field("Arrival", f.arrival_time.clone()),
            field("Duration", f.duration.clone()),
            field("Class", f.flight_class.clone()),
            field("Stops", f.stops.to_string()),
            field("Price", flight_price(f)),
        ],
        Item::Attraction(a) => vec![
            field("Location", a.address.clone()),
            field("Category", a.category.clone()),
            field("Opening Hours", a.opening_hours.clone()),
            field("Rating", format!("⭐ {}", a.rating)),
            field("Price", attraction_price(a)),
            Line::raw(""),
            Line::raw(a.description.clone()),
        ],
    }
}

/// Truncate to `width` display columns, ending with `…` when cut.
fn truncate(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}
