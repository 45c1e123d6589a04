//! Request DTOs for the pricing API endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::calculators::minimum_rooms;
use super::models::{AddOns, Coupon, RateOverrides, RateTable, RoomType, Tour, TransportMode, TripConfig};

/// User-editable trip selection from the booking form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSelection {
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub room_type: RoomType,
    #[serde(default)]
    pub transport_mode: TransportMode,
    /// Requested room count; clamped up to the per-party floor.
    #[serde(default)]
    pub rooms: Option<u32>,
    #[serde(default)]
    pub add_ons: AddOns,
}

fn default_adults() -> u32 {
    2
}

impl TripSelection {
    /// Combine the selection with tour attributes into a full engine
    /// input, enforcing the party floor of two adults, the room floor,
    /// and the meal/tea coupling.
    pub fn to_config(&self, tour: &TourSnapshot) -> TripConfig {
        let adults = self.adults.max(2);
        let floor = minimum_rooms(adults);
        TripConfig {
            adults,
            children: self.children,
            room_type: self.room_type,
            transport_mode: self.transport_mode,
            rooms: self.rooms.unwrap_or(floor).max(floor),
            add_ons: self.add_ons.normalized(),
            base_price_per_adult: tour.base_price.max(Decimal::ZERO),
            nights: tour.nights.max(1),
            kids_per_person_price: tour.kids_price.unwrap_or(Decimal::ZERO).max(Decimal::ZERO),
        }
    }
}

/// Tour attribute snapshot for self-contained quotes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourSnapshot {
    #[serde(with = "rust_decimal::serde::str")]
    pub base_price: Decimal,
    pub nights: u32,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub kids_price: Option<Decimal>,
    #[serde(default)]
    pub pricing: Option<RateOverrides>,
}

impl From<&Tour> for TourSnapshot {
    fn from(tour: &Tour) -> Self {
        Self {
            base_price: tour.base_price,
            nights: tour.nights,
            kids_price: tour.kids_price,
            pricing: tour.pricing.clone(),
        }
    }
}

/// Self-contained quote request: the caller supplies the complete
/// pricing snapshot, so the computation needs nothing from upstream.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[serde(default)]
    pub rates: RateTable,
    pub tour: TourSnapshot,
    pub trip: TripSelection,
    #[serde(default)]
    pub coupon: Option<Coupon>,
}

/// Quote request for a catalogued tour; tour, rates, and coupon are
/// fetched server-side.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourQuoteRequest {
    pub trip: TripSelection,
    #[serde(default)]
    pub coupon_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn snapshot() -> TourSnapshot {
        TourSnapshot {
            base_price: dec!(5000),
            nights: 2,
            kids_price: None,
            pricing: None,
        }
    }

    #[test]
    fn test_trip_selection_defaults() {
        let trip: TripSelection = serde_json::from_str("{}").unwrap();
        assert_eq!(trip.adults, 2);
        assert_eq!(trip.children, 0);
        assert_eq!(trip.room_type, RoomType::Standard);
        assert_eq!(trip.transport_mode, TransportMode::Sharing);
        assert_eq!(trip.rooms, None);
        assert_eq!(trip.add_ons, AddOns::default());
    }

    #[test]
    fn test_to_config_enforces_room_floor() {
        let trip: TripSelection =
            serde_json::from_str(r#"{"adults": 5, "rooms": 1}"#).unwrap();
        let config = trip.to_config(&snapshot());
        assert_eq!(config.rooms, 2);

        // A request above the floor is honored.
        let trip: TripSelection =
            serde_json::from_str(r#"{"adults": 5, "rooms": 3}"#).unwrap();
        assert_eq!(trip.to_config(&snapshot()).rooms, 3);
    }

    #[test]
    fn test_to_config_enforces_adult_floor() {
        let trip: TripSelection = serde_json::from_str(r#"{"adults": 1}"#).unwrap();
        assert_eq!(trip.to_config(&snapshot()).adults, 2);
    }

    #[test]
    fn test_to_config_couples_meal_and_tea() {
        let trip: TripSelection =
            serde_json::from_str(r#"{"addOns": {"meal": true}}"#).unwrap();
        let config = trip.to_config(&snapshot());
        assert!(config.add_ons.tea);
    }

    #[test]
    fn test_to_config_clamps_tour_attributes() {
        let tour = TourSnapshot {
            base_price: dec!(-100),
            nights: 0,
            kids_price: Some(dec!(-5)),
            pricing: None,
        };
        let trip: TripSelection = serde_json::from_str("{}").unwrap();
        let config = trip.to_config(&tour);
        assert_eq!(config.base_price_per_adult, Decimal::ZERO);
        assert_eq!(config.nights, 1);
        assert_eq!(config.kids_per_person_price, Decimal::ZERO);
    }

    #[test]
    fn test_quote_request_shape() {
        let request: QuoteRequest = serde_json::from_str(
            r#"{
                "rates": {"standardRoomPerNight": "1500"},
                "tour": {"basePrice": "5000", "nights": 2},
                "trip": {"adults": 3, "transportMode": "self"},
                "coupon": {
                    "code": "SAVE10",
                    "discountType": "PERCENTAGE",
                    "discountValue": "10",
                    "discountEligibility": {"basePrice": true}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(request.trip.transport_mode, TransportMode::SelfArranged);
        let coupon = request.coupon.unwrap();
        assert!(coupon.discount_eligibility.base_price);
        assert!(!coupon.discount_eligibility.room_charges);
    }
}
