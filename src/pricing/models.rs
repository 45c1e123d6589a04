//! Domain models for booking quotes.
//!
//! Wire shapes mirror the admin API and the booking UI, which exchange
//! camelCase JSON. Amounts are decimals in whole-rupee units.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Global rate configuration served by the admin API.
///
/// Every field is optional on the wire; [`resolve_rates`] fills gaps with
/// zero so downstream math never touches an `Option`.
///
/// [`resolve_rates`]: super::calculators::resolve_rates
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RateTable {
    #[serde(with = "rust_decimal::serde::str_option")]
    pub meal_per_person: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub tea_per_person: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub bonfire_flat: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub personal_cab_flat: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub standard_room_per_night: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub panoramic_room_per_night: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub tour_guide_flat: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub comfort_seat_flat: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub sharing_deduction_per_person: Option<Decimal>,
}

/// Per-tour rate overrides; any present field masks the global value.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RateOverrides {
    #[serde(with = "rust_decimal::serde::str_option")]
    pub meal_per_person: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub tea_per_person: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub bonfire_flat: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub personal_cab_flat: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub standard_room_per_night: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub panoramic_room_per_night: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub tour_guide_flat: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub comfort_seat_flat: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub sharing_deduction_per_person: Option<Decimal>,
}

/// Fully-resolved rate table the calculators run on.
///
/// Every field is populated and non-negative; negative values from a
/// misconfigured admin API clamp to zero during resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedRates {
    pub meal_per_person: Decimal,
    pub tea_per_person: Decimal,
    pub bonfire_flat: Decimal,
    pub personal_cab_flat: Decimal,
    pub standard_room_per_night: Decimal,
    pub panoramic_room_per_night: Decimal,
    pub tour_guide_flat: Decimal,
    pub comfort_seat_flat: Decimal,
    pub sharing_deduction_per_person: Decimal,
}

/// Room category for the stay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    #[default]
    Standard,
    Panoramic,
}

/// How the party reaches the campsite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Travellers arrange their own transport and earn a per-person
    /// deduction off the package.
    #[serde(rename = "self")]
    SelfArranged,
    #[default]
    Sharing,
    Personal,
}

/// Optional extras toggled on the booking form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddOns {
    pub bonfire: bool,
    pub meal: bool,
    pub tea: bool,
    pub comfort_seat: bool,
    pub tour_guide: bool,
}

impl AddOns {
    /// The meal plan bundles tea: with meal on, tea is always on (and
    /// complimentary). Tea stays independently togglable otherwise.
    pub fn normalized(self) -> Self {
        Self {
            tea: self.tea || self.meal,
            ..self
        }
    }
}

/// Complete engine input for one pricing run.
///
/// The configuration layer keeps `rooms` at or above
/// [`minimum_rooms`]`(adults)` and applies [`AddOns::normalized`] before
/// this reaches the calculators. The engine trusts those invariants but
/// stays total for whatever it is handed: `adults` may be zero and is
/// never used as a divisor.
///
/// [`minimum_rooms`]: super::calculators::minimum_rooms
#[derive(Debug, Clone, PartialEq)]
pub struct TripConfig {
    pub adults: u32,
    pub children: u32,
    pub room_type: RoomType,
    pub transport_mode: TransportMode,
    pub rooms: u32,
    pub add_ons: AddOns,
    pub base_price_per_adult: Decimal,
    pub nights: u32,
    pub kids_per_person_price: Decimal,
}

/// Tour record served by the admin API.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    /// Package price per adult.
    #[serde(with = "rust_decimal::serde::str")]
    pub base_price: Decimal,
    pub nights: u32,
    /// Per-child price; tours without one charge nothing for kids.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub kids_price: Option<Decimal>,
    #[serde(default)]
    pub pricing: Option<RateOverrides>,
    #[serde(default = "default_true")]
    pub active: bool,
}

/// Discount style of a coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    Percentage,
    Flat,
}

/// Which cost categories a coupon may discount.
///
/// Absent flags mean the category is excluded; the kids price rides with
/// `base_price`. A coupon served without a mask discounts nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscountEligibility {
    pub base_price: bool,
    pub room_charges: bool,
    pub transport: bool,
    pub meal: bool,
    pub tea: bool,
    pub bonfire: bool,
    pub tour_guide: bool,
    pub comfort_seat: bool,
}

impl DiscountEligibility {
    /// Mask with every category discountable.
    pub fn all() -> Self {
        Self {
            base_price: true,
            room_charges: true,
            transport: true,
            meal: true,
            tea: true,
            bonfire: true,
            tour_guide: true,
            comfort_seat: true,
        }
    }
}

/// Coupon record served by the admin API.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub code: String,
    pub discount_type: DiscountType,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_value: Decimal,
    #[serde(default)]
    pub discount_eligibility: DiscountEligibility,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub valid_to: Option<DateTime<Utc>>,
}

impl Coupon {
    /// Check the coupon can be applied at the given time.
    pub fn is_valid_at(&self, check_time: DateTime<Utc>) -> bool {
        if !self.active {
            return false;
        }
        if let Some(start) = self.valid_from {
            if start > check_time {
                return false;
            }
        }
        match self.valid_to {
            Some(end) => check_time < end,
            None => true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn coupon() -> Coupon {
        Coupon {
            id: None,
            code: "MONSOON10".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: dec!(10),
            discount_eligibility: DiscountEligibility::all(),
            active: true,
            valid_from: None,
            valid_to: None,
        }
    }

    #[test]
    fn test_coupon_valid_without_window() {
        assert!(coupon().is_valid_at(Utc::now()));
    }

    #[test]
    fn test_coupon_invalid_when_inactive() {
        let c = Coupon {
            active: false,
            ..coupon()
        };
        assert!(!c.is_valid_at(Utc::now()));
    }

    #[test]
    fn test_coupon_window_bounds() {
        let now = Utc::now();
        let not_started = Coupon {
            valid_from: Some(now + Duration::hours(1)),
            ..coupon()
        };
        assert!(!not_started.is_valid_at(now));

        let expired = Coupon {
            valid_to: Some(now - Duration::hours(1)),
            ..coupon()
        };
        assert!(!expired.is_valid_at(now));

        let open = Coupon {
            valid_from: Some(now - Duration::hours(1)),
            valid_to: Some(now + Duration::hours(1)),
            ..coupon()
        };
        assert!(open.is_valid_at(now));
    }

    #[test]
    fn test_meal_forces_tea() {
        let add_ons = AddOns {
            meal: true,
            tea: false,
            ..AddOns::default()
        };
        assert!(add_ons.normalized().tea);

        // Without the meal plan, tea keeps its own state.
        let add_ons = AddOns::default();
        assert!(!add_ons.normalized().tea);
    }

    #[test]
    fn test_rate_table_tolerates_sparse_json() {
        let rates: RateTable =
            serde_json::from_str(r#"{"mealPerPerson": "250", "standardRoomPerNight": "1500"}"#)
                .unwrap();
        assert_eq!(rates.meal_per_person, Some(dec!(250)));
        assert_eq!(rates.standard_room_per_night, Some(dec!(1500)));
        assert_eq!(rates.tea_per_person, None);
        assert_eq!(rates.sharing_deduction_per_person, None);
    }

    #[test]
    fn test_wire_enum_names() {
        assert_eq!(
            serde_json::from_str::<TransportMode>(r#""self""#).unwrap(),
            TransportMode::SelfArranged
        );
        assert_eq!(
            serde_json::from_str::<RoomType>(r#""panoramic""#).unwrap(),
            RoomType::Panoramic
        );
        assert_eq!(
            serde_json::from_str::<DiscountType>(r#""PERCENTAGE""#).unwrap(),
            DiscountType::Percentage
        );
    }

    #[test]
    fn test_tour_defaults() {
        let tour: Tour = serde_json::from_str(
            r#"{
                "id": "5f3c3cb2-6f0b-4a2d-9a3f-2a6d0a8c1d11",
                "slug": "riverside-camp",
                "name": "Riverside Camp",
                "basePrice": "5000",
                "nights": 2
            }"#,
        )
        .unwrap();
        assert!(tour.active);
        assert_eq!(tour.kids_price, None);
        assert!(tour.pricing.is_none());
    }
}
