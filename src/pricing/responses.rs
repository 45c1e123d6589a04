//! Response DTOs for the pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::{
    per_adult_room_share, per_head, round_money, CostBreakdown, DiscountedBreakdown,
};
use super::models::{Coupon, DiscountEligibility, DiscountType};

/// Currency every amount in this service is denominated in.
pub const CURRENCY: &str = "INR";

/// Full price breakdown, exactly as the booking form displays it and
/// forwards it with a booking submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdownResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub base_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub room_charges: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub transport: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub meal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tea: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub bonfire: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tour_guide: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub comfort_seat: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub kids_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub adults_total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub grand_total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub discounted_adults_total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub discounted_kids_total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub discounted_grand_total: Decimal,
}

/// Quote payload for the booking UI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub price_breakdown: PriceBreakdownResponse,
    /// What the party pays: the discounted grand total.
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price: Decimal,
    /// Grand total before any coupon.
    #[serde(with = "rust_decimal::serde::str")]
    pub original_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub per_head_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub original_per_head_price: Decimal,
    /// Display value shown beside the room line on the booking form.
    #[serde(with = "rust_decimal::serde::str")]
    pub room_share_per_adult: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    pub currency: String,
}

impl QuoteResponse {
    /// Assemble the wire payload from engine output.
    pub fn from_breakdown(
        costs: &CostBreakdown,
        discounted: &DiscountedBreakdown,
        adults: u32,
        coupon_code: Option<String>,
    ) -> Self {
        Self {
            price_breakdown: PriceBreakdownResponse {
                base_price: costs.base_price,
                room_charges: costs.room_charges,
                transport: costs.transport,
                meal: costs.meal,
                tea: costs.tea,
                bonfire: costs.bonfire,
                tour_guide: costs.tour_guide,
                comfort_seat: costs.comfort_seat,
                kids_price: costs.kids_price,
                adults_total: costs.adults_total,
                grand_total: costs.grand_total,
                discount: round_money(discounted.discount),
                discounted_adults_total: discounted.discounted_adults_total,
                discounted_kids_total: discounted.discounted_kids_total,
                discounted_grand_total: discounted.discounted_grand_total,
            },
            total_price: discounted.discounted_grand_total,
            original_price: costs.grand_total,
            per_head_price: per_head(discounted.discounted_adults_total, adults),
            original_per_head_price: per_head(costs.adults_total, adults),
            room_share_per_adult: per_adult_room_share(costs.room_charges, adults),
            coupon_code,
            currency: CURRENCY.to_string(),
        }
    }
}

/// Coupon summary for the booking form's "apply coupon" box.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponResponse {
    pub code: String,
    pub discount_type: DiscountType,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_value: Decimal,
    pub discount_eligibility: DiscountEligibility,
}

impl From<&Coupon> for CouponResponse {
    fn from(coupon: &Coupon) -> Self {
        Self {
            code: coupon.code.clone(),
            discount_type: coupon.discount_type,
            discount_value: coupon.discount_value,
            discount_eligibility: coupon.discount_eligibility,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::calculators::{apply_coupon, compute_costs};
    use crate::pricing::models::{AddOns, ResolvedRates, RoomType, TransportMode, TripConfig};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_payload_wire_shape() {
        let rates = ResolvedRates {
            standard_room_per_night: dec!(1500),
            ..ResolvedRates::default()
        };
        let trip = TripConfig {
            adults: 3,
            children: 0,
            room_type: RoomType::Standard,
            transport_mode: TransportMode::Sharing,
            rooms: 1,
            add_ons: AddOns::default(),
            base_price_per_adult: dec!(5000),
            nights: 2,
            kids_per_person_price: Decimal::ZERO,
        };

        let costs = compute_costs(&trip, &rates);
        let discounted = apply_coupon(&costs, None);
        let quote = QuoteResponse::from_breakdown(&costs, &discounted, trip.adults, None);

        let value = serde_json::to_value(&quote).unwrap();
        assert_eq!(value["priceBreakdown"]["basePrice"], "15000");
        assert_eq!(value["priceBreakdown"]["roomCharges"], "3000");
        assert_eq!(value["priceBreakdown"]["grandTotal"], "18000");
        assert_eq!(value["totalPrice"], "18000");
        assert_eq!(value["originalPrice"], "18000");
        assert_eq!(value["perHeadPrice"], "6000");
        assert_eq!(value["roomSharePerAdult"], "1000");
        assert_eq!(value["currency"], "INR");
        // No coupon, no couponCode key at all.
        assert!(value.get("couponCode").is_none());
    }
}
