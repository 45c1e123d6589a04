//! Core price computation for booking quotes.
//!
//! Pure functions for pricing math - no I/O, no clocks, no framework types.
//! Every quote is recomputed from scratch from an immutable input snapshot,
//! so identical inputs always produce identical breakdowns.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use super::models::{
    Coupon, DiscountEligibility, DiscountType, RateOverrides, RateTable, ResolvedRates, RoomType,
    TransportMode, TripConfig,
};

/// Round to whole currency units, halves away from zero.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use trailquote_web::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5)), dec!(3));
/// assert_eq!(round_money(dec!(1.4)), dec!(1));
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Minimum rooms for a party: one room per four adults, never below one.
pub fn minimum_rooms(adults: u32) -> u32 {
    ((adults + 3) / 4).max(1)
}

/// Merge the global rate table with a tour's overrides into the
/// fully-populated table the calculators run on.
///
/// Resolution per field is override, then global, then zero. Negative
/// values clamp to zero, so the resolved table is always safe to multiply
/// with.
pub fn resolve_rates(global: &RateTable, overrides: Option<&RateOverrides>) -> ResolvedRates {
    fn resolve(over: Option<Decimal>, global: Option<Decimal>) -> Decimal {
        over.or(global).unwrap_or(Decimal::ZERO).max(Decimal::ZERO)
    }

    ResolvedRates {
        meal_per_person: resolve(
            overrides.and_then(|o| o.meal_per_person),
            global.meal_per_person,
        ),
        tea_per_person: resolve(
            overrides.and_then(|o| o.tea_per_person),
            global.tea_per_person,
        ),
        bonfire_flat: resolve(overrides.and_then(|o| o.bonfire_flat), global.bonfire_flat),
        personal_cab_flat: resolve(
            overrides.and_then(|o| o.personal_cab_flat),
            global.personal_cab_flat,
        ),
        standard_room_per_night: resolve(
            overrides.and_then(|o| o.standard_room_per_night),
            global.standard_room_per_night,
        ),
        panoramic_room_per_night: resolve(
            overrides.and_then(|o| o.panoramic_room_per_night),
            global.panoramic_room_per_night,
        ),
        tour_guide_flat: resolve(
            overrides.and_then(|o| o.tour_guide_flat),
            global.tour_guide_flat,
        ),
        comfort_seat_flat: resolve(
            overrides.and_then(|o| o.comfort_seat_flat),
            global.comfort_seat_flat,
        ),
        sharing_deduction_per_person: resolve(
            overrides.and_then(|o| o.sharing_deduction_per_person),
            global.sharing_deduction_per_person,
        ),
    }
}

/// One cost category per field, each rounded to whole units.
///
/// `transport` is the only category that may be negative (the deduction
/// for parties arranging their own transport). The totals are floored at
/// zero; the category itself is not, so the breakdown the UI displays
/// still shows the deduction.
#[derive(Debug, Clone, PartialEq)]
pub struct CostBreakdown {
    pub base_price: Decimal,
    pub room_charges: Decimal,
    pub transport: Decimal,
    pub meal: Decimal,
    pub tea: Decimal,
    pub bonfire: Decimal,
    pub tour_guide: Decimal,
    pub comfort_seat: Decimal,
    pub kids_price: Decimal,
    /// Sum of every category except the kids price, floored at zero.
    pub adults_total: Decimal,
    /// Adults total plus the kids price, floored at zero.
    pub grand_total: Decimal,
}

/// Price a trip against a resolved rate table.
///
/// Categories are independent of each other:
/// - base price scales with adults, room charges with rooms x nights,
///   the kids price with children;
/// - meal is per person per day (`days = nights + 1`), tea likewise but
///   complimentary whenever the meal plan covers it;
/// - bonfire, tour guide, and comfort seat are one-time flats per booking;
/// - transport is a flat cab charge, a per-adult deduction for
///   self-arranged travel, or zero for the shared vehicle.
///
/// Tolerates `adults == 0`; nothing here divides by the head count.
pub fn compute_costs(config: &TripConfig, rates: &ResolvedRates) -> CostBreakdown {
    let adults = Decimal::from(config.adults);
    let nights = Decimal::from(config.nights);
    let days = Decimal::from(config.nights + 1);

    let base_price = adults * config.base_price_per_adult;

    let room_rate = match config.room_type {
        RoomType::Standard => rates.standard_room_per_night,
        RoomType::Panoramic => rates.panoramic_room_per_night,
    };
    let room_charges = room_rate * Decimal::from(config.rooms) * nights;

    let kids_price = Decimal::from(config.children) * config.kids_per_person_price;

    let transport = match config.transport_mode {
        TransportMode::Personal => rates.personal_cab_flat,
        TransportMode::SelfArranged => -(rates.sharing_deduction_per_person * adults),
        TransportMode::Sharing => Decimal::ZERO,
    };

    let meal = if config.add_ons.meal {
        adults * rates.meal_per_person * days
    } else {
        Decimal::ZERO
    };

    // Tea is complimentary whenever the meal plan covers it.
    let tea = if config.add_ons.tea {
        let rate = if config.add_ons.meal {
            Decimal::ZERO
        } else {
            rates.tea_per_person
        };
        adults * rate * days
    } else {
        Decimal::ZERO
    };

    let bonfire = if config.add_ons.bonfire {
        rates.bonfire_flat
    } else {
        Decimal::ZERO
    };
    let tour_guide = if config.add_ons.tour_guide {
        rates.tour_guide_flat
    } else {
        Decimal::ZERO
    };
    let comfort_seat = if config.add_ons.comfort_seat {
        rates.comfort_seat_flat
    } else {
        Decimal::ZERO
    };

    // Round each category once; the aggregates sum the rounded values so
    // the displayed breakdown always adds up to the displayed totals.
    let base_price = round_money(base_price);
    let room_charges = round_money(room_charges);
    let transport = round_money(transport);
    let meal = round_money(meal);
    let tea = round_money(tea);
    let bonfire = round_money(bonfire);
    let tour_guide = round_money(tour_guide);
    let comfort_seat = round_money(comfort_seat);
    let kids_price = round_money(kids_price);

    let adults_total = (base_price
        + room_charges
        + transport
        + meal
        + tea
        + bonfire
        + tour_guide
        + comfort_seat)
        .max(Decimal::ZERO);
    let grand_total = (adults_total + kids_price).max(Decimal::ZERO);

    CostBreakdown {
        base_price,
        room_charges,
        transport,
        meal,
        tea,
        bonfire,
        tour_guide,
        comfort_seat,
        kids_price,
        adults_total,
        grand_total,
    }
}

/// Discount figures layered on top of a [`CostBreakdown`].
///
/// The adults side is derived by subtraction from the discounted grand
/// total, so `discounted_adults_total + discounted_kids_total` equals
/// `discounted_grand_total` exactly, with no rounding drift.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountedBreakdown {
    pub discount: Decimal,
    pub discounted_adults_total: Decimal,
    pub discounted_kids_total: Decimal,
    pub discounted_grand_total: Decimal,
}

/// Sum of the categories the coupon may discount, floored at zero.
///
/// The kids price is discountable exactly when the base price is.
fn discountable_amount(costs: &CostBreakdown, eligibility: &DiscountEligibility) -> Decimal {
    let mut sum = Decimal::ZERO;
    if eligibility.base_price {
        sum += costs.base_price + costs.kids_price;
    }
    if eligibility.room_charges {
        sum += costs.room_charges;
    }
    if eligibility.transport {
        sum += costs.transport;
    }
    if eligibility.meal {
        sum += costs.meal;
    }
    if eligibility.tea {
        sum += costs.tea;
    }
    if eligibility.bonfire {
        sum += costs.bonfire;
    }
    if eligibility.tour_guide {
        sum += costs.tour_guide;
    }
    if eligibility.comfort_seat {
        sum += costs.comfort_seat;
    }
    sum.max(Decimal::ZERO)
}

/// Apply a coupon to a computed breakdown.
///
/// With no coupon the discounted figures equal the undiscounted ones. A
/// percentage coupon takes its cut of the discountable base; a flat coupon
/// is capped at that base so the total can never go negative. When kids
/// are discountable, a percentage coupon discounts their price directly
/// and a flat coupon allocates to them by their share of the discountable
/// base.
pub fn apply_coupon(costs: &CostBreakdown, coupon: Option<&Coupon>) -> DiscountedBreakdown {
    let Some(coupon) = coupon else {
        return DiscountedBreakdown {
            discount: Decimal::ZERO,
            discounted_adults_total: costs.adults_total,
            discounted_kids_total: costs.kids_price,
            discounted_grand_total: costs.grand_total,
        };
    };

    let eligibility = &coupon.discount_eligibility;
    let discountable = discountable_amount(costs, eligibility);

    let discount = match coupon.discount_type {
        DiscountType::Percentage => discountable * coupon.discount_value / Decimal::from(100),
        DiscountType::Flat => coupon.discount_value.min(discountable),
    };

    let discounted_grand_total = round_money((costs.grand_total - discount).max(Decimal::ZERO));

    let kids_discountable = eligibility.base_price && costs.kids_price > Decimal::ZERO;
    let discounted_kids_total = if kids_discountable {
        let kids_discount = match coupon.discount_type {
            DiscountType::Percentage => {
                costs.kids_price * coupon.discount_value / Decimal::from(100)
            }
            DiscountType::Flat => {
                let kids_share = if discountable > Decimal::ZERO {
                    costs.kids_price / discountable
                } else {
                    Decimal::ZERO
                };
                discount * kids_share
            }
        };
        round_money((costs.kids_price - kids_discount).max(Decimal::ZERO))
    } else {
        costs.kids_price
    };

    let discounted_adults_total = discounted_grand_total - discounted_kids_total;

    DiscountedBreakdown {
        discount,
        discounted_adults_total,
        discounted_kids_total,
        discounted_grand_total,
    }
}

/// Per-head display price: an adults-side total split across the party.
///
/// Guards the head count at one so an empty party never divides by zero.
pub fn per_head(amount: Decimal, adults: u32) -> Decimal {
    round_money(amount / Decimal::from(adults.max(1)))
}

/// Per-adult share of the room charges, shown beside the room line.
pub fn per_adult_room_share(room_charges: Decimal, adults: u32) -> Decimal {
    if adults == 0 {
        Decimal::ZERO
    } else {
        round_money(room_charges / Decimal::from(adults))
    }
}
