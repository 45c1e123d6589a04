//! Pricing engine module for the booking flow.
//!
//! The calculators are pure functions over immutable input snapshots; the
//! service layer assembles those snapshots from the admin API, and the
//! routes expose the result to the booking UI over HTTP/JSON.

pub mod calculators;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{
    apply_coupon, compute_costs, minimum_rooms, per_adult_room_share, per_head, resolve_rates,
    round_money,
};
pub use routes::router;
pub use services::PricingError;
