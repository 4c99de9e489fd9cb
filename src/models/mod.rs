//! Data models for Namgail Tours

pub mod admin;
pub mod booking;
pub mod tour;

// Re-export commonly used types
pub use admin::AdminClaims;
pub use booking::{Booking, BookingSource, BookingStatus, NewBooking, PaymentOption, PaymentStatus};
pub use tour::{Tour, TourType};
