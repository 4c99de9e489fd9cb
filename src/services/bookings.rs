//! Booking management service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::booking::{Booking, BookingStatus, NewBooking},
    repository::Repository,
};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
}

impl BookingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a booking.
    ///
    /// Validation is superficial by contract: required fields must be
    /// present, the party size positive, and recorded payment amounts
    /// consistent. Seat availability is NOT checked or reserved here;
    /// capacity is only approximated client-side.
    pub async fn create_booking(&self, booking: NewBooking) -> AppResult<Booking> {
        let core = booking.core();
        for (field, value) in [
            ("tourName", &core.tour_name),
            ("fullName", &core.full_name),
            ("email", &core.email),
            ("phone", &core.phone),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{} is required", field)));
            }
        }

        if core.number_of_people < 1 {
            return Err(AppError::Validation(
                "numberOfPeople must be a positive integer".to_string(),
            ));
        }

        if let Some(payment) = booking.payment() {
            payment.validate_amounts().map_err(AppError::Validation)?;
        }

        self.repository.bookings.create(&booking).await
    }

    /// List bookings for one tour
    pub async fn list_for_tour(&self, tour_id: Uuid) -> AppResult<Vec<Booking>> {
        self.repository.bookings.list_by_tour(tour_id).await
    }

    /// List all bookings
    pub async fn list_all(&self) -> AppResult<Vec<Booking>> {
        self.repository.bookings.list_all().await
    }

    /// Count bookings for one tour
    pub async fn count_for_tour(&self, tour_id: Uuid) -> AppResult<i64> {
        self.repository.bookings.count_by_tour(tour_id).await
    }

    /// Set a booking's status. Any status may move to any other status;
    /// a no-op transition succeeds.
    pub async fn update_status(&self, id: Uuid, status: BookingStatus) -> AppResult<Booking> {
        self.repository.bookings.update_status(id, status).await
    }
}
