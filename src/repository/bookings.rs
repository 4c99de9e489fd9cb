//! Bookings repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::booking::{Booking, BookingStatus, NewBooking, PaymentOption, PaymentStatus},
};

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))
    }

    /// List bookings for one tour
    pub async fn list_by_tour(&self, tour_id: Uuid) -> AppResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE tour_id = $1 ORDER BY created_at DESC",
        )
        .bind(tour_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    /// List all bookings, newest first
    pub async fn list_all(&self) -> AppResult<Vec<Booking>> {
        let bookings =
            sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(bookings)
    }

    /// Count bookings for one tour
    pub async fn count_by_tour(&self, tour_id: Uuid) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE tour_id = $1")
            .bind(tour_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Persist a new booking.
    ///
    /// Customer bookings start with payment option `none` and both statuses
    /// pending; operator-entered offline bookings carry their recorded
    /// payment details and may start out confirmed.
    pub async fn create(&self, booking: &NewBooking) -> AppResult<Booking> {
        let core = booking.core();
        let tour_date = core.derived_tour_date();
        let status = booking.initial_status();

        let (payment_option, total, advance, remaining, non_refundable, payment_status) =
            match booking.payment() {
                Some(entry) => (
                    entry.payment_option,
                    entry.total_amount,
                    entry.advance_amount,
                    entry.remaining_amount,
                    entry.is_advance_non_refundable,
                    entry.payment_status.unwrap_or(PaymentStatus::Pending),
                ),
                None => (
                    PaymentOption::None,
                    None,
                    None,
                    None,
                    false,
                    PaymentStatus::Pending,
                ),
            };

        let created = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (
                id, tour_id, tour_name, full_name, email, phone,
                number_of_people, tour_date, tour_date_slot, start_date,
                end_date, duration_days, special_requests, source,
                payment_option, total_amount, advance_amount, remaining_amount,
                is_advance_non_refundable, payment_status, status
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21
            )
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(core.tour_id)
        .bind(&core.tour_name)
        .bind(&core.full_name)
        .bind(&core.email)
        .bind(&core.phone)
        .bind(core.number_of_people)
        .bind(&tour_date)
        .bind(&core.tour_date_slot)
        .bind(&core.start_date)
        .bind(&core.end_date)
        .bind(core.duration_days)
        .bind(&core.special_requests)
        .bind(booking.source())
        .bind(payment_option)
        .bind(total)
        .bind(advance)
        .bind(remaining)
        .bind(non_refundable)
        .bind(payment_status)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Set the booking status
    pub async fn update_status(&self, id: Uuid, status: BookingStatus) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))
    }

    /// Mark a booking confirmed after a verified payment, moving the payment
    /// status along with it.
    pub async fn confirm_payment(
        &self,
        id: Uuid,
        payment_status: PaymentStatus,
    ) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = 'confirmed', payment_status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payment_status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))
    }
}
