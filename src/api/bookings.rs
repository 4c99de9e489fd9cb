//! Booking endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::booking::{
        Booking, BookingSource, BookingStatus, NewBooking, NewBookingCore, PaymentOption,
        PaymentSelection, PaymentStatus,
    },
};

use super::AdminAccess;

/// Booking creation payload.
///
/// `source` discriminates the two creation flows: the customer form
/// (default) and the operator's offline entry, which may carry payment
/// details and an initial status.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub tour_id: Uuid,
    pub tour_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub number_of_people: i32,
    pub tour_date_slot: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub duration_days: Option<i32>,
    /// Legacy free-text date field
    pub tour_date: Option<String>,
    pub special_requests: Option<String>,
    pub source: Option<BookingSource>,
    pub payment_option: Option<PaymentOption>,
    pub total_amount: Option<Decimal>,
    pub advance_amount: Option<Decimal>,
    pub remaining_amount: Option<Decimal>,
    pub is_advance_non_refundable: Option<bool>,
    pub payment_status: Option<PaymentStatus>,
    pub status: Option<BookingStatus>,
}

impl CreateBookingRequest {
    fn into_new_booking(self) -> AppResult<NewBooking> {
        let core = NewBookingCore {
            tour_id: self.tour_id,
            tour_name: self.tour_name,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            number_of_people: self.number_of_people,
            tour_date_slot: self.tour_date_slot,
            start_date: self.start_date,
            end_date: self.end_date,
            duration_days: self.duration_days,
            tour_date: self.tour_date,
            special_requests: self.special_requests.unwrap_or_default(),
        };

        let payment = self.payment_option.map(|payment_option| PaymentSelection {
            payment_option,
            total_amount: self.total_amount,
            advance_amount: self.advance_amount,
            remaining_amount: self.remaining_amount,
            is_advance_non_refundable: self.is_advance_non_refundable.unwrap_or(false),
            payment_status: self.payment_status,
        });

        match self.source.unwrap_or(BookingSource::Customer) {
            BookingSource::Customer => {
                if self.status.is_some() {
                    return Err(AppError::Validation(
                        "status cannot be set on a customer booking".to_string(),
                    ));
                }
                Ok(NewBooking::Customer(core, payment))
            }
            BookingSource::AdminOffline => {
                let payment = payment.ok_or_else(|| {
                    AppError::Validation(
                        "paymentOption is required for an offline booking".to_string(),
                    )
                })?;
                let status = self.status.unwrap_or(BookingStatus::Pending);
                if status == BookingStatus::Cancelled {
                    return Err(AppError::Validation(
                        "an offline booking cannot start out cancelled".to_string(),
                    ));
                }
                Ok(NewBooking::AdminOffline(core, payment, status))
            }
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct BookingResponse {
    pub success: bool,
    pub booking: Booking,
}

#[derive(Serialize, ToSchema)]
pub struct BookingsResponse {
    pub success: bool,
    pub bookings: Vec<Booking>,
}

#[derive(Serialize, ToSchema)]
pub struct BookingCountResponse {
    pub success: bool,
    pub count: i64,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub booking_id: Uuid,
    /// One of `pending`, `confirmed`, `cancelled`
    pub status: String,
}

/// Create a booking for a tour
#[utoipa::path(
    post,
    path = "/tour/booking/add",
    tag = "bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 200, description = "Booking created", body = BookingResponse)
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> AppResult<Json<BookingResponse>> {
    let booking = state
        .services
        .bookings
        .create_booking(request.into_new_booking()?)
        .await?;

    Ok(Json(BookingResponse {
        success: true,
        booking,
    }))
}

/// List bookings for one tour
#[utoipa::path(
    get,
    path = "/tour/booking/{tour_id}",
    tag = "bookings",
    params(("tour_id" = Uuid, Path, description = "Tour ID")),
    responses(
        (status = 200, description = "Bookings for the tour", body = BookingsResponse)
    )
)]
pub async fn list_tour_bookings(
    State(state): State<crate::AppState>,
    Path(tour_id): Path<Uuid>,
) -> AppResult<Json<BookingsResponse>> {
    let bookings = state.services.bookings.list_for_tour(tour_id).await?;
    Ok(Json(BookingsResponse {
        success: true,
        bookings,
    }))
}

/// List all bookings
#[utoipa::path(
    get,
    path = "/tour/bookings/all",
    tag = "bookings",
    responses(
        (status = 200, description = "All bookings", body = BookingsResponse)
    )
)]
pub async fn list_all_bookings(
    State(state): State<crate::AppState>,
) -> AppResult<Json<BookingsResponse>> {
    let bookings = state.services.bookings.list_all().await?;
    Ok(Json(BookingsResponse {
        success: true,
        bookings,
    }))
}

/// Count bookings for one tour
#[utoipa::path(
    get,
    path = "/tour/booking/count/{tour_id}",
    tag = "bookings",
    params(("tour_id" = Uuid, Path, description = "Tour ID")),
    responses(
        (status = 200, description = "Booking count", body = BookingCountResponse)
    )
)]
pub async fn count_tour_bookings(
    State(state): State<crate::AppState>,
    Path(tour_id): Path<Uuid>,
) -> AppResult<Json<BookingCountResponse>> {
    let count = state.services.bookings.count_for_tour(tour_id).await?;
    Ok(Json(BookingCountResponse {
        success: true,
        count,
    }))
}

/// Change a booking's status (admin only)
#[utoipa::path(
    put,
    path = "/tour/booking/status",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = BookingResponse),
        (status = 401, description = "Missing credential"),
        (status = 403, description = "Invalid credential")
    )
)]
pub async fn update_booking_status(
    State(state): State<crate::AppState>,
    AdminAccess(_claims): AdminAccess,
    Json(request): Json<UpdateStatusRequest>,
) -> AppResult<Json<BookingResponse>> {
    let status: BookingStatus = request
        .status
        .parse()
        .map_err(AppError::Validation)?;

    let booking = state
        .services
        .bookings
        .update_status(request.booking_id, status)
        .await?;

    Ok(Json(BookingResponse {
        success: true,
        booking,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateBookingRequest {
        CreateBookingRequest {
            tour_id: Uuid::new_v4(),
            tour_name: "General Tour".to_string(),
            full_name: "A B".to_string(),
            email: "a@b.com".to_string(),
            phone: "123".to_string(),
            number_of_people: 2,
            tour_date_slot: None,
            start_date: Some("2025-06-01".to_string()),
            end_date: Some("2025-06-05".to_string()),
            duration_days: None,
            tour_date: None,
            special_requests: None,
            source: None,
            payment_option: None,
            total_amount: None,
            advance_amount: None,
            remaining_amount: None,
            is_advance_non_refundable: None,
            payment_status: None,
            status: None,
        }
    }

    #[test]
    fn defaults_to_customer_booking() {
        let booking = request().into_new_booking().unwrap();
        assert_eq!(booking.source(), BookingSource::Customer);
        assert_eq!(booking.initial_status(), BookingStatus::Pending);
        assert_eq!(
            booking.core().derived_tour_date(),
            "2025-06-01 - 2025-06-05"
        );
    }

    #[test]
    fn customer_booking_cannot_preset_status() {
        let mut bad = request();
        bad.status = Some(BookingStatus::Confirmed);
        assert!(bad.into_new_booking().is_err());
    }

    #[test]
    fn offline_booking_requires_payment_option() {
        let mut offline = request();
        offline.source = Some(BookingSource::AdminOffline);
        assert!(offline.into_new_booking().is_err());
    }

    #[test]
    fn offline_booking_may_start_confirmed() {
        let mut offline = request();
        offline.source = Some(BookingSource::AdminOffline);
        offline.payment_option = Some(PaymentOption::Full);
        offline.status = Some(BookingStatus::Confirmed);

        let booking = offline.into_new_booking().unwrap();
        assert_eq!(booking.source(), BookingSource::AdminOffline);
        assert_eq!(booking.initial_status(), BookingStatus::Confirmed);
    }

    #[test]
    fn offline_booking_cannot_start_cancelled() {
        let mut offline = request();
        offline.source = Some(BookingSource::AdminOffline);
        offline.payment_option = Some(PaymentOption::Full);
        offline.status = Some(BookingStatus::Cancelled);
        assert!(offline.into_new_booking().is_err());
    }
}
