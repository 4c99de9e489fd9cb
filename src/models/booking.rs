//! Booking model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;

/// Payment arrangement selected at booking time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentOption {
    None,
    Partial,
    Full,
}

impl PaymentOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentOption::None => "none",
            PaymentOption::Partial => "partial",
            PaymentOption::Full => "full",
        }
    }
}

impl std::str::FromStr for PaymentOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(PaymentOption::None),
            "partial" => Ok(PaymentOption::Partial),
            "full" => Ok(PaymentOption::Full),
            _ => Err(format!("Invalid payment option: {}", s)),
        }
    }
}

/// How much of the booking amount has been collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Partial,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Paid => "paid",
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "partial" => Ok(PaymentStatus::Partial),
            "paid" => Ok(PaymentStatus::Paid),
            _ => Err(format!("Invalid payment status: {}", s)),
        }
    }
}

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            _ => Err(format!("Invalid status: {}", s)),
        }
    }
}

/// Which flow created the booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum BookingSource {
    Customer,
    AdminOffline,
}

impl BookingSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingSource::Customer => "customer",
            BookingSource::AdminOffline => "admin-offline",
        }
    }
}

impl std::str::FromStr for BookingSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(BookingSource::Customer),
            "admin-offline" => Ok(BookingSource::AdminOffline),
            _ => Err(format!("Invalid booking source: {}", s)),
        }
    }
}

// SQLx conversions for the status enums (all stored as TEXT)

macro_rules! impl_text_column {
    ($ty:ty) => {
        impl sqlx::Type<Postgres> for $ty {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<Postgres>>::type_info()
            }
        }

        impl<'r> Decode<'r, Postgres> for $ty {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let s: String = Decode::<Postgres>::decode(value)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl Encode<'_, Postgres> for $ty {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> sqlx::encode::IsNull {
                let s: String = self.as_str().to_string();
                <String as Encode<Postgres>>::encode(s, buf)
            }
        }
    };
}

impl_text_column!(PaymentOption);
impl_text_column!(PaymentStatus);
impl_text_column!(BookingStatus);
impl_text_column!(BookingSource);

/// Booking record
///
/// `tour_id` is a soft reference: deleting a tour leaves its bookings in
/// place with a dangling id. `tour_date` is the derived human-readable
/// descriptor; the structured date fields are kept alongside it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: uuid::Uuid,
    pub tour_id: uuid::Uuid,
    pub tour_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub number_of_people: i32,
    pub tour_date: String,
    pub tour_date_slot: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub duration_days: Option<i32>,
    pub special_requests: String,
    pub source: BookingSource,
    pub payment_option: PaymentOption,
    pub total_amount: Option<Decimal>,
    pub advance_amount: Option<Decimal>,
    pub remaining_amount: Option<Decimal>,
    pub is_advance_non_refundable: bool,
    pub payment_status: PaymentStatus,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields common to both booking flows
#[derive(Debug, Clone)]
pub struct NewBookingCore {
    pub tour_id: uuid::Uuid,
    pub tour_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub number_of_people: i32,
    pub tour_date_slot: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub duration_days: Option<i32>,
    /// Legacy free-text date, used when no slot or structured dates exist.
    pub tour_date: Option<String>,
    pub special_requests: String,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl NewBookingCore {
    /// Derive the human-readable date descriptor: prefer the explicit slot
    /// string, else synthesize `"{start} - {end}"`, else fall back to the
    /// legacy free-text field, else empty.
    pub fn derived_tour_date(&self) -> String {
        if let Some(slot) = non_empty(&self.tour_date_slot) {
            return slot.to_string();
        }
        if let (Some(start), Some(end)) = (non_empty(&self.start_date), non_empty(&self.end_date)) {
            return format!("{} - {}", start, end);
        }
        non_empty(&self.tour_date).unwrap_or_default().to_string()
    }
}

/// Payment arrangement submitted alongside a booking.
///
/// The customer flow sends this when the client has computed advance and
/// remaining amounts ahead of an online payment; operators send it when
/// recording an offline booking.
#[derive(Debug, Clone)]
pub struct PaymentSelection {
    pub payment_option: PaymentOption,
    pub total_amount: Option<Decimal>,
    pub advance_amount: Option<Decimal>,
    pub remaining_amount: Option<Decimal>,
    pub is_advance_non_refundable: bool,
    pub payment_status: Option<PaymentStatus>,
}

impl PaymentSelection {
    /// `advance + remaining` must equal `total` whenever all three amounts
    /// are recorded.
    pub fn validate_amounts(&self) -> Result<(), String> {
        if let (Some(total), Some(advance), Some(remaining)) =
            (self.total_amount, self.advance_amount, self.remaining_amount)
        {
            if advance + remaining != total {
                return Err(format!(
                    "advanceAmount ({}) + remainingAmount ({}) must equal totalAmount ({})",
                    advance, remaining, total
                ));
            }
        }
        Ok(())
    }
}

/// Booking creation input, discriminated by originating flow
#[derive(Debug, Clone)]
pub enum NewBooking {
    /// Customer-facing booking form; always starts out pending.
    Customer(NewBookingCore, Option<PaymentSelection>),
    /// Operator-entered offline booking; may start out confirmed.
    AdminOffline(NewBookingCore, PaymentSelection, BookingStatus),
}

impl NewBooking {
    pub fn core(&self) -> &NewBookingCore {
        match self {
            NewBooking::Customer(core, _) => core,
            NewBooking::AdminOffline(core, ..) => core,
        }
    }

    pub fn source(&self) -> BookingSource {
        match self {
            NewBooking::Customer(..) => BookingSource::Customer,
            NewBooking::AdminOffline(..) => BookingSource::AdminOffline,
        }
    }

    pub fn payment(&self) -> Option<&PaymentSelection> {
        match self {
            NewBooking::Customer(_, payment) => payment.as_ref(),
            NewBooking::AdminOffline(_, payment, _) => Some(payment),
        }
    }

    /// Initial booking status: customer bookings are always pending.
    pub fn initial_status(&self) -> BookingStatus {
        match self {
            NewBooking::Customer(..) => BookingStatus::Pending,
            NewBooking::AdminOffline(_, _, status) => *status,
        }
    }
}
