//! Booking-payment workflow service
//!
//! Coordinates the sequence: create payment order for a pending booking,
//! verify the gateway callback signature, confirm the booking, and send
//! the confirmation emails.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::booking::{Booking, PaymentOption, PaymentStatus},
    repository::Repository,
    services::{
        email::EmailService,
        gateway::{GatewayOrder, PaymentGateway},
    },
};

#[derive(Clone)]
pub struct PaymentsService {
    repository: Repository,
    gateway: PaymentGateway,
    email: EmailService,
    default_currency: String,
}

impl PaymentsService {
    pub fn new(
        repository: Repository,
        gateway: PaymentGateway,
        email: EmailService,
        default_currency: String,
    ) -> Self {
        Self {
            repository,
            gateway,
            email,
            default_currency,
        }
    }

    /// Create a gateway order for an existing booking.
    ///
    /// The amount is in the principal currency unit and converted to the
    /// gateway's minor unit here. The booking itself is not touched; it
    /// stays pending until verification succeeds.
    pub async fn create_order(
        &self,
        amount: Decimal,
        currency: Option<String>,
        booking_id: Uuid,
    ) -> AppResult<(GatewayOrder, String)> {
        if amount <= Decimal::ZERO {
            return Err(AppError::Validation(
                "amount must be a positive value".to_string(),
            ));
        }

        let booking = self.repository.bookings.get_by_id(booking_id).await?;

        let amount_minor = (amount * Decimal::from(100))
            .round()
            .to_i64()
            .ok_or_else(|| AppError::Validation("amount out of range".to_string()))?;

        let currency = currency.unwrap_or_else(|| self.default_currency.clone());

        // Booking metadata travels as order notes for reconciliation.
        let notes = serde_json::json!({
            "bookingId": booking.id,
            "tourName": booking.tour_name,
            "fullName": booking.full_name,
            "email": booking.email,
            "phone": booking.phone,
        });

        let receipt = format!("booking_{}", booking_id);
        let order = self
            .gateway
            .create_order(amount_minor, &currency, &receipt, notes)
            .await?;

        let key_id = self.gateway.key_id()?.to_string();
        Ok((order, key_id))
    }

    /// Verify a payment callback and confirm the booking.
    ///
    /// On a signature match the booking status moves to confirmed and the
    /// payment status follows the payment option recorded at creation time.
    /// Notification is fire-and-forget: a send failure is logged and never
    /// surfaced to the caller.
    pub async fn verify_payment(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
        booking_id: Uuid,
    ) -> AppResult<Booking> {
        if order_id.is_empty() || payment_id.is_empty() || signature.is_empty() {
            return Err(AppError::Validation(
                "Missing payment verification fields".to_string(),
            ));
        }

        if !self
            .gateway
            .verify_signature(order_id, payment_id, signature)?
        {
            return Err(AppError::SignatureMismatch);
        }

        let booking = self.repository.bookings.get_by_id(booking_id).await?;
        let payment_status = settled_payment_status(booking.payment_option);

        let updated = self
            .repository
            .bookings
            .confirm_payment(booking_id, payment_status)
            .await?;

        let email = self.email.clone();
        let confirmed = updated.clone();
        tokio::spawn(async move {
            if let Err(e) = email.send_booking_confirmation(&confirmed).await {
                tracing::error!(booking_id = %confirmed.id, "Booking confirmation email failed: {}", e);
            }
        });

        Ok(updated)
    }
}

/// Payment status reached once the gateway has collected the ordered
/// amount: a partial arrangement stays partial, everything else is paid
/// in full.
fn settled_payment_status(option: PaymentOption) -> PaymentStatus {
    match option {
        PaymentOption::Partial => PaymentStatus::Partial,
        PaymentOption::Full | PaymentOption::None => PaymentStatus::Paid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settled_status_follows_payment_option() {
        assert_eq!(
            settled_payment_status(PaymentOption::Partial),
            PaymentStatus::Partial
        );
        assert_eq!(
            settled_payment_status(PaymentOption::Full),
            PaymentStatus::Paid
        );
        assert_eq!(
            settled_payment_status(PaymentOption::None),
            PaymentStatus::Paid
        );
    }

    #[test]
    fn minor_unit_conversion_rounds_to_paise() {
        use rust_decimal_macros::dec;

        let amount = dec!(15000);
        let minor = (amount * Decimal::from(100)).round().to_i64().unwrap();
        assert_eq!(minor, 1_500_000);

        let fractional = dec!(499.995);
        let minor = (fractional * Decimal::from(100)).round().to_i64().unwrap();
        assert_eq!(minor, 50_000);
    }
}
