//! Email service for booking confirmation notifications

use lettre::{
    message::{header::ContentType, Mailbox, Message},
    transport::smtp::authentication::Credentials,
    SmtpTransport, Transport,
};
use std::str::FromStr;

use crate::{
    config::EmailConfig,
    error::{AppError, AppResult},
    models::booking::{Booking, PaymentOption},
};

#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Send the confirmation pair for a confirmed booking: one email to the
    /// customer and one alert to the operator.
    pub async fn send_booking_confirmation(&self, booking: &Booking) -> AppResult<()> {
        let payment_line = payment_summary(booking);
        let subject = format!("Booking Confirmed | {} | Namgail Tours", booking.tour_name);

        self.send_html(
            &booking.email,
            &subject,
            &customer_template(booking, &payment_line),
        )?;

        let operator = self
            .config
            .operator_email
            .as_deref()
            .unwrap_or(&self.config.smtp_from);
        self.send_html(
            operator,
            &format!("ADMIN - {}", subject),
            &operator_template(booking, &payment_line),
        )?;

        Ok(())
    }

    fn send_html(&self, to: &str, subject: &str, html: &str) -> AppResult<()> {
        let from_name = self
            .config
            .smtp_from_name
            .as_deref()
            .unwrap_or("Namgail Tours");
        let from_mailbox = Mailbox::from_str(&format!("{} <{}>", from_name, self.config.smtp_from))
            .map_err(|e| AppError::Internal(format!("Invalid from address: {}", e)))?;

        let to_mailbox = Mailbox::from_str(to)
            .map_err(|e| AppError::Internal(format!("Invalid to address: {}", e)))?;

        let email = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to build email: {}", e)))?;

        let mailer_builder = if self.config.smtp_use_tls {
            SmtpTransport::starttls_relay(&self.config.smtp_host)
                .map_err(|e| AppError::Internal(format!("Failed to create SMTP transport: {}", e)))?
        } else {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
        }
        .port(self.config.smtp_port);

        let mailer_builder = if let (Some(username), Some(password)) =
            (&self.config.smtp_username, &self.config.smtp_password)
        {
            mailer_builder.credentials(Credentials::new(username.clone(), password.clone()))
        } else {
            mailer_builder
        };

        mailer_builder
            .build()
            .send(&email)
            .map_err(|e| AppError::Internal(format!("Failed to send email: {}", e)))?;

        Ok(())
    }
}

/// One-line description of the payment arrangement for the templates
pub fn payment_summary(booking: &Booking) -> String {
    let amount = |value: Option<rust_decimal::Decimal>| {
        value.unwrap_or_default().to_string()
    };

    match booking.payment_option {
        PaymentOption::Partial => format!(
            "30% advance paid (₹{}), remaining ₹{} at tour start. The advance is non-refundable.",
            amount(booking.advance_amount),
            amount(booking.remaining_amount),
        ),
        PaymentOption::Full => format!(
            "Full payment received (₹{})",
            amount(booking.total_amount.or(booking.advance_amount)),
        ),
        PaymentOption::None => "Payment to be collected offline".to_string(),
    }
}

fn date_range(booking: &Booking) -> String {
    format!(
        "{} to {}",
        booking.start_date.as_deref().unwrap_or("-"),
        booking.end_date.as_deref().unwrap_or("-"),
    )
}

fn customer_template(booking: &Booking, payment_line: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<body style="background:#f4f6f8;font-family:Arial,Helvetica,sans-serif;">
  <div style="max-width:620px;margin:30px auto;background:#fff;border-radius:10px;overflow:hidden;">
    <div style="background:#0f766e;color:#fff;padding:22px;text-align:center;">
      <h1>Booking Confirmed</h1>
      <p>Namgail Tours</p>
    </div>
    <div style="padding:26px;color:#333;">
      <p>Jullay <strong>{full_name}</strong>,</p>
      <h2>Tour Details</h2>
      <table style="width:100%;font-size:14px;">
        <tr><td>Tour</td><td>{tour_name}</td></tr>
        <tr><td>Dates</td><td>{dates}</td></tr>
        <tr><td>Guests</td><td>{guests}</td></tr>
      </table>
      <h2>Payment</h2>
      <p>{payment_line}</p>
      <p style="margin-top:20px;">Warm regards,<br /><strong>Namgail Tours Team</strong></p>
    </div>
  </div>
</body>
</html>"#,
        full_name = booking.full_name,
        tour_name = booking.tour_name,
        dates = date_range(booking),
        guests = booking.number_of_people,
        payment_line = payment_line,
    )
}

fn operator_template(booking: &Booking, payment_line: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<body style="background:#f4f6f8;font-family:Arial,Helvetica,sans-serif;">
  <div style="max-width:620px;margin:30px auto;background:#fff;padding:26px;border-radius:10px;">
    <h1 style="color:#b91c1c;font-size:20px;">New Booking Confirmed</h1>
    <table style="width:100%;font-size:14px;">
      <tr><td>Tour</td><td>{tour_name}</td></tr>
      <tr><td>Dates</td><td>{dates}</td></tr>
      <tr><td>Guests</td><td>{guests}</td></tr>
      <tr><td>Customer</td><td>{full_name}</td></tr>
      <tr><td>Phone</td><td>{phone}</td></tr>
    </table>
    <p><strong>Payment:</strong> {payment_line}</p>
    <p><strong>Booking ID:</strong> {id}</p>
  </div>
</body>
</html>"#,
        tour_name = booking.tour_name,
        dates = date_range(booking),
        guests = booking.number_of_people,
        full_name = booking.full_name,
        phone = booking.phone,
        payment_line = payment_line,
        id = booking.id,
    )
}
