//! Payment order and verification endpoints

use axum::{extract::State, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::booking::Booking,
    services::gateway::GatewayOrder,
};

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub booking_id: Option<Uuid>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub success: bool,
    pub order: GatewayOrder,
    pub key_id: String,
}

/// Verification payload, named the way the gateway's checkout posts it.
#[derive(Deserialize, ToSchema)]
pub struct VerifyPaymentRequest {
    pub razorpay_order_id: Option<String>,
    pub razorpay_payment_id: Option<String>,
    pub razorpay_signature: Option<String>,
    #[serde(rename = "bookingId")]
    pub booking_id: Option<Uuid>,
}

#[derive(Serialize, ToSchema)]
pub struct VerifyResponse {
    pub success: bool,
    pub message: String,
    pub booking: Booking,
}

/// Create a gateway order for a booking's payment
#[utoipa::path(
    post,
    path = "/payment/create-order",
    tag = "payments",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order created", body = OrderResponse)
    )
)]
pub async fn create_order(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> AppResult<Json<OrderResponse>> {
    let amount = request
        .amount
        .ok_or_else(|| AppError::Validation("amount is required".to_string()))?;
    let booking_id = request
        .booking_id
        .ok_or_else(|| AppError::Validation("bookingId is required".to_string()))?;

    let (order, key_id) = state
        .services
        .payments
        .create_order(amount, request.currency, booking_id)
        .await?;

    Ok(Json(OrderResponse {
        success: true,
        order,
        key_id,
    }))
}

/// Verify a completed checkout's signature and confirm the booking
#[utoipa::path(
    post,
    path = "/payment/verify",
    tag = "payments",
    request_body = VerifyPaymentRequest,
    responses(
        (status = 200, description = "Verification result", body = VerifyResponse)
    )
)]
pub async fn verify_payment(
    State(state): State<crate::AppState>,
    Json(request): Json<VerifyPaymentRequest>,
) -> AppResult<Json<VerifyResponse>> {
    let order_id = request
        .razorpay_order_id
        .ok_or_else(|| AppError::Validation("razorpay_order_id is required".to_string()))?;
    let payment_id = request
        .razorpay_payment_id
        .ok_or_else(|| AppError::Validation("razorpay_payment_id is required".to_string()))?;
    let signature = request
        .razorpay_signature
        .ok_or_else(|| AppError::Validation("razorpay_signature is required".to_string()))?;
    let booking_id = request
        .booking_id
        .ok_or_else(|| AppError::Validation("bookingId is required".to_string()))?;

    let booking = state
        .services
        .payments
        .verify_payment(&order_id, &payment_id, &signature, booking_id)
        .await?;

    Ok(Json(VerifyResponse {
        success: true,
        message: "Payment verified successfully".to_string(),
        booking,
    }))
}
