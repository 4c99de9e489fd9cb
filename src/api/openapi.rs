//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, bookings, health, payments, tours};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Namgail Tours API",
        version = "1.0.0",
        description = "Tour booking and payment REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Namgail Tours", email = "contact@namgailtours.com")
    ),
    servers(
        (url = "/api", description = "API root")
    ),
    paths(
        // Health
        health::health_check,
        // Auth
        auth::admin_login,
        // Tours
        tours::add_tour,
        tours::update_tour,
        tours::delete_tour,
        tours::list_tours,
        tours::get_tour,
        tours::list_tours_by_type,
        // Bookings
        bookings::create_booking,
        bookings::list_tour_bookings,
        bookings::list_all_bookings,
        bookings::count_tour_bookings,
        bookings::update_booking_status,
        // Payments
        payments::create_order,
        payments::verify_payment,
    ),
    components(
        schemas(
            // Auth
            auth::AdminLoginRequest,
            auth::AdminLoginResponse,
            // Tours
            crate::models::tour::Tour,
            crate::models::tour::TourType,
            tours::TourResponse,
            tours::ToursResponse,
            tours::DeleteResponse,
            // Bookings
            crate::models::booking::Booking,
            crate::models::booking::BookingSource,
            crate::models::booking::BookingStatus,
            crate::models::booking::PaymentOption,
            crate::models::booking::PaymentStatus,
            bookings::CreateBookingRequest,
            bookings::UpdateStatusRequest,
            bookings::BookingResponse,
            bookings::BookingsResponse,
            bookings::BookingCountResponse,
            // Payments
            payments::CreateOrderRequest,
            payments::OrderResponse,
            payments::VerifyPaymentRequest,
            payments::VerifyResponse,
            crate::services::gateway::GatewayOrder,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Admin authentication"),
        (name = "tours", description = "Tour catalog management"),
        (name = "bookings", description = "Booking management"),
        (name = "payments", description = "Payment orders and verification")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
