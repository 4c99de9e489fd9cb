//! Tour catalog endpoints

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::tour::{Tour, TourInput, TourType},
    services::storage::ImageUpload,
};

use super::AdminAccess;

#[derive(Serialize, ToSchema)]
pub struct TourResponse {
    pub success: bool,
    pub tour: Tour,
}

#[derive(Serialize, ToSchema)]
pub struct ToursResponse {
    pub success: bool,
    pub tours: Vec<Tour>,
}

#[derive(Serialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
}

#[derive(Deserialize)]
pub struct TypeFilterParams {
    pub planned: Option<bool>,
}

/// Text fields collected from the admin add/update form
#[derive(Default)]
struct TourForm {
    tour_name: Option<String>,
    tour_type: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    price: Option<String>,
    available_seats: Option<String>,
    description: Option<String>,
    highlights: Option<String>,
    is_planned: Option<String>,
}

impl TourForm {
    fn require(value: Option<String>, field: &str) -> AppResult<String> {
        value
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::Validation(format!("{} is required", field)))
    }

    fn into_input(self) -> AppResult<TourInput> {
        let tour_type: TourType = Self::require(self.tour_type, "tourType")?
            .parse()
            .map_err(AppError::Validation)?;

        let price: Decimal = Self::require(self.price, "price")?
            .parse()
            .map_err(|_| AppError::Validation("price must be a number".to_string()))?;

        let available_seats: i32 = Self::require(self.available_seats, "availableSeats")?
            .parse()
            .map_err(|_| AppError::Validation("availableSeats must be an integer".to_string()))?;

        Ok(TourInput {
            tour_name: Self::require(self.tour_name, "tourName")?,
            tour_type,
            start_date: Self::require(self.start_date, "startDate")?,
            end_date: Self::require(self.end_date, "endDate")?,
            price,
            available_seats,
            description: Self::require(self.description, "description")?,
            highlights: Self::require(self.highlights, "highlights")?,
            is_planned: self.is_planned.as_deref() == Some("true"),
        })
    }
}

async fn parse_tour_form(mut multipart: Multipart) -> AppResult<(TourInput, Option<ImageUpload>)> {
    let mut form = TourForm::default();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "image" {
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read image: {}", e)))?;
            if !bytes.is_empty() {
                image = Some(ImageUpload {
                    bytes: bytes.to_vec(),
                    content_type,
                });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid form field {}: {}", name, e)))?;

        match name.as_str() {
            "tourName" => form.tour_name = Some(value),
            "tourType" => form.tour_type = Some(value),
            "startDate" => form.start_date = Some(value),
            "endDate" => form.end_date = Some(value),
            "price" => form.price = Some(value),
            "availableSeats" => form.available_seats = Some(value),
            "description" => form.description = Some(value),
            "highlights" => form.highlights = Some(value),
            "isPlanned" => form.is_planned = Some(value),
            _ => {}
        }
    }

    Ok((form.into_input()?, image))
}

/// Add a new tour with an optional image upload
#[utoipa::path(
    post,
    path = "/tour/add",
    tag = "tours",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Tour created", body = TourResponse)
    )
)]
pub async fn add_tour(
    State(state): State<crate::AppState>,
    AdminAccess(_claims): AdminAccess,
    multipart: Multipart,
) -> AppResult<Json<TourResponse>> {
    let (input, image) = parse_tour_form(multipart).await?;
    let tour = state.services.catalog.create_tour(input, image).await?;

    Ok(Json(TourResponse {
        success: true,
        tour,
    }))
}

/// Update a tour, replacing the image only when a new one is uploaded
#[utoipa::path(
    put,
    path = "/tour/update/{id}",
    tag = "tours",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Tour ID")),
    responses(
        (status = 200, description = "Tour updated", body = TourResponse)
    )
)]
pub async fn update_tour(
    State(state): State<crate::AppState>,
    AdminAccess(_claims): AdminAccess,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<TourResponse>> {
    let (input, image) = parse_tour_form(multipart).await?;
    let tour = state.services.catalog.update_tour(id, input, image).await?;

    Ok(Json(TourResponse {
        success: true,
        tour,
    }))
}

/// Delete a tour
#[utoipa::path(
    delete,
    path = "/tour/delete/{id}",
    tag = "tours",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Tour ID")),
    responses(
        (status = 200, description = "Tour deleted", body = DeleteResponse)
    )
)]
pub async fn delete_tour(
    State(state): State<crate::AppState>,
    AdminAccess(_claims): AdminAccess,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DeleteResponse>> {
    state.services.catalog.delete_tour(id).await?;
    Ok(Json(DeleteResponse { success: true }))
}

/// List all tours
#[utoipa::path(
    get,
    path = "/tour/all",
    tag = "tours",
    responses(
        (status = 200, description = "All tours", body = ToursResponse)
    )
)]
pub async fn list_tours(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ToursResponse>> {
    let tours = state.services.catalog.list_tours().await?;
    Ok(Json(ToursResponse {
        success: true,
        tours,
    }))
}

/// Get a single tour
#[utoipa::path(
    get,
    path = "/tour/{id}",
    tag = "tours",
    params(("id" = Uuid, Path, description = "Tour ID")),
    responses(
        (status = 200, description = "Tour details", body = TourResponse)
    )
)]
pub async fn get_tour(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<TourResponse>> {
    let tour = state.services.catalog.get_tour(id).await?;
    Ok(Json(TourResponse {
        success: true,
        tour,
    }))
}

/// List tours of one type, optionally only published ones
#[utoipa::path(
    get,
    path = "/tour/type/{tour_type}",
    tag = "tours",
    params(
        ("tour_type" = String, Path, description = "Tour type"),
        ("planned" = Option<bool>, Query, description = "Only published tours")
    ),
    responses(
        (status = 200, description = "Matching tours", body = ToursResponse)
    )
)]
pub async fn list_tours_by_type(
    State(state): State<crate::AppState>,
    Path(tour_type): Path<String>,
    Query(params): Query<TypeFilterParams>,
) -> AppResult<Json<ToursResponse>> {
    let tour_type: TourType = tour_type.parse().map_err(AppError::Validation)?;
    let tours = state
        .services
        .catalog
        .list_tours_by_type(tour_type, params.planned.unwrap_or(false))
        .await?;

    Ok(Json(ToursResponse {
        success: true,
        tours,
    }))
}
