//! Tours repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::tour::{Tour, TourInput, TourType},
};

#[derive(Clone)]
pub struct ToursRepository {
    pool: Pool<Postgres>,
}

impl ToursRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get tour by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Tour> {
        sqlx::query_as::<_, Tour>("SELECT * FROM tours WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Tour not found".to_string()))
    }

    /// List all tours, newest first
    pub async fn list_all(&self) -> AppResult<Vec<Tour>> {
        let tours = sqlx::query_as::<_, Tour>("SELECT * FROM tours ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(tours)
    }

    /// List tours of one type, optionally only published ones
    pub async fn list_by_type(&self, tour_type: TourType, planned_only: bool) -> AppResult<Vec<Tour>> {
        let tours = sqlx::query_as::<_, Tour>(
            r#"
            SELECT * FROM tours
            WHERE tour_type = $1 AND ($2 = false OR is_planned = true)
            ORDER BY created_at DESC
            "#,
        )
        .bind(tour_type)
        .bind(planned_only)
        .fetch_all(&self.pool)
        .await?;
        Ok(tours)
    }

    /// Create a new tour
    pub async fn create(&self, input: &TourInput, image_url: Option<&str>) -> AppResult<Tour> {
        let tour = sqlx::query_as::<_, Tour>(
            r#"
            INSERT INTO tours (
                id, tour_name, tour_type, start_date, end_date, price,
                available_seats, description, highlights, image, is_planned
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.tour_name)
        .bind(input.tour_type)
        .bind(&input.start_date)
        .bind(&input.end_date)
        .bind(input.price)
        .bind(input.available_seats)
        .bind(&input.description)
        .bind(&input.highlights)
        .bind(image_url)
        .bind(input.is_planned)
        .fetch_one(&self.pool)
        .await?;

        Ok(tour)
    }

    /// Update an existing tour. When `image_url` is `None` the stored image
    /// reference is kept.
    pub async fn update(
        &self,
        id: Uuid,
        input: &TourInput,
        image_url: Option<&str>,
    ) -> AppResult<Tour> {
        sqlx::query_as::<_, Tour>(
            r#"
            UPDATE tours SET
                tour_name = $2, tour_type = $3, start_date = $4, end_date = $5,
                price = $6, available_seats = $7, description = $8,
                highlights = $9, image = COALESCE($10, image), is_planned = $11,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.tour_name)
        .bind(input.tour_type)
        .bind(&input.start_date)
        .bind(&input.end_date)
        .bind(input.price)
        .bind(input.available_seats)
        .bind(&input.description)
        .bind(&input.highlights)
        .bind(image_url)
        .bind(input.is_planned)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Tour not found".to_string()))
    }

    /// Hard delete. Bookings are not cascaded; they keep a dangling tour id.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM tours WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Tour not found".to_string()));
        }
        Ok(())
    }
}
