//! Tour catalog service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::tour::{Tour, TourInput, TourType},
    repository::Repository,
    services::storage::{ImageUpload, StorageService},
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    storage: StorageService,
}

impl CatalogService {
    pub fn new(repository: Repository, storage: StorageService) -> Self {
        Self { repository, storage }
    }

    /// Create a tour, uploading the image first when one was provided
    pub async fn create_tour(
        &self,
        input: TourInput,
        image: Option<ImageUpload>,
    ) -> AppResult<Tour> {
        input.validate_dates().map_err(AppError::Validation)?;

        let image_url = match image {
            Some(image) => Some(self.storage.upload_image(image).await?),
            None => None,
        };

        self.repository.tours.create(&input, image_url.as_deref()).await
    }

    /// Update a tour; the stored image is kept when no new one is uploaded
    pub async fn update_tour(
        &self,
        id: Uuid,
        input: TourInput,
        image: Option<ImageUpload>,
    ) -> AppResult<Tour> {
        input.validate_dates().map_err(AppError::Validation)?;

        // Resolve first so a missing tour fails before any upload side effect.
        self.repository.tours.get_by_id(id).await?;

        let image_url = match image {
            Some(image) => Some(self.storage.upload_image(image).await?),
            None => None,
        };

        self.repository.tours.update(id, &input, image_url.as_deref()).await
    }

    /// Hard delete a tour. Existing bookings keep their dangling tour id.
    pub async fn delete_tour(&self, id: Uuid) -> AppResult<()> {
        self.repository.tours.delete(id).await
    }

    /// Get tour by ID
    pub async fn get_tour(&self, id: Uuid) -> AppResult<Tour> {
        self.repository.tours.get_by_id(id).await
    }

    /// List all tours
    pub async fn list_tours(&self) -> AppResult<Vec<Tour>> {
        self.repository.tours.list_all().await
    }

    /// List tours of one type, optionally restricted to published ones
    pub async fn list_tours_by_type(
        &self,
        tour_type: TourType,
        planned_only: bool,
    ) -> AppResult<Vec<Tour>> {
        self.repository.tours.list_by_type(tour_type, planned_only).await
    }
}
