use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

use crate::models::{BookSummary, Genre};

/// Persistence operations the genre handlers depend on.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All genres ordered by name ascending.
    async fn list_genres(&self) -> Result<Vec<Genre>, AppError>;

    async fn find_genre(&self, id: &ObjectId) -> Result<Option<Genre>, AppError>;

    /// Exact, case-sensitive name match.
    async fn find_genre_by_name(&self, name: &str) -> Result<Option<Genre>, AppError>;

    async fn insert_genre(&self, genre: &Genre) -> Result<(), AppError>;

    /// Deleting an id that does not exist is not an error.
    async fn delete_genre(&self, id: &ObjectId) -> Result<(), AppError>;

    /// Books whose genre reference equals `genre_id`, projected to title and summary.
    async fn books_in_genre(&self, genre_id: &ObjectId) -> Result<Vec<BookSummary>, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}
