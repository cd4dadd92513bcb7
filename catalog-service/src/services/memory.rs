use crate::models::{Book, BookSummary, Genre};
use crate::services::CatalogStore;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local store used for local runs and handler tests.
#[derive(Clone, Default)]
pub struct MemoryStore {
    genres: Arc<RwLock<Vec<Genre>>>,
    books: Arc<RwLock<Vec<Book>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a book. Books are never written through [`CatalogStore`].
    pub async fn insert_book(&self, book: Book) {
        self.books.write().await.push(book);
    }

    pub async fn genre_count(&self) -> usize {
        self.genres.read().await.len()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_genres(&self) -> Result<Vec<Genre>, AppError> {
        let mut genres = self.genres.read().await.clone();
        // Byte-wise comparison, the same ordering MongoDB applies without a collation.
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genres)
    }

    async fn find_genre(&self, id: &ObjectId) -> Result<Option<Genre>, AppError> {
        Ok(self.genres.read().await.iter().find(|g| &g.id == id).cloned())
    }

    async fn find_genre_by_name(&self, name: &str) -> Result<Option<Genre>, AppError> {
        Ok(self
            .genres
            .read()
            .await
            .iter()
            .find(|g| g.name == name)
            .cloned())
    }

    async fn insert_genre(&self, genre: &Genre) -> Result<(), AppError> {
        let mut genres = self.genres.write().await;
        if genres.iter().any(|g| g.id == genre.id) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "Duplicate genre id: {}",
                genre.id
            )));
        }
        genres.push(genre.clone());
        Ok(())
    }

    async fn delete_genre(&self, id: &ObjectId) -> Result<(), AppError> {
        self.genres.write().await.retain(|g| &g.id != id);
        Ok(())
    }

    async fn books_in_genre(&self, genre_id: &ObjectId) -> Result<Vec<BookSummary>, AppError> {
        Ok(self
            .books
            .read()
            .await
            .iter()
            .filter(|b| b.genre.as_ref() == Some(genre_id))
            .map(BookSummary::from)
            .collect())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
