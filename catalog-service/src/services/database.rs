use crate::models::{Book, BookSummary, Genre};
use crate::services::CatalogStore;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::{FindOptions, IndexOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;

#[derive(Clone)]
pub struct CatalogDb {
    client: MongoClient,
    db: Database,
}

impl CatalogDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for catalog-service");

        // Not unique: create relies on a lookup before insert.
        let name_index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder().name("name_idx".to_string()).build())
            .build();

        self.genres()
            .create_index(name_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create genres name index: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;

        let genre_ref_index = IndexModel::builder()
            .keys(doc! { "genre": 1 })
            .options(
                IndexOptions::builder()
                    .name("genre_idx".to_string())
                    .sparse(true)
                    .build(),
            )
            .build();

        self.books()
            .create_index(genre_ref_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create books genre index: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;

        tracing::info!("Successfully created all MongoDB indexes");
        Ok(())
    }

    pub fn genres(&self) -> Collection<Genre> {
        self.db.collection("genres")
    }

    pub fn books(&self) -> Collection<Book> {
        self.db.collection("books")
    }

    fn book_summaries(&self) -> Collection<BookSummary> {
        self.db.collection("books")
    }
}

#[async_trait]
impl CatalogStore for CatalogDb {
    async fn list_genres(&self) -> Result<Vec<Genre>, AppError> {
        let find_options = FindOptions::builder().sort(doc! { "name": 1 }).build();

        let cursor = self
            .genres()
            .find(doc! {}, find_options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list genres: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;

        cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect genres: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })
    }

    async fn find_genre(&self, id: &ObjectId) -> Result<Option<Genre>, AppError> {
        self.genres()
            .find_one(doc! { "_id": *id }, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to find genre: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })
    }

    async fn find_genre_by_name(&self, name: &str) -> Result<Option<Genre>, AppError> {
        self.genres()
            .find_one(doc! { "name": name }, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to find genre by name: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })
    }

    async fn insert_genre(&self, genre: &Genre) -> Result<(), AppError> {
        self.genres().insert_one(genre, None).await.map_err(|e| {
            tracing::error!("Failed to insert genre: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;
        Ok(())
    }

    async fn delete_genre(&self, id: &ObjectId) -> Result<(), AppError> {
        self.genres()
            .delete_one(doc! { "_id": *id }, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete genre: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }

    async fn books_in_genre(&self, genre_id: &ObjectId) -> Result<Vec<BookSummary>, AppError> {
        let find_options = FindOptions::builder()
            .projection(doc! { "title": 1, "summary": 1 })
            .build();

        let cursor = self
            .book_summaries()
            .find(doc! { "genre": *genre_id }, find_options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list books for genre: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;

        cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect books for genre: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }
}
