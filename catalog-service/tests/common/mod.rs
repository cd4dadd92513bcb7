#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use catalog_service::models::{Book, BookSummary, Genre};
use catalog_service::services::{CatalogStore, MemoryStore};
use catalog_service::startup::{build_router, AppState};
use http_body_util::BodyExt;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

/// Router wired to an in-memory store that the test can seed and inspect.
pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
}

impl TestApp {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let router = build_router(AppState::new(Arc::new(store.clone())));
        TestApp { router, store }
    }

    /// Router whose store fails every call. `store` stays empty.
    pub fn with_failing_store() -> Self {
        let router = build_router(AppState::new(Arc::new(FailingStore)));
        TestApp {
            router,
            store: MemoryStore::new(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    /// POST an already url-encoded form body.
    pub async fn post_form(&self, uri: &str, body: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        TestResponse {
            status,
            location,
            content_type,
            body: String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8"),
        }
    }

    pub async fn seed_genre(&self, name: &str) -> Genre {
        let genre = Genre::new(name.to_string());
        self.store
            .insert_genre(&genre)
            .await
            .expect("Failed to seed genre");
        genre
    }

    pub async fn seed_book(&self, title: &str, summary: &str, genre: Option<&Genre>) -> Book {
        let book = Book::new(
            title.to_string(),
            summary.to_string(),
            genre.map(|g| g.id),
        );
        self.store.insert_book(book.clone()).await;
        book
    }

    pub async fn genres(&self) -> Vec<Genre> {
        self.store.list_genres().await.expect("Failed to list genres")
    }
}

pub const STORE_FAILURE: &str = "connection refused by mongodb://admin:hunter2@db";

/// Store that behaves like an unreachable database.
pub struct FailingStore;

fn store_failure() -> AppError {
    AppError::DatabaseError(anyhow::anyhow!(STORE_FAILURE))
}

#[async_trait]
impl CatalogStore for FailingStore {
    async fn list_genres(&self) -> Result<Vec<Genre>, AppError> {
        Err(store_failure())
    }

    async fn find_genre(&self, _id: &ObjectId) -> Result<Option<Genre>, AppError> {
        Err(store_failure())
    }

    async fn find_genre_by_name(&self, _name: &str) -> Result<Option<Genre>, AppError> {
        Err(store_failure())
    }

    async fn insert_genre(&self, _genre: &Genre) -> Result<(), AppError> {
        Err(store_failure())
    }

    async fn delete_genre(&self, _id: &ObjectId) -> Result<(), AppError> {
        Err(store_failure())
    }

    async fn books_in_genre(&self, _genre_id: &ObjectId) -> Result<Vec<BookSummary>, AppError> {
        Err(store_failure())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Err(store_failure())
    }
}
