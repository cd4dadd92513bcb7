//! End-to-end tests against a real MongoDB.
//!
//! Run with `TEST_MONGODB_URI` pointing at a reachable server and
//! `cargo test -- --ignored`.

use catalog_service::config::{CatalogConfig, MongoConfig, StoreBackend};
use catalog_service::models::Book;
use catalog_service::services::{CatalogDb, CatalogStore};
use catalog_service::startup::Application;
use reqwest::{redirect::Policy, Client, StatusCode};
use service_core::config::Config as CoreConfig;

struct MongoTestApp {
    address: String,
    db: CatalogDb,
    client: Client,
    mongo: mongodb::Client,
    database: String,
}

impl MongoTestApp {
    async fn spawn() -> Self {
        let mongodb = MongoConfig {
            uri: std::env::var("TEST_MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database: format!("catalog_test_{}", uuid::Uuid::new_v4().simple()),
        };

        let db = CatalogDb::connect(&mongodb.uri, &mongodb.database)
            .await
            .expect("Failed to connect to MongoDB");
        let mongo = mongodb::Client::with_uri_str(&mongodb.uri)
            .await
            .expect("Failed to create MongoDB client");
        let database = mongodb.database.clone();

        let config = CatalogConfig {
            common: CoreConfig {
                port: 0,
                log_level: "info".to_string(),
            },
            store: StoreBackend::Mongodb,
            mongodb,
            otlp_endpoint: None,
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = Client::builder()
            .redirect(Policy::none())
            .build()
            .expect("Failed to build HTTP client");

        // Wait for the server to be ready by polling the health endpoint
        for _ in 0..50 {
            if client
                .get(format!("{}/health", address))
                .send()
                .await
                .is_ok()
            {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        MongoTestApp {
            address,
            db,
            client,
            mongo,
            database,
        }
    }

    /// Drop the per-test database.
    async fn cleanup(&self) {
        self.mongo
            .database(&self.database)
            .drop(None)
            .await
            .expect("Failed to drop test database");
    }

    async fn create_genre(&self, name: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/catalog/genre/create", self.address))
            .form(&[("name", name)])
            .send()
            .await
            .expect("Failed to execute request")
    }
}

#[tokio::test]
#[ignore = "Requires MongoDB (set TEST_MONGODB_URI)"]
async fn create_and_list_genres() {
    let app = MongoTestApp::spawn().await;

    for name in ["Poetry", "Fantasy", "Horror"] {
        let response = app.create_genre(name).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    let genres = app.db.list_genres().await.unwrap();
    let names: Vec<&str> = genres.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Fantasy", "Horror", "Poetry"]);

    let body = app
        .client
        .get(format!("{}/catalog/genres", app.address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    let fantasy = body.find("Fantasy").unwrap();
    let poetry = body.find("Poetry").unwrap();
    assert!(fantasy < poetry);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB (set TEST_MONGODB_URI)"]
async fn duplicate_create_redirects_to_existing() {
    let app = MongoTestApp::spawn().await;

    let first = app.create_genre("Fantasy").await;
    let second = app.create_genre("  Fantasy ").await;

    assert_eq!(
        first.headers().get("location"),
        second.headers().get("location")
    );
    assert_eq!(app.db.list_genres().await.unwrap().len(), 1);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB (set TEST_MONGODB_URI)"]
async fn detail_projects_books_of_genre() {
    let app = MongoTestApp::spawn().await;

    app.create_genre("Fantasy").await;
    let genre = app
        .db
        .find_genre_by_name("Fantasy")
        .await
        .unwrap()
        .expect("genre saved");

    app.db
        .books()
        .insert_one(
            Book::new(
                "The Hobbit".to_string(),
                "There and back again".to_string(),
                Some(genre.id),
            ),
            None,
        )
        .await
        .unwrap();

    let books = app.db.books_in_genre(&genre.id).await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "The Hobbit");

    let response = app
        .client
        .get(format!("{}{}", app.address, genre.url()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("The Hobbit"));

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB (set TEST_MONGODB_URI)"]
async fn delete_is_blocked_by_books() {
    let app = MongoTestApp::spawn().await;

    app.create_genre("Fantasy").await;
    app.create_genre("Horror").await;
    let fantasy = app.db.find_genre_by_name("Fantasy").await.unwrap().unwrap();
    let horror = app.db.find_genre_by_name("Horror").await.unwrap().unwrap();

    app.db
        .books()
        .insert_one(
            Book::new("The Hobbit".to_string(), String::new(), Some(fantasy.id)),
            None,
        )
        .await
        .unwrap();

    let blocked = app
        .client
        .post(format!("{}{}/delete", app.address, fantasy.url()))
        .form(&[("genreid", fantasy.id.to_hex())])
        .send()
        .await
        .unwrap();
    assert_eq!(blocked.status(), StatusCode::OK);
    assert!(app.db.find_genre(&fantasy.id).await.unwrap().is_some());

    let deleted = app
        .client
        .post(format!("{}{}/delete", app.address, horror.url()))
        .form(&[("genreid", horror.id.to_hex())])
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::SEE_OTHER);
    assert!(app.db.find_genre(&horror.id).await.unwrap().is_none());

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB (set TEST_MONGODB_URI)"]
async fn missing_genre_detail_is_404() {
    let app = MongoTestApp::spawn().await;

    let response = app
        .client
        .get(format!(
            "{}/catalog/genre/{}",
            app.address,
            mongodb::bson::oid::ObjectId::new().to_hex()
        ))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    app.cleanup().await;
}
