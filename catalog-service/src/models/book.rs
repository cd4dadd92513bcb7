use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A catalog book. Only read by this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<ObjectId>,
}

impl Book {
    pub fn new(title: String, summary: String, genre: Option<ObjectId>) -> Self {
        Self {
            id: ObjectId::new(),
            title,
            summary,
            genre,
        }
    }
}

/// Title/summary projection returned when listing the books of a genre.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookSummary {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(default)]
    pub summary: String,
}

impl BookSummary {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id.to_hex())
    }
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            summary: book.summary.clone(),
        }
    }
}
