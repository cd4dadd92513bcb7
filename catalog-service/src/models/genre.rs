use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
}

impl Genre {
    /// Build an unsaved genre. The id is assigned up front so the canonical
    /// URL is known before the record is persisted.
    pub fn new(name: String) -> Self {
        Self {
            id: ObjectId::new(),
            name,
        }
    }

    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id.to_hex())
    }
}
