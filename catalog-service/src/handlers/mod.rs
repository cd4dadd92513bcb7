pub mod error;
pub mod genre;
pub mod health;

pub use error::PageError;
