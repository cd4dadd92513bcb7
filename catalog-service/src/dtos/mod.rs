pub mod genre;

pub use genre::{DeleteGenreForm, GenreForm, SanitizedGenre};
