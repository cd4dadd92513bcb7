//! Genre pages: list, detail, create and delete.
//!
//! Update is not supported; its routes answer with a fixed message.

use askama::Template;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

use crate::dtos::{DeleteGenreForm, GenreForm};
use crate::handlers::error::PageError;
use crate::models::{BookSummary, Genre};
use crate::services::metrics::{record_genre_created, record_genre_deleted};
use crate::startup::AppState;

pub const GENRE_LIST_URL: &str = "/catalog/genres";

#[derive(Template)]
#[template(path = "genre_list.html")]
pub struct GenreListTemplate {
    pub title: &'static str,
    pub genre_list: Vec<Genre>,
}

#[derive(Template)]
#[template(path = "genre_detail.html")]
pub struct GenreDetailTemplate {
    pub title: &'static str,
    pub genre: Genre,
    pub genre_books: Vec<BookSummary>,
}

#[derive(Template)]
#[template(path = "genre_form.html")]
pub struct GenreFormTemplate {
    pub title: &'static str,
    pub genre: Option<Genre>,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "genre_delete.html")]
pub struct GenreDeleteTemplate {
    pub title: &'static str,
    pub genre: Genre,
    pub genre_books: Vec<BookSummary>,
}

/// Ids that are not valid ObjectIds cannot match any record.
fn parse_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

fn genre_not_found() -> PageError {
    PageError(AppError::NotFound(anyhow::anyhow!("Genre not found")))
}

#[tracing::instrument(skip(state))]
pub async fn genre_list(State(state): State<AppState>) -> Result<GenreListTemplate, PageError> {
    let genre_list = state.store.list_genres().await?;

    Ok(GenreListTemplate {
        title: "Genre List",
        genre_list,
    })
}

#[tracing::instrument(skip(state))]
pub async fn genre_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<GenreDetailTemplate, PageError> {
    let id = parse_id(&id).ok_or_else(genre_not_found)?;

    let (genre, genre_books) = tokio::try_join!(
        state.store.find_genre(&id),
        state.store.books_in_genre(&id),
    )?;

    let genre = genre.ok_or_else(genre_not_found)?;

    Ok(GenreDetailTemplate {
        title: "Genre Detail",
        genre,
        genre_books,
    })
}

pub async fn genre_create_get() -> GenreFormTemplate {
    GenreFormTemplate {
        title: "Create Genre",
        genre: None,
        errors: Vec::new(),
    }
}

#[tracing::instrument(skip(state, form))]
pub async fn genre_create_post(
    State(state): State<AppState>,
    Form(form): Form<GenreForm>,
) -> Result<Response, PageError> {
    let sanitized = form.sanitize();
    let genre = Genre::new(sanitized.name.clone());

    if !sanitized.is_valid() {
        return Ok(GenreFormTemplate {
            title: "Create Genre",
            genre: Some(genre),
            errors: sanitized.errors,
        }
        .into_response());
    }

    if let Some(existing) = state.store.find_genre_by_name(&genre.name).await? {
        tracing::info!(genre_id = %existing.id, "Genre already exists");
        return Ok(Redirect::to(&existing.url()).into_response());
    }

    state.store.insert_genre(&genre).await?;
    record_genre_created();
    tracing::info!(genre_id = %genre.id, "Genre created");

    Ok(Redirect::to(&genre.url()).into_response())
}

#[tracing::instrument(skip(state))]
pub async fn genre_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, PageError> {
    let Some(id) = parse_id(&id) else {
        return Ok(Redirect::to(GENRE_LIST_URL).into_response());
    };

    let (genre, genre_books) = tokio::try_join!(
        state.store.find_genre(&id),
        state.store.books_in_genre(&id),
    )?;

    let Some(genre) = genre else {
        return Ok(Redirect::to(GENRE_LIST_URL).into_response());
    };

    Ok(GenreDeleteTemplate {
        title: "Delete genre",
        genre,
        genre_books,
    }
    .into_response())
}

#[tracing::instrument(skip(state, form))]
pub async fn genre_delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<DeleteGenreForm>,
) -> Result<Response, PageError> {
    let Some(id) = parse_id(&id) else {
        return Ok(Redirect::to(GENRE_LIST_URL).into_response());
    };

    let (genre, genre_books) = tokio::try_join!(
        state.store.find_genre(&id),
        state.store.books_in_genre(&id),
    )?;

    let Some(genre) = genre else {
        return Ok(Redirect::to(GENRE_LIST_URL).into_response());
    };

    if !genre_books.is_empty() {
        tracing::info!(
            genre_id = %genre.id,
            books = genre_books.len(),
            "Genre still referenced by books, not deleting"
        );
        return Ok(GenreDeleteTemplate {
            title: "Delete genre",
            genre,
            genre_books,
        }
        .into_response());
    }

    // The submitted id is trusted as-is; it is not compared with the path id.
    let target = parse_id(&form.genreid).ok_or_else(|| {
        PageError(AppError::BadRequest(anyhow::anyhow!(
            "Invalid genre id: {}",
            form.genreid
        )))
    })?;

    state.store.delete_genre(&target).await?;
    record_genre_deleted();
    tracing::info!(genre_id = %target, "Genre deleted");

    Ok(Redirect::to(GENRE_LIST_URL).into_response())
}

pub async fn genre_update_get() -> &'static str {
    "NOT IMPLEMENTED: Genre update GET"
}

pub async fn genre_update_post() -> &'static str {
    "NOT IMPLEMENTED: Genre update POST"
}
