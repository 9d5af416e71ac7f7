use crate::error::ModelResult;
use crate::handlers::state::AppState;
use crate::models::authors::Author;
use crate::models::books::{Book, NewBook};
use crate::queries::{books, common};
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::Json;

pub async fn detail(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
) -> ModelResult<Json<Book>> {
    Ok(Json(common::get_by_id::<Book>(state.pool(), book_id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(book): Json<NewBook>,
) -> ModelResult<(StatusCode, [(header::HeaderName, String); 1], Json<Book>)> {
    let book = books::insert_book(state.pool(), &book).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, book.absolute_url())],
        Json(book),
    ))
}

/// Books of an author in their author-relative order.
pub async fn by_author(
    State(state): State<AppState>,
    Path(author_id): Path<i32>,
) -> ModelResult<Json<Vec<Book>>> {
    let author = common::get_by_id::<Author>(state.pool(), author_id).await?;
    Ok(Json(books::list_books_for_author(state.pool(), author.id).await?))
}
