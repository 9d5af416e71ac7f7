use crate::error::{ModelError, ModelResult};
use crate::models::Model;
use crate::models::authors::Author;
use crate::models::books::{Book, NewBook};
use crate::models::validation::Validate;
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Locks the author row so concurrent writers agree on the next position.
async fn lock_author(tx: &mut Transaction<'_, Postgres>, author_id: i32) -> ModelResult<()> {
    sqlx::query_scalar::<_, i32>("SELECT id FROM authors WHERE id = $1 FOR UPDATE")
        .bind(author_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(ModelError::NotFound {
            model: Author::MODEL_NAME,
            id: author_id,
        })?;
    Ok(())
}

async fn next_position(tx: &mut Transaction<'_, Postgres>, author_id: i32) -> ModelResult<i32> {
    let position: i32 = sqlx::query_scalar(
        "SELECT COALESCE(MAX(_order) + 1, 0) FROM books WHERE author_id = $1",
    )
    .bind(author_id)
    .fetch_one(&mut **tx)
    .await?;
    Ok(position)
}

/// Inserts a book as the last one of its author.
pub async fn insert_book(pool: &PgPool, book: &NewBook) -> ModelResult<Book> {
    book.full_clean()?;

    let mut tx = pool.begin().await?;
    lock_author(&mut tx, book.author_id).await?;
    let position = next_position(&mut tx, book.author_id).await?;

    let row = sqlx::query_as::<_, Book>(
        r#"
        INSERT INTO books (name, pages, price, author_id, _order)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(&book.name)
    .bind(book.pages)
    .bind(book.price)
    .bind(book.author_id)
    .bind(position)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| ModelError::from_write(Book::MODEL_NAME, e))?;
    tx.commit().await?;

    info!(
        "✅ inserted book {} '{}' at position {} for author {}",
        row.id, row.name, row.order, row.author_id
    );
    Ok(row)
}

/// Updates a book. Moving it to another author appends it to that author's books.
pub async fn update_book(pool: &PgPool, id: i32, book: &NewBook) -> ModelResult<Book> {
    book.full_clean()?;

    let mut tx = pool.begin().await?;
    let current = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ModelError::NotFound {
            model: Book::MODEL_NAME,
            id,
        })?;

    let position = if current.author_id == book.author_id {
        current.order
    } else {
        lock_author(&mut tx, book.author_id).await?;
        next_position(&mut tx, book.author_id).await?
    };

    let row = sqlx::query_as::<_, Book>(
        r#"
        UPDATE books
        SET name = $2, pages = $3, price = $4, author_id = $5, _order = $6
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&book.name)
    .bind(book.pages)
    .bind(book.price)
    .bind(book.author_id)
    .bind(position)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| ModelError::from_write(Book::MODEL_NAME, e))?;
    tx.commit().await?;

    Ok(row)
}

pub async fn list_books_for_author(pool: &PgPool, author_id: i32) -> ModelResult<Vec<Book>> {
    let books = sqlx::query_as::<_, Book>(
        "SELECT * FROM books WHERE author_id = $1 ORDER BY _order, id",
    )
    .bind(author_id)
    .fetch_all(pool)
    .await?;
    Ok(books)
}

/// Ids of the author's books in their current order.
pub async fn get_book_order(pool: &PgPool, author_id: i32) -> ModelResult<Vec<i32>> {
    let ids = sqlx::query_scalar::<_, i32>(
        "SELECT id FROM books WHERE author_id = $1 ORDER BY _order, id",
    )
    .bind(author_id)
    .fetch_all(pool)
    .await?;
    Ok(ids)
}

/// Checks that `requested` names every book of the author exactly once.
pub fn check_order(author_id: i32, current: &[i32], requested: &[i32]) -> ModelResult<()> {
    let wanted: BTreeSet<i32> = requested.iter().copied().collect();
    if wanted.len() != requested.len() {
        return Err(ModelError::InvalidOrder {
            author_id,
            reason: "book ids repeat".to_string(),
        });
    }
    let existing: BTreeSet<i32> = current.iter().copied().collect();
    if wanted != existing {
        let missing: Vec<_> = existing.difference(&wanted).collect();
        let foreign: Vec<_> = wanted.difference(&existing).collect();
        return Err(ModelError::InvalidOrder {
            author_id,
            reason: format!("missing books {missing:?}, books of other authors {foreign:?}"),
        });
    }
    Ok(())
}

/// Rewrites the order of an author's books to follow `ids`.
pub async fn set_book_order(pool: &PgPool, author_id: i32, ids: &[i32]) -> ModelResult<()> {
    let mut tx = pool.begin().await?;
    lock_author(&mut tx, author_id).await?;

    let current = sqlx::query_scalar::<_, i32>("SELECT id FROM books WHERE author_id = $1")
        .bind(author_id)
        .fetch_all(&mut *tx)
        .await?;
    check_order(author_id, &current, ids)?;

    for (position, id) in ids.iter().enumerate() {
        let position = i32::try_from(position).map_err(|_| ModelError::InvalidOrder {
            author_id,
            reason: "too many books".to_string(),
        })?;
        sqlx::query("UPDATE books SET _order = $2 WHERE id = $1")
            .bind(id)
            .bind(position)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    info!("🔀 reordered {} books of author {}", ids.len(), author_id);
    Ok(())
}

/// The book that follows `book` among its author's books.
pub async fn get_next_in_order(pool: &PgPool, book: &Book) -> ModelResult<Option<Book>> {
    debug!("looking up book after {} for author {}", book.id, book.author_id);
    let next = sqlx::query_as::<_, Book>(
        r#"
        SELECT * FROM books
        WHERE author_id = $1 AND (_order, id) > ($2, $3)
        ORDER BY _order, id
        LIMIT 1
        "#,
    )
    .bind(book.author_id)
    .bind(book.order)
    .bind(book.id)
    .fetch_optional(pool)
    .await?;
    Ok(next)
}

/// The book that precedes `book` among its author's books.
pub async fn get_previous_in_order(pool: &PgPool, book: &Book) -> ModelResult<Option<Book>> {
    debug!("looking up book before {} for author {}", book.id, book.author_id);
    let previous = sqlx::query_as::<_, Book>(
        r#"
        SELECT * FROM books
        WHERE author_id = $1 AND (_order, id) < ($2, $3)
        ORDER BY _order DESC, id DESC
        LIMIT 1
        "#,
    )
    .bind(book.author_id)
    .bind(book.order)
    .bind(book.id)
    .fetch_optional(pool)
    .await?;
    Ok(previous)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permutation_is_accepted() {
        assert!(check_order(1, &[4, 5, 6], &[6, 4, 5]).is_ok());
        assert!(check_order(1, &[], &[]).is_ok());
    }

    #[test]
    fn repeated_ids_are_rejected() {
        let err = check_order(1, &[4, 5], &[4, 4]).unwrap_err();
        assert!(matches!(err, ModelError::InvalidOrder { author_id: 1, .. }));
    }

    #[test]
    fn missing_and_foreign_ids_are_reported() {
        let err = check_order(2, &[4, 5, 6], &[4, 5, 9]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid order for author id=2: missing books [6], books of other authors [9]"
        );
    }
}
