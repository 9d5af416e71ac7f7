use crate::error::{ModelError, ModelResult};
use crate::models::authors::Author;
use crate::models::bbs::Bb;
use crate::models::books::Book;
use crate::models::machines::{Kit, Machine, Spare};
use crate::models::movies::{Actor, Movie};
use crate::models::notes::{ContentObject, ContentType, NewNote, Note};
use crate::models::rubrics::Rubric;
use crate::models::users::{UserAddInfo, UserInfo, Word};
use crate::models::validation::Validate;
use crate::models::{APP_LABEL, Model};
use crate::queries::common::find_by_id;
use sqlx::PgPool;
use tracing::info;

pub async fn get_content_type_by_name(pool: &PgPool, model: &str) -> ModelResult<ContentType> {
    sqlx::query_as::<_, ContentType>(
        "SELECT * FROM content_types WHERE app_label = $1 AND model = $2",
    )
    .bind(APP_LABEL)
    .bind(model)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| ModelError::UnknownContentType(model.to_string()))
}

pub async fn get_content_type_for<M: Model>(pool: &PgPool) -> ModelResult<ContentType> {
    get_content_type_by_name(pool, M::MODEL_NAME).await
}

/// Attaches a note to the record `object_id` of the model named `model`.
pub async fn add_note_by_model(
    pool: &PgPool,
    model: &str,
    object_id: i32,
    content: &str,
) -> ModelResult<Note> {
    let content_type = get_content_type_by_name(pool, model).await?;
    let note = NewNote {
        content: content.to_string(),
        content_type_id: content_type.id,
        object_id,
    };
    note.full_clean()?;

    let row = sqlx::query_as::<_, Note>(
        "INSERT INTO notes (content, content_type_id, object_id) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&note.content)
    .bind(note.content_type_id)
    .bind(note.object_id)
    .fetch_one(pool)
    .await
    .map_err(|e| ModelError::from_write(Note::MODEL_NAME, e))?;

    info!("📝 attached note {} to {} {}", row.id, model, object_id);
    Ok(row)
}

pub async fn add_note<M: Model>(pool: &PgPool, target: &M, content: &str) -> ModelResult<Note> {
    add_note_by_model(pool, M::MODEL_NAME, target.id(), content).await
}

pub async fn list_notes_by_model(
    pool: &PgPool,
    model: &str,
    object_id: i32,
) -> ModelResult<Vec<Note>> {
    let content_type = get_content_type_by_name(pool, model).await?;
    let notes = sqlx::query_as::<_, Note>(
        "SELECT * FROM notes WHERE content_type_id = $1 AND object_id = $2 ORDER BY id",
    )
    .bind(content_type.id)
    .bind(object_id)
    .fetch_all(pool)
    .await?;
    Ok(notes)
}

pub async fn list_notes_for<M: Model>(pool: &PgPool, target: &M) -> ModelResult<Vec<Note>> {
    list_notes_by_model(pool, M::MODEL_NAME, target.id()).await
}

/// Resolves the record a note points at. A dangling reference yields `None`.
pub async fn get_content_object(pool: &PgPool, note: &Note) -> ModelResult<Option<ContentObject>> {
    let content_type = sqlx::query_as::<_, ContentType>("SELECT * FROM content_types WHERE id = $1")
        .bind(note.content_type_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ModelError::UnknownContentType(note.content_type_id.to_string()))?;

    let id = note.object_id;
    let object = match content_type.model.as_str() {
        Rubric::MODEL_NAME => find_by_id::<Rubric>(pool, id).await?.map(ContentObject::Rubric),
        Bb::MODEL_NAME => find_by_id::<Bb>(pool, id).await?.map(ContentObject::Bb),
        Author::MODEL_NAME => find_by_id::<Author>(pool, id).await?.map(ContentObject::Author),
        Book::MODEL_NAME => find_by_id::<Book>(pool, id).await?.map(ContentObject::Book),
        UserAddInfo::MODEL_NAME => find_by_id::<UserAddInfo>(pool, id)
            .await?
            .map(ContentObject::UserAddInfo),
        UserInfo::MODEL_NAME => find_by_id::<UserInfo>(pool, id)
            .await?
            .map(ContentObject::UserInfo),
        Word::MODEL_NAME => find_by_id::<Word>(pool, id).await?.map(ContentObject::Word),
        Movie::MODEL_NAME => find_by_id::<Movie>(pool, id).await?.map(ContentObject::Movie),
        Actor::MODEL_NAME => find_by_id::<Actor>(pool, id).await?.map(ContentObject::Actor),
        Spare::MODEL_NAME => find_by_id::<Spare>(pool, id).await?.map(ContentObject::Spare),
        Machine::MODEL_NAME => find_by_id::<Machine>(pool, id)
            .await?
            .map(ContentObject::Machine),
        Kit::MODEL_NAME => find_by_id::<Kit>(pool, id).await?.map(ContentObject::Kit),
        Note::MODEL_NAME => find_by_id::<Note>(pool, id).await?.map(ContentObject::Note),
        other => return Err(ModelError::UnknownContentType(other.to_string())),
    };
    Ok(object)
}
