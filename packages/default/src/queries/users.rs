use crate::error::{ModelError, ModelResult};
use crate::models::Model;
use crate::models::users::{
    NewUserAddInfo, NewUserInfo, NewWord, UserAddInfo, UserInfo, Word,
};
use crate::models::validation::Validate;
use sqlx::PgPool;
use tracing::{debug, info};

pub async fn insert_user_add_info(
    pool: &PgPool,
    add_info: &NewUserAddInfo,
) -> ModelResult<UserAddInfo> {
    add_info.full_clean()?;
    let row = sqlx::query_as::<_, UserAddInfo>(
        "INSERT INTO user_add_infos (city, old, birthday) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&add_info.city)
    .bind(add_info.old)
    .bind(add_info.birthday)
    .fetch_one(pool)
    .await
    .map_err(|e| ModelError::from_write(UserAddInfo::MODEL_NAME, e))?;

    info!("✅ inserted user add info {}: {}", row.id, row);
    Ok(row)
}

pub async fn update_user_add_info(
    pool: &PgPool,
    id: i32,
    add_info: &NewUserAddInfo,
) -> ModelResult<UserAddInfo> {
    add_info.full_clean()?;
    sqlx::query_as::<_, UserAddInfo>(
        "UPDATE user_add_infos SET city = $2, old = $3, birthday = $4 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&add_info.city)
    .bind(add_info.old)
    .bind(add_info.birthday)
    .fetch_optional(pool)
    .await
    .map_err(|e| ModelError::from_write(UserAddInfo::MODEL_NAME, e))?
    .ok_or(ModelError::NotFound {
        model: UserAddInfo::MODEL_NAME,
        id,
    })
}

/// Inserts a user. Each add info row belongs to at most one user.
pub async fn insert_user_info(pool: &PgPool, user: &NewUserInfo) -> ModelResult<UserInfo> {
    user.full_clean()?;
    let row = sqlx::query_as::<_, UserInfo>(
        "INSERT INTO user_infos (first_name, last_name, add_info_id) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(user.add_info_id)
    .fetch_one(pool)
    .await
    .map_err(|e| ModelError::from_write(UserInfo::MODEL_NAME, e))?;

    info!("✅ inserted user {} {}", row.first_name, row.last_name);
    Ok(row)
}

pub async fn update_user_info(pool: &PgPool, id: i32, user: &NewUserInfo) -> ModelResult<UserInfo> {
    user.full_clean()?;
    sqlx::query_as::<_, UserInfo>(
        "UPDATE user_infos SET first_name = $2, last_name = $3, add_info_id = $4 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(user.add_info_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| ModelError::from_write(UserInfo::MODEL_NAME, e))?
    .ok_or(ModelError::NotFound {
        model: UserInfo::MODEL_NAME,
        id,
    })
}

pub async fn get_add_info(pool: &PgPool, user: &UserInfo) -> ModelResult<Option<UserAddInfo>> {
    let Some(add_info_id) = user.add_info_id else {
        return Ok(None);
    };
    crate::queries::common::find_by_id::<UserAddInfo>(pool, add_info_id).await
}

/// The user owning an add info row, if any.
pub async fn get_user_for_add_info(
    pool: &PgPool,
    add_info_id: i32,
) -> ModelResult<Option<UserInfo>> {
    let user = sqlx::query_as::<_, UserInfo>("SELECT * FROM user_infos WHERE add_info_id = $1")
        .bind(add_info_id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn insert_word(pool: &PgPool, word: &NewWord) -> ModelResult<Word> {
    word.full_clean()?;
    let row = sqlx::query_as::<_, Word>(
        "INSERT INTO words (eng_word, rus_word) VALUES ($1, $2) RETURNING *",
    )
    .bind(&word.eng_word)
    .bind(&word.rus_word)
    .fetch_one(pool)
    .await
    .map_err(|e| ModelError::from_write(Word::MODEL_NAME, e))?;

    info!("✅ inserted word: {}", row);
    Ok(row)
}

pub async fn update_word(pool: &PgPool, id: i32, word: &NewWord) -> ModelResult<Word> {
    word.full_clean()?;
    sqlx::query_as::<_, Word>(
        "UPDATE words SET eng_word = $2, rus_word = $3 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&word.eng_word)
    .bind(&word.rus_word)
    .fetch_optional(pool)
    .await
    .map_err(|e| ModelError::from_write(Word::MODEL_NAME, e))?
    .ok_or(ModelError::NotFound {
        model: Word::MODEL_NAME,
        id,
    })
}

/// Links a word to a user. Linking twice is a no-op.
pub async fn add_word(pool: &PgPool, user_id: i32, word_id: i32) -> ModelResult<()> {
    sqlx::query(
        "INSERT INTO user_info_words (user_info_id, word_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(user_id)
    .bind(word_id)
    .execute(pool)
    .await
    .map_err(|e| ModelError::from_write(UserInfo::MODEL_NAME, e))?;

    debug!("linked word {} to user {}", word_id, user_id);
    Ok(())
}

/// Unlinks a word from a user. Returns whether a link existed.
pub async fn remove_word(pool: &PgPool, user_id: i32, word_id: i32) -> ModelResult<bool> {
    let removed = sqlx::query("DELETE FROM user_info_words WHERE user_info_id = $1 AND word_id = $2")
        .bind(user_id)
        .bind(word_id)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(removed > 0)
}

pub async fn list_words_for_user(pool: &PgPool, user_id: i32) -> ModelResult<Vec<Word>> {
    let words = sqlx::query_as::<_, Word>(
        r#"
        SELECT w.* FROM words w
        JOIN user_info_words uw ON uw.word_id = w.id
        WHERE uw.user_info_id = $1
        ORDER BY w.id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(words)
}

pub async fn list_users_for_word(pool: &PgPool, word_id: i32) -> ModelResult<Vec<UserInfo>> {
    let users = sqlx::query_as::<_, UserInfo>(
        r#"
        SELECT u.* FROM user_infos u
        JOIN user_info_words uw ON uw.user_info_id = u.id
        WHERE uw.word_id = $1
        ORDER BY u.id
        "#,
    )
    .bind(word_id)
    .fetch_all(pool)
    .await?;
    Ok(users)
}
