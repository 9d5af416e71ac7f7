use crate::error::{ModelError, ModelResult};
use crate::models::Model;
use crate::models::movies::{Actor, Movie, NewActor, NewMovie};
use crate::models::validation::Validate;
use sqlx::PgPool;
use tracing::{debug, info};

pub async fn insert_movie(pool: &PgPool, movie: &NewMovie) -> ModelResult<Movie> {
    movie.full_clean()?;
    let row = sqlx::query_as::<_, Movie>("INSERT INTO movies (name) VALUES ($1) RETURNING *")
        .bind(&movie.name)
        .fetch_one(pool)
        .await
        .map_err(|e| ModelError::from_write(Movie::MODEL_NAME, e))?;

    info!("✅ inserted movie: {}", row.name);
    Ok(row)
}

pub async fn update_movie(pool: &PgPool, id: i32, movie: &NewMovie) -> ModelResult<Movie> {
    movie.full_clean()?;
    sqlx::query_as::<_, Movie>("UPDATE movies SET name = $2 WHERE id = $1 RETURNING *")
        .bind(id)
        .bind(&movie.name)
        .fetch_optional(pool)
        .await
        .map_err(|e| ModelError::from_write(Movie::MODEL_NAME, e))?
        .ok_or(ModelError::NotFound {
            model: Movie::MODEL_NAME,
            id,
        })
}

pub async fn insert_actor(pool: &PgPool, actor: &NewActor) -> ModelResult<Actor> {
    actor.full_clean()?;
    let row = sqlx::query_as::<_, Actor>("INSERT INTO actors (name) VALUES ($1) RETURNING *")
        .bind(&actor.name)
        .fetch_one(pool)
        .await
        .map_err(|e| ModelError::from_write(Actor::MODEL_NAME, e))?;

    info!("✅ inserted actor: {}", row.name);
    Ok(row)
}

pub async fn update_actor(pool: &PgPool, id: i32, actor: &NewActor) -> ModelResult<Actor> {
    actor.full_clean()?;
    sqlx::query_as::<_, Actor>("UPDATE actors SET name = $2 WHERE id = $1 RETURNING *")
        .bind(id)
        .bind(&actor.name)
        .fetch_optional(pool)
        .await
        .map_err(|e| ModelError::from_write(Actor::MODEL_NAME, e))?
        .ok_or(ModelError::NotFound {
            model: Actor::MODEL_NAME,
            id,
        })
}

pub async fn add_actor(pool: &PgPool, movie_id: i32, actor_id: i32) -> ModelResult<()> {
    sqlx::query(
        "INSERT INTO movie_actors (movie_id, actor_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(movie_id)
    .bind(actor_id)
    .execute(pool)
    .await
    .map_err(|e| ModelError::from_write(Movie::MODEL_NAME, e))?;

    debug!("cast actor {} in movie {}", actor_id, movie_id);
    Ok(())
}

pub async fn remove_actor(pool: &PgPool, movie_id: i32, actor_id: i32) -> ModelResult<bool> {
    let removed = sqlx::query("DELETE FROM movie_actors WHERE movie_id = $1 AND actor_id = $2")
        .bind(movie_id)
        .bind(actor_id)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(removed > 0)
}

pub async fn list_actors_for_movie(pool: &PgPool, movie_id: i32) -> ModelResult<Vec<Actor>> {
    let actors = sqlx::query_as::<_, Actor>(
        r#"
        SELECT a.* FROM actors a
        JOIN movie_actors ma ON ma.actor_id = a.id
        WHERE ma.movie_id = $1
        ORDER BY a.id
        "#,
    )
    .bind(movie_id)
    .fetch_all(pool)
    .await?;
    Ok(actors)
}

pub async fn list_movies_for_actor(pool: &PgPool, actor_id: i32) -> ModelResult<Vec<Movie>> {
    let movies = sqlx::query_as::<_, Movie>(
        r#"
        SELECT m.* FROM movies m
        JOIN movie_actors ma ON ma.movie_id = m.id
        WHERE ma.actor_id = $1
        ORDER BY m.id
        "#,
    )
    .bind(actor_id)
    .fetch_all(pool)
    .await?;
    Ok(movies)
}
