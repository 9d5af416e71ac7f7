use crate::error::ModelResult;
use crate::handlers::state::AppState;
use crate::models::bbs::{Bb, NewBb};
use crate::models::rubrics::Rubric;
use crate::queries::{bbs, common, rubrics};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;

/// A rubric together with the ads filed under it.
#[derive(Debug, Serialize)]
pub struct RubricPage {
    pub rubric: Rubric,
    pub bbs: Vec<Bb>,
}

pub async fn index(State(state): State<AppState>) -> ModelResult<Json<Vec<Bb>>> {
    Ok(Json(bbs::list_bbs(state.pool()).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(bb): Json<NewBb>,
) -> ModelResult<(StatusCode, Json<Bb>)> {
    let bb = bbs::insert_bb(state.pool(), &bb).await?;
    Ok((StatusCode::CREATED, Json(bb)))
}

pub async fn rubrics(State(state): State<AppState>) -> ModelResult<Json<Vec<Rubric>>> {
    Ok(Json(common::list::<Rubric>(state.pool()).await?))
}

pub async fn by_rubric(
    State(state): State<AppState>,
    Path(rubric_id): Path<i32>,
) -> ModelResult<Json<RubricPage>> {
    let rubric = common::get_by_id::<Rubric>(state.pool(), rubric_id).await?;
    let bbs = rubrics::list_bbs_for_rubric(state.pool(), rubric.id).await?;
    Ok(Json(RubricPage { rubric, bbs }))
}
