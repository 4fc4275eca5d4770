// Copyright (c) GlamSocial Team
// SPDX-License-Identifier: Apache-2.0

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};

use crate::api::routes::PaginationParams;
use crate::auth::Actor;
use crate::db::DbPool;
use crate::error::AppError;
use crate::models::profile::UpdateProfile;
use crate::services;

/// Get a profile by id
pub async fn get_profile(
    State(db_pool): State<DbPool>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db_pool.get().await?;
    let profile = services::profiles::get(&mut conn, &user_id).await?;
    Ok(Json(profile))
}

/// Get a profile by username
pub async fn get_profile_by_username(
    State(db_pool): State<DbPool>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db_pool.get().await?;
    let profile = services::profiles::get_by_username(&mut conn, &username).await?;
    Ok(Json(profile))
}

/// Edit the signed-in user's profile
pub async fn update_my_profile(
    State(db_pool): State<DbPool>,
    Actor(actor_id): Actor,
    Json(changes): Json<UpdateProfile>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db_pool.get().await?;
    let profile = services::profiles::update(&mut conn, &actor_id, changes).await?;
    Ok(Json(profile))
}

/// Published posts by a profile, newest first
pub async fn get_profile_posts(
    State(db_pool): State<DbPool>,
    Path(user_id): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db_pool.get().await?;
    let posts =
        services::posts::list_by_author(&mut conn, &user_id, params.limit(), params.offset())
            .await?;
    Ok(Json(posts))
}
