// Copyright (c) GlamSocial Team
// SPDX-License-Identifier: Apache-2.0

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};

use crate::api::routes::PaginationParams;
use crate::auth::{Actor, MaybeActor};
use crate::db::DbPool;
use crate::error::AppError;
use crate::models::post::PostDetail;
use crate::services;

/// Toggle the signed-in user's like on a post
pub async fn toggle_like(
    State(db_pool): State<DbPool>,
    Actor(actor_id): Actor,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db_pool.get().await?;
    let outcome = services::engagement::toggle_like(&mut conn, &actor_id, &post_id).await?;
    Ok(Json(serde_json::json!({
        "liked": outcome.active,
        "likes_count": outcome.count,
    })))
}

/// Toggle the signed-in user's favorite on a post
pub async fn toggle_favorite(
    State(db_pool): State<DbPool>,
    Actor(actor_id): Actor,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db_pool.get().await?;
    let outcome = services::engagement::toggle_favorite(&mut conn, &actor_id, &post_id).await?;
    Ok(Json(serde_json::json!({
        "favorited": outcome.active,
        "favorites_count": outcome.count,
    })))
}

/// Like/favorite state of a post for the current viewer; all false when
/// signed out.
pub async fn engagement_status(
    State(db_pool): State<DbPool>,
    MaybeActor(actor_id): MaybeActor,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db_pool.get().await?;
    let liked = services::engagement::is_liked(&mut conn, actor_id.as_deref(), &post_id).await?;
    let favorited =
        services::engagement::is_favorited(&mut conn, actor_id.as_deref(), &post_id).await?;
    Ok(Json(serde_json::json!({
        "liked": liked,
        "favorited": favorited,
    })))
}

/// The signed-in user's favorited posts, most recent favorite first
pub async fn list_my_favorites(
    State(db_pool): State<DbPool>,
    Actor(actor_id): Actor,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db_pool.get().await?;
    let favorites = services::engagement::list_favorites(
        &mut conn,
        &actor_id,
        params.limit(),
        params.offset(),
    )
    .await?;

    let favorites: Vec<PostDetail> = favorites
        .into_iter()
        .map(|(post, author)| PostDetail { post, author })
        .collect();

    Ok(Json(favorites))
}
