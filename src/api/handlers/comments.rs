// Copyright (c) GlamSocial Team
// SPDX-License-Identifier: Apache-2.0

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::api::routes::PaginationParams;
use crate::auth::Actor;
use crate::db::DbPool;
use crate::error::AppError;
use crate::models::comment::CreateCommentRequest;
use crate::services;

/// Top-level comments on a post, newest first
pub async fn list_comments(
    State(db_pool): State<DbPool>,
    Path(post_id): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db_pool.get().await?;
    let comments =
        services::comments::list(&mut conn, &post_id, params.limit(), params.offset()).await?;
    Ok(Json(comments))
}

/// Post a comment (or a reply, when `parent_id` is set)
pub async fn create_comment(
    State(db_pool): State<DbPool>,
    Actor(actor_id): Actor,
    Path(post_id): Path<String>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db_pool.get().await?;
    let comment = services::comments::create(
        &mut conn,
        &actor_id,
        &post_id,
        &request.content,
        request.parent_id.as_deref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// Delete one's own comment
pub async fn delete_comment(
    State(db_pool): State<DbPool>,
    Actor(actor_id): Actor,
    Path(comment_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db_pool.get().await?;
    services::comments::delete(&mut conn, &actor_id, &comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Replies to a comment, oldest first
pub async fn list_replies(
    State(db_pool): State<DbPool>,
    Path(comment_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db_pool.get().await?;
    let replies = services::comments::list_replies(&mut conn, &comment_id).await?;
    Ok(Json(replies))
}

/// Toggle the signed-in user's like on a comment
pub async fn toggle_comment_like(
    State(db_pool): State<DbPool>,
    Actor(actor_id): Actor,
    Path(comment_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db_pool.get().await?;
    let outcome = services::comments::toggle_like(&mut conn, &actor_id, &comment_id).await?;
    Ok(Json(serde_json::json!({
        "liked": outcome.active,
        "likes_count": outcome.count,
    })))
}
