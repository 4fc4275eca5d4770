// Copyright (c) GlamSocial Team
// SPDX-License-Identifier: Apache-2.0

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::auth::Actor;
use crate::db::DbPool;
use crate::error::AppError;
use crate::models::post::{CreatePostRequest, PostsQuery};
use crate::services;

/// Published posts, newest first, optionally filtered by scenario category
pub async fn list_posts(
    State(db_pool): State<DbPool>,
    Query(params): Query<PostsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let limit = params.limit.unwrap_or(20).clamp(1, 100);
    let offset = params.offset.unwrap_or(0).max(0);

    let mut conn = db_pool.get().await?;
    let posts = if let Some(shape) = &params.face_shape {
        services::posts::list_by_face_shape(&mut conn, shape, limit, offset).await?
    } else {
        services::posts::list_recent(&mut conn, params.category.as_deref(), limit, offset).await?
    };
    Ok(Json(posts))
}

/// Publish a new tutorial post
pub async fn create_post(
    State(db_pool): State<DbPool>,
    Actor(actor_id): Actor,
    Json(request): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db_pool.get().await?;
    let post = services::posts::create(&mut conn, &actor_id, request).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// The featured pick for the home screen, if any
pub async fn get_featured_post(
    State(db_pool): State<DbPool>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db_pool.get().await?;
    let post = services::posts::featured(&mut conn).await?;
    Ok(Json(post))
}

/// Posts suited to a face shape, most liked first
pub async fn list_posts_by_face_shape(
    State(db_pool): State<DbPool>,
    Path(shape): Path<String>,
    Query(params): Query<PostsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let limit = params.limit.unwrap_or(20).clamp(1, 100);
    let offset = params.offset.unwrap_or(0).max(0);

    let mut conn = db_pool.get().await?;
    let posts = services::posts::list_by_face_shape(&mut conn, &shape, limit, offset).await?;
    Ok(Json(posts))
}

/// A single post with its author
pub async fn get_post(
    State(db_pool): State<DbPool>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db_pool.get().await?;
    let post = services::posts::get(&mut conn, &post_id).await?;
    Ok(Json(post))
}

/// Record one view of a post
pub async fn increment_views(
    State(db_pool): State<DbPool>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db_pool.get().await?;
    let views = services::posts::increment_views(&mut conn, &post_id).await?;
    Ok(Json(serde_json::json!({ "views_count": views })))
}
