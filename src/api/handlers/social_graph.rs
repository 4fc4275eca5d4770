// Copyright (c) GlamSocial Team
// SPDX-License-Identifier: Apache-2.0

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::api::routes::PaginationParams;
use crate::auth::{Actor, MaybeActor};
use crate::db::DbPool;
use crate::error::AppError;
use crate::schema::user_follows;
use crate::services;

/// Follow a profile
pub async fn follow_user(
    State(db_pool): State<DbPool>,
    Actor(actor_id): Actor,
    Path(target_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db_pool.get().await?;
    services::follow_graph::follow(&mut conn, &actor_id, &target_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "following": true })),
    ))
}

/// Unfollow a profile. Succeeds even when no follow edge exists.
pub async fn unfollow_user(
    State(db_pool): State<DbPool>,
    Actor(actor_id): Actor,
    Path(target_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db_pool.get().await?;
    services::follow_graph::unfollow(&mut conn, &actor_id, &target_id).await?;
    Ok(Json(serde_json::json!({ "following": false })))
}

/// Get a list of profiles that a user is following
pub async fn get_following(
    State(db_pool): State<DbPool>,
    Path(user_id): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let limit = params.limit();
    let offset = params.offset();
    debug!(
        "Getting following for user {}, limit: {}, offset: {}",
        user_id, limit, offset
    );

    let mut conn = db_pool.get().await?;
    let profiles =
        services::follow_graph::list_following(&mut conn, &user_id, limit, offset).await?;

    let total = user_follows::table
        .filter(user_follows::follower_id.eq(&user_id))
        .count()
        .get_result::<i64>(&mut conn)
        .await?;

    Ok(Json(serde_json::json!({
        "profiles": profiles,
        "pagination": pagination_envelope(total, limit, offset),
    })))
}

/// Get a list of profiles that follow a user
pub async fn get_followers(
    State(db_pool): State<DbPool>,
    Path(user_id): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let limit = params.limit();
    let offset = params.offset();
    debug!(
        "Getting followers for user {}, limit: {}, offset: {}",
        user_id, limit, offset
    );

    let mut conn = db_pool.get().await?;
    let profiles =
        services::follow_graph::list_followers(&mut conn, &user_id, limit, offset).await?;

    let total = user_follows::table
        .filter(user_follows::following_id.eq(&user_id))
        .count()
        .get_result::<i64>(&mut conn)
        .await?;

    Ok(Json(serde_json::json!({
        "profiles": profiles,
        "pagination": pagination_envelope(total, limit, offset),
    })))
}

/// Whether the signed-in user follows the target; false when signed out.
pub async fn check_following(
    State(db_pool): State<DbPool>,
    MaybeActor(actor_id): MaybeActor,
    Path(target_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db_pool.get().await?;
    let is_following =
        services::follow_graph::is_following(&mut conn, actor_id.as_deref(), &target_id).await?;
    Ok(Json(serde_json::json!({ "is_following": is_following })))
}

/// Stored follow counters for a profile
pub async fn get_follow_stats(
    State(db_pool): State<DbPool>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db_pool.get().await?;
    let stats = services::follow_graph::follow_stats(&mut conn, &user_id).await?;
    Ok(Json(stats))
}

fn pagination_envelope(total: i64, limit: i64, offset: i64) -> serde_json::Value {
    let total_pages = (total as f64 / limit as f64).ceil() as i64;
    serde_json::json!({
        "total": total,
        "limit": limit,
        "offset": offset,
        "total_pages": total_pages,
    })
}
