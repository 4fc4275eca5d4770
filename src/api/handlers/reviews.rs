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
use crate::models::review::CreateReviewRequest;
use crate::services;

/// Reviews for a product, newest first
pub async fn list_reviews(
    State(db_pool): State<DbPool>,
    Path(product_id): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db_pool.get().await?;
    let reviews =
        services::reviews::list(&mut conn, &product_id, params.limit(), params.offset()).await?;
    Ok(Json(reviews))
}

/// Submit a review; one per user per product
pub async fn create_review(
    State(db_pool): State<DbPool>,
    Actor(actor_id): Actor,
    Path(product_id): Path<String>,
    Json(request): Json<CreateReviewRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db_pool.get().await?;
    let review = services::reviews::create(
        &mut conn,
        &actor_id,
        &product_id,
        request.rating,
        request.content.as_deref(),
        request.images.as_deref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(review)))
}
