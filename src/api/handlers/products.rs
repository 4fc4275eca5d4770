// Copyright (c) GlamSocial Team
// SPDX-License-Identifier: Apache-2.0

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};

use crate::db::DbPool;
use crate::error::AppError;
use crate::models::product::ProductsQuery;
use crate::services;

/// Catalog listing, search and recommendations
pub async fn list_products(
    State(db_pool): State<DbPool>,
    Query(params): Query<ProductsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let limit = params.limit.unwrap_or(20).clamp(1, 100);
    let offset = params.offset.unwrap_or(0).max(0);

    let mut conn = db_pool.get().await?;
    let products = services::products::list(&mut conn, &params, limit, offset).await?;
    Ok(Json(products))
}

/// A single product by id
pub async fn get_product(
    State(db_pool): State<DbPool>,
    Path(product_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db_pool.get().await?;
    let product = services::products::get(&mut conn, &product_id).await?;
    Ok(Json(product))
}
