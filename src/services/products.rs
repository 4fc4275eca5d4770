// Copyright (c) GlamSocial Team
// SPDX-License-Identifier: Apache-2.0

//! Catalog queries. Products are reference data; only `rating` and
//! `reviews_count` ever change, and those are owned by the review service.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::error::AppError;
use crate::models::product::{Product, ProductsQuery};
use crate::schema::products;

const STATUS_PUBLISHED: &str = "published";

/// Catalog listing and search. Filters compose; results are ordered by sales
/// unless the query asks for recommendations, which rank by rating.
pub async fn list(
    conn: &mut AsyncPgConnection,
    params: &ProductsQuery,
    limit: i64,
    offset: i64,
) -> Result<Vec<Product>, AppError> {
    let mut query = products::table
        .filter(products::status.eq(STATUS_PUBLISHED))
        .filter(products::is_available.eq(true))
        .select(Product::as_select())
        .into_boxed();

    if let Some(category) = &params.category {
        query = query.filter(products::category.eq(category.clone()));
    }
    if let Some(sub_category) = &params.sub_category {
        query = query.filter(products::sub_category.eq(sub_category.clone()));
    }
    if let Some(featured) = params.featured {
        query = query.filter(products::is_featured.eq(featured));
    }
    if let Some(q) = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        let pattern = format!("%{}%", q);
        query = query.filter(
            products::name
                .ilike(pattern.clone())
                .or(products::brand.ilike(pattern.clone()))
                .or(products::description.ilike(pattern)),
        );
    }
    if let Some(min_price) = &params.min_price {
        query = query.filter(products::price.ge(min_price.clone()));
    }
    if let Some(max_price) = &params.max_price {
        query = query.filter(products::price.le(max_price.clone()));
    }

    // Recommendation filters rank by rating; plain browsing ranks by sales.
    let recommending = params.skin_type.is_some() || params.face_shape.is_some();
    if let Some(skin_type) = &params.skin_type {
        query = query.filter(products::suitable_skin_types.contains(vec![skin_type.clone()]));
    }
    if let Some(face_shape) = &params.face_shape {
        query = query.filter(products::suitable_face_shapes.contains(vec![face_shape.clone()]));
    }

    let query = if recommending {
        query.order_by(products::rating.desc())
    } else {
        query.order_by(products::sales_count.desc())
    };

    let rows = query
        .limit(limit)
        .offset(offset)
        .load::<Product>(conn)
        .await?;

    Ok(rows)
}

/// A single product by id.
pub async fn get(conn: &mut AsyncPgConnection, product_id: &str) -> Result<Product, AppError> {
    products::table
        .filter(products::id.eq(product_id))
        .first::<Product>(conn)
        .await
        .optional()?
        .ok_or(AppError::NotFound("product"))
}
