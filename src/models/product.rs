// Copyright (c) GlamSocial Team
// SPDX-License-Identifier: Apache-2.0

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::products;

/// A catalog product. Reference data except for `rating`/`reviews_count`,
/// which are derived from the review rows.
#[derive(Debug, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = products)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub description: Option<String>,
    pub category: String,
    pub sub_category: Option<String>,
    pub cover_image: Option<String>,
    pub price: BigDecimal,
    pub original_price: Option<BigDecimal>,
    pub currency: String,
    pub affiliate_link: Option<String>,
    pub platform: Option<String>,
    pub suitable_skin_types: Option<Vec<String>>,
    pub suitable_face_shapes: Option<Vec<String>>,
    pub rating: BigDecimal,
    pub reviews_count: i32,
    pub sales_count: i32,
    pub is_featured: bool,
    pub is_available: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query parameters for catalog listings and search.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub q: Option<String>,
    pub min_price: Option<BigDecimal>,
    pub max_price: Option<BigDecimal>,
    pub featured: Option<bool>,
    pub skin_type: Option<String>,
    pub face_shape: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
