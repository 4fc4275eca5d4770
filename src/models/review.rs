// Copyright (c) GlamSocial Team
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::profile::PublicProfile;
use crate::schema::product_reviews;

#[derive(Debug, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = product_reviews)]
pub struct ProductReview {
    pub id: String,
    pub product_id: String,
    pub user_id: String,
    pub rating: i32,
    pub content: Option<String>,
    pub images: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = product_reviews)]
pub struct NewProductReview<'a> {
    pub product_id: &'a str,
    pub user_id: &'a str,
    pub rating: i32,
    pub content: Option<&'a str>,
    pub images: Option<Vec<String>>,
}

/// A review joined with the reviewer's public profile.
#[derive(Debug, Serialize)]
pub struct ReviewDetail {
    #[serde(flatten)]
    pub review: ProductReview,
    pub author: PublicProfile,
}

/// Request body for submitting a review.
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub rating: i32,
    pub content: Option<String>,
    pub images: Option<Vec<String>>,
}

/// Ratings are whole stars, 1 through 5.
pub fn validate_rating(rating: i32) -> Result<(), AppError> {
    if !(1..=5).contains(&rating) {
        return Err(AppError::InvalidInput(
            "rating must be between 1 and 5".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ratings_in_range() {
        for rating in 1..=5 {
            assert!(validate_rating(rating).is_ok());
        }
    }

    #[test]
    fn rejects_ratings_out_of_range() {
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
        assert!(validate_rating(-3).is_err());
    }
}
