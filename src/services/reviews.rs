// Copyright (c) GlamSocial Team
// SPDX-License-Identifier: Apache-2.0

//! Product reviews. One review per (user, product); the product's `rating`
//! and `reviews_count` are derived from the review rows inside the insert
//! transaction rather than curated by hand.

use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::error::AppError;
use crate::metrics;
use crate::models::profile::PublicProfile;
use crate::models::review::{
    validate_rating, NewProductReview, ProductReview, ReviewDetail,
};
use crate::schema::{product_reviews, products, profiles};

/// A concurrent submission can slip past the existence check and trip the
/// (user, product) unique index instead; surface that as the same conflict.
fn map_duplicate_review(e: AppError) -> AppError {
    match e {
        AppError::Database(diesel::result::Error::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            _,
        )) => AppError::AlreadyExists("you have already reviewed this product"),
        other => other,
    }
}

/// Submit a review for a product.
pub async fn create(
    conn: &mut AsyncPgConnection,
    actor_id: &str,
    product_id: &str,
    rating: i32,
    content: Option<&str>,
    images: Option<&[String]>,
) -> Result<ProductReview, AppError> {
    validate_rating(rating)?;

    let product_count = products::table
        .filter(products::id.eq(product_id))
        .count()
        .get_result::<i64>(conn)
        .await?;
    if product_count == 0 {
        return Err(AppError::NotFound("product"));
    }

    let review = conn
        .build_transaction()
        .run(|conn| {
            Box::pin(async move {
                let existing = product_reviews::table
                    .filter(product_reviews::user_id.eq(actor_id))
                    .filter(product_reviews::product_id.eq(product_id))
                    .count()
                    .get_result::<i64>(conn)
                    .await?;

                if existing > 0 {
                    return Err(AppError::AlreadyExists(
                        "you have already reviewed this product",
                    ));
                }

                let review = diesel::insert_into(product_reviews::table)
                    .values(&NewProductReview {
                        product_id,
                        user_id: actor_id,
                        rating,
                        content,
                        images: images.map(<[String]>::to_vec),
                    })
                    .returning(ProductReview::as_returning())
                    .get_result::<ProductReview>(conn)
                    .await?;

                reconcile_product_aggregates(conn, product_id).await?;

                Ok(review)
            })
        })
        .await
        .map_err(map_duplicate_review)?;

    debug!(
        "Created review {} for product {} by {}",
        review.id, product_id, actor_id
    );
    metrics::record_op("review", "ok");

    Ok(review)
}

/// Reviews for a product, newest first, with reviewer profiles.
pub async fn list(
    conn: &mut AsyncPgConnection,
    product_id: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<ReviewDetail>, AppError> {
    let rows = product_reviews::table
        .inner_join(profiles::table)
        .filter(product_reviews::product_id.eq(product_id))
        .select((ProductReview::as_select(), PublicProfile::as_select()))
        .order_by(product_reviews::created_at.desc())
        .limit(limit)
        .offset(offset)
        .load::<(ProductReview, PublicProfile)>(conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(review, author)| ReviewDetail { review, author })
        .collect())
}

/// Re-derive a product's rating (mean, 0 when unreviewed) and reviews_count.
async fn reconcile_product_aggregates(
    conn: &mut AsyncPgConnection,
    product_id: &str,
) -> Result<(), diesel::result::Error> {
    diesel::sql_query(
        "UPDATE products
         SET rating = COALESCE((
                 SELECT ROUND(AVG(rating), 1) FROM product_reviews WHERE product_id = $1
             ), 0),
             reviews_count = (
                 SELECT COUNT(*) FROM product_reviews WHERE product_id = $1
             )
         WHERE id = $1",
    )
    .bind::<diesel::sql_types::Text, _>(product_id)
    .execute(conn)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_becomes_conflict() {
        let e = AppError::Database(diesel::result::Error::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(String::from(
                "duplicate key value violates unique constraint \"uq_product_reviews\"",
            )),
        ));
        assert!(matches!(
            map_duplicate_review(e),
            AppError::AlreadyExists(_)
        ));
    }

    #[test]
    fn other_errors_pass_through() {
        assert!(matches!(
            map_duplicate_review(AppError::NotFound("product")),
            AppError::NotFound(_)
        ));
    }
}
