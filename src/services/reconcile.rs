// Copyright (c) GlamSocial Team
// SPDX-License-Identifier: Apache-2.0

//! Periodic counter reconciliation. Per-mutation reconciliation keeps
//! counters correct along the happy path; this task heals any drift left by
//! crashes or out-of-band writes by re-deriving every denormalized counter
//! from its edge table.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::{debug, error, info};

use crate::config::Config;
use crate::db::Database;
use crate::metrics;

/// Run the reconciliation loop until the process exits.
pub async fn run_loop(db: Arc<Database>) {
    let config = Config::get();
    let mut ticker = tokio::time::interval(Duration::from_secs(config.reconciler.interval_secs));

    info!(
        "Counter reconciler started (interval: {}s)",
        config.reconciler.interval_secs
    );

    loop {
        ticker.tick().await;

        match run_pass(&db).await {
            Ok(healed) if healed > 0 => {
                info!("Reconciliation pass healed {} counter rows", healed);
            }
            Ok(_) => debug!("Reconciliation pass found no drift"),
            Err(e) => error!("Reconciliation pass failed: {}", e),
        }
    }
}

/// One full pass over every denormalized counter. Returns the number of rows
/// whose stored counter disagreed with its edge table.
pub async fn run_pass(db: &Database) -> Result<usize> {
    let mut conn = db.get_connection().await?;

    let mut healed = 0;
    healed += heal(&mut conn, "posts.likes_count", POSTS_LIKES).await?;
    healed += heal(&mut conn, "posts.favorites_count", POSTS_FAVORITES).await?;
    healed += heal(&mut conn, "posts.comments_count", POSTS_COMMENTS).await?;
    healed += heal(&mut conn, "comments.likes_count", COMMENT_LIKES).await?;
    healed += heal(&mut conn, "profiles.followers_count", PROFILE_FOLLOWERS).await?;
    healed += heal(&mut conn, "profiles.following_count", PROFILE_FOLLOWING).await?;
    healed += heal(&mut conn, "profiles.posts_count", PROFILE_POSTS).await?;
    healed += heal(&mut conn, "products.review_aggregates", PRODUCT_REVIEWS).await?;

    Ok(healed)
}

async fn heal(conn: &mut AsyncPgConnection, what: &str, statement: &str) -> Result<usize> {
    let rows = diesel::sql_query(statement).execute(conn).await?;
    if rows > 0 {
        debug!("Reconciled {} rows for {}", rows, what);
    }
    let table = what.split('.').next().unwrap_or(what);
    metrics::RECONCILED_ROWS
        .with_label_values(&[table])
        .set(rows as i64);
    Ok(rows)
}

// Each statement only touches rows whose stored value disagrees with the
// derived one, so the affected-row count is the drift measure.

const POSTS_LIKES: &str = "
    UPDATE posts SET likes_count = sub.cnt
    FROM (
        SELECT p.id, COUNT(e.id)::int AS cnt
        FROM posts p LEFT JOIN post_likes e ON e.post_id = p.id
        GROUP BY p.id
    ) sub
    WHERE posts.id = sub.id AND posts.likes_count <> sub.cnt";

const POSTS_FAVORITES: &str = "
    UPDATE posts SET favorites_count = sub.cnt
    FROM (
        SELECT p.id, COUNT(e.id)::int AS cnt
        FROM posts p LEFT JOIN post_favorites e ON e.post_id = p.id
        GROUP BY p.id
    ) sub
    WHERE posts.id = sub.id AND posts.favorites_count <> sub.cnt";

const POSTS_COMMENTS: &str = "
    UPDATE posts SET comments_count = sub.cnt
    FROM (
        SELECT p.id, COUNT(c.id)::int AS cnt
        FROM posts p LEFT JOIN comments c ON c.post_id = p.id
        GROUP BY p.id
    ) sub
    WHERE posts.id = sub.id AND posts.comments_count <> sub.cnt";

const COMMENT_LIKES: &str = "
    UPDATE comments SET likes_count = sub.cnt
    FROM (
        SELECT c.id, COUNT(e.id)::int AS cnt
        FROM comments c LEFT JOIN comment_likes e ON e.comment_id = c.id
        GROUP BY c.id
    ) sub
    WHERE comments.id = sub.id AND comments.likes_count <> sub.cnt";

const PROFILE_FOLLOWERS: &str = "
    UPDATE profiles SET followers_count = sub.cnt
    FROM (
        SELECT pr.id, COUNT(f.id)::int AS cnt
        FROM profiles pr LEFT JOIN user_follows f ON f.following_id = pr.id
        GROUP BY pr.id
    ) sub
    WHERE profiles.id = sub.id AND profiles.followers_count <> sub.cnt";

const PROFILE_FOLLOWING: &str = "
    UPDATE profiles SET following_count = sub.cnt
    FROM (
        SELECT pr.id, COUNT(f.id)::int AS cnt
        FROM profiles pr LEFT JOIN user_follows f ON f.follower_id = pr.id
        GROUP BY pr.id
    ) sub
    WHERE profiles.id = sub.id AND profiles.following_count <> sub.cnt";

const PROFILE_POSTS: &str = "
    UPDATE profiles SET posts_count = sub.cnt
    FROM (
        SELECT pr.id, COUNT(p.id)::int AS cnt
        FROM profiles pr LEFT JOIN posts p
            ON p.author_id = pr.id AND p.status = 'published'
        GROUP BY pr.id
    ) sub
    WHERE profiles.id = sub.id AND profiles.posts_count <> sub.cnt";

const PRODUCT_REVIEWS: &str = "
    UPDATE products SET rating = sub.avg_rating, reviews_count = sub.cnt
    FROM (
        SELECT pr.id,
               COALESCE(ROUND(AVG(r.rating), 1), 0) AS avg_rating,
               COUNT(r.id)::int AS cnt
        FROM products pr LEFT JOIN product_reviews r ON r.product_id = pr.id
        GROUP BY pr.id
    ) sub
    WHERE products.id = sub.id
      AND (products.rating <> sub.avg_rating OR products.reviews_count <> sub.cnt)";
