// Copyright (c) GlamSocial Team
// SPDX-License-Identifier: Apache-2.0

//! Like and favorite toggles. A toggle flips edge presence for the
//! (actor, post) pair and reconciles the post's counter in the same
//! transaction, so two successive toggles always net out to zero.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::error::AppError;
use crate::metrics;
use crate::models::engagement::{NewPostFavorite, NewPostLike, ToggleOutcome};
use crate::models::post::Post;
use crate::models::profile::PublicProfile;
use crate::schema::{post_favorites, post_likes, posts, profiles};

/// Toggle the actor's like on a post. Returns the resulting state and the
/// reconciled counter.
pub async fn toggle_like(
    conn: &mut AsyncPgConnection,
    actor_id: &str,
    post_id: &str,
) -> Result<ToggleOutcome, AppError> {
    ensure_post_exists(conn, post_id).await?;

    let outcome = conn
        .build_transaction()
        .run(|conn| {
            Box::pin(async move {
                let existing = post_likes::table
                    .filter(post_likes::user_id.eq(actor_id))
                    .filter(post_likes::post_id.eq(post_id))
                    .count()
                    .get_result::<i64>(conn)
                    .await?;

                let active = if existing > 0 {
                    diesel::delete(
                        post_likes::table
                            .filter(post_likes::user_id.eq(actor_id))
                            .filter(post_likes::post_id.eq(post_id)),
                    )
                    .execute(conn)
                    .await?;
                    false
                } else {
                    // The unique index on (user_id, post_id) absorbs the race
                    // where two toggles from the same actor interleave.
                    diesel::insert_into(post_likes::table)
                        .values(&NewPostLike {
                            user_id: actor_id,
                            post_id,
                        })
                        .on_conflict((post_likes::user_id, post_likes::post_id))
                        .do_nothing()
                        .execute(conn)
                        .await?;
                    true
                };

                let count = reconcile_likes_count(conn, post_id).await?;
                Ok::<_, AppError>(ToggleOutcome { active, count })
            })
        })
        .await?;

    debug!(
        "Toggled like for actor {} on post {}: active={}, likes_count={}",
        actor_id, post_id, outcome.active, outcome.count
    );
    metrics::record_op("like", "ok");

    Ok(outcome)
}

/// Toggle the actor's favorite on a post.
pub async fn toggle_favorite(
    conn: &mut AsyncPgConnection,
    actor_id: &str,
    post_id: &str,
) -> Result<ToggleOutcome, AppError> {
    ensure_post_exists(conn, post_id).await?;

    let outcome = conn
        .build_transaction()
        .run(|conn| {
            Box::pin(async move {
                let existing = post_favorites::table
                    .filter(post_favorites::user_id.eq(actor_id))
                    .filter(post_favorites::post_id.eq(post_id))
                    .count()
                    .get_result::<i64>(conn)
                    .await?;

                let active = if existing > 0 {
                    diesel::delete(
                        post_favorites::table
                            .filter(post_favorites::user_id.eq(actor_id))
                            .filter(post_favorites::post_id.eq(post_id)),
                    )
                    .execute(conn)
                    .await?;
                    false
                } else {
                    diesel::insert_into(post_favorites::table)
                        .values(&NewPostFavorite {
                            user_id: actor_id,
                            post_id,
                        })
                        .on_conflict((post_favorites::user_id, post_favorites::post_id))
                        .do_nothing()
                        .execute(conn)
                        .await?;
                    true
                };

                let count = reconcile_favorites_count(conn, post_id).await?;
                Ok::<_, AppError>(ToggleOutcome { active, count })
            })
        })
        .await?;

    debug!(
        "Toggled favorite for actor {} on post {}: active={}, favorites_count={}",
        actor_id, post_id, outcome.active, outcome.count
    );
    metrics::record_op("favorite", "ok");

    Ok(outcome)
}

/// Whether the actor has liked the post. `None` actor reports false.
pub async fn is_liked(
    conn: &mut AsyncPgConnection,
    actor_id: Option<&str>,
    post_id: &str,
) -> Result<bool, AppError> {
    let Some(actor_id) = actor_id else {
        return Ok(false);
    };
    let count = post_likes::table
        .filter(post_likes::user_id.eq(actor_id))
        .filter(post_likes::post_id.eq(post_id))
        .count()
        .get_result::<i64>(conn)
        .await?;
    Ok(count > 0)
}

/// Whether the actor has favorited the post. `None` actor reports false.
pub async fn is_favorited(
    conn: &mut AsyncPgConnection,
    actor_id: Option<&str>,
    post_id: &str,
) -> Result<bool, AppError> {
    let Some(actor_id) = actor_id else {
        return Ok(false);
    };
    let count = post_favorites::table
        .filter(post_favorites::user_id.eq(actor_id))
        .filter(post_favorites::post_id.eq(post_id))
        .count()
        .get_result::<i64>(conn)
        .await?;
    Ok(count > 0)
}

/// The actor's favorited posts, most recently favorited first, joined with
/// each post's author.
pub async fn list_favorites(
    conn: &mut AsyncPgConnection,
    actor_id: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<(Post, PublicProfile)>, AppError> {
    let rows = post_favorites::table
        .inner_join(posts::table)
        .inner_join(profiles::table.on(profiles::id.eq(posts::author_id)))
        .filter(post_favorites::user_id.eq(actor_id))
        .select((Post::as_select(), PublicProfile::as_select()))
        .order_by(post_favorites::created_at.desc())
        .limit(limit)
        .offset(offset)
        .load::<(Post, PublicProfile)>(conn)
        .await?;
    Ok(rows)
}

pub(crate) async fn ensure_post_exists(
    conn: &mut AsyncPgConnection,
    post_id: &str,
) -> Result<(), AppError> {
    let count = posts::table
        .filter(posts::id.eq(post_id))
        .count()
        .get_result::<i64>(conn)
        .await?;
    if count == 0 {
        return Err(AppError::NotFound("post"));
    }
    Ok(())
}

/// Recompute a post's likes_count from the edge table and return it.
async fn reconcile_likes_count(
    conn: &mut AsyncPgConnection,
    post_id: &str,
) -> Result<i32, diesel::result::Error> {
    diesel::sql_query(
        "UPDATE posts
         SET likes_count = (
             SELECT COUNT(*) FROM post_likes WHERE post_id = $1
         )
         WHERE id = $1",
    )
    .bind::<diesel::sql_types::Text, _>(post_id)
    .execute(conn)
    .await?;

    posts::table
        .filter(posts::id.eq(post_id))
        .select(posts::likes_count)
        .first::<i32>(conn)
        .await
}

/// Recompute a post's favorites_count from the edge table and return it.
async fn reconcile_favorites_count(
    conn: &mut AsyncPgConnection,
    post_id: &str,
) -> Result<i32, diesel::result::Error> {
    diesel::sql_query(
        "UPDATE posts
         SET favorites_count = (
             SELECT COUNT(*) FROM post_favorites WHERE post_id = $1
         )
         WHERE id = $1",
    )
    .bind::<diesel::sql_types::Text, _>(post_id)
    .execute(conn)
    .await?;

    posts::table
        .filter(posts::id.eq(post_id))
        .select(posts::favorites_count)
        .first::<i32>(conn)
        .await
}
