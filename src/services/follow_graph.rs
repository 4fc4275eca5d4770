// Copyright (c) GlamSocial Team
// SPDX-License-Identifier: Apache-2.0

//! Follow graph operations. Unlike the post toggles, follow and unfollow are
//! explicit operations: the UI needs "already following" to be distinguishable
//! from the action itself, so a duplicate follow is a conflict rather than a
//! flip.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::error::AppError;
use crate::metrics;
use crate::models::follow::{FollowDetail, NewUserFollow};
use crate::schema::{profiles, user_follows};

/// Follow stats for a profile as stored on the profile row.
#[derive(Debug, serde::Serialize)]
pub struct FollowStats {
    pub followers_count: i32,
    pub following_count: i32,
}

/// Precondition on a follow request: the graph is irreflexive, a profile
/// never follows itself.
fn validate_follow(actor_id: &str, target_id: &str) -> Result<(), AppError> {
    if actor_id == target_id {
        return Err(AppError::InvalidOperation("cannot follow yourself"));
    }
    Ok(())
}

/// Create a follow edge from the actor to the target profile.
pub async fn follow(
    conn: &mut AsyncPgConnection,
    actor_id: &str,
    target_id: &str,
) -> Result<(), AppError> {
    if let Err(e) = validate_follow(actor_id, target_id) {
        metrics::record_op("follow", "rejected");
        return Err(e);
    }

    ensure_profile_exists(conn, target_id).await?;

    conn.build_transaction()
        .run(|conn| {
            Box::pin(async move {
                let existing = user_follows::table
                    .filter(user_follows::follower_id.eq(actor_id))
                    .filter(user_follows::following_id.eq(target_id))
                    .count()
                    .get_result::<i64>(conn)
                    .await?;

                if existing > 0 {
                    return Err(AppError::AlreadyExists("already following this user"));
                }

                diesel::insert_into(user_follows::table)
                    .values(&NewUserFollow {
                        follower_id: actor_id,
                        following_id: target_id,
                    })
                    .on_conflict((user_follows::follower_id, user_follows::following_id))
                    .do_nothing()
                    .execute(conn)
                    .await?;

                reconcile_follow_counts(conn, actor_id, target_id).await?;

                Ok(())
            })
        })
        .await?;

    debug!("Actor {} now follows {}", actor_id, target_id);
    metrics::record_op("follow", "ok");

    Ok(())
}

/// Remove the actor's follow edge to the target. Removing an absent edge is a
/// no-op success.
pub async fn unfollow(
    conn: &mut AsyncPgConnection,
    actor_id: &str,
    target_id: &str,
) -> Result<(), AppError> {
    conn.build_transaction()
        .run(|conn| {
            Box::pin(async move {
                let deleted = diesel::delete(
                    user_follows::table
                        .filter(user_follows::follower_id.eq(actor_id))
                        .filter(user_follows::following_id.eq(target_id)),
                )
                .execute(conn)
                .await?;

                if deleted == 0 {
                    debug!(
                        "Unfollow with no edge present: {} -> {}",
                        actor_id, target_id
                    );
                    return Ok::<_, AppError>(());
                }

                reconcile_follow_counts(conn, actor_id, target_id).await?;

                Ok(())
            })
        })
        .await?;

    metrics::record_op("unfollow", "ok");

    Ok(())
}

/// Whether the actor currently follows the target.
pub async fn is_following(
    conn: &mut AsyncPgConnection,
    actor_id: Option<&str>,
    target_id: &str,
) -> Result<bool, AppError> {
    let Some(actor_id) = actor_id else {
        return Ok(false);
    };
    let count = user_follows::table
        .filter(user_follows::follower_id.eq(actor_id))
        .filter(user_follows::following_id.eq(target_id))
        .count()
        .get_result::<i64>(conn)
        .await?;
    Ok(count > 0)
}

/// Profiles the given user follows, most recent edge first.
pub async fn list_following(
    conn: &mut AsyncPgConnection,
    user_id: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<FollowDetail>, AppError> {
    ensure_profile_exists(conn, user_id).await?;

    let rows = user_follows::table
        .inner_join(profiles::table.on(profiles::id.eq(user_follows::following_id)))
        .filter(user_follows::follower_id.eq(user_id))
        .select((
            profiles::id,
            profiles::username,
            profiles::display_name,
            profiles::avatar_url,
            profiles::bio,
            profiles::followers_count,
            profiles::following_count,
            profiles::posts_count,
            user_follows::created_at,
        ))
        .order_by(user_follows::created_at.desc())
        .limit(limit)
        .offset(offset)
        .load::<(
            String,
            String,
            Option<String>,
            Option<String>,
            Option<String>,
            i32,
            i32,
            i32,
            chrono::DateTime<chrono::Utc>,
        )>(conn)
        .await?;

    Ok(rows.into_iter().map(row_to_follow_detail).collect())
}

/// Profiles following the given user, most recent edge first.
pub async fn list_followers(
    conn: &mut AsyncPgConnection,
    user_id: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<FollowDetail>, AppError> {
    ensure_profile_exists(conn, user_id).await?;

    let rows = user_follows::table
        .inner_join(profiles::table.on(profiles::id.eq(user_follows::follower_id)))
        .filter(user_follows::following_id.eq(user_id))
        .select((
            profiles::id,
            profiles::username,
            profiles::display_name,
            profiles::avatar_url,
            profiles::bio,
            profiles::followers_count,
            profiles::following_count,
            profiles::posts_count,
            user_follows::created_at,
        ))
        .order_by(user_follows::created_at.desc())
        .limit(limit)
        .offset(offset)
        .load::<(
            String,
            String,
            Option<String>,
            Option<String>,
            Option<String>,
            i32,
            i32,
            i32,
            chrono::DateTime<chrono::Utc>,
        )>(conn)
        .await?;

    Ok(rows.into_iter().map(row_to_follow_detail).collect())
}

/// Stored follow counters for a profile.
pub async fn follow_stats(
    conn: &mut AsyncPgConnection,
    user_id: &str,
) -> Result<FollowStats, AppError> {
    let (followers_count, following_count) = profiles::table
        .filter(profiles::id.eq(user_id))
        .select((profiles::followers_count, profiles::following_count))
        .first::<(i32, i32)>(conn)
        .await
        .optional()?
        .ok_or(AppError::NotFound("profile"))?;

    Ok(FollowStats {
        followers_count,
        following_count,
    })
}

pub(crate) async fn ensure_profile_exists(
    conn: &mut AsyncPgConnection,
    user_id: &str,
) -> Result<(), AppError> {
    let count = profiles::table
        .filter(profiles::id.eq(user_id))
        .count()
        .get_result::<i64>(conn)
        .await?;
    if count == 0 {
        return Err(AppError::NotFound("profile"));
    }
    Ok(())
}

/// Recompute both endpoints' counters from the edge table.
async fn reconcile_follow_counts(
    conn: &mut AsyncPgConnection,
    follower_id: &str,
    following_id: &str,
) -> Result<(), diesel::result::Error> {
    diesel::sql_query(
        "UPDATE profiles
         SET following_count = (
             SELECT COUNT(*) FROM user_follows WHERE follower_id = $1
         )
         WHERE id = $1",
    )
    .bind::<diesel::sql_types::Text, _>(follower_id)
    .execute(conn)
    .await?;

    diesel::sql_query(
        "UPDATE profiles
         SET followers_count = (
             SELECT COUNT(*) FROM user_follows WHERE following_id = $1
         )
         WHERE id = $1",
    )
    .bind::<diesel::sql_types::Text, _>(following_id)
    .execute(conn)
    .await?;

    Ok(())
}

#[allow(clippy::type_complexity)]
fn row_to_follow_detail(
    row: (
        String,
        String,
        Option<String>,
        Option<String>,
        Option<String>,
        i32,
        i32,
        i32,
        chrono::DateTime<chrono::Utc>,
    ),
) -> FollowDetail {
    let (
        id,
        username,
        display_name,
        avatar_url,
        bio,
        followers_count,
        following_count,
        posts_count,
        followed_at,
    ) = row;
    FollowDetail {
        id,
        username,
        display_name,
        avatar_url,
        bio,
        followers_count,
        following_count,
        posts_count,
        followed_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_self_follow() {
        assert!(matches!(
            validate_follow("user-1", "user-1"),
            Err(AppError::InvalidOperation(_))
        ));
    }

    #[test]
    fn accepts_distinct_profiles() {
        assert!(validate_follow("user-1", "user-2").is_ok());
    }
}
