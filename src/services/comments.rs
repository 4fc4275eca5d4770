// Copyright (c) GlamSocial Team
// SPDX-License-Identifier: Apache-2.0

//! Comment threads. Nesting is capped at one level: a reply's parent must be
//! a top-level comment on the same post. Deleting a parent removes its
//! replies with it, and the post's comment counter is reconciled in the same
//! transaction as every mutation.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::error::AppError;
use crate::metrics;
use crate::models::comment::{validate_content, Comment, CommentDetail, NewComment};
use crate::models::engagement::{NewCommentLike, ToggleOutcome};
use crate::models::profile::PublicProfile;
use crate::schema::{comment_likes, comments, profiles};
use crate::services::engagement::ensure_post_exists;

/// Post a comment, or a reply when `parent_id` is given.
pub async fn create(
    conn: &mut AsyncPgConnection,
    actor_id: &str,
    post_id: &str,
    content: &str,
    parent_id: Option<&str>,
) -> Result<CommentDetail, AppError> {
    let content = validate_content(content)?;

    ensure_post_exists(conn, post_id).await?;

    if let Some(parent_id) = parent_id {
        let parent = comments::table
            .filter(comments::id.eq(parent_id))
            .select((comments::post_id, comments::parent_id))
            .first::<(String, Option<String>)>(conn)
            .await
            .optional()?;

        match parent {
            None => return Err(AppError::NotFound("parent comment")),
            Some((parent_post, _)) if parent_post != post_id => {
                return Err(AppError::InvalidInput(
                    "parent comment belongs to a different post".into(),
                ));
            }
            Some((_, Some(_))) => {
                // One level of nesting only: replies to replies are rejected.
                return Err(AppError::InvalidInput(
                    "replies to replies are not supported".into(),
                ));
            }
            Some(_) => {}
        }
    }

    let comment = conn
        .build_transaction()
        .run(|conn| {
            Box::pin(async move {
                let comment = diesel::insert_into(comments::table)
                    .values(&NewComment {
                        post_id,
                        author_id: actor_id,
                        content,
                        parent_id,
                    })
                    .returning(Comment::as_returning())
                    .get_result::<Comment>(conn)
                    .await?;

                reconcile_comments_count(conn, post_id).await?;

                Ok::<_, AppError>(comment)
            })
        })
        .await?;

    let author = profiles::table
        .filter(profiles::id.eq(actor_id))
        .select(PublicProfile::as_select())
        .first::<PublicProfile>(conn)
        .await?;

    debug!(
        "Created comment {} on post {} (reply: {})",
        comment.id,
        post_id,
        comment.parent_id.is_some()
    );
    metrics::record_op("comment", "ok");

    Ok(CommentDetail { comment, author })
}

/// Delete a comment. Only the author may delete; replies go with the parent.
pub async fn delete(
    conn: &mut AsyncPgConnection,
    actor_id: &str,
    comment_id: &str,
) -> Result<(), AppError> {
    let (author_id, post_id) = comments::table
        .filter(comments::id.eq(comment_id))
        .select((comments::author_id, comments::post_id))
        .first::<(String, String)>(conn)
        .await
        .optional()?
        .ok_or(AppError::NotFound("comment"))?;

    if author_id != actor_id {
        metrics::record_op("comment_delete", "rejected");
        return Err(AppError::Forbidden);
    }

    let post_id_ref = post_id.as_str();
    conn.build_transaction()
        .run(|conn| {
            Box::pin(async move {
                // Replies first, then the comment itself; the FK cascade on
                // comment_likes clears any likes on the removed rows.
                diesel::delete(comments::table.filter(comments::parent_id.eq(comment_id)))
                    .execute(conn)
                    .await?;
                diesel::delete(comments::table.filter(comments::id.eq(comment_id)))
                    .execute(conn)
                    .await?;

                reconcile_comments_count(conn, post_id_ref).await?;

                Ok::<_, AppError>(())
            })
        })
        .await?;

    debug!("Deleted comment {} from post {}", comment_id, post_id);
    metrics::record_op("comment_delete", "ok");

    Ok(())
}

/// Top-level comments for a post, newest first, with author profiles.
pub async fn list(
    conn: &mut AsyncPgConnection,
    post_id: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<CommentDetail>, AppError> {
    ensure_post_exists(conn, post_id).await?;

    let rows = comments::table
        .inner_join(profiles::table)
        .filter(comments::post_id.eq(post_id))
        .filter(comments::parent_id.is_null())
        .select((Comment::as_select(), PublicProfile::as_select()))
        .order_by(comments::created_at.desc())
        .limit(limit)
        .offset(offset)
        .load::<(Comment, PublicProfile)>(conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(comment, author)| CommentDetail { comment, author })
        .collect())
}

/// Replies to a comment in chronological thread order, with author profiles.
pub async fn list_replies(
    conn: &mut AsyncPgConnection,
    parent_id: &str,
) -> Result<Vec<CommentDetail>, AppError> {
    ensure_comment_exists(conn, parent_id).await?;

    let rows = comments::table
        .inner_join(profiles::table)
        .filter(comments::parent_id.eq(parent_id))
        .select((Comment::as_select(), PublicProfile::as_select()))
        .order_by(comments::created_at.asc())
        .load::<(Comment, PublicProfile)>(conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(comment, author)| CommentDetail { comment, author })
        .collect())
}

/// Toggle the actor's like on a comment; same semantics as the post toggle.
pub async fn toggle_like(
    conn: &mut AsyncPgConnection,
    actor_id: &str,
    comment_id: &str,
) -> Result<ToggleOutcome, AppError> {
    ensure_comment_exists(conn, comment_id).await?;

    let outcome = conn
        .build_transaction()
        .run(|conn| {
            Box::pin(async move {
                let existing = comment_likes::table
                    .filter(comment_likes::user_id.eq(actor_id))
                    .filter(comment_likes::comment_id.eq(comment_id))
                    .count()
                    .get_result::<i64>(conn)
                    .await?;

                let active = if existing > 0 {
                    diesel::delete(
                        comment_likes::table
                            .filter(comment_likes::user_id.eq(actor_id))
                            .filter(comment_likes::comment_id.eq(comment_id)),
                    )
                    .execute(conn)
                    .await?;
                    false
                } else {
                    diesel::insert_into(comment_likes::table)
                        .values(&NewCommentLike {
                            user_id: actor_id,
                            comment_id,
                        })
                        .on_conflict((comment_likes::user_id, comment_likes::comment_id))
                        .do_nothing()
                        .execute(conn)
                        .await?;
                    true
                };

                let count = reconcile_comment_likes_count(conn, comment_id).await?;
                Ok::<_, AppError>(ToggleOutcome { active, count })
            })
        })
        .await?;

    metrics::record_op("comment_like", "ok");

    Ok(outcome)
}

async fn ensure_comment_exists(
    conn: &mut AsyncPgConnection,
    comment_id: &str,
) -> Result<(), AppError> {
    let count = comments::table
        .filter(comments::id.eq(comment_id))
        .count()
        .get_result::<i64>(conn)
        .await?;
    if count == 0 {
        return Err(AppError::NotFound("comment"));
    }
    Ok(())
}

/// Recompute a post's comments_count from the comment rows.
async fn reconcile_comments_count(
    conn: &mut AsyncPgConnection,
    post_id: &str,
) -> Result<(), diesel::result::Error> {
    diesel::sql_query(
        "UPDATE posts
         SET comments_count = (
             SELECT COUNT(*) FROM comments WHERE post_id = $1
         )
         WHERE id = $1",
    )
    .bind::<diesel::sql_types::Text, _>(post_id)
    .execute(conn)
    .await?;
    Ok(())
}

/// Recompute a comment's likes_count from the edge table and return it.
async fn reconcile_comment_likes_count(
    conn: &mut AsyncPgConnection,
    comment_id: &str,
) -> Result<i32, diesel::result::Error> {
    diesel::sql_query(
        "UPDATE comments
         SET likes_count = (
             SELECT COUNT(*) FROM comment_likes WHERE comment_id = $1
         )
         WHERE id = $1",
    )
    .bind::<diesel::sql_types::Text, _>(comment_id)
    .execute(conn)
    .await?;

    comments::table
        .filter(comments::id.eq(comment_id))
        .select(comments::likes_count)
        .first::<i32>(conn)
        .await
}
