// Copyright (c) GlamSocial Team
// SPDX-License-Identifier: Apache-2.0

//! Post creation and listing. The author's `posts_count` covers published
//! posts and is reconciled in the creation transaction; `views_count` is
//! bumped with a single atomic update.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::error::AppError;
use crate::models::post::{
    CreatePostRequest, NewPost, Post, PostDetail, STATUS_DRAFT, STATUS_PUBLISHED,
};
use crate::models::profile::{FaceShape, PublicProfile};
use crate::schema::{posts, profiles};

/// Create a post for the actor.
pub async fn create(
    conn: &mut AsyncPgConnection,
    actor_id: &str,
    request: CreatePostRequest,
) -> Result<Post, AppError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(AppError::InvalidInput("title must not be empty".into()));
    }
    if request.category.trim().is_empty() {
        return Err(AppError::InvalidInput("category must not be empty".into()));
    }
    if let Some(shape) = &request.face_shape {
        FaceShape::parse(shape)?;
    }

    let status = if request.publish.unwrap_or(true) {
        STATUS_PUBLISHED
    } else {
        STATUS_DRAFT
    };

    let new_post = NewPost {
        author_id: actor_id.to_string(),
        title: title.to_string(),
        description: request.description,
        steps: request
            .steps
            .map(|steps| serde_json::Value::from(steps)),
        cover_image: request.cover_image,
        category: request.category,
        face_shape: request.face_shape,
        tags: request.tags,
        status: status.to_string(),
    };

    let post = conn
        .build_transaction()
        .run(|conn| {
            Box::pin(async move {
                let post = diesel::insert_into(posts::table)
                    .values(&new_post)
                    .returning(Post::as_returning())
                    .get_result::<Post>(conn)
                    .await?;

                reconcile_posts_count(conn, actor_id).await?;

                Ok::<_, AppError>(post)
            })
        })
        .await?;

    debug!("Created post {} by {} ({})", post.id, actor_id, post.status);

    Ok(post)
}

/// Published posts, newest first, optionally filtered by scenario category.
pub async fn list_recent(
    conn: &mut AsyncPgConnection,
    category: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostDetail>, AppError> {
    let mut query = posts::table
        .inner_join(profiles::table)
        .filter(posts::status.eq(STATUS_PUBLISHED))
        .select((Post::as_select(), PublicProfile::as_select()))
        .into_boxed();

    if let Some(category) = category {
        query = query.filter(posts::category.eq(category.to_string()));
    }

    let rows = query
        .order_by(posts::created_at.desc())
        .limit(limit)
        .offset(offset)
        .load::<(Post, PublicProfile)>(conn)
        .await?;

    Ok(rows.into_iter().map(into_detail).collect())
}

/// Published posts tagged for a face shape, most liked first.
pub async fn list_by_face_shape(
    conn: &mut AsyncPgConnection,
    face_shape: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostDetail>, AppError> {
    let shape = FaceShape::parse(face_shape)?;

    let rows = posts::table
        .inner_join(profiles::table)
        .filter(posts::status.eq(STATUS_PUBLISHED))
        .filter(posts::face_shape.eq(shape.as_str()))
        .select((Post::as_select(), PublicProfile::as_select()))
        .order_by(posts::likes_count.desc())
        .limit(limit)
        .offset(offset)
        .load::<(Post, PublicProfile)>(conn)
        .await?;

    Ok(rows.into_iter().map(into_detail).collect())
}

/// The featured pick: the most viewed featured published post, if any.
pub async fn featured(conn: &mut AsyncPgConnection) -> Result<Option<PostDetail>, AppError> {
    let row = posts::table
        .inner_join(profiles::table)
        .filter(posts::status.eq(STATUS_PUBLISHED))
        .filter(posts::is_featured.eq(true))
        .select((Post::as_select(), PublicProfile::as_select()))
        .order_by(posts::views_count.desc())
        .first::<(Post, PublicProfile)>(conn)
        .await
        .optional()?;

    Ok(row.map(into_detail))
}

/// Published posts by an author, newest first.
pub async fn list_by_author(
    conn: &mut AsyncPgConnection,
    author_id: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostDetail>, AppError> {
    let rows = posts::table
        .inner_join(profiles::table)
        .filter(posts::author_id.eq(author_id))
        .filter(posts::status.eq(STATUS_PUBLISHED))
        .select((Post::as_select(), PublicProfile::as_select()))
        .order_by(posts::created_at.desc())
        .limit(limit)
        .offset(offset)
        .load::<(Post, PublicProfile)>(conn)
        .await?;

    Ok(rows.into_iter().map(into_detail).collect())
}

/// A single post with its author.
pub async fn get(conn: &mut AsyncPgConnection, post_id: &str) -> Result<PostDetail, AppError> {
    let row = posts::table
        .inner_join(profiles::table)
        .filter(posts::id.eq(post_id))
        .select((Post::as_select(), PublicProfile::as_select()))
        .first::<(Post, PublicProfile)>(conn)
        .await
        .optional()?
        .ok_or(AppError::NotFound("post"))?;

    Ok(into_detail(row))
}

/// Atomically bump a post's view counter.
pub async fn increment_views(
    conn: &mut AsyncPgConnection,
    post_id: &str,
) -> Result<i32, AppError> {
    let views = diesel::update(posts::table.filter(posts::id.eq(post_id)))
        .set(posts::views_count.eq(posts::views_count + 1))
        .returning(posts::views_count)
        .get_result::<i32>(conn)
        .await
        .optional()?
        .ok_or(AppError::NotFound("post"))?;

    Ok(views)
}

/// Recompute an author's published post count.
async fn reconcile_posts_count(
    conn: &mut AsyncPgConnection,
    author_id: &str,
) -> Result<(), diesel::result::Error> {
    diesel::sql_query(
        "UPDATE profiles
         SET posts_count = (
             SELECT COUNT(*) FROM posts
             WHERE author_id = $1 AND status = 'published'
         )
         WHERE id = $1",
    )
    .bind::<diesel::sql_types::Text, _>(author_id)
    .execute(conn)
    .await?;
    Ok(())
}

fn into_detail((post, author): (Post, PublicProfile)) -> PostDetail {
    PostDetail { post, author }
}
