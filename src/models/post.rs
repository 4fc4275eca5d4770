// Copyright (c) GlamSocial Team
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::profile::PublicProfile;
use crate::schema::posts;

pub const STATUS_PUBLISHED: &str = "published";
pub const STATUS_DRAFT: &str = "draft";

/// A makeup tutorial post.
#[derive(Debug, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = posts)]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub description: Option<String>,
    /// Ordered tutorial steps, stored as a JSON array of step descriptions.
    pub steps: Option<serde_json::Value>,
    pub cover_image: Option<String>,
    pub category: String,
    pub face_shape: Option<String>,
    pub tags: Option<Vec<String>>,
    pub likes_count: i32,
    pub views_count: i32,
    pub comments_count: i32,
    pub favorites_count: i32,
    pub is_featured: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = posts)]
pub struct NewPost {
    pub author_id: String,
    pub title: String,
    pub description: Option<String>,
    pub steps: Option<serde_json::Value>,
    pub cover_image: Option<String>,
    pub category: String,
    pub face_shape: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: String,
}

/// Request body for creating a post.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub description: Option<String>,
    pub steps: Option<Vec<String>>,
    pub cover_image: Option<String>,
    pub category: String,
    pub face_shape: Option<String>,
    pub tags: Option<Vec<String>>,
    pub publish: Option<bool>,
}

/// A post joined with its author's public profile.
#[derive(Debug, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    pub author: PublicProfile,
}

/// Query parameters for post listings.
#[derive(Debug, Default, Deserialize)]
pub struct PostsQuery {
    pub category: Option<String>,
    pub face_shape: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
