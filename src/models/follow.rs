// Copyright (c) GlamSocial Team
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::user_follows;

/// A new follow edge: at most one per ordered (follower, following) pair,
/// and never reflexive.
#[derive(Debug, Insertable)]
#[diesel(table_name = user_follows)]
pub struct NewUserFollow<'a> {
    pub follower_id: &'a str,
    pub following_id: &'a str,
}

/// A follower/following list entry: the counterpart profile plus when the
/// edge was created.
#[derive(Debug, Serialize, Deserialize)]
pub struct FollowDetail {
    pub id: String,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub followers_count: i32,
    pub following_count: i32,
    pub posts_count: i32,
    pub followed_at: DateTime<Utc>,
}
