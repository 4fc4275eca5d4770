// Copyright (c) GlamSocial Team
// SPDX-License-Identifier: Apache-2.0

use diesel::prelude::*;
use serde::Serialize;

use crate::schema::{comment_likes, post_favorites, post_likes};

/// A new like edge connecting a user to a post. At most one per (user, post).
#[derive(Debug, Insertable)]
#[diesel(table_name = post_likes)]
pub struct NewPostLike<'a> {
    pub user_id: &'a str,
    pub post_id: &'a str,
}

/// A new favorite edge. Same uniqueness rule as likes.
#[derive(Debug, Insertable)]
#[diesel(table_name = post_favorites)]
pub struct NewPostFavorite<'a> {
    pub user_id: &'a str,
    pub post_id: &'a str,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = comment_likes)]
pub struct NewCommentLike<'a> {
    pub user_id: &'a str,
    pub comment_id: &'a str,
}

/// Result of a toggle operation: the state the edge is in after the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToggleOutcome {
    pub active: bool,
    pub count: i32,
}
