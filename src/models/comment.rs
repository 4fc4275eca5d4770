// Copyright (c) GlamSocial Team
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::profile::PublicProfile;
use crate::schema::comments;

/// Maximum accepted comment length, in characters.
pub const MAX_COMMENT_CHARS: usize = 500;

#[derive(Debug, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = comments)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub content: String,
    pub parent_id: Option<String>,
    pub likes_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = comments)]
pub struct NewComment<'a> {
    pub post_id: &'a str,
    pub author_id: &'a str,
    pub content: &'a str,
    pub parent_id: Option<&'a str>,
}

/// A comment joined with its author's public profile.
#[derive(Debug, Serialize)]
pub struct CommentDetail {
    #[serde(flatten)]
    pub comment: Comment,
    pub author: PublicProfile,
}

/// Request body for posting a comment or a reply.
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
    pub parent_id: Option<String>,
}

/// Validate and normalize comment content: trimmed, non-empty, at most
/// `MAX_COMMENT_CHARS` characters.
pub fn validate_content(content: &str) -> Result<&str, AppError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput("comment must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_COMMENT_CHARS {
        return Err(AppError::InvalidInput(format!(
            "comment must be at most {} characters",
            MAX_COMMENT_CHARS
        )));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_whitespace_content() {
        assert!(validate_content("").is_err());
        assert!(validate_content("   \n\t ").is_err());
    }

    #[test]
    fn accepts_exactly_max_length() {
        let content = "x".repeat(MAX_COMMENT_CHARS);
        assert_eq!(validate_content(&content).unwrap(), content);
    }

    #[test]
    fn rejects_one_over_max_length() {
        let content = "x".repeat(MAX_COMMENT_CHARS + 1);
        assert!(matches!(
            validate_content(&content),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(validate_content("  hello  ").unwrap(), "hello");
    }

    #[test]
    fn length_is_counted_in_characters_not_bytes() {
        // 500 CJK characters exceed 500 bytes but are still a valid comment.
        let content = "妆".repeat(MAX_COMMENT_CHARS);
        assert!(validate_content(&content).is_ok());
    }
}
