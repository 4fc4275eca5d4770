// Copyright (c) GlamSocial Team
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::schema::profiles;

/// The six face-shape categories the app classifies against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceShape {
    Round,
    Square,
    Oval,
    Long,
    Heart,
    Diamond,
}

impl FaceShape {
    pub const ALL: [FaceShape; 6] = [
        FaceShape::Round,
        FaceShape::Square,
        FaceShape::Oval,
        FaceShape::Long,
        FaceShape::Heart,
        FaceShape::Diamond,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FaceShape::Round => "round",
            FaceShape::Square => "square",
            FaceShape::Oval => "oval",
            FaceShape::Long => "long",
            FaceShape::Heart => "heart",
            FaceShape::Diamond => "diamond",
        }
    }

    pub fn parse(value: &str) -> Result<FaceShape, AppError> {
        Self::ALL
            .iter()
            .copied()
            .find(|shape| shape.as_str() == value)
            .ok_or_else(|| AppError::InvalidInput(format!("unknown face shape: {}", value)))
    }
}

#[derive(Debug, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = profiles)]
pub struct Profile {
    pub id: String,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub skin_type: Option<String>,
    pub face_shape: Option<String>,
    // Denormalized social statistics, reconciled from the edge tables
    pub followers_count: i32,
    pub following_count: i32,
    pub posts_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for a profile edit. Counter fields are deliberately absent;
/// counters change only through edge mutations and reconciliation.
#[derive(Debug, AsChangeset, Deserialize)]
#[diesel(table_name = profiles)]
pub struct UpdateProfile {
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub skin_type: Option<String>,
    pub face_shape: Option<String>,
}

/// The public subset of profile fields joined onto posts, comments and
/// follow listings.
#[derive(Debug, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = profiles)]
pub struct PublicProfile {
    pub id: String,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_shape_parses_canonical_values() {
        for shape in FaceShape::ALL {
            assert_eq!(FaceShape::parse(shape.as_str()).unwrap(), shape);
        }
    }

    #[test]
    fn face_shape_rejects_unknown_value() {
        assert!(matches!(
            FaceShape::parse("triangular"),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn face_shape_serializes_lowercase() {
        let json = serde_json::to_string(&FaceShape::Heart).unwrap();
        assert_eq!(json, "\"heart\"");
    }
}
