// Copyright (c) GlamSocial Team
// SPDX-License-Identifier: Apache-2.0

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::error::AppError;
use crate::models::profile::{FaceShape, Profile, UpdateProfile};
use crate::schema::profiles;

/// Fetch a profile by id.
pub async fn get(conn: &mut AsyncPgConnection, user_id: &str) -> Result<Profile, AppError> {
    profiles::table
        .filter(profiles::id.eq(user_id))
        .first::<Profile>(conn)
        .await
        .optional()?
        .ok_or(AppError::NotFound("profile"))
}

/// Fetch a profile by username.
pub async fn get_by_username(
    conn: &mut AsyncPgConnection,
    username: &str,
) -> Result<Profile, AppError> {
    profiles::table
        .filter(profiles::username.eq(username))
        .first::<Profile>(conn)
        .await
        .optional()?
        .ok_or(AppError::NotFound("profile"))
}

/// Apply a profile edit for the actor. The face shape, when present, must be
/// one of the canonical categories; counters cannot be edited here.
pub async fn update(
    conn: &mut AsyncPgConnection,
    actor_id: &str,
    changes: UpdateProfile,
) -> Result<Profile, AppError> {
    if let Some(shape) = &changes.face_shape {
        FaceShape::parse(shape)?;
    }

    let profile = diesel::update(profiles::table.filter(profiles::id.eq(actor_id)))
        .set((&changes, profiles::updated_at.eq(Utc::now())))
        .returning(Profile::as_returning())
        .get_result::<Profile>(conn)
        .await
        .optional()?
        .ok_or(AppError::NotFound("profile"))?;

    debug!("Updated profile {}", actor_id);

    Ok(profile)
}
