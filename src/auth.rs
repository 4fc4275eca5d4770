// Copyright (c) GlamSocial Team
// SPDX-License-Identifier: Apache-2.0

//! Identity boundary: the only primitive the engagement core needs is
//! "current actor id or none". The id is forwarded by the auth gateway in the
//! `x-actor-id` header after it has validated the session token.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

pub const ACTOR_HEADER: &str = "x-actor-id";

const SYNTHETIC_EMAIL_DOMAIN: &str = "app.local";

/// The authenticated actor. Extraction fails with `Unauthenticated` when the
/// header is missing or empty.
#[derive(Debug, Clone)]
pub struct Actor(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match actor_id_from_parts(parts) {
            Some(id) => Ok(Actor(id)),
            None => Err(AppError::Unauthenticated),
        }
    }
}

/// Optional actor for read endpoints that degrade gracefully when nobody is
/// signed in (e.g. like/favorite status checks report `false`).
#[derive(Debug, Clone)]
pub struct MaybeActor(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeActor
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeActor(actor_id_from_parts(parts)))
    }
}

fn actor_id_from_parts(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(ACTOR_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Map a username to the synthetic email shape the identity provider requires.
pub fn username_to_email(username: &str) -> String {
    format!("{}@{}", username, SYNTHETIC_EMAIL_DOMAIN)
}

/// Recover the username from a synthetic email. Returns the input unchanged
/// when it does not carry the synthetic domain.
pub fn email_to_username(email: &str) -> &str {
    email
        .strip_suffix(&format!("@{}", SYNTHETIC_EMAIL_DOMAIN))
        .unwrap_or(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_email_mapping_round_trips() {
        let email = username_to_email("rosie");
        assert_eq!(email, "rosie@app.local");
        assert_eq!(email_to_username(&email), "rosie");
    }

    #[test]
    fn foreign_email_passes_through() {
        assert_eq!(email_to_username("someone@example.com"), "someone@example.com");
    }
}
