//! Session management and route gating.
//!
//! The whole authentication surface of the service is one narrow
//! capability: resolve a token to a user, or nothing. Tokens are issued at
//! signup/signin, carried as a bearer header or cookie, and removed at
//! signout. There is no refresh logic; a token is valid until deleted.
//!
//! Gated handlers take a [`CurrentUser`] extractor; an anonymous request is
//! rejected with [`Error::NotAuthenticated`], which renders as an immediate
//! redirect to the entry page.

use crate::{
    entities::{Session, User, session, user},
    errors::{Error, Result},
    server::AppState,
};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;
use sea_orm::{Set, prelude::*};
use std::sync::Arc;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "spendscape_session";

/// Creates a session for a user and returns it.
pub async fn create_session(db: &DatabaseConnection, user_id: &str) -> Result<session::Model> {
    let row = session::ActiveModel {
        token: Set(Uuid::new_v4().to_string()),
        user_id: Set(user_id.to_string()),
        created_at: Set(chrono::Utc::now()),
    };
    let result = row.insert(db).await?;
    Ok(result)
}

/// Resolves a session token to its user, if the session exists.
pub async fn current_user(db: &DatabaseConnection, token: &str) -> Result<Option<user::Model>> {
    let Some(session) = Session::find_by_id(token).one(db).await? else {
        return Ok(None);
    };
    User::find_by_id(&session.user_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Deletes a session; deleting an unknown token is a no-op.
pub async fn delete_session(db: &DatabaseConnection, token: &str) -> Result<()> {
    Session::delete_by_id(token).exec(db).await?;
    Ok(())
}

/// Pulls the session token from a request: `Authorization: Bearer` first,
/// then the session cookie.
#[must_use]
pub fn token_from_parts(parts: &Parts) -> Option<String> {
    let bearer = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(ToString::to_string);
    if bearer.is_some() {
        return bearer;
    }

    let jar = CookieJar::from_headers(&parts.headers);
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

/// Extractor carrying the authenticated user.
///
/// Rejection is [`Error::NotAuthenticated`], which redirects to `/`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub user::Model);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self> {
        let token = token_from_parts(parts).ok_or(Error::NotAuthenticated)?;
        let user = current_user(&state.db, &token)
            .await?
            .ok_or(Error::NotAuthenticated)?;
        Ok(Self(user))
    }
}
