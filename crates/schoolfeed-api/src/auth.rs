//! Session extractors.
//!
//! Clients send the token returned by signup or login as
//! `Authorization: Bearer <token>`. [`CurrentSession`] rejects requests
//! without an open session; [`MaybeSession`] lets anonymous visitors
//! through.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use schoolfeed_core::Session;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// The open session of the calling client. Rejects with 401 otherwise.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

/// The open session of the calling client, if any.
///
/// A missing, malformed or closed token all read as anonymous.
#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<Session>);

/// Parse the bearer token from the request headers.
fn bearer_token(parts: &Parts) -> Option<Uuid> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    token.trim().parse().ok()
}

async fn lookup(parts: &Parts, state: &AppState) -> Option<Session> {
    let token = bearer_token(parts)?;
    state.sessions.get(token).await
}

impl FromRequestParts<Arc<AppState>> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        lookup(parts, state)
            .await
            .map(Self)
            .ok_or_else(|| ApiError::Unauthorized(String::from("sign in required")))
    }
}

impl FromRequestParts<Arc<AppState>> for MaybeSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(lookup(parts, state).await))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::get("/");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn bearer_token_parsing() {
        let token = Uuid::new_v4();
        let good = parts_with(Some(&format!("Bearer {token}")));
        assert_eq!(bearer_token(&good), Some(token));

        assert_eq!(bearer_token(&parts_with(None)), None);
        assert_eq!(bearer_token(&parts_with(Some("Bearer nope"))), None);
        assert_eq!(bearer_token(&parts_with(Some(&format!("Basic {token}")))), None);
    }
}
