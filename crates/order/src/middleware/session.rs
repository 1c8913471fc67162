use crate::abstract_trait::DynUserQueryRepository;
use axum::{
    Extension,
    body::Body,
    http::Request,
    middleware::Next,
    response::IntoResponse,
};
use chrono::Duration;
use shared::{abstract_trait::DynSessionStore, cache::Session, errors::HttpError};
use tracing::{error, warn};

#[derive(Debug, Clone, Copy)]
pub struct SessionTtl(pub Duration);

/// Turns the verified user id into a [`Session`]. Cached sessions are served
/// from the store; misses are rebuilt from the users table and cached again.
pub async fn session_middleware(
    Extension(users): Extension<DynUserQueryRepository>,
    Extension(store): Extension<DynSessionStore>,
    Extension(SessionTtl(ttl)): Extension<SessionTtl>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let Some(user_id) = req.extensions().get::<i32>().copied() else {
        return Err(HttpError::Unauthorized(
            "Missing user_id in request context".into(),
        ));
    };

    let key = Session::key(user_id);

    let session = match store.get_session(&key).await {
        Some(session) if session.user_id == user_id => session,
        _ => {
            let user = users.find_by_id(user_id).await.map_err(|err| {
                error!("❌ Failed to load user {user_id} for session: {err:?}");
                HttpError::Internal("Internal server error".into())
            })?;

            let Some(user) = user else {
                warn!("🔒 Token refers to unknown user {user_id}");
                return Err(HttpError::Unauthorized("User no longer exists".into()));
            };

            let session = Session {
                user_id: user.id,
                username: user.username,
                is_admin: user.is_admin,
            };

            if !store.create_session(&key, &session, ttl).await {
                warn!("⚠️ Session for user {user_id} could not be cached");
            }

            session
        }
    };

    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}
