use axum::{body::Body, http::Request, middleware::Next, response::IntoResponse};
use shared::{cache::Session, errors::HttpError};
use tracing::warn;

pub async fn require_admin(req: Request<Body>, next: Next) -> Result<impl IntoResponse, HttpError> {
    let Some(session) = req.extensions().get::<Session>() else {
        return Err(HttpError::Unauthorized("Not authenticated".into()));
    };

    if !session.is_admin {
        warn!("🔒 User {} denied admin access", session.user_id);
        return Err(HttpError::Forbidden("Admin access required".into()));
    }

    Ok(next.run(req).await)
}
