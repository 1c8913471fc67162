use axum::{
    Extension,
    body::Body,
    http::{Request, header},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use shared::{abstract_trait::DynJwtService, errors::HttpError};
use tracing::warn;

/// Resolves the access token from the `token` cookie or a bearer header and
/// stores the caller's user id (`i32`) in the request extensions.
pub async fn auth_middleware(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let token = cookie_jar
        .get("token")
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| auth_value.strip_prefix("Bearer ").map(str::to_owned))
        });

    let Some(token) = token else {
        return Err(HttpError::Unauthorized(
            "You are not logged in, please provide token".into(),
        ));
    };

    let user_id = match jwt.verify_token(&token, "access") {
        Ok(id) => i32::try_from(id)
            .map_err(|_| HttpError::Unauthorized("Invalid token".into()))?,
        Err(err) => {
            warn!("🔒 Rejected access token: {err}");
            return Err(HttpError::from(err));
        }
    };

    req.extensions_mut().insert(user_id);

    Ok(next.run(req).await)
}
