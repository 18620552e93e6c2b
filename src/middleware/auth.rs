use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::config::Config;

pub const SESSION_COOKIE: &str = "sesion";

/// Claims carried by the signed session cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionClaims {
    sub: i64,
    nombre: String,
    exp: i64,
    iat: i64,
}

/// Authenticated identity for the current request. Inserted as a request
/// extension by `require_auth` and passed explicitly into handlers.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub nombre: String,
}

pub fn issue_session_cookie(
    user_id: i64,
    nombre: &str,
    config: &Config,
) -> Result<Cookie<'static>, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = SessionClaims {
        sub: user_id,
        nombre: nombre.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::seconds(config.session_ttl().as_secs() as i64)).timestamp(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.session_secret.as_bytes()),
    )?;

    Ok(Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build())
}

pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

/// Resolves the identity in the session cookie, if any. Expired or tampered
/// tokens count as anonymous.
pub fn session_user(jar: &CookieJar, config: &Config) -> Option<CurrentUser> {
    let cookie = jar.get(SESSION_COOKIE)?;
    let data = decode::<SessionClaims>(
        cookie.value(),
        &DecodingKey::from_secret(config.session_secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?;

    Some(CurrentUser {
        id: data.claims.sub,
        nombre: data.claims.nombre,
    })
}

/// Sole guard at this layer: anonymous requests to protected routes are sent
/// back to the entry page. Ownership checks live in the handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match session_user(&jar, &state.config) {
        Some(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None => Redirect::to("/entrar").into_response(),
    }
}
