use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};

const FLASH_COOKIE: &str = "flash";

/// One-shot notice surfaced on the next rendered page. The category matches
/// the form it belongs to ("registro", "login", "asesoria").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub category: String,
    pub message: String,
}

/// Appends a message to the pending flash cookie.
pub fn push_flash(jar: CookieJar, category: &str, message: &str) -> CookieJar {
    let mut pending = peek(&jar);
    pending.push(Flash {
        category: category.to_string(),
        message: message.to_string(),
    });
    jar.add(build_cookie(&pending))
}

/// Consumes pending messages; the cookie lives for exactly one render.
pub fn take_flash(jar: CookieJar) -> (CookieJar, Vec<Flash>) {
    let pending = peek(&jar);
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, pending)
}

fn peek(jar: &CookieJar) -> Vec<Flash> {
    jar.get(FLASH_COOKIE)
        .and_then(|cookie| URL_SAFE_NO_PAD.decode(cookie.value()).ok())
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}

// Cookie values must stay ASCII and delimiter-free, so the JSON payload is
// base64-encoded.
fn build_cookie(pending: &[Flash]) -> Cookie<'static> {
    let payload = serde_json::to_vec(pending).unwrap_or_default();
    Cookie::build((FLASH_COOKIE, URL_SAFE_NO_PAD.encode(payload)))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
