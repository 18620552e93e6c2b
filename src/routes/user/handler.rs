use axum::{
    Form, Json,
    extract::State,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use super::model::{self, LoginForm, LoginOutcome, RegistroForm};
use crate::AppState;
use crate::error::AppError;
use crate::middleware::{
    Flash, clear_session_cookie, issue_session_cookie, push_flash, session_user, take_flash,
};

#[derive(Debug, Serialize)]
pub struct EntryPage {
    pub mensajes: Vec<Flash>,
}

/// `GET /` — route by session state.
pub async fn index(State(state): State<AppState>, jar: CookieJar) -> Redirect {
    if session_user(&jar, &state.config).is_some() {
        Redirect::to("/inicio")
    } else {
        Redirect::to("/entrar")
    }
}

/// `GET /entrar` — entry page data (login + registration forms) together
/// with any pending flash messages.
pub async fn entry_page(jar: CookieJar) -> impl IntoResponse {
    let (jar, mensajes) = take_flash(jar);
    (jar, Json(EntryPage { mensajes }))
}

/// `POST /registro` — validate and create the account, then back to the
/// entry page either way.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegistroForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    let errores = model::validate_registration(state.users.as_ref(), &form).await?;
    if !errores.is_empty() {
        let mut jar = jar;
        for error in &errores {
            jar = push_flash(jar, "registro", error);
        }
        return Ok((jar, Redirect::to("/entrar")));
    }

    model::register(state.users.as_ref(), &form).await?;
    tracing::info!(email = %form.email, "usuario registrado");

    let jar = push_flash(jar, "login", "Registro exitoso. Ahora puede iniciar sesión.");
    Ok((jar, Redirect::to("/entrar")))
}

/// `POST /login` — authenticate and open a session.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    match model::authenticate(state.users.as_ref(), &form.email, &form.contrasena).await? {
        LoginOutcome::Success(user) => {
            let cookie = issue_session_cookie(user.id, &user.nombre, &state.config)?;
            tracing::debug!(usuario_id = user.id, "sesión iniciada");
            Ok((jar.add(cookie), Redirect::to("/inicio")))
        }
        LoginOutcome::EmailNotFound => Ok((
            push_flash(jar, "login", "Email no encontrado"),
            Redirect::to("/entrar"),
        )),
        LoginOutcome::BadCredential => Ok((
            push_flash(jar, "login", "Contraseña incorrecta"),
            Redirect::to("/entrar"),
        )),
    }
}

/// `GET /salir` — drop the session.
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (jar.remove(clear_session_cookie()), Redirect::to("/entrar"))
}
