use axum::{
    Form, Json,
    extract::{Extension, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{Local, NaiveDate};

use super::model::{
    self, AdvisoryForm, ChangeTutorForm, DATE_FORMAT, FormPage, ListingPage, TutorOption,
};
use crate::AppState;
use crate::database::models::{AdvisoryUpdate, NewAdvisory};
use crate::error::AppError;
use crate::middleware::{CurrentUser, push_flash, take_flash};
use crate::routes::user::model::{MIN_TUTOR_POOL, seed_tutors_if_short};

fn hoy() -> NaiveDate {
    Local::now().date_naive()
}

/// Tutor options for a form rendered on behalf of `creador_id`: seed the pool
/// when the demo flag allows it, then list everyone else who tutors.
async fn tutor_options(
    state: &AppState,
    creador_id: i64,
) -> Result<Vec<TutorOption>, AppError> {
    if state.config.seed_demo_tutors {
        seed_tutors_if_short(state.users.as_ref(), creador_id, MIN_TUTOR_POOL).await?;
    }
    let tutores = state.users.tutors_except(creador_id).await?;
    Ok(tutores.iter().map(TutorOption::from).collect())
}

/// `GET /inicio` — upcoming sessions, earliest first.
pub async fn list_upcoming(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let asesorias = state.advisories.list_upcoming(hoy()).await?;
    let (jar, mensajes) = take_flash(jar);
    Ok((jar, Json(ListingPage { asesorias, mensajes })).into_response())
}

/// `GET /nueva` — creation form with the tutor selector.
pub async fn new_form(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let tutores = tutor_options(&state, user.id).await?;
    let (jar, mensajes) = take_flash(jar);
    Ok((
        jar,
        Json(FormPage {
            asesoria: None,
            tutores,
            mensajes,
        }),
    )
        .into_response())
}

/// `POST /crear_asesoria` — validate and insert, back to the form on error.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
    Form(form): Form<AdvisoryForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    let errores = model::validate_form(&form, hoy());
    if !errores.is_empty() {
        let mut jar = jar;
        for error in &errores {
            jar = push_flash(jar, "asesoria", error);
        }
        return Ok((jar, Redirect::to("/nueva")));
    }

    let tutor_id = match model::resolve_tutor(&form.tutor_id, user.id) {
        Ok(id) => id,
        Err(mensaje) => {
            return Ok((push_flash(jar, "asesoria", mensaje), Redirect::to("/nueva")));
        }
    };

    // Both parsed successfully during validation.
    let Ok(fecha) = NaiveDate::parse_from_str(&form.fecha, DATE_FORMAT) else {
        return Ok((jar, Redirect::to("/nueva")));
    };
    let Ok(duracion) = form.duracion.parse::<i32>() else {
        return Ok((jar, Redirect::to("/nueva")));
    };

    state
        .advisories
        .create(NewAdvisory {
            tema: form.tema,
            fecha,
            duracion,
            notas: form.notas,
            usuario_id: user.id,
            tutor_id,
        })
        .await?;

    Ok((jar, Redirect::to("/inicio")))
}

/// `GET /editar/{id}` — edit form, creator only.
pub async fn edit_form(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let Some(asesoria) = state.advisories.find_one(id).await? else {
        return Ok(Redirect::to("/inicio").into_response());
    };
    if asesoria.usuario_id != user.id {
        return Ok(Redirect::to("/inicio").into_response());
    }

    let tutores = tutor_options(&state, asesoria.usuario_id).await?;
    let (jar, mensajes) = take_flash(jar);
    Ok((
        jar,
        Json(FormPage {
            asesoria: Some(asesoria),
            tutores,
            mensajes,
        }),
    )
        .into_response())
}

/// `POST /actualizar_asesoria` — full-field update, creator only. The creator
/// reference itself never changes.
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
    Form(form): Form<AdvisoryForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    let Some(id) = form.id else {
        return Ok((jar, Redirect::to("/inicio")));
    };
    let Some(original) = state.advisories.find_one(id).await? else {
        return Ok((jar, Redirect::to("/inicio")));
    };
    if original.usuario_id != user.id {
        // Silent redirect, same as the edit view.
        return Ok((jar, Redirect::to("/inicio")));
    }

    let errores = model::validate_form(&form, hoy());
    if !errores.is_empty() {
        let mut jar = jar;
        for error in &errores {
            jar = push_flash(jar, "asesoria", error);
        }
        return Ok((jar, Redirect::to(&format!("/editar/{id}"))));
    }

    let tutor_id = match model::resolve_tutor(&form.tutor_id, original.usuario_id) {
        Ok(tutor_id) => tutor_id,
        Err(mensaje) => {
            return Ok((
                push_flash(jar, "asesoria", mensaje),
                Redirect::to(&format!("/editar/{id}")),
            ));
        }
    };

    let Ok(fecha) = NaiveDate::parse_from_str(&form.fecha, DATE_FORMAT) else {
        return Ok((jar, Redirect::to(&format!("/editar/{id}"))));
    };
    let Ok(duracion) = form.duracion.parse::<i32>() else {
        return Ok((jar, Redirect::to(&format!("/editar/{id}"))));
    };

    state
        .advisories
        .update(AdvisoryUpdate {
            id,
            tema: form.tema,
            fecha,
            duracion,
            notas: form.notas,
            tutor_id,
        })
        .await?;

    Ok((jar, Redirect::to("/inicio")))
}

/// `GET /ver/{id}` — detail view. Any authenticated user may look; shared
/// viewing is a recorded product decision.
pub async fn view(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let Some(asesoria) = state.advisories.find_one(id).await? else {
        return Ok(Redirect::to("/inicio").into_response());
    };

    // Tutor options are built for the creator, so the selector can never
    // offer the creator as their own tutor.
    let tutores = tutor_options(&state, asesoria.usuario_id).await?;
    let (jar, mensajes) = take_flash(jar);
    Ok((
        jar,
        Json(FormPage {
            asesoria: Some(asesoria),
            tutores,
            mensajes,
        }),
    )
        .into_response())
}

/// `POST /cambiar_tutor` — narrow tutor reassignment from the detail view.
pub async fn change_tutor(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ChangeTutorForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    let Some(original) = state.advisories.find_one(form.id).await? else {
        return Ok((jar, Redirect::to("/inicio")));
    };

    let detalle = format!("/ver/{}", form.id);
    match model::resolve_tutor(&form.tutor_id, original.usuario_id) {
        Ok(tutor_id) => {
            state.advisories.update_tutor(form.id, tutor_id).await?;
            Ok((jar, Redirect::to(&detalle)))
        }
        Err(mensaje) => Ok((push_flash(jar, "asesoria", mensaje), Redirect::to(&detalle))),
    }
}

/// `GET /borrar/{id}` — delete, creator only; non-creators bounce without
/// touching the record.
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    if let Some(asesoria) = state.advisories.find_one(id).await?
        && asesoria.usuario_id == user.id
    {
        state.advisories.delete(id).await?;
        tracing::debug!(id, "asesoria eliminada");
    }
    Ok(Redirect::to("/inicio"))
}
