use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::database::models::{AdvisoryRow, UserEntity};
use crate::middleware::Flash;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw form fields for creating or updating a session. Everything arrives as
/// text; validation decides what parses.
#[derive(Debug, Deserialize)]
pub struct AdvisoryForm {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub tema: String,
    #[serde(default)]
    pub fecha: String,
    #[serde(default)]
    pub duracion: String,
    #[serde(default)]
    pub notas: String,
    #[serde(default)]
    pub tutor_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangeTutorForm {
    pub id: i64,
    #[serde(default)]
    pub tutor_id: String,
}

/// Listing page: upcoming sessions, earliest first.
#[derive(Debug, Serialize)]
pub struct ListingPage {
    pub asesorias: Vec<AdvisoryRow>,
    pub mensajes: Vec<Flash>,
}

/// Creation/edit/detail page: the session (absent on the creation form) plus
/// the tutor options for the selector.
#[derive(Debug, Serialize)]
pub struct FormPage {
    pub asesoria: Option<AdvisoryRow>,
    pub tutores: Vec<TutorOption>,
    pub mensajes: Vec<Flash>,
}

#[derive(Debug, Serialize)]
pub struct TutorOption {
    pub id: i64,
    pub nombre_completo: String,
}

impl From<&UserEntity> for TutorOption {
    fn from(user: &UserEntity) -> Self {
        TutorOption {
            id: user.id,
            nombre_completo: user.nombre_completo(),
        }
    }
}

/// Checks every field rule and collects all violations, same style as the
/// registration validator.
pub fn validate_form(form: &AdvisoryForm, hoy: NaiveDate) -> Vec<String> {
    let mut errores = Vec::new();

    if form.tema.is_empty() {
        errores.push("El tema es obligatorio.".to_string());
    }

    if form.fecha.is_empty() {
        errores.push("La fecha es obligatoria.".to_string());
    } else {
        match NaiveDate::parse_from_str(&form.fecha, DATE_FORMAT) {
            Ok(fecha) if fecha >= hoy => {}
            // Past or unparseable both ask for a usable date.
            _ => errores
                .push("Por favor, seleccione una fecha válida (futura o actual)".to_string()),
        }
    }

    if form.duracion.is_empty() {
        errores.push("La duración es obligatoria.".to_string());
    } else {
        match form.duracion.parse::<i32>() {
            Ok(d) if (1..=8).contains(&d) => {}
            _ => errores.push("La duración debe ser entre 1 y 8 horas.".to_string()),
        }
    }

    let notas_len = form.notas.chars().count();
    if notas_len < 1 {
        errores.push("Las notas no pueden estar vacías.".to_string());
    } else if notas_len > 50 {
        errores.push("Las notas no pueden tener más de 50 caracteres.".to_string());
    }

    if form.tutor_id.is_empty() {
        errores.push("Debe elegir un tutor.".to_string());
    }

    errores
}

/// The tutor must be chosen and must differ from the creator. Enforced
/// server-side even though the selector already filters the creator out.
pub fn resolve_tutor(raw: &str, creador_id: i64) -> Result<i64, &'static str> {
    if raw.is_empty() {
        return Err("Debe elegir un tutor.");
    }
    let tutor_id: i64 = raw.parse().map_err(|_| "Debe elegir un tutor.")?;
    if tutor_id == creador_id {
        return Err("El tutor no puede ser el creador.");
    }
    Ok(tutor_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hoy() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
    }

    fn valid_form() -> AdvisoryForm {
        AdvisoryForm {
            id: None,
            tema: "Repaso".into(),
            fecha: "2026-09-01".into(),
            duracion: "2".into(),
            notas: "ok".into(),
            tutor_id: "7".into(),
        }
    }

    #[test]
    fn valid_form_passes() {
        assert!(validate_form(&valid_form(), hoy()).is_empty());
    }

    #[test]
    fn duration_accepts_exactly_one_through_eight() {
        for d in ["1", "4", "8"] {
            let mut form = valid_form();
            form.duracion = d.into();
            assert!(validate_form(&form, hoy()).is_empty(), "duracion {d}");
        }
        for d in ["0", "9", "-1", "dos", "2.5"] {
            let mut form = valid_form();
            form.duracion = d.into();
            assert_eq!(
                validate_form(&form, hoy()),
                vec!["La duración debe ser entre 1 y 8 horas.".to_string()],
                "duracion {d}"
            );
        }
    }

    #[test]
    fn notes_accept_one_through_fifty_chars() {
        let mut form = valid_form();
        form.notas = "x".repeat(50);
        assert!(validate_form(&form, hoy()).is_empty());

        form.notas = "x".repeat(51);
        assert_eq!(
            validate_form(&form, hoy()),
            vec!["Las notas no pueden tener más de 50 caracteres.".to_string()]
        );

        form.notas = String::new();
        assert_eq!(
            validate_form(&form, hoy()),
            vec!["Las notas no pueden estar vacías.".to_string()]
        );
    }

    #[test]
    fn date_must_be_today_or_later() {
        let mut form = valid_form();
        form.fecha = "2026-08-30".into();
        assert!(validate_form(&form, hoy()).is_empty());

        form.fecha = "2026-08-29".into();
        assert_eq!(validate_form(&form, hoy()).len(), 1);

        form.fecha = "no-fecha".into();
        assert_eq!(validate_form(&form, hoy()).len(), 1);

        form.fecha = String::new();
        assert_eq!(
            validate_form(&form, hoy()),
            vec!["La fecha es obligatoria.".to_string()]
        );
    }

    #[test]
    fn empty_form_reports_every_problem_at_once() {
        let form = AdvisoryForm {
            id: None,
            tema: String::new(),
            fecha: String::new(),
            duracion: String::new(),
            notas: String::new(),
            tutor_id: String::new(),
        };
        assert_eq!(validate_form(&form, hoy()).len(), 5);
    }

    #[test]
    fn tutor_must_differ_from_creator() {
        assert_eq!(resolve_tutor("7", 1), Ok(7));
        assert_eq!(resolve_tutor("7", 7), Err("El tutor no puede ser el creador."));
        assert_eq!(resolve_tutor("", 1), Err("Debe elegir un tutor."));
        assert_eq!(resolve_tutor("abc", 1), Err("Debe elegir un tutor."));
    }
}
