use std::sync::LazyLock;

use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::Utc;
use regex::Regex;
use serde::Deserialize;

use crate::database::models::{NewUser, UserEntity};
use crate::database::repositories::UserRepository;
use crate::error::AppError;

// RFC-lite, same shape the registration form enforces client-side.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9.+_-]+@[a-zA-Z0-9._-]+\.[a-zA-Z]+$").expect("valid email regex")
});

/// Minimum tutor-pool size kept available for the selector.
pub const MIN_TUTOR_POOL: i64 = 3;

// Name pool cycled through when synthesizing placeholder tutors.
const TUTOR_NAME_POOL: [(&str, &str); 6] = [
    ("Juan", "Pérez"),
    ("María", "González"),
    ("Carlos", "Ramírez"),
    ("Lucía", "Martínez"),
    ("Pedro", "López"),
    ("Ana", "Torres"),
];

// Demo-only; seeding is gated behind `Config::seed_demo_tutors`.
const DEFAULT_TUTOR_CREDENTIAL: &str = "123456";

#[derive(Debug, Deserialize)]
pub struct RegistroForm {
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub contrasena: String,
    pub confirmar_contrasena: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub contrasena: String,
}

pub enum LoginOutcome {
    Success(UserEntity),
    EmailNotFound,
    BadCredential,
}

/// Checks every registration rule and collects all violations, so the user
/// sees the full list instead of the first failure.
pub async fn validate_registration(
    users: &dyn UserRepository,
    form: &RegistroForm,
) -> Result<Vec<String>, sqlx::Error> {
    let mut errores = Vec::new();

    if form.nombre.chars().count() < 1 {
        errores.push("El nombre debe tener al menos 1 caracteres.".to_string());
    }
    if form.apellido.trim().chars().count() < 2 {
        errores.push("El apellido debe tener al menos 2 caracteres.".to_string());
    }
    if !EMAIL_REGEX.is_match(&form.email) {
        errores.push("Email inválido.".to_string());
    }
    if users.find_by_email(&form.email).await?.is_some() {
        errores.push("Ese email ya está registrado.".to_string());
    }
    if form.contrasena.chars().count() < 3 {
        errores.push("La contraseña debe tener al menos 3 caracteres.".to_string());
    }
    if form.contrasena != form.confirmar_contrasena {
        errores.push("Las contraseñas no coinciden.".to_string());
    }

    Ok(errores)
}

/// Stores the new user with a bcrypt-hashed credential. Call only after a
/// clean `validate_registration`.
pub async fn register(users: &dyn UserRepository, form: &RegistroForm) -> Result<i64, AppError> {
    let contrasena = hash(&form.contrasena, DEFAULT_COST)?;
    let id = users
        .create(NewUser {
            nombre: form.nombre.clone(),
            apellido: form.apellido.clone(),
            email: form.email.clone(),
            contrasena,
            es_tutor: false,
        })
        .await?;
    Ok(id)
}

/// Email lookup followed by hash verification. The two failure modes stay
/// distinguishable only for the generic flash messages the caller shows.
pub async fn authenticate(
    users: &dyn UserRepository,
    email: &str,
    contrasena: &str,
) -> Result<LoginOutcome, AppError> {
    let Some(user) = users.find_by_email(email).await? else {
        return Ok(LoginOutcome::EmailNotFound);
    };
    if verify(contrasena, &user.contrasena)? {
        Ok(LoginOutcome::Success(user))
    } else {
        Ok(LoginOutcome::BadCredential)
    }
}

/// Tops the tutor pool up to `minimum`, excluding the given user. Placeholder
/// accounts cycle the fixed name pool with timestamp-uniquified emails.
/// Returns how many accounts were created.
pub async fn seed_tutors_if_short(
    users: &dyn UserRepository,
    exclude_id: i64,
    minimum: i64,
) -> Result<usize, AppError> {
    let actual = users.count_tutors_except(exclude_id).await?;
    if actual >= minimum {
        return Ok(0);
    }

    let faltan = (minimum - actual) as usize;
    let ts = Utc::now().timestamp();
    // One hash shared by the placeholder accounts; they all use the same
    // demo credential anyway.
    let contrasena = hash(DEFAULT_TUTOR_CREDENTIAL, DEFAULT_COST)?;

    for i in 0..faltan {
        let (nombre, apellido) = TUTOR_NAME_POOL[i % TUTOR_NAME_POOL.len()];
        let email = format!("tutor_{ts}_{i}@ejemplo.com");
        users
            .create(NewUser {
                nombre: nombre.to_string(),
                apellido: apellido.to_string(),
                email: email.clone(),
                contrasena: contrasena.clone(),
                es_tutor: true,
            })
            .await?;
        tracing::info!(email = %email, "tutor de demostración creado");
    }

    Ok(faltan)
}
