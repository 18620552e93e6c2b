pub mod advisory;
pub mod user;

use axum::{
    Router,
    routing::{get, post},
};

use crate::AppState;
use crate::middleware::require_auth;

/// Public entry/auth routes plus the protected catalog routes behind the
/// session guard.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(user::handler::index))
        .route("/entrar", get(user::handler::entry_page))
        .route("/registro", post(user::handler::register))
        .route("/login", post(user::handler::login))
        .route("/salir", get(user::handler::logout));

    let protected_routes = Router::new()
        .route("/inicio", get(advisory::handler::list_upcoming))
        .route("/nueva", get(advisory::handler::new_form))
        .route("/crear_asesoria", post(advisory::handler::create))
        .route("/editar/{id}", get(advisory::handler::edit_form))
        .route("/actualizar_asesoria", post(advisory::handler::update))
        .route("/ver/{id}", get(advisory::handler::view))
        .route("/cambiar_tutor", post(advisory::handler::change_tutor))
        .route("/borrar/{id}", get(advisory::handler::delete))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
