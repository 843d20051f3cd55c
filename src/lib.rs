pub mod config;
pub mod crud;
pub mod database;
pub mod error;
pub mod handlers;
pub mod schema;
pub mod security;
pub mod transfer;
pub mod validation;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// One router composed from the per-entity registration functions.
pub fn app() -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .merge(handlers::alunos::routes())
        .merge(handlers::professores::routes())
        .merge(handlers::turmas::routes())
        .merge(handlers::pagamentos::routes())
        .merge(handlers::presencas::routes())
        .merge(handlers::atividades::routes())
        .merge(handlers::atividade_aluno::routes())
        .merge(handlers::usuarios::routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
