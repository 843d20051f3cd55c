pub mod alunos;
pub mod atividade_aluno;
pub mod atividades;
pub mod pagamentos;
pub mod presencas;
pub mod professores;
pub mod turmas;
pub mod usuarios;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::manager::DatabaseManager;

pub async fn index() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Escola API",
        "version": version,
        "description": "School management REST API built with Rust (Axum)",
        "endpoints": {
            "alunos": "/alunos[/:id]",
            "professores": "/professores[/:id]",
            "turmas": "/turmas[/:id]",
            "pagamentos": "/pagamentos[/:id]",
            "presencas": "/presencas[/:id]",
            "atividades": "/atividades[/:id]",
            "atividade_aluno": "/atividade_aluno[/:id_atividade/:id_aluno]",
            "usuarios": "/usuarios[/:id]",
            "export": "/<entidade>/export?formato=csv|json",
            "import": "/<entidade>/import (corpo CSV)",
            "health": "/health",
        }
    }))
}

pub async fn health() -> impl IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok",
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string(),
            })),
        ),
    }
}
