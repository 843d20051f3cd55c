//! Class routes. Each class references the teacher responsible for it.

use axum::extract::{Path, Query};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

use crate::crud::{self, ApiResult};
use crate::error::ApiError;
use crate::schema::{Column, ColumnKind, EntitySchema, Messages};
use crate::transfer::{self, ExportQuery};

static COLUMNS: [Column; 3] = [
    Column::required("nome_turma", ColumnKind::Text),
    Column::required("id_professor", ColumnKind::Int)
        .references("professores", "id_professor", "Professor não encontrado"),
    Column::required("horario", ColumnKind::Text),
];

pub static SCHEMA: EntitySchema = EntitySchema {
    table: "turmas",
    key_columns: &["id_turma"],
    columns: &COLUMNS,
    returning_id: false,
    messages: Messages {
        created: "Turma criada com sucesso",
        updated: "Turma atualizada com sucesso",
        deleted: "Turma deletada com sucesso",
        not_found: "Turma não encontrada",
    },
};

pub fn routes() -> Router {
    Router::new()
        .route("/turmas", post(create))
        .route("/turmas/export", get(export))
        .route("/turmas/import", post(import))
        .route("/turmas/:id", get(read).put(update).delete(remove))
}

async fn create(Json(payload): Json<Value>) -> ApiResult {
    crud::create(&SCHEMA, payload).await
}

async fn read(Path(id): Path<i64>) -> ApiResult {
    crud::read(&SCHEMA, &[id]).await
}

async fn update(Path(id): Path<i64>, Json(payload): Json<Value>) -> ApiResult {
    crud::update(&SCHEMA, id, payload).await
}

async fn remove(Path(id): Path<i64>) -> ApiResult {
    crud::delete(&SCHEMA, &[id]).await
}

async fn export(Query(query): Query<ExportQuery>) -> Result<Response, ApiError> {
    transfer::export(&SCHEMA, query).await
}

async fn import(body: String) -> ApiResult {
    transfer::import(&SCHEMA, body).await
}
