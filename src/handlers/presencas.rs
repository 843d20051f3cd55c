//! Attendance routes.

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
    Column::required("id_aluno", ColumnKind::Int).references("alunos", "id_aluno", "Aluno não encontrado"),
    Column::required("data_presenca", ColumnKind::Date),
    Column::required("presente", ColumnKind::Bool),
];

pub static SCHEMA: EntitySchema = EntitySchema {
    table: "presencas",
    key_columns: &["id_presenca"],
    columns: &COLUMNS,
    returning_id: false,
    messages: Messages {
        created: "Presença registrada com sucesso",
        updated: "Presença atualizada com sucesso",
        deleted: "Presença deletada com sucesso",
        not_found: "Presença não encontrada",
    },
};

pub fn routes() -> Router {
    Router::new()
        .route("/presencas", post(create))
        .route("/presencas/export", get(export))
        .route("/presencas/import", post(import))
        .route("/presencas/:id", get(read).put(update).delete(remove))
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
