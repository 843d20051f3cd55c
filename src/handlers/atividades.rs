//! Activity routes.

use axum::extract::{Path, Query};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

use crate::crud::{self, ApiResult};
use crate::error::ApiError;
use crate::schema::{Column, ColumnKind, EntitySchema, Messages};
use crate::transfer::{self, ExportQuery};

static COLUMNS: [Column; 2] = [
    Column::required("descricao", ColumnKind::Text),
    Column::required("data_realizacao", ColumnKind::Date),
];

pub static SCHEMA: EntitySchema = EntitySchema {
    table: "atividades",
    key_columns: &["id_atividade"],
    columns: &COLUMNS,
    returning_id: false,
    messages: Messages {
        created: "Atividade adicionada",
        updated: "Atividade atualizada",
        deleted: "Atividade deletada",
        not_found: "Atividade não encontrada",
    },
};

pub fn routes() -> Router {
    Router::new()
        .route("/atividades", post(create))
        .route("/atividades/export", get(export))
        .route("/atividades/import", post(import))
        .route("/atividades/:id", get(read).put(update).delete(remove))
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
