//! Teacher routes.

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
    Column::required("nome_completo", ColumnKind::Text),
    Column::required("email", ColumnKind::Text),
    Column::required("telefone", ColumnKind::Text),
];

pub static SCHEMA: EntitySchema = EntitySchema {
    table: "professores",
    key_columns: &["id_professor"],
    columns: &COLUMNS,
    returning_id: false,
    messages: Messages {
        created: "Professor criado com sucesso",
        updated: "Professor atualizado com sucesso",
        deleted: "Professor deletado com sucesso",
        not_found: "Professor não encontrado",
    },
};

pub fn routes() -> Router {
    Router::new()
        .route("/professores", post(create))
        .route("/professores/export", get(export))
        .route("/professores/import", post(import))
        .route("/professores/:id", get(read).put(update).delete(remove))
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
