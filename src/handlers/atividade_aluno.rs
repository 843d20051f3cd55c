//! Activity-student link routes. A pure join row: the composite key is the
//! pair of foreign keys, both verified on create, and the row-level paths
//! carry both ids. There is nothing to update on a link, so no PUT.

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
    Column::required("id_atividade", ColumnKind::Int)
        .references("atividades", "id_atividade", "Atividade não encontrada"),
    Column::required("id_aluno", ColumnKind::Int).references("alunos", "id_aluno", "Aluno não encontrado"),
];

pub static SCHEMA: EntitySchema = EntitySchema {
    table: "atividade_aluno",
    key_columns: &["id_atividade", "id_aluno"],
    columns: &COLUMNS,
    returning_id: false,
    messages: Messages {
        created: "Relação Atividade-Aluno criada com sucesso",
        updated: "Relação Atividade-Aluno atualizada com sucesso",
        deleted: "Relação Atividade-Aluno deletada com sucesso",
        not_found: "Relação Atividade-Aluno não encontrada",
    },
};

pub fn routes() -> Router {
    Router::new()
        .route("/atividade_aluno", post(create))
        .route("/atividade_aluno/export", get(export))
        .route("/atividade_aluno/import", post(import))
        .route(
            "/atividade_aluno/:id_atividade/:id_aluno",
            get(read).delete(remove),
        )
}

async fn create(Json(payload): Json<Value>) -> ApiResult {
    crud::create(&SCHEMA, payload).await
}

async fn read(Path((id_atividade, id_aluno)): Path<(i64, i64)>) -> ApiResult {
    crud::read(&SCHEMA, &[id_atividade, id_aluno]).await
}

async fn remove(Path((id_atividade, id_aluno)): Path<(i64, i64)>) -> ApiResult {
    crud::delete(&SCHEMA, &[id_atividade, id_aluno]).await
}

async fn export(Query(query): Query<ExportQuery>) -> Result<Response, ApiError> {
    transfer::export(&SCHEMA, query).await
}

async fn import(body: String) -> ApiResult {
    transfer::import(&SCHEMA, body).await
}
