//! Student routes. Creation verifies the referenced class and echoes the
//! generated id.

use axum::extract::{Path, Query};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

use crate::crud::{self, ApiResult};
use crate::error::ApiError;
use crate::schema::{Column, ColumnKind, EntitySchema, Messages};
use crate::transfer::{self, ExportQuery};

static COLUMNS: [Column; 7] = [
    Column::required("nome_completo", ColumnKind::Text),
    Column::required("data_nascimento", ColumnKind::Date),
    Column::required("id_turma", ColumnKind::Int).references("turmas", "id_turma", "Turma não encontrada"),
    Column::required("nome_responsavel", ColumnKind::Text),
    Column::required("telefone_responsavel", ColumnKind::Text),
    Column::required("email_responsavel", ColumnKind::Text),
    Column::optional("informacoes_adicionais", ColumnKind::Text).with_default(""),
];

pub static SCHEMA: EntitySchema = EntitySchema {
    table: "alunos",
    key_columns: &["id_aluno"],
    columns: &COLUMNS,
    returning_id: true,
    messages: Messages {
        created: "Aluno adicionado",
        updated: "Aluno atualizado",
        deleted: "Aluno deletado",
        not_found: "Aluno não encontrado",
    },
};

pub fn routes() -> Router {
    Router::new()
        .route("/alunos", post(create))
        .route("/alunos/export", get(export))
        .route("/alunos/import", post(import))
        .route("/alunos/:id", get(read).put(update).delete(remove))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_statement_matches_table_layout() {
        assert_eq!(
            SCHEMA.insert_sql(),
            "INSERT INTO alunos (nome_completo, data_nascimento, id_turma, nome_responsavel, \
             telefone_responsavel, email_responsavel, informacoes_adicionais) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id_aluno"
        );
    }

    #[test]
    fn only_informacoes_adicionais_is_optional() {
        assert_eq!(
            SCHEMA.required_fields(),
            vec![
                "nome_completo",
                "data_nascimento",
                "id_turma",
                "nome_responsavel",
                "telefone_responsavel",
                "email_responsavel",
            ]
        );
    }
}
