//! Account routes. Passwords are hashed before storage and excluded from
//! every read; the optional teacher reference is only checked when present.
//! No CSV import here - credentials do not round-trip through spreadsheets.

use axum::extract::{Path, Query};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

use crate::crud::{self, ApiResult};
use crate::error::ApiError;
use crate::schema::{Column, ColumnKind, EntitySchema, Messages};
use crate::transfer::{self, ExportQuery};

static COLUMNS: [Column; 4] = [
    Column::required("login", ColumnKind::Text),
    Column::required("senha", ColumnKind::Text).sensitive(),
    Column::required("nivel_acesso", ColumnKind::Text),
    Column::optional("id_professor", ColumnKind::Int)
        .references("professores", "id_professor", "Professor não encontrado"),
];

pub static SCHEMA: EntitySchema = EntitySchema {
    table: "usuarios",
    key_columns: &["id_usuario"],
    columns: &COLUMNS,
    returning_id: false,
    messages: Messages {
        created: "Usuário criado com sucesso",
        updated: "Usuário atualizado com sucesso",
        deleted: "Usuário deletado com sucesso",
        not_found: "Usuário não encontrado",
    },
};

pub fn routes() -> Router {
    Router::new()
        .route("/usuarios", post(create))
        .route("/usuarios/export", get(export))
        .route("/usuarios/:id", get(read).put(update).delete(remove))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_never_include_senha() {
        assert_eq!(
            SCHEMA.readable_columns(),
            vec!["id_usuario", "login", "nivel_acesso", "id_professor"]
        );
        assert!(!SCHEMA.select_sql().contains("senha"));
        assert!(!SCHEMA.select_all_sql().contains("senha"));
    }
}
