//! Payment routes. Payments reference an existing student; the create
//! response echoes the generated id so receipts can link back to it.
//! Status defaults to "pending" when the payload omits it.

use axum::extract::{Path, Query};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

use crate::crud::{self, ApiResult};
use crate::error::ApiError;
use crate::schema::{Column, ColumnKind, EntitySchema, Messages};
use crate::transfer::{self, ExportQuery};

static COLUMNS: [Column; 6] = [
    Column::required("id_aluno", ColumnKind::Int).references("alunos", "id_aluno", "Aluno não encontrado"),
    Column::required("data_pagamento", ColumnKind::Date),
    Column::required("valor_pago", ColumnKind::Decimal),
    Column::required("forma_pagamento", ColumnKind::Text),
    Column::optional("referencia", ColumnKind::Text),
    Column::optional("status", ColumnKind::Text).with_default("pending"),
];

pub static SCHEMA: EntitySchema = EntitySchema {
    table: "pagamentos",
    key_columns: &["id_pagamento"],
    columns: &COLUMNS,
    returning_id: true,
    messages: Messages {
        created: "Pagamento criado com sucesso",
        updated: "Pagamento atualizado com sucesso",
        deleted: "Pagamento deletado com sucesso",
        not_found: "Pagamento não encontrado",
    },
};

pub fn routes() -> Router {
    Router::new()
        .route("/pagamentos", post(create))
        .route("/pagamentos/export", get(export))
        .route("/pagamentos/import", post(import))
        .route("/pagamentos/:id", get(read).put(update).delete(remove))
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
    use crate::database::executor::BindValue;
    use serde_json::json;

    #[test]
    fn status_defaults_to_pending() {
        let payload = json!({
            "id_aluno": 1,
            "data_pagamento": "2024-03-10",
            "valor_pago": 150.0,
            "forma_pagamento": "pix",
        });
        let params = SCHEMA.insert_params(payload.as_object().unwrap()).unwrap();
        assert_eq!(params[4], BindValue::Text(None)); // referencia stays null
        assert_eq!(params[5], BindValue::Text(Some("pending".to_string())));
    }
}
