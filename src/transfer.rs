//! CSV/JSON export and CSV import. Import runs every row through the same
//! engine as the JSON API, one transaction per row, so rows that succeed
//! stay committed when later rows fail.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::error;

use crate::crud::{self, ApiResult};
use crate::database::executor;
use crate::database::manager::DatabaseManager;
use crate::error::ApiError;
use crate::schema::EntitySchema;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub formato: Option<String>,
}

pub async fn export(schema: &'static EntitySchema, query: ExportQuery) -> Result<Response, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let rows = executor::fetch_all(&pool, &schema.select_all_sql()).await?;

    match query.formato.as_deref().unwrap_or("csv") {
        "json" => Ok(Json(Value::Array(rows)).into_response()),
        _ => {
            let body = to_csv(schema, &rows)?;
            let filename = format!(
                "{}_{}.csv",
                schema.table,
                chrono::Utc::now().format("%Y%m%d")
            );
            Ok((
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{filename}\""),
                    ),
                ],
                body,
            )
                .into_response())
        }
    }
}

pub async fn import(schema: &'static EntitySchema, body: String) -> ApiResult {
    if body.trim().is_empty() {
        return Err(ApiError::bad_request("Arquivo vazio"));
    }

    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ApiError::bad_request(format!("CSV inválido: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut sucessos: u32 = 0;
    let mut erros: Vec<String> = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let line = index + 2; // header is line 1
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                erros.push(format!("Linha {line}: {e}"));
                continue;
            }
        };
        match crud::create(schema, Value::Object(row_object(&headers, &record))).await {
            Ok(_) => sucessos += 1,
            Err(e) => erros.push(format!("Linha {line}: {}", e.message())),
        }
    }

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": format!("Importação concluída: {} sucessos, {} erros", sucessos, erros.len()),
            "sucessos": sucessos,
            "erros": erros,
        })),
    ))
}

/// One CSV record as a JSON object keyed by the header row. Empty cells are
/// left out so column defaults apply.
fn row_object(headers: &[String], record: &csv::StringRecord) -> Map<String, Value> {
    let mut object = Map::new();
    for (header, field) in headers.iter().zip(record.iter()) {
        if field.is_empty() {
            continue;
        }
        object.insert(header.clone(), Value::String(field.to_string()));
    }
    object
}

fn to_csv(schema: &EntitySchema, rows: &[Value]) -> Result<String, ApiError> {
    let headers = schema.readable_columns();
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record(&headers).map_err(csv_failure)?;
    for row in rows {
        let record: Vec<String> = headers.iter().map(|h| cell(row.get(*h))).collect();
        writer.write_record(&record).map_err(csv_failure)?;
    }

    let bytes = writer.into_inner().map_err(csv_failure)?;
    String::from_utf8(bytes).map_err(csv_failure)
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn csv_failure(e: impl std::fmt::Display) -> ApiError {
    error!("export failed: {e}");
    ApiError::internal("Erro ao gerar exportação")
}
