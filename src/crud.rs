//! Generic CRUD engine. Each request runs the same sequence: field
//! validation, connection acquisition, referential checks, one statement in
//! one transaction, response mapping. Handlers only supply their schema.

use axum::{http::StatusCode, Json};
use serde_json::{json, Map, Value};
use sqlx::PgPool;
use tracing::info;

use crate::database::executor::{self, BindValue};
use crate::database::manager::DatabaseManager;
use crate::error::ApiError;
use crate::schema::{as_int, reference_exists_sql, EntitySchema};
use crate::security;
use crate::validation;

pub type ApiResult = Result<(StatusCode, Json<Value>), ApiError>;

pub async fn create(schema: &'static EntitySchema, payload: Value) -> ApiResult {
    let mut body = as_object(payload)?;

    let missing = validation::missing_fields(&body, &schema.required_fields());
    if !missing.is_empty() {
        return Err(ApiError::bad_request(format!(
            "Campos obrigatórios não preenchidos: {}",
            missing.join(", ")
        )));
    }

    hash_sensitive(schema, &mut body);

    let pool = DatabaseManager::pool().await?;
    check_references(schema, &pool, &body).await?;

    let params = schema.insert_params(&body)?;
    let id = executor::insert(&pool, &schema.insert_sql(), &params, schema.returning_id).await?;
    info!(table = schema.table, "CREATE ok");

    let mut response = json!({ "message": schema.messages.created });
    if let Some(id) = id {
        response[schema.key_columns[0]] = json!(id);
    }
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn read(schema: &'static EntitySchema, key: &[i64]) -> ApiResult {
    let pool = DatabaseManager::pool().await?;
    match executor::fetch_row(&pool, &schema.select_sql(), &key_params(key)).await? {
        Some(row) => Ok((StatusCode::OK, Json(row))),
        None => Err(ApiError::not_found(schema.messages.not_found)),
    }
}

pub async fn update(schema: &'static EntitySchema, id: i64, payload: Value) -> ApiResult {
    let mut body = as_object(payload)?;

    // PUT is full replacement, validated like a create
    let missing = validation::missing_fields(&body, &schema.required_fields());
    if !missing.is_empty() {
        return Err(ApiError::bad_request(format!(
            "Campos obrigatórios não preenchidos: {}",
            missing.join(", ")
        )));
    }

    hash_sensitive(schema, &mut body);

    let pool = DatabaseManager::pool().await?;
    ensure_exists(schema, &pool, &[id]).await?;
    check_references(schema, &pool, &body).await?;

    let params = schema.update_params(&body, &[id])?;
    executor::execute(&pool, &schema.update_sql(), &params).await?;
    info!(table = schema.table, id, "UPDATE ok");

    Ok((
        StatusCode::OK,
        Json(json!({ "message": schema.messages.updated })),
    ))
}

pub async fn delete(schema: &'static EntitySchema, key: &[i64]) -> ApiResult {
    let pool = DatabaseManager::pool().await?;
    ensure_exists(schema, &pool, key).await?;

    executor::execute(&pool, &schema.delete_sql(), &key_params(key)).await?;
    info!(table = schema.table, ?key, "DELETE ok");

    Ok((
        StatusCode::OK,
        Json(json!({ "message": schema.messages.deleted })),
    ))
}

pub(crate) fn key_params(key: &[i64]) -> Vec<BindValue> {
    key.iter().map(|id| BindValue::Int(Some(*id))).collect()
}

fn as_object(payload: Value) -> Result<Map<String, Value>, ApiError> {
    match payload {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::bad_request(
            "Corpo da requisição deve ser um objeto JSON",
        )),
    }
}

fn hash_sensitive(schema: &EntitySchema, body: &mut Map<String, Value>) {
    for column in schema.columns.iter().filter(|c| c.sensitive) {
        let hashed = match body.get(column.name) {
            Some(Value::String(raw)) => security::hash_password(raw),
            _ => continue,
        };
        body.insert(column.name.to_string(), Value::String(hashed));
    }
}

/// Verifies every populated foreign key names an existing row. Absence is a
/// 404 on the referenced entity, distinct from field validation.
async fn check_references(
    schema: &EntitySchema,
    pool: &PgPool,
    body: &Map<String, Value>,
) -> Result<(), ApiError> {
    for column in schema.columns {
        let Some(reference) = &column.references else {
            continue;
        };
        let value = match body.get(column.name) {
            None | Some(Value::Null) => continue, // optional reference left empty
            Some(v) => v,
        };
        let id = as_int(value).ok_or_else(|| {
            ApiError::bad_request(format!("Valor inválido para o campo '{}'", column.name))
        })?;
        let found = executor::exists(
            pool,
            &reference_exists_sql(reference),
            &[BindValue::Int(Some(id))],
        )
        .await?;
        if !found {
            return Err(ApiError::not_found(reference.not_found));
        }
    }
    Ok(())
}

/// Existence pre-check shared by update and delete: touching an absent row
/// reports 404 instead of silently succeeding.
async fn ensure_exists(
    schema: &EntitySchema,
    pool: &PgPool,
    key: &[i64],
) -> Result<(), ApiError> {
    let found = executor::exists(pool, &schema.exists_sql(), &key_params(key)).await?;
    if !found {
        return Err(ApiError::not_found(schema.messages.not_found));
    }
    Ok(())
}
