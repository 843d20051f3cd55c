use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::postgres::PgArguments;
use sqlx::{PgPool, Row};
use tracing::error;

use super::manager::DatabaseError;

/// Statement parameter coerced from JSON and tagged with its SQL type, so
/// NULLs are sent with the type the column expects.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Int(Option<i64>),
    Text(Option<String>),
    Date(Option<NaiveDate>),
    Bool(Option<bool>),
    Decimal(Option<Decimal>),
}

fn bind_value<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: &'q BindValue,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match v {
        BindValue::Int(v) => q.bind(*v),
        BindValue::Text(v) => q.bind(v.as_deref()),
        BindValue::Date(v) => q.bind(*v),
        BindValue::Bool(v) => q.bind(*v),
        BindValue::Decimal(v) => q.bind(*v),
    }
}

fn bind_all<'q>(
    mut query: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    params: &'q [BindValue],
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    for p in params {
        query = bind_value(query, p);
    }
    query
}

fn classify(e: sqlx::Error) -> DatabaseError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_foreign_key_violation() {
            return DatabaseError::ForeignKeyViolation(db.message().to_string());
        }
    }
    match e {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => DatabaseError::Connection(e),
        other => DatabaseError::Sqlx(other),
    }
}

async fn rollback(tx: sqlx::Transaction<'_, sqlx::Postgres>) {
    if let Err(e) = tx.rollback().await {
        error!("rollback failed: {e}");
    }
}

/// Runs one INSERT in its own transaction. When `returning` is set the
/// statement carries a RETURNING clause and the generated key is decoded
/// from the first column.
pub async fn insert(
    pool: &PgPool,
    sql: &str,
    params: &[BindValue],
    returning: bool,
) -> Result<Option<i64>, DatabaseError> {
    let mut tx = pool.begin().await.map_err(classify)?;
    if returning {
        match bind_all(sqlx::query(sql), params).fetch_one(&mut *tx).await {
            Ok(row) => match row.try_get::<i32, _>(0) {
                Ok(id) => {
                    tx.commit().await.map_err(classify)?;
                    Ok(Some(id as i64))
                }
                Err(e) => {
                    rollback(tx).await;
                    Err(classify(e))
                }
            },
            Err(e) => {
                rollback(tx).await;
                Err(classify(e))
            }
        }
    } else {
        match bind_all(sqlx::query(sql), params).execute(&mut *tx).await {
            Ok(_) => {
                tx.commit().await.map_err(classify)?;
                Ok(None)
            }
            Err(e) => {
                rollback(tx).await;
                Err(classify(e))
            }
        }
    }
}

/// Runs one UPDATE or DELETE in its own transaction and reports the number
/// of affected rows.
pub async fn execute(pool: &PgPool, sql: &str, params: &[BindValue]) -> Result<u64, DatabaseError> {
    let mut tx = pool.begin().await.map_err(classify)?;
    match bind_all(sqlx::query(sql), params).execute(&mut *tx).await {
        Ok(result) => {
            tx.commit().await.map_err(classify)?;
            Ok(result.rows_affected())
        }
        Err(e) => {
            rollback(tx).await;
            Err(classify(e))
        }
    }
}

/// Single-row lookup. The statement is expected to project the row as JSON
/// under a "row" alias (row_to_json); zero rows is a distinct non-error
/// outcome.
pub async fn fetch_row(
    pool: &PgPool,
    sql: &str,
    params: &[BindValue],
) -> Result<Option<Value>, DatabaseError> {
    let row = bind_all(sqlx::query(sql), params)
        .fetch_optional(pool)
        .await
        .map_err(classify)?;
    match row {
        Some(r) => Ok(Some(r.try_get("row")?)),
        None => Ok(None),
    }
}

/// All rows of an entity, each projected as JSON under the "row" alias.
pub async fn fetch_all(pool: &PgPool, sql: &str) -> Result<Vec<Value>, DatabaseError> {
    let rows = sqlx::query(sql).fetch_all(pool).await.map_err(classify)?;
    rows.iter()
        .map(|r| r.try_get("row").map_err(DatabaseError::Sqlx))
        .collect()
}

/// Single-row existence probe used by the referential checks.
pub async fn exists(pool: &PgPool, sql: &str, params: &[BindValue]) -> Result<bool, DatabaseError> {
    let row = bind_all(sqlx::query(sql), params)
        .fetch_optional(pool)
        .await
        .map_err(classify)?;
    Ok(row.is_some())
}
