//! Table-driven entity descriptions. Every CRUD route shares one engine
//! parameterized by these schemas; the SQL for each entity is derived here
//! instead of being hand-written per handler.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::database::executor::BindValue;
use crate::database::manager::DatabaseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Int,
    Text,
    Date,
    Bool,
    Decimal,
}

/// Foreign key declared on a column, verified before dependent writes.
#[derive(Debug)]
pub struct Reference {
    pub table: &'static str,
    pub column: &'static str,
    /// 404 message when the referenced row is absent.
    pub not_found: &'static str,
}

#[derive(Debug)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub required: bool,
    /// Textual default inserted when the payload omits the column.
    pub default: Option<&'static str>,
    pub references: Option<Reference>,
    /// Hashed on write and never included in reads (credentials).
    pub sensitive: bool,
}

impl Column {
    pub const fn required(name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
            references: None,
            sensitive: false,
        }
    }

    pub const fn optional(name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: None,
            references: None,
            sensitive: false,
        }
    }

    pub const fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    pub const fn references(
        mut self,
        table: &'static str,
        column: &'static str,
        not_found: &'static str,
    ) -> Self {
        self.references = Some(Reference {
            table,
            column,
            not_found,
        });
        self
    }

    pub const fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Coerces the JSON value submitted for this column into a typed
    /// statement parameter. Accepts the string forms CSV import produces
    /// for numeric and boolean columns.
    pub fn coerce(&self, value: Option<&Value>) -> Result<BindValue, DatabaseError> {
        let value = match value {
            None | Some(Value::Null) => {
                if let Some(default) = self.default {
                    return Ok(BindValue::Text(Some(default.to_string())));
                }
                return Ok(self.null());
            }
            Some(v) => v,
        };

        let invalid = || DatabaseError::InvalidValue(self.name.to_string());
        match self.kind {
            ColumnKind::Int => as_int(value).map(|i| BindValue::Int(Some(i))).ok_or_else(invalid),
            ColumnKind::Text => value
                .as_str()
                .map(|s| BindValue::Text(Some(s.to_string())))
                .ok_or_else(invalid),
            ColumnKind::Date => value
                .as_str()
                .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
                .map(|d| BindValue::Date(Some(d)))
                .ok_or_else(invalid),
            ColumnKind::Bool => as_bool(value).map(|b| BindValue::Bool(Some(b))).ok_or_else(invalid),
            ColumnKind::Decimal => as_decimal(value)
                .map(|d| BindValue::Decimal(Some(d)))
                .ok_or_else(invalid),
        }
    }

    fn null(&self) -> BindValue {
        match self.kind {
            ColumnKind::Int => BindValue::Int(None),
            ColumnKind::Text => BindValue::Text(None),
            ColumnKind::Date => BindValue::Date(None),
            ColumnKind::Bool => BindValue::Bool(None),
            ColumnKind::Decimal => BindValue::Decimal(None),
        }
    }
}

pub(crate) fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

/// Success and not-found messages for one entity.
#[derive(Debug)]
pub struct Messages {
    pub created: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
    pub not_found: &'static str,
}

#[derive(Debug)]
pub struct EntitySchema {
    /// Table name, also the plural path segment.
    pub table: &'static str,
    /// Lookup key. One generated serial column for regular entities, the
    /// two foreign-key columns for the activity-student link.
    pub key_columns: &'static [&'static str],
    /// Writable columns; generated keys are not listed here.
    pub columns: &'static [Column],
    /// Echo the generated key in the create response.
    pub returning_id: bool,
    pub messages: Messages,
}

impl EntitySchema {
    pub fn required_fields(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .filter(|c| c.required)
            .map(|c| c.name)
            .collect()
    }

    /// Key column plus every non-sensitive writable column, without
    /// duplicates (the link table's key columns are also its data columns).
    pub fn readable_columns(&self) -> Vec<&'static str> {
        let mut cols: Vec<&'static str> = self.key_columns.to_vec();
        for c in self.columns {
            if !c.sensitive && !cols.contains(&c.name) {
                cols.push(c.name);
            }
        }
        cols
    }

    fn key_predicate(&self, first_param: usize) -> String {
        self.key_columns
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{} = ${}", c, first_param + i))
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    pub fn insert_sql(&self) -> String {
        let cols: Vec<&str> = self.columns.iter().map(|c| c.name).collect();
        let placeholders: Vec<String> = (1..=cols.len()).map(|i| format!("${i}")).collect();
        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            cols.join(", "),
            placeholders.join(", ")
        );
        if self.returning_id {
            sql.push_str(&format!(" RETURNING {}", self.key_columns[0]));
        }
        sql
    }

    /// Single-row read, projected server-side as JSON keyed by column name.
    pub fn select_sql(&self) -> String {
        format!(
            "SELECT row_to_json(t) AS row FROM (SELECT {} FROM {} WHERE {}) t",
            self.readable_columns().join(", "),
            self.table,
            self.key_predicate(1)
        )
    }

    /// Every row of the entity, for export.
    pub fn select_all_sql(&self) -> String {
        format!(
            "SELECT row_to_json(t) AS row FROM (SELECT {} FROM {} ORDER BY {}) t",
            self.readable_columns().join(", "),
            self.table,
            self.key_columns.join(", ")
        )
    }

    pub fn update_sql(&self) -> String {
        let sets = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{} = ${}", c.name, i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "UPDATE {} SET {} WHERE {}",
            self.table,
            sets,
            self.key_predicate(self.columns.len() + 1)
        )
    }

    pub fn delete_sql(&self) -> String {
        format!("DELETE FROM {} WHERE {}", self.table, self.key_predicate(1))
    }

    /// Existence probe on the entity's own key.
    pub fn exists_sql(&self) -> String {
        format!(
            "SELECT 1 AS one FROM {} WHERE {}",
            self.table,
            self.key_predicate(1)
        )
    }

    pub fn insert_params(&self, payload: &Map<String, Value>) -> Result<Vec<BindValue>, DatabaseError> {
        self.columns
            .iter()
            .map(|c| c.coerce(payload.get(c.name)))
            .collect()
    }

    pub fn update_params(
        &self,
        payload: &Map<String, Value>,
        key: &[i64],
    ) -> Result<Vec<BindValue>, DatabaseError> {
        let mut params = self.insert_params(payload)?;
        params.extend(key.iter().map(|id| BindValue::Int(Some(*id))));
        Ok(params)
    }
}

/// Existence probe on a referenced table.
pub fn reference_exists_sql(reference: &Reference) -> String {
    format!(
        "SELECT 1 AS one FROM {} WHERE {} = $1",
        reference.table, reference.column
    )
}
