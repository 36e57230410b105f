//! Type conversion utilities for the PostgreSQL provider.
//!
//! Handles conversion between:
//! - `serde_json::Value` parameters and PostgreSQL wire values (via `ToSql`)
//! - `postgres::Row` cells and `serde_json::Value` (via `FromSql`)

use std::error::Error;

use bytes::BytesMut;
use postgres::types::{IsNull, Kind, ToSql, Type};
use postgres::Row;
use serde_json::{Number, Value};

use crate::db::backend::Record;
use crate::db::DbError;

/// A JSON value bound as a query parameter.
///
/// The server infers each placeholder's type from the statement, so the
/// encoding is chosen in `to_sql` from that inferred type rather than from the
/// JSON shape alone. A JSON integer bound to an `int4` column is sent as `i32`,
/// the same integer bound to `text` is sent as its decimal string.
#[derive(Debug)]
pub struct SqlParam<'a>(pub &'a Value);

impl ToSql for SqlParam<'_> {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        if is_json_type(ty) {
            return self.0.to_sql(ty, out);
        }

        match self.0 {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(b) if *ty == Type::BOOL => b.to_sql(ty, out),
            Value::Bool(_) => Err(format!("cannot bind bool to column of type {}", ty).into()),
            Value::Number(n) => number_to_sql(n, ty, out),
            Value::String(s) => string_to_sql(s, ty, out),
            Value::Array(items) => match ty.kind() {
                Kind::Array(_) => items.iter().map(SqlParam).collect::<Vec<_>>().to_sql(ty, out),
                _ => Err(format!("cannot bind array to column of type {}", ty).into()),
            },
            Value::Object(_) => Err(format!("cannot bind object to column of type {}", ty).into()),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    fn to_sql_checked(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        // accepts() is unconditional, so there is nothing to check up front
        self.to_sql(ty, out)
    }
}

fn is_json_type(ty: &Type) -> bool {
    *ty == Type::JSON || *ty == Type::JSONB
}

fn is_text_type(ty: &Type) -> bool {
    matches!(*ty, Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::UNKNOWN)
}

fn number_to_sql(
    n: &Number,
    ty: &Type,
    out: &mut BytesMut,
) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
    let as_int = || {
        n.as_i64()
            .ok_or_else(|| format!("{} is not an integer", n))
    };

    match *ty {
        Type::INT2 => i16::try_from(as_int()?)?.to_sql(ty, out),
        Type::INT4 => i32::try_from(as_int()?)?.to_sql(ty, out),
        Type::INT8 => as_int()?.to_sql(ty, out),
        Type::FLOAT4 => (n.as_f64().unwrap_or_default() as f32).to_sql(ty, out),
        Type::FLOAT8 => n.as_f64().unwrap_or_default().to_sql(ty, out),
        _ if is_text_type(ty) => n.to_string().to_sql(ty, out),
        _ => Err(format!("cannot bind number to column of type {}", ty).into()),
    }
}

/// Strings go to text columns as-is and are parsed for numeric columns.
fn string_to_sql(
    s: &str,
    ty: &Type,
    out: &mut BytesMut,
) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
    let unparsable = || format!("cannot bind string '{}' to column of type {}", s, ty);

    match *ty {
        Type::INT2 => s.trim().parse::<i16>().map_err(|_| unparsable())?.to_sql(ty, out),
        Type::INT4 => s.trim().parse::<i32>().map_err(|_| unparsable())?.to_sql(ty, out),
        Type::INT8 => s.trim().parse::<i64>().map_err(|_| unparsable())?.to_sql(ty, out),
        Type::FLOAT4 => s.trim().parse::<f32>().map_err(|_| unparsable())?.to_sql(ty, out),
        Type::FLOAT8 => s.trim().parse::<f64>().map_err(|_| unparsable())?.to_sql(ty, out),
        _ if is_text_type(ty) => s.to_sql(ty, out),
        _ => Err(format!("cannot bind string to column of type {}", ty).into()),
    }
}

/// Borrow every parameter as a `ToSql` trait object for `Client::query`.
pub fn to_sql_params(params: &[Value]) -> Vec<SqlParam<'_>> {
    params.iter().map(SqlParam).collect()
}

/// Convert a result row to a record, keeping the store's column order.
pub fn row_to_record(row: &Row) -> Result<Record, DbError> {
    let mut record = Record::new();
    for (idx, column) in row.columns().iter().enumerate() {
        let value = cell_to_value(row, idx, column.name(), column.type_())?;
        record.insert(column.name().to_string(), value);
    }
    Ok(record)
}

fn cell_to_value(row: &Row, idx: usize, name: &str, ty: &Type) -> Result<Value, DbError> {
    let read_err = |e: postgres::Error| DbError::QueryFailed {
        message: format!("failed to read column '{}': {}", name, e),
    };

    let value = match *ty {
        Type::BOOL => row.try_get::<_, Option<bool>>(idx).map_err(read_err)?.map(Value::Bool),
        Type::INT2 => row.try_get::<_, Option<i16>>(idx).map_err(read_err)?.map(Value::from),
        Type::INT4 => row.try_get::<_, Option<i32>>(idx).map_err(read_err)?.map(Value::from),
        Type::INT8 => row.try_get::<_, Option<i64>>(idx).map_err(read_err)?.map(Value::from),
        Type::FLOAT4 => row.try_get::<_, Option<f32>>(idx).map_err(read_err)?.map(Value::from),
        Type::FLOAT8 => row.try_get::<_, Option<f64>>(idx).map_err(read_err)?.map(Value::from),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
            row.try_get::<_, Option<String>>(idx).map_err(read_err)?.map(Value::String)
        }
        Type::JSON | Type::JSONB => row.try_get::<_, Option<Value>>(idx).map_err(read_err)?,
        Type::TEXT_ARRAY | Type::VARCHAR_ARRAY => row
            .try_get::<_, Option<Vec<String>>>(idx)
            .map_err(read_err)?
            .map(Value::from),
        Type::INT4_ARRAY => row
            .try_get::<_, Option<Vec<i32>>>(idx)
            .map_err(read_err)?
            .map(Value::from),
        Type::INT8_ARRAY => row
            .try_get::<_, Option<Vec<i64>>>(idx)
            .map_err(read_err)?
            .map(Value::from),
        Type::BOOL_ARRAY => row
            .try_get::<_, Option<Vec<bool>>>(idx)
            .map_err(read_err)?
            .map(Value::from),
        _ => {
            return Err(DbError::UnsupportedValue {
                column: name.to_string(),
                type_name: ty.name().to_string(),
            })
        }
    };

    Ok(value.unwrap_or(Value::Null))
}
