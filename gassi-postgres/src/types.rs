//! Type conversions for PostgreSQL.

use chrono::{DateTime, NaiveDateTime, Utc};
use gassi_query::SqlValue;
use tokio_postgres::types::{ToSql, Type};

use crate::error::{PgError, PgResult};

/// A boxed parameter ready to be bound.
pub type PgParam = Box<dyn ToSql + Sync + Send>;

/// Convert a value into a parameter for a placeholder of type `ty`.
///
/// PostgreSQL infers each placeholder's type while preparing, so integers,
/// timestamps and NULLs are narrowed to what the server expects.
pub fn to_sql_param(value: &SqlValue, ty: &Type) -> PgResult<PgParam> {
    let param: PgParam = match value {
        SqlValue::Null => typed_null(ty),
        SqlValue::Bool(b) => Box::new(*b),
        SqlValue::Int(i) => match *ty {
            Type::INT2 => Box::new(
                i16::try_from(*i).map_err(|_| out_of_range(*i, ty))?,
            ),
            Type::INT4 => Box::new(
                i32::try_from(*i).map_err(|_| out_of_range(*i, ty))?,
            ),
            _ => Box::new(*i),
        },
        SqlValue::Text(s) => Box::new(s.clone()),
        SqlValue::Timestamp(ts) => match *ty {
            Type::TIMESTAMP => Box::new(ts.naive_utc()),
            _ => Box::new(*ts),
        },
    };
    Ok(param)
}

/// Convert all values, checking the count against the prepared statement.
pub fn to_sql_params(values: &[SqlValue], types: &[Type]) -> PgResult<Vec<PgParam>> {
    if values.len() != types.len() {
        return Err(PgError::query(format!(
            "expected {} parameters, got {}",
            types.len(),
            values.len()
        )));
    }
    values
        .iter()
        .zip(types)
        .map(|(value, ty)| to_sql_param(value, ty))
        .collect()
}

fn typed_null(ty: &Type) -> PgParam {
    match *ty {
        Type::BOOL => Box::new(None::<bool>),
        Type::INT2 => Box::new(None::<i16>),
        Type::INT4 => Box::new(None::<i32>),
        Type::INT8 => Box::new(None::<i64>),
        Type::TIMESTAMP => Box::new(None::<NaiveDateTime>),
        Type::TIMESTAMPTZ => Box::new(None::<DateTime<Utc>>),
        _ => Box::new(None::<String>),
    }
}

fn out_of_range(value: i64, ty: &Type) -> PgError {
    PgError::type_conversion(format!("{} does not fit in {}", value, ty.name()))
}
