//! Conversions between [`SqlValue`] and MySQL values.

use chrono::{Datelike, Timelike};
use gassi_query::SqlValue;
use mysql_async::Value;

use crate::error::{MysqlError, MysqlResult};

/// Convert a bound parameter into a MySQL value.
///
/// Timestamps become `DATETIME` values in UTC; connections pin the session
/// time zone to `+00:00`.
pub fn to_mysql_value(value: &SqlValue) -> MysqlResult<Value> {
    Ok(match value {
        SqlValue::Null => Value::NULL,
        SqlValue::Bool(b) => Value::Int(i64::from(*b)),
        SqlValue::Int(i) => Value::Int(*i),
        SqlValue::Text(s) => Value::Bytes(s.as_bytes().to_vec()),
        SqlValue::Timestamp(ts) => {
            let year = u16::try_from(ts.year())
                .map_err(|_| MysqlError::type_conversion(format!("year out of range: {ts}")))?;
            Value::Date(
                year,
                ts.month() as u8,
                ts.day() as u8,
                ts.hour() as u8,
                ts.minute() as u8,
                ts.second() as u8,
                ts.timestamp_subsec_micros(),
            )
        }
    })
}

/// Render a column value as text. NULL yields `None`.
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::NULL => None,
        Value::Bytes(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        Value::Int(i) => Some(i.to_string()),
        Value::UInt(u) => Some(u.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Double(d) => Some(d.to_string()),
        Value::Date(y, mo, d, h, mi, s, _) => Some(format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            y, mo, d, h, mi, s
        )),
        Value::Time(neg, days, h, mi, s, _) => Some(format!(
            "{}{:02}:{:02}:{:02}",
            if *neg { "-" } else { "" },
            u32::from(*h) + days * 24,
            mi,
            s
        )),
    }
}
