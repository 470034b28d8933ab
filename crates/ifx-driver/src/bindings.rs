//! Bind-parameter preparation.

use chrono::NaiveTime;
use ifx_core::dialect::Dialect;
use ifx_core::SqlValue;

use crate::transcode::Transcoder;

/// Counts the `?` placeholders in a SQL string.
///
/// The count is textual, exactly what the statement execution policy
/// keys off; a literal `?` inside a quoted string counts too.
#[must_use]
pub fn count_placeholders(sql: &str) -> usize {
    sql.bytes().filter(|b| *b == b'?').count()
}

/// Prepares bindings for execution.
///
/// Dates and datetimes are rendered with the dialect's date format,
/// booleans become `0`/`1` since the engine has no boolean literal, and
/// when a transcoder is active every string is converted to
/// database-encoded bytes.
#[must_use]
pub fn prepare_bindings(
    bindings: Vec<SqlValue>,
    dialect: &dyn Dialect,
    transcoder: Option<&Transcoder>,
) -> Vec<SqlValue> {
    bindings
        .into_iter()
        .map(|value| prepare_binding(value, dialect, transcoder))
        .collect()
}

fn prepare_binding(
    value: SqlValue,
    dialect: &dyn Dialect,
    transcoder: Option<&Transcoder>,
) -> SqlValue {
    let value = match value {
        SqlValue::Date(date) => SqlValue::Text(
            date.and_time(NaiveTime::MIN)
                .format(dialect.date_format())
                .to_string(),
        ),
        SqlValue::DateTime(datetime) => {
            SqlValue::Text(datetime.format(dialect.date_format()).to_string())
        }
        SqlValue::Bool(value) => SqlValue::Int(i64::from(value)),
        other => other,
    };
    match (value, transcoder) {
        (SqlValue::Text(text), Some(transcoder)) => {
            SqlValue::Bytes(transcoder.encode_to_db(&text))
        }
        (value, _) => value,
    }
}
