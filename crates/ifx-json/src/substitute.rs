//! Textual bind substitution.
//!
//! The remote query service takes finished SQL text, not parameterized
//! statements, so bindings are spliced back into the statement as SQL
//! literals before the request goes out.

use ifx_core::SqlValue;

use crate::error::{JsonError, Result};

/// Splices bindings into a statement's `?` placeholders as SQL literals.
///
/// The statement is split on `?`; the number of bindings must match the
/// placeholder count exactly. Values render through the standard inline
/// literal form, so strings are always single-quoted with embedded
/// quotes doubled, even when they look numeric.
pub fn substitute_bindings(sql: &str, bindings: &[SqlValue]) -> Result<String> {
    let parts: Vec<&str> = sql.split('?').collect();
    if parts.len() != bindings.len() + 1 {
        return Err(JsonError::BindingCountMismatch {
            placeholders: parts.len() - 1,
            bindings: bindings.len(),
        });
    }

    let mut out = String::with_capacity(sql.len());
    out.push_str(parts[0]);
    for (value, part) in bindings.iter().zip(&parts[1..]) {
        out.push_str(&value.to_sql_inline());
        out.push_str(part);
    }
    Ok(out)
}
