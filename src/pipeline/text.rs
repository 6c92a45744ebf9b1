//! Free-text column removal

use polars::prelude::*;

/// Drop the configured text columns that are present in `df`.
///
/// Returns the reduced table and the names actually dropped. Names not in the
/// table are ignored.
pub fn drop_text_columns(df: &DataFrame, text_columns: &[String]) -> (DataFrame, Vec<String>) {
    let present: Vec<String> = text_columns
        .iter()
        .filter(|name| df.column(name).is_ok())
        .cloned()
        .collect();

    (df.drop_many(&present), present)
}
