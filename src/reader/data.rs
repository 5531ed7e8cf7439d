//! Column access helpers shared by the loaders

use polars::prelude::*;

use crate::{HeatmapError, Result};

/// Fail with `MalformedInput` unless every named column is present
pub fn require_columns(df: &DataFrame, columns: &[&str], source: &str) -> Result<()> {
    let missing: Vec<&str> = columns
        .iter()
        .copied()
        .filter(|name| df.column(name).is_err())
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    let available: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    Err(HeatmapError::MalformedInput(format!(
        "'{}' is missing column(s) {:?} (available: {:?})",
        source, missing, available
    )))
}

/// Read a column as optional strings, casting non-string columns
pub fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df.column(name)?.cast(&DataType::String)?;
    Ok(column
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

/// Read a column as optional 64-bit integers
pub fn int_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let column = df.column(name)?.cast(&DataType::Int64)?;
    Ok(column.i64()?.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_columns_reports_missing() {
        let df = df! { "country" => ["Kenya"], "code" => ["KEN"] }.unwrap();
        assert!(require_columns(&df, &["country", "code"], "test").is_ok());

        let err = require_columns(&df, &["country", "priority"], "test").unwrap_err();
        match err {
            HeatmapError::MalformedInput(msg) => {
                assert!(msg.contains("missing column(s) [\"priority\"]"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_string_values_keeps_nulls() {
        let df = df! { "level" => [Some("High"), None, Some("None")] }.unwrap();
        let values = string_values(&df, "level").unwrap();
        assert_eq!(
            values,
            vec![Some("High".to_string()), None, Some("None".to_string())]
        );
    }

    #[test]
    fn test_int_values_casts_from_strings() {
        let df = df! { "priority" => ["0", "2"] }.unwrap();
        assert_eq!(int_values(&df, "priority").unwrap(), vec![Some(0), Some(2)]);
    }
}
