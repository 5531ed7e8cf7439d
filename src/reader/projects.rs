//! Project roster loading and normalization
//!
//! The roster keeps whatever columns it was given. Normalization adds a
//! `country_code` column, orders rows by it and drops projects whose
//! engagement level is the literal string `"None"`.

use std::collections::BTreeSet;

use polars::prelude::*;
use tracing::{info, warn};

use super::data::{require_columns, string_values};
use super::{CountryReference, Reader};
use crate::config::ProjectColumns;
use crate::Result;

/// Name of the column holding the ISO-3 code attached during normalization
pub const COUNTRY_CODE: &str = "country_code";

/// Engagement level marking a project with no engagement
pub const NONE_SENTINEL: &str = "None";

/// Project rows with `country_code` attached, sorted and filtered
#[derive(Debug, Clone)]
pub struct NormalizedProjects {
    frame: DataFrame,
    loaded_rows: usize,
    unmapped: BTreeSet<String>,
}

impl NormalizedProjects {
    /// Read the roster and normalize it against the reference
    pub fn load(
        reader: &dyn Reader,
        reference: &CountryReference,
        columns: &ProjectColumns,
    ) -> Result<Self> {
        let df = reader.read()?;
        let projects = Self::normalize(df, reference, columns, &reader.describe())?;
        info!(
            source = %reader.describe(),
            loaded = projects.loaded_rows,
            kept = projects.len(),
            "Loaded project roster"
        );
        Ok(projects)
    }

    /// Attach codes, sort by code (nulls last, stable), then drop `"None"` rows
    ///
    /// The engagement filter is null-aware: a missing engagement level is not
    /// equal to `"None"`, so such rows stay.
    pub fn normalize(
        mut df: DataFrame,
        reference: &CountryReference,
        columns: &ProjectColumns,
        source: &str,
    ) -> Result<Self> {
        require_columns(
            &df,
            &[columns.country.as_str(), columns.engagement.as_str()],
            source,
        )?;
        let loaded_rows = df.height();

        let names = string_values(&df, &columns.country)?;
        let mut unmapped = BTreeSet::new();
        let codes: Vec<Option<&str>> = names
            .iter()
            .map(|name| {
                let name = name.as_deref()?;
                let code = reference.code_for(name);
                if code.is_none() {
                    unmapped.insert(name.to_string());
                }
                code
            })
            .collect();
        df.with_column(Series::new(COUNTRY_CODE.into(), codes))?;

        if !unmapped.is_empty() {
            warn!(
                count = unmapped.len(),
                names = ?unmapped,
                "Country names missing from the reference; their projects are not counted"
            );
        }

        let frame = df
            .lazy()
            .sort(
                [COUNTRY_CODE],
                SortMultipleOptions::default()
                    .with_nulls_last(true)
                    .with_maintain_order(true),
            )
            .filter(
                col(columns.engagement.as_str())
                    .cast(DataType::String)
                    .neq_missing(lit(NONE_SENTINEL)),
            )
            .collect()?;

        Ok(Self {
            frame,
            loaded_rows,
            unmapped,
        })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    /// Rows kept after filtering
    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Rows read before filtering
    pub fn loaded_rows(&self) -> usize {
        self.loaded_rows
    }

    /// Country names that had no code in the reference
    pub fn unmapped(&self) -> &BTreeSet<String> {
        &self.unmapped
    }

    /// Codes in row order; `None` for unmapped countries
    pub fn codes(&self) -> Result<Vec<Option<String>>> {
        string_values(&self.frame, COUNTRY_CODE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::PriorityTier;

    fn reference() -> CountryReference {
        CountryReference::from_entries([
            ("Kenya", "KEN", PriorityTier::Priority1),
            ("Nigeria", "NGA", PriorityTier::NonPriority),
            ("Ghana", "GHA", PriorityTier::Priority2),
        ])
        .unwrap()
    }

    fn normalize(df: DataFrame) -> NormalizedProjects {
        NormalizedProjects::normalize(df, &reference(), &ProjectColumns::default(), "test").unwrap()
    }

    #[test]
    fn test_none_sentinel_rows_dropped() {
        let df = df! {
            "Country" => ["Kenya", "Kenya", "Kenya", "Nigeria", "Nigeria"],
            "Level of engagement" => ["High", "High", "High", "None", "Medium"],
        }
        .unwrap();

        let projects = normalize(df);
        assert_eq!(projects.loaded_rows(), 5);
        assert_eq!(projects.len(), 4);

        let levels = string_values(projects.frame(), "Level of engagement").unwrap();
        assert!(levels.iter().all(|l| l.as_deref() != Some(NONE_SENTINEL)));
    }

    #[test]
    fn test_missing_engagement_level_is_kept() {
        let df = df! {
            "Country" => ["Kenya", "Ghana"],
            "Level of engagement" => [None, Some("None")],
        }
        .unwrap();

        let projects = normalize(df);
        assert_eq!(projects.len(), 1);
        assert_eq!(projects.codes().unwrap(), vec![Some("KEN".to_string())]);
    }

    #[test]
    fn test_sorted_by_code_with_unmapped_last() {
        let df = df! {
            "Country" => ["Nigeria", "Atlantis", "Kenya", "Ghana", "Kenya"],
            "Level of engagement" => ["Low", "High", "High", "Low", "Medium"],
            "Project" => ["p1", "p2", "p3", "p4", "p5"],
        }
        .unwrap();

        let projects = normalize(df);
        assert_eq!(
            projects.codes().unwrap(),
            vec![
                Some("GHA".to_string()),
                Some("KEN".to_string()),
                Some("KEN".to_string()),
                Some("NGA".to_string()),
                None,
            ]
        );

        // Passthrough columns travel with their rows; ties keep input order
        let ids = string_values(projects.frame(), "Project").unwrap();
        assert_eq!(
            ids,
            vec![
                Some("p4".to_string()),
                Some("p3".to_string()),
                Some("p5".to_string()),
                Some("p1".to_string()),
                Some("p2".to_string()),
            ]
        );
    }

    #[test]
    fn test_unmapped_names_recorded() {
        let df = df! {
            "Country" => ["Atlantis", "Kenya", "Atlantis", "Wakanda"],
            "Level of engagement" => ["High", "High", "None", "Low"],
        }
        .unwrap();

        let projects = normalize(df);
        let unmapped: Vec<&str> = projects.unmapped().iter().map(String::as_str).collect();
        assert_eq!(unmapped, vec!["Atlantis", "Wakanda"]);
    }

    #[test]
    fn test_missing_engagement_column() {
        let df = df! { "Country" => ["Kenya"] }.unwrap();
        let result =
            NormalizedProjects::normalize(df, &reference(), &ProjectColumns::default(), "roster");
        assert!(matches!(
            result,
            Err(crate::HeatmapError::MalformedInput(_))
        ));
    }
}
