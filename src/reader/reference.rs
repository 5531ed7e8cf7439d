//! Country reference table
//!
//! Loads `country, code, priority` rows into two lookups: country name → ISO-3
//! code for joining the roster, and code → priority tier for partitioning the
//! counts.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info};

use super::data::{int_values, require_columns, string_values};
use super::Reader;
use crate::config::ReferenceColumns;
use crate::plot::PriorityTier;
use crate::{DataFrame, HeatmapError, Result};

/// Immutable country lookup, built once per run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryReference {
    name_to_code: HashMap<String, String>,
    code_to_priority: BTreeMap<String, PriorityTier>,
}

impl CountryReference {
    /// Read and index the reference table
    pub fn load(reader: &dyn Reader, columns: &ReferenceColumns) -> Result<Self> {
        let df = reader.read()?;
        let reference = Self::from_frame(&df, columns, &reader.describe())?;
        info!(
            source = %reader.describe(),
            countries = reference.name_to_code.len(),
            codes = reference.code_to_priority.len(),
            "Loaded country reference"
        );
        Ok(reference)
    }

    /// Index an already loaded reference frame
    ///
    /// Later rows win when a country name repeats. A code listed with two
    /// different priorities is rejected.
    pub fn from_frame(df: &DataFrame, columns: &ReferenceColumns, source: &str) -> Result<Self> {
        require_columns(
            df,
            &[
                columns.country.as_str(),
                columns.code.as_str(),
                columns.priority.as_str(),
            ],
            source,
        )?;

        let names = string_values(df, &columns.country)?;
        let codes = string_values(df, &columns.code)?;
        let priorities = int_values(df, &columns.priority)?;

        let mut reference = CountryReference::default();
        for (row, ((name, code), priority)) in names
            .into_iter()
            .zip(codes)
            .zip(priorities)
            .enumerate()
        {
            let (Some(name), Some(code)) = (name, code) else {
                debug!(row, "Skipping reference row without country name or code");
                continue;
            };
            let priority = priority.ok_or_else(|| {
                HeatmapError::MalformedInput(format!(
                    "'{}' row {}: missing priority for '{}'",
                    source,
                    row + 1,
                    name
                ))
            })?;
            let tier = PriorityTier::try_from(priority).map_err(|e| {
                HeatmapError::MalformedInput(format!("'{}' row {}: {}", source, row + 1, e))
            })?;
            reference.insert(name, code, tier)?;
        }

        Ok(reference)
    }

    /// Build a reference from `(name, code, tier)` entries
    pub fn from_entries<I, N, C>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, C, PriorityTier)>,
        N: Into<String>,
        C: Into<String>,
    {
        let mut reference = CountryReference::default();
        for (name, code, tier) in entries {
            reference.insert(name.into(), code.into(), tier)?;
        }
        Ok(reference)
    }

    fn insert(&mut self, name: String, code: String, tier: PriorityTier) -> Result<()> {
        if let Some(existing) = self.code_to_priority.get(&code) {
            if *existing != tier {
                return Err(HeatmapError::MalformedInput(format!(
                    "code '{}' is listed with priorities {} and {}",
                    code,
                    existing.value(),
                    tier.value()
                )));
            }
        }
        self.code_to_priority.insert(code.clone(), tier);
        self.name_to_code.insert(name, code);
        Ok(())
    }

    /// ISO-3 code for a country name
    pub fn code_for(&self, name: &str) -> Option<&str> {
        self.name_to_code.get(name).map(String::as_str)
    }

    /// Priority tier for an ISO-3 code
    pub fn priority_for(&self, code: &str) -> Option<PriorityTier> {
        self.code_to_priority.get(code).copied()
    }

    /// Number of distinct country names
    pub fn len(&self) -> usize {
        self.name_to_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name_to_code.is_empty()
    }
}
