//! Per-country project counts
//!
//! Groups the normalized roster by ISO-3 code and attaches each code's
//! priority tier. Rows without a code are not counted.

use polars::prelude::*;
use tracing::debug;

use crate::plot::PriorityTier;
use crate::reader::{CountryReference, NormalizedProjects, COUNTRY_CODE};
use crate::{HeatmapError, Result};

const COUNT: &str = "count";

/// Number of projects in one country
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryCount {
    pub code: String,
    pub count: u64,
    pub tier: PriorityTier,
}

/// Counts ordered by code, plus the shared color-scale ceiling
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Aggregation {
    pub counts: Vec<CountryCount>,
    /// Largest count over all countries, 0 when there are none
    pub global_max: u64,
}

impl Aggregation {
    /// Counts belonging to one tier, in code order
    pub fn tier(&self, tier: PriorityTier) -> impl Iterator<Item = &CountryCount> {
        self.counts.iter().filter(move |c| c.tier == tier)
    }

    /// Number of distinct countries with at least one project
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn get(&self, code: &str) -> Option<&CountryCount> {
        self.counts.iter().find(|c| c.code == code)
    }
}

/// Count projects per code
pub fn aggregate(projects: &NormalizedProjects, reference: &CountryReference) -> Result<Aggregation> {
    let grouped = projects
        .frame()
        .clone()
        .lazy()
        .filter(col(COUNTRY_CODE).is_not_null())
        .group_by_stable([col(COUNTRY_CODE)])
        .agg([len().alias(COUNT)])
        .sort([COUNTRY_CODE], SortMultipleOptions::default())
        .collect()?;

    let codes = grouped.column(COUNTRY_CODE)?.cast(&DataType::String)?;
    let totals = grouped.column(COUNT)?.cast(&DataType::UInt64)?;

    let mut counts = Vec::with_capacity(grouped.height());
    for (code, count) in codes.str()?.into_iter().zip(totals.u64()?.into_iter()) {
        let (Some(code), Some(count)) = (code, count) else {
            continue;
        };
        let tier = reference.priority_for(code).ok_or_else(|| {
            HeatmapError::InternalError(format!("code '{}' has no priority in the reference", code))
        })?;
        counts.push(CountryCount {
            code: code.to_string(),
            count,
            tier,
        });
    }

    let global_max = counts.iter().map(|c| c.count).max().unwrap_or(0);
    debug!(countries = counts.len(), global_max, "Aggregated project counts");

    Ok(Aggregation { counts, global_max })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectColumns;
    use proptest::prelude::*;

    fn reference() -> CountryReference {
        CountryReference::from_entries([
            ("Kenya", "KEN", PriorityTier::Priority1),
            ("Nigeria", "NGA", PriorityTier::NonPriority),
            ("Ghana", "GHA", PriorityTier::Priority2),
            ("Ethiopia", "ETH", PriorityTier::Priority1),
        ])
        .unwrap()
    }

    fn run(countries: &[&str], levels: &[Option<&str>]) -> Aggregation {
        let df = df! {
            "Country" => countries,
            "Level of engagement" => levels,
        }
        .unwrap();
        let reference = reference();
        let projects =
            NormalizedProjects::normalize(df, &reference, &ProjectColumns::default(), "test")
                .unwrap();
        aggregate(&projects, &reference).unwrap()
    }

    #[test]
    fn test_kenya_nigeria_scenario() {
        let agg = run(
            &["Kenya", "Kenya", "Kenya", "Nigeria", "Nigeria"],
            &[
                Some("High"),
                Some("High"),
                Some("High"),
                Some("None"),
                Some("Medium"),
            ],
        );

        assert_eq!(
            agg.counts,
            vec![
                CountryCount {
                    code: "KEN".to_string(),
                    count: 3,
                    tier: PriorityTier::Priority1,
                },
                CountryCount {
                    code: "NGA".to_string(),
                    count: 1,
                    tier: PriorityTier::NonPriority,
                },
            ]
        );
        assert_eq!(agg.global_max, 3);
    }

    #[test]
    fn test_unmapped_country_not_counted() {
        let agg = run(&["Atlantis", "Ghana"], &[Some("High"), Some("Low")]);
        assert_eq!(agg.len(), 1);
        assert!(agg.get("GHA").is_some());
        assert_eq!(agg.counts.iter().map(|c| c.count).sum::<u64>(), 1);
    }

    #[test]
    fn test_empty_roster() {
        let agg = run(&[], &[]);
        assert!(agg.is_empty());
        assert_eq!(agg.global_max, 0);
    }

    #[test]
    fn test_codes_ascending_without_zero_fill() {
        let agg = run(
            &["Nigeria", "Ethiopia", "Ghana", "Ethiopia"],
            &[Some("Low"), Some("High"), None, Some("Low")],
        );
        let codes: Vec<&str> = agg.counts.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["ETH", "GHA", "NGA"]);
        assert!(agg.get("KEN").is_none());
        assert_eq!(agg.get("ETH").unwrap().count, 2);
    }

    #[test]
    fn test_tier_filter() {
        let agg = run(
            &["Kenya", "Ethiopia", "Nigeria"],
            &[Some("High"), Some("High"), Some("Low")],
        );
        let p1: Vec<&str> = agg
            .tier(PriorityTier::Priority1)
            .map(|c| c.code.as_str())
            .collect();
        assert_eq!(p1, vec!["ETH", "KEN"]);
        assert_eq!(agg.tier(PriorityTier::Priority2).count(), 0);
    }

    fn roster() -> impl Strategy<Value = Vec<(&'static str, Option<&'static str>)>> {
        let country = prop::sample::select(vec!["Kenya", "Nigeria", "Ghana", "Ethiopia", "Atlantis"]);
        let level = prop::sample::select(vec![
            Some("High"),
            Some("Medium"),
            Some("None"),
            None,
        ]);
        prop::collection::vec((country, level), 0..40)
    }

    proptest! {
        #[test]
        fn prop_tiers_partition_counts(rows in roster()) {
            let (countries, levels): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
            let agg = run(&countries, &levels);

            let per_tier: usize = PriorityTier::ALL.iter().map(|t| agg.tier(*t).count()).sum();
            prop_assert_eq!(per_tier, agg.len());

            let expected: usize = countries
                .iter()
                .zip(&levels)
                .filter(|(c, l)| **c != "Atlantis" && **l != Some("None"))
                .count();
            prop_assert_eq!(agg.counts.iter().map(|c| c.count as usize).sum::<usize>(), expected);

            let max = agg.counts.iter().map(|c| c.count).max().unwrap_or(0);
            prop_assert_eq!(max, agg.global_max);
        }

        #[test]
        fn prop_aggregation_is_idempotent(rows in roster()) {
            let (countries, levels): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
            prop_assert_eq!(run(&countries, &levels), run(&countries, &levels));
        }
    }
}
