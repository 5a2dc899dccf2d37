use std::collections::HashSet;
use tracing::debug;

use crate::error::Result;
use crate::models::{FilterOptions, OptionEntry, OptionList, Table};
use crate::utils::constants::{REGION_COLUMN, SITE_COLUMN, TREATMENT_COLUMN, TYPE_COLUMN};

/// Distinct values of `column` in first-seen order, empty cells skipped
pub fn distinct_options(table: &Table, column: &str) -> Result<OptionList> {
    let idx = table.require_column(column)?;
    let mut seen = HashSet::new();
    let entries = table
        .rows()
        .iter()
        .filter_map(|row| row.get(idx).display_text())
        .filter(|text| seen.insert(text.clone()))
        .map(OptionEntry::same)
        .collect();
    Ok(OptionList::new(entries))
}

impl FilterOptions {
    /// Derive every dropdown list from the loaded tables
    pub fn derive(ghg: &Table, agb: &Table) -> Result<Self> {
        let options = Self {
            ghg_sites: distinct_options(ghg, SITE_COLUMN)?.with_all(),
            ghg_treatments: distinct_options(ghg, TREATMENT_COLUMN)?.with_all(),
            ghg_types: distinct_options(ghg, TYPE_COLUMN)?.with_all(),
            agb_regions: distinct_options(agb, REGION_COLUMN)?,
            agb_sites: distinct_options(agb, SITE_COLUMN)?,
        };

        debug!(
            ghg_sites = options.ghg_sites.len(),
            ghg_treatments = options.ghg_treatments.len(),
            ghg_types = options.ghg_types.len(),
            agb_regions = options.agb_regions.len(),
            agb_sites = options.agb_sites.len(),
            "derived filter options"
        );
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::models::{Row, Value};
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn test_distinct_in_first_seen_order() {
        let table = Table::new(
            "Carbon_AGB",
            vec!["Region".into(), "Site".into()],
            vec![
                Row::new(vec![text("North"), Value::Number(2.0)]),
                Row::new(vec![text("South"), Value::Number(1.0)]),
                Row::new(vec![text("North"), Value::Empty]),
                Row::new(vec![text("East"), Value::Number(2.0)]),
            ],
        );

        let regions = distinct_options(&table, "Region").unwrap();
        let labels: Vec<&str> = regions.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["North", "South", "East"]);

        let sites = distinct_options(&table, "Site").unwrap();
        assert_eq!(
            sites,
            OptionList::new(vec![OptionEntry::same("2"), OptionEntry::same("1")])
        );
    }

    #[test]
    fn test_derive_prepends_all_for_ghg_only() {
        let ghg = Table::new(
            "GHG Data",
            vec!["Site".into(), "Treatment".into(), "Type".into()],
            vec![Row::new(vec![text("A"), text("X"), text("Y")])],
        );
        let agb = Table::new(
            "Carbon_AGB",
            vec!["Region".into(), "Site".into()],
            vec![Row::new(vec![text("R1"), text("S1")])],
        );

        let options = FilterOptions::derive(&ghg, &agb).unwrap();
        assert_eq!(options.ghg_sites.entries()[0].value, "All");
        assert_eq!(options.ghg_sites.len(), 2);
        assert_eq!(options.agb_regions.entries()[0].value, "R1");
        assert_eq!(options.agb_regions.len(), 1);
    }

    #[test]
    fn test_missing_categorical_column_is_fatal() {
        let ghg = Table::new("GHG Data", vec!["Site".into()], vec![]);
        let agb = Table::new("Carbon_AGB", vec![], vec![]);
        let err = FilterOptions::derive(&ghg, &agb).unwrap_err();
        assert!(matches!(err, DashboardError::ColumnNotFound { .. }));
    }
}
