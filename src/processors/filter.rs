use tracing::debug;

use crate::models::{Row, Selection, Table, TableView};

/// Equality constraint on one categorical column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub column: String,
    pub selection: Selection,
}

impl Predicate {
    pub fn new(column: impl Into<String>, selection: Selection) -> Self {
        Self {
            column: column.into(),
            selection,
        }
    }
}

/// AND-combination of column predicates
#[derive(Debug, Clone, Default)]
pub struct RowFilter {
    predicates: Vec<Predicate>,
}

impl RowFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_predicate(mut self, column: impl Into<String>, selection: Selection) -> Self {
        self.predicates.push(Predicate::new(column, selection));
        self
    }

    /// Select the rows satisfying every constraining predicate.
    ///
    /// A constraint on a column the table does not have matches nothing.
    pub fn apply<'a>(&self, table: &'a Table) -> TableView<'a> {
        let mut constraints = Vec::new();
        for predicate in &self.predicates {
            let Selection::Equals(ref value) = predicate.selection else {
                continue;
            };
            match table.column_index(&predicate.column) {
                Some(idx) => constraints.push((idx, value.as_str())),
                None => {
                    debug!(
                        sheet = table.name(),
                        column = %predicate.column,
                        "filter column missing, no rows match"
                    );
                    return TableView::new(table, Vec::new());
                }
            }
        }

        let rows: Vec<&Row> = table
            .rows()
            .iter()
            .filter(|row| {
                constraints
                    .iter()
                    .all(|(idx, value)| row.get(*idx).matches(value))
            })
            .collect();

        debug!(
            sheet = table.name(),
            matched = rows.len(),
            total = table.len(),
            "applied filters"
        );
        TableView::new(table, rows)
    }
}

/// Subset `table` to rows satisfying every predicate whose selection constrains
pub fn apply_filters<'a>(table: &'a Table, predicates: &[Predicate]) -> TableView<'a> {
    RowFilter {
        predicates: predicates.to_vec(),
    }
    .apply(table)
}
