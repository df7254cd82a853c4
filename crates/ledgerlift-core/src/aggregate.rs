use crate::error::LiftError;
use crate::export::{Cell, Table};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// One summed measure: source column in the input table, label in the
/// output table.
#[derive(Debug, Clone, Copy)]
pub struct Measure<'a> {
    pub column: &'a str,
    pub label: &'a str,
}

impl<'a> Measure<'a> {
    pub fn new(column: &'a str, label: &'a str) -> Self {
        Measure { column, label }
    }
}

/// Group `table` rows by the value tuple of the `group_by` columns and sum
/// each measure per group.
///
/// Output columns are the group columns followed by the measure labels.
/// Rows come out sorted by group key tuple, so repeated runs over the same
/// input produce identical tables. Int columns sum as i64; Decimal columns
/// as Decimal (a mix promotes to Decimal); Empty cells contribute nothing.
pub fn aggregate(
    table: &Table,
    name: &str,
    group_by: &[&str],
    measures: &[Measure],
) -> Result<Table, LiftError> {
    let key_idx = table.resolve_columns(group_by)?;
    let measure_idx =
        table.resolve_columns(&measures.iter().map(|m| m.column).collect::<Vec<_>>())?;

    let mut groups: BTreeMap<Vec<Cell>, Vec<Cell>> = BTreeMap::new();
    for row in &table.rows {
        let key: Vec<Cell> = key_idx.iter().map(|&i| row[i].clone()).collect();
        let sums = groups
            .entry(key)
            .or_insert_with(|| vec![Cell::Empty; measures.len()]);
        for (j, measure) in measures.iter().enumerate() {
            sums[j] = add_cells(&sums[j], &row[measure_idx[j]], measure.column)?;
        }
    }

    let mut columns: Vec<&str> = group_by.to_vec();
    columns.extend(measures.iter().map(|m| m.label));
    let mut out = Table::new(name, &columns);
    for (key, sums) in groups {
        let mut row = key;
        row.extend(sums);
        out.push_row(row);
    }
    Ok(out)
}

fn add_cells(acc: &Cell, value: &Cell, column: &str) -> Result<Cell, LiftError> {
    match (acc, value) {
        (acc, Cell::Empty) => Ok(acc.clone()),
        (Cell::Empty, value @ (Cell::Int(_) | Cell::Decimal(_))) => Ok(value.clone()),
        (Cell::Int(a), Cell::Int(b)) => Ok(Cell::Int(a + b)),
        (Cell::Decimal(a), Cell::Decimal(b)) => Ok(Cell::Decimal(a + b)),
        (Cell::Int(a), Cell::Decimal(b)) => Ok(Cell::Decimal(Decimal::from(*a) + b)),
        (Cell::Decimal(a), Cell::Int(b)) => Ok(Cell::Decimal(a + Decimal::from(*b))),
        _ => Err(LiftError::NonNumericMeasure {
            column: column.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_table() -> Table {
        let mut t = Table::new("Sales Data", &["Location", "Product", "Shipped", "MCB"]);
        t.push_row(vec![
            Cell::text("Austin TX"),
            Cell::text("P1"),
            Cell::Int(3),
            Cell::Decimal(dec!(1.50)),
        ]);
        t.push_row(vec![
            Cell::text("Austin TX"),
            Cell::text("P2"),
            Cell::Int(2),
            Cell::Decimal(dec!(2.25)),
        ]);
        t.push_row(vec![
            Cell::text("Boston MA"),
            Cell::text("P1"),
            Cell::Int(5),
            Cell::Decimal(dec!(0.75)),
        ]);
        t
    }

    #[test]
    fn test_single_key_sum() {
        let t = sample_table();
        let out = aggregate(
            &t,
            "Location Summary",
            &["Location"],
            &[
                Measure::new("Shipped", "Total Items"),
                Measure::new("MCB", "Total MCB"),
            ],
        )
        .unwrap();

        assert_eq!(out.columns, vec!["Location", "Total Items", "Total MCB"]);
        assert_eq!(out.rows.len(), 2);
        // BTreeMap order: Austin before Boston
        assert_eq!(out.rows[0][0], Cell::text("Austin TX"));
        assert_eq!(out.rows[0][1], Cell::Int(5));
        assert_eq!(out.rows[0][2], Cell::Decimal(dec!(3.75)));
        assert_eq!(out.rows[1][1], Cell::Int(5));
    }

    #[test]
    fn test_composite_key() {
        let t = sample_table();
        let out = aggregate(
            &t,
            "Product Summary",
            &["Location", "Product"],
            &[Measure::new("Shipped", "Total Items")],
        )
        .unwrap();
        assert_eq!(out.rows.len(), 3);
    }

    #[test]
    fn test_conservation() {
        let t = sample_table();
        let out = aggregate(
            &t,
            "S",
            &["Product"],
            &[Measure::new("MCB", "Total MCB")],
        )
        .unwrap();

        let input_sum: Decimal = t
            .rows
            .iter()
            .map(|r| match &r[3] {
                Cell::Decimal(d) => *d,
                _ => Decimal::ZERO,
            })
            .sum();
        let output_sum: Decimal = out
            .rows
            .iter()
            .map(|r| match &r[1] {
                Cell::Decimal(d) => *d,
                _ => Decimal::ZERO,
            })
            .sum();
        assert_eq!(input_sum, output_sum);
    }

    #[test]
    fn test_deterministic_order() {
        let t = sample_table();
        let a = aggregate(&t, "S", &["Product"], &[Measure::new("Shipped", "N")]).unwrap();
        let b = aggregate(&t, "S", &["Product"], &[Measure::new("Shipped", "N")]).unwrap();
        assert_eq!(a.rows, b.rows);
    }

    #[test]
    fn test_int_decimal_promotion() {
        let mut t = Table::new("T", &["K", "V"]);
        t.push_row(vec![Cell::text("a"), Cell::Int(1)]);
        t.push_row(vec![Cell::text("a"), Cell::Decimal(dec!(0.5))]);
        let out = aggregate(&t, "S", &["K"], &[Measure::new("V", "V")]).unwrap();
        assert_eq!(out.rows[0][1], Cell::Decimal(dec!(1.5)));
    }

    #[test]
    fn test_empty_cells_contribute_nothing() {
        let mut t = Table::new("T", &["K", "V"]);
        t.push_row(vec![Cell::text("a"), Cell::Int(2)]);
        t.push_row(vec![Cell::text("a"), Cell::Empty]);
        let out = aggregate(&t, "S", &["K"], &[Measure::new("V", "V")]).unwrap();
        assert_eq!(out.rows[0][1], Cell::Int(2));
    }

    #[test]
    fn test_unknown_group_column() {
        let t = sample_table();
        let err = aggregate(&t, "S", &["Nope"], &[]).unwrap_err();
        assert!(matches!(err, LiftError::UnknownColumn { .. }));
    }

    #[test]
    fn test_text_measure_rejected() {
        let t = sample_table();
        let err = aggregate(&t, "S", &["Location"], &[Measure::new("Product", "P")]).unwrap_err();
        assert!(matches!(err, LiftError::NonNumericMeasure { .. }));
    }
}
