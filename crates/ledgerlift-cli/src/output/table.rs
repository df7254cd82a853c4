use ledgerlift_core::export::Table;

const PREVIEW_ROWS: usize = 20;

/// Print each table as an aligned text preview, capped at a few rows.
pub fn print_tables(tables: &[Table]) {
    for (i, table) in tables.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_table(table);
    }
}

fn print_table(table: &Table) {
    println!("=== {} ({} rows) ===", table.name, table.rows.len());

    let shown = table.rows.iter().take(PREVIEW_ROWS);
    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.len()).collect();
    for row in shown.clone() {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.to_string().len());
        }
    }

    let header: Vec<String> = table
        .columns
        .iter()
        .zip(widths.iter().copied())
        .map(|(c, w)| format!("{c:<w$}"))
        .collect();
    println!("  {}", header.join("  "));

    for row in shown {
        let cells: Vec<String> = row
            .iter()
            .zip(widths.iter().copied())
            .map(|(cell, w)| format!("{:<w$}", cell.to_string()))
            .collect();
        println!("  {}", cells.join("  "));
    }

    if table.rows.len() > PREVIEW_ROWS {
        println!("  ... {} more row(s)", table.rows.len() - PREVIEW_ROWS);
    }
}
