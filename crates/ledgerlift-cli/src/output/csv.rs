use ledgerlift_core::error::LiftError;
use ledgerlift_core::export::Table;
use std::path::{Path, PathBuf};

/// Write one table as `<dir>/<table name>.csv`, returning the path.
///
/// Empty cells become empty CSV fields, so a missing document total stays
/// visibly blank instead of turning into a zero.
pub fn write_table(dir: &Path, table: &Table) -> Result<PathBuf, LiftError> {
    let path = dir.join(format!("{}.csv", file_stem(&table.name)));
    let export_err = |e: csv::Error| LiftError::Export {
        path: path.clone(),
        reason: e.to_string(),
    };

    let mut writer = csv::Writer::from_path(&path).map_err(export_err)?;
    writer.write_record(&table.columns).map_err(export_err)?;
    for row in &table.rows {
        let fields: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
        writer.write_record(&fields).map_err(export_err)?;
    }
    writer.flush().map_err(|e| LiftError::Export {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    Ok(path)
}

fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}
