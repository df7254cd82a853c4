use ledgerlift_core::error::LiftError;
use ledgerlift_core::extraction::pdftotext::PdftotextExtractor;
use ledgerlift_core::model::DocumentKind;
use ledgerlift_core::{convert_batch, InputDocument};
use std::path::{Path, PathBuf};

use crate::output;

pub fn run(
    kind: DocumentKind,
    files: &[PathBuf],
    out_dir: Option<PathBuf>,
    output_format: &str,
) -> Result<(), LiftError> {
    let mut inputs = Vec::with_capacity(files.len());
    for file in files {
        inputs.push(InputDocument {
            name: display_name(file),
            bytes: std::fs::read(file)?,
        });
    }

    let extractor = PdftotextExtractor::new();
    let outcome = convert_batch(&inputs, kind, &extractor)?;

    for status in &outcome.statuses {
        match &status.error {
            Some(reason) => eprintln!("{}: failed ({reason})", status.file_name),
            None => eprintln!("{}: {} record(s)", status.file_name, status.records),
        }
    }

    if outcome.record_count == 0 {
        // Distinct from "no input files": every document was read but
        // nothing matched, which usually means the wrong --kind.
        eprintln!(
            "No records were extracted from {} file(s). Check that the PDFs match the '{kind}' layout.",
            inputs.len()
        );
    }

    match out_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            for table in &outcome.tables {
                let path = output::csv::write_table(&dir, table)?;
                eprintln!("wrote {} ({} rows)", path.display(), table.rows.len());
            }
        }
        None => match output_format {
            "json" => println!("{}", serde_json::to_string_pretty(&outcome.tables)?),
            _ => output::table::print_tables(&outcome.tables),
        },
    }

    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
