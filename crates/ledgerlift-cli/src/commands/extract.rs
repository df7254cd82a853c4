use ledgerlift_core::error::LiftError;
use ledgerlift_core::extraction::pdftotext::PdftotextExtractor;
use ledgerlift_core::extraction::PdfExtractor;
use std::path::Path;

/// Dump the raw extracted lines per page. Useful for checking why a
/// document produced no records before blaming the classifier.
pub fn run(file: &Path) -> Result<(), LiftError> {
    let bytes = std::fs::read(file)?;
    let extractor = PdftotextExtractor::new();
    let pages = extractor.extract_pages(&bytes)?;

    for page in &pages {
        println!("--- page {} ({} lines) ---", page.page_number, page.lines.len());
        for line in &page.lines {
            println!("{line}");
        }
    }

    Ok(())
}
