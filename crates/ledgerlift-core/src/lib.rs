pub mod aggregate;
pub mod error;
pub mod export;
pub mod extraction;
pub mod model;
pub mod parsing;

use error::LiftError;
use export::Table;
use extraction::PdfExtractor;
use model::{Direction, DocumentKind};
use serde::Serialize;

/// One input file of a conversion run.
#[derive(Debug, Clone)]
pub struct InputDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Per-document result of a batch run. A failed document never aborts its
/// siblings; it just shows up here with zero records.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentStatus {
    pub file_name: String,
    pub records: usize,
    pub error: Option<String>,
}

/// Output of a conversion run: the export tables plus per-document
/// statuses.
///
/// `record_count == 0` with a non-empty input set means no document
/// yielded anything — callers should surface that to the user (wrong
/// document format is the usual cause) rather than silently writing empty
/// tables.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub tables: Vec<Table>,
    pub statuses: Vec<DocumentStatus>,
    pub record_count: usize,
}

/// Main API entry point: convert a batch of PDFs of one document kind
/// into export tables.
///
/// Documents are independent; extraction failures are recorded per
/// document and the batch continues. Errors returned here are
/// table-construction faults, not input problems.
pub fn convert_batch(
    inputs: &[InputDocument],
    kind: DocumentKind,
    extractor: &dyn PdfExtractor,
) -> Result<BatchOutcome, LiftError> {
    match kind {
        DocumentKind::Invoice => convert_invoices(inputs, extractor),
        DocumentKind::Statement => convert_statements(inputs, extractor),
        DocumentKind::Sales => convert_sales(inputs, extractor),
    }
}

fn convert_invoices(
    inputs: &[InputDocument],
    extractor: &dyn PdfExtractor,
) -> Result<BatchOutcome, LiftError> {
    let mut records = Vec::new();
    let mut summaries = Vec::new();
    let mut statuses = Vec::new();

    for input in inputs {
        match extractor.extract_pages(&input.bytes) {
            Ok(pages) => {
                let doc = parsing::invoice::parse_document(&pages, &input.name);
                statuses.push(DocumentStatus {
                    file_name: input.name.clone(),
                    records: doc.records.len(),
                    error: None,
                });
                records.extend(doc.records);
                summaries.push(doc.summary);
            }
            Err(e) => statuses.push(DocumentStatus {
                file_name: input.name.clone(),
                records: 0,
                error: Some(e.to_string()),
            }),
        }
    }

    let record_count = records.len();
    Ok(BatchOutcome {
        tables: vec![
            parsing::invoice::records_table(&records),
            parsing::invoice::summary_table(&summaries),
        ],
        statuses,
        record_count,
    })
}

fn convert_statements(
    inputs: &[InputDocument],
    extractor: &dyn PdfExtractor,
) -> Result<BatchOutcome, LiftError> {
    let mut records = Vec::new();
    let mut statuses = Vec::new();

    for input in inputs {
        match extractor.extract_pages(&input.bytes) {
            Ok(pages) => {
                let doc_records = parsing::statement::parse_document(&pages, &input.name);
                statuses.push(DocumentStatus {
                    file_name: input.name.clone(),
                    records: doc_records.len(),
                    error: None,
                });
                records.extend(doc_records);
            }
            Err(e) => statuses.push(DocumentStatus {
                file_name: input.name.clone(),
                records: 0,
                error: Some(e.to_string()),
            }),
        }
    }

    let record_count = records.len();
    let transactions = parsing::statement::records_table(&records);
    let credits = parsing::statement::direction_table(&transactions, Direction::Credit)?;
    let debits = parsing::statement::direction_table(&transactions, Direction::Debit)?;
    Ok(BatchOutcome {
        tables: vec![transactions, credits, debits],
        statuses,
        record_count,
    })
}

fn convert_sales(
    inputs: &[InputDocument],
    extractor: &dyn PdfExtractor,
) -> Result<BatchOutcome, LiftError> {
    let mut records = Vec::new();
    let mut info = Vec::new();
    let mut statuses = Vec::new();

    for input in inputs {
        match extractor.extract_pages(&input.bytes) {
            Ok(pages) => {
                let doc = parsing::sales::parse_document(&pages, &input.name);
                statuses.push(DocumentStatus {
                    file_name: input.name.clone(),
                    records: doc.records.len(),
                    error: None,
                });
                info.push((input.name.clone(), doc.title, doc.week_ending));
                records.extend(doc.records);
            }
            Err(e) => statuses.push(DocumentStatus {
                file_name: input.name.clone(),
                records: 0,
                error: Some(e.to_string()),
            }),
        }
    }

    let record_count = records.len();
    let sales_data = parsing::sales::records_table(&records);
    let summaries = parsing::sales::summary_tables(&sales_data)?;
    let mut tables = vec![sales_data];
    tables.extend(summaries);
    tables.push(parsing::sales::info_table(&info));
    Ok(BatchOutcome {
        tables,
        statuses,
        record_count,
    })
}
