//! Integration tests for the convert_batch() end-to-end pipeline.
//!
//! Uses a MockExtractor that returns pre-built PageContent without
//! invoking pdftotext, so these tests run without poppler-utils.

use ledgerlift_core::error::LiftError;
use ledgerlift_core::export::Cell;
use ledgerlift_core::extraction::{PageContent, PdfExtractor};
use ledgerlift_core::model::DocumentKind;
use ledgerlift_core::{convert_batch, InputDocument};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Serves a canned page set per document name; names starting with "bad"
/// fail extraction.
struct MockExtractor {
    docs: Vec<(String, Vec<PageContent>)>,
}

impl PdfExtractor for MockExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, LiftError> {
        let name = String::from_utf8_lossy(pdf_bytes);
        if name.starts_with("bad") {
            return Err(LiftError::Extraction("could not read PDF".into()));
        }
        self.docs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, pages)| pages.clone())
            .ok_or_else(|| LiftError::Extraction(format!("unknown mock doc {name}")))
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

fn page(number: usize, lines: &[&str]) -> PageContent {
    PageContent {
        page_number: number,
        lines: lines.iter().map(|s| s.to_string()).collect(),
    }
}

/// Input whose bytes name the mock document to serve.
fn input(name: &str) -> InputDocument {
    InputDocument {
        name: name.to_string(),
        bytes: name.as_bytes().to_vec(),
    }
}

// ---------------------------------------------------------------------------
// Test 1: Invoice batch — records, provenance, per-file summary
// ---------------------------------------------------------------------------
#[test]
fn invoice_batch_with_summary() {
    let extractor = MockExtractor {
        docs: vec![
            (
                "a.pdf".into(),
                vec![page(
                    1,
                    &[
                        "TOTAL PAYABLE $1,000.00",
                        "TOTAL FEE 100.00",
                        "SOLD TO: CENTRAL MARKET",
                        "  4001 LAMAR BLVD",
                        "  1234 SAN MARCOS TX 78666",
                        "012345678901 3 WIDGET A 1001 01/02/23 EA 10.00 1.00 9.00",
                    ],
                )],
            ),
            (
                "b.pdf".into(),
                vec![page(
                    1,
                    &[
                        "SOLD TO: CORNER STORE",
                        "  12 MAIN ST",
                        "  9 BOSTON MA 02101",
                        "012345678902 1 WIDGET B 1002 01/03/23 EA 5.00 0.00 5.00",
                    ],
                )],
            ),
        ],
    };

    let outcome = convert_batch(
        &[input("a.pdf"), input("b.pdf")],
        DocumentKind::Invoice,
        &extractor,
    )
    .unwrap();

    assert_eq!(outcome.record_count, 2);
    let items = &outcome.tables[0];
    assert_eq!(items.name, "Parsed Invoices");
    // Provenance: each record carries its own source file.
    assert_eq!(items.rows[0][0], Cell::text("a.pdf"));
    assert_eq!(items.rows[1][0], Cell::text("b.pdf"));

    let summary = &outcome.tables[1];
    assert_eq!(summary.name, "Invoice Summary");
    assert_eq!(summary.rows.len(), 2);
    // a.pdf: 1000 - 100
    assert_eq!(summary.rows[0][3], Cell::Decimal(dec!(900.00)));
    // b.pdf never had the totals: null, not zero
    assert_eq!(summary.rows[1][1], Cell::Empty);
    assert_eq!(summary.rows[1][3], Cell::Empty);
}

// ---------------------------------------------------------------------------
// Test 2: Statement batch — sections, truncation, credit/debit views
// ---------------------------------------------------------------------------
#[test]
fn statement_batch_with_direction_views() {
    let extractor = MockExtractor {
        docs: vec![(
            "stmt.pdf".into(),
            vec![
                page(
                    1,
                    &[
                        "Electronic Deposits/Bank Credits",
                        "04/15   1,234.56   ACH TRANSFER FROM SAVINGS",
                        "Electronic Debits",
                        "04/16   200.00   CHECK CARD PURCHASE",
                        "Daily Ledger Balance Summary",
                        "04/17   999.99   SHOULD BE DISCARDED",
                    ],
                ),
                page(2, &["04/18   25.00   RECURRING PAYMENT"]),
            ],
        )],
    };

    let outcome = convert_batch(&[input("stmt.pdf")], DocumentKind::Statement, &extractor).unwrap();

    assert_eq!(outcome.record_count, 3);
    let txns = &outcome.tables[0];
    assert_eq!(txns.name, "Transactions");
    assert_eq!(txns.rows[0][2], Cell::Decimal(dec!(1234.56)));
    assert_eq!(txns.rows[0][4], Cell::text("Credit"));
    // Page 2 line resumed under the carried Debit section.
    assert_eq!(txns.rows[2][3], Cell::text("RECURRING PAYMENT"));
    assert_eq!(txns.rows[2][4], Cell::text("Debit"));

    let credits = &outcome.tables[1];
    let debits = &outcome.tables[2];
    assert_eq!(credits.name, "Credits");
    assert_eq!(credits.rows.len(), 1);
    assert_eq!(debits.name, "Debits");
    assert_eq!(debits.rows.len(), 2);
}

// ---------------------------------------------------------------------------
// Test 3: Sales batch — aggregation conservation across summaries
// ---------------------------------------------------------------------------
#[test]
fn sales_batch_aggregation_conservation() {
    let extractor = MockExtractor {
        docs: vec![(
            "week.pdf".into(),
            vec![page(
                1,
                &[
                    "HARMLESS HARVEST CHARGEBACK REPORT",
                    "Week ending 08/17/2025",
                    "Austin TX",
                    "Customer : [1]-ALPHA MARKET",
                    "*HRMLSHRVS 41801 12 16OZ COCONUT WATER 11112222 10 8 24.00 10% 5% 9.60",
                    "*HRMLSHRVS 41802 12 12OZ COCONUT WATER 11112223 6 6 18.00 0% 5% 5.40",
                    "Boston MA",
                    "Customer : [2]-BETA GROCER",
                    "*HRMLSHRVS 41801 12 16OZ COCONUT WATER 11112224 4 3 24.00 10% 5% 3.60",
                ],
            )],
        )],
    };

    let outcome = convert_batch(&[input("week.pdf")], DocumentKind::Sales, &extractor).unwrap();
    assert_eq!(outcome.record_count, 3);
    assert_eq!(outcome.tables.len(), 5);

    let data = &outcome.tables[0];
    let mcb_col = data.column_index("MCB").unwrap();
    let input_mcb: Decimal = data
        .rows
        .iter()
        .map(|r| match &r[mcb_col] {
            Cell::Decimal(d) => *d,
            _ => Decimal::ZERO,
        })
        .sum();
    assert_eq!(input_mcb, dec!(18.60));

    // Every summary partition conserves the MCB total exactly.
    for table in &outcome.tables[1..4] {
        let col = table.column_index("Total MCB").unwrap();
        let total: Decimal = table
            .rows
            .iter()
            .map(|r| match &r[col] {
                Cell::Decimal(d) => *d,
                _ => Decimal::ZERO,
            })
            .sum();
        assert_eq!(total, input_mcb, "drift in {}", table.name);
    }

    let info = &outcome.tables[4];
    assert_eq!(info.name, "Report Info");
    assert_eq!(info.rows[0][2], Cell::text("Week ending 08/17/2025"));
}

// ---------------------------------------------------------------------------
// Test 4: A failing document does not abort its siblings
// ---------------------------------------------------------------------------
#[test]
fn failed_document_does_not_abort_batch() {
    let extractor = MockExtractor {
        docs: vec![(
            "ok.pdf".into(),
            vec![page(
                1,
                &["Deposits", "04/01   10.00   WIRE IN"],
            )],
        )],
    };

    let outcome = convert_batch(
        &[input("bad.pdf"), input("ok.pdf")],
        DocumentKind::Statement,
        &extractor,
    )
    .unwrap();

    assert_eq!(outcome.record_count, 1);
    assert_eq!(outcome.statuses.len(), 2);
    assert!(outcome.statuses[0].error.is_some());
    assert_eq!(outcome.statuses[0].records, 0);
    assert!(outcome.statuses[1].error.is_none());
    assert_eq!(outcome.statuses[1].records, 1);
}

// ---------------------------------------------------------------------------
// Test 5: Zero extraction is visible, not silent
// ---------------------------------------------------------------------------
#[test]
fn zero_records_is_detectable() {
    let extractor = MockExtractor {
        docs: vec![("empty.pdf".into(), vec![page(1, &["nothing tabular here"])])],
    };

    let outcome = convert_batch(&[input("empty.pdf")], DocumentKind::Invoice, &extractor).unwrap();
    assert_eq!(outcome.record_count, 0);
    // The tables still exist, just empty; the caller distinguishes this
    // from an empty input set via statuses + record_count.
    assert_eq!(outcome.tables[0].rows.len(), 0);
    assert_eq!(outcome.statuses.len(), 1);
}

// ---------------------------------------------------------------------------
// Test 6: Re-running the batch yields identical output
// ---------------------------------------------------------------------------
#[test]
fn conversion_is_idempotent() {
    let extractor = MockExtractor {
        docs: vec![(
            "week.pdf".into(),
            vec![page(
                1,
                &[
                    "Austin TX",
                    "Customer : [1]-ALPHA MARKET",
                    "*HRMLSHRVS 41801 12 16OZ COCONUT WATER 11112222 10 8 24.00 10% 5% 9.60",
                ],
            )],
        )],
    };

    let a = convert_batch(&[input("week.pdf")], DocumentKind::Sales, &extractor).unwrap();
    let b = convert_batch(&[input("week.pdf")], DocumentKind::Sales, &extractor).unwrap();
    for (ta, tb) in a.tables.iter().zip(&b.tables) {
        assert_eq!(ta.rows, tb.rows);
    }
}
