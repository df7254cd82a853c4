//! Chargeback invoice layout: "SOLD TO:" store blocks followed by item
//! lines keyed by a 12-digit UPC, with TOTAL PAYABLE / TOTAL FEE figures
//! on the first page only.

use crate::extraction::PageContent;
use crate::export::{Cell, Table};
use crate::model::{InvoiceRecord, InvoiceSummary};
use crate::parsing::values::{parse_amount, parse_qty};
use crate::parsing::{scan_document, Fragment, LineProfile, LineWindow};
use regex::Regex;
use std::sync::LazyLock;

static SOLD_TO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"SOLD TO:\s+(.*)").expect("sold-to pattern"));

/// Store id + city + state + zip on the line two below "SOLD TO:".
static STORE_CITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+([A-Z\s\-']+)\s+([A-Z]{2})\s+(\d{5})").expect("city pattern"));

/// UPC, qty, description, reference, date, unit-of-measure token, then
/// cost / discount / extended cost.
static ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{12})\s+(\d+)\s+(.*?)\s+(\d+)\s+(\d{1,2}/\d{1,2}/\d{2,4})\s+[\w/]+\s+([\d.]+)\s+([\d.]+)\s+([\d.]+)",
    )
    .expect("item pattern")
});

static TOTAL_PAYABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"TOTAL PAYABLE\s+\$?([\d,]+\.\d{2})").expect("payable pattern"));

static TOTAL_FEE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"TOTAL FEE\s+\$?([\d,]+\.\d{2})").expect("fee pattern"));

/// Grouping context for invoice scans: the store block item lines attach to.
#[derive(Debug, Clone, Default)]
pub struct StoreContext {
    established: bool,
    pub sold_to: String,
    pub address: String,
    pub store_id: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

pub struct InvoiceProfile;

impl LineProfile for InvoiceProfile {
    type Context = StoreContext;
    type Record = InvoiceRecord;

    fn classify(&self, window: &LineWindow<'_>, ctx: &mut StoreContext) -> Fragment<InvoiceRecord> {
        let line = window.current();

        if line.contains("SOLD TO:") {
            let sold_to = SOLD_TO
                .captures(line)
                .map(|c| c[1].trim().to_string())
                .unwrap_or_default();
            let address = window.peek(1).trim().to_string();

            // The city line may not match (short blocks near a page edge);
            // those fields stay empty and scanning continues.
            let (store_id, city, state, zip) = match STORE_CITY.captures(window.peek(2)) {
                Some(c) => (
                    c[1].to_string(),
                    c[2].trim().to_string(),
                    c[3].to_string(),
                    c[4].to_string(),
                ),
                None => Default::default(),
            };

            *ctx = StoreContext {
                established: true,
                sold_to,
                address,
                store_id,
                city,
                state,
                zip,
            };
            return Fragment::Header { extra: 2 };
        }

        if let Some(c) = ITEM.captures(line) {
            if !ctx.established {
                return Fragment::MissingContext;
            }
            // Structural match with a failed numeric decode is a skip, not
            // an error.
            let (Some(qty), Some(cost), Some(discount), Some(extended_cost)) = (
                parse_qty(&c[2]),
                parse_amount(&c[6]),
                parse_amount(&c[7]),
                parse_amount(&c[8]),
            ) else {
                return Fragment::Unrecognized;
            };

            return Fragment::Detail(InvoiceRecord {
                source_file: String::new(),
                sold_to: ctx.sold_to.clone(),
                address: ctx.address.clone(),
                store_id: ctx.store_id.clone(),
                city: ctx.city.clone(),
                state: ctx.state.clone(),
                zip: ctx.zip.clone(),
                upc: c[1].to_string(),
                qty,
                description: c[3].trim().to_string(),
                reference: c[4].to_string(),
                date: c[5].to_string(),
                cost,
                discount,
                extended_cost,
            });
        }

        Fragment::Unrecognized
    }
}

/// Records plus document-scoped totals for one invoice file.
#[derive(Debug, Clone)]
pub struct InvoiceDocument {
    pub records: Vec<InvoiceRecord>,
    pub summary: InvoiceSummary,
}

/// Parse one invoice document: scan every page for records (store context
/// carries across page boundaries) and the first page only for the totals.
pub fn parse_document(pages: &[PageContent], file_name: &str) -> InvoiceDocument {
    let mut total_payable = None;
    let mut total_fee = None;
    if let Some(first) = pages.first() {
        for line in &first.lines {
            if total_payable.is_none() {
                total_payable = TOTAL_PAYABLE
                    .captures(line)
                    .and_then(|c| parse_amount(&c[1]));
            }
            if total_fee.is_none() {
                total_fee = TOTAL_FEE.captures(line).and_then(|c| parse_amount(&c[1]));
            }
            if total_payable.is_some() && total_fee.is_some() {
                break;
            }
        }
    }

    let mut records = scan_document(&InvoiceProfile, pages);
    for record in &mut records {
        record.source_file = file_name.to_string();
    }

    InvoiceDocument {
        records,
        summary: InvoiceSummary {
            file_name: file_name.to_string(),
            total_payable,
            total_fee,
        },
    }
}

pub const RECORD_COLUMNS: [&str; 15] = [
    "Source File",
    "Sold To",
    "Address",
    "Store ID",
    "City",
    "State",
    "Zip",
    "UPC",
    "Qty",
    "Description",
    "Reference",
    "Date",
    "Cost",
    "Discount",
    "Extended Cost",
];

pub fn records_table(records: &[InvoiceRecord]) -> Table {
    let mut table = Table::new("Parsed Invoices", &RECORD_COLUMNS);
    for r in records {
        table.push_row(vec![
            Cell::text(&r.source_file),
            Cell::text(&r.sold_to),
            Cell::text(&r.address),
            Cell::text(&r.store_id),
            Cell::text(&r.city),
            Cell::text(&r.state),
            Cell::text(&r.zip),
            Cell::text(&r.upc),
            Cell::Int(r.qty),
            Cell::text(&r.description),
            Cell::text(&r.reference),
            Cell::text(&r.date),
            Cell::Decimal(r.cost),
            Cell::Decimal(r.discount),
            Cell::Decimal(r.extended_cost),
        ]);
    }
    table
}

/// One row per input file. Missing totals stay Empty, and the derived
/// extended cost is Empty unless both inputs were found.
pub fn summary_table(summaries: &[InvoiceSummary]) -> Table {
    let mut table = Table::new(
        "Invoice Summary",
        &["File Name", "Total Payable", "Total Fee", "Total Ext Cost"],
    );
    for s in summaries {
        table.push_row(vec![
            Cell::text(&s.file_name),
            Cell::opt_decimal(s.total_payable),
            Cell::opt_decimal(s.total_fee),
            Cell::opt_decimal(s.total_ext_cost()),
        ]);
    }
    table
}
