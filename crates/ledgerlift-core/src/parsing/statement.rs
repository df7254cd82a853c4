//! Bank statement layout: credit/debit section headers, dated transaction
//! lines, and a "daily ledger balance summary" block that ends the useful
//! content of a page.

use crate::error::LiftError;
use crate::extraction::PageContent;
use crate::export::{Cell, Table};
use crate::model::{Direction, Section, TransactionRecord};
use crate::parsing::values::parse_amount;
use crate::parsing::{scan_document, Fragment, LineProfile, LineWindow};
use regex::Regex;
use std::sync::LazyLock;

/// Posted date (MM/DD), amount with optional thousands separators, detail.
static TXN_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{2}/\d{2})\s+([\d,]+\.\d{2})\s+(.*\S)\s*$").expect("txn pattern")
});

/// Matched case-insensitively as substrings. Credit keys are checked
/// before debit keys; first match wins.
const CREDIT_KEYS: [&str; 5] = [
    "credits",
    "deposits",
    "electronic deposits",
    "bank credits",
    "electronic deposits/bank credits",
];

const DEBIT_KEYS: [&str; 4] = [
    "debits",
    "electronic debits",
    "bank debits",
    "electronic debits/bank debits",
];

/// Everything from this line to the end of the page is discarded.
const TRUNCATION_MARK: &str = "daily ledger balance summary";

#[derive(Debug, Default)]
pub struct StatementContext {
    pub section: Section,
}

fn detect_section(line_lower: &str) -> Option<Section> {
    if CREDIT_KEYS.iter().any(|k| line_lower.contains(k)) {
        return Some(Section::Credit);
    }
    if DEBIT_KEYS.iter().any(|k| line_lower.contains(k)) {
        return Some(Section::Debit);
    }
    None
}

pub struct StatementProfile;

impl LineProfile for StatementProfile {
    type Context = StatementContext;
    type Record = TransactionRecord;

    fn classify(
        &self,
        window: &LineWindow<'_>,
        ctx: &mut StatementContext,
    ) -> Fragment<TransactionRecord> {
        let line = window.current().trim();
        if line.is_empty() {
            return Fragment::Unrecognized;
        }

        let lower = line.to_lowercase();
        if lower.contains(TRUNCATION_MARK) {
            return Fragment::Truncate;
        }

        // Section update happens before the transaction match, so a
        // transaction whose detail text contains a section phrase both
        // flips the section and still emits a record.
        let switched = match detect_section(&lower) {
            Some(section) => {
                ctx.section = section;
                true
            }
            None => false,
        };

        if let Some(c) = TXN_LINE.captures(line) {
            let Some(direction) = ctx.section.direction() else {
                return Fragment::MissingContext;
            };
            let Some(amount) = parse_amount(&c[2]) else {
                return Fragment::Unrecognized;
            };
            return Fragment::Detail(TransactionRecord {
                source_file: String::new(),
                posted_date: c[1].to_string(),
                amount,
                detail: c[3].trim().to_string(),
                direction,
            });
        }

        if switched {
            return Fragment::Section;
        }
        Fragment::Unrecognized
    }
}

pub fn parse_document(pages: &[PageContent], file_name: &str) -> Vec<TransactionRecord> {
    let mut records = scan_document(&StatementProfile, pages);
    for record in &mut records {
        record.source_file = file_name.to_string();
    }
    records
}

pub const RECORD_COLUMNS: [&str; 5] = [
    "Source File",
    "Posted Date",
    "Amount",
    "Transaction Detail",
    "Type",
];

pub fn records_table(records: &[TransactionRecord]) -> Table {
    let mut table = Table::new("Transactions", &RECORD_COLUMNS);
    for r in records {
        table.push_row(vec![
            Cell::text(&r.source_file),
            Cell::text(&r.posted_date),
            Cell::Decimal(r.amount),
            Cell::text(&r.detail),
            Cell::text(r.direction.to_string()),
        ]);
    }
    table
}

/// Credits or Debits view, filtered from the primary transaction table.
pub fn direction_table(transactions: &Table, direction: Direction) -> Result<Table, LiftError> {
    let name = match direction {
        Direction::Credit => "Credits",
        Direction::Debit => "Debits",
    };
    transactions.filter_eq(name, "Type", &Cell::text(direction.to_string()))
}
