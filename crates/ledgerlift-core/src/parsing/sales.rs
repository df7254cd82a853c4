//! Weekly chargeback sales report layout: location and customer header
//! lines scoping brand item rows, with per-location / per-customer /
//! per-product summaries derived afterwards.

use crate::aggregate::{aggregate, Measure};
use crate::error::LiftError;
use crate::extraction::PageContent;
use crate::export::{Cell, Table};
use crate::model::SalesRecord;
use crate::parsing::values::{parse_amount, parse_qty};
use crate::parsing::{scan_document, Fragment, LineProfile, LineWindow};
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::LazyLock;

/// A city + 2-letter state line, e.g. "Austin TX".
static LOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+\s+[A-Z]{2}$").expect("location pattern"));

static CUSTOMER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Customer : \[(\d+)\]-(.*)").expect("customer pattern"));

/// Invoice numbers are 8-9 digit runs; used by the recovery path when the
/// description swallowed the token boundary.
static INVOICE_NUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{8,9}").expect("invoice pattern"));

const DETAIL_PREFIX: &str = "*HRMLSHRVS";
const TITLE_MARK: &str = "HARMLESS HARVEST";
const WEEK_MARK: &str = "Week ending";

#[derive(Debug, Clone, Default)]
pub struct SalesContext {
    pub location: String,
    pub customer_id: String,
    pub customer_name: String,
}

impl SalesContext {
    /// Item rows attach to a customer; location alone is not enough.
    fn is_established(&self) -> bool {
        !self.customer_id.is_empty()
    }
}

pub struct SalesProfile;

impl LineProfile for SalesProfile {
    type Context = SalesContext;
    type Record = SalesRecord;

    fn classify(&self, window: &LineWindow<'_>, ctx: &mut SalesContext) -> Fragment<SalesRecord> {
        let line = window.current().trim();
        if line.is_empty() {
            return Fragment::Unrecognized;
        }

        if LOCATION.is_match(line) && !line.contains("Customer") {
            ctx.location = line.to_string();
            return Fragment::Header { extra: 0 };
        }

        if line.starts_with("Customer :") {
            if let Some(c) = CUSTOMER.captures(line) {
                ctx.customer_id = c[1].to_string();
                ctx.customer_name = c[2].trim().to_string();
            }
            return Fragment::Header { extra: 0 };
        }

        if line.starts_with(DETAIL_PREFIX) {
            if !ctx.is_established() {
                return Fragment::MissingContext;
            }
            return match parse_detail(line, ctx) {
                Some(record) => Fragment::Detail(record),
                None => Fragment::Unrecognized,
            };
        }

        Fragment::Unrecognized
    }
}

/// Token-walk an item line.
///
/// Shape: brand, product, two unit tokens, description tokens up to the
/// first all-digit token of 6+ digits, then invoice, ordered, shipped,
/// wholesale, discount %, MCB % and an optional trailing MCB amount
/// (missing trailing fields default rather than rejecting the line).
/// A failed numeric decode on a present token skips the whole line.
fn parse_detail(line: &str, ctx: &SalesContext) -> Option<SalesRecord> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 11 {
        return None;
    }

    let brand = parts[0].to_string();
    let product = parts[1].to_string();
    let unit = format!("{} {}", parts[2], parts[3]);

    let mut idx = 4;
    let mut description_parts = Vec::new();
    while idx < parts.len() && !is_boundary_token(parts[idx]) {
        description_parts.push(parts[idx]);
        idx += 1;
    }
    let description = description_parts.join(" ");

    let record = |invoice: String,
                  ordered: i64,
                  shipped: i64,
                  wholesale: Decimal,
                  discount_pct: String,
                  mcb_pct: String,
                  mcb: Decimal| SalesRecord {
        source_file: String::new(),
        brand: brand.clone(),
        product: product.clone(),
        unit: unit.clone(),
        description: description.clone(),
        invoice,
        ordered,
        shipped,
        wholesale,
        discount_pct,
        mcb_pct,
        mcb,
        customer_id: ctx.customer_id.clone(),
        customer_name: ctx.customer_name.clone(),
        location: ctx.location.clone(),
    };

    if idx + 5 >= parts.len() {
        // The description ran over the boundary token; recover by finding
        // an invoice-sized digit run in the raw line and splitting there.
        let m = INVOICE_NUM.find(line)?;
        let invoice = m.as_str().to_string();
        let nums: Vec<&str> = line[m.end()..].split_whitespace().collect();
        if nums.len() < 5 {
            return None;
        }
        let ordered = parse_qty(nums[0])?;
        let shipped = parse_qty(nums[1])?;
        let wholesale = parse_amount(nums[2])?;
        let mcb = match nums.get(5) {
            Some(s) => parse_amount(s)?,
            None => Decimal::ZERO,
        };
        return Some(record(
            invoice,
            ordered,
            shipped,
            wholesale,
            nums[3].to_string(),
            nums[4].to_string(),
            mcb,
        ));
    }

    let invoice = parts[idx].to_string();
    idx += 1;
    let ordered = match parts.get(idx) {
        Some(s) => parse_qty(s)?,
        None => 0,
    };
    idx += 1;
    let shipped = match parts.get(idx) {
        Some(s) => parse_qty(s)?,
        None => 0,
    };
    idx += 1;
    let wholesale = match parts.get(idx) {
        Some(s) => parse_amount(s)?,
        None => Decimal::ZERO,
    };
    idx += 1;
    let discount_pct = parts.get(idx).copied().unwrap_or("0%").to_string();
    idx += 1;
    let mcb_pct = parts.get(idx).copied().unwrap_or("0%").to_string();
    idx += 1;
    let mcb = match parts.get(idx) {
        Some(s) => parse_amount(s)?,
        None => Decimal::ZERO,
    };

    Some(record(
        invoice,
        ordered,
        shipped,
        wholesale,
        discount_pct,
        mcb_pct,
        mcb,
    ))
}

fn is_boundary_token(s: &str) -> bool {
    s.len() >= 6 && s.bytes().all(|b| b.is_ascii_digit())
}

/// Records plus report-level metadata for one sales report file.
#[derive(Debug, Clone)]
pub struct SalesDocument {
    pub title: Option<String>,
    pub week_ending: Option<String>,
    pub records: Vec<SalesRecord>,
}

pub fn parse_document(pages: &[PageContent], file_name: &str) -> SalesDocument {
    let mut title = None;
    let mut week_ending = None;
    for page in pages {
        for line in &page.lines {
            if title.is_none() && line.contains(TITLE_MARK) {
                title = Some(line.trim().to_string());
            }
            if week_ending.is_none() && line.contains(WEEK_MARK) {
                week_ending = Some(line.trim().to_string());
            }
        }
    }

    let mut records = scan_document(&SalesProfile, pages);
    for record in &mut records {
        record.source_file = file_name.to_string();
    }

    SalesDocument {
        title,
        week_ending,
        records,
    }
}

pub const RECORD_COLUMNS: [&str; 15] = [
    "Source File",
    "Brand",
    "Product",
    "Unit",
    "Description",
    "Invoice",
    "Ordered",
    "Shipped",
    "Wholesale",
    "Discount%",
    "MCB%",
    "MCB",
    "Customer ID",
    "Customer Name",
    "Location",
];

pub fn records_table(records: &[SalesRecord]) -> Table {
    let mut table = Table::new("Sales Data", &RECORD_COLUMNS);
    for r in records {
        table.push_row(vec![
            Cell::text(&r.source_file),
            Cell::text(&r.brand),
            Cell::text(&r.product),
            Cell::text(&r.unit),
            Cell::text(&r.description),
            Cell::text(&r.invoice),
            Cell::Int(r.ordered),
            Cell::Int(r.shipped),
            Cell::Decimal(r.wholesale),
            Cell::text(&r.discount_pct),
            Cell::text(&r.mcb_pct),
            Cell::Decimal(r.mcb),
            Cell::text(&r.customer_id),
            Cell::text(&r.customer_name),
            Cell::text(&r.location),
        ]);
    }
    table
}

/// The three grouped summaries over the primary sales table.
pub fn summary_tables(sales_data: &Table) -> Result<Vec<Table>, LiftError> {
    let measures = [
        Measure::new("Shipped", "Total Items"),
        Measure::new("MCB", "Total MCB"),
    ];
    Ok(vec![
        aggregate(sales_data, "Location Summary", &["Location"], &measures)?,
        aggregate(
            sales_data,
            "Customer Summary",
            &["Customer ID", "Customer Name", "Location"],
            &measures,
        )?,
        aggregate(
            sales_data,
            "Product Summary",
            &["Product", "Description"],
            &measures,
        )?,
    ])
}

/// One metadata row per input file (report title and week-ending lines).
pub fn info_table(documents: &[(String, Option<String>, Option<String>)]) -> Table {
    let mut table = Table::new("Report Info", &["File Name", "Title", "Week Ending"]);
    for (file_name, title, week_ending) in documents {
        let opt_text = |v: &Option<String>| match v {
            Some(s) => Cell::text(s.clone()),
            None => Cell::Empty,
        };
        table.push_row(vec![
            Cell::text(file_name.clone()),
            opt_text(title),
            opt_text(week_ending),
        ]);
    }
    table
}
