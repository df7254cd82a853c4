use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which document layout a batch is parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Chargeback invoice (SOLD TO blocks with 12-digit-UPC item lines).
    Invoice,
    /// Bank statement (credit/debit sections with dated transaction lines).
    Statement,
    /// Weekly chargeback sales report (customer blocks with brand item lines).
    Sales,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Invoice => write!(f, "invoice"),
            DocumentKind::Statement => write!(f, "statement"),
            DocumentKind::Sales => write!(f, "sales"),
        }
    }
}

/// Direction tag on an emitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Credit,
    Debit,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Credit => write!(f, "Credit"),
            Direction::Debit => write!(f, "Debit"),
        }
    }
}

/// Active section of a bank statement while scanning.
///
/// Set by keyword-bearing header lines and carried across page boundaries;
/// transaction lines seen while the section is still Unknown are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    Credit,
    Debit,
    #[default]
    Unknown,
}

impl Section {
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Section::Credit => Some(Direction::Credit),
            Section::Debit => Some(Direction::Debit),
            Section::Unknown => None,
        }
    }
}

/// One invoice line item, stamped with the store block it appeared under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub source_file: String,
    pub sold_to: String,
    pub address: String,
    pub store_id: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub upc: String,
    pub qty: i64,
    pub description: String,
    pub reference: String,
    pub date: String,
    pub cost: Decimal,
    pub discount: Decimal,
    pub extended_cost: Decimal,
}

/// One bank statement transaction line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub source_file: String,
    pub posted_date: String,
    pub amount: Decimal,
    pub detail: String,
    pub direction: Direction,
}

/// One sales report line item, stamped with the customer/location it
/// appeared under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub source_file: String,
    pub brand: String,
    pub product: String,
    pub unit: String,
    pub description: String,
    pub invoice: String,
    pub ordered: i64,
    pub shipped: i64,
    pub wholesale: Decimal,
    pub discount_pct: String,
    pub mcb_pct: String,
    pub mcb: Decimal,
    pub customer_id: String,
    pub customer_name: String,
    pub location: String,
}

/// Document-scoped totals for one invoice file.
///
/// The totals only ever appear on the first page; a total that was never
/// found stays None and poisons the derived extended cost rather than
/// being treated as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceSummary {
    pub file_name: String,
    pub total_payable: Option<Decimal>,
    pub total_fee: Option<Decimal>,
}

impl InvoiceSummary {
    /// Total extended cost = payable - fee, or None if either is missing.
    pub fn total_ext_cost(&self) -> Option<Decimal> {
        match (self.total_payable, self.total_fee) {
            (Some(payable), Some(fee)) => Some(payable - fee),
            _ => None,
        }
    }
}
