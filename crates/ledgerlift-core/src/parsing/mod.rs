pub mod invoice;
pub mod sales;
pub mod statement;
pub mod values;

use crate::extraction::PageContent;

/// Bounded-lookahead view over one page's lines.
///
/// Multi-line group headers need the line or two after the match; peeking
/// past the end of the page yields an empty string rather than a fault, so
/// a header at the bottom of a page just ends up with empty context fields.
pub struct LineWindow<'a> {
    lines: &'a [String],
    cursor: usize,
}

impl<'a> LineWindow<'a> {
    pub fn new(lines: &'a [String], cursor: usize) -> Self {
        LineWindow { lines, cursor }
    }

    /// The line under the cursor.
    pub fn current(&self) -> &'a str {
        self.peek(0)
    }

    /// The line `offset` positions past the cursor, or "" past end-of-page.
    pub fn peek(&self, offset: usize) -> &'a str {
        self.lines
            .get(self.cursor + offset)
            .map(|s| s.as_str())
            .unwrap_or("")
    }
}

/// Classification of one line (plus any follow-up lines it consumed).
///
/// Every line of every page maps to exactly one of these; there is no
/// error variant because malformed input degrades to Unrecognized.
#[derive(Debug)]
pub enum Fragment<R> {
    /// Grouping header recognized; `extra` follow-up lines were consumed
    /// to fill out the context and must be skipped by the scanner.
    Header { extra: usize },
    /// Section marker changed the active section tag.
    Section,
    /// A fully resolved record.
    Detail(R),
    /// Detail-shaped line seen before any grouping context was
    /// established; dropped.
    MissingContext,
    /// Truncation marker: this line and the rest of the page are discarded.
    Truncate,
    /// Anything else; no state change.
    Unrecognized,
}

/// A document layout: how to classify one line given the carried context.
pub trait LineProfile {
    type Context: Default;
    type Record;

    /// Classify the line at the window cursor, updating the context for
    /// headers and section markers. Must not look behind the cursor.
    fn classify(&self, window: &LineWindow<'_>, ctx: &mut Self::Context) -> Fragment<Self::Record>;
}

/// Scan one page's lines in order, appending resolved records to `out`.
///
/// Single pass, no backtracking. Stops at a truncation marker (the marker
/// line itself is excluded); truncation is page-scoped, so the caller goes
/// on to the next page with the same context.
pub fn scan_page<P: LineProfile>(
    profile: &P,
    lines: &[String],
    ctx: &mut P::Context,
    out: &mut Vec<P::Record>,
) {
    let mut i = 0;
    while i < lines.len() {
        let window = LineWindow::new(lines, i);
        match profile.classify(&window, ctx) {
            Fragment::Header { extra } => i += extra,
            Fragment::Detail(record) => out.push(record),
            Fragment::Truncate => return,
            Fragment::Section | Fragment::MissingContext | Fragment::Unrecognized => {}
        }
        i += 1;
    }
}

/// Scan a whole document, carrying one context across page boundaries.
pub fn scan_document<P: LineProfile>(profile: &P, pages: &[PageContent]) -> Vec<P::Record> {
    let mut ctx = P::Context::default();
    let mut records = Vec::new();
    for page in pages {
        scan_page(profile, &page.lines, &mut ctx, &mut records);
    }
    records
}
