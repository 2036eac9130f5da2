//! Paranagua source adapter: extracts cargo forecast rows from the port
//! authority's static lineup page.
//!
//! The page renders several visually identical tables; the expected-vessels
//! table is found by a [`TableSelector`] strategy so the (brittle) positional
//! selection can be swapped for a header-text match without touching row
//! extraction.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::{ColumnMap, ParanaguaConfig};
use crate::fetch;
use crate::normalize;
use crate::record::{CanonicalRecord, Direction, Port, RawRow};

// Safety: these selector strings are compile-time constants containing valid
// CSS selectors, so Selector::parse cannot fail on them.
static TABLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("table").unwrap());

static BODY_ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("tbody tr").unwrap());

static CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());

static HEADER_CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("th, td").unwrap());

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no table matched the configured selection strategy")]
    TableNotFound,
}

/// Strategy for locating the expected-vessels table among the candidates on
/// the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSelector {
    /// The `index`-th table (0-based) among tables carrying every class in
    /// `class_signature`. Selects the wrong table if the page adds or removes
    /// a signature-matching table above the target.
    ByClassPosition {
        class_signature: String,
        index: usize,
    },
    /// The first table whose header row contains a cell with exactly this
    /// text. Replacement strategy for [`TableSelector::ByClassPosition`].
    ByHeaderText { needle: String },
}

impl TableSelector {
    pub fn select<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        match self {
            TableSelector::ByClassPosition {
                class_signature,
                index,
            } => document
                .select(&TABLE_SELECTOR)
                .filter(|table| {
                    let classes: Vec<&str> = table.value().classes().collect();
                    class_signature
                        .split_whitespace()
                        .all(|class| classes.contains(&class))
                })
                .nth(*index),
            TableSelector::ByHeaderText { needle } => {
                document.select(&TABLE_SELECTOR).find(|table| {
                    table
                        .select(&HEADER_CELL_SELECTOR)
                        .any(|cell| cell_text(&cell) == *needle)
                })
            }
        }
    }
}

impl ParanaguaConfig {
    /// Production selection strategy built from configuration.
    pub fn table_selector(&self) -> TableSelector {
        TableSelector::ByClassPosition {
            class_signature: self.table_class_signature.clone(),
            index: self.table_index,
        }
    }
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Extract the raw rows tagged with `marker` from the selected table.
///
/// A row belongs to the requested direction iff one of its cells' text equals
/// the marker exactly - case-sensitive, no trimming. Cell positions are
/// resolved per row: rows wider than `wide_row_threshold` carry extra detail
/// columns and use the wide column map, others the narrow one. A row missing
/// one of its mapped cells is logged and skipped.
pub fn extract_rows(
    document: &Html,
    selector: &TableSelector,
    marker: &str,
    config: &ParanaguaConfig,
) -> Result<Vec<RawRow>, ExtractError> {
    let table = selector.select(document).ok_or(ExtractError::TableNotFound)?;

    let mut rows = Vec::new();
    for (row_idx, row) in table.select(&BODY_ROW_SELECTOR).enumerate() {
        let cells: Vec<String> = row
            .select(&CELL_SELECTOR)
            .map(|cell| cell.text().collect::<String>())
            .collect();

        if !cells.iter().any(|text| text == marker) {
            continue;
        }

        let columns = if cells.len() > config.wide_row_threshold {
            &config.wide_columns
        } else {
            &config.narrow_columns
        };

        match raw_row_at(&cells, columns) {
            Some(raw) => rows.push(raw),
            None => error!(
                "Skipping row {}: {} cells, expected cargo fields at {}/{}/{}",
                row_idx,
                cells.len(),
                columns.commodity,
                columns.eta,
                columns.weight
            ),
        }
    }
    Ok(rows)
}

fn raw_row_at(cells: &[String], columns: &ColumnMap) -> Option<RawRow> {
    Some(RawRow {
        commodity: cells.get(columns.commodity)?.trim().to_string(),
        eta: cells.get(columns.eta)?.trim().to_string(),
        weight: cells.get(columns.weight)?.trim().to_string(),
    })
}

/// Parse the fetched page body into canonical records for one direction.
/// Malformed rows are logged and dropped; the rest of the page still parses.
pub fn parse_records(
    body: &str,
    config: &ParanaguaConfig,
    direction: Direction,
) -> Result<Vec<CanonicalRecord>, ExtractError> {
    let document = Html::parse_document(body);
    let raw_rows = extract_rows(
        &document,
        &config.table_selector(),
        direction.paranagua_marker(),
        config,
    )?;

    let mut records = Vec::with_capacity(raw_rows.len());
    for raw in &raw_rows {
        match normalize::normalize_row(raw, Port::Paranagua, direction) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Dropping malformed Paranagua row ({}): {:?}", e, raw),
        }
    }
    Ok(records)
}

/// Fetch the lineup page and extract the canonical records for one direction.
pub async fn scrape(
    client: &reqwest::Client,
    config: &ParanaguaConfig,
    direction: Direction,
) -> anyhow::Result<Vec<CanonicalRecord>> {
    info!("Scraping Paranagua lineup, direction: {}", direction);
    let body = fetch::fetch_page(client, &config.url).await?;
    let records = parse_records(&body, config, direction)?;
    info!(
        "Paranagua direction {} yielded {} records",
        direction,
        records.len()
    );
    Ok(records)
}
