//! Santos source adapter: extracts cargo forecast rows from the port
//! authority's script-rendered expected-vessels page.
//!
//! Direction is implied entirely by which table index is read (one table per
//! direction); rows are described by fixed column offsets. The browser session
//! is a scoped resource - dropping the [`headless_chrome::Browser`] kills the
//! Chrome process on every exit path, including extraction errors.

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{error, info, warn};

use crate::config::{ColumnMap, SantosConfig};
use crate::normalize;
use crate::record::{CanonicalRecord, Direction, Port, RawRow};

static TABLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("table").unwrap());

static BODY_ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("tbody tr").unwrap());

static CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());

/// Scrape one direction of the Santos lineup. Blocking: drives a headless
/// Chrome session; call from `spawn_blocking` in async contexts.
pub fn scrape(config: &SantosConfig, direction: Direction) -> Result<Vec<CanonicalRecord>> {
    let table_index = match direction {
        Direction::Import => config.import_table_index,
        Direction::Export => config.export_table_index,
        Direction::ImportExport => {
            return Err(anyhow!(
                "Santos does not publish a combined import/export table"
            ))
        }
    };

    info!(
        "Scraping Santos lineup, direction: {} (table index {})",
        direction, table_index
    );
    let html = fetch_rendered_page(config, table_index)?;
    let raw_rows = extract_rows(&html, table_index, &config.columns);

    let mut records = Vec::with_capacity(raw_rows.len());
    for raw in &raw_rows {
        match normalize::normalize_row(raw, Port::Santos, direction) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Dropping malformed Santos row ({}): {:?}", e, raw),
        }
    }
    info!(
        "Santos direction {} yielded {} records",
        direction,
        records.len()
    );
    Ok(records)
}

/// Navigate to the lineup page and return its content once the target table's
/// body rows have been rendered. The wait is an explicit element-readiness
/// check bounded by `row_wait_timeout_secs`, not a fixed sleep.
fn fetch_rendered_page(config: &SantosConfig, table_index: usize) -> Result<String> {
    let browser = crate::create_browser(config.chrome_path.as_deref())?;

    let tab = browser
        .new_tab()
        .map_err(|e| anyhow!("Failed to create browser tab: {}", e))?;

    tab.navigate_to(&config.url)
        .map_err(|e| anyhow!("Failed to navigate to {}: {}", config.url, e))?;

    tab.wait_until_navigated()
        .map_err(|e| anyhow!("Page failed to load for {}: {}", config.url, e))?;

    // CSS :nth-of-type is 1-based and counts within one parent; the lineup
    // tables share a container, so it lines up with document order here.
    let readiness_selector = format!("table:nth-of-type({}) tbody tr", table_index + 1);
    tab.wait_for_element_with_custom_timeout(
        &readiness_selector,
        Duration::from_secs(config.row_wait_timeout_secs),
    )
    .map_err(|e| {
        anyhow!(
            "Timed out waiting for lineup rows ({}) at {}: {}",
            readiness_selector,
            config.url,
            e
        )
    })?;

    tab.get_content()
        .map_err(|e| anyhow!("Failed to read rendered page content: {}", e))
}

/// Extract the body rows of the `table_index`-th table (0-based over all
/// tables on the page) at the fixed column offsets. Rows missing a mapped
/// cell are logged and skipped.
pub fn extract_rows(html: &str, table_index: usize, columns: &ColumnMap) -> Vec<RawRow> {
    let document = Html::parse_document(html);
    let Some(table) = document.select(&TABLE_SELECTOR).nth(table_index) else {
        error!("Santos page has no table at index {}", table_index);
        return Vec::new();
    };

    let mut rows = Vec::new();
    for (row_idx, row) in table.select(&BODY_ROW_SELECTOR).enumerate() {
        let cells: Vec<String> = row
            .select(&CELL_SELECTOR)
            .map(|cell| cell.text().collect::<String>().trim().to_string())
            .collect();

        let mapped = (
            cells.get(columns.commodity),
            cells.get(columns.eta),
            cells.get(columns.weight),
        );
        match mapped {
            (Some(commodity), Some(eta), Some(weight)) => rows.push(RawRow {
                commodity: commodity.clone(),
                eta: eta.clone(),
                weight: weight.clone(),
            }),
            _ => error!(
                "Skipping Santos row {}: {} cells, expected cargo fields at {}/{}/{}",
                row_idx,
                cells.len(),
                columns.commodity,
                columns.eta,
                columns.weight
            ),
        }
    }
    rows
}
