//! Shared fixture builders: configuration values and lineup-page HTML shaped
//! like the two port-authority sites.

use chrono::NaiveDate;
use port_lineup::config::{ColumnMap, ParanaguaConfig};
use port_lineup::record::{CanonicalRecord, Direction, Port, ETA_FORMAT};

/// Style-class signature shared by the candidate tables on the Paranagua page.
pub const LINEUP_TABLE_CLASS: &str = "table table-bordered table-striped table-hover";

pub fn paranagua_config() -> ParanaguaConfig {
    ParanaguaConfig {
        url: "https://lineup.test/pesquisa.aspx".to_string(),
        table_class_signature: LINEUP_TABLE_CLASS.to_string(),
        table_index: 4,
        wide_row_threshold: 10,
        wide_columns: ColumnMap {
            commodity: 11,
            eta: 12,
            weight: 15,
        },
        narrow_columns: ColumnMap {
            commodity: 3,
            eta: 4,
            weight: 7,
        },
    }
}

pub fn santos_columns() -> ColumnMap {
    ColumnMap {
        commodity: 8,
        eta: 4,
        weight: 9,
    }
}

pub fn record(
    port: Port,
    direction: Direction,
    commodity: &str,
    eta: &str,
    weight: u64,
    unit: &str,
) -> CanonicalRecord {
    CanonicalRecord {
        port,
        direction,
        commodity: commodity.to_string(),
        eta: NaiveDate::parse_from_str(eta, ETA_FORMAT).expect("fixture eta must be DD/MM/YYYY"),
        weight,
        weight_unit: unit.to_string(),
    }
}

fn tr(cells: &[&str]) -> String {
    let tds: String = cells.iter().map(|cell| format!("<td>{cell}</td>")).collect();
    format!("<tr>{tds}</tr>")
}

/// A narrow Paranagua lineup row (8 cells): marker at cell 2, cargo fields at
/// cells 3 (commodity), 4 (eta) and 7 (weight).
pub fn narrow_row(marker: &str, commodity: &str, eta: &str, weight: &str) -> String {
    tr(&[
        "MV AURORA", "E-1024", marker, commodity, eta, "214", "BRA", weight,
    ])
}

/// A wide Paranagua lineup row (16 cells): the layout with extra berth/agent
/// detail columns. Marker at cell 2, cargo fields at 11/12/15.
pub fn wide_row(marker: &str, commodity: &str, eta: &str, weight: &str) -> String {
    tr(&[
        "MV CORCOVADO",
        "E-2048",
        marker,
        "9301234",
        "229",
        "CHN",
        "Cargill",
        "PRIORIDADE",
        "12,5",
        "11,8",
        "D",
        commodity,
        eta,
        "04/03/2024 18:00",
        "SIM",
        weight,
    ])
}

fn signature_table(header: Option<&str>, rows: &str) -> String {
    let thead = match header {
        Some(text) => format!("<thead><tr><th>{text}</th></tr></thead>"),
        None => String::new(),
    };
    format!("<table class=\"{LINEUP_TABLE_CLASS}\">{thead}<tbody>{rows}</tbody></table>")
}

/// A signature-matching decoy table whose rows carry the same direction
/// markers; extraction from the wrong table is visible through its commodity.
pub fn decoy_table() -> String {
    signature_table(
        Some("Atracados"),
        &narrow_row("Imp", "DECOY CARGO", "01/01/2020", "1 Tons"),
    )
}

/// A Paranagua lineup page: an unsigned table first, `decoys_before`
/// signature-matching decoys, the expected-vessels table (header "Esperados")
/// with the given rows, then one trailing decoy.
pub fn paranagua_page(decoys_before: usize, rows: &str) -> String {
    let mut body = String::from("<table class=\"summary\"><tbody><tr><td>Imp</td></tr></tbody></table>");
    for _ in 0..decoys_before {
        body.push_str(&decoy_table());
    }
    body.push_str(&signature_table(Some("Esperados"), rows));
    body.push_str(&decoy_table());
    format!("<html><body><h1>Line-Up</h1>{body}</body></html>")
}

/// A Santos expected-vessels row (10 cells): eta at cell 4, commodity at
/// cell 8, weight at cell 9.
pub fn santos_row(eta: &str, commodity: &str, weight: &str) -> String {
    tr(&[
        "MSC LORENA",
        "9411367",
        "ALAMOA",
        "T-MAR",
        eta,
        "AGUARDANDO",
        "15/02",
        "DESC",
        commodity,
        weight,
    ])
}

/// A Santos page: plain tables at indices 0-2, the import table at index 3
/// and the export table at index 4.
pub fn santos_page(import_rows: &str, export_rows: &str) -> String {
    let filler: String = (0..3)
        .map(|i| format!("<table><tbody><tr><td>filler {i}</td></tr></tbody></table>"))
        .collect();
    format!(
        "<html><body>{filler}<table><tbody>{import_rows}</tbody></table>\
         <table><tbody>{export_rows}</tbody></table></body></html>"
    )
}
