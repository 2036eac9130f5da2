mod common;

use common::fixtures;
use port_lineup::normalize::{normalize_row, NormalizeError};
use port_lineup::record::{Direction, Port, RawRow};

fn raw(commodity: &str, eta: &str, weight: &str) -> RawRow {
    RawRow {
        commodity: commodity.to_string(),
        eta: eta.to_string(),
        weight: weight.to_string(),
    }
}

#[test]
fn eta_round_trips_to_the_input_date_text() {
    let record = normalize_row(
        &raw("Soybeans", "05/03/2024", "1,000 Tons"),
        Port::Paranagua,
        Direction::Import,
    )
    .unwrap();
    assert_eq!(record.eta_text(), "05/03/2024");
}

#[test]
fn eta_drops_a_trailing_time_component() {
    let record = normalize_row(
        &raw("Soybeans", "05/03/2024 07:30", "1,000 Tons"),
        Port::Santos,
        Direction::Import,
    )
    .unwrap();
    assert_eq!(record.eta_text(), "05/03/2024");
}

#[test]
fn weight_grouping_separators_are_stripped() {
    let record = normalize_row(
        &raw("Corn", "01/03/2024", "12,345 Tons"),
        Port::Paranagua,
        Direction::Export,
    )
    .unwrap();
    assert_eq!(record.weight, 12_345);
    assert_eq!(record.weight_unit, "Tons");
}

// The separator stripping conflates thousands grouping with decimal points:
// "1.234,00" becomes 123400, not 1234. Current behavior, kept deliberately.
#[test]
fn weight_text_with_decimal_tail_is_stripped_verbatim() {
    let record = normalize_row(
        &raw("Sugar", "01/03/2024", "1.234,00"),
        Port::Santos,
        Direction::Import,
    )
    .unwrap();
    assert_eq!(record.weight, 123_400);
}

#[test]
fn missing_unit_defaults_to_tons() {
    let record = normalize_row(
        &raw("Sugar", "01/03/2024", "2.500,00"),
        Port::Santos,
        Direction::Export,
    )
    .unwrap();
    assert_eq!(record.weight_unit, "Tons");
}

#[test]
fn reported_unit_is_kept_verbatim() {
    let record = normalize_row(
        &raw("Fertilizer", "01/03/2024", "800 MT"),
        Port::Paranagua,
        Direction::Import,
    )
    .unwrap();
    assert_eq!(record.weight_unit, "MT");
}

#[test]
fn commodity_text_is_kept_verbatim() {
    let record = normalize_row(
        &raw("FARELO DE SOJA", "01/03/2024", "100 Tons"),
        Port::Paranagua,
        Direction::Export,
    )
    .unwrap();
    assert_eq!(record.commodity, "FARELO DE SOJA");
}

#[test]
fn non_day_month_year_dates_fail() {
    let result = normalize_row(
        &raw("Soybeans", "2024-03-01", "100 Tons"),
        Port::Paranagua,
        Direction::Import,
    );
    assert_eq!(
        result,
        Err(NormalizeError::BadEta("2024-03-01".to_string()))
    );
}

#[test]
fn empty_eta_cell_fails() {
    let result = normalize_row(
        &raw("Soybeans", "   ", "100 Tons"),
        Port::Paranagua,
        Direction::Import,
    );
    assert_eq!(result, Err(NormalizeError::EmptyEta));
}

#[test]
fn empty_weight_cell_fails() {
    let result = normalize_row(
        &raw("Soybeans", "01/03/2024", ""),
        Port::Paranagua,
        Direction::Import,
    );
    assert_eq!(result, Err(NormalizeError::EmptyWeight));
}

#[test]
fn non_numeric_weight_fails() {
    let result = normalize_row(
        &raw("Soybeans", "01/03/2024", "N/A Tons"),
        Port::Paranagua,
        Direction::Import,
    );
    assert_eq!(result, Err(NormalizeError::BadWeight("N/A".to_string())));
}

#[test]
fn fixture_record_matches_normalized_row() {
    let normalized = normalize_row(
        &raw("Soybeans", "01/03/2024", "1,000 Tons"),
        Port::Paranagua,
        Direction::Import,
    )
    .unwrap();
    let expected = fixtures::record(
        Port::Paranagua,
        Direction::Import,
        "Soybeans",
        "01/03/2024",
        1000,
        "Tons",
    );
    assert_eq!(normalized, expected);
}
