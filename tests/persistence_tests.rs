mod common;

use common::fixtures::record;
use port_lineup::persist::{dataset_paths, ensure_directories, write_csv, UnitColumn};
use port_lineup::record::{Direction, Port};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn dataset_paths_embed_port_label_and_timestamp() {
    let (csv_path, db_path) =
        dataset_paths(Path::new("./data"), "paranagua", "Imp", "07082026_153045");

    assert_eq!(
        csv_path,
        Path::new("./data/paranagua/csv/Imp/paranagua_Imp_07082026_153045.csv")
    );
    assert_eq!(
        db_path,
        Path::new("./data/paranagua/db/Imp/paranagua_Imp_07082026_153045.db")
    );
}

#[test]
fn distinct_timestamps_never_collide() {
    let (first, _) = dataset_paths(Path::new("./data"), "santos", "ImpExp", "01012026_000000");
    let (second, _) = dataset_paths(Path::new("./data"), "santos", "ImpExp", "01012026_000001");
    assert_ne!(first, second);
}

#[test]
fn ensure_directories_is_idempotent() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("csv").join("Imp");

    ensure_directories(&[nested.clone()]).unwrap();
    ensure_directories(&[nested.clone()]).unwrap();

    assert!(nested.is_dir());
}

#[test]
fn csv_with_unit_column_writes_the_fixed_field_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("paranagua_Imp.csv");
    let records = vec![
        record(Port::Paranagua, Direction::Import, "Soybeans", "01/03/2024", 1500, "Tons"),
        record(Port::Paranagua, Direction::Import, "Corn", "02/03/2024", 200, "MT"),
    ];

    write_csv(&records, &path, UnitColumn::Included).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines,
        vec![
            "porto,sentido,eta,mercadoria,peso,unidade_Peso",
            "Paranagua,import,01/03/2024,Soybeans,1500,Tons",
            "Paranagua,import,02/03/2024,Corn,200,MT",
        ]
    );
}

#[test]
fn csv_without_unit_column_drops_the_trailing_field() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("santos_Imp.csv");
    let records = vec![record(
        Port::Santos,
        Direction::Import,
        "Sugar",
        "05/03/2024",
        30000,
        "Tons",
    )];

    write_csv(&records, &path, UnitColumn::Omitted).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines,
        vec![
            "porto,sentido,eta,mercadoria,peso",
            "Santos,import,05/03/2024,Sugar,30000",
        ]
    );
}

#[test]
fn csv_quotes_commodities_containing_commas() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("quoted.csv");
    let records = vec![record(
        Port::Paranagua,
        Direction::Export,
        "Soja, a granel",
        "01/03/2024",
        10,
        "Tons",
    )];

    write_csv(&records, &path, UnitColumn::Included).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("\"Soja, a granel\""));
}

#[test]
fn empty_dataset_writes_a_header_only_csv() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.csv");

    write_csv(&[], &path, UnitColumn::Included).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(
        contents.trim_end(),
        "porto,sentido,eta,mercadoria,peso,unidade_Peso"
    );
}
