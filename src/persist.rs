//! Persistence of aggregated datasets as timestamped CSV files and SQLite
//! tables. Every artifact path embeds a generation timestamp and a dataset
//! label, so repeated runs never collide with prior snapshots.

use chrono::Utc;
use chrono_tz::America::Sao_Paulo;
use csv::Writer;
use rusqlite::{params, Connection};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::record::CanonicalRecord;

/// Timestamp format embedded in artifact names, e.g. `07082026_153045`.
pub const TIMESTAMP_FORMAT: &str = "%d%m%Y_%H%M%S";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),
}

/// Whether an artifact carries the `unidade_Peso` column. Santos never
/// reports a unit, so its per-port artifacts omit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitColumn {
    Included,
    Omitted,
}

/// Generation timestamp for artifact names, pinned to the ports' local zone.
pub fn generation_timestamp() -> String {
    Utc::now()
        .with_timezone(&Sao_Paulo)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Idempotent creation of the given directories.
pub fn ensure_directories(paths: &[PathBuf]) -> Result<(), PersistError> {
    for path in paths {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// CSV and SQLite paths for one per-port dataset:
/// `<data_dir>/<port>/{csv,db}/<label>/<port>_<label>_<timestamp>.{csv,db}`
pub fn dataset_paths(
    data_dir: &Path,
    port_dir: &str,
    label: &str,
    timestamp: &str,
) -> (PathBuf, PathBuf) {
    let csv_path = data_dir
        .join(port_dir)
        .join("csv")
        .join(label)
        .join(format!("{port_dir}_{label}_{timestamp}.csv"));
    let db_path = data_dir
        .join(port_dir)
        .join("db")
        .join(label)
        .join(format!("{port_dir}_{label}_{timestamp}.db"));
    (csv_path, db_path)
}

/// Write aggregated records as CSV, one row per record, `eta` in DD/MM/YYYY.
/// Field order is fixed: porto, sentido, eta, mercadoria, peso[, unidade_Peso].
pub fn write_csv(
    records: &[CanonicalRecord],
    path: &Path,
    unit: UnitColumn,
) -> Result<(), PersistError> {
    debug!("Writing {} records to CSV: {}", records.len(), path.display());

    let file = File::create(path)?;
    let mut wtr = Writer::from_writer(file);

    match unit {
        UnitColumn::Included => {
            wtr.write_record(["porto", "sentido", "eta", "mercadoria", "peso", "unidade_Peso"])?
        }
        UnitColumn::Omitted => {
            wtr.write_record(["porto", "sentido", "eta", "mercadoria", "peso"])?
        }
    }

    for record in records {
        let eta = record.eta_text();
        let peso = record.weight.to_string();
        match unit {
            UnitColumn::Included => wtr.write_record([
                record.port.as_str(),
                record.direction.as_str(),
                eta.as_str(),
                record.commodity.as_str(),
                peso.as_str(),
                record.weight_unit.as_str(),
            ])?,
            UnitColumn::Omitted => wtr.write_record([
                record.port.as_str(),
                record.direction.as_str(),
                eta.as_str(),
                record.commodity.as_str(),
                peso.as_str(),
            ])?,
        }
    }

    wtr.flush()?;
    info!(
        "Successfully wrote {} records to CSV: {}",
        records.len(),
        path.display()
    );
    Ok(())
}

/// Write aggregated records to a SQLite table mirroring the CSV schema plus an
/// `updated_On` timestamp column. The table is created if absent; `replace`
/// drops any existing table of the same name first.
pub fn write_db(
    records: &[CanonicalRecord],
    db_path: &Path,
    table: &str,
    unit: UnitColumn,
    replace: bool,
) -> Result<(), PersistError> {
    debug!(
        "Writing {} records to table {} in {}",
        records.len(),
        table,
        db_path.display()
    );

    let mut conn = Connection::open(db_path)?;
    if replace {
        conn.execute_batch(&format!("DROP TABLE IF EXISTS {table}"))?;
    }

    let unit_column = match unit {
        UnitColumn::Included => "unidade_Peso TEXT, ",
        UnitColumn::Omitted => "",
    };
    conn.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                porto TEXT,
                sentido TEXT,
                eta DATE,
                mercadoria TEXT,
                peso INTEGER,
                {unit_column}updated_On TIMESTAMP
            )"
        ),
        [],
    )?;

    let updated_on = Utc::now()
        .with_timezone(&Sao_Paulo)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();

    let tx = conn.transaction()?;
    {
        let insert_sql = match unit {
            UnitColumn::Included => format!(
                "INSERT INTO {table} (porto, sentido, eta, mercadoria, peso, unidade_Peso, updated_On)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
            ),
            UnitColumn::Omitted => format!(
                "INSERT INTO {table} (porto, sentido, eta, mercadoria, peso, updated_On)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
            ),
        };
        let mut stmt = tx.prepare(&insert_sql)?;
        for record in records {
            match unit {
                UnitColumn::Included => stmt.execute(params![
                    record.port.as_str(),
                    record.direction.as_str(),
                    record.eta_text(),
                    record.commodity,
                    record.weight,
                    record.weight_unit,
                    updated_on,
                ])?,
                UnitColumn::Omitted => stmt.execute(params![
                    record.port.as_str(),
                    record.direction.as_str(),
                    record.eta_text(),
                    record.commodity,
                    record.weight,
                    updated_on,
                ])?,
            };
        }
    }
    tx.commit()?;

    info!(
        "Successfully wrote {} records to table {} in {}",
        records.len(),
        table,
        db_path.display()
    );
    Ok(())
}
