use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use port_lineup::aggregate;
use port_lineup::cli::Cli;
use port_lineup::config::{AppConfig, ConfigError};
use port_lineup::fetch;
use port_lineup::logging;
use port_lineup::paranagua;
use port_lineup::persist::{self, UnitColumn};
use port_lineup::record::{CanonicalRecord, Direction};
use port_lineup::santos;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // Handle --init first (before any other processing)
    if cli.init {
        match AppConfig::create_default_config() {
            Ok(path) => {
                println!("Created default configuration file at: {}", path.display());
                println!("Edit this file to customize settings, then run port-lineup again.");
                return Ok(());
            }
            Err(e) => {
                eprintln!("Failed to create configuration file: {}", e);
                std::process::exit(1);
            }
        }
    }

    let mut config = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(ConfigError::FileNotFound(path)) => {
            eprintln!("Configuration file not found at: {}", path.display());
            eprintln!("Run with --init to create a default configuration file.");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(dir) = &cli.output_dir {
        config.output.data_dir = dir.clone();
    }

    let data_dir = PathBuf::from(&config.output.data_dir);
    let timestamp = persist::generation_timestamp();
    info!("Starting lineup scrape run (snapshot {})", timestamp);

    // One port failing entirely is logged and tolerated; the run only aborts
    // when no selected port produced data.
    let mut paranagua_combined: Option<Vec<CanonicalRecord>> = None;
    let mut santos_combined: Option<Vec<CanonicalRecord>> = None;

    if cli.port.includes_paranagua() {
        match run_paranagua(&config, &data_dir, &timestamp).await {
            Ok(combined) => paranagua_combined = Some(combined),
            Err(e) => error!("Paranagua run failed: {}", e),
        }
    }

    if cli.port.includes_santos() {
        match run_santos(&config, &data_dir, &timestamp).await {
            Ok(combined) => santos_combined = Some(combined),
            Err(e) => error!("Santos run failed: {}", e),
        }
    }

    if paranagua_combined.is_none() && santos_combined.is_none() {
        anyhow::bail!("no selected port produced any data; aborting run");
    }

    if let (Some(paranagua_data), Some(santos_data)) = (paranagua_combined, santos_combined) {
        let cross_port = aggregate::combine([paranagua_data, santos_data]);
        let csv_path = data_dir
            .join("combined")
            .join("csv")
            .join(format!("combined_paranagua_santos_{timestamp}.csv"));
        let db_path = data_dir
            .join("combined")
            .join("db")
            .join(format!("combined_data_{timestamp}.db"));
        write_artifacts(
            &cross_port,
            &csv_path,
            &db_path,
            "combined_data",
            UnitColumn::Included,
        );
    }

    info!("Lineup scrape run completed");
    Ok(())
}

/// Scrape, persist and combine all three Paranagua directions. Returns the
/// port's combined aggregated dataset for the cross-port merge.
async fn run_paranagua(
    config: &AppConfig,
    data_dir: &Path,
    timestamp: &str,
) -> Result<Vec<CanonicalRecord>> {
    let client = fetch::build_client(&config.http)?;

    let mut datasets: Vec<Vec<CanonicalRecord>> = Vec::new();
    let mut any_succeeded = false;
    for direction in [
        Direction::Import,
        Direction::Export,
        Direction::ImportExport,
    ] {
        let records = match paranagua::scrape(&client, &config.paranagua, direction).await {
            Ok(records) => {
                any_succeeded = true;
                records
            }
            Err(e) => {
                error!("Paranagua {} extraction failed: {}", direction, e);
                Vec::new()
            }
        };

        let aggregated = aggregate::aggregate(records.clone());
        persist_dataset(
            &aggregated,
            data_dir,
            "paranagua",
            direction.label(),
            &format!("paranagua_{}", direction.as_str()),
            UnitColumn::Included,
            timestamp,
        );
        datasets.push(records);
    }

    if !any_succeeded {
        anyhow::bail!("all Paranagua directions failed to fetch");
    }

    let combined = aggregate::combine(datasets);
    persist_dataset(
        &combined,
        data_dir,
        "paranagua",
        "Combined_ImpExp",
        "paranagua_Combined_ImpExp",
        UnitColumn::Included,
        timestamp,
    );
    Ok(combined)
}

/// Scrape, persist and combine the two Santos directions. The blocking
/// browser work runs on the blocking thread pool. Returns the port's combined
/// aggregated dataset for the cross-port merge.
async fn run_santos(
    config: &AppConfig,
    data_dir: &Path,
    timestamp: &str,
) -> Result<Vec<CanonicalRecord>> {
    let mut datasets: Vec<Vec<CanonicalRecord>> = Vec::new();
    let mut any_succeeded = false;
    for direction in [Direction::Import, Direction::Export] {
        let santos_config = config.santos.clone();
        let records =
            match tokio::task::spawn_blocking(move || santos::scrape(&santos_config, direction))
                .await?
            {
                Ok(records) => {
                    any_succeeded = true;
                    records
                }
                Err(e) => {
                    error!("Santos {} extraction failed: {}", direction, e);
                    Vec::new()
                }
            };

        let aggregated = aggregate::aggregate(records.clone());
        persist_dataset(
            &aggregated,
            data_dir,
            "santos",
            direction.label(),
            &format!("santos_{}", direction.as_str()),
            UnitColumn::Omitted,
            timestamp,
        );
        datasets.push(records);
    }

    if !any_succeeded {
        anyhow::bail!("all Santos directions failed to fetch");
    }

    let combined = aggregate::combine(datasets);
    persist_dataset(
        &combined,
        data_dir,
        "santos",
        "ImpExp",
        "santos_ImpExp",
        UnitColumn::Omitted,
        timestamp,
    );
    Ok(combined)
}

/// Persist one dataset under the standard per-port layout. Persist failures
/// are logged; the run continues without confirmation that the artifact
/// exists.
fn persist_dataset(
    records: &[CanonicalRecord],
    data_dir: &Path,
    port_dir: &str,
    label: &str,
    table: &str,
    unit: UnitColumn,
    timestamp: &str,
) {
    let (csv_path, db_path) = persist::dataset_paths(data_dir, port_dir, label, timestamp);
    write_artifacts(records, &csv_path, &db_path, table, unit);
}

fn write_artifacts(
    records: &[CanonicalRecord],
    csv_path: &Path,
    db_path: &Path,
    table: &str,
    unit: UnitColumn,
) {
    let parents: Vec<PathBuf> = [csv_path, db_path]
        .iter()
        .filter_map(|path| path.parent().map(Path::to_path_buf))
        .collect();
    if let Err(e) = persist::ensure_directories(&parents) {
        error!("Failed to create output directories: {}", e);
        return;
    }

    if let Err(e) = persist::write_csv(records, csv_path, unit) {
        error!("Failed to write CSV {}: {}", csv_path.display(), e);
    }
    if let Err(e) = persist::write_db(records, db_path, table, unit, true) {
        error!("Failed to write database {}: {}", db_path.display(), e);
    }
}
