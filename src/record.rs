//! Core data model: ports, directions, raw table rows and canonical records.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Date format used by both port authorities for ETA columns, and by every
/// persisted artifact. Parsing and rendering must round-trip losslessly.
pub const ETA_FORMAT: &str = "%d/%m/%Y";

/// Unit assigned to records from sources that do not report one.
pub const DEFAULT_WEIGHT_UNIT: &str = "Tons";

/// Origin port of a cargo forecast entry. One fixed value per source adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Port {
    Paranagua,
    Santos,
}

impl Port {
    pub fn as_str(&self) -> &'static str {
        match self {
            Port::Paranagua => "Paranagua",
            Port::Santos => "Santos",
        }
    }

    /// Directory name used in the persisted artifact layout.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Port::Paranagua => "paranagua",
            Port::Santos => "santos",
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a cargo forecast entry. `ImportExport` is a combined
/// transshipment category reported directly by Paranagua, not a derived total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Direction {
    Import,
    Export,
    ImportExport,
}

impl Direction {
    /// Value of the `sentido` column in persisted artifacts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Import => "import",
            Direction::Export => "export",
            Direction::ImportExport => "import_export",
        }
    }

    /// Cell text that tags a row with this direction on the Paranagua lineup
    /// table. Matched exactly, case-sensitive.
    pub fn paranagua_marker(&self) -> &'static str {
        match self {
            Direction::Import => "Imp",
            Direction::Export => "Exp",
            Direction::ImportExport => "Imp/Exp",
        }
    }

    /// Short label used in artifact paths and table names.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Import => "Imp",
            Direction::Export => "Exp",
            Direction::ImportExport => "ImpExp",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-text cell values for one table row, positioned by a source adapter.
/// Transient: consumed immediately by the normalizer, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub commodity: String,
    /// ETA cell text; may carry a trailing time component.
    pub eta: String,
    /// Weight cell text; may carry grouping separators and a trailing unit.
    pub weight: String,
}

/// The normalized unit of truth for one cargo forecast line. Immutable once
/// produced; aggregation builds new summed records rather than mutating inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRecord {
    pub port: Port,
    pub direction: Direction,
    /// Verbatim commodity description; used as a grouping key with no synonym
    /// normalization.
    pub commodity: String,
    pub eta: NaiveDate,
    pub weight: u64,
    pub weight_unit: String,
}

impl CanonicalRecord {
    /// `eta` rendered back to the `DD/MM/YYYY` text form used in artifacts.
    pub fn eta_text(&self) -> String {
        self.eta.format(ETA_FORMAT).to_string()
    }
}
