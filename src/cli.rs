use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "port-lineup")]
#[command(
    about = "Scrapes vessel cargo forecast tables from the Paranagua and Santos port authorities"
)]
#[command(version)]
pub struct Cli {
    /// Create default configuration file at ./config/port-lineup.toml
    #[arg(long)]
    pub init: bool,

    /// Which port lineups to scrape
    #[arg(long, value_enum, default_value = "all")]
    pub port: PortSelection,

    /// Override the configured data output directory
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Verbose logging (use -v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortSelection {
    All,
    Paranagua,
    Santos,
}

impl PortSelection {
    pub fn includes_paranagua(&self) -> bool {
        matches!(self, PortSelection::All | PortSelection::Paranagua)
    }

    pub fn includes_santos(&self) -> bool {
        matches!(self, PortSelection::All | PortSelection::Santos)
    }
}
