//! Command-line arguments

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use ghostlink_core::input::Strictness;
use ghostlink_protocol::CatalogVersion;

#[derive(Debug, Parser)]
#[command(
    name = "ghostlink",
    version,
    about = "Menu-driven remote control for GhostESP firmware over a serial port"
)]
pub struct Cli {
    /// Serial device, e.g. /dev/ttyUSB0
    #[arg(short, long)]
    pub port: Option<String>,

    /// Baud rate [default: 115200]
    #[arg(short, long)]
    pub baud: Option<u32>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Firmware command dialect
    #[arg(long, value_enum)]
    pub catalog: Option<CatalogArg>,

    /// Reject empty prompted values
    #[arg(long, conflicts_with = "lenient")]
    pub strict: bool,

    /// Accept empty prompted values and send the bare command
    #[arg(long)]
    pub lenient: bool,

    /// Raw writes, 1 s reads and give up when the firmware goes quiet
    #[arg(long)]
    pub legacy_timing: bool,

    /// Directory holding payload scripts
    #[arg(long)]
    pub payload_root: Option<PathBuf>,

    /// Send one command, print the response and exit
    #[arg(short, long, value_name = "COMMAND")]
    pub send: Option<String>,

    /// How long to listen after --send (ms)
    #[arg(long, default_value_t = 5000)]
    pub listen_ms: u64,

    /// Print the action keys usable in [catalog.overrides] and exit
    #[arg(long)]
    pub list_actions: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Strictness chosen on the command line, if any
    pub fn strictness(&self) -> Option<Strictness> {
        match (self.strict, self.lenient) {
            (true, _) => Some(Strictness::Strict),
            (_, true) => Some(Strictness::Lenient),
            _ => None,
        }
    }

    /// Default log filter for the verbosity level
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CatalogArg {
    /// `attack beacon -l` style
    Legacy,
    /// `attack -t beacon -l` style
    Flagged,
    /// `beaconspam -l` style
    Bundled,
}

impl From<CatalogArg> for CatalogVersion {
    fn from(arg: CatalogArg) -> Self {
        match arg {
            CatalogArg::Legacy => CatalogVersion::Legacy,
            CatalogArg::Flagged => CatalogVersion::Flagged,
            CatalogArg::Bundled => CatalogVersion::Bundled,
        }
    }
}
