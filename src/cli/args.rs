use clap::Parser;
use std::path::PathBuf;

use whiteout::Tolerance;

#[derive(Parser)]
#[command(
    name = "whiteout",
    version,
    about = "Make near-white PNG backgrounds transparent, in place"
)]
pub struct CliArgs {
    /// Assets root containing the subdirectories to process
    #[arg(short, long, default_value = "public/assets")]
    pub root: PathBuf,

    /// Subdirectory of the root to process (repeatable).
    /// Default: character, monster, weapon, gem
    #[arg(short, long = "subdir", value_name = "NAME")]
    pub subdirs: Vec<String>,

    /// How far below 255 a channel may be and still count as white (0-255).
    /// Default: 30
    #[arg(short, long, value_parser = parse_tolerance)]
    pub tolerance: Option<Tolerance>,

    /// File extension to process, without the dot. Default: png
    #[arg(short, long)]
    pub extension: Option<String>,

    /// Match the extension case-insensitively (png also matches PNG)
    #[arg(long, default_value_t = false)]
    pub ignore_case: bool,

    /// Load processing parameters from a JSON file; flags above override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write a JSON run report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Exit with a non-zero status if any file failed
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}

fn parse_tolerance(s: &str) -> Result<Tolerance, String> {
    s.parse::<Tolerance>()
        .map_err(|_| format!("expected an integer between 0 and 255, got '{s}'"))
}
