use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// World Ocean Atlas grid toolkit.
#[derive(Parser)]
#[command(
    name = "woa",
    version,
    about = "Convert, merge and compare World Ocean Atlas climatology grids"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to an optional TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Convert a fixed-width ASCII grid to NetCDF.
    Decode(DecodeArgs),
    /// Merge period files into one record-dimensioned series.
    Merge(MergeArgs),
    /// Compare two fields level by level.
    Compare(CompareArgs),
    /// Compute potential temperature from temperature and salinity grids.
    Ptemp(PtempArgs),
    /// Print a CRC-32 checksum of every variable.
    ///
    /// Values are widened to f64 and hashed as little-endian bytes. The
    /// digest is CRC-32, not MD5: it will not match MD5 hex digests of the
    /// raw variable bytes, and it does not change with storage type or host
    /// byte order.
    Checksum(ChecksumArgs),
}

/// Arguments for the `decode` subcommand.
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// ASCII grid to read.
    pub input: PathBuf,

    /// NetCDF file to write.
    pub output: PathBuf,

    /// Variable code (t, s, o, O, A, i, p, n) or name; inferred from the
    /// first character of the input file name when omitted.
    #[arg(long)]
    pub variable: Option<String>,
}

/// Arguments for the `merge` subcommand.
#[derive(clap::Args)]
pub struct MergeArgs {
    /// Period files in record order.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Merged output file.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Annual file supplying levels deeper than the periods.
    #[arg(long)]
    pub annual: Option<PathBuf>,
}

/// Arguments for the `compare` subcommand.
#[derive(clap::Args)]
pub struct CompareArgs {
    /// First file.
    pub file_a: PathBuf,
    /// Variable in the first file.
    pub var_a: String,
    /// Second file.
    pub file_b: PathBuf,
    /// Variable in the second file.
    pub var_b: String,
}

/// Arguments for the `ptemp` subcommand.
#[derive(clap::Args)]
pub struct PtempArgs {
    /// In-situ temperature grid.
    pub temperature: PathBuf,

    /// Salinity grid on the same levels.
    pub salinity: PathBuf,

    /// Potential temperature grid to write.
    pub output: PathBuf,

    /// Reference pressure in dbar.
    #[arg(long, default_value_t = 0.0)]
    pub reference_pressure: f64,
}

/// Arguments for the `checksum` subcommand.
#[derive(clap::Args)]
pub struct ChecksumArgs {
    /// Files to checksum.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}
