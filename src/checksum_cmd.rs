//! Checksum command: CRC-32 of each variable's values.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::info_span;

use woa_io::variable_checksums;

use crate::cli::ChecksumArgs;

/// Print `crc32 file:variable` for every variable of every file.
pub fn run(args: ChecksumArgs) -> Result<()> {
    let _cmd = info_span!("checksum").entered();
    let mut stdout = std::io::stdout().lock();
    for path in &args.files {
        let sums = variable_checksums(path)
            .with_context(|| format!("failed to checksum {}", path.display()))?;
        for sum in sums {
            writeln!(stdout, "{sum} {}:{}", path.display(), sum.name)?;
        }
    }
    Ok(())
}
