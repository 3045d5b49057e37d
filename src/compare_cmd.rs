//! Compare command: per-level robust RMS difference of two fields.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use woa_compare::{ComparisonResult, LevelPlan, level_stats};
use woa_io::{Dataset, mask_missing};

use crate::cli::CompareArgs;

/// Run the comparison, printing one line per level to stdout.
pub fn run(args: CompareArgs) -> Result<()> {
    let _cmd = info_span!("compare").entered();

    let ds_a = Dataset::open(&args.file_a)
        .with_context(|| format!("failed to open {}", args.file_a.display()))?;
    let ds_b = Dataset::open(&args.file_b)
        .with_context(|| format!("failed to open {}", args.file_b.display()))?;
    let info_a = ds_a.variable(&args.var_a)?;
    let info_b = ds_b.variable(&args.var_b)?;

    let plan = LevelPlan::new(&info_a.shape, &info_b.shape)
        .with_context(|| format!("cannot compare {} with {}", args.var_a, args.var_b))?;
    info!(
        levels = plan.len(),
        level_shape = ?plan.level_shape(),
        "comparing fields"
    );

    let missing_a = info_a.missing_values();
    let missing_b = info_b.missing_values();
    let mut stdout = std::io::stdout().lock();
    for index in plan.levels() {
        let (start, count) = plan.slab(index);
        let mut a = ds_a.read_slab(&args.var_a, &start, &count)?;
        let mut b = ds_b.read_slab(&args.var_b, &start, &count)?;
        mask_missing(&mut a, &missing_a);
        mask_missing(&mut b, &missing_b);

        let stats = level_stats(&a, &b)?;
        debug!(level = ?index, n_valid = stats.n_valid, "level compared");
        let result = ComparisonResult::new(&args.var_a, &args.var_b, index, stats);
        writeln!(stdout, "{result}")?;
    }

    Ok(())
}
