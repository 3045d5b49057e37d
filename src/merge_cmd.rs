//! Merge command: assemble period files into one series.

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use woa_merge::merge_series;

use crate::cli::MergeArgs;
use crate::config::WoaConfig;
use crate::convert;

/// Run the series merge.
pub fn run(args: MergeArgs, config: &WoaConfig) -> Result<()> {
    let _cmd = info_span!("merge").entered();
    let merge_cfg = convert::build_merge_config(&config.merge);

    info!(
        n_inputs = args.inputs.len(),
        annual = args.annual.is_some(),
        "merging periods"
    );
    let series = merge_series(&args.inputs, args.annual.as_deref(), &args.output, &merge_cfg)
        .with_context(|| format!("failed to merge into {}", args.output.display()))?;

    for splice in series.splices.iter().filter(|s| !s.ranges.annual.is_empty()) {
        debug!(
            record = splice.record + 1,
            variable = %splice.variable,
            from = splice.ranges.annual.start,
            to = splice.ranges.annual.end,
            "levels taken from annual file"
        );
    }
    for (name, depth) in &series.depths {
        info!(variable = %name, levels = depth, "merged variable");
    }
    info!(
        path = %series.path.display(),
        records = series.n_records,
        "series written"
    );

    Ok(())
}
