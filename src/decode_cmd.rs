//! Decode command: convert a fixed-width ASCII grid to NetCDF.

use std::fs::File;
use std::io::{BufReader, Write};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::{info, info_span};

use woa_grid::{Grid, GridLayout, decode_grid_with_progress};
use woa_io::{VariableKind, write_grid};

use crate::cli::DecodeArgs;
use crate::config::WoaConfig;
use crate::convert;

/// Run the ASCII to NetCDF conversion.
pub fn run(args: DecodeArgs, config: &WoaConfig) -> Result<()> {
    let _cmd = info_span!("decode").entered();

    let kind = match args.variable {
        Some(ref v) => v
            .parse::<VariableKind>()
            .with_context(|| format!("invalid --variable {v:?}"))?,
        None => VariableKind::from_file_name(&args.input)
            .context("cannot infer the variable from the file name; pass --variable")?,
    };
    let layout = convert::build_grid_layout(&config.decode)?;
    let export_cfg = convert::build_export_config(&config.export);

    info!(path = %args.input.display(), variable = %kind, "decoding ASCII grid");
    let file = File::open(&args.input)
        .with_context(|| format!("failed to open ASCII grid: {}", args.input.display()))?;

    let bar = if config.decode.progress {
        progress_bar()?
    } else {
        ProgressBar::hidden()
    };
    let grid = decode_grid_with_progress(BufReader::new(file), &layout, |p| {
        bar.set_position(p.percent() as u64);
    })
    .with_context(|| format!("failed to decode {}", args.input.display()));
    bar.finish_and_clear();
    let grid = grid?;
    writeln!(std::io::stdout().lock(), "{}", summary(&grid, &layout))?;
    info!(
        levels = grid.n_levels(),
        n_lat = grid.n_lat(),
        n_lon = grid.n_lon(),
        "grid decoded"
    );

    write_grid(&args.output, &grid, kind, &export_cfg)
        .with_context(|| format!("failed to write NetCDF: {}", args.output.display()))?;
    info!(path = %args.output.display(), "NetCDF written");

    Ok(())
}

/// Final line replacing the bar, which stops short of 100% for shallow files.
fn summary(grid: &Grid, layout: &GridLayout) -> String {
    format!(
        "decoded {} of {} levels ({} x {})",
        grid.n_levels(),
        layout.max_levels(),
        grid.n_lat(),
        grid.n_lon()
    )
}

/// Percentage bar on stdout; logs stay on stderr.
fn progress_bar() -> Result<ProgressBar> {
    let bar = ProgressBar::with_draw_target(Some(100), ProgressDrawTarget::stdout());
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos:>3}%")
            .context("invalid progress bar template")?
            .progress_chars("##-"),
    );
    Ok(bar)
}
