//! Ptemp command: potential temperature from in-situ temperature and salinity.

use anyhow::{Context, Result, bail};
use ndarray::{Array3, Axis};
use tracing::{debug, info, info_span};

use woa_eos::potential_temperature_level;
use woa_grid::Grid;
use woa_io::{VariableKind, read_grid, write_grid};

use crate::cli::PtempArgs;
use crate::config::WoaConfig;
use crate::convert;

/// Run the conversion. Depth in metres is used as pressure in dbar.
pub fn run(args: PtempArgs, config: &WoaConfig) -> Result<()> {
    let _cmd = info_span!("ptemp").entered();

    let temperature = read_grid(&args.temperature, VariableKind::Temperature.metadata().name)
        .with_context(|| format!("failed to read {}", args.temperature.display()))?;
    let salinity = read_grid(&args.salinity, VariableKind::Salinity.metadata().name)
        .with_context(|| format!("failed to read {}", args.salinity.display()))?;
    if temperature.data().dim() != salinity.data().dim() {
        bail!(
            "temperature grid {:?} and salinity grid {:?} differ in shape",
            temperature.data().dim(),
            salinity.data().dim()
        );
    }
    info!(
        levels = temperature.n_levels(),
        reference_pressure = args.reference_pressure,
        "computing potential temperature"
    );

    let mut ptemp = Array3::<f64>::zeros(temperature.data().dim());
    for (k, mut out) in ptemp.axis_iter_mut(Axis(0)).enumerate() {
        let pressure = temperature.depth()[k];
        let t: Vec<f64> = temperature.data().index_axis(Axis(0), k).iter().copied().collect();
        let s: Vec<f64> = salinity.data().index_axis(Axis(0), k).iter().copied().collect();
        let theta = potential_temperature_level(&s, &t, pressure, args.reference_pressure)?;
        debug!(
            level = k,
            pressure,
            ocean_points = woa_stats::count_finite(&theta),
            "level converted"
        );
        out.iter_mut().zip(theta).for_each(|(o, v)| *o = v);
    }

    let grid = Grid::new(
        ptemp,
        temperature.lon().to_vec(),
        temperature.lat().to_vec(),
        temperature.depth().to_vec(),
    )?;
    let export_cfg = convert::build_export_config(&config.export);
    write_grid(&args.output, &grid, VariableKind::PotentialTemperature, &export_cfg)
        .with_context(|| format!("failed to write NetCDF: {}", args.output.display()))?;
    info!(path = %args.output.display(), "potential temperature written");

    Ok(())
}
