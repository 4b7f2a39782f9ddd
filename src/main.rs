use anyhow::Result;
use chrono::{Timelike, Utc};
use plant_energy_twin::config::Config;
use plant_energy_twin::domain::ReferenceDataset;
use plant_energy_twin::ml::models::{LinearUsageModel, NearestCentroidClusters};
use plant_energy_twin::pipeline::SimulationState;
use plant_energy_twin::telemetry::init_tracing;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use tracing::info;

fn main() -> Result<()> {
    init_tracing();

    let cfg = Config::load()?;

    let file = File::open(&cfg.data.reference_csv)?;
    let reference = ReferenceDataset::load(file)?;
    let bounds = reference.bounds()?;

    let mut rng = match cfg.noise.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // Baseline models stand in for the trained artifacts; deployments
    // inject their own implementations.
    let mut state = SimulationState::new(
        bounds,
        Box::new(NearestCentroidClusters::baseline()),
        Box::new(LinearUsageModel::baseline()),
        cfg.noise.enabled,
        cfg.noise.seed,
    );

    let start_date = Utc::now()
        .naive_utc()
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .expect("truncating to the hour cannot fail");
    let inputs = reference.sample_inputs(
        &mut rng,
        start_date,
        cfg.simulation.total_days,
        cfg.simulation.total_hours,
    )?;

    info!(
        %start_date,
        total_days = cfg.simulation.total_days,
        total_hours = cfg.simulation.total_hours,
        load_type = %inputs.load_type,
        "starting plant simulation"
    );

    let run = state.run(inputs)?;

    let total_kwh: f64 = run.rows.iter().filter_map(|row| row.usage_kwh).sum();
    info!(
        sheet = %run.sheet_name,
        rows = run.rows.len(),
        total_kwh,
        "simulation finished"
    );

    Ok(())
}
