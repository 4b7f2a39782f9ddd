//! Process-wide simulation context.
//!
//! One `SimulationState` lives for the process lifetime and is passed
//! explicitly to callers; there are no hidden globals. The state is not
//! internally synchronized: a hosting application with concurrent callers
//! must serialize access to `update`/`run` itself.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::domain::bounds::BoundsRegistry;
use crate::domain::types::{SimulationInputs, SimulationRow, SimulationRun};
use crate::error::SimulationError;
use crate::ml::{ClusterModel, PredictiveModel};
use crate::pipeline::{cluster, expand, features, predict, variation};

pub struct SimulationState {
    bounds: BoundsRegistry,
    cluster_model: Box<dyn ClusterModel>,
    predictive_model: Box<dyn PredictiveModel>,
    noise_enabled: bool,
    rng: StdRng,
    cached_inputs: Option<SimulationInputs>,
    table: Vec<SimulationRow>,
    run_counter: u64,
    runs: Vec<SimulationRun>,
}

impl SimulationState {
    pub fn new(
        bounds: BoundsRegistry,
        cluster_model: Box<dyn ClusterModel>,
        predictive_model: Box<dyn PredictiveModel>,
        noise_enabled: bool,
        noise_seed: Option<u64>,
    ) -> Self {
        let rng = match noise_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            bounds,
            cluster_model,
            predictive_model,
            noise_enabled,
            rng,
            cached_inputs: None,
            table: Vec::new(),
            run_counter: 0,
            runs: Vec::new(),
        }
    }

    /// Rebuild the simulation table if the inputs changed; otherwise return
    /// the cached table untouched.
    pub fn update(
        &mut self,
        inputs: SimulationInputs,
    ) -> Result<&[SimulationRow], SimulationError> {
        if self.cached_inputs.as_ref() == Some(&inputs) {
            debug!("inputs unchanged, reusing cached simulation table");
            return Ok(&self.table);
        }

        inputs.validate(&self.bounds)?;
        debug!(
            total_days = inputs.total_days,
            total_hours = inputs.total_hours,
            "inputs changed, rebuilding simulation table"
        );
        self.table = self.build_table(&inputs);
        self.cached_inputs = Some(inputs);
        Ok(&self.table)
    }

    /// Execute the full pipeline over the current table and append the
    /// completed run to the log.
    ///
    /// The run counter increments on every call, including calls that reuse
    /// the cached table, so sequence numbers are never reused.
    pub fn run(&mut self, inputs: SimulationInputs) -> Result<&SimulationRun, SimulationError> {
        let start_date = inputs.start_date;
        self.update(inputs)?;

        let labels = cluster::assign_clusters(self.cluster_model.as_ref(), &self.table)?;
        let model_rows = predict::build_model_rows(&self.table, &labels);
        let usage = predict::predict_usage(self.predictive_model.as_ref(), &model_rows)?;

        self.run_counter += 1;
        let mut rows = self.table.clone();
        for (row, usage_kwh) in rows.iter_mut().zip(usage) {
            row.usage_kwh = Some(usage_kwh);
        }

        let run = SimulationRun::new(self.run_counter, start_date, rows);
        info!(
            sequence = run.sequence_number,
            sheet = %run.sheet_name,
            rows = run.rows.len(),
            "simulation completed"
        );
        self.runs.push(run);
        Ok(self.runs.last().expect("run appended above"))
    }

    /// Ordered log of completed runs, append-only within the process.
    pub fn runs(&self) -> &[SimulationRun] {
        &self.runs
    }

    pub fn run_counter(&self) -> u64 {
        self.run_counter
    }

    pub fn bounds(&self) -> &BoundsRegistry {
        &self.bounds
    }

    fn build_table(&mut self, inputs: &SimulationInputs) -> Vec<SimulationRow> {
        let timestamps =
            expand::expand_timestamps(inputs.start_date, inputs.total_days, inputs.total_hours);
        let total_entries = timestamps.len();
        let (day_of_week, weekstatus) = expand::expand_calendar(&timestamps);
        let nsm = expand::nsm_seconds(&timestamps);

        let mut lagging_rp = expand::broadcast_scalar(inputs.lagging_reactive_power, total_entries);
        let mut leading_rp = expand::broadcast_scalar(inputs.leading_reactive_power, total_entries);
        let mut co2 = expand::broadcast_scalar(inputs.co2, total_entries);
        let mut lagging_pf = expand::broadcast_scalar(inputs.lagging_power_factor, total_entries);
        let load_type = expand::broadcast_scalar(inputs.load_type, total_entries);

        if self.noise_enabled {
            variation::apply_variation(
                &mut lagging_rp,
                self.bounds.lagging_reactive_power(),
                &mut self.rng,
            );
            variation::apply_variation(
                &mut leading_rp,
                self.bounds.leading_reactive_power(),
                &mut self.rng,
            );
            variation::apply_variation(&mut co2, self.bounds.co2(), &mut self.rng);
            variation::apply_variation(
                &mut lagging_pf,
                self.bounds.lagging_power_factor(),
                &mut self.rng,
            );
        }

        // The leading power factor is always derived, never taken from the
        // caller; noise follows the variable's own dispersion.
        let leading_pf_std = if self.noise_enabled {
            self.bounds.leading_power_factor().std
        } else {
            0.0
        };
        let leading_pf = features::derive_leading_power_factor(
            &leading_rp,
            self.bounds.leading_power_factor(),
            leading_pf_std,
            &mut self.rng,
        );

        (0..total_entries)
            .map(|i| SimulationRow {
                timestamp: timestamps[i],
                lagging_reactive_power_kvarh: lagging_rp[i],
                leading_reactive_power_kvarh: leading_rp[i],
                co2_tco2: co2[i],
                lagging_power_factor: lagging_pf[i],
                leading_power_factor: leading_pf[i],
                nsm: nsm[i],
                weekstatus: weekstatus[i],
                day_of_week: day_of_week[i],
                load_type: load_type[i],
                usage_kwh: None,
            })
            .collect()
    }
}
