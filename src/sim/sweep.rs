//! Cartesian sweep over battery sizings, scoring each greedy dispatch run.

use std::fmt;

use crate::series::TimeSeries;

use super::dispatch::simulate;
use super::kpi::{electricity_costs, self_consumption, self_sufficiency};
use super::types::BatterySpec;

/// Row label for the storage-free baseline.
pub const BASELINE_LABEL: &str = "Without Storage";
/// Row label for greedy-dispatch combinations.
pub const GREEDY_LABEL: &str = "Greedy";

/// Scalar sweep parameters plus the three candidate sets.
///
/// The candidate sets span the Cartesian product that is evaluated; they are
/// expected to be non-empty (the config layer validates this). Efficiencies
/// and initial SOC are shared by every combination.
#[derive(Debug, Clone)]
pub struct SweepParams {
    /// Price of imported energy (currency per kWh).
    pub electricity_price: f32,
    /// Credit for exported energy (currency per kWh).
    pub feedin_tariff: f32,
    /// Charging efficiency for every combination, in (0, 1].
    pub eta_charge: f32,
    /// Discharging efficiency for every combination, in (0, 1].
    pub eta_discharge: f32,
    /// Initial state of charge for every combination, in [0, 1].
    pub initial_soc: f32,
    /// Candidate capacities (kWh).
    pub capacities_kwh: Vec<f32>,
    /// Candidate maximum charging powers (kW).
    pub charge_powers_kw: Vec<f32>,
    /// Candidate maximum discharging powers (kW).
    pub discharge_powers_kw: Vec<f32>,
}

/// One line of the results table.
///
/// `ssr` and `scr` are `None` when the metric is undefined for the input
/// profile (zero total load or zero total PV).
#[derive(Debug, Clone)]
pub struct EvaluationRow {
    /// Label: [`BASELINE_LABEL`] or [`GREEDY_LABEL`].
    pub simulation: String,
    /// Total consumed energy over the series (kWh).
    pub total_demand_kwh: f32,
    /// Total generated energy over the series (kWh).
    pub total_generation_kwh: f32,
    /// Battery capacity (kWh, 0 for the baseline row).
    pub capacity_kwh: f32,
    /// Maximum charging power (kW, 0 for the baseline row).
    pub max_charge_kw: f32,
    /// Maximum discharging power (kW, 0 for the baseline row).
    pub max_discharge_kw: f32,
    /// Electricity costs over the series (currency).
    pub costs: f32,
    /// Self-sufficiency ratio, if defined.
    pub ssr: Option<f32>,
    /// Self-consumption ratio, if defined.
    pub scr: Option<f32>,
}

impl fmt::Display for EvaluationRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation: {}", self.simulation)?;
        writeln!(f, "Total demand:          {:.0} kWh", self.total_demand_kwh)?;
        writeln!(f, "Total generation:      {:.0} kWh", self.total_generation_kwh)?;
        writeln!(f, "Capacity:              {:.3} kWh", self.capacity_kwh)?;
        writeln!(f, "Max Power Charging:    {:.3} kW", self.max_charge_kw)?;
        writeln!(f, "Max Power Discharging: {:.3} kW", self.max_discharge_kw)?;
        writeln!(f, "Electricity costs:     {:.2} €", self.costs)?;
        match self.ssr {
            Some(ssr) => writeln!(f, "Self-sufficiency:      {:.2} %", ssr * 100.0)?,
            None => writeln!(f, "Self-sufficiency:      n/a")?,
        }
        match self.scr {
            Some(scr) => write!(f, "Self-consumption:      {:.2} %", scr * 100.0),
            None => write!(f, "Self-consumption:      n/a"),
        }
    }
}

/// A combination that could not be evaluated.
///
/// Recorded instead of aborting the sweep; already-computed rows are kept.
#[derive(Debug, Clone)]
pub struct SweepFailure {
    /// Capacity of the failed combination (kWh).
    pub capacity_kwh: f32,
    /// Maximum charging power of the failed combination (kW).
    pub max_charge_kw: f32,
    /// Maximum discharging power of the failed combination (kW).
    pub max_discharge_kw: f32,
    /// What went wrong.
    pub message: String,
}

impl fmt::Display for SweepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "combination (capacity={} kWh, charge={} kW, discharge={} kW) failed: {}",
            self.capacity_kwh, self.max_charge_kw, self.max_discharge_kw, self.message
        )
    }
}

/// Results table plus per-combination failures, caller-owned.
#[derive(Debug, Clone, Default)]
pub struct SweepOutcome {
    /// Rows in insertion order: baseline first, then the Cartesian product.
    pub rows: Vec<EvaluationRow>,
    /// Combinations that failed validation, in iteration order.
    pub failures: Vec<SweepFailure>,
}

/// Evaluates the storage-free baseline plus every candidate combination.
///
/// The baseline row is computed directly from the unmodified residual series
/// (no dispatch run, capacity and powers reported as 0). Greedy rows follow
/// in a fixed order: capacity outer, charge power middle, discharge power
/// inner. `progress` is invoked with `(done, total)` after each combination;
/// pass `|_, _| {}` to ignore it.
pub fn run_sweep(
    series: &TimeSeries,
    params: &SweepParams,
    mut progress: impl FnMut(usize, usize),
) -> SweepOutcome {
    let dt = series.dt_hours();
    let load: Vec<f32> = series.samples().iter().map(|s| s.load_kw).collect();
    let pv: Vec<f32> = series.samples().iter().map(|s| s.pv_kw).collect();
    let residual: Vec<f32> = series.samples().iter().map(|s| s.residual_kw).collect();

    let total_demand_kwh = series.total_load_kwh();
    let total_generation_kwh = series.total_pv_kwh();

    let mut outcome = SweepOutcome::default();

    let score = |grid: &[f32], label: &str, spec: Option<&BatterySpec>| EvaluationRow {
        simulation: label.to_string(),
        total_demand_kwh,
        total_generation_kwh,
        capacity_kwh: spec.map_or(0.0, |s| s.capacity_kwh),
        max_charge_kw: spec.map_or(0.0, |s| s.max_charge_kw),
        max_discharge_kw: spec.map_or(0.0, |s| s.max_discharge_kw),
        costs: electricity_costs(grid, params.electricity_price, params.feedin_tariff, dt),
        ssr: self_sufficiency(grid, &load).ok(),
        scr: self_consumption(grid, &pv).ok(),
    };

    // Without storage the residual itself is exchanged with the grid.
    outcome.rows.push(score(&residual, BASELINE_LABEL, None));

    let total = params.capacities_kwh.len()
        * params.charge_powers_kw.len()
        * params.discharge_powers_kw.len();
    let mut done = 0;

    for &capacity_kwh in &params.capacities_kwh {
        for &max_charge_kw in &params.charge_powers_kw {
            for &max_discharge_kw in &params.discharge_powers_kw {
                let spec = BatterySpec::new(
                    capacity_kwh,
                    max_charge_kw,
                    max_discharge_kw,
                    params.eta_charge,
                    params.eta_discharge,
                    params.initial_soc,
                );

                match simulate(series, spec) {
                    Ok(records) => {
                        let grid: Vec<f32> = records.iter().map(|r| r.grid_kw).collect();
                        outcome.rows.push(score(&grid, GREEDY_LABEL, Some(&spec)));
                    }
                    Err(e) => outcome.failures.push(SweepFailure {
                        capacity_kwh,
                        max_charge_kw,
                        max_discharge_kw,
                        message: e.to_string(),
                    }),
                }

                done += 1;
                progress(done, total);
            }
        }
    }

    outcome
}
