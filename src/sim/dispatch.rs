//! Greedy battery dispatch: a reactive, no-lookahead fold over the residual.

use crate::series::TimeSeries;

use super::types::{BatterySpec, BatterySpecError, DispatchRecord};

/// Greedy dispatch state machine for one battery configuration.
///
/// Holds the only piece of state carried between timesteps, the state of
/// charge. Each step looks at the current residual alone: surplus charges the
/// battery as hard as the power limit and remaining headroom allow, deficit
/// discharges it the same way, and whatever the battery cannot absorb or
/// cover flows to or from the grid.
#[derive(Debug, Clone)]
pub struct GreedyDispatch {
    spec: BatterySpec,
    dt_hours: f32,
    soc: f32,
}

impl GreedyDispatch {
    /// Creates a dispatcher with the SOC initialized from the spec.
    ///
    /// # Errors
    ///
    /// Returns a [`BatterySpecError`] for any invalid parameter; the state
    /// machine divides by capacity and efficiency, so those are rejected here
    /// rather than discovered as NaN mid-run.
    pub fn new(spec: BatterySpec, dt_hours: f32) -> Result<Self, BatterySpecError> {
        spec.validate()?;
        Ok(Self {
            spec,
            dt_hours,
            soc: spec.initial_soc,
        })
    }

    /// Current state of charge, in [0, 1].
    pub fn soc(&self) -> f32 {
        self.soc
    }

    /// Executes one timestep against the given residual power.
    ///
    /// The delivered battery power is reconstructed from the SOC delta rather
    /// than from the capped request, so a clamp at full or empty keeps the
    /// reported power consistent with the SOC trajectory and the identity
    /// `grid_kw == residual - battery_kw` exact.
    pub fn step(&mut self, timestep: usize, residual_kw: f32) -> DispatchRecord {
        let s = &self.spec;
        let dt = self.dt_hours;

        // A residual of exactly 0 takes the discharge branch (a no-op there).
        let soc_new = if residual_kw < 0.0 {
            let power = (-residual_kw).min(s.max_charge_kw);
            (self.soc + power * dt * s.eta_charge / s.capacity_kwh).min(1.0)
        } else {
            let power = residual_kw.min(s.max_discharge_kw);
            (self.soc - power * dt / (s.capacity_kwh * s.eta_discharge)).max(0.0)
        };

        let battery_kw = if residual_kw < 0.0 {
            -(soc_new - self.soc) * s.capacity_kwh / dt / s.eta_charge
        } else {
            -(soc_new - self.soc) * s.capacity_kwh / dt * s.eta_discharge
        };

        let grid_kw = residual_kw - battery_kw;
        self.soc = soc_new;

        DispatchRecord {
            timestep,
            time_hr: timestep as f32 * dt,
            grid_kw,
            battery_kw,
            soc: soc_new,
        }
    }
}

/// Runs the greedy dispatch over a full series.
///
/// One record per sample, in series order. Deterministic: the same series and
/// spec always produce the same records.
///
/// # Errors
///
/// Returns a [`BatterySpecError`] if the battery parameters are invalid; the
/// series is not touched in that case.
pub fn simulate(
    series: &TimeSeries,
    spec: BatterySpec,
) -> Result<Vec<DispatchRecord>, BatterySpecError> {
    let mut dispatch = GreedyDispatch::new(spec, series.dt_hours())?;
    let records = series
        .samples()
        .iter()
        .enumerate()
        .map(|(t, sample)| dispatch.step(t, sample.residual_kw))
        .collect();
    Ok(records)
}
