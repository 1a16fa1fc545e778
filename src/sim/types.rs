//! Core simulation types: battery parameters and per-step dispatch records.

use std::fmt;

/// Battery storage parameters for one dispatch run.
///
/// Passed by value into the simulator and never mutated; the state of charge
/// lives in the simulator, not here.
///
/// # Examples
///
/// ```
/// use bess_sweep::sim::types::BatterySpec;
///
/// let spec = BatterySpec::new(1.0, 0.6, 0.3, 0.85, 0.8, 0.5);
/// assert!(spec.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BatterySpec {
    /// Usable energy capacity (kWh, must be > 0).
    pub capacity_kwh: f32,
    /// Maximum charging power (kW, >= 0; 0 disables charging).
    pub max_charge_kw: f32,
    /// Maximum discharging power (kW, >= 0; 0 disables discharging).
    pub max_discharge_kw: f32,
    /// Charging efficiency, in (0, 1].
    pub eta_charge: f32,
    /// Discharging efficiency, in (0, 1].
    pub eta_discharge: f32,
    /// State of charge before the first timestep, in [0, 1].
    pub initial_soc: f32,
}

/// Rejected battery parameter, reported before any simulation step runs.
#[derive(Debug, Clone, PartialEq)]
pub struct BatterySpecError {
    /// Offending field name.
    pub field: &'static str,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for BatterySpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid battery spec: {} — {}", self.field, self.message)
    }
}

impl BatterySpec {
    /// Creates a battery spec. Call [`BatterySpec::validate`] before
    /// simulating; construction itself never fails.
    pub fn new(
        capacity_kwh: f32,
        max_charge_kw: f32,
        max_discharge_kw: f32,
        eta_charge: f32,
        eta_discharge: f32,
        initial_soc: f32,
    ) -> Self {
        Self {
            capacity_kwh,
            max_charge_kw,
            max_discharge_kw,
            eta_charge,
            eta_discharge,
            initial_soc,
        }
    }

    /// Checks all parameter constraints.
    ///
    /// A non-positive capacity or an efficiency outside `(0, 1]` would divide
    /// by zero or drift the SOC out of range mid-run, so these are rejected
    /// here instead of surfacing as NaN later. Zero power limits are valid:
    /// the dispatch degenerates to a grid pass-through.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), BatterySpecError> {
        if !(self.capacity_kwh > 0.0) {
            return Err(BatterySpecError {
                field: "capacity_kwh",
                message: format!("must be > 0, got {}", self.capacity_kwh),
            });
        }
        if !(self.max_charge_kw >= 0.0) {
            return Err(BatterySpecError {
                field: "max_charge_kw",
                message: format!("must be >= 0, got {}", self.max_charge_kw),
            });
        }
        if !(self.max_discharge_kw >= 0.0) {
            return Err(BatterySpecError {
                field: "max_discharge_kw",
                message: format!("must be >= 0, got {}", self.max_discharge_kw),
            });
        }
        if !(self.eta_charge > 0.0 && self.eta_charge <= 1.0) {
            return Err(BatterySpecError {
                field: "eta_charge",
                message: format!("must be in (0, 1], got {}", self.eta_charge),
            });
        }
        if !(self.eta_discharge > 0.0 && self.eta_discharge <= 1.0) {
            return Err(BatterySpecError {
                field: "eta_discharge",
                message: format!("must be in (0, 1], got {}", self.eta_discharge),
            });
        }
        if !(0.0..=1.0).contains(&self.initial_soc) {
            return Err(BatterySpecError {
                field: "initial_soc",
                message: format!("must be in [0, 1], got {}", self.initial_soc),
            });
        }
        Ok(())
    }
}

/// Complete record of one dispatch timestep.
///
/// # Sign Conventions
/// - `grid_kw`: positive = import from grid, negative = export.
/// - `battery_kw`: matches the residual convention — negative = net charging,
///   positive = net discharging.
///
/// For every record, `grid_kw == residual - battery_kw` holds exactly by
/// construction.
#[derive(Debug, Clone, Copy)]
pub struct DispatchRecord {
    /// Timestep index.
    pub timestep: usize,
    /// Simulation time in hours.
    pub time_hr: f32,
    /// Grid exchange power (kW).
    pub grid_kw: f32,
    /// Battery power actually moved (kW).
    pub battery_kw: f32,
    /// State of charge after this step, in [0, 1].
    pub soc: f32,
}

impl fmt::Display for DispatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>4} ({:>6.2}h) | grid={:>6.3} kW  battery={:>6.3} kW  SoC={:5.1}%",
            self.timestep,
            self.time_hr,
            self.grid_kw,
            self.battery_kw,
            self.soc * 100.0,
        )
    }
}
