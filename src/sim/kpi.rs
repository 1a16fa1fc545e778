//! Scoring metrics for a grid-exchange series: cost, SCR, and SSR.
//!
//! All three are independent pure reductions. Callers must pass series that
//! cover the same aligned timestamps; the functions themselves only see the
//! values.

use std::fmt;

/// A metric whose denominator is zero for the given series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricError {
    /// Total PV generation is zero: self-consumption is undefined.
    ZeroPvGeneration,
    /// Total load is zero: self-sufficiency is undefined.
    ZeroLoad,
}

impl fmt::Display for MetricError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPvGeneration => {
                write!(f, "self-consumption undefined: total PV generation is zero")
            }
            Self::ZeroLoad => write!(f, "self-sufficiency undefined: total load is zero"),
        }
    }
}

/// Electricity cost of a grid-exchange series.
///
/// Imported energy (`grid > 0`) is billed at `price_per_kwh`, exported energy
/// (`grid < 0`) is credited at `feedin_tariff_per_kwh`. Samples exactly at
/// zero contribute to neither sum. `dt_hours` converts average power to
/// energy.
pub fn electricity_costs(
    grid_kw: &[f32],
    price_per_kwh: f32,
    feedin_tariff_per_kwh: f32,
    dt_hours: f32,
) -> f32 {
    let bought: f32 = grid_kw.iter().filter(|&&g| g > 0.0).sum();
    let sold: f32 = grid_kw.iter().filter(|&&g| g < 0.0).map(|g| -g).sum();
    bought * dt_hours * price_per_kwh - sold * dt_hours * feedin_tariff_per_kwh
}

/// Fraction of generated PV energy consumed on-site rather than exported.
///
/// # Errors
///
/// Returns [`MetricError::ZeroPvGeneration`] when the PV series sums to zero.
pub fn self_consumption(grid_kw: &[f32], pv_kw: &[f32]) -> Result<f32, MetricError> {
    let pv_total: f32 = pv_kw.iter().sum();
    if pv_total == 0.0 {
        return Err(MetricError::ZeroPvGeneration);
    }
    let feedin: f32 = grid_kw.iter().filter(|&&g| g < 0.0).map(|g| -g).sum();
    Ok(1.0 - feedin / pv_total)
}

/// Fraction of load covered without importing from the grid.
///
/// # Errors
///
/// Returns [`MetricError::ZeroLoad`] when the load series sums to zero.
pub fn self_sufficiency(grid_kw: &[f32], load_kw: &[f32]) -> Result<f32, MetricError> {
    let load_total: f32 = load_kw.iter().sum();
    if load_total == 0.0 {
        return Err(MetricError::ZeroLoad);
    }
    let bought: f32 = grid_kw.iter().filter(|&&g| g > 0.0).sum();
    Ok(1.0 - bought / load_total)
}
