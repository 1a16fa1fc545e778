//! Shared test fixtures for integration tests.

use bess_sweep::series::TimeSeries;
use bess_sweep::sim::sweep::SweepParams;
use bess_sweep::sim::types::BatterySpec;

/// One synthetic day at 15-minute resolution.
///
/// Load is a morning/evening double peak over a 0.2 kW base; PV is a clear-sky
/// bell between 06:00 and 18:00 peaking at 0.6 kW. Deterministic, so every
/// test sees the same profile.
pub fn default_series() -> TimeSeries {
    let dt = 0.25_f32;
    let steps = 96;
    let mut load = Vec::with_capacity(steps);
    let mut pv = Vec::with_capacity(steps);
    for t in 0..steps {
        let hour = t as f32 * dt;
        let morning = (-((hour - 7.5) * (hour - 7.5)) / 2.0).exp() * 0.4;
        let evening = (-((hour - 19.0) * (hour - 19.0)) / 4.0).exp() * 0.6;
        load.push(0.2 + morning + evening);

        let daylight = if (6.0..18.0).contains(&hour) {
            let x = (hour - 12.0) / 6.0;
            (1.0 - x * x).max(0.0)
        } else {
            0.0
        };
        pv.push(0.6 * daylight);
    }
    TimeSeries::from_load_pv(&load, &pv, dt).expect("fixture profile should be valid")
}

/// Default battery spec (1 kWh, 0.6/0.3 kW, original efficiencies, 50% SOC).
pub fn default_spec() -> BatterySpec {
    BatterySpec::new(1.0, 0.6, 0.3, 0.85, 0.8, 0.5)
}

/// Small sweep parameters (2 capacities x 2 charge powers x 2 discharge powers).
pub fn default_params() -> SweepParams {
    SweepParams {
        electricity_price: 0.40,
        feedin_tariff: 0.0,
        eta_charge: 0.85,
        eta_discharge: 0.8,
        initial_soc: 0.5,
        capacities_kwh: vec![0.5, 1.0],
        charge_powers_kw: vec![0.4, 0.6],
        discharge_powers_kw: vec![0.2, 0.3],
    }
}
