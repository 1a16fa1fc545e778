//! End-to-end tests: profile → sweep → results table → CSV.

mod common;

use bess_sweep::config::ScenarioConfig;
use bess_sweep::io::export::write_csv;
use bess_sweep::io::profile::read_profile;
use bess_sweep::sim::sweep::{BASELINE_LABEL, GREEDY_LABEL, SweepParams, run_sweep};

#[test]
fn sweep_produces_product_plus_baseline() {
    let series = common::default_series();
    let params = common::default_params();
    let outcome = run_sweep(&series, &params, |_, _| {});
    assert_eq!(outcome.rows.len(), 2 * 2 * 2 + 1);
    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.rows[0].simulation, BASELINE_LABEL);
    for row in &outcome.rows[1..] {
        assert_eq!(row.simulation, GREEDY_LABEL);
    }
}

#[test]
fn sweep_rows_follow_documented_order() {
    let series = common::default_series();
    let params = common::default_params();
    let outcome = run_sweep(&series, &params, |_, _| {});

    let mut expected = Vec::new();
    for &c in &params.capacities_kwh {
        for &ch in &params.charge_powers_kw {
            for &dis in &params.discharge_powers_kw {
                expected.push((c, ch, dis));
            }
        }
    }
    let actual: Vec<(f32, f32, f32)> = outcome.rows[1..]
        .iter()
        .map(|r| (r.capacity_kwh, r.max_charge_kw, r.max_discharge_kw))
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn sweep_is_deterministic() {
    let series = common::default_series();
    let params = common::default_params();
    let a = run_sweep(&series, &params, |_, _| {});
    let b = run_sweep(&series, &params, |_, _| {});
    for (ra, rb) in a.rows.iter().zip(&b.rows) {
        assert_eq!(ra.costs, rb.costs);
        assert_eq!(ra.ssr, rb.ssr);
        assert_eq!(ra.scr, rb.scr);
    }
}

#[test]
fn all_metrics_defined_for_mixed_profile() {
    let series = common::default_series();
    let outcome = run_sweep(&series, &common::default_params(), |_, _| {});
    for row in &outcome.rows {
        assert!(row.ssr.is_some(), "profile has load, ssr must be defined");
        assert!(row.scr.is_some(), "profile has pv, scr must be defined");
        let ssr = row.ssr.unwrap_or_default();
        let scr = row.scr.unwrap_or_default();
        assert!((0.0..=1.0).contains(&ssr), "ssr {ssr} out of range");
        assert!((0.0..=1.0).contains(&scr), "scr {scr} out of range");
        assert!(row.costs.is_finite());
    }
}

#[test]
fn storage_rows_beat_baseline_on_cost() {
    // With a zero feed-in tariff any surplus shifted to the evening saves
    // money, so every sized battery must cost at most the baseline.
    let series = common::default_series();
    let outcome = run_sweep(&series, &common::default_params(), |_, _| {});
    let baseline_cost = outcome.rows[0].costs;
    for row in &outcome.rows[1..] {
        assert!(
            row.costs <= baseline_cost + 1e-4,
            "capacity {} should not cost more than baseline",
            row.capacity_kwh
        );
    }
}

#[test]
fn csv_profile_to_results_csv_end_to_end() {
    let profile_csv = "time,load,pv\n\
        00:00,2.0,0.0\n\
        00:15,2.0,4.0\n\
        00:30,2.0,4.0\n\
        00:45,2.0,0.0\n";
    let series = read_profile(profile_csv.as_bytes(), 0.25).expect("profile should parse");

    let params = SweepParams {
        electricity_price: 0.40,
        feedin_tariff: 0.10,
        eta_charge: 1.0,
        eta_discharge: 1.0,
        initial_soc: 0.0,
        capacities_kwh: vec![1.0],
        charge_powers_kw: vec![2.0],
        discharge_powers_kw: vec![2.0],
    };
    let outcome = run_sweep(&series, &params, |_, _| {});
    assert_eq!(outcome.rows.len(), 2);

    let mut buf = Vec::new();
    write_csv(&outcome.rows, &mut buf).expect("export should succeed");
    let text = String::from_utf8(buf).expect("csv is UTF-8");
    let mut lines = text.lines();
    assert!(lines.next().unwrap_or("").starts_with("simulation,"));
    assert_eq!(lines.count(), 2);
}

#[test]
fn preset_grids_run_against_fixture_profile() {
    let series = common::default_series();
    for name in ScenarioConfig::PRESETS {
        let cfg = ScenarioConfig::from_preset(name).expect("preset should load");
        let params = SweepParams {
            electricity_price: cfg.economics.electricity_price,
            feedin_tariff: cfg.economics.feedin_tariff,
            eta_charge: cfg.battery.eta_charge,
            eta_discharge: cfg.battery.eta_discharge,
            initial_soc: cfg.battery.initial_soc,
            capacities_kwh: cfg.sweep.capacities_kwh.clone(),
            charge_powers_kw: cfg.sweep.charge_powers_kw.clone(),
            discharge_powers_kw: cfg.sweep.discharge_powers_kw.clone(),
        };
        let expected = params.capacities_kwh.len()
            * params.charge_powers_kw.len()
            * params.discharge_powers_kw.len();
        let outcome = run_sweep(&series, &params, |_, _| {});
        assert_eq!(
            outcome.rows.len(),
            expected + 1,
            "preset \"{name}\" should evaluate its full grid"
        );
        assert!(outcome.failures.is_empty());
    }
}
