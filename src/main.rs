//! Battery sizing sweep entry point — CLI wiring and config-driven execution.

use std::path::Path;
use std::process;

use bess_sweep::config::ScenarioConfig;
use bess_sweep::io::export::export_csv;
use bess_sweep::io::profile::load_profile;
use bess_sweep::sim::sweep::{SweepParams, run_sweep};

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    profile_override: Option<String>,
    results_out: Option<String>,
}

fn print_help() {
    eprintln!("bess-sweep — home battery-storage sizing via greedy-dispatch sweeps");
    eprintln!();
    eprintln!("Usage: bess-sweep [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>   Load scenario from TOML config file");
    eprintln!("  --preset <name>     Use a built-in preset (baseline, capacity_scan, power_scan)");
    eprintln!("  --profile <path>    Override the household profile CSV path");
    eprintln!("  --out <path>        Export the results table to CSV");
    eprintln!("  --help              Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        profile_override: None,
        results_out: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --scenario requires a path argument");
                    process::exit(1);
                }
                cli.scenario_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--profile" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --profile requires a path argument");
                    process::exit(1);
                }
                cli.profile_override = Some(args[i].clone());
            }
            "--out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --out requires a path argument");
                    process::exit(1);
                }
                cli.results_out = Some(args[i].clone());
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn main() {
    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then baseline default
    let mut scenario = if let Some(ref path) = cli.scenario_path {
        match ScenarioConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ScenarioConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ScenarioConfig::baseline()
    };

    if let Some(path) = cli.profile_override {
        scenario.profile.path = path;
    }

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Load and rescale the household profile
    let series = match load_profile(Path::new(&scenario.profile.path), scenario.profile.dt_hours) {
        Ok(series) => series.scaled(scenario.profile.load_scale, scenario.profile.pv_scale),
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let params = SweepParams {
        electricity_price: scenario.economics.electricity_price,
        feedin_tariff: scenario.economics.feedin_tariff,
        eta_charge: scenario.battery.eta_charge,
        eta_discharge: scenario.battery.eta_discharge,
        initial_soc: scenario.battery.initial_soc,
        capacities_kwh: scenario.sweep.capacities_kwh.clone(),
        charge_powers_kw: scenario.sweep.charge_powers_kw.clone(),
        discharge_powers_kw: scenario.sweep.discharge_powers_kw.clone(),
    };

    // Run the sweep with progress on stderr
    let outcome = run_sweep(&series, &params, |done, total| {
        eprint!("\rcombination {done}/{total}");
        if done == total {
            eprintln!();
        }
    });

    // Print the results table
    for row in &outcome.rows {
        println!("{row}\n");
    }

    // Report failed combinations without discarding computed rows
    for failure in &outcome.failures {
        eprintln!("warning: {failure}");
    }

    // Export CSV if requested
    if let Some(ref path) = cli.results_out {
        if let Err(e) = export_csv(&outcome.rows, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Results written to {path}");
    }
}
