//! TOML-based sweep scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Top-level sweep scenario parsed from TOML.
///
/// All fields have defaults matching the baseline scenario (a 600 Wp array
/// and two-person household at 0.40 €/kWh). Load from TOML with
/// [`ScenarioConfig::from_toml_file`] or use [`ScenarioConfig::baseline`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Household profile source and scaling.
    #[serde(default)]
    pub profile: ProfileConfig,
    /// Tariff parameters.
    #[serde(default)]
    pub economics: EconomicsConfig,
    /// Battery parameters shared by every swept combination.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Candidate sizing sets spanning the Cartesian product.
    #[serde(default)]
    pub sweep: SweepGridConfig,
}

/// Household profile source and scaling.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    /// Path to the profile CSV (columns `load` and `pv`, in kW).
    pub path: String,
    /// Sampling interval of the profile in hours.
    pub dt_hours: f32,
    /// Multiplier applied to the load column.
    pub load_scale: f32,
    /// Multiplier applied to the pv column.
    pub pv_scale: f32,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        // Reference profile scaled to a 2-person household with 600 Wp PV.
        Self {
            path: "data/household_profile.csv".to_string(),
            dt_hours: 0.25,
            load_scale: 0.5,
            pv_scale: 0.125,
        }
    }
}

/// Tariff parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EconomicsConfig {
    /// Price of imported energy (currency per kWh).
    pub electricity_price: f32,
    /// Credit for exported energy (currency per kWh).
    pub feedin_tariff: f32,
}

impl Default for EconomicsConfig {
    fn default() -> Self {
        Self {
            electricity_price: 0.40,
            feedin_tariff: 0.00,
        }
    }
}

/// Battery parameters shared by every swept combination.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Charging efficiency (0.0–1.0].
    pub eta_charge: f32,
    /// Discharging efficiency (0.0–1.0].
    pub eta_discharge: f32,
    /// Initial state of charge (0.0–1.0).
    pub initial_soc: f32,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            eta_charge: 0.85,
            eta_discharge: 0.80,
            initial_soc: 0.5,
        }
    }
}

/// Candidate sizing sets spanning the Cartesian product.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepGridConfig {
    /// Candidate capacities (kWh, each > 0).
    pub capacities_kwh: Vec<f32>,
    /// Candidate maximum charging powers (kW, each >= 0).
    pub charge_powers_kw: Vec<f32>,
    /// Candidate maximum discharging powers (kW, each >= 0).
    pub discharge_powers_kw: Vec<f32>,
}

impl Default for SweepGridConfig {
    fn default() -> Self {
        Self {
            capacities_kwh: vec![0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0, 2.25, 2.5, 3.0],
            charge_powers_kw: vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0],
            discharge_powers_kw: vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0],
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.eta_charge"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: the full 10×10×10 sizing grid.
    pub fn baseline() -> Self {
        Self {
            profile: ProfileConfig::default(),
            economics: EconomicsConfig::default(),
            battery: BatteryConfig::default(),
            sweep: SweepGridConfig::default(),
        }
    }

    /// Returns the capacity-scan preset: fixed powers, capacities 0.5–4 kWh.
    pub fn capacity_scan() -> Self {
        Self {
            sweep: SweepGridConfig {
                capacities_kwh: vec![0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0],
                charge_powers_kw: vec![0.6],
                discharge_powers_kw: vec![0.3],
            },
            ..Self::baseline()
        }
    }

    /// Returns the power-scan preset: fixed 1.5 kWh capacity, varied powers.
    pub fn power_scan() -> Self {
        Self {
            sweep: SweepGridConfig {
                capacities_kwh: vec![1.5],
                charge_powers_kw: vec![0.4, 0.5, 0.6, 0.7, 0.8],
                discharge_powers_kw: vec![0.1, 0.2, 0.3, 0.4, 0.5],
            },
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "capacity_scan", "power_scan"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "capacity_scan" => Ok(Self::capacity_scan()),
            "power_scan" => Ok(Self::power_scan()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let p = &self.profile;
        if p.dt_hours <= 0.0 {
            errors.push(ConfigError {
                field: "profile.dt_hours".into(),
                message: "must be > 0".into(),
            });
        }
        if p.load_scale <= 0.0 {
            errors.push(ConfigError {
                field: "profile.load_scale".into(),
                message: "must be > 0".into(),
            });
        }
        if p.pv_scale <= 0.0 {
            errors.push(ConfigError {
                field: "profile.pv_scale".into(),
                message: "must be > 0".into(),
            });
        }

        let e = &self.economics;
        if e.electricity_price < 0.0 {
            errors.push(ConfigError {
                field: "economics.electricity_price".into(),
                message: "must be >= 0".into(),
            });
        }
        if e.feedin_tariff < 0.0 {
            errors.push(ConfigError {
                field: "economics.feedin_tariff".into(),
                message: "must be >= 0".into(),
            });
        }

        let b = &self.battery;
        if !(b.eta_charge > 0.0 && b.eta_charge <= 1.0) {
            errors.push(ConfigError {
                field: "battery.eta_charge".into(),
                message: "must be in (0.0, 1.0]".into(),
            });
        }
        if !(b.eta_discharge > 0.0 && b.eta_discharge <= 1.0) {
            errors.push(ConfigError {
                field: "battery.eta_discharge".into(),
                message: "must be in (0.0, 1.0]".into(),
            });
        }
        if !(0.0..=1.0).contains(&b.initial_soc) {
            errors.push(ConfigError {
                field: "battery.initial_soc".into(),
                message: "must be in [0.0, 1.0]".into(),
            });
        }

        let s = &self.sweep;
        if s.capacities_kwh.is_empty() {
            errors.push(ConfigError {
                field: "sweep.capacities_kwh".into(),
                message: "must not be empty".into(),
            });
        }
        if s.charge_powers_kw.is_empty() {
            errors.push(ConfigError {
                field: "sweep.charge_powers_kw".into(),
                message: "must not be empty".into(),
            });
        }
        if s.discharge_powers_kw.is_empty() {
            errors.push(ConfigError {
                field: "sweep.discharge_powers_kw".into(),
                message: "must not be empty".into(),
            });
        }
        if s.capacities_kwh.iter().any(|&c| c <= 0.0) {
            errors.push(ConfigError {
                field: "sweep.capacities_kwh".into(),
                message: "every capacity must be > 0".into(),
            });
        }
        if s.charge_powers_kw.iter().any(|&p| p < 0.0) {
            errors.push(ConfigError {
                field: "sweep.charge_powers_kw".into(),
                message: "every power must be >= 0".into(),
            });
        }
        if s.discharge_powers_kw.iter().any(|&p| p < 0.0) {
            errors.push(ConfigError {
                field: "sweep.discharge_powers_kw".into(),
                message: "every power must be >= 0".into(),
            });
        }

        errors
    }
}
