//! Fixed-interval household load/PV time series.

use std::fmt;

/// One sample of the household profile at a fixed timestep.
///
/// All powers are average powers over the timestep, in kW. The residual is
/// derived once at construction: negative means surplus PV generation,
/// positive means a deficit the grid or a battery must cover.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSample {
    /// Sample time in hours since the start of the series.
    pub time_hr: f32,
    /// Household consumption (kW, >= 0).
    pub load_kw: f32,
    /// PV generation (kW, >= 0).
    pub pv_kw: f32,
    /// Residual power `load - pv` (kW, signed).
    pub residual_kw: f32,
}

/// Construction error for [`TimeSeries`].
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesError {
    /// Load and PV vectors have different lengths.
    LengthMismatch {
        /// Number of load samples.
        load: usize,
        /// Number of PV samples.
        pv: usize,
    },
    /// The series contains no samples.
    Empty,
    /// The sampling interval is zero or negative.
    NonPositiveDt(f32),
}

impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { load, pv } => write!(
                f,
                "series error: load has {load} samples but pv has {pv}, profiles must be aligned"
            ),
            Self::Empty => write!(f, "series error: profile contains no samples"),
            Self::NonPositiveDt(dt) => {
                write!(f, "series error: dt_hours must be > 0, got {dt}")
            }
        }
    }
}

/// An immutable, equally spaced load/PV/residual series.
///
/// Timestamps are derived as `i * dt_hours`, so they are strictly increasing
/// and equally spaced by construction. The series is never mutated after
/// [`TimeSeries::from_load_pv`] returns.
#[derive(Debug, Clone)]
pub struct TimeSeries {
    samples: Vec<TimeSample>,
    dt_hours: f32,
}

impl TimeSeries {
    /// Builds a series from aligned load and PV power vectors.
    ///
    /// # Errors
    ///
    /// Returns a [`SeriesError`] if the vectors differ in length, are empty,
    /// or `dt_hours` is not positive.
    pub fn from_load_pv(load_kw: &[f32], pv_kw: &[f32], dt_hours: f32) -> Result<Self, SeriesError> {
        if load_kw.len() != pv_kw.len() {
            return Err(SeriesError::LengthMismatch {
                load: load_kw.len(),
                pv: pv_kw.len(),
            });
        }
        if load_kw.is_empty() {
            return Err(SeriesError::Empty);
        }
        if dt_hours <= 0.0 {
            return Err(SeriesError::NonPositiveDt(dt_hours));
        }

        let samples = load_kw
            .iter()
            .zip(pv_kw)
            .enumerate()
            .map(|(i, (&load, &pv))| TimeSample {
                time_hr: i as f32 * dt_hours,
                load_kw: load,
                pv_kw: pv,
                residual_kw: load - pv,
            })
            .collect();

        Ok(Self { samples, dt_hours })
    }

    /// Returns a copy with load and PV multiplied by the given scale factors.
    ///
    /// Used to adapt a reference profile to the studied household (e.g. a
    /// 600 Wp array from an 4.8 kWp reference profile). Residuals are
    /// re-derived from the scaled powers.
    pub fn scaled(&self, load_scale: f32, pv_scale: f32) -> Self {
        let samples = self
            .samples
            .iter()
            .map(|s| TimeSample {
                time_hr: s.time_hr,
                load_kw: s.load_kw * load_scale,
                pv_kw: s.pv_kw * pv_scale,
                residual_kw: s.load_kw * load_scale - s.pv_kw * pv_scale,
            })
            .collect();
        Self {
            samples,
            dt_hours: self.dt_hours,
        }
    }

    /// All samples in time order.
    pub fn samples(&self) -> &[TimeSample] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false: construction rejects empty series.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sampling interval in hours.
    pub fn dt_hours(&self) -> f32 {
        self.dt_hours
    }

    /// Total consumed energy over the series (kWh).
    pub fn total_load_kwh(&self) -> f32 {
        self.samples.iter().map(|s| s.load_kw).sum::<f32>() * self.dt_hours
    }

    /// Total generated energy over the series (kWh).
    pub fn total_pv_kwh(&self) -> f32 {
        self.samples.iter().map(|s| s.pv_kw).sum::<f32>() * self.dt_hours
    }
}
