use rand::Rng;

use super::constants::{DANGER_THRESHOLD, VITAL_MAX, VITAL_MIN, WARNING_THRESHOLD};

/// Color-coded level derived from a vital reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VitalLevel {
    Nominal,
    Warning,
    Danger,
}

impl VitalLevel {
    pub fn of(value: f64) -> Self {
        if value < DANGER_THRESHOLD {
            VitalLevel::Danger
        } else if value < WARNING_THRESHOLD {
            VitalLevel::Warning
        } else {
            VitalLevel::Nominal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VitalLevel::Nominal => "NOMINAL",
            VitalLevel::Warning => "WARNING",
            VitalLevel::Danger => "DANGER",
        }
    }
}

pub fn clamp_vital(value: f64) -> f64 {
    value.clamp(VITAL_MIN, VITAL_MAX)
}

/// Move `value` by `(r * span - offset) * volatility`, r uniform in [0, 1),
/// and clamp the result into the vital range.
pub fn perturb<R: Rng + ?Sized>(
    value: f64,
    span: f64,
    offset: f64,
    volatility: f64,
    rng: &mut R,
) -> f64 {
    let r: f64 = rng.gen();
    clamp_vital(value + (r * span - offset) * volatility)
}

/// Symmetric walk in [-volatility, volatility).
pub fn drift<R: Rng + ?Sized>(value: f64, volatility: f64, rng: &mut R) -> f64 {
    perturb(value, 2.0, 1.0, volatility, rng)
}

/// Rounded percentage as shown on the dashboards.
pub fn percent(value: f64) -> i32 {
    value.round() as i32
}
