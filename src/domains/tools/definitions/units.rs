//! Shared time-unit conversion table.
//!
//! Used by `calc_time_diff` and `sleep`, which both accept the same unit
//! vocabulary.

/// Conversion factors from each supported unit to seconds.
pub(crate) const UNIT_FACTORS: &[(&str, f64)] = &[
    ("microseconds", 0.000_001),
    ("milliseconds", 0.001),
    ("seconds", 1.0),
    ("minutes", 60.0),
    ("hours", 3600.0),
    ("days", 86_400.0),
    ("weeks", 604_800.0),
];

/// Look up the seconds-per-unit factor for a unit name.
pub(crate) fn unit_factor(unit: &str) -> Option<f64> {
    UNIT_FACTORS
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|(_, factor)| *factor)
}

/// The supported unit names, quoted and comma-separated, for error messages.
pub(crate) fn valid_units() -> String {
    UNIT_FACTORS
        .iter()
        .map(|(name, _)| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(", ")
}
