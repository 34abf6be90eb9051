//! Shared error types returned by the pipeline operations.
//!
//! Geometric stages are total over valid parameters; errors here come from rejected
//! configuration values and from mesh repairs that have no data to work with.

use thiserror::Error;

/// Error conditions surfaced by the operations layer.
#[derive(Debug, Error)]
pub enum Error {
    /// A numeric parameter is negative, `NaN`, or otherwise unusable.
    #[error("invalid {name} {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A configuration document could not be decoded.
    #[error("invalid configuration: {details}")]
    InvalidConfig { details: String },

    /// A `NaN` vertex coordinate has no neighbor with a usable value on the same axis.
    #[error("cannot repair vertex {vertex}: no neighbor has a finite {axis} coordinate")]
    UnrepairableVertex { vertex: usize, axis: char },
}

impl Error {
    pub fn invalid_parameter(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }

    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig {
            details: details.into(),
        }
    }
}

/// Ensures `value` is a finite, non-negative number.
pub(crate) fn check_non_negative(name: &'static str, value: f64) -> Result<(), Error> {
    if !value.is_finite() {
        return Err(Error::invalid_parameter(name, value, "must be finite"));
    }
    if value < 0.0 {
        return Err(Error::invalid_parameter(name, value, "must not be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_non_negative_accepts_zero_and_positive() {
        assert!(check_non_negative("cutoff", 0.0).is_ok());
        assert!(check_non_negative("cutoff", 3.5).is_ok());
    }

    #[test]
    fn check_non_negative_rejects_negative_and_nan() {
        let err = check_non_negative("cutoff", -1.0).unwrap_err();
        assert_eq!(err.to_string(), "invalid cutoff -1: must not be negative");

        assert!(check_non_negative("cutoff", f64::NAN).is_err());
        assert!(check_non_negative("cutoff", f64::INFINITY).is_err());
    }
}
