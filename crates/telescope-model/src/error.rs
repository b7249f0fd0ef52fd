// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use thiserror::Error;

/// An input lies outside the domain of the queueing model.
///
/// Domain errors are reported immediately and never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A rate is zero, negative, `NaN` or infinite.
    #[error("{name} must be a positive finite rate, got {value}")]
    InvalidRate { name: &'static str, value: f64 },
    /// The server count is zero.
    #[error("server count must be at least 1")]
    NoServers,
    /// The system capacity cannot hold all servers.
    #[error("capacity {capacity} is below the server count {servers}")]
    CapacityBelowServers { servers: u32, capacity: u32 },
    /// `λ / μ` overflows or underflows `f64`.
    #[error("offered load {arrival_rate} / {service_rate} is not representable")]
    OfferedLoadOutOfRange { arrival_rate: f64, service_rate: f64 },
    /// A probability or fraction lies outside `[0, 1]`.
    #[error("{name} must lie in [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    /// A time bound is zero, negative, `NaN` or infinite.
    #[error("{name} must be a positive finite number of seconds, got {value}")]
    InvalidDuration { name: &'static str, value: f64 },
    /// A time argument is negative, `NaN` or infinite.
    #[error("{name} must be a non-negative finite number of seconds, got {value}")]
    InvalidTime { name: &'static str, value: f64 },
    /// A per-server capacity multiplier of zero.
    #[error("capacity multiplier must be at least 1")]
    InvalidCapacityMultiplier,
    /// A value the objective depends on was not provided.
    #[error("the workload does not specify the {0}")]
    MissingField(&'static str),
    /// A solve target without any constraint.
    #[error("a solve target needs at least one constraint")]
    NoConstraints,
}

/// Checks that `value` is a positive finite rate.
#[inline]
pub(crate) fn check_rate(name: &'static str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(DomainError::InvalidRate { name, value })
    }
}

/// Checks that `value` lies in `[0, 1]`.
#[inline]
pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<f64, DomainError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(DomainError::ProbabilityOutOfRange { name, value })
    }
}

/// Checks that `value` is a positive finite duration.
#[inline]
pub(crate) fn check_duration(name: &'static str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(DomainError::InvalidDuration { name, value })
    }
}

/// Checks that `value` is a non-negative finite time.
#[inline]
pub fn check_time(name: &'static str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(DomainError::InvalidTime { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_validation() {
        assert_eq!(check_rate("arrival rate", 2.5), Ok(2.5));
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                check_rate("arrival rate", bad),
                Err(DomainError::InvalidRate { name: "arrival rate", .. })
            ));
        }
    }

    #[test]
    fn test_probability_validation() {
        assert_eq!(check_probability("p", 0.0), Ok(0.0));
        assert_eq!(check_probability("p", 1.0), Ok(1.0));
        assert!(check_probability("p", 1.01).is_err());
        assert!(check_probability("p", -0.01).is_err());
        assert!(check_probability("p", f64::NAN).is_err());
    }

    #[test]
    fn test_time_validation() {
        assert_eq!(check_time("t", 0.0), Ok(0.0));
        assert!(check_time("t", -1.0).is_err());
        assert!(check_duration("bound", 0.0).is_err());
        assert_eq!(check_duration("bound", 30.0), Ok(30.0));
    }

    #[test]
    fn test_display_messages() {
        let err = DomainError::CapacityBelowServers {
            servers: 5,
            capacity: 3,
        };
        assert_eq!(err.to_string(), "capacity 3 is below the server count 5");
        assert_eq!(
            DomainError::MissingField("service rate").to_string(),
            "the workload does not specify the service rate"
        );
    }
}
