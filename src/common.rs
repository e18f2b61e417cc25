//! Common utilities shared across indicator modules

use crate::error::IndicatorError;

/// Degrees per radian.
pub(crate) const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Radians per degree.
pub(crate) const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Allocate a zero-filled output vector of the given length.
///
/// `0.0` is the library's universal "no value yet" sentinel: every indicator
/// leaves its leading lookback positions at zero and only writes from the
/// first valid index onward. Allocation goes through `try_reserve_exact` so
/// an unobtainable buffer surfaces as `AllocationFailure` instead of an
/// abort.
pub(crate) fn zeros(indicator: &'static str, len: usize) -> Result<Vec<f64>, IndicatorError> {
    let mut out = Vec::new();
    out.try_reserve_exact(len)
        .map_err(|_| IndicatorError::AllocationFailure { indicator, len })?;
    out.resize(len, 0.0);
    Ok(out)
}

/// Check that the input covers the indicator's lookback.
pub(crate) fn check_lookback(
    indicator: &'static str,
    len: usize,
    lookback: usize,
) -> Result<(), IndicatorError> {
    if len < lookback {
        return Err(IndicatorError::InvalidInput {
            indicator,
            required: lookback,
            actual: len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let v = zeros("test", 5).unwrap();
        assert_eq!(v.len(), 5);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_zeros_empty() {
        let v = zeros("test", 0).unwrap();
        assert!(v.is_empty());
    }

    #[test]
    fn test_check_lookback() {
        assert!(check_lookback("test", 63, 63).is_ok());
        let err = check_lookback("test", 62, 63).unwrap_err();
        assert_eq!(
            err,
            IndicatorError::InvalidInput {
                indicator: "test",
                required: 63,
                actual: 62,
            }
        );
    }

    #[test]
    fn test_angle_constants() {
        assert!((RAD_TO_DEG * DEG_TO_RAD - 1.0).abs() < 1e-15);
        assert!((180.0_f64.to_radians() - 180.0 * DEG_TO_RAD).abs() < 1e-15);
    }
}
