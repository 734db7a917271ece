//! Scalar classification against zone boundaries
//!
//! Membership is half-open, ordered by absolute distance from the center
//! line: a value exactly on a boundary belongs to the *inner*
//! (closer-to-center) zone, so a value at `plus_1_sigma` is `ZoneCUpper`,
//! not `ZoneBUpper`. A value exactly on the center line classifies to the
//! upper side.

use caliper_core::{Result, SpcError, Zone, ZoneBoundaries};

/// Outcome of classifying one scalar value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub zone: Zone,
    pub is_above_center: bool,
    /// Signed distance from the center line in sigma units
    pub sigma_distance: f64,
}

/// Classify a value into one of the eight zones.
///
/// Total and deterministic for any boundaries with strictly positive
/// sigma; a non-positive sigma is a caller bug and fails.
pub fn classify_value(boundaries: &ZoneBoundaries, value: f64) -> Result<Classification> {
    if boundaries.sigma <= 0.0 {
        return Err(SpcError::NonPositiveSigma {
            sigma: boundaries.sigma,
        });
    }

    let is_above_center = value >= boundaries.center_line;
    let zone = if is_above_center {
        if value <= boundaries.plus_1_sigma {
            Zone::ZoneCUpper
        } else if value <= boundaries.plus_2_sigma {
            Zone::ZoneBUpper
        } else if value <= boundaries.plus_3_sigma {
            Zone::ZoneAUpper
        } else {
            Zone::BeyondUcl
        }
    } else if value >= boundaries.minus_1_sigma {
        Zone::ZoneCLower
    } else if value >= boundaries.minus_2_sigma {
        Zone::ZoneBLower
    } else if value >= boundaries.minus_3_sigma {
        Zone::ZoneALower
    } else {
        Zone::BeyondLcl
    };

    Ok(Classification {
        zone,
        is_above_center,
        sigma_distance: (value - boundaries.center_line) / boundaries.sigma,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::calculate_zones;

    fn zones() -> ZoneBoundaries {
        calculate_zones(100.0, 2.0).unwrap()
    }

    #[test]
    fn test_classification_fixture() {
        // The reference walk used throughout the engine tests
        let cases = [
            (98.0, Zone::ZoneCLower),
            (100.0, Zone::ZoneCUpper),
            (103.0, Zone::ZoneBUpper),
            (105.0, Zone::ZoneAUpper),
            (107.0, Zone::BeyondUcl),
        ];
        for (value, expected) in cases {
            let c = classify_value(&zones(), value).unwrap();
            assert_eq!(c.zone, expected, "value {value}");
        }
    }

    #[test]
    fn test_boundary_ties_go_to_inner_zone() {
        let b = zones();
        assert_eq!(classify_value(&b, b.plus_1_sigma).unwrap().zone, Zone::ZoneCUpper);
        assert_eq!(classify_value(&b, b.plus_2_sigma).unwrap().zone, Zone::ZoneBUpper);
        assert_eq!(classify_value(&b, b.plus_3_sigma).unwrap().zone, Zone::ZoneAUpper);
        assert_eq!(classify_value(&b, b.minus_1_sigma).unwrap().zone, Zone::ZoneCLower);
        assert_eq!(classify_value(&b, b.minus_2_sigma).unwrap().zone, Zone::ZoneBLower);
        assert_eq!(classify_value(&b, b.minus_3_sigma).unwrap().zone, Zone::ZoneALower);
    }

    #[test]
    fn test_center_line_classifies_upper() {
        let c = classify_value(&zones(), 100.0).unwrap();
        assert_eq!(c.zone, Zone::ZoneCUpper);
        assert!(c.is_above_center);
        assert_eq!(c.sigma_distance, 0.0);
    }

    #[test]
    fn test_sigma_distance_is_signed() {
        let b = zones();
        assert!((classify_value(&b, 107.0).unwrap().sigma_distance - 3.5).abs() < 1e-9);
        assert!((classify_value(&b, 95.0).unwrap().sigma_distance + 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_beyond_lower_limit() {
        let c = classify_value(&zones(), 93.0).unwrap();
        assert_eq!(c.zone, Zone::BeyondLcl);
        assert!(!c.is_above_center);
    }

    #[test]
    fn test_non_positive_sigma_is_rejected() {
        let mut b = zones();
        b.sigma = 0.0;
        assert!(matches!(
            classify_value(&b, 100.0),
            Err(SpcError::NonPositiveSigma { .. })
        ));
    }
}
