//! Subgroup-mode resolver
//!
//! Per-characteristic policy deciding, for each new subgroup, which center
//! line / sigma / limits apply given the subgroup's actual size. This is
//! stateless: it consumes read-only configuration and returns what the
//! window's append/classify path should use.

use caliper_core::{CharacteristicConfig, Result, SpcError, Subgroup, SubgroupMode, ZoneBoundaries};
use caliper_stats::calculate_zones;

/// What the window should classify and against which boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Value to classify: raw subgroup mean, or z-score in standardized mode
    pub value_to_classify: f64,
    /// Effective boundaries; `None` means "use the window's current
    /// boundaries" (nominal tolerance)
    pub boundaries: Option<ZoneBoundaries>,
    /// Subgroup smaller than the configured minimum; still classified
    pub is_undersized: bool,
    /// Subgroup below the configured warning threshold; does not alter
    /// classification
    pub size_warning: bool,
}

/// Stateless mode policy. All state lives on the characteristic
/// configuration published by external layers.
pub struct SubgroupModeResolver;

impl SubgroupModeResolver {
    pub fn resolve(config: &CharacteristicConfig, subgroup: &Subgroup) -> Result<Resolution> {
        if subgroup.actual_n == 0 {
            return Err(SpcError::InsufficientData { needed: 1, got: 0 });
        }

        let is_undersized = subgroup.actual_n < config.min_measurements;
        let size_warning = config
            .warn_below_count
            .is_some_and(|warn| subgroup.actual_n < warn);

        match config.mode {
            SubgroupMode::NominalTolerance => Ok(Resolution {
                value_to_classify: subgroup.mean,
                boundaries: None,
                is_undersized,
                size_warning,
            }),
            SubgroupMode::Standardized => {
                let (center_line, sigma) = Self::stored_baseline(config)?;
                let sigma_n = sigma / (subgroup.actual_n as f64).sqrt();
                Ok(Resolution {
                    value_to_classify: (subgroup.mean - center_line) / sigma_n,
                    boundaries: Some(calculate_zones(0.0, 1.0)?),
                    is_undersized,
                    size_warning,
                })
            }
            SubgroupMode::VariableLimits => {
                let (center_line, sigma) = Self::stored_baseline(config)?;
                let sigma_n = sigma / (subgroup.actual_n as f64).sqrt();
                Ok(Resolution {
                    value_to_classify: subgroup.mean,
                    boundaries: Some(calculate_zones(center_line, sigma_n)?),
                    is_undersized,
                    size_warning,
                })
            }
        }
    }

    fn stored_baseline(config: &CharacteristicConfig) -> Result<(f64, f64)> {
        match (config.stored_center_line, config.stored_sigma) {
            (Some(center_line), Some(sigma)) if sigma > 0.0 => Ok((center_line, sigma)),
            _ => Err(SpcError::MissingBaseline { mode: config.mode }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn config(mode: SubgroupMode) -> CharacteristicConfig {
        let mut config = CharacteristicConfig::new("bore diameter");
        config.mode = mode;
        config.min_measurements = 3;
        config.warn_below_count = Some(5);
        config.stored_center_line = Some(100.0);
        config.stored_sigma = Some(2.0);
        config
    }

    fn subgroup(mean: f64, n: usize) -> Subgroup {
        Subgroup {
            characteristic_id: Uuid::new_v4(),
            mean,
            range_or_stddev: None,
            actual_n: n,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_nominal_passes_mean_through() {
        let r =
            SubgroupModeResolver::resolve(&config(SubgroupMode::NominalTolerance), &subgroup(101.5, 5))
                .unwrap();
        assert_eq!(r.value_to_classify, 101.5);
        assert!(r.boundaries.is_none());
        assert!(!r.is_undersized);
        assert!(!r.size_warning);
    }

    #[test]
    fn test_nominal_flags_undersized_and_warning() {
        let cfg = config(SubgroupMode::NominalTolerance);

        let r = SubgroupModeResolver::resolve(&cfg, &subgroup(101.5, 2)).unwrap();
        assert!(r.is_undersized);
        assert!(r.size_warning);

        // Between min and warn threshold: warned but not undersized
        let r = SubgroupModeResolver::resolve(&cfg, &subgroup(101.5, 4)).unwrap();
        assert!(!r.is_undersized);
        assert!(r.size_warning);
    }

    #[test]
    fn test_nominal_works_without_baseline() {
        let mut cfg = config(SubgroupMode::NominalTolerance);
        cfg.stored_center_line = None;
        cfg.stored_sigma = None;
        assert!(SubgroupModeResolver::resolve(&cfg, &subgroup(101.5, 5)).is_ok());
    }

    #[test]
    fn test_standardized_z_score() {
        // z = (101.5 - 100) / (2 / sqrt(4)) = 1.5
        let r =
            SubgroupModeResolver::resolve(&config(SubgroupMode::Standardized), &subgroup(101.5, 4))
                .unwrap();
        assert!((r.value_to_classify - 1.5).abs() < 1e-12);

        let boundaries = r.boundaries.unwrap();
        assert_eq!(boundaries.center_line, 0.0);
        assert_eq!(boundaries.sigma, 1.0);
        assert_eq!(boundaries.plus_3_sigma, 3.0);
    }

    #[test]
    fn test_standardized_accounts_for_subgroup_size() {
        // The same mean deviation is more significant with more measurements
        let cfg = config(SubgroupMode::Standardized);
        let z4 = SubgroupModeResolver::resolve(&cfg, &subgroup(101.0, 4))
            .unwrap()
            .value_to_classify;
        let z16 = SubgroupModeResolver::resolve(&cfg, &subgroup(101.0, 16))
            .unwrap()
            .value_to_classify;
        assert!((z4 - 1.0).abs() < 1e-12);
        assert!((z16 - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_variable_limits_scale_with_subgroup_size() {
        let cfg = config(SubgroupMode::VariableLimits);

        let r = SubgroupModeResolver::resolve(&cfg, &subgroup(101.5, 4)).unwrap();
        assert_eq!(r.value_to_classify, 101.5);
        let b = r.boundaries.unwrap();
        // effective sigma = 2 / sqrt(4) = 1.0
        assert!((b.sigma - 1.0).abs() < 1e-12);
        assert!((b.plus_3_sigma - 103.0).abs() < 1e-12);
        assert!((b.minus_3_sigma - 97.0).abs() < 1e-12);

        // A single measurement widens the limits to the full process sigma
        let r = SubgroupModeResolver::resolve(&cfg, &subgroup(101.5, 1)).unwrap();
        let b = r.boundaries.unwrap();
        assert!((b.sigma - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_modes_requiring_baseline_fail_without_it() {
        for mode in [SubgroupMode::Standardized, SubgroupMode::VariableLimits] {
            let mut cfg = config(mode);
            cfg.stored_sigma = None;
            assert!(matches!(
                SubgroupModeResolver::resolve(&cfg, &subgroup(101.5, 5)),
                Err(SpcError::MissingBaseline { .. })
            ));

            let mut cfg = config(mode);
            cfg.stored_sigma = Some(0.0);
            assert!(SubgroupModeResolver::resolve(&cfg, &subgroup(101.5, 5)).is_err());
        }
    }

    #[test]
    fn test_empty_subgroup_is_rejected() {
        assert!(matches!(
            SubgroupModeResolver::resolve(
                &config(SubgroupMode::NominalTolerance),
                &subgroup(101.5, 0)
            ),
            Err(SpcError::InsufficientData { .. })
        ));
    }
}
