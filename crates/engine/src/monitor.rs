//! Characteristic monitor
//!
//! Per-characteristic orchestration of the detection engine: resolve the
//! subgroup-size policy, classify, append to the rolling window and
//! evaluate the Nelson rules. The monitor owns a registry of
//! characteristic states but performs no I/O; persisting samples and
//! violations and publishing events belongs to the caller.
//!
//! Callers must serialize access per characteristic: append + rule
//! evaluation + boundary replacement are not atomic as a group.

use crate::resolver::{Resolution, SubgroupModeResolver};
use crate::rules::evaluate_rules;
use crate::window::RollingWindow;
use caliper_core::{
    CharacteristicConfig, ControlLimits, Result, SpcError, Subgroup, SubgroupMode, Violation,
    WindowSample, ZoneBoundaries,
};
use caliper_stats::{
    calculate_control_limits_from_sigma, calculate_imr_limits, calculate_xbar_r_limits,
    calculate_zones, estimate_sigma_rbar,
};
use dashmap::DashMap;
use log::{debug, info, warn};
use uuid::Uuid;

/// What the engine yields for one processed subgroup. The caller persists
/// the sample and violations and publishes domain events.
#[derive(Debug, Clone)]
pub struct SubgroupOutcome {
    pub sample: WindowSample,
    /// Oldest sample evicted by this append, if the window was full
    pub evicted: Option<WindowSample>,
    /// Rules that fired for this sample, possibly several
    pub violations: Vec<Violation>,
    pub is_undersized: bool,
    pub size_warning: bool,
}

/// One historical subgroup used for baseline establishment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaselineSubgroup {
    pub mean: f64,
    pub range: f64,
    /// Measurements actually collected; undersized subgroups are excluded
    /// from the baseline computation
    pub n: usize,
}

/// Historical data from which control limits are established.
#[derive(Debug, Clone)]
pub enum BaselineData {
    /// Subgroup statistics for an X-bar/R chart
    XbarR { subgroups: Vec<BaselineSubgroup> },
    /// Individual measurements for an I-MR chart
    Individuals { values: Vec<f64> },
}

/// Result of a baseline calculation.
#[derive(Debug, Clone, Copy)]
pub struct EstablishedBaseline {
    /// Process center line stored on the characteristic
    pub center_line: f64,
    /// Process sigma stored on the characteristic
    pub sigma: f64,
    /// Limits for the value chart (X-bar or individuals)
    pub value_limits: ControlLimits,
    /// Limits for the variation chart (R or moving range)
    pub variation_limits: ControlLimits,
    /// Subgroups dropped for being under the minimum measurement count
    pub excluded_subgroups: usize,
}

struct CharacteristicState {
    config: CharacteristicConfig,
    window: RollingWindow,
    next_sample_id: u64,
}

/// Registry of characteristic states plus the append-and-evaluate flow.
#[derive(Default)]
pub struct CharacteristicMonitor {
    characteristics: DashMap<Uuid, CharacteristicState>,
}

impl CharacteristicMonitor {
    pub fn new() -> Self {
        Self {
            characteristics: DashMap::new(),
        }
    }

    /// Register a characteristic. If the configuration carries a stored
    /// baseline, the window is seeded ready; otherwise it stays not-ready
    /// until a baseline is established.
    pub fn register(&self, config: CharacteristicConfig) -> Result<()> {
        let mut window = RollingWindow::new(config.window_size);
        if let Some(boundaries) = Self::seed_boundaries(&config)? {
            window.set_boundaries(boundaries)?;
        }

        info!(
            "[MONITOR] registered characteristic {} ({:?}, window {})",
            config.name, config.mode, config.window_size
        );
        if self
            .characteristics
            .insert(
                config.id,
                CharacteristicState {
                    config,
                    window,
                    next_sample_id: 0,
                },
            )
            .is_some()
        {
            warn!("[MONITOR] replaced existing characteristic state");
        }
        Ok(())
    }

    /// Remove a characteristic and its window.
    pub fn deregister(&self, id: Uuid) -> Result<()> {
        self.characteristics
            .remove(&id)
            .map(|_| ())
            .ok_or(SpcError::UnknownCharacteristic(id))
    }

    /// Current configuration for a characteristic.
    pub fn config(&self, id: Uuid) -> Result<CharacteristicConfig> {
        self.characteristics
            .get(&id)
            .map(|state| state.config.clone())
            .ok_or(SpcError::UnknownCharacteristic(id))
    }

    /// True iff the characteristic's window has boundaries.
    pub fn is_ready(&self, id: Uuid) -> Result<bool> {
        self.characteristics
            .get(&id)
            .map(|state| state.window.is_ready())
            .ok_or(SpcError::UnknownCharacteristic(id))
    }

    /// Full window contents, oldest to newest.
    pub fn window_snapshot(&self, id: Uuid) -> Result<Vec<WindowSample>> {
        self.characteristics
            .get(&id)
            .map(|state| state.window.samples())
            .ok_or(SpcError::UnknownCharacteristic(id))
    }

    /// Process one completed subgroup: resolve the mode policy, classify,
    /// append and evaluate the enabled Nelson rules.
    pub fn process_subgroup(&self, subgroup: &Subgroup) -> Result<SubgroupOutcome> {
        let mut state = self
            .characteristics
            .get_mut(&subgroup.characteristic_id)
            .ok_or(SpcError::UnknownCharacteristic(subgroup.characteristic_id))?;
        let state = &mut *state;

        let resolution = SubgroupModeResolver::resolve(&state.config, subgroup)?;
        let Resolution {
            value_to_classify,
            boundaries,
            is_undersized,
            size_warning,
        } = resolution;

        let classification = match &boundaries {
            Some(effective) => caliper_stats::classify_value(effective, value_to_classify)?,
            None => state.window.classify_value(value_to_classify)?,
        };

        let sample = WindowSample {
            sample_id: state.next_sample_id,
            timestamp: subgroup.timestamp,
            value: value_to_classify,
            range_value: subgroup.range_or_stddev,
            subgroup_size: subgroup.actual_n,
            zone: classification.zone,
            is_above_center: classification.is_above_center,
            sigma_distance: classification.sigma_distance,
        };
        state.next_sample_id += 1;

        let evicted = state.window.append(sample.clone());
        let history = state.window.samples();
        let violations = evaluate_rules(&history, &state.config.rules);

        debug!(
            "[MONITOR] {}: sample {} -> {:?} ({:+.2} sigma)",
            state.config.name, sample.sample_id, sample.zone, sample.sigma_distance
        );
        for violation in &violations {
            warn!(
                "[MONITOR] {}: rule {} ({}) fired at sample {}",
                state.config.name,
                violation.rule_id,
                violation.rule_name,
                violation.triggering_sample_id
            );
        }
        if size_warning {
            warn!(
                "[MONITOR] {}: subgroup of {} below warning threshold",
                state.config.name, subgroup.actual_n
            );
        }

        Ok(SubgroupOutcome {
            sample,
            evicted,
            violations,
            is_undersized,
            size_warning,
        })
    }

    /// Establish control limits from historical data and store the
    /// resulting baseline on the characteristic.
    ///
    /// Under nominal tolerance the retained window is re-classified in
    /// place against the new boundaries. Under standardized or variable
    /// limits the window is cleared instead: retained samples were derived
    /// from the superseded baseline and cannot be re-derived from their
    /// stored values alone.
    pub fn establish_baseline(
        &self,
        id: Uuid,
        data: &BaselineData,
    ) -> Result<EstablishedBaseline> {
        let mut state = self
            .characteristics
            .get_mut(&id)
            .ok_or(SpcError::UnknownCharacteristic(id))?;
        let state = &mut *state;

        let baseline = match data {
            BaselineData::XbarR { subgroups } => {
                let usable: Vec<&BaselineSubgroup> = subgroups
                    .iter()
                    .filter(|s| s.n >= state.config.min_measurements)
                    .collect();
                let excluded = subgroups.len() - usable.len();
                if usable.is_empty() {
                    return Err(SpcError::InsufficientData {
                        needed: 1,
                        got: 0,
                    });
                }

                let means: Vec<f64> = usable.iter().map(|s| s.mean).collect();
                let ranges: Vec<f64> = usable.iter().map(|s| s.range).collect();
                let n = state.config.nominal_subgroup_size;
                let limits = calculate_xbar_r_limits(&means, &ranges, n)?;
                let sigma = estimate_sigma_rbar(&ranges, n)?;

                EstablishedBaseline {
                    center_line: limits.xbar.center_line,
                    sigma,
                    value_limits: limits.xbar,
                    variation_limits: limits.range,
                    excluded_subgroups: excluded,
                }
            }
            BaselineData::Individuals { values } => {
                let limits = calculate_imr_limits(values)?;
                EstablishedBaseline {
                    center_line: limits.individuals.center_line,
                    sigma: limits.individuals.sigma,
                    value_limits: limits.individuals,
                    variation_limits: limits.moving_range,
                    excluded_subgroups: 0,
                }
            }
        };

        state.config.stored_center_line = Some(baseline.center_line);
        state.config.stored_sigma = Some(baseline.sigma);

        match state.config.mode {
            SubgroupMode::NominalTolerance => {
                let boundaries = calculate_zones(
                    baseline.value_limits.center_line,
                    baseline.value_limits.sigma,
                )?;
                state.window.set_boundaries(boundaries)?;
            }
            SubgroupMode::Standardized | SubgroupMode::VariableLimits => {
                state.window.clear();
                if let Some(boundaries) = Self::seed_boundaries(&state.config)? {
                    state.window.set_boundaries(boundaries)?;
                }
            }
        }

        info!(
            "[BASELINE] {}: center={:.4} sigma={:.4} ({} undersized subgroup(s) excluded)",
            state.config.name, baseline.center_line, baseline.sigma, baseline.excluded_subgroups
        );
        Ok(baseline)
    }

    /// Manually override the stored baseline with operator-supplied
    /// process center line and sigma. Boundary-update semantics match
    /// [`Self::establish_baseline`].
    pub fn set_baseline(&self, id: Uuid, center_line: f64, sigma: f64) -> Result<()> {
        let limits = calculate_control_limits_from_sigma(center_line, sigma)?;
        let mut state = self
            .characteristics
            .get_mut(&id)
            .ok_or(SpcError::UnknownCharacteristic(id))?;
        let state = &mut *state;

        state.config.stored_center_line = Some(center_line);
        state.config.stored_sigma = Some(sigma);

        if matches!(
            state.config.mode,
            SubgroupMode::Standardized | SubgroupMode::VariableLimits
        ) {
            state.window.clear();
        }
        if let Some(boundaries) = Self::seed_boundaries(&state.config)? {
            state.window.set_boundaries(boundaries)?;
        }

        info!(
            "[BASELINE] {}: manual override center={:.4} ucl={:.4} lcl={:.4}",
            state.config.name, limits.center_line, limits.ucl, limits.lcl
        );
        Ok(())
    }

    /// Clear a characteristic's window. Boundaries are retained.
    pub fn reset(&self, id: Uuid) -> Result<()> {
        let mut state = self
            .characteristics
            .get_mut(&id)
            .ok_or(SpcError::UnknownCharacteristic(id))?;
        state.window.clear();
        info!("[MONITOR] {}: window cleared", state.config.name);
        Ok(())
    }

    /// Boundaries the window should hold for a stored baseline, or `None`
    /// when no baseline exists yet. The stored sigma is the process sigma;
    /// the chart runs at the nominal subgroup size, so nominal and
    /// variable-limit modes scale it by sqrt(nominal n).
    fn seed_boundaries(config: &CharacteristicConfig) -> Result<Option<ZoneBoundaries>> {
        let (Some(center_line), Some(sigma)) = (config.stored_center_line, config.stored_sigma)
        else {
            return Ok(None);
        };
        if sigma <= 0.0 {
            return Err(SpcError::NonPositiveSigma { sigma });
        }
        let boundaries = match config.mode {
            SubgroupMode::Standardized => calculate_zones(0.0, 1.0)?,
            SubgroupMode::NominalTolerance | SubgroupMode::VariableLimits => {
                let sigma_n = sigma / (config.nominal_subgroup_size.max(1) as f64).sqrt();
                calculate_zones(center_line, sigma_n)?
            }
        };
        Ok(Some(boundaries))
    }
}
