//! Nelson rule library
//!
//! Eight independent, stateless detectors, each scanning the tail of the
//! window's chronological sample sequence and deciding whether the most
//! recently appended sample triggers that rule. A rule either fires on
//! that exact sample or does not; it never retroactively flags older
//! samples. Short history is an expected steady state and reports "not
//! triggered", never an error.
//!
//! # References
//!
//! - Nelson, L.S. (1984). "The Shewhart Control Chart — Tests for Special
//!   Causes", *Journal of Quality Technology* 16(4), pp. 237-239.

use caliper_core::{RuleKind, RulePolicy, Side, Violation, WindowSample};

/// The trailing `k` samples in chronological order, or `None` when the
/// history is shorter than `k`.
fn tail(samples: &[WindowSample], k: usize) -> Option<&[WindowSample]> {
    (samples.len() >= k).then(|| &samples[samples.len() - k..])
}

/// Rule 1: the latest sample fell beyond the control limits.
fn outlier(samples: &[WindowSample]) -> bool {
    samples.last().is_some_and(|s| s.zone.is_beyond_limits())
}

/// Rule 2: 9 consecutive samples on the same side of the center line.
/// Indicates a sustained shift in the process mean.
fn shift(samples: &[WindowSample]) -> bool {
    tail(samples, 9).is_some_and(|t| {
        let side = t[0].is_above_center;
        t.iter().all(|s| s.is_above_center == side)
    })
}

/// Rule 3: 6 consecutive samples form a strictly monotonic run.
fn trend(samples: &[WindowSample]) -> bool {
    tail(samples, 6).is_some_and(|t| {
        t.windows(2).all(|w| w[1].value > w[0].value)
            || t.windows(2).all(|w| w[1].value < w[0].value)
    })
}

/// Rule 4: 14 consecutive samples strictly alternate direction of change.
/// Indicates systematic variation (e.g. two alternating streams).
fn alternator(samples: &[WindowSample]) -> bool {
    tail(samples, 14).is_some_and(|t| {
        let diffs: Vec<f64> = t.windows(2).map(|w| w[1].value - w[0].value).collect();
        diffs.iter().all(|d| *d != 0.0)
            && diffs.windows(2).all(|p| (p[0] > 0.0) != (p[1] > 0.0))
    })
}

/// Rule 5: 2 of the latest 3 samples in zone A or beyond, same side.
/// An early warning of a potential shift.
fn zone_a(samples: &[WindowSample]) -> bool {
    tail(samples, 3).is_some_and(|t| {
        [Side::Upper, Side::Lower].into_iter().any(|side| {
            t.iter().filter(|s| s.zone.is_zone_a_or_beyond(side)).count() >= 2
        })
    })
}

/// Rule 6: 4 of the latest 5 samples at or beyond zone B, same side.
/// Indicates a small sustained shift.
fn zone_b(samples: &[WindowSample]) -> bool {
    tail(samples, 5).is_some_and(|t| {
        [Side::Upper, Side::Lower].into_iter().any(|side| {
            t.iter().filter(|s| s.zone.is_zone_b_or_beyond(side)).count() >= 4
        })
    })
}

/// Rule 7: 15 consecutive samples within 1 sigma of the center line,
/// either side. Indicates stratification.
fn stratification(samples: &[WindowSample]) -> bool {
    tail(samples, 15).is_some_and(|t| t.iter().all(|s| s.zone.is_zone_c()))
}

/// Rule 8: 8 consecutive samples beyond 1 sigma on either side, none in
/// zone C. Indicates a mixture pattern.
fn mixture(samples: &[WindowSample]) -> bool {
    tail(samples, 8).is_some_and(|t| t.iter().all(|s| !s.zone.is_zone_c()))
}

/// Whether the latest sample of `samples` triggers `rule`.
pub fn is_triggered(rule: RuleKind, samples: &[WindowSample]) -> bool {
    match rule {
        RuleKind::Outlier => outlier(samples),
        RuleKind::Shift => shift(samples),
        RuleKind::Trend => trend(samples),
        RuleKind::Alternator => alternator(samples),
        RuleKind::ZoneA => zone_a(samples),
        RuleKind::ZoneB => zone_b(samples),
        RuleKind::Stratification => stratification(samples),
        RuleKind::Mixture => mixture(samples),
    }
}

/// Evaluate the enabled rules against the latest sample and return every
/// rule that fired. Multiple rules may fire for one sample.
pub fn evaluate_rules(samples: &[WindowSample], policy: &RulePolicy) -> Vec<Violation> {
    let Some(latest) = samples.last() else {
        return Vec::new();
    };
    RuleKind::ALL
        .into_iter()
        .filter(|rule| policy.is_enabled(*rule))
        .filter(|rule| is_triggered(*rule, samples))
        .map(|rule| Violation::new(rule, latest.sample_id, policy.requires_ack(rule)))
        .collect()
}
