//! Detection engine integration test
//!
//! Drives the full flow the way the ingestion layer would:
//! 1. Register a characteristic
//! 2. Establish a baseline from historical data
//! 3. Feed subgroups through the monitor
//! 4. Check classification, eviction and rule firings

use caliper_core::{CharacteristicConfig, RuleKind, Subgroup, SubgroupMode, Zone};
use caliper_engine::{BaselineData, BaselineSubgroup, CharacteristicMonitor, MonitorEvent};
use chrono::Utc;
use uuid::Uuid;

fn subgroup(id: Uuid, mean: f64) -> Subgroup {
    Subgroup {
        characteristic_id: id,
        mean,
        range_or_stddev: None,
        actual_n: 1,
        timestamp: Utc::now(),
    }
}

fn individuals_monitor(center: f64, sigma: f64) -> (CharacteristicMonitor, Uuid) {
    let monitor = CharacteristicMonitor::new();
    let mut config = CharacteristicConfig::new("bore diameter");
    config.nominal_subgroup_size = 1;
    config.min_measurements = 1;
    config.stored_center_line = Some(center);
    config.stored_sigma = Some(sigma);
    let id = config.id;
    monitor.register(config).unwrap();
    (monitor, id)
}

#[test]
fn test_reference_walk_fires_outlier_on_fifth_sample() {
    // The canonical scenario: center 100, sigma 2, walk up through the
    // zones. Only the fifth sample breaches the UCL.
    let (monitor, id) = individuals_monitor(100.0, 2.0);

    let expected = [
        (98.0, Zone::ZoneCLower),
        (100.0, Zone::ZoneCUpper),
        (103.0, Zone::ZoneBUpper),
        (105.0, Zone::ZoneAUpper),
        (107.0, Zone::BeyondUcl),
    ];

    for (i, (mean, zone)) in expected.into_iter().enumerate() {
        let outcome = monitor.process_subgroup(&subgroup(id, mean)).unwrap();
        assert_eq!(outcome.sample.zone, zone, "sample {i}");

        let fired: Vec<RuleKind> = outcome.violations.iter().map(|v| v.rule).collect();
        if i < 4 {
            assert!(
                !fired.contains(&RuleKind::Outlier),
                "outlier must not fire on sample {i}"
            );
        } else {
            assert!(fired.contains(&RuleKind::Outlier));
            // 105 and 107 put 2 of the last 3 in zone A or beyond
            assert!(fired.contains(&RuleKind::ZoneA));
        }
    }
}

#[test]
fn test_baseline_from_history_then_monitoring() {
    let monitor = CharacteristicMonitor::new();
    let mut config = CharacteristicConfig::new("seal width");
    config.nominal_subgroup_size = 5;
    config.min_measurements = 2;
    let id = config.id;
    monitor.register(config).unwrap();

    // No limits yet: processing defers to the caller
    assert!(monitor.process_subgroup(&subgroup(id, 10.0)).is_err());

    let subgroups: Vec<BaselineSubgroup> = (0..20)
        .map(|i| BaselineSubgroup {
            mean: 10.0 + if i % 2 == 0 { 0.1 } else { -0.1 },
            range: 2.326, // sigma estimate of exactly 1.0 at n = 5
            n: 5,
        })
        .collect();
    let baseline = monitor
        .establish_baseline(id, &BaselineData::XbarR { subgroups })
        .unwrap();

    assert!((baseline.center_line - 10.0).abs() < 1e-9);
    assert!((baseline.sigma - 1.0).abs() < 1e-9);

    // X-bar chart sigma is A2 * R-bar / 3; a mean just inside the UCL
    // classifies into zone A, one outside breaches.
    let chart_sigma = baseline.value_limits.sigma;
    let inside = monitor
        .process_subgroup(&subgroup(id, 10.0 + 2.5 * chart_sigma))
        .unwrap();
    assert_eq!(inside.sample.zone, Zone::ZoneAUpper);

    let outside = monitor
        .process_subgroup(&subgroup(id, 10.0 + 3.5 * chart_sigma))
        .unwrap();
    assert_eq!(outside.sample.zone, Zone::BeyondUcl);
    assert!(outside.violations.iter().any(|v| v.rule == RuleKind::Outlier));
}

#[test]
fn test_shift_detected_after_nine_same_side_samples() {
    let (monitor, id) = individuals_monitor(100.0, 2.0);

    for i in 0..8 {
        let outcome = monitor.process_subgroup(&subgroup(id, 100.5)).unwrap();
        assert!(
            outcome.violations.is_empty(),
            "no violation expected at sample {i}"
        );
    }

    let ninth = monitor.process_subgroup(&subgroup(id, 100.5)).unwrap();
    let fired: Vec<RuleKind> = ninth.violations.iter().map(|v| v.rule).collect();
    assert_eq!(fired, vec![RuleKind::Shift]);
}

#[test]
fn test_window_eviction_under_sustained_load() {
    let monitor = CharacteristicMonitor::new();
    let mut config = CharacteristicConfig::new("narrow");
    config.nominal_subgroup_size = 1;
    config.min_measurements = 1;
    config.window_size = 10;
    config.stored_center_line = Some(100.0);
    config.stored_sigma = Some(2.0);
    let id = config.id;
    monitor.register(config).unwrap();

    let mut evictions = 0;
    for i in 0..25 {
        let outcome = monitor.process_subgroup(&subgroup(id, 100.0)).unwrap();
        if let Some(evicted) = outcome.evicted {
            evictions += 1;
            assert_eq!(evicted.sample_id, outcome.sample.sample_id - 10);
        } else {
            assert!(i < 10);
        }
    }
    assert_eq!(evictions, 15);

    let snapshot = monitor.window_snapshot(id).unwrap();
    assert_eq!(snapshot.len(), 10);
    let ids: Vec<u64> = snapshot.iter().map(|s| s.sample_id).collect();
    assert_eq!(ids, (15..25).collect::<Vec<u64>>());
}

#[test]
fn test_variable_limits_full_flow() {
    let monitor = CharacteristicMonitor::new();
    let mut config = CharacteristicConfig::new("weights");
    config.mode = SubgroupMode::VariableLimits;
    config.nominal_subgroup_size = 4;
    config.min_measurements = 2;
    config.stored_center_line = Some(50.0);
    config.stored_sigma = Some(4.0);
    let id = config.id;
    monitor.register(config).unwrap();

    // n = 4: effective sigma 2.0, limits 44..56 -> 55 is zone A
    let mut sg = subgroup(id, 55.0);
    sg.actual_n = 4;
    let outcome = monitor.process_subgroup(&sg).unwrap();
    assert_eq!(outcome.sample.zone, Zone::ZoneAUpper);

    // n = 16: effective sigma 1.0, the same mean breaches the limit
    let mut sg = subgroup(id, 55.0);
    sg.actual_n = 16;
    let outcome = monitor.process_subgroup(&sg).unwrap();
    assert_eq!(outcome.sample.zone, Zone::BeyondUcl);
}

#[test]
fn test_events_for_external_layers() {
    let (monitor, id) = individuals_monitor(100.0, 2.0);

    let outcome = monitor.process_subgroup(&subgroup(id, 107.0)).unwrap();
    let events = MonitorEvent::from_outcome(id, &outcome);

    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], MonitorEvent::SampleProcessed { .. }));
    assert!(matches!(
        &events[1],
        MonitorEvent::ViolationDetected { violation, .. }
            if violation.rule == RuleKind::Outlier && violation.severity == caliper_core::Severity::Critical
    ));
}
