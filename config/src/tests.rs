//! # Tests for Config Constants
//!
//! Unit tests verifying the configuration constants and the validating
//! constructor of `SmartDeleteConfig`.

use crate::constants::*;

// =============================================================================
// COMMAND TESTS
// =============================================================================

#[test]
fn test_operator_id_is_namespaced() {
    assert!(OPERATOR_ID.starts_with("mesh."));
    assert!(!OPERATOR_ID.contains(' '));
}

#[test]
fn test_replaced_operator_differs() {
    assert_ne!(OPERATOR_ID, REPLACED_OPERATOR_ID);
}

#[test]
fn test_bound_keys_keep_x() {
    // X keeps the stock delete menu
    assert!(BOUND_KEYS.contains(&"DEL"));
    assert!(!BOUND_KEYS.contains(&"X"));
}

#[test]
fn test_report_mentions_boundary_marker() {
    assert!(BOUNDARY_REGION_REPORT.starts_with(BOUNDARY_REGION_MARKER));
}

// =============================================================================
// DECISION TESTS
// =============================================================================

#[test]
fn test_default_small_loops() {
    let cfg = SmartDeleteConfig::default();
    assert!(!cfg.is_small_loop(2));
    assert!(cfg.is_small_loop(3));
    assert!(cfg.is_small_loop(4));
    assert!(cfg.is_small_loop(5));
    assert!(!cfg.is_small_loop(6));
}

#[test]
fn test_degrees_are_ordered() {
    assert!(SPUR_DEGREE < PASS_THROUGH_DEGREE);
}

// =============================================================================
// VALIDATION TESTS
// =============================================================================

#[test]
fn test_new_rejects_degenerate_loop() {
    assert_eq!(
        SmartDeleteConfig::new(false, 2, 5).unwrap_err(),
        ConfigError::LoopTooSmall(2)
    );
}

#[test]
fn test_new_rejects_empty_range() {
    assert_eq!(
        SmartDeleteConfig::new(false, 5, 4).unwrap_err(),
        ConfigError::EmptyLoopRange { min: 5, max: 4 }
    );
}

#[test]
fn test_with_use_verts_keeps_range() {
    let cfg = SmartDeleteConfig::default().with_use_verts(true);
    assert!(cfg.use_verts);
    assert_eq!(cfg.small_loop_min, SMALL_LOOP_MIN_EDGES);
    assert_eq!(cfg.small_loop_max, SMALL_LOOP_MAX_EDGES);
}

#[test]
fn test_config_error_display() {
    let err = ConfigError::EmptyLoopRange { min: 5, max: 4 };
    assert_eq!(err.to_string(), "small loop range is empty: 5..=4");
}
