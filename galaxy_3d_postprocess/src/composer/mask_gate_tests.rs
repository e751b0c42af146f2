//! Unit tests for mask_gate.rs
//!
//! The gate is a two-state machine driven by pass kinds; these tests pin
//! its transitions and the per-frame reset.

use crate::pass::PassKind;
use super::*;

// ============================================================================
// INITIAL STATE
// ============================================================================

#[test]
fn test_starts_inactive() {
    let gate = MaskGate::new();
    assert!(!gate.is_active());
}

#[test]
fn test_default_matches_new() {
    assert_eq!(MaskGate::default(), MaskGate::new());
}

// ============================================================================
// TRANSITIONS
// ============================================================================

#[test]
fn test_mask_push_activates() {
    let mut gate = MaskGate::new();
    gate.observe(PassKind::MaskPush);
    assert!(gate.is_active());
}

#[test]
fn test_mask_pop_deactivates() {
    let mut gate = MaskGate::new();
    gate.observe(PassKind::MaskPush);
    gate.observe(PassKind::MaskPop);
    assert!(!gate.is_active());
}

#[test]
fn test_normal_passes_do_not_change_state() {
    let mut gate = MaskGate::new();
    gate.observe(PassKind::Normal);
    assert!(!gate.is_active());

    gate.observe(PassKind::MaskPush);
    gate.observe(PassKind::Normal);
    gate.observe(PassKind::Normal);
    assert!(gate.is_active());
}

#[test]
fn test_pop_without_push_stays_inactive() {
    let mut gate = MaskGate::new();
    gate.observe(PassKind::MaskPop);
    assert!(!gate.is_active());
}

#[test]
fn test_repeated_push_is_idempotent() {
    let mut gate = MaskGate::new();
    gate.observe(PassKind::MaskPush);
    gate.observe(PassKind::MaskPush);
    assert!(gate.is_active());
    gate.observe(PassKind::MaskPop);
    assert!(!gate.is_active());
}

// ============================================================================
// RESET
// ============================================================================

#[test]
fn test_reset_returns_to_inactive() {
    let mut gate = MaskGate::new();
    gate.observe(PassKind::MaskPush);
    gate.reset();
    assert!(!gate.is_active());
}
