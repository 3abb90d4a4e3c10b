//! Utility helpers for tests.
//!
//! Fixtures build small terrains, bodies and waypoint lists with values that
//! are easy to check by hand.
pub mod fixtures;

use trek::Inspector;

/// Assert that inspector slot `slot` contains `needle`.
///
/// # Panics
/// Panics with the slot's actual text if `needle` is missing.
pub fn assert_slot_contains(inspector: &Inspector, slot: usize, needle: &str) {
    let line = inspector.info(slot);
    assert!(
        line.contains(needle),
        "slot {slot} should contain {needle:?}, found {line:?}"
    );
}

/// Assert that inspector slot `slot` holds nothing but whitespace.
///
/// # Panics
/// Panics with the slot's actual text if it is not blank.
pub fn assert_slot_blank(inspector: &Inspector, slot: usize) {
    let line = inspector.info(slot);
    assert!(line.trim().is_empty(), "slot {slot} should be blank, found {line:?}");
}
