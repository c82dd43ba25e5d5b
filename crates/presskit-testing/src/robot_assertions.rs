//! Assertion utilities for gesture robot tests.

use crate::recorder::{CallbackRecorder, GestureCall};

/// Assert that the filter registered under `label` made exactly `expected`.
pub fn assert_calls(recorder: &CallbackRecorder, label: &str, expected: &[GestureCall]) {
    let actual = recorder.calls_for(label);
    assert_eq!(
        actual, expected,
        "{label}: expected calls {expected:?}, got {actual:?}"
    );
}

/// Assert the press lifecycle grammar: each `PressStart` is followed by at
/// most one of `PressStop`/`PressCancel` before the next start, and no
/// stop or cancel appears without a start.
pub fn assert_press_cycles_well_formed(calls: &[GestureCall]) {
    let mut pressed = false;
    for (index, call) in calls.iter().enumerate() {
        match call {
            GestureCall::PressStart(_) => {
                assert!(
                    !pressed,
                    "call #{index}: start while a press is already active in {calls:?}"
                );
                pressed = true;
            }
            GestureCall::PressStop | GestureCall::PressCancel => {
                assert!(
                    pressed,
                    "call #{index}: {call:?} without a preceding start in {calls:?}"
                );
                pressed = false;
            }
            GestureCall::Tap => {}
        }
    }
}
