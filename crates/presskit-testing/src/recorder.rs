//! Callback recording for gesture tests.

use std::cell::RefCell;
use std::rc::Rc;

use presskit_foundation::{
    ChangeBatch, PointerEventPass, PointerInputFilter, PressIndicatorCallbacks,
};
use presskit_ui_graphics::{Point, Size};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureCall {
    Tap,
    PressStart(Point),
    PressStop,
    PressCancel,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecordedCall {
    pub label: &'static str,
    pub call: GestureCall,
}

/// Collects callbacks from any number of filters into one ordered log.
#[derive(Clone, Default)]
pub struct CallbackRecorder {
    calls: Rc<RefCell<Vec<RecordedCall>>>,
}

impl CallbackRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, label: &'static str, call: GestureCall) {
        self.calls.borrow_mut().push(RecordedCall { label, call });
    }

    pub fn tap_callback(&self, label: &'static str) -> impl Fn() + 'static {
        let recorder = self.clone();
        move || recorder.record(label, GestureCall::Tap)
    }

    pub fn press_callbacks(&self, label: &'static str) -> PressIndicatorCallbacks {
        let (start, stop, cancel) = (self.clone(), self.clone(), self.clone());
        PressIndicatorCallbacks::new()
            .on_start(move |position| start.record(label, GestureCall::PressStart(position)))
            .on_stop(move || stop.record(label, GestureCall::PressStop))
            .on_cancel(move || cancel.record(label, GestureCall::PressCancel))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Calls made by the filter registered under `label`.
    pub fn calls_for(&self, label: &str) -> Vec<GestureCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|recorded| recorded.label == label)
            .map(|recorded| recorded.call)
            .collect()
    }

    pub fn count(&self, label: &str, call: GestureCall) -> usize {
        self.calls_for(label)
            .into_iter()
            .filter(|recorded| *recorded == call)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

/// Stands in for a scroll container: claims all movement on one pass.
pub struct ConsumeMovementFilter {
    pass: PointerEventPass,
}

impl ConsumeMovementFilter {
    pub fn new(pass: PointerEventPass) -> Self {
        Self { pass }
    }
}

impl PointerInputFilter for ConsumeMovementFilter {
    fn on_pointer_event(
        &mut self,
        changes: ChangeBatch,
        pass: PointerEventPass,
        _bounds: Size,
    ) -> ChangeBatch {
        if pass != self.pass {
            return changes;
        }
        changes
            .into_iter()
            .map(|change| {
                if change.position_changed() {
                    change.consume_all_position_change()
                } else {
                    change
                }
            })
            .collect::<ChangeBatch>()
    }

    fn on_cancel(&mut self) {}

    fn debug_name(&self) -> &'static str {
        "ConsumeMovementFilter"
    }
}
