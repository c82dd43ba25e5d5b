//! Tap gesture recogniser.
//!
//! Arms when every pointer in a batch goes down together and fires once when
//! they all go up together. Movement consumed by anyone in between, or every
//! pointer leaving the region, disarms it without a callback.

use std::fmt;
use std::rc::Rc;

use presskit_ui_graphics::Size;

use crate::error::GestureError;
use crate::nodes::input::consumption::{
    all_changed_to_down, all_changed_to_up, any_pointer_in_bounds, any_position_change_consumed,
    consume_down_changes,
};
use crate::nodes::input::filter::PointerInputFilter;
use crate::nodes::input::types::{ChangeBatch, PointerEventPass};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TapGestureConfig {
    /// Claim the down change of every batch while armed, so regions visited
    /// later in the same pass see the press as taken.
    pub consume_down_on_start: bool,
}

impl TapGestureConfig {
    pub fn with_consume_down_on_start(mut self, consume: bool) -> Self {
        self.consume_down_on_start = consume;
        self
    }
}

impl Default for TapGestureConfig {
    fn default() -> Self {
        Self {
            consume_down_on_start: true,
        }
    }
}

pub struct TapGestureFilter {
    on_tap: Rc<dyn Fn()>,
    config: TapGestureConfig,
    active: bool,
}

impl TapGestureFilter {
    pub fn new(on_tap: impl Fn() + 'static) -> Self {
        Self {
            on_tap: Rc::new(on_tap),
            config: TapGestureConfig::default(),
            active: false,
        }
    }

    pub fn builder() -> TapGestureBuilder {
        TapGestureBuilder::default()
    }

    pub fn with_config(mut self, config: TapGestureConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> TapGestureConfig {
        self.config
    }

    pub fn set_config(&mut self, config: TapGestureConfig) {
        self.config = config;
    }

    pub fn set_on_tap(&mut self, on_tap: impl Fn() + 'static) {
        self.on_tap = Rc::new(on_tap);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn disarm(&mut self, reason: &str) {
        if self.active {
            log::debug!("tap disarmed: {reason}");
        }
        self.active = false;
    }
}

impl PointerInputFilter for TapGestureFilter {
    fn on_pointer_event(
        &mut self,
        mut changes: ChangeBatch,
        pass: PointerEventPass,
        bounds: Size,
    ) -> ChangeBatch {
        if changes.is_empty() {
            return changes;
        }

        match pass {
            PointerEventPass::PostUp => {
                if all_changed_to_down(&changes) {
                    log::debug!("tap armed by {} pointer(s)", changes.len());
                    self.active = true;
                } else if self.active && all_changed_to_up(&changes) {
                    self.active = false;
                    changes = consume_down_changes(changes);
                    log::debug!("tap fired");
                    (self.on_tap)();
                } else if !any_pointer_in_bounds(&changes, bounds) {
                    self.disarm("all pointers left bounds");
                }

                if self.active && self.config.consume_down_on_start {
                    changes = consume_down_changes(changes);
                }
            }
            PointerEventPass::PostDown => {
                if self.active && any_position_change_consumed(&changes) {
                    self.disarm("movement consumed");
                }
            }
            _ => {}
        }

        changes
    }

    fn on_cancel(&mut self) {
        self.disarm("cancelled");
    }

    fn debug_name(&self) -> &'static str {
        "TapGestureFilter"
    }
}

impl fmt::Debug for TapGestureFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TapGestureFilter")
            .field("config", &self.config)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

/// Builder for owners that assemble a tap filter from optional pieces.
///
/// `build` fails when no tap callback was provided.
#[derive(Default)]
pub struct TapGestureBuilder {
    on_tap: Option<Rc<dyn Fn()>>,
    config: TapGestureConfig,
}

impl TapGestureBuilder {
    pub fn on_tap(mut self, on_tap: impl Fn() + 'static) -> Self {
        self.on_tap = Some(Rc::new(on_tap));
        self
    }

    pub fn consume_down_on_start(mut self, consume: bool) -> Self {
        self.config.consume_down_on_start = consume;
        self
    }

    pub fn config(mut self, config: TapGestureConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<TapGestureFilter, GestureError> {
        let on_tap = self.on_tap.ok_or(GestureError::MissingTapCallback)?;
        Ok(TapGestureFilter {
            on_tap,
            config: self.config,
            active: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::input::types::PointerInputChange;
    use presskit_ui_graphics::Point;
    use smallvec::smallvec;
    use std::cell::Cell;
    use web_time::Duration;

    const BOUNDS: Size = Size::new(100.0, 100.0);

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn counting_filter() -> (TapGestureFilter, Rc<Cell<u32>>) {
        let taps = Rc::new(Cell::new(0));
        let taps_clone = taps.clone();
        let filter = TapGestureFilter::new(move || taps_clone.set(taps_clone.get() + 1));
        (filter, taps)
    }

    /// Runs every pass in order, like the dispatcher does for a lone region.
    fn dispatch(filter: &mut TapGestureFilter, changes: ChangeBatch) -> ChangeBatch {
        dispatch_in(filter, changes, BOUNDS)
    }

    fn dispatch_in(
        filter: &mut TapGestureFilter,
        mut changes: ChangeBatch,
        bounds: Size,
    ) -> ChangeBatch {
        for pass in PointerEventPass::ALL {
            changes = filter.on_pointer_event(changes, pass, bounds);
        }
        changes
    }

    #[test]
    fn down_arms_without_firing() {
        let (mut filter, taps) = counting_filter();
        let down = PointerInputChange::down(0, ms(0), Point::new(10.0, 10.0));

        let result = dispatch(&mut filter, smallvec![down]);

        assert!(filter.is_active());
        assert_eq!(taps.get(), 0);
        assert!(result[0].consumed.down_change, "armed tap claims the down");
    }

    #[test]
    fn down_then_up_fires_once_and_consumes_release() {
        let (mut filter, taps) = counting_filter();
        let down = PointerInputChange::down(0, ms(0), Point::new(10.0, 10.0));
        dispatch(&mut filter, smallvec![down.clone()]);

        let result = dispatch(&mut filter, smallvec![down.released(ms(50))]);

        assert_eq!(taps.get(), 1);
        assert!(!filter.is_active());
        assert!(result[0].consumed.down_change);
    }

    #[test]
    fn only_post_up_arms() {
        let (mut filter, _taps) = counting_filter();
        let down = PointerInputChange::down(0, ms(0), Point::new(10.0, 10.0));
        for pass in [
            PointerEventPass::InitialDown,
            PointerEventPass::PreUp,
            PointerEventPass::PreDown,
            PointerEventPass::PostDown,
        ] {
            let result = filter.on_pointer_event(smallvec![down.clone()], pass, BOUNDS);
            assert!(!filter.is_active());
            assert!(!result[0].consumed.down_change);
        }
    }

    #[test]
    fn consume_down_on_start_can_be_disabled() {
        let (filter, _taps) = counting_filter();
        let mut filter =
            filter.with_config(TapGestureConfig::default().with_consume_down_on_start(false));
        let down = PointerInputChange::down(0, ms(0), Point::new(10.0, 10.0));

        let result = dispatch(&mut filter, smallvec![down]);

        assert!(filter.is_active());
        assert!(!result[0].consumed.down_change);
    }

    #[test]
    fn consumed_movement_disarms_silently() {
        let (mut filter, taps) = counting_filter();
        let down = PointerInputChange::down(0, ms(0), Point::new(10.0, 10.0));
        dispatch(&mut filter, smallvec![down.clone()]);

        let moved = down
            .moved_to(ms(16), Point::new(20.0, 10.0))
            .consume_position_change(10.0, 0.0);
        dispatch(&mut filter, smallvec![moved.clone()]);
        assert!(!filter.is_active());

        dispatch(&mut filter, smallvec![moved.released(ms(32))]);
        assert_eq!(taps.get(), 0);
    }

    #[test]
    fn unconsumed_movement_keeps_tap_armed() {
        let (mut filter, taps) = counting_filter();
        let down = PointerInputChange::down(0, ms(0), Point::new(10.0, 10.0));
        dispatch(&mut filter, smallvec![down.clone()]);

        let moved = down.moved_to(ms(16), Point::new(30.0, 10.0));
        dispatch(&mut filter, smallvec![moved.clone()]);
        assert!(filter.is_active());

        dispatch(&mut filter, smallvec![moved.released(ms(32))]);
        assert_eq!(taps.get(), 1);
    }

    #[test]
    fn leaving_bounds_abandons_tap() {
        let (mut filter, taps) = counting_filter();
        let bounds = Size::new(1.0, 1.0);
        let down = PointerInputChange::down(0, ms(0), Point::ZERO);
        dispatch_in(&mut filter, smallvec![down.clone()], bounds);

        let moved = down.moved_to(ms(16), Point::new(1.0, 0.0));
        dispatch_in(&mut filter, smallvec![moved.clone()], bounds);
        assert!(!filter.is_active());

        dispatch_in(&mut filter, smallvec![moved.released(ms(32))], bounds);
        assert_eq!(taps.get(), 0);
    }

    #[test]
    fn mixed_batch_leaves_state_unchanged() {
        let (mut filter, taps) = counting_filter();
        let first = PointerInputChange::down(0, ms(0), Point::new(10.0, 10.0));
        dispatch(&mut filter, smallvec![first.clone()]);
        assert!(filter.is_active());

        // Second finger lands while the first one stays put.
        let first_held = first.moved_to(ms(16), first.current.position);
        let second = PointerInputChange::down(1, ms(16), Point::new(20.0, 20.0));
        dispatch(&mut filter, smallvec![first_held.clone(), second.clone()]);
        assert!(filter.is_active());

        // First finger lifts while the second stays: still neither all-up nor all-down.
        let first_up = first_held.released(ms(32));
        let second_held = second.moved_to(ms(32), second.current.position);
        dispatch(&mut filter, smallvec![first_up, second_held]);
        assert!(filter.is_active());
        assert_eq!(taps.get(), 0);
    }

    #[test]
    fn lockstep_multi_pointer_tap_fires_once() {
        let (mut filter, taps) = counting_filter();
        let a = PointerInputChange::down(0, ms(0), Point::new(10.0, 10.0));
        let b = PointerInputChange::down(1, ms(0), Point::new(40.0, 40.0));
        dispatch(&mut filter, smallvec![a.clone(), b.clone()]);
        assert!(filter.is_active());

        dispatch(&mut filter, smallvec![a.released(ms(40)), b.released(ms(40))]);
        assert_eq!(taps.get(), 1);
    }

    #[test]
    fn down_already_claimed_does_not_arm() {
        let (mut filter, _taps) = counting_filter();
        let down = PointerInputChange::down(0, ms(0), Point::new(10.0, 10.0)).consume_down_change();

        dispatch(&mut filter, smallvec![down]);

        assert!(!filter.is_active());
    }

    #[test]
    fn cancel_disarms_without_callback() {
        let (mut filter, taps) = counting_filter();
        let down = PointerInputChange::down(0, ms(0), Point::new(10.0, 10.0));
        dispatch(&mut filter, smallvec![down.clone()]);

        filter.on_cancel();
        assert!(!filter.is_active());

        dispatch(&mut filter, smallvec![down.released(ms(20))]);
        assert_eq!(taps.get(), 0);
    }

    #[test]
    fn empty_batch_is_a_no_op() {
        let (mut filter, taps) = counting_filter();
        let result = dispatch(&mut filter, ChangeBatch::new());
        assert!(result.is_empty());
        assert!(!filter.is_active());
        assert_eq!(taps.get(), 0);
    }

    #[test]
    fn builder_requires_tap_callback() {
        let err = TapGestureFilter::builder().build().unwrap_err();
        assert_eq!(err, GestureError::MissingTapCallback);

        let filter = TapGestureFilter::builder()
            .on_tap(|| {})
            .consume_down_on_start(false)
            .build()
            .expect("callback provided");
        assert!(!filter.config().consume_down_on_start);
    }
}
