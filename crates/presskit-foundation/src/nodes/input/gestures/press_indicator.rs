//! Press indicator gesture recogniser.
//!
//! Reports the lifetime of a press: `on_start` when a pointer lands,
//! then exactly one of `on_stop` (all pointers lifted) or `on_cancel`
//! (movement consumed, pointer left the region, filter disabled, or the
//! gesture was cancelled by the framework).

use std::fmt;
use std::rc::Rc;

use presskit_ui_graphics::{Point, Size};

use crate::nodes::input::consumption::{
    all_changed_to_up_ignore_consumed, all_pointers_in_bounds, any_down_change_consumed,
    any_position_change_consumed, consume_down_changes,
};
use crate::nodes::input::filter::PointerInputFilter;
use crate::nodes::input::types::{ChangeBatch, PointerEventPass, PointerInputChange};

/// How the press indicator treats a down that an earlier filter already
/// claimed in the same frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClaimPolicy {
    /// Stay idle if the down is already claimed; otherwise start and claim it.
    #[default]
    Yield,
    /// Start regardless and leave the down unclaimed, so a tap filter on the
    /// same pointers can still arm.
    Share,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PressIndicatorConfig {
    pub enabled: bool,
    pub claim_policy: ClaimPolicy,
}

impl PressIndicatorConfig {
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_claim_policy(mut self, claim_policy: ClaimPolicy) -> Self {
        self.claim_policy = claim_policy;
        self
    }
}

impl Default for PressIndicatorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            claim_policy: ClaimPolicy::Yield,
        }
    }
}

/// Callback slots for [`PressIndicatorGestureFilter`].
///
/// Every slot defaults to a no-op, so the filter always has something to call.
#[derive(Clone)]
pub struct PressIndicatorCallbacks {
    on_start: Rc<dyn Fn(Point)>,
    on_stop: Rc<dyn Fn()>,
    on_cancel: Rc<dyn Fn()>,
}

impl PressIndicatorCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_start(mut self, on_start: impl Fn(Point) + 'static) -> Self {
        self.on_start = Rc::new(on_start);
        self
    }

    pub fn on_stop(mut self, on_stop: impl Fn() + 'static) -> Self {
        self.on_stop = Rc::new(on_stop);
        self
    }

    pub fn on_cancel(mut self, on_cancel: impl Fn() + 'static) -> Self {
        self.on_cancel = Rc::new(on_cancel);
        self
    }
}

impl Default for PressIndicatorCallbacks {
    fn default() -> Self {
        Self {
            on_start: Rc::new(|_| {}),
            on_stop: Rc::new(|| {}),
            on_cancel: Rc::new(|| {}),
        }
    }
}

impl fmt::Debug for PressIndicatorCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PressIndicatorCallbacks")
    }
}

#[derive(Debug, Default)]
pub struct PressIndicatorGestureFilter {
    callbacks: PressIndicatorCallbacks,
    config: PressIndicatorConfig,
    active: bool,
}

impl PressIndicatorGestureFilter {
    pub fn new(callbacks: PressIndicatorCallbacks) -> Self {
        Self {
            callbacks,
            config: PressIndicatorConfig::default(),
            active: false,
        }
    }

    pub fn with_config(mut self, config: PressIndicatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn set_callbacks(&mut self, callbacks: PressIndicatorCallbacks) {
        self.callbacks = callbacks;
    }

    pub fn config(&self) -> PressIndicatorConfig {
        self.config
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Disabling an active press cancels it right away, without waiting for
    /// the next pointer event.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.config.enabled == enabled {
            return;
        }
        self.config.enabled = enabled;
        if !enabled {
            self.cancel_press("disabled");
        }
    }

    pub fn set_claim_policy(&mut self, claim_policy: ClaimPolicy) {
        self.config.claim_policy = claim_policy;
    }

    fn try_start(&mut self, changes: ChangeBatch) -> ChangeBatch {
        let Some(position) = changes
            .iter()
            .find(|change| change.changed_to_down_ignore_consumed())
            .map(|change| change.current.position)
        else {
            return changes;
        };

        if !self.config.enabled {
            log::trace!("press ignored: filter disabled");
            return changes;
        }

        let already_claimed = any_down_change_consumed(&changes);
        if already_claimed && self.config.claim_policy == ClaimPolicy::Yield {
            log::debug!("press ignored: down already claimed");
            return changes;
        }

        self.active = true;
        log::debug!("press started at ({}, {})", position.x, position.y);
        (self.callbacks.on_start)(position);

        match self.config.claim_policy {
            ClaimPolicy::Yield => consume_down_changes(changes),
            ClaimPolicy::Share => changes,
        }
    }

    fn cancel_press(&mut self, reason: &str) {
        if !self.active {
            return;
        }
        self.active = false;
        log::debug!("press cancelled: {reason}");
        (self.callbacks.on_cancel)();
    }

    fn stop_press(&mut self) {
        self.active = false;
        log::debug!("press stopped");
        (self.callbacks.on_stop)();
    }

    fn cancel_reason(changes: &[PointerInputChange], bounds: Size) -> Option<&'static str> {
        if any_position_change_consumed(changes) {
            Some("movement consumed")
        } else if !all_pointers_in_bounds(changes, bounds) {
            Some("pointer left bounds")
        } else {
            None
        }
    }
}

impl PointerInputFilter for PressIndicatorGestureFilter {
    fn on_pointer_event(
        &mut self,
        changes: ChangeBatch,
        pass: PointerEventPass,
        bounds: Size,
    ) -> ChangeBatch {
        if changes.is_empty() {
            return changes;
        }

        match pass {
            PointerEventPass::InitialDown if !self.active => self.try_start(changes),
            PointerEventPass::PostUp if self.active => {
                if let Some(reason) = Self::cancel_reason(&changes, bounds) {
                    self.cancel_press(reason);
                } else if all_changed_to_up_ignore_consumed(&changes) {
                    self.stop_press();
                }
                changes
            }
            PointerEventPass::PostDown if self.active => {
                if any_position_change_consumed(&changes) {
                    self.cancel_press("movement consumed");
                }
                changes
            }
            _ => changes,
        }
    }

    fn on_cancel(&mut self) {
        self.cancel_press("cancelled by dispatcher");
    }

    fn debug_name(&self) -> &'static str {
        "PressIndicatorGestureFilter"
    }
}
