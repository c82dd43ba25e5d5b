use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use presskit_ui::{
    ChangeBatch, ClaimPolicy, Point, PointerEventPass, PointerId, PointerInputEvent,
    PointerInputEventData, PointerInputEventProcessor, PointerInputFilter,
    PressIndicatorCallbacks, PressIndicatorConfig, PressIndicatorGestureFilter, Rect, RegionId,
    Size, TapGestureFilter,
};
use web_time::Duration;

/// Movement below this distance from the down position is still a press.
const DRAG_THRESHOLD: f32 = 8.0;
const FRAME: Duration = Duration::from_millis(16);

/// Claims all movement of a pointer once it travels past the touch slop,
/// the way a scroll container takes over a drag from its items.
#[derive(Default)]
struct TouchSlopFilter {
    down_positions: HashMap<PointerId, Point>,
    dragging: bool,
}

impl PointerInputFilter for TouchSlopFilter {
    fn on_pointer_event(
        &mut self,
        changes: ChangeBatch,
        pass: PointerEventPass,
        _bounds: Size,
    ) -> ChangeBatch {
        if pass != PointerEventPass::PostUp {
            return changes;
        }
        for change in &changes {
            if change.changed_to_down_ignore_consumed() {
                self.down_positions.insert(change.id, change.current.position);
            }
            if let Some(origin) = self.down_positions.get(&change.id) {
                let travelled = (change.current.position - *origin).distance();
                if !self.dragging && travelled > DRAG_THRESHOLD {
                    log::info!("pointer {} passed touch slop, scrolling", change.id);
                    self.dragging = true;
                }
            }
        }
        let claimed = if self.dragging {
            changes
                .into_iter()
                .map(|change| change.consume_all_position_change())
                .collect()
        } else {
            changes
        };
        for change in &claimed {
            if change.changed_to_up_ignore_consumed() {
                self.down_positions.remove(&change.id);
            }
        }
        if self.down_positions.is_empty() {
            self.dragging = false;
        }
        claimed
    }

    fn on_cancel(&mut self) {
        self.down_positions.clear();
        self.dragging = false;
    }

    fn debug_name(&self) -> &'static str {
        "TouchSlopFilter"
    }
}

/// A scroll container with one clickable row: a shared press indicator for
/// the highlight plus a tap for the action.
fn build_screen() -> anyhow::Result<(PointerInputEventProcessor, RegionId)> {
    let mut processor = PointerInputEventProcessor::new(Size::new(360.0, 640.0));
    let root = processor.regions().root();
    let regions = processor.regions_mut();

    let list = regions.add_region(root, Rect::new(0.0, 0.0, 360.0, 640.0))?;
    regions.add_filter(list, Rc::new(RefCell::new(TouchSlopFilter::default())))?;

    let row = regions.add_region(list, Rect::new(0.0, 100.0, 360.0, 56.0))?;
    let highlight = PressIndicatorGestureFilter::new(
        PressIndicatorCallbacks::new()
            .on_start(|at| log::info!("row highlight on at ({}, {})", at.x, at.y))
            .on_stop(|| log::info!("row highlight off"))
            .on_cancel(|| log::info!("row highlight cancelled")),
    )
    .with_config(PressIndicatorConfig::default().with_claim_policy(ClaimPolicy::Share));
    regions.add_filter_with_priority(row, Rc::new(RefCell::new(highlight)), 1)?;

    let tap = TapGestureFilter::builder()
        .on_tap(|| log::info!("row clicked"))
        .build()?;
    regions.add_filter(row, Rc::new(RefCell::new(tap)))?;

    Ok((processor, row))
}

struct Replay {
    processor: PointerInputEventProcessor,
    uptime: Duration,
}

impl Replay {
    fn send(&mut self, x: f32, y: f32, down: bool) {
        self.uptime += FRAME;
        let result = self.processor.process(PointerInputEvent::new(
            self.uptime,
            vec![PointerInputEventData::new(0, Point::new(x, y), down)],
        ));
        log::debug!(
            "frame at {:?}: dispatched={} movement_consumed={} change_consumed={}",
            self.uptime,
            result.dispatched_to_a_pointer_input_filter,
            result.any_movement_consumed,
            result.any_change_consumed
        );
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let (processor, row) = build_screen()?;
    let mut replay = Replay {
        processor,
        uptime: Duration::ZERO,
    };

    println!("=== Presskit gesture demo ===");

    println!("-- tap the row");
    replay.send(40.0, 120.0, true);
    replay.send(41.0, 121.0, true);
    replay.send(41.0, 121.0, false);

    println!("-- drag the list starting on the row");
    replay.send(40.0, 120.0, true);
    for step in 1..=4 {
        replay.send(40.0, 120.0 + step as f32 * 10.0, true);
    }
    replay.send(40.0, 160.0, false);

    println!("-- platform cancels mid press");
    replay.send(40.0, 120.0, true);
    replay.processor.process_cancel();

    println!("-- row removed mid press");
    replay.send(40.0, 120.0, true);
    replay.processor.remove_region(row)?;
    replay.send(40.0, 120.0, false);

    Ok(())
}
