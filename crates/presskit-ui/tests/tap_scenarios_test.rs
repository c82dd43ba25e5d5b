//! Tap filter behaviour through the processor, alone and next to other
//! filters sharing the same pointers.

use std::cell::RefCell;
use std::rc::Rc;

use presskit_testing::{
    assert_calls, assert_press_cycles_well_formed, CallbackRecorder, ConsumeMovementFilter,
    GestureCall, GestureRobot,
};
use presskit_ui::{
    ClaimPolicy, Point, PointerEventPass, PressIndicatorConfig, PressIndicatorGestureFilter, Rect,
    Size, TapGestureConfig, TapGestureFilter,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn tap_filter(recorder: &CallbackRecorder, label: &'static str) -> Rc<RefCell<TapGestureFilter>> {
    Rc::new(RefCell::new(TapGestureFilter::new(recorder.tap_callback(label))))
}

fn robot() -> GestureRobot {
    init_logging();
    GestureRobot::new(Size::new(300.0, 300.0))
}

#[test]
fn click_fires_tap_once() {
    let recorder = CallbackRecorder::new();
    let mut robot = robot();
    let button = robot.add_region(Rect::new(10.0, 10.0, 80.0, 40.0));
    let tap = tap_filter(&recorder, "tap");
    robot.add_filter(button, tap.clone());

    let down = robot.pointer_down(0, 20.0, 20.0);
    assert!(tap.borrow().is_active());
    assert!(down.any_change_consumed);
    assert!(recorder.is_empty());

    let up = robot.pointer_up(0);
    assert!(up.any_change_consumed);
    assert_calls(&recorder, "tap", &[GestureCall::Tap]);
}

#[test]
fn consumed_drag_suppresses_tap() {
    let recorder = CallbackRecorder::new();
    let mut robot = robot();
    let list = robot.add_region(Rect::new(0.0, 0.0, 300.0, 300.0));
    robot.add_filter(
        list,
        Rc::new(RefCell::new(ConsumeMovementFilter::new(PointerEventPass::PostUp))),
    );
    let row = robot.add_child_region(list, Rect::new(0.0, 0.0, 300.0, 50.0));
    robot.add_filter(row, tap_filter(&recorder, "row"));

    robot.drag(Point::new(10.0, 10.0), Point::new(10.0, 30.0), 3);

    assert!(recorder.is_empty());
}

#[test]
fn unconsumed_drag_inside_still_taps() {
    let recorder = CallbackRecorder::new();
    let mut robot = robot();
    let button = robot.add_region(Rect::new(0.0, 0.0, 100.0, 100.0));
    robot.add_filter(button, tap_filter(&recorder, "tap"));

    robot.drag(Point::new(10.0, 10.0), Point::new(50.0, 50.0), 4);

    assert_calls(&recorder, "tap", &[GestureCall::Tap]);
}

#[test]
fn dragging_out_of_bounds_abandons_tap() {
    let recorder = CallbackRecorder::new();
    let mut robot = robot();
    let button = robot.add_region(Rect::new(0.0, 0.0, 50.0, 50.0));
    robot.add_filter(button, tap_filter(&recorder, "tap"));

    robot.pointer_down(0, 10.0, 10.0);
    robot.pointer_move(0, 100.0, 100.0);
    robot.pointer_move(0, 10.0, 10.0);
    robot.pointer_up(0);

    assert!(recorder.is_empty());
}

#[test]
fn inner_tap_claims_press_from_outer_tap() {
    let recorder = CallbackRecorder::new();
    let mut robot = robot();
    let card = robot.add_region(Rect::new(0.0, 0.0, 200.0, 200.0));
    robot.add_filter(card, tap_filter(&recorder, "card"));
    let button = robot.add_child_region(card, Rect::new(10.0, 10.0, 50.0, 50.0));
    robot.add_filter(button, tap_filter(&recorder, "button"));

    robot.click_at(20.0, 20.0);
    robot.click_at(150.0, 150.0);

    assert_calls(&recorder, "button", &[GestureCall::Tap]);
    assert_calls(&recorder, "card", &[GestureCall::Tap]);
}

#[test]
fn lockstep_two_finger_tap_fires_once() {
    let recorder = CallbackRecorder::new();
    let mut robot = robot();
    let surface = robot.add_region(Rect::new(0.0, 0.0, 200.0, 200.0));
    robot.add_filter(surface, tap_filter(&recorder, "tap"));

    robot.press_all(&[(0, Point::new(10.0, 10.0)), (1, Point::new(60.0, 60.0))]);
    robot.release_all(&[0, 1]);

    assert_calls(&recorder, "tap", &[GestureCall::Tap]);
}

#[test]
fn platform_cancel_disarms_tap() {
    let recorder = CallbackRecorder::new();
    let mut robot = robot();
    let button = robot.add_region(Rect::new(0.0, 0.0, 100.0, 100.0));
    let tap = tap_filter(&recorder, "tap");
    robot.add_filter(button, tap.clone());

    robot.pointer_down(0, 10.0, 10.0);
    robot.cancel();

    assert!(!tap.borrow().is_active());
    robot.click_at(10.0, 10.0);
    assert_calls(&recorder, "tap", &[GestureCall::Tap]);
}

#[test]
fn press_indicator_claim_blocks_tap_by_default() {
    let recorder = CallbackRecorder::new();
    let mut robot = robot();
    let button = robot.add_region(Rect::new(0.0, 0.0, 100.0, 100.0));
    robot.add_filter(
        button,
        Rc::new(RefCell::new(PressIndicatorGestureFilter::new(
            recorder.press_callbacks("press"),
        ))),
    );
    robot.add_filter(button, tap_filter(&recorder, "tap"));

    robot.click_at(10.0, 10.0);

    assert_calls(
        &recorder,
        "press",
        &[
            GestureCall::PressStart(Point::new(10.0, 10.0)),
            GestureCall::PressStop,
        ],
    );
    assert!(recorder.calls_for("tap").is_empty());
}

#[test]
fn shared_press_indicator_and_tap_form_a_clickable() {
    let recorder = CallbackRecorder::new();
    let mut robot = robot();
    let button = robot.add_region(Rect::new(0.0, 0.0, 100.0, 100.0));
    let press = PressIndicatorGestureFilter::new(recorder.press_callbacks("press"))
        .with_config(PressIndicatorConfig::default().with_claim_policy(ClaimPolicy::Share));
    robot.add_filter_with_priority(button, Rc::new(RefCell::new(press)), 1);
    robot.add_filter(button, tap_filter(&recorder, "tap"));

    robot.click_at(10.0, 10.0);

    let labelled: Vec<(&str, GestureCall)> = recorder
        .calls()
        .into_iter()
        .map(|recorded| (recorded.label, recorded.call))
        .collect();
    assert_eq!(
        labelled,
        vec![
            ("press", GestureCall::PressStart(Point::new(10.0, 10.0))),
            ("press", GestureCall::PressStop),
            ("tap", GestureCall::Tap),
        ]
    );
}

#[test]
fn sibling_priority_decides_which_press_indicator_wins() {
    let recorder = CallbackRecorder::new();
    let mut robot = robot();
    let region = robot.add_region(Rect::new(0.0, 0.0, 100.0, 100.0));
    robot.add_filter_with_priority(
        region,
        Rc::new(RefCell::new(PressIndicatorGestureFilter::new(
            recorder.press_callbacks("low"),
        ))),
        0,
    );
    robot.add_filter_with_priority(
        region,
        Rc::new(RefCell::new(PressIndicatorGestureFilter::new(
            recorder.press_callbacks("high"),
        ))),
        10,
    );

    robot.click_at(5.0, 5.0);

    assert!(recorder.calls_for("low").is_empty());
    assert_calls(
        &recorder,
        "high",
        &[
            GestureCall::PressStart(Point::new(5.0, 5.0)),
            GestureCall::PressStop,
        ],
    );
}

#[test]
fn outer_press_claims_down_before_inner_tap_arms() {
    let recorder = CallbackRecorder::new();
    let mut robot = robot();
    let outer = robot.add_region(Rect::new(0.0, 0.0, 200.0, 200.0));
    robot.add_filter(
        outer,
        Rc::new(RefCell::new(PressIndicatorGestureFilter::new(
            recorder.press_callbacks("outer"),
        ))),
    );
    let inner = robot.add_child_region(outer, Rect::new(0.0, 0.0, 50.0, 50.0));
    let tap = TapGestureFilter::new(recorder.tap_callback("inner"))
        .with_config(TapGestureConfig::default().with_consume_down_on_start(false));
    robot.add_filter(inner, Rc::new(RefCell::new(tap)));

    robot.click_at(10.0, 10.0);

    // The outer press starts on InitialDown, before the tap ever sees the
    // down, so the tap never arms.
    assert!(recorder.calls_for("inner").is_empty());
    assert_press_cycles_well_formed(&recorder.calls_for("outer"));
    assert_eq!(recorder.count("outer", GestureCall::PressStop), 1);
}

#[test]
fn lost_pointer_disarms_tap_until_next_down() {
    let recorder = CallbackRecorder::new();
    let mut robot = robot();
    let button = robot.add_region(Rect::new(0.0, 0.0, 100.0, 100.0));
    let tap = tap_filter(&recorder, "tap");
    robot.add_filter(button, tap.clone());

    robot.pointer_down(0, 10.0, 10.0);
    robot.lose_pointer(0);
    assert!(!tap.borrow().is_active());
    assert!(recorder.is_empty());

    robot.click_at(10.0, 10.0);
    assert_calls(&recorder, "tap", &[GestureCall::Tap]);
}

#[test]
fn reconfigured_tap_uses_new_callback_and_config() {
    let recorder = CallbackRecorder::new();
    let mut robot = robot();
    let button = robot.add_region(Rect::new(0.0, 0.0, 100.0, 100.0));
    let tap = tap_filter(&recorder, "before");
    robot.add_filter(button, tap.clone());

    tap.borrow_mut().set_on_tap(recorder.tap_callback("after"));
    tap.borrow_mut()
        .set_config(TapGestureConfig::default().with_consume_down_on_start(false));
    let down = robot.pointer_down(0, 10.0, 10.0);
    robot.pointer_up(0);

    assert!(!down.any_change_consumed);
    assert!(recorder.calls_for("before").is_empty());
    assert_calls(&recorder, "after", &[GestureCall::Tap]);
}
