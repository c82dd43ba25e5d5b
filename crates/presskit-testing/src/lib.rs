//! Testing utilities and harness for Presskit

pub mod recorder;
pub mod robot;
pub mod robot_assertions;

pub use recorder::{CallbackRecorder, ConsumeMovementFilter, GestureCall, RecordedCall};
pub use robot::GestureRobot;
pub use robot_assertions::{assert_calls, assert_press_cycles_well_formed};

pub mod prelude {
    pub use crate::recorder::*;
    pub use crate::robot::*;
    pub use crate::robot_assertions::*;
}
