pub mod press_indicator;
pub mod tap;

pub use press_indicator::{
    ClaimPolicy, PressIndicatorCallbacks, PressIndicatorConfig, PressIndicatorGestureFilter,
};
pub use tap::{TapGestureBuilder, TapGestureConfig, TapGestureFilter};
