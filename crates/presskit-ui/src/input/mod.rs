pub mod hit_path_tracker;
pub mod pointer_input_event_processor;

pub use hit_path_tracker::HitPathTracker;
pub use pointer_input_event_processor::PointerInputEventProcessor;
