use std::cell::RefCell;
use std::rc::Rc;

use presskit_ui_graphics::Size;

use super::types::{ChangeBatch, PointerEventPass};

/// A stateful recognizer driven once per pass by the dispatcher.
///
/// The batch is moved in and must be handed back, with any consumption the
/// filter wants downstream filters to see. Filters never fail: input they do
/// not understand is returned untouched.
pub trait PointerInputFilter {
    fn on_pointer_event(
        &mut self,
        changes: ChangeBatch,
        pass: PointerEventPass,
        bounds: Size,
    ) -> ChangeBatch;

    /// The gesture was taken away by the framework (an ancestor claimed it,
    /// the region was removed, the platform cancelled the stream).
    fn on_cancel(&mut self);

    fn debug_name(&self) -> &'static str {
        "PointerInputFilter"
    }
}

/// Shared handle the owning layer keeps to reconfigure a filter while the
/// dispatcher holds it for routing.
pub type PointerInputFilterHandle = Rc<RefCell<dyn PointerInputFilter>>;
