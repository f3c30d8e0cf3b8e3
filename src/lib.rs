//! Touchgrip - multi-touch gesture recognition for draggable canvas objects.
//!
//! Interprets raw touch-event streams and turns them into incremental
//! transform updates (translate, scale, rotate) on a single manipulated
//! object. The caller supplies hit testing and persistence through the
//! [`ObjectHost`] trait; the controller supplies gesture semantics:
//! single-finger drag, single-finger grab-handle resize, and two-finger
//! pinch with settle and jitter handling.
//!
//! # Example
//! ```
//! use touchgrip::{
//!     GestureController, ObjectBounds, ObjectHost, ObjectTransform, Pt, TouchFrame,
//!     TouchSample, UiMode,
//! };
//!
//! struct Canvas {
//!     object: ObjectBounds,
//! }
//!
//! impl ObjectHost for Canvas {
//!     type Object = ();
//!
//!     fn hit_test(&mut self, frame: &TouchFrame) -> Option<()> {
//!         self.object.contains_point(frame.x(), frame.y()).then_some(())
//!     }
//!
//!     fn is_in_grab_area(&mut self, frame: &TouchFrame, _object: &()) -> bool {
//!         self.object.grab_area_contains_point(frame.x(), frame.y())
//!     }
//!
//!     fn get_transform(&mut self, _object: &()) -> ObjectTransform {
//!         self.object.transform()
//!     }
//!
//!     fn apply_transform(
//!         &mut self,
//!         _object: &(),
//!         transform: &ObjectTransform,
//!         _frame: &TouchFrame,
//!     ) -> bool {
//!         self.object.set_pos(transform)
//!     }
//!
//!     fn select(&mut self, _object: Option<&()>, _frame: &TouchFrame) {}
//!     fn deselect_all(&mut self) {}
//!     fn canvas_touched(&mut self) {}
//! }
//!
//! let mut canvas = Canvas {
//!     object: ObjectBounds::new(Pt::from(100.0), Pt::from(100.0), UiMode::ROTATE),
//! };
//! canvas
//!     .object
//!     .set_pos_values(Pt::from(100.0), Pt::from(100.0), 1.0, 1.0, 0.0);
//!
//! let mut controller = GestureController::new(true);
//! let down = TouchFrame::new(
//!     &[TouchSample::new(0, Pt::from(100.0), Pt::from(100.0))],
//!     true,
//!     0,
//! );
//! let dragged = TouchFrame::new(
//!     &[TouchSample::new(0, Pt::from(150.0), Pt::from(100.0))],
//!     true,
//!     16,
//! );
//! controller.step(down, &mut canvas);
//! controller.step(dragged, &mut canvas);
//! assert_eq!(canvas.object.center_x(), Pt::from(150.0));
//! ```

mod aggregator;
mod controller;
mod decoder;
mod frame;
mod host;
mod object;
mod pt;
mod touch;
mod transform;

pub use aggregator::{TouchAggregator, TouchDelivery};
pub use controller::{GestureController, GestureMode};
pub use decoder::{EventDecoder, SourceCapability, TouchAction, TouchEventSource};
pub use frame::{MAX_TOUCH_POINTS, TouchFrame};
pub use host::ObjectHost;
pub use object::{GRAB_AREA_SIZE, ObjectBounds, UiMode};
pub use pt::Pt;
pub use touch::{TouchPhase, TouchSample};
pub use transform::ObjectTransform;
