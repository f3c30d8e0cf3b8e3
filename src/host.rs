use crate::frame::TouchFrame;
use crate::transform::ObjectTransform;

/// Surface the [`GestureController`](crate::GestureController) manipulates
/// objects through. The host owns hit testing, object storage, and
/// persistence; the controller only ever holds the opaque `Object` handle it
/// got back from [`hit_test`](ObjectHost::hit_test).
pub trait ObjectHost {
    /// Opaque handle to one manipulable object.
    type Object: Clone;

    /// Topmost draggable object under the frame's representative touch
    /// point, or `None` to leave the touch unclaimed.
    fn hit_test(&mut self, frame: &TouchFrame) -> Option<Self::Object>;

    /// Whether the point falls inside the object's resize/rotate handle.
    /// Returning `true` routes the gesture into single-finger grab-resize
    /// instead of translate.
    fn is_in_grab_area(&mut self, frame: &TouchFrame, object: &Self::Object) -> bool;

    /// Current transform of the object. The update flags on the returned
    /// value declare which of scale / anisotropic scale / angle the host
    /// wants driven for this session.
    fn get_transform(&mut self, object: &Self::Object) -> ObjectTransform;

    /// Commit a proposed transform. Return `false` if it is out of range;
    /// the controller drops the proposal and retries from the unchanged
    /// anchor on the next frame.
    fn apply_transform(
        &mut self,
        object: &Self::Object,
        transform: &ObjectTransform,
        frame: &TouchFrame,
    ) -> bool;

    /// Selection change notification. Called with `Some` when the first
    /// touch point claims an object (bring-to-front etc.), and with `None`
    /// when the gesture ends.
    fn select(&mut self, object: Option<&Self::Object>, frame: &TouchFrame);

    /// Clear any existing selection before a new object is claimed.
    fn deselect_all(&mut self);

    /// The canvas was touched without a pointer going down on it.
    fn canvas_touched(&mut self);
}
