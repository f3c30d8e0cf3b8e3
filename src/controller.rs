use log::trace;

use crate::Pt;
use crate::decoder::{EventDecoder, SourceCapability, TouchEventSource};
use crate::frame::TouchFrame;
use crate::host::ObjectHost;
use crate::transform::ObjectTransform;

/// Window after a finger-count change during which motion only re-anchors.
pub(crate) const EVENT_SETTLE_INTERVAL_MS: u64 = 20;
/// Midpoint jump beyond this is treated as sensor noise.
const MAX_MULTITOUCH_POS_JUMP: f32 = 30.0;
/// Span jump beyond this is treated as sensor noise.
const MAX_MULTITOUCH_DIM_JUMP: f32 = 40.0;
/// Floor applied to pinch width/height/diameter so anchor ratios stay finite.
const MIN_MULTITOUCH_SEPARATION: f32 = 30.0;
/// Movement below this (with unchanged scale) is jitter, not a drag.
const DRAG_THRESHOLD: f32 = 3.0;
/// Per-frame scale increment for single-finger grab resize.
const GRAB_SCALE_STEP: f32 = 0.04;
/// Grab resize never proposes a scale below this.
const GRAB_SCALE_FLOOR: f32 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureMode {
    /// No gesture in progress.
    Idle,
    /// Single-finger translate of the selected object.
    Drag,
    /// Two-finger pinch: translate plus scale/rotate.
    Pinch,
    /// Single-finger resize via the object's grab handle.
    Grab,
}

/// Gesture state machine. Feed it [`TouchFrame`]s in event-time order via
/// [`step`](GestureController::step) (or whole platform events via
/// [`handle_event`](GestureController::handle_event)) and it drives the
/// selected object through the [`ObjectHost`] callbacks.
#[derive(Debug)]
pub struct GestureController<H: ObjectHost> {
    mode: GestureMode,
    selected: Option<H::Object>,

    current: TouchFrame,
    previous: TouchFrame,

    /// Last transform fetched from or proposed to the host.
    scratch: ObjectTransform,

    // Fields extracted from the current frame, honoring the scratch
    // transform's update flags.
    ext_x: f32,
    ext_y: f32,
    ext_diam: f32,
    ext_width: f32,
    ext_height: f32,
    ext_angle: f32,

    // Object-space anchor point and the screen-to-object ratios recorded
    // when the gesture last (re)anchored.
    start_pos_x: f32,
    start_pos_y: f32,
    start_scale_over_pinch_diam: f32,
    start_scale_x_over_pinch_width: f32,
    start_scale_y_over_pinch_height: f32,
    start_angle_minus_pinch_angle: f32,

    settle_start: u64,
    settle_end: u64,

    /// Whether movement has crossed `DRAG_THRESHOLD` since the gesture
    /// began. Latches on and stays set for the rest of the gesture.
    drag_occurred: bool,

    /// Whether to consume single-touch events before any multi-touch starts;
    /// if false, they are passed back to the caller while idle.
    handle_single_touch: bool,
}

impl<H: ObjectHost> Default for GestureController<H> {
    fn default() -> Self {
        Self::new(true)
    }
}

impl<H: ObjectHost> GestureController<H> {
    pub fn new(handle_single_touch: bool) -> Self {
        Self {
            mode: GestureMode::Idle,
            selected: None,
            current: TouchFrame::default(),
            previous: TouchFrame::default(),
            scratch: ObjectTransform::default(),
            ext_x: 0.0,
            ext_y: 0.0,
            ext_diam: 0.0,
            ext_width: 0.0,
            ext_height: 0.0,
            ext_angle: 0.0,
            start_pos_x: 0.0,
            start_pos_y: 0.0,
            start_scale_over_pinch_diam: 0.0,
            start_scale_x_over_pinch_width: 0.0,
            start_scale_y_over_pinch_height: 0.0,
            start_angle_minus_pinch_angle: 0.0,
            settle_start: 0,
            settle_end: 0,
            drag_occurred: false,
            handle_single_touch,
        }
    }

    pub fn mode(&self) -> GestureMode {
        self.mode
    }

    pub fn drag_occurred(&self) -> bool {
        self.drag_occurred
    }

    pub fn selected(&self) -> Option<&H::Object> {
        self.selected.as_ref()
    }

    pub fn handle_single_touch(&self) -> bool {
        self.handle_single_touch
    }

    pub fn set_handle_single_touch(&mut self, handle: bool) {
        self.handle_single_touch = handle;
    }

    /// Decode one platform event and step every produced frame. Returns
    /// false, leaving the event for the caller, only for initial
    /// single-touch events when those are configured to pass through.
    pub fn handle_event<S: TouchEventSource>(
        &mut self,
        decoder: &mut EventDecoder,
        source: &S,
        host: &mut H,
    ) -> bool {
        let pointer_count = match decoder.capability() {
            SourceCapability::MultiTouch => source.pointer_count().max(1),
            SourceCapability::SinglePointer => 1,
        };
        if self.mode == GestureMode::Idle && !self.handle_single_touch && pointer_count == 1 {
            return false;
        }
        decoder.decode(source, |frame| {
            self.step(frame, host);
        });
        true
    }

    /// Advance the state machine by one frame. Frames must arrive in
    /// non-decreasing event-time order.
    pub fn step(&mut self, frame: TouchFrame, host: &mut H) -> bool {
        if self.mode == GestureMode::Idle
            && !self.handle_single_touch
            && frame.touch_count() == 1
        {
            return false;
        }
        std::mem::swap(&mut self.previous, &mut self.current);
        self.current = frame;
        self.run(host);
        true
    }

    fn set_mode(&mut self, mode: GestureMode) {
        trace!("gesture mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
    }

    fn open_settle_window(&mut self) {
        self.settle_start = self.current.event_time();
        self.settle_end = self.settle_start + EVENT_SETTLE_INTERVAL_MS;
    }

    fn end_gesture(&mut self, host: &mut H) {
        self.set_mode(GestureMode::Idle);
        self.selected = None;
        host.select(None, &self.current);
        self.drag_occurred = false;
    }

    fn run(&mut self, host: &mut H) {
        match self.mode {
            GestureMode::Idle => {
                if self.current.is_down() {
                    self.selected = host.hit_test(&self.current);
                    if let Some(object) = self.selected.clone() {
                        host.deselect_all();
                        if host.is_in_grab_area(&self.current, &object) {
                            self.set_mode(GestureMode::Grab);
                        } else {
                            self.set_mode(GestureMode::Drag);
                        }
                        host.select(Some(&object), &self.current);
                        self.anchor_at_this_position_and_scale(host);
                        // A single finger going down produces no settle
                        // noise; the window is empty.
                        self.settle_start = self.current.event_time();
                        self.settle_end = self.settle_start;
                    }
                } else {
                    host.canvas_touched();
                }
            }

            GestureMode::Grab => {
                if !self.current.is_down() {
                    self.end_gesture(host);
                } else {
                    self.perform_drag_or_pinch(host);
                }
            }

            GestureMode::Drag => {
                if !self.current.is_down() {
                    self.end_gesture(host);
                } else if self.current.is_multi_touch() {
                    // Second finger just landed: restart around the new
                    // midpoint and let the sensor settle.
                    self.set_mode(GestureMode::Pinch);
                    self.anchor_at_this_position_and_scale(host);
                    self.open_settle_window();
                } else if self.current.event_time() < self.settle_end {
                    // If finger 2 stayed down while finger 1 lifted, point 1
                    // now maps to finger 2; restart from the new position.
                    self.anchor_at_this_position_and_scale(host);
                } else {
                    self.perform_drag_or_pinch(host);
                }
            }

            GestureMode::Pinch => {
                if !self.current.is_multi_touch() || !self.current.is_down() {
                    if !self.current.is_down() {
                        self.end_gesture(host);
                    } else {
                        // One finger remains: downgrade to a drag.
                        self.set_mode(GestureMode::Drag);
                        self.anchor_at_this_position_and_scale(host);
                        self.open_settle_window();
                    }
                } else if self.current.x().abs_delta(self.previous.x())
                    > MAX_MULTITOUCH_POS_JUMP
                    || self.current.y().abs_delta(self.previous.y()) > MAX_MULTITOUCH_POS_JUMP
                    || (self.current.multi_touch_width() - self.previous.multi_touch_width())
                        .abs()
                        * 0.5
                        > MAX_MULTITOUCH_DIM_JUMP
                    || (self.current.multi_touch_height() - self.previous.multi_touch_height())
                        .abs()
                        * 0.5
                        > MAX_MULTITOUCH_DIM_JUMP
                {
                    // Jumped too far, probably event noise.
                    self.anchor_at_this_position_and_scale(host);
                    self.open_settle_window();
                } else if self.current.event_time() < self.settle_end {
                    self.anchor_at_this_position_and_scale(host);
                } else {
                    self.perform_drag_or_pinch(host);
                }
            }
        }
    }

    /// Read the current frame's midpoint/span/diameter/angle, substituting
    /// zero for components the scratch transform does not update and
    /// flooring the pinch dimensions so anchor ratios stay well-defined.
    fn extract_current_frame(&mut self) {
        self.ext_x = self.current.x().as_f32();
        self.ext_y = self.current.y().as_f32();
        self.ext_diam = (MIN_MULTITOUCH_SEPARATION * 0.71).max(if self.scratch.update_scale() {
            self.current.multi_touch_diameter()
        } else {
            0.0
        });
        self.ext_width = MIN_MULTITOUCH_SEPARATION.max(if self.scratch.update_scale_xy() {
            self.current.multi_touch_width()
        } else {
            0.0
        });
        self.ext_height = MIN_MULTITOUCH_SEPARATION.max(if self.scratch.update_scale_xy() {
            self.current.multi_touch_height()
        } else {
            0.0
        });
        self.ext_angle = if self.scratch.update_angle() {
            self.current.multi_touch_angle()
        } else {
            0.0
        };
    }

    /// Record the object-space anchor point and screen-to-object ratios for
    /// the current frame. No-op while nothing is selected.
    fn anchor_at_this_position_and_scale(&mut self, host: &mut H) {
        let Some(object) = self.selected.clone() else {
            return;
        };
        self.scratch = host.get_transform(&object);

        let scale = self.scratch.scale();
        let curr_scale_inv = 1.0 / if scale == 0.0 { 1.0 } else { scale };
        self.extract_current_frame();
        self.start_pos_x = (self.ext_x - self.scratch.x_off().as_f32()) * curr_scale_inv;
        self.start_pos_y = (self.ext_y - self.scratch.y_off().as_f32()) * curr_scale_inv;
        self.start_scale_over_pinch_diam = self.scratch.scale() / self.ext_diam;
        self.start_scale_x_over_pinch_width = self.scratch.scale_x() / self.ext_width;
        self.start_scale_y_over_pinch_height = self.scratch.scale_y() / self.ext_height;
        self.start_angle_minus_pinch_angle = self.scratch.angle() - self.ext_angle;
    }

    /// Extrapolate a new transform from the anchor and the current frame and
    /// propose it to the host.
    fn perform_drag_or_pinch(&mut self, host: &mut H) {
        let Some(object) = self.selected.clone() else {
            return;
        };

        let scale = self.scratch.scale();
        let curr_scale = if scale == 0.0 { 1.0 } else { scale };
        self.extract_current_frame();
        let new_pos_x = self.ext_x - self.start_pos_x * curr_scale;
        let new_pos_y = self.ext_y - self.start_pos_y * curr_scale;

        let delta_x = (self.current.x() - self.previous.x()).as_f32();
        let delta_y = (self.current.y() - self.previous.y()).as_f32();

        let new_scale = if self.mode == GestureMode::Grab {
            // No pinch reference with one finger on the handle; step the
            // scale by the sign of the latest screen delta.
            let stepped = if delta_x < 0.0 || delta_y < 0.0 {
                self.scratch.scale() - GRAB_SCALE_STEP
            } else {
                self.scratch.scale() + GRAB_SCALE_STEP
            };
            if stepped < GRAB_SCALE_FLOOR {
                return;
            }
            stepped
        } else {
            self.start_scale_over_pinch_diam * self.ext_diam
        };

        if !self.drag_occurred && !self.past_threshold(delta_x.abs(), delta_y.abs(), new_scale) {
            return;
        }

        let new_scale_x = self.start_scale_x_over_pinch_width * self.ext_width;
        let new_scale_y = self.start_scale_y_over_pinch_height * self.ext_height;
        let new_angle = self.start_angle_minus_pinch_angle + self.ext_angle;

        self.scratch.set_values(
            Pt::from(new_pos_x),
            Pt::from(new_pos_y),
            new_scale,
            new_scale_x,
            new_scale_y,
            new_angle,
        );

        if !host.apply_transform(&object, &self.scratch, &self.current) {
            // Out of range for the host; the next frame retries from the
            // unchanged anchor.
            trace!("transform proposal rejected by host");
        }
        self.drag_occurred = true;
    }

    /// Jitter gate: movement below the threshold with unchanged scale is a
    /// finger resting on the object, not a drag.
    fn past_threshold(&mut self, delta_x: f32, delta_y: f32, new_scale: f32) -> bool {
        if delta_x < DRAG_THRESHOLD && delta_y < DRAG_THRESHOLD {
            if new_scale == self.scratch.scale() {
                self.drag_occurred = false;
                return false;
            }
        }
        self.drag_occurred = true;
        true
    }
}
