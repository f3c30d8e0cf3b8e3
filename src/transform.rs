use crate::Pt;

/// Position, scale, and rotation of a manipulated object, with one flag per
/// optional component saying whether the current gesture updates it.
///
/// When a flag is off the corresponding getter returns the neutral value
/// (1.0 for scales, 0.0 for angle), so consumers never read a stale value
/// for a component the gesture does not touch. Stored scales are normalized
/// to 1.0 if set to exactly 0.0 to keep transforms non-degenerate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectTransform {
    x_off: Pt,
    y_off: Pt,
    scale: f32,
    scale_x: f32,
    scale_y: f32,
    angle: f32,
    update_scale: bool,
    update_scale_xy: bool,
    update_angle: bool,
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self {
            x_off: Pt(0.0),
            y_off: Pt(0.0),
            scale: 1.0,
            scale_x: 1.0,
            scale_y: 1.0,
            angle: 0.0,
            update_scale: false,
            update_scale_xy: false,
            update_angle: false,
        }
    }
}

fn normalize(scale: f32) -> f32 {
    if scale == 0.0 { 1.0 } else { scale }
}

impl ObjectTransform {
    /// Set position plus any of scale, anisotropic scale, and angle. A
    /// component whose update flag is false is frozen for the gesture; still
    /// pass its real value if the host reads it back (e.g. the angle of a
    /// dragged object while in resize-only mode).
    #[allow(clippy::too_many_arguments)]
    pub fn set(
        &mut self,
        x_off: Pt,
        y_off: Pt,
        update_scale: bool,
        scale: f32,
        update_scale_xy: bool,
        scale_x: f32,
        scale_y: f32,
        update_angle: bool,
        angle: f32,
    ) {
        self.x_off = x_off;
        self.y_off = y_off;
        self.update_scale = update_scale;
        self.scale = normalize(scale);
        self.update_scale_xy = update_scale_xy;
        self.scale_x = normalize(scale_x);
        self.scale_y = normalize(scale_y);
        self.update_angle = update_angle;
        self.angle = angle;
    }

    /// Overwrite the numeric fields without touching the update flags.
    pub(crate) fn set_values(
        &mut self,
        x_off: Pt,
        y_off: Pt,
        scale: f32,
        scale_x: f32,
        scale_y: f32,
        angle: f32,
    ) {
        self.x_off = x_off;
        self.y_off = y_off;
        self.scale = normalize(scale);
        self.scale_x = normalize(scale_x);
        self.scale_y = normalize(scale_y);
        self.angle = angle;
    }

    pub fn x_off(&self) -> Pt {
        self.x_off
    }

    pub fn y_off(&self) -> Pt {
        self.y_off
    }

    pub fn scale(&self) -> f32 {
        if self.update_scale { self.scale } else { 1.0 }
    }

    pub fn scale_x(&self) -> f32 {
        if self.update_scale_xy { self.scale_x } else { 1.0 }
    }

    pub fn scale_y(&self) -> f32 {
        if self.update_scale_xy { self.scale_y } else { 1.0 }
    }

    pub fn angle(&self) -> f32 {
        if self.update_angle { self.angle } else { 0.0 }
    }

    pub fn update_scale(&self) -> bool {
        self.update_scale
    }

    pub fn set_update_scale(&mut self, update: bool) {
        self.update_scale = update;
    }

    pub fn update_scale_xy(&self) -> bool {
        self.update_scale_xy
    }

    pub fn set_update_scale_xy(&mut self, update: bool) {
        self.update_scale_xy = update;
    }

    pub fn update_angle(&self) -> bool {
        self.update_angle
    }

    pub fn set_update_angle(&mut self, update: bool) {
        self.update_angle = update;
    }
}
