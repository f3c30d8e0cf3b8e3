use crate::Pt;
use crate::transform::ObjectTransform;

/// Side length of the square resize/rotate handle anchored at an object's
/// bottom-right corner, in logical pixels.
pub const GRAB_AREA_SIZE: f32 = 40.0;

/// Which optional transform components a host session manipulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiMode {
    pub rotate: bool,
    pub anisotropic_scale: bool,
}

impl UiMode {
    pub const ROTATE: UiMode = UiMode {
        rotate: true,
        anisotropic_scale: false,
    };

    pub const ANISOTROPIC_SCALE: UiMode = UiMode {
        rotate: false,
        anisotropic_scale: true,
    };
}

/// Screen-space placement of a manipulable object: center, per-axis scale,
/// rotation, and the derived axis-aligned bounds plus grab-handle box.
///
/// Hosts can embed this to answer hit tests and transform queries; list
/// management and drawing stay on the host side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectBounds {
    width: Pt,
    height: Pt,

    center_x: Pt,
    center_y: Pt,
    scale_x: f32,
    scale_y: f32,
    angle: f32,

    min_x: Pt,
    max_x: Pt,
    min_y: Pt,
    max_y: Pt,

    grab_x1: Pt,
    grab_y1: Pt,
    grab_x2: Pt,
    grab_y2: Pt,

    ui_mode: UiMode,
}

impl ObjectBounds {
    pub fn new(width: Pt, height: Pt, ui_mode: UiMode) -> Self {
        let mut bounds = Self {
            width,
            height,
            center_x: Pt(0.0),
            center_y: Pt(0.0),
            scale_x: 1.0,
            scale_y: 1.0,
            angle: 0.0,
            min_x: Pt(0.0),
            max_x: Pt(0.0),
            min_y: Pt(0.0),
            max_y: Pt(0.0),
            grab_x1: Pt(0.0),
            grab_y1: Pt(0.0),
            grab_x2: Pt(0.0),
            grab_y2: Pt(0.0),
            ui_mode,
        };
        bounds.set_pos_values(Pt(0.0), Pt(0.0), 1.0, 1.0, 0.0);
        bounds
    }

    /// Apply a proposed transform, honoring the UI mode: anisotropic mode
    /// reads the per-axis scales, otherwise both axes take the uniform scale.
    pub fn set_pos(&mut self, transform: &ObjectTransform) -> bool {
        let scale_x = if self.ui_mode.anisotropic_scale {
            transform.scale_x()
        } else {
            transform.scale()
        };
        let scale_y = if self.ui_mode.anisotropic_scale {
            transform.scale_y()
        } else {
            transform.scale()
        };
        self.set_pos_values(
            transform.x_off(),
            transform.y_off(),
            scale_x,
            scale_y,
            transform.angle(),
        )
    }

    /// Place the object and recompute its bounds and grab-handle box.
    pub fn set_pos_values(
        &mut self,
        center_x: Pt,
        center_y: Pt,
        scale_x: f32,
        scale_y: f32,
        angle: f32,
    ) -> bool {
        let ws = (self.width / 2.0) * scale_x;
        let hs = (self.height / 2.0) * scale_y;

        self.min_x = center_x - ws;
        self.min_y = center_y - hs;
        self.max_x = center_x + ws;
        self.max_y = center_y + hs;

        self.grab_x1 = self.max_x - Pt(GRAB_AREA_SIZE);
        self.grab_y1 = self.max_y - Pt(GRAB_AREA_SIZE);
        self.grab_x2 = self.max_x;
        self.grab_y2 = self.max_y;

        self.center_x = center_x;
        self.center_y = center_y;
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self.angle = angle;

        true
    }

    /// Build the answer to a host's transform query: uniform scale is the
    /// mean of the axis scales, and the update flags mirror the UI mode.
    pub fn transform(&self) -> ObjectTransform {
        let mut t = ObjectTransform::default();
        t.set(
            self.center_x,
            self.center_y,
            !self.ui_mode.anisotropic_scale,
            (self.scale_x + self.scale_y) / 2.0,
            self.ui_mode.anisotropic_scale,
            self.scale_x,
            self.scale_y,
            self.ui_mode.rotate,
            self.angle,
        );
        t
    }

    pub fn contains_point(&self, x: Pt, y: Pt) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    pub fn grab_area_contains_point(&self, x: Pt, y: Pt) -> bool {
        x >= self.grab_x1 && x <= self.grab_x2 && y >= self.grab_y1 && y <= self.grab_y2
    }

    pub fn ui_mode(&self) -> UiMode {
        self.ui_mode
    }

    pub fn set_ui_mode(&mut self, ui_mode: UiMode) {
        self.ui_mode = ui_mode;
    }

    pub fn width(&self) -> Pt {
        self.width
    }

    pub fn height(&self) -> Pt {
        self.height
    }

    pub fn center_x(&self) -> Pt {
        self.center_x
    }

    pub fn center_y(&self) -> Pt {
        self.center_y
    }

    pub fn scale_x(&self) -> f32 {
        self.scale_x
    }

    pub fn scale_y(&self) -> f32 {
        self.scale_y
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn min_x(&self) -> Pt {
        self.min_x
    }

    pub fn max_x(&self) -> Pt {
        self.max_x
    }

    pub fn min_y(&self) -> Pt {
        self.min_y
    }

    pub fn max_y(&self) -> Pt {
        self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_follow_center_and_scale() {
        let mut obj = ObjectBounds::new(Pt(200.0), Pt(100.0), UiMode::ROTATE);
        obj.set_pos_values(Pt(300.0), Pt(200.0), 1.0, 1.0, 0.0);
        assert_eq!(obj.min_x(), Pt(200.0));
        assert_eq!(obj.max_x(), Pt(400.0));
        assert_eq!(obj.min_y(), Pt(150.0));
        assert_eq!(obj.max_y(), Pt(250.0));

        obj.set_pos_values(Pt(300.0), Pt(200.0), 2.0, 2.0, 0.0);
        assert_eq!(obj.min_x(), Pt(100.0));
        assert_eq!(obj.max_x(), Pt(500.0));
    }

    #[test]
    fn containment() {
        let mut obj = ObjectBounds::new(Pt(100.0), Pt(100.0), UiMode::ROTATE);
        obj.set_pos_values(Pt(100.0), Pt(100.0), 1.0, 1.0, 0.0);
        assert!(obj.contains_point(Pt(100.0), Pt(100.0)));
        assert!(obj.contains_point(Pt(50.0), Pt(50.0)));
        assert!(!obj.contains_point(Pt(49.0), Pt(100.0)));
    }

    #[test]
    fn grab_box_hugs_max_corner() {
        let mut obj = ObjectBounds::new(Pt(100.0), Pt(100.0), UiMode::ROTATE);
        obj.set_pos_values(Pt(100.0), Pt(100.0), 1.0, 1.0, 0.0);
        assert!(obj.grab_area_contains_point(Pt(150.0), Pt(150.0)));
        assert!(obj.grab_area_contains_point(Pt(111.0), Pt(111.0)));
        assert!(!obj.grab_area_contains_point(Pt(109.0), Pt(109.0)));
    }

    #[test]
    fn transform_flags_mirror_ui_mode() {
        let obj = ObjectBounds::new(Pt(10.0), Pt(10.0), UiMode::ROTATE);
        let t = obj.transform();
        assert!(t.update_scale());
        assert!(!t.update_scale_xy());
        assert!(t.update_angle());

        let obj = ObjectBounds::new(Pt(10.0), Pt(10.0), UiMode::ANISOTROPIC_SCALE);
        let t = obj.transform();
        assert!(!t.update_scale());
        assert!(t.update_scale_xy());
        assert!(!t.update_angle());
    }

    #[test]
    fn set_pos_uses_uniform_scale_outside_anisotropic_mode() {
        let mut obj = ObjectBounds::new(Pt(100.0), Pt(100.0), UiMode::ROTATE);
        let mut t = ObjectTransform::default();
        t.set(Pt(0.0), Pt(0.0), true, 2.0, false, 9.0, 9.0, true, 0.0);
        obj.set_pos(&t);
        assert_eq!(obj.scale_x(), 2.0);
        assert_eq!(obj.scale_y(), 2.0);
    }
}
