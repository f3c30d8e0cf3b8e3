use std::cell::Cell;

use crate::Pt;
use crate::touch::TouchSample;

/// Upper bound on tracked pointers per frame.
pub const MAX_TOUCH_POINTS: usize = 20;

/// Immutable snapshot of every active touch sample at one instant, together
/// with lazily cached pinch metrics (midpoint, span, diameter, angle).
///
/// Only the first two samples participate in pinch math; extra fingers are
/// carried but ignored. The controller keeps two frames (current and
/// previous) and swaps them each step.
#[derive(Debug, Clone)]
pub struct TouchFrame {
    points: [TouchSample; MAX_TOUCH_POINTS],
    count: usize,

    // Midpoint of the first two samples (or the single sample).
    x_mid: Pt,
    y_mid: Pt,
    pressure_mid: f32,

    // Absolute per-axis span of the first two samples.
    dx: f32,
    dy: f32,

    down: bool,
    event_time: u64,

    // Computed on first access; frames are immutable so the cache is
    // per-snapshot.
    diameter_sq: Cell<Option<f32>>,
    diameter: Cell<Option<f32>>,
    angle: Cell<Option<f32>>,
}

impl Default for TouchFrame {
    fn default() -> Self {
        Self::new(&[], false, 0)
    }
}

impl TouchFrame {
    pub fn new(samples: &[TouchSample], down: bool, event_time: u64) -> Self {
        let count = samples.len().min(MAX_TOUCH_POINTS);
        let mut points = [TouchSample::default(); MAX_TOUCH_POINTS];
        points[..count].copy_from_slice(&samples[..count]);

        let (x_mid, y_mid, pressure_mid, dx, dy) = if count >= 2 {
            (
                points[0].x.mid(points[1].x),
                points[0].y.mid(points[1].y),
                (points[0].pressure + points[1].pressure) * 0.5,
                points[0].x.abs_delta(points[1].x),
                points[0].y.abs_delta(points[1].y),
            )
        } else if count == 1 {
            (points[0].x, points[0].y, points[0].pressure, 0.0, 0.0)
        } else {
            (Pt(0.0), Pt(0.0), 0.0, 0.0, 0.0)
        };

        Self {
            points,
            count,
            x_mid,
            y_mid,
            pressure_mid,
            dx,
            dy,
            down,
            event_time,
            diameter_sq: Cell::new(None),
            diameter: Cell::new(None),
            angle: Cell::new(None),
        }
    }

    pub fn samples(&self) -> &[TouchSample] {
        &self.points[..self.count]
    }

    pub fn touch_count(&self) -> usize {
        self.count
    }

    pub fn is_down(&self) -> bool {
        self.down
    }

    /// True when two or more pointers are present.
    pub fn is_multi_touch(&self) -> bool {
        self.count >= 2
    }

    pub fn event_time(&self) -> u64 {
        self.event_time
    }

    /// X of the single touch point, or the midpoint of the first two.
    pub fn x(&self) -> Pt {
        self.x_mid
    }

    /// Y of the single touch point, or the midpoint of the first two.
    pub fn y(&self) -> Pt {
        self.y_mid
    }

    /// Pressure of the single touch point, or the mean of the first two.
    pub fn pressure(&self) -> f32 {
        self.pressure_mid
    }

    /// Absolute x span between the first two touch points.
    pub fn multi_touch_width(&self) -> f32 {
        if self.is_multi_touch() { self.dx } else { 0.0 }
    }

    /// Absolute y span between the first two touch points.
    pub fn multi_touch_height(&self) -> f32 {
        if self.is_multi_touch() { self.dy } else { 0.0 }
    }

    /// Squared distance between the first two touch points.
    pub fn multi_touch_diameter_sq(&self) -> f32 {
        if let Some(v) = self.diameter_sq.get() {
            return v;
        }
        let v = if self.is_multi_touch() {
            self.dx * self.dx + self.dy * self.dy
        } else {
            0.0
        };
        self.diameter_sq.set(Some(v));
        v
    }

    /// Distance between the first two touch points, clamped to be at least
    /// as large as either axis span so downstream trig ratios stay valid.
    pub fn multi_touch_diameter(&self) -> f32 {
        if let Some(v) = self.diameter.get() {
            return v;
        }
        let v = if self.is_multi_touch() {
            self.multi_touch_diameter_sq()
                .sqrt()
                .max(self.dx)
                .max(self.dy)
        } else {
            0.0
        };
        self.diameter.set(Some(v));
        v
    }

    /// Angle of the line between the first two touch points, in radians.
    /// Zero for single-touch frames.
    pub fn multi_touch_angle(&self) -> f32 {
        if let Some(v) = self.angle.get() {
            return v;
        }
        if !self.is_multi_touch() {
            return 0.0;
        }
        let v = (self.points[1].y - self.points[0].y)
            .as_f32()
            .atan2((self.points[1].x - self.points[0].x).as_f32());
        self.angle.set(Some(v));
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: u64, x: f32, y: f32) -> TouchSample {
        TouchSample::new(id, Pt(x), Pt(y))
    }

    #[test]
    fn single_touch_metrics_are_zero() {
        let frame = TouchFrame::new(&[sample(0, 50.0, 60.0)], true, 10);
        assert!(!frame.is_multi_touch());
        assert_eq!(frame.x(), Pt(50.0));
        assert_eq!(frame.y(), Pt(60.0));
        assert_eq!(frame.multi_touch_width(), 0.0);
        assert_eq!(frame.multi_touch_height(), 0.0);
        assert_eq!(frame.multi_touch_diameter(), 0.0);
        assert_eq!(frame.multi_touch_angle(), 0.0);
    }

    #[test]
    fn midpoint_and_span() {
        let frame = TouchFrame::new(&[sample(0, 10.0, 20.0), sample(1, 30.0, 80.0)], true, 10);
        assert!(frame.is_multi_touch());
        assert_eq!(frame.x(), Pt(20.0));
        assert_eq!(frame.y(), Pt(50.0));
        assert_eq!(frame.multi_touch_width(), 20.0);
        assert_eq!(frame.multi_touch_height(), 60.0);
    }

    #[test]
    fn diameter_of_axis_aligned_pinch() {
        // Degenerate horizontal pinch: diameter must equal the span exactly.
        let frame = TouchFrame::new(&[sample(0, 0.0, 0.0), sample(1, 10.0, 0.0)], true, 0);
        assert_eq!(frame.multi_touch_diameter(), 10.0);
        assert_eq!(frame.multi_touch_angle(), 0.0);
    }

    #[test]
    fn diameter_never_below_axis_span() {
        let frame = TouchFrame::new(&[sample(0, 0.0, 0.0), sample(1, 3.0, 4.0)], true, 0);
        let d = frame.multi_touch_diameter();
        assert!((d - 5.0).abs() < 1e-4);
        assert!(d >= frame.multi_touch_width());
        assert!(d >= frame.multi_touch_height());
    }

    #[test]
    fn angle_uses_signed_deltas() {
        let frame = TouchFrame::new(&[sample(0, 0.0, 0.0), sample(1, 0.0, 10.0)], true, 0);
        assert!((frame.multi_touch_angle() - std::f32::consts::FRAC_PI_2).abs() < 1e-5);

        let frame = TouchFrame::new(&[sample(0, 0.0, 10.0), sample(1, 0.0, 0.0)], true, 0);
        assert!((frame.multi_touch_angle() + std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn extra_fingers_are_ignored_by_pinch_math() {
        let frame = TouchFrame::new(
            &[
                sample(0, 0.0, 0.0),
                sample(1, 10.0, 0.0),
                sample(2, 500.0, 500.0),
            ],
            true,
            0,
        );
        assert_eq!(frame.touch_count(), 3);
        assert_eq!(frame.x(), Pt(5.0));
        assert_eq!(frame.multi_touch_diameter(), 10.0);
    }

    #[test]
    fn truncates_to_max_touch_points() {
        let samples: Vec<TouchSample> = (0..30)
            .map(|i| sample(i as u64, i as f32, 0.0))
            .collect();
        let frame = TouchFrame::new(&samples, true, 0);
        assert_eq!(frame.touch_count(), MAX_TOUCH_POINTS);
    }
}
