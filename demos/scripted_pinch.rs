//! Headless walkthrough of a two-finger pinch: a drag upgrades to a pinch
//! when the second finger lands, the object doubles in size as the fingers
//! spread, then both fingers lift.

use touchgrip::{
    GestureController, GestureMode, ObjectBounds, ObjectHost, ObjectTransform, Pt, TouchFrame,
    TouchSample, UiMode,
};

struct Canvas {
    object: ObjectBounds,
}

impl ObjectHost for Canvas {
    type Object = ();

    fn hit_test(&mut self, frame: &TouchFrame) -> Option<()> {
        self.object.contains_point(frame.x(), frame.y()).then_some(())
    }

    fn is_in_grab_area(&mut self, frame: &TouchFrame, _object: &()) -> bool {
        self.object.grab_area_contains_point(frame.x(), frame.y())
    }

    fn get_transform(&mut self, _object: &()) -> ObjectTransform {
        self.object.transform()
    }

    fn apply_transform(
        &mut self,
        _object: &(),
        transform: &ObjectTransform,
        _frame: &TouchFrame,
    ) -> bool {
        let ok = self.object.set_pos(transform);
        println!(
            "scale {:.3} angle {:.3} at ({}, {})",
            self.object.scale_x(),
            self.object.angle(),
            self.object.center_x(),
            self.object.center_y()
        );
        ok
    }

    fn select(&mut self, _object: Option<&()>, _frame: &TouchFrame) {}
    fn deselect_all(&mut self) {}
    fn canvas_touched(&mut self) {}
}

fn one(x: f32, y: f32, t: u64) -> TouchFrame {
    TouchFrame::new(&[TouchSample::new(0, Pt::from(x), Pt::from(y))], true, t)
}

fn two(x0: f32, x1: f32, y: f32, t: u64) -> TouchFrame {
    TouchFrame::new(
        &[
            TouchSample::new(0, Pt::from(x0), Pt::from(y)),
            TouchSample::new(1, Pt::from(x1), Pt::from(y)),
        ],
        true,
        t,
    )
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut canvas = Canvas {
        object: ObjectBounds::new(Pt::from(200.0), Pt::from(200.0), UiMode::ROTATE),
    };
    canvas
        .object
        .set_pos_values(Pt::from(400.0), Pt::from(300.0), 1.0, 1.0, 0.0);

    let mut controller = GestureController::new(true);

    controller.step(one(400.0, 300.0, 0), &mut canvas);
    controller.step(two(350.0, 450.0, 300.0, 16), &mut canvas);
    println!("mode after second finger: {:?}", controller.mode());
    assert_eq!(controller.mode(), GestureMode::Pinch);

    // Spread the fingers past the settle window; the diameter doubles.
    for i in 0..=10u64 {
        let spread = 50.0 + 5.0 * i as f32;
        controller.step(
            two(400.0 - spread, 400.0 + spread, 300.0, 48 + i * 16),
            &mut canvas,
        );
    }

    controller.step(TouchFrame::new(&[], false, 300), &mut canvas);
    println!("mode after release: {:?}", controller.mode());

    Ok(())
}
