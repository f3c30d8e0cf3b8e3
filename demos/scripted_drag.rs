//! Headless walkthrough of a single-finger drag: an object is picked up
//! inside its body, dragged to the right, and released.

use touchgrip::{
    GestureController, ObjectBounds, ObjectHost, ObjectTransform, Pt, TouchFrame, TouchSample,
    UiMode,
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
            "object moved to ({}, {}) scale {:.3}",
            self.object.center_x(),
            self.object.center_y(),
            self.object.scale_x()
        );
        ok
    }

    fn select(&mut self, object: Option<&()>, _frame: &TouchFrame) {
        match object {
            Some(_) => println!("object selected"),
            None => println!("object released"),
        }
    }

    fn deselect_all(&mut self) {}

    fn canvas_touched(&mut self) {
        println!("canvas touched");
    }
}

fn finger(x: f32, y: f32, down: bool, t: u64) -> TouchFrame {
    TouchFrame::new(
        &[TouchSample::new(0, Pt::from(x), Pt::from(y))],
        down,
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
        .set_pos_values(Pt::from(300.0), Pt::from(300.0), 1.0, 1.0, 0.0);

    let mut controller = GestureController::new(true);

    controller.step(finger(300.0, 300.0, true, 0), &mut canvas);
    for i in 1..=10u64 {
        controller.step(finger(300.0 + 20.0 * i as f32, 300.0, true, i * 16), &mut canvas);
    }
    controller.step(finger(500.0, 300.0, false, 200), &mut canvas);

    Ok(())
}
