use std::time::Instant;

use crate::Pt;
use crate::decoder::{TouchAction, TouchEventSource};
use crate::touch::{TouchPhase, TouchSample};

/// Accumulates per-pointer state across individual `winit` touch deliveries
/// (winit reports one pointer per event) and exposes each delivery as a
/// whole-frame [`TouchEventSource`] for the decoder.
#[derive(Debug)]
pub struct TouchAggregator {
    touches: Vec<TouchSample>,
    epoch: Instant,
}

impl Default for TouchAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchAggregator {
    pub fn new() -> Self {
        Self {
            touches: Vec::new(),
            epoch: Instant::now(),
        }
    }

    /// Fold one winit touch event into the tracked pointer set and return
    /// the resulting whole-frame delivery. `scale_factor` converts physical
    /// to logical pixels.
    pub fn on_touch(&mut self, touch: &winit::event::Touch, scale_factor: f64) -> TouchDelivery {
        let x = Pt::from_physical_px(touch.location.x, scale_factor);
        let y = Pt::from_physical_px(touch.location.y, scale_factor);
        let pressure = touch
            .force
            .map(|force| force.normalized() as f32)
            .unwrap_or(1.0);
        self.apply(touch.id, x, y, pressure, TouchPhase::from_winit(touch.phase))
    }

    pub(crate) fn apply(
        &mut self,
        id: u64,
        x: Pt,
        y: Pt,
        pressure: f32,
        phase: TouchPhase,
    ) -> TouchDelivery {
        let sample = TouchSample { id, x, y, pressure };
        let action = match phase {
            TouchPhase::Started => {
                // Guard against duplicate ids from a restarted pointer.
                self.touches.retain(|t| t.id != id);
                let action = if self.touches.is_empty() {
                    TouchAction::Down
                } else {
                    TouchAction::PointerDown
                };
                self.touches.push(sample);
                action
            }
            TouchPhase::Moved => {
                if let Some(t) = self.touches.iter_mut().find(|t| t.id == id) {
                    *t = sample;
                } else {
                    self.touches.push(sample);
                }
                TouchAction::Move
            }
            TouchPhase::Ended => {
                if let Some(t) = self.touches.iter_mut().find(|t| t.id == id) {
                    *t = sample;
                }
                if self.touches.len() <= 1 {
                    TouchAction::Up
                } else {
                    TouchAction::PointerUp
                }
            }
            TouchPhase::Cancelled => TouchAction::Cancel,
        };

        // The departing pointer stays in this delivery's snapshot; it is
        // dropped from tracking afterwards.
        let delivery = TouchDelivery {
            action,
            time: self.epoch.elapsed().as_millis() as u64,
            samples: self.touches.clone(),
        };
        if matches!(phase, TouchPhase::Ended | TouchPhase::Cancelled) {
            self.touches.retain(|t| t.id != id);
        }
        delivery
    }

    /// Pointers currently tracked as down.
    pub fn active_touches(&self) -> &[TouchSample] {
        &self.touches
    }
}

/// One aggregated winit delivery: a full sample snapshot plus the action it
/// carried. winit does not batch history, so `history_len` is zero.
#[derive(Debug, Clone)]
pub struct TouchDelivery {
    action: TouchAction,
    time: u64,
    samples: Vec<TouchSample>,
}

impl TouchEventSource for TouchDelivery {
    fn action(&self) -> TouchAction {
        self.action
    }

    fn event_time(&self) -> u64 {
        self.time
    }

    fn pointer_count(&self) -> usize {
        self.samples.len().max(1)
    }

    fn pointer_id(&self, idx: usize) -> Option<u64> {
        self.samples.get(idx).map(|s| s.id)
    }

    fn pointer_x(&self, idx: usize) -> Option<Pt> {
        self.samples.get(idx).map(|s| s.x)
    }

    fn pointer_y(&self, idx: usize) -> Option<Pt> {
        self.samples.get(idx).map(|s| s.y)
    }

    fn pointer_pressure(&self, idx: usize) -> Option<f32> {
        self.samples.get(idx).map(|s| s.pressure)
    }

    fn legacy_x(&self) -> Pt {
        self.samples.first().map(|s| s.x).unwrap_or(Pt(0.0))
    }

    fn legacy_y(&self) -> Pt {
        self.samples.first().map(|s| s.y).unwrap_or(Pt(0.0))
    }

    fn legacy_pressure(&self) -> f32 {
        self.samples.first().map(|s| s.pressure).unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(agg: &mut TouchAggregator, id: u64, x: f32, y: f32) -> TouchDelivery {
        agg.apply(id, Pt(x), Pt(y), 1.0, TouchPhase::Started)
    }

    fn drag(agg: &mut TouchAggregator, id: u64, x: f32, y: f32) -> TouchDelivery {
        agg.apply(id, Pt(x), Pt(y), 1.0, TouchPhase::Moved)
    }

    fn lift(agg: &mut TouchAggregator, id: u64, x: f32, y: f32) -> TouchDelivery {
        agg.apply(id, Pt(x), Pt(y), 1.0, TouchPhase::Ended)
    }

    #[test]
    fn first_press_is_down_second_is_pointer_down() {
        let mut agg = TouchAggregator::new();
        let d = press(&mut agg, 7, 10.0, 10.0);
        assert_eq!(d.action(), TouchAction::Down);
        assert_eq!(d.pointer_count(), 1);

        let d = press(&mut agg, 8, 50.0, 50.0);
        assert_eq!(d.action(), TouchAction::PointerDown);
        assert_eq!(d.pointer_count(), 2);
        assert_eq!(d.pointer_id(0), Some(7));
        assert_eq!(d.pointer_id(1), Some(8));
    }

    #[test]
    fn move_updates_in_place() {
        let mut agg = TouchAggregator::new();
        press(&mut agg, 7, 10.0, 10.0);
        press(&mut agg, 8, 50.0, 50.0);
        let d = drag(&mut agg, 7, 20.0, 20.0);
        assert_eq!(d.action(), TouchAction::Move);
        assert_eq!(d.pointer_x(0), Some(Pt(20.0)));
        assert_eq!(d.pointer_x(1), Some(Pt(50.0)));
    }

    #[test]
    fn lift_keeps_departing_pointer_in_snapshot() {
        let mut agg = TouchAggregator::new();
        press(&mut agg, 7, 10.0, 10.0);
        press(&mut agg, 8, 50.0, 50.0);

        let d = lift(&mut agg, 8, 50.0, 50.0);
        assert_eq!(d.action(), TouchAction::PointerUp);
        assert_eq!(d.pointer_count(), 2);
        assert_eq!(agg.active_touches().len(), 1);

        let d = lift(&mut agg, 7, 10.0, 10.0);
        assert_eq!(d.action(), TouchAction::Up);
        assert!(agg.active_touches().is_empty());
    }

    #[test]
    fn duplicate_start_replaces_stale_pointer() {
        let mut agg = TouchAggregator::new();
        press(&mut agg, 7, 10.0, 10.0);
        let d = press(&mut agg, 7, 30.0, 30.0);
        assert_eq!(d.action(), TouchAction::Down);
        assert_eq!(d.pointer_count(), 1);
        assert_eq!(d.pointer_x(0), Some(Pt(30.0)));
    }

    #[test]
    fn event_times_are_monotonic() {
        let mut agg = TouchAggregator::new();
        let a = press(&mut agg, 1, 0.0, 0.0);
        let b = drag(&mut agg, 1, 1.0, 1.0);
        assert!(b.event_time() >= a.event_time());
    }
}
