use log::warn;

use crate::Pt;
use crate::frame::{MAX_TOUCH_POINTS, TouchFrame};
use crate::touch::TouchSample;

/// Platform action code of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    /// First pointer went down.
    Down,
    /// Pointers moved.
    Move,
    /// Last pointer went up.
    Up,
    /// An additional pointer went down.
    PointerDown,
    /// A pointer went up while others remain.
    PointerUp,
    /// The gesture was cancelled by the platform.
    Cancel,
}

/// What the platform event source can report, decided once at startup and
/// passed to the decoder's constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceCapability {
    /// Per-pointer coordinates and history are available.
    MultiTouch,
    /// Only the legacy single-pointer accessors work.
    SinglePointer,
}

/// One platform touch event: a current sample set plus optionally buffered
/// historical sub-frames recorded since the previous event.
///
/// Per-pointer accessors return `None` when the platform cannot supply the
/// value; the decoder then degrades to the infallible legacy single-pointer
/// accessors instead of failing.
pub trait TouchEventSource {
    fn action(&self) -> TouchAction;

    /// Monotonic event timestamp in milliseconds.
    fn event_time(&self) -> u64;

    fn pointer_count(&self) -> usize;

    /// Number of buffered historical sub-frames, oldest first.
    fn history_len(&self) -> usize {
        0
    }

    fn historical_event_time(&self, _hist: usize) -> u64 {
        self.event_time()
    }

    fn pointer_id(&self, idx: usize) -> Option<u64>;
    fn pointer_x(&self, idx: usize) -> Option<Pt>;
    fn pointer_y(&self, idx: usize) -> Option<Pt>;
    fn pointer_pressure(&self, idx: usize) -> Option<f32>;

    fn historical_x(&self, _idx: usize, _hist: usize) -> Option<Pt> {
        None
    }

    fn historical_y(&self, _idx: usize, _hist: usize) -> Option<Pt> {
        None
    }

    fn historical_pressure(&self, _idx: usize, _hist: usize) -> Option<f32> {
        None
    }

    /// Primary-pointer position, available on every platform.
    fn legacy_x(&self) -> Pt;
    fn legacy_y(&self) -> Pt;

    fn legacy_pressure(&self) -> f32 {
        1.0
    }

    fn legacy_historical_x(&self, _hist: usize) -> Pt {
        self.legacy_x()
    }

    fn legacy_historical_y(&self, _hist: usize) -> Pt {
        self.legacy_y()
    }

    fn legacy_historical_pressure(&self, _hist: usize) -> f32 {
        self.legacy_pressure()
    }
}

/// Expands platform events into ordered [`TouchFrame`] sequences: buffered
/// historical sub-frames first, then the current sample set. Performs no
/// gesture logic.
#[derive(Debug)]
pub struct EventDecoder {
    capability: SourceCapability,
    // Reusable per-decoder scratch, sized to the pointer limit.
    scratch: [TouchSample; MAX_TOUCH_POINTS],
}

impl EventDecoder {
    pub fn new(capability: SourceCapability) -> Self {
        Self {
            capability,
            scratch: [TouchSample::default(); MAX_TOUCH_POINTS],
        }
    }

    pub fn capability(&self) -> SourceCapability {
        self.capability
    }

    /// Decode one event, passing each produced frame to `sink` in temporal
    /// order. Never fails on input shape: unsupported events degrade to a
    /// single-pointer frame.
    pub fn decode<S: TouchEventSource>(&mut self, source: &S, mut sink: impl FnMut(TouchFrame)) {
        let pointer_count = match self.capability {
            SourceCapability::MultiTouch => source.pointer_count().clamp(1, MAX_TOUCH_POINTS),
            SourceCapability::SinglePointer => 1,
        };
        let action = source.action();
        let hist_len = source.history_len();
        let mut degraded = self.capability == SourceCapability::SinglePointer;

        for hist in 0..=hist_len {
            let processing_hist = hist < hist_len;

            // Single-pointer events go through the legacy accessors even on
            // capable platforms; per-pointer reads are only defined with two
            // or more pointers down.
            let count = if degraded || pointer_count == 1 {
                self.read_legacy(source, processing_hist, hist);
                1
            } else {
                match self.read_pointers(source, pointer_count, processing_hist, hist) {
                    Some(n) => n,
                    None => {
                        warn!("per-pointer read failed, degrading event to single pointer");
                        degraded = true;
                        self.read_legacy(source, processing_hist, hist);
                        1
                    }
                }
            };

            let down = if processing_hist {
                true
            } else {
                match action {
                    TouchAction::Up | TouchAction::Cancel => false,
                    TouchAction::PointerUp => count > 1,
                    _ => true,
                }
            };
            let time = if processing_hist {
                source.historical_event_time(hist)
            } else {
                source.event_time()
            };

            sink(TouchFrame::new(&self.scratch[..count], down, time));
        }
    }

    fn read_legacy<S: TouchEventSource>(&mut self, source: &S, processing_hist: bool, hist: usize) {
        self.scratch[0] = if processing_hist {
            TouchSample {
                id: 0,
                x: source.legacy_historical_x(hist),
                y: source.legacy_historical_y(hist),
                pressure: source.legacy_historical_pressure(hist),
            }
        } else {
            TouchSample {
                id: 0,
                x: source.legacy_x(),
                y: source.legacy_y(),
                pressure: source.legacy_pressure(),
            }
        };
    }

    fn read_pointers<S: TouchEventSource>(
        &mut self,
        source: &S,
        pointer_count: usize,
        processing_hist: bool,
        hist: usize,
    ) -> Option<usize> {
        for idx in 0..pointer_count {
            let id = source.pointer_id(idx)?;
            let (x, y, pressure) = if processing_hist {
                (
                    source.historical_x(idx, hist)?,
                    source.historical_y(idx, hist)?,
                    source.historical_pressure(idx, hist)?,
                )
            } else {
                (
                    source.pointer_x(idx)?,
                    source.pointer_y(idx)?,
                    source.pointer_pressure(idx)?,
                )
            };
            self.scratch[idx] = TouchSample { id, x, y, pressure };
        }
        Some(pointer_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeSource {
        action: TouchAction,
        time: u64,
        pointers: Vec<(u64, f32, f32)>,
        history: Vec<(u64, Vec<(f32, f32)>)>,
        per_pointer_supported: bool,
    }

    impl FakeSource {
        fn new(action: TouchAction, time: u64, pointers: &[(u64, f32, f32)]) -> Self {
            Self {
                action,
                time,
                pointers: pointers.to_vec(),
                history: Vec::new(),
                per_pointer_supported: true,
            }
        }
    }

    impl TouchEventSource for FakeSource {
        fn action(&self) -> TouchAction {
            self.action
        }

        fn event_time(&self) -> u64 {
            self.time
        }

        fn pointer_count(&self) -> usize {
            self.pointers.len()
        }

        fn history_len(&self) -> usize {
            self.history.len()
        }

        fn historical_event_time(&self, hist: usize) -> u64 {
            self.history[hist].0
        }

        fn pointer_id(&self, idx: usize) -> Option<u64> {
            if !self.per_pointer_supported {
                return None;
            }
            self.pointers.get(idx).map(|p| p.0)
        }

        fn pointer_x(&self, idx: usize) -> Option<Pt> {
            if !self.per_pointer_supported {
                return None;
            }
            self.pointers.get(idx).map(|p| Pt(p.1))
        }

        fn pointer_y(&self, idx: usize) -> Option<Pt> {
            if !self.per_pointer_supported {
                return None;
            }
            self.pointers.get(idx).map(|p| Pt(p.2))
        }

        fn pointer_pressure(&self, idx: usize) -> Option<f32> {
            if !self.per_pointer_supported {
                return None;
            }
            self.pointers.get(idx).map(|_| 1.0)
        }

        fn historical_x(&self, idx: usize, hist: usize) -> Option<Pt> {
            if !self.per_pointer_supported {
                return None;
            }
            self.history[hist].1.get(idx).map(|p| Pt(p.0))
        }

        fn historical_y(&self, idx: usize, hist: usize) -> Option<Pt> {
            if !self.per_pointer_supported {
                return None;
            }
            self.history[hist].1.get(idx).map(|p| Pt(p.1))
        }

        fn historical_pressure(&self, idx: usize, hist: usize) -> Option<f32> {
            if !self.per_pointer_supported {
                return None;
            }
            self.history[hist].1.get(idx).map(|_| 1.0)
        }

        fn legacy_x(&self) -> Pt {
            Pt(self.pointers[0].1)
        }

        fn legacy_y(&self) -> Pt {
            Pt(self.pointers[0].2)
        }
    }

    fn collect(decoder: &mut EventDecoder, source: &FakeSource) -> Vec<TouchFrame> {
        let mut frames = Vec::new();
        decoder.decode(source, |frame| frames.push(frame));
        frames
    }

    #[test]
    fn two_pointer_move_produces_one_multi_frame() {
        let mut decoder = EventDecoder::new(SourceCapability::MultiTouch);
        let source = FakeSource::new(
            TouchAction::Move,
            100,
            &[(0, 10.0, 20.0), (1, 30.0, 40.0)],
        );
        let frames = collect(&mut decoder, &source);
        assert_eq!(frames.len(), 1);
        assert!(frames[0].is_multi_touch());
        assert!(frames[0].is_down());
        assert_eq!(frames[0].event_time(), 100);
        assert_eq!(frames[0].samples()[1].id, 1);
        assert_eq!(frames[0].samples()[1].x, Pt(30.0));
    }

    #[test]
    fn up_and_cancel_clear_the_down_flag() {
        let mut decoder = EventDecoder::new(SourceCapability::MultiTouch);
        for action in [TouchAction::Up, TouchAction::Cancel] {
            let source = FakeSource::new(action, 5, &[(0, 1.0, 2.0)]);
            let frames = collect(&mut decoder, &source);
            assert!(!frames[0].is_down());
        }
    }

    #[test]
    fn pointer_up_stays_down_while_others_remain() {
        let mut decoder = EventDecoder::new(SourceCapability::MultiTouch);
        let source = FakeSource::new(
            TouchAction::PointerUp,
            5,
            &[(0, 1.0, 2.0), (1, 3.0, 4.0)],
        );
        let frames = collect(&mut decoder, &source);
        assert!(frames[0].is_down());

        let source = FakeSource::new(TouchAction::PointerUp, 5, &[(0, 1.0, 2.0)]);
        let frames = collect(&mut decoder, &source);
        assert!(!frames[0].is_down());
    }

    #[test]
    fn history_expands_oldest_first() {
        let mut decoder = EventDecoder::new(SourceCapability::MultiTouch);
        let mut source = FakeSource::new(
            TouchAction::Move,
            30,
            &[(0, 5.0, 5.0), (1, 9.0, 9.0)],
        );
        source.history = vec![
            (10, vec![(1.0, 1.0), (2.0, 2.0)]),
            (20, vec![(3.0, 3.0), (4.0, 4.0)]),
        ];
        let frames = collect(&mut decoder, &source);
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].event_time(), 10);
        assert_eq!(frames[1].event_time(), 20);
        assert_eq!(frames[2].event_time(), 30);
        assert!(frames[0].is_down());
        assert!(frames[1].is_down());
        assert_eq!(frames[0].samples()[0].x, Pt(1.0));
        assert_eq!(frames[1].samples()[1].x, Pt(4.0));
        assert_eq!(frames[2].samples()[0].x, Pt(5.0));
    }

    #[test]
    fn unsupported_per_pointer_reads_degrade_to_legacy() {
        let mut decoder = EventDecoder::new(SourceCapability::MultiTouch);
        let mut source = FakeSource::new(
            TouchAction::Move,
            7,
            &[(3, 11.0, 12.0), (4, 90.0, 90.0)],
        );
        source.per_pointer_supported = false;
        let frames = collect(&mut decoder, &source);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].touch_count(), 1);
        assert_eq!(frames[0].samples()[0].id, 0);
        assert_eq!(frames[0].samples()[0].x, Pt(11.0));
        assert!(frames[0].is_down());
    }

    #[test]
    fn single_pointer_capability_ignores_extra_pointers() {
        let mut decoder = EventDecoder::new(SourceCapability::SinglePointer);
        let source = FakeSource::new(
            TouchAction::Move,
            7,
            &[(0, 11.0, 12.0), (1, 90.0, 90.0)],
        );
        let frames = collect(&mut decoder, &source);
        assert_eq!(frames[0].touch_count(), 1);
        assert!(!frames[0].is_multi_touch());
    }
}
