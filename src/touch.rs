use crate::Pt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

impl TouchPhase {
    pub(crate) fn from_winit(phase: winit::event::TouchPhase) -> Self {
        match phase {
            winit::event::TouchPhase::Started => TouchPhase::Started,
            winit::event::TouchPhase::Moved => TouchPhase::Moved,
            winit::event::TouchPhase::Ended => TouchPhase::Ended,
            winit::event::TouchPhase::Cancelled => TouchPhase::Cancelled,
        }
    }
}

/// One pointer's position and pressure inside a [`TouchFrame`](crate::TouchFrame).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSample {
    pub id: u64,
    pub x: Pt,
    pub y: Pt,
    pub pressure: f32,
}

impl TouchSample {
    pub fn new(id: u64, x: Pt, y: Pt) -> Self {
        Self {
            id,
            x,
            y,
            pressure: 1.0,
        }
    }
}

impl Default for TouchSample {
    fn default() -> Self {
        Self::new(0, Pt(0.0), Pt(0.0))
    }
}
