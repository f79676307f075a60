use cardstack_core::Vec2;
use web_time::{Duration, Instant};

use crate::CardDeck;
use crate::host::DeckHost;

/// Hold time before a press turns into a drag.
pub const LONG_PRESS_MIN_HOLD: Duration = Duration::from_millis(490);
/// Movement allowed before the hold elapses.
pub const PRESS_SLOP: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// One phase callback of a continuous gesture, location in content
/// coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureEvent {
    pub phase: GesturePhase,
    pub location: Vec2,
}

impl GestureEvent {
    pub fn new(phase: GesturePhase, location: Vec2) -> Self {
        Self { phase, location }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
    Down(Vec2),
    Move(Vec2),
    Up(Vec2),
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PressGesture {
    Tap(Vec2),
    LongPress(GestureEvent),
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum PressState {
    #[default]
    Idle,
    Pending {
        start: Instant,
        origin: Vec2,
    },
    Holding {
        last: Vec2,
    },
    /// Moved too far before the hold elapsed; ignore the rest of the press.
    Failed,
}

/// Tells taps from long presses for a single pointer.
///
/// Timestamps are passed in, so the host decides what "now" is. While a press
/// is pending the host should call [`poll`](Self::poll) every frame; that is
/// where a still pointer becomes a long press.
#[derive(Clone, Debug)]
pub struct PressRecognizer {
    min_hold: Duration,
    slop: f32,
    state: PressState,
}

impl Default for PressRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PressRecognizer {
    pub fn new() -> Self {
        Self {
            min_hold: LONG_PRESS_MIN_HOLD,
            slop: PRESS_SLOP,
            state: PressState::Idle,
        }
    }

    pub fn with_min_hold(mut self, min_hold: Duration) -> Self {
        self.min_hold = min_hold;
        self
    }

    pub fn is_holding(&self) -> bool {
        matches!(self.state, PressState::Holding { .. })
    }

    pub fn poll(&mut self, now: Instant) -> Option<PressGesture> {
        match self.state {
            PressState::Pending { start, origin }
                if now.saturating_duration_since(start) >= self.min_hold =>
            {
                self.state = PressState::Holding { last: origin };
                Some(PressGesture::LongPress(GestureEvent::new(
                    GesturePhase::Began,
                    origin,
                )))
            }
            _ => None,
        }
    }

    pub fn pointer(&mut self, input: PointerInput, now: Instant) -> Option<PressGesture> {
        match input {
            PointerInput::Down(p) => {
                self.state = PressState::Pending {
                    start: now,
                    origin: p,
                };
                None
            }
            PointerInput::Move(p) => match self.state {
                PressState::Pending { origin, .. } => {
                    if distance(origin, p) > self.slop {
                        self.state = PressState::Failed;
                        None
                    } else {
                        self.poll(now)
                    }
                }
                PressState::Holding { .. } => {
                    self.state = PressState::Holding { last: p };
                    Some(PressGesture::LongPress(GestureEvent::new(
                        GesturePhase::Changed,
                        p,
                    )))
                }
                PressState::Idle | PressState::Failed => None,
            },
            PointerInput::Up(p) => {
                let state = std::mem::take(&mut self.state);
                match state {
                    PressState::Pending { start, origin }
                        if now.saturating_duration_since(start) < self.min_hold
                            && distance(origin, p) <= self.slop =>
                    {
                        Some(PressGesture::Tap(p))
                    }
                    PressState::Holding { .. } => Some(PressGesture::LongPress(
                        GestureEvent::new(GesturePhase::Ended, p),
                    )),
                    _ => None,
                }
            }
            PointerInput::Cancel => match std::mem::take(&mut self.state) {
                PressState::Holding { last } => Some(PressGesture::LongPress(
                    GestureEvent::new(GesturePhase::Cancelled, last),
                )),
                _ => None,
            },
        }
    }
}

fn distance(a: Vec2, b: Vec2) -> f32 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

impl<H: DeckHost> CardDeck<H> {
    /// Routes a recognised press to tap handling or the reorder drag.
    pub fn handle_press(&mut self, gesture: PressGesture) {
        match gesture {
            PressGesture::Tap(p) => self.handle_tap(p),
            PressGesture::LongPress(event) => self.handle_long_press(event),
        }
    }
}
