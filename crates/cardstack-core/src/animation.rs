//! Timing descriptions handed to the host.
//!
//! The deck never drives animations itself. It attaches an [`AnimationSpec`]
//! to every visual change it requests and waits for the host to report the
//! transition finished. Hosts that render attributes directly can use
//! [`Interpolate`] to blend between two passes.

use crate::{Rect, Transform};
use web_time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    pub fn interpolate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSpec {
    pub duration: Duration,
    pub easing: Easing,
    pub delay: Duration,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::select()
    }
}

impl AnimationSpec {
    pub fn tween(duration: Duration, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            delay: Duration::ZERO,
        }
    }

    /// Apply immediately.
    pub fn instant() -> Self {
        Self::tween(Duration::ZERO, Easing::Linear)
    }

    /// Re-layout after a selection change.
    pub fn select() -> Self {
        Self::tween(Duration::from_millis(300), Easing::EaseInOut)
    }

    /// Snapshot pick-up at drag start.
    pub fn lift() -> Self {
        Self::tween(Duration::from_millis(200), Easing::EaseInOut)
    }

    /// Snapshot settling into its final cell at drag end.
    pub fn settle() -> Self {
        Self::tween(Duration::from_millis(200), Easing::EaseInOut)
    }

    /// Displaced cell making room for the dragged card.
    pub fn slide() -> Self {
        Self::tween(Duration::from_millis(200), Easing::EaseOut)
    }

    /// Half-turn between a card's faces.
    pub fn flip() -> Self {
        Self::tween(Duration::from_millis(500), Easing::EaseInOut)
    }

    /// Selected card released after a downward pan.
    pub fn dismiss() -> Self {
        Self::tween(Duration::from_millis(300), Easing::EaseInOut)
    }

    /// Eased progress `elapsed` into the animation, 0..=1.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if elapsed < self.delay {
            return 0.0;
        }
        let t = elapsed - self.delay;
        if self.duration.is_zero() || t >= self.duration {
            return 1.0;
        }
        self.easing
            .interpolate(t.as_secs_f32() / self.duration.as_secs_f32())
    }
}

pub trait Interpolate {
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for Rect {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        Rect {
            x: self.x.interpolate(&other.x, t),
            y: self.y.interpolate(&other.y, t),
            w: self.w.interpolate(&other.w, t),
            h: self.h.interpolate(&other.h, t),
        }
    }
}

impl Interpolate for Transform {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        Transform {
            translate_x: self.translate_x.interpolate(&other.translate_x, t),
            translate_y: self.translate_y.interpolate(&other.translate_y, t),
            scale_x: self.scale_x.interpolate(&other.scale_x, t),
            scale_y: self.scale_y.interpolate(&other.scale_y, t),
        }
    }
}
