//! Scrolling the deck while a dragged card is held near the top or bottom.
//!
//! The host runs a frame timer only while [`Autoscroll::Running`]; each frame
//! it calls [`CardDeck::autoscroll_tick`] with the frame duration.

use cardstack_core::{DeckConfig, Vec2, ViewportGeometry};
use web_time::Duration;

use crate::CardDeck;
use crate::drag::DragPhase;
use crate::host::DeckHost;

/// Scroll speed, in points per second, with the pointer at the far edge of a
/// trigger zone.
pub const MAX_AUTOSCROLL_SPEED: f32 = 600.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Autoscroll {
    #[default]
    Idle,
    Running(ScrollDirection),
}

impl Autoscroll {
    pub fn direction(&self) -> Option<ScrollDirection> {
        match *self {
            Autoscroll::Idle => None,
            Autoscroll::Running(d) => Some(d),
        }
    }

    pub fn is_running(&self) -> bool {
        self.direction().is_some()
    }
}

fn down_zone_start(config: &DeckConfig, viewport: &ViewportGeometry) -> f32 {
    viewport.visible_max_y()
        - config.space_at_bottom()
        - viewport.content_inset.bottom
        - config.scroll_area_bottom()
}

/// Which trigger zone, if any, content y `y` is in. Bottom wins when they
/// overlap.
pub fn trigger_zone(
    config: &DeckConfig,
    viewport: &ViewportGeometry,
    y: f32,
) -> Option<ScrollDirection> {
    if y > down_zone_start(config, viewport) {
        Some(ScrollDirection::Down)
    } else if y - viewport.offset_top() < config.scroll_area_top() {
        Some(ScrollDirection::Up)
    } else {
        None
    }
}

/// Points per second, ramping linearly with how deep `y` is in the zone.
pub fn scroll_speed(
    config: &DeckConfig,
    viewport: &ViewportGeometry,
    direction: ScrollDirection,
    y: f32,
) -> f32 {
    let (zone, depth) = match direction {
        ScrollDirection::Up => {
            let zone = config.scroll_area_top();
            (zone, zone - (y - viewport.offset_top()))
        }
        ScrollDirection::Down => (
            config.scroll_area_bottom(),
            y - down_zone_start(config, viewport),
        ),
    };
    if zone <= 0.0 {
        return 0.0;
    }
    MAX_AUTOSCROLL_SPEED * depth.clamp(0.0, zone) / zone
}

/// Content offset after scrolling `distance` (rounded to whole points),
/// clamped to the scrollable range.
pub fn next_offset(viewport: &ViewportGeometry, direction: ScrollDirection, distance: f32) -> f32 {
    let distance = distance.round();
    let (min, max) = viewport.scroll_range();
    let y = viewport.content_offset.y;
    match direction {
        ScrollDirection::Up => (y - distance).max(min),
        ScrollDirection::Down => (y + distance).min(max),
    }
}

impl<H: DeckHost> CardDeck<H> {
    pub fn autoscroll(&self) -> Autoscroll {
        self.autoscroll
    }

    pub(crate) fn update_autoscroll(&mut self, y: f32) {
        let viewport = self.viewport();
        match trigger_zone(&self.config, &viewport, y) {
            Some(direction) => self.start_autoscroll(direction),
            None => self.stop_autoscroll(),
        }
    }

    fn start_autoscroll(&mut self, direction: ScrollDirection) {
        match self.autoscroll {
            Autoscroll::Running(d) if d == direction => return,
            Autoscroll::Running(_) => {}
            Autoscroll::Idle => self.host.start_frame_timer(),
        }
        log::debug!("autoscroll {direction:?}");
        self.autoscroll = Autoscroll::Running(direction);
    }

    pub(crate) fn stop_autoscroll(&mut self) {
        if self.autoscroll.is_running() {
            self.host.stop_frame_timer();
            self.autoscroll = Autoscroll::Idle;
        }
    }

    /// One frame of autoscroll. Moves the content, then re-evaluates the drag
    /// as if the pointer had moved by the same amount.
    pub fn autoscroll_tick(&mut self, dt: Duration) {
        let Autoscroll::Running(direction) = self.autoscroll else {
            return;
        };
        let location = match &self.drag {
            DragPhase::Dragging(session) => Some(session.location),
            _ => None,
        };
        let Some(location) = location else {
            self.stop_autoscroll();
            return;
        };

        let viewport = self.viewport();
        let speed = scroll_speed(&self.config, &viewport, direction, location.y);
        let target = next_offset(&viewport, direction, speed * dt.as_secs_f32());
        let applied = target - viewport.content_offset.y;
        if applied != 0.0 {
            self.host.set_content_offset(Vec2::new(viewport.content_offset.x, target));
        }
        self.drag_moved(Vec2::new(location.x, location.y + applied));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gestures::GesturePhase;
    use crate::testing::*;
    use cardstack_core::{EdgeInsets, Size};
    use proptest::prelude::*;

    fn viewport(offset: f32) -> ViewportGeometry {
        ViewportGeometry::new(Size::new(320.0, 1000.0), 40)
            .with_content_size(Size::new(320.0, 3200.0))
            .with_offset(offset)
    }

    #[test]
    fn zones_follow_offset_and_insets() {
        let c = DeckConfig::default();
        let vp = viewport(500.0);
        assert_eq!(trigger_zone(&c, &vp, 1390.0), Some(ScrollDirection::Down));
        assert_eq!(trigger_zone(&c, &vp, 1380.0), None);
        assert_eq!(trigger_zone(&c, &vp, 610.0), Some(ScrollDirection::Up));
        assert_eq!(trigger_zone(&c, &vp, 620.0), None);

        let vp = vp.with_insets(EdgeInsets::new(30.0, 0.0, 40.0, 0.0));
        assert_eq!(trigger_zone(&c, &vp, 1350.0), Some(ScrollDirection::Down));
        assert_eq!(trigger_zone(&c, &vp, 640.0), Some(ScrollDirection::Up));
    }

    #[test]
    fn speed_ramps_with_depth() {
        let c = DeckConfig::default();
        let vp = viewport(0.0);
        assert_eq!(scroll_speed(&c, &vp, ScrollDirection::Down, 880.0), 0.0);
        assert_eq!(scroll_speed(&c, &vp, ScrollDirection::Down, 940.0), 300.0);
        assert_eq!(scroll_speed(&c, &vp, ScrollDirection::Down, 2000.0), 600.0);
        assert_eq!(scroll_speed(&c, &vp, ScrollDirection::Up, 0.0), 600.0);
        assert_eq!(scroll_speed(&c, &vp, ScrollDirection::Up, 90.0), 150.0);

        let mut flat = c.clone();
        flat.set_scroll_area_top(0.0);
        assert_eq!(scroll_speed(&flat, &vp, ScrollDirection::Up, -10.0), 0.0);
    }

    #[test]
    fn offset_is_clamped_to_scroll_range() {
        let vp = viewport(2190.0);
        assert_eq!(next_offset(&vp, ScrollDirection::Down, 4.4), 2194.0);
        assert_eq!(next_offset(&vp, ScrollDirection::Down, 20.0), 2200.0);

        let vp = viewport(5.0).with_insets(EdgeInsets::new(20.0, 0.0, 0.0, 0.0));
        assert_eq!(next_offset(&vp, ScrollDirection::Up, 10.0), -5.0);
        assert_eq!(next_offset(&vp, ScrollDirection::Up, 60.0), -20.0);
    }

    proptest! {
        #[test]
        fn next_offset_stays_in_range(offset in 0.0f32..2200.0, distance in 0.0f32..5000.0, up in any::<bool>()) {
            let vp = viewport(offset);
            let (min, max) = vp.scroll_range();
            let direction = if up { ScrollDirection::Up } else { ScrollDirection::Down };
            let next = next_offset(&vp, direction, distance);
            prop_assert!(next >= min && next <= max);
            match direction {
                ScrollDirection::Up => prop_assert!(next <= offset),
                ScrollDirection::Down => prop_assert!(next >= offset),
            }
        }
    }

    #[test]
    fn tick_scrolls_and_keeps_swapping() {
        init_logging();
        let mut deck = deck(40);
        deck.handle_long_press(press(GesturePhase::Began, 280.0));
        deck.handle_long_press(press(GesturePhase::Changed, 940.0));
        assert_eq!(deck.autoscroll().direction(), Some(ScrollDirection::Down));
        assert!(deck.host().timer_running);

        // 300 pt/s for 0.1 s
        deck.autoscroll_tick(Duration::from_millis(100));
        assert_eq!(deck.host().offset, 30.0);
        let session = deck.drag_phase().session().expect("still dragging");
        assert_eq!(session.location.y, 970.0);
        assert_eq!(session.moving_index, 12);
    }

    #[test]
    fn leaving_the_zone_stops_the_timer() {
        let mut deck = deck(40);
        deck.handle_long_press(press(GesturePhase::Began, 280.0));
        deck.handle_long_press(press(GesturePhase::Changed, 940.0));
        deck.handle_long_press(press(GesturePhase::Changed, 500.0));
        assert_eq!(deck.autoscroll(), Autoscroll::Idle);
        assert!(!deck.host().timer_running);

        let starts = deck
            .host()
            .calls()
            .into_iter()
            .filter(|c| *c == HostCall::TimerStarted)
            .count();
        assert_eq!(starts, 1);
    }

    #[test]
    fn tick_without_drag_stops() {
        let mut deck = deck(40);
        deck.autoscroll_tick(Duration::from_millis(16));
        assert_eq!(deck.autoscroll(), Autoscroll::Idle);
        assert!(deck.host().calls().is_empty());
    }
}
