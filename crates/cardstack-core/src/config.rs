//! # Deck configuration
//!
//! Every option has a getter and a clamping setter. A setter never rejects a
//! value: anything outside the documented bounds is stored as the nearest
//! bound, e.g. `set_card_head_height(5.0)` stores `20.0`.
//!
//! Setters report what the host has to redo through [`Invalidation`]:
//!
//! ```rust
//! use cardstack_core::*;
//!
//! let mut cfg = DeckConfig::default();
//! assert_eq!(cfg.set_bottom_number_of_stacked_cards(15), Invalidation::RELOAD);
//! assert_eq!(cfg.bottom_number_of_stacked_cards(), 10);
//! assert!(cfg.set_scroll_area_top(-4.0).is_empty());
//! assert_eq!(cfg.scroll_area_top(), 0.0);
//! ```

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

pub const MIN_CARD_HEAD_HEIGHT: f32 = 20.0;
pub const MAX_BOTTOM_STACKED_CARDS: usize = 10;
pub const MAX_BOTTOM_CARD_LOOKOUT_MARGIN: f32 = 20.0;

bitflags! {
    /// Work the host must schedule after a state or configuration change.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Invalidation: u8 {
        /// Recompute attributes (`CardDeck::prepare`).
        const LAYOUT = 1 << 0;
        /// Item order or set changed; discard cached attributes and cells.
        const RELOAD = 1 << 1;
        /// Interpolate visuals to the new attributes instead of jumping.
        const ANIMATED = 1 << 2;
    }
}

impl Invalidation {
    pub const ANIMATED_LAYOUT: Invalidation =
        Invalidation::LAYOUT.union(Invalidation::ANIMATED);
    pub const ANIMATED_RELOAD: Invalidation =
        Invalidation::RELOAD.union(Invalidation::ANIMATED);
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeckConfig {
    card_head_height: f32,
    card_should_expand_head_height: bool,
    card_should_stretch_at_scroll_top: bool,
    card_maximum_height: f32,
    bottom_number_of_stacked_cards: usize,
    bottom_stacked_cards_should_scale: bool,
    bottom_card_lookout_margin: f32,
    space_at_top_for_background_view: f32,
    space_at_top_should_snap: bool,
    space_at_bottom: f32,
    scroll_area_top: f32,
    scroll_area_bottom: f32,
    scroll_should_snap_card_head: bool,
    first_movable_index: usize,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            card_head_height: 80.0,
            card_should_expand_head_height: true,
            card_should_stretch_at_scroll_top: true,
            card_maximum_height: 0.0,
            bottom_number_of_stacked_cards: 5,
            bottom_stacked_cards_should_scale: true,
            bottom_card_lookout_margin: 10.0,
            space_at_top_for_background_view: 0.0,
            space_at_top_should_snap: true,
            space_at_bottom: 0.0,
            scroll_area_top: 120.0,
            scroll_area_bottom: 120.0,
            scroll_should_snap_card_head: false,
            first_movable_index: 0,
        }
    }
}

fn at_least(v: f32, min: f32) -> f32 {
    // NaN compares false everywhere; treat it as the bound.
    if v >= min { v } else { min }
}

fn within(v: f32, min: f32, max: f32) -> f32 {
    at_least(v, min).min(max)
}

impl DeckConfig {
    /// Re-applies every clamp. Used for configs that did not go through the
    /// setters (deserialized, or built with struct update in tests).
    pub fn normalized(mut self) -> Self {
        self.card_head_height = at_least(self.card_head_height, MIN_CARD_HEAD_HEIGHT);
        self.card_maximum_height = at_least(self.card_maximum_height, 0.0);
        self.bottom_number_of_stacked_cards = self
            .bottom_number_of_stacked_cards
            .min(MAX_BOTTOM_STACKED_CARDS);
        self.bottom_card_lookout_margin = within(
            self.bottom_card_lookout_margin,
            0.0,
            MAX_BOTTOM_CARD_LOOKOUT_MARGIN,
        );
        self.space_at_top_for_background_view =
            at_least(self.space_at_top_for_background_view, 0.0);
        self.scroll_area_top = at_least(self.scroll_area_top, 0.0);
        self.scroll_area_bottom = at_least(self.scroll_area_bottom, 0.0);
        if !self.space_at_bottom.is_finite() {
            self.space_at_bottom = 0.0;
        }
        self
    }

    // --- card head ---

    pub fn card_head_height(&self) -> f32 {
        self.card_head_height
    }
    pub fn set_card_head_height(&mut self, v: f32) -> Invalidation {
        self.card_head_height = at_least(v, MIN_CARD_HEAD_HEIGHT);
        Invalidation::ANIMATED_LAYOUT
    }

    pub fn card_should_expand_head_height(&self) -> bool {
        self.card_should_expand_head_height
    }
    pub fn set_card_should_expand_head_height(&mut self, v: bool) -> Invalidation {
        self.card_should_expand_head_height = v;
        Invalidation::ANIMATED_LAYOUT
    }

    pub fn card_should_stretch_at_scroll_top(&self) -> bool {
        self.card_should_stretch_at_scroll_top
    }
    pub fn set_card_should_stretch_at_scroll_top(&mut self, v: bool) -> Invalidation {
        self.card_should_stretch_at_scroll_top = v;
        Invalidation::ANIMATED_LAYOUT
    }

    /// 0 means the height is only bounded by the viewport.
    pub fn card_maximum_height(&self) -> f32 {
        self.card_maximum_height
    }
    pub fn set_card_maximum_height(&mut self, v: f32) -> Invalidation {
        self.card_maximum_height = at_least(v, 0.0);
        Invalidation::ANIMATED_LAYOUT
    }

    // --- bottom stack ---

    pub fn bottom_number_of_stacked_cards(&self) -> usize {
        self.bottom_number_of_stacked_cards
    }
    /// Takes a signed count so negative input clamps to 0 instead of wrapping.
    pub fn set_bottom_number_of_stacked_cards(&mut self, v: i64) -> Invalidation {
        self.bottom_number_of_stacked_cards =
            v.clamp(0, MAX_BOTTOM_STACKED_CARDS as i64) as usize;
        Invalidation::RELOAD
    }

    pub fn bottom_stacked_cards_should_scale(&self) -> bool {
        self.bottom_stacked_cards_should_scale
    }
    pub fn set_bottom_stacked_cards_should_scale(&mut self, v: bool) -> Invalidation {
        self.bottom_stacked_cards_should_scale = v;
        Invalidation::ANIMATED_LAYOUT
    }

    pub fn bottom_card_lookout_margin(&self) -> f32 {
        self.bottom_card_lookout_margin
    }
    pub fn set_bottom_card_lookout_margin(&mut self, v: f32) -> Invalidation {
        self.bottom_card_lookout_margin = within(v, 0.0, MAX_BOTTOM_CARD_LOOKOUT_MARGIN);
        Invalidation::ANIMATED_LAYOUT
    }

    // --- spacing ---

    pub fn space_at_top_for_background_view(&self) -> f32 {
        self.space_at_top_for_background_view
    }
    pub fn set_space_at_top_for_background_view(&mut self, v: f32) -> Invalidation {
        self.space_at_top_for_background_view = at_least(v, 0.0);
        Invalidation::ANIMATED_LAYOUT
    }

    pub fn space_at_top_should_snap(&self) -> bool {
        self.space_at_top_should_snap
    }
    pub fn set_space_at_top_should_snap(&mut self, v: bool) -> Invalidation {
        self.space_at_top_should_snap = v;
        Invalidation::empty()
    }

    pub fn space_at_bottom(&self) -> f32 {
        self.space_at_bottom
    }
    pub fn set_space_at_bottom(&mut self, v: f32) -> Invalidation {
        self.space_at_bottom = if v.is_finite() { v } else { 0.0 };
        Invalidation::ANIMATED_LAYOUT
    }

    // --- scrolling ---

    pub fn scroll_area_top(&self) -> f32 {
        self.scroll_area_top
    }
    pub fn set_scroll_area_top(&mut self, v: f32) -> Invalidation {
        self.scroll_area_top = at_least(v, 0.0);
        Invalidation::empty()
    }

    pub fn scroll_area_bottom(&self) -> f32 {
        self.scroll_area_bottom
    }
    pub fn set_scroll_area_bottom(&mut self, v: f32) -> Invalidation {
        self.scroll_area_bottom = at_least(v, 0.0);
        Invalidation::empty()
    }

    pub fn scroll_should_snap_card_head(&self) -> bool {
        self.scroll_should_snap_card_head
    }
    pub fn set_scroll_should_snap_card_head(&mut self, v: bool) -> Invalidation {
        self.scroll_should_snap_card_head = v;
        Invalidation::empty()
    }

    // --- reordering ---

    pub fn first_movable_index(&self) -> usize {
        self.first_movable_index
    }
    pub fn set_first_movable_index(&mut self, v: usize) -> Invalidation {
        self.first_movable_index = v;
        Invalidation::empty()
    }
}
