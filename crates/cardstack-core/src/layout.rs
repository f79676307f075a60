//! # Card layout
//!
//! `generate` turns the deck configuration, the current viewport and the
//! selection/drag state into one [`CardAttributes`] per item. Each item gets
//! exactly one of three treatments:
//!
//! - nothing selected: the *stacked-scroll* layout, every card showing its head
//!   strip, cards scrolled past the top piling up at the scroll offset;
//! - the selected card: the *expanded* layout, full cell at the scroll offset;
//! - every other card while one is selected: the *bottom stack*, a small fan of
//!   the selection's nearest neighbours at the bottom of the viewport, with the
//!   rest hidden.
//!
//! Only a window of indices around the scroll offset is recomputed; the rest
//! keep the arena's previous values until the item count changes.
//!
//! ```rust
//! use cardstack_core::*;
//!
//! let cfg = DeckConfig::default();
//! let vp = ViewportGeometry::new(Size::new(320.0, 640.0), 20);
//! let mut arena = AttributeArena::new();
//! let pass = layout::generate(&cfg, &vp, LayoutSelection::default(), &mut arena);
//! assert!(pass.full);
//! assert_eq!(arena.len(), 20);
//! assert_eq!(arena.get(1).unwrap().frame.y, 80.0);
//! ```

use std::ops::Range;

use smallvec::SmallVec;

use crate::config::MAX_BOTTOM_STACKED_CARDS;
use crate::{AttributeArena, CardAttributes, DeckConfig, Rect, Size, Transform, ViewportGeometry};

/// Items recomputed above the first visible head.
pub const WINDOW_MARGIN_ABOVE: isize = 10;
/// Items recomputed past the bottom of the viewport.
pub const WINDOW_MARGIN_BELOW: isize = 5;
/// Cards further than this many heads past the top are parked off-screen.
const PARKING_DISTANCE: isize = 5;
const STRETCH_PER_INDEX: f32 = 0.2;
const SCALE_STEP: f32 = 0.01;
const CELL_HEIGHT_SLACK: f32 = 2.0;

/// The parts of the interaction state that shape the layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutSelection {
    pub selected: Option<usize>,
    /// Item currently represented by the drag snapshot; rendered invisible.
    pub moving: Option<usize>,
}

/// Neighbours of the selected card shown fanned out at the viewport bottom.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BottomStack {
    indices: SmallVec<[usize; MAX_BOTTOM_STACKED_CARDS]>,
    cards_above_selected: usize,
}

impl BottomStack {
    /// Picks `min(wanted, item_count - 1)` indices closest to `selected`:
    /// half (rounded down) directly above it, the rest directly below, with
    /// any shortfall at the end of the deck taken from above instead.
    pub fn compute(selected: Option<usize>, item_count: usize, wanted: usize) -> Self {
        let Some(sel) = selected.filter(|&s| s < item_count) else {
            return Self::default();
        };
        let n = wanted.min(item_count - 1);
        let available_below = item_count - 1 - sel;
        let mut above = (n / 2).min(sel);
        let mut below = n - above;
        if below > available_below {
            above += below - available_below;
            below = available_below;
        }
        let indices = (sel - above..sel).chain(sel + 1..=sel + below).collect();
        Self {
            indices,
            cards_above_selected: above,
        }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Position within the fan, 0 for the lowest index.
    pub fn rank_of(&self, index: usize) -> Option<usize> {
        self.indices.iter().position(|&i| i == index)
    }

    /// Members with an index below the selection; also the rank the selected
    /// card would take if it were dropped back into the fan.
    pub fn cards_above_selected(&self) -> usize {
        self.cards_above_selected
    }
}

/// Values derived once per pass and shared by all three treatments.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutMetrics {
    pub cell_size: Size,
    /// Head height after the optional expansion for short decks.
    pub head_height: f32,
    pub bottom: BottomStack,
}

impl LayoutMetrics {
    pub fn compute(
        config: &DeckConfig,
        viewport: &ViewportGeometry,
        selected: Option<usize>,
    ) -> Self {
        Self {
            cell_size: cell_size(config, viewport),
            head_height: effective_head_height(config, viewport),
            bottom: BottomStack::compute(
                selected,
                viewport.item_count,
                config.bottom_number_of_stacked_cards(),
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutPass {
    /// Indices rewritten by this pass.
    pub window: Range<usize>,
    /// The arena was discarded and rebuilt.
    pub full: bool,
    pub metrics: LayoutMetrics,
}

pub fn cell_size(config: &DeckConfig, viewport: &ViewportGeometry) -> Size {
    let inset = viewport.content_inset;
    let width = viewport.frame.w - inset.horizontal();
    let max_height = viewport.frame.h
        - config.bottom_card_lookout_margin() * config.bottom_number_of_stacked_cards() as f32
        - (inset.top + inset.bottom)
        - CELL_HEIGHT_SLACK;
    let wanted = config.card_maximum_height();
    let height = if wanted == 0.0 || wanted > max_height {
        max_height
    } else {
        wanted
    };
    Size::new(width, height)
}

/// The configured head height, stretched so a short deck fills the viewport
/// when `card_should_expand_head_height` is on.
pub fn effective_head_height(config: &DeckConfig, viewport: &ViewportGeometry) -> f32 {
    let head = config.card_head_height();
    if !config.card_should_expand_head_height() || viewport.item_count == 0 {
        return head;
    }
    let inset = viewport.content_inset;
    let available = viewport.frame.h
        - (inset.top + inset.bottom + config.space_at_top_for_background_view());
    head.max(available / viewport.item_count as f32)
}

pub fn content_size(config: &DeckConfig, viewport: &ViewportGeometry) -> Size {
    let height = config.card_head_height() * viewport.item_count as f32
        + config.space_at_top_for_background_view()
        + config.space_at_bottom();
    Size::new(viewport.frame.w - viewport.content_inset.horizontal(), height)
}

/// Scale of the bottom-stack card at `rank` in a fan of `count`. The last rank
/// is full size and each rank above it shrinks by one step. `behind` shrinks
/// one more step, for a card sliding in behind the fan.
pub fn card_scale(config: &DeckConfig, rank: usize, count: usize, behind: bool) -> f32 {
    if !config.bottom_stacked_cards_should_scale() {
        return 1.0;
    }
    let extra = if behind && rank < count { SCALE_STEP } else { 0.0 };
    1.0 - (count as f32 - rank as f32 - 1.0) * SCALE_STEP - extra
}

/// Indices worth recomputing for the current scroll offset.
pub fn visible_window(config: &DeckConfig, viewport: &ViewportGeometry) -> Range<usize> {
    let head = config.card_head_height();
    let count = viewport.item_count;
    let first = ((viewport.offset_top() - config.space_at_top_for_background_view()) / head)
        as isize
        - WINDOW_MARGIN_ABOVE;
    let last = (viewport.visible_max_y() / head) as isize + WINDOW_MARGIN_BELOW;
    let end = last.clamp(0, count as isize) as usize;
    let start = (first.max(0) as usize).min(end);
    start..end
}

/// Recomputes `arena` for this pass. Falls back to every index when the
/// arena does not hold exactly one entry per item.
pub fn generate(
    config: &DeckConfig,
    viewport: &ViewportGeometry,
    selection: LayoutSelection,
    arena: &mut AttributeArena,
) -> LayoutPass {
    let count = viewport.item_count;
    let full = arena.needs_full_pass(count);
    if full {
        arena.invalidate();
    }
    let window = if full {
        0..count
    } else {
        visible_window(config, viewport)
    };
    let metrics = LayoutMetrics::compute(config, viewport, selection.selected);

    for index in window.clone() {
        let attr = match selection.selected {
            None => stacked_scroll(config, viewport, &metrics, selection.moving, index),
            Some(sel) if sel == index => expanded(config, viewport, &metrics, index),
            Some(_) => bottom_stack(config, viewport, &metrics, index),
        };
        arena.put(attr);
    }

    log::trace!(
        "layout pass: items={count} window={window:?} full={full} selected={:?}",
        selection.selected
    );

    LayoutPass {
        window,
        full,
        metrics,
    }
}

fn stacked_scroll(
    config: &DeckConfig,
    viewport: &ViewportGeometry,
    metrics: &LayoutMetrics,
    moving: Option<usize>,
    index: usize,
) -> CardAttributes {
    let head = metrics.head_height;
    let space = config.space_at_top_for_background_view();
    let top = viewport.offset_top();
    let baseline = Rect::new(
        0.0,
        space + head * index as f32,
        metrics.cell_size.width,
        metrics.cell_size.height,
    );
    let mut attr = CardAttributes::new(index, baseline);
    if moving == Some(index) {
        attr.alpha = 0.0;
    }

    if (0.0..=space).contains(&top) {
        // background region: everything at its baseline
    } else if top > space {
        let first_visible = ((top - space) / head) as isize;
        let i = index as isize;
        attr.hidden = i < first_visible;
        if moving.is_some_and(|m| index + 1 == m) {
            attr.hidden = false;
        }
        if i <= first_visible {
            attr.frame.y = top;
        }
        if attr.hidden && i < first_visible - PARKING_DISTANCE {
            attr.frame.y = viewport.frame.h * -1.5;
        }
    } else if config.card_should_stretch_at_scroll_top() {
        let stretch = 1.0 - STRETCH_PER_INDEX * (index + 1) as f32;
        attr.frame.y += top * stretch;
    }
    attr
}

fn expanded(
    config: &DeckConfig,
    viewport: &ViewportGeometry,
    metrics: &LayoutMetrics,
    index: usize,
) -> CardAttributes {
    let mut y = viewport.offset_top();
    if viewport.item_count == 1 {
        y += config.space_at_top_for_background_view();
    }
    let mut attr = CardAttributes::new(
        index,
        Rect::new(0.0, y, metrics.cell_size.width, metrics.cell_size.height),
    );
    attr.is_expanded = true;
    attr
}

fn bottom_stack(
    config: &DeckConfig,
    viewport: &ViewportGeometry,
    metrics: &LayoutMetrics,
    index: usize,
) -> CardAttributes {
    let baseline = Rect::new(
        0.0,
        config.card_head_height() * index as f32,
        metrics.cell_size.width,
        metrics.cell_size.height,
    );
    let mut attr = CardAttributes::new(index, baseline);

    if let Some(rank) = metrics.bottom.rank_of(index) {
        let margin = config.bottom_card_lookout_margin();
        let fan = metrics.bottom.len();
        let base = viewport.visible_max_y() - viewport.content_inset.bottom - margin * fan as f32;
        attr.frame.y = base + margin * rank as f32;
        attr.transform = Transform::scale(card_scale(config, rank, fan, false));
    } else {
        attr.hidden = true;
        let visible = Rect::new(
            0.0,
            viewport.content_offset.y,
            viewport.frame.w,
            viewport.frame.h,
        );
        if visible.intersects(&baseline) {
            // just below the viewport so the hide animates downward
            attr.frame.y = viewport.visible_max_y();
        }
    }
    attr
}
