//! The two seams between a deck and the application around it.
//!
//! [`DeckHost`] is the scrolling view that owns the cells. The deck reads
//! geometry from it and asks it to perform every visual change. Anything
//! animated comes with a [`TransitionKey`]; the host must hand that key back
//! through [`CardDeck::finish_transition`](crate::CardDeck::finish_transition)
//! once the change is on screen, even if it chose not to animate.
//!
//! [`DeckDelegate`] is optional application policy: vetoes and
//! notifications around selection, and what a tap on a card means.

use cardstack_core::{AnimationSpec, Invalidation, Rect, Transform, Vec2, ViewportGeometry};

use crate::transition::{DeckRequests, TransitionKey};

/// Host handle for a detached visual copy of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SnapshotId(pub u64);

/// Host handle for the alternate view a selected card flips to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FlipViewId(pub u64);

/// Where the drag snapshot sits in the host's z-order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapshotPlacement {
    Above(usize),
    Below(usize),
    Back,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipDirection {
    FromRight,
    FromLeft,
}

/// A half-turn of the selected card between its content and `view`.
///
/// `FromRight` reveals `view`, `FromLeft` restores the content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlipTransition {
    pub index: usize,
    pub view: FlipViewId,
    pub direction: FlipDirection,
    pub spec: AnimationSpec,
}

pub trait DeckHost {
    /// Current viewport, including the item count.
    fn viewport(&self) -> ViewportGeometry;

    /// Item whose realised cell contains `point` (content coordinates).
    fn index_at(&self, point: Vec2) -> Option<usize>;

    /// Frame of the realised cell for `index`; `None` when it is off-screen.
    fn cell_frame(&self, index: usize) -> Option<Rect>;

    /// Reorder the backing data: the item at `from` ends up at `to`.
    fn move_item(&mut self, from: usize, to: usize);

    /// Re-run layout. With `done`, report completion once the new attributes
    /// have been applied.
    fn invalidate(&mut self, what: Invalidation, done: Option<TransitionKey>);

    fn set_content_offset(&mut self, offset: Vec2);

    fn set_scroll_enabled(&mut self, _enabled: bool) {}

    /// Start calling [`CardDeck::autoscroll_tick`](crate::CardDeck::autoscroll_tick)
    /// once per frame.
    fn start_frame_timer(&mut self) {}

    fn stop_frame_timer(&mut self) {}

    fn snapshot_cell(&mut self, index: usize) -> Option<SnapshotId>;

    fn set_snapshot_frame(
        &mut self,
        id: SnapshotId,
        frame: Rect,
        spec: Option<AnimationSpec>,
        done: Option<TransitionKey>,
    );

    fn place_snapshot(&mut self, _id: SnapshotId, _placement: SnapshotPlacement) {}

    fn remove_snapshot(&mut self, id: SnapshotId);

    fn set_cell_alpha(&mut self, _index: usize, _alpha: f32) {}

    /// Move a realised cell vertically by `dy` without touching its attributes.
    fn slide_cell(&mut self, _index: usize, _dy: f32, _spec: AnimationSpec) {}

    fn set_cell_transform(
        &mut self,
        index: usize,
        transform: Transform,
        spec: Option<AnimationSpec>,
        done: Option<TransitionKey>,
    );

    fn flip_card(&mut self, flip: FlipTransition, done: TransitionKey);

    /// Detach `view` from the card it was flipped onto.
    fn remove_flip_view(&mut self, _view: FlipViewId) {}

    fn set_content_interaction(&mut self, _index: usize, _enabled: bool) {}

    /// Dismiss any software keyboard.
    fn end_editing(&mut self) {}
}

/// Selection policy and notifications. Every hook is optional.
///
/// Hooks cannot reach the deck. Follow-up operations go into `requests` and
/// run once the current operation has finished.
pub trait DeckDelegate {
    fn can_select(&mut self, _index: usize) -> bool {
        true
    }

    fn can_unselect(&mut self, _index: usize) -> bool {
        true
    }

    fn will_select(&mut self, _index: usize, _requests: &mut DeckRequests) {}

    fn did_select(&mut self, _index: usize, _requests: &mut DeckRequests) {}

    fn will_unselect(&mut self, _index: usize, _requests: &mut DeckRequests) {}

    fn did_unselect(&mut self, _index: usize, _requests: &mut DeckRequests) {}

    /// A card was tapped while nothing was selected.
    fn did_tap_card(&mut self, index: usize, requests: &mut DeckRequests) {
        requests.select(index);
    }
}

/// The delegate used when the application installs none.
impl DeckDelegate for () {}
