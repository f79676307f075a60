use cardstack_core::layout::{self, LayoutPass, LayoutSelection};
use cardstack_core::{
    AttributeArena, BottomInsetLatch, CardAttributes, DeckConfig, DeckError, Invalidation, Rect,
    Size, Vec2, ViewportGeometry, snap,
};

use crate::autoscroll::Autoscroll;
use crate::drag::DragPhase;
use crate::host::{DeckDelegate, DeckHost};
use crate::selection::SelectionState;
use crate::transition::{Continuation, DeckRequest, DeckRequests, TransitionKey, Transitions};

/// A stacked deck of cards laid out inside a host scroll view.
///
/// The deck owns all interaction state (selection, drag, autoscroll) and the
/// attribute arena. The host calls [`prepare`](Self::prepare) whenever it
/// lays out, forwards input, and reports finished transitions.
pub struct CardDeck<H: DeckHost> {
    pub(crate) host: H,
    pub(crate) config: DeckConfig,
    pub(crate) delegate: Box<dyn DeckDelegate>,
    pub(crate) arena: AttributeArena,
    pub(crate) latch: BottomInsetLatch,
    pub(crate) selection: SelectionState,
    pub(crate) drag: DragPhase,
    pub(crate) autoscroll: Autoscroll,
    /// Pointer y where the selected-card pan began.
    pub(crate) dismiss_from: Option<f32>,
    pub(crate) transitions: Transitions,
    pub(crate) requests: DeckRequests,
    draining: bool,
}

impl<H: DeckHost> CardDeck<H> {
    pub fn new(host: H, config: DeckConfig) -> Self {
        Self {
            host,
            config: config.normalized(),
            delegate: Box::new(()),
            arena: AttributeArena::new(),
            latch: BottomInsetLatch::default(),
            selection: SelectionState::default(),
            drag: DragPhase::Idle,
            autoscroll: Autoscroll::Idle,
            dismiss_from: None,
            transitions: Transitions::default(),
            requests: DeckRequests::default(),
            draining: false,
        }
    }

    pub fn with_delegate(mut self, delegate: impl DeckDelegate + 'static) -> Self {
        self.delegate = Box::new(delegate);
        self
    }

    pub fn set_delegate(&mut self, delegate: Box<dyn DeckDelegate>) {
        self.delegate = delegate;
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    /// Replaces the whole configuration (clamped) and reloads.
    pub fn set_config(&mut self, config: DeckConfig) {
        self.config = config.normalized();
        self.invalidate(Invalidation::RELOAD, None);
    }

    /// Freezes the bottom inset seen by layout while a software keyboard is up.
    pub fn set_keyboard_visible(&mut self, visible: bool) {
        self.latch.set_frozen(visible);
    }

    /// Host viewport with the bottom inset latched.
    pub(crate) fn viewport(&mut self) -> ViewportGeometry {
        self.latch.resolve(self.host.viewport())
    }

    /// Recomputes attributes for the host's current viewport.
    pub fn prepare(&mut self) -> LayoutPass {
        let viewport = self.viewport();
        let selection = LayoutSelection {
            selected: self.selection.phase.selected_index(),
            moving: self.drag.moving_index(),
        };
        layout::generate(&self.config, &viewport, selection, &mut self.arena)
    }

    /// Attributes from the last [`prepare`](Self::prepare), indexed by item.
    pub fn attributes(&self) -> &[CardAttributes] {
        self.arena.as_slice()
    }

    pub fn attribute_at(&self, index: usize) -> Option<&CardAttributes> {
        self.arena.get(index)
    }

    pub fn attributes_in_rect(&self, rect: Rect) -> impl Iterator<Item = &CardAttributes> + '_ {
        self.arena.in_rect(rect)
    }

    pub fn content_size(&self) -> Size {
        layout::content_size(&self.config, &self.host.viewport())
    }

    /// Where a deceleration proposed to stop should stop instead. Untouched
    /// while a card is being dragged.
    pub fn target_content_offset(&mut self, proposed: Vec2, velocity: Vec2) -> Vec2 {
        if self.drag.is_active() {
            return proposed;
        }
        let viewport = self.viewport();
        snap::target_content_offset(&self.config, &viewport, proposed, velocity)
    }

    /// A tap in the deck. Ignored while a card is selected or dragged.
    pub fn handle_tap(&mut self, location: Vec2) {
        if !self.selection.phase.is_idle() || self.drag.is_active() {
            log::debug!("tap ignored while {:?}", self.selection.phase);
            return;
        }
        let Some(index) = self.host.index_at(location) else {
            return;
        };
        self.delegate.did_tap_card(index, &mut self.requests);
        self.drain_requests();
    }

    /// Called by the host when the transition behind `key` has finished.
    pub fn finish_transition(&mut self, key: TransitionKey) {
        let Some(next) = self.transitions.take(key) else {
            log::warn!("{} ({key:?})", DeckError::UnknownTransition);
            return;
        };
        match next {
            Continuation::Selected { index, completion } => {
                self.selection_landed(index, completion)
            }
            Continuation::Unselected {
                from,
                completion,
                then,
            } => self.unselection_landed(from, completion, then),
            Continuation::FlippedOut {
                index,
                view,
                completion,
            } => self.flip_landed(index, view, completion),
            Continuation::FlippedBack {
                index,
                view,
                completion,
                then,
            } => self.flip_back_landed(index, view, completion, then),
            Continuation::DragSettled => self.drag_settled(),
            Continuation::DismissSettled { index, unselect } => {
                self.dismiss_settled(index, unselect)
            }
        }
        self.drain_requests();
    }

    /// Transitions the host still owes a completion for.
    pub fn pending_transitions(&self) -> usize {
        self.transitions.len()
    }

    pub(crate) fn invalidate(&mut self, what: Invalidation, done: Option<TransitionKey>) {
        if what.contains(Invalidation::RELOAD) {
            self.arena.invalidate();
        }
        self.host.invalidate(what, done);
    }

    fn apply_invalidation(&mut self, what: Invalidation) {
        if !what.is_empty() {
            self.invalidate(what, None);
        }
    }

    /// Runs requests queued by delegate hooks. Reentrant calls return at once;
    /// the outermost call drains everything, including requests queued while
    /// draining.
    pub(crate) fn drain_requests(&mut self) {
        if self.draining {
            return;
        }
        self.draining = true;
        while let Some(request) = self.requests.pop() {
            log::debug!("running deferred {request:?}");
            match request {
                DeckRequest::Select(index) => self.select_card_at(index, None),
                DeckRequest::Unselect => self.unselect_card(None),
                DeckRequest::FlipBack => self.flip_selected_card_back(None),
            }
        }
        self.draining = false;
    }
}

macro_rules! config_setters {
    ($($name:ident($ty:ty);)*) => {
        impl<H: DeckHost> CardDeck<H> {
            $(
                pub fn $name(&mut self, value: $ty) {
                    let what = self.config.$name(value);
                    self.apply_invalidation(what);
                }
            )*
        }
    };
}

config_setters! {
    set_card_head_height(f32);
    set_card_should_expand_head_height(bool);
    set_card_should_stretch_at_scroll_top(bool);
    set_card_maximum_height(f32);
    set_bottom_number_of_stacked_cards(i64);
    set_bottom_stacked_cards_should_scale(bool);
    set_bottom_card_lookout_margin(f32);
    set_space_at_top_for_background_view(f32);
    set_space_at_top_should_snap(bool);
    set_space_at_bottom(f32);
    set_scroll_area_top(f32);
    set_scroll_area_bottom(f32);
    set_scroll_should_snap_card_head(bool);
    set_first_movable_index(usize);
}

impl<H: DeckHost> Drop for CardDeck<H> {
    fn drop(&mut self) {
        if let Some(session) = std::mem::take(&mut self.drag).into_session() {
            self.host.remove_snapshot(session.snapshot);
        }
        if let Some(view) = self.selection.phase.flip_view() {
            self.host.remove_flip_view(view);
        }
        if self.autoscroll.is_running() {
            self.host.stop_frame_timer();
        }
    }
}
