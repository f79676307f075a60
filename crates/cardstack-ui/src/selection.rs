//! Selecting, unselecting and flipping the expanded card.
//!
//! All four operations share one state machine, [`SelectionPhase`]. Phases
//! ending in `-ing` wait on a host transition; a request arriving in one of
//! them is parked (one slot, latest wins) and replayed when the transition
//! lands. A flipped card is always flipped back before it is unselected.

use cardstack_core::{AnimationSpec, DeckError, DeckResult, Invalidation, check_index};

use crate::CardDeck;
use crate::host::{DeckHost, FlipDirection, FlipTransition, FlipViewId};
use crate::transition::{Completion, Continuation, run};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionPhase {
    #[default]
    Idle,
    Selecting {
        index: usize,
    },
    Selected {
        index: usize,
    },
    FlippingOut {
        index: usize,
        view: FlipViewId,
    },
    Flipped {
        index: usize,
        view: FlipViewId,
    },
    FlippingBack {
        index: usize,
        view: FlipViewId,
    },
    Unselecting {
        from: usize,
    },
}

impl SelectionPhase {
    /// The card layout treats as expanded.
    pub fn selected_index(&self) -> Option<usize> {
        match *self {
            SelectionPhase::Idle | SelectionPhase::Unselecting { .. } => None,
            SelectionPhase::Selecting { index }
            | SelectionPhase::Selected { index }
            | SelectionPhase::FlippingOut { index, .. }
            | SelectionPhase::Flipped { index, .. }
            | SelectionPhase::FlippingBack { index, .. } => Some(index),
        }
    }

    pub fn is_flipped(&self) -> bool {
        self.flip_view().is_some()
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, SelectionPhase::Idle)
    }

    /// Waiting on a host transition.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            SelectionPhase::Selecting { .. }
                | SelectionPhase::FlippingOut { .. }
                | SelectionPhase::FlippingBack { .. }
                | SelectionPhase::Unselecting { .. }
        )
    }

    pub(crate) fn flip_view(&self) -> Option<FlipViewId> {
        match *self {
            SelectionPhase::FlippingOut { view, .. }
            | SelectionPhase::Flipped { view, .. }
            | SelectionPhase::FlippingBack { view, .. } => Some(view),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SelectionOp {
    Select(usize),
    Unselect,
    Flip(FlipViewId),
    FlipBack,
}

struct Parked {
    op: SelectionOp,
    completion: Option<Completion>,
}

#[derive(Default)]
pub(crate) struct SelectionState {
    pub phase: SelectionPhase,
    /// Skip the `can_unselect` veto for the next unselect only.
    pub force_unselect: bool,
    parked: Option<Parked>,
}

/// Select to run once the current card is unselected.
pub(crate) struct ChainedSelect {
    pub index: usize,
    pub completion: Option<Completion>,
}

/// Unselect to run once the current card has flipped back.
pub(crate) struct ChainedUnselect {
    pub completion: Option<Completion>,
    pub then: Option<ChainedSelect>,
}

impl<H: DeckHost> CardDeck<H> {
    pub fn selected_index(&self) -> Option<usize> {
        self.selection.phase.selected_index()
    }

    pub fn is_flipped(&self) -> bool {
        self.selection.phase.is_flipped()
    }

    pub fn selection_phase(&self) -> SelectionPhase {
        self.selection.phase
    }

    /// Expands the card at `index`. A different selected card is unselected
    /// first (subject to `can_unselect`); selecting the current card does
    /// nothing. `completion` runs once the card is expanded and is dropped if
    /// anything vetoes the change.
    pub fn select_card_at(&mut self, index: usize, completion: Option<Completion>) {
        self.submit(SelectionOp::Select(index), completion);
        self.drain_requests();
    }

    /// Unselects the current card, bypassing `can_unselect`. Flips back first
    /// when needed. With nothing selected the completion runs immediately;
    /// during a transition the request waits until it lands.
    pub fn unselect_card(&mut self, completion: Option<Completion>) {
        self.submit(SelectionOp::Unselect, completion);
        self.drain_requests();
    }

    /// Turns the selected card over to show `view`.
    pub fn flip_selected_card(&mut self, view: FlipViewId, completion: Option<Completion>) {
        self.submit(SelectionOp::Flip(view), completion);
        self.drain_requests();
    }

    pub fn flip_selected_card_back(&mut self, completion: Option<Completion>) {
        self.submit(SelectionOp::FlipBack, completion);
        self.drain_requests();
    }

    pub(crate) fn submit(&mut self, op: SelectionOp, completion: Option<Completion>) {
        if self.selection.phase.is_busy() {
            log::debug!("{:?} in progress, parking {op:?}", self.selection.phase);
            if let Some(old) = self.selection.parked.replace(Parked { op, completion }) {
                log::debug!("{:?} superseded", old.op);
            }
            return;
        }

        let result = match op {
            SelectionOp::Select(index) => self.begin_select(index, completion),
            SelectionOp::Unselect => {
                if self.selection.phase.selected_index().is_none() {
                    run(completion);
                    Ok(())
                } else {
                    self.selection.force_unselect = true;
                    self.begin_unselect(completion, None).map(drop)
                }
            }
            SelectionOp::Flip(view) => self.begin_flip(view, completion),
            SelectionOp::FlipBack => self.begin_flip_back(completion, None),
        };

        match result {
            Ok(()) => {}
            Err(err @ (DeckError::IndexOutOfRange { .. } | DeckError::CellNotFound(_))) => {
                log::warn!("{op:?} aborted: {err}")
            }
            Err(err) => log::debug!("{op:?} ignored: {err}"),
        }
    }

    fn begin_select(&mut self, index: usize, completion: Option<Completion>) -> DeckResult<()> {
        check_index(index, self.host.viewport().item_count)?;
        if self.drag.is_active() {
            log::debug!("select {index} ignored while a card is dragged");
            return Ok(());
        }
        match self.selection.phase {
            SelectionPhase::Idle => {}
            SelectionPhase::Selected { index: current }
            | SelectionPhase::Flipped { index: current, .. } => {
                if current == index {
                    log::debug!("card {index} is already selected");
                    return Ok(());
                }
                let then = ChainedSelect { index, completion };
                return self.begin_unselect(None, Some(then)).map(drop);
            }
            _ => return Err(DeckError::SelectionBusy),
        }

        if !self.delegate.can_select(index) {
            log::debug!("selecting card {index} vetoed");
            return Ok(());
        }
        self.delegate.will_select(index, &mut self.requests);
        self.selection.phase = SelectionPhase::Selecting { index };
        self.host.set_scroll_enabled(false);
        let key = self
            .transitions
            .begin(Continuation::Selected { index, completion });
        self.invalidate(Invalidation::ANIMATED_RELOAD, Some(key));
        Ok(())
    }

    /// Veto-checked unselect of the current card. `Ok(false)` when vetoed.
    pub(crate) fn begin_unselect(
        &mut self,
        completion: Option<Completion>,
        then: Option<ChainedSelect>,
    ) -> DeckResult<bool> {
        let (index, flipped) = match self.selection.phase {
            SelectionPhase::Selected { index } => (index, false),
            SelectionPhase::Flipped { index, .. } => (index, true),
            SelectionPhase::Idle | SelectionPhase::Unselecting { .. } => {
                return Err(DeckError::NothingSelected);
            }
            _ => return Err(DeckError::SelectionBusy),
        };

        let forced = std::mem::take(&mut self.selection.force_unselect);
        if !forced && !self.delegate.can_unselect(index) {
            log::debug!("unselecting card {index} vetoed");
            return Ok(false);
        }

        if flipped {
            self.begin_flip_back(None, Some(ChainedUnselect { completion, then }))?;
        } else {
            self.unselect_now(index, completion, then);
        }
        Ok(true)
    }

    fn unselect_now(
        &mut self,
        index: usize,
        completion: Option<Completion>,
        then: Option<ChainedSelect>,
    ) {
        self.dismiss_from = None;
        self.host.set_scroll_enabled(true);
        self.delegate.will_unselect(index, &mut self.requests);
        self.selection.phase = SelectionPhase::Unselecting { from: index };
        let key = self.transitions.begin(Continuation::Unselected {
            from: index,
            completion,
            then,
        });
        self.invalidate(Invalidation::ANIMATED_RELOAD, Some(key));
    }

    fn begin_flip(&mut self, view: FlipViewId, completion: Option<Completion>) -> DeckResult<()> {
        let index = match self.selection.phase {
            SelectionPhase::Selected { index } => index,
            SelectionPhase::Flipped { .. } => {
                log::debug!("flip ignored: card is already flipped");
                return Ok(());
            }
            SelectionPhase::Idle => return Err(DeckError::NothingSelected),
            _ => return Err(DeckError::SelectionBusy),
        };
        if self.host.cell_frame(index).is_none() {
            return Err(DeckError::CellNotFound(index));
        }

        self.host.end_editing();
        self.host.set_content_interaction(index, false);
        self.selection.phase = SelectionPhase::FlippingOut { index, view };
        let key = self.transitions.begin(Continuation::FlippedOut {
            index,
            view,
            completion,
        });
        self.host.flip_card(
            FlipTransition {
                index,
                view,
                direction: FlipDirection::FromRight,
                spec: AnimationSpec::flip(),
            },
            key,
        );
        Ok(())
    }

    fn begin_flip_back(
        &mut self,
        completion: Option<Completion>,
        then: Option<ChainedUnselect>,
    ) -> DeckResult<()> {
        let (index, view) = match self.selection.phase {
            SelectionPhase::Flipped { index, view } => (index, view),
            SelectionPhase::Idle | SelectionPhase::Selected { .. } => {
                log::debug!("flip back ignored: card is not flipped");
                return Ok(());
            }
            _ => return Err(DeckError::SelectionBusy),
        };

        self.host.end_editing();
        self.host.set_content_interaction(index, false);
        self.selection.phase = SelectionPhase::FlippingBack { index, view };
        let key = self.transitions.begin(Continuation::FlippedBack {
            index,
            view,
            completion,
            then,
        });
        self.host.flip_card(
            FlipTransition {
                index,
                view,
                direction: FlipDirection::FromLeft,
                spec: AnimationSpec::flip(),
            },
            key,
        );
        Ok(())
    }

    pub(crate) fn selection_landed(&mut self, index: usize, completion: Option<Completion>) {
        self.selection.phase = SelectionPhase::Selected { index };
        self.delegate.did_select(index, &mut self.requests);
        run(completion);
        self.replay_parked();
    }

    pub(crate) fn unselection_landed(
        &mut self,
        from: usize,
        completion: Option<Completion>,
        then: Option<ChainedSelect>,
    ) {
        self.selection.phase = SelectionPhase::Idle;
        self.delegate.did_unselect(from, &mut self.requests);
        run(completion);
        if let Some(next) = then {
            self.submit(SelectionOp::Select(next.index), next.completion);
        }
        self.replay_parked();
    }

    pub(crate) fn flip_landed(
        &mut self,
        index: usize,
        view: FlipViewId,
        completion: Option<Completion>,
    ) {
        self.selection.phase = SelectionPhase::Flipped { index, view };
        self.host.set_content_interaction(index, true);
        run(completion);
        self.replay_parked();
    }

    pub(crate) fn flip_back_landed(
        &mut self,
        index: usize,
        view: FlipViewId,
        completion: Option<Completion>,
        then: Option<ChainedUnselect>,
    ) {
        self.host.remove_flip_view(view);
        self.host.set_content_interaction(index, true);
        self.selection.phase = SelectionPhase::Selected { index };
        run(completion);
        if let Some(chain) = then {
            self.unselect_now(index, chain.completion, chain.then);
        }
        self.replay_parked();
    }

    fn replay_parked(&mut self) {
        if self.selection.phase.is_busy() {
            return;
        }
        if let Some(Parked { op, completion }) = self.selection.parked.take() {
            self.submit(op, completion);
        }
    }
}
