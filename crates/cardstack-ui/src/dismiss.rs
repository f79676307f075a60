//! Pulling the selected card down to put it back in the deck.

use cardstack_core::layout::{self, BottomStack};
use cardstack_core::{AnimationSpec, Transform};

use crate::CardDeck;
use crate::gestures::{GestureEvent, GesturePhase};
use crate::host::DeckHost;
use crate::selection::SelectionPhase;
use crate::transition::Continuation;

/// Fraction of the card height the pull must exceed to dismiss on release.
const DISMISS_FRACTION: f32 = 1.0 / 7.0;
/// Pull distance over which the card shrinks by its full scale difference,
/// per unit of that difference.
const SCALE_DISTANCE: f32 = 100.0;

impl<H: DeckHost> CardDeck<H> {
    /// Vertical pan on the selected card. The card follows a downward pull,
    /// shrinking toward its slot in the bottom stack; released far enough,
    /// it is unselected (subject to `can_unselect`).
    pub fn handle_selected_card_pan(&mut self, event: GestureEvent) {
        let SelectionPhase::Selected { index } = self.selection.phase else {
            return;
        };
        let viewport = self.viewport();
        if viewport.item_count == 1 {
            return;
        }

        match event.phase {
            GesturePhase::Began => {
                self.host.end_editing();
                self.dismiss_from = Some(event.location.y);
            }
            GesturePhase::Changed => {
                let Some(from) = self.dismiss_from else {
                    return;
                };
                let shift = (event.location.y - from).max(0.0);
                let target = self.tucked_scale(index, viewport.item_count);
                let diff = 1.0 - target;
                let scale = 1.0 - (shift * diff / SCALE_DISTANCE).min(diff);
                let transform = Transform::translate(0.0, shift).then(&Transform::scale(scale));
                self.host.set_cell_transform(index, transform, None, None);
            }
            GesturePhase::Ended | GesturePhase::Cancelled => {
                let Some(from) = self.dismiss_from.take() else {
                    return;
                };
                let shift = (event.location.y - from).max(0.0);
                let cell_height = self
                    .host
                    .cell_frame(index)
                    .map(|f| f.h)
                    .unwrap_or_else(|| layout::cell_size(&self.config, &viewport).height);
                let unselect = shift > cell_height * DISMISS_FRACTION;
                let transform = if unselect {
                    let target = self.tucked_scale(index, viewport.item_count);
                    Transform::translate(0.0, viewport.frame.h).then(&Transform::scale(target))
                } else {
                    Transform::identity()
                };
                let key = self
                    .transitions
                    .begin(Continuation::DismissSettled { index, unselect });
                self.host.set_cell_transform(
                    index,
                    transform,
                    Some(AnimationSpec::dismiss()),
                    Some(key),
                );
            }
        }
    }

    /// Scale of the selected card were it slid back behind the bottom stack.
    fn tucked_scale(&self, index: usize, item_count: usize) -> f32 {
        let bottom = BottomStack::compute(
            Some(index),
            item_count,
            self.config.bottom_number_of_stacked_cards(),
        );
        layout::card_scale(
            &self.config,
            bottom.cards_above_selected(),
            bottom.len(),
            true,
        )
    }

    pub(crate) fn dismiss_settled(&mut self, index: usize, unselect: bool) {
        if !unselect || self.selection.phase != (SelectionPhase::Selected { index }) {
            return;
        }
        match self.begin_unselect(None, None) {
            Ok(true) => {}
            Ok(false) => {
                // vetoed: bring the card back up
                self.host.set_cell_transform(
                    index,
                    Transform::identity(),
                    Some(AnimationSpec::dismiss()),
                    None,
                );
            }
            Err(err) => log::debug!("dismiss ignored: {err}"),
        }
    }
}
