//! Long-press drag to reorder cards.
//!
//! The pressed cell is replaced by a host snapshot that follows the pointer.
//! Whenever the pointer crosses into another card, that card and the dragged
//! one trade places in the data source right away, so the deck parts around
//! the snapshot while it moves.

use cardstack_core::layout;
use cardstack_core::{AnimationSpec, DeckError, DeckResult, DragRejection, Invalidation, Rect, Vec2};

use crate::CardDeck;
use crate::gestures::{GestureEvent, GesturePhase};
use crate::host::{DeckHost, SnapshotId, SnapshotPlacement};
use crate::transition::Continuation;

/// How far the snapshot rises when picked up.
pub const LIFT_OFFSET: f32 = 20.0;

#[derive(Debug, PartialEq)]
pub struct DragSession {
    pub start_index: usize,
    /// Slot the dragged card currently occupies. `None` until the first swap.
    pub last_touched_index: Option<usize>,
    /// Item hidden behind the snapshot.
    pub moving_index: usize,
    pub start_location: Vec2,
    pub location: Vec2,
    pub last_touched_location: Vec2,
    /// Cell frame at pick-up.
    pub origin: Rect,
    pub snapshot: SnapshotId,
}

impl DragSession {
    pub fn drop_index(&self) -> usize {
        self.last_touched_index.unwrap_or(self.start_index)
    }
}

#[derive(Debug, Default, PartialEq)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging(DragSession),
    /// Released; the snapshot is animating into its final cell.
    Settling(DragSession),
}

impl DragPhase {
    pub fn is_active(&self) -> bool {
        !matches!(self, DragPhase::Idle)
    }

    pub fn session(&self) -> Option<&DragSession> {
        match self {
            DragPhase::Idle => None,
            DragPhase::Dragging(s) | DragPhase::Settling(s) => Some(s),
        }
    }

    pub fn moving_index(&self) -> Option<usize> {
        self.session().map(|s| s.moving_index)
    }

    pub(crate) fn into_session(self) -> Option<DragSession> {
        match self {
            DragPhase::Idle => None,
            DragPhase::Dragging(s) | DragPhase::Settling(s) => Some(s),
        }
    }
}

impl<H: DeckHost> CardDeck<H> {
    pub fn drag_phase(&self) -> &DragPhase {
        &self.drag
    }

    /// Feeds the reorder recogniser. `Began` is only honoured with nothing
    /// selected and a movable card under the pointer.
    pub fn handle_long_press(&mut self, event: GestureEvent) {
        match event.phase {
            GesturePhase::Began => {
                if let Err(err) = self.begin_drag(event.location) {
                    match err {
                        DeckError::DragRejected(_) => log::debug!("{err}"),
                        _ => log::warn!("drag aborted: {err}"),
                    }
                }
            }
            GesturePhase::Changed => self.drag_moved(event.location),
            GesturePhase::Ended => self.end_drag(),
            GesturePhase::Cancelled => self.cancel_drag(),
        }
    }

    fn begin_drag(&mut self, location: Vec2) -> DeckResult<()> {
        if self.drag.is_active() {
            return Err(DeckError::DragRejected(DragRejection::AlreadyDragging));
        }
        if !self.selection.phase.is_idle() {
            return Err(DeckError::DragRejected(DragRejection::CardSelected));
        }
        let index = self
            .host
            .index_at(location)
            .ok_or(DeckError::DragRejected(DragRejection::NoCardAtPoint))?;
        let first_movable = self.config.first_movable_index();
        if index < first_movable {
            return Err(DeckError::DragRejected(DragRejection::NotMovable {
                index,
                first_movable,
            }));
        }
        let origin = self
            .host
            .cell_frame(index)
            .ok_or(DeckError::CellNotFound(index))?;
        let snapshot = self
            .host
            .snapshot_cell(index)
            .ok_or(DeckError::DragRejected(DragRejection::NoSnapshot(index)))?;

        self.host.set_snapshot_frame(snapshot, origin, None, None);
        self.host.place_snapshot(snapshot, SnapshotPlacement::Above(index));
        self.host.set_cell_alpha(index, 0.0);
        let lifted = origin.with_y(origin.y - LIFT_OFFSET);
        self.host
            .set_snapshot_frame(snapshot, lifted, Some(AnimationSpec::lift()), None);

        log::debug!("drag started on card {index}");
        self.drag = DragPhase::Dragging(DragSession {
            start_index: index,
            last_touched_index: None,
            moving_index: index,
            start_location: location,
            location,
            last_touched_location: location,
            origin,
            snapshot,
        });
        Ok(())
    }

    /// Pointer moved, or content scrolled under a still pointer.
    pub(crate) fn drag_moved(&mut self, location: Vec2) {
        let DragPhase::Dragging(session) = &mut self.drag else {
            return;
        };
        session.location = location;
        let center = session.origin.center();
        let dy = location.y - session.start_location.y - LIFT_OFFSET;
        let frame = session
            .origin
            .centered_at(Vec2::new(center.x, center.y + dy));
        let snapshot = session.snapshot;

        self.host.set_snapshot_frame(snapshot, frame, None, None);
        self.update_autoscroll(location.y);
        self.swap_under_pointer();
    }

    fn swap_under_pointer(&mut self) {
        let DragPhase::Dragging(session) = &self.drag else {
            return;
        };
        let location = session.location;
        let fallback = session.last_touched_location;
        let anchor = session.drop_index();
        let snapshot = session.snapshot;

        let Some(index) = self
            .host
            .index_at(location)
            .or_else(|| self.host.index_at(fallback))
        else {
            return;
        };
        if let DragPhase::Dragging(session) = &mut self.drag {
            session.last_touched_location = location;
        }
        // swaps never land below the first movable slot
        if index < self.config.first_movable_index() || index == anchor {
            return;
        }

        if self.host.cell_frame(index).is_some() {
            let head = layout::effective_head_height(&self.config, &self.host.viewport());
            let dy = if index > anchor { -head } else { head };
            self.host.slide_cell(index, dy, AnimationSpec::slide());
        }
        self.host.move_item(index, anchor);
        if let DragPhase::Dragging(session) = &mut self.drag {
            session.moving_index = index;
            session.last_touched_index = Some(index);
        }
        log::trace!("drag swap: card {index} moved to {anchor}");

        let placement = if self.host.cell_frame(index).is_some() {
            SnapshotPlacement::Below(index)
        } else {
            SnapshotPlacement::Back
        };
        self.host.place_snapshot(snapshot, placement);
    }

    fn end_drag(&mut self) {
        self.stop_autoscroll();
        let session = match std::mem::take(&mut self.drag) {
            DragPhase::Dragging(session) => session,
            other => {
                self.drag = other;
                return;
            }
        };

        let drop = session.drop_index();
        match self.host.cell_frame(drop) {
            Some(frame) => {
                let key = self.transitions.begin(Continuation::DragSettled);
                self.host.set_snapshot_frame(
                    session.snapshot,
                    frame,
                    Some(AnimationSpec::settle()),
                    Some(key),
                );
                self.drag = DragPhase::Settling(session);
            }
            None => {
                log::debug!("drop target {drop} not realised, dropping in place");
                self.release_drag(session, true);
            }
        }
    }

    pub(crate) fn drag_settled(&mut self) {
        match std::mem::take(&mut self.drag) {
            DragPhase::Settling(session) => {
                let reordered = session.drop_index() != session.start_index;
                self.release_drag(session, reordered);
            }
            other => self.drag = other,
        }
    }

    fn cancel_drag(&mut self) {
        self.stop_autoscroll();
        if let Some(session) = std::mem::take(&mut self.drag).into_session() {
            self.release_drag(session, true);
        }
    }

    /// The one exit from an active drag. Consumes the session, so the snapshot
    /// is removed exactly once.
    fn release_drag(&mut self, session: DragSession, reload: bool) {
        self.stop_autoscroll();
        self.host.remove_snapshot(session.snapshot);
        log::debug!(
            "drag finished: {} -> {}",
            session.start_index,
            session.drop_index()
        );
        if reload {
            self.invalidate(Invalidation::RELOAD, None);
        } else {
            self.invalidate(Invalidation::LAYOUT, None);
        }
    }
}
