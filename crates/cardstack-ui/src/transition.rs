use std::collections::VecDeque;

use slotmap::{SlotMap, new_key_type};

use crate::host::FlipViewId;
use crate::selection::{ChainedSelect, ChainedUnselect};

new_key_type! {
    /// Names one in-flight host transition. Generational, so a key that was
    /// already finished (or never issued by this deck) is recognised as stale.
    pub struct TransitionKey;
}

/// Caller callback run when an operation completes. Dropped unrun when the
/// operation is vetoed or superseded.
pub type Completion = Box<dyn FnOnce()>;

pub(crate) fn run(completion: Option<Completion>) {
    if let Some(f) = completion {
        f();
    }
}

/// What the deck does once the host reports a transition finished.
pub(crate) enum Continuation {
    Selected {
        index: usize,
        completion: Option<Completion>,
    },
    Unselected {
        from: usize,
        completion: Option<Completion>,
        then: Option<ChainedSelect>,
    },
    FlippedOut {
        index: usize,
        view: FlipViewId,
        completion: Option<Completion>,
    },
    FlippedBack {
        index: usize,
        view: FlipViewId,
        completion: Option<Completion>,
        then: Option<ChainedUnselect>,
    },
    DragSettled,
    DismissSettled {
        index: usize,
        unselect: bool,
    },
}

impl Continuation {
    fn name(&self) -> &'static str {
        match self {
            Continuation::Selected { .. } => "select",
            Continuation::Unselected { .. } => "unselect",
            Continuation::FlippedOut { .. } => "flip",
            Continuation::FlippedBack { .. } => "flip back",
            Continuation::DragSettled => "drag settle",
            Continuation::DismissSettled { .. } => "dismiss",
        }
    }
}

/// Continuations waiting on the host. Each runs at most once.
#[derive(Default)]
pub(crate) struct Transitions {
    pending: SlotMap<TransitionKey, Continuation>,
}

impl Transitions {
    pub fn begin(&mut self, next: Continuation) -> TransitionKey {
        let name = next.name();
        let key = self.pending.insert(next);
        log::debug!("transition {key:?} started: {name}");
        key
    }

    pub fn take(&mut self, key: TransitionKey) -> Option<Continuation> {
        self.pending.remove(key)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeckRequest {
    Select(usize),
    /// Forced unselect, as [`CardDeck::unselect_card`](crate::CardDeck::unselect_card).
    Unselect,
    FlipBack,
}

/// Operations asked for from inside a delegate hook, run in order after the
/// operation that invoked the hook.
#[derive(Debug, Default)]
pub struct DeckRequests {
    queue: VecDeque<DeckRequest>,
}

impl DeckRequests {
    pub fn select(&mut self, index: usize) {
        self.queue.push_back(DeckRequest::Select(index));
    }

    pub fn unselect(&mut self) {
        self.queue.push_back(DeckRequest::Unselect);
    }

    pub fn flip_back(&mut self) {
        self.queue.push_back(DeckRequest::FlipBack);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub(crate) fn pop(&mut self) -> Option<DeckRequest> {
        self.queue.pop_front()
    }
}
