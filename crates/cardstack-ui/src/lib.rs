//! Interaction layer for card decks.
//!
//! [`CardDeck`] wraps a [`DeckHost`] and drives it through selection,
//! flipping, drag-reordering and autoscroll, using `cardstack-core` for the
//! layout itself. Everything runs on the host's UI thread. Animated changes
//! are requested from the host with a [`TransitionKey`] and resumed when the
//! host hands the key back:
//!
//! ```rust,ignore
//! let mut deck = CardDeck::new(host, DeckConfig::default()).with_delegate(policy);
//!
//! // in the host's layout pass
//! deck.prepare();
//! for attr in deck.attributes_in_rect(visible) {
//!     apply(attr);
//! }
//!
//! // input and animation callbacks
//! if let Some(g) = recognizer.pointer(input, Instant::now()) {
//!     deck.handle_press(g);
//! }
//! deck.finish_transition(key);
//! ```

pub mod autoscroll;
pub mod deck;
pub mod dismiss;
pub mod drag;
pub mod gestures;
pub mod host;
pub mod selection;
pub mod transition;

#[cfg(test)]
pub(crate) mod testing;

pub use autoscroll::{Autoscroll, ScrollDirection};
pub use deck::CardDeck;
pub use drag::{DragPhase, DragSession};
pub use gestures::{GestureEvent, GesturePhase, PointerInput, PressGesture, PressRecognizer};
pub use host::{
    DeckDelegate, DeckHost, FlipDirection, FlipTransition, FlipViewId, SnapshotId,
    SnapshotPlacement,
};
pub use selection::SelectionPhase;
pub use transition::{Completion, DeckRequest, DeckRequests, TransitionKey};
