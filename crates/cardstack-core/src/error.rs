use thiserror::Error;

/// Why a deck operation did not proceed.
///
/// None of these are fatal. Public entry points log them and fall through,
/// so a caller only ever observes "the completion never ran".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("index {index} is outside the deck (item count {count})")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("no realised cell for item {0}")]
    CellNotFound(usize),

    #[error("no card is selected")]
    NothingSelected,

    #[error("a selection transition is already running")]
    SelectionBusy,

    #[error("drag rejected: {0}")]
    DragRejected(DragRejection),

    #[error("transition key is stale or unknown")]
    UnknownTransition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DragRejection {
    #[error("a card is selected")]
    CardSelected,
    #[error("no card under the pointer")]
    NoCardAtPoint,
    #[error("item {index} is below the first movable index {first_movable}")]
    NotMovable { index: usize, first_movable: usize },
    #[error("host could not snapshot item {0}")]
    NoSnapshot(usize),
    #[error("a drag is already in progress")]
    AlreadyDragging,
}

pub type DeckResult<T> = Result<T, DeckError>;

/// `Ok` if `index` addresses an item of a deck with `count` items.
pub fn check_index(index: usize, count: usize) -> DeckResult<usize> {
    if index < count {
        Ok(index)
    } else {
        Err(DeckError::IndexOutOfRange { index, count })
    }
}
