use crate::animation::Interpolate;
use crate::{Rect, Size, Transform};

/// Visual state of one card for one layout pass.
///
/// The host applies these to its cell visuals and must treat them as
/// read-only. `is_expanded` doubles as the "content accepts input" switch:
/// collapsed cards must not receive input inside their content.
#[derive(Clone, Debug, PartialEq)]
pub struct CardAttributes {
    pub index: usize,
    pub frame: Rect,
    pub alpha: f32,
    pub hidden: bool,
    pub transform: Transform,
    pub z_index: i32,
    pub is_expanded: bool,
}

impl CardAttributes {
    pub fn new(index: usize, frame: Rect) -> Self {
        Self {
            index,
            frame,
            alpha: 1.0,
            hidden: false,
            transform: Transform::identity(),
            z_index: i32::try_from(index).unwrap_or(i32::MAX),
            is_expanded: false,
        }
    }

    pub fn size(&self) -> Size {
        self.frame.size()
    }
}

impl Interpolate for CardAttributes {
    /// Geometry and alpha blend; discrete flags take the target's value.
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        CardAttributes {
            index: other.index,
            frame: self.frame.interpolate(&other.frame, t),
            alpha: self.alpha.interpolate(&other.alpha, t),
            hidden: other.hidden,
            transform: self.transform.interpolate(&other.transform, t),
            z_index: other.z_index,
            is_expanded: other.is_expanded,
        }
    }
}

/// Attribute storage keyed by item index, reused across passes.
///
/// While the item count is stable only a window of entries is rewritten per
/// pass and the rest keep last pass's values. A count change invalidates the
/// whole arena and the next pass fills it from scratch.
#[derive(Clone, Debug, Default)]
pub struct AttributeArena {
    items: Vec<CardAttributes>,
}

impl AttributeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when cached entries cannot be reused for a deck of `item_count`.
    pub fn needs_full_pass(&self, item_count: usize) -> bool {
        self.items.len() != item_count
    }

    pub fn invalidate(&mut self) {
        self.items.clear();
    }

    /// Stores `attr` at its own index. Indices past the end append; callers
    /// write a full pass in ascending order after an invalidate.
    pub fn put(&mut self, attr: CardAttributes) {
        let i = attr.index;
        if i < self.items.len() {
            self.items[i] = attr;
        } else {
            debug_assert_eq!(i, self.items.len(), "arena filled out of order");
            self.items.push(attr);
        }
    }

    pub fn get(&self, index: usize) -> Option<&CardAttributes> {
        self.items.get(index)
    }

    pub fn as_slice(&self) -> &[CardAttributes] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardAttributes> {
        self.items.iter()
    }

    /// Every attribute whose frame overlaps `rect`.
    pub fn in_rect(&self, rect: Rect) -> impl Iterator<Item = &CardAttributes> + '_ {
        self.items.iter().filter(move |a| a.frame.intersects(&rect))
    }
}
