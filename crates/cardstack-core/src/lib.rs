//! # Card stack layout
//!
//! `cardstack-core` holds the pure part of the card deck: everything that can
//! be computed from a configuration, a viewport snapshot and a little
//! interaction state, with no host or timeline involved.
//!
//! - [`DeckConfig`]: clamped options plus the [`Invalidation`] each one needs.
//! - [`ViewportGeometry`]: the host's scroll view for one pass.
//! - [`layout::generate`]: attributes for every card, reusing an
//!   [`AttributeArena`] between passes.
//! - [`snap::target_content_offset`]: deceleration target correction.
//!
//! ```rust
//! use cardstack_core::*;
//!
//! let mut cfg = DeckConfig::default();
//! cfg.set_space_at_top_for_background_view(100.0);
//!
//! let vp = ViewportGeometry::new(Size::new(390.0, 844.0), 12);
//! let vp = vp.with_content_size(layout::content_size(&cfg, &vp));
//!
//! let target = snap::target_content_offset(&cfg, &vp, Vec2::new(0.0, 30.0), Vec2::ZERO);
//! assert_eq!(target.y, 0.0);
//!
//! let mut arena = AttributeArena::new();
//! layout::generate(&cfg, &vp, LayoutSelection::default(), &mut arena);
//! assert_eq!(arena.get(0).unwrap().frame.y, 100.0);
//! ```
//!
//! The interactive side (selection, drag-reorder, autoscroll) lives in
//! `cardstack-ui` and drives these functions.

pub mod animation;
pub mod attributes;
pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod snap;
pub mod tests;
pub mod viewport;

pub use animation::{AnimationSpec, Easing, Interpolate};
pub use attributes::*;
pub use config::*;
pub use error::*;
pub use geometry::*;
pub use layout::{BottomStack, LayoutMetrics, LayoutPass, LayoutSelection};
pub use viewport::*;
