use crate::{DeckConfig, Vec2, ViewportGeometry};

/// Corrects the resting offset the host's deceleration is heading for.
///
/// Two snaps, first match wins:
/// 1. inside the background space at the top, go to whichever end is closer;
/// 2. with head snapping on and enough content, land on a head boundary.
///
/// `proposed` and the result are raw content offsets (top inset not yet
/// added). Velocity is accepted for hosts that pass it along but does not
/// influence the target.
pub fn target_content_offset(
    config: &DeckConfig,
    viewport: &ViewportGeometry,
    proposed: Vec2,
    _velocity: Vec2,
) -> Vec2 {
    let inset_top = viewport.content_inset.top;
    let p = proposed.y + inset_top;
    let space = config.space_at_top_for_background_view();

    if config.space_at_top_should_snap() && space > 0.0 && p > 0.0 && p < space {
        let y = if p < space * 0.5 { 0.0 } else { space };
        return Vec2::new(0.0, y - inset_top);
    }

    let head = config.card_head_height();
    if config.scroll_should_snap_card_head()
        && p > space
        && viewport.content_size.height > viewport.frame.h + head
    {
        let past = p - space;
        let next_slot = (past / head) as i64 + 1;
        let mut y = next_slot as f32 * head + space - inset_top;
        if past % head <= head * 0.5 {
            y -= head;
        }
        return Vec2::new(0.0, y);
    }

    proposed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EdgeInsets, Size};

    fn config(space: f32, snap_heads: bool) -> DeckConfig {
        let mut c = DeckConfig::default();
        c.set_space_at_top_for_background_view(space);
        c.set_scroll_should_snap_card_head(snap_heads);
        c
    }

    fn viewport() -> ViewportGeometry {
        ViewportGeometry::new(Size::new(320.0, 1000.0), 60)
            .with_content_size(Size::new(320.0, 4800.0))
    }

    fn snap(c: &DeckConfig, vp: &ViewportGeometry, y: f32) -> f32 {
        target_content_offset(c, vp, Vec2::new(0.0, y), Vec2::ZERO).y
    }

    #[test]
    fn background_space_snaps_to_nearest_end() {
        let c = config(100.0, false);
        let vp = viewport();
        assert_eq!(snap(&c, &vp, 30.0), 0.0);
        assert_eq!(snap(&c, &vp, 70.0), 100.0);
        // boundaries themselves pass through
        assert_eq!(snap(&c, &vp, 0.0), 0.0);
        assert_eq!(snap(&c, &vp, 100.0), 100.0);
    }

    #[test]
    fn background_snap_is_inset_aware() {
        let c = config(100.0, false);
        let vp = viewport().with_insets(EdgeInsets::new(20.0, 0.0, 0.0, 0.0));
        assert_eq!(snap(&c, &vp, 5.0), -20.0);
        assert_eq!(snap(&c, &vp, 50.0), 80.0);
    }

    #[test]
    fn background_snap_can_be_disabled() {
        let mut c = config(100.0, false);
        c.set_space_at_top_should_snap(false);
        assert_eq!(snap(&c, &viewport(), 30.0), 30.0);
    }

    #[test]
    fn head_snap_rounds_to_nearest_boundary() {
        let c = config(0.0, true);
        let vp = viewport();
        assert_eq!(snap(&c, &vp, 130.0), 160.0);
        assert_eq!(snap(&c, &vp, 100.0), 80.0);
        assert_eq!(snap(&c, &vp, 120.0), 80.0);
    }

    #[test]
    fn head_snap_needs_scrollable_content() {
        let c = config(0.0, true);
        let vp = viewport().with_content_size(Size::new(320.0, 1050.0));
        assert_eq!(snap(&c, &vp, 30.0), 30.0);
    }
}
