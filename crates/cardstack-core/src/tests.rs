#[cfg(test)]
mod tests {
    use crate::layout::{self, LayoutSelection};
    use crate::snap;
    use crate::*;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_keyboard_latch_keeps_bottom_stack_steady() {
        init_logging();
        let cfg = DeckConfig::default();
        let base = ViewportGeometry::new(Size::new(320.0, 1000.0), 20)
            .with_insets(EdgeInsets::new(0.0, 0.0, 40.0, 0.0));
        let selection = LayoutSelection {
            selected: Some(3),
            moving: None,
        };

        let mut latch = BottomInsetLatch::default();
        let mut arena = AttributeArena::new();
        layout::generate(&cfg, &latch.resolve(base), selection, &mut arena);
        let before = arena.get(4).unwrap().frame;

        latch.set_frozen(true);
        let keyboard_up = base.with_insets(EdgeInsets::new(0.0, 0.0, 336.0, 0.0));
        layout::generate(&cfg, &latch.resolve(keyboard_up), selection, &mut arena);
        assert_eq!(arena.get(4).unwrap().frame, before);

        latch.set_frozen(false);
        layout::generate(&cfg, &latch.resolve(keyboard_up), selection, &mut arena);
        assert!(arena.get(4).unwrap().frame.y < before.y);
    }

    #[test]
    fn test_snapped_offset_lays_out_head_on_top() {
        init_logging();
        let mut cfg = DeckConfig::default();
        cfg.set_card_should_expand_head_height(false);
        cfg.set_scroll_should_snap_card_head(true);
        let vp = ViewportGeometry::new(Size::new(320.0, 1000.0), 40);
        let vp = vp.with_content_size(layout::content_size(&cfg, &vp));

        let target = snap::target_content_offset(&cfg, &vp, Vec2::new(0.0, 250.0), Vec2::ZERO);
        assert_eq!(target.y, 240.0);

        let mut arena = AttributeArena::new();
        layout::generate(
            &cfg,
            &vp.with_offset(target.y),
            LayoutSelection::default(),
            &mut arena,
        );
        let top = arena.get(3).unwrap();
        assert_eq!(top.frame.y, 240.0);
        assert!(!top.hidden);
        assert!(arena.get(2).unwrap().hidden);
    }

    #[test]
    fn test_attributes_interpolate_towards_target() {
        let from = CardAttributes::new(2, Rect::new(0.0, 160.0, 320.0, 600.0));
        let mut to = from.clone();
        to.frame.y = 960.0;
        to.transform = Transform::scale(0.98);
        to.hidden = true;

        let mid = from.interpolate(&to, 0.5);
        assert_eq!(mid.frame.y, 560.0);
        assert!((mid.transform.scale_x - 0.99).abs() < 1e-5);
        assert!(mid.hidden);
    }
}
