//! Recording host and delegate for the controller tests.
//!
//! `MockHost` lays cells out 80 points apart, 300 tall, the way the default
//! config stacks an unselected deck scrolled to the top, and hit-tests by
//! head: `index_at(y) = y / 80`.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::ops::Range;
use std::rc::Rc;

use cardstack_core::{
    AnimationSpec, DeckConfig, EdgeInsets, Invalidation, Rect, Size, Transform, Vec2,
    ViewportGeometry,
};

use crate::CardDeck;
use crate::gestures::{GestureEvent, GesturePhase};
use crate::host::{
    DeckDelegate, DeckHost, FlipDirection, FlipTransition, FlipViewId, SnapshotId,
    SnapshotPlacement,
};
use crate::transition::{DeckRequests, TransitionKey};

pub const HEAD: f32 = 80.0;
pub const CELL_HEIGHT: f32 = 300.0;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Clone, Debug, PartialEq)]
pub enum HostCall {
    MoveItem(usize, usize),
    /// Invalidation and whether a completion was requested.
    Invalidate(Invalidation, bool),
    ScrollEnabled(bool),
    ContentOffset(f32),
    TimerStarted,
    TimerStopped,
    Snapshot(usize),
    SnapshotFrame(Rect, bool),
    PlaceSnapshot(SnapshotPlacement),
    RemoveSnapshot(SnapshotId),
    CellAlpha(usize, f32),
    SlideCell(usize, f32),
    CellTransform(usize, Transform, bool),
    Flip(FlipDirection, FlipViewId),
    RemoveFlipView(FlipViewId),
    ContentInteraction(usize, bool),
    EndEditing,
}

pub struct MockHost {
    pub size: Size,
    pub offset: f32,
    pub insets: EdgeInsets,
    /// Original index of the item in each slot.
    pub items: Vec<usize>,
    /// Cells treated as off-screen.
    pub unrealised: Vec<usize>,
    /// Content y range with no cell under it.
    pub gap: Option<Range<f32>>,
    pub scroll_enabled: bool,
    pub timer_running: bool,
    pub live_snapshots: Vec<SnapshotId>,
    /// Completions owed to the deck, oldest first.
    pub pending: VecDeque<TransitionKey>,
    calls: Rc<RefCell<Vec<HostCall>>>,
    next_snapshot: u64,
}

impl MockHost {
    pub fn new(count: usize) -> Self {
        Self {
            size: Size::new(320.0, 1000.0),
            offset: 0.0,
            insets: EdgeInsets::default(),
            items: (0..count).collect(),
            unrealised: Vec::new(),
            gap: None,
            scroll_enabled: true,
            timer_running: false,
            live_snapshots: Vec::new(),
            pending: VecDeque::new(),
            calls: Rc::new(RefCell::new(Vec::new())),
            next_snapshot: 1,
        }
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.borrow().clone()
    }

    /// The call log, still readable after the deck (and this host) is dropped.
    pub fn shared_calls(&self) -> Rc<RefCell<Vec<HostCall>>> {
        self.calls.clone()
    }

    pub fn clear_calls(&mut self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: HostCall) {
        self.calls.borrow_mut().push(call);
    }

    fn track(&mut self, done: Option<TransitionKey>) {
        if let Some(key) = done {
            self.pending.push_back(key);
        }
    }
}

impl DeckHost for MockHost {
    fn viewport(&self) -> ViewportGeometry {
        let count = self.items.len();
        ViewportGeometry::new(self.size, count)
            .with_offset(self.offset)
            .with_insets(self.insets)
            .with_content_size(Size::new(self.size.width, HEAD * count as f32))
    }

    fn index_at(&self, point: Vec2) -> Option<usize> {
        if point.y < 0.0 || self.gap.as_ref().is_some_and(|g| g.contains(&point.y)) {
            return None;
        }
        let index = (point.y / HEAD) as usize;
        (index < self.items.len()).then_some(index)
    }

    fn cell_frame(&self, index: usize) -> Option<Rect> {
        if index >= self.items.len() || self.unrealised.contains(&index) {
            return None;
        }
        Some(Rect::new(
            0.0,
            HEAD * index as f32,
            self.size.width,
            CELL_HEIGHT,
        ))
    }

    fn move_item(&mut self, from: usize, to: usize) {
        self.record(HostCall::MoveItem(from, to));
        let item = self.items.remove(from);
        self.items.insert(to, item);
    }

    fn invalidate(&mut self, what: Invalidation, done: Option<TransitionKey>) {
        self.record(HostCall::Invalidate(what, done.is_some()));
        self.track(done);
    }

    fn set_content_offset(&mut self, offset: Vec2) {
        self.record(HostCall::ContentOffset(offset.y));
        self.offset = offset.y;
    }

    fn set_scroll_enabled(&mut self, enabled: bool) {
        self.record(HostCall::ScrollEnabled(enabled));
        self.scroll_enabled = enabled;
    }

    fn start_frame_timer(&mut self) {
        self.record(HostCall::TimerStarted);
        self.timer_running = true;
    }

    fn stop_frame_timer(&mut self) {
        self.record(HostCall::TimerStopped);
        self.timer_running = false;
    }

    fn snapshot_cell(&mut self, index: usize) -> Option<SnapshotId> {
        self.record(HostCall::Snapshot(index));
        self.cell_frame(index)?;
        let id = SnapshotId(self.next_snapshot);
        self.next_snapshot += 1;
        self.live_snapshots.push(id);
        Some(id)
    }

    fn set_snapshot_frame(
        &mut self,
        _id: SnapshotId,
        frame: Rect,
        spec: Option<AnimationSpec>,
        done: Option<TransitionKey>,
    ) {
        self.record(HostCall::SnapshotFrame(frame, spec.is_some()));
        self.track(done);
    }

    fn place_snapshot(&mut self, _id: SnapshotId, placement: SnapshotPlacement) {
        self.record(HostCall::PlaceSnapshot(placement));
    }

    fn remove_snapshot(&mut self, id: SnapshotId) {
        self.record(HostCall::RemoveSnapshot(id));
        self.live_snapshots.retain(|s| *s != id);
    }

    fn set_cell_alpha(&mut self, index: usize, alpha: f32) {
        self.record(HostCall::CellAlpha(index, alpha));
    }

    fn slide_cell(&mut self, index: usize, dy: f32, _spec: AnimationSpec) {
        self.record(HostCall::SlideCell(index, dy));
    }

    fn set_cell_transform(
        &mut self,
        index: usize,
        transform: Transform,
        spec: Option<AnimationSpec>,
        done: Option<TransitionKey>,
    ) {
        self.record(HostCall::CellTransform(index, transform, spec.is_some()));
        self.track(done);
    }

    fn flip_card(&mut self, flip: FlipTransition, done: TransitionKey) {
        self.record(HostCall::Flip(flip.direction, flip.view));
        self.pending.push_back(done);
    }

    fn remove_flip_view(&mut self, view: FlipViewId) {
        self.record(HostCall::RemoveFlipView(view));
    }

    fn set_content_interaction(&mut self, index: usize, enabled: bool) {
        self.record(HostCall::ContentInteraction(index, enabled));
    }

    fn end_editing(&mut self) {
        self.record(HostCall::EndEditing);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DelegateEvent {
    CanSelect(usize),
    CanUnselect(usize),
    WillSelect(usize),
    DidSelect(usize),
    WillUnselect(usize),
    DidUnselect(usize),
    Tapped(usize),
}

pub struct MockDelegate {
    events: Rc<RefCell<Vec<DelegateEvent>>>,
    allow_select: Cell<bool>,
    allow_unselect: Cell<bool>,
    tap_selects: bool,
    unselect_on_select: bool,
}

impl MockDelegate {
    pub fn new() -> (Self, Rc<RefCell<Vec<DelegateEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let delegate = Self {
            events: events.clone(),
            allow_select: Cell::new(true),
            allow_unselect: Cell::new(true),
            tap_selects: true,
            unselect_on_select: false,
        };
        (delegate, events)
    }

    pub fn allow_select(self, allow: bool) -> Self {
        self.allow_select.set(allow);
        self
    }

    pub fn allow_unselect(self, allow: bool) -> Self {
        self.allow_unselect.set(allow);
        self
    }

    pub fn tap_selects(mut self, selects: bool) -> Self {
        self.tap_selects = selects;
        self
    }

    /// Asks for an unselect from inside `did_select`.
    pub fn unselect_on_select(mut self) -> Self {
        self.unselect_on_select = true;
        self
    }

    fn push(&self, event: DelegateEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl DeckDelegate for MockDelegate {
    fn can_select(&mut self, index: usize) -> bool {
        self.push(DelegateEvent::CanSelect(index));
        self.allow_select.get()
    }

    fn can_unselect(&mut self, index: usize) -> bool {
        self.push(DelegateEvent::CanUnselect(index));
        self.allow_unselect.get()
    }

    fn will_select(&mut self, index: usize, _requests: &mut DeckRequests) {
        self.push(DelegateEvent::WillSelect(index));
    }

    fn did_select(&mut self, index: usize, requests: &mut DeckRequests) {
        self.push(DelegateEvent::DidSelect(index));
        if self.unselect_on_select {
            requests.unselect();
        }
    }

    fn will_unselect(&mut self, index: usize, _requests: &mut DeckRequests) {
        self.push(DelegateEvent::WillUnselect(index));
    }

    fn did_unselect(&mut self, index: usize, _requests: &mut DeckRequests) {
        self.push(DelegateEvent::DidUnselect(index));
    }

    fn did_tap_card(&mut self, index: usize, requests: &mut DeckRequests) {
        self.push(DelegateEvent::Tapped(index));
        if self.tap_selects {
            requests.select(index);
        }
    }
}

/// A deck of `count` cards scrolled to the top. Heads stay at 80 points so
/// the deck's attributes line up with the mock's hit testing.
pub fn deck(count: usize) -> CardDeck<MockHost> {
    let mut config = DeckConfig::default();
    config.set_card_should_expand_head_height(false);
    CardDeck::new(MockHost::new(count), config)
}

pub fn press(phase: GesturePhase, y: f32) -> GestureEvent {
    GestureEvent::new(phase, Vec2::new(10.0, y))
}

/// Completes every transition the host owes, including ones started by
/// earlier completions.
pub fn settle(deck: &mut CardDeck<MockHost>) {
    for _ in 0..64 {
        let Some(key) = deck.host_mut().pending.pop_front() else {
            return;
        };
        deck.finish_transition(key);
    }
    panic!("transitions did not settle");
}
