// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the pull-to-refresh controller driven through arbitrary
//! touch sequences.

use kurbo::Point;
use proptest::prelude::*;
use understory_pull_refresh::{
    FrameStatus, FrameToken, PullConfig, PullHost, PullToRefresh, RefreshOutcome, RefreshTicket,
    Touch, TouchId,
};

const FINGER: TouchId = TouchId(3);

#[derive(Debug, Default)]
struct RecordingHost {
    offset: f64,
    min_written: Option<f64>,
    frame: Option<FrameToken>,
    tickets: Vec<RefreshTicket>,
}

impl PullHost for RecordingHost {
    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.offset = offset;
        self.min_written = Some(self.min_written.map_or(offset, |min| min.min(offset)));
    }

    fn request_frame(&mut self, token: FrameToken) {
        self.frame = Some(token);
    }

    fn refresh(&mut self, ticket: RefreshTicket) {
        self.tickets.push(ticket);
    }
}

fn touch(y: f64) -> Touch {
    Touch::new(FINGER, Point::new(0.0, y))
}

/// Drive one drag from `start_y` through `moves` and release it.
fn drag(pull: &mut PullToRefresh<RecordingHost>, start_y: f64, moves: &[f64]) {
    pull.on_touch_start(&[touch(start_y)]);
    for y in moves {
        pull.on_touch_move(&[touch(*y)]);
    }
}

fn resting_offset(scroll_start: f64, start_y: f64, moves: &[f64]) -> f64 {
    // The clamp shifts the origin, so replay it to recover the last raw delta.
    let mut origin = start_y;
    let mut delta = 0.0;
    for y in moves {
        delta = y - origin;
        let proposed = scroll_start - delta;
        if proposed < 0.0 {
            origin -= proposed;
        }
    }
    scroll_start - delta
}

fn settle_to_end(pull: &mut PullToRefresh<RecordingHost>, start: u64, step: u64) -> u64 {
    let mut now = start;
    while let Some(token) = pull.host_mut().frame.take() {
        now += step;
        if pull.on_frame(token, now) != FrameStatus::Running {
            break;
        }
    }
    now
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// The rubber-band clamp keeps every written offset non-negative.
    #[test]
    fn drag_never_writes_negative_offsets(
        start_y in 0.0..800.0_f64,
        moves in prop::collection::vec(-400.0..1200.0_f64, 1..40),
    ) {
        let mut pull = PullToRefresh::mount(RecordingHost::default(), PullConfig::default());
        drag(&mut pull, start_y, &moves);
        let min = pull.host().min_written.unwrap();
        prop_assert!(min >= 0.0, "wrote {min}");
    }

    /// A refresh is requested exactly when the resting offset at release is <= 0.
    #[test]
    fn commit_matches_resting_offset(
        start_y in 0.0..800.0_f64,
        moves in prop::collection::vec(0.0..800.0_f64, 0..20),
    ) {
        let mut pull = PullToRefresh::mount(RecordingHost::default(), PullConfig::default());
        drag(&mut pull, start_y, &moves);
        pull.on_touch_end(&[], 0);
        let expected = usize::from(resting_offset(70.0, start_y, &moves) <= 0.0);
        prop_assert_eq!(pull.host().tickets.len(), expected);
    }

    /// Repeated commit-eligible gestures while loading never start a second refresh.
    #[test]
    fn at_most_one_refresh_in_flight(attempts in 1_usize..8) {
        let mut pull = PullToRefresh::mount(RecordingHost::default(), PullConfig::default());
        for _ in 0..attempts {
            drag(&mut pull, 100.0, &[300.0]);
            pull.on_touch_end(&[], 0);
        }
        prop_assert_eq!(pull.host().tickets.len(), 1);
        prop_assert!(pull.is_loading());
    }

    /// The settle animation always ends exactly at the loading height.
    #[test]
    fn settle_terminates_at_loading_height(
        start_offset in 0.0..500.0_f64,
        loading_height in 1.0..200.0_f64,
        duration in 1_u64..2_000,
        frame_step in 1_u64..50,
    ) {
        let config = PullConfig::new()
            .with_loading_height(loading_height)
            .with_animation_duration(duration);
        let mut pull = PullToRefresh::mount(RecordingHost::default(), config);
        pull.host_mut().offset = start_offset;
        pull.on_touch_start(&[touch(0.0)]);
        pull.on_touch_cancel(1_000);

        let end = settle_to_end(&mut pull, 1_000, frame_step);
        prop_assert!(!pull.is_settling());
        prop_assert!(end - 1_000 < duration + frame_step);
        if start_offset <= loading_height {
            prop_assert_eq!(pull.host().offset, loading_height);
        } else {
            prop_assert_eq!(pull.host().offset, start_offset);
        }
    }

    /// A refresh that settles, however it settles, always returns to the loading height.
    #[test]
    fn refresh_outcome_does_not_change_settling(failed in any::<bool>()) {
        let mut pull = PullToRefresh::mount(RecordingHost::default(), PullConfig::default());
        drag(&mut pull, 100.0, &[400.0]);
        pull.on_touch_end(&[], 0);
        let ticket = pull.host().tickets[0];
        let outcome = if failed { RefreshOutcome::Failure } else { RefreshOutcome::Success };
        prop_assert!(pull.finish_refresh(ticket, outcome, 10));
        settle_to_end(&mut pull, 10, 16);
        prop_assert_eq!(pull.host().offset, 70.0);
    }
}

#[test]
fn scenario_short_pull_settles() {
    let mut pull = PullToRefresh::mount(RecordingHost::default(), PullConfig::default());
    drag(&mut pull, 200.0, &[260.0]);
    assert_eq!(pull.host().offset, 10.0);
    pull.on_touch_end(&[], 0);
    assert!(pull.host().tickets.is_empty());
    assert!(pull.is_settling());
    settle_to_end(&mut pull, 0, 16);
    assert_eq!(pull.host().offset, 70.0);
}

#[test]
fn scenario_full_pull_refreshes() {
    let mut pull = PullToRefresh::mount(RecordingHost::default(), PullConfig::default());
    drag(&mut pull, 200.0, &[280.0]);
    assert_eq!(pull.host().offset, 0.0);
    assert_eq!(pull.session().unwrap().origin_y, 210.0);
    pull.on_touch_end(&[], 0);
    assert_eq!(pull.host().tickets.len(), 1);
    assert!(pull.host().frame.is_none());
    assert_eq!(pull.host().offset, 0.0);
}

#[test]
fn scenario_touch_while_loading() {
    let mut pull = PullToRefresh::mount(RecordingHost::default(), PullConfig::default());
    drag(&mut pull, 200.0, &[280.0]);
    pull.on_touch_end(&[], 0);
    assert!(!pull.on_touch_start(&[touch(50.0)]));
    assert!(pull.session().is_none());
    assert_eq!(pull.host().offset, 0.0);
}
