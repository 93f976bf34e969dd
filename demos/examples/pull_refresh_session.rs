// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pull-to-refresh driven by a simulated host.
//!
//! This example shows how a host integrates `understory_pull_refresh`:
//! - forwarding touch events and native scroll notifications,
//! - running the frame loop the controller asks for,
//! - starting a refresh action and reporting its outcome through `RefreshFeedback`.
//!
//! The refresh action here "takes" 800ms and fails every other time.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example pull_refresh_session`

use kurbo::Point;
use understory_pull_refresh::{
    FrameStatus, FrameToken, PullConfig, PullHost, PullToRefresh, RefreshFeedback, RefreshTicket,
    Touch, TouchId,
};

const FRAME_MS: u64 = 16;
const ACTION_MS: u64 = 800;

/// A scroll container plus the host's scheduling state.
#[derive(Debug, Default)]
struct SimHost {
    offset: f64,
    frame: Option<FrameToken>,
    /// In-flight refresh action and the time it will settle at.
    action: Option<(RefreshTicket, u64)>,
    actions_started: u32,
    now: u64,
}

impl PullHost for SimHost {
    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    fn request_frame(&mut self, token: FrameToken) {
        self.frame = Some(token);
    }

    fn refresh(&mut self, ticket: RefreshTicket) {
        self.actions_started += 1;
        self.action = Some((ticket, self.now + ACTION_MS));
    }
}

struct Sim {
    pull: PullToRefresh<SimHost>,
    feedback: RefreshFeedback,
}

impl Sim {
    fn now(&self) -> u64 {
        self.pull.host().now
    }

    /// Advance one frame: settle the action if due, release feedback, run the animation.
    fn frame(&mut self) {
        let now = self.now() + FRAME_MS;
        self.pull.host_mut().now = now;

        if let Some((ticket, due)) = self.pull.host().action {
            if now >= due {
                self.pull.host_mut().action = None;
                let failed = self.pull.host().actions_started % 2 == 0;
                let result: Result<(), &str> = if failed { Err("offline") } else { Ok(()) };
                self.feedback.on_action_settled(ticket, result, now);
            }
        }
        if let Some((ticket, outcome)) = self.feedback.poll(now) {
            self.pull.finish_refresh(ticket, outcome, now);
        }
        if let Some(token) = self.pull.host_mut().frame.take() {
            if self.pull.on_frame(token, now) == FrameStatus::Finished {
                log::info!("settled at offset {}", self.pull.host().offset);
            }
        }
    }

    fn run_until_idle(&mut self) {
        while self.pull.host().action.is_some()
            || self.pull.is_loading()
            || self.pull.is_settling()
            || self.feedback.outcome().is_some()
        {
            self.frame();
        }
    }

    fn report(&self, label: &str) {
        println!(
            "{label:>28}: offset={:>6.1} indicator={:?}",
            self.pull.host().offset,
            self.feedback.indicator_for(&self.pull)
        );
    }

    /// One finger pulls from `from` to `to` in `steps` moves, then lifts.
    fn pull_gesture(&mut self, from: f64, to: f64, steps: u32) {
        let finger = TouchId(u64::from(self.pull.host().actions_started) + 1);
        let at = |y: f64| Touch::new(finger, Point::new(160.0, y));

        self.pull.on_touch_start(&[at(from)]);
        for i in 1..=steps {
            let y = from + (to - from) * f64::from(i) / f64::from(steps);
            self.pull.on_touch_move(&[at(y)]);
            // Hosts still deliver native scroll events during a drag.
            self.pull.on_scroll();
            self.frame();
        }
        self.report("before release");
        let now = self.now();
        let release = self.pull.on_touch_end(&[], now);
        println!("{:>28}: {release:?}", "released");
        self.report("after release");
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = PullConfig::new().with_loading_height(70.0);
    let mut sim = Sim {
        pull: PullToRefresh::mount(SimHost::default(), config),
        feedback: RefreshFeedback::new(),
    };
    sim.report("mounted");

    println!("-- short pull: 60px");
    sim.pull_gesture(200.0, 260.0, 6);
    sim.run_until_idle();
    sim.report("idle");

    println!("-- full pull: 120px, refresh succeeds");
    sim.pull_gesture(200.0, 320.0, 8);
    sim.frame();
    sim.report("loading");
    sim.run_until_idle();
    sim.report("idle");

    println!("-- full pull: 150px, refresh fails");
    sim.pull_gesture(200.0, 350.0, 8);
    while sim.feedback.outcome().is_none() {
        sim.frame();
    }
    sim.report("result shown");
    sim.run_until_idle();
    sim.report("idle");

    println!("-- momentum scroll at rest");
    sim.pull.host_mut().offset = 25.0;
    let response = sim.pull.on_scroll();
    println!("{:>28}: {response:?}", "scroll response");
    sim.report("corrected");

    let host = sim.pull.unmount();
    println!("refresh actions started: {}", host.actions_started);
}
