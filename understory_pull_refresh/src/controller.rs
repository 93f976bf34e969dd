// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pull-to-refresh controller.
//!
//! [`PullToRefresh`] owns a [`PullHost`] from [`mount`](PullToRefresh::mount) to
//! [`unmount`](PullToRefresh::unmount) and routes host events through the gesture
//! tracker, refresh lifecycle, settle animator, and scroll guard.
//!
//! ## Event flow
//!
//! ```text
//! touch start ──► session opened (cancels any settle animation)
//! touch move  ──► offset written from finger travel
//! touch end   ──► resting offset <= 0 ? host.refresh(ticket) : settle
//! finish_refresh(ticket) ──► loading cleared, settle
//! frame(token) ──► settle step, another frame requested until finished
//! scroll      ──► guard: suppress during drag, correct at rest
//! ```
//!
//! Everything runs synchronously inside the host's event handlers; the only
//! suspension points are the host's refresh action and the gaps between frames.

use crate::config::PullConfig;
use crate::guard::{self, GuardDecision, ScrollActivity};
use crate::lifecycle::{RefreshLifecycle, RefreshOutcome, RefreshPhase, RefreshTicket};
use crate::settle::{FrameToken, SettleAnimation, SettleAnimator, SettleStep, Tick};
use crate::touch::Touch;
use crate::tracker::{GestureTracker, Release, TouchSession};

/// The environment a [`PullToRefresh`] controller drives.
pub trait PullHost {
    /// Current scroll offset of the container.
    fn scroll_offset(&self) -> f64;

    /// Write the container's scroll offset.
    fn set_scroll_offset(&mut self, offset: f64);

    /// Ask for [`PullToRefresh::on_frame`] to be called with `token` before the next repaint.
    fn request_frame(&mut self, token: FrameToken);

    /// Start the refresh action.
    ///
    /// When the action settles, successfully or not, the host reports it through
    /// [`PullToRefresh::finish_refresh`] with the same `ticket`.
    fn refresh(&mut self, ticket: RefreshTicket);
}

bitflags::bitflags! {
    /// How the host should treat a native scroll notification.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ScrollResponse: u8 {
        /// Cancel the native scroll handling.
        const PREVENT_DEFAULT = 0b0000_0001;
        /// The controller wrote a corrected offset to the container.
        const CORRECTED       = 0b0000_0010;
    }
}

/// Result of [`PullToRefresh::on_frame`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// The token was superseded; nothing was done.
    Stale,
    /// The animation advanced and another frame was requested.
    Running,
    /// The animation reached its target.
    Finished,
}

/// Pull-to-refresh controller bound to a host container.
#[derive(Debug)]
pub struct PullToRefresh<H: PullHost> {
    host: H,
    config: PullConfig,
    tracker: GestureTracker,
    lifecycle: RefreshLifecycle,
    animator: SettleAnimator,
}

impl<H: PullHost> PullToRefresh<H> {
    /// Bind to `host` and scroll it to the loading height.
    ///
    /// `config` is [sanitized](PullConfig::sanitized) first.
    pub fn mount(mut host: H, config: PullConfig) -> Self {
        let config = config.sanitized();
        host.set_scroll_offset(config.loading_height);
        Self {
            host,
            config,
            tracker: GestureTracker::new(),
            lifecycle: RefreshLifecycle::new(),
            animator: SettleAnimator::new(),
        }
    }

    /// Release the host.
    ///
    /// Any pending animation is abandoned; outstanding frame tokens and refresh
    /// tickets die with the controller.
    pub fn unmount(mut self) -> H {
        self.animator.cancel();
        if let Some(ticket) = self.lifecycle.pending() {
            log::debug!("unmounted with refresh {ticket:?} in flight");
        }
        self.host
    }

    /// The configuration this controller was mounted with.
    pub fn config(&self) -> &PullConfig {
        &self.config
    }

    /// Shared access to the host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The active touch session, if any.
    pub fn session(&self) -> Option<&TouchSession> {
        self.tracker.session()
    }

    /// Whether releasing the current gesture would commit a refresh.
    ///
    /// `false` when no gesture is active.
    pub fn will_refresh(&self) -> bool {
        self.tracker.session().is_some_and(TouchSession::would_commit)
    }

    /// Whether a refresh action is in flight.
    pub fn is_loading(&self) -> bool {
        self.lifecycle.is_loading()
    }

    /// Whether a touch session is active.
    pub fn is_dragging(&self) -> bool {
        self.tracker.is_active()
    }

    /// Whether a settle animation is pending.
    pub fn is_settling(&self) -> bool {
        self.animator.is_pending()
    }

    /// Coarse lifecycle phase.
    pub fn phase(&self) -> RefreshPhase {
        if self.lifecycle.is_loading() {
            RefreshPhase::Committed
        } else if self.animator.is_pending() {
            RefreshPhase::Settling
        } else {
            RefreshPhase::Idle
        }
    }

    /// Handle a touch start with the currently active `touches`.
    ///
    /// Opens a session on the first touch unless one is active or a refresh is in
    /// flight. An in-flight settle animation is abandoned. Returns `true` if a session
    /// was opened.
    pub fn on_touch_start(&mut self, touches: &[Touch]) -> bool {
        let offset = self.host.scroll_offset();
        if !self.tracker.begin(touches, offset, self.lifecycle.is_loading()) {
            return false;
        }
        self.animator.cancel();
        true
    }

    /// Handle a touch move with the currently active `touches`.
    ///
    /// Returns `true` if the tracked finger moved and the offset was written.
    pub fn on_touch_move(&mut self, touches: &[Touch]) -> bool {
        match self.tracker.drag(touches) {
            Some(offset) => {
                self.host.set_scroll_offset(offset);
                true
            }
            None => false,
        }
    }

    /// Handle a touch end; `remaining` holds the touches still in contact.
    ///
    /// If the tracked finger lifted, the session ends and either the refresh action is
    /// started or the settle animation begins at `now`.
    pub fn on_touch_end(&mut self, remaining: &[Touch], now: u64) -> Option<Release> {
        let release = self.tracker.release(remaining)?;
        match release {
            Release::Commit => self.commit(),
            Release::Settle => self.settle(now),
        }
        Some(release)
    }

    /// Handle a touch cancel: the session ends without a refresh and settles at `now`.
    pub fn on_touch_cancel(&mut self, now: u64) -> bool {
        if self.tracker.cancel().is_none() {
            return false;
        }
        self.settle(now);
        true
    }

    /// Handle a native scroll notification.
    pub fn on_scroll(&mut self) -> ScrollResponse {
        let activity = ScrollActivity {
            dragging: self.tracker.is_active(),
            settling: self.animator.is_pending(),
            loading: self.lifecycle.is_loading(),
        };
        let offset = self.host.scroll_offset();
        match guard::evaluate(activity, offset, self.config.loading_height) {
            GuardDecision::Allow => ScrollResponse::empty(),
            GuardDecision::Suppress => ScrollResponse::PREVENT_DEFAULT,
            GuardDecision::Correct { offset: corrected } => {
                log::trace!("scroll to {offset} corrected to {corrected}");
                self.host.set_scroll_offset(corrected);
                ScrollResponse::PREVENT_DEFAULT | ScrollResponse::CORRECTED
            }
        }
    }

    /// Handle an animation frame scheduled with `token`.
    pub fn on_frame(&mut self, token: FrameToken, now: u64) -> FrameStatus {
        let current = self.host.scroll_offset();
        let step = match self.animator.tick(token, now, current) {
            Tick::Stale => return FrameStatus::Stale,
            Tick::Step(step) => step,
        };
        match step {
            SettleStep::Running { write } => {
                if let Some(offset) = write {
                    self.host.set_scroll_offset(offset);
                }
                self.host.request_frame(token);
                FrameStatus::Running
            }
            SettleStep::Finished { write } => {
                if let Some(offset) = write {
                    self.host.set_scroll_offset(offset);
                }
                FrameStatus::Finished
            }
        }
    }

    /// Report that the refresh action for `ticket` settled.
    ///
    /// Success and failure are handled identically: `loading` is cleared and the
    /// container settles back to the loading height from `now`. Returns `false` if
    /// `ticket` is not the in-flight refresh.
    pub fn finish_refresh(
        &mut self,
        ticket: RefreshTicket,
        outcome: impl Into<RefreshOutcome>,
        now: u64,
    ) -> bool {
        if !self.lifecycle.finish(ticket) {
            return false;
        }
        let outcome = outcome.into();
        log::debug!("refresh {ticket:?} settled: {outcome:?}");
        self.settle(now);
        true
    }

    fn commit(&mut self) {
        if let Some(ticket) = self.lifecycle.begin() {
            log::debug!("refresh committed: {ticket:?}");
            self.host.refresh(ticket);
        }
    }

    fn settle(&mut self, now: u64) {
        let animation = SettleAnimation::new(
            now,
            self.host.scroll_offset(),
            self.config.loading_height,
            self.config.animation_duration,
        );
        let token = self.animator.start(animation);
        self.host.request_frame(token);
    }
}
