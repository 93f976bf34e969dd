// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Result feedback for the loader region.
//!
//! The controller does not care whether a refresh succeeded. A presentation layer
//! often does: it wants to swap the spinner for a success or failure mark, keep it on
//! screen for a moment, and only then let the container settle. [`RefreshFeedback`]
//! holds that "had error" state on the host side of the boundary.
//!
//! Timeline for one refresh:
//!
//! ```text
//! action settles ──show_result──► poll() yields the ticket ──after_result──► result cleared
//!   Done(outcome)                   finish_refresh(ticket)                   Pull { .. }
//! ```
//!
//! ## Example
//!
//! ```
//! use understory_pull_refresh::{Indicator, RefreshFeedback, RefreshOutcome};
//! # use understory_pull_refresh::lifecycle::RefreshLifecycle;
//! # let ticket = RefreshLifecycle::new().begin().unwrap();
//!
//! let mut feedback = RefreshFeedback::new();
//! assert_eq!(feedback.indicator(true, false), Indicator::Loading);
//!
//! feedback.on_action_settled(ticket, RefreshOutcome::Failure, 1_000);
//! assert_eq!(feedback.indicator(true, false), Indicator::Done(RefreshOutcome::Failure));
//! assert_eq!(feedback.poll(1_200), None);
//!
//! // After the result was shown, hand the ticket to `PullToRefresh::finish_refresh`.
//! assert_eq!(feedback.poll(1_500), Some((ticket, RefreshOutcome::Failure)));
//! assert_eq!(feedback.poll(2_000), None);
//! assert_eq!(feedback.indicator(false, false), Indicator::Pull { will_refresh: false });
//! ```

use crate::controller::{PullHost, PullToRefresh};
use crate::lifecycle::{RefreshOutcome, RefreshTicket};

/// Default time a settled result is shown before the container settles, in milliseconds.
pub const DEFAULT_SHOW_RESULT: u64 = 500;

/// Default time the result stays visible after the container starts settling, in milliseconds.
pub const DEFAULT_AFTER_RESULT: u64 = 500;

/// What the loader region should present.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Indicator {
    /// Idle or dragging; `will_refresh` selects the "release to refresh" variant.
    Pull {
        /// Whether releasing now would commit.
        will_refresh: bool,
    },
    /// A refresh action is in flight.
    Loading,
    /// A refresh settled recently with this outcome.
    Done(RefreshOutcome),
}

#[derive(Copy, Clone, Debug)]
struct HeldResult {
    ticket: Option<RefreshTicket>,
    outcome: RefreshOutcome,
    settled_at: u64,
}

/// Host-side result state for the loader region.
#[derive(Clone, Debug)]
pub struct RefreshFeedback {
    /// Time a result is shown before the ticket is released, in milliseconds.
    pub show_result: u64,
    /// Time the result stays visible after the ticket is released, in milliseconds.
    pub after_result: u64,
    held: Option<HeldResult>,
    last_settled: Option<RefreshTicket>,
}

impl RefreshFeedback {
    /// Create feedback state with the default delays.
    pub const fn new() -> Self {
        Self::with_delays(DEFAULT_SHOW_RESULT, DEFAULT_AFTER_RESULT)
    }

    /// Create feedback state with custom delays in milliseconds.
    pub const fn with_delays(show_result: u64, after_result: u64) -> Self {
        Self {
            show_result,
            after_result,
            held: None,
            last_settled: None,
        }
    }

    /// Record that the refresh action for `ticket` settled at `now`.
    ///
    /// Replaces a result that is only lingering after its ticket was released. A
    /// completion is ignored while another ticket is still waiting to be released,
    /// or when `ticket` was already recorded. Returns `true` if it was recorded.
    pub fn on_action_settled(
        &mut self,
        ticket: RefreshTicket,
        outcome: impl Into<RefreshOutcome>,
        now: u64,
    ) -> bool {
        let outcome = outcome.into();
        if let Some(held) = self.held
            && held.ticket.is_some_and(|pending| pending != ticket)
        {
            log::debug!("completion {ticket:?} ignored; {:?} not yet released", held.ticket);
            return false;
        }
        if self.last_settled == Some(ticket) {
            log::debug!("duplicate completion {ticket:?} ignored");
            return false;
        }
        log::debug!("refresh action {ticket:?} settled with {outcome:?}");
        self.last_settled = Some(ticket);
        self.held = Some(HeldResult {
            ticket: Some(ticket),
            outcome,
            settled_at: now,
        });
        true
    }

    /// Advance the timeline to `now`.
    ///
    /// Yields the ticket (once) when it is time to call
    /// [`PullToRefresh::finish_refresh`], and drops the result once it has been
    /// visible for both delays.
    pub fn poll(&mut self, now: u64) -> Option<(RefreshTicket, RefreshOutcome)> {
        let held = self.held.as_mut()?;
        let elapsed = now.saturating_sub(held.settled_at);
        let mut release = None;
        if elapsed >= self.show_result {
            if let Some(ticket) = held.ticket.take() {
                release = Some((ticket, held.outcome));
            }
        }
        if elapsed >= self.show_result.saturating_add(self.after_result) {
            self.held = None;
        }
        release
    }

    /// The outcome currently being shown, if any.
    pub fn outcome(&self) -> Option<RefreshOutcome> {
        self.held.map(|held| held.outcome)
    }

    /// Whether the result being shown is a failure.
    pub fn had_error(&self) -> bool {
        self.outcome() == Some(RefreshOutcome::Failure)
    }

    /// Pick the indicator from the controller's render-time queries.
    pub fn indicator(&self, loading: bool, will_refresh: bool) -> Indicator {
        match self.held {
            Some(held) => Indicator::Done(held.outcome),
            None if loading => Indicator::Loading,
            None => Indicator::Pull { will_refresh },
        }
    }

    /// Pick the indicator for a mounted controller.
    pub fn indicator_for<H: PullHost>(&self, pull: &PullToRefresh<H>) -> Indicator {
        self.indicator(pull.is_loading(), pull.will_refresh())
    }
}

impl Default for RefreshFeedback {
    fn default() -> Self {
        Self::new()
    }
}
