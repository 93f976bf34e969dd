// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Refresh lifecycle: the `loading` flag and its re-entrancy guard.
//!
//! A committed release calls [`RefreshLifecycle::begin`], which flips `loading` on and
//! hands out a [`RefreshTicket`]. The host starts its refresh action and, once that
//! action settles (successfully or not), passes the ticket back to
//! [`RefreshLifecycle::finish`]. Tickets are generation-stamped, so a completion that
//! arrives twice, or for a refresh that is no longer current, is ignored.

/// Handle for one in-flight refresh action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RefreshTicket(u64);

impl RefreshTicket {
    /// Generation number of this ticket.
    pub const fn generation(self) -> u64 {
        self.0
    }
}

/// How the host's refresh action settled.
///
/// The state machine treats both outcomes the same way; the distinction only matters
/// to presentation (see [`RefreshFeedback`](crate::RefreshFeedback)).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RefreshOutcome {
    /// The action completed.
    Success,
    /// The action failed.
    Failure,
}

impl<T, E> From<Result<T, E>> for RefreshOutcome {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(_) => Self::Failure,
        }
    }
}

/// Coarse phase of a pull-to-refresh controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RefreshPhase {
    /// Nothing pending.
    Idle,
    /// A refresh action is in flight.
    Committed,
    /// A settle animation is running.
    Settling,
}

/// The `loading` flag, with at most one refresh in flight.
#[derive(Clone, Debug, Default)]
pub struct RefreshLifecycle {
    pending: Option<RefreshTicket>,
    next_generation: u64,
}

impl RefreshLifecycle {
    /// Create an idle lifecycle.
    pub const fn new() -> Self {
        Self {
            pending: None,
            next_generation: 0,
        }
    }

    /// Whether a refresh action is in flight.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// The ticket of the in-flight refresh, if any.
    pub fn pending(&self) -> Option<RefreshTicket> {
        self.pending
    }

    /// Mark a refresh as started.
    ///
    /// Returns `None` without changing state if one is already in flight.
    pub fn begin(&mut self) -> Option<RefreshTicket> {
        if self.pending.is_some() {
            log::debug!("refresh already in flight; commit ignored");
            return None;
        }
        let ticket = RefreshTicket(self.next_generation);
        self.next_generation = self.next_generation.wrapping_add(1);
        self.pending = Some(ticket);
        Some(ticket)
    }

    /// Mark the refresh identified by `ticket` as settled.
    ///
    /// Returns `false` if `ticket` is not the in-flight refresh.
    pub fn finish(&mut self, ticket: RefreshTicket) -> bool {
        if self.pending != Some(ticket) {
            log::debug!("stale refresh completion {ticket:?} ignored");
            return false;
        }
        self.pending = None;
        true
    }
}
