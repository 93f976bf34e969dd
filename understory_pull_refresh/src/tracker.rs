// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture tracking: from a touch sequence to a live scroll offset.
//!
//! A [`GestureTracker`] follows exactly one finger at a time. While it does, the
//! container's scroll offset is derived from the finger's vertical travel rather than
//! from native scrolling:
//!
//! ```text
//! delta_y  = touch.y - origin_y
//! proposed = scroll_start - delta_y
//! ```
//!
//! The proposed offset never goes below zero. When it would, the origin is shifted by
//! the overshoot instead (the rubber-band clamp), so pulling further keeps the content
//! pinned at the top while `delta_y` still records how far the finger actually went.
//!
//! ## Commit rule
//!
//! On release the tracker compares the *resting* offset, `scroll_start - delta_y`, to
//! zero. A resting offset at or above the top edge commits a refresh. This is not a
//! distance threshold: pulling down and then easing back before lifting avoids the
//! commit.
//!
//! ```
//! use kurbo::Point;
//! use understory_pull_refresh::tracker::{GestureTracker, Release};
//! use understory_pull_refresh::{Touch, TouchId};
//!
//! let id = TouchId(7);
//! let mut tracker = GestureTracker::new();
//! assert!(tracker.begin(&[Touch::new(id, Point::new(0.0, 200.0))], 70.0, false));
//!
//! // 60px of travel: still 10px of loader hidden.
//! assert_eq!(tracker.drag(&[Touch::new(id, Point::new(0.0, 260.0))]), Some(10.0));
//! assert_eq!(tracker.release(&[]), Some(Release::Settle));
//! ```

use crate::touch::{self, Touch, TouchId};

/// The single active gesture.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchSession {
    /// Identity of the tracked finger.
    pub id: TouchId,
    /// Vertical origin of the finger, shifted by the rubber-band clamp.
    pub origin_y: f64,
    /// Raw vertical travel from the origin at the last move.
    pub delta_y: f64,
    /// Scroll offset of the container when the session started.
    pub scroll_start: f64,
}

impl TouchSession {
    /// The offset the container would rest at without the clamp.
    pub fn resting_offset(&self) -> f64 {
        self.scroll_start - self.delta_y
    }

    /// Whether releasing now would commit a refresh.
    pub fn would_commit(&self) -> bool {
        self.resting_offset() <= 0.0
    }
}

/// Decision taken when the tracked finger lifts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Release {
    /// The loader was fully revealed; start the refresh action.
    Commit,
    /// Return to the loading height without refreshing.
    Settle,
}

/// Tracks one touch session at a time.
#[derive(Clone, Debug, Default)]
pub struct GestureTracker {
    session: Option<TouchSession>,
}

impl GestureTracker {
    /// Create an idle tracker.
    pub const fn new() -> Self {
        Self { session: None }
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&TouchSession> {
        self.session.as_ref()
    }

    /// Whether a session is active.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Open a session on the first touch of `touches`.
    ///
    /// Rejected when a session is already active, while `loading`, or when
    /// `touches` is empty. Returns `true` if a session was opened.
    pub fn begin(&mut self, touches: &[Touch], scroll_offset: f64, loading: bool) -> bool {
        if loading || self.session.is_some() {
            return false;
        }
        let Some(first) = touches.first() else {
            return false;
        };
        self.session = Some(TouchSession {
            id: first.id,
            origin_y: first.position.y,
            delta_y: 0.0,
            scroll_start: scroll_offset,
        });
        log::debug!(
            "pull session started: touch {:?} at y={} offset={}",
            first.id,
            first.position.y,
            scroll_offset
        );
        true
    }

    /// Update the session from a move event.
    ///
    /// Returns the scroll offset to write, never negative, or `None` if no session is
    /// active or the tracked finger is not in `touches`.
    pub fn drag(&mut self, touches: &[Touch]) -> Option<f64> {
        let session = self.session.as_mut()?;
        let touch = touch::find(touches, session.id)?;
        let delta_y = touch.position.y - session.origin_y;
        let proposed = session.scroll_start - delta_y;
        session.delta_y = delta_y;
        if proposed < 0.0 {
            session.origin_y -= proposed;
        }
        let offset = proposed.max(0.0);
        log::trace!("pull drag: delta_y={delta_y} offset={offset}");
        Some(offset)
    }

    /// Handle a touch end event.
    ///
    /// `remaining` holds the touches still in contact. If the tracked finger is among
    /// them, some other finger lifted and nothing happens. Otherwise the session ends
    /// and the commit decision is returned.
    pub fn release(&mut self, remaining: &[Touch]) -> Option<Release> {
        let session = self.session?;
        if touch::find(remaining, session.id).is_some() {
            return None;
        }
        self.session = None;
        let release = if session.would_commit() {
            Release::Commit
        } else {
            Release::Settle
        };
        log::debug!(
            "pull session ended: resting offset {} -> {release:?}",
            session.resting_offset()
        );
        Some(release)
    }

    /// End the session without a commit decision, e.g. on a touch cancel.
    pub fn cancel(&mut self) -> Option<TouchSession> {
        let session = self.session.take();
        if let Some(session) = &session {
            log::debug!("pull session cancelled: touch {:?}", session.id);
        }
        session
    }
}
