// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll correction guard for native scroll notifications.
//!
//! While the container is at rest, nothing but a pull gesture may reveal the loader.
//! Momentum, keyboard, or assistive scrolling that lands above the loading height is
//! pushed back to it. During a drag the tracker owns the offset and native scrolling
//! is suppressed outright. While an animation runs or a refresh is pending, native
//! scrolling is left alone.

/// What the controller is doing when a native scroll arrives.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScrollActivity {
    /// A touch session is active.
    pub dragging: bool,
    /// A settle animation is pending.
    pub settling: bool,
    /// A refresh action is in flight.
    pub loading: bool,
}

/// How to treat a native scroll notification.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GuardDecision {
    /// Let the native scroll stand.
    Allow,
    /// Cancel the native scroll; the offset is owned by the gesture.
    Suppress,
    /// Cancel the native scroll and write `offset`.
    Correct {
        /// The offset to restore.
        offset: f64,
    },
}

/// Decide how to treat a native scroll that left the container at `offset`.
pub fn evaluate(activity: ScrollActivity, offset: f64, loading_height: f64) -> GuardDecision {
    if activity.dragging {
        return GuardDecision::Suppress;
    }
    if !activity.settling && !activity.loading && offset < loading_height {
        return GuardDecision::Correct {
            offset: loading_height,
        };
    }
    GuardDecision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDLE: ScrollActivity = ScrollActivity {
        dragging: false,
        settling: false,
        loading: false,
    };

    #[test]
    fn idle_scroll_above_loading_height_is_corrected() {
        assert_eq!(
            evaluate(IDLE, 12.0, 70.0),
            GuardDecision::Correct { offset: 70.0 }
        );
    }

    #[test]
    fn idle_scroll_into_content_is_allowed() {
        assert_eq!(evaluate(IDLE, 70.0, 70.0), GuardDecision::Allow);
        assert_eq!(evaluate(IDLE, 400.0, 70.0), GuardDecision::Allow);
    }

    #[test]
    fn drag_suppresses_native_scroll() {
        let activity = ScrollActivity {
            dragging: true,
            ..IDLE
        };
        assert_eq!(evaluate(activity, 0.0, 70.0), GuardDecision::Suppress);
        assert_eq!(evaluate(activity, 300.0, 70.0), GuardDecision::Suppress);
    }

    #[test]
    fn settling_or_loading_leaves_offset_alone() {
        let settling = ScrollActivity {
            settling: true,
            ..IDLE
        };
        let loading = ScrollActivity {
            loading: true,
            ..IDLE
        };
        assert_eq!(evaluate(settling, 20.0, 70.0), GuardDecision::Allow);
        assert_eq!(evaluate(loading, 0.0, 70.0), GuardDecision::Allow);
    }
}
