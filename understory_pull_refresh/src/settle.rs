// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settle animation: the timed return to the loading height.
//!
//! When a touch sequence ends without a commit, or a refresh settles, the container is
//! animated from wherever it is back to the loading height. The animation is linear in
//! time and is driven by the host's frame scheduler: every frame the host calls back
//! with the [`FrameToken`] it was given, and the animator answers with the offset to
//! write (if any) and whether another frame is needed.
//!
//! Writes only ever move the container *forward*, toward the target. If something else
//! (a native scroll, a resize) has already moved the container further, the animation
//! leaves it alone rather than fighting it.
//!
//! Cancellation is cooperative: [`SettleAnimator::cancel`] or a new
//! [`SettleAnimator::start`] bumps the generation, and any tick carrying an older token
//! is reported as [`Tick::Stale`] without effect.
//!
//! ```
//! use understory_pull_refresh::settle::{SettleAnimation, SettleStep};
//!
//! let anim = SettleAnimation::new(1_000, 0.0, 70.0, 300);
//! assert_eq!(anim.step(1_150, 0.0), SettleStep::Running { write: Some(35.0) });
//! assert_eq!(anim.step(1_300, 35.0), SettleStep::Finished { write: Some(70.0) });
//! ```

/// A single linear interpolation from `start_offset` to `target`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SettleAnimation {
    /// Timestamp the animation started at, in milliseconds.
    pub start_time: u64,
    /// Container offset when the animation started.
    pub start_offset: f64,
    /// Offset the animation ends at (the loading height).
    pub target: f64,
    /// Duration in milliseconds.
    pub duration: u64,
}

/// Result of evaluating a [`SettleAnimation`] at a point in time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SettleStep {
    /// The animation continues; schedule another frame.
    Running {
        /// Offset to write, if it moves the container toward the target.
        write: Option<f64>,
    },
    /// The animation is over.
    Finished {
        /// Offset to write, if the container is still short of the target.
        write: Option<f64>,
    },
}

impl SettleAnimation {
    /// Create an animation.
    pub const fn new(start_time: u64, start_offset: f64, target: f64, duration: u64) -> Self {
        Self {
            start_time,
            start_offset,
            target,
            duration,
        }
    }

    /// Whether the animation has run its full duration at `now`.
    pub fn is_complete_at(&self, now: u64) -> bool {
        now.saturating_sub(self.start_time) >= self.duration
    }

    /// Interpolated offset at `now`, saturating at the target.
    pub fn offset_at(&self, now: u64) -> f64 {
        if self.is_complete_at(now) {
            return self.target;
        }
        let elapsed = now.saturating_sub(self.start_time);
        let progress = elapsed as f64 / self.duration as f64;
        let offset = self.start_offset + (self.target - self.start_offset) * progress;
        // Rounding must not carry the value past the target.
        if self.target >= self.start_offset {
            offset.min(self.target)
        } else {
            offset.max(self.target)
        }
    }

    /// Evaluate the animation at `now` against the container's `current` offset.
    pub fn step(&self, now: u64, current: f64) -> SettleStep {
        if self.is_complete_at(now) {
            let write = (current < self.target).then_some(self.target);
            return SettleStep::Finished { write };
        }
        let offset = self.offset_at(now);
        let write = (current < offset).then_some(offset);
        SettleStep::Running { write }
    }
}

/// Token handed to the host's frame scheduler.
///
/// A token is only honored while its animation is current.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

impl FrameToken {
    /// Generation number of this token.
    pub const fn generation(self) -> u64 {
        self.0
    }
}

/// Result of a [`SettleAnimator::tick`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Tick {
    /// The token was superseded or the animation already ended; do nothing.
    Stale,
    /// A step of the current animation.
    Step(SettleStep),
}

/// Owns at most one pending [`SettleAnimation`].
#[derive(Clone, Debug, Default)]
pub struct SettleAnimator {
    current: Option<SettleAnimation>,
    generation: u64,
}

impl SettleAnimator {
    /// Create an animator with nothing pending.
    pub const fn new() -> Self {
        Self {
            current: None,
            generation: 0,
        }
    }

    /// Whether an animation is pending.
    pub fn is_pending(&self) -> bool {
        self.current.is_some()
    }

    /// The pending animation, if any.
    pub fn current(&self) -> Option<&SettleAnimation> {
        self.current.as_ref()
    }

    /// Start `animation`, superseding any pending one.
    pub fn start(&mut self, animation: SettleAnimation) -> FrameToken {
        self.generation = self.generation.wrapping_add(1);
        self.current = Some(animation);
        log::debug!(
            "settle started: {} -> {} over {}ms",
            animation.start_offset,
            animation.target,
            animation.duration
        );
        FrameToken(self.generation)
    }

    /// Abandon the pending animation. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.generation = self.generation.wrapping_add(1);
        let cancelled = self.current.take().is_some();
        if cancelled {
            log::debug!("settle cancelled");
        }
        cancelled
    }

    /// Advance the animation for a frame scheduled with `token`.
    ///
    /// The animation is cleared when it reports [`SettleStep::Finished`].
    pub fn tick(&mut self, token: FrameToken, now: u64, current: f64) -> Tick {
        if token.0 != self.generation {
            return Tick::Stale;
        }
        let Some(animation) = self.current else {
            return Tick::Stale;
        };
        let step = animation.step(now, current);
        log::trace!("settle tick at {now}: {step:?}");
        if matches!(step, SettleStep::Finished { .. }) {
            self.current = None;
            log::debug!("settle finished at {}", animation.target);
        }
        Tick::Step(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_linearly() {
        let anim = SettleAnimation::new(0, 0.0, 70.0, 300);
        assert_eq!(anim.offset_at(0), 0.0);
        assert_eq!(anim.offset_at(150), 35.0);
        assert_eq!(anim.offset_at(300), 70.0);
        assert_eq!(anim.offset_at(10_000), 70.0);
    }

    #[test]
    fn writes_only_move_forward() {
        let anim = SettleAnimation::new(0, 0.0, 70.0, 300);
        // Something already scrolled the container past the interpolated value.
        assert_eq!(anim.step(150, 50.0), SettleStep::Running { write: None });
        assert_eq!(anim.step(300, 80.0), SettleStep::Finished { write: None });
    }

    #[test]
    fn start_above_target_never_writes() {
        // Released while scrolled down into the content.
        let anim = SettleAnimation::new(0, 500.0, 70.0, 300);
        assert_eq!(anim.step(100, 500.0), SettleStep::Running { write: None });
        assert_eq!(anim.step(400, 500.0), SettleStep::Finished { write: None });
    }

    #[test]
    fn timestamps_before_start_saturate() {
        let anim = SettleAnimation::new(1_000, 10.0, 70.0, 300);
        assert_eq!(anim.offset_at(900), 10.0);
    }

    #[test]
    fn animator_finishes_and_clears() {
        let mut animator = SettleAnimator::new();
        let token = animator.start(SettleAnimation::new(0, 0.0, 70.0, 300));
        assert!(animator.is_pending());
        assert_eq!(
            animator.tick(token, 150, 0.0),
            Tick::Step(SettleStep::Running { write: Some(35.0) })
        );
        assert_eq!(
            animator.tick(token, 301, 35.0),
            Tick::Step(SettleStep::Finished { write: Some(70.0) })
        );
        assert!(!animator.is_pending());
        assert_eq!(animator.tick(token, 400, 70.0), Tick::Stale);
    }

    #[test]
    fn superseded_tokens_are_stale() {
        let mut animator = SettleAnimator::new();
        let first = animator.start(SettleAnimation::new(0, 0.0, 70.0, 300));
        let second = animator.start(SettleAnimation::new(50, 10.0, 70.0, 300));
        assert_ne!(first, second);
        assert_eq!(animator.tick(first, 100, 0.0), Tick::Stale);
        assert!(matches!(animator.tick(second, 100, 10.0), Tick::Step(_)));
    }

    #[test]
    fn cancel_makes_pending_token_stale() {
        let mut animator = SettleAnimator::new();
        let token = animator.start(SettleAnimation::new(0, 0.0, 70.0, 300));
        assert!(animator.cancel());
        assert!(!animator.cancel());
        assert_eq!(animator.tick(token, 100, 0.0), Tick::Stale);
    }
}
