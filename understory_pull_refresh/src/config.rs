// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caller-supplied configuration for a pull-to-refresh container.

/// Default extent of the loader region above the content, in logical pixels.
pub const DEFAULT_LOADING_HEIGHT: f64 = 70.0;

/// Default duration of the settle animation, in milliseconds.
pub const DEFAULT_ANIMATION_DURATION: u64 = 300;

/// Configuration for a [`PullToRefresh`](crate::PullToRefresh) controller.
///
/// Values are fixed for the lifetime of a mounted controller. Unusable values
/// written directly to the fields are replaced by the defaults at mount time (see
/// [`PullConfig::sanitized`]).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PullConfig {
    /// Resting scroll offset that keeps the loader region scrolled out of view.
    pub loading_height: f64,
    /// Duration of the settle animation in milliseconds.
    pub animation_duration: u64,
}

impl PullConfig {
    /// Create a configuration with the default loading height and animation duration.
    pub const fn new() -> Self {
        Self {
            loading_height: DEFAULT_LOADING_HEIGHT,
            animation_duration: DEFAULT_ANIMATION_DURATION,
        }
    }

    /// Set the loading height.
    ///
    /// Zero, negative, or non-finite values fall back to [`DEFAULT_LOADING_HEIGHT`].
    #[must_use]
    pub fn with_loading_height(mut self, loading_height: f64) -> Self {
        self.loading_height = if loading_height.is_finite() && loading_height > 0.0 {
            loading_height
        } else {
            DEFAULT_LOADING_HEIGHT
        };
        self
    }

    /// Set the settle animation duration in milliseconds.
    ///
    /// Zero falls back to [`DEFAULT_ANIMATION_DURATION`].
    #[must_use]
    pub const fn with_animation_duration(mut self, animation_duration: u64) -> Self {
        self.animation_duration = if animation_duration == 0 {
            DEFAULT_ANIMATION_DURATION
        } else {
            animation_duration
        };
        self
    }

    /// Replace unusable values with the defaults, as the `with_*` builders do.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self::new()
            .with_loading_height(self.loading_height)
            .with_animation_duration(self.animation_duration)
    }
}

impl Default for PullConfig {
    fn default() -> Self {
        Self::new()
    }
}
