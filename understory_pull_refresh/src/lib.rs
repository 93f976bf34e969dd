// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pull_refresh --heading-base-level=0

//! Understory Pull Refresh: headless pull-to-refresh for scroll containers.
//!
//! This crate implements the interaction where a user drags a scroll container past
//! its top edge to trigger an asynchronous refresh. It owns the gesture-to-offset
//! state machine and the time-based settle animation, and nothing else: it draws no
//! indicator, measures no layout, and runs no futures.
//!
//! The container is laid out with a loader region of [`PullConfig::loading_height`]
//! above the content. At rest the container is scrolled exactly that far down, so the
//! loader sits just above the fold. Dragging down reveals it.
//!
//! The core pieces are:
//!
//! - [`GestureTracker`](tracker::GestureTracker): follows a single touch point and
//!   derives the live scroll offset, with a rubber-band clamp at zero.
//! - [`RefreshLifecycle`](lifecycle::RefreshLifecycle): the `loading` flag, guarded
//!   so at most one refresh is in flight.
//! - [`SettleAnimator`](settle::SettleAnimator): a frame-driven linear interpolation
//!   back to the loading height, cancelled cooperatively through [`FrameToken`]s.
//! - [`guard`]: keeps the resting container from drifting above the loading height.
//! - [`PullToRefresh`]: owns a [`PullHost`] between mount and unmount and wires the
//!   pieces together.
//! - [`feedback`]: optional bookkeeping for hosts that want to show a success or
//!   failure result before the indicator scrolls away.
//!
//! ## Host responsibilities
//!
//! The host forwards touch events, native scroll notifications and animation frames,
//! and reports when the refresh action it started has settled. All timestamps are
//! monotonic milliseconds supplied by the host.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_pull_refresh::{
//!     FrameToken, PullConfig, PullHost, PullToRefresh, RefreshOutcome, RefreshTicket, Touch,
//!     TouchId,
//! };
//!
//! #[derive(Default)]
//! struct Host {
//!     offset: f64,
//!     frame: Option<FrameToken>,
//!     refreshing: Option<RefreshTicket>,
//! }
//!
//! impl PullHost for Host {
//!     fn scroll_offset(&self) -> f64 {
//!         self.offset
//!     }
//!     fn set_scroll_offset(&mut self, offset: f64) {
//!         self.offset = offset;
//!     }
//!     fn request_frame(&mut self, token: FrameToken) {
//!         self.frame = Some(token);
//!     }
//!     fn refresh(&mut self, ticket: RefreshTicket) {
//!         self.refreshing = Some(ticket);
//!     }
//! }
//!
//! let mut pull = PullToRefresh::mount(Host::default(), PullConfig::default());
//! assert_eq!(pull.host().offset, 70.0);
//!
//! // Drag 80px down from y=200: the offset clamps at 0 and release would commit.
//! let finger = TouchId(1);
//! pull.on_touch_start(&[Touch::new(finger, Point::new(0.0, 200.0))]);
//! pull.on_touch_move(&[Touch::new(finger, Point::new(0.0, 280.0))]);
//! assert_eq!(pull.host().offset, 0.0);
//! assert!(pull.will_refresh());
//!
//! // Lift the finger: the host is asked to refresh.
//! pull.on_touch_end(&[], 1_000);
//! assert!(pull.is_loading());
//! let ticket = pull.host_mut().refreshing.take().unwrap();
//!
//! // The refresh settles; the container animates back toward the loading height.
//! pull.finish_refresh(ticket, RefreshOutcome::Success, 2_000);
//! let token = pull.host_mut().frame.take().unwrap();
//! pull.on_frame(token, 2_150);
//! assert_eq!(pull.host().offset, 35.0);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for `kurbo`'s floating-point math.
//!
//! Diagnostics go through the [`log`] facade; hosts choose the logger.
//!
//! This crate is `no_std`.

#![no_std]

pub mod config;
pub mod controller;
pub mod feedback;
pub mod guard;
pub mod lifecycle;
pub mod settle;
pub mod touch;
pub mod tracker;

pub use config::{DEFAULT_ANIMATION_DURATION, DEFAULT_LOADING_HEIGHT, PullConfig};
pub use controller::{FrameStatus, PullHost, PullToRefresh, ScrollResponse};
pub use feedback::{Indicator, RefreshFeedback};
pub use lifecycle::{RefreshOutcome, RefreshPhase, RefreshTicket};
pub use settle::FrameToken;
pub use touch::{Touch, TouchId};
