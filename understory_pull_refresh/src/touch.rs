// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch points as reported by the host input system.

use kurbo::Point;

/// Stable identity of a touch point for the duration of its contact.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TouchId(pub u64);

/// A single active touch point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Touch {
    /// Identity of the finger.
    pub id: TouchId,
    /// Position in the container's coordinate space. Only `y` is consulted.
    pub position: Point,
}

impl Touch {
    /// Create a touch point.
    pub const fn new(id: TouchId, position: Point) -> Self {
        Self { id, position }
    }
}

/// Find the touch with the given identity in a touch set.
pub(crate) fn find(touches: &[Touch], id: TouchId) -> Option<&Touch> {
    touches.iter().find(|touch| touch.id == id)
}
