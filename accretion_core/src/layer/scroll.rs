// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-relationship metadata.

use alloc::vec::Vec;

use super::id::LayerId;

/// How a layer's position is adjusted relative to its related scroll
/// containers during asynchronous scrolling.
///
/// Interpreted jointly with [`ScrollRelation::container_ids`]; the two are
/// carried in one value so readers can never observe a mismatched pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollPositioningBehavior {
    /// The layer is positioned normally by its immediate ancestor scroller.
    #[default]
    None,
    /// The layer moves with the related scroll containers.
    Moves,
    /// The layer stays stationary relative to the related scroll containers.
    Stationary,
}

/// A layer's relation to the ancestor scroll containers that influence its
/// effective position.
///
/// The default relation ([`ScrollPositioningBehavior::None`] with no
/// container ids) means "positioned normally by the immediate ancestor
/// scroller". Async-scroll compensation reads this to compute compensating
/// transforms when a scroll offset changes without a full tree update.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScrollRelation {
    /// Positioning behavior relative to [`container_ids`](Self::container_ids).
    pub behavior: ScrollPositioningBehavior,
    /// Ordered identities of the ancestor scroll containers that influence
    /// this layer's position. Empty means the layer scrolls normally.
    pub container_ids: Vec<LayerId>,
}

impl ScrollRelation {
    /// Creates a relation from a behavior and the related container ids.
    #[must_use]
    pub const fn new(behavior: ScrollPositioningBehavior, container_ids: Vec<LayerId>) -> Self {
        Self {
            behavior,
            container_ids,
        }
    }
}
