// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for registry lifecycle.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`NodeRegistry`](crate::layer::NodeRegistry) calls as nodes are
//! registered, mutated, detached, and unregistered. All method bodies default
//! to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] owns an optional boxed sink. When the `trace` feature is
//! **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).

#[cfg(feature = "trace")]
use alloc::boxed::Box;
use core::fmt;

use kurbo::Rect;

use crate::layer::{LayerId, NodeKey, ScrollPositioningBehavior};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a node is inserted into the registry.
#[derive(Clone, Copy, Debug)]
pub struct NodeRegistered {
    /// Local key of the new node.
    pub key: NodeKey,
    /// Remote identity of the new node.
    pub layer_id: LayerId,
    /// Whether the node owns a native handle (false for placeholders).
    pub has_handle: bool,
}

/// Emitted when a node is removed from the registry.
#[derive(Clone, Copy, Debug)]
pub struct NodeUnregistered {
    /// Local key of the removed node.
    pub key: NodeKey,
    /// Remote identity of the removed node.
    pub layer_id: LayerId,
}

/// Emitted when a node's native content is detached from its parent.
///
/// Not emitted for redundant detach calls, which are no-ops.
#[derive(Clone, Copy, Debug)]
pub struct NodeDetached {
    /// Local key of the detached node.
    pub key: NodeKey,
    /// Remote identity of the detached node.
    pub layer_id: LayerId,
}

/// Emitted when a node's event region is replaced.
///
/// Carries a summary of the new region, not the region itself.
#[derive(Clone, Copy, Debug)]
pub struct EventRegionChanged {
    /// Local key of the mutated node.
    pub key: NodeKey,
    /// Remote identity of the mutated node.
    pub layer_id: LayerId,
    /// Number of rectangles in the new region.
    pub rect_count: usize,
    /// Bounding box of the new region, if non-empty.
    pub bounds: Option<Rect>,
}

/// Emitted when a node's scroll relation is replaced.
#[derive(Clone, Copy, Debug)]
pub struct ScrollRelationChanged {
    /// Local key of the mutated node.
    pub key: NodeKey,
    /// Remote identity of the mutated node.
    pub layer_id: LayerId,
    /// New positioning behavior.
    pub behavior: ScrollPositioningBehavior,
    /// Number of related scroll container ids.
    pub container_count: usize,
}

// ---------------------------------------------------------------------------
// Sink and tracer
// ---------------------------------------------------------------------------

/// Receives registry-lifecycle events.
///
/// Every method defaults to a no-op.
pub trait TraceSink {
    /// A node was inserted into the registry.
    fn node_registered(&mut self, event: &NodeRegistered) {
        let _ = event;
    }

    /// A node was removed from the registry.
    fn node_unregistered(&mut self, event: &NodeUnregistered) {
        let _ = event;
    }

    /// A node's native content was detached from its parent.
    fn node_detached(&mut self, event: &NodeDetached) {
        let _ = event;
    }

    /// A node's event region was replaced.
    fn event_region_changed(&mut self, event: &EventRegionChanged) {
        let _ = event;
    }

    /// A node's scroll relation was replaced.
    fn scroll_relation_changed(&mut self, event: &ScrollRelationChanged) {
        let _ = event;
    }
}

/// Dispatches events to an optional [`TraceSink`].
///
/// Without the `trace` feature every method body is empty.
pub struct Tracer {
    #[cfg(feature = "trace")]
    sink: Option<Box<dyn TraceSink>>,
}

impl fmt::Debug for Tracer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::disabled()
    }
}

impl Tracer {
    /// Creates a tracer with no sink attached.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            #[cfg(feature = "trace")]
            sink: None,
        }
    }

    /// Creates a tracer dispatching to the given sink.
    #[cfg(feature = "trace")]
    #[must_use]
    pub fn new(sink: Box<dyn TraceSink>) -> Self {
        Self { sink: Some(sink) }
    }

    /// Attaches a sink, replacing any previous one.
    #[cfg(feature = "trace")]
    pub fn set_sink(&mut self, sink: Box<dyn TraceSink>) {
        self.sink = Some(sink);
    }

    /// Dispatches [`NodeRegistered`].
    #[inline]
    pub fn node_registered(&mut self, event: &NodeRegistered) {
        let _ = event;
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.node_registered(event);
        }
    }

    /// Dispatches [`NodeUnregistered`].
    #[inline]
    pub fn node_unregistered(&mut self, event: &NodeUnregistered) {
        let _ = event;
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.node_unregistered(event);
        }
    }

    /// Dispatches [`NodeDetached`].
    #[inline]
    pub fn node_detached(&mut self, event: &NodeDetached) {
        let _ = event;
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.node_detached(event);
        }
    }

    /// Dispatches [`EventRegionChanged`].
    #[inline]
    pub fn event_region_changed(&mut self, event: &EventRegionChanged) {
        let _ = event;
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.event_region_changed(event);
        }
    }

    /// Dispatches [`ScrollRelationChanged`].
    #[inline]
    pub fn scroll_relation_changed(&mut self, event: &ScrollRelationChanged) {
        let _ = event;
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.scroll_relation_changed(event);
        }
    }
}
