// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per
//! registry event to a [`Write`](std::io::Write) destination (default:
//! stderr).

use std::io::Write;

use accretion_core::trace::{
    EventRegionChanged, NodeDetached, NodeRegistered, NodeUnregistered, ScrollRelationChanged,
    TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write)
/// destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn node_registered(&mut self, e: &NodeRegistered) {
        let _ = writeln!(
            self.writer,
            "[register] key={:?} layer-id={} handle={}",
            e.key,
            e.layer_id,
            if e.has_handle { "yes" } else { "none" },
        );
    }

    fn node_unregistered(&mut self, e: &NodeUnregistered) {
        let _ = writeln!(
            self.writer,
            "[unregister] key={:?} layer-id={}",
            e.key, e.layer_id,
        );
    }

    fn node_detached(&mut self, e: &NodeDetached) {
        let _ = writeln!(
            self.writer,
            "[detach] key={:?} layer-id={}",
            e.key, e.layer_id,
        );
    }

    fn event_region_changed(&mut self, e: &EventRegionChanged) {
        match e.bounds {
            Some(bounds) => {
                let _ = writeln!(
                    self.writer,
                    "[region] key={:?} layer-id={} rects={} bounds=({:.1},{:.1})+({:.1}x{:.1})",
                    e.key,
                    e.layer_id,
                    e.rect_count,
                    bounds.x0,
                    bounds.y0,
                    bounds.width(),
                    bounds.height(),
                );
            }
            None => {
                let _ = writeln!(
                    self.writer,
                    "[region] key={:?} layer-id={} empty",
                    e.key, e.layer_id,
                );
            }
        }
    }

    fn scroll_relation_changed(&mut self, e: &ScrollRelationChanged) {
        let _ = writeln!(
            self.writer,
            "[scroll] key={:?} layer-id={} behavior={:?} containers={}",
            e.key, e.layer_id, e.behavior, e.container_count,
        );
    }
}
