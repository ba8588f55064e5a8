// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit-test event regions.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

/// The set of layer-local areas eligible to receive pointer/touch hit-tests.
///
/// Stored as a list of axis-aligned rectangles in the layer's own coordinate
/// space. Rectangles may overlap; no coalescing is performed. The default
/// region is empty, meaning the layer receives no hits.
///
/// Replacing a node's region does **not** invalidate any hit-test caches
/// downstream consumers may keep; that is the caller's responsibility.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventRegion {
    rects: Vec<Rect>,
}

impl EventRegion {
    /// Creates an empty region.
    #[must_use]
    pub const fn new() -> Self {
        Self { rects: Vec::new() }
    }

    /// Creates a region from a list of rectangles.
    ///
    /// Empty or non-finite rectangles are dropped.
    #[must_use]
    pub fn from_rects(rects: Vec<Rect>) -> Self {
        let mut region = Self::new();
        for rect in rects {
            region.add_rect(rect);
        }
        region
    }

    /// Adds a rectangle to the region.
    ///
    /// Empty or non-finite rectangles are ignored.
    pub fn add_rect(&mut self, rect: Rect) {
        if rect.is_zero_area() || !rect.is_finite() {
            return;
        }
        self.rects.push(rect.abs());
    }

    /// Returns whether the region contains no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Returns whether the region contains the given layer-local point.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.rects.iter().any(|rect| rect.contains(point))
    }

    /// Returns the smallest rectangle covering the whole region, or `None`
    /// for an empty region.
    #[must_use]
    pub fn bounding_box(&self) -> Option<Rect> {
        let mut iter = self.rects.iter();
        let first = *iter.next()?;
        Some(iter.fold(first, |acc, rect| acc.union(*rect)))
    }

    /// Returns the region's rectangles.
    #[must_use]
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }
}
