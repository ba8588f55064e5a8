// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording host doubles for tests.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::host::{HostLayer, HostView};

/// What the fake native tree observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HostEvent {
    /// A layer was removed from its superlayer.
    LayerRemoved(u64),
    /// A view was removed from its superview.
    ViewRemoved(u64),
}

pub(crate) type HostLog = Rc<RefCell<Vec<HostEvent>>>;

/// A fake native layer whose identity is an explicit number, so tests can
/// simulate address reuse by minting a second layer with the same value.
#[derive(Debug)]
pub(crate) struct MockLayer {
    id: u64,
    log: HostLog,
}

impl MockLayer {
    pub(crate) fn new(id: u64) -> Self {
        Self {
            id,
            log: Rc::default(),
        }
    }

    pub(crate) fn raw(&self) -> u64 {
        self.id
    }

    pub(crate) fn log(&self) -> HostLog {
        Rc::clone(&self.log)
    }
}

impl HostLayer for MockLayer {
    type Identity = u64;
    type View = MockView;

    fn identity(&self) -> u64 {
        self.id
    }

    fn remove_from_parent(&mut self) {
        self.log.borrow_mut().push(HostEvent::LayerRemoved(self.id));
    }
}

/// A fake native view wrapping its backing [`MockLayer`].
#[derive(Debug)]
pub(crate) struct MockView {
    layer: MockLayer,
}

impl MockView {
    pub(crate) fn new(layer: MockLayer) -> Self {
        Self { layer }
    }

    pub(crate) fn log(&self) -> HostLog {
        self.layer.log()
    }
}

impl HostView for MockView {
    type Layer = MockLayer;

    fn layer(&self) -> &MockLayer {
        &self.layer
    }

    fn layer_mut(&mut self) -> &mut MockLayer {
        &mut self.layer
    }

    fn remove_from_superview(&mut self) {
        self.layer
            .log
            .borrow_mut()
            .push(HostEvent::ViewRemoved(self.layer.id));
    }
}
