// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contract for platform-native layer and view objects.
//!
//! Accretion splits platform-specific work into *backend* crates. Core never
//! names a concrete native type; instead a backend wraps its layer objects
//! (`CALayer`, DOM elements, HWND-backed surfaces) in a type implementing
//! [`HostLayer`], and — on platforms with view/layer duality — wraps its view
//! objects in a type implementing [`HostView`]. Platforms without such
//! duality use [`NoView`] as the view type.
//!
//! A [`LayerNode`](crate::layer::LayerNode) exclusively owns whichever host
//! object it is constructed with, so dropping the node releases the native
//! resource through the host type's own `Drop`.
//!
//! # Handle identity
//!
//! [`HostLayer::Identity`] is the value the
//! [`NodeRegistry`](crate::layer::NodeRegistry) keys its reverse index by. It
//! must be stable for the lifetime of the handle and distinct between any two
//! simultaneously-live handles; a raw pointer value is fine even though the
//! allocator may reuse it later, because registry entries are removed at node
//! destruction and therefore never outlive the handle they index.

use core::convert::Infallible;
use core::fmt;
use core::hash::Hash;
use core::marker::PhantomData;

/// A platform-native layer object owned by a layer node.
pub trait HostLayer {
    /// Stable identity of the native handle, used as the registry key.
    type Identity: Copy + Eq + Hash + fmt::Debug;

    /// The platform's view type, or [`NoView`] where views and layers are
    /// not distinct.
    type View: HostView<Layer = Self>;

    /// Returns this handle's identity.
    fn identity(&self) -> Self::Identity;

    /// Removes this layer from its native parent layer.
    ///
    /// Must be a no-op if the layer currently has no parent.
    fn remove_from_parent(&mut self);
}

/// A platform-native view object owned by a layer node, on platforms where
/// views and layers are distinct.
///
/// The view always has a backing layer; a view-backed node answers
/// [`layer()`](crate::layer::LayerNode::layer) through [`Self::layer`].
pub trait HostView {
    /// The backing layer type.
    type Layer: HostLayer;

    /// Returns the view's backing layer.
    fn layer(&self) -> &Self::Layer;

    /// Returns the view's backing layer mutably.
    fn layer_mut(&mut self) -> &mut Self::Layer;

    /// Removes this view from its native superview.
    ///
    /// Must be a no-op if the view currently has no superview.
    fn remove_from_superview(&mut self);
}

/// Uninhabited [`HostView`] for platforms without view/layer duality.
///
/// A value of this type cannot be constructed, so view-backed nodes cannot
/// exist for layers that use it.
pub struct NoView<H>(Infallible, PhantomData<H>);

impl<H> fmt::Debug for NoView<H> {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {}
    }
}

impl<H: HostLayer> HostView for NoView<H> {
    type Layer = H;

    fn layer(&self) -> &H {
        match self.0 {}
    }

    fn layer_mut(&mut self) -> &mut H {
        match self.0 {}
    }

    fn remove_from_superview(&mut self) {
        match self.0 {}
    }
}
