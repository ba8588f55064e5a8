// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layer node: remote identity bound to locally-owned native content.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write as _};

use crate::host::{HostLayer, HostView as _};

use super::id::LayerId;
use super::region::EventRegion;
use super::scroll::{ScrollPositioningBehavior, ScrollRelation};

/// The native content a node owns, fixed at construction.
///
/// Exactly one variant ever applies to a node; a node is never "a layer that
/// might also have a view". View-backed nodes answer
/// [`layer()`](LayerNode::layer) through the view's backing layer.
pub enum NodeContent<H: HostLayer> {
    /// No native content; a purely structural placeholder node.
    Plain,
    /// A bare native layer.
    Layer(H),
    /// A native view, on platforms with view/layer duality.
    View(H::View),
}

impl<H: HostLayer> fmt::Debug for NodeContent<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "Plain"),
            Self::Layer(layer) => write!(f, "Layer({:?})", layer.identity()),
            Self::View(view) => write!(f, "View({:?})", view.layer().identity()),
        }
    }
}

/// Whether a node's native content is still attached to its native parent.
///
/// `Detached` is terminal for this component: re-attachment happens directly
/// against the native tree by the owning collaborator and is not modeled
/// here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Attachment {
    /// The native content sits in its native parent's child list.
    #[default]
    Attached,
    /// The native content has been removed from its parent.
    Detached,
}

/// One compositing layer local to this process, mirroring a layer produced
/// by the remote content process.
///
/// A node binds an immutable [`LayerId`] to exclusively-owned native content
/// plus hit-test and scroll metadata. Nodes are created and destroyed by the
/// tree-diff collaborator through a
/// [`NodeRegistry`](super::NodeRegistry); hit-test dispatch and async-scroll
/// compensation read them back through registry lookups.
pub struct LayerNode<H: HostLayer> {
    layer_id: LayerId,
    content: NodeContent<H>,
    event_region: EventRegion,
    scroll_relation: ScrollRelation,
    attachment: Attachment,
}

impl<H: HostLayer> fmt::Debug for LayerNode<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerNode")
            .field("layer_id", &self.layer_id)
            .field("content", &self.content)
            .field("event_region", &self.event_region)
            .field("scroll_relation", &self.scroll_relation)
            .field("attachment", &self.attachment)
            .finish()
    }
}

impl<H: HostLayer> LayerNode<H> {
    /// Creates a node owning a bare native layer.
    #[must_use]
    pub fn with_layer(layer_id: LayerId, layer: H) -> Self {
        Self::new(layer_id, NodeContent::Layer(layer))
    }

    /// Creates a node owning a native view; the node's layer is the view's
    /// backing layer.
    #[must_use]
    pub fn with_view(layer_id: LayerId, view: H::View) -> Self {
        Self::new(layer_id, NodeContent::View(view))
    }

    /// Creates a placeholder node with no native content, used for purely
    /// structural grouping.
    ///
    /// Placeholders still carry a real [`LayerId`] and register like any
    /// other node, but they own no native handle, so handle lookup can never
    /// resolve to one.
    #[must_use]
    pub fn plain(layer_id: LayerId) -> Self {
        Self::new(layer_id, NodeContent::Plain)
    }

    fn new(layer_id: LayerId, content: NodeContent<H>) -> Self {
        Self {
            layer_id,
            content,
            event_region: EventRegion::new(),
            scroll_relation: ScrollRelation::default(),
            attachment: Attachment::Attached,
        }
    }

    /// Returns the node's immutable remote identity.
    #[must_use]
    pub const fn layer_id(&self) -> LayerId {
        self.layer_id
    }

    /// Returns the node's content variant.
    #[must_use]
    pub const fn content(&self) -> &NodeContent<H> {
        &self.content
    }

    /// Returns the node's native layer, if it owns one.
    ///
    /// For view-backed nodes this is the view's backing layer; for
    /// placeholders it is `None`.
    #[must_use]
    pub fn layer(&self) -> Option<&H> {
        match &self.content {
            NodeContent::Plain => None,
            NodeContent::Layer(layer) => Some(layer),
            NodeContent::View(view) => Some(view.layer()),
        }
    }

    /// Returns the node's native layer mutably, if it owns one.
    #[must_use]
    pub fn layer_mut(&mut self) -> Option<&mut H> {
        match &mut self.content {
            NodeContent::Plain => None,
            NodeContent::Layer(layer) => Some(layer),
            NodeContent::View(view) => Some(view.layer_mut()),
        }
    }

    /// Returns the node's native view; `None` unless the node was
    /// constructed with [`with_view`](Self::with_view).
    #[must_use]
    pub fn view(&self) -> Option<&H::View> {
        match &self.content {
            NodeContent::View(view) => Some(view),
            _ => None,
        }
    }

    /// Returns the identity of the owned native handle, if any.
    ///
    /// This is the key the registry's reverse index uses.
    #[must_use]
    pub fn handle_identity(&self) -> Option<H::Identity> {
        self.layer().map(HostLayer::identity)
    }

    /// Returns the node's hit-test region.
    #[must_use]
    pub const fn event_region(&self) -> &EventRegion {
        &self.event_region
    }

    /// Replaces the node's hit-test region.
    ///
    /// Callers are responsible for invalidating any hit-test caches they
    /// keep; this node never invalidates downstream state.
    pub fn set_event_region(&mut self, region: EventRegion) {
        self.event_region = region;
    }

    /// Returns the node's scroll relation.
    #[must_use]
    pub const fn scroll_relation(&self) -> &ScrollRelation {
        &self.scroll_relation
    }

    /// Returns the identities of the ancestor scroll containers that
    /// influence this node's position. Empty means the layer is scrolled
    /// normally by an ancestor scroller.
    #[must_use]
    pub fn related_scroll_container_ids(&self) -> &[LayerId] {
        &self.scroll_relation.container_ids
    }

    /// Returns how this node is positioned relative to its related scroll
    /// containers.
    #[must_use]
    pub const fn related_scroll_container_positioning_behavior(&self) -> ScrollPositioningBehavior {
        self.scroll_relation.behavior
    }

    /// Replaces the positioning behavior and the related container ids as
    /// one value.
    ///
    /// The two always travel together; there is no way to update one without
    /// the other.
    pub fn set_related_scroll_containers(
        &mut self,
        behavior: ScrollPositioningBehavior,
        container_ids: Vec<LayerId>,
    ) {
        self.scroll_relation = ScrollRelation::new(behavior, container_ids);
    }

    /// Returns the node's attachment state.
    #[must_use]
    pub const fn attachment(&self) -> Attachment {
        self.attachment
    }

    /// Returns whether the node's native content is still attached to its
    /// native parent.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attachment == Attachment::Attached
    }

    /// Removes the node's native content from its current native parent
    /// without destroying the node or severing the content's own children.
    ///
    /// View-backed nodes remove the view from its superview; layer-backed
    /// nodes remove the layer from its superlayer; placeholders only record
    /// the state change. Idempotent: calling this while already detached is
    /// a no-op.
    ///
    /// Returns whether the call transitioned the node from attached to
    /// detached.
    pub fn detach_from_parent(&mut self) -> bool {
        if self.attachment == Attachment::Detached {
            return false;
        }
        self.attachment = Attachment::Detached;
        match &mut self.content {
            NodeContent::Plain => {}
            NodeContent::Layer(layer) => layer.remove_from_parent(),
            NodeContent::View(view) => view.remove_from_superview(),
        }
        true
    }
}

/// Appends this component's tracked attributes for `node` to an existing
/// native description string, for diagnostic dumps.
///
/// Purely additive; the native portion of `description` is left untouched.
pub fn append_layer_description<H: HostLayer>(description: &mut String, node: &LayerNode<H>) {
    let _ = write!(description, " layer-id={}", node.layer_id());
    let region = node.event_region();
    if region.is_empty() {
        description.push_str(" region=empty");
    } else if let Some(bounds) = region.bounding_box() {
        let _ = write!(
            description,
            " region={} rect(s) in ({:.0},{:.0})+({:.0}x{:.0})",
            region.rects().len(),
            bounds.x0,
            bounds.y0,
            bounds.width(),
            bounds.height()
        );
    }
}
