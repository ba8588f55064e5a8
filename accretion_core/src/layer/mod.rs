// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer node data model and registry.
//!
//! A *layer node* binds one remotely-minted identity to one locally-owned
//! native object. Each node has:
//!
//! - An identity ([`LayerId`]) — opaque, assigned by the remote content
//!   process, immutable after construction.
//! - Content ([`NodeContent`]) — a tagged choice fixed at construction:
//!   a bare native layer, a native view (whose backing layer stands in as
//!   the node's layer), or nothing for purely structural placeholder nodes.
//! - Hit-test metadata ([`EventRegion`]) — the layer-local areas eligible to
//!   receive pointer/touch hits.
//! - Scroll metadata ([`ScrollRelation`]) — which ancestor scroll containers
//!   influence the layer's effective position, and how.
//!
//! Nodes live in a [`NodeRegistry`], which owns their storage and indexes the
//! native handle identity of every content-bearing node so that a handle met
//! elsewhere (a platform hit-test result, say) can be resolved back to its
//! node. Registry entries are created exactly once, at node construction, and
//! removed exactly once, at node destruction; that is the only removal path,
//! so the reverse index can never dangle.

mod id;
#[cfg(test)]
pub(crate) mod mock;
mod node;
mod region;
mod registry;
mod scroll;

pub use id::LayerId;
pub use node::{Attachment, LayerNode, NodeContent, append_layer_description};
pub use region::EventRegion;
pub use registry::{NodeKey, NodeRegistry};
pub use scroll::{ScrollPositioningBehavior, ScrollRelation};
