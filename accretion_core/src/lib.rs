// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Remote layer-tree node binding and native-handle registry.
//!
//! `accretion_core` mirrors a cross-process compositing layer tree inside a
//! single UI process. A remote content process mints an opaque
//! [`LayerId`](layer::LayerId) for every layer it produces; this crate binds
//! that identity to a locally-owned native layer object, tracks per-layer
//! hit-testing geometry and scroll-relationship metadata, and answers reverse
//! lookups from a native handle back to its owning node. It is `no_std`
//! compatible (with `alloc`).
//!
//! # Architecture
//!
//! The crate sits between a tree-diff decoder (which creates, mutates, and
//! destroys nodes as remote updates arrive) and read-side consumers (hit-test
//! dispatch, async-scroll compensation, diagnostic dumps):
//!
//! ```text
//!   tree-diff decoder
//!       │ insert / remove / set_*
//!       ▼
//!   NodeRegistry ──► LayerNode { LayerId, NodeContent, EventRegion, ScrollRelation }
//!       ▲
//!       │ lookup(handle identity)
//!   hit-test dispatch, async-scroll compensation
//! ```
//!
//! **[`layer`]** — The [`LayerNode`](layer::LayerNode) value type and the
//! owning [`NodeRegistry`](layer::NodeRegistry) with generational
//! [`NodeKey`](layer::NodeKey) handles and the handle-identity reverse index.
//!
//! **[`host`]** — The [`HostLayer`](host::HostLayer) and
//! [`HostView`](host::HostView) traits that platform backends implement to
//! expose their native layer/view objects to this crate.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! registry-lifecycle instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Threading
//!
//! Everything here assumes the single thread that owns the native compositing
//! tree. The registry is plain mutable state with no locks; passing it (or
//! `&` views of it) to collaborators is the supported sharing model.
//! Cross-thread use is a programming error, not a handled case.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod host;
pub mod layer;
pub mod trace;
