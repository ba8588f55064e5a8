// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Process-wide index over live layer nodes.

use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::host::HostLayer;
use crate::trace::{
    EventRegionChanged, NodeDetached, NodeRegistered, NodeUnregistered, ScrollRelationChanged,
    Tracer,
};

use super::id::LayerId;
use super::node::LayerNode;
use super::region::EventRegion;
use super::scroll::{ScrollPositioningBehavior, ScrollRelation};

/// A handle to a node in a [`NodeRegistry`].
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after a node is destroyed and the slot is reused. Distinct
/// from [`LayerId`]: that is the *remote* identity of the layer; this is the
/// local storage handle.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey {
    /// Slot index into the registry's storage.
    pub(crate) idx: u32,
    /// Generation counter, must match the registry's generation for the slot.
    pub(crate) generation: u32,
}

impl NodeKey {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeKey({}@gen{})", self.idx, self.generation)
    }
}

/// Owning index over all live [`LayerNode`]s of one compositing thread.
///
/// Nodes occupy slots addressed by generational [`NodeKey`]s; destroyed slots
/// are recycled via a free list. A side table maps the native handle identity
/// of every content-bearing node back to its key, answering reverse lookups
/// for native handles encountered elsewhere (a platform hit-test result,
/// say).
///
/// Registration happens exactly once, inside [`insert`](Self::insert);
/// unregistration happens exactly once, inside [`remove`](Self::remove),
/// which is the handle map's sole removal path — entries can never dangle.
///
/// The registry is plain single-owner state for the thread that owns the
/// native compositing tree. Share it by passing `&`/`&mut` borrows to
/// collaborators; there is no global instance.
pub struct NodeRegistry<H: HostLayer> {
    slots: Vec<Option<LayerNode<H>>>,
    generation: Vec<u32>,
    free_list: Vec<u32>,
    by_handle: HashMap<H::Identity, NodeKey>,
    tracer: Tracer,
}

impl<H: HostLayer> fmt::Debug for NodeRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRegistry")
            .field("len", &self.len())
            .field("tracer", &self.tracer)
            .finish_non_exhaustive()
    }
}

impl<H: HostLayer> Default for NodeRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: HostLayer> NodeRegistry<H> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            by_handle: HashMap::new(),
            tracer: Tracer::disabled(),
        }
    }

    /// Attaches a trace sink receiving registry-lifecycle events.
    #[cfg(feature = "trace")]
    pub fn set_trace_sink(&mut self, sink: alloc::boxed::Box<dyn crate::trace::TraceSink>) {
        self.tracer.set_sink(sink);
    }

    // -- Lifecycle --

    /// Inserts a node, registering its native handle identity (if it owns
    /// one) for reverse lookup.
    ///
    /// Inserting a node whose handle identity is already registered to a
    /// live node is a contract violation: debug builds assert; release
    /// builds deterministically let the newer registration replace the older
    /// mapping (discouraged — the older node stays alive but becomes
    /// unreachable through handle lookup).
    pub fn insert(&mut self, node: LayerNode<H>) -> NodeKey {
        let layer_id = node.layer_id();
        let identity = node.handle_identity();

        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.slots[idx as usize] = Some(node);
            idx
        } else {
            // Allocate a new slot.
            let idx = self.slots.len() as u32;
            self.slots.push(Some(node));
            self.generation.push(0);
            idx
        };
        let key = NodeKey {
            idx,
            generation: self.generation[idx as usize],
        };

        if let Some(identity) = identity {
            let previous = self.by_handle.insert(identity, key);
            debug_assert!(
                previous.is_none(),
                "native handle {identity:?} is already registered to a live node"
            );
        }

        self.tracer.node_registered(&NodeRegistered {
            key,
            layer_id,
            has_handle: identity.is_some(),
        });
        key
    }

    /// Destroys a node: detaches its native content from its parent, removes
    /// the handle mapping, and drops the node (releasing its native
    /// handles).
    ///
    /// The detach runs *before* unregistration, so the handle map never
    /// points at a node whose native content is mid-teardown. Already
    /// detached nodes are not detached again.
    ///
    /// # Panics
    ///
    /// Panics if the key is stale.
    pub fn remove(&mut self, key: NodeKey) {
        self.validate(key);
        let idx = key.idx as usize;
        let mut node = self.slots[idx].take().expect("slot validated as live");
        let layer_id = node.layer_id();

        if node.detach_from_parent() {
            self.tracer.node_detached(&NodeDetached { key, layer_id });
        }

        if let Some(identity) = node.handle_identity() {
            // Only drop the mapping if it still points here; a release-mode
            // duplicate registration may have replaced it already.
            if self.by_handle.get(&identity) == Some(&key) {
                self.by_handle.remove(&identity);
            }
        }

        // Bump generation so old keys immediately fail validation.
        self.generation[idx] += 1;
        self.free_list.push(key.idx);

        self.tracer.node_unregistered(&NodeUnregistered { key, layer_id });
    }

    /// Returns whether the given key refers to a live node.
    #[must_use]
    pub fn is_alive(&self, key: NodeKey) -> bool {
        (key.idx as usize) < self.slots.len()
            && self.generation[key.idx as usize] == key.generation
            && self.slots[key.idx as usize].is_some()
    }

    // -- Access --

    /// Returns the node for a key.
    ///
    /// # Panics
    ///
    /// Panics if the key is stale.
    #[must_use]
    pub fn get(&self, key: NodeKey) -> &LayerNode<H> {
        self.validate(key);
        self.slots[key.idx as usize]
            .as_ref()
            .expect("slot validated as live")
    }

    /// Returns the node for a key mutably.
    ///
    /// Mutations made through the returned reference bypass trace
    /// instrumentation; prefer [`set_event_region`](Self::set_event_region)
    /// and friends when tracing matters.
    ///
    /// # Panics
    ///
    /// Panics if the key is stale.
    #[must_use]
    pub fn get_mut(&mut self, key: NodeKey) -> &mut LayerNode<H> {
        self.validate(key);
        self.slots[key.idx as usize]
            .as_mut()
            .expect("slot validated as live")
    }

    /// Resolves a native handle identity to the key of its owning node.
    ///
    /// `None` is a normal outcome, expected for handles not created by this
    /// subsystem (unrelated UI chrome, say) — never an error.
    #[must_use]
    pub fn lookup(&self, identity: H::Identity) -> Option<NodeKey> {
        self.by_handle.get(&identity).copied()
    }

    /// Resolves a native handle identity to its owning node.
    #[must_use]
    pub fn node_for_handle(&self, identity: H::Identity) -> Option<&LayerNode<H>> {
        self.lookup(identity).map(|key| self.get(key))
    }

    /// Recovers the remote [`LayerId`] tagged on a native handle, mediated
    /// through the resolved node (there is no independent id table).
    #[must_use]
    pub fn layer_id_for_handle(&self, identity: H::Identity) -> Option<LayerId> {
        self.node_for_handle(identity).map(LayerNode::layer_id)
    }

    /// Returns the number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    /// Returns whether no nodes are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over all live nodes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &LayerNode<H>)> {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            slot.as_ref().map(|node| {
                let idx = idx as u32;
                (
                    NodeKey {
                        idx,
                        generation: self.generation[idx as usize],
                    },
                    node,
                )
            })
        })
    }

    // -- Traced mutation wrappers --

    /// Replaces a node's hit-test region.
    ///
    /// Callers are responsible for invalidating any hit-test caches they
    /// keep.
    ///
    /// # Panics
    ///
    /// Panics if the key is stale.
    pub fn set_event_region(&mut self, key: NodeKey, region: EventRegion) {
        let (layer_id, rect_count, bounds) = {
            let node = self.get_mut(key);
            node.set_event_region(region);
            let region = node.event_region();
            (node.layer_id(), region.rects().len(), region.bounding_box())
        };
        self.tracer.event_region_changed(&EventRegionChanged {
            key,
            layer_id,
            rect_count,
            bounds,
        });
    }

    /// Atomically replaces a node's scroll positioning behavior and related
    /// container ids.
    ///
    /// # Panics
    ///
    /// Panics if the key is stale.
    pub fn set_related_scroll_containers(
        &mut self,
        key: NodeKey,
        behavior: ScrollPositioningBehavior,
        container_ids: Vec<LayerId>,
    ) {
        let container_count = container_ids.len();
        let layer_id = {
            let node = self.get_mut(key);
            node.set_related_scroll_containers(behavior, container_ids);
            node.layer_id()
        };
        self.tracer.scroll_relation_changed(&ScrollRelationChanged {
            key,
            layer_id,
            behavior,
            container_count,
        });
    }

    /// Detaches a node's native content from its parent. Idempotent.
    ///
    /// # Panics
    ///
    /// Panics if the key is stale.
    pub fn detach_from_parent(&mut self, key: NodeKey) {
        let (layer_id, detached) = {
            let node = self.get_mut(key);
            (node.layer_id(), node.detach_from_parent())
        };
        if detached {
            self.tracer.node_detached(&NodeDetached { key, layer_id });
        }
    }

    /// Returns a node's scroll relation.
    ///
    /// # Panics
    ///
    /// Panics if the key is stale.
    #[must_use]
    pub fn scroll_relation(&self, key: NodeKey) -> &ScrollRelation {
        self.get(key).scroll_relation()
    }

    // -- Internal helpers --

    /// Panics if the key is stale.
    fn validate(&self, key: NodeKey) {
        assert!(
            self.is_alive(key),
            "stale NodeKey: {key:?} (current gen: {})",
            if (key.idx as usize) < self.slots.len() {
                self.generation[key.idx as usize]
            } else {
                u32::MAX
            }
        );
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::{Point, Rect};

    use super::super::mock::{HostEvent, MockLayer};
    use super::*;

    #[test]
    fn insert_lookup_mutate_remove() {
        let mut registry = NodeRegistry::new();
        let key = registry.insert(LayerNode::with_layer(LayerId(1), MockLayer::new(0x10)));

        assert_eq!(registry.lookup(0x10), Some(key));
        assert_eq!(registry.get(key).layer_id(), LayerId(1));
        assert_eq!(registry.layer_id_for_handle(0x10), Some(LayerId(1)));

        registry.set_event_region(
            key,
            EventRegion::from_rects(vec![Rect::new(0.0, 0.0, 100.0, 100.0)]),
        );
        let region = registry.node_for_handle(0x10).map(LayerNode::event_region);
        assert!(region.is_some_and(|region| region.contains(Point::new(50.0, 50.0))));
        assert!(region.is_some_and(|region| !region.contains(Point::new(200.0, 200.0))));

        registry.remove(key);
        assert_eq!(registry.lookup(0x10), None);
        assert_eq!(registry.layer_id_for_handle(0x10), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn unknown_handles_miss_without_error() {
        let mut registry = NodeRegistry::<MockLayer>::new();
        // A handle from unrelated UI chrome is a normal miss.
        assert_eq!(registry.lookup(0xdead), None);
        let _ = registry.insert(LayerNode::with_layer(LayerId(1), MockLayer::new(0x10)));
        assert_eq!(registry.lookup(0xdead), None);
    }

    #[test]
    fn placeholder_registers_but_never_resolves_by_handle() {
        let mut registry = NodeRegistry::<MockLayer>::new();
        let content_key = registry.insert(LayerNode::with_layer(LayerId(1), MockLayer::new(0x10)));
        let plain_key = registry.insert(LayerNode::plain(LayerId(7)));

        assert_eq!(registry.get(plain_key).layer_id(), LayerId(7));
        assert_eq!(registry.len(), 2);
        // The placeholder owns no handle, so no lookup can ever return it.
        assert_eq!(registry.lookup(0x10), Some(content_key));
        for identity in [0x0, 0x7, 0x10, 0xffff] {
            assert_ne!(registry.lookup(identity), Some(plain_key));
        }
    }

    #[test]
    fn live_nodes_with_distinct_handles_never_collide() {
        let mut registry = NodeRegistry::new();
        let key1 = registry.insert(LayerNode::with_layer(LayerId(1), MockLayer::new(0x10)));
        let key2 = registry.insert(LayerNode::with_layer(LayerId(2), MockLayer::new(0x20)));

        assert_eq!(registry.lookup(0x10), Some(key1));
        assert_eq!(registry.lookup(0x20), Some(key2));
        assert_eq!(registry.layer_id_for_handle(0x10), Some(LayerId(1)));
        assert_eq!(registry.layer_id_for_handle(0x20), Some(LayerId(2)));
    }

    #[test]
    fn reused_handle_identity_is_safe_across_lifetimes() {
        let mut registry = NodeRegistry::new();
        // The platform may hand out a new layer at a previously-freed
        // address; the registry tracks liveness, not raw numeric identity.
        let old_key = registry.insert(LayerNode::with_layer(LayerId(1), MockLayer::new(0x10)));
        registry.remove(old_key);

        let new_key = registry.insert(LayerNode::with_layer(LayerId(2), MockLayer::new(0x10)));
        assert_eq!(registry.lookup(0x10), Some(new_key));
        assert_eq!(registry.layer_id_for_handle(0x10), Some(LayerId(2)));
        assert!(!registry.is_alive(old_key));
        assert!(registry.is_alive(new_key));
    }

    #[test]
    fn remove_detaches_native_content() {
        let mut registry = NodeRegistry::new();
        let layer = MockLayer::new(0x10);
        let log = layer.log();
        let key = registry.insert(LayerNode::with_layer(LayerId(1), layer));

        registry.remove(key);
        assert_eq!(log.borrow().as_slice(), &[HostEvent::LayerRemoved(0x10)]);
    }

    #[test]
    fn remove_of_detached_node_does_not_detach_again() {
        let mut registry = NodeRegistry::new();
        let layer = MockLayer::new(0x10);
        let log = layer.log();
        let key = registry.insert(LayerNode::with_layer(LayerId(1), layer));

        registry.detach_from_parent(key);
        registry.detach_from_parent(key);
        registry.remove(key);
        // One native removal in total, from the first detach.
        assert_eq!(log.borrow().as_slice(), &[HostEvent::LayerRemoved(0x10)]);
    }

    #[test]
    fn atomic_scroll_relation_through_registry() {
        let mut registry = NodeRegistry::new();
        let key = registry.insert(LayerNode::with_layer(LayerId(1), MockLayer::new(0x10)));

        registry.set_related_scroll_containers(
            key,
            ScrollPositioningBehavior::Moves,
            vec![LayerId(5)],
        );
        let relation = registry.scroll_relation(key);
        assert_eq!(relation.behavior, ScrollPositioningBehavior::Moves);
        assert_eq!(relation.container_ids, vec![LayerId(5)]);
    }

    #[test]
    fn iter_visits_only_live_nodes() {
        let mut registry = NodeRegistry::new();
        let key1 = registry.insert(LayerNode::with_layer(LayerId(1), MockLayer::new(0x10)));
        let key2 = registry.insert(LayerNode::plain(LayerId(2)));
        let key3 = registry.insert(LayerNode::with_layer(LayerId(3), MockLayer::new(0x30)));
        registry.remove(key2);

        let visited: Vec<_> = registry.iter().map(|(key, node)| (key, node.layer_id())).collect();
        assert_eq!(visited, vec![(key1, LayerId(1)), (key3, LayerId(3))]);
    }

    #[test]
    #[should_panic(expected = "stale NodeKey")]
    fn stale_key_panics_on_get() {
        let mut registry = NodeRegistry::new();
        let key = registry.insert(LayerNode::with_layer(LayerId(1), MockLayer::new(0x10)));
        registry.remove(key);
        let _ = registry.get(key);
    }

    #[test]
    #[should_panic(expected = "stale NodeKey")]
    fn stale_key_panics_on_remove() {
        let mut registry = NodeRegistry::new();
        let key = registry.insert(LayerNode::with_layer(LayerId(1), MockLayer::new(0x10)));
        registry.remove(key);
        registry.remove(key);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "already registered to a live node")]
    fn duplicate_live_handle_asserts_in_debug() {
        let mut registry = NodeRegistry::new();
        let _ = registry.insert(LayerNode::with_layer(LayerId(1), MockLayer::new(0x10)));
        let _ = registry.insert(LayerNode::with_layer(LayerId(2), MockLayer::new(0x10)));
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn duplicate_live_handle_replaces_mapping_in_release() {
        let mut registry = NodeRegistry::new();
        let old_key = registry.insert(LayerNode::with_layer(LayerId(1), MockLayer::new(0x10)));
        let new_key = registry.insert(LayerNode::with_layer(LayerId(2), MockLayer::new(0x10)));

        // Newer registration wins; the older node stays alive but is no
        // longer reachable through handle lookup.
        assert_eq!(registry.lookup(0x10), Some(new_key));
        assert!(registry.is_alive(old_key));

        // Removing the older node must not disturb the newer mapping.
        registry.remove(old_key);
        assert_eq!(registry.lookup(0x10), Some(new_key));
    }

    #[cfg(feature = "trace")]
    mod trace_tests {
        use alloc::boxed::Box;
        use alloc::rc::Rc;
        use alloc::string::String;
        use alloc::vec::Vec;
        use core::cell::RefCell;

        use crate::trace::{
            EventRegionChanged, NodeDetached, NodeRegistered, NodeUnregistered, TraceSink,
        };

        use super::*;

        struct RecordingSink(Rc<RefCell<Vec<String>>>);

        impl TraceSink for RecordingSink {
            fn node_registered(&mut self, event: &NodeRegistered) {
                self.0
                    .borrow_mut()
                    .push(alloc::format!("registered {}", event.layer_id));
            }
            fn node_unregistered(&mut self, event: &NodeUnregistered) {
                self.0
                    .borrow_mut()
                    .push(alloc::format!("unregistered {}", event.layer_id));
            }
            fn node_detached(&mut self, event: &NodeDetached) {
                self.0
                    .borrow_mut()
                    .push(alloc::format!("detached {}", event.layer_id));
            }
            fn event_region_changed(&mut self, event: &EventRegionChanged) {
                self.0
                    .borrow_mut()
                    .push(alloc::format!("region {} rects", event.rect_count));
            }
        }

        #[test]
        fn remove_traces_detach_before_unregister() {
            let events = Rc::new(RefCell::new(Vec::new()));
            let mut registry = NodeRegistry::new();
            registry.set_trace_sink(Box::new(RecordingSink(Rc::clone(&events))));

            let key = registry.insert(LayerNode::with_layer(LayerId(1), MockLayer::new(0x10)));
            registry.set_event_region(
                key,
                EventRegion::from_rects(alloc::vec![Rect::new(0.0, 0.0, 10.0, 10.0)]),
            );
            registry.remove(key);

            assert_eq!(
                events.borrow().as_slice(),
                &["registered 1", "region 1 rects", "detached 1", "unregistered 1"]
            );
        }
    }
}
