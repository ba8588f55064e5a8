// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry state dumps.
//!
//! [`dump_registry`] renders one line per live node for log output;
//! [`registry_json`] produces the same information as JSON for tooling.
//! Both read the registry without side effects.

use std::fmt::Write as _;

use accretion_core::host::HostLayer;
use accretion_core::layer::{LayerNode, NodeRegistry, append_layer_description};
use serde_json::{Value, json};

/// Renders every live node as one line, in slot order.
///
/// Each line carries the node's local key, its attachment state when
/// detached, and the attribute summary from
/// [`append_layer_description`].
#[must_use]
pub fn dump_registry<H: HostLayer>(registry: &NodeRegistry<H>) -> String {
    let mut out = String::new();
    for (key, node) in registry.iter() {
        let _ = write!(out, "{key:?}");
        if !node.is_attached() {
            out.push_str(" detached");
        }
        append_layer_description(&mut out, node);
        out.push('\n');
    }
    out
}

/// Renders the registry as a JSON document.
#[must_use]
pub fn registry_json<H: HostLayer>(registry: &NodeRegistry<H>) -> Value {
    let nodes: Vec<Value> = registry
        .iter()
        .map(|(key, node)| node_json(key.index(), key.generation(), node))
        .collect();
    json!({
        "node_count": registry.len(),
        "nodes": nodes,
    })
}

fn node_json<H: HostLayer>(index: u32, generation: u32, node: &LayerNode<H>) -> Value {
    let region = node.event_region();
    let relation = node.scroll_relation();
    json!({
        "key": format!("{index}@{generation}"),
        "layer_id": node.layer_id().0,
        "attached": node.is_attached(),
        "has_handle": node.layer().is_some(),
        "event_region": {
            "rect_count": region.rects().len(),
            "bounds": region
                .bounding_box()
                .map(|b| json!([b.x0, b.y0, b.x1, b.y1])),
        },
        "scroll": {
            "behavior": format!("{:?}", relation.behavior),
            "container_ids": relation
                .container_ids
                .iter()
                .map(|id| id.0)
                .collect::<Vec<_>>(),
        },
    })
}

#[cfg(test)]
mod tests {
    use accretion_core::host::NoView;
    use accretion_core::layer::{EventRegion, LayerId, ScrollPositioningBehavior};
    use kurbo::Rect;

    use super::*;

    struct TestLayer(u64);

    impl HostLayer for TestLayer {
        type Identity = u64;
        type View = NoView<Self>;

        fn identity(&self) -> u64 {
            self.0
        }

        fn remove_from_parent(&mut self) {}
    }

    fn sample_registry() -> NodeRegistry<TestLayer> {
        let mut registry = NodeRegistry::new();
        let key = registry.insert(LayerNode::with_layer(LayerId(1), TestLayer(0x10)));
        registry.set_event_region(
            key,
            EventRegion::from_rects(vec![Rect::new(0.0, 0.0, 100.0, 100.0)]),
        );
        registry.set_related_scroll_containers(
            key,
            ScrollPositioningBehavior::Stationary,
            vec![LayerId(9)],
        );
        let _ = registry.insert(LayerNode::plain(LayerId(7)));
        registry
    }

    #[test]
    fn dump_lists_one_line_per_node() {
        let registry = sample_registry();
        let dump = dump_registry(&registry);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "NodeKey(0@gen0) layer-id=1 region=1 rect(s) in (0,0)+(100x100)"
        );
        assert_eq!(lines[1], "NodeKey(1@gen0) layer-id=7 region=empty");
    }

    #[test]
    fn dump_marks_detached_nodes() {
        let mut registry = sample_registry();
        let key = registry.lookup(0x10).expect("node is registered");
        registry.detach_from_parent(key);
        let dump = dump_registry(&registry);
        assert!(dump.starts_with("NodeKey(0@gen0) detached layer-id=1"));
    }

    #[test]
    fn json_dump_carries_node_metadata() {
        let registry = sample_registry();
        let value = registry_json(&registry);

        assert_eq!(value["node_count"], 2);
        let nodes = value["nodes"].as_array().expect("nodes is an array");
        assert_eq!(nodes.len(), 2);

        assert_eq!(nodes[0]["layer_id"], 1);
        assert_eq!(nodes[0]["has_handle"], true);
        assert_eq!(nodes[0]["event_region"]["rect_count"], 1);
        assert_eq!(
            nodes[0]["event_region"]["bounds"],
            json!([0.0, 0.0, 100.0, 100.0])
        );
        assert_eq!(nodes[0]["scroll"]["behavior"], "Stationary");
        assert_eq!(nodes[0]["scroll"]["container_ids"], json!([9]));

        assert_eq!(nodes[1]["layer_id"], 7);
        assert_eq!(nodes[1]["has_handle"], false);
        assert_eq!(nodes[1]["event_region"]["bounds"], Value::Null);
    }
}
