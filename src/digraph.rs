//! Digraph Builder (§4.H). Walks the already-constructed exploration tree
//! and emits a `petgraph` graph of typed nodes and labelled edges, which
//! `petgraph::dot::Dot` then renders to Graphviz text.
//!
//! Grounded on `cfg.rs`'s use of `petgraph::Graph` for a control-flow graph
//! with typed edges; here the edge type is the incoming branch kind
//! (`True`/`False`) rather than CFG fallthrough/branch edges.

use crate::explorer::ExplorationNode;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;

#[derive(Debug, Clone)]
pub struct NodeAttrs {
    pub id: usize,
    pub label: String,
    pub shape: &'static str,
    pub style: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct EdgeAttrs {
    pub taillabel: Option<&'static str>,
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub show_node_id: bool,
    pub use_html_like_label: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            show_node_id: true,
            use_html_like_label: true,
        }
    }
}

/// Builds the render graph from an exploration tree. Node ids assigned
/// during exploration (§4.G) may have gaps — a pruned branch still
/// consumed an id before being dropped — but the graph only ever carries
/// the ids that survived, stored as a plain `NodeAttrs` field rather than
/// relied on for lookup.
pub fn build_graph(root: &ExplorationNode, options: &RenderOptions) -> Graph<NodeAttrs, EdgeAttrs> {
    let mut graph = Graph::new();
    insert_subtree(root, options, &mut graph);
    graph
}

fn insert_subtree(node: &ExplorationNode, options: &RenderOptions, graph: &mut Graph<NodeAttrs, EdgeAttrs>) -> NodeIndex {
    let (shape, style) = shape_and_style(node);
    let attrs = NodeAttrs {
        id: node.id,
        label: render_label(node, options),
        shape,
        style,
    };
    let idx = graph.add_node(attrs);

    for child in &node.children {
        let child_idx = insert_subtree(child, options, graph);
        let edge = EdgeAttrs {
            taillabel: child.entry_edge.taillabel(),
        };
        graph.add_edge(idx, child_idx, edge);
    }

    idx
}

fn shape_and_style(node: &ExplorationNode) -> (&'static str, &'static str) {
    if node.is_terminal {
        ("box", "filled,rounded")
    } else {
        match node.kind {
            "If" => ("diamond", "solid"),
            _ => ("oval", "solid"),
        }
    }
}

fn render_label(node: &ExplorationNode, options: &RenderOptions) -> String {
    let mut label = node.label.clone();
    if node.is_terminal {
        label = format!("Test Cases\n{label}");
    }
    if options.show_node_id {
        label = format!("Node {}: {label}", node.id);
    }
    apply_markup(&label, options.use_html_like_label)
}

/// `[` / `]` become tag delimiters around a coloured sub-label; `<` / `>`
/// are always HTML-escaped (§4.H, §9 "apply it uniformly to every label").
fn apply_markup(label: &str, use_html_like_label: bool) -> String {
    if !use_html_like_label {
        return label.replace('<', "&lt;").replace('>', "&gt;");
    }
    let mut out = String::with_capacity(label.len());
    for ch in label.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '[' => out.push_str("<font color=\"blue\">"),
            ']' => out.push_str("</font>"),
            other => out.push(other),
        }
    }
    out
}

pub fn to_dot(graph: &Graph<NodeAttrs, EdgeAttrs>) -> String {
    Dot::with_attr_getters(
        graph,
        &[Config::EdgeNoLabel, Config::NodeNoLabel],
        &|_, edge| match edge.weight().taillabel {
            Some(label) => format!("taillabel=\"{label}\""),
            None => String::new(),
        },
        &|_, (_, attrs)| format!("label=\"{}\" shape={} style=\"{}\"", attrs.label, attrs.shape, attrs.style),
    )
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forker::EntryEdge;

    fn leaf(id: usize, kind: &'static str, label: &str, terminal: bool, entry_edge: EntryEdge) -> ExplorationNode {
        ExplorationNode {
            id,
            kind,
            label: label.to_string(),
            entry_edge,
            is_terminal: terminal,
            children: Vec::new(),
        }
    }

    #[test]
    fn terminal_nodes_render_as_filled_rounded_boxes() {
        let node = leaf(0, "Print", "print", true, EntryEdge::None);
        let (shape, style) = shape_and_style(&node);
        assert_eq!((shape, style), ("box", "filled,rounded"));
    }

    #[test]
    fn if_nodes_render_as_diamonds() {
        let node = leaf(0, "If", "if x > 0:", false, EntryEdge::None);
        let (shape, style) = shape_and_style(&node);
        assert_eq!((shape, style), ("diamond", "solid"));
    }

    #[test]
    fn brackets_become_font_tags_and_angle_brackets_are_escaped() {
        let rendered = apply_markup("x [<5] done", true);
        assert_eq!(rendered, "x <font color=\"blue\">&lt;5</font> done");
    }

    #[test]
    fn markup_disabled_still_escapes_angle_brackets() {
        let rendered = apply_markup("a<b [c]", false);
        assert_eq!(rendered, "a&lt;b [c]");
    }

    #[test]
    fn graph_has_one_node_per_exploration_node_and_taillabeled_edges() {
        let child = leaf(1, "Print", "print", true, EntryEdge::True);
        let mut root = leaf(0, "If", "if x>0:", false, EntryEdge::None);
        root.children.push(child);

        let graph = build_graph(&root, &RenderOptions::default());
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        let edge = graph.edge_weights().next().unwrap();
        assert_eq!(edge.taillabel, Some("True"));
    }
}
