//! Nesting graph construction for compound graphs.
//!
//! Before ranking, every subgraph gets a top and a bottom border node linked to its members by
//! heavy "nesting" edges, and a synthetic root is connected to everything so the ranker sees one
//! connected graph. All edge `minlen`s are scaled by `2 * height + 1` (the rank factor) so border
//! nodes can always sit on a rank of their own. [`cleanup`] removes the scaffolding again.

use crate::util::add_dummy_node;
use crate::{BorderSide, Dummy, EdgeLabel, LayoutGraph, NodeLabel, Result};
use rustc_hash::FxHashMap as HashMap;
use tracing::{debug, instrument};

#[instrument(skip_all, name = "nesting_graph")]
pub fn run(g: &mut LayoutGraph) -> Result<()> {
    let root = add_dummy_node(
        g,
        "_root",
        NodeLabel {
            dummy: Some(Dummy::Root),
            ..Default::default()
        },
    );
    let depths = tree_depths(g);
    let height = depths.values().copied().max().unwrap_or(1) - 1;
    let node_sep = 2 * height + 1;
    g.graph_mut().nesting_root = Some(root.clone());

    g.for_each_edge_mut(|_, label| label.minlen *= node_sep);

    let mut weight: f64 = 1.0;
    g.for_each_edge(|_, label| weight += label.weight);

    let ctx = Nesting {
        root: &root,
        node_sep,
        weight,
        height,
        depths: &depths,
    };
    let top_level: Vec<String> = g.children_root().into_iter().map(str::to_string).collect();
    for v in top_level {
        ctx.connect(g, v)?;
    }

    g.graph_mut().node_rank_factor = Some(node_sep as i32);
    debug!(height, node_sep, "nesting graph built");
    Ok(())
}

/// Removes the nesting root and every nesting edge. Border nodes stay.
pub fn cleanup(g: &mut LayoutGraph) {
    if let Some(root) = g.graph_mut().nesting_root.take() {
        g.remove_node(&root);
    }
    let nesting_edges: Vec<_> = g
        .edges()
        .filter(|e| g.edge_by_key(e).is_some_and(|label| label.nesting_edge))
        .cloned()
        .collect();
    for e in nesting_edges {
        g.remove_edge_key(&e);
    }
}

/// A subgraph whose children are being connected.
struct Frame {
    v: String,
    children: Vec<String>,
    cursor: usize,
    top: String,
    bottom: String,
}

struct Nesting<'a> {
    root: &'a str,
    node_sep: usize,
    weight: f64,
    height: usize,
    depths: &'a HashMap<String, usize>,
}

impl Nesting<'_> {
    /// Adds border nodes for `start` and every subgraph below it, children first.
    fn connect(&self, g: &mut LayoutGraph, start: String) -> Result<()> {
        let mut stack: Vec<Frame> = Vec::new();
        let mut next = Some(start);

        loop {
            if let Some(v) = next.take() {
                match self.enter(g, &v)? {
                    Some((top, bottom)) => {
                        let children = g
                            .children(&v)
                            .into_iter()
                            .filter(|c| *c != top && *c != bottom)
                            .map(str::to_string)
                            .collect();
                        stack.push(Frame {
                            v,
                            children,
                            cursor: 0,
                            top,
                            bottom,
                        });
                    }
                    None => {
                        if let Some(parent) = stack.last() {
                            self.link_child(g, parent, &v);
                        }
                    }
                }
            }

            let Some(frame) = stack.last_mut() else {
                break;
            };
            if let Some(child) = frame.children.get(frame.cursor) {
                next = Some(child.clone());
                frame.cursor += 1;
                continue;
            }

            let Some(done) = stack.pop() else {
                break;
            };
            if g.parent(&done.v).is_none() {
                let depth = self.depths.get(&done.v).copied().unwrap_or(1);
                g.set_edge_with_label(
                    self.root,
                    done.top.clone(),
                    EdgeLabel {
                        weight: 0.0,
                        minlen: self.height + depth,
                        ..Default::default()
                    },
                );
            }
            if let Some(parent) = stack.last() {
                self.link_child(g, parent, &done.v);
            }
        }
        Ok(())
    }

    /// Called once per node on the way down. Leaves are tied to the root; subgraphs get their
    /// border pair, which is returned.
    fn enter(&self, g: &mut LayoutGraph, v: &str) -> Result<Option<(String, String)>> {
        if !g.has_children(v) {
            if v != self.root {
                g.set_edge_with_label(
                    self.root,
                    v,
                    EdgeLabel {
                        weight: 0.0,
                        minlen: self.node_sep,
                        ..Default::default()
                    },
                );
            }
            return Ok(None);
        }

        let top = add_dummy_node(g, "_bt", border(BorderSide::Top));
        let bottom = add_dummy_node(g, "_bb", border(BorderSide::Bottom));
        g.set_parent(top.clone(), v)?;
        g.set_parent(bottom.clone(), v)?;
        if let Some(label) = g.node_mut(v) {
            label.border_top = Some(top.clone());
            label.border_bottom = Some(bottom.clone());
        }
        Ok(Some((top, bottom)))
    }

    /// Ties `child` (or its border pair) between the border nodes of `parent`.
    fn link_child(&self, g: &mut LayoutGraph, parent: &Frame, child: &str) {
        let (child_top, child_bottom, is_subgraph) = match g.node(child) {
            Some(NodeLabel {
                border_top: Some(t),
                border_bottom: Some(b),
                ..
            }) => (t.clone(), b.clone(), true),
            _ => (child.to_string(), child.to_string(), false),
        };
        let weight = if is_subgraph {
            self.weight
        } else {
            2.0 * self.weight
        };
        let minlen = if child_top != child_bottom {
            1
        } else {
            let depth = self.depths.get(&parent.v).copied().unwrap_or(1);
            (self.height + 1).saturating_sub(depth)
        };

        let nesting = EdgeLabel {
            weight,
            minlen,
            nesting_edge: true,
            ..Default::default()
        };
        g.set_edge_with_label(parent.top.clone(), child_top, nesting.clone());
        g.set_edge_with_label(child_bottom, parent.bottom.clone(), nesting);
    }
}

fn border(side: BorderSide) -> NodeLabel {
    NodeLabel {
        dummy: Some(Dummy::Border { side }),
        ..Default::default()
    }
}

/// Depth of every node in the hierarchy, top-level nodes at depth 1.
fn tree_depths(g: &LayoutGraph) -> HashMap<String, usize> {
    let mut depths: HashMap<String, usize> = HashMap::default();
    let mut stack: Vec<(String, usize)> = g
        .children_root()
        .into_iter()
        .map(|v| (v.to_string(), 1))
        .collect();
    while let Some((v, depth)) = stack.pop() {
        for child in g.children(&v) {
            stack.push((child.to_string(), depth + 1));
        }
        depths.insert(v, depth);
    }
    depths
}
