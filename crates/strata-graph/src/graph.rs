//! The `Graph` container.
//!
//! Nodes and edges live in append-only arenas addressed by slot index. Each node slot carries
//! its own in/out edge lists and its parent/children links, so every adjacency query is
//! proportional to the node degree rather than to the size of the graph.

use rustc_hash::FxBuildHasher;
use std::sync::Arc;

mod edge_key;
mod entries;
mod error;
mod options;

pub mod alg;

pub use edge_key::EdgeKey;
pub use error::{GraphError, Result};
pub use options::GraphOptions;

use edge_key::EdgeKeyView;
use entries::{EdgeEntry, NodeEntry};

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

type LabelFn<T> = Arc<dyn Fn() -> T + Send + Sync>;

pub struct Graph<N, E, G>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    options: GraphOptions,

    graph_label: G,
    default_node_label: LabelFn<N>,
    default_edge_label: LabelFn<E>,

    nodes: Vec<Option<NodeEntry<N>>>,
    node_index: HashMap<String, usize>,

    edges: Vec<Option<EdgeEntry<E>>>,
    edge_index: HashMap<EdgeKey, usize>,
}

impl<N, E, G> Clone for Graph<N, E, G>
where
    N: Default + Clone + 'static,
    E: Default + Clone + 'static,
    G: Default + Clone,
{
    fn clone(&self) -> Self {
        Self {
            options: self.options,
            graph_label: self.graph_label.clone(),
            default_node_label: Arc::clone(&self.default_node_label),
            default_edge_label: Arc::clone(&self.default_edge_label),
            nodes: self.nodes.clone(),
            node_index: self.node_index.clone(),
            edges: self.edges.clone(),
            edge_index: self.edge_index.clone(),
        }
    }
}

impl<N, E, G> std::fmt::Debug for Graph<N, E, G>
where
    N: Default + std::fmt::Debug + 'static,
    E: Default + std::fmt::Debug + 'static,
    G: Default + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("options", &self.options)
            .field("graph", &self.graph_label)
            .field("node_count", &self.node_index.len())
            .field("edge_count", &self.edge_index.len())
            .finish()
    }
}

impl<N, E, G> Graph<N, E, G>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            graph_label: G::default(),
            default_node_label: Arc::new(N::default),
            default_edge_label: Arc::new(E::default),
            nodes: Vec::new(),
            node_index: HashMap::default(),
            edges: Vec::new(),
            edge_index: HashMap::default(),
        }
    }

    pub fn options(&self) -> GraphOptions {
        self.options
    }

    pub fn is_multigraph(&self) -> bool {
        self.options.multigraph
    }

    pub fn is_compound(&self) -> bool {
        self.options.compound
    }

    pub fn is_directed(&self) -> bool {
        self.options.directed
    }

    pub fn set_graph(&mut self, label: G) -> &mut Self {
        self.graph_label = label;
        self
    }

    pub fn graph(&self) -> &G {
        &self.graph_label
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph_label
    }

    pub fn set_default_node_label<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn() -> N + Send + Sync + 'static,
    {
        self.default_node_label = Arc::new(f);
        self
    }

    pub fn set_default_edge_label<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn() -> E + Send + Sync + 'static,
    {
        self.default_edge_label = Arc::new(f);
        self
    }

    // === Nodes ===

    fn node_ix(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    fn node_entry(&self, ix: usize) -> Option<&NodeEntry<N>> {
        self.nodes.get(ix).and_then(Option::as_ref)
    }

    fn node_entry_mut(&mut self, ix: usize) -> Option<&mut NodeEntry<N>> {
        self.nodes.get_mut(ix).and_then(Option::as_mut)
    }

    fn id_of(&self, ix: usize) -> Option<&str> {
        self.node_entry(ix).map(|n| n.id.as_str())
    }

    fn live_nodes(&self) -> impl Iterator<Item = &NodeEntry<N>> {
        self.nodes.iter().filter_map(Option::as_ref)
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Creates the node or replaces its label in place.
    pub fn set_node(&mut self, id: impl Into<String>, label: N) -> &mut Self {
        let id = id.into();
        if let Some(ix) = self.node_ix(&id) {
            if let Some(entry) = self.node_entry_mut(ix) {
                entry.label = label;
            }
            return self;
        }
        let ix = self.nodes.len();
        self.nodes.push(Some(NodeEntry::new(id.clone(), label)));
        self.node_index.insert(id, ix);
        self
    }

    /// Creates the node with the default label if it does not exist yet.
    pub fn ensure_node(&mut self, id: impl Into<String>) -> &mut Self {
        let id = id.into();
        if self.has_node(&id) {
            return self;
        }
        let label = (self.default_node_label)();
        self.set_node(id, label)
    }

    pub fn node(&self, id: &str) -> Option<&N> {
        self.node_ix(id)
            .and_then(|ix| self.node_entry(ix))
            .map(|n| &n.label)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut N> {
        let ix = self.node_ix(id)?;
        self.node_entry_mut(ix).map(|n| &mut n.label)
    }

    pub fn node_count(&self) -> usize {
        self.node_index.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.live_nodes().map(|n| n.id.as_str())
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.live_nodes().map(|n| n.id.clone()).collect()
    }

    pub fn for_each_node<F>(&self, mut f: F)
    where
        F: FnMut(&str, &N),
    {
        for n in self.live_nodes() {
            f(&n.id, &n.label);
        }
    }

    pub fn for_each_node_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&str, &mut N),
    {
        for n in self.nodes.iter_mut().filter_map(Option::as_mut) {
            f(&n.id, &mut n.label);
        }
    }

    /// Removes the node and every incident edge. Children of a removed compound node are
    /// reattached to the root.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let Some(ix) = self.node_ix(id) else {
            return false;
        };

        let incident: Vec<usize> = self
            .node_entry(ix)
            .map(|n| n.in_edges.iter().chain(n.out_edges.iter()).copied().collect())
            .unwrap_or_default();
        for edge_ix in incident {
            self.remove_edge_at(edge_ix);
        }

        self.detach_from_parent(ix);
        let children = self
            .node_entry_mut(ix)
            .map(|n| std::mem::take(&mut n.children))
            .unwrap_or_default();
        for child in children {
            if let Some(c) = self.node_entry_mut(child) {
                c.parent = None;
            }
        }

        self.node_index.remove(id);
        self.nodes[ix] = None;
        true
    }

    pub fn sources(&self) -> Vec<&str> {
        self.live_nodes()
            .filter(|n| n.in_edges.is_empty())
            .map(|n| n.id.as_str())
            .collect()
    }

    pub fn sinks(&self) -> Vec<&str> {
        self.live_nodes()
            .filter(|n| n.out_edges.is_empty())
            .map(|n| n.id.as_str())
            .collect()
    }

    pub fn is_leaf(&self, v: &str) -> bool {
        if self.options.directed {
            self.successors(v).is_empty()
        } else {
            self.neighbors(v).is_empty()
        }
    }

    // === Hierarchy ===

    fn detach_from_parent(&mut self, ix: usize) {
        let Some(parent_ix) = self.node_entry(ix).and_then(|n| n.parent) else {
            return;
        };
        if let Some(p) = self.node_entry_mut(parent_ix) {
            p.children.retain(|&c| c != ix);
        }
        if let Some(n) = self.node_entry_mut(ix) {
            n.parent = None;
        }
    }

    /// Moves `child` under `parent`, creating either node if needed.
    pub fn set_parent(
        &mut self,
        child: impl Into<String>,
        parent: impl Into<String>,
    ) -> Result<&mut Self> {
        let child = child.into();
        let parent = parent.into();
        if !self.options.compound {
            return Err(GraphError::NotCompound { child });
        }

        let mut ancestor = Some(parent.as_str());
        while let Some(a) = ancestor {
            if a == child {
                return Err(GraphError::ParentCycle { child, parent });
            }
            ancestor = self.parent(a);
        }

        self.ensure_node(parent.clone());
        self.ensure_node(child.clone());
        let (Some(child_ix), Some(parent_ix)) = (self.node_ix(&child), self.node_ix(&parent))
        else {
            return Ok(self);
        };

        self.detach_from_parent(child_ix);
        if let Some(c) = self.node_entry_mut(child_ix) {
            c.parent = Some(parent_ix);
        }
        if let Some(p) = self.node_entry_mut(parent_ix) {
            p.children.push(child_ix);
        }
        Ok(self)
    }

    /// Moves `child` back to the implicit root.
    pub fn clear_parent(&mut self, child: &str) -> Result<&mut Self> {
        if !self.options.compound {
            return Err(GraphError::NotCompound {
                child: child.to_string(),
            });
        }
        if let Some(ix) = self.node_ix(child) {
            self.detach_from_parent(ix);
        }
        Ok(self)
    }

    pub fn parent(&self, child: &str) -> Option<&str> {
        if !self.options.compound {
            return None;
        }
        let ix = self.node_ix(child)?;
        let parent_ix = self.node_entry(ix)?.parent?;
        self.id_of(parent_ix)
    }

    pub fn children(&self, parent: &str) -> Vec<&str> {
        if !self.options.compound {
            return Vec::new();
        }
        let Some(entry) = self.node_ix(parent).and_then(|ix| self.node_entry(ix)) else {
            return Vec::new();
        };
        entry
            .children
            .iter()
            .filter_map(|&c| self.id_of(c))
            .collect()
    }

    /// Children of the implicit root: every node of a non-compound graph, or the parentless
    /// nodes of a compound graph.
    pub fn children_root(&self) -> Vec<&str> {
        self.live_nodes()
            .filter(|n| !self.options.compound || n.parent.is_none())
            .map(|n| n.id.as_str())
            .collect()
    }

    pub fn has_children(&self, v: &str) -> bool {
        self.options.compound
            && self
                .node_ix(v)
                .and_then(|ix| self.node_entry(ix))
                .is_some_and(|n| !n.children.is_empty())
    }

    // === Edges ===

    fn edge_key_view<'a>(&self, v: &'a str, w: &'a str, name: Option<&'a str>) -> EdgeKeyView<'a> {
        let (v, w) = if self.options.directed || v <= w {
            (v, w)
        } else {
            (w, v)
        };
        let name = if self.options.multigraph { name } else { None };
        EdgeKeyView { v, w, name }
    }

    fn edge_ix(&self, v: &str, w: &str, name: Option<&str>) -> Option<usize> {
        let view = self.edge_key_view(v, w, name);
        self.edge_index.get(&view).copied()
    }

    fn edge_ix_by_key(&self, key: &EdgeKey) -> Option<usize> {
        self.edge_ix(&key.v, &key.w, key.name.as_deref())
    }

    fn edge_entry(&self, ix: usize) -> Option<&EdgeEntry<E>> {
        self.edges.get(ix).and_then(Option::as_ref)
    }

    fn live_edges(&self) -> impl Iterator<Item = &EdgeEntry<E>> {
        self.edges.iter().filter_map(Option::as_ref)
    }

    pub fn edge_count(&self) -> usize {
        self.edge_index.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeKey> {
        self.live_edges().map(|e| &e.key)
    }

    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.live_edges().map(|e| e.key.clone()).collect()
    }

    pub fn for_each_edge<F>(&self, mut f: F)
    where
        F: FnMut(&EdgeKey, &E),
    {
        for e in self.live_edges() {
            f(&e.key, &e.label);
        }
    }

    pub fn for_each_edge_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&EdgeKey, &mut E),
    {
        for e in self.edges.iter_mut().filter_map(Option::as_mut) {
            f(&e.key, &mut e.label);
        }
    }

    pub fn set_edge(&mut self, v: impl Into<String>, w: impl Into<String>) -> &mut Self {
        self.insert_edge(v.into(), w.into(), None, None);
        self
    }

    pub fn set_edge_with_label(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        label: E,
    ) -> &mut Self {
        self.insert_edge(v.into(), w.into(), None, Some(label));
        self
    }

    /// Creates or updates the edge `v -> w` with an optional `name`. Names are reserved for
    /// multigraphs.
    pub fn set_edge_named(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        name: Option<impl Into<String>>,
        label: Option<E>,
    ) -> Result<&mut Self> {
        let v = v.into();
        let w = w.into();
        let name: Option<String> = name.map(Into::into);
        if let Some(name) = &name {
            if !self.options.multigraph {
                return Err(GraphError::NamedEdgeOnSimpleGraph {
                    v,
                    w,
                    name: name.clone(),
                });
            }
        }
        self.insert_edge(v, w, name, label);
        Ok(self)
    }

    pub fn set_edge_key(&mut self, key: EdgeKey, label: E) -> Result<&mut Self> {
        self.set_edge_named(key.v, key.w, key.name, Some(label))
    }

    fn insert_edge(&mut self, v: String, w: String, name: Option<String>, label: Option<E>) {
        if let Some(ix) = self.edge_ix(&v, &w, name.as_deref()) {
            if let (Some(label), Some(Some(entry))) = (label, self.edges.get_mut(ix)) {
                entry.label = label;
            }
            return;
        }

        let (v, w) = if self.options.directed || v <= w {
            (v, w)
        } else {
            (w, v)
        };
        self.ensure_node(v.clone());
        self.ensure_node(w.clone());
        let (Some(v_ix), Some(w_ix)) = (self.node_ix(&v), self.node_ix(&w)) else {
            return;
        };

        let key = EdgeKey { v, w, name };
        let ix = self.edges.len();
        self.edges.push(Some(EdgeEntry {
            key: key.clone(),
            v_ix,
            w_ix,
            label: label.unwrap_or_else(|| (self.default_edge_label)()),
        }));
        self.edge_index.insert(key, ix);
        if let Some(n) = self.node_entry_mut(v_ix) {
            n.out_edges.push(ix);
        }
        if let Some(n) = self.node_entry_mut(w_ix) {
            n.in_edges.push(ix);
        }
    }

    pub fn set_path(&mut self, nodes: &[&str]) -> &mut Self {
        for pair in nodes.windows(2) {
            self.set_edge(pair[0], pair[1]);
        }
        self
    }

    pub fn has_edge(&self, v: &str, w: &str, name: Option<&str>) -> bool {
        self.edge_ix(v, w, name).is_some()
    }

    pub fn edge(&self, v: &str, w: &str, name: Option<&str>) -> Option<&E> {
        let ix = self.edge_ix(v, w, name)?;
        self.edge_entry(ix).map(|e| &e.label)
    }

    pub fn edge_mut(&mut self, v: &str, w: &str, name: Option<&str>) -> Option<&mut E> {
        let ix = self.edge_ix(v, w, name)?;
        self.edges.get_mut(ix)?.as_mut().map(|e| &mut e.label)
    }

    pub fn edge_by_key(&self, key: &EdgeKey) -> Option<&E> {
        let ix = self.edge_ix_by_key(key)?;
        self.edge_entry(ix).map(|e| &e.label)
    }

    pub fn edge_mut_by_key(&mut self, key: &EdgeKey) -> Option<&mut E> {
        let ix = self.edge_ix_by_key(key)?;
        self.edges.get_mut(ix)?.as_mut().map(|e| &mut e.label)
    }

    fn remove_edge_at(&mut self, ix: usize) -> Option<E> {
        let entry = self.edges.get_mut(ix)?.take()?;
        self.edge_index.remove(&entry.key);
        if let Some(n) = self.node_entry_mut(entry.v_ix) {
            n.out_edges.retain(|&e| e != ix);
        }
        if let Some(n) = self.node_entry_mut(entry.w_ix) {
            n.in_edges.retain(|&e| e != ix);
        }
        Some(entry.label)
    }

    pub fn remove_edge(&mut self, v: &str, w: &str, name: Option<&str>) -> bool {
        self.take_edge(v, w, name).is_some()
    }

    pub fn remove_edge_key(&mut self, key: &EdgeKey) -> bool {
        self.take_edge(&key.v, &key.w, key.name.as_deref()).is_some()
    }

    /// Removes the edge and hands back its label.
    pub fn take_edge(&mut self, v: &str, w: &str, name: Option<&str>) -> Option<E> {
        let ix = self.edge_ix(v, w, name)?;
        self.remove_edge_at(ix)
    }

    // === Adjacency ===

    fn push_unique<'a>(out: &mut Vec<&'a str>, seen: &mut HashSet<usize>, ix: usize, id: &'a str) {
        if seen.insert(ix) {
            out.push(id);
        }
    }

    pub fn successors(&self, v: &str) -> Vec<&str> {
        if !self.options.directed {
            return self.neighbors(v);
        }
        let Some(entry) = self.node_ix(v).and_then(|ix| self.node_entry(ix)) else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(entry.out_edges.len());
        let mut seen: HashSet<usize> = HashSet::default();
        for &e in &entry.out_edges {
            let Some(edge) = self.edge_entry(e) else {
                continue;
            };
            Self::push_unique(&mut out, &mut seen, edge.w_ix, &edge.key.w);
        }
        out
    }

    pub fn predecessors(&self, v: &str) -> Vec<&str> {
        if !self.options.directed {
            return self.neighbors(v);
        }
        let Some(entry) = self.node_ix(v).and_then(|ix| self.node_entry(ix)) else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(entry.in_edges.len());
        let mut seen: HashSet<usize> = HashSet::default();
        for &e in &entry.in_edges {
            let Some(edge) = self.edge_entry(e) else {
                continue;
            };
            Self::push_unique(&mut out, &mut seen, edge.v_ix, &edge.key.v);
        }
        out
    }

    pub fn first_predecessor(&self, v: &str) -> Option<&str> {
        let entry = self.node_ix(v).and_then(|ix| self.node_entry(ix))?;
        let &e = entry.in_edges.first()?;
        self.edge_entry(e).map(|edge| edge.key.v.as_str())
    }

    /// Predecessors followed by successors, without duplicates.
    pub fn neighbors(&self, v: &str) -> Vec<&str> {
        let Some(v_ix) = self.node_ix(v) else {
            return Vec::new();
        };
        let Some(entry) = self.node_entry(v_ix) else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(entry.in_edges.len() + entry.out_edges.len());
        let mut seen: HashSet<usize> = HashSet::default();
        for &e in &entry.in_edges {
            let Some(edge) = self.edge_entry(e) else {
                continue;
            };
            let (other_ix, other) = if edge.v_ix == v_ix {
                (edge.w_ix, edge.key.w.as_str())
            } else {
                (edge.v_ix, edge.key.v.as_str())
            };
            Self::push_unique(&mut out, &mut seen, other_ix, other);
        }
        for &e in &entry.out_edges {
            let Some(edge) = self.edge_entry(e) else {
                continue;
            };
            let (other_ix, other) = if edge.w_ix == v_ix {
                (edge.v_ix, edge.key.v.as_str())
            } else {
                (edge.w_ix, edge.key.w.as_str())
            };
            Self::push_unique(&mut out, &mut seen, other_ix, other);
        }
        out
    }

    fn incident(&self, v: &str, outgoing: bool) -> Vec<usize> {
        let Some(entry) = self.node_ix(v).and_then(|ix| self.node_entry(ix)) else {
            return Vec::new();
        };
        if !self.options.directed {
            return entry
                .in_edges
                .iter()
                .chain(entry.out_edges.iter())
                .copied()
                .collect();
        }
        if outgoing {
            entry.out_edges.clone()
        } else {
            entry.in_edges.clone()
        }
    }

    fn other_end<'a>(edge: &'a EdgeEntry<E>, v: &str) -> &'a str {
        if edge.key.v == v {
            &edge.key.w
        } else {
            &edge.key.v
        }
    }

    /// Edges leaving `v`, optionally restricted to those ending at `w`.
    pub fn out_edges(&self, v: &str, w: Option<&str>) -> Vec<EdgeKey> {
        self.incident(v, true)
            .into_iter()
            .filter_map(|ix| self.edge_entry(ix))
            .filter(|e| w.is_none_or(|w| Self::other_end(e, v) == w))
            .map(|e| e.key.clone())
            .collect()
    }

    /// Edges entering `v`, optionally restricted to those starting at `u`.
    pub fn in_edges(&self, v: &str, u: Option<&str>) -> Vec<EdgeKey> {
        self.incident(v, false)
            .into_iter()
            .filter_map(|ix| self.edge_entry(ix))
            .filter(|e| u.is_none_or(|u| Self::other_end(e, v) == u))
            .map(|e| e.key.clone())
            .collect()
    }

    /// Every edge incident on `v` regardless of direction, optionally restricted to edges
    /// between `v` and `w`.
    pub fn node_edges(&self, v: &str, w: Option<&str>) -> Vec<EdgeKey> {
        if !self.options.directed {
            return self.out_edges(v, w);
        }
        let mut out = self.in_edges(v, w);
        out.extend(self.out_edges(v, w));
        out
    }

    pub fn for_each_out_edge<F>(&self, v: &str, w: Option<&str>, mut f: F)
    where
        F: FnMut(&EdgeKey, &E),
    {
        for ix in self.incident(v, true) {
            let Some(e) = self.edge_entry(ix) else {
                continue;
            };
            if w.is_none_or(|w| Self::other_end(e, v) == w) {
                f(&e.key, &e.label);
            }
        }
    }

    pub fn for_each_in_edge<F>(&self, v: &str, u: Option<&str>, mut f: F)
    where
        F: FnMut(&EdgeKey, &E),
    {
        for ix in self.incident(v, false) {
            let Some(e) = self.edge_entry(ix) else {
                continue;
            };
            if u.is_none_or(|u| Self::other_end(e, v) == u) {
                f(&e.key, &e.label);
            }
        }
    }
}

impl<N, E, G> Graph<N, E, G>
where
    N: Default + Clone + 'static,
    E: Default + Clone + 'static,
    G: Default + Clone,
{
    /// Builds the subgraph induced by the nodes accepted by `filter`.
    ///
    /// Edges survive when both endpoints do. In a compound graph a kept node whose parent was
    /// rejected is reattached to its nearest kept ancestor.
    pub fn filter_nodes<F>(&self, mut filter: F) -> Self
    where
        F: FnMut(&str, &N) -> bool,
    {
        let mut copy = Self::new(self.options);
        copy.graph_label = self.graph_label.clone();
        copy.default_node_label = Arc::clone(&self.default_node_label);
        copy.default_edge_label = Arc::clone(&self.default_edge_label);

        for n in self.live_nodes() {
            if filter(&n.id, &n.label) {
                copy.set_node(n.id.clone(), n.label.clone());
            }
        }

        for e in self.live_edges() {
            if copy.has_node(&e.key.v) && copy.has_node(&e.key.w) {
                copy.insert_edge(
                    e.key.v.clone(),
                    e.key.w.clone(),
                    e.key.name.clone(),
                    Some(e.label.clone()),
                );
            }
        }

        if self.options.compound {
            let mut resolved: HashMap<String, Option<String>> = HashMap::default();
            let kept = copy.node_ids();
            for v in &kept {
                let mut chain: Vec<&str> = Vec::new();
                let mut cursor = self.parent(v);
                let found = loop {
                    let Some(p) = cursor else {
                        break None;
                    };
                    if copy.has_node(p) {
                        break Some(p.to_string());
                    }
                    if let Some(hit) = resolved.get(p) {
                        break hit.clone();
                    }
                    chain.push(p);
                    cursor = self.parent(p);
                };
                for skipped in chain {
                    resolved.insert(skipped.to_string(), found.clone());
                }
                if let Some(parent) = found {
                    // Ancestry comes from an acyclic forest, so this cannot fail.
                    let _ = copy.set_parent(v.clone(), parent);
                }
            }
        }

        copy
    }
}
