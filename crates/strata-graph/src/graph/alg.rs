//! Traversal helpers over [`Graph`].
//!
//! Every traversal runs on an explicit stack so that deep graphs cannot exhaust the call stack.
//! Directed graphs are walked along successors, undirected graphs along neighbors.

use super::{Graph, HashMap, HashSet};

fn next_nodes<'a, N, E, G>(g: &'a Graph<N, E, G>, v: &str) -> Vec<&'a str>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    if g.is_directed() {
        g.successors(v)
    } else {
        g.neighbors(v)
    }
}

pub fn preorder<N, E, G>(g: &Graph<N, E, G>, roots: &[&str]) -> Vec<String>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    let mut visited: HashSet<String> = HashSet::default();
    let mut out: Vec<String> = Vec::new();

    for &root in roots {
        if !g.has_node(root) {
            continue;
        }
        let mut stack: Vec<&str> = vec![root];
        while let Some(v) = stack.pop() {
            if !visited.insert(v.to_string()) {
                continue;
            }
            out.push(v.to_string());
            // Reverse so the first neighbor is visited first.
            for w in next_nodes(g, v).into_iter().rev() {
                if !visited.contains(w) {
                    stack.push(w);
                }
            }
        }
    }
    out
}

pub fn postorder<N, E, G>(g: &Graph<N, E, G>, roots: &[&str]) -> Vec<String>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    struct Frame<'a> {
        v: &'a str,
        next: Vec<&'a str>,
        cursor: usize,
    }

    let mut visited: HashSet<String> = HashSet::default();
    let mut out: Vec<String> = Vec::new();

    for &root in roots {
        if !g.has_node(root) || !visited.insert(root.to_string()) {
            continue;
        }
        let mut stack = vec![Frame {
            v: root,
            next: next_nodes(g, root),
            cursor: 0,
        }];
        while let Some(top) = stack.last_mut() {
            if top.cursor < top.next.len() {
                let w = top.next[top.cursor];
                top.cursor += 1;
                if visited.insert(w.to_string()) {
                    stack.push(Frame {
                        v: w,
                        next: next_nodes(g, w),
                        cursor: 0,
                    });
                }
                continue;
            }
            out.push(top.v.to_string());
            stack.pop();
        }
    }
    out
}

/// Weakly connected components, in node insertion order.
pub fn components<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<String>>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    let mut seen: HashSet<&str> = HashSet::default();
    let mut out: Vec<Vec<String>> = Vec::new();

    for start in g.nodes() {
        if !seen.insert(start) {
            continue;
        }
        let mut comp: Vec<String> = Vec::new();
        let mut stack: Vec<&str> = vec![start];
        while let Some(v) = stack.pop() {
            comp.push(v.to_string());
            for w in g.neighbors(v) {
                if seen.insert(w) {
                    stack.push(w);
                }
            }
        }
        out.push(comp);
    }
    out
}

/// Strongly connected components (Tarjan), in completion order.
pub fn tarjan<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<String>>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    struct Frame<'a> {
        v: &'a str,
        succ: Vec<&'a str>,
        cursor: usize,
    }

    let mut index: usize = 0;
    let mut indices: HashMap<&str, usize> = HashMap::default();
    let mut lowlink: HashMap<&str, usize> = HashMap::default();
    let mut on_stack: HashSet<&str> = HashSet::default();
    let mut scc_stack: Vec<&str> = Vec::new();
    let mut sccs: Vec<Vec<String>> = Vec::new();

    for start in g.nodes() {
        if indices.contains_key(start) {
            continue;
        }

        indices.insert(start, index);
        lowlink.insert(start, index);
        index += 1;
        scc_stack.push(start);
        on_stack.insert(start);
        let mut stack = vec![Frame {
            v: start,
            succ: g.successors(start),
            cursor: 0,
        }];

        while let Some(top) = stack.last_mut() {
            let v = top.v;
            if top.cursor < top.succ.len() {
                let w = top.succ[top.cursor];
                top.cursor += 1;
                if let Some(&w_idx) = indices.get(w) {
                    if on_stack.contains(w) {
                        let low = lowlink[v].min(w_idx);
                        lowlink.insert(v, low);
                    }
                } else {
                    indices.insert(w, index);
                    lowlink.insert(w, index);
                    index += 1;
                    scc_stack.push(w);
                    on_stack.insert(w);
                    stack.push(Frame {
                        v: w,
                        succ: g.successors(w),
                        cursor: 0,
                    });
                }
                continue;
            }

            stack.pop();
            let v_low = lowlink[v];
            if let Some(parent) = stack.last() {
                let low = lowlink[parent.v].min(v_low);
                lowlink.insert(parent.v, low);
            }

            if v_low == indices[v] {
                let mut scc: Vec<String> = Vec::new();
                while let Some(w) = scc_stack.pop() {
                    on_stack.remove(w);
                    scc.push(w.to_string());
                    if w == v {
                        break;
                    }
                }
                sccs.push(scc);
            }
        }
    }

    sccs
}

/// Strongly connected components that contain a cycle: more than one node, or a single node
/// with a self-loop.
pub fn find_cycles<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<String>>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    tarjan(g)
        .into_iter()
        .filter(|scc| {
            scc.len() > 1
                || scc
                    .first()
                    .is_some_and(|v| !g.out_edges(v, Some(v)).is_empty())
        })
        .collect()
}

pub fn is_acyclic<N, E, G>(g: &Graph<N, E, G>) -> bool
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    find_cycles(g).is_empty()
}
